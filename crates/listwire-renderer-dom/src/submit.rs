use listwire::ReorderRequest;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, RequestInit, Response};
use zoon::Task;

use crate::error::HostError;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Fire-and-forget POST of the new order. The page keeps the order the user
/// dropped even when the server rejects it; failures only reach the console.
pub fn post_reorder(endpoint: String, field: String, request: ReorderRequest) {
    let body = request.to_form_body(&field);
    Task::start(async move {
        #[cfg(debug_assertions)]
        zoon::println!("[listwire] POST {endpoint}: {body}");
        if let Err(error) = send(&endpoint, &body).await {
            zoon::eprintln!("[listwire] reorder submission to {endpoint} failed: {error}");
        }
    });
}

async fn send(endpoint: &str, body: &str) -> Result<(), HostError> {
    let window = web_sys::window().ok_or(HostError::NoWindow)?;

    let headers = Headers::new()?;
    headers.set("Content-Type", FORM_CONTENT_TYPE)?;
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(body));

    let response = JsFuture::from(window.fetch_with_str_and_init(endpoint, &init)).await?;
    let response: Response = response.dyn_into()?;
    if response.ok() {
        Ok(())
    } else {
        Err(HostError::Status(response.status()))
    }
}
