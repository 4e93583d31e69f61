//! Runs in a real browser: `wasm-pack test --headless --firefox crates/listwire-renderer-dom`

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Promise, Reflect};
use listwire::{ControllerConfig, ItemView, ListHost};
use listwire_renderer_dom::{DomList, ListwireApp};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{
    CustomEvent, Document, DragEvent, DragEventInit, Element, Event, EventInit, Headers, HtmlElement,
    HtmlInputElement, Response, ResponseInit,
};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn item_html(id: &str) -> String {
    format!(
        r#"<li class="todo-item" data-todo-id="{id}" draggable="true" style="display:block;height:40px;margin:0;padding:0">
            <input type="hidden" name="todo-order" value="">
            <div class="todo-view"><span class="todo-text">Todo {id}</span></div>
            <div class="todo-actions"><button class="edit-btn">Edit</button></div>
            <form class="todo-edit hidden"><input name="text" value="Todo {id}"><button type="button" class="cancel-btn">Cancel</button></form>
        </li>"#
    )
}

/// Replaces any earlier `#todo-list` with a fresh one holding `ids`.
fn fixture(ids: &[&str]) -> Element {
    let document = document();
    if let Some(old) = document.get_element_by_id("todo-list") {
        old.remove();
    }
    let container = document.create_element("ul").unwrap();
    container.set_id("todo-list");
    container.set_attribute("style", "margin:0;padding:0;list-style:none").unwrap();
    container.set_inner_html(&ids.iter().map(|id| item_html(id)).collect::<String>());
    document.body().unwrap().append_child(&container).unwrap();
    container
}

fn item(container: &Element, id: &str) -> Element {
    container
        .query_selector(&format!(r#"[data-todo-id="{id}"]"#))
        .unwrap()
        .unwrap()
}

fn part(item: &Element, selector: &str) -> Element {
    item.query_selector(selector).unwrap().unwrap()
}

fn ids(container: &Element) -> Vec<String> {
    let list = DomList::new(container.clone(), ControllerConfig::default());
    list.items()
        .iter()
        .filter_map(|item| list.item_id(item))
        .map(|id| id.as_str().to_owned())
        .collect()
}

fn drag_event(event_type: &str, client_y: i32) -> DragEvent {
    let init = DragEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    init.set_client_y(client_y);
    DragEvent::new_with_event_init_dict(event_type, &init).unwrap()
}

fn click(element: &Element) {
    element.dyn_ref::<HtmlElement>().unwrap().click();
}

fn is_hidden(element: &Element) -> bool {
    element.class_list().contains("hidden")
}

#[wasm_bindgen_test]
fn dom_list_reads_items_in_document_order() {
    let container = fixture(&["1", "2", "3"]);
    let list = DomList::new(container.clone(), ControllerConfig::default());

    assert_eq!(list.items().len(), 3);
    assert_eq!(ids(&container), ["1", "2", "3"]);

    let first = list.item_box(&item(&container, "1"));
    let second = list.item_box(&item(&container, "2"));
    assert_eq!(first.height, 40.);
    assert_eq!(second.top - first.top, 40.);
}

#[wasm_bindgen_test]
fn dom_list_moves_items() {
    let container = fixture(&["1", "2", "3"]);
    let mut list = DomList::new(container.clone(), ControllerConfig::default());

    list.insert_before(&item(&container, "3"), &item(&container, "1"));
    assert_eq!(ids(&container), ["3", "1", "2"]);

    list.append(&item(&container, "3"));
    assert_eq!(ids(&container), ["1", "2", "3"]);
}

#[wasm_bindgen_test]
fn dom_list_switches_views_and_resets_the_form() {
    let container = fixture(&["1"]);
    let mut list = DomList::new(container.clone(), ControllerConfig::default());
    let todo = item(&container, "1");

    assert_eq!(list.current_view(&todo), ItemView::Viewing);
    list.show_view(&todo, ItemView::Editing);
    assert_eq!(list.current_view(&todo), ItemView::Editing);
    assert!(is_hidden(&part(&todo, ".todo-view")));
    assert!(is_hidden(&part(&todo, ".todo-actions")));
    assert!(!is_hidden(&part(&todo, ".todo-edit")));

    let input: HtmlInputElement = part(&todo, r#"input[name="text"]"#).dyn_into().unwrap();
    input.set_value("changed");
    list.reset_editor(&todo);
    assert_eq!(input.value(), "Todo 1");
}

/// One recorded `window.fetch` call.
#[derive(Clone, Debug, PartialEq)]
struct FetchCall {
    url: String,
    method: Option<String>,
    content_type: Option<String>,
    body: Option<String>,
}

/// Replaces `window.fetch` with a recorder answering `status`; restores the
/// real one on drop.
struct FetchStub {
    calls: Rc<RefCell<Vec<FetchCall>>>,
    original: JsValue,
    _stub: Closure<dyn FnMut(JsValue, JsValue) -> Promise>,
}

impl FetchStub {
    fn install(status: u16) -> Self {
        let window = web_sys::window().unwrap();
        let original = Reflect::get(&window, &JsValue::from_str("fetch")).unwrap();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let stub = Closure::wrap(Box::new({
            let calls = calls.clone();
            move |url: JsValue, init: JsValue| -> Promise {
                let field = |name: &str| Reflect::get(&init, &JsValue::from_str(name)).ok();
                let content_type = field("headers")
                    .and_then(|headers| headers.dyn_into::<Headers>().ok())
                    .and_then(|headers| headers.get("Content-Type").ok().flatten());
                calls.borrow_mut().push(FetchCall {
                    url: url.as_string().unwrap_or_default(),
                    method: field("method").and_then(|method| method.as_string()),
                    content_type,
                    body: field("body").and_then(|body| body.as_string()),
                });
                let init = ResponseInit::new();
                init.set_status(status);
                Promise::resolve(&Response::new_with_opt_str_and_init(None, &init).unwrap())
            }
        }) as Box<dyn FnMut(JsValue, JsValue) -> Promise>);
        Reflect::set(&window, &JsValue::from_str("fetch"), stub.as_ref()).unwrap();
        Self {
            calls,
            original,
            _stub: stub,
        }
    }

    fn calls(&self) -> Vec<FetchCall> {
        self.calls.borrow().clone()
    }
}

impl Drop for FetchStub {
    fn drop(&mut self) {
        let window = web_sys::window().unwrap();
        Reflect::set(&window, &JsValue::from_str("fetch"), &self.original).unwrap();
    }
}

/// Drags item "1" below every other item and releases it there.
fn drag_first_to_end(container: &Element) {
    let first = item(container, "1");
    let below = container.get_bounding_client_rect().bottom() as i32 + 10;
    first.dispatch_event(&drag_event("dragstart", 0)).unwrap();
    container.dispatch_event(&drag_event("dragover", below)).unwrap();
    container.dispatch_event(&drag_event("drop", below)).unwrap();
    first.dispatch_event(&drag_event("dragend", below)).unwrap();
}

#[wasm_bindgen_test]
async fn dragging_first_item_below_the_list_reorders_it() {
    let fetch = FetchStub::install(200);
    let container = fixture(&["1", "2", "3"]);
    let _app = ListwireApp::start(ControllerConfig::default()).unwrap();

    let first = item(&container, "1");
    let below = container.get_bounding_client_rect().bottom() as i32 + 10;
    first.dispatch_event(&drag_event("dragstart", 0)).unwrap();
    assert!(first.class_list().contains("dragging"));

    container.dispatch_event(&drag_event("dragover", below)).unwrap();
    assert_eq!(ids(&container), ["2", "3", "1"]);

    container.dispatch_event(&drag_event("drop", below)).unwrap();
    first.dispatch_event(&drag_event("dragend", below)).unwrap();

    assert!(!first.class_list().contains("dragging"));
    let order_field: HtmlInputElement = part(&item(&container, "2"), r#"input[name="todo-order"]"#)
        .dyn_into()
        .unwrap();
    assert_eq!(order_field.value(), "2");

    zoon::Timer::sleep(50).await;
    assert_eq!(
        fetch.calls(),
        [FetchCall {
            url: "/todos/reorder".to_owned(),
            method: Some("POST".to_owned()),
            content_type: Some("application/x-www-form-urlencoded".to_owned()),
            body: Some("todo-ids=2,3,1".to_owned()),
        }]
    );
}

#[wasm_bindgen_test]
async fn configured_endpoint_and_field_are_posted() {
    let fetch = FetchStub::install(200);
    let container = fixture(&["1", "2"]);
    let config = ControllerConfig {
        reorder_endpoint: "/lists/7/order".to_owned(),
        reorder_field: "ids".to_owned(),
        ..ControllerConfig::default()
    };
    let _app = ListwireApp::start(config).unwrap();

    drag_first_to_end(&container);
    zoon::Timer::sleep(50).await;

    let calls = fetch.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].url, "/lists/7/order");
    assert_eq!(calls[0].body.as_deref(), Some("ids=2,1"));
}

#[wasm_bindgen_test]
async fn rejected_submission_keeps_the_dropped_order() {
    let fetch = FetchStub::install(500);
    let container = fixture(&["1", "2", "3"]);
    let _app = ListwireApp::start(ControllerConfig::default()).unwrap();

    drag_first_to_end(&container);
    zoon::Timer::sleep(50).await;

    assert_eq!(fetch.calls().len(), 1);
    assert_eq!(ids(&container), ["2", "3", "1"]);
    assert!(!item(&container, "1").class_list().contains("dragging"));
}

#[wasm_bindgen_test]
async fn repeated_rebinds_deliver_each_drop_once() {
    let fetch = FetchStub::install(200);
    let container = fixture(&["1", "2", "3"]);
    let app = ListwireApp::start(ControllerConfig::default()).unwrap();
    let listeners = app.listener_count();

    for _ in 0..3 {
        app.rebind().unwrap();
    }
    // A partial update that left the container node in place
    let init = EventInit::new();
    init.set_bubbles(true);
    let swapped = Event::new_with_event_init_dict("htmx:afterSwap", &init).unwrap();
    document().body().unwrap().dispatch_event(&swapped).unwrap();

    assert!(app.is_bound_to(&container));
    assert_eq!(app.listener_count(), listeners);

    drag_first_to_end(&container);
    zoon::Timer::sleep(50).await;

    assert_eq!(fetch.calls().len(), 1);
    assert_eq!(ids(&container), ["2", "3", "1"]);
}

#[wasm_bindgen_test]
fn edit_and_cancel_clicks_toggle_the_form() {
    let container = fixture(&["1", "2"]);
    let _app = ListwireApp::start(ControllerConfig::default()).unwrap();
    let todo = item(&container, "2");
    let html_item = todo.dyn_ref::<HtmlElement>().unwrap();

    click(&part(&todo, ".edit-btn"));
    assert!(!is_hidden(&part(&todo, ".todo-edit")));
    assert!(!html_item.draggable());

    click(&part(&todo, ".cancel-btn"));
    assert!(is_hidden(&part(&todo, ".todo-edit")));
    assert!(!is_hidden(&part(&todo, ".todo-view")));
    assert!(html_item.draggable());
}

#[wasm_bindgen_test]
async fn scroll_event_highlights_last_item_for_a_while() {
    let container = fixture(&["1", "2", "3"]);
    let config = ControllerConfig {
        highlight_ms: 20,
        ..ControllerConfig::default()
    };
    let _app = ListwireApp::start(config).unwrap();
    let last = item(&container, "3");

    container
        .dispatch_event(&CustomEvent::new("scroll-to-last").unwrap())
        .unwrap();
    assert!(last.class_list().contains("highlight"));

    zoon::Timer::sleep(100).await;
    assert!(!last.class_list().contains("highlight"));
}

#[wasm_bindgen_test]
fn swap_event_rebinds_a_replaced_container() {
    fixture(&["1"]);
    let app = ListwireApp::start(ControllerConfig::default()).unwrap();

    let replacement = fixture(&["1", "2"]);
    assert!(!app.is_bound_to(&replacement));

    let init = EventInit::new();
    init.set_bubbles(true);
    let swapped = Event::new_with_event_init_dict("htmx:afterSwap", &init).unwrap();
    document().body().unwrap().dispatch_event(&swapped).unwrap();
    assert!(app.is_bound_to(&replacement));

    let todo = item(&replacement, "2");
    click(&part(&todo, ".edit-btn"));
    assert!(!is_hidden(&part(&todo, ".todo-edit")));
}

#[wasm_bindgen_test]
fn config_attribute_is_read_from_markup() {
    let container = fixture(&["1"]);
    container
        .set_attribute(listwire_renderer_dom::CONFIG_ATTRIBUTE, r#"{"hidden_class": "is-hidden"}"#)
        .unwrap();
    let form = part(&item(&container, "1"), ".todo-edit");
    form.class_list().replace("hidden", "is-hidden").unwrap();
    let _app = ListwireApp::start_from_markup().unwrap();

    click(&part(&item(&container, "1"), ".edit-btn"));

    assert!(!form.class_list().contains("is-hidden"));
    assert!(part(&item(&container, "1"), ".todo-view").class_list().contains("is-hidden"));
}

#[wasm_bindgen_test]
fn missing_container_is_reported() {
    if let Some(old) = document().get_element_by_id("todo-list") {
        old.remove();
    }
    let error = ListwireApp::start(ControllerConfig::default()).err().unwrap();
    assert_eq!(error.to_string(), "no list container with id 'todo-list'");
}
