use std::fmt;

use listwire::ConfigError;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Clone)]
pub enum HostError {
    NoWindow,
    NoDocument,
    NoBody,
    /// No element with the configured container id.
    ContainerNotFound(String),
    Config(ConfigError),
    /// A DOM call threw.
    Js(String),
    /// The reorder endpoint answered with a non-2xx status.
    Status(u16),
    /// The list runtime was borrowed by an event still being handled.
    Busy,
    NotStarted,
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::NoWindow => write!(f, "no global window"),
            HostError::NoDocument => write!(f, "window has no document"),
            HostError::NoBody => write!(f, "document has no body"),
            HostError::ContainerNotFound(id) => write!(f, "no list container with id '{id}'"),
            HostError::Config(error) => write!(f, "{error}"),
            HostError::Js(message) => write!(f, "JS exception: {message}"),
            HostError::Status(status) => write!(f, "server answered with status {status}"),
            HostError::Busy => write!(f, "list runtime is busy handling another event"),
            HostError::NotStarted => write!(f, "listwire has not been started on this page"),
        }
    }
}

impl std::error::Error for HostError {}

impl From<JsValue> for HostError {
    fn from(value: JsValue) -> Self {
        let message = match value.dyn_ref::<js_sys::Error>() {
            Some(error) => String::from(error.message()),
            None => value.as_string().unwrap_or_else(|| format!("{value:?}")),
        };
        HostError::Js(message)
    }
}

impl From<ConfigError> for HostError {
    fn from(error: ConfigError) -> Self {
        HostError::Config(error)
    }
}

impl From<HostError> for JsValue {
    fn from(error: HostError) -> Self {
        js_sys::Error::new(&error.to_string()).into()
    }
}

/// Logs a failed DOM call and carries on; the list must stay usable even when
/// one node misbehaves.
pub(crate) fn log_js_failure<T>(context: &str, result: Result<T, JsValue>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            zoon::eprintln!("[listwire] {context} failed: {}", HostError::from(error));
            None
        }
    }
}
