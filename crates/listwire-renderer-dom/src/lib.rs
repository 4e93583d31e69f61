//! Browser binding for `listwire`.
//!
//! Page usage:
//!
//! ```js
//! import init, { start_listwire } from "./pkg/listwire_renderer_dom.js";
//! await init();
//! start_listwire(); // or start_listwire('{"highlight_ms": 1500}')
//! ```
//!
//! Without an explicit JSON config the `data-listwire-config` attribute of the
//! default container (`#todo-list`) is read, falling back to the defaults.

use std::cell::RefCell;
use std::rc::Rc;

use listwire::binding::{BindingSlot, RebindOutcome};
use listwire::{ControllerConfig, ListController, RebindReport};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

pub mod dom_host;
pub mod error;
pub mod listeners;
pub mod submit;

pub use dom_host::DomList;
pub use error::HostError;
use listeners::{EventListener, Runtime, attach_container_listeners};

/// Attribute on the list container holding a JSON `ControllerConfig`.
pub const CONFIG_ATTRIBUTE: &str = "data-listwire-config";

struct Shared {
    document: Document,
    runtime: Rc<RefCell<Runtime>>,
    binding: RefCell<BindingSlot<Element, Vec<EventListener>>>,
}

/// A running binding of one list. Dropping it detaches every listener.
pub struct ListwireApp {
    shared: Rc<Shared>,
    _swap_listener: EventListener,
}

impl ListwireApp {
    pub fn start(config: ControllerConfig) -> Result<Self, HostError> {
        config.validate()?;
        let document = document()?;
        let body = document.body().ok_or(HostError::NoBody)?;
        let container = find_container(&document, &config.container_id)?;

        let swap_event = config.swap_event.clone();
        let runtime = Runtime {
            host: DomList::new(container, config.clone()),
            controller: ListController::new(config),
        };
        let shared = Rc::new(Shared {
            document,
            runtime: Rc::new(RefCell::new(runtime)),
            binding: RefCell::new(BindingSlot::new()),
        });

        let swap_listener = {
            let shared = Rc::downgrade(&shared);
            EventListener::new(
                &body,
                &swap_event,
                Box::new(move |_: web_sys::Event| {
                    let Some(shared) = shared.upgrade() else {
                        return;
                    };
                    if let Err(error) = rebind(&shared) {
                        zoon::eprintln!("[listwire] rebind after partial update failed: {error}");
                    }
                }),
            )?
        };

        rebind(&shared)?;
        Ok(Self {
            shared,
            _swap_listener: swap_listener,
        })
    }

    /// Starts with the config found on the default container, if any.
    pub fn start_from_markup() -> Result<Self, HostError> {
        let defaults = ControllerConfig::default();
        let container = find_container(&document()?, &defaults.container_id)?;
        let config = match container.get_attribute(CONFIG_ATTRIBUTE) {
            Some(json) => ControllerConfig::from_json(&json)?,
            None => defaults,
        };
        Self::start(config)
    }

    /// Re-scans the list; attaches fresh listeners only when the container
    /// node itself was replaced.
    pub fn rebind(&self) -> Result<RebindReport, HostError> {
        rebind(&self.shared)
    }

    pub fn is_bound_to(&self, container: &Element) -> bool {
        self.shared.binding.borrow().is_bound_to(container)
    }

    /// Listeners currently registered on the container.
    pub fn listener_count(&self) -> usize {
        self.shared.binding.borrow().handles().map_or(0, Vec::len)
    }
}

fn document() -> Result<Document, HostError> {
    web_sys::window()
        .ok_or(HostError::NoWindow)?
        .document()
        .ok_or(HostError::NoDocument)
}

fn find_container(document: &Document, id: &str) -> Result<Element, HostError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| HostError::ContainerNotFound(id.to_owned()))
}

fn rebind(shared: &Rc<Shared>) -> Result<RebindReport, HostError> {
    let mut runtime = shared.runtime.try_borrow_mut().map_err(|_| HostError::Busy)?;
    let runtime = &mut *runtime;
    let config = runtime.controller.config();
    let container = find_container(&shared.document, &config.container_id)?;
    let scroll_event = config.scroll_event.clone();

    let weak_runtime = Rc::downgrade(&shared.runtime);
    let outcome = shared
        .binding
        .borrow_mut()
        .rebind(container.clone(), |container| {
            attach_container_listeners(container, &weak_runtime, &scroll_event)
        });
    if outcome != RebindOutcome::Unchanged {
        runtime.host.set_container(container);
    }

    let report = runtime.controller.rebind(&mut runtime.host);
    #[cfg(debug_assertions)]
    zoon::println!(
        "[listwire] rebind: {outcome:?}, {} item(s), session dropped: {}",
        report.items,
        report.dropped_session
    );
    if !report.missing_ids.is_empty() {
        zoon::eprintln!(
            "[listwire] items at positions {:?} have no '{}' attribute",
            report.missing_ids,
            runtime.controller.config().id_attribute
        );
    }
    Ok(report)
}

thread_local! {
    static APP: RefCell<Option<ListwireApp>> = const { RefCell::new(None) };
}

/// Binds the list on the current page, replacing an earlier binding.
#[wasm_bindgen]
pub fn start_listwire(config_json: Option<String>) -> Result<(), JsValue> {
    // Detach the old binding first so its listeners never see the new list
    APP.with(|app| app.borrow_mut().take());
    let app = match config_json {
        Some(json) => ListwireApp::start(ControllerConfig::from_json(&json).map_err(HostError::from)?)?,
        None => ListwireApp::start_from_markup()?,
    };
    APP.with(|slot| *slot.borrow_mut() = Some(app));
    Ok(())
}

/// Manual rebind for pages that swap markup without the configured event.
#[wasm_bindgen]
pub fn rebind_listwire() -> Result<(), JsValue> {
    APP.with(|app| match app.borrow().as_ref() {
        Some(app) => app.rebind().map(|_| ()).map_err(JsValue::from),
        None => Err(JsValue::from(HostError::NotStarted)),
    })
}

#[wasm_bindgen]
pub fn stop_listwire() {
    APP.with(|app| app.borrow_mut().take());
}
