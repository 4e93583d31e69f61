//! Delegated listeners on the list container.
//!
//! One listener per event type sits on the container and resolves the item
//! under the event with `closest(item_selector)` when it fires, so items added
//! or replaced by a partial-page update work without any rebinding. Only a
//! replaced container needs fresh listeners (see `ListwireApp::rebind`).

use std::cell::RefCell;
use std::rc::Weak;

use listwire::{DropOutcome, ListController};
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{DragEvent, Element, Event, EventTarget, Node};
use zoon::{Task, Timer};

use crate::dom_host::DomList;
use crate::error::log_js_failure;
use crate::submit::post_reorder;

/// Host and controller of one bound list.
pub struct Runtime {
    pub host: DomList,
    pub controller: ListController<Element>,
}

/// A registered DOM listener. Dropping it removes the listener again.
pub struct EventListener {
    target: EventTarget,
    event_type: String,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new(
        target: &EventTarget,
        event_type: &str,
        handler: Box<dyn FnMut(Event)>,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(handler);
        target.add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event_type: event_type.to_owned(),
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        log_js_failure(
            "removeEventListener",
            self.target
                .remove_event_listener_with_callback(&self.event_type, self.callback.as_ref().unchecked_ref()),
        );
    }
}

/// Runs `f` against the runtime if it is still alive and not already busy with
/// another event.
fn with_runtime(runtime: &Weak<RefCell<Runtime>>, f: impl FnOnce(&mut Runtime)) {
    let Some(runtime) = runtime.upgrade() else {
        return;
    };
    match runtime.try_borrow_mut() {
        Ok(mut runtime) => f(&mut runtime),
        Err(_) => zoon::eprintln!("[listwire] event ignored, list runtime is busy"),
    };
}

/// The element an event happened on; text nodes resolve to their parent.
fn event_element(event: &Event) -> Option<Element> {
    let target = event.target()?;
    match target.dyn_into::<Element>() {
        Ok(element) => Some(element),
        Err(target) => target.dyn_ref::<Node>()?.parent_element(),
    }
}

fn event_item(runtime: &Runtime, event: &Event) -> Option<Element> {
    runtime.host.item_for(&event_element(event)?)
}

fn on_drag_start(runtime: &mut Runtime, event: &Event) {
    let Some(item) = event_item(runtime, event) else {
        return;
    };
    if !runtime.controller.begin_drag(&mut runtime.host, item.clone()) {
        event.prevent_default();
        return;
    }
    if let Some(transfer) = event.dyn_ref::<DragEvent>().and_then(DragEvent::data_transfer) {
        transfer.set_effect_allowed("move");
        log_js_failure("set drag data", transfer.set_data("text/html", &item.outer_html()));
    }
}

fn on_drag_over(runtime: &mut Runtime, event: &Event) {
    event.prevent_default();
    let Some(event) = event.dyn_ref::<DragEvent>() else {
        return;
    };
    if let Some(transfer) = event.data_transfer() {
        transfer.set_drop_effect("move");
    }
    runtime
        .controller
        .drag_over(&mut runtime.host, f64::from(event.client_y()));
}

fn on_drop(runtime: &mut Runtime, event: &Event) {
    event.prevent_default();
    let target = event_item(runtime, event);
    match runtime.controller.drop(&mut runtime.host, target.as_ref()) {
        DropOutcome::Reorder { request, missing_ids } => {
            if missing_ids > 0 {
                zoon::eprintln!("[listwire] {missing_ids} item(s) without an id left out of the new order");
            }
            let config = runtime.controller.config();
            post_reorder(config.reorder_endpoint.clone(), config.reorder_field.clone(), request);
        }
        DropOutcome::NothingToSubmit { missing_ids } => {
            zoon::eprintln!("[listwire] none of the {missing_ids} item(s) has an id, order not submitted");
        }
        DropOutcome::NoSession | DropOutcome::SameItem => {}
    }
}

fn on_drag_end(runtime: &mut Runtime, event: &Event) {
    let item = event_item(runtime, event).or_else(|| runtime.controller.dragged().cloned());
    if let Some(item) = item {
        runtime.controller.end_drag(&mut runtime.host, &item);
    }
}

fn on_click(runtime: &mut Runtime, event: &Event) {
    let Some(element) = event_element(event) else {
        return;
    };
    let Some(item) = runtime.host.item_for(&element) else {
        return;
    };
    let config = runtime.controller.config();
    if runtime.host.is_within(&element, &config.cancel_selector, &item) {
        // Cancel buttons usually sit inside the edit form
        event.prevent_default();
        runtime.controller.cancel_edit(&mut runtime.host, &item);
    } else if runtime.host.is_within(&element, &config.edit_trigger_selector, &item) {
        runtime.controller.begin_edit(&mut runtime.host, &item);
    }
}

fn on_scroll_to_last(runtime: &mut Runtime, weak: &Weak<RefCell<Runtime>>) {
    let Some(timer) = runtime.controller.scroll_to_last(&mut runtime.host) else {
        return;
    };
    let weak = weak.clone();
    Task::start(async move {
        Timer::sleep(timer.delay_ms).await;
        with_runtime(&weak, |runtime| {
            runtime.controller.expire_highlight(&mut runtime.host, &timer);
        });
    });
}

/// Attaches every delegated listener to `container`. A listener that fails to
/// register is logged and skipped.
pub fn attach_container_listeners(
    container: &Element,
    runtime: &Weak<RefCell<Runtime>>,
    scroll_event: &str,
) -> Vec<EventListener> {
    fn handler(runtime: &Weak<RefCell<Runtime>>, f: fn(&mut Runtime, &Event)) -> Box<dyn FnMut(Event)> {
        let runtime = runtime.clone();
        Box::new(move |event: Event| with_runtime(&runtime, |state| f(state, &event)))
    }

    let scroll_handler: Box<dyn FnMut(Event)> = {
        let runtime = runtime.clone();
        Box::new(move |_: Event| {
            let weak = runtime.clone();
            with_runtime(&runtime, |state| on_scroll_to_last(state, &weak));
        })
    };

    let handlers = [
        ("dragstart", handler(runtime, on_drag_start)),
        ("dragover", handler(runtime, on_drag_over)),
        ("drop", handler(runtime, on_drop)),
        ("dragend", handler(runtime, on_drag_end)),
        ("click", handler(runtime, on_click)),
        (scroll_event, scroll_handler),
    ];
    handlers
        .into_iter()
        .filter_map(|(event_type, handler)| {
            log_js_failure(
                &format!("listening to '{event_type}'"),
                EventListener::new(container, event_type, handler),
            )
        })
        .collect()
}
