//! `ListHost` on top of the live DOM.
//!
//! Items are the elements matching `item_selector` inside the container, in
//! document order. Sub-views are switched with the configured hidden class so
//! the server-rendered markup decides what "hidden" looks like.

use listwire::{ControllerConfig, ItemBox, ItemId, ItemView, ListHost};
use wasm_bindgen::JsCast;
use web_sys::{
    Element, HtmlElement, HtmlFormElement, HtmlInputElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

use crate::error::log_js_failure;

pub struct DomList {
    container: Element,
    config: ControllerConfig,
}

impl DomList {
    pub fn new(container: Element, config: ControllerConfig) -> Self {
        Self { container, config }
    }

    /// Points the host at a freshly swapped-in container.
    pub fn set_container(&mut self, container: Element) {
        self.container = container;
    }

    /// The list item `element` belongs to, if it is inside this list.
    pub fn item_for(&self, element: &Element) -> Option<Element> {
        let item = log_js_failure("closest item", element.closest(&self.config.item_selector))??;
        self.container.contains(Some(&item)).then_some(item)
    }

    /// Whether `element` sits inside a control matching `selector` within `item`.
    pub fn is_within(&self, element: &Element, selector: &str, item: &Element) -> bool {
        if selector.trim().is_empty() {
            return false;
        }
        log_js_failure("closest control", element.closest(selector))
            .flatten()
            .is_some_and(|control| item.contains(Some(&control)))
    }

    fn part(&self, item: &Element, selector: &str) -> Option<Element> {
        if selector.trim().is_empty() {
            return None;
        }
        log_js_failure("query item part", item.query_selector(selector)).flatten()
    }

    fn set_hidden(&self, element: Option<Element>, hidden: bool) {
        if let Some(element) = element {
            log_js_failure(
                "toggle hidden class",
                element.class_list().toggle_with_force(&self.config.hidden_class, hidden),
            );
        }
    }

    fn text_input(&self, item: &Element) -> Option<HtmlInputElement> {
        self.part(item, &self.config.text_input_selector)?
            .dyn_into::<HtmlInputElement>()
            .ok()
    }
}

impl ListHost for DomList {
    type Item = Element;

    fn items(&self) -> Vec<Element> {
        let Some(node_list) = log_js_failure("query items", self.container.query_selector_all(&self.config.item_selector))
        else {
            return Vec::new();
        };
        (0..node_list.length())
            .filter_map(|index| node_list.get(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn item_id(&self, item: &Element) -> Option<ItemId> {
        item.get_attribute(&self.config.id_attribute).and_then(ItemId::new)
    }

    fn item_box(&self, item: &Element) -> ItemBox {
        let rect = item.get_bounding_client_rect();
        ItemBox::new(rect.top(), rect.height())
    }

    fn insert_before(&mut self, item: &Element, anchor: &Element) {
        let Some(parent) = anchor.parent_node() else {
            return;
        };
        log_js_failure("insertBefore", parent.insert_before(item, Some(anchor)));
    }

    fn append(&mut self, item: &Element) {
        log_js_failure("appendChild", self.container.append_child(item));
    }

    fn set_class(&mut self, item: &Element, class: &str, enabled: bool) {
        // classList works on detached nodes too
        log_js_failure("toggle class", item.class_list().toggle_with_force(class, enabled));
    }

    fn set_draggable(&mut self, item: &Element, draggable: bool) {
        if let Some(item) = item.dyn_ref::<HtmlElement>() {
            item.set_draggable(draggable);
        }
    }

    fn current_view(&self, item: &Element) -> ItemView {
        match self.part(item, &self.config.edit_selector) {
            Some(edit) if !edit.class_list().contains(&self.config.hidden_class) => ItemView::Editing,
            _ => ItemView::Viewing,
        }
    }

    fn show_view(&mut self, item: &Element, view: ItemView) {
        let editing = view.is_editing();
        self.set_hidden(self.part(item, &self.config.view_selector), editing);
        self.set_hidden(self.part(item, &self.config.actions_selector), editing);
        self.set_hidden(self.part(item, &self.config.edit_selector), !editing);
    }

    fn focus_editor(&mut self, item: &Element) {
        if let Some(input) = self.text_input(item) {
            log_js_failure("focus edit field", input.focus());
            input.select();
        }
    }

    fn reset_editor(&mut self, item: &Element) {
        let form = self.part(item, &self.config.edit_selector).and_then(|edit| {
            match edit.dyn_ref::<HtmlFormElement>() {
                Some(form) => Some(form.clone()),
                None => log_js_failure("query edit form", edit.query_selector("form"))
                    .flatten()
                    .and_then(|form| form.dyn_into::<HtmlFormElement>().ok()),
            }
        });
        match form {
            Some(form) => form.reset(),
            // Markup without a form: restore the rendered value by hand
            None => {
                if let Some(input) = self.text_input(item) {
                    input.set_value(&input.default_value());
                }
            }
        }
    }

    fn sync_order_field(&mut self, item: &Element, id: &ItemId) {
        if let Some(field) = self
            .part(item, &self.config.order_field_selector)
            .and_then(|field| field.dyn_into::<HtmlInputElement>().ok())
        {
            field.set_value(id.as_str());
        }
    }

    fn scroll_into_view(&mut self, item: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Center);
        item.scroll_into_view_with_scroll_into_view_options(&options);
    }
}
