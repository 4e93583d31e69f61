//! The seam between the controller and whatever renders the list.
//!
//! The browser implementation talks to the DOM through `web-sys`; the
//! in-memory [`MemoryList`](crate::memory::MemoryList) backs tests and the
//! headless CLI. Hosts report their own failures (the DOM host logs JS
//! exceptions) so every operation here is infallible from the controller's
//! point of view.

use crate::item::{ItemBox, ItemId, ItemView};

pub trait ListHost {
    /// Cheap handle to one item node.
    type Item: Clone + PartialEq;

    /// Items currently in the list, top to bottom.
    fn items(&self) -> Vec<Self::Item>;

    /// `None` when the id attribute is missing or blank.
    fn item_id(&self, item: &Self::Item) -> Option<ItemId>;

    fn item_box(&self, item: &Self::Item) -> ItemBox;

    /// Moves `item` so it immediately precedes `anchor`.
    fn insert_before(&mut self, item: &Self::Item, anchor: &Self::Item);

    /// Moves `item` to the end of the list.
    fn append(&mut self, item: &Self::Item);

    /// Must not fail on a node that was removed from the list.
    fn set_class(&mut self, item: &Self::Item, class: &str, enabled: bool);

    fn set_draggable(&mut self, item: &Self::Item, draggable: bool);

    /// The sub-view currently shown.
    fn current_view(&self, item: &Self::Item) -> ItemView;

    /// Shows exactly one of the two sub-views. `Viewing` also shows the action
    /// controls, `Editing` hides them.
    fn show_view(&mut self, item: &Self::Item, view: ItemView);

    /// Focuses the edit text field and selects its content.
    fn focus_editor(&mut self, item: &Self::Item);

    /// Restores the edit form fields to their rendered values.
    fn reset_editor(&mut self, item: &Self::Item);

    /// Writes `id` into the item's hidden order field, if it has one.
    fn sync_order_field(&mut self, item: &Self::Item, id: &ItemId);

    /// Smooth-scrolls `item` to the vertical center of the viewport.
    fn scroll_into_view(&mut self, item: &Self::Item);
}
