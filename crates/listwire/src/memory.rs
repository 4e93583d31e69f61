//! In-memory list host.
//!
//! Mirrors what the DOM host does closely enough to run the controller without
//! a browser: items stack vertically with fixed heights, nodes keep their
//! identity when moved, and a swap replaces nodes with fresh ones while the old
//! handles stay usable (operations on them land on detached nodes).

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::host::ListHost;
use crate::item::{ItemBox, ItemId, ItemView};

pub const DEFAULT_ITEM_HEIGHT: f64 = 40.;

/// Handle to one node, stable across moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeKey(pub u32);

/// Markup the server would render for one item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemSpec {
    /// Raw id attribute; blank means "missing".
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_height")]
    pub height: f64,
    /// Whether the markup contains the hidden order field.
    #[serde(default = "default_true")]
    pub order_field: bool,
}

fn default_height() -> f64 {
    DEFAULT_ITEM_HEIGHT
}

fn default_true() -> bool {
    true
}

impl ItemSpec {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            height: DEFAULT_ITEM_HEIGHT,
            order_field: true,
        }
    }
}

#[derive(Clone, Debug)]
struct MemoryNode {
    spec: ItemSpec,
    /// Current content of the edit text field.
    draft: String,
    classes: BTreeSet<String>,
    draggable: bool,
    view: ItemView,
    order_value: Option<String>,
}

impl MemoryNode {
    fn render(spec: ItemSpec) -> Self {
        Self {
            draft: spec.text.clone(),
            order_value: spec.order_field.then(String::new),
            spec,
            classes: BTreeSet::new(),
            draggable: true,
            view: ItemView::Viewing,
        }
    }
}

/// Focus and text selection inside an edit field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditorFocus {
    pub node: NodeKey,
    pub selected_all: bool,
}

#[derive(Debug)]
pub struct MemoryList {
    /// List order.
    order: Vec<NodeKey>,
    /// Every node ever rendered. Detached nodes are kept so keys still held
    /// by a highlight timer or a drag session resolve, the way a removed DOM
    /// element stays usable through its reference.
    nodes: BTreeMap<NodeKey, MemoryNode>,
    next_key: u32,
    /// Viewport position of the list's top edge.
    top: f64,
    focus: Option<EditorFocus>,
    scrolled_to: Vec<NodeKey>,
    /// Bumped whenever the container element itself is replaced.
    container_generation: u32,
}

impl MemoryList {
    pub fn new(items: impl IntoIterator<Item = ItemSpec>) -> Self {
        let mut list = Self {
            order: Vec::new(),
            nodes: BTreeMap::new(),
            next_key: 0,
            top: 0.,
            focus: None,
            scrolled_to: Vec::new(),
            container_generation: 0,
        };
        for spec in items {
            list.push(spec);
        }
        list
    }

    /// Convenience for `(id, text)` pairs with default geometry.
    pub fn with_ids(ids: &[&str]) -> Self {
        Self::new(ids.iter().map(|id| ItemSpec::new(*id, format!("Todo {id}"))))
    }

    /// Renders a new item at the end (what an "add todo" fragment does).
    pub fn push(&mut self, spec: ItemSpec) -> NodeKey {
        let key = NodeKey(self.next_key);
        self.next_key += 1;
        self.nodes.insert(key, MemoryNode::render(spec));
        self.order.push(key);
        key
    }

    /// Replaces every item with freshly rendered nodes. Old keys become
    /// detached. With `replace_container` the container node is swapped too.
    pub fn swap_items(&mut self, items: impl IntoIterator<Item = ItemSpec>, replace_container: bool) {
        self.order.clear();
        for spec in items {
            self.push(spec);
        }
        if replace_container {
            self.container_generation += 1;
        }
    }

    /// Re-renders a single item in place (the save path).
    pub fn rerender(&mut self, key: NodeKey, spec: ItemSpec) -> Option<NodeKey> {
        let position = self.position(key)?;
        let fresh = NodeKey(self.next_key);
        self.next_key += 1;
        self.nodes.insert(fresh, MemoryNode::render(spec));
        self.order[position] = fresh;
        Some(fresh)
    }

    pub fn remove(&mut self, key: NodeKey) -> bool {
        match self.position(key) {
            Some(position) => {
                self.order.remove(position);
                true
            }
            None => false,
        }
    }

    pub fn container_generation(&self) -> u32 {
        self.container_generation
    }

    pub fn set_top(&mut self, top: f64) {
        self.top = top;
    }

    pub fn position(&self, key: NodeKey) -> Option<usize> {
        self.order.iter().position(|candidate| *candidate == key)
    }

    pub fn is_attached(&self, key: NodeKey) -> bool {
        self.position(key).is_some()
    }

    /// First attached node carrying `id`.
    pub fn find(&self, id: &str) -> Option<NodeKey> {
        self.order
            .iter()
            .copied()
            .find(|key| self.nodes.get(key).is_some_and(|node| node.spec.id == id))
    }

    /// Raw id attributes in list order.
    pub fn ids(&self) -> Vec<String> {
        self.order
            .iter()
            .filter_map(|key| self.nodes.get(key))
            .map(|node| node.spec.id.clone())
            .collect()
    }

    pub fn has_class(&self, key: NodeKey, class: &str) -> bool {
        self.nodes.get(&key).is_some_and(|node| node.classes.contains(class))
    }

    /// Attached nodes carrying `class`.
    pub fn with_class(&self, class: &str) -> Vec<NodeKey> {
        self.order
            .iter()
            .copied()
            .filter(|key| self.has_class(*key, class))
            .collect()
    }

    pub fn is_draggable(&self, key: NodeKey) -> bool {
        self.nodes.get(&key).is_some_and(|node| node.draggable)
    }

    pub fn view(&self, key: NodeKey) -> ItemView {
        self.nodes.get(&key).map(|node| node.view).unwrap_or_default()
    }

    /// Rendered (saved) text of the item.
    pub fn text(&self, key: NodeKey) -> Option<&str> {
        self.nodes.get(&key).map(|node| node.spec.text.as_str())
    }

    pub fn draft(&self, key: NodeKey) -> Option<&str> {
        self.nodes.get(&key).map(|node| node.draft.as_str())
    }

    /// Simulates typing into the edit field.
    pub fn type_text(&mut self, key: NodeKey, text: &str) {
        if let Some(node) = self.nodes.get_mut(&key) {
            node.draft = text.to_owned();
            if self.focus.is_some_and(|focus| focus.node == key) {
                self.focus = Some(EditorFocus {
                    node: key,
                    selected_all: false,
                });
            }
        }
    }

    pub fn order_value(&self, key: NodeKey) -> Option<&str> {
        self.nodes.get(&key).and_then(|node| node.order_value.as_deref())
    }

    pub fn focus(&self) -> Option<EditorFocus> {
        self.focus
    }

    pub fn scrolled_to(&self) -> &[NodeKey] {
        &self.scrolled_to
    }

    /// A pointer position strictly above the midpoint of `key`.
    pub fn just_above_midpoint(&self, key: NodeKey) -> Option<f64> {
        self.is_attached(key).then(|| self.item_box(&key).midpoint() - 1.)
    }

    /// A pointer position below every item.
    pub fn below_last(&self) -> f64 {
        self.top + self.total_height() + 1.
    }

    fn total_height(&self) -> f64 {
        self.order
            .iter()
            .filter_map(|key| self.nodes.get(key))
            .map(|node| node.spec.height)
            .sum()
    }
}

impl ListHost for MemoryList {
    type Item = NodeKey;

    fn items(&self) -> Vec<NodeKey> {
        self.order.clone()
    }

    fn item_id(&self, item: &NodeKey) -> Option<ItemId> {
        self.nodes.get(item).and_then(|node| ItemId::new(node.spec.id.clone()))
    }

    fn item_box(&self, item: &NodeKey) -> ItemBox {
        let mut top = self.top;
        for key in &self.order {
            let height = self.nodes.get(key).map_or(0., |node| node.spec.height);
            if key == item {
                return ItemBox::new(top, height);
            }
            top += height;
        }
        // Detached nodes have an empty box, like getBoundingClientRect
        ItemBox::new(0., 0.)
    }

    fn insert_before(&mut self, item: &NodeKey, anchor: &NodeKey) {
        if item == anchor || !self.nodes.contains_key(item) {
            return;
        }
        if !self.is_attached(*anchor) {
            return;
        }
        self.order.retain(|key| key != item);
        if let Some(anchor_position) = self.position(*anchor) {
            self.order.insert(anchor_position, *item);
        }
    }

    fn append(&mut self, item: &NodeKey) {
        if !self.nodes.contains_key(item) {
            return;
        }
        self.order.retain(|key| key != item);
        self.order.push(*item);
    }

    fn set_class(&mut self, item: &NodeKey, class: &str, enabled: bool) {
        if let Some(node) = self.nodes.get_mut(item) {
            if enabled {
                node.classes.insert(class.to_owned());
            } else {
                node.classes.remove(class);
            }
        }
    }

    fn set_draggable(&mut self, item: &NodeKey, draggable: bool) {
        if let Some(node) = self.nodes.get_mut(item) {
            node.draggable = draggable;
        }
    }

    fn current_view(&self, item: &NodeKey) -> ItemView {
        self.view(*item)
    }

    fn show_view(&mut self, item: &NodeKey, view: ItemView) {
        if let Some(node) = self.nodes.get_mut(item) {
            node.view = view;
        }
        if view == ItemView::Viewing && self.focus.is_some_and(|focus| focus.node == *item) {
            self.focus = None;
        }
    }

    fn focus_editor(&mut self, item: &NodeKey) {
        if self.nodes.contains_key(item) {
            self.focus = Some(EditorFocus {
                node: *item,
                selected_all: true,
            });
        }
    }

    fn reset_editor(&mut self, item: &NodeKey) {
        if let Some(node) = self.nodes.get_mut(item) {
            node.draft = node.spec.text.clone();
        }
    }

    fn sync_order_field(&mut self, item: &NodeKey, id: &ItemId) {
        if let Some(field) = self.nodes.get_mut(item).and_then(|node| node.order_value.as_mut()) {
            *field = id.to_string();
        }
    }

    fn scroll_into_view(&mut self, item: &NodeKey) {
        self.scrolled_to.push(*item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boxes_stack_from_top() {
        let mut list = MemoryList::with_ids(&["1", "2", "3"]);
        list.set_top(100.);
        let keys = list.items();
        assert_eq!(list.item_box(&keys[0]), ItemBox::new(100., 40.));
        assert_eq!(list.item_box(&keys[2]), ItemBox::new(180., 40.));
        assert_eq!(list.below_last(), 221.);
    }

    #[test]
    fn moves_keep_node_identity() {
        let mut list = MemoryList::with_ids(&["1", "2", "3"]);
        let keys = list.items();
        list.insert_before(&keys[2], &keys[0]);
        assert_eq!(list.ids(), ["3", "1", "2"]);
        list.append(&keys[2]);
        assert_eq!(list.ids(), ["1", "2", "3"]);
        assert_eq!(list.items(), keys);
    }

    #[test]
    fn swapped_out_nodes_are_detached_but_tolerated() {
        let mut list = MemoryList::with_ids(&["1", "2"]);
        let old = list.items();
        list.swap_items([ItemSpec::new("1", "a"), ItemSpec::new("2", "b")], false);
        assert!(!list.is_attached(old[0]));
        list.set_class(&old[0], "highlight", false);
        assert!(!list.has_class(old[0], "highlight"));
        assert_eq!(list.ids(), ["1", "2"]);
        assert_eq!(list.item_box(&old[0]), ItemBox::new(0., 0.));
        // The old handle still resolves to the node it was rendered from
        assert_eq!(list.text(old[0]), Some("Todo 1"));
    }

    #[test]
    fn blank_id_attribute_is_missing() {
        let list = MemoryList::new([ItemSpec::new(" ", "nameless")]);
        let key = list.items()[0];
        assert_eq!(list.item_id(&key), None);
    }
}
