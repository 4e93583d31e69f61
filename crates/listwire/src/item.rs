//! Item identity, geometry and sub-view state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier carried by every list item (`data-todo-id` by default).
///
/// The controller never interprets the token, it only reads it from the markup
/// and sends it back to the server in visual order.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Returns `None` for empty or whitespace-only tokens.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Vertical extent of an item in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemBox {
    pub top: f64,
    pub height: f64,
}

impl ItemBox {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn midpoint(&self) -> f64 {
        self.top + self.height / 2.
    }

    /// Signed distance from the midpoint to the pointer.
    /// Negative when the pointer is above the midpoint.
    pub fn offset_of(&self, pointer_y: f64) -> f64 {
        pointer_y - self.midpoint()
    }
}

/// Which of the two mutually exclusive sub-views an item shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemView {
    #[default]
    Viewing,
    Editing,
}

impl ItemView {
    pub fn is_editing(self) -> bool {
        matches!(self, Self::Editing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_tokens_are_not_ids() {
        assert!(ItemId::new("").is_none());
        assert!(ItemId::new("   ").is_none());
        assert_eq!(ItemId::new("42").unwrap().as_str(), "42");
    }

    #[test]
    fn offset_is_negative_above_midpoint() {
        let item_box = ItemBox::new(100., 40.);
        assert_eq!(item_box.midpoint(), 120.);
        assert!(item_box.offset_of(110.) < 0.);
        assert_eq!(item_box.offset_of(120.), 0.);
        assert!(item_box.offset_of(130.) > 0.);
    }
}
