//! Inline edit toggle.
//!
//! Every item is a two-state machine:
//!
//! ```text
//!            edit click
//!   Viewing ───────────▶ Editing
//!      ▲                    │
//!      └──── cancel ────────┘
//!      ▲                    │
//!      └─ server re-render ─┘   (form submit, not handled here)
//! ```
//!
//! The visible sub-view in the markup is the state; nothing is mirrored on the
//! controller side, so a server re-render that brings an item back in
//! `Viewing` needs no bookkeeping.

use serde::{Deserialize, Serialize};

use crate::item::ItemView;

/// Whether more than one item may be in edit mode at the same time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditPolicy {
    /// Each item toggles on its own.
    #[default]
    Independent,
    /// Opening an editor cancels every other open editor first.
    Exclusive,
}

/// A requested view change for one item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditTransition {
    Open,
    Cancel,
}

impl EditTransition {
    /// The view this transition leads to.
    pub fn target(self) -> ItemView {
        match self {
            Self::Open => ItemView::Editing,
            Self::Cancel => ItemView::Viewing,
        }
    }

    /// `false` when the item already shows the target view.
    pub fn applies_to(self, current: ItemView) -> bool {
        current != self.target()
    }

    /// Items stay draggable only while viewing, so typing never starts a drag.
    pub fn draggable_after(self) -> bool {
        matches!(self, Self::Cancel)
    }
}
