//! Drag-and-drop reordering and inline edit toggling for server-rendered lists.
//!
//! The server renders the list and persists changes; this crate only moves
//! items under the pointer, reports the final order, flips items between their
//! read view and edit form, and highlights newly appended items. Everything
//! here is platform-free: the browser binding lives in
//! `listwire-renderer-dom`, which implements [`host::ListHost`] on top of the
//! DOM.

pub mod binding;
pub mod clock;
pub mod config;
pub mod controller;
pub mod edit;
pub mod headless;
pub mod host;
pub mod item;
pub mod memory;
pub mod placement;
pub mod reorder;
pub mod session;

pub use config::{ConfigError, ControllerConfig};
pub use controller::{DropOutcome, HighlightTimer, ListController, RebindReport};
pub use host::ListHost;
pub use item::{ItemBox, ItemId, ItemView};
pub use placement::Placement;
pub use reorder::ReorderRequest;
