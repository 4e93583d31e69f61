//! Pointer position → drop position.
//!
//! While a drag is in progress the dragged item is moved live so that it sits
//! immediately before the nearest item whose vertical midpoint is still below
//! the pointer. When the pointer is below every midpoint the item goes to the
//! end of the list.
//!
//! ```text
//!   ┌──────────┐
//!   │    A     │ ── midpoint A
//!   └──────────┘
//!        ▲ pointer        → nearest midpoint below is B → Before(B)
//!   ┌──────────┐
//!   │    B     │ ── midpoint B
//!   └──────────┘
//! ```

use crate::item::ItemBox;

/// Where the dragged item should be placed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Placement<I> {
    /// Insert immediately before this item.
    Before(I),
    /// Append after the last item.
    End,
}

/// Picks the anchor among `candidates` (DOM order, dragged item excluded).
///
/// A candidate qualifies when the pointer is strictly above its midpoint. The
/// qualifying candidate with the smallest distance wins; only a strictly better
/// distance replaces the current best, so on ties the first one scanned stays.
/// Non-finite pointer positions and boxes never qualify.
pub fn drop_anchor<I>(candidates: impl IntoIterator<Item = (I, ItemBox)>, pointer_y: f64) -> Option<I> {
    candidates
        .into_iter()
        .fold(
            (f64::NEG_INFINITY, None),
            |(closest_offset, closest), (item, item_box)| {
                let offset = item_box.offset_of(pointer_y);
                if offset < 0. && offset > closest_offset {
                    (offset, Some(item))
                } else {
                    (closest_offset, closest)
                }
            },
        )
        .1
}

/// Same as [`drop_anchor`] but expressed as a [`Placement`].
pub fn placement_for<I>(candidates: impl IntoIterator<Item = (I, ItemBox)>, pointer_y: f64) -> Placement<I> {
    match drop_anchor(candidates, pointer_y) {
        Some(item) => Placement::Before(item),
        None => Placement::End,
    }
}
