//! The one-and-only drag session.

/// Holds the item currently being dragged, if any.
///
/// At most one item is dragged at a time. Every exit path (drop, drag end,
/// rebind after the item vanished) clears it.
#[derive(Debug)]
pub struct DragSession<I> {
    dragged: Option<I>,
}

impl<I: PartialEq> DragSession<I> {
    pub fn new() -> Self {
        Self { dragged: None }
    }

    /// Starts a session for `item`.
    ///
    /// Returns the previous item when a stale session was still open (a missed
    /// `dragend`), so the caller can clear its visual mark.
    pub fn begin(&mut self, item: I) -> Option<I> {
        self.dragged.replace(item).filter(|stale| Some(stale) != self.dragged.as_ref())
    }

    pub fn dragged(&self) -> Option<&I> {
        self.dragged.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.dragged.is_some()
    }

    pub fn is_dragging(&self, item: &I) -> bool {
        self.dragged.as_ref() == Some(item)
    }

    pub fn take(&mut self) -> Option<I> {
        self.dragged.take()
    }

    pub fn clear(&mut self) {
        self.dragged = None;
    }
}

impl<I: PartialEq> Default for DragSession<I> {
    fn default() -> Self {
        Self::new()
    }
}
