//! Listener (re)binding bookkeeping.
//!
//! Listeners are delegated: one set is attached to the list container and the
//! target item is resolved when an event arrives. A fragment swap that only
//! replaces items needs no new listeners; a swap that replaces the container
//! itself does. `BindingSlot` remembers which container currently carries the
//! listeners so a rebind attaches a new set only for a new container, and
//! drops (detaches) the old set at the same time. Handlers therefore fire
//! exactly once per interaction no matter how often rebinding is requested.

/// What a rebind request did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RebindOutcome {
    /// The container already carries our listeners.
    Unchanged,
    /// First attachment.
    Attached,
    /// The container was replaced; old listeners were dropped.
    Replaced,
}

/// The bound target `T` and the listener handles `H` attached to it.
#[derive(Debug)]
pub struct BindingSlot<T, H> {
    bound: Option<(T, H)>,
}

impl<T: PartialEq, H> BindingSlot<T, H> {
    pub fn new() -> Self {
        Self { bound: None }
    }

    /// Attaches listeners to `target` via `attach` unless it is already bound.
    pub fn rebind(&mut self, target: T, attach: impl FnOnce(&T) -> H) -> RebindOutcome {
        if self.is_bound_to(&target) {
            return RebindOutcome::Unchanged;
        }
        // Old handles drop before the new ones attach
        let outcome = if self.bound.take().is_some() {
            RebindOutcome::Replaced
        } else {
            RebindOutcome::Attached
        };
        let handles = attach(&target);
        self.bound = Some((target, handles));
        outcome
    }

    pub fn is_bound_to(&self, target: &T) -> bool {
        matches!(&self.bound, Some((bound, _)) if bound == target)
    }

    pub fn handles(&self) -> Option<&H> {
        self.bound.as_ref().map(|(_, handles)| handles)
    }

    /// Drops the listeners.
    pub fn unbind(&mut self) -> Option<T> {
        self.bound.take().map(|(target, _)| target)
    }
}

impl<T: PartialEq, H> Default for BindingSlot<T, H> {
    fn default() -> Self {
        Self::new()
    }
}
