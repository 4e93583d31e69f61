//! List Interaction Controller.
//!
//! Owns the drag session and applies every user interaction to a [`ListHost`].
//! Side effects that leave the host (the reorder submission, the highlight
//! removal timer) are returned to the caller instead of being performed here,
//! so the same controller drives the browser and the headless runtime.

use crate::config::ControllerConfig;
use crate::edit::{EditPolicy, EditTransition};
use crate::host::ListHost;
use crate::item::ItemId;
use crate::placement::{placement_for, Placement};
use crate::reorder::ReorderRequest;
use crate::session::DragSession;

/// Result of releasing a drag.
#[derive(Clone, Debug, PartialEq)]
pub enum DropOutcome {
    /// No drag was in progress.
    NoSession,
    /// Released over the dragged item itself.
    SameItem,
    /// Every item lacked an id; nothing to send.
    NothingToSubmit { missing_ids: usize },
    /// Send `request` to the reorder endpoint.
    Reorder { request: ReorderRequest, missing_ids: usize },
}

impl DropOutcome {
    pub fn request(&self) -> Option<&ReorderRequest> {
        match self {
            Self::Reorder { request, .. } => Some(request),
            _ => None,
        }
    }
}

/// A highlight that has to be removed once `delay_ms` elapsed.
#[derive(Clone, Debug, PartialEq)]
pub struct HighlightTimer<I> {
    pub item: I,
    pub delay_ms: u32,
}

/// What a rebind pass found in the freshly swapped markup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RebindReport {
    pub items: usize,
    /// Positions of items without a usable id.
    pub missing_ids: Vec<usize>,
    /// The dragged item disappeared with the swap and the session was closed.
    pub dropped_session: bool,
}

pub struct ListController<I> {
    config: ControllerConfig,
    session: DragSession<I>,
}

impl<I: Clone + PartialEq> ListController<I> {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            session: DragSession::new(),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn dragged(&self) -> Option<&I> {
        self.session.dragged()
    }

    /// Starts a drag session. Items in edit mode are not draggable; returns
    /// `false` for them.
    pub fn begin_drag<H: ListHost<Item = I>>(&mut self, host: &mut H, item: I) -> bool {
        if host.current_view(&item).is_editing() {
            return false;
        }
        if let Some(stale) = self.session.begin(item.clone()) {
            host.set_class(&stale, &self.config.dragging_class, false);
        }
        host.set_class(&item, &self.config.dragging_class, true);
        true
    }

    /// Moves the dragged item live to where the pointer says it belongs.
    ///
    /// Returns the computed placement, `None` when no drag is in progress or
    /// the dragged node was swapped out of the list (the session ends then).
    pub fn drag_over<H: ListHost<Item = I>>(&mut self, host: &mut H, pointer_y: f64) -> Option<Placement<I>> {
        let dragged = self.session.dragged()?.clone();
        let items = host.items();
        let Some(position) = items.iter().position(|item| *item == dragged) else {
            // Re-inserting the stale node would duplicate its id in the list
            self.session.clear();
            host.set_class(&dragged, &self.config.dragging_class, false);
            return None;
        };
        let candidates: Vec<_> = items
            .iter()
            .filter(|item| **item != dragged)
            .map(|item| (item.clone(), host.item_box(item)))
            .collect();
        let placement = placement_for(candidates, pointer_y);

        let in_place = match &placement {
            Placement::Before(anchor) => items.get(position + 1) == Some(anchor),
            Placement::End => position + 1 == items.len(),
        };
        if !in_place {
            match &placement {
                Placement::Before(anchor) => host.insert_before(&dragged, anchor),
                Placement::End => host.append(&dragged),
            }
        }
        Some(placement)
    }

    /// Releases the drag over `target` (`None` when released over a gap in the
    /// list rather than an item).
    ///
    /// Unless the target is the dragged item itself, the current order of all
    /// item ids is returned for submission. The session always ends here.
    pub fn drop<H: ListHost<Item = I>>(&mut self, host: &mut H, target: Option<&I>) -> DropOutcome {
        let Some(dragged) = self.session.take() else {
            return DropOutcome::NoSession;
        };
        host.set_class(&dragged, &self.config.dragging_class, false);
        if target == Some(&dragged) {
            return DropOutcome::SameItem;
        }

        let (ids, missing_ids) = self.current_order(host);
        if ids.is_empty() {
            DropOutcome::NothingToSubmit { missing_ids }
        } else {
            DropOutcome::Reorder {
                request: ReorderRequest::new(ids),
                missing_ids,
            }
        }
    }

    /// Ends the drag whether or not a drop happened (e.g. Escape).
    pub fn end_drag<H: ListHost<Item = I>>(&mut self, host: &mut H, item: &I) {
        host.set_class(item, &self.config.dragging_class, false);
        if let Some(dragged) = self.session.take() {
            if dragged != *item {
                host.set_class(&dragged, &self.config.dragging_class, false);
            }
        }
    }

    /// Viewing → Editing. Returns `false` when the item was already editing.
    pub fn begin_edit<H: ListHost<Item = I>>(&mut self, host: &mut H, item: &I) -> bool {
        if !EditTransition::Open.applies_to(host.current_view(item)) {
            return false;
        }
        if self.config.edit_policy == EditPolicy::Exclusive {
            for other in host.items().iter().filter(|other| *other != item) {
                self.cancel_edit(host, other);
            }
        }
        host.show_view(item, EditTransition::Open.target());
        host.focus_editor(item);
        host.set_draggable(item, EditTransition::Open.draggable_after());
        true
    }

    /// Editing → Viewing, discarding unsaved input. Returns `false` when the
    /// item was not editing.
    pub fn cancel_edit<H: ListHost<Item = I>>(&mut self, host: &mut H, item: &I) -> bool {
        if !EditTransition::Cancel.applies_to(host.current_view(item)) {
            return false;
        }
        host.show_view(item, EditTransition::Cancel.target());
        host.set_draggable(item, EditTransition::Cancel.draggable_after());
        host.reset_editor(item);
        true
    }

    /// Brings the newest (last) item into view and highlights it.
    pub fn scroll_to_last<H: ListHost<Item = I>>(&mut self, host: &mut H) -> Option<HighlightTimer<I>> {
        let last = host.items().pop()?;
        host.scroll_into_view(&last);
        host.set_class(&last, &self.config.highlight_class, true);
        Some(HighlightTimer {
            item: last,
            delay_ms: self.config.highlight_ms,
        })
    }

    /// Removes the highlight again. The item may be gone by now.
    pub fn expire_highlight<H: ListHost<Item = I>>(&mut self, host: &mut H, timer: &HighlightTimer<I>) {
        host.set_class(&timer.item, &self.config.highlight_class, false);
    }

    /// Re-scans the list after a partial-page update.
    pub fn rebind<H: ListHost<Item = I>>(&mut self, host: &mut H) -> RebindReport {
        let items = host.items();
        let missing_ids = items
            .iter()
            .enumerate()
            .filter(|(_, item)| host.item_id(item).is_none())
            .map(|(position, _)| position)
            .collect();
        let dropped_session = self
            .session
            .dragged()
            .is_some_and(|dragged| !items.contains(dragged));
        if dropped_session {
            self.session.clear();
        }
        RebindReport {
            items: items.len(),
            missing_ids,
            dropped_session,
        }
    }

    /// Ids top to bottom, syncing each item's hidden order field on the way.
    fn current_order<H: ListHost<Item = I>>(&self, host: &mut H) -> (Vec<ItemId>, usize) {
        let mut ids = Vec::new();
        let mut missing_ids = 0;
        for item in host.items() {
            match host.item_id(&item) {
                Some(id) => {
                    host.sync_order_field(&item, &id);
                    ids.push(id);
                }
                None => missing_ids += 1,
            }
        }
        (ids, missing_ids)
    }
}
