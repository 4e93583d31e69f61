//! Headless runtime: the controller wired to an in-memory list, a virtual
//! clock and a recorded "network".
//!
//! It plays the part the DOM binding plays in the browser. Events only reach
//! the controller while the delegated listeners are bound to the current
//! container, which is how a missing rebind shows up in tests.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::binding::{BindingSlot, RebindOutcome};
use crate::clock::TestClock;
use crate::config::ControllerConfig;
use crate::controller::{DropOutcome, HighlightTimer, ListController, RebindReport};
use crate::host::ListHost;
use crate::item::ItemView;
use crate::memory::{ItemSpec, MemoryList, NodeKey};
use crate::reorder::ReorderRequest;

/// One step of a scripted interaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    DragStart { id: String },
    /// Pointer at an absolute viewport position.
    DragOver { y: f64 },
    /// Pointer just above the midpoint of `id`.
    DragOverItem { id: String },
    /// Pointer below every item.
    DragOverEnd,
    /// Released over `id`, or over a gap in the list when absent.
    Drop {
        #[serde(default)]
        id: Option<String>,
    },
    DragEnd { id: String },
    Edit { id: String },
    Cancel { id: String },
    Type { id: String, text: String },
    /// The server appended an item; `scroll` also dispatches `scroll-to-last`.
    Append {
        item: ItemSpec,
        #[serde(default)]
        scroll: bool,
    },
    ScrollToLast,
    /// The server replaced the whole list.
    Swap {
        items: Vec<ItemSpec>,
        #[serde(default)]
        replace_container: bool,
    },
    Advance { ms: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptError {
    UnknownItem(String),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::UnknownItem(id) => write!(f, "no item with id '{id}' in the list"),
        }
    }
}

impl std::error::Error for ScriptError {}

/// Observable state after a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub order: Vec<String>,
    /// Submitted form bodies, oldest first.
    pub submissions: Vec<String>,
    pub dragging: Vec<String>,
    pub editing: Vec<String>,
    pub highlighted: Vec<String>,
    pub now_ms: u64,
}

pub struct HeadlessRuntime {
    list: MemoryList,
    controller: ListController<NodeKey>,
    clock: TestClock<HighlightTimer<NodeKey>>,
    binding: BindingSlot<u32, ()>,
    submissions: Vec<ReorderRequest>,
    unhandled: usize,
}

impl HeadlessRuntime {
    /// Binds listeners immediately, as the page does on load.
    pub fn new(config: ControllerConfig, list: MemoryList) -> Self {
        let mut runtime = Self {
            list,
            controller: ListController::new(config),
            clock: TestClock::new(),
            binding: BindingSlot::new(),
            submissions: Vec::new(),
            unhandled: 0,
        };
        runtime.rebind();
        runtime
    }

    pub fn with_ids(ids: &[&str]) -> Self {
        Self::new(ControllerConfig::default(), MemoryList::with_ids(ids))
    }

    /// What the partial-page-update completion listener does.
    pub fn rebind(&mut self) -> (RebindOutcome, RebindReport) {
        let outcome = self.binding.rebind(self.list.container_generation(), |_| ());
        let report = self.controller.rebind(&mut self.list);
        (outcome, report)
    }

    pub fn list(&self) -> &MemoryList {
        &self.list
    }

    /// Direct access for simulating server-side changes. Call [`Self::rebind`]
    /// afterwards, like the swap library would.
    pub fn list_mut(&mut self) -> &mut MemoryList {
        &mut self.list
    }

    pub fn controller(&self) -> &ListController<NodeKey> {
        &self.controller
    }

    pub fn submissions(&self) -> &[ReorderRequest] {
        &self.submissions
    }

    /// Interactions that hit a container without listeners, or a detached node.
    pub fn unhandled(&self) -> usize {
        self.unhandled
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn dispatch(&mut self, event: &ScriptEvent) -> Result<(), ScriptError> {
        match event {
            ScriptEvent::Append { item, scroll } => {
                self.list.push(item.clone());
                self.rebind();
                if *scroll {
                    self.deliver(|runtime| runtime.scroll_to_last());
                }
            }
            ScriptEvent::Swap {
                items,
                replace_container,
            } => {
                self.list.swap_items(items.iter().cloned(), *replace_container);
                self.rebind();
            }
            ScriptEvent::Advance { ms } => self.advance(*ms),
            ScriptEvent::ScrollToLast => self.deliver(|runtime| runtime.scroll_to_last()),
            ScriptEvent::DragStart { id } => {
                let key = self.key(id)?;
                self.deliver(|runtime| {
                    runtime.controller.begin_drag(&mut runtime.list, key);
                });
            }
            ScriptEvent::DragOver { y } => {
                let y = *y;
                self.deliver(|runtime| {
                    runtime.controller.drag_over(&mut runtime.list, y);
                });
            }
            ScriptEvent::DragOverItem { id } => {
                let key = self.key(id)?;
                if let Some(y) = self.list.just_above_midpoint(key) {
                    self.deliver(|runtime| {
                        runtime.controller.drag_over(&mut runtime.list, y);
                    });
                }
            }
            ScriptEvent::DragOverEnd => {
                let y = self.list.below_last();
                self.deliver(|runtime| {
                    runtime.controller.drag_over(&mut runtime.list, y);
                });
            }
            ScriptEvent::Drop { id } => {
                let target = id.as_deref().map(|id| self.key(id)).transpose()?;
                self.deliver(|runtime| runtime.release(target));
            }
            ScriptEvent::DragEnd { id } => match self.list.find(id) {
                Some(key) => self.deliver(|runtime| runtime.controller.end_drag(&mut runtime.list, &key)),
                // dragend on a detached node never bubbles to the container
                None => self.unhandled += 1,
            },
            ScriptEvent::Edit { id } => {
                let key = self.key(id)?;
                self.deliver(|runtime| {
                    runtime.controller.begin_edit(&mut runtime.list, &key);
                });
            }
            ScriptEvent::Cancel { id } => {
                let key = self.key(id)?;
                self.deliver(|runtime| {
                    runtime.controller.cancel_edit(&mut runtime.list, &key);
                });
            }
            ScriptEvent::Type { id, text } => {
                let key = self.key(id)?;
                self.list.type_text(key, text);
            }
        }
        Ok(())
    }

    pub fn run<'a>(&mut self, events: impl IntoIterator<Item = &'a ScriptEvent>) -> Result<(), ScriptError> {
        events.into_iter().try_for_each(|event| self.dispatch(event))
    }

    /// Advances virtual time and fires due highlight timers.
    pub fn advance(&mut self, ms: u64) {
        for timer in self.clock.advance_by(ms) {
            self.controller.expire_highlight(&mut self.list, &timer);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let config = self.controller.config();
        let ids_of = |keys: Vec<NodeKey>| -> Vec<String> {
            keys.into_iter()
                .filter_map(|key| self.list.item_id(&key))
                .map(|id| id.to_string())
                .collect()
        };
        let editing = self
            .list
            .items()
            .into_iter()
            .filter(|key| self.list.view(*key) == ItemView::Editing)
            .collect();
        Snapshot {
            order: self.list.ids(),
            submissions: self
                .submissions
                .iter()
                .map(|request| request.to_form_body(&config.reorder_field))
                .collect(),
            dragging: ids_of(self.list.with_class(&config.dragging_class)),
            editing: ids_of(editing),
            highlighted: ids_of(self.list.with_class(&config.highlight_class)),
            now_ms: self.clock.now_ms(),
        }
    }

    fn key(&self, id: &str) -> Result<NodeKey, ScriptError> {
        self.list.find(id).ok_or_else(|| ScriptError::UnknownItem(id.to_owned()))
    }

    /// Runs `handler` only if the delegated listeners sit on the current
    /// container.
    fn deliver(&mut self, handler: impl FnOnce(&mut Self)) {
        if self.binding.is_bound_to(&self.list.container_generation()) {
            handler(self);
        } else {
            self.unhandled += 1;
        }
    }

    fn release(&mut self, target: Option<NodeKey>) {
        if let DropOutcome::Reorder { request, .. } = self.controller.drop(&mut self.list, target.as_ref()) {
            self.submissions.push(request);
        }
    }

    fn scroll_to_last(&mut self) {
        if let Some(timer) = self.controller.scroll_to_last(&mut self.list) {
            self.clock.schedule(u64::from(timer.delay_ms), timer);
        }
    }
}
