//! Per-flow draft store with a closed set of partial-update actions.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::domain::{Budget, Draft, Location, ProviderSelection, Timing};

/// Which wizard a store belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowKind {
    Individual,
    Group,
}

impl FlowKind {
    pub fn label(self) -> &'static str {
        match self {
            FlowKind::Individual => "individual",
            FlowKind::Group => "group",
        }
    }
}

/// Partial updates accepted by a [`DraftStore`]. Each variant owns one slice
/// of the draft and never touches the others.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftAction {
    SetCategory(Option<String>),
    SetDetails { title: String, description: String },
    SetLocation(Location),
    SetTiming(Timing),
    SetBudget(Budget),
    SetProvider(ProviderSelection),
    SetGroupId(Option<String>),
    Reset,
}

impl DraftAction {
    pub fn name(&self) -> &'static str {
        match self {
            DraftAction::SetCategory(_) => "SET_CATEGORY",
            DraftAction::SetDetails { .. } => "SET_DETAILS",
            DraftAction::SetLocation(_) => "SET_LOCATION",
            DraftAction::SetTiming(_) => "SET_TIMING",
            DraftAction::SetBudget(_) => "SET_BUDGET",
            DraftAction::SetProvider(_) => "SET_PROVIDER",
            DraftAction::SetGroupId(_) => "SET_GROUP_ID",
            DraftAction::Reset => "RESET",
        }
    }
}

#[derive(Debug, Default)]
struct StoreState {
    draft: Draft,
    revision: u64,
}

/// Owns the draft of one flow.
///
/// The store is not `Clone`: screens borrow it from whoever owns the flow.
/// Deferred work holds a [`StoreHandle`] instead, which stops writing once the
/// store is gone.
#[derive(Debug)]
pub struct DraftStore {
    flow: FlowKind,
    state: Rc<RefCell<StoreState>>,
}

impl DraftStore {
    pub fn new(flow: FlowKind) -> Self {
        Self::with_draft(flow, Draft::default())
    }

    /// Starts a store from pre-filled data, e.g. when editing an existing request.
    pub fn with_draft(flow: FlowKind, mut draft: Draft) -> Self {
        draft.budget = draft.budget.normalized();
        draft.provider_selection = draft.provider_selection.normalized();
        if flow == FlowKind::Individual {
            draft.group_id = None;
        }
        Self {
            flow,
            state: Rc::new(RefCell::new(StoreState { draft, revision: 0 })),
        }
    }

    pub fn flow(&self) -> FlowKind {
        self.flow
    }

    /// Snapshot of the current draft.
    pub fn get_state(&self) -> Draft {
        self.state.borrow().draft.clone()
    }

    /// Runs `f` against a snapshot of the draft. The store is not borrowed
    /// while `f` runs, so `f` may dispatch.
    pub fn read<R>(&self, f: impl FnOnce(&Draft) -> R) -> R {
        let draft = self.get_state();
        f(&draft)
    }

    /// Number of dispatches that actually changed the draft.
    pub fn revision(&self) -> u64 {
        self.state.borrow().revision
    }

    pub fn dispatch(&self, action: DraftAction) {
        apply(&self.state, self.flow, action);
    }

    pub fn reset(&self) {
        self.dispatch(DraftAction::Reset);
    }

    pub fn handle(&self) -> StoreHandle {
        StoreHandle {
            flow: self.flow,
            state: Rc::downgrade(&self.state),
        }
    }
}

/// Weak reference to a store for updates that may land after the flow ended.
#[derive(Debug, Clone)]
pub struct StoreHandle {
    flow: FlowKind,
    state: Weak<RefCell<StoreState>>,
}

impl StoreHandle {
    pub fn is_alive(&self) -> bool {
        self.state.strong_count() > 0
    }

    /// Applies the action if the store still exists. Returns whether it did.
    pub fn dispatch(&self, action: DraftAction) -> bool {
        match self.state.upgrade() {
            Some(state) => {
                apply(&state, self.flow, action);
                true
            }
            None => {
                tracing::debug!(
                    action = action.name(),
                    flow = self.flow.label(),
                    "dropping update for a discarded draft store"
                );
                false
            }
        }
    }
}

fn apply(state: &RefCell<StoreState>, flow: FlowKind, action: DraftAction) {
    let name = action.name();
    let mut state = state.borrow_mut();
    if reduce(&mut state.draft, flow, action) {
        state.revision += 1;
        tracing::debug!(action = name, flow = flow.label(), revision = state.revision, "draft updated");
    } else {
        tracing::trace!(action = name, flow = flow.label(), "draft unchanged");
    }
}

/// Merges one action into the draft. Returns `true` when the draft changed.
fn reduce(draft: &mut Draft, flow: FlowKind, action: DraftAction) -> bool {
    match action {
        DraftAction::SetCategory(category) => replace(&mut draft.category, category),
        DraftAction::SetDetails { title, description } => {
            let title_changed = replace(&mut draft.title, title);
            let description_changed = replace(&mut draft.description, description);
            title_changed || description_changed
        }
        DraftAction::SetLocation(location) => replace(&mut draft.location, location),
        DraftAction::SetTiming(timing) => replace(&mut draft.timing, timing.normalized()),
        DraftAction::SetBudget(budget) => replace(&mut draft.budget, budget.normalized()),
        DraftAction::SetProvider(selection) => {
            replace(&mut draft.provider_selection, selection.normalized())
        }
        DraftAction::SetGroupId(group_id) => {
            if flow != FlowKind::Group {
                tracing::warn!("SET_GROUP_ID ignored by the individual flow");
                return false;
            }
            replace(&mut draft.group_id, group_id)
        }
        DraftAction::Reset => replace(draft, Draft::default()),
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
