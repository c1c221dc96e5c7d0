//! Contract shared by every wizard step.
//!
//! A step is a stateless view over its flow's [`DraftStore`]: it hydrates its
//! inputs from the store when mounted, pushes edits back immediately, and only
//! asks for the next step once its own slice validates. Back never mutates the
//! draft. Cancel asks for confirmation and, when granted, resets the store and
//! leaves the flow.

use crate::config::WizardConfig;
use crate::domain::Draft;

use super::navigation::Navigator;
use super::route::{RouteParams, StepName};
use super::store::{DraftAction, DraftStore, FlowKind};
use super::validation::ValidationReport;

/// Collaborators injected into a step for the duration of one interaction.
pub struct StepContext<'a> {
    pub store: &'a DraftStore,
    pub navigator: &'a mut dyn Navigator,
    pub params: &'a RouteParams,
    pub config: &'a WizardConfig,
}

impl<'a> StepContext<'a> {
    pub fn new(
        store: &'a DraftStore,
        navigator: &'a mut dyn Navigator,
        params: &'a RouteParams,
        config: &'a WizardConfig,
    ) -> Self {
        Self {
            store,
            navigator,
            params,
            config,
        }
    }

    /// Reads the draft for a freshly mounted step.
    ///
    /// In the group flow the route's group id wins over whatever the store
    /// holds, so the association survives every hop.
    pub fn hydrate(&self) -> Draft {
        if self.store.flow() == FlowKind::Group {
            let stale = self
                .store
                .read(|draft| draft.group_id != self.params.group_id);
            if stale && self.params.group_id.is_some() {
                self.store
                    .dispatch(DraftAction::SetGroupId(self.params.group_id.clone()));
            }
        }
        self.store.get_state()
    }

    /// Screen shown once the flow is left, by cancel or by submit.
    pub fn landing(&self) -> String {
        if let Some(landing) = &self.params.landing {
            return landing.clone();
        }
        match self.store.flow() {
            FlowKind::Individual => self.config.landing_screen.clone(),
            FlowKind::Group => self.config.group_landing_screen.clone(),
        }
    }
}

/// Result of a Next, Back, or Cancel press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Advanced { to: StepName },
    Blocked(ValidationReport),
    WentBack { to: Option<StepName> },
    /// Cancel was declined; the user keeps editing.
    Stayed,
    Exited { landing: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardChoice {
    KeepEditing,
    Discard,
}

/// Destructive-action confirmation shown before a flow is cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscardPrompt {
    pub title: &'static str,
    pub message: &'static str,
    pub keep_label: &'static str,
    pub discard_label: &'static str,
    pub default_choice: DiscardChoice,
}

impl Default for DiscardPrompt {
    fn default() -> Self {
        Self {
            title: "Discard request?",
            message: "Everything entered so far will be lost.",
            keep_label: "Keep editing",
            discard_label: "Discard",
            default_choice: DiscardChoice::KeepEditing,
        }
    }
}

pub trait Confirmer {
    fn confirm_discard(&mut self, prompt: &DiscardPrompt) -> DiscardChoice;
}

/// Answers every prompt the same way.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub DiscardChoice);

impl Confirmer for FixedAnswer {
    fn confirm_discard(&mut self, _prompt: &DiscardPrompt) -> DiscardChoice {
        self.0
    }
}

/// Per-screen controller contract.
pub trait StepController {
    fn step(&self) -> StepName;

    /// Local validation of the step's inputs. Backs both [`Self::can_proceed`]
    /// and [`Self::next`].
    fn validate(&self) -> ValidationReport;

    /// Dispatches the step's validated slice.
    fn commit(&self, store: &DraftStore);

    /// Whether the Next action should be enabled.
    fn can_proceed(&self) -> bool {
        self.validate().is_valid()
    }

    fn next(&mut self, ctx: &mut StepContext<'_>) -> StepOutcome {
        let step = self.step();
        let report = self.validate();
        if !report.is_valid() {
            tracing::info!(step = step.title(), issues = %report, "next blocked");
            return StepOutcome::Blocked(report);
        }
        self.commit(ctx.store);
        match step.next() {
            Some(to) => {
                ctx.navigator.navigate(to, ctx.params);
                StepOutcome::Advanced { to }
            }
            None => StepOutcome::Stayed,
        }
    }

    fn back(&self, ctx: &mut StepContext<'_>) -> StepOutcome {
        go_back(self.step(), ctx)
    }

    fn cancel(&self, ctx: &mut StepContext<'_>, confirmer: &mut dyn Confirmer) -> StepOutcome {
        cancel_flow(ctx, confirmer)
    }
}

/// Requests the previous named step, or a plain "go back" from the first one.
pub fn go_back(step: StepName, ctx: &mut StepContext<'_>) -> StepOutcome {
    let to = step.previous();
    match to {
        Some(previous) => ctx.navigator.navigate(previous, ctx.params),
        None => ctx.navigator.go_back(),
    }
    StepOutcome::WentBack { to }
}

pub fn cancel_flow(ctx: &mut StepContext<'_>, confirmer: &mut dyn Confirmer) -> StepOutcome {
    let prompt = DiscardPrompt::default();
    match confirmer.confirm_discard(&prompt) {
        DiscardChoice::KeepEditing => StepOutcome::Stayed,
        DiscardChoice::Discard => {
            ctx.store.dispatch(DraftAction::Reset);
            let landing = ctx.landing();
            tracing::info!(flow = ctx.store.flow().label(), landing = %landing, "flow cancelled");
            ctx.navigator.exit_to(&landing);
            StepOutcome::Exited { landing }
        }
    }
}
