//! Two-level budget choice shared by the individual and group flows.

use crate::domain::{Budget, BudgetKind};
use crate::utils::parse_amount;

use super::controller::{StepContext, StepController};
use super::route::StepName;
use super::store::{DraftAction, DraftStore};
use super::validation::{check_budget, ValidationReport};

/// Budget sub-form.
///
/// Every toggle and keystroke is pushed to the store right away as a
/// normalized [`Budget`]. Amount text that is blank, non-numeric, or not
/// positive is synchronized as zero; the raw text stays in the form so the
/// user can keep typing.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetForm {
    has_budget: bool,
    kind: BudgetKind,
    amount: String,
    hourly_rate: String,
    group_id: Option<String>,
}

impl BudgetForm {
    pub fn mount(ctx: &StepContext<'_>) -> Self {
        let draft = ctx.hydrate();
        Self::from_budget(draft.budget, ctx.params.group_id.clone())
    }

    /// Rebuilds the form inputs from a stored budget slice.
    pub fn from_budget(budget: Budget, group_id: Option<String>) -> Self {
        // Exact text of the stored value, never rounded.
        let text = |value: f64| {
            if value > 0.0 {
                value.to_string()
            } else {
                String::new()
            }
        };
        Self {
            has_budget: budget.has_budget,
            kind: budget.kind,
            amount: text(budget.amount),
            hourly_rate: text(budget.hourly_rate),
            group_id,
        }
    }

    pub fn has_budget(&self) -> bool {
        self.has_budget
    }

    pub fn kind(&self) -> BudgetKind {
        self.kind
    }

    pub fn amount_text(&self) -> &str {
        &self.amount
    }

    pub fn hourly_rate_text(&self) -> &str {
        &self.hourly_rate
    }

    /// Contextual banner for the group flow. Display only.
    pub fn banner(&self) -> Option<String> {
        self.group_id
            .as_ref()
            .map(|group_id| format!("Budget for a request in group `{}`", group_id))
    }

    pub fn set_has_budget(&mut self, store: &DraftStore, has_budget: bool) {
        self.has_budget = has_budget;
        if !has_budget {
            self.kind = BudgetKind::Unset;
        }
        self.sync(store);
    }

    pub fn choose_kind(&mut self, store: &DraftStore, kind: BudgetKind) {
        if kind != BudgetKind::Unset {
            self.has_budget = true;
        }
        self.kind = kind;
        self.sync(store);
    }

    pub fn set_amount(&mut self, store: &DraftStore, raw: &str) {
        self.amount = raw.to_string();
        self.sync(store);
    }

    pub fn set_hourly_rate(&mut self, store: &DraftStore, raw: &str) {
        self.hourly_rate = raw.to_string();
        self.sync(store);
    }

    /// The normalized value the store receives.
    pub fn value(&self) -> Budget {
        let positive = |raw: &str| parse_amount(raw).filter(|value| *value > 0.0).unwrap_or(0.0);
        Budget {
            has_budget: self.has_budget,
            kind: self.kind,
            amount: positive(&self.amount),
            hourly_rate: positive(&self.hourly_rate),
        }
        .normalized()
    }

    fn sync(&self, store: &DraftStore) {
        store.dispatch(DraftAction::SetBudget(self.value()));
    }
}

impl StepController for BudgetForm {
    fn step(&self) -> StepName {
        StepName::Budget
    }

    fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        report.check(check_budget(
            self.has_budget,
            self.kind,
            parse_amount(&self.amount),
            parse_amount(&self.hourly_rate),
        ));
        report
    }

    fn commit(&self, store: &DraftStore) {
        self.sync(store);
    }
}
