//! Terminal step: cross-field validation and submit.

use chrono::Utc;
use uuid::Uuid;

use crate::config::DraftLimits;
use crate::domain::{
    BudgetKind, Draft, GroupBook, ProviderChoice, ServiceRequest, TimingKind,
};
use crate::errors::{PolicyBlock, SubmitError};
use crate::utils::format_amount;

use super::controller::{cancel_flow, go_back, Confirmer, StepContext, StepOutcome};
use super::group::attach_pending;
use super::route::{EditContext, StepName};
use super::store::{DraftAction, FlowKind};
use super::submit::SubmitSink;
use super::validation::{
    check_budget, check_category, check_description, check_location, check_provider,
    check_timing, check_title, DraftField, FieldIssue, ValidationReport,
};

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Submitted(Box<ServiceRequest>),
    Blocked(ValidationReport),
    Refused(PolicyBlock),
    Failed(SubmitError),
}

/// Checks the whole draft and reports the first offending field of every
/// slice, so the user can fix everything in one pass.
pub fn review_report(
    draft: &Draft,
    flow: FlowKind,
    catalog: &[String],
    limits: &DraftLimits,
) -> ValidationReport {
    let mut report = ValidationReport::new();
    report.check(check_category(draft.category.as_deref(), catalog));
    report.check(check_title(&draft.title, limits));
    report.check(check_description(&draft.description, limits));
    report.check(check_location(&draft.location, limits));
    report.check(check_timing(&draft.timing));
    report.check(check_budget(
        draft.budget.has_budget,
        draft.budget.kind,
        Some(draft.budget.amount),
        Some(draft.budget.hourly_rate),
    ));
    report.check(check_provider(&draft.provider_selection));
    if flow == FlowKind::Group && draft.group_id.is_none() {
        report.check(Err(FieldIssue::new(
            DraftField::Group,
            "Group requests must belong to a group",
        )));
    }
    report
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewStep {
    draft: Draft,
    flow: FlowKind,
    catalog: Vec<String>,
    limits: DraftLimits,
    edit: Option<EditContext>,
}

impl ReviewStep {
    pub fn mount(ctx: &StepContext<'_>) -> Self {
        Self {
            draft: ctx.hydrate(),
            flow: ctx.store.flow(),
            catalog: ctx.config.categories.clone(),
            limits: ctx.config.limits(),
            edit: ctx.params.edit,
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn validate(&self) -> ValidationReport {
        review_report(&self.draft, self.flow, &self.catalog, &self.limits)
    }

    /// Whether the Submit action should be enabled.
    pub fn can_submit(&self) -> bool {
        self.validate().is_valid()
    }

    pub fn back(&self, ctx: &mut StepContext<'_>) -> StepOutcome {
        go_back(StepName::Review, ctx)
    }

    pub fn cancel(&self, ctx: &mut StepContext<'_>, confirmer: &mut dyn Confirmer) -> StepOutcome {
        cancel_flow(ctx, confirmer)
    }

    /// Validates the live draft, hands it to `sink`, then clears the store
    /// and leaves the flow. Nothing is cleared unless the sink accepts.
    pub fn submit(
        &self,
        ctx: &mut StepContext<'_>,
        sink: &mut dyn SubmitSink,
        groups: Option<&mut GroupBook>,
    ) -> SubmitOutcome {
        let draft = ctx.store.get_state();
        let report = review_report(&draft, self.flow, &self.catalog, &self.limits);
        if !report.is_valid() {
            tracing::info!(issues = %report, "submit blocked");
            return SubmitOutcome::Blocked(report);
        }

        let group_id = match self.flow {
            FlowKind::Group => draft.group_id.clone(),
            FlowKind::Individual => None,
        };
        let mut groups = groups;
        if let Some(group_id) = &group_id {
            let known = groups
                .as_deref()
                .map(|book| book.contains(group_id))
                .unwrap_or(false);
            if !known {
                let block = PolicyBlock::UnknownGroup(group_id.clone());
                tracing::warn!(rule = block.kind(), group_id = %group_id, "submit refused");
                return SubmitOutcome::Refused(block);
            }
        }

        let (id, created_at) = self
            .edit
            .map(|edit| (edit.request_id, edit.created_at))
            .unwrap_or_else(|| (Uuid::new_v4(), Utc::now()));
        let request = ServiceRequest::from_draft(id, draft, created_at);
        if let Err(err) = sink.submit(&request) {
            return SubmitOutcome::Failed(err);
        }

        if let (Some(group_id), Some(book)) = (&group_id, groups.as_deref_mut()) {
            if let Err(block) = attach_pending(book, group_id, &request.id.to_string()) {
                return SubmitOutcome::Refused(block);
            }
        }

        if let Some(edit) = self.edit {
            tracing::info!(
                request_id = %request.id,
                from = %edit.original_status,
                "edited request resubmitted as pending"
            );
        }
        ctx.store.dispatch(DraftAction::Reset);
        let landing = ctx.landing();
        ctx.navigator.exit_to(&landing);
        SubmitOutcome::Submitted(Box::new(request))
    }

    /// Human-readable summary shown above the Submit action.
    pub fn summary_lines(&self) -> Vec<String> {
        let draft = &self.draft;
        let or_unfilled = |value: &str| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                "[unfilled]".to_string()
            } else {
                trimmed.to_string()
            }
        };

        let location = [
            draft.location.street.as_str(),
            draft.location.building.as_str(),
            draft.location.city.as_str(),
        ]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

        let timing = match draft.timing.kind {
            TimingKind::Urgent => "Urgent".to_string(),
            TimingKind::Flexible => format!(
                "Flexible ({}, {})",
                or_unfilled(draft.timing.day.as_str()),
                or_unfilled(draft.timing.time_slot.as_str())
            ),
        };

        let budget = match (draft.budget.has_budget, draft.budget.kind) {
            (false, _) => "No budget".to_string(),
            (true, BudgetKind::Fixed) => format!("Fixed {}", format_amount(draft.budget.amount)),
            (true, BudgetKind::Hourly) => {
                format!("Hourly {}/h", format_amount(draft.budget.hourly_rate))
            }
            (true, BudgetKind::Unset) => "[unfilled]".to_string(),
        };

        let providers = match (
            draft.provider_selection.kind,
            &draft.provider_selection.selected_provider,
        ) {
            (ProviderChoice::All, _) => "All providers".to_string(),
            (ProviderChoice::Selected, Some(provider)) => provider.name.clone(),
            (ProviderChoice::Selected, None) => "[unfilled]".to_string(),
        };

        let mut lines = vec!["Review your request:".to_string()];
        if let Some(group_id) = &draft.group_id {
            lines.push(format!("  Group: {}", group_id));
        }
        lines.push(format!(
            "  Category: {}",
            or_unfilled(draft.category.as_deref().unwrap_or_default())
        ));
        lines.push(format!("  Title: {}", or_unfilled(draft.title.as_str())));
        lines.push(format!("  Description: {}", or_unfilled(draft.description.as_str())));
        lines.push(format!("  Location: {}", or_unfilled(location.as_str())));
        lines.push(format!("  Images: {}", draft.location.images.len()));
        lines.push(format!("  Timing: {}", timing));
        lines.push(format!("  Budget: {}", budget));
        lines.push(format!("  Providers: {}", providers));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WizardConfig;
    use crate::domain::{Budget, Location, ProviderRef, ProviderSelection, RequestStatus, Timing};
    use crate::wizard::navigation::StackNavigator;
    use crate::wizard::route::RouteParams;
    use crate::wizard::store::DraftStore;
    use crate::wizard::submit::MockSubmitSink;

    fn complete(store: &DraftStore) {
        store.dispatch(DraftAction::SetCategory(Some("Plumbing".into())));
        store.dispatch(DraftAction::SetDetails {
            title: "Leaking sink".into(),
            description: "Kitchen sink drips all night".into(),
        });
        store.dispatch(DraftAction::SetLocation(Location {
            city: "Lisbon".into(),
            street: "Rua Augusta".into(),
            building: "12B".into(),
            images: vec!["file:///sink.jpg".into()],
        }));
        store.dispatch(DraftAction::SetTiming(Timing::flexible("Monday", "Morning")));
        store.dispatch(DraftAction::SetBudget(Budget::fixed(150.0)));
        store.dispatch(DraftAction::SetProvider(ProviderSelection::selected(
            ProviderRef::new("p1", "Ana Costa"),
        )));
    }

    #[test]
    fn empty_draft_names_every_slice() {
        let store = DraftStore::new(FlowKind::Group);
        let config = WizardConfig::default();
        let params = RouteParams::default();
        let mut nav = StackNavigator::new();
        let ctx = StepContext::new(&store, &mut nav, &params, &config);

        let review = ReviewStep::mount(&ctx);
        assert!(!review.can_submit());
        assert_eq!(
            review.validate().fields(),
            vec![
                DraftField::Category,
                DraftField::Title,
                DraftField::Description,
                DraftField::City,
                DraftField::TimingDay,
                DraftField::Group,
            ]
        );
    }

    #[test]
    fn submit_resets_and_exits() {
        let store = DraftStore::new(FlowKind::Individual);
        complete(&store);
        let config = WizardConfig::default();
        let params = RouteParams::default();
        let mut nav = StackNavigator::new();
        let mut sink = MockSubmitSink::new();
        let mut ctx = StepContext::new(&store, &mut nav, &params, &config);

        let review = ReviewStep::mount(&ctx);
        let outcome = review.submit(&mut ctx, &mut sink, None);
        let SubmitOutcome::Submitted(request) = outcome else {
            panic!("expected submission, got {outcome:?}");
        };
        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(request.budget, Budget::fixed(150.0));
        drop(ctx);

        assert!(store.get_state().is_empty());
        assert_eq!(nav.exited_to(), Some("Home"));
        assert_eq!(sink.accepted().len(), 1);
    }

    #[test]
    fn failed_sink_keeps_the_draft() {
        let store = DraftStore::new(FlowKind::Individual);
        complete(&store);
        let before = store.get_state();
        let config = WizardConfig::default();
        let params = RouteParams::default();
        let mut nav = StackNavigator::new();
        let mut sink = MockSubmitSink::rejecting("offline");
        let mut ctx = StepContext::new(&store, &mut nav, &params, &config);

        let review = ReviewStep::mount(&ctx);
        assert_eq!(
            review.submit(&mut ctx, &mut sink, None),
            SubmitOutcome::Failed(SubmitError::Rejected("offline".into()))
        );
        drop(ctx);
        assert_eq!(store.get_state(), before);
        assert!(nav.intents().is_empty());
    }

    #[test]
    fn summary_lists_each_slice() {
        let store = DraftStore::new(FlowKind::Individual);
        complete(&store);
        let config = WizardConfig::default();
        let params = RouteParams::default();
        let mut nav = StackNavigator::new();
        let ctx = StepContext::new(&store, &mut nav, &params, &config);

        let review = ReviewStep::mount(&ctx);
        insta::assert_snapshot!(review.summary_lines().join("\n"), @r"
        Review your request:
          Category: Plumbing
          Title: Leaking sink
          Description: Kitchen sink drips all night
          Location: Rua Augusta, 12B, Lisbon
          Images: 1
          Timing: Flexible (Monday, Morning)
          Budget: Fixed 150
          Providers: Ana Costa
        ");
    }
}
