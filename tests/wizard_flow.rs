mod common;

use request_wizard::domain::{
    Budget, BudgetKind, ProviderChoice, ProviderSelection, RequestStatus, Timing,
};
use request_wizard::wizard::controller::go_back;
use request_wizard::wizard::{
    BudgetForm, CategoryStep, DetailsStep, DiscardChoice, DraftAction, DraftField, FixedAnswer,
    LocationStep, MockSubmitSink, NavIntent, ProviderStep, ReviewStep, StackNavigator,
    StepController, StepName, StepOutcome, SubmitOutcome, WizardSession,
};

#[test]
fn five_steps_then_submit_round_trip() {
    request_wizard::init();
    let session = WizardSession::individual(common::config());
    let mut nav = StackNavigator::new();
    session.begin(&mut nav);
    common::fill_to_review(&session, &mut nav);

    let draft = session.draft();
    assert_eq!(draft.category.as_deref(), Some("Plumbing"));
    assert_eq!(draft.title, "Fix leaking sink");
    assert_eq!(draft.location.city, "Lisbon");
    assert_eq!(draft.timing, Timing::flexible("Saturday", "Morning"));
    assert_eq!(draft.budget, Budget::fixed(150.0));
    assert_eq!(draft.provider_selection.kind, ProviderChoice::Selected);

    let mut sink = MockSubmitSink::new();
    let mut ctx = session.context(&mut nav);
    let review = ReviewStep::mount(&ctx);
    assert!(review.can_submit());
    let outcome = review.submit(&mut ctx, &mut sink, None);

    let request = match outcome {
        SubmitOutcome::Submitted(request) => request,
        other => panic!("expected submission, got {other:?}"),
    };
    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.budget, Budget::fixed(150.0));
    assert_eq!(sink.accepted().len(), 1);
    assert!(session.draft().is_empty());
    assert_eq!(nav.exited_to(), Some("Home"));
}

#[test]
fn no_budget_and_all_providers_reach_review() {
    let session = WizardSession::individual(common::config());
    let mut nav = StackNavigator::new();
    session.begin(&mut nav);
    let mut ctx = session.context(&mut nav);

    let mut category = CategoryStep::mount(&ctx);
    category.select(ctx.store, "cleaning");
    category.next(&mut ctx);
    let mut details = DetailsStep::mount(&ctx);
    details.set_title(ctx.store, "Deep clean");
    details.set_description(ctx.store, "Two bedroom flat");
    details.next(&mut ctx);
    let mut location = LocationStep::mount(&ctx);
    location.set_city(ctx.store, "Porto");
    location.set_urgent(ctx.store);
    location.next(&mut ctx);

    let mut budget = BudgetForm::mount(&ctx);
    budget.set_has_budget(ctx.store, false);
    assert!(budget.can_proceed());
    budget.next(&mut ctx);

    let mut provider = ProviderStep::mount(&ctx);
    provider.choose_all(ctx.store);
    assert_eq!(
        provider.next(&mut ctx),
        StepOutcome::Advanced {
            to: StepName::Review
        }
    );

    let draft = session.draft();
    assert_eq!(draft.category.as_deref(), Some("Cleaning"));
    assert_eq!(draft.budget, Budget::none());
    assert_eq!(draft.provider_selection, ProviderSelection::all());
    assert_eq!(nav.current(), Some(StepName::Review));
}

#[test]
fn next_stays_disabled_until_the_slice_is_valid() {
    let session = WizardSession::individual(common::config());
    let mut nav = StackNavigator::new();
    session.begin(&mut nav);
    let mut ctx = session.context(&mut nav);

    let mut category = CategoryStep::mount(&ctx);
    assert!(!category.can_proceed());
    let StepOutcome::Blocked(report) = category.next(&mut ctx) else {
        panic!("category without a selection must not advance");
    };
    assert!(report.mentions(DraftField::Category));
    category.select(ctx.store, "Electrical");
    category.next(&mut ctx);

    let mut details = DetailsStep::mount(&ctx);
    details.set_title(ctx.store, &"x".repeat(101));
    details.set_description(ctx.store, "ok");
    assert!(!details.can_proceed());
    assert!(matches!(details.next(&mut ctx), StepOutcome::Blocked(_)));
    assert_eq!(nav.current(), Some(StepName::Details));
}

#[test]
fn invalid_budget_amount_blocks_next_and_syncs_zero() {
    let session = WizardSession::individual(common::config());
    let mut nav = StackNavigator::new();
    let mut ctx = session.context(&mut nav);

    let mut budget = BudgetForm::mount(&ctx);
    budget.choose_kind(ctx.store, BudgetKind::Hourly);
    budget.set_hourly_rate(ctx.store, "abc");
    assert!(!budget.can_proceed());
    let stored = session.store().read(|draft| draft.budget);
    assert_eq!(stored.kind, BudgetKind::Hourly);
    assert_eq!(stored.hourly_rate, 0.0);

    let StepOutcome::Blocked(report) = budget.next(&mut ctx) else {
        panic!("non-numeric rate must block");
    };
    assert_eq!(report.issues()[0].message, "Enter a valid hourly rate");
}

#[test]
fn back_walks_the_sequence_without_touching_the_draft() {
    let session = WizardSession::individual(common::config());
    let mut nav = StackNavigator::new();
    session.begin(&mut nav);
    common::fill_to_review(&session, &mut nav);
    let before = session.draft();

    let mut ctx = session.context(&mut nav);
    let mut step = StepName::Review;
    while let StepOutcome::WentBack { to: Some(previous) } = go_back(step, &mut ctx) {
        step = previous;
    }
    assert_eq!(step, StepName::Category);
    assert_eq!(nav.last_intent(), Some(&NavIntent::GoBack));
    assert_eq!(session.draft(), before);
}

#[test]
fn cancel_from_any_step_discards_and_next_flow_starts_empty() {
    for step in StepName::SEQUENCE {
        let session = WizardSession::individual(common::config());
        let mut nav = StackNavigator::new();
        session.begin(&mut nav);
        session
            .store()
            .dispatch(DraftAction::SetCategory(Some("Painting".into())));
        session
            .store()
            .dispatch(DraftAction::SetTiming(Timing::urgent()));

        let mut ctx = session.context(&mut nav);
        let mut keep = FixedAnswer(DiscardChoice::KeepEditing);
        let kept = match step {
            StepName::Review => ReviewStep::mount(&ctx).cancel(&mut ctx, &mut keep),
            _ => CategoryStep::mount(&ctx).cancel(&mut ctx, &mut keep),
        };
        assert_eq!(kept, StepOutcome::Stayed, "{step:?}");
        assert!(!session.draft().is_empty());

        let mut discard = FixedAnswer(DiscardChoice::Discard);
        let outcome = match step {
            StepName::Category => CategoryStep::mount(&ctx).cancel(&mut ctx, &mut discard),
            StepName::Details => DetailsStep::mount(&ctx).cancel(&mut ctx, &mut discard),
            StepName::Location => LocationStep::mount(&ctx).cancel(&mut ctx, &mut discard),
            StepName::Budget => BudgetForm::mount(&ctx).cancel(&mut ctx, &mut discard),
            StepName::ProviderSelection => ProviderStep::mount(&ctx).cancel(&mut ctx, &mut discard),
            StepName::Review => ReviewStep::mount(&ctx).cancel(&mut ctx, &mut discard),
        };
        assert_eq!(
            outcome,
            StepOutcome::Exited {
                landing: "Home".into()
            }
        );
        assert!(session.draft().is_empty(), "{step:?}");
        drop(ctx);

        let fresh = WizardSession::individual(common::config());
        assert!(fresh.draft().is_empty());
    }
}

#[test]
fn late_update_after_flow_ends_is_dropped() {
    let session = WizardSession::individual(common::config());
    let handle = session.store().handle();
    assert!(handle.dispatch(DraftAction::SetBudget(Budget::hourly(30.0))));
    assert_eq!(session.draft().budget, Budget::hourly(30.0));

    drop(session);
    assert!(!handle.is_alive());
    assert!(!handle.dispatch(DraftAction::SetBudget(Budget::fixed(1.0))));
}

#[test]
fn submit_failure_keeps_the_draft() {
    let session = WizardSession::individual(common::config());
    let mut nav = StackNavigator::new();
    session.begin(&mut nav);
    common::fill_to_review(&session, &mut nav);

    let mut sink = MockSubmitSink::rejecting("service unavailable");
    let mut ctx = session.context(&mut nav);
    let outcome = ReviewStep::mount(&ctx).submit(&mut ctx, &mut sink, None);
    assert!(matches!(outcome, SubmitOutcome::Failed(_)));
    assert!(!session.draft().is_empty());
    assert_eq!(nav.current(), Some(StepName::Review));
    assert_eq!(nav.exited_to(), None);
}

#[test]
fn declined_request_is_edited_and_resubmitted_under_the_same_id() {
    let session = WizardSession::individual(common::config());
    let mut nav = StackNavigator::new();
    session.begin(&mut nav);
    common::fill_to_review(&session, &mut nav);
    let mut sink = MockSubmitSink::new();
    let mut ctx = session.context(&mut nav);
    let SubmitOutcome::Submitted(first) = ReviewStep::mount(&ctx).submit(&mut ctx, &mut sink, None)
    else {
        panic!("first submission should succeed");
    };
    sink.set_status(first.id, RequestStatus::Declined);

    let declined = sink.find(first.id).cloned().unwrap();
    let edit = WizardSession::edit(common::config(), &declined).unwrap();
    let mut nav = StackNavigator::new();
    edit.begin(&mut nav);
    let mut ctx = edit.context(&mut nav);
    assert_eq!(BudgetForm::mount(&ctx).amount_text(), "150");

    let mut budget = BudgetForm::mount(&ctx);
    budget.set_amount(ctx.store, "175");
    let SubmitOutcome::Submitted(second) = ReviewStep::mount(&ctx).submit(&mut ctx, &mut sink, None)
    else {
        panic!("resubmission should succeed");
    };
    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);
    assert_eq!(second.status, RequestStatus::Pending);
    assert_eq!(second.budget, Budget::fixed(175.0));
    assert_eq!(sink.accepted().len(), 1);
}
