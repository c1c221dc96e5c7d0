#![allow(dead_code)]

use request_wizard::config::WizardConfig;
use request_wizard::wizard::{
    BudgetForm, CategoryStep, DetailsStep, LocationStep, ProviderStep, StackNavigator,
    StepController, StepOutcome, StepName, WizardSession,
};
use request_wizard::domain::{BudgetKind, ProviderRef};

/// Drives a session from Category to Review with a valid draft.
pub fn fill_to_review(session: &WizardSession, nav: &mut StackNavigator) {
    let mut ctx = session.context(nav);

    let mut category = CategoryStep::mount(&ctx);
    category.select(ctx.store, "Plumbing");
    assert_eq!(category.next(&mut ctx), StepOutcome::Advanced { to: StepName::Details });

    let mut details = DetailsStep::mount(&ctx);
    details.set_title(ctx.store, "Fix leaking sink");
    details.set_description(ctx.store, "Kitchen sink drips under the cabinet");
    assert_eq!(details.next(&mut ctx), StepOutcome::Advanced { to: StepName::Location });

    let mut location = LocationStep::mount(&ctx);
    location.set_city(ctx.store, "Lisbon");
    location.set_flexible(ctx.store, "Saturday", "Morning");
    assert_eq!(location.next(&mut ctx), StepOutcome::Advanced { to: StepName::Budget });

    let mut budget = BudgetForm::mount(&ctx);
    budget.choose_kind(ctx.store, BudgetKind::Fixed);
    budget.set_amount(ctx.store, "150");
    assert_eq!(budget.next(&mut ctx), StepOutcome::Advanced { to: StepName::ProviderSelection });

    let mut provider = ProviderStep::mount(&ctx);
    provider.choose_provider(ctx.store, ProviderRef::new("p1", "Ana's Plumbing"));
    assert_eq!(provider.next(&mut ctx), StepOutcome::Advanced { to: StepName::Review });
}

pub fn config() -> WizardConfig {
    WizardConfig::default()
}
