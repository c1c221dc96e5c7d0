//! The request-draft builder.
//!
//! Both flows share one topology:
//! `Category -> Details -> Location -> Budget -> ProviderSelection -> Review`.
//! Each flow owns a [`DraftStore`]; steps borrow it through a
//! [`StepContext`] and talk to the outside world only through the
//! [`Navigator`], [`Confirmer`], and [`SubmitSink`] traits.

pub mod budget_form;
pub mod controller;
pub mod group;
pub mod navigation;
pub mod review;
pub mod route;
pub mod session;
pub mod steps;
pub mod store;
pub mod submit;
pub mod validation;

pub use budget_form::BudgetForm;
pub use controller::{
    Confirmer, DiscardChoice, DiscardPrompt, FixedAnswer, StepContext, StepController,
    StepOutcome,
};
pub use group::{delete_group, ensure_deletable};
pub use navigation::{NavIntent, Navigator, StackNavigator};
pub use review::{review_report, ReviewStep, SubmitOutcome};
pub use route::{EditContext, RouteParams, StepName};
pub use session::WizardSession;
pub use steps::{CategoryStep, DetailsStep, LocationStep, ProviderStep};
pub use store::{DraftAction, DraftStore, FlowKind, StoreHandle};
pub use submit::{MockSubmitSink, SubmitSink};
pub use validation::{DraftField, FieldIssue, ValidationReport};
