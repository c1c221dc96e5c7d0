use crate::config::DraftLimits;
use crate::wizard::controller::{StepContext, StepController};
use crate::wizard::route::StepName;
use crate::wizard::store::{DraftAction, DraftStore};
use crate::wizard::validation::{check_description, check_title, ValidationReport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsStep {
    title: String,
    description: String,
    limits: DraftLimits,
}

impl DetailsStep {
    pub fn mount(ctx: &StepContext<'_>) -> Self {
        let draft = ctx.hydrate();
        Self {
            title: draft.title,
            description: draft.description,
            limits: ctx.config.limits(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Characters left before the title hits its cap.
    pub fn title_remaining(&self) -> usize {
        self.limits
            .title_max_len
            .saturating_sub(self.title.trim().chars().count())
    }

    pub fn set_title(&mut self, store: &DraftStore, title: &str) {
        self.title = title.to_string();
        self.sync(store, false);
    }

    pub fn set_description(&mut self, store: &DraftStore, description: &str) {
        self.description = description.to_string();
        self.sync(store, false);
    }

    fn sync(&self, store: &DraftStore, trimmed: bool) {
        let (title, description) = if trimmed {
            (self.title.trim(), self.description.trim())
        } else {
            (self.title.as_str(), self.description.as_str())
        };
        store.dispatch(DraftAction::SetDetails {
            title: title.to_string(),
            description: description.to_string(),
        });
    }
}

impl StepController for DetailsStep {
    fn step(&self) -> StepName {
        StepName::Details
    }

    fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        report.check(check_title(&self.title, &self.limits));
        report.check(check_description(&self.description, &self.limits));
        report
    }

    fn commit(&self, store: &DraftStore) {
        self.sync(store, true);
    }
}
