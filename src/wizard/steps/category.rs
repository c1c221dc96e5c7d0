use crate::wizard::controller::{StepContext, StepController};
use crate::wizard::route::StepName;
use crate::wizard::store::{DraftAction, DraftStore};
use crate::wizard::validation::{check_category, ValidationReport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStep {
    selected: Option<String>,
    catalog: Vec<String>,
}

impl CategoryStep {
    pub fn mount(ctx: &StepContext<'_>) -> Self {
        let draft = ctx.hydrate();
        Self {
            selected: draft.category,
            catalog: ctx.config.categories.clone(),
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn catalog(&self) -> &[String] {
        &self.catalog
    }

    /// Picks a category, using the catalog's spelling when it is a known one.
    pub fn select(&mut self, store: &DraftStore, category: &str) {
        let trimmed = category.trim();
        let canonical = self
            .catalog
            .iter()
            .find(|known| known.eq_ignore_ascii_case(trimmed))
            .cloned()
            .unwrap_or_else(|| trimmed.to_string());
        self.selected = Some(canonical).filter(|value| !value.is_empty());
        store.dispatch(DraftAction::SetCategory(self.selected.clone()));
    }
}

impl StepController for CategoryStep {
    fn step(&self) -> StepName {
        StepName::Category
    }

    fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        report.check(check_category(self.selected.as_deref(), &self.catalog));
        report
    }

    fn commit(&self, store: &DraftStore) {
        store.dispatch(DraftAction::SetCategory(self.selected.clone()));
    }
}
