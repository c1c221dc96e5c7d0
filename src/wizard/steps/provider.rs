use crate::domain::{ProviderRef, ProviderSelection};
use crate::wizard::controller::{StepContext, StepController};
use crate::wizard::route::StepName;
use crate::wizard::store::{DraftAction, DraftStore};
use crate::wizard::validation::{check_provider, ValidationReport};

/// Chooses between broadcasting the request and targeting one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderStep {
    selection: ProviderSelection,
}

impl ProviderStep {
    pub fn mount(ctx: &StepContext<'_>) -> Self {
        let draft = ctx.hydrate();
        Self {
            selection: draft.provider_selection,
        }
    }

    pub fn selection(&self) -> &ProviderSelection {
        &self.selection
    }

    pub fn choose_all(&mut self, store: &DraftStore) {
        self.selection = ProviderSelection::all();
        self.sync(store);
    }

    pub fn choose_provider(&mut self, store: &DraftStore, provider: ProviderRef) {
        self.selection = ProviderSelection::selected(provider);
        self.sync(store);
    }

    fn sync(&self, store: &DraftStore) {
        store.dispatch(DraftAction::SetProvider(self.selection.clone()));
    }
}

impl StepController for ProviderStep {
    fn step(&self) -> StepName {
        StepName::ProviderSelection
    }

    fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        report.check(check_provider(&self.selection));
        report
    }

    fn commit(&self, store: &DraftStore) {
        self.sync(store);
    }
}
