use crate::config::WizardConfig;
use crate::domain::{Draft, ServiceRequest};
use crate::errors::PolicyBlock;

use super::controller::StepContext;
use super::navigation::Navigator;
use super::route::{EditContext, RouteParams, StepName};
use super::store::{DraftAction, DraftStore, FlowKind};

/// One running flow: the store it owns plus the parameters every step of the
/// flow is mounted with.
///
/// Starting a new session always starts from a fresh store, so nothing leaks
/// from a cancelled or submitted flow into the next one.
#[derive(Debug)]
pub struct WizardSession {
    store: DraftStore,
    params: RouteParams,
    config: WizardConfig,
}

impl WizardSession {
    pub fn individual(config: WizardConfig) -> Self {
        Self {
            store: DraftStore::new(FlowKind::Individual),
            params: RouteParams::default(),
            config,
        }
    }

    pub fn group(config: WizardConfig, group_id: impl Into<String>) -> Self {
        let params = RouteParams::for_group(group_id);
        let store = DraftStore::new(FlowKind::Group);
        store.dispatch(DraftAction::SetGroupId(params.group_id.clone()));
        Self {
            store,
            params,
            config,
        }
    }

    /// Reopens a pending or declined request with its data pre-filled.
    pub fn edit(config: WizardConfig, request: &ServiceRequest) -> Result<Self, PolicyBlock> {
        if !request.status.is_editable() {
            return Err(PolicyBlock::NotEditable(request.status));
        }
        let flow = if request.group_id.is_some() {
            FlowKind::Group
        } else {
            FlowKind::Individual
        };
        let params = RouteParams {
            group_id: request.group_id.clone(),
            edit: Some(EditContext {
                request_id: request.id,
                original_status: request.status,
                created_at: request.created_at,
            }),
            landing: None,
        };
        Ok(Self {
            store: DraftStore::with_draft(flow, request.to_draft()),
            params,
            config,
        })
    }

    pub fn flow(&self) -> FlowKind {
        self.store.flow()
    }

    pub fn store(&self) -> &DraftStore {
        &self.store
    }

    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn draft(&self) -> Draft {
        self.store.get_state()
    }

    /// Mounts the first step.
    pub fn begin(&self, navigator: &mut dyn Navigator) {
        tracing::info!(
            flow = self.flow().label(),
            editing = self.params.edit.is_some(),
            "request flow started"
        );
        navigator.navigate(StepName::first(), &self.params);
    }

    pub fn context<'a>(&'a self, navigator: &'a mut dyn Navigator) -> StepContext<'a> {
        StepContext::new(&self.store, navigator, &self.params, &self.config)
    }
}
