use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::draft::{Budget, Draft, Location, ProviderSelection, Timing};

/// Lifecycle of a submitted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    InProgress,
    Finished,
    Declined,
}

impl RequestStatus {
    /// Only requests nobody has started working on can be reopened in the wizard.
    pub fn is_editable(self) -> bool {
        matches!(self, RequestStatus::Pending | RequestStatus::Declined)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::InProgress => "In Progress",
            RequestStatus::Finished => "Finished",
            RequestStatus::Declined => "Declined",
        };
        f.write_str(label)
    }
}

/// A request produced by a successful submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: Uuid,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub category: String,
    pub title: String,
    pub description: String,
    pub location: Location,
    pub timing: Timing,
    pub budget: Budget,
    pub provider_selection: ProviderSelection,
    pub group_id: Option<String>,
}

impl ServiceRequest {
    /// Builds a pending request out of a validated draft.
    pub fn from_draft(id: Uuid, draft: Draft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            status: RequestStatus::Pending,
            created_at,
            category: draft.category.unwrap_or_default(),
            title: draft.title,
            description: draft.description,
            location: draft.location,
            timing: draft.timing,
            budget: draft.budget,
            provider_selection: draft.provider_selection,
            group_id: draft.group_id,
        }
    }

    /// Pre-fill data used when the request is reopened for editing.
    pub fn to_draft(&self) -> Draft {
        Draft {
            category: Some(self.category.clone()).filter(|value| !value.is_empty()),
            title: self.title.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            timing: self.timing.clone(),
            budget: self.budget,
            provider_selection: self.provider_selection.clone(),
            group_id: self.group_id.clone(),
        }
    }
}
