use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::RequestStatus;

/// Named screens of the wizard, in the only order they can be visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepName {
    Category,
    Details,
    Location,
    Budget,
    ProviderSelection,
    Review,
}

impl StepName {
    pub const SEQUENCE: [StepName; 6] = [
        StepName::Category,
        StepName::Details,
        StepName::Location,
        StepName::Budget,
        StepName::ProviderSelection,
        StepName::Review,
    ];

    pub fn index(self) -> usize {
        Self::SEQUENCE
            .iter()
            .position(|step| *step == self)
            .unwrap_or_default()
    }

    pub fn next(self) -> Option<StepName> {
        Self::SEQUENCE.get(self.index() + 1).copied()
    }

    pub fn previous(self) -> Option<StepName> {
        self.index()
            .checked_sub(1)
            .and_then(|index| Self::SEQUENCE.get(index).copied())
    }

    pub fn first() -> StepName {
        StepName::Category
    }

    pub fn title(self) -> &'static str {
        match self {
            StepName::Category => "Category",
            StepName::Details => "Details",
            StepName::Location => "Location & timing",
            StepName::Budget => "Budget",
            StepName::ProviderSelection => "Providers",
            StepName::Review => "Review",
        }
    }
}

impl fmt::Display for StepName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Step {} of {} – {}",
            self.index() + 1,
            Self::SEQUENCE.len(),
            self.title()
        )
    }
}

/// Identifies the request being reopened when a flow starts as an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditContext {
    pub request_id: Uuid,
    pub original_status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

/// Parameters threaded through every step of a flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    pub group_id: Option<String>,
    pub edit: Option<EditContext>,
    pub landing: Option<String>,
}

impl RouteParams {
    pub fn for_group(group_id: impl Into<String>) -> Self {
        Self {
            group_id: Some(group_id.into()),
            ..Self::default()
        }
    }

    pub fn with_landing(mut self, landing: impl Into<String>) -> Self {
        self.landing = Some(landing.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topology_is_linear() {
        assert_eq!(StepName::Category.previous(), None);
        assert_eq!(StepName::Category.next(), Some(StepName::Details));
        assert_eq!(StepName::Budget.previous(), Some(StepName::Location));
        assert_eq!(StepName::ProviderSelection.next(), Some(StepName::Review));
        assert_eq!(StepName::Review.next(), None);

        let walked: Vec<StepName> =
            std::iter::successors(Some(StepName::first()), |step| step.next()).collect();
        assert_eq!(walked, StepName::SEQUENCE.to_vec());
    }

    #[test]
    fn display_shows_position() {
        assert_eq!(StepName::Budget.to_string(), "Step 4 of 6 – Budget");
    }
}
