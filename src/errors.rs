use std::result::Result as StdResult;

use thiserror::Error;

use crate::domain::RequestStatus;

/// Error type for the fallible edges of the crate: configuration files,
/// serialization, and the submit sink.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error(transparent)]
    Submit(#[from] SubmitError),
    #[error(transparent)]
    Policy(#[from] PolicyBlock),
}

pub type Result<T> = StdResult<T, WizardError>;

impl From<std::io::Error> for WizardError {
    fn from(err: std::io::Error) -> Self {
        WizardError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for WizardError {
    fn from(err: serde_json::Error) -> Self {
        WizardError::Storage(err.to_string())
    }
}

/// Failure reported by a submit sink. The draft is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Submission rejected: {0}")]
    Rejected(String),
}

/// A structurally valid action refused by a business rule.
///
/// Policy blocks are surfaced to the user as a blocking dialog; they are
/// returned as values rather than propagated as failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyBlock {
    #[error("Group `{group_id}` still owns {count} request(s) and cannot be deleted")]
    HasActiveRequests { group_id: String, count: usize },
    #[error("Group not found: {0}")]
    UnknownGroup(String),
    #[error("Requests that are {0} cannot be edited")]
    NotEditable(RequestStatus),
}

impl PolicyBlock {
    /// Stable identifier for the rule that refused the action.
    pub fn kind(&self) -> &'static str {
        match self {
            PolicyBlock::HasActiveRequests { .. } => "HAS_ACTIVE_REQUESTS",
            PolicyBlock::UnknownGroup(_) => "UNKNOWN_GROUP",
            PolicyBlock::NotEditable(_) => "NOT_EDITABLE",
        }
    }
}
