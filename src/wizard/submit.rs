use uuid::Uuid;

use crate::domain::{RequestStatus, ServiceRequest};
use crate::errors::SubmitError;

/// Receives finished requests from the review step.
pub trait SubmitSink {
    fn submit(&mut self, request: &ServiceRequest) -> Result<(), SubmitError>;
}

/// Sink that logs each request and keeps it in memory.
#[derive(Debug, Default)]
pub struct MockSubmitSink {
    accepted: Vec<ServiceRequest>,
    reject_with: Option<String>,
}

impl MockSubmitSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that refuses every submission with `reason`.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            accepted: Vec::new(),
            reject_with: Some(reason.into()),
        }
    }

    pub fn accepted(&self) -> &[ServiceRequest] {
        &self.accepted
    }

    pub fn find(&self, id: Uuid) -> Option<&ServiceRequest> {
        self.accepted.iter().find(|request| request.id == id)
    }

    /// Simulates the provider side moving a request along.
    pub fn set_status(&mut self, id: Uuid, status: RequestStatus) -> bool {
        match self.accepted.iter_mut().find(|request| request.id == id) {
            Some(request) => {
                request.status = status;
                true
            }
            None => false,
        }
    }
}

impl SubmitSink for MockSubmitSink {
    fn submit(&mut self, request: &ServiceRequest) -> Result<(), SubmitError> {
        if let Some(reason) = &self.reject_with {
            tracing::warn!(request_id = %request.id, reason = %reason, "submission rejected");
            return Err(SubmitError::Rejected(reason.clone()));
        }
        let payload = serde_json::to_string(request)
            .map_err(|err| SubmitError::Rejected(err.to_string()))?;
        tracing::info!(request_id = %request.id, payload = %payload, "request submitted");
        match self
            .accepted
            .iter_mut()
            .find(|existing| existing.id == request.id)
        {
            Some(existing) => *existing = request.clone(),
            None => self.accepted.push(request.clone()),
        }
        Ok(())
    }
}
