//! Trait abstraction for the lead endpoint to enable mocking in tests

use super::{LeadSubmission, SubmitError};
use async_trait::async_trait;

/// Delivers a completed lead to the capture endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeadSubmitter: Send + Sync {
    /// Send one lead. Any 2xx response is success; the body is ignored.
    async fn submit_lead(&self, lead: &LeadSubmission) -> Result<(), SubmitError>;
}
