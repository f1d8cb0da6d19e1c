//! HTTP client for the lead capture endpoint
//!
//! Posts the lead as JSON and treats any 2xx response as accepted.

use super::{LeadSubmission, LeadSubmitter, SubmitError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the lead capture endpoint
#[derive(Debug, Clone)]
pub struct HttpLeadClient {
    client: Client,
    endpoint: String,
}

impl HttpLeadClient {
    /// Create a client posting to `endpoint`
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SubmitError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LeadSubmitter for HttpLeadClient {
    async fn submit_lead(&self, lead: &LeadSubmission) -> Result<(), SubmitError> {
        tracing::debug!(endpoint = %self.endpoint, zip3 = lead.zip3(), "Posting lead");

        let response = self.client.post(&self.endpoint).json(lead).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Status(status));
        }

        Ok(())
    }
}
