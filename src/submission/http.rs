//! HTTP submission backend
//!
//! Posts the JSON-encoded [`Submission`] to a configured endpoint with a
//! blocking `reqwest` client. Any transport error or non-2xx status is a
//! submission failure; the response body, when it parses as an [`Ack`], is
//! returned to the caller.

use crate::error::{FolioError, Result, StringError};
use crate::submission::backend::{Ack, Submission, SubmissionBackend};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Delivers submissions with an HTTP POST
pub struct HttpBackend {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpBackend {
    /// Create a backend posting to `endpoint` with the given request timeout
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(format!("folio/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                warn!("Failed to create HTTP client: {}", e);
                FolioError::ConfigError(Box::new(e))
            })?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    /// Target endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SubmissionBackend for HttpBackend {
    fn submit(&self, payload: &Submission) -> Result<Ack> {
        debug!("Posting submission to {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .map_err(|e| {
                warn!("Failed to reach submission endpoint: {}", e);
                FolioError::SubmissionFailed(Box::new(e))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Submission endpoint returned error status: {}", status);
            return Err(FolioError::SubmissionFailed(StringError::new(format!(
                "endpoint returned {status}"
            ))));
        }

        let body = response
            .text()
            .map_err(|e| FolioError::SubmissionFailed(Box::new(e)))?;
        let ack = if body.trim().is_empty() {
            Ack::default()
        } else {
            serde_json::from_str(&body).unwrap_or_else(|e| {
                debug!("Response body is not an acknowledgement ({}), ignoring", e);
                Ack::default()
            })
        };

        info!("Submission accepted by {}", self.endpoint);
        Ok(ack)
    }
}
