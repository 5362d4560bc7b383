//! Form submission delivery
//!
//! Validation and state reset live in the form controller; delivery is an
//! injected [`SubmissionBackend`] with a single blocking `submit` operation.
//! [`SimulatedBackend`] waits a fixed delay and always succeeds;
//! [`HttpBackend`] posts JSON to a configured endpoint.

pub mod backend;
pub mod http;
pub mod simulated;

pub use backend::{Ack, Submission, SubmissionBackend};
pub use http::HttpBackend;
pub use simulated::SimulatedBackend;

use crate::config::FolioConfig;
use crate::error::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Build the backend selected by `config`
pub fn backend_from_config(config: &FolioConfig) -> Result<Arc<dyn SubmissionBackend>> {
    match &config.submission.endpoint {
        Some(endpoint) => {
            info!("Submissions will be posted to {}", endpoint);
            Ok(Arc::new(HttpBackend::new(
                endpoint.clone(),
                Duration::from_secs(config.submission.timeout_secs),
            )?))
        }
        None => {
            info!("No submission endpoint configured, using simulated delivery");
            Ok(Arc::new(SimulatedBackend::new(Duration::from_millis(
                config.timings.submit_delay_ms,
            ))))
        }
    }
}
