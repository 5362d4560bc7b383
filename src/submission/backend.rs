//! Submission payloads and the backend capability

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// What a form sends when it passes validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Submission {
    /// Contact message
    Contact {
        /// Sender name
        name: String,
        /// Reply address
        email: String,
        /// Message body
        message: String,
    },
    /// Comment with optional photo
    Comment {
        /// Author name
        name: String,
        /// Comment body
        message: String,
        /// Photo as a data URI
        #[serde(skip_serializing_if = "Option::is_none")]
        photo: Option<String>,
    },
}

/// Acknowledgement returned by a backend on success
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    /// Backend-assigned reference, if the backend provides one
    #[serde(default)]
    pub reference: Option<String>,
}

/// Capability that delivers a submission
///
/// Implementations block until the submission is delivered or has failed;
/// callers run them on a worker thread.
pub trait SubmissionBackend: Send + Sync {
    /// Deliver `payload`
    fn submit(&self, payload: &Submission) -> Result<Ack>;
}
