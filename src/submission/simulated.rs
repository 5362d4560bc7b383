//! Stand-in backend that waits and always succeeds

use crate::error::Result;
use crate::submission::backend::{Ack, Submission, SubmissionBackend};
use std::time::Duration;
use tracing::info;

/// Sleeps for a fixed delay, then acknowledges
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    delay: Duration,
}

impl SimulatedBackend {
    /// Create a backend that waits `delay` per submission
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000))
    }
}

impl SubmissionBackend for SimulatedBackend {
    fn submit(&self, payload: &Submission) -> Result<Ack> {
        std::thread::sleep(self.delay);
        match payload {
            Submission::Contact { name, .. } => info!("Simulated contact message from {}", name),
            Submission::Comment { name, .. } => info!("Simulated comment from {}", name),
        }
        Ok(Ack::default())
    }
}
