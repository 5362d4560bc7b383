//! Configuration data models
//!
//! This module defines the data structures used for page configuration.

use serde::{Deserialize, Serialize};

/// Top-level page configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FolioConfig {
    /// Delays for simulated work and transient UI
    pub timings: Timings,
    /// Section tracking and scroll thresholds
    pub tracker: TrackerSettings,
    /// Upload constraints for the comment photo
    pub uploads: UploadLimits,
    /// Where form submissions go
    pub submission: SubmissionSettings,
}

/// Delays for simulated work and transient UI, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Duration of the simulated submission call
    pub submit_delay_ms: u64,
    /// How long a notification stays visible
    pub notification_ms: u64,
    /// Delay before the hero image replaces its skeleton
    pub loading_ms: u64,
}

/// Section tracking and scroll thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    /// Minimum visible share of a region before it becomes active (0.0-1.0)
    pub visibility_threshold: f64,
    /// Height of the fixed header excluded from the viewport, in pixels
    pub header_offset_px: f64,
    /// Scroll offset beyond which the scroll-to-top button shows, in pixels
    pub scroll_top_threshold_px: f64,
}

/// Upload constraints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadLimits {
    /// Largest accepted photo, inclusive
    pub max_photo_bytes: u64,
}

/// Submission backend selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionSettings {
    /// HTTP endpoint receiving JSON submissions; `None` uses the simulated backend
    pub endpoint: Option<String>,
    /// Request timeout for the HTTP backend, in seconds
    pub timeout_secs: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            submit_delay_ms: 1000,
            notification_ms: 3000,
            loading_ms: 500,
        }
    }
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            visibility_threshold: 0.3,
            header_offset_px: 80.0,
            scroll_top_threshold_px: 300.0,
        }
    }
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_photo_bytes: 5 * 1024 * 1024,
        }
    }
}

impl Default for SubmissionSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: 10,
        }
    }
}
