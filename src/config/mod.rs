//! Configuration management module
//!
//! This module handles loading and saving page configuration and the
//! persisted preference store. Files live in the data directory resolved by
//! [`ConfigManager::data_dir`] and are written atomically.

pub mod manager;
pub mod models;
pub mod preferences;

pub use manager::ConfigManager;
pub use models::{FolioConfig, SubmissionSettings, Timings, TrackerSettings, UploadLimits};
pub use preferences::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
