#![expect(
    clippy::unwrap_used,
    reason = "Test utilities use .unwrap() for brevity"
)]

//! Shared test utilities for `Folio` unit tests.
//!
//! Only compiled during testing (`#[cfg(test)]`).

use crate::config::manager::DATA_DIR_ENV;
use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes tests that modify `FOLIO_DATA_DIR`.
static DATA_DIR_LOCK: Mutex<()> = Mutex::new(());

/// Helper function to create a temporary test directory using tempfile.
/// Returns a `TempDir` that automatically cleans up when dropped.
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// RAII guard that points `FOLIO_DATA_DIR` at a temp directory for a test
/// scope and restores the original value when dropped.
///
/// # Safety Considerations
///
/// `std::env::set_var` and `std::env::remove_var` are unsafe because other
/// threads may read the environment concurrently. The guard holds
/// `DATA_DIR_LOCK` for its whole lifetime so only one test touches the
/// variable at a time, and no test holding it spawns threads that read it.
pub struct DataDirGuard {
    original: Option<String>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[expect(
    unsafe_code,
    reason = "Test-only code that modifies environment variables under a global lock."
)]
impl DataDirGuard {
    /// Create a new guard that sets `FOLIO_DATA_DIR` to the given temp directory path.
    pub fn new(temp_dir: &TempDir) -> Self {
        let lock = DATA_DIR_LOCK.lock().unwrap();

        let original = std::env::var(DATA_DIR_ENV).ok();
        // SAFETY: DATA_DIR_LOCK is held, so no other test reads or writes the
        // variable until this guard is dropped.
        unsafe {
            std::env::set_var(DATA_DIR_ENV, temp_dir.path());
        }
        Self {
            original,
            _lock: lock,
        }
    }
}

#[expect(
    unsafe_code,
    reason = "Test-only code that restores environment variables under a global lock."
)]
impl Drop for DataDirGuard {
    fn drop(&mut self) {
        // SAFETY: the lock is still held; it is released after this body runs.
        if let Some(ref original) = self.original {
            unsafe {
                std::env::set_var(DATA_DIR_ENV, original);
            }
        } else {
            unsafe {
                std::env::remove_var(DATA_DIR_ENV);
            }
        }
    }
}

/// A 1x1 transparent PNG, handy for photo upload tests.
pub fn tiny_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

