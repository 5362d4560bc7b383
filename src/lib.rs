//! `Folio` - state core for a single-page personal portfolio
//!
//! Everything a portfolio page does besides drawing pixels: a persisted
//! dark/light theme, the active-section tracker behind the navigation bar,
//! the contact and comment forms with validation, simulated or HTTP
//! submission and transient notifications, the comment list, and the
//! tabbed project gallery.
//!
//! `PageController` owns all of it. Observers and background workers talk to
//! it through `PageEvent`s and the view receives a `PageSnapshot` after each
//! change.

// Module declarations
pub mod config;
pub mod controller;
pub mod error;
pub mod forms;
pub mod portfolio;
pub mod submission;
pub mod theme;
pub mod tracker;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types
pub use controller::{PageController, PageEvent, PageSnapshot};
pub use error::{FolioError, Result};
