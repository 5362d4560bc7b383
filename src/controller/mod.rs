//! Page state controller module
//!
//! This module owns every piece of page state and applies changes to it one
//! at a time.
//!
//! # Architecture
//!
//! - `PageController`: single owner of theme, tracker, forms, comments,
//!   gallery tab, menu and notification state
//! - `PageEvent`: input from observers and background workers
//! - `PageSnapshot`: state sent to the view after each change
//!
//! # Event Flow
//!
//! ```text
//! view action ──► PageController method ──► worker thread (submit, decode, timer)
//!                        ▲                           │
//!                        └────── PageEvent ◄─────────┘
//!                        │
//!                        └──► PageSnapshot ──► view
//! ```
//!
//! Background work never touches state directly; it reports back through
//! the event channel and the controller applies the result on its own thread.

pub mod page_controller;

pub use page_controller::{Notification, PageController, PageEvent, PageSnapshot, ScrollRequest};
