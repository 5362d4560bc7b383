//! Theme management module
//!
//! Resolves the initial dark/light theme (stored preference, then system
//! colour scheme, then dark), toggles it, persists every change through a
//! [`PreferenceStore`](crate::config::PreferenceStore) and maintains the
//! style variables the view layer reads.
//!
//! # Style variables
//!
//! Each theme maps to a fixed [`Palette`] of seven variables: `bg`, `text`,
//! `accent`, `glass`, `shadow`, `secondary` and `particle-color`. Applying a
//! theme overwrites all seven, so applying the same theme twice is a no-op
//! on the resulting [`StyleSheet`].

pub mod manager;
pub mod palette;

pub use manager::{StyleSheet, THEME_KEY, ThemeManager, initial_theme};
pub use palette::{ColorScheme, Palette, Theme};
