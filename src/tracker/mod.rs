//! Section tracking module
//!
//! Decides which page region is "currently viewed" from visibility
//! observations and derives the scroll-to-top flag from the scroll offset.
//!
//! # Semantics
//!
//! - A region qualifies when at least 30% of its height is visible inside the
//!   viewport minus the 80 px fixed header.
//! - Observations are applied in the order they are reported; the last
//!   qualifying region wins. There is no tie-break by document position.
//! - The scroll-to-top button shows once the offset exceeds 300 px. This flag
//!   is independent of section identity.

pub mod section_tracker;

pub use section_tracker::{
    Extent, NavLink, Section, SectionTracker, VisibilityEntry, intersection_ratio,
};
