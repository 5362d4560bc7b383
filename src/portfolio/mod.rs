//! Portfolio gallery content
//!
//! Static page content: the tabbed gallery (certificates, projects, tech
//! stack), the about-section stats and the social links. Every list is kept
//! sorted by its title, name or label.

pub mod catalog;

pub use catalog::{
    Catalog, Certificate, GalleryItem, Project, SocialLink, Stat, Tab, TechEntry,
};
