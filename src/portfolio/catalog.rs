//! Portfolio catalog: projects, certificates, tech stack, stats and socials

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Gallery tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tab {
    /// Certificates earned
    Certificates,
    /// Projects built
    #[default]
    Projects,
    /// Technologies used
    #[serde(rename = "Tech Stack")]
    TechStack,
}

impl Tab {
    /// Tabs in display (alphabetical) order
    pub const ALL: [Tab; 3] = [Tab::Certificates, Tab::Projects, Tab::TechStack];

    /// Tab label
    pub fn label(self) -> &'static str {
        match self {
            Self::Certificates => "Certificates",
            Self::Projects => "Projects",
            Self::TechStack => "Tech Stack",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim();
        Tab::ALL
            .into_iter()
            .find(|tab| {
                tab.label().eq_ignore_ascii_case(wanted)
                    || tab.label().replace(' ', "").eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("unknown tab: {s}"))
    }
}

/// A project card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Title
    pub title: String,
    /// Short description
    pub description: String,
    /// Preview image URL
    pub image: String,
    /// Live demo link
    pub demo_link: String,
    /// Technologies used
    pub tech: Vec<String>,
}

/// A certificate card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    /// Title
    pub title: String,
    /// Issuing organisation
    pub issuer: String,
    /// Issue date label
    pub date: String,
    /// Short description
    pub description: String,
    /// Preview image URL
    pub image: String,
    /// Verification link
    pub link: String,
}

/// A tech stack entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechEntry {
    /// Technology name
    pub name: String,
    /// Proficiency blurb
    pub description: String,
}

/// A headline number in the about section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    /// Label
    pub label: String,
    /// Count
    pub value: u32,
    /// Caption
    pub desc: String,
}

/// An outbound profile link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    /// Network name
    pub label: String,
    /// Profile URL
    pub href: String,
}

/// One card in the active tab's grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryItem<'a> {
    /// Project card
    Project(&'a Project),
    /// Certificate card
    Certificate(&'a Certificate),
    /// Tech stack card
    Tech(&'a TechEntry),
}

impl GalleryItem<'_> {
    /// Card heading
    pub fn title(&self) -> &str {
        match self {
            Self::Project(p) => &p.title,
            Self::Certificate(c) => &c.title,
            Self::Tech(t) => &t.name,
        }
    }

    /// Card call-to-action label and link, if the card has one
    pub fn action(&self) -> Option<(&'static str, &str)> {
        match self {
            Self::Project(p) => Some(("Live Demo", &p.demo_link)),
            Self::Certificate(c) => Some(("View Certificate", &c.link)),
            Self::Tech(_) => None,
        }
    }
}

/// All static page content shown by the gallery and about section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Projects
    pub projects: Vec<Project>,
    /// Certificates
    pub certificates: Vec<Certificate>,
    /// Tech stack
    pub tech_stack: Vec<TechEntry>,
    /// About-section stats
    pub stats: Vec<Stat>,
    /// Social links
    pub socials: Vec<SocialLink>,
    /// Downloadable resume path
    pub resume: String,
}

impl Catalog {
    /// Load a catalog from a JSON file and sort it
    pub fn load_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let mut catalog: Catalog = serde_json::from_str(&json)?;
        catalog.sort();
        info!(
            "Loaded catalog from {} ({} projects, {} certificates)",
            path.display(),
            catalog.projects.len(),
            catalog.certificates.len()
        );
        Ok(catalog)
    }

    /// Sort every list case-insensitively by its title, name or label
    pub fn sort(&mut self) {
        self.projects.sort_by_key(|p| p.title.to_lowercase());
        self.certificates.sort_by_key(|c| c.title.to_lowercase());
        self.tech_stack.sort_by_key(|t| t.name.to_lowercase());
        self.stats.sort_by_key(|s| s.label.to_lowercase());
        self.socials.sort_by_key(|s| s.label.to_lowercase());
    }

    /// Cards for `tab`
    pub fn items(&self, tab: Tab) -> Vec<GalleryItem<'_>> {
        match tab {
            Tab::Projects => self.projects.iter().map(GalleryItem::Project).collect(),
            Tab::Certificates => self
                .certificates
                .iter()
                .map(GalleryItem::Certificate)
                .collect(),
            Tab::TechStack => self.tech_stack.iter().map(GalleryItem::Tech).collect(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let project = |title: &str, description: &str, slug: &str, tech: &[&str]| Project {
            title: title.to_string(),
            description: description.to_string(),
            image: format!("https://via.placeholder.com/400x300?text={slug}"),
            demo_link: "#".to_string(),
            tech: tech.iter().map(ToString::to_string).collect(),
        };
        let tech = |name: &str, description: &str| TechEntry {
            name: name.to_string(),
            description: description.to_string(),
        };
        let stat = |label: &str, value: u32, desc: &str| Stat {
            label: label.to_string(),
            value,
            desc: desc.to_string(),
        };
        let social = |label: &str, href: &str| SocialLink {
            label: label.to_string(),
            href: href.to_string(),
        };

        let mut catalog = Self {
            projects: vec![
                project(
                    "Aritmatika Solver",
                    "Program ini dirancang untuk mempermudah pengguna dalam menyelesaikan soal-soal Aritmatika secara otomatis.",
                    "Aritmatika+Solver",
                    &["JavaScript", "React"],
                ),
                project(
                    "AutoChat-Discord",
                    "AutoChat adalah solusi otomatisasi untuk mengirim pesan ke saluran Discord secara terjadwal.",
                    "AutoChat",
                    &["Node.js", "JavaScript"],
                ),
                project(
                    "Buku Catatan",
                    "Website untuk membuat, menyimpan, dan mengelola catatan secara efisien dan fleksibel.",
                    "Buku+Catatan",
                    &["Laravel", "MySQL"],
                ),
            ],
            certificates: vec![Certificate {
                title: "React Professional Certification".to_string(),
                issuer: "Coursera".to_string(),
                date: "Jan 2024".to_string(),
                description: "Advanced React and Redux for building scalable web applications."
                    .to_string(),
                image: "https://via.placeholder.com/400x300?text=React+Certification".to_string(),
                link: "#".to_string(),
            }],
            tech_stack: vec![
                tech(
                    "JavaScript",
                    "Proficient in ES6+ for dynamic and interactive web applications.",
                ),
                tech(
                    "React",
                    "Expert in building reusable UI components and SPAs with React.",
                ),
                tech(
                    "Node.js",
                    "Skilled in server-side development with Express and Node.js.",
                ),
                tech(
                    "Laravel",
                    "Experienced in building robust backend systems with Laravel.",
                ),
                tech(
                    "MySQL",
                    "Proficient in designing and optimizing relational databases.",
                ),
                tech(
                    "Tailwind CSS",
                    "Expert in rapid UI development with utility-first CSS.",
                ),
            ],
            stats: vec![
                stat("Certificates", 7, "Skills validated"),
                stat("Total Projects", 13, "Innovative web solutions"),
                stat("Years Experience", 3, "Continuous journey"),
            ],
            socials: vec![
                social("GitHub", "https://github.com/Naitik-Dholakiya"),
                social("Instagram", "https://instagram.com/your-profile"),
                social("LinkedIn", "https://www.linkedin.com/in/naitik-dholakiya/"),
            ],
            resume: "/my-portfolio/assets/Naitik-Resume.pdf".to_string(),
        };
        catalog.sort();
        catalog
    }
}
