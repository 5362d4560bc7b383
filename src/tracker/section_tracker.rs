//! Active-section and scroll tracking

use crate::config::TrackerSettings;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// Page regions in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Hero section
    #[default]
    Home,
    /// About section
    About,
    /// Portfolio gallery
    Portfolio,
    /// Contact form and comments
    Contact,
}

impl Section {
    /// All regions in document order
    pub const ALL: [Section; 4] = [
        Section::Home,
        Section::About,
        Section::Portfolio,
        Section::Contact,
    ];

    /// Position in document order
    fn index(self) -> usize {
        self as usize
    }

    /// Element id of the region
    pub fn id(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Portfolio => "portfolio",
            Self::Contact => "contact",
        }
    }

    /// Navigation label
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::About => "About",
            Self::Portfolio => "Portfolio",
            Self::Contact => "Contact",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.id() == s)
            .ok_or_else(|| format!("unknown section: {s}"))
    }
}

/// One visibility observation for a region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityEntry {
    /// Observed region
    pub section: Section,
    /// Visible share of the region's height, 0.0 to 1.0
    pub ratio: f64,
}

/// Vertical extent of a region in document coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Top edge in pixels
    pub top: f64,
    /// Height in pixels
    pub height: f64,
}

/// Visible share of `region` within a viewport starting at `scroll_y` with
/// height `viewport_height`, minus `header_offset` pixels at the top.
pub fn intersection_ratio(
    region: Extent,
    scroll_y: f64,
    viewport_height: f64,
    header_offset: f64,
) -> f64 {
    if region.height <= 0.0 {
        return 0.0;
    }
    let view_top = scroll_y + header_offset;
    let view_bottom = scroll_y + viewport_height;
    let visible = (region.top + region.height).min(view_bottom) - region.top.max(view_top);
    (visible.max(0.0) / region.height).min(1.0)
}

/// Navigation entry with its highlight state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    /// In-page anchor (`#home`, ...)
    pub href: String,
    /// Visible label
    pub label: &'static str,
    /// Whether this link's section is the active one
    pub is_active: bool,
}

/// Tracks which region is in view and whether the scroll-to-top button shows
#[derive(Debug, Clone)]
pub struct SectionTracker {
    settings: TrackerSettings,
    active: Section,
    scroll_y: f64,
    show_scroll_top: bool,
    /// Per region, whether the last layout pass saw it at or above the threshold
    above: [bool; 4],
}

impl SectionTracker {
    /// Create a tracker starting at `home`
    pub fn new(settings: TrackerSettings) -> Self {
        Self {
            settings,
            active: Section::Home,
            scroll_y: 0.0,
            show_scroll_top: false,
            above: [false; 4],
        }
    }

    /// Currently active region
    pub fn active_section(&self) -> Section {
        self.active
    }

    /// Whether the scroll-to-top affordance is visible
    pub fn show_scroll_top(&self) -> bool {
        self.show_scroll_top
    }

    /// Last reported vertical scroll offset
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Apply a batch of visibility observations in reported order
    ///
    /// Every entry at or above the threshold becomes active in turn, so the
    /// last qualifying entry wins. Returns `true` if the active region changed.
    pub fn observe(&mut self, entries: &[VisibilityEntry]) -> bool {
        let before = self.active;
        for entry in entries {
            if entry.ratio >= self.settings.visibility_threshold {
                trace!("{} crossed threshold at {:.2}", entry.section, entry.ratio);
                self.active = entry.section;
            }
        }
        if before != self.active {
            debug!("Active section: {} -> {}", before, self.active);
        }
        before != self.active
    }

    /// Observe regions from document geometry at the current scroll offset
    ///
    /// Only regions that went from below the threshold to at or above it since
    /// the previous pass are reported, so a region that stayed visible never
    /// takes over from one that just crossed.
    pub fn observe_layout(&mut self, regions: &[(Section, Extent)], viewport_height: f64) -> bool {
        let threshold = self.settings.visibility_threshold;
        let mut crossed = Vec::new();

        for &(section, extent) in regions {
            let ratio = intersection_ratio(
                extent,
                self.scroll_y,
                viewport_height,
                self.settings.header_offset_px,
            );
            let slot = &mut self.above[section.index()];
            let is_above = ratio >= threshold;
            if is_above && !*slot {
                crossed.push(VisibilityEntry { section, ratio });
            }
            *slot = is_above;
        }

        self.observe(&crossed)
    }

    /// Record a scroll position. Returns `true` if button visibility changed.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        self.scroll_y = scroll_y;
        let show = scroll_y > self.settings.scroll_top_threshold_px;
        let changed = show != self.show_scroll_top;
        self.show_scroll_top = show;
        changed
    }

    /// Navigation links with the active one flagged
    pub fn nav_links(&self) -> Vec<NavLink> {
        Section::ALL
            .into_iter()
            .map(|section| NavLink {
                href: format!("#{}", section.id()),
                label: section.label(),
                is_active: section == self.active,
            })
            .collect()
    }
}
