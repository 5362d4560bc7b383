//! Theme values and their style-variable palettes

use crate::error::FolioError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Binary display theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark background, light text
    #[default]
    Dark,
    /// Light background, dark text
    Light,
}

impl Theme {
    /// Return the opposite theme
    pub fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Stored and class-name form (`"dark"` or `"light"`)
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Style variables for this theme
    pub fn palette(self) -> &'static Palette {
        match self {
            Self::Dark => &DARK,
            Self::Light => &LIGHT,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(FolioError::InvalidTheme(other.to_string())),
        }
    }
}

/// Operating environment colour-scheme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    /// `prefers-color-scheme: dark`
    Dark,
    /// `prefers-color-scheme: light`
    Light,
}

impl From<ColorScheme> for Theme {
    fn from(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Dark => Theme::Dark,
            ColorScheme::Light => Theme::Light,
        }
    }
}

/// Named style variables consumed by the view layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Page background
    pub bg: &'static str,
    /// Foreground text
    pub text: &'static str,
    /// Accent colour for highlights and gradients
    pub accent: &'static str,
    /// Translucent overlay for glass panels
    pub glass: &'static str,
    /// Card shadow
    pub shadow: &'static str,
    /// Muted secondary text
    pub secondary: &'static str,
    /// Particle background colour
    pub particle_color: &'static str,
}

impl Palette {
    /// Variable name/value pairs in application order
    pub fn variables(&self) -> [(&'static str, &'static str); 7] {
        [
            ("bg", self.bg),
            ("text", self.text),
            ("accent", self.accent),
            ("glass", self.glass),
            ("shadow", self.shadow),
            ("secondary", self.secondary),
            ("particle-color", self.particle_color),
        ]
    }
}

const DARK: Palette = Palette {
    bg: "#0f172a",
    text: "#e2e8f0",
    accent: "#8b5cf6",
    glass: "rgba(255, 255, 255, 0.1)",
    shadow: "0 6px 24px rgba(0, 0, 0, 0.6)",
    secondary: "#94a3b8",
    particle_color: "#8b5cf6",
};

const LIGHT: Palette = Palette {
    bg: "#f8fafc",
    text: "#1f2937",
    accent: "#6d28d9",
    glass: "rgba(0, 0, 0, 0.05)",
    shadow: "0 6px 24px rgba(0, 0, 0, 0.15)",
    secondary: "#6b7280",
    particle_color: "#6d28d9",
};
