//! Theme resolution, toggling and application

use crate::config::PreferenceStore;
use crate::theme::palette::{ColorScheme, Theme};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Preference key holding the stored theme
pub const THEME_KEY: &str = "theme";

/// Root class and custom properties applied to the document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    /// Class on the root element (`dark` or `light`), replacing the previous one
    pub root_class: Option<&'static str>,
    /// Custom properties keyed by variable name without the `--` prefix
    pub variables: BTreeMap<&'static str, &'static str>,
}

impl StyleSheet {
    /// Render as CSS custom property declarations for `:root`
    pub fn to_css(&self) -> String {
        let body: String = self
            .variables
            .iter()
            .map(|(name, value)| format!("  --{name}: {value};\n"))
            .collect();
        format!(":root {{\n{body}}}\n")
    }
}

/// Resolve the theme to start with
///
/// Stored preference wins, then the environment's colour scheme, then `dark`.
/// A stored value that fails to parse or a store that fails to read is
/// treated as absent.
pub fn initial_theme(store: &dyn PreferenceStore, system: Option<ColorScheme>) -> Theme {
    match store.get(THEME_KEY) {
        Ok(Some(value)) => match value.parse::<Theme>() {
            Ok(theme) => {
                debug!("Using stored theme preference: {}", theme);
                return theme;
            }
            Err(e) => warn!("Ignoring stored theme preference: {}", e),
        },
        Ok(None) => {}
        Err(e) => warn!("Failed to read theme preference: {}", e),
    }

    system.map_or(Theme::Dark, Theme::from)
}

/// Owns the active theme and its applied style sheet
pub struct ThemeManager {
    current: Theme,
    store: Arc<dyn PreferenceStore>,
    sheet: StyleSheet,
}

impl ThemeManager {
    /// Resolve the initial theme and apply it
    pub fn new(store: Arc<dyn PreferenceStore>, system: Option<ColorScheme>) -> Self {
        let current = initial_theme(store.as_ref(), system);
        info!("Initial theme: {}", current);
        let mut manager = Self {
            current,
            store,
            sheet: StyleSheet::default(),
        };
        manager.apply(current);
        manager
    }

    /// Currently active theme
    pub fn current(&self) -> Theme {
        self.current
    }

    /// Style sheet produced by the last `apply`
    pub fn style_sheet(&self) -> &StyleSheet {
        &self.sheet
    }

    /// Switch to the opposite theme, apply and persist it
    pub fn toggle(&mut self) -> Theme {
        let next = self.current.toggle();
        self.apply(next);
        next
    }

    /// Persist `theme` and rewrite the root class and style variables
    ///
    /// A failed write is logged and the theme stays in effect for the session.
    pub fn apply(&mut self, theme: Theme) {
        self.current = theme;

        if let Err(e) = self.store.set(THEME_KEY, theme.as_str()) {
            warn!(
                "Failed to persist theme preference: {}. Keeping it for this session only.",
                e
            );
        }

        self.sheet.root_class = Some(theme.as_str());
        for (name, value) in theme.palette().variables() {
            self.sheet.variables.insert(name, value);
        }
        debug!("Applied {} theme", theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryPreferenceStore;
    use crate::error::{FolioError, Result, StringError};

    struct FailingStore;

    impl PreferenceStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(FolioError::StorageError(StringError::new("unavailable")))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(FolioError::StorageError(StringError::new("read-only")))
        }
    }

    #[test]
    fn test_stored_preference_wins() {
        let store = MemoryPreferenceStore::with_entry(THEME_KEY, "light");
        assert_eq!(initial_theme(&store, Some(ColorScheme::Dark)), Theme::Light);
    }

    #[test]
    fn test_system_preference_used_when_nothing_stored() {
        let store = MemoryPreferenceStore::new();
        assert_eq!(initial_theme(&store, Some(ColorScheme::Light)), Theme::Light);
        assert_eq!(initial_theme(&store, Some(ColorScheme::Dark)), Theme::Dark);
    }

    #[test]
    fn test_defaults_to_dark() {
        let store = MemoryPreferenceStore::new();
        assert_eq!(initial_theme(&store, None), Theme::Dark);
        assert_eq!(initial_theme(&FailingStore, None), Theme::Dark);
    }

    #[test]
    fn test_garbage_stored_value_ignored() {
        let store = MemoryPreferenceStore::with_entry(THEME_KEY, "sepia");
        assert_eq!(initial_theme(&store, Some(ColorScheme::Light)), Theme::Light);
    }

    #[test]
    fn test_toggle_persists() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let mut manager = ThemeManager::new(store.clone(), None);
        assert_eq!(manager.current(), Theme::Dark);
        // Initial application persists too
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

        assert_eq!(manager.toggle(), Theme::Light);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
        assert_eq!(manager.style_sheet().root_class, Some("light"));
        assert_eq!(manager.style_sheet().variables["bg"], "#f8fafc");
    }

    #[test]
    fn test_apply_is_idempotent() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let mut manager = ThemeManager::new(store, None);
        manager.apply(Theme::Light);
        let first = manager.style_sheet().clone();
        manager.apply(Theme::Light);
        assert_eq!(manager.style_sheet(), &first);
        assert_eq!(first.variables.len(), 7);
    }

    #[test]
    fn test_persistence_failure_is_not_fatal() {
        let mut manager = ThemeManager::new(Arc::new(FailingStore), Some(ColorScheme::Light));
        assert_eq!(manager.current(), Theme::Light);
        assert_eq!(manager.toggle(), Theme::Dark);
        assert_eq!(manager.style_sheet().root_class, Some("dark"));
    }

    #[test]
    fn test_css_rendering() {
        let manager = ThemeManager::new(Arc::new(MemoryPreferenceStore::new()), None);
        let css = manager.style_sheet().to_css();
        assert!(css.starts_with(":root {"));
        assert!(css.contains("  --particle-color: #8b5cf6;\n"));
    }
}
