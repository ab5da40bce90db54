//! Where the theme comes from at startup: the persisted preference first,
//! then the OS color scheme, then light.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::ThemeError;
use crate::theme::Theme;

/// Durable key-value storage for the preference.
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>, ThemeError>;
    fn save(&self, key: &str, value: &str) -> Result<(), ThemeError>;
}

/// OS-level color-scheme preference. `None` when the host cannot tell.
pub trait ColorSchemeProbe {
    fn prefers_dark(&self) -> Option<bool>;
}

/// Resolve the theme to apply on load. Never fails: an unreadable store or a
/// missing probe degrade to the next source.
pub fn resolve(store: &impl PreferenceStore, probe: &impl ColorSchemeProbe, key: &str) -> Theme {
    match store.load(key) {
        Ok(Some(value)) => match value.parse::<Theme>() {
            Ok(theme) => return theme,
            Err(e) => log::warn!("Ignoring stored theme preference: {}", e),
        },
        Ok(None) => {}
        Err(e) => log::debug!("Theme preference unreadable, using OS preference: {}", e),
    }

    match probe.prefers_dark() {
        Some(true) => Theme::Dark,
        _ => Theme::Light,
    }
}

/// In-memory store. Nothing survives a reload; used to drive the controller
/// off the browser, as the tests do.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.entries.borrow_mut().insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, ThemeError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), ThemeError> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for &S {
    fn load(&self, key: &str) -> Result<Option<String>, ThemeError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), ThemeError> {
        (**self).save(key, value)
    }
}

/// Probe with a fixed answer, for callers that already know the scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedScheme(pub Option<bool>);

impl ColorSchemeProbe for FixedScheme {
    fn prefers_dark(&self) -> Option<bool> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn load(&self, _key: &str) -> Result<Option<String>, ThemeError> {
            Err(ThemeError::StorageUnavailable)
        }

        fn save(&self, _key: &str, _value: &str) -> Result<(), ThemeError> {
            Err(ThemeError::StorageUnavailable)
        }
    }

    #[test]
    fn test_stored_value_wins() {
        let store = MemoryStore::with_entry("theme", "light");
        assert_eq!(resolve(&store, &FixedScheme(Some(true)), "theme"), Theme::Light);
    }

    #[test]
    fn test_os_preference_when_nothing_stored() {
        let store = MemoryStore::new();
        assert_eq!(resolve(&store, &FixedScheme(Some(true)), "theme"), Theme::Dark);
        assert_eq!(resolve(&store, &FixedScheme(Some(false)), "theme"), Theme::Light);
    }

    #[test]
    fn test_defaults_to_light_without_probe() {
        assert_eq!(resolve(&MemoryStore::new(), &FixedScheme(None), "theme"), Theme::Light);
    }

    #[test]
    fn test_broken_storage_falls_back_to_os() {
        assert_eq!(resolve(&BrokenStore, &FixedScheme(Some(true)), "theme"), Theme::Dark);
    }

    #[test]
    fn test_unknown_stored_value_falls_back_to_os() {
        let store = MemoryStore::with_entry("theme", "sepia");
        assert_eq!(resolve(&store, &FixedScheme(Some(true)), "theme"), Theme::Dark);
    }

    #[test]
    fn test_key_is_respected() {
        let store = MemoryStore::with_entry("other", "dark");
        assert_eq!(resolve(&store, &FixedScheme(None), "theme"), Theme::Light);
        assert_eq!(resolve(&store, &FixedScheme(None), "other"), Theme::Dark);
    }
}
