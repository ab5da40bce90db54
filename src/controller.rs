use std::cell::Cell;

use crate::preference::{resolve, ColorSchemeProbe, PreferenceStore};
use crate::theme::Theme;

/// The document-facing half of applying a theme.
pub trait ThemeSurface {
    /// Set or clear the document-level marker for `theme`.
    fn set_marker(&self, theme: Theme);
    /// Bring the toggle's icon and title in line with `theme`.
    fn refresh_control(&self, theme: Theme);
    /// Visual feedback after a user toggle.
    fn animate_toggle(&self) {}
}

/// Holds the current theme and applies changes to storage and the surface.
pub struct ThemeController<S, D> {
    store: S,
    surface: D,
    key: String,
    current: Cell<Theme>,
}

impl<S: PreferenceStore, D: ThemeSurface> ThemeController<S, D> {
    /// Resolve the starting theme and apply it straight away.
    pub fn start(
        store: S,
        probe: &impl ColorSchemeProbe,
        surface: D,
        key: impl Into<String>,
    ) -> Self {
        let key = key.into();
        let initial = resolve(&store, probe, &key);
        let controller = Self {
            store,
            surface,
            key,
            current: Cell::new(initial),
        };
        controller.apply(initial);
        controller
    }

    pub fn current(&self) -> Theme {
        self.current.get()
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn apply(&self, theme: Theme) {
        self.surface.set_marker(theme);
        if let Err(e) = self.store.save(&self.key, theme.as_str()) {
            log::warn!("Failed to persist theme preference: {}", e);
        }
        self.current.set(theme);
        self.surface.refresh_control(theme);
    }

    /// Flip to the other theme and return it.
    pub fn toggle(&self) -> Theme {
        let next = self.current().toggled();
        log::info!("Switching theme to {}", next);
        self.apply(next);
        self.surface.animate_toggle();
        next
    }

    /// Re-sync the control with the current theme, e.g. after it was mounted.
    pub fn refresh(&self) {
        self.surface.refresh_control(self.current());
    }
}
