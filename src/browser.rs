//! web-sys implementations of the storage, probe and surface seams.

use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, Storage};

use crate::config::ThemeConfig;
use crate::controller::ThemeSurface;
use crate::error::ThemeError;
use crate::preference::{ColorSchemeProbe, PreferenceStore};
use crate::theme::Theme;

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

/// `window.localStorage`, scoped to the page's origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<Storage, ThemeError> {
        web_sys::window()
            .ok_or(ThemeError::StorageUnavailable)?
            .local_storage()
            .map_err(|e| ThemeError::from_js(ThemeError::Storage, e))?
            .ok_or(ThemeError::StorageUnavailable)
    }
}

impl PreferenceStore for LocalStorage {
    fn load(&self, key: &str) -> Result<Option<String>, ThemeError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| ThemeError::from_js(ThemeError::Storage, e))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), ThemeError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| ThemeError::from_js(ThemeError::Storage, e))
    }
}

/// Asks `matchMedia` whether the OS prefers a dark color scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaQueryProbe;

impl ColorSchemeProbe for MediaQueryProbe {
    fn prefers_dark(&self) -> Option<bool> {
        web_sys::window()?
            .match_media(DARK_QUERY)
            .ok()
            .flatten()
            .map(|mq| mq.matches())
    }
}

/// Applies the theme to the live document.
#[derive(Debug, Clone)]
pub struct DocumentSurface {
    config: ThemeConfig,
}

impl DocumentSurface {
    pub fn new(config: ThemeConfig) -> Self {
        Self { config }
    }

    fn document() -> Option<web_sys::Document> {
        web_sys::window().and_then(|w| w.document())
    }

    fn toggle(&self) -> Option<Element> {
        Self::document()?.get_element_by_id(&self.config.toggle_id)
    }

    /// The icon by its own id, else the first `<i>` inside the toggle.
    fn icon(&self) -> Option<Element> {
        let doc = Self::document()?;
        doc.get_element_by_id(&self.config.icon_id)
            .or_else(|| self.toggle()?.query_selector("i").ok().flatten())
    }
}

impl ThemeSurface for DocumentSurface {
    fn set_marker(&self, theme: Theme) {
        let Some(root) = Self::document().and_then(|d| d.document_element()) else {
            log::warn!("No document element to mark with the theme");
            return;
        };
        let result = match theme {
            Theme::Dark => root.set_attribute(&self.config.attribute, theme.as_str()),
            Theme::Light => root.remove_attribute(&self.config.attribute),
        };
        warn_on_err(result);
    }

    fn refresh_control(&self, theme: Theme) {
        match self.icon() {
            Some(icon) => {
                icon.set_class_name(theme.icon_class());
                warn_on_err(icon.set_attribute("title", theme.toggle_title()));
            }
            None => log::warn!("Theme icon not found"),
        }

        if let Some(toggle) = self.toggle() {
            warn_on_err(toggle.set_attribute("title", theme.toggle_title()));
        }
    }

    fn animate_toggle(&self) {
        let Some(button) = self.toggle().and_then(|el| el.dyn_into::<HtmlElement>().ok()) else {
            return;
        };
        warn_on_err(button.style().set_property("transform", "rotate(360deg)"));
        Timeout::new(self.config.spin_ms, move || {
            warn_on_err(button.style().remove_property("transform"));
        })
        .forget();
    }
}

fn warn_on_err<T>(result: Result<T, JsValue>) {
    if let Err(e) = result {
        log::warn!("{}", ThemeError::from_js(ThemeError::Dom, e));
    }
}
