use serde::Deserialize;

use crate::error::ThemeError;

/// Id of the optional inline JSON block that overrides [`ThemeConfig`].
pub const CONFIG_ELEMENT_ID: &str = "theme-toggle-config";

/// Names and timings the toggle relies on. Every field has a default so a
/// page only needs to spell out what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Key the theme is persisted under in `localStorage`.
    pub storage_key: String,
    /// Attribute set on `<html>` while the dark theme is active.
    pub attribute: String,
    pub toggle_id: String,
    pub icon_id: String,
    /// Delay before the single bind retry when the control is missing.
    pub retry_delay_ms: u32,
    /// Duration of the spin animation played on toggle.
    pub spin_ms: u32,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            attribute: "data-theme".to_string(),
            toggle_id: "theme-toggle".to_string(),
            icon_id: "theme-icon".to_string(),
            retry_delay_ms: 500,
            spin_ms: 300,
        }
    }
}

impl ThemeConfig {
    pub fn from_json(json: &str) -> Result<Self, ThemeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read overrides from `<script id="theme-toggle-config">` if the page has
    /// one, falling back to defaults.
    pub fn from_document() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match text {
            Some(json) if !json.trim().is_empty() => match Self::from_json(&json) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Ignoring invalid theme config: {}", e);
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }
}
