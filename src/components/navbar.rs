use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::components::theme_toggle::ThemeToggle;
use crate::config::ThemeConfig;
use crate::error::ThemeError;
use crate::theme::Theme;

/// Selector for the navigation list the toggle is inserted into.
pub const NAVBAR_SELECTOR: &str = ".navbar-nav";

/// Mount a [`ThemeToggle`] into the page's `.navbar-nav`, ahead of the first
/// `.dropdown` (usually the language menu) or at the end.
///
/// Returns `Ok(false)` when the page has no navbar.
pub fn insert_into_navbar(config: &ThemeConfig, theme: Theme) -> Result<bool, ThemeError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ThemeError::Dom("no document".to_string()))?;

    let Some(navbar) = document
        .query_selector(NAVBAR_SELECTOR)
        .map_err(|e| ThemeError::from_js(ThemeError::Dom, e))?
    else {
        log::debug!("No {} on this page, skipping toggle insertion", NAVBAR_SELECTOR);
        return Ok(false);
    };

    let item = document
        .create_element("li")
        .map_err(|e| ThemeError::from_js(ThemeError::Dom, e))?;
    item.set_class_name("nav-item d-flex align-items-center");

    let dropdown = navbar
        .query_selector(".dropdown")
        .map_err(|e| ThemeError::from_js(ThemeError::Dom, e))?;
    let inserted = match &dropdown {
        Some(dropdown) => {
            let before: &web_sys::Node = dropdown.as_ref();
            navbar.insert_before(&item, Some(before))
        }
        None => navbar.append_child(&item),
    };
    inserted.map_err(|e| ThemeError::from_js(ThemeError::Dom, e))?;

    let toggle_id = config.toggle_id.clone();
    let parent: web_sys::HtmlElement = item.unchecked_into();
    leptos::mount::mount_to(parent, move || {
        view! { <ThemeToggle theme=theme toggle_id=toggle_id /> }
    })
    .forget();

    log::debug!("Inserted theme toggle into {}", NAVBAR_SELECTOR);
    Ok(true)
}
