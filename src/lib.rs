//! Light/dark theme toggle for web pages.
//!
//! [`install`] resolves the theme (stored preference, OS color scheme, then
//! light), applies it to `<html>`, and wires the `#theme-toggle` control.
//! Pages that only load the wasm bundle call `installThemeToggle()` from JS.

pub mod binder;
pub mod browser;
pub mod components;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod preference;
pub mod theme;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::browser::{DocumentSurface, LocalStorage, MediaQueryProbe};
use crate::config::ThemeConfig;
use crate::controller::ThemeController;

pub use crate::theme::Theme;

/// Controller wired to the live page.
pub type PageController = ThemeController<LocalStorage, DocumentSurface>;

thread_local! {
    static INSTALLED: RefCell<Option<Rc<PageController>>> = const { RefCell::new(None) };
}

/// Apply the resolved theme and bind the toggle. Only the first call does any
/// work; later calls return the same controller.
pub fn install() -> Rc<PageController> {
    if let Some(existing) = installed() {
        return existing;
    }

    logging::init();
    let config = ThemeConfig::from_document();
    let controller = Rc::new(ThemeController::start(
        LocalStorage,
        &MediaQueryProbe,
        DocumentSurface::new(config.clone()),
        config.storage_key.clone(),
    ));
    log::info!("Theme initialized: {}", controller.current());

    INSTALLED.with(|slot| *slot.borrow_mut() = Some(controller.clone()));
    binder::bind_when_ready(controller.clone(), config);
    controller
}

/// The controller set up by [`install`], if any.
pub fn installed() -> Option<Rc<PageController>> {
    INSTALLED.with(|slot| slot.borrow().clone())
}

#[wasm_bindgen(js_name = installThemeToggle)]
pub fn install_theme_toggle() -> String {
    install().current().to_string()
}

/// Toggle from the console or other scripts. Returns the new theme.
#[wasm_bindgen(js_name = toggleTheme)]
pub fn toggle_theme() -> Option<String> {
    match installed() {
        Some(controller) => Some(controller.toggle().to_string()),
        None => {
            log::error!("Theme toggle not installed");
            None
        }
    }
}

#[wasm_bindgen(js_name = currentTheme)]
pub fn current_theme() -> Option<String> {
    installed().map(|c| c.current().to_string())
}
