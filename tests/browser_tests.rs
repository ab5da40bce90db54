//! Click wiring against a real DOM. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement, Storage};

use theme_toggle::binder::{self, BOUND_ATTR};
use theme_toggle::browser::{DocumentSurface, LocalStorage};
use theme_toggle::config::ThemeConfig;
use theme_toggle::controller::ThemeController;
use theme_toggle::preference::FixedScheme;
use theme_toggle::Theme;

wasm_bindgen_test_configure!(run_in_browser);

type Controller = ThemeController<LocalStorage, DocumentSurface>;

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn storage() -> Storage {
    web_sys::window().unwrap().local_storage().unwrap().unwrap()
}

/// Config with its own ids, attribute and key so tests sharing the page do
/// not see each other's state.
fn config_for(name: &str, toggle_id: &str) -> ThemeConfig {
    ThemeConfig {
        storage_key: format!("{name}-theme"),
        attribute: format!("data-{name}-theme"),
        toggle_id: toggle_id.to_string(),
        icon_id: format!("{name}-icon"),
        retry_delay_ms: 20,
        spin_ms: 10,
    }
}

/// Start a light controller with nothing stored.
fn start_light(config: &ThemeConfig) -> Rc<Controller> {
    storage().remove_item(&config.storage_key).unwrap();
    Rc::new(ThemeController::start(
        LocalStorage,
        &FixedScheme(Some(false)),
        DocumentSurface::new(config.clone()),
        config.storage_key.clone(),
    ))
}

fn append_toggle(config: &ThemeConfig) -> HtmlElement {
    let doc = document();
    let button = doc.create_element("button").unwrap();
    button.set_id(&config.toggle_id);
    let icon = doc.create_element("i").unwrap();
    button.append_child(&icon).unwrap();
    doc.body().unwrap().append_child(&button).unwrap();
    button.dyn_into::<HtmlElement>().unwrap()
}

fn marker(config: &ThemeConfig) -> Option<String> {
    document().document_element().unwrap().get_attribute(&config.attribute)
}

fn stored(config: &ThemeConfig) -> Option<String> {
    storage().get_item(&config.storage_key).unwrap()
}

#[wasm_bindgen_test]
async fn control_added_after_bind_is_bound_on_retry() {
    let config = config_for("late", "late-toggle");
    let controller = start_light(&config);
    binder::bind(controller.clone(), config.clone());

    let button = append_toggle(&config);
    assert!(!button.has_attribute(BOUND_ATTR));
    TimeoutFuture::new(config.retry_delay_ms * 3).await;
    assert!(button.has_attribute(BOUND_ATTR));

    button.click();
    assert_eq!(controller.current(), Theme::Dark);
    assert_eq!(marker(&config).as_deref(), Some("dark"));
    assert_eq!(stored(&config).as_deref(), Some("dark"));
}

#[wasm_bindgen_test]
fn binding_twice_still_toggles_once_per_click() {
    let config = config_for("twice", "twice-toggle");
    let controller = start_light(&config);
    let button = append_toggle(&config);

    binder::bind(controller.clone(), config.clone());
    binder::bind(controller.clone(), config.clone());

    button.click();
    assert_eq!(controller.current(), Theme::Dark);
    assert_eq!(marker(&config).as_deref(), Some("dark"));
    assert_eq!(stored(&config).as_deref(), Some("dark"));

    button.click();
    assert_eq!(controller.current(), Theme::Light);
    assert_eq!(marker(&config), None);
    assert_eq!(stored(&config).as_deref(), Some("light"));
}

#[wasm_bindgen_test]
fn click_on_icon_reaches_direct_handler_once() {
    let config = config_for("icon", "icon-toggle");
    let controller = start_light(&config);
    let button = append_toggle(&config);
    binder::bind(controller.clone(), config.clone());

    let icon = button
        .query_selector("i")
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    icon.click();
    assert_eq!(controller.current(), Theme::Dark);
    assert_eq!(icon.class_name(), "fas fa-moon");
}

#[wasm_bindgen_test]
async fn delegation_handles_control_after_binding_gave_up() {
    // Not a valid CSS id selector; matched by id, not by selector.
    let config = config_for("delegate", "1toggle:a");
    let controller = start_light(&config);
    binder::bind(controller.clone(), config.clone());

    TimeoutFuture::new(config.retry_delay_ms * 3).await;
    let button = append_toggle(&config);

    button.click();
    assert!(!button.has_attribute(BOUND_ATTR));
    assert_eq!(controller.current(), Theme::Dark);
    assert_eq!(marker(&config).as_deref(), Some("dark"));
    assert_eq!(stored(&config).as_deref(), Some("dark"));
}
