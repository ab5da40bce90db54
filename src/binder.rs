//! Click wiring for the toggle control.
//!
//! The control may not exist yet when binding starts (server templates and
//! client-side mounts race with the wasm bundle), so binding is tried once
//! immediately and once more after a short delay. A delegated listener on the
//! document stays installed either way, so a control that shows up later is
//! still clickable. Each click toggles exactly once: bound elements are tagged
//! so they are never bound twice, and the direct handler stops propagation so
//! the delegated listener does not see the same click.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent};

use crate::config::ThemeConfig;
use crate::controller::{ThemeController, ThemeSurface};
use crate::error::ThemeError;
use crate::preference::PreferenceStore;

/// Marker attribute set on a control once its click handler is attached.
pub const BOUND_ATTR: &str = "data-theme-toggle-bound";

/// How many times binding is attempted before giving up.
const MAX_ATTEMPTS: u32 = 2;

/// What binding found when it looked for the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    Missing,
    Unbound,
    Bound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindStep {
    /// Attach the handler now.
    Bind,
    /// Someone already attached it; nothing to do.
    AlreadyBound,
    /// Look again after this many milliseconds.
    RetryAfter(u32),
    /// Out of attempts; the delegated listener is all that is left.
    GiveUp,
}

/// Retry policy for binding: one immediate attempt plus one delayed retry.
#[derive(Debug, Clone)]
pub struct BindPlan {
    retry_delay_ms: u32,
    attempts: u32,
}

impl BindPlan {
    pub fn new(retry_delay_ms: u32) -> Self {
        Self {
            retry_delay_ms,
            attempts: 0,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn next(&mut self, state: ControlState) -> BindStep {
        self.attempts += 1;
        match state {
            ControlState::Unbound => BindStep::Bind,
            ControlState::Bound => BindStep::AlreadyBound,
            ControlState::Missing if self.attempts < MAX_ATTEMPTS => {
                BindStep::RetryAfter(self.retry_delay_ms)
            }
            ControlState::Missing => BindStep::GiveUp,
        }
    }
}

thread_local! {
    /// Toggle ids that already have a delegated listener on the document.
    static DELEGATES: RefCell<HashSet<String>> = RefCell::new(HashSet::new());
}

/// Bind once the DOM has been parsed, deferring to `DOMContentLoaded` if the
/// document is still loading.
pub fn bind_when_ready<S, D>(controller: Rc<ThemeController<S, D>>, config: ThemeConfig)
where
    S: PreferenceStore + 'static,
    D: ThemeSurface + 'static,
{
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("No document available, theme toggle not bound");
        return;
    };

    if document.ready_state() == "loading" {
        log::debug!("Document still loading, binding theme toggle on DOMContentLoaded");
        let on_ready = Closure::once_into_js(move || bind(controller, config));
        let listening = document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref());
        if let Err(e) = listening {
            log::error!("{}", ThemeError::from_js(ThemeError::Dom, e));
        }
    } else {
        bind(controller, config);
    }
}

/// Install the delegated listener and start binding the control directly.
pub fn bind<S, D>(controller: Rc<ThemeController<S, D>>, config: ThemeConfig)
where
    S: PreferenceStore + 'static,
    D: ThemeSurface + 'static,
{
    if let Err(e) = install_delegate(controller.clone(), &config) {
        log::error!("Failed to install delegated theme toggle listener: {}", e);
    }
    let plan = BindPlan::new(config.retry_delay_ms);
    attempt(controller, Rc::new(config), plan);
}

fn attempt<S, D>(
    controller: Rc<ThemeController<S, D>>,
    config: Rc<ThemeConfig>,
    mut plan: BindPlan,
)
where
    S: PreferenceStore + 'static,
    D: ThemeSurface + 'static,
{
    let control = find_control(&config);
    let state = match &control {
        None => ControlState::Missing,
        Some(el) if el.has_attribute(BOUND_ATTR) => ControlState::Bound,
        Some(_) => ControlState::Unbound,
    };

    match (plan.next(state), control) {
        (BindStep::Bind, Some(el)) => match bind_direct(&el, controller.clone()) {
            Ok(()) => {
                log::debug!("Theme toggle bound to #{}", config.toggle_id);
                controller.refresh();
            }
            Err(e) => log::error!("Failed to bind theme toggle: {}", e),
        },
        (BindStep::AlreadyBound, _) => {
            log::debug!("Theme toggle #{} already bound", config.toggle_id);
        }
        (BindStep::RetryAfter(delay), _) => {
            log::debug!(
                "Theme toggle #{} not found, retrying in {}ms",
                config.toggle_id,
                delay
            );
            Timeout::new(delay, move || attempt(controller, config, plan)).forget();
        }
        (BindStep::GiveUp, _) => {
            log::error!(
                "{} after {} attempts",
                ThemeError::ControlMissing(config.toggle_id.clone()),
                plan.attempts()
            );
        }
        (BindStep::Bind, None) => {}
    }
}

fn find_control(config: &ThemeConfig) -> Option<Element> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|doc| doc.get_element_by_id(&config.toggle_id))
}

fn bind_direct<S, D>(
    element: &Element,
    controller: Rc<ThemeController<S, D>>,
) -> Result<(), ThemeError>
where
    S: PreferenceStore + 'static,
    D: ThemeSurface + 'static,
{
    let handler = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        log::debug!("Theme toggle clicked");
        event.prevent_default();
        event.stop_propagation();
        controller.toggle();
    });
    element
        .add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())
        .map_err(|e| ThemeError::from_js(ThemeError::Dom, e))?;
    // The listener is live from here on, so the closure must outlive this call.
    handler.forget();

    if let Err(e) = element.set_attribute(BOUND_ATTR, "true") {
        log::warn!(
            "Theme toggle bound but not tagged: {}",
            ThemeError::from_js(ThemeError::Dom, e)
        );
    }
    Ok(())
}

/// Walk up from `target` to the element carrying `id`, if any.
fn toggle_ancestor(target: Element, id: &str) -> Option<Element> {
    let mut current = Some(target);
    while let Some(el) = current {
        if el.id() == id {
            return Some(el);
        }
        current = el.parent_element();
    }
    None
}

fn install_delegate<S, D>(
    controller: Rc<ThemeController<S, D>>,
    config: &ThemeConfig,
) -> Result<(), ThemeError>
where
    S: PreferenceStore + 'static,
    D: ThemeSurface + 'static,
{
    let toggle_id = config.toggle_id.clone();
    if DELEGATES.with(|ids| ids.borrow().contains(&toggle_id)) {
        return Ok(());
    }
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ThemeError::Dom("no document".to_string()))?;

    let id = toggle_id.clone();
    let handler = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        if toggle_ancestor(target, &id).is_some() {
            log::debug!("Theme toggle clicked via delegation");
            event.prevent_default();
            event.stop_propagation();
            controller.toggle();
        }
    });
    document
        .add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())
        .map_err(|e| ThemeError::from_js(ThemeError::Dom, e))?;
    handler.forget();
    DELEGATES.with(|ids| ids.borrow_mut().insert(toggle_id));
    Ok(())
}
