use leptos::prelude::*;

use crate::theme::Theme;

/// The toggle button with its nested icon. Click handling is attached by the
/// binder, which finds the button by id.
#[component]
pub fn ThemeToggle(
    /// Theme the icon reflects when first rendered
    #[prop(optional)]
    theme: Theme,
    /// Element id the binder looks the button up by
    #[prop(into, default = "theme-toggle".to_string())]
    toggle_id: String,
) -> impl IntoView {
    let title = theme.toggle_title();

    view! {
        <button id=toggle_id class="theme-toggle btn" type="button" title=title>
            <i class={theme.icon_class()} title=title></i>
        </button>
    }
}
