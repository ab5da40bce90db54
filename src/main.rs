mod app;

use app::App;
use theme_toggle::components::navbar::insert_into_navbar;
use theme_toggle::config::ThemeConfig;
use theme_toggle::Theme;

fn main() {
    theme_toggle::logging::init();
    leptos::mount::mount_to_body(App);

    let config = ThemeConfig::from_document();
    if let Err(e) = insert_into_navbar(&config, Theme::default()) {
        log::error!("Failed to insert theme toggle: {}", e);
    }
    theme_toggle::install();
}
