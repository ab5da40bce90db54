/// Route `log` records to the browser console and panics to `console.error`.
/// Safe to call more than once.
pub fn init() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    // A logger installed by the host page takes precedence.
    let _ = console_log::init_with_level(level);
}
