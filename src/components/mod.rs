pub mod navbar;
pub mod theme_toggle;
