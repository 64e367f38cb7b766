use log::Level;

use crate::reveal::RevealMode;
use crate::theme::Theme;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose while running under `trunk serve`
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Selectors and class names the markup is expected to provide.
pub mod selectors {
    pub const NAV_LINK: &str = ".nav-link";
    pub const LOADER: &str = ".loader";
    pub const HEADER: &str = ".header";
    pub const HAMBURGER: &str = ".hamburger";
    pub const NAV_MENU: &str = ".nav-menu";
    pub const THEME_SWITCH_ID: &str = "checkbox";
    pub const REVEAL: &str = ".animate-on-scroll";
    pub const COUNTER: &str = ".counter";
    pub const STATS_SECTION: &str = ".stats-section";
    pub const SLIDE: &str = ".testimonial-slide";
    pub const NEXT_BUTTON: &str = ".next-btn";
    pub const PREV_BUTTON: &str = ".prev-btn";
    pub const CONTACT_FORM_ID: &str = "contact-form";
    pub const FORM_RESULT_ID: &str = "form-result";
    pub const SUBMIT_BUTTON: &str = "button[type=\"submit\"]";

    pub const ACTIVE: &str = "active";
    pub const HIDDEN: &str = "hidden";
    pub const SCROLLED: &str = "scrolled";
    pub const VISIBLE: &str = "is-visible";

    pub const THEME_ATTRIBUTE: &str = "data-theme";
    pub const COUNTER_TARGET: &str = "data-target";
    pub const COUNTER_SUFFIX: &str = "data-suffix";
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    /// Vertical offset past which the header gets its scrolled style.
    pub header_threshold: f64,
    pub reveal_divisor: f64,
    pub reveal_mode: RevealMode,
    pub counter_step_divisor: f64,
    pub counter_step_delay_ms: u32,
    pub carousel_interval_ms: u32,
    pub result_hide_ms: u32,
    pub theme_storage_key: &'static str,
    pub default_theme: Theme,
    pub particles_container_id: &'static str,
    pub sending_label: &'static str,
    pub success_message: &'static str,
    pub rejected_message: &'static str,
    pub transport_message: &'static str,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            header_threshold: 50.0,
            reveal_divisor: 1.25,
            reveal_mode: RevealMode::Toggle,
            counter_step_divisor: 200.0,
            counter_step_delay_ms: 1,
            carousel_interval_ms: 7_000,
            result_hide_ms: 5_000,
            theme_storage_key: "theme",
            default_theme: Theme::Dark,
            particles_container_id: "particles-js",
            sending_label: "Sending...",
            success_message: "Response received! We will get back to you shortly.",
            rejected_message: "An error occurred. Please try again.",
            transport_message: "An error occurred. Please try again later.",
        }
    }
}
