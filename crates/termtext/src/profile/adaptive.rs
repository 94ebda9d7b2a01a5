//! Light/dark detection for the `termtextAuto` profile key.
//!
//! Detection asks the OS through `dark-light`. Override it for testing with
//! [`set_theme_detector`]:
//!
//! ```rust
//! use termtext::{detect_color_mode, set_theme_detector, ColorMode};
//!
//! set_theme_detector(|| ColorMode::Dark);
//! assert_eq!(detect_color_mode(), ColorMode::Dark);
//! ```

use once_cell::sync::Lazy;
use std::sync::Mutex;

/// The user's preferred color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Light mode (light background, dark text).
    Light,
    /// Dark mode (dark background, light text).
    Dark,
}

type ThemeDetector = fn() -> ColorMode;

static THEME_DETECTOR: Lazy<Mutex<ThemeDetector>> = Lazy::new(|| Mutex::new(os_theme_detector));

/// Overrides the detector used to decide between the light and dark profiles.
pub fn set_theme_detector(detector: ThemeDetector) {
    let mut guard = THEME_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = detector;
}

/// Restores OS-based detection.
pub fn reset_theme_detector() {
    set_theme_detector(os_theme_detector);
}

/// Detects the user's preferred color mode.
///
/// Falls back to [`ColorMode::Light`] when the OS gives no answer.
pub fn detect_color_mode() -> ColorMode {
    let detector = THEME_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    (*detector)()
}

fn os_theme_detector() -> ColorMode {
    match dark_light::detect() {
        Ok(dark_light::Mode::Dark) => ColorMode::Dark,
        _ => ColorMode::Light,
    }
}
