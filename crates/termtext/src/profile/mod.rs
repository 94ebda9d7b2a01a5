//! Color profiles.
//!
//! A [`Profile`] maps each [`Role`] (title, text, fail, ...) to a
//! `console::Style`. Three profiles are built in: no-color, dark and light.
//! [`select_profile`] and [`init_term`] pick one by configuration key, and
//! the `termtextAuto` key picks light or dark by asking the OS.

mod adaptive;
mod color;
#[allow(clippy::module_inception)]
mod profile;
mod select;

pub use adaptive::{detect_color_mode, reset_theme_detector, set_theme_detector, ColorMode};
pub use color::ColorDef;
pub use profile::{Profile, Role};
pub use select::{init_term, init_term_to, select_profile};
