//! Picking the active profile from configuration.

use std::io::{self, Write};

use log::{debug, warn};

use super::adaptive::{detect_color_mode, ColorMode};
use super::profile::Profile;
use crate::config::{Flags, Settings, SCREEN_AUTO_KEY};

/// Returns the profile for a configuration key.
///
/// Built-in keys select that profile and `termtextAuto` selects the light or
/// dark default by OS detection. Anything else, including no key at all,
/// falls back to no-color.
pub fn select_profile(key: Option<&str>) -> Profile {
    let Some(key) = key else {
        return Profile::no_color();
    };
    if key == SCREEN_AUTO_KEY {
        let mode = detect_color_mode();
        debug!(target: "termtext::profile", "detected {:?} color mode", mode);
        return match mode {
            ColorMode::Dark => Profile::dark(),
            ColorMode::Light => Profile::light(),
        };
    }
    Profile::lookup(key).unwrap_or_else(|| {
        debug!(target: "termtext::profile", "unknown profile {:?}, using no-color", key);
        Profile::no_color()
    })
}

/// Selects the profile named by `Termtext.screenProfile`, writing debug
/// output to standard output.
pub fn init_term(settings: &Settings, flags: Flags) -> Profile {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    init_term_to(&mut handle, settings, flags)
}

/// Selects the profile named by `Termtext.screenProfile`.
///
/// With the debug flag set, the selection is bracketed by trace lines and
/// followed by a sample of the title, sub-title, text and highlight styles.
pub fn init_term_to(out: &mut dyn Write, settings: &Settings, flags: Flags) -> Profile {
    let key = settings.screen_profile();
    let profile = select_profile(key.as_deref());
    debug!(target: "termtext::profile", "term inited with profile {:?}", profile.name());

    if flags.debug {
        let result = crate::trace_enter_to!(&mut *out, &profile)
            .and_then(|()| sample_line(&mut *out, &profile))
            .and_then(|()| crate::trace_exit_to!(&mut *out, &profile));
        if let Err(e) = result {
            warn!(target: "termtext::profile", "profile banner output failed: {}", e);
        }
    }
    profile
}

fn sample_line(out: &mut dyn Write, profile: &Profile) -> io::Result<()> {
    writeln!(
        out,
        "Term inited with profile \"{}\": {} {} {} {}",
        profile.title(profile.name()),
        profile.title("Title"),
        profile.sub_title("SubTitle"),
        profile.text("Text"),
        profile.highlight("Highlight"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{reset_theme_detector, set_theme_detector};
    use serial_test::serial;

    #[test]
    fn test_known_keys() {
        assert_eq!(select_profile(Some("termtextDarkDefault")).key(), "termtextDarkDefault");
        assert_eq!(select_profile(Some("termtextLightDefault")).key(), "termtextLightDefault");
        assert_eq!(select_profile(Some("termtextNoColor")).key(), "termtextNoColor");
    }

    #[test]
    fn test_unknown_key_falls_back_to_no_color() {
        assert_eq!(select_profile(Some("solarized")).key(), "termtextNoColor");
        assert_eq!(select_profile(None).key(), "termtextNoColor");
    }

    #[test]
    #[serial]
    fn test_auto_follows_detector() {
        set_theme_detector(|| ColorMode::Dark);
        assert_eq!(select_profile(Some(SCREEN_AUTO_KEY)).key(), "termtextDarkDefault");
        set_theme_detector(|| ColorMode::Light);
        assert_eq!(select_profile(Some(SCREEN_AUTO_KEY)).key(), "termtextLightDefault");
        reset_theme_detector();
    }

    #[test]
    fn test_init_term_quiet_without_debug() {
        let mut settings = Settings::new();
        settings.set("Termtext.screenProfile", "termtextLightDefault");
        let mut out = Vec::new();
        let profile = init_term_to(&mut out, &settings, Flags::default());
        assert_eq!(profile.key(), "termtextLightDefault");
        assert!(out.is_empty());
    }

    #[test]
    fn test_init_term_debug_banner() {
        let mut settings = Settings::new();
        settings.set("Termtext.screenProfile", "termtextNoColor");
        let mut out = Vec::new();
        init_term_to(&mut out, &settings, Flags::debug());

        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Enter init_term_to() select.rs:"), "{out}");
        assert_eq!(
            lines[1],
            "Term inited with profile \"Termtext No Color\": Title SubTitle Text Highlight"
        );
        assert!(lines[2].starts_with("Exit  init_term_to() select.rs:"), "{out}");
    }
}
