//! Profile struct: nine semantic roles mapped to styles.
//!
//! A profile is an immutable value. Rendering code receives it explicitly
//! instead of reading process-wide style bindings, so two renderers with
//! different profiles can coexist (and tests never interfere).
//!
//! # Construction
//!
//! Built-ins:
//!
//! ```rust
//! use termtext::Profile;
//!
//! let dark = Profile::dark();
//! assert_eq!(dark.key(), "termtextDarkDefault");
//! ```
//!
//! From YAML, using the same color vocabulary as the built-ins:
//!
//! ```rust
//! use termtext::Profile;
//!
//! let profile = Profile::from_yaml("ocean", r##"
//! title: bright_white
//! highlight: cyan
//! fail: { fg: red, bold: true }
//! warn: "#ffaa00"
//! "##).unwrap();
//! assert_eq!(profile.name(), "ocean");
//! ```

use std::fmt::{self, Display};
use std::str::FromStr;

use console::Style;

use super::color::ColorDef;
use crate::config::{SCREEN_DARK_DEFAULT_KEY, SCREEN_LIGHT_DEFAULT_KEY, SCREEN_NO_COLOR_DEFAULT_KEY};
use crate::error::ProfileError;
use crate::output::OutputMode;

/// Semantic text role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Headings and labels.
    Title,
    /// Secondary headings.
    SubTitle,
    /// Body text.
    Text,
    /// Informational notes.
    Info,
    /// Emphasized values.
    Highlight,
    /// Positive outcomes, 2xx statuses.
    Success,
    /// Cautions, 3xx statuses.
    Warn,
    /// Failures, 4xx/5xx statuses and error messages.
    Fail,
    /// Attention-grabbing messages.
    Alert,
}

impl Role {
    /// Number of roles.
    pub const COUNT: usize = 9;

    /// Every role, in declaration order.
    pub const ALL: [Role; Role::COUNT] = [
        Role::Title,
        Role::SubTitle,
        Role::Text,
        Role::Info,
        Role::Highlight,
        Role::Success,
        Role::Warn,
        Role::Fail,
        Role::Alert,
    ];

    /// The role's name as used in profile files.
    pub fn name(&self) -> &'static str {
        match self {
            Role::Title => "title",
            Role::SubTitle => "sub_title",
            Role::Text => "text",
            Role::Info => "info",
            Role::Highlight => "highlight",
            Role::Success => "success",
            Role::Warn => "warn",
            Role::Fail => "fail",
            Role::Alert => "alert",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "title" => Ok(Role::Title),
            "sub_title" | "subtitle" => Ok(Role::SubTitle),
            "text" => Ok(Role::Text),
            "info" => Ok(Role::Info),
            "highlight" => Ok(Role::Highlight),
            "success" => Ok(Role::Success),
            "warn" | "warning" => Ok(Role::Warn),
            "fail" => Ok(Role::Fail),
            "alert" => Ok(Role::Alert),
            _ => Err(ProfileError::UnknownRole(s.to_string())),
        }
    }
}

/// A named set of styles, one per [`Role`].
#[derive(Debug, Clone)]
pub struct Profile {
    /// Display name.
    name: String,
    /// Lookup key (matches the `Termtext.screenProfile` setting).
    key: String,
    styles: [Style; Role::COUNT],
}

impl Profile {
    /// Creates a profile with every role unstyled.
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            styles: std::array::from_fn(|_| Style::new()),
        }
    }

    /// Sets the style for a role, returning `self` for chaining.
    pub fn with(mut self, role: Role, style: Style) -> Self {
        self.styles[role.index()] = style;
        self
    }

    /// The built-in profile that never styles anything.
    pub fn no_color() -> Self {
        Self::new("Termtext No Color", SCREEN_NO_COLOR_DEFAULT_KEY)
    }

    /// The built-in profile for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self::new("Termtext Default Dark", SCREEN_DARK_DEFAULT_KEY)
            .with(Role::Title, Style::new().white().bright())
            .with(Role::SubTitle, Style::new().white())
            .with(Role::Text, Style::new().white())
            .with(Role::Info, Style::new().white())
            .with(Role::Highlight, Style::new().green())
            .with(Role::Success, Style::new().green())
            .with(Role::Warn, Style::new().yellow())
            .with(Role::Fail, Style::new().red())
            .with(Role::Alert, Style::new().red())
    }

    /// The built-in profile for light terminal backgrounds.
    pub fn light() -> Self {
        Self::new("Termtext Default Light", SCREEN_LIGHT_DEFAULT_KEY)
            .with(Role::Title, Style::new().black())
            .with(Role::SubTitle, Style::new().black().bright())
            .with(Role::Text, Style::new().black().bright())
            .with(Role::Info, Style::new().black())
            .with(Role::Highlight, Style::new().green())
            .with(Role::Success, Style::new().green())
            .with(Role::Warn, Style::new().yellow())
            .with(Role::Fail, Style::new().red())
            .with(Role::Alert, Style::new().red())
    }

    /// All built-in profiles.
    pub fn builtins() -> Vec<Profile> {
        vec![Self::no_color(), Self::dark(), Self::light()]
    }

    /// Looks up a built-in profile by key.
    pub fn lookup(key: &str) -> Option<Profile> {
        Self::builtins().into_iter().find(|p| p.key == key)
    }

    /// Creates a profile from a YAML mapping of role name to style.
    ///
    /// Each value is either a color (`red`, `bright_white`, `208`, `"#ff8800"`)
    /// or a mapping with `fg`, `bg`, `bold`, `dim`, `italic`, `underline`.
    /// Roles left out stay unstyled.
    pub fn from_yaml(key: &str, yaml: &str) -> Result<Self, ProfileError> {
        let root: serde_yaml::Value =
            serde_yaml::from_str(yaml).map_err(|e| ProfileError::Parse(e.to_string()))?;
        let mapping = match root {
            serde_yaml::Value::Mapping(m) => m,
            serde_yaml::Value::Null => serde_yaml::Mapping::new(),
            other => {
                return Err(ProfileError::Parse(format!(
                    "expected a mapping of roles, found {:?}",
                    other
                )))
            }
        };

        let mut profile = Self::new(key, key);
        for (name, value) in &mapping {
            let name = name
                .as_str()
                .ok_or_else(|| ProfileError::Parse(format!("role name must be a string: {:?}", name)))?;
            let role: Role = name.parse()?;
            profile.styles[role.index()] = parse_role_style(role, value)?;
        }
        Ok(profile)
    }

    /// Returns the profile's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the profile's lookup key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the style bound to a role.
    pub fn style(&self, role: Role) -> &Style {
        &self.styles[role.index()]
    }

    /// Applies the output mode to every style.
    ///
    /// `Term` forces ANSI codes and `Text` suppresses them. `Auto` decides
    /// once, from whether standard output is a color-capable terminal.
    pub fn resolve(&self, mode: OutputMode) -> Profile {
        let force = mode.should_use_color();
        let mut resolved = self.clone();
        for style in resolved.styles.iter_mut() {
            *style = style.clone().force_styling(force);
        }
        resolved
    }

    /// Formats a value in the given role's style.
    pub fn paint(&self, role: Role, value: impl Display) -> String {
        self.style(role).apply_to(value).to_string()
    }

    /// Formats a value in the Title style.
    pub fn title(&self, value: impl Display) -> String {
        self.paint(Role::Title, value)
    }

    /// Formats a value in the SubTitle style.
    pub fn sub_title(&self, value: impl Display) -> String {
        self.paint(Role::SubTitle, value)
    }

    /// Formats a value in the Text style.
    pub fn text(&self, value: impl Display) -> String {
        self.paint(Role::Text, value)
    }

    /// Formats a value in the Info style.
    pub fn info(&self, value: impl Display) -> String {
        self.paint(Role::Info, value)
    }

    /// Formats a value in the Highlight style.
    pub fn highlight(&self, value: impl Display) -> String {
        self.paint(Role::Highlight, value)
    }

    /// Formats a value in the Success style.
    pub fn success(&self, value: impl Display) -> String {
        self.paint(Role::Success, value)
    }

    /// Formats a value in the Warn style.
    pub fn warn(&self, value: impl Display) -> String {
        self.paint(Role::Warn, value)
    }

    /// Formats a value in the Fail style.
    pub fn fail(&self, value: impl Display) -> String {
        self.paint(Role::Fail, value)
    }

    /// Formats a value in the Alert style.
    pub fn alert(&self, value: impl Display) -> String {
        self.paint(Role::Alert, value)
    }

    /// Formats an error as `Error: <message>`.
    pub fn error_line(&self, err: &dyn std::error::Error) -> String {
        format!("{} {}", self.title("Error:"), self.fail(err))
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::no_color()
    }
}

fn parse_role_style(role: Role, value: &serde_yaml::Value) -> Result<Style, ProfileError> {
    let invalid_color = |value: &serde_yaml::Value, message: String| ProfileError::InvalidColor {
        role: role.name().to_string(),
        value: yaml_scalar(value),
        message,
    };

    match value {
        serde_yaml::Value::String(_) | serde_yaml::Value::Number(_) => {
            let color = ColorDef::parse_value(value).map_err(|m| invalid_color(value, m))?;
            Ok(Style::new().fg(color.to_console_color()))
        }
        serde_yaml::Value::Mapping(attrs) => {
            let mut style = Style::new();
            for (attr, attr_value) in attrs {
                let attr = attr.as_str().unwrap_or_default();
                match attr {
                    "fg" | "bg" => {
                        let color = ColorDef::parse_value(attr_value)
                            .map_err(|m| invalid_color(attr_value, m))?
                            .to_console_color();
                        style = if attr == "fg" {
                            style.fg(color)
                        } else {
                            style.bg(color)
                        };
                    }
                    "bold" | "dim" | "italic" | "underline" => {
                        let enabled = attr_value.as_bool().ok_or_else(|| {
                            ProfileError::InvalidDefinition {
                                role: role.name().to_string(),
                                message: format!("'{}' must be true or false", attr),
                            }
                        })?;
                        if enabled {
                            style = match attr {
                                "bold" => style.bold(),
                                "dim" => style.dim(),
                                "italic" => style.italic(),
                                _ => style.underlined(),
                            };
                        }
                    }
                    other => {
                        return Err(ProfileError::UnknownAttribute {
                            role: role.name().to_string(),
                            attribute: other.to_string(),
                        })
                    }
                }
            }
            Ok(style)
        }
        _ => Err(ProfileError::InvalidDefinition {
            role: role.name().to_string(),
            message: "expected a color or a mapping of attributes".to_string(),
        }),
    }
}

fn yaml_scalar(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Number(n) => n.to_string(),
        other => format!("{:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_error() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::Other, "boom")
    }

    #[test]
    fn test_role_round_trip_names() {
        for role in Role::ALL {
            assert_eq!(role.name().parse::<Role>().unwrap(), role);
        }
        assert_eq!("SubTitle".parse::<Role>().unwrap(), Role::SubTitle);
        assert_eq!("warning".parse::<Role>().unwrap(), Role::Warn);
        assert!("banner".parse::<Role>().is_err());
    }

    #[test]
    fn test_no_color_is_identity_even_when_forced() {
        let profile = Profile::no_color().resolve(OutputMode::Term);
        for role in Role::ALL {
            assert_eq!(profile.paint(role, "plain"), "plain");
        }
    }

    #[test]
    fn test_dark_profile_forced_emits_ansi() {
        let profile = Profile::dark().resolve(OutputMode::Term);
        assert_eq!(profile.fail("x"), "\x1b[31mx\x1b[0m");
        assert_eq!(profile.success("x"), "\x1b[32mx\x1b[0m");
        assert_eq!(profile.warn("x"), "\x1b[33mx\x1b[0m");
    }

    #[test]
    fn test_text_mode_strips_styles() {
        let profile = Profile::light().resolve(OutputMode::Text);
        for role in Role::ALL {
            assert_eq!(profile.paint(role, "plain"), "plain");
        }
    }

    #[test]
    fn test_auto_mode_follows_terminal_detection() {
        let auto = Profile::dark().resolve(OutputMode::Auto);
        let expected = if OutputMode::Auto.should_use_color() {
            "\x1b[31mx\x1b[0m"
        } else {
            "x"
        };
        assert_eq!(auto.fail("x"), expected);
    }

    #[test]
    fn test_lookup_builtins() {
        assert_eq!(
            Profile::lookup("termtextDarkDefault").unwrap().name(),
            "Termtext Default Dark"
        );
        assert_eq!(
            Profile::lookup("termtextLightDefault").unwrap().name(),
            "Termtext Default Light"
        );
        assert_eq!(
            Profile::lookup("termtextNoColor").unwrap().name(),
            "Termtext No Color"
        );
        assert!(Profile::lookup("solarized").is_none());
    }

    #[test]
    fn test_error_line() {
        let profile = Profile::no_color();
        assert_eq!(profile.error_line(&sample_error()), "Error: boom");
    }

    #[test]
    fn test_from_yaml_sets_roles() {
        let profile = Profile::from_yaml(
            "custom",
            r#"
            title: bright_white
            fail:
              fg: red
              bold: true
            "#,
        )
        .unwrap()
        .resolve(OutputMode::Term);

        assert_eq!(profile.key(), "custom");
        assert_eq!(profile.fail("x"), "\x1b[31m\x1b[1mx\x1b[0m");
        // Roles not mentioned stay unstyled.
        assert_eq!(profile.text("x"), "x");
    }

    #[test]
    fn test_from_yaml_rejects_unknown_role() {
        let err = Profile::from_yaml("custom", "banner: red").unwrap_err();
        assert_eq!(err, ProfileError::UnknownRole("banner".to_string()));
    }

    #[test]
    fn test_from_yaml_rejects_bad_color_and_attribute() {
        assert!(matches!(
            Profile::from_yaml("custom", "title: purple"),
            Err(ProfileError::InvalidColor { .. })
        ));
        assert!(matches!(
            Profile::from_yaml("custom", "title: { blink: true }"),
            Err(ProfileError::UnknownAttribute { .. })
        ));
        assert!(matches!(
            Profile::from_yaml("custom", "title: { bold: 3 }"),
            Err(ProfileError::InvalidDefinition { .. })
        ));
        assert!(matches!(
            Profile::from_yaml("custom", "- title"),
            Err(ProfileError::Parse(_))
        ));
    }
}
