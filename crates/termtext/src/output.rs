//! Output mode control for rendering.
//!
//! The [`OutputMode`] enum decides whether profile styles emit ANSI codes.

use console::Term;
use std::str::FromStr;

/// Controls whether rendered output carries ANSI escape codes.
///
/// # Variants
///
/// - `Auto` - Let `console` decide from terminal capabilities (default)
/// - `Term` - Always include ANSI escape codes
/// - `Text` - Never include ANSI escape codes
///
/// # Example
///
/// ```rust
/// use termtext::{OutputMode, Profile};
///
/// let plain = Profile::dark().resolve(OutputMode::Text);
/// assert_eq!(plain.fail("boom"), "boom");
///
/// let styled = Profile::dark().resolve(OutputMode::Term);
/// assert_eq!(styled.fail("boom"), "\x1b[31mboom\x1b[0m");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Auto-detect terminal capabilities
    #[default]
    Auto,
    /// Always use ANSI escape codes (terminal output)
    Term,
    /// Never use ANSI escape codes (plain text)
    Text,
}

impl OutputMode {
    /// Resolves the output mode to a concrete decision about whether to use color.
    pub fn should_use_color(&self) -> bool {
        match self {
            OutputMode::Auto => Term::stdout().features().colors_supported(),
            OutputMode::Term => true,
            OutputMode::Text => false,
        }
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(OutputMode::Auto),
            "term" => Ok(OutputMode::Term),
            "text" => Ok(OutputMode::Text),
            other => Err(format!(
                "unknown output mode '{}' (expected auto, term or text)",
                other
            )),
        }
    }
}
