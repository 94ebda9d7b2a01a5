//! Display mode resolution.

use crate::config::Flags;

/// The rendering strategy for one render call.
///
/// Resolved from the debug flag, the verbose flag and the JSON-only setting,
/// in that order of priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Full HTTP detail, then the error line, then the callback.
    Debug,
    /// One-line HTTP summary and body, then the error line, then the callback.
    Verbose,
    /// Only the re-indented response body; the callback is skipped.
    JsonOnly,
    /// The callback, preceded by the response message when there is an error.
    Default,
}

impl DisplayMode {
    /// Picks the mode for a render call.
    ///
    /// JSON-only needs a response to show; without one the call falls through
    /// to [`DisplayMode::Default`].
    ///
    /// ```rust
    /// use termtext::{DisplayMode, Flags};
    ///
    /// assert_eq!(DisplayMode::resolve(Flags::debug(), true, true), DisplayMode::Debug);
    /// assert_eq!(DisplayMode::resolve(Flags::default(), true, true), DisplayMode::JsonOnly);
    /// assert_eq!(DisplayMode::resolve(Flags::default(), true, false), DisplayMode::Default);
    /// ```
    pub fn resolve(flags: Flags, json_only: bool, has_response: bool) -> Self {
        if flags.debug {
            DisplayMode::Debug
        } else if flags.verbose {
            DisplayMode::Verbose
        } else if json_only && has_response {
            DisplayMode::JsonOnly
        } else {
            DisplayMode::Default
        }
    }
}
