//! # termtext - Styled Terminal Output for HTTP Client Tools
//!
//! `termtext` prints the result of an operation that may have involved an
//! HTTP call: the caller's own output, plus as much of the response and error
//! as the active display mode asks for, styled by a color profile.
//!
//! ## Core Concepts
//!
//! - [`Renderer`]: holds the active [`Profile`], the [`Flags`] and the
//!   JSON-only setting, and runs render calls
//! - [`DisplayMode`]: Debug, Verbose, JsonOnly or Default, resolved per call
//! - [`RenderStep`]: the steps a mode's [`Plan`] runs in order
//! - [`Profile`]: a style per [`Role`] (title, text, fail, ...), with three
//!   built-ins selected by key
//! - [`HttpResponse`]: a completed response whose body is read at most once
//! - [`Listable`] / [`Describable`]: what a domain object can print
//! - [`Settings`]: dotted-key configuration with case-insensitive lookup
//!
//! ## Quick Start
//!
//! ```rust
//! use std::io::Write;
//! use termtext::{Flags, HttpResponse, Profile, Renderer};
//!
//! let renderer = Renderer::new(Profile::no_color()).flags(Flags::debug());
//! let resp = HttpResponse::new(404)
//!     .header("Content-Type", "application/json")
//!     .body(r#"{"status":404,"message":"not found"}"#);
//! let err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such widget");
//!
//! let mut out = Vec::new();
//! renderer.render_with_to(&mut out, |_, _| Ok(()), Some(resp), Some(&err));
//!
//! let out = String::from_utf8(out).unwrap();
//! assert!(out.starts_with("Status          Length   Encoding   Uncompressed\n"));
//! assert!(out.contains("Message: not found\n"));
//! assert!(out.ends_with("Error: no such widget\n"));
//! ```
//!
//! ## Profiles from Configuration
//!
//! ```rust
//! use termtext::{Flags, OutputMode, Renderer, Settings};
//!
//! let settings = Settings::from_yaml(r#"
//! Termtext:
//!   screenProfile: termtextDarkDefault
//!   JSONDisplay: false
//! "#).unwrap();
//!
//! let renderer = Renderer::from_settings(&settings, Flags::default(), OutputMode::Term);
//! assert_eq!(renderer.profile().name(), "Termtext Default Dark");
//! assert_eq!(renderer.profile().fail("x"), "\x1b[31mx\x1b[0m");
//! ```

pub mod config;
pub mod display;
mod error;
pub mod http;
pub mod output;
pub mod profile;
pub mod render;
pub mod tabular;
pub mod trace;
mod util;

pub use config::{
    Flags, Settings, JSON_DISPLAY_KEY, SCREEN_AUTO_KEY, SCREEN_DARK_DEFAULT_KEY,
    SCREEN_LIGHT_DEFAULT_KEY, SCREEN_NO_COLOR_DEFAULT_KEY, SCREEN_PROFILE_KEY,
};
pub use display::{Describable, Listable};
pub use error::{ConfigError, ProfileError};
pub use http::{status_role, BodyError, EmbeddedMessage, HttpResponse};
pub use output::OutputMode;
pub use profile::{
    detect_color_mode, init_term, init_term_to, reset_theme_detector, select_profile,
    set_theme_detector, ColorDef, ColorMode, Profile, Role,
};
pub use render::{DisplayMode, Plan, RenderStep, Renderer};
pub use tabular::TabWriter;
pub use trace::{Location, TraceGuard};
pub use util::{indent_json, rgb_to_ansi256};
