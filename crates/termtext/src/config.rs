//! Settings keys, the dotted-key settings view, and display flags.
//!
//! Settings come from a YAML (or JSON) document. Keys are dotted paths whose
//! segments match case-insensitively, so both of these documents set
//! [`JSON_DISPLAY_KEY`]:
//!
//! ```yaml
//! Termtext:
//!   JSONDisplay: true
//! ```
//!
//! ```yaml
//! termtext:
//!   jsondisplay: true
//! ```
//!
//! # Example
//!
//! ```rust
//! use termtext::{Settings, JSON_DISPLAY_KEY, SCREEN_PROFILE_KEY};
//!
//! let settings = Settings::from_yaml(r#"
//! Termtext:
//!   JSONDisplay: true
//!   screenProfile: termtextDarkDefault
//! "#).unwrap();
//!
//! assert!(settings.get_bool(JSON_DISPLAY_KEY));
//! assert_eq!(settings.get_string(SCREEN_PROFILE_KEY).as_deref(), Some("termtextDarkDefault"));
//! ```

use std::path::Path;

use log::debug;
use serde_yaml::{Mapping, Value};

use crate::error::ConfigError;

/// If true, renders that carry a response show only the re-indented JSON body.
pub const JSON_DISPLAY_KEY: &str = "Termtext.JSONDisplay";

/// Name of the active screen profile.
pub const SCREEN_PROFILE_KEY: &str = "Termtext.screenProfile";

/// Profile key: no color.
pub const SCREEN_NO_COLOR_DEFAULT_KEY: &str = "termtextNoColor";

/// Profile key: dark background defaults.
pub const SCREEN_DARK_DEFAULT_KEY: &str = "termtextDarkDefault";

/// Profile key: light background defaults.
pub const SCREEN_LIGHT_DEFAULT_KEY: &str = "termtextLightDefault";

/// Profile key: pick light or dark defaults by asking the OS.
pub const SCREEN_AUTO_KEY: &str = "termtextAuto";

const ENV_PREFIX: &str = "TERMTEXT_";

/// Process-level display flags, owned by the calling application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    /// Full HTTP detail (status table, headers, body) on every render.
    pub debug: bool,
    /// One-line HTTP summary plus body on every render.
    pub verbose: bool,
}

impl Flags {
    /// Flags with debug on.
    pub fn debug() -> Self {
        Self {
            debug: true,
            verbose: false,
        }
    }

    /// Flags with verbose on.
    pub fn verbose() -> Self {
        Self {
            debug: false,
            verbose: true,
        }
    }
}

/// A dotted-key view over a YAML settings tree.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    root: Mapping,
}

impl Settings {
    /// Creates empty settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses settings from YAML (JSON documents are valid YAML too).
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse(yaml, None)
    }

    /// Loads settings from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(target: "termtext::config", "loaded settings from {}", path.display());
        Self::parse(&content, Some(path))
    }

    fn parse(content: &str, path: Option<&Path>) -> Result<Self, ConfigError> {
        let value: Value = serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.map(Path::to_path_buf),
            message: e.to_string(),
        })?;
        match value {
            Value::Mapping(root) => Ok(Self { root }),
            Value::Null => Ok(Self::new()),
            other => Err(ConfigError::NotAMapping {
                found: value_kind(&other).to_string(),
            }),
        }
    }

    /// Looks up a dotted key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut segments = key.split('.');
        let first = segments.next()?;
        let mut current = find_key(&self.root, first)?;
        for segment in segments {
            match current {
                Value::Mapping(map) => current = find_key(map, segment)?,
                _ => return None,
            }
        }
        Some(current)
    }

    /// Reads a boolean, accepting `true`/`false` strings. Missing keys read as false.
    pub fn get_bool(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => parse_bool(s).unwrap_or(false),
            Some(Value::Number(n)) => n.as_i64().is_some_and(|n| n != 0),
            _ => false,
        }
    }

    /// Reads a string, converting scalars. Missing keys read as `None`.
    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Sets a dotted key, creating intermediate mappings as needed.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let segments: Vec<&str> = key.split('.').collect();
        let Some((last, parents)) = segments.split_last() else {
            return;
        };

        let mut current = &mut self.root;
        for segment in parents {
            let existing = existing_key(current, segment);
            let name = existing.unwrap_or_else(|| Value::String(segment.to_string()));
            let entry = current
                .entry(name)
                .or_insert(Value::Mapping(Mapping::new()));
            if !entry.is_mapping() {
                *entry = Value::Mapping(Mapping::new());
            }
            current = match entry {
                Value::Mapping(map) => map,
                _ => return,
            };
        }

        let name = existing_key(current, last).unwrap_or_else(|| Value::String(last.to_string()));
        current.insert(name, value.into());
    }

    /// Convenience for [`JSON_DISPLAY_KEY`].
    pub fn json_display(&self) -> bool {
        self.get_bool(JSON_DISPLAY_KEY)
    }

    /// Convenience for [`SCREEN_PROFILE_KEY`].
    pub fn screen_profile(&self) -> Option<String> {
        self.get_string(SCREEN_PROFILE_KEY)
    }

    /// Applies `TERMTEXT_*` environment overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(std::env::vars())
    }

    /// Applies overrides from `(name, value)` pairs shaped like environment
    /// variables: `TERMTEXT_JSONDISPLAY` overrides `Termtext.JSONDisplay`,
    /// `TERMTEXT_SCREENPROFILE` overrides `Termtext.screenProfile`.
    pub fn with_overrides_from<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, value) in vars {
            let name = name.as_ref();
            let key = match name.strip_prefix(ENV_PREFIX) {
                Some(rest) if rest.eq_ignore_ascii_case("JSONDISPLAY") => JSON_DISPLAY_KEY,
                Some(rest) if rest.eq_ignore_ascii_case("SCREENPROFILE") => SCREEN_PROFILE_KEY,
                _ => continue,
            };
            let value: String = value.into();
            debug!(target: "termtext::config", "{} overrides {}", name, key);
            match parse_bool(&value) {
                Some(b) if key == JSON_DISPLAY_KEY => self.set(key, b),
                _ => self.set(key, value),
            }
        }
        self
    }
}

fn find_key<'a>(map: &'a Mapping, segment: &str) -> Option<&'a Value> {
    map.iter().find_map(|(k, v)| match k {
        Value::String(name) if name.eq_ignore_ascii_case(segment) => Some(v),
        _ => None,
    })
}

fn existing_key(map: &Mapping, segment: &str) -> Option<Value> {
    map.keys()
        .find(|k| matches!(k, Value::String(name) if name.eq_ignore_ascii_case(segment)))
        .cloned()
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" => Some(true),
        "false" | "f" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
