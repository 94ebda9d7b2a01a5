//! Error types for configuration and profile loading.
//!
//! Rendering itself never fails: body read problems and JSON failures are
//! reported inline in the output. The errors here cover the setup side,
//! reading settings files and parsing custom profiles.

use std::io;
use std::path::PathBuf;

/// Errors raised while loading [`Settings`](crate::Settings).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Load {
        /// Path of the file that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The settings content is not valid YAML (or JSON).
    #[error("failed to parse settings{}: {message}", location(path))]
    Parse {
        /// Optional source file path.
        path: Option<PathBuf>,
        /// Error message from the YAML parser.
        message: String,
    },

    /// The settings root is not a mapping.
    #[error("settings root must be a mapping, found {found}")]
    NotAMapping {
        /// Kind of value found at the root.
        found: String,
    },
}

/// Errors raised while building a custom [`Profile`](crate::Profile).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    /// YAML parse error.
    #[error("failed to parse profile: {0}")]
    Parse(String),

    /// A key does not name one of the nine roles.
    #[error("unknown role '{0}'")]
    UnknownRole(String),

    /// A role was given a color the profile cannot interpret.
    #[error("invalid color '{value}' for role '{role}': {message}")]
    InvalidColor {
        /// Role where the error occurred.
        role: String,
        /// The rejected color value.
        value: String,
        /// Parser message.
        message: String,
    },

    /// A role definition carries an attribute that is not supported.
    #[error("unknown attribute '{attribute}' for role '{role}'")]
    UnknownAttribute {
        /// Role where the error occurred.
        role: String,
        /// The unknown attribute name.
        attribute: String,
    },

    /// A role definition has the wrong shape.
    #[error("invalid definition for role '{role}': {message}")]
    InvalidDefinition {
        /// Role where the error occurred.
        role: String,
        /// Description of what was wrong.
        message: String,
    },
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_display() {
        let err = ConfigError::Load {
            path: PathBuf::from("/tmp/missing.yaml"),
            source: io::Error::new(io::ErrorKind::NotFound, "file not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/missing.yaml"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_parse_error_display_with_and_without_path() {
        let with_path = ConfigError::Parse {
            path: Some(PathBuf::from("cfg.yaml")),
            message: "bad indent".to_string(),
        };
        assert_eq!(
            with_path.to_string(),
            "failed to parse settings cfg.yaml: bad indent"
        );

        let without = ConfigError::Parse {
            path: None,
            message: "bad indent".to_string(),
        };
        assert_eq!(without.to_string(), "failed to parse settings: bad indent");
    }

    #[test]
    fn test_profile_error_display() {
        let err = ProfileError::InvalidColor {
            role: "title".to_string(),
            value: "purple".to_string(),
            message: "unknown color 'purple'".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("title"));
        assert!(msg.contains("purple"));
    }
}
