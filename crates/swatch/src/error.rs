//! Error types for theme loading and validation.
//!
//! Every failure aborts the whole load or merge: a [`ThemeConfig`](crate::ThemeConfig)
//! is either fully valid or not produced at all.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading, validating or merging a theme configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    /// A required key is absent from the document.
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// A content pattern is not a non-empty string.
    #[error("invalid content pattern {0}: expected a non-empty glob string")]
    InvalidGlob(String),

    /// The content pattern list is present but empty.
    #[error("content pattern list is empty")]
    EmptyContent,

    /// A leaf color value is not a strict hex color.
    #[error("invalid color '{value}' for {}", location(.family, .shade))]
    InvalidColorValue {
        /// Color family holding the value.
        family: String,
        /// Shade key, when the family is a scale.
        shade: Option<String>,
        /// The rejected value, rendered as text.
        value: String,
    },

    /// Two family names collide after case-insensitive normalization.
    #[error("duplicate color family '{0}'")]
    DuplicateFamily(String),

    /// A family name is empty or contains whitespace.
    #[error("invalid color family name '{0}'")]
    InvalidFamily(String),

    /// A shade key within a scale is empty.
    #[error("invalid shade '{shade}' in color family '{family}'")]
    InvalidShade {
        /// Color family holding the shade.
        family: String,
        /// The rejected shade key.
        shade: String,
    },

    /// A container has the wrong shape (e.g. `colors` is a list).
    #[error("'{path}' must be {expected}")]
    InvalidType {
        /// Dotted path to the offending node.
        path: String,
        /// Description of the accepted shape.
        expected: &'static str,
    },

    /// The configuration source could not be parsed.
    #[error("{}", parse_message(.path, .message))]
    Parse {
        /// Source file, when loaded from disk.
        path: Option<PathBuf>,
        /// Parser error message.
        message: String,
    },

    /// The configuration source could not be read.
    #[error("failed to load theme configuration: {message}")]
    Load {
        /// I/O error description.
        message: String,
    },
}

/// Result type for theme operations.
pub type Result<T> = std::result::Result<T, ThemeError>;

fn location(family: &str, shade: &Option<String>) -> String {
    match shade {
        Some(shade) => format!("'{}.{}'", family, shade),
        None => format!("'{}'", family),
    }
}

fn parse_message(path: &Option<PathBuf>, message: &str) -> String {
    match path {
        Some(p) => format!("failed to parse {}: {}", p.display(), message),
        None => format!("failed to parse theme configuration: {}", message),
    }
}
