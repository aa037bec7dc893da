//! Error types for schema loading, validation and resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for loading a configuration definition.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The definition is not valid JSON or does not match the schema shape.
    #[error("unable to parse configuration definition {origin}: {source}")]
    Json {
        /// Where the definition came from (`file <path>` or `input`).
        origin: String,
        /// Underlying error, carrying the JSON path of the failure.
        #[source]
        source: serde_path_to_error::Error<serde_json::Error>,
    },

    /// The definition file could not be read.
    #[error("unable to open configuration definition file {}: {source}", .path.display())]
    Io {
        /// Path of the definition file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Error type for schema validation, type resolution and example synthesis.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A field declares a type that is neither builtin nor a related type.
    #[error("Field {field} has type {type_name} which isn't valid (valid types are {valid})")]
    InvalidTypeReference {
        /// Field name.
        field: String,
        /// Declared type name.
        type_name: String,
        /// Comma separated builtin type names.
        valid: String,
    },

    /// Example values could not be built for some derived types.
    #[error(
        "after {passes} passes, still unable to generate example values for {}",
        .missing.join(", ")
    )]
    UnresolvableExampleDependency {
        /// Number of passes attempted.
        passes: usize,
        /// Derived types still without examples, sorted by name.
        missing: Vec<String>,
    },

    /// Structural validation error.
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },
}

impl ParseError {
    /// Creates a JSON error for a definition with the given origin.
    pub fn json(
        origin: impl Into<String>,
        source: serde_path_to_error::Error<serde_json::Error>,
    ) -> Self {
        Self::Json {
            origin: origin.into(),
            source,
        }
    }

    /// Creates an IO error for the given definition file.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl SchemaError {
    /// Creates an invalid type reference error, listing the builtin type names.
    pub fn invalid_type(field: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::InvalidTypeReference {
            field: field.into(),
            type_name: type_name.into(),
            valid: crate::builtins::standard_type_names().join(","),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
