//! Configuration definition loading.
//!
//! Definitions are JSON documents; unknown keys are ignored.

use crate::error::ParseError;
use crate::types::ConfigurationSchema;
use std::path::Path;

/// Parses a configuration definition from a JSON string.
///
/// # Errors
/// Returns `ParseError::Json` if the input is malformed or missing required keys.
pub fn parse_schema(json: &str) -> Result<ConfigurationSchema, ParseError> {
    parse_with_origin(json, "input")
}

/// Loads a configuration definition from a JSON file.
///
/// # Errors
/// Returns `ParseError::Io` if the file cannot be read, or `ParseError::Json`
/// naming the file if it cannot be parsed.
pub fn load_schema(path: &Path) -> Result<ConfigurationSchema, ParseError> {
    let json = std::fs::read_to_string(path).map_err(|e| ParseError::io(path, e))?;
    let schema = parse_with_origin(&json, &format!("file {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        related_types = schema.related_types.len(),
        "loaded configuration definition"
    );
    Ok(schema)
}

fn parse_with_origin(json: &str, origin: &str) -> Result<ConfigurationSchema, ParseError> {
    let de = &mut serde_json::Deserializer::from_str(json);
    serde_path_to_error::deserialize(de).map_err(|e| ParseError::json(origin, e))
}
