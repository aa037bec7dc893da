//! Configuration definition document types.
//!
//! These mirror the JSON definition file. Resolution fills in the
//! `#[serde(skip)]` links between definitions and the type registry.

use crate::registry::TypeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the primary configuration struct.
pub const CONFIGURATION: &str = "Configuration";

/// Prefix marking a slice of another type.
pub const SLICE_PREFIX: &str = "[]";

/// Complete configuration definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConfigurationSchema {
    /// Namespace hint for the generated code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    /// The primary configuration struct.
    pub configuration: StructDefinition,
    /// Additional structs referenced from the configuration, by name.
    #[serde(default)]
    pub related_types: BTreeMap<String, StructDefinition>,
}

impl ConfigurationSchema {
    /// Creates a schema with the given configuration struct and no related types.
    #[must_use]
    pub fn new(configuration: StructDefinition) -> Self {
        Self {
            package_name: None,
            configuration,
            related_types: BTreeMap::new(),
        }
    }

    /// Adds a related type.
    #[must_use]
    pub fn with_related(mut self, name: impl Into<String>, def: StructDefinition) -> Self {
        self.related_types.insert(name.into(), def);
        self
    }
}

/// A struct to generate: ordered fields plus presentation options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StructDefinition {
    /// Free text comment, emitted as documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Whether to generate an accessor trait for this struct.
    #[serde(default)]
    pub with_getter: bool,
    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    /// Registry entry for this struct, set once at registration.
    #[serde(skip)]
    pub type_id: Option<TypeId>,
}

impl StructDefinition {
    /// Creates a struct definition from its fields.
    #[must_use]
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    /// Returns the trimmed, non-empty lines of the comment.
    #[must_use]
    pub fn comment_lines(&self) -> Vec<&str> {
        comment_lines(self.comment.as_deref())
    }
}

/// A single field of a struct definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FieldDefinition {
    /// Field name as authored.
    pub name: String,
    /// Declared type name as authored.
    #[serde(rename = "Type")]
    pub type_name: String,
    /// Free text comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Resolved type, set during resolution.
    #[serde(skip)]
    pub resolved: Option<TypeId>,
}

impl FieldDefinition {
    /// Creates a field with the given name and declared type.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            comment: None,
            resolved: None,
        }
    }

    /// Returns the trimmed, non-empty lines of the comment.
    #[must_use]
    pub fn comment_lines(&self) -> Vec<&str> {
        comment_lines(self.comment.as_deref())
    }
}

fn comment_lines(comment: Option<&str>) -> Vec<&str> {
    match comment {
        Some(text) if !text.trim().is_empty() => text.lines().map(str::trim).collect(),
        _ => Vec::new(),
    }
}

/// Strips one slice prefix from a type name.
#[must_use]
pub fn slice_element(type_name: &str) -> Option<&str> {
    type_name.strip_prefix(SLICE_PREFIX)
}
