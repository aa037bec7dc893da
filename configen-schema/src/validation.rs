//! Schema validation utilities.
//!
//! Structural checks that run before type resolution.

use crate::builtins::{STANDARD_TYPES, standard_type};
use crate::error::SchemaError;
use crate::ir::{rust_field_name, to_pascal_case, to_snake_case};
use crate::types::{CONFIGURATION, ConfigurationSchema, SLICE_PREFIX, StructDefinition};
use std::collections::HashSet;

/// Names that cannot be used as Rust fields, even as raw identifiers.
const RESERVED_FIELD_NAMES: &[&str] = &["_", "self", "super", "crate"];

/// Rust type names used by generated code.
const RESERVED_TYPE_NAMES: &[&str] = &["Self", "String", "Vec", "Option", "Duration", "Default"];

/// Validates a configuration definition for correctness.
///
/// # Errors
/// Returns `SchemaError::Validation` describing the first problem found.
pub fn validate_schema(schema: &ConfigurationSchema) -> Result<(), SchemaError> {
    validate_struct(CONFIGURATION, &schema.configuration)?;

    let mut rust_names = HashSet::from([CONFIGURATION.to_string()]);
    let mut function_names: HashSet<String> = STANDARD_TYPES
        .iter()
        .filter_map(|builtin| builtin.element)
        .chain([CONFIGURATION])
        .map(to_snake_case)
        .collect();
    for (name, def) in &schema.related_types {
        validate_type_name(name)?;
        if !rust_names.insert(to_pascal_case(name)) {
            return Err(SchemaError::validation(format!(
                "related type '{name}' maps to the same Rust type as another type"
            )));
        }
        // helpers and fixtures are free functions named after the snake_case type name
        if !function_names.insert(to_snake_case(name)) {
            return Err(SchemaError::validation(format!(
                "related type '{name}' maps to the same function names as another type"
            )));
        }
        validate_struct(name, def)?;
    }

    let getters = std::iter::once((CONFIGURATION, &schema.configuration))
        .chain(schema.related_types.iter().map(|(name, def)| (name.as_str(), def)))
        .filter(|(_, def)| def.with_getter);
    for (name, _) in getters {
        let trait_name = format!("{}Config", to_pascal_case(name));
        if rust_names.contains(&trait_name) {
            return Err(SchemaError::validation(format!(
                "accessor trait '{trait_name}' of '{name}' clashes with a type of the same name"
            )));
        }
    }
    Ok(())
}

/// Validates a related type name.
fn validate_type_name(name: &str) -> Result<(), SchemaError> {
    if name == CONFIGURATION {
        return Err(SchemaError::validation(format!(
            "related type '{CONFIGURATION}' conflicts with the primary configuration type"
        )));
    }
    if standard_type(name).is_some() || RESERVED_TYPE_NAMES.contains(&to_pascal_case(name).as_str())
    {
        return Err(SchemaError::validation(format!(
            "related type name '{name}' shadows a builtin type"
        )));
    }
    if name.starts_with(SLICE_PREFIX) {
        return Err(SchemaError::validation(format!(
            "related type name '{name}' must not start with '{SLICE_PREFIX}'"
        )));
    }
    if !is_identifier(name) {
        return Err(SchemaError::validation(format!(
            "related type name '{name}' is not a valid identifier"
        )));
    }
    Ok(())
}

/// Validates the fields of one struct.
fn validate_struct(name: &str, def: &StructDefinition) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();

    for field in &def.fields {
        if field.name.trim().is_empty() {
            return Err(SchemaError::validation(format!(
                "struct '{name}' has a field without a name"
            )));
        }
        if !is_identifier(&field.name) {
            return Err(SchemaError::validation(format!(
                "field '{}' in struct '{name}' is not a valid identifier",
                field.name
            )));
        }
        let ident = rust_field_name(&field.name);
        if RESERVED_FIELD_NAMES.contains(&ident.as_str()) {
            return Err(SchemaError::validation(format!(
                "field '{}' in struct '{name}' uses a reserved name",
                field.name
            )));
        }
        if field.type_name.trim().is_empty() {
            return Err(SchemaError::validation(format!(
                "field '{}' in struct '{name}' has no type",
                field.name
            )));
        }
        if !seen.insert(ident) {
            return Err(SchemaError::validation(format!(
                "duplicate field '{}' in struct '{name}'",
                field.name
            )));
        }
    }

    Ok(())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_schema;

    fn validate(json: &str) -> Result<(), SchemaError> {
        validate_schema(&parse_schema(json).expect("Failed to parse"))
    }

    #[test]
    fn test_validate_valid_schema() {
        let json = r#"{
            "Configuration": {"Fields": [{"Name": "Port", "Type": "int"}, {"Name": "Tls", "Type": "Tls"}]},
            "RelatedTypes": {"Tls": {"Fields": [{"Name": "Cert", "Type": "string"}]}}
        }"#;
        assert!(validate(json).is_ok());
    }

    #[test]
    fn test_validate_duplicate_field() {
        let json = r#"{"Configuration": {"Fields": [
            {"Name": "ServerName", "Type": "string"},
            {"Name": "server_name", "Type": "string"}
        ]}}"#;
        let err = validate(json).unwrap_err();
        assert!(err.to_string().contains("duplicate field 'server_name'"));
    }

    #[test]
    fn test_validate_empty_names() {
        assert!(validate(r#"{"Configuration": {"Fields": [{"Name": "", "Type": "int"}]}}"#).is_err());
        assert!(validate(r#"{"Configuration": {"Fields": [{"Name": "a", "Type": " "}]}}"#).is_err());
        assert!(validate(r#"{"Configuration": {"Fields": [{"Name": "self", "Type": "int"}]}}"#).is_err());
    }

    #[test]
    fn test_validate_related_names() {
        let conflict = r#"{"Configuration": {}, "RelatedTypes": {"Configuration": {}}}"#;
        assert!(validate(conflict).is_err());

        let slice = r#"{"Configuration": {}, "RelatedTypes": {"[]Peter": {}}}"#;
        assert!(validate(slice).is_err());

        let bad = r#"{"Configuration": {}, "RelatedTypes": {"my type": {}}}"#;
        assert!(validate(bad).is_err());

        let shadow = r#"{"Configuration": {}, "RelatedTypes": {"Duration": {}}}"#;
        assert!(validate(shadow).is_err());

        let lowercase = r#"{"Configuration": {}, "RelatedTypes": {"vec": {}}}"#;
        assert!(validate(lowercase).is_err());

        let clash = r#"{"Configuration": {}, "RelatedTypes": {"peter": {}, "Peter": {}}}"#;
        let err = validate(clash).unwrap_err();
        assert!(err.to_string().contains("same Rust type"));
    }

    #[test]
    fn test_validate_snake_case_clash_with_builtin_slice() {
        let json = r#"{
            "Configuration": {"Fields": [{"Name": "a", "Type": "[]int"}, {"Name": "b", "Type": "[]Int"}]},
            "RelatedTypes": {"Int": {"Fields": [{"Name": "x", "Type": "int"}]}}
        }"#;
        let err = validate(json).unwrap_err();
        assert!(err.to_string().contains("related type 'Int' maps to the same function names"));

        let string = r#"{"Configuration": {}, "RelatedTypes": {"STRING": {}}}"#;
        assert!(validate(string).is_err());
    }

    #[test]
    fn test_validate_snake_case_clash_between_related_types() {
        let json = r#"{
            "Configuration": {"Fields": [{"Name": "c", "Type": "[]HTTPServer"}, {"Name": "d", "Type": "[]HttpServer"}]},
            "RelatedTypes": {
                "HTTPServer": {"Fields": [{"Name": "x", "Type": "int"}]},
                "HttpServer": {"Fields": [{"Name": "x", "Type": "int"}]}
            }
        }"#;
        let err = validate(json).unwrap_err();
        assert!(err.to_string().contains("maps to the same function names"), "{err}");

        let root = r#"{"Configuration": {}, "RelatedTypes": {"CONFIGURATION": {}}}"#;
        assert!(validate(root).is_err());
    }

    #[test]
    fn test_validate_accessor_trait_clash() {
        let json = r#"{
            "Configuration": {"Fields": [{"Name": "tls", "Type": "Tls"}]},
            "RelatedTypes": {
                "Tls": {"WithGetter": true, "Fields": [{"Name": "cert", "Type": "string"}]},
                "TlsConfig": {}
            }
        }"#;
        let err = validate(json).unwrap_err();
        assert!(err.to_string().contains("accessor trait 'TlsConfig'"), "{err}");

        let without_getter = json.replace(r#""WithGetter": true, "#, "");
        assert!(validate(&without_getter).is_ok());
    }

    #[test]
    fn test_validate_self_type_name() {
        let json = r#"{"Configuration": {}, "RelatedTypes": {"Self": {}}}"#;
        let err = validate(json).unwrap_err();
        assert!(err.to_string().contains("shadows a builtin type"));
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("Peter"));
        assert!(is_identifier("_tls2"));
        assert!(!is_identifier("2fa"));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier(""));
    }
}
