//! Resolved representation for code generation.
//!
//! This module runs the full resolution pass over a schema and exposes the
//! closed, classified and example-populated type graph to the code emitter.

use crate::error::SchemaError;
use crate::examples::ExampleSynthesizer;
use crate::registry::{TypeId, TypeInfo, TypeRegistry};
use crate::types::{ConfigurationSchema, FieldDefinition, StructDefinition};
use crate::validation::validate_schema;
use std::collections::{BTreeMap, HashMap};

/// A fully resolved configuration definition.
#[derive(Debug, Clone)]
pub struct ResolvedSchema {
    /// Package name from the definition, if any.
    pub package_name: Option<String>,
    /// Registry owning every type and struct definition.
    pub registry: TypeRegistry,
    /// Field types needing a generated helper function, sorted by name.
    pub helper_types: Vec<TypeId>,
}

impl ResolvedSchema {
    /// Validates, resolves and populates a schema.
    ///
    /// # Errors
    /// Returns the first validation, type resolution or example synthesis
    /// error; no partial result is produced.
    pub fn from_schema(schema: ConfigurationSchema) -> Result<Self, SchemaError> {
        validate_schema(&schema)?;
        let package_name = schema.package_name.clone();

        let mut registry = TypeRegistry::new(schema);
        registry.register_all()?;
        ExampleSynthesizer::new(&mut registry).synthesize()?;

        let mut helpers: BTreeMap<&str, TypeId> = BTreeMap::new();
        for def in registry.structs().values() {
            for field in &def.fields {
                if let Some(id) = field.resolved {
                    let info = registry.get(id);
                    if info.override_style.requires_helper() {
                        helpers.insert(&info.name, id);
                    }
                }
            }
        }
        let helper_types: Vec<TypeId> = helpers.into_values().collect();
        check_helper_names(&registry, &helper_types)?;

        tracing::debug!(
            structs = registry.structs().len(),
            helpers = helper_types.len(),
            "resolved configuration definition"
        );
        Ok(Self {
            package_name,
            registry,
            helper_types,
        })
    }

    /// Returns every struct definition (Configuration and related types),
    /// sorted by name.
    #[must_use]
    pub fn structs(&self) -> &BTreeMap<String, StructDefinition> {
        self.registry.structs()
    }

    /// Returns the type with the given handle.
    #[must_use]
    pub fn type_info(&self, id: TypeId) -> &TypeInfo {
        self.registry.get(id)
    }

    /// Returns the type of a struct definition.
    #[must_use]
    pub fn struct_type(&self, def: &StructDefinition) -> Option<&TypeInfo> {
        def.type_id.map(|id| self.registry.get(id))
    }

    /// Returns the resolved type of a field.
    #[must_use]
    pub fn field_type(&self, field: &FieldDefinition) -> Option<&TypeInfo> {
        field.resolved.map(|id| self.registry.get(id))
    }

    /// Returns the types needing a generated helper function.
    pub fn helpers(&self) -> impl Iterator<Item = &TypeInfo> {
        self.helper_types.iter().map(|id| self.registry.get(*id))
    }
}

/// Ensures no two helper types render the same helper function.
fn check_helper_names(registry: &TypeRegistry, helper_types: &[TypeId]) -> Result<(), SchemaError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for &id in helper_types {
        let info = registry.get(id);
        let Some(helper) = info.override_helper.as_deref() else {
            continue;
        };
        if let Some(previous) = seen.insert(helper, &info.name) {
            return Err(SchemaError::validation(format!(
                "types '{previous}' and '{}' both need override helper '{helper}'",
                info.name
            )));
        }
    }
    Ok(())
}

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "static", "struct", "trait", "true", "type", "unsafe", "use",
    "where", "while", "abstract", "become", "box", "do", "final", "gen", "macro", "override",
    "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Converts a definition field name to a Rust field identifier.
#[must_use]
pub fn rust_field_name(name: &str) -> String {
    let snake = to_snake_case(name);
    if RUST_KEYWORDS.contains(&snake.as_str()) {
        format!("r#{snake}")
    } else {
        snake
    }
}

/// Converts a string to snake_case, keeping acronyms together.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == ' ' {
            result.push('_');
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_lower)
            {
                result.push('_');
            }
        }
        result.extend(c.to_lowercase());
    }
    result
}

/// Converts a string to PascalCase.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if c == '_' || c == '-' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}
