//! Type registry.
//!
//! Resolves declared type names against the builtin types and the schema's
//! related types, creating one [`TypeInfo`] per distinct name. The registry
//! owns every type and every struct definition; struct/type links are
//! lookup keys rather than references.

use crate::builtins::{STANDARD_TYPES, StandardType, standard_type};
use crate::classify::{OverrideStyle, TypeKind, classify};
use crate::error::SchemaError;
use crate::ir::{to_pascal_case, to_snake_case};
use crate::types::{CONFIGURATION, ConfigurationSchema, SLICE_PREFIX, StructDefinition, slice_element};
use std::collections::{BTreeMap, HashMap};

/// Handle to a type in a [`TypeRegistry`]. Equal handles denote the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(usize);

/// Metadata for one resolvable type.
#[derive(Debug, Clone)]
pub struct TypeInfo {
    /// Registry handle.
    pub id: TypeId,
    /// Name as written in the definition (e.g. `[]Peter`).
    pub name: String,
    /// Rust type emitted for fields of this type.
    pub rust_type: String,
    /// Structural kind.
    pub kind: TypeKind,
    /// Merge strategy.
    pub override_style: OverrideStyle,
    /// Generated helper function name, for slice types.
    pub override_helper: Option<String>,
    /// Zero value literal, for builtins.
    pub zero_value: Option<String>,
    /// Example literals. Empty for derived types until synthesis.
    pub examples: Vec<String>,
    /// Element type, for slices.
    pub element: Option<TypeId>,
    /// Name of the backing struct definition, for struct types.
    pub struct_name: Option<String>,
    /// Whether this is a builtin type.
    pub builtin: bool,
}

impl TypeInfo {
    fn from_standard(id: TypeId, builtin: &StandardType) -> Self {
        Self {
            id,
            name: builtin.name.to_string(),
            rust_type: builtin.rust_type.to_string(),
            kind: builtin.kind,
            override_style: builtin.override_style(),
            override_helper: builtin.override_helper.map(str::to_string),
            zero_value: Some(builtin.zero_value.to_string()),
            examples: builtin.examples.iter().map(|e| (*e).to_string()).collect(),
            element: None,
            struct_name: None,
            builtin: true,
        }
    }

    /// Returns true if this type was derived from the schema.
    #[must_use]
    pub fn is_derived(&self) -> bool {
        !self.builtin
    }
}

/// Registry of every type known while resolving one schema.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: Vec<TypeInfo>,
    by_name: HashMap<String, TypeId>,
    structs: BTreeMap<String, StructDefinition>,
}

impl TypeRegistry {
    /// Creates a registry holding the builtin types and the schema's structs.
    ///
    /// Nothing is resolved yet; see [`TypeRegistry::register_all`].
    #[must_use]
    pub fn new(schema: ConfigurationSchema) -> Self {
        let mut registry = Self {
            types: Vec::with_capacity(STANDARD_TYPES.len() + schema.related_types.len() + 1),
            by_name: HashMap::new(),
            structs: schema.related_types,
        };
        registry
            .structs
            .insert(CONFIGURATION.to_string(), schema.configuration);

        for builtin in &STANDARD_TYPES {
            let id = TypeId(registry.types.len());
            registry.types.push(TypeInfo::from_standard(id, builtin));
            registry.by_name.insert(builtin.name.to_string(), id);
        }
        for builtin in &STANDARD_TYPES {
            if let Some(element) = builtin.element {
                let element_id = registry.by_name.get(element).copied();
                if let Some(id) = registry.by_name.get(builtin.name).copied() {
                    registry.types[id.0].element = element_id;
                }
            }
        }
        registry
    }

    /// Registers `Configuration` and every related type, resolving all fields.
    ///
    /// # Errors
    /// Returns `SchemaError::InvalidTypeReference` for the first field whose
    /// type cannot be resolved.
    pub fn register_all(&mut self) -> Result<(), SchemaError> {
        self.ensure_derived_type(CONFIGURATION)?;
        let names: Vec<String> = self.related_type_names().map(str::to_string).collect();
        for name in names {
            self.ensure_derived_type(&name)?;
        }
        tracing::debug!(
            derived = self.derived_ids().count(),
            "registered configuration types"
        );
        Ok(())
    }

    /// Resolves the declared type of a field.
    ///
    /// Builtins match first, then slice notation (resolving the element
    /// first), then related types.
    ///
    /// # Errors
    /// Returns `SchemaError::InvalidTypeReference` naming the field if the
    /// type is unknown, or any error from resolving a related type's fields.
    pub fn resolve(&mut self, field: &str, declared: &str) -> Result<TypeId, SchemaError> {
        self.lookup(field, declared)?
            .ok_or_else(|| SchemaError::invalid_type(field, declared))
    }

    fn lookup(&mut self, field: &str, declared: &str) -> Result<Option<TypeId>, SchemaError> {
        if let Some(builtin) = standard_type(declared) {
            return Ok(self.by_name.get(builtin.name).copied());
        }
        if let Some(element) = slice_element(declared) {
            return match self.lookup(field, element)? {
                Some(id) if self.types[id.0].is_derived() => {
                    Ok(Some(self.ensure_slice_type(declared, id)))
                }
                _ => Ok(None),
            };
        }
        if self.is_related_type(declared) {
            return self.ensure_struct_type(declared).map(Some);
        }
        Ok(None)
    }

    /// Returns the type for a derived type name, creating it on first use.
    ///
    /// Slice names ensure their element type first; other names must be
    /// declared structs.
    ///
    /// # Errors
    /// Returns `SchemaError::Validation` if the name (or a slice's element)
    /// is not a declared struct, or any error from resolving its fields.
    pub fn ensure_derived_type(&mut self, name: &str) -> Result<TypeId, SchemaError> {
        match slice_element(name) {
            Some(element) => {
                let element_id = self.ensure_derived_type(element)?;
                Ok(self.ensure_slice_type(name, element_id))
            }
            None => self.ensure_struct_type(name),
        }
    }

    /// Returns the type for a related struct, creating it and resolving its
    /// fields on first use.
    ///
    /// The type is registered before its fields are resolved, so struct
    /// reference cycles terminate here and surface during example synthesis.
    ///
    /// # Errors
    /// Returns `SchemaError::Validation` if no struct has this name, or any
    /// error from resolving its fields.
    pub fn ensure_struct_type(&mut self, name: &str) -> Result<TypeId, SchemaError> {
        if let Some(&id) = self.by_name.get(name) {
            if self.types[id.0].is_derived() {
                return Ok(id);
            }
            return Err(SchemaError::validation(format!(
                "'{name}' is a builtin type, not a struct"
            )));
        }
        if !self.structs.contains_key(name) {
            return Err(SchemaError::validation(format!(
                "no struct definition named '{name}'"
            )));
        }

        let id = self.insert(TypeInfo {
            id: TypeId(0),
            name: name.to_string(),
            rust_type: to_pascal_case(name),
            kind: TypeKind::Struct,
            override_style: classify(TypeKind::Struct),
            override_helper: None,
            zero_value: None,
            examples: Vec::new(),
            element: None,
            struct_name: Some(name.to_string()),
            builtin: false,
        });

        let declared: Vec<(String, String)> = match self.structs.get_mut(name) {
            Some(def) => {
                def.type_id = Some(id);
                def.fields
                    .iter()
                    .map(|f| (f.name.clone(), f.type_name.clone()))
                    .collect()
            }
            None => Vec::new(),
        };
        tracing::trace!(type_name = name, fields = declared.len(), "registered struct type");

        let mut resolved = Vec::with_capacity(declared.len());
        for (field, type_name) in &declared {
            resolved.push(self.resolve(field, type_name)?);
        }
        if let Some(def) = self.structs.get_mut(name) {
            for (field, id) in def.fields.iter_mut().zip(resolved) {
                field.resolved = Some(id);
            }
        }
        Ok(id)
    }

    /// Returns the type for a slice of a derived type, creating it on first use.
    pub fn ensure_slice_type(&mut self, name: &str, element: TypeId) -> TypeId {
        if let Some(id) = self.by_name.get(name) {
            return *id;
        }
        let rust_type = format!("Vec<{}>", self.types[element.0].rust_type);
        let id = self.insert(TypeInfo {
            id: TypeId(0),
            name: name.to_string(),
            rust_type,
            kind: TypeKind::Slice,
            override_style: classify(TypeKind::Slice),
            override_helper: Some(slice_helper_name(name)),
            zero_value: Some("Vec::new()".to_string()),
            examples: Vec::new(),
            element: Some(element),
            struct_name: None,
            builtin: false,
        });
        tracing::trace!(type_name = name, "registered slice type");
        id
    }

    fn insert(&mut self, mut info: TypeInfo) -> TypeId {
        let id = TypeId(self.types.len());
        info.id = id;
        self.by_name.insert(info.name.clone(), id);
        self.types.push(info);
        id
    }

    /// Returns true if `name` is a related type declared by the schema.
    #[must_use]
    pub fn is_related_type(&self, name: &str) -> bool {
        name != CONFIGURATION && self.structs.contains_key(name)
    }

    /// Returns the related type names in sorted order.
    pub fn related_type_names(&self) -> impl Iterator<Item = &str> {
        self.structs
            .keys()
            .map(String::as_str)
            .filter(|name| *name != CONFIGURATION)
    }

    /// Returns the type with the given handle.
    ///
    /// # Panics
    /// Panics if the handle came from a different registry.
    #[must_use]
    pub fn get(&self, id: TypeId) -> &TypeInfo {
        &self.types[id.0]
    }

    /// Looks up a registered type by name.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&TypeInfo> {
        self.by_name.get(name).map(|id| &self.types[id.0])
    }

    /// Returns all registered types, builtins first, in registration order.
    #[must_use]
    pub fn types(&self) -> &[TypeInfo] {
        &self.types
    }

    /// Returns the handles of all derived types in registration order.
    pub fn derived_ids(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.types.iter().filter(|t| t.is_derived()).map(|t| t.id)
    }

    /// Returns the struct definition with the given name.
    #[must_use]
    pub fn struct_definition(&self, name: &str) -> Option<&StructDefinition> {
        self.structs.get(name)
    }

    /// Returns all struct definitions, sorted by name.
    #[must_use]
    pub fn structs(&self) -> &BTreeMap<String, StructDefinition> {
        &self.structs
    }

    pub(crate) fn set_examples(&mut self, id: TypeId, examples: Vec<String>) {
        self.types[id.0].examples = examples;
    }
}

/// Builds the helper function name for a slice type, e.g.
/// `[]Peter` becomes `override_peter_slice`.
#[must_use]
pub fn slice_helper_name(name: &str) -> String {
    let mut base = name;
    let mut depth = 0;
    while let Some(rest) = base.strip_prefix(SLICE_PREFIX) {
        base = rest;
        depth += 1;
    }
    format!("override_{}{}", to_snake_case(base), "_slice".repeat(depth))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldDefinition;

    fn field(name: &str, ty: &str) -> FieldDefinition {
        FieldDefinition::new(name, ty)
    }

    fn registry(config: Vec<FieldDefinition>, related: Vec<(&str, Vec<FieldDefinition>)>) -> TypeRegistry {
        let mut schema = ConfigurationSchema::new(StructDefinition::new(config));
        for (name, fields) in related {
            schema = schema.with_related(name, StructDefinition::new(fields));
        }
        TypeRegistry::new(schema)
    }

    #[test]
    fn test_builtins_preregistered() {
        let reg = registry(vec![], vec![]);
        for builtin in &STANDARD_TYPES {
            let ty = reg.get_by_name(builtin.name).expect("builtin missing");
            assert!(ty.builtin);
            assert_eq!(ty.examples.len(), builtin.examples.len());
        }
        assert_eq!(reg.derived_ids().count(), 0);
        let strings = reg.get_by_name("[]string").unwrap();
        assert_eq!(strings.element, reg.get_by_name("string").map(|t| t.id));
    }

    #[test]
    fn test_resolve_builtin() {
        let mut reg = registry(vec![], vec![]);
        let id = reg.resolve("a", "uint64").expect("should resolve");
        assert_eq!(reg.get(id).name, "uint64");
        assert_eq!(reg.get(id).override_style, OverrideStyle::ZeroValueCheck);
    }

    #[test]
    fn test_resolve_slice_registers_element() {
        let mut reg = registry(
            vec![],
            vec![("Peter", vec![field("a", "string"), field("b", "int")])],
        );
        let id = reg.resolve("peters", "[]Peter").expect("should resolve");
        let slice = reg.get(id);
        let element = reg.get_by_name("Peter").expect("element not registered");

        assert_eq!(slice.kind, TypeKind::Slice);
        assert_eq!(slice.element, Some(element.id));
        assert_eq!(slice.rust_type, "Vec<Peter>");
        assert_eq!(slice.override_helper.as_deref(), Some("override_peter_slice"));
        assert_ne!(slice.override_style, element.override_style);
        assert!(slice.struct_name.is_none());
    }

    #[test]
    fn test_same_name_same_type() {
        let mut reg = registry(
            vec![],
            vec![("Alice", vec![field("a", "string")])],
        );
        let first = reg.resolve("b", "Alice").unwrap();
        let second = reg.resolve("c", "Alice").unwrap();
        assert_eq!(first, second);

        let first = reg.resolve("d", "[]Alice").unwrap();
        let second = reg.resolve("e", "[]Alice").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_struct_back_reference() {
        let mut reg = registry(
            vec![field("b", "Bob")],
            vec![("Bob", vec![field("a", "int")])],
        );
        reg.register_all().expect("should register");

        let bob = reg.get_by_name("Bob").unwrap();
        let def = reg.struct_definition("Bob").unwrap();
        assert_eq!(def.type_id, Some(bob.id));
        assert_eq!(bob.struct_name.as_deref(), Some("Bob"));
        assert_eq!(def.fields[0].resolved, reg.get_by_name("int").map(|t| t.id));
    }

    #[test]
    fn test_invalid_reference_lists_builtins_only() {
        let mut reg = registry(
            vec![field("bob", "Alice")],
            vec![("Peter", vec![field("a", "string")])],
        );
        let err = reg.register_all().unwrap_err();
        let msg = err.to_string();

        assert!(msg.starts_with("Field bob has type Alice which isn't valid"));
        assert!(msg.contains("Duration"));
        assert!(!msg.contains("Peter"));
    }

    #[test]
    fn test_invalid_reference_in_related_type() {
        let mut reg = registry(
            vec![field("a", "Bob")],
            vec![("Bob", vec![field("bob", "Alice")])],
        );
        let err = reg.register_all().unwrap_err();
        assert!(err.to_string().starts_with("Field bob has type Alice which isn't valid"));
    }

    #[test]
    fn test_slice_of_unlisted_builtin_is_invalid() {
        let mut reg = registry(vec![], vec![]);
        let err = reg.resolve("flags", "[]bool").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidTypeReference { ref type_name, .. } if type_name == "[]bool"));
    }

    #[test]
    fn test_configuration_is_not_a_field_type() {
        let mut reg = registry(vec![], vec![]);
        assert!(reg.resolve("nested", "Configuration").is_err());
    }

    #[test]
    fn test_cycles_terminate() {
        let mut reg = registry(
            vec![field("a", "A")],
            vec![("A", vec![field("b", "B")]), ("B", vec![field("a", "A")])],
        );
        reg.register_all().expect("registration should not fail on cycles");
        assert_eq!(reg.derived_ids().count(), 3);
    }

    #[test]
    fn test_nested_slice() {
        let mut reg = registry(vec![], vec![("Peter", vec![field("a", "string")])]);
        let id = reg.resolve("grid", "[][]Peter").unwrap();
        let outer = reg.get(id);
        assert_eq!(outer.rust_type, "Vec<Vec<Peter>>");
        assert_eq!(outer.override_helper.as_deref(), Some("override_peter_slice_slice"));
        assert!(reg.get_by_name("[]Peter").is_some());
    }

    #[test]
    fn test_ensure_derived_type_is_idempotent() {
        let mut reg = registry(vec![], vec![("Peter", vec![field("a", "string")])]);
        let slice = reg.ensure_derived_type("[]Peter").expect("should ensure");
        let again = reg.ensure_derived_type("[]Peter").expect("should ensure");
        assert_eq!(slice, again);

        let element = reg.get(slice).element.expect("slice without element");
        assert_eq!(reg.ensure_derived_type("Peter").unwrap(), element);
        assert_eq!(reg.derived_ids().count(), 2);

        assert!(reg.ensure_derived_type("[]Nobody").is_err());
        assert!(reg.ensure_derived_type("string").is_err());
    }

    #[test]
    fn test_slice_helper_name() {
        assert_eq!(slice_helper_name("[]Peter"), "override_peter_slice");
        assert_eq!(slice_helper_name("[]string"), "override_string_slice");
        assert_eq!(slice_helper_name("[]TlsConfig"), "override_tls_config_slice");
    }
}
