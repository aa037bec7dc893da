//! Example value synthesis.
//!
//! Every derived type gets six example literals used by the generated test
//! fixtures: three fully populated values followed by three values that only
//! populate a prefix of the fields. A type can only be built once all of its
//! field types have examples, so types are retried in passes until no type
//! is left waiting or the pass limit shows the graph has a cycle.

use crate::classify::TypeKind;
use crate::error::SchemaError;
use crate::ir::rust_field_name;
use crate::registry::{TypeId, TypeRegistry};

/// Number of examples produced for each derived type.
pub const DERIVED_EXAMPLE_COUNT: usize = 6;

/// Number of fully populated examples; the rest are partial.
pub const FULL_EXAMPLE_COUNT: usize = 3;

/// Builds example pools for every derived type in a registry.
pub struct ExampleSynthesizer<'a> {
    registry: &'a mut TypeRegistry,
}

impl<'a> ExampleSynthesizer<'a> {
    /// Creates a synthesizer over a fully registered type graph.
    #[must_use]
    pub fn new(registry: &'a mut TypeRegistry) -> Self {
        Self { registry }
    }

    /// Populates the examples of every derived type.
    ///
    /// Runs at most one pass more than there are derived types; an acyclic
    /// graph always completes within that bound.
    ///
    /// # Errors
    /// Returns `SchemaError::UnresolvableExampleDependency` listing every
    /// type still without examples when the bound is reached.
    pub fn synthesize(self) -> Result<(), SchemaError> {
        let derived: Vec<TypeId> = self.registry.derived_ids().collect();
        let max_passes = derived.len() + 1;

        for pass in 1..=max_passes {
            let mut completed = true;
            for &id in &derived {
                if !self.registry.get(id).examples.is_empty() {
                    continue;
                }
                match build_examples(self.registry, id) {
                    Some(examples) => self.registry.set_examples(id, examples),
                    None => completed = false,
                }
            }
            tracing::trace!(pass, completed, "example synthesis pass");
            if completed {
                tracing::debug!(passes = pass, types = derived.len(), "synthesized examples");
                return Ok(());
            }
        }

        let mut missing: Vec<String> = derived
            .iter()
            .map(|id| self.registry.get(*id))
            .filter(|t| t.examples.is_empty())
            .map(|t| t.name.clone())
            .collect();
        missing.sort();
        Err(SchemaError::UnresolvableExampleDependency {
            passes: max_passes,
            missing,
        })
    }
}

/// Builds the examples for one type, or `None` if a dependency has none yet.
fn build_examples(registry: &TypeRegistry, id: TypeId) -> Option<Vec<String>> {
    let info = registry.get(id);
    match info.kind {
        TypeKind::Slice => {
            let element = registry.get(info.element?);
            if element.examples.is_empty() {
                return None;
            }
            let pool = &element.examples;
            Some(
                (0..DERIVED_EXAMPLE_COUNT)
                    .map(|i| format!("vec![{}]", pool[i % pool.len()]))
                    .collect(),
            )
        }
        TypeKind::Struct => {
            let def = registry.struct_definition(info.struct_name.as_deref()?)?;
            let mut fields = Vec::with_capacity(def.fields.len());
            for field in &def.fields {
                let pool = &registry.get(field.resolved?).examples;
                if pool.is_empty() {
                    return None;
                }
                fields.push((rust_field_name(&field.name), pool));
            }

            let literal = |slot: usize, count: usize| {
                let values: Vec<String> = fields
                    .iter()
                    .take(count)
                    .map(|(name, pool)| format!("{name}: {}", pool[slot % pool.len()]))
                    .collect();
                let rest = if count < fields.len() {
                    "..Default::default()"
                } else {
                    ""
                };
                let body = [values.join(", "), rest.to_string()]
                    .into_iter()
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>()
                    .join(", ");
                if body.is_empty() {
                    format!("{} {{}}", info.rust_type)
                } else {
                    format!("{} {{ {body} }}", info.rust_type)
                }
            };

            let mut examples = Vec::with_capacity(DERIVED_EXAMPLE_COUNT);
            for slot in 0..FULL_EXAMPLE_COUNT {
                examples.push(literal(slot, fields.len()));
            }
            for slot in 0..DERIVED_EXAMPLE_COUNT - FULL_EXAMPLE_COUNT {
                examples.push(literal(slot, slot + 1));
            }
            Some(examples)
        }
        // builtins have fixed pools
        TypeKind::Optional | TypeKind::Scalar => Some(info.examples.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConfigurationSchema, FieldDefinition, StructDefinition};

    fn registered(
        config: Vec<(&str, &str)>,
        related: Vec<(&str, Vec<(&str, &str)>)>,
    ) -> TypeRegistry {
        let fields = |list: Vec<(&str, &str)>| {
            list.into_iter()
                .map(|(n, t)| FieldDefinition::new(n, t))
                .collect::<Vec<_>>()
        };
        let mut schema = ConfigurationSchema::new(StructDefinition::new(fields(config)));
        for (name, list) in related {
            schema = schema.with_related(name, StructDefinition::new(fields(list)));
        }
        let mut reg = TypeRegistry::new(schema);
        reg.register_all().expect("should register");
        reg
    }

    #[test]
    fn test_struct_examples() {
        let mut reg = registered(vec![("Name", "string"), ("Port", "int")], vec![]);
        ExampleSynthesizer::new(&mut reg).synthesize().expect("should synthesize");

        let config = reg.get_by_name("Configuration").unwrap();
        assert_eq!(config.examples.len(), DERIVED_EXAMPLE_COUNT);
        assert_eq!(
            config.examples[0],
            "Configuration { name: String::from(\"one\"), port: 42 }"
        );
        assert_eq!(
            config.examples[1],
            "Configuration { name: String::from(\"two\"), port: -7 }"
        );
        assert_eq!(
            config.examples[3],
            "Configuration { name: String::from(\"one\"), ..Default::default() }"
        );
        assert_eq!(
            config.examples[4],
            "Configuration { name: String::from(\"two\"), port: -7 }"
        );
        assert_eq!(config.examples[5], config.examples[2]);
    }

    #[test]
    fn test_slice_wraps_element_examples() {
        let mut reg = registered(
            vec![("peters", "[]Peter")],
            vec![("Peter", vec![("a", "string"), ("b", "uint64")])],
        );
        ExampleSynthesizer::new(&mut reg).synthesize().expect("should synthesize");

        let peter = reg.get_by_name("Peter").unwrap();
        let slice = reg.get_by_name("[]Peter").unwrap();
        assert_eq!(slice.examples.len(), DERIVED_EXAMPLE_COUNT);
        for (wrapped, inner) in slice.examples.iter().zip(&peter.examples) {
            assert_eq!(*wrapped, format!("vec![{inner}]"));
        }
    }

    #[test]
    fn test_nested_dependencies_resolve() {
        let mut reg = registered(
            vec![("a", "A")],
            vec![
                ("A", vec![("b", "B")]),
                ("B", vec![("c", "C")]),
                ("C", vec![("d", "D")]),
                ("D", vec![("e", "string")]),
            ],
        );
        ExampleSynthesizer::new(&mut reg).synthesize().expect("chain should resolve");
        for id in reg.derived_ids().collect::<Vec<_>>() {
            assert_eq!(reg.get(id).examples.len(), DERIVED_EXAMPLE_COUNT);
        }
        let config = reg.get_by_name("Configuration").unwrap();
        assert!(config.examples[0].contains("A { b: B { c: C { d: D { e: String::from(\"one\") } } } }"));
    }

    #[test]
    fn test_cycle_is_unresolvable() {
        let mut reg = registered(
            vec![("a", "A"), ("n", "int")],
            vec![("A", vec![("b", "B")]), ("B", vec![("a", "A")])],
        );
        let err = ExampleSynthesizer::new(&mut reg).synthesize().unwrap_err();
        match err {
            SchemaError::UnresolvableExampleDependency { passes, missing } => {
                assert_eq!(passes, 4);
                assert_eq!(missing, vec!["A", "B", "Configuration"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_struct() {
        let mut reg = registered(vec![], vec![]);
        ExampleSynthesizer::new(&mut reg).synthesize().expect("should synthesize");
        let config = reg.get_by_name("Configuration").unwrap();
        assert_eq!(config.examples.len(), DERIVED_EXAMPLE_COUNT);
        assert!(config.examples.iter().all(|e| e == "Configuration {}"));
    }

    #[test]
    fn test_builtins_untouched() {
        let mut reg = registered(vec![("a", "int")], vec![]);
        let before = reg.get_by_name("int").unwrap().examples.clone();
        ExampleSynthesizer::new(&mut reg).synthesize().expect("should synthesize");
        assert_eq!(reg.get_by_name("int").unwrap().examples, before);
    }
}
