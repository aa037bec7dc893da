//! Override test fixture generation.
//!
//! Each struct gets an examples function built from its synthesized example
//! values plus three tests exercising `override_from`.

use super::struct_type;
use crate::error::CodegenError;
use configen_schema::ir::to_snake_case;
use configen_schema::{ResolvedSchema, StructDefinition};

/// Generator for the override tests of each struct.
pub struct FixtureGenerator<'a> {
    schema: &'a ResolvedSchema,
}

impl<'a> FixtureGenerator<'a> {
    /// Creates a new fixture generator.
    #[must_use]
    pub fn new(schema: &'a ResolvedSchema) -> Self {
        Self { schema }
    }

    /// Generates the examples function and tests for a struct.
    ///
    /// # Errors
    /// Returns `CodegenError` if the struct is unresolved or has no examples.
    pub fn generate(&self, name: &str, def: &StructDefinition) -> Result<String, CodegenError> {
        let mut output = String::new();
        let info = struct_type(self.schema, name, def)?;
        if info.examples.is_empty() {
            return Err(CodegenError::generation(format!(
                "struct '{name}' has no example values"
            )));
        }
        let rust_type = &info.rust_type;
        let prefix = to_snake_case(rust_type);

        output.push_str(&format!("fn {prefix}_examples() -> Vec<{rust_type}> {{\n"));
        output.push_str("    vec![\n");
        for example in &info.examples {
            output.push_str(&format!("        {example},\n"));
        }
        output.push_str("    ]\n");
        output.push_str("}\n\n");

        output.push_str("#[test]\n");
        output.push_str(&format!("fn test_{prefix}_override_from_default() {{\n"));
        output.push_str(&format!("    for example in {prefix}_examples() {{\n"));
        output.push_str(&format!("        let mut value = {rust_type}::default();\n"));
        output.push_str("        value.override_from(&example);\n");
        output.push_str("        assert_eq!(value, example);\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output.push_str("#[test]\n");
        output.push_str(&format!("fn test_{prefix}_override_with_default_is_noop() {{\n"));
        output.push_str(&format!("    for example in {prefix}_examples() {{\n"));
        output.push_str("        let mut value = example.clone();\n");
        output.push_str(&format!(
            "        value.override_from(&{rust_type}::default());\n"
        ));
        output.push_str("        assert_eq!(value, example);\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output.push_str("#[test]\n");
        output.push_str(&format!("fn test_{prefix}_override_replaces_set_fields() {{\n"));
        output.push_str(&format!("    let examples = {prefix}_examples();\n"));
        output.push_str("    let mut value = examples[0].clone();\n");
        output.push_str("    value.override_from(&examples[1]);\n");
        output.push_str("    assert_eq!(value, examples[1]);\n");
        output.push_str("}\n\n");

        Ok(output)
    }
}
