//! Struct and `override_from` code generation.

use super::{doc_comment, field_type, struct_type};
use crate::error::CodegenError;
use configen_schema::ir::rust_field_name;
use configen_schema::{OverrideStyle, ResolvedSchema, StructDefinition, TypeInfo};

/// Generator for configuration structs and their merge methods.
pub struct StructGenerator<'a> {
    schema: &'a ResolvedSchema,
}

impl<'a> StructGenerator<'a> {
    /// Creates a new struct generator.
    #[must_use]
    pub fn new(schema: &'a ResolvedSchema) -> Self {
        Self { schema }
    }

    /// Generates the struct definition and its `override_from` method.
    ///
    /// # Errors
    /// Returns `CodegenError` if the struct or one of its fields is unresolved.
    pub fn generate(&self, name: &str, def: &StructDefinition) -> Result<String, CodegenError> {
        let mut output = self.generate_struct(name, def)?;
        output.push_str(&self.generate_override(name, def)?);
        Ok(output)
    }

    fn generate_struct(&self, name: &str, def: &StructDefinition) -> Result<String, CodegenError> {
        let mut output = String::new();
        let info = struct_type(self.schema, name, def)?;

        output.push_str(&doc_comment(&def.comment_lines(), ""));
        output.push_str(
            "#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]\n",
        );
        output.push_str("#[serde(default)]\n");
        output.push_str(&format!("pub struct {} {{\n", info.rust_type));

        for field in &def.fields {
            let ty = field_type(self.schema, field)?;
            output.push_str(&doc_comment(&field.comment_lines(), "    "));
            output.push_str(&format!("    #[serde(rename = \"{}\")]\n", field.name));
            output.push_str(&format!(
                "    pub {}: {},\n",
                rust_field_name(&field.name),
                ty.rust_type
            ));
        }

        output.push_str("}\n\n");
        Ok(output)
    }

    fn generate_override(&self, name: &str, def: &StructDefinition) -> Result<String, CodegenError> {
        let mut output = String::new();
        let info = struct_type(self.schema, name, def)?;
        let other = if def.fields.is_empty() { "_other" } else { "other" };

        output.push_str(&format!("impl {} {{\n", info.rust_type));
        output.push_str("    /// Overrides fields of `self` with the fields of `other` that are set.\n");
        output.push_str(&format!(
            "    pub fn override_from(&mut self, {other}: &Self) {{\n"
        ));

        for field in &def.fields {
            let ty = field_type(self.schema, field)?;
            output.push_str(&override_statement(&rust_field_name(&field.name), ty)?);
        }

        output.push_str("    }\n");
        output.push_str("}\n\n");
        Ok(output)
    }
}

/// Renders the statement merging one field.
fn override_statement(field: &str, ty: &TypeInfo) -> Result<String, CodegenError> {
    let statement = match ty.override_style {
        OverrideStyle::StructMerge => {
            format!("        self.{field}.override_from(&other.{field});\n")
        }
        OverrideStyle::LengthCheck => {
            let helper = ty.override_helper.as_deref().ok_or_else(|| {
                CodegenError::generation(format!("slice type '{}' has no override helper", ty.name))
            })?;
            format!("        {helper}(&mut self.{field}, &other.{field});\n")
        }
        OverrideStyle::PointerNilCheck | OverrideStyle::ZeroValueCheck => {
            let zero = ty.zero_value.as_deref().unwrap_or("Default::default()");
            let condition = ty
                .override_style
                .override_condition(&format!("other.{field}"), zero);
            format!(
                "        if {condition} {{\n            self.{field}.clone_from(&other.{field});\n        }}\n"
            )
        }
        OverrideStyle::Unrecognized(_) => {
            tracing::error!(type_name = %ty.name, style = %ty.override_style, "unrecognized override style");
            format!("        {}\n", ty.override_style)
        }
    };
    Ok(statement)
}
