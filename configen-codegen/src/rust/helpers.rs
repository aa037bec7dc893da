//! Slice override helper generation.

use crate::error::CodegenError;
use configen_schema::{OverrideStyle, ResolvedSchema, TypeInfo};

/// Generator for the free functions that merge slice fields.
pub struct HelperGenerator<'a> {
    schema: &'a ResolvedSchema,
}

impl<'a> HelperGenerator<'a> {
    /// Creates a new helper generator.
    #[must_use]
    pub fn new(schema: &'a ResolvedSchema) -> Self {
        Self { schema }
    }

    /// Generates the free helper functions for the schema's helper list, in
    /// name order.
    ///
    /// Struct types merge through the `override_from` method emitted with
    /// the struct, so only length-checked types get a function here.
    ///
    /// # Errors
    /// Returns `CodegenError` if a helper type has no helper name or a style
    /// that needs no helper.
    pub fn generate(&self) -> Result<String, CodegenError> {
        let mut output = String::new();
        for ty in self.schema.helpers() {
            match ty.override_style {
                OverrideStyle::StructMerge => {}
                OverrideStyle::LengthCheck => output.push_str(&self.generate_helper(ty)?),
                style => {
                    return Err(CodegenError::generation(format!(
                        "type '{}' with style {style} has no override helper",
                        ty.name
                    )));
                }
            }
        }
        Ok(output)
    }

    fn generate_helper(&self, ty: &TypeInfo) -> Result<String, CodegenError> {
        let mut output = String::new();
        let helper = ty.override_helper.as_deref().ok_or_else(|| {
            CodegenError::generation(format!("slice type '{}' has no override helper", ty.name))
        })?;
        let element = ty
            .element
            .map(|id| self.schema.type_info(id).rust_type.as_str())
            .unwrap_or("_");
        let condition = ty.override_style.override_condition("other", "");

        output.push_str(&format!(
            "/// Replaces `dest` with `other` when `other` is not empty (`{}`).\n",
            ty.name
        ));
        output.push_str(&format!(
            "fn {helper}(dest: &mut {}, other: &[{element}]) {{\n",
            ty.rust_type
        ));
        output.push_str(&format!("    if {condition} {{\n"));
        output.push_str("        *dest = other.to_vec();\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");
        Ok(output)
    }
}
