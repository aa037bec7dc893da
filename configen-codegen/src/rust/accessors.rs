//! Accessor trait generation for structs declared `WithGetter`.

use super::{doc_comment, field_type, struct_type};
use crate::error::CodegenError;
use configen_schema::ir::rust_field_name;
use configen_schema::{ResolvedSchema, StructDefinition, TypeInfo, TypeKind};

/// Generator for `<Struct>Config` accessor traits.
pub struct AccessorGenerator<'a> {
    schema: &'a ResolvedSchema,
}

impl<'a> AccessorGenerator<'a> {
    /// Creates a new accessor generator.
    #[must_use]
    pub fn new(schema: &'a ResolvedSchema) -> Self {
        Self { schema }
    }

    /// Generates the accessor trait for a struct and its implementation.
    ///
    /// # Errors
    /// Returns `CodegenError` if the struct or one of its fields is unresolved.
    pub fn generate(&self, name: &str, def: &StructDefinition) -> Result<String, CodegenError> {
        let mut output = String::new();
        let info = struct_type(self.schema, name, def)?;
        let trait_name = format!("{}Config", info.rust_type);

        let mut methods = Vec::with_capacity(def.fields.len());
        for field in &def.fields {
            let ty = field_type(self.schema, field)?;
            let (return_type, body) = self.accessor(&rust_field_name(&field.name), ty);
            methods.push((field, return_type, body));
        }

        output.push_str(&doc_comment(&def.comment_lines(), ""));
        output.push_str(&format!("pub trait {trait_name} {{\n"));
        for (field, return_type, _) in &methods {
            output.push_str(&doc_comment(&field.comment_lines(), "    "));
            output.push_str(&format!(
                "    fn {}(&self) -> {return_type};\n",
                method_name(&field.name)
            ));
        }
        output.push_str("}\n\n");

        output.push_str(&format!("impl {trait_name} for {} {{\n", info.rust_type));
        for (field, return_type, body) in &methods {
            output.push_str(&format!(
                "    fn {}(&self) -> {return_type} {{\n",
                method_name(&field.name)
            ));
            output.push_str(&format!("        {body}\n"));
            output.push_str("    }\n");
        }
        output.push_str("}\n\n");

        Ok(output)
    }

    /// Returns the accessor return type and body for a field.
    fn accessor(&self, field: &str, ty: &TypeInfo) -> (String, String) {
        match ty.kind {
            TypeKind::Struct => (format!("&{}", ty.rust_type), format!("&self.{field}")),
            TypeKind::Slice => {
                let element = ty
                    .element
                    .map(|id| self.schema.type_info(id).rust_type.clone())
                    .unwrap_or_else(|| "_".to_string());
                (format!("&[{element}]"), format!("&self.{field}"))
            }
            TypeKind::Optional => {
                let inner = ty
                    .rust_type
                    .strip_prefix("Option<")
                    .and_then(|s| s.strip_suffix('>'))
                    .unwrap_or(&ty.rust_type);
                (inner.to_string(), format!("self.{field}.unwrap_or_default()"))
            }
            TypeKind::Scalar if ty.rust_type == "String" => {
                ("&str".to_string(), format!("&self.{field}"))
            }
            TypeKind::Scalar => (ty.rust_type.clone(), format!("self.{field}")),
        }
    }
}

/// Accessor method name: the snake_case field name without a raw prefix.
fn method_name(field: &str) -> String {
    let name = rust_field_name(field);
    match name.strip_prefix("r#") {
        Some(keyword) => format!("{keyword}_value"),
        None => name,
    }
}
