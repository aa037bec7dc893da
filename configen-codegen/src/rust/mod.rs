//! Rust code generation modules.

pub mod accessors;
pub mod fixtures;
pub mod helpers;
pub mod structs;

pub use accessors::AccessorGenerator;
pub use fixtures::FixtureGenerator;
pub use helpers::HelperGenerator;
pub use structs::StructGenerator;

use crate::error::CodegenError;
use configen_schema::{FieldDefinition, ResolvedSchema, StructDefinition, TypeInfo};

/// Returns the resolved type of a struct definition.
pub(crate) fn struct_type<'a>(
    schema: &'a ResolvedSchema,
    name: &str,
    def: &StructDefinition,
) -> Result<&'a TypeInfo, CodegenError> {
    schema
        .struct_type(def)
        .ok_or_else(|| CodegenError::generation(format!("struct '{name}' was never registered")))
}

/// Returns the resolved type of a field.
pub(crate) fn field_type<'a>(
    schema: &'a ResolvedSchema,
    field: &FieldDefinition,
) -> Result<&'a TypeInfo, CodegenError> {
    schema
        .field_type(field)
        .ok_or_else(|| CodegenError::unknown_type(&field.name, &field.type_name))
}

/// Renders comment lines as `///` documentation at the given indent.
pub(crate) fn doc_comment(lines: &[&str], indent: &str) -> String {
    let mut output = String::new();
    for line in lines {
        if line.is_empty() {
            output.push_str(&format!("{indent}///\n"));
        } else {
            output.push_str(&format!("{indent}/// {line}\n"));
        }
    }
    output
}
