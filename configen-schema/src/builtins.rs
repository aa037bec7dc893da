//! Builtin types available to every configuration definition.
//!
//! The set is closed: a field type is either one of these names, a related
//! type declared by the schema, or a slice of a related type.

use crate::classify::{OverrideStyle, TypeKind, classify};

/// A builtin type with a fixed override style and example pool.
#[derive(Debug, Clone, Copy)]
pub struct StandardType {
    /// Name as written in a configuration definition.
    pub name: &'static str,
    /// Rust type emitted for fields of this type.
    pub rust_type: &'static str,
    /// Structural kind.
    pub kind: TypeKind,
    /// Zero value literal.
    pub zero_value: &'static str,
    /// Element builtin name, for slice builtins.
    pub element: Option<&'static str>,
    /// Override helper function name, for slice builtins.
    pub override_helper: Option<&'static str>,
    /// Example literals, none of which equal the zero value.
    pub examples: &'static [&'static str],
}

impl StandardType {
    /// Returns the override style for this builtin.
    #[must_use]
    pub const fn override_style(&self) -> OverrideStyle {
        classify(self.kind)
    }
}

const fn scalar(
    name: &'static str,
    rust_type: &'static str,
    zero_value: &'static str,
    examples: &'static [&'static str],
) -> StandardType {
    StandardType {
        name,
        rust_type,
        kind: TypeKind::Scalar,
        zero_value,
        element: None,
        override_helper: None,
        examples,
    }
}

const fn slice(
    name: &'static str,
    rust_type: &'static str,
    element: &'static str,
    override_helper: &'static str,
    examples: &'static [&'static str],
) -> StandardType {
    StandardType {
        name,
        rust_type,
        kind: TypeKind::Slice,
        zero_value: "Vec::new()",
        element: Some(element),
        override_helper: Some(override_helper),
        examples,
    }
}

/// All builtin types, in the order their names are reported.
pub static STANDARD_TYPES: [StandardType; 13] = [
    scalar(
        "string",
        "String",
        "\"\"",
        &[
            "String::from(\"one\")",
            "String::from(\"two\")",
            "String::from(\"three\")",
        ],
    ),
    scalar("int", "i64", "0", &["42", "-7", "1024"]),
    scalar("int64", "i64", "0", &["9_000_000_000", "-12", "77"]),
    scalar("uint", "u64", "0", &["3", "600", "12345"]),
    scalar("uint64", "u64", "0", &["18_000_000_000", "1", "65535"]),
    scalar("float64", "f64", "0.0", &["1.5", "-0.25", "1e6"]),
    scalar("bool", "bool", "false", &["true", "true", "true"]),
    StandardType {
        name: "*bool",
        rust_type: "Option<bool>",
        kind: TypeKind::Optional,
        zero_value: "None",
        element: None,
        override_helper: None,
        examples: &["Some(true)", "Some(false)", "Some(true)"],
    },
    scalar(
        "Duration",
        "Duration",
        "Duration::ZERO",
        &[
            "Duration::from_secs(30)",
            "Duration::from_millis(250)",
            "Duration::from_secs(3600)",
        ],
    ),
    slice(
        "[]string",
        "Vec<String>",
        "string",
        "override_string_slice",
        &[
            "vec![String::from(\"a\")]",
            "vec![String::from(\"b\"), String::from(\"c\")]",
            "vec![String::from(\"d\")]",
        ],
    ),
    slice(
        "[]int",
        "Vec<i64>",
        "int",
        "override_int_slice",
        &["vec![1]", "vec![2, 3]", "vec![-4]"],
    ),
    slice(
        "[]int64",
        "Vec<i64>",
        "int64",
        "override_int64_slice",
        &["vec![10]", "vec![20, 30]", "vec![-40]"],
    ),
    slice(
        "[]uint64",
        "Vec<u64>",
        "uint64",
        "override_uint64_slice",
        &["vec![100]", "vec![200, 300]", "vec![400]"],
    ),
];

/// Looks up a builtin type by name.
#[must_use]
pub fn standard_type(name: &str) -> Option<&'static StandardType> {
    STANDARD_TYPES.iter().find(|t| t.name == name)
}

/// Returns the names of all builtin types.
#[must_use]
pub fn standard_type_names() -> Vec<&'static str> {
    STANDARD_TYPES.iter().map(|t| t.name).collect()
}
