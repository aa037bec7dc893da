//! Override style classification.
//!
//! Every resolved type is tagged with the strategy used when a secondary
//! configuration value is merged over a primary one.

use std::fmt;

/// Structural kind of a resolved type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Generated struct with named fields.
    Struct,
    /// Ordered collection of another type.
    Slice,
    /// Value that may be absent.
    Optional,
    /// Plain value with an intrinsic zero value.
    Scalar,
}

/// Merge strategy for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverrideStyle {
    /// Recurse field by field, delegating to each field's own style.
    StructMerge,
    /// Override iff the other side is present.
    PointerNilCheck,
    /// Override iff the other side differs from the type's zero value.
    ZeroValueCheck,
    /// Override iff the other side's collection is non-empty.
    LengthCheck,
    /// A tag outside the known set. Only produced by [`OverrideStyle::from_tag`].
    Unrecognized(u8),
}

/// Selects the override style for a type kind.
#[must_use]
pub const fn classify(kind: TypeKind) -> OverrideStyle {
    match kind {
        TypeKind::Struct => OverrideStyle::StructMerge,
        TypeKind::Slice => OverrideStyle::LengthCheck,
        TypeKind::Optional => OverrideStyle::PointerNilCheck,
        TypeKind::Scalar => OverrideStyle::ZeroValueCheck,
    }
}

impl OverrideStyle {
    /// Returns the numeric tag of this style.
    #[must_use]
    pub const fn tag(&self) -> u8 {
        match self {
            Self::StructMerge => 0,
            Self::PointerNilCheck => 1,
            Self::ZeroValueCheck => 2,
            Self::LengthCheck => 3,
            Self::Unrecognized(tag) => *tag,
        }
    }

    /// Parses a style from its numeric tag.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Self {
        match tag {
            0 => Self::StructMerge,
            1 => Self::PointerNilCheck,
            2 => Self::ZeroValueCheck,
            3 => Self::LengthCheck,
            other => Self::Unrecognized(other),
        }
    }

    /// Returns true if fields of this style need generated override code
    /// (a helper function or an `override_from` method) rather than an
    /// inline comparison.
    #[must_use]
    pub const fn requires_helper(&self) -> bool {
        matches!(self, Self::StructMerge | Self::LengthCheck)
    }

    /// Renders the guard deciding whether `value` overrides the destination.
    ///
    /// `zero` is the zero literal of the type, used by [`OverrideStyle::ZeroValueCheck`].
    /// Struct merges are unconditional and render as `true`.
    #[must_use]
    pub fn override_condition(&self, value: &str, zero: &str) -> String {
        match self {
            Self::StructMerge => "true".to_string(),
            Self::PointerNilCheck => format!("{value}.is_some()"),
            Self::ZeroValueCheck => format!("{value} != {zero}"),
            Self::LengthCheck => format!("!{value}.is_empty()"),
            Self::Unrecognized(_) => self.to_string(),
        }
    }
}

impl fmt::Display for OverrideStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StructMerge => f.write_str("struct-merge"),
            Self::PointerNilCheck => f.write_str("pointer-nil-check"),
            Self::ZeroValueCheck => f.write_str("zero-value-check"),
            Self::LengthCheck => f.write_str("length-check"),
            Self::Unrecognized(tag) => write!(f, "*UNEXPECTED_OVERRIDE_STYLE_{tag}"),
        }
    }
}
