//! # Configen Schema
//!
//! Configuration definition schema and type graph resolution.
//!
//! This crate provides:
//! - JSON loading of configuration definition files
//! - Schema validation
//! - Type resolution against builtin and related types
//! - Override style classification
//! - Example value synthesis for generated test fixtures
//! - A resolved representation for code generation

pub mod builtins;
pub mod classify;
pub mod error;
pub mod examples;
pub mod ir;
pub mod parser;
pub mod registry;
pub mod types;
pub mod validation;

pub use builtins::{STANDARD_TYPES, StandardType, standard_type, standard_type_names};
pub use classify::{OverrideStyle, TypeKind, classify};
pub use error::{ParseError, SchemaError};
pub use examples::ExampleSynthesizer;
pub use ir::ResolvedSchema;
pub use parser::{load_schema, parse_schema};
pub use registry::{TypeId, TypeInfo, TypeRegistry};
pub use types::{CONFIGURATION, ConfigurationSchema, FieldDefinition, SLICE_PREFIX, StructDefinition};
