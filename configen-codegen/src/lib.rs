//! # Configen Codegen
//!
//! Code generation from configuration definitions.
//!
//! This crate provides:
//! - Rust struct generation for the configuration and related types
//! - `override_from` merge methods and slice override helpers
//! - Accessor traits for structs that request them
//! - Override test fixtures built from synthesized example values

pub mod error;
pub mod generator;
pub mod rust;

pub use error::CodegenError;
pub use generator::{CONFIG_FILE, GeneratedFiles, Generator, GeneratorOptions, TESTS_FILE};

use configen_schema::ResolvedSchema;

/// Generates Rust code from a configuration definition JSON string.
///
/// # Arguments
/// * `json` - Configuration definition content
/// * `options` - Generation options
///
/// # Returns
/// Generated source files.
///
/// # Errors
/// Returns `CodegenError` if parsing, resolution, or generation fails.
pub fn generate_from_json(
    json: &str,
    options: &GeneratorOptions,
) -> Result<GeneratedFiles, CodegenError> {
    let schema = configen_schema::parse_schema(json)?;
    let resolved = ResolvedSchema::from_schema(schema)?;
    Generator::new(&resolved, options).generate()
}

/// Generates Rust code from a configuration definition file.
///
/// # Arguments
/// * `path` - Path to the configuration definition file
/// * `options` - Generation options
///
/// # Returns
/// Generated source files.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, resolution, or generation fails.
pub fn generate_from_file(
    path: &std::path::Path,
    options: &GeneratorOptions,
) -> Result<GeneratedFiles, CodegenError> {
    let schema = configen_schema::load_schema(path)?;
    let resolved = ResolvedSchema::from_schema(schema)?;
    Generator::new(&resolved, options).generate()
}
