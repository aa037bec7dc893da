//! Top-level code generator.

use crate::error::CodegenError;
use crate::rust::{AccessorGenerator, FixtureGenerator, HelperGenerator, StructGenerator};
use configen_schema::ResolvedSchema;
use std::path::{Path, PathBuf};

/// File name of the generated configuration types.
pub const CONFIG_FILE: &str = "config.rs";

/// File name of the generated override tests.
pub const TESTS_FILE: &str = "config_tests.rs";

/// Builtin type rendered as `std::time::Duration`.
const DURATION_TYPE: &str = "Duration";

/// Package name used when neither the options nor the definition name one.
const DEFAULT_PACKAGE: &str = "config";

/// Options controlling code generation.
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
    /// Package name, taking precedence over the definition's `PackageName`.
    pub package_name: Option<String>,
}

/// Generated source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFiles {
    /// Configuration types, merge logic and accessors.
    pub config: String,
    /// Override tests for the configuration types.
    pub tests: String,
}

impl GeneratedFiles {
    /// Writes both files into `dir`, returning their paths.
    ///
    /// # Errors
    /// Returns `CodegenError::Io` if a file cannot be written.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>, CodegenError> {
        let mut written = Vec::with_capacity(2);
        for (name, contents) in [(CONFIG_FILE, &self.config), (TESTS_FILE, &self.tests)] {
            let path = dir.join(name);
            std::fs::write(&path, contents)?;
            tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote generated file");
            written.push(path);
        }
        Ok(written)
    }
}

/// Main code generator.
pub struct Generator<'a> {
    schema: &'a ResolvedSchema,
    options: &'a GeneratorOptions,
}

impl<'a> Generator<'a> {
    /// Creates a new generator for a resolved definition.
    #[must_use]
    pub fn new(schema: &'a ResolvedSchema, options: &'a GeneratorOptions) -> Self {
        Self { schema, options }
    }

    /// Returns the package name for the generated code.
    #[must_use]
    pub fn package_name(&self) -> &str {
        self.options
            .package_name
            .as_deref()
            .or(self.schema.package_name.as_deref())
            .unwrap_or(DEFAULT_PACKAGE)
    }

    /// Generates the configuration and test sources.
    ///
    /// # Errors
    /// Returns `CodegenError` if the resolved definition is inconsistent.
    pub fn generate(&self) -> Result<GeneratedFiles, CodegenError> {
        let files = GeneratedFiles {
            config: self.generate_config()?,
            tests: self.generate_tests()?,
        };
        tracing::debug!(package = self.package_name(), "generated configuration code");
        Ok(files)
    }

    fn generate_config(&self) -> Result<String, CodegenError> {
        let mut output = String::new();

        output.push_str(&format!(
            "//! Configuration types for package `{}`.\n",
            self.package_name()
        ));
        output.push_str("//!\n");
        output.push_str("//! Generated by configen. Do not edit.\n\n");

        if self.uses_duration() {
            output.push_str("use std::time::Duration;\n\n");
        }

        let structs = StructGenerator::new(self.schema);
        let accessors = AccessorGenerator::new(self.schema);
        for (name, def) in self.schema.structs() {
            output.push_str(&structs.generate(name, def)?);
            if def.with_getter {
                output.push_str(&accessors.generate(name, def)?);
            }
        }

        output.push_str(&HelperGenerator::new(self.schema).generate()?);

        output.push_str("#[cfg(test)]\n");
        output.push_str(&format!("#[path = \"{TESTS_FILE}\"]\n"));
        output.push_str("mod tests;\n");

        Ok(output)
    }

    fn generate_tests(&self) -> Result<String, CodegenError> {
        let mut output = String::new();

        output.push_str(&format!(
            "//! Override tests for package `{}`.\n",
            self.package_name()
        ));
        output.push_str("//!\n");
        output.push_str("//! Generated by configen. Do not edit.\n\n");
        output.push_str("use super::*;\n\n");

        let fixtures = FixtureGenerator::new(self.schema);
        for (name, def) in self.schema.structs() {
            output.push_str(&fixtures.generate(name, def)?);
        }

        Ok(output)
    }

    fn uses_duration(&self) -> bool {
        self.schema.structs().values().any(|def| {
            def.fields.iter().any(|field| {
                self.schema
                    .field_type(field)
                    .is_some_and(|t| t.builtin && t.name == DURATION_TYPE)
            })
        })
    }
}
