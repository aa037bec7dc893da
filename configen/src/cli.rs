//! Argument handling and the generation run.

use crate::format::rustfmt;
use anyhow::{Context, Result, bail};
use clap::Parser;
use configen_codegen::{Generator, GeneratorOptions};
use configen_schema::{ResolvedSchema, load_schema};
use std::path::{Component, Path, PathBuf};

/// Generate configuration structs with override logic and tests from a definition file
#[derive(Parser, Debug)]
#[command(name = "configen", version, about)]
pub struct Cli {
    /// configuration definition file (JSON)
    #[arg(short = 'c', long = "config-def")]
    pub config_def: PathBuf,

    /// directory to write the generated files to
    #[arg(short, long, env = "CONFIGEN_DEST", default_value = ".")]
    pub dest: PathBuf,

    /// package name for the generated code [default: PackageName, else the destination directory name]
    #[arg(long, env = "CONFIGEN_PACKAGE")]
    pub package: Option<String>,

    /// skip running rustfmt on the generated files
    #[arg(long, default_value_t = false)]
    pub no_fmt: bool,

    /// log progress at debug level (RUST_LOG overrides)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Loads, resolves and generates, returning the written file paths.
pub fn run(args: &Cli) -> Result<Vec<PathBuf>> {
    if !args.config_def.exists() {
        bail!(
            "unable to find supplied configuration definition file: {}",
            args.config_def.display()
        );
    }

    let schema = load_schema(&args.config_def)?;
    let package_name = match (&args.package, &schema.package_name) {
        (Some(name), _) | (None, Some(name)) => name.clone(),
        (None, None) => default_package_name(&args.dest)?,
    };
    let resolved = ResolvedSchema::from_schema(schema)?;

    let options = GeneratorOptions {
        package_name: Some(package_name),
    };
    let files = Generator::new(&resolved, &options).generate()?;

    std::fs::create_dir_all(&args.dest)
        .with_context(|| format!("unable to create destination directory {}", args.dest.display()))?;
    let written = files.write_to(&args.dest)?;

    if !args.no_fmt {
        for path in &written {
            if let Err(e) = rustfmt(path) {
                tracing::warn!(path = %path.display(), "rustfmt failed: {e:#}");
            }
        }
    }

    tracing::info!(
        dest = %args.dest.display(),
        package = options.package_name.as_deref().unwrap_or_default(),
        "generated configuration code"
    );
    Ok(written)
}

/// Returns the default package name for a destination directory: its base name.
pub fn default_package_name(dir: &Path) -> Result<String> {
    let abs = dir
        .canonicalize()
        .or_else(|_| std::path::absolute(dir))
        .with_context(|| format!("unable to resolve destination directory {}", dir.display()))?;
    let name = abs
        .components()
        .rev()
        .find_map(|c| match c {
            Component::Normal(name) => name.to_str(),
            _ => None,
        })
        .with_context(|| format!("destination directory {} has no name", abs.display()))?;
    Ok(name.replace('-', "_"))
}
