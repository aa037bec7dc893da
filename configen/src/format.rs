//! Post-formatting of generated files.

use anyhow::{Context, Result, bail};
use std::path::Path;
use std::process::Command;

/// Runs `rustfmt` on a generated file in place.
pub fn rustfmt(path: &Path) -> Result<()> {
    let output = Command::new("rustfmt")
        .arg("--edition")
        .arg("2024")
        .arg(path)
        .output()
        .context("unable to run rustfmt")?;
    if !output.status.success() {
        bail!("{}", String::from_utf8_lossy(&output.stderr).trim());
    }
    tracing::debug!(path = %path.display(), "formatted generated file");
    Ok(())
}
