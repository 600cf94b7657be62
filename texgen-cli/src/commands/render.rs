//! `texgen render <src> <out>` — render every template into an output tree.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use texgen_renderer::{load, render_all};

use super::{resolve_config, DataArgs};

/// Arguments for `texgen render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Directory holding the templates.
    pub source: PathBuf,

    /// Directory the rendered files are written to (mirrors `source`).
    pub output: PathBuf,

    #[command(flatten)]
    pub data: DataArgs,
}

impl RenderArgs {
    pub fn run(self, config_path: Option<&Path>) -> Result<()> {
        let mut config = resolve_config(config_path)?;
        self.data.apply_to(&mut config)?;
        let written = render(&self.source, &self.output, &self.data, &config)?;
        print_written(&self.output, &written);
        Ok(())
    }
}

/// Load + render; shared with `texgen build`.
pub fn render(
    source: &Path,
    output: &Path,
    data: &DataArgs,
    config: &texgen_core::TexConfig,
) -> Result<Vec<PathBuf>> {
    let value = data.load()?;
    let templates = load(source, config)
        .with_context(|| format!("failed to load templates from '{}'", source.display()))?;
    render_all(&templates, output, &value)
        .with_context(|| format!("failed to render into '{}'", output.display()))
}

pub fn print_written(output: &Path, written: &[PathBuf]) {
    if written.is_empty() {
        println!("No templates found; nothing written to '{}'.", output.display());
        return;
    }
    println!(
        "{} rendered {} file(s) into '{}'",
        "✓".green(),
        written.len(),
        output.display()
    );
    for path in written {
        println!("  ✎  {}", path.display());
    }
}
