//! `texgen build <src> <out> --main <file>` — render, then compile one file.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use texgen_compiler::PdfCompiler;

use super::render::{print_written, render};
use super::{resolve_config, DataArgs};

/// Arguments for `texgen build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Directory holding the templates.
    pub source: PathBuf,

    /// Directory the rendered files are written to (mirrors `source`).
    pub output: PathBuf,

    /// Entry document, relative to `source` (e.g. `manual.tex`).
    #[arg(long, short = 'm', value_name = "REL_PATH")]
    pub main: PathBuf,

    #[command(flatten)]
    pub data: DataArgs,

    /// Show the typesetting program's output and let it prompt on stdin.
    #[arg(long)]
    pub debug: bool,
}

impl BuildArgs {
    pub fn run(self, config_path: Option<&Path>) -> Result<()> {
        if self.main.is_absolute() {
            bail!(
                "--main must be relative to the template directory, got '{}'",
                self.main.display()
            );
        }

        let mut config = resolve_config(config_path)?;
        self.data.apply_to(&mut config)?;
        config.debug |= self.debug;

        let written = render(&self.source, &self.output, &self.data, &config)?;
        print_written(&self.output, &written);

        let main = self.output.join(&self.main);
        if !written.contains(&main) {
            bail!(
                "'{}' was not rendered; is it a template under '{}'?",
                self.main.display(),
                self.source.display()
            );
        }

        let pdf = PdfCompiler::from_config(&config)
            .compile_to_pdf(&main)
            .with_context(|| format!("failed to compile '{}'", main.display()))?;
        println!("{} {}", "✓".green(), pdf.display());
        Ok(())
    }
}
