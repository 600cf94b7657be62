//! `texgen compile <file>` — two-pass PDF compilation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use texgen_compiler::PdfCompiler;

use super::resolve_config;

/// Arguments for `texgen compile`.
#[derive(Args, Debug)]
pub struct CompileArgs {
    /// The .tex file to compile; the PDF is written next to it.
    pub file: PathBuf,

    /// Show the typesetting program's output and let it prompt on stdin.
    #[arg(long)]
    pub debug: bool,
}

impl CompileArgs {
    pub fn run(self, config_path: Option<&Path>) -> Result<()> {
        let mut config = resolve_config(config_path)?;
        config.debug |= self.debug;

        let pdf = PdfCompiler::from_config(&config)
            .compile_to_pdf(&self.file)
            .with_context(|| format!("failed to compile '{}'", self.file.display()))?;
        println!("{} {}", "✓".green(), pdf.display());
        Ok(())
    }
}
