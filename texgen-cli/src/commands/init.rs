//! `texgen init [dir] [--force]` — write a default `texgen.yaml`.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use texgen_core::{config, TexConfig};

/// Arguments for `texgen init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write texgen.yaml into.
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Overwrite an existing texgen.yaml.
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        let path = config::config_path(&self.dir);
        if path.exists() && !self.force {
            bail!(
                "'{}' already exists; pass --force to overwrite",
                path.display()
            );
        }

        config::save(&path, &TexConfig::default())
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        println!("✓ Wrote {}", path.display());
        Ok(())
    }
}
