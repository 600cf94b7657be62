pub mod build;
pub mod compile;
pub mod init;
pub mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use texgen_core::{config, data, TexConfig};

/// `--config FILE` when given, otherwise `./texgen.yaml` or defaults.
pub fn resolve_config(path: Option<&Path>) -> Result<TexConfig> {
    let resolved = match path {
        Some(path) => config::load(path)
            .with_context(|| format!("cannot load config '{}'", path.display())),
        None => config::load_or_default(Path::new("."))
            .context("cannot load ./texgen.yaml"),
    }?;
    tracing::debug!(config = ?resolved, "resolved config");
    Ok(resolved)
}

/// Render data and delimiter flags shared by `render` and `build`.
#[derive(Args, Debug, Default)]
pub struct DataArgs {
    /// JSON or YAML file with the render data.
    #[arg(long, short = 'd', value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Set a (dotted) key to a string value; repeatable.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,

    /// Opening template marker (overrides config).
    #[arg(long, value_name = "MARKER", allow_hyphen_values = true)]
    pub left_delim: Option<String>,

    /// Closing template marker (overrides config).
    #[arg(long, value_name = "MARKER", allow_hyphen_values = true)]
    pub right_delim: Option<String>,
}

impl DataArgs {
    /// Apply delimiter overrides on top of the file config.
    pub fn apply_to(&self, config: &mut TexConfig) -> Result<()> {
        if let Some(left) = &self.left_delim {
            config.left_delimiter = left.clone();
        }
        if let Some(right) = &self.right_delim {
            config.right_delimiter = right.clone();
        }
        config.validate().context("invalid delimiter settings")?;
        Ok(())
    }

    /// Load `--data` (or an empty mapping) and apply every `--set`.
    pub fn load(&self) -> Result<Value> {
        let base = match &self.data {
            Some(path) => data::load_data(path)
                .with_context(|| format!("cannot load data '{}'", path.display()))?,
            None => Value::Null,
        };
        data::apply_overrides(base, self.overrides.as_slice()).context("invalid --set value")
    }
}
