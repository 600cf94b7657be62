//! Error types for texgen-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from loading, validating, or saving a [`TexConfig`].
///
/// [`TexConfig`]: crate::config::TexConfig
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// YAML serialization error (save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The config file did not exist at the expected path.
    #[error("config not found at {path}")]
    NotFound { path: PathBuf },

    /// The config parsed but holds values the loader or compiler cannot use.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// All errors that can arise while loading render data.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON data at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse YAML data at {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// File extension is neither `.json`, `.yaml` nor `.yml`.
    #[error("unsupported data format at {path}; expected .json, .yaml or .yml")]
    UnsupportedFormat { path: PathBuf },

    /// A `key=value` override could not be applied.
    #[error("invalid override '{pair}': {reason}")]
    InvalidOverride { pair: String, reason: String },
}

pub(crate) fn config_io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}

pub(crate) fn data_io_err(path: impl Into<PathBuf>, source: std::io::Error) -> DataError {
    DataError::Io {
        path: path.into(),
        source,
    }
}
