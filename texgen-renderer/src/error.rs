//! Error types for texgen-renderer.

use std::error::Error as StdError;
use std::path::PathBuf;

use thiserror::Error;

use texgen_core::ConfigError;

/// All errors that can arise from loading, rendering, or writing templates.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Marker-level syntax error found while translating delimiters.
    #[error("template syntax error in {template} at line {line}: {message}")]
    Syntax {
        template: String,
        line: usize,
        message: String,
    },

    /// Tera rejected the translated template.
    #[error("failed to parse template {template}: {}", describe(.source))]
    Parse {
        template: String,
        #[source]
        source: tera::Error,
    },

    /// Executing a parsed template against the data failed.
    #[error("failed to render template {template}: {}", describe(.source))]
    Execute {
        template: String,
        #[source]
        source: tera::Error,
    },

    /// The delimiter / extension settings are unusable.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Filesystem error while walking, reading, or writing templates.
    #[error("template io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`RenderError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io {
        path: path.into(),
        source,
    }
}

/// Tera keeps the useful part of a message ("Variable `x` not found…") in
/// the source chain; flatten it into one line.
fn describe(err: &tera::Error) -> String {
    let mut msg = err.to_string();
    let mut cur = err.source();
    while let Some(inner) = cur {
        msg.push_str(": ");
        msg.push_str(&inner.to_string());
        cur = inner.source();
    }
    msg
}
