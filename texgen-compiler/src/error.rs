//! Error types for texgen-compiler.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while compiling a source file to PDF.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The typesetting program is not on `PATH`; nothing was spawned.
    #[error("{program} does not exist on PATH")]
    ToolNotFound { program: String },

    /// The process could not be started.
    #[error("failed to run {program} (pass {pass}): {source}")]
    Spawn {
        program: String,
        pass: u32,
        #[source]
        source: std::io::Error,
    },

    /// The process exited unsuccessfully; `code` is `None` when killed by a signal.
    #[error("{program} failed on pass {pass} with {}", describe_code(.code))]
    Failed {
        program: String,
        pass: u32,
        code: Option<i32>,
    },

    /// Every pass succeeded but the expected PDF is not there.
    #[error("compiled successfully but no output pdf found at {expected}")]
    MissingOutput { expected: PathBuf },

    /// Resolving the source path failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Convenience constructor for [`CompileError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> CompileError {
    CompileError::Io {
        path: path.into(),
        source,
    }
}
