//! The typesetting program as an injectable capability.
//!
//! [`PdfCompiler`](crate::PdfCompiler) only needs to know whether the
//! program exists and to run it once with a set of arguments in a working
//! directory. [`Xelatex`] does that with a real process; tests substitute a
//! fake that writes the expected artefacts itself.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use texgen_core::config::DEFAULT_PROGRAM;

/// Exit status of one engine invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode { code: Some(0) };

    pub fn from_code(code: i32) -> Self {
        ExitCode { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Something that can typeset a source file.
pub trait TexEngine {
    /// Program name used in diagnostics.
    fn program(&self) -> &str;

    /// `true` when the program can be found; checked before any spawn.
    fn is_available(&self) -> bool;

    /// Run the program once with `args` in `work_dir` and wait for it.
    ///
    /// With `debug` set the program's stdout and stdin are connected to ours.
    fn invoke(&self, args: &[OsString], work_dir: &Path, debug: bool)
        -> std::io::Result<ExitCode>;
}

// ---------------------------------------------------------------------------
// Xelatex
// ---------------------------------------------------------------------------

/// The system typesetting program, looked up on `PATH`.
#[derive(Debug, Clone)]
pub struct Xelatex {
    program: String,
}

impl Default for Xelatex {
    fn default() -> Self {
        Xelatex::new(DEFAULT_PROGRAM)
    }
}

impl Xelatex {
    /// Use `program` (normally `xelatex`) instead of the default.
    pub fn new(program: impl Into<String>) -> Self {
        Xelatex {
            program: program.into(),
        }
    }

    /// Full path of the program, if it is on `PATH`.
    ///
    /// A program containing a path separator is taken relative to our own
    /// working directory, not the directory the program later runs in.
    pub fn locate(&self) -> Option<PathBuf> {
        let found = which::which(&self.program).ok()?;
        std::path::absolute(found).ok()
    }
}

impl TexEngine for Xelatex {
    fn program(&self) -> &str {
        &self.program
    }

    fn is_available(&self) -> bool {
        self.locate().is_some()
    }

    fn invoke(
        &self,
        args: &[OsString],
        work_dir: &Path,
        debug: bool,
    ) -> std::io::Result<ExitCode> {
        let path = self.locate().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", self.program),
            )
        })?;

        let mut cmd = Command::new(&path);
        cmd.args(args).current_dir(work_dir).stderr(Stdio::null());
        if debug {
            cmd.stdout(Stdio::inherit()).stdin(Stdio::inherit());
        } else {
            cmd.stdout(Stdio::null()).stdin(Stdio::null());
        }

        tracing::debug!("running {} in {}", path.display(), work_dir.display());
        let status = cmd.status()?;
        Ok(ExitCode {
            code: status.code(),
        })
    }
}
