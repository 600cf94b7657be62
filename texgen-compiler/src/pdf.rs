//! Two-pass PDF compilation.
//!
//! 1. Resolve the source to an absolute path and check the program exists.
//! 2. First pass — writes the PDF plus `.aux` (cross-references) and `.toc`.
//! 3. Second pass — re-typesets with the cross-references and TOC resolved.
//! 4. Check `<source dir>/<source stem>.pdf` exists and return it.
//!
//! Nothing is retried; the first failure ends the run.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use texgen_core::TexConfig;

use crate::engine::{TexEngine, Xelatex};
use crate::error::{io_err, CompileError};

/// Number of engine runs per compilation.
pub const PASSES: u32 = 2;

/// Fixed flags: synctex on, never stop for terminal input, allow `\write18`
/// (needed by minted and similar packages).
pub const ENGINE_FLAGS: &[&str] = &[
    "-synctex",
    "1",
    "-interaction",
    "nonstopmode",
    "-shell-escape",
];

/// Full argument vector for compiling `source` (already absolute).
pub fn engine_args(source: &Path) -> Vec<OsString> {
    ENGINE_FLAGS
        .iter()
        .map(OsString::from)
        .chain(std::iter::once(source.as_os_str().to_os_string()))
        .collect()
}

/// Expected output for `source`: same directory, same stem, `.pdf`.
pub fn pdf_path(source: &Path) -> PathBuf {
    let dir = source.parent().unwrap_or_else(|| Path::new(""));
    let mut name = source
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_default();
    name.push(".pdf");
    dir.join(name)
}

/// Compiles source files with a [`TexEngine`].
#[derive(Debug, Clone)]
pub struct PdfCompiler<E: TexEngine> {
    engine: E,
    debug: bool,
}

impl PdfCompiler<Xelatex> {
    /// System engine configured from `config.program` / `config.debug`.
    pub fn from_config(config: &TexConfig) -> Self {
        PdfCompiler::new(Xelatex::new(config.program.clone()), config.debug)
    }
}

impl<E: TexEngine> PdfCompiler<E> {
    pub fn new(engine: E, debug: bool) -> Self {
        PdfCompiler { engine, debug }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Compile `source` and return the absolute path of the produced PDF.
    pub fn compile_to_pdf(&self, source: &Path) -> Result<PathBuf, CompileError> {
        let source = std::path::absolute(source).map_err(|e| io_err(source, e))?;
        let work_dir = source
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));

        let program = self.engine.program().to_string();
        if !self.engine.is_available() {
            return Err(CompileError::ToolNotFound { program });
        }

        let args = engine_args(&source);
        for pass in 1..=PASSES {
            tracing::debug!("{program} pass {pass}/{PASSES} for {}", source.display());
            let status = self
                .engine
                .invoke(&args, &work_dir, self.debug)
                .map_err(|e| CompileError::Spawn {
                    program: program.clone(),
                    pass,
                    source: e,
                })?;
            if !status.success() {
                return Err(CompileError::Failed {
                    program,
                    pass,
                    code: status.code,
                });
            }
        }

        let pdf = pdf_path(&source);
        if !pdf.is_file() {
            return Err(CompileError::MissingOutput { expected: pdf });
        }
        tracing::info!("compiled {}", pdf.display());
        Ok(pdf)
    }
}

/// Compile `source` with the system engine named in `config`.
pub fn compile_to_pdf(source: &Path, config: &TexConfig) -> Result<PathBuf, CompileError> {
    PdfCompiler::from_config(config).compile_to_pdf(source)
}
