//! # texgen-compiler
//!
//! Compiles a rendered `.tex` file into a PDF by running the typesetting
//! program twice in the source file's directory.
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use texgen_compiler::compile_to_pdf;
//! use texgen_core::TexConfig;
//!
//! let pdf = compile_to_pdf(Path::new("out/manual.tex"), &TexConfig::default());
//! ```

pub mod engine;
pub mod error;
pub mod pdf;

pub use engine::{ExitCode, TexEngine, Xelatex};
pub use error::CompileError;
pub use pdf::{compile_to_pdf, PdfCompiler};
