//! # texgen-renderer
//!
//! Loads LaTeX templates written with LaTeX-safe markers, renders them with
//! Tera, and mirrors the source tree under an output directory.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use serde_json::json;
//! use texgen_core::TexConfig;
//! use texgen_renderer::{load, render_all};
//!
//! fn render() -> Result<(), texgen_renderer::RenderError> {
//!     let templates = load(Path::new("templates"), &TexConfig::default())?;
//!     let data = json!({ "title": "tex manual", "author": "Frank Xu" });
//!     for path in render_all(&templates, Path::new("out"), &data)? {
//!         println!("{}", path.display());
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod loader;
pub mod syntax;
pub mod template;
pub mod writer;

pub use error::RenderError;
pub use loader::{load, TemplateMap};
pub use template::TexTemplate;
pub use writer::{render_all, render_dir, render_to_file};
