//! texgen core library — configuration, render data, errors.
//!
//! - [`config`] — [`TexConfig`] plus `texgen.yaml` load / save
//! - [`data`] — JSON / YAML render data and `key=value` overrides
//! - [`error`] — [`ConfigError`], [`DataError`]

pub mod config;
pub mod data;
pub mod error;

pub use config::TexConfig;
pub use error::{ConfigError, DataError};
