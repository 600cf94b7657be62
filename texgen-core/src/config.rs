//! Explicit configuration for loading templates and compiling PDFs.
//!
//! # File layout
//!
//! ```text
//! <project>/
//!   texgen.yaml      (optional — every key may be omitted)
//! ```
//!
//! ```yaml
//! left_delimiter: '\{\{'
//! right_delimiter: '\}\}'
//! extension: tex
//! debug: false
//! program: xelatex
//! ```
//!
//! A [`TexConfig`] value is handed to the loader and the compiler; nothing is
//! read from process-wide state, so independent callers can use different
//! delimiters side by side.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{config_io_err, ConfigError};

/// File name looked up by [`load_or_default`].
pub const CONFIG_FILE_NAME: &str = "texgen.yaml";

/// Default opening marker: a backslash-escaped `{{`, which never occurs in
/// ordinary LaTeX source.
pub const DEFAULT_LEFT_DELIMITER: &str = r"\{\{";

/// Default closing marker, paired with [`DEFAULT_LEFT_DELIMITER`].
pub const DEFAULT_RIGHT_DELIMITER: &str = r"\}\}";

/// Default template file extension (compared case-insensitively).
pub const DEFAULT_EXTENSION: &str = "tex";

/// Default typesetting program.
pub const DEFAULT_PROGRAM: &str = "xelatex";

// ---------------------------------------------------------------------------
// TexConfig
// ---------------------------------------------------------------------------

/// Settings shared by the template loader and the PDF compiler.
///
/// Delimiters only affect templates parsed after the value is built; already
/// loaded templates keep the markers they were parsed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TexConfig {
    /// Opening marker of a substitution or statement.
    pub left_delimiter: String,
    /// Closing marker of a substitution or statement.
    pub right_delimiter: String,
    /// Extension identifying template files, without the leading dot.
    pub extension: String,
    /// Connect the typesetting tool's stdout/stdin to ours.
    pub debug: bool,
    /// Executable name looked up on `PATH`.
    pub program: String,
}

impl Default for TexConfig {
    fn default() -> Self {
        TexConfig {
            left_delimiter: DEFAULT_LEFT_DELIMITER.to_string(),
            right_delimiter: DEFAULT_RIGHT_DELIMITER.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            debug: false,
            program: DEFAULT_PROGRAM.to_string(),
        }
    }
}

impl TexConfig {
    /// Check that the loader and compiler can work with these values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.left_delimiter.is_empty() || self.right_delimiter.is_empty() {
            return Err(ConfigError::Invalid(
                "template delimiters must not be empty".to_string(),
            ));
        }
        if self.left_delimiter == self.right_delimiter {
            return Err(ConfigError::Invalid(format!(
                "left and right delimiters must differ (both are '{}')",
                self.left_delimiter
            )));
        }
        if self.extension().is_empty() {
            return Err(ConfigError::Invalid(
                "template extension must not be empty".to_string(),
            ));
        }
        if self.program.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "compiler program must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Template extension with any leading `.` removed.
    pub fn extension(&self) -> &str {
        self.extension.trim_start_matches('.')
    }

    /// `true` when `path` carries the template extension (ASCII case-insensitive).
    pub fn is_template_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(self.extension()))
            .unwrap_or(false)
    }
}

// ---------------------------------------------------------------------------
// Load / save
// ---------------------------------------------------------------------------

/// Load and validate a config file.
///
/// Returns `ConfigError::NotFound` if absent,
/// `ConfigError::Parse` (with path + line context) if malformed YAML.
pub fn load(path: &Path) -> Result<TexConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| config_io_err(path, e))?;
    // An empty file is a valid "all defaults" config.
    let config: TexConfig = if contents.trim().is_empty() {
        TexConfig::default()
    } else {
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?
    };
    config.validate()?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Load `<dir>/texgen.yaml` when present, defaults otherwise.
pub fn load_or_default(dir: &Path) -> Result<TexConfig, ConfigError> {
    let path = config_path(dir);
    if path.exists() {
        load(&path)
    } else {
        Ok(TexConfig::default())
    }
}

/// `<dir>/texgen.yaml` — pure, no I/O.
pub fn config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}

/// Write `config` to `path` through a `.tmp` sibling and a rename.
pub fn save(path: &Path, config: &TexConfig) -> Result<(), ConfigError> {
    config.validate()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| config_io_err(parent, e))?;
    }
    let tmp_path = PathBuf::from(format!("{}.tmp", path.display()));
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(&tmp_path, yaml).map_err(|e| config_io_err(&tmp_path, e))?;
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(config_io_err(path, e));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[test]
    fn defaults_use_escaped_brace_delimiters() {
        let cfg = TexConfig::default();
        assert_eq!(cfg.left_delimiter, "\\{\\{");
        assert_eq!(cfg.right_delimiter, "\\}\\}");
        assert_eq!(cfg.extension(), "tex");
        assert_eq!(cfg.program, "xelatex");
        assert!(!cfg.debug);
        cfg.validate().expect("defaults are valid");
    }

    #[rstest]
    #[case("main.tex", true)]
    #[case("main.TEX", true)]
    #[case("nested/ch1.Tex", true)]
    #[case("main.texx", false)]
    #[case("main.md", false)]
    #[case("tex", false)]
    fn template_path_matching_is_case_insensitive(#[case] path: &str, #[case] expected: bool) {
        let cfg = TexConfig::default();
        assert_eq!(cfg.is_template_path(Path::new(path)), expected);
    }

    #[test]
    fn leading_dot_in_extension_is_ignored() {
        let cfg = TexConfig {
            extension: ".ltx".to_string(),
            ..TexConfig::default()
        };
        assert_eq!(cfg.extension(), "ltx");
        assert!(cfg.is_template_path(Path::new("a.LTX")));
    }

    #[rstest]
    #[case("", "]]")]
    #[case("[[", "")]
    #[case("@@", "@@")]
    fn invalid_delimiters_are_rejected(#[case] left: &str, #[case] right: &str) {
        let cfg = TexConfig {
            left_delimiter: left.to_string(),
            right_delimiter: right.to_string(),
            ..TexConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("texgen.yaml");
        let cfg = TexConfig {
            left_delimiter: "<<".to_string(),
            right_delimiter: ">>".to_string(),
            debug: true,
            ..TexConfig::default()
        };
        save(&path, &cfg).expect("save");
        assert!(!dir.path().join("texgen.yaml.tmp").exists());
        assert_eq!(load(&path).expect("load"), cfg);
    }

    #[test]
    fn load_or_default_without_file_returns_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load_or_default(dir.path()).unwrap(), TexConfig::default());
    }

    #[test]
    fn empty_file_means_defaults() {
        let dir = TempDir::new().unwrap();
        let path = config_path(dir.path());
        std::fs::write(&path, "\n").unwrap();
        assert_eq!(load(&path).unwrap(), TexConfig::default());
    }
}
