//! Renderer/writer and output orchestration.
//!
//! [`render_to_file`] streams one template into one file; [`render_all`]
//! mirrors a whole [`TemplateMap`] under an output root. Both stop at the
//! first error and leave whatever was already written on disk.

use std::fs::{DirBuilder, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use texgen_core::TexConfig;

use crate::error::{io_err, RenderError};
use crate::loader::{self, TemplateMap};
use crate::template::TexTemplate;

// ---------------------------------------------------------------------------
// Filesystem helpers
// ---------------------------------------------------------------------------

/// Create `dir` and its parents (mode `0755` on unix). Existing dirs are fine.
pub(crate) fn ensure_dir(dir: &Path) -> Result<(), RenderError> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(dir).map_err(|e| io_err(dir, e))
}

/// Open `path` for writing, truncating or creating it (mode `0644` on unix).
fn open_truncate(path: &Path) -> Result<File, RenderError> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    options.open(path).map_err(|e| io_err(path, e))
}

// ---------------------------------------------------------------------------
// render_to_file
// ---------------------------------------------------------------------------

/// Execute `template` against `data` and write the output to `output`.
///
/// The parent directory is created if missing. An execution error leaves
/// the partially written file behind.
pub fn render_to_file<T: Serialize + ?Sized>(
    template: &TexTemplate,
    output: &Path,
    data: &T,
) -> Result<(), RenderError> {
    if let Some(parent) = output.parent() {
        ensure_dir(parent)?;
    }

    let mut writer = BufWriter::new(open_truncate(output)?);
    let rendered = template.render_to(data, &mut writer);
    // Flush what was produced even when rendering failed.
    let flushed = writer.flush().map_err(|e| io_err(output, e));
    rendered?;
    flushed?;

    tracing::debug!("wrote {} from {}", output.display(), template.name());
    Ok(())
}

// ---------------------------------------------------------------------------
// render_all
// ---------------------------------------------------------------------------

/// Render every entry of `templates` to `output_dir/<relative path>`.
///
/// Returns the written paths in map order. The first failing entry aborts
/// the batch.
pub fn render_all<T: Serialize + ?Sized>(
    templates: &TemplateMap,
    output_dir: &Path,
    data: &T,
) -> Result<Vec<PathBuf>, RenderError> {
    ensure_dir(output_dir)?;

    let mut written = Vec::with_capacity(templates.len());
    for (rel, template) in templates {
        let target = output_dir.join(rel);
        if let Some(parent) = target.parent() {
            ensure_dir(parent)?;
        }
        render_to_file(template, &target, data)?;
        written.push(target);
    }

    tracing::info!(
        "rendered {} file(s) into {}",
        written.len(),
        output_dir.display()
    );
    Ok(written)
}

/// [`loader::load`] followed by [`render_all`].
pub fn render_dir<T: Serialize + ?Sized>(
    source_dir: &Path,
    output_dir: &Path,
    data: &T,
    config: &TexConfig,
) -> Result<Vec<PathBuf>, RenderError> {
    let templates = loader::load(source_dir, config)?;
    render_all(&templates, output_dir, data)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn template(source: &str) -> TexTemplate {
        TexTemplate::parse("t.tex", source, &TexConfig::default()).unwrap()
    }

    #[test]
    fn creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a").join("b").join("doc.tex");
        render_to_file(&template("x"), &path, &json!({})).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "x");
    }

    #[test]
    fn existing_file_is_truncated() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("doc.tex");
        fs::write(&path, "a much longer previous body").unwrap();
        render_to_file(&template("short"), &path, &json!({})).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "short");
    }

    #[test]
    fn execution_error_leaves_file_on_disk() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("doc.tex");
        let err = render_to_file(&template(r"\{\{ missing \}\}"), &path, &json!({})).unwrap_err();
        assert!(matches!(err, RenderError::Execute { .. }), "got: {err}");
        assert!(path.exists(), "partial output must not be rolled back");
    }

    #[test]
    #[cfg(unix)]
    fn created_paths_use_permissive_modes() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("out");
        let path = dir.join("doc.tex");
        render_to_file(&template("x"), &path, &json!({})).unwrap();

        // The process umask may clear bits but never adds any.
        let dir_mode = fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
        let file_mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(dir_mode & !0o755, 0);
        assert_eq!(file_mode & !0o644, 0);
        assert_ne!(file_mode & 0o600, 0);
    }

    #[test]
    fn render_all_on_empty_map_creates_output_dir() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out");
        let written = render_all(&TemplateMap::new(), &out, &json!({})).unwrap();
        assert!(written.is_empty());
        assert!(out.is_dir());
    }
}
