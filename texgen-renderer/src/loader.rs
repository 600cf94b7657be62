//! Template loader — walks a source tree and parses every template file.
//!
//! Keys of the returned [`TemplateMap`] are paths relative to the source
//! root, so the same tree always yields the same keys wherever it lives.
//! Symlinks to files are followed; symlinked directories are not descended
//! into.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use texgen_core::TexConfig;

use crate::error::{io_err, RenderError};
use crate::template::TexTemplate;

/// Relative path → parsed template, iterated in path order.
pub type TemplateMap = BTreeMap<PathBuf, TexTemplate>;

fn normalize_template_name(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn collect_template_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), RenderError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| io_err(&path, e))?;
        if file_type.is_dir() {
            collect_template_files(&path, out)?;
        } else if file_type.is_file() {
            out.push(path);
        } else if file_type.is_symlink() {
            match std::fs::metadata(&path) {
                Ok(meta) if meta.is_file() => out.push(path),
                Ok(_) => tracing::debug!("skipping symlinked directory {}", path.display()),
                Err(e) => tracing::warn!("skipping broken symlink {}: {e}", path.display()),
            }
        }
    }
    Ok(())
}

/// Load every template under `source_dir`.
///
/// Files whose extension matches `config.extension` (ASCII case-insensitive)
/// are parsed with the configured delimiters; all other files are ignored.
/// The first file that fails to read or parse aborts the load and its error
/// is returned; no partial map is produced.
pub fn load(source_dir: &Path, config: &TexConfig) -> Result<TemplateMap, RenderError> {
    config.validate()?;

    let mut files = Vec::new();
    collect_template_files(source_dir, &mut files)?;
    files.sort();

    let mut templates = TemplateMap::new();
    for path in files {
        if !config.is_template_path(&path) {
            continue;
        }
        let rel = path
            .strip_prefix(source_dir)
            .unwrap_or(path.as_path())
            .to_path_buf();
        let name = normalize_template_name(&rel);
        let template = TexTemplate::from_file(&path, name, config)?;
        tracing::debug!("loaded template {}", template.name());
        templates.insert(rel, template);
    }

    tracing::info!(
        "loaded {} template(s) from {}",
        templates.len(),
        source_dir.display()
    );
    Ok(templates)
}
