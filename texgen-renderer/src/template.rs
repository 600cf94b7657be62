//! [`TexTemplate`] — one parsed template, executable many times.

use std::fmt;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tera::Tera;

use texgen_core::TexConfig;

use crate::error::{io_err, RenderError};
use crate::syntax;

/// A parsed template owning its own Tera instance.
///
/// Templates are immutable once parsed; changing the delimiters in a
/// [`TexConfig`] afterwards has no effect on them.
#[derive(Clone)]
pub struct TexTemplate {
    name: String,
    tera: Tera,
}

impl fmt::Debug for TexTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TexTemplate").field("name", &self.name).finish()
    }
}

impl TexTemplate {
    /// Parse `source`, written with the markers from `config`, under `name`.
    pub fn parse(
        name: impl Into<String>,
        source: &str,
        config: &TexConfig,
    ) -> Result<Self, RenderError> {
        config.validate()?;
        let name = name.into();
        let translated = syntax::translate(
            &name,
            source,
            &config.left_delimiter,
            &config.right_delimiter,
        )?;

        let mut tera = Tera::default();
        // LaTeX output: never HTML-escape, whatever the template name ends with.
        tera.autoescape_on(vec![]);
        tera.add_raw_template(&name, &translated)
            .map_err(|source| RenderError::Parse {
                template: name.clone(),
                source,
            })?;
        Ok(TexTemplate { name, tera })
    }

    /// Read and parse a template file.
    pub fn from_file(
        path: &Path,
        name: impl Into<String>,
        config: &TexConfig,
    ) -> Result<Self, RenderError> {
        let source = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        Self::parse(name, &source, config)
    }

    /// Name the template was parsed under (its normalised relative path when loaded).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execute against `data` and return the output.
    pub fn render_to_string<T: Serialize + ?Sized>(&self, data: &T) -> Result<String, RenderError> {
        let ctx = self.context(data)?;
        self.tera
            .render(&self.name, &ctx)
            .map_err(|source| self.exec_err(source))
    }

    /// Execute against `data`, streaming output into `writer`.
    ///
    /// On failure whatever was already streamed stays in `writer`.
    pub fn render_to<T: Serialize + ?Sized, W: Write>(
        &self,
        data: &T,
        writer: W,
    ) -> Result<(), RenderError> {
        let ctx = self.context(data)?;
        self.tera
            .render_to(&self.name, &ctx, writer)
            .map_err(|source| self.exec_err(source))
    }

    fn context<T: Serialize + ?Sized>(&self, data: &T) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(data).map_err(|source| self.exec_err(source))
    }

    fn exec_err(&self, source: tera::Error) -> RenderError {
        RenderError::Execute {
            template: self.name.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(source: &str) -> TexTemplate {
        TexTemplate::parse("t.tex", source, &TexConfig::default()).expect("parse")
    }

    #[test]
    fn substitutes_field_and_keeps_latex_braces() {
        let t = parse(r"\textbf{\{\{ name \}\}}");
        let out = t.render_to_string(&json!({ "name": "World" })).unwrap();
        assert_eq!(out, r"\textbf{World}");
    }

    #[test]
    fn loops_over_lists() {
        let t = parse(
            "\\begin{itemize}\n\\{\\{ for d in deps \\}\\}\\item \\{\\{ d.name \\}\\}\n\\{\\{ endfor \\}\\}\\end{itemize}",
        );
        let out = t
            .render_to_string(&json!({ "deps": [{ "name": "TexLive" }, { "name": "minted" }] }))
            .unwrap();
        assert_eq!(
            out,
            "\\begin{itemize}\n\\item TexLive\n\\item minted\n\\end{itemize}"
        );
    }

    #[test]
    fn dash_markers_strip_loop_indentation() {
        let t = parse(
            "\\begin{itemize}\n\\{\\{ for d in deps -\\}\\}\n  \\item \\{\\{ d.name \\}\\}\n\\{\\{ endfor \\}\\}\\end{itemize}",
        );
        let out = t
            .render_to_string(&json!({ "deps": [{ "name": "TexLive" }, { "name": "minted" }] }))
            .unwrap();
        assert_eq!(
            out,
            "\\begin{itemize}\n\\item TexLive\n\\item minted\n\\end{itemize}"
        );
    }

    #[test]
    fn html_special_characters_are_not_escaped() {
        let t = TexTemplate::parse("page.html", r"\{\{ x \}\}", &TexConfig::default()).unwrap();
        assert_eq!(t.render_to_string(&json!({ "x": "a & <b>" })).unwrap(), "a & <b>");
    }

    #[test]
    fn undefined_field_is_execution_error() {
        let t = parse(r"Hello \{\{ missing \}\}");
        let err = t.render_to_string(&json!({})).unwrap_err();
        assert!(matches!(err, RenderError::Execute { .. }), "got: {err}");
        assert!(err.to_string().contains("missing"), "got: {err}");
    }

    #[test]
    fn non_mapping_data_is_execution_error() {
        let t = parse("static");
        let err = t.render_to_string(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, RenderError::Execute { .. }), "got: {err}");
    }

    #[test]
    fn invalid_expression_is_parse_error() {
        let err = TexTemplate::parse("bad.tex", r"\{\{ name | \}\}", &TexConfig::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::Parse { .. }), "got: {err}");
    }

    #[test]
    fn template_keeps_delimiters_it_was_parsed_with() {
        let mut cfg = TexConfig {
            left_delimiter: "<<".to_string(),
            right_delimiter: ">>".to_string(),
            ..TexConfig::default()
        };
        let t = TexTemplate::parse("t", "<<name>>", &cfg).unwrap();
        cfg.left_delimiter = "[[".to_string();
        cfg.right_delimiter = "]]".to_string();
        assert_eq!(t.render_to_string(&json!({ "name": "x" })).unwrap(), "x");
    }

    #[test]
    fn render_to_streams_into_writer() {
        let t = parse(r"\{\{ a \}\}-\{\{ b \}\}");
        let mut buf = Vec::new();
        t.render_to(&json!({ "a": 1, "b": 2 }), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "1-2");
    }
}
