//! Delimiter translation — maps texgen markers onto Tera syntax.
//!
//! LaTeX uses `{` and `}` for command grouping, so Tera's own `{{`, `{%` and
//! `{#` cannot be typed directly into a `.tex` template. Templates are written
//! with a configurable marker pair instead and rewritten before Tera sees
//! them:
//!
//! | Template (default markers)            | Tera                     |
//! |---------------------------------------|--------------------------|
//! | literal text                          | `{% raw %}…{% endraw %}` |
//! | `\{\{ title \}\}`                     | `{{ title }}`            |
//! | `\{\{ for dep in deps \}\}`           | `{% for dep in deps %}`  |
//! | `\{\{ # note \}\}`                    | *(dropped)*              |
//!
//! A marker is a statement when its first word is one of [`STATEMENT_KEYWORDS`];
//! everything else is a substitution expression. `\{\{- x -\}\}` trims the
//! whitespace of the literal text on either side, like Go's text/template.

use crate::error::RenderError;

/// First words that turn a marker into a Tera `{% … %}` statement.
pub const STATEMENT_KEYWORDS: &[&str] = &[
    "for",
    "endfor",
    "if",
    "elif",
    "else",
    "endif",
    "set",
    "set_global",
    "filter",
    "endfilter",
    "break",
    "continue",
];

/// Rewrite `source` (written with `left`/`right` markers) into Tera syntax.
///
/// Literal text is preserved byte-for-byte.
pub fn translate(
    template: &str,
    source: &str,
    left: &str,
    right: &str,
) -> Result<String, RenderError> {
    let mut out = String::with_capacity(source.len() + 64);
    let mut offset = 0;
    let mut trim_next = false;

    while let Some(start) = source[offset..].find(left) {
        let marker_at = offset + start;
        let body_at = marker_at + left.len();
        let end = source[body_at..].find(right).ok_or_else(|| {
            syntax_err(
                template,
                source,
                marker_at,
                format!("unclosed marker; expected '{right}'"),
            )
        })?;
        let (trim_before, body, trim_after) = split_trim(&source[body_at..body_at + end]);

        let (from, to) = trimmed_range(source, offset, marker_at, trim_next, trim_before);
        push_literal(&mut out, template, source, from, to)?;
        push_marker(&mut out, template, source, marker_at, body)?;

        trim_next = trim_after;
        offset = body_at + end + right.len();
    }
    let (from, to) = trimmed_range(source, offset, source.len(), trim_next, false);
    push_literal(&mut out, template, source, from, to)?;
    Ok(out)
}

/// Strip whitespace-control dashes: `- body -` trims the literal text
/// before / after the marker. The dash must be followed (or preceded) by
/// whitespace, so `-3` stays a negative number.
fn split_trim(raw: &str) -> (bool, &str, bool) {
    let mut body = raw;
    let before = body.len() > 1
        && body.starts_with('-')
        && body[1..].starts_with(char::is_whitespace);
    if before {
        body = &body[1..];
    }
    let after = body.len() > 1
        && body.ends_with('-')
        && body[..body.len() - 1].ends_with(char::is_whitespace);
    if after {
        body = &body[..body.len() - 1];
    }
    (before, body, after)
}

fn trimmed_range(
    source: &str,
    mut from: usize,
    mut to: usize,
    trim_start: bool,
    trim_end: bool,
) -> (usize, usize) {
    if trim_start {
        let text = &source[from..to];
        from += text.len() - text.trim_start().len();
    }
    if trim_end {
        to = from + source[from..to].trim_end().len();
    }
    (from, to)
}

fn push_literal(
    out: &mut String,
    template: &str,
    source: &str,
    from: usize,
    to: usize,
) -> Result<(), RenderError> {
    let text = &source[from..to];
    if text.is_empty() {
        return Ok(());
    }
    if let Some(pos) = find_endraw(text) {
        return Err(syntax_err(
            template,
            source,
            from + pos,
            "literal text must not contain a Tera endraw tag".to_string(),
        ));
    }
    out.push_str("{% raw %}");
    out.push_str(text);
    out.push_str("{% endraw %}");
    Ok(())
}

fn push_marker(
    out: &mut String,
    template: &str,
    source: &str,
    at: usize,
    body: &str,
) -> Result<(), RenderError> {
    let body = body.trim();
    if body.is_empty() {
        return Err(syntax_err(template, source, at, "empty marker".to_string()));
    }
    if body.starts_with('#') {
        return Ok(());
    }

    let keyword = body
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .next()
        .unwrap_or_default();
    if keyword == "raw" || keyword == "endraw" {
        return Err(syntax_err(
            template,
            source,
            at,
            format!("'{keyword}' is not allowed; literal text is already emitted verbatim"),
        ));
    }

    if STATEMENT_KEYWORDS.contains(&keyword) {
        out.push_str("{% ");
        out.push_str(body);
        out.push_str(" %}");
    } else {
        out.push_str("{{ ");
        out.push_str(body);
        out.push_str(" }}");
    }
    Ok(())
}

/// Byte offset of a `{% endraw %}`-style tag (any spacing, optional `-`).
fn find_endraw(text: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(pos) = text[from..].find("{%") {
        let at = from + pos;
        let rest = text[at + 2..].trim_start_matches('-').trim_start();
        if rest.starts_with("endraw") {
            return Some(at);
        }
        from = at + 2;
    }
    None
}

fn syntax_err(template: &str, source: &str, at: usize, message: String) -> RenderError {
    RenderError::Syntax {
        template: template.to_string(),
        line: source[..at].matches('\n').count() + 1,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const L: &str = r"\{\{";
    const R: &str = r"\}\}";

    fn tr(source: &str) -> String {
        translate("t.tex", source, L, R).expect("translate")
    }

    #[test]
    fn plain_text_is_wrapped_in_raw() {
        assert_eq!(tr(r"\section{Intro}"), r"{% raw %}\section{Intro}{% endraw %}");
    }

    #[test]
    fn empty_source_translates_to_empty() {
        assert_eq!(tr(""), "");
    }

    #[test]
    fn substitution_becomes_variable_tag() {
        assert_eq!(
            tr(r"\title{\{\{ title \}\}}"),
            r"{% raw %}\title{{% endraw %}{{ title }}{% raw %}}{% endraw %}"
        );
    }

    #[test]
    fn keywords_become_statement_tags() {
        let out = tr(r"\{\{for d in deps\}\}\item \{\{d.name\}\}\{\{endfor\}\}");
        assert_eq!(
            out,
            r"{% for d in deps %}{% raw %}\item {% endraw %}{{ d.name }}{% endfor %}"
        );
    }

    #[test]
    fn identifiers_starting_with_keywords_are_expressions() {
        assert_eq!(tr(r"\{\{ format \}\}"), "{{ format }}");
        assert_eq!(tr(r"\{\{ ifdef | upper \}\}"), "{{ ifdef | upper }}");
    }

    #[test]
    fn comments_are_dropped() {
        assert_eq!(tr(r"a\{\{# todo \}\}b"), "{% raw %}a{% endraw %}{% raw %}b{% endraw %}");
    }

    #[test]
    fn tera_markup_in_literal_text_stays_literal() {
        let out = tr(r"\newcommand{\x}[1]{#1}{{}}");
        assert_eq!(out, r"{% raw %}\newcommand{\x}[1]{#1}{{}}{% endraw %}");
    }

    #[test]
    fn unclosed_marker_reports_line() {
        let err = translate("doc.tex", "line1\nline2 \\{\\{ name", L, R).unwrap_err();
        match err {
            RenderError::Syntax { template, line, message } => {
                assert_eq!(template, "doc.tex");
                assert_eq!(line, 2);
                assert!(message.contains("unclosed"), "got: {message}");
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn empty_marker_is_rejected() {
        assert!(matches!(
            translate("t", r"\{\{  \}\}", L, R),
            Err(RenderError::Syntax { .. })
        ));
    }

    #[test]
    fn raw_statements_are_rejected() {
        assert!(matches!(
            translate("t", r"\{\{ raw \}\}", L, R),
            Err(RenderError::Syntax { .. })
        ));
    }

    #[test]
    fn endraw_in_literal_text_is_rejected() {
        assert!(matches!(
            translate("t", "x {%- endraw %} y", L, R),
            Err(RenderError::Syntax { .. })
        ));
    }

    #[test]
    fn dash_markers_trim_surrounding_whitespace() {
        assert_eq!(
            tr("a  \n\\{\\{- x -\\}\\}\n\t b"),
            "{% raw %}a{% endraw %}{{ x }}{% raw %}b{% endraw %}"
        );
    }

    #[test]
    fn one_sided_trim_keeps_other_side() {
        assert_eq!(
            tr("a \\{\\{ x -\\}\\} b"),
            "{% raw %}a {% endraw %}{{ x }}{% raw %}b{% endraw %}"
        );
        assert_eq!(
            tr("\\{\\{- for d in ds \\}\\}\n"),
            "{% for d in ds %}{% raw %}\n{% endraw %}"
        );
    }

    #[test]
    fn dash_without_space_is_negative_number() {
        assert_eq!(tr(r"\{\{-3\}\}"), "{{ -3 }}");
    }

    #[test]
    fn custom_delimiters_are_honoured() {
        assert_eq!(translate("t", "<<name>>", "<<", ">>").unwrap(), "{{ name }}");
    }
}
