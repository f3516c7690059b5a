//! Plain-text renderer — one line per element, file line numbers first.

use super::{BlockReport, FileReport, Renderer};
use crate::model::ElementBody;
use crate::scan::file_line;

pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, report: &FileReport) -> String {
        let mut out = String::new();
        for block in &report.blocks {
            render_block(&mut out, &report.source, block);
        }
        out
    }

    fn file_extension(&self) -> &str {
        "txt"
    }
}

fn render_block(out: &mut String, source: &str, block: &BlockReport) {
    if let Some(ref error) = block.error {
        let line = error.line.unwrap_or(block.line);
        out.push_str(&format!("{}:{}: error: {}\n", source, line, error.message));
        return;
    }
    out.push_str(&format!("{}:{}: docblock\n", source, block.line));
    for element in &block.elements {
        let line = file_line(block.line, element.line());
        let summary = match element.body() {
            ElementBody::Comment { short, .. } => short.clone(),
            ElementBody::Value { content } => content.clone(),
            ElementBody::Param {
                type_hint,
                variable,
                description,
            } => join_parts(&[type_hint.as_deref(), variable.as_deref(), Some(description)]),
            ElementBody::Typed {
                type_hint,
                description,
            } => join_parts(&[type_hint.as_deref(), Some(description)]),
        };
        if element.is_comment() {
            out.push_str(&format!("  {:>4}  comment  {}\n", line, summary));
        } else {
            out.push_str(&format!("  {:>4}  @{}  {}\n", line, element.tag(), summary));
        }
    }
    for unknown in &block.unknown_tags {
        out.push_str(&format!(
            "  {:>4}  unknown  @{}\n",
            file_line(block.line, unknown.line),
            unknown.name
        ));
    }
}

fn join_parts(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .flatten()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use crate::scan::RawDocblock;

    fn report(text: &str, line: usize) -> FileReport {
        let block = RawDocblock {
            text: text.into(),
            line,
        };
        let mut parser = Parser::new(text);
        let outcome = parser.parse();
        FileReport {
            source: "a.php".into(),
            blocks: vec![BlockReport::new(&block, &parser, outcome)],
        }
    }

    #[test]
    fn renders_elements_with_file_lines() {
        let out = TextRenderer.render(&report("/**\n * Hi @x there\n * @see Foo\n */", 5));
        assert_eq!(
            out,
            "a.php:5: docblock\n     6  comment  Hi @x there\n     7  @see  Foo\n     6  unknown  @x\n"
        );
    }

    #[test]
    fn renders_errors() {
        let out = TextRenderer.render(&report("/**\n * @since 1\n * @since 2\n */", 3));
        assert_eq!(out, "a.php:5: error: duplicate @since tag on line 3\n");
    }

    #[test]
    fn join_parts_skips_missing() {
        assert_eq!(join_parts(&[None, Some("$x"), Some("")]), "$x");
    }
}
