//! Renderer module — trait-based format dispatch for parse reports.

pub mod json;
pub mod text;

use crate::error::ParseError;
use crate::model::{Element, UnknownTag};
use crate::parser::Parser;
use crate::scan::RawDocblock;
use serde::Serialize;
use thiserror::Error;

/// Parse results for every docblock in one input.
#[derive(Debug, Default, Serialize)]
pub struct FileReport {
    pub source: String,
    pub blocks: Vec<BlockReport>,
}

impl FileReport {
    pub fn failures(&self) -> usize {
        self.blocks.iter().filter(|b| b.error.is_some()).count()
    }
}

/// One docblock's elements, or the error that stopped it.
#[derive(Debug, Serialize)]
pub struct BlockReport {
    /// 1-based line of the docblock in its file.
    pub line: usize,
    pub tag_order: Vec<String>,
    pub elements: Vec<Element>,
    pub unknown_tags: Vec<UnknownTag>,
    pub error: Option<BlockError>,
}

/// A failed docblock, with the file line when the error has one.
#[derive(Debug, Serialize)]
pub struct BlockError {
    pub line: Option<usize>,
    pub message: String,
}

impl BlockReport {
    /// Collect a parsed docblock. `outcome` is the result of `parser.parse()`.
    pub fn new(block: &RawDocblock, parser: &Parser, outcome: Result<(), ParseError>) -> Self {
        Self {
            line: block.line,
            tag_order: parser.tag_order().to_vec(),
            elements: parser.elements().to_vec(),
            unknown_tags: parser.unknown_tags().to_vec(),
            error: outcome.err().map(|e| BlockError {
                line: e.line().map(|l| block.file_line(l)),
                message: e.to_string(),
            }),
        }
    }
}

/// Trait for rendering a report into a specific output format.
pub trait Renderer {
    fn render(&self, report: &FileReport) -> String;
    fn file_extension(&self) -> &str;
}

#[derive(Debug, Error)]
#[error("unknown format: {0}. Use text or json")]
pub struct UnknownFormat(String);

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>, UnknownFormat> {
    match format {
        "text" | "txt" => Ok(Box::new(text::TextRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(UnknownFormat(format.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_formats() {
        assert_eq!(create_renderer("json").unwrap().file_extension(), "json");
        assert_eq!(create_renderer("text").unwrap().file_extension(), "txt");
    }

    #[test]
    fn unknown_format_message() {
        let err = create_renderer("xml").err().unwrap();
        assert_eq!(err.to_string(), "unknown format: xml. Use text or json");
    }

    #[test]
    fn error_line_is_file_relative() {
        let block = RawDocblock {
            text: "/**\n * @since 1\n * @since 2\n */".into(),
            line: 20,
        };
        let mut parser = Parser::new(&block.text);
        let outcome = parser.parse();
        let report = BlockReport::new(&block, &parser, outcome);
        let error = report.error.unwrap();
        assert_eq!(error.line, Some(22));
        assert!(report.elements.is_empty());
    }
}
