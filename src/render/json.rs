//! JSON renderer — structured output for tooling integration.

use super::{FileReport, Renderer};

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, report: &FileReport) -> String {
        // Serializing plain owned data into a String cannot fail
        let mut out = serde_json::to_string_pretty(report).unwrap_or_default();
        out.push('\n');
        out
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
