//! Locate `/** ... */` docblocks in a source file.

use crate::token::line_breaks;
use regex::Regex;
use std::sync::LazyLock;

static RE_DOCBLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*\*.*?\*/").unwrap());

/// A docblock's raw text and where it starts in its file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocblock {
    pub text: String,
    /// 1-based line of the opening marker.
    pub line: usize,
}

impl RawDocblock {
    /// Translate a line within the docblock into a line of the file.
    pub fn file_line(&self, docblock_line: usize) -> usize {
        file_line(self.line, docblock_line)
    }
}

/// File line of `docblock_line` in a docblock that opens on `block_line`.
pub fn file_line(block_line: usize, docblock_line: usize) -> usize {
    block_line + docblock_line.saturating_sub(1)
}

/// Every docblock in `source`, in order.
pub fn docblocks(source: &str) -> Vec<RawDocblock> {
    let mut line = 1;
    let mut last = 0;
    RE_DOCBLOCK
        .find_iter(source)
        .map(|m| {
            line += line_breaks(&source[last..m.start()]);
            last = m.start();
            RawDocblock {
                text: m.as_str().to_string(),
                line,
            }
        })
        .collect()
}
