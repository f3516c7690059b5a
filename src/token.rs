//! Docblock normalizer — strips comment decoration and splits into tokens.
//!
//! Each physical line is trimmed, loses at most one marker (`/**`, then
//! `*/`, then a leading `*`), gets its newline back and is split into
//! alternating word and whitespace tokens. Newlines stay inside whitespace
//! tokens so line numbers can be recovered later with [`line_of`].

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

// ASCII whitespace only; NBSP and other Unicode spaces stay inside words
static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?-u:\s)+").unwrap());
static RE_LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r\n|\r|\n").unwrap());

/// One fragment of a normalized docblock. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Token {
    /// A run of non-whitespace characters.
    Word(String),
    /// A run of whitespace, possibly containing newlines.
    Space(String),
}

impl Token {
    pub fn as_str(&self) -> &str {
        match self {
            Token::Word(s) | Token::Space(s) => s,
        }
    }

    pub fn is_whitespace(&self) -> bool {
        matches!(self, Token::Space(_))
    }

    /// Number of newline characters carried by this token.
    pub fn newlines(&self) -> usize {
        match self {
            Token::Word(_) => 0,
            Token::Space(s) => line_breaks(s),
        }
    }

    /// Tag name if this token starts with the `@` sigil.
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Token::Word(s) => s.strip_prefix('@'),
            Token::Space(_) => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize a raw docblock into its ordered token sequence.
pub fn normalize(raw: &str) -> Vec<Token> {
    let mut lines: Vec<&str> = RE_LINE_BREAK.split(raw).collect();
    // A trailing line break does not open another line
    if lines.last() == Some(&"") {
        lines.pop();
    }
    let mut tokens = Vec::new();
    for line in lines {
        let trimmed = line.trim_matches(|c: char| c.is_ascii_whitespace());
        let mut cleaned = strip_marker(trimmed).to_string();
        cleaned.push('\n');
        split_line(&cleaned, &mut tokens);
    }
    tokens
}

/// Remove at most one comment marker, checked in priority order.
fn strip_marker(line: &str) -> &str {
    if let Some(rest) = line.strip_prefix("/**") {
        rest
    } else if let Some(rest) = line.strip_suffix("*/") {
        rest
    } else if let Some(rest) = line.strip_prefix('*') {
        rest
    } else {
        line
    }
}

/// Split on whitespace runs, keeping the runs as tokens.
fn split_line(line: &str, out: &mut Vec<Token>) {
    let mut last = 0;
    for m in RE_WHITESPACE.find_iter(line) {
        if m.start() > last {
            out.push(Token::Word(line[last..m.start()].to_string()));
        }
        out.push(Token::Space(m.as_str().to_string()));
        last = m.end();
    }
    if last < line.len() {
        out.push(Token::Word(line[last..].to_string()));
    }
}

/// Number of line breaks (`\r\n`, `\r` or `\n`) in `text`.
pub fn line_breaks(text: &str) -> usize {
    RE_LINE_BREAK.find_iter(text).count()
}

/// 1-based line of the token at `index`: newlines strictly before it, plus one.
pub fn line_of(tokens: &[Token], index: usize) -> usize {
    tokens.iter().take(index).map(Token::newlines).sum::<usize>() + 1
}

/// Concatenate tokens back into text.
pub fn join(tokens: &[Token]) -> String {
    tokens.iter().map(Token::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(Token::as_str).collect()
    }

    #[test]
    fn strips_open_marker() {
        assert_eq!(strip_marker("/** Summary"), " Summary");
    }

    #[test]
    fn strips_close_marker() {
        assert_eq!(strip_marker("*/"), "");
        assert_eq!(strip_marker("end */"), "end ");
    }

    #[test]
    fn strips_single_continuation_marker() {
        assert_eq!(strip_marker("* text"), " text");
        assert_eq!(strip_marker("** text"), "* text");
    }

    #[test]
    fn one_line_block_keeps_close_marker() {
        // Only the open marker is removed when both are on one line
        assert_eq!(strip_marker("/** short */"), " short */");
    }

    #[test]
    fn empty_line_is_untouched() {
        assert_eq!(strip_marker(""), "");
    }

    #[test]
    fn normalize_interleaves_whitespace() {
        let tokens = normalize("/**\n * Hello  world\n */");
        assert_eq!(texts(&tokens), vec!["\n", " ", "Hello", "  ", "world", "\n", "\n"]);
        assert!(tokens[1].is_whitespace());
        assert!(!tokens[2].is_whitespace());
    }

    #[test]
    fn marker_only_line_keeps_newline() {
        let tokens = normalize("*\n*");
        assert_eq!(texts(&tokens), vec!["\n", "\n"]);
    }

    #[test]
    fn no_empty_tokens() {
        let tokens = normalize("/**\n *\n * a\tb \n\n */");
        assert!(tokens.iter().all(|t| !t.as_str().is_empty()));
    }

    #[test]
    fn line_of_counts_preceding_newlines() {
        let tokens = normalize("/**\n * one\n * @since 1.0\n */");
        let at = tokens.iter().position(|t| t.as_str() == "@since").unwrap();
        assert_eq!(line_of(&tokens, at), 3);
        assert_eq!(line_of(&tokens, 0), 1);
    }

    #[test]
    fn carriage_return_lines_are_split() {
        let tokens = normalize("/**\r * one\r * two\r */");
        assert_eq!(texts(&tokens), vec!["\n", " ", "one", "\n", " ", "two", "\n", "\n"]);
    }

    #[test]
    fn crlf_and_cr_count_as_one_break() {
        assert_eq!(line_breaks("a\r\nb\rc\nd"), 3);
        assert_eq!(Token::Space("\r\n".into()).newlines(), 1);
    }

    #[test]
    fn trailing_break_adds_no_line() {
        assert_eq!(normalize("x\n"), normalize("x"));
        assert!(normalize("").is_empty());
    }

    #[test]
    fn unicode_space_does_not_split_words() {
        let tokens = normalize(" * a\u{2003}@deprecated b\u{a0}c");
        assert_eq!(
            texts(&tokens),
            vec![" ", "a\u{2003}@deprecated", " ", "b\u{a0}c", "\n"]
        );
    }

    #[test]
    fn tag_name_requires_sigil() {
        assert_eq!(Token::Word("@see".into()).tag_name(), Some("see"));
        assert_eq!(Token::Word("see".into()).tag_name(), None);
        assert_eq!(Token::Space(" ".into()).tag_name(), None);
    }

    #[test]
    fn join_restores_text() {
        let tokens = normalize(" * a b");
        assert_eq!(join(&tokens), " a b\n");
    }
}
