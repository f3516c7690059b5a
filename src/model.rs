//! Data model for parsed docblocks — segments, elements and their bodies.

use crate::token::{self, Token};
use serde::Serialize;

/// Pseudo-tag name of the leading free-text description.
pub const COMMENT_TAG: &str = "comment";

/// Position of an element in its parser's document-ordered element list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ElementId(pub(crate) usize);

impl ElementId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A token range handed to a tag handler.
///
/// The tag-name token itself is not part of `tokens`.
#[derive(Debug, Clone, Copy)]
pub struct Segment<'a> {
    pub tag: &'a str,
    pub tokens: &'a [Token],
    /// Element produced just before this segment, if any.
    pub previous: Option<ElementId>,
    pub line: usize,
}

impl<'a> Segment<'a> {
    /// Segment text with surrounding whitespace trimmed.
    pub fn content(&self) -> String {
        token::join(self.tokens).trim().to_string()
    }

    /// Non-whitespace tokens in order.
    pub fn words(&self) -> impl Iterator<Item = &'a str> {
        let tokens: &'a [Token] = self.tokens;
        tokens
            .iter()
            .filter(|t| !t.is_whitespace())
            .map(Token::as_str)
    }

    /// Build the element for this segment.
    pub fn into_element(self, body: ElementBody) -> Element {
        Element {
            tag: self.tag.to_string(),
            line: self.line,
            previous: self.previous,
            tokens: self.tokens.to_vec(),
            body,
        }
    }
}

/// Structured result of one segment. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    tag: String,
    line: usize,
    previous: Option<ElementId>,
    tokens: Vec<Token>,
    body: ElementBody,
}

impl Element {
    /// Tag name, or `"comment"` for the description.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// 1-based starting line within the docblock.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn previous(&self) -> Option<ElementId> {
        self.previous
    }

    /// Raw tokens the element was built from.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn body(&self) -> &ElementBody {
        &self.body
    }

    pub fn is_comment(&self) -> bool {
        self.tag == COMMENT_TAG
    }

    /// Element text with surrounding whitespace trimmed.
    pub fn content(&self) -> String {
        token::join(&self.tokens).trim().to_string()
    }

    pub fn words(&self) -> Vec<&str> {
        self.tokens
            .iter()
            .filter(|t| !t.is_whitespace())
            .map(Token::as_str)
            .collect()
    }

    /// Whitespace between the tag name and its value on the tag line.
    pub fn whitespace_before(&self) -> &str {
        match self.tokens.first() {
            Some(t) if t.is_whitespace() && t.newlines() == 0 => t.as_str(),
            _ => "",
        }
    }
}

/// Tag-specific payload of an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementBody {
    /// Description, split at the first blank line.
    Comment { short: String, long: String },
    /// Plain tag value (`@see`, `@since`, `@author`, ...).
    Value { content: String },
    /// `@param type $name description`
    Param {
        type_hint: Option<String>,
        variable: Option<String>,
        description: String,
    },
    /// `@return type description` / `@throws type description`
    Typed {
        type_hint: Option<String>,
        description: String,
    },
}

/// A tag sigil whose name is not in the allowed set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnknownTag {
    pub name: String,
    pub line: usize,
}

/// Split description text into its first paragraph and the remainder.
pub(crate) fn split_comment(text: &str) -> (String, String) {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let Some(start) = lines.iter().position(|l| !l.is_empty()) else {
        return (String::new(), String::new());
    };
    let end = lines[start..]
        .iter()
        .position(|l| l.is_empty())
        .map_or(lines.len(), |p| start + p);
    let short = lines[start..end].join(" ");
    let long = lines[end..].join("\n").trim().to_string();
    (short, long)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::normalize;

    #[test]
    fn split_comment_short_and_long() {
        let (short, long) = split_comment("\n Short line\n continues.\n\n Long part.\n\n More.\n");
        assert_eq!(short, "Short line continues.");
        assert_eq!(long, "Long part.\n\nMore.");
    }

    #[test]
    fn split_comment_blank() {
        assert_eq!(split_comment("\n \n"), (String::new(), String::new()));
    }

    #[test]
    fn segment_builds_element() {
        let tokens = normalize(" * Foo::bar()  extra");
        let seg = Segment {
            tag: "see",
            tokens: &tokens,
            previous: Some(ElementId(0)),
            line: 2,
        };
        assert_eq!(seg.words().collect::<Vec<_>>(), vec!["Foo::bar()", "extra"]);
        let element = seg.into_element(ElementBody::Value {
            content: seg.content(),
        });
        assert_eq!(element.tag(), "see");
        assert_eq!(element.line(), 2);
        assert_eq!(element.previous(), Some(ElementId(0)));
        assert_eq!(element.content(), "Foo::bar()  extra");
        assert_eq!(element.whitespace_before(), " ");
        assert!(!element.is_comment());
    }

    #[test]
    fn whitespace_before_ignores_line_break() {
        let tokens = normalize("\n * value");
        let element = Segment {
            tag: "since",
            tokens: &tokens,
            previous: None,
            line: 1,
        }
        .into_element(ElementBody::Value {
            content: String::new(),
        });
        assert_eq!(element.whitespace_before(), "");
    }
}
