//! Error types for docblock parsing.

use thiserror::Error;

/// Errors returned by [`Parser::parse`](crate::Parser::parse).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A single-cardinality tag appeared a second time.
    #[error("duplicate @{tag} tag on line {line}")]
    DuplicateTag { tag: String, line: usize },

    /// The parser configuration is broken. Never caused by comment text.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ParseError {
    /// 1-based line within the docblock, for data errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::DuplicateTag { line, .. } => Some(*line),
            ParseError::Config(_) => None,
        }
    }
}

/// Integration errors in a tag set or its handlers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An extension declared a name owned by the base tag set.
    #[error("tag @{0} is reserved by the base tag set")]
    ReservedTag(String),

    /// An extension declared the same tag name twice.
    #[error("tag @{0} is declared more than once")]
    DuplicateDeclaration(String),

    /// An allowed tag has no handler.
    #[error("no handler registered for tag @{0}")]
    MissingHandler(String),

    /// A handler produced no element for its segment.
    #[error("handler for @{0} returned no element")]
    NoElement(String),

    /// A handler produced an element for another tag.
    #[error("handler for @{expected} returned an element for @{found}")]
    MismatchedElement { expected: String, found: String },

    /// A single-cardinality slot was written twice.
    #[error("slot for @{0} is already occupied")]
    SlotOccupied(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_message_names_tag_and_line() {
        let err = ParseError::DuplicateTag {
            tag: "since".into(),
            line: 4,
        };
        assert_eq!(err.to_string(), "duplicate @since tag on line 4");
        assert_eq!(err.line(), Some(4));
    }

    #[test]
    fn config_error_is_transparent() {
        let err: ParseError = ConfigError::MissingHandler("param".into()).into();
        assert_eq!(err.to_string(), "no handler registered for tag @param");
        assert_eq!(err.line(), None);
    }
}
