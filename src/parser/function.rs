//! Function-level docblocks: `@param`, `@return` and `@throws`.

use super::Parser;
use crate::error::{ConfigError, ParseError};
use crate::model::{Element, ElementBody, Segment};
use crate::tags::{Cardinality, Extension};
use crate::token::{self, Token};
use std::ops::Deref;

/// Tags a function docblock accepts on top of the base set.
pub fn extension() -> Extension {
    Extension::new("function")
        .tag("param", Cardinality::Multiple, process_param)
        .tag("return", Cardinality::Single, process_typed)
        .tag("throws", Cardinality::Multiple, process_typed)
}

/// `@param [type] [$name] [description]`
pub fn process_param(seg: Segment<'_>) -> Option<Element> {
    let (head, _) = take_words(seg.tokens, 2);
    let body = match head.as_slice() {
        [first, ..] if is_variable(first) => ElementBody::Param {
            type_hint: None,
            variable: Some(first.to_string()),
            description: take_words(seg.tokens, 1).1,
        },
        [first, second] if is_variable(second) => ElementBody::Param {
            type_hint: Some(first.to_string()),
            variable: Some(second.to_string()),
            description: take_words(seg.tokens, 2).1,
        },
        [first, ..] => ElementBody::Param {
            type_hint: Some(first.to_string()),
            variable: None,
            description: take_words(seg.tokens, 1).1,
        },
        [] => ElementBody::Param {
            type_hint: None,
            variable: None,
            description: String::new(),
        },
    };
    Some(seg.into_element(body))
}

/// `@return type [description]` and `@throws type [description]`
pub fn process_typed(seg: Segment<'_>) -> Option<Element> {
    let (head, description) = take_words(seg.tokens, 1);
    Some(seg.into_element(ElementBody::Typed {
        type_hint: head.first().map(|t| t.to_string()),
        description,
    }))
}

fn is_variable(word: &str) -> bool {
    word.trim_start_matches('&')
        .trim_start_matches("...")
        .starts_with('$')
}

/// Up to `n` leading words, and the trimmed text after them.
fn take_words(tokens: &[Token], n: usize) -> (Vec<&str>, String) {
    let mut words = Vec::new();
    let mut rest = tokens.len();
    for (i, t) in tokens.iter().enumerate() {
        if t.is_whitespace() {
            continue;
        }
        if words.len() == n {
            rest = i;
            break;
        }
        words.push(t.as_str());
    }
    (words, token::join(&tokens[rest..]).trim().to_string())
}

/// Parser for function docblocks with typed accessors.
#[derive(Debug, Clone)]
pub struct FunctionCommentParser {
    inner: Parser,
}

impl FunctionCommentParser {
    pub fn new(raw: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: Parser::with_extension(raw, extension())?,
        })
    }

    pub fn parse(&mut self) -> Result<(), ParseError> {
        self.inner.parse()
    }

    pub fn params(&self) -> Vec<&Element> {
        self.inner.tagged("param")
    }

    pub fn return_element(&self) -> Option<&Element> {
        self.inner.single("return")
    }

    pub fn throws(&self) -> Vec<&Element> {
        self.inner.tagged("throws")
    }
}

impl Deref for FunctionCommentParser {
    type Target = Parser;

    fn deref(&self) -> &Parser {
        &self.inner
    }
}
