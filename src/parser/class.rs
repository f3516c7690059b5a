//! Class-level docblocks: file header tags such as `@package` and `@author`.

use super::builtin::process_value;
use super::Parser;
use crate::error::{ConfigError, ParseError};
use crate::model::Element;
use crate::tags::{Cardinality, Extension};
use std::ops::Deref;

/// Tags a class docblock accepts on top of the base set.
pub fn extension() -> Extension {
    Extension::new("class")
        .tag("category", Cardinality::Single, process_value)
        .tag("package", Cardinality::Single, process_value)
        .tag("subpackage", Cardinality::Single, process_value)
        .tag("author", Cardinality::Multiple, process_value)
        .tag("copyright", Cardinality::Multiple, process_value)
        .tag("license", Cardinality::Single, process_value)
        .tag("version", Cardinality::Single, process_value)
}

/// Parser for class docblocks with typed accessors.
#[derive(Debug, Clone)]
pub struct ClassCommentParser {
    inner: Parser,
}

impl ClassCommentParser {
    pub fn new(raw: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: Parser::with_extension(raw, extension())?,
        })
    }

    pub fn parse(&mut self) -> Result<(), ParseError> {
        self.inner.parse()
    }

    pub fn category(&self) -> Option<&Element> {
        self.inner.single("category")
    }

    pub fn package(&self) -> Option<&Element> {
        self.inner.single("package")
    }

    pub fn subpackage(&self) -> Option<&Element> {
        self.inner.single("subpackage")
    }

    pub fn authors(&self) -> Vec<&Element> {
        self.inner.tagged("author")
    }

    pub fn copyrights(&self) -> Vec<&Element> {
        self.inner.tagged("copyright")
    }

    pub fn license(&self) -> Option<&Element> {
        self.inner.single("license")
    }

    pub fn version(&self) -> Option<&Element> {
        self.inner.single("version")
    }
}

impl Deref for ClassCommentParser {
    type Target = Parser;

    fn deref(&self) -> &Parser {
        &self.inner
    }
}
