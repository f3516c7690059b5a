//! Tag sets — the base tags, extension records and their merge.
//!
//! A parser recognizes the four base tags plus whatever its [`Extension`]
//! declares. [`TagSet::merge`] is total: every allowed name maps to exactly
//! one [`Cardinality`], and an extension can never shadow a base name.

use crate::error::ConfigError;
use crate::model::{Element, Segment, COMMENT_TAG};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Turns one segment into its element. `None` is a configuration error.
pub type Handler = fn(Segment<'_>) -> Option<Element>;

/// How often a tag may occur in one docblock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    Single,
    Multiple,
}

/// An allowed tag name and its cardinality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDescriptor {
    pub name: String,
    pub cardinality: Cardinality,
}

impl TagDescriptor {
    pub fn new(name: impl Into<String>, cardinality: Cardinality) -> Self {
        Self {
            name: name.into(),
            cardinality,
        }
    }
}

/// Tags every parser accepts.
pub const BASE_TAGS: &[(&str, Cardinality)] = &[
    ("see", Cardinality::Multiple),
    ("link", Cardinality::Multiple),
    ("deprecated", Cardinality::Single),
    ("since", Cardinality::Single),
];

/// Names an extension may not declare.
pub fn is_reserved(name: &str) -> bool {
    name == COMMENT_TAG || BASE_TAGS.iter().any(|(n, _)| *n == name)
}

// -- Extension record ---------------------------------------------------------

/// Additional tags for a concrete parser, with one handler per tag.
#[derive(Clone, Default)]
pub struct Extension {
    name: String,
    descriptors: Vec<TagDescriptor>,
    handlers: HashMap<String, Handler>,
}

impl Extension {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Declare a tag together with its handler.
    pub fn tag(self, name: &str, cardinality: Cardinality, handler: Handler) -> Self {
        self.declare(name, cardinality).handler(name, handler)
    }

    /// Declare a tag without a handler.
    pub fn declare(mut self, name: &str, cardinality: Cardinality) -> Self {
        self.descriptors.push(TagDescriptor::new(name, cardinality));
        self
    }

    /// Register (or replace) the handler for a tag.
    pub fn handler(mut self, name: &str, handler: Handler) -> Self {
        self.handlers.insert(name.to_string(), handler);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn descriptors(&self) -> &[TagDescriptor] {
        &self.descriptors
    }

    pub(crate) fn handler_for(&self, tag: &str) -> Option<Handler> {
        self.handlers.get(tag).copied()
    }
}

impl fmt::Debug for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut handled: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        handled.sort_unstable();
        f.debug_struct("Extension")
            .field("name", &self.name)
            .field("descriptors", &self.descriptors)
            .field("handlers", &handled)
            .finish()
    }
}

// -- Merged tag set -----------------------------------------------------------

/// Allowed tag names of one parser, base tags included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSet {
    tags: HashMap<String, Cardinality>,
}

impl TagSet {
    /// The base tags only.
    pub fn base() -> Self {
        let tags = BASE_TAGS
            .iter()
            .map(|(name, cardinality)| (name.to_string(), *cardinality))
            .collect();
        Self { tags }
    }

    /// Base tags plus the extension's descriptors.
    pub fn merge(extension: &Extension) -> Result<Self, ConfigError> {
        let mut set = Self::base();
        let mut seen: Vec<&str> = Vec::new();
        for desc in extension.descriptors() {
            if is_reserved(&desc.name) {
                return Err(ConfigError::ReservedTag(desc.name.clone()));
            }
            if seen.contains(&desc.name.as_str()) {
                return Err(ConfigError::DuplicateDeclaration(desc.name.clone()));
            }
            seen.push(&desc.name);
            set.tags.insert(desc.name.clone(), desc.cardinality);
        }
        Ok(set)
    }

    pub fn cardinality(&self, name: &str) -> Option<Cardinality> {
        self.tags.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    /// Allowed names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tags.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
