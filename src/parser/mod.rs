//! Docblock parser — segments the token stream and dispatches to handlers.
//!
//! The scan walks the tokens once. Every recognized `@tag` token closes the
//! segment that started at the previous tag (or the description, for the
//! first one) and hands it to that segment's handler, so dispatch always runs
//! one tag behind the scan. The last segment is flushed after the loop.

pub mod builtin;
pub mod class;
pub mod function;

use crate::error::{ConfigError, ParseError};
use crate::model::{Element, ElementId, Segment, UnknownTag, COMMENT_TAG};
use crate::tags::{Cardinality, Extension, Handler, TagSet};
use crate::token::{line_of, normalize, Token};
use std::collections::{HashMap, HashSet};

/// Parser for one docblock.
///
/// `parse` takes `&mut self`, so a single instance can never be parsed from
/// two threads at once. Independent instances share nothing.
#[derive(Debug, Clone)]
pub struct Parser {
    tokens: Vec<Token>,
    tags: TagSet,
    extension: Option<Extension>,
    outcome: Option<Result<(), ParseError>>,
    elements: Vec<Element>,
    comment: Option<ElementId>,
    by_tag: HashMap<String, Vec<ElementId>>,
    tag_order: Vec<String>,
    unknown: Vec<UnknownTag>,
}

impl Parser {
    /// Parser accepting the base tags only.
    pub fn new(raw: &str) -> Self {
        Self::build(raw, TagSet::base(), None)
    }

    /// Parser accepting the base tags plus the extension's tags.
    pub fn with_extension(raw: &str, extension: Extension) -> Result<Self, ConfigError> {
        let tags = TagSet::merge(&extension)?;
        Ok(Self::build(raw, tags, Some(extension)))
    }

    fn build(raw: &str, tags: TagSet, extension: Option<Extension>) -> Self {
        Self {
            tokens: normalize(raw),
            tags,
            extension,
            outcome: None,
            elements: Vec::new(),
            comment: None,
            by_tag: HashMap::new(),
            tag_order: Vec::new(),
            unknown: Vec::new(),
        }
    }

    /// Parse the docblock. Only the first call does any work; later calls
    /// return the first call's result.
    pub fn parse(&mut self) -> Result<(), ParseError> {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }
        let outcome = self.scan();
        if outcome.is_err() {
            self.clear();
        }
        self.outcome = Some(outcome.clone());
        outcome
    }

    pub fn is_parsed(&self) -> bool {
        self.outcome.is_some()
    }

    // -- Scan -----------------------------------------------------------------

    fn scan(&mut self) -> Result<(), ParseError> {
        let mut found: HashSet<String> = HashSet::new();
        let mut previous_tag: Option<usize> = None;
        let mut saw_content = false;

        for i in 0..self.tokens.len() {
            let token = &self.tokens[i];
            if !token.is_whitespace() {
                saw_content = true;
            }
            let Some(name) = token.tag_name() else {
                continue;
            };
            let Some(cardinality) = self.tags.cardinality(name) else {
                if !name.is_empty() {
                    let line = line_of(&self.tokens, i);
                    tracing::trace!(tag = name, line, "unknown tag left in segment");
                    self.unknown.push(UnknownTag {
                        name: name.to_string(),
                        line,
                    });
                }
                continue;
            };
            let name = name.to_string();

            if cardinality == Cardinality::Single && found.contains(&name) {
                return Err(ParseError::DuplicateTag {
                    line: line_of(&self.tokens, i),
                    tag: name,
                });
            }
            tracing::trace!(tag = %name, index = i, "tag boundary");
            found.insert(name.clone());
            self.tag_order.push(name);

            self.flush(previous_tag, i)?;
            previous_tag = Some(i);
        }

        if saw_content {
            self.flush(previous_tag, self.tokens.len())?;
        }
        Ok(())
    }

    /// Route the segment that ends before `end` to its handler.
    fn flush(&mut self, previous_tag: Option<usize>, end: usize) -> Result<(), ParseError> {
        let (tag, start, line) = match previous_tag {
            Some(pos) => {
                let tag = self.tokens[pos].tag_name().unwrap_or_default().to_string();
                (tag, pos + 1, line_of(&self.tokens, pos))
            }
            None => {
                let line = self.tokens[..end]
                    .iter()
                    .position(|t| !t.is_whitespace())
                    .map_or(1, |p| line_of(&self.tokens, p));
                (COMMENT_TAG.to_string(), 0, line)
            }
        };

        let handler = self
            .handler_for(&tag)
            .ok_or_else(|| ConfigError::MissingHandler(tag.clone()))?;
        let segment = Segment {
            tag: &tag,
            tokens: &self.tokens[start..end],
            previous: self.elements.len().checked_sub(1).map(ElementId),
            line,
        };
        tracing::debug!(tag = %tag, line, tokens = end - start, "dispatching segment");

        let element = handler(segment).ok_or_else(|| ConfigError::NoElement(tag.clone()))?;
        if element.tag() != tag {
            return Err(ConfigError::MismatchedElement {
                expected: tag,
                found: element.tag().to_string(),
            }
            .into());
        }
        self.store(element)
    }

    fn handler_for(&self, tag: &str) -> Option<Handler> {
        builtin::handler(tag).or_else(|| {
            self.extension
                .as_ref()
                .and_then(|ext| ext.handler_for(tag))
        })
    }

    fn store(&mut self, element: Element) -> Result<(), ParseError> {
        let id = ElementId(self.elements.len());
        if element.is_comment() {
            if self.comment.is_some() {
                return Err(ConfigError::SlotOccupied(COMMENT_TAG.to_string()).into());
            }
            self.comment = Some(id);
        } else {
            let single = self.tags.cardinality(element.tag()) == Some(Cardinality::Single);
            let slot = self.by_tag.entry(element.tag().to_string()).or_default();
            if single && !slot.is_empty() {
                return Err(ConfigError::SlotOccupied(element.tag().to_string()).into());
            }
            slot.push(id);
        }
        self.elements.push(element);
        Ok(())
    }

    fn clear(&mut self) {
        self.elements.clear();
        self.comment = None;
        self.by_tag.clear();
        self.tag_order.clear();
        self.unknown.clear();
    }

    // -- Accessors ------------------------------------------------------------

    /// The description element, if the docblock has any content.
    pub fn comment(&self) -> Option<&Element> {
        self.comment.map(|id| &self.elements[id.0])
    }

    pub fn sees(&self) -> Vec<&Element> {
        self.tagged("see")
    }

    pub fn links(&self) -> Vec<&Element> {
        self.tagged("link")
    }

    pub fn deprecated(&self) -> Option<&Element> {
        self.single("deprecated")
    }

    pub fn since(&self) -> Option<&Element> {
        self.single("since")
    }

    /// All elements for a tag, in source order.
    pub fn tagged(&self, tag: &str) -> Vec<&Element> {
        self.by_tag
            .get(tag)
            .map(|ids| ids.iter().map(|id| &self.elements[id.0]).collect())
            .unwrap_or_default()
    }

    /// The first element for a tag.
    pub fn single(&self, tag: &str) -> Option<&Element> {
        self.by_tag
            .get(tag)
            .and_then(|ids| ids.first())
            .map(|id| &self.elements[id.0])
    }

    /// Every element in document order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    /// The element preceding `element` in document order.
    pub fn previous(&self, element: &Element) -> Option<&Element> {
        element.previous().and_then(|id| self.element(id))
    }

    /// Recognized tag names in the order they were found.
    pub fn tag_order(&self) -> &[String] {
        &self.tag_order
    }

    pub fn unknown_tags(&self) -> &[UnknownTag] {
        &self.unknown
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn tag_set(&self) -> &TagSet {
        &self.tags
    }
}
