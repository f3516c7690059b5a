//! docblock — parse structured block comments into typed tag elements.
//!
//! A docblock is normalized into tokens ([`token`]), segmented at each
//! recognized `@tag` and handed to one handler per tag ([`parser`]). The
//! base parser knows `@see`, `@link`, `@deprecated` and `@since`; concrete
//! parsers add their own tags through an [`Extension`] record.
//!
//! ```text
//! let mut parser = Parser::new("/**\n * Frobs.\n * @since 1.2\n */");
//! parser.parse()?;
//! assert_eq!(parser.since().unwrap().content(), "1.2");
//! ```

pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod scan;
pub mod tags;
pub mod token;

pub use error::{ConfigError, ParseError};
pub use model::{Element, ElementBody, ElementId, Segment, UnknownTag};
pub use parser::class::ClassCommentParser;
pub use parser::function::FunctionCommentParser;
pub use parser::Parser;
pub use tags::{Cardinality, Extension, Handler, TagDescriptor, TagSet};
pub use token::Token;
