//! # MDN Core
//!
//! Reader and writer for the MDN markup notation: a small, line-oriented
//! structured text format describing a tree of named elements, each
//! carrying ordered, named parameters with zero or more string values.
//!
//! ```text
//! # a comment
//! <window[title("Main"), size("800","600")]>
//!     <button[label("OK")]/>
//! </>
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! let doc = mdn_core::parse(r#"<window[title("Main")]/>"#).unwrap();
//!
//! let window = doc.element("window").unwrap();
//! assert_eq!(window.param("title").unwrap().value(0), Some("Main"));
//! ```
//!
//! ## Writing
//!
//! Documents built programmatically serialize to canonical text:
//!
//! ```rust
//! use mdn_core::{Document, Element, Param};
//!
//! let doc = Document::new()
//!     .with_element(Element::new("config").with_param(Param::new("debug").with_value("true")));
//!
//! assert_eq!(mdn_core::format(&doc), r#"<config[debug("true")]/>"#);
//! ```
//!
//! ## Errors
//!
//! Parsing fails fast with a [`LexError`] for character-level violations
//! (unterminated value, raw line break in a value, malformed close marker)
//! or a [`ParseError`] for grammar violations at the token level. Both
//! carry the offending position; neither is recoverable.

pub mod ast;
pub mod error;
pub mod format;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{Document, Element, Param};
pub use error::{Error, LexError, LexErrorKind, ParseError, ParseErrorKind};
pub use token::{Token, TokenKind};

/// Parse markup text into a [`Document`].
///
/// Wires the lexer and the parser together; fails with the first
/// character-level or grammar violation.
pub fn parse(source: &str) -> Result<Document, Error> {
    let tokens = lexer::tokenize(source)?;
    let document = parser::parse(&tokens)?;
    Ok(document)
}

/// Render a [`Document`] as canonical markup text.
pub fn format(document: &Document) -> String {
    format::format_document(document)
}
