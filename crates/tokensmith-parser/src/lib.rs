//! Parser for JSON design-token collections.
//!
//! Turns a collection file into a [`TokenDocument`] and exposes the value-shape
//! recognizers (references, dimensions, hex colors) used by the exporters.
//! Built on `nom` for the small value grammars.

mod document;
pub mod lexer;

pub use document::parse;
pub use lexer::{is_dimension, is_hex_color, is_reference, is_unitless_integer, parse_reference};

use tokensmith_core::{ParseError, TokenDocument};

/// Parse a token document from source text.
///
/// # Example
///
/// ```ignore
/// use tokensmith_parser::parse_document;
///
/// let source = r#"{ "colors": { "blue": { "$value": "#0000FF" } } }"#;
/// let doc = parse_document(source)?;
/// ```
pub fn parse_document(source: &str) -> Result<TokenDocument, ParseError> {
    parse(source)
}
