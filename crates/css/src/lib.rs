//! pxvw CSS
//!
//! Tokenizer, parser and serializer for the stylesheet tree that the
//! px-to-viewport converter walks.

pub mod error;
pub mod parser;
pub mod serializer;
pub mod tokenizer;

pub use error::{CssError, CssResult, SourceLocation};
pub use parser::{AtRule, CssParser, Declaration, Node, Rule, Stylesheet};
pub use tokenizer::{Span, Token, TokenKind, Tokenizer};
