//! CSS Parser
//!
//! Parses stylesheets into a tree of rules, at-rules, declarations and
//! comments. Selectors, values and at-rule params are kept as the raw source
//! text so that rewriting them later leaves everything else untouched.

use crate::error::{CssError, CssResult};
use crate::tokenizer::{Token, TokenKind, Tokenizer};

/// A CSS stylesheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    /// Top-level nodes
    pub nodes: Vec<Node>,
}

impl Stylesheet {
    /// Parse a CSS stylesheet
    pub fn parse(input: &str) -> CssResult<Self> {
        let mut parser = CssParser::new(input)?;
        parser.parse_stylesheet()
    }
}

/// A node in the stylesheet tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Style rule (selector { ... })
    Rule(Rule),
    /// At-rule, with or without a block
    AtRule(AtRule),
    /// Declaration (property: value)
    Declaration(Declaration),
    /// Comment text, without the delimiters
    Comment(String),
}

/// A style rule
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Selector text as written
    pub selector: String,
    /// Declarations, comments and nested rules
    pub nodes: Vec<Node>,
}

/// An at-rule (e.g., @media, @import, @font-face)
#[derive(Debug, Clone, PartialEq)]
pub struct AtRule {
    /// Name without the '@'
    pub name: String,
    /// Everything between the name and the block or semicolon
    pub params: String,
    /// Block contents; `None` for statement at-rules like @import
    pub nodes: Option<Vec<Node>>,
}

/// A CSS declaration (property: value)
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Property name
    pub property: String,
    /// Raw value text, without `!important`
    pub value: String,
    /// Whether !important was specified
    pub important: bool,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            important: false,
        }
    }
}

/// How a statement ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    /// ';' (consumed)
    Semicolon,
    /// '{' (consumed)
    Block,
    /// '}' of the enclosing block (not consumed)
    BlockEnd,
    /// End of input
    Eof,
}

/// CSS Parser
pub struct CssParser<'a> {
    tokenizer: Tokenizer<'a>,
    current: Token,
}

impl<'a> CssParser<'a> {
    /// Create a new parser
    pub fn new(input: &'a str) -> CssResult<Self> {
        let mut tokenizer = Tokenizer::new(input);
        let current = tokenizer.next_token()?;
        Ok(Self { tokenizer, current })
    }

    fn input(&self) -> &'a str {
        self.tokenizer.input()
    }

    fn advance(&mut self) -> CssResult<Token> {
        let next = self.tokenizer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn skip_whitespace(&mut self) -> CssResult<()> {
        while self.current.kind == TokenKind::Whitespace {
            self.advance()?;
        }
        Ok(())
    }

    /// Parse a complete stylesheet
    pub fn parse_stylesheet(&mut self) -> CssResult<Stylesheet> {
        let nodes = self.parse_block(true)?;
        Ok(Stylesheet { nodes })
    }

    /// Parse the contents of a block, or the whole input when `top_level`
    fn parse_block(&mut self, top_level: bool) -> CssResult<Vec<Node>> {
        let mut nodes = Vec::new();

        loop {
            self.skip_whitespace()?;

            match self.current.kind {
                TokenKind::Eof => break,
                TokenKind::RightBrace => {
                    if top_level {
                        return Err(CssError::unexpected_char('}', self.current.location));
                    }
                    self.advance()?;
                    break;
                }
                TokenKind::Semicolon => {
                    // Stray semicolon
                    self.advance()?;
                }
                TokenKind::Comment => {
                    let token = self.advance()?;
                    nodes.push(Node::Comment(comment_body(token.text(self.input())).to_string()));
                }
                _ => {
                    if let Some(node) = self.parse_statement()? {
                        nodes.push(node);
                    }
                }
            }
        }

        Ok(nodes)
    }

    /// Parse a rule, at-rule or declaration starting at the current token
    fn parse_statement(&mut self) -> CssResult<Option<Node>> {
        let input = self.input();
        let start = self.current.span.start;
        let at_name = if self.current.kind == TokenKind::AtKeyword {
            let token = self.advance()?;
            Some(token.text(input)[1..].to_string())
        } else {
            None
        };
        let body_start = self.current.span.start;

        let (end, terminator) = self.scan_statement_end()?;

        match (at_name, terminator) {
            (Some(name), Terminator::Block) => {
                let params = input[body_start..end].trim().to_string();
                let nodes = self.parse_block(false)?;
                Ok(Some(Node::AtRule(AtRule { name, params, nodes: Some(nodes) })))
            }
            (Some(name), _) => {
                let params = input[body_start..end].trim().to_string();
                Ok(Some(Node::AtRule(AtRule { name, params, nodes: None })))
            }
            (None, Terminator::Block) => {
                let selector = input[start..end].trim().to_string();
                let nodes = self.parse_block(false)?;
                Ok(Some(Node::Rule(Rule { selector, nodes })))
            }
            (None, _) => {
                let text = &input[start..end];
                match parse_declaration(text) {
                    Some(decl) => Ok(Some(Node::Declaration(decl))),
                    None => {
                        log::debug!("Skipping malformed declaration {:?}", text.trim());
                        Ok(None)
                    }
                }
            }
        }
    }

    /// Advance to the end of the current statement, returning the byte
    /// offset where its text ends. Semicolons inside parentheses (e.g. data
    /// URLs) do not end a statement.
    fn scan_statement_end(&mut self) -> CssResult<(usize, Terminator)> {
        let mut paren_depth = 0usize;

        loop {
            let end = self.current.span.start;
            match self.current.kind {
                TokenKind::LeftParen => {
                    paren_depth += 1;
                }
                TokenKind::RightParen => {
                    paren_depth = paren_depth.saturating_sub(1);
                }
                TokenKind::Semicolon if paren_depth == 0 => {
                    self.advance()?;
                    return Ok((end, Terminator::Semicolon));
                }
                TokenKind::LeftBrace => {
                    self.advance()?;
                    return Ok((end, Terminator::Block));
                }
                TokenKind::RightBrace => return Ok((end, Terminator::BlockEnd)),
                TokenKind::Eof => return Ok((end, Terminator::Eof)),
                _ => {}
            }
            self.advance()?;
        }
    }
}

/// Split declaration text into property, value and importance
fn parse_declaration(text: &str) -> Option<Declaration> {
    let colon = text.find(':')?;
    let property = text[..colon].trim();
    if property.is_empty() {
        return None;
    }

    let (value, important) = split_important(text[colon + 1..].trim());

    Some(Declaration {
        property: property.to_string(),
        value: value.to_string(),
        important,
    })
}

/// Strip a trailing `!important` from a value
fn split_important(value: &str) -> (&str, bool) {
    const IMPORTANT: &str = "important";

    let Some(split) = value.len().checked_sub(IMPORTANT.len()) else {
        return (value, false);
    };
    if !value.is_char_boundary(split) {
        return (value, false);
    }
    let (head, tail) = value.split_at(split);
    if !tail.eq_ignore_ascii_case(IMPORTANT) {
        return (value, false);
    }
    match head.trim_end().strip_suffix('!') {
        Some(rest) => (rest.trim_end(), true),
        None => (value, false),
    }
}

/// Text between `/*` and `*/`
fn comment_body(comment: &str) -> &str {
    let body = comment.strip_prefix("/*").unwrap_or(comment);
    body.strip_suffix("*/").unwrap_or(body)
}
