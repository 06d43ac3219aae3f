//! CSS Tokenizer
//!
//! Splits CSS input into tokens that point back into the source text. The
//! parser only needs token boundaries to find rule structure; values,
//! selectors and at-rule params are later sliced out of the input verbatim.

use crate::error::{CssError, CssResult, SourceLocation};

/// Byte range of a token in the input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// CSS Token types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier (property names, keywords, selector parts)
    Ident,
    /// Number, percentage or dimension (e.g. `10`, `50%`, `1.5em`)
    Number,
    /// At-keyword (e.g., @media, @import)
    AtKeyword,
    /// Quoted string, quotes included
    String,
    /// `/* ... */` comment, delimiters included
    Comment,
    /// Whitespace run
    Whitespace,
    /// Colon ':'
    Colon,
    /// Semicolon ';'
    Semicolon,
    /// Left bracket '['
    LeftBracket,
    /// Right bracket ']'
    RightBracket,
    /// Left paren '('
    LeftParen,
    /// Right paren ')'
    RightParen,
    /// Left brace '{'
    LeftBrace,
    /// Right brace '}'
    RightBrace,
    /// Delim (any other single character)
    Delim(char),
    /// End of file
    Eof,
}

/// A token and where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub location: SourceLocation,
}

impl Token {
    /// Source text covered by this token
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        &input[self.span.start..self.span.end]
    }
}

/// CSS Tokenizer
pub struct Tokenizer<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// The text being tokenized
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Get the current source location
    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column, self.position)
    }

    /// Peek at the next character without consuming
    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Peek at the second character without consuming
    fn peek_second(&self) -> Option<char> {
        let mut iter = self.input[self.position..].chars();
        iter.next();
        iter.next()
    }

    /// Consume the next character
    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.position = pos + c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            Some(c)
        } else {
            None
        }
    }

    /// Consume characters while the predicate holds
    fn consume_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if pred(c) {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Get the next token
    pub fn next_token(&mut self) -> CssResult<Token> {
        let start = self.position;
        let location = self.location();

        let c = match self.peek() {
            Some(c) => c,
            None => {
                return Ok(Token { kind: TokenKind::Eof, span: Span::new(start, start), location });
            }
        };

        let kind = match c {
            _ if c.is_ascii_whitespace() => {
                self.consume_while(|c| c.is_ascii_whitespace());
                TokenKind::Whitespace
            }
            '/' if self.peek_second() == Some('*') => {
                self.consume_comment();
                TokenKind::Comment
            }
            '"' | '\'' => {
                self.consume_string()?;
                TokenKind::String
            }
            '@' if self.peek_second().map(is_ident_start).unwrap_or(false) => {
                self.advance();
                self.consume_ident_name();
                TokenKind::AtKeyword
            }
            '.' if self.peek_second().map(|c| c.is_ascii_digit()).unwrap_or(false) => {
                self.consume_number();
                TokenKind::Number
            }
            '0'..='9' => {
                self.consume_number();
                TokenKind::Number
            }
            _ if is_ident_start(c) || c == '\\' => {
                self.consume_ident_name();
                TokenKind::Ident
            }
            _ => {
                self.advance();
                match c {
                    ':' => TokenKind::Colon,
                    ';' => TokenKind::Semicolon,
                    '[' => TokenKind::LeftBracket,
                    ']' => TokenKind::RightBracket,
                    '(' => TokenKind::LeftParen,
                    ')' => TokenKind::RightParen,
                    '{' => TokenKind::LeftBrace,
                    '}' => TokenKind::RightBrace,
                    other => TokenKind::Delim(other),
                }
            }
        };

        Ok(Token { kind, span: Span::new(start, self.position), location })
    }

    /// Consume a comment. EOF inside a comment ends it.
    fn consume_comment(&mut self) {
        self.advance(); // consume '/'
        self.advance(); // consume '*'

        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    return;
                }
                Some(_) => continue,
                None => return,
            }
        }
    }

    /// Consume a quoted string, quotes included
    fn consume_string(&mut self) -> CssResult<()> {
        let location = self.location();
        let quote = self.advance();

        loop {
            match self.advance() {
                Some(c) if Some(c) == quote => return Ok(()),
                Some('\\') => {
                    // Escaped character, including an escaped newline
                    self.advance();
                }
                Some('\n') | None => {
                    return Err(CssError::UnterminatedString { location });
                }
                Some(_) => {}
            }
        }
    }

    /// Consume an identifier name, honoring backslash escapes
    fn consume_ident_name(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.advance();
                self.advance();
            } else if is_ident_char(c) {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Consume a number with an optional fraction and unit or percent sign
    fn consume_number(&mut self) {
        self.consume_while(|c| c.is_ascii_digit());

        if self.peek() == Some('.') && self.peek_second().map(|c| c.is_ascii_digit()).unwrap_or(false) {
            self.advance();
            self.consume_while(|c| c.is_ascii_digit());
        }

        match self.peek() {
            Some('%') => {
                self.advance();
            }
            Some(c) if is_ident_start(c) => self.consume_ident_name(),
            _ => {}
        }
    }

    /// Tokenize all remaining input
    pub fn tokenize_all(&mut self) -> CssResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            if token.kind == TokenKind::Eof {
                break;
            }
            tokens.push(token);
        }
        Ok(tokens)
    }
}

/// Check if character can start an identifier
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '-' || c > '\x7F'
}

/// Check if character can be part of an identifier
fn is_ident_char(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Tokenizer::new(input)
            .tokenize_all()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn texts(input: &str) -> Vec<&str> {
        Tokenizer::new(input)
            .tokenize_all()
            .unwrap()
            .into_iter()
            .map(|t| t.text(input))
            .collect()
    }

    #[test]
    fn test_simple_rule() {
        let tokens = kinds("p { color: red; }");
        assert_eq!(tokens[0], TokenKind::Ident);
        assert_eq!(tokens[2], TokenKind::LeftBrace);
        assert_eq!(tokens[4], TokenKind::Ident);
        assert_eq!(tokens[5], TokenKind::Colon);
        assert_eq!(tokens[7], TokenKind::Ident);
        assert_eq!(tokens[8], TokenKind::Semicolon);
        assert_eq!(tokens[10], TokenKind::RightBrace);
    }

    #[test]
    fn test_spans_cover_input() {
        let input = ".a > b { margin: 0 auto 10px; }";
        let joined: String = texts(input).concat();
        assert_eq!(joined, input);
    }

    #[test]
    fn test_class_selector() {
        assert_eq!(texts(".container"), vec![".", "container"]);
        assert_eq!(kinds(".container")[0], TokenKind::Delim('.'));
    }

    #[test]
    fn test_dimension_px() {
        assert_eq!(kinds("100px"), vec![TokenKind::Number]);
        assert_eq!(texts("1.5em 50% .5px"), vec!["1.5em", " ", "50%", " ", ".5px"]);
    }

    #[test]
    fn test_string_keeps_quotes() {
        assert_eq!(texts("\"hello world\""), vec!["\"hello world\""]);
        assert_eq!(texts("'a;b'"), vec!["'a;b'"]);
    }

    #[test]
    fn test_escaped_quote_in_string() {
        let input = r#""say \"hi\"" x"#;
        assert_eq!(texts(input)[0], r#""say \"hi\"""#);
    }

    #[test]
    fn test_unterminated_string() {
        let err = Tokenizer::new("'abc").tokenize_all().unwrap_err();
        assert!(matches!(err, CssError::UnterminatedString { .. }));
    }

    #[test]
    fn test_at_keyword() {
        assert_eq!(texts("@media screen"), vec!["@media", " ", "screen"]);
        assert_eq!(kinds("@media")[0], TokenKind::AtKeyword);
    }

    #[test]
    fn test_comment() {
        let input = "/* a { } */ p";
        assert_eq!(kinds(input), vec![TokenKind::Comment, TokenKind::Whitespace, TokenKind::Ident]);
        assert_eq!(texts(input)[0], "/* a { } */");
    }

    #[test]
    fn test_unterminated_comment_runs_to_eof() {
        assert_eq!(kinds("/* open"), vec![TokenKind::Comment]);
    }

    #[test]
    fn test_url_parens() {
        let tokens = kinds("url(a.png)");
        assert_eq!(tokens[0], TokenKind::Ident);
        assert_eq!(tokens[1], TokenKind::LeftParen);
        assert_eq!(*tokens.last().unwrap(), TokenKind::RightParen);
    }

    #[test]
    fn test_location_tracks_lines() {
        let mut tokenizer = Tokenizer::new("a\n  b");
        tokenizer.next_token().unwrap();
        tokenizer.next_token().unwrap();
        let b = tokenizer.next_token().unwrap();
        assert_eq!(b.location.line, 2);
        assert_eq!(b.location.column, 3);
        assert_eq!(b.location.offset, 4);
    }
}
