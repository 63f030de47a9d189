//! Lexer for the Rotate programming language
//!
//! Handles tokenization including:
//! - Keywords and identifiers (ASCII only, exact case-sensitive lookup)
//! - Integer, float, string and char literals
//! - Operators (maximal munch: `<=` is one token) and punctuation (`::` and `:=` are single tokens)
//! - Statement terminators: every newline and every `;`
//! - `//` line comments
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)

pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::ast::Span;
use crate::diagnostics::{CompileError, LexErrorKind};
use rotate_core::lang::operators::OperatorId;
use rotate_core::lang::punctuation::PunctuationId;

/// Lexer for Rotate source code.
///
/// Scans the source once, byte by byte, and stops at the first lexical error. Tokens record byte spans and the
/// 1-based line they start on; they never copy text out of the source.
pub struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            line: 1,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source code.
    ///
    /// The token stream always ends with an `Eot` token. A stream holding nothing else is logged as a warning; it
    /// is not an error.
    ///
    /// ## Errors
    /// Returns the first lexical error (unexpected character, unterminated or malformed literal).
    pub fn tokenize(mut self) -> Result<Vec<Token>, CompileError> {
        while self.pos < self.bytes.len() {
            self.scan_token()?;
        }

        self.tokens.push(Token::eot(self.bytes.len(), self.line));

        if self.tokens.len() < 2 {
            tracing::warn!("source contains no tokens");
        }
        tracing::debug!(token_count = self.tokens.len(), lines = self.line, "lexed source");

        Ok(self.tokens)
    }

    // ========================================================================
    // Core byte handling
    // ========================================================================

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<u8> {
        self.bytes.get(self.pos + 1).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn match_byte(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) -> Result<(), CompileError> {
        let start = self.pos;
        let Some(b) = self.advance() else {
            return Ok(());
        };

        match b {
            b' ' | b'\t' | b'\r' => {}

            // Newlines end statements, then bump the line counter.
            b'\n' => {
                self.add_token(TokenKind::Terminator, start);
                self.line += 1;
            }
            b';' => self.add_token(TokenKind::Terminator, start),

            // Comments
            b'/' if self.peek() == Some(b'/') => {
                while !matches!(self.peek(), None | Some(b'\n')) {
                    self.pos += 1;
                }
            }

            // Operators
            b'+' => self.operator(start, OperatorId::Plus, &[(b'=', OperatorId::PlusEq)]),
            b'-' => self.operator(start, OperatorId::Minus, &[(b'=', OperatorId::MinusEq)]),
            b'*' => self.operator(start, OperatorId::Star, &[(b'=', OperatorId::StarEq)]),
            b'/' => self.operator(start, OperatorId::Slash, &[(b'=', OperatorId::SlashEq)]),
            b'%' => self.add_op(OperatorId::Percent, start),
            b'=' => self.operator(start, OperatorId::Eq, &[(b'=', OperatorId::EqEq)]),
            b'!' => self.operator(start, OperatorId::Bang, &[(b'=', OperatorId::NotEq)]),
            b'<' => self.operator(start, OperatorId::Lt, &[(b'=', OperatorId::LtEq)]),
            b'>' => self.operator(start, OperatorId::Gt, &[(b'=', OperatorId::GtEq)]),
            b'.' => {
                if self.match_byte(b'.') {
                    self.add_op(OperatorId::DotDot, start);
                } else {
                    self.add_punct(PunctuationId::Dot, start);
                }
            }

            // Punctuation
            b':' => {
                if self.match_byte(b':') {
                    self.add_punct(PunctuationId::ColonColon, start);
                } else if self.match_byte(b'=') {
                    self.add_punct(PunctuationId::ColonEq, start);
                } else {
                    self.add_punct(PunctuationId::Colon, start);
                }
            }
            b'(' => self.add_punct(PunctuationId::LParen, start),
            b')' => self.add_punct(PunctuationId::RParen, start),
            b'{' => self.add_punct(PunctuationId::LBrace, start),
            b'}' => self.add_punct(PunctuationId::RBrace, start),
            b'[' => self.add_punct(PunctuationId::LBracket, start),
            b']' => self.add_punct(PunctuationId::RBracket, start),
            b',' => self.add_punct(PunctuationId::Comma, start),

            // Literals
            b'"' => self.scan_string(start)?,
            b'\'' => self.scan_char(start)?,
            b'0'..=b'9' => self.scan_number(start),

            // Identifiers and keywords
            _ if is_ident_start(b) => self.scan_identifier(start),

            _ => return Err(self.unexpected_character(start)),
        }

        Ok(())
    }

    // ========================================================================
    // Token helpers
    // ========================================================================

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, Span::new(start, self.pos), self.line));
    }

    fn add_op(&mut self, id: OperatorId, start: usize) {
        self.add_token(TokenKind::Operator(id), start);
    }

    fn add_punct(&mut self, id: PunctuationId, start: usize) {
        self.add_token(TokenKind::Punctuation(id), start);
    }

    /// Try to match compound operator, fallback to simple.
    fn operator(&mut self, start: usize, simple: OperatorId, compounds: &[(u8, OperatorId)]) {
        for (b, id) in compounds {
            if self.match_byte(*b) {
                self.add_op(*id, start);
                return;
            }
        }
        self.add_op(simple, start);
    }

    // ========================================================================
    // Literal scanning
    // ========================================================================

    /// Digits, optionally followed by `.digits`.
    ///
    /// A `.` not followed by a digit is left alone, so `0..3` is `0`, `..`, `3`.
    fn scan_number(&mut self, start: usize) {
        self.skip_digits();

        let mut kind = TokenKind::Int;
        if self.peek() == Some(b'.') && self.peek_next().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
            self.skip_digits();
            kind = TokenKind::Float;
        }

        self.add_token(kind, start);
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    /// `"..."`. A backslash keeps the next byte inside the literal; escapes are not decoded.
    fn scan_string(&mut self, start: usize) -> Result<(), CompileError> {
        let line = self.line;

        loop {
            match self.advance() {
                None => {
                    return Err(self.error(
                        LexErrorKind::UnterminatedString,
                        "string literal is never closed",
                        Span::new(start, start + 1),
                    ));
                }
                Some(b'"') => break,
                Some(b'\\') => {
                    if self.advance() == Some(b'\n') {
                        self.line += 1;
                    }
                }
                Some(b'\n') => self.line += 1,
                Some(_) => {}
            }
        }

        self.tokens
            .push(Token::new(TokenKind::String, Span::new(start, self.pos), line));
        Ok(())
    }

    /// `'x'` or `'\x'`: exactly one content byte or one escape pair.
    fn scan_char(&mut self, start: usize) -> Result<(), CompileError> {
        match self.peek() {
            None | Some(b'\n') => return Err(self.unterminated_char(start)),
            Some(b'\'') => {
                return Err(self.error(
                    LexErrorKind::InvalidCharLiteral,
                    "empty character literal",
                    Span::new(start, self.pos + 1),
                ));
            }
            Some(b'\\') => {
                self.pos += 1;
                if matches!(self.peek(), None | Some(b'\n')) {
                    return Err(self.unterminated_char(start));
                }
                self.pos += 1;
            }
            Some(_) => self.pos += 1,
        }

        match self.peek() {
            Some(b'\'') => {
                self.pos += 1;
                self.add_token(TokenKind::Char, start);
                Ok(())
            }
            None | Some(b'\n') => Err(self.unterminated_char(start)),
            Some(_) => Err(self.error(
                LexErrorKind::InvalidCharLiteral,
                "character literal must contain exactly one character",
                Span::new(start, start + 1),
            )),
        }
    }

    fn unterminated_char(&self, start: usize) -> CompileError {
        self.error(
            LexErrorKind::UnterminatedChar,
            "character literal is never closed",
            Span::new(start, start + 1),
        )
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn scan_identifier(&mut self, start: usize) {
        while self.peek().is_some_and(is_ident_continue) {
            self.pos += 1;
        }

        let spelling = &self.source[start..self.pos];

        // Look up identifier spelling in the reserved-word registry.
        if let Some(id) = keyword_id(spelling) {
            self.add_token(TokenKind::Keyword(id), start);
        } else {
            self.add_token(TokenKind::Ident, start);
        }
    }

    // ========================================================================
    // Errors
    // ========================================================================

    fn error(&self, kind: LexErrorKind, message: &str, span: Span) -> CompileError {
        CompileError::new(kind, message, span, self.source)
    }

    /// Error for the (possibly multi-byte) character starting at `start`.
    fn unexpected_character(&self, start: usize) -> CompileError {
        let c = self
            .source
            .get(start..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        let end = (start + c.len_utf8()).min(self.bytes.len());
        self.error(
            LexErrorKind::UnexpectedCharacter(c),
            &format!("`{}` is not valid here", c.escape_debug()),
            Span::new(start, end),
        )
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a byte can start an identifier (ASCII-only).
fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// Check if a byte can continue an identifier (ASCII-only).
fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, CompileError> {
    Lexer::new(source).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================
