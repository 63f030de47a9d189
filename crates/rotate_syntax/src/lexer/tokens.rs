//! Token types for the Rotate lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words (including `and` / `or` and primitive type names)
//! - `Operator(OperatorId)` for operators
//! - `Punctuation(PunctuationId)` for delimiters and the colon family
//!
//! ## Notes
//! - Tokens never own text. Identifiers and literals are resolved against the source on demand via
//!   [`Token::lexeme`] and the literal helpers in `crate::token_helpers`.
//! - `Token` is `Copy`; the parser hands out copies instead of references into the stream.

use crate::ast::Span;
use rotate_core::lang::keywords::{self, KeywordId};
use rotate_core::lang::operators::{self, OperatorId};
use rotate_core::lang::punctuation::{self, PunctuationId};
use std::fmt;

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers and Literals ==========
    Ident,
    Int,
    Float,
    String,
    Char,

    // ========== Layout ==========
    /// Newline or `;`.
    Terminator,

    // ========== Special ==========
    /// End of input.
    Eot,
}

impl TokenKind {
    /// Short, stable name used by token listings and the debug dump.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Keyword(_) => "keyword",
            TokenKind::Operator(_) => "operator",
            TokenKind::Punctuation(_) => "punctuation",
            TokenKind::Ident => "identifier",
            TokenKind::Int => "integer",
            TokenKind::Float => "float",
            TokenKind::String => "string",
            TokenKind::Char => "char",
            TokenKind::Terminator => "terminator",
            TokenKind::Eot => "eot",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(id) => write!(f, "keyword `{}`", keywords::as_str(*id)),
            TokenKind::Operator(id) => write!(f, "`{}`", operators::as_str(*id)),
            TokenKind::Punctuation(id) => write!(f, "`{}`", punctuation::as_str(*id)),
            TokenKind::Ident => write!(f, "identifier"),
            TokenKind::Int => write!(f, "integer literal"),
            TokenKind::Float => write!(f, "float literal"),
            TokenKind::String => write!(f, "string literal"),
            TokenKind::Char => write!(f, "char literal"),
            TokenKind::Terminator => write!(f, "end of statement"),
            TokenKind::Eot => write!(f, "end of input"),
        }
    }
}

/// A token: kind, byte span into the source, and the 1-based line it starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub line: usize,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, span: Span, line: usize) -> Self {
        Self { kind, span, line }
    }

    /// Zero-length end-of-input token at `offset`.
    pub fn eot(offset: usize, line: usize) -> Self {
        Self::new(TokenKind::Eot, Span::new(offset, offset), line)
    }

    /// Byte offset of the first byte.
    pub fn offset(&self) -> usize {
        self.span.start
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.span.len()
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// The source text this token covers.
    ///
    /// Returns `""` if the span does not fit `source` (e.g. a token from a different buffer).
    pub fn lexeme<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.span.start..self.span.end).unwrap_or("")
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
