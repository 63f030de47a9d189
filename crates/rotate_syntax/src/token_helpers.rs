//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! These helpers exist to reduce repetitive `matches!(...)` at call sites, to make it easy to work with ID-based
//! tokens, and to resolve literal values lazily from the source buffer.

use crate::lexer::{Token, TokenKind};
use rotate_core::lang::keywords::KeywordId;
use rotate_core::lang::operators::OperatorId;
use rotate_core::lang::punctuation::PunctuationId;
use rotate_core::lang::types::{self, PrimitiveId};

impl TokenKind {
    /// Return the keyword id, if this is a keyword token.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        match self {
            TokenKind::Keyword(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given keyword.
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    /// Return the operator id, if this is an operator token.
    pub fn operator_id(&self) -> Option<OperatorId> {
        match self {
            TokenKind::Operator(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given operator.
    pub fn is_operator(&self, id: OperatorId) -> bool {
        matches!(self, TokenKind::Operator(o) if *o == id)
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// Return the primitive type named by this token, if any.
    pub fn primitive_id(&self) -> Option<PrimitiveId> {
        self.keyword_id().and_then(types::from_keyword)
    }

    /// Return `true` for tokens that the primary-expression rule wraps as a literal.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Int
                | TokenKind::Float
                | TokenKind::String
                | TokenKind::Char
                | TokenKind::Keyword(KeywordId::True | KeywordId::False | KeywordId::Nil)
        )
    }
}

impl Token {
    /// Parse an integer literal's value. `None` for other kinds or on overflow.
    pub fn int_value(&self, source: &str) -> Option<i64> {
        match self.kind {
            TokenKind::Int => self.lexeme(source).parse().ok(),
            _ => None,
        }
    }

    /// Parse a float literal's value.
    pub fn float_value(&self, source: &str) -> Option<f64> {
        match self.kind {
            TokenKind::Float => self.lexeme(source).parse().ok(),
            _ => None,
        }
    }

    /// String literal contents without the surrounding quotes. Escapes are passed through untouched.
    pub fn string_value<'s>(&self, source: &'s str) -> Option<&'s str> {
        match self.kind {
            TokenKind::String => strip_delimiters(self.lexeme(source), '"'),
            _ => None,
        }
    }

    /// Char literal contents without the surrounding quotes (one byte, or an escape pair).
    pub fn char_value<'s>(&self, source: &'s str) -> Option<&'s str> {
        match self.kind {
            TokenKind::Char => strip_delimiters(self.lexeme(source), '\''),
            _ => None,
        }
    }
}

fn strip_delimiters(text: &str, quote: char) -> Option<&str> {
    text.strip_prefix(quote)?.strip_suffix(quote)
}
