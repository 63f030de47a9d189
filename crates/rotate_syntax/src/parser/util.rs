/// Miscellaneous parser utilities.
///
/// This chunk contains small shared helpers that don’t cleanly fit into
/// “decl”, “stmt”, “expr”, or “types” (error construction and literal classification).
impl<'a> Parser<'a> {
    // ========================================================================
    // Utilities
    // ========================================================================

    /// Build a `kind` error at `token`: "expected {expected}, found {token}".
    fn error_at(&self, token: Token, kind: ParseErrorKind, expected: &str) -> CompileError {
        CompileError::new(
            kind,
            format!("expected {expected}, found {}", self.describe(token)),
            token.span,
            self.source,
        )
    }

    /// How a token is named in error messages.
    fn describe(&self, token: Token) -> String {
        match token.kind {
            TokenKind::Eot => "end of input".to_string(),
            TokenKind::Terminator if token.lexeme(self.source) == "\n" => "newline".to_string(),
            _ => format!("`{}`", token.lexeme(self.source)),
        }
    }
}

/// Literal kind for tokens the primary rule wraps as [`Expr::Literal`].
fn literal_kind(kind: TokenKind) -> Option<LiteralKind> {
    match kind {
        TokenKind::Int => Some(LiteralKind::Int),
        TokenKind::Float => Some(LiteralKind::Float),
        TokenKind::String => Some(LiteralKind::String),
        TokenKind::Char => Some(LiteralKind::Char),
        TokenKind::Keyword(KeywordId::True) => Some(LiteralKind::True),
        TokenKind::Keyword(KeywordId::False) => Some(LiteralKind::False),
        TokenKind::Keyword(KeywordId::Nil) => Some(LiteralKind::Nil),
        _ => None,
    }
}
