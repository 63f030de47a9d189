/// Token-stream helpers.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`current`, `peek_next`, `peek_previous`, `peek_at`, `advance`)
/// - Matching / expecting keywords, operators, and punctuation
/// - Terminator handling (`skip_terminators`, `else_follows`)
/// - The nesting guard (`nested`)
impl<'a> Parser<'a> {
    // ========================================================================
    // Cursor
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eot`].
    fn is_at_end(&self) -> bool {
        self.current().kind == TokenKind::Eot
    }

    /// Return the token `n` positions ahead, or the EOT sentinel.
    fn peek_at(&self, n: usize) -> Token {
        self.tokens.get(self.pos + n).copied().unwrap_or(self.eot)
    }

    /// Return the current token without consuming it.
    fn current(&self) -> Token {
        self.peek_at(0)
    }

    /// Return the token after the current token without consuming it.
    fn peek_next(&self) -> Token {
        self.peek_at(1)
    }

    /// Return the most recently consumed token, or the EOT sentinel at the start of the stream.
    fn peek_previous(&self) -> Token {
        self.pos
            .checked_sub(1)
            .and_then(|idx| self.tokens.get(idx))
            .copied()
            .unwrap_or(self.eot)
    }

    /// Consume the current token and return it. Never moves past end of input.
    fn advance(&mut self) -> Token {
        let token = self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    // ========================================================================
    // Matching
    // ========================================================================

    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    /// Return `true` if the current token is the given keyword.
    fn check_keyword(&self, id: KeywordId) -> bool {
        self.current().kind.is_keyword(id)
    }

    /// Return `true` if the current token is the given punctuation.
    fn check_punct(&self, id: PunctuationId) -> bool {
        self.current().kind.is_punctuation(id)
    }

    /// Return `true` if the current token is the given operator.
    fn check_op(&self, id: OperatorId) -> bool {
        self.current().kind.is_operator(id)
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of `kind` or fail with `error` naming what was `expected`.
    fn expect(&mut self, kind: TokenKind, error: ParseErrorKind, expected: &str) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_at(self.current(), error, expected))
        }
    }

    fn expect_keyword(&mut self, id: KeywordId, error: ParseErrorKind, expected: &str) -> ParseResult<Token> {
        self.expect(TokenKind::Keyword(id), error, expected)
    }

    fn expect_punct(&mut self, id: PunctuationId, error: ParseErrorKind, expected: &str) -> ParseResult<Token> {
        self.expect(TokenKind::Punctuation(id), error, expected)
    }

    fn expect_op(&mut self, id: OperatorId, error: ParseErrorKind, expected: &str) -> ParseResult<Token> {
        self.expect(TokenKind::Operator(id), error, expected)
    }

    // ========================================================================
    // Nesting
    // ========================================================================

    /// Run `rule` one level deeper, failing at the current token once [`MAX_NESTING`] is reached.
    fn nested<T>(&mut self, rule: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= MAX_NESTING {
            let token = self.current();
            return Err(CompileError::new(
                ParseErrorKind::UnexpectedToken,
                format!(
                    "nesting too deep at {}, at most {MAX_NESTING} levels are allowed",
                    self.describe(token)
                ),
                token.span,
                self.source,
            ));
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    // ========================================================================
    // Terminators
    // ========================================================================

    /// Consume any run of newlines / `;`.
    fn skip_terminators(&mut self) {
        while self.check(TokenKind::Terminator) {
            self.advance();
        }
    }

    /// Return `true` if `else` comes right after the current run of terminators.
    fn else_follows(&self) -> bool {
        let mut n = 0;
        while self.peek_at(n).kind == TokenKind::Terminator {
            n += 1;
        }
        self.peek_at(n).kind.is_keyword(KeywordId::Else)
    }

    /// Check if the current token can start an expression
    fn is_at_expr_start(&self) -> bool {
        let kind = self.current().kind;
        kind.is_literal()
            || kind == TokenKind::Ident
            || self.check_punct(PunctuationId::LParen)
            || self.check_op(OperatorId::Bang)
            || self.check_op(OperatorId::Minus)
    }

    /// Check if the current token can start a type
    fn is_at_type_start(&self) -> bool {
        let kind = self.current().kind;
        kind.primitive_id().is_some()
            || kind == TokenKind::Ident
            || self.check_punct(PunctuationId::LBracket)
            || self.check_keyword(KeywordId::Fn)
    }
}
