/// Type parsing methods.
///
/// This chunk parses type annotations:
/// - primitive keywords (`int`, `uint`, `flt`, `bool`, `char`)
/// - user-defined names (left unresolved)
/// - arrays `[size?]Elem`, where the size is any expression
/// - function types `fn(T, ...) R?`
impl<'a> Parser<'a> {
    // ========================================================================
    // Types
    // ========================================================================

    fn parse_type(&mut self) -> ParseResult<Node<Type>> {
        self.nested(Self::type_form)
    }

    fn type_form(&mut self) -> ParseResult<Node<Type>> {
        let token = self.current();

        if let Some(primitive) = token.kind.primitive_id() {
            self.advance();
            return Ok(Node::new(Type::Basic(BasicType::Primitive(primitive)), token));
        }

        match token.kind {
            TokenKind::Ident => {
                self.advance();
                Ok(Node::new(Type::Basic(BasicType::Named(token)), token))
            }
            TokenKind::Punctuation(PunctuationId::LBracket) => {
                self.advance();
                self.array_type(token)
            }
            TokenKind::Keyword(KeywordId::Fn) => {
                self.advance();
                self.function_type(token)
            }
            _ => Err(self.error_at(token, ParseErrorKind::ExpectedType, "a type")),
        }
    }

    /// After `[`: optional size expression, `]`, element type.
    fn array_type(&mut self, open: Token) -> ParseResult<Node<Type>> {
        let size = if self.check_punct(PunctuationId::RBracket) {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect_punct(
            PunctuationId::RBracket,
            ParseErrorKind::UnmatchedBracket,
            "`]` after the array size",
        )?;
        let element = self.parse_type()?;

        Ok(Node::new(
            Type::Array {
                element: Box::new(element),
                size,
            },
            open,
        ))
    }

    /// After `fn`: parenthesized parameter types, then a return type if one starts here.
    fn function_type(&mut self, fn_token: Token) -> ParseResult<Node<Type>> {
        self.expect_punct(
            PunctuationId::LParen,
            ParseErrorKind::UnmatchedParen,
            "`(` after `fn` in a function type",
        )?;

        let mut params = Vec::new();
        if !self.check_punct(PunctuationId::RParen) {
            loop {
                params.push(self.parse_type()?);
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }
        self.expect_punct(
            PunctuationId::RParen,
            ParseErrorKind::UnmatchedParen,
            "`)` to close the function type",
        )?;

        let return_type = if self.is_at_type_start() {
            Some(Box::new(self.parse_type()?))
        } else {
            None
        };

        Ok(Node::new(Type::Function { params, return_type }, fn_token))
    }
}
