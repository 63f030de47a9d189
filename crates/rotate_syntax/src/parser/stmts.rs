/// Statement parsing methods.
///
/// This chunk parses statement forms (`if`, `while`, `for`, `ret`, `defer`, declarations, expression statements)
/// and brace-delimited blocks.
///
/// ## Notes
/// - Terminators between statements are skipped by the block loop; a statement itself never consumes the
///   terminator that ends it.
/// - `for name in range` is desugared into the C-style shape (see [`Statement::For`]).
impl<'a> Parser<'a> {
    // ========================================================================
    // Statements
    // ========================================================================

    /// `{ statement* }`
    fn block(&mut self) -> ParseResult<Node<Block>> {
        let open = self.expect_punct(PunctuationId::LBrace, ParseErrorKind::UnmatchedBrace, "`{` to open a block")?;

        let mut statements = Vec::new();
        loop {
            self.skip_terminators();
            if self.check_punct(PunctuationId::RBrace) || self.is_at_end() {
                break;
            }
            statements.push(self.statement()?);
        }

        self.expect_punct(
            PunctuationId::RBrace,
            ParseErrorKind::UnmatchedBrace,
            "`}` to close the block",
        )?;
        Ok(Node::new(Block { statements }, open))
    }

    fn statement(&mut self) -> ParseResult<Node<Statement>> {
        self.nested(Self::statement_form)
    }

    fn statement_form(&mut self) -> ParseResult<Node<Statement>> {
        let token = self.current();

        match token.kind {
            TokenKind::Keyword(KeywordId::If) => self.if_stmt(),
            TokenKind::Keyword(KeywordId::While) => self.while_stmt(),
            TokenKind::Keyword(KeywordId::For) => self.for_stmt(),
            TokenKind::Keyword(KeywordId::Ret) => {
                self.advance();
                self.return_stmt()
            }
            TokenKind::Keyword(KeywordId::Defer) => {
                self.advance();
                self.defer_stmt()
            }
            TokenKind::Punctuation(PunctuationId::LBrace) => {
                let block = self.block()?;
                Ok(Node::new(Statement::Block(block.node), block.token))
            }
            _ if self.is_at_decl_stmt_start() || self.is_at_expr_start() => self.simple_stmt(),
            _ => Err(self.error_at(token, ParseErrorKind::ExpectedStatement, "a statement")),
        }
    }

    /// A declaration or expression statement. Also used for the clauses of a C-style `for`.
    fn simple_stmt(&mut self) -> ParseResult<Node<Statement>> {
        if self.is_at_decl_stmt_start() {
            let decl = self.variable_decl()?;
            let token = decl.token;
            return Ok(Node::new(Statement::Decl(Box::new(decl)), token));
        }

        let expr = self.expression()?;
        let token = expr.token;
        Ok(Node::new(Statement::Expr(expr), token))
    }

    /// `let ...` or `name : Type = value`.
    ///
    /// `name := v` / `name :: v` inside a block stay expression statements (an `Assign` with a binding operator).
    fn is_at_decl_stmt_start(&self) -> bool {
        self.check_keyword(KeywordId::Let)
            || (self.check(TokenKind::Ident) && self.peek_next().kind.is_punctuation(PunctuationId::Colon))
    }

    /// `if (cond) stmt (else stmt)?` or `if cond stmt (else stmt)?`.
    ///
    /// A leading `(` always opens the condition and its `)` closes it, so `if (a) -b` is `if a { -b }`.
    fn if_stmt(&mut self) -> ParseResult<Node<Statement>> {
        let token = self.advance();
        let condition = if self.match_punct(PunctuationId::LParen) {
            let condition = self.expression()?;
            self.expect_punct(
                PunctuationId::RParen,
                ParseErrorKind::UnmatchedParen,
                "`)` after the if condition",
            )?;
            condition
        } else {
            self.expression()?
        };
        self.skip_terminators();
        let then_branch = self.statement()?;

        let else_branch = if self.else_follows() {
            self.skip_terminators();
            self.advance();
            self.skip_terminators();
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(Node::new(
            Statement::If {
                condition,
                then_branch: Box::new(then_branch),
                else_branch,
            },
            token,
        ))
    }

    /// `while (cond) stmt`
    fn while_stmt(&mut self) -> ParseResult<Node<Statement>> {
        let token = self.advance();
        self.expect_punct(
            PunctuationId::LParen,
            ParseErrorKind::UnmatchedParen,
            "`(` after `while`",
        )?;
        let condition = self.expression()?;
        self.expect_punct(
            PunctuationId::RParen,
            ParseErrorKind::UnmatchedParen,
            "`)` after the loop condition",
        )?;
        self.skip_terminators();
        let body = self.statement()?;

        Ok(Node::new(
            Statement::While {
                condition,
                body: Box::new(body),
            },
            token,
        ))
    }

    /// `for name in range stmt` or `for (init?; cond?; update?) stmt`
    fn for_stmt(&mut self) -> ParseResult<Node<Statement>> {
        let token = self.advance();

        if self.check(TokenKind::Ident) && self.peek_next().kind.is_keyword(KeywordId::In) {
            let var = self.advance();
            self.advance();
            let range = self.expression()?;
            self.skip_terminators();
            let body = self.statement()?;

            let decl = Node::new(Declaration::Variable(VariableDecl::bare(var)), var);
            let init = Node::new(Statement::Decl(Box::new(decl)), var);
            return Ok(Node::new(
                Statement::For {
                    init: Some(Box::new(init)),
                    condition: Some(range),
                    update: None,
                    body: Box::new(body),
                },
                token,
            ));
        }

        self.expect_punct(
            PunctuationId::LParen,
            ParseErrorKind::UnmatchedParen,
            "`(` or a loop variable after `for`",
        )?;

        let init = if self.check(TokenKind::Terminator) {
            None
        } else {
            Some(Box::new(self.simple_stmt()?))
        };
        self.expect(
            TokenKind::Terminator,
            ParseErrorKind::UnexpectedToken,
            "`;` after the loop initializer",
        )?;

        let condition = if self.check(TokenKind::Terminator) {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect(
            TokenKind::Terminator,
            ParseErrorKind::UnexpectedToken,
            "`;` after the loop condition",
        )?;

        let update = if self.check_punct(PunctuationId::RParen) {
            None
        } else {
            Some(Box::new(self.simple_stmt()?))
        };
        self.expect_punct(
            PunctuationId::RParen,
            ParseErrorKind::UnmatchedParen,
            "`)` to close the loop header",
        )?;

        self.skip_terminators();
        let body = self.statement()?;

        Ok(Node::new(
            Statement::For {
                init,
                condition,
                update,
                body: Box::new(body),
            },
            token,
        ))
    }

    /// After `ret`: a value unless the statement ends here.
    fn return_stmt(&mut self) -> ParseResult<Node<Statement>> {
        let token = self.peek_previous();
        let value = if self.check(TokenKind::Terminator) || self.check_punct(PunctuationId::RBrace) || self.is_at_end()
        {
            None
        } else {
            Some(self.expression()?)
        };
        Ok(Node::new(Statement::Return(value), token))
    }

    /// After `defer`: the deferred statement.
    fn defer_stmt(&mut self) -> ParseResult<Node<Statement>> {
        let token = self.peek_previous();
        let stmt = self.statement()?;
        Ok(Node::new(Statement::Defer(Box::new(stmt)), token))
    }
}
