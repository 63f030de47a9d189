/// Expression parsing methods (precedence climbing).
///
/// Lowest to highest binding:
/// assignment → `or` → `and` → equality → comparison (incl. `..`) → term → factor → unary → call/member → primary.
///
/// ## Notes
/// - Assignment is right-associative and also covers the binding forms `:=` and `::`.
/// - Every binary level is left-associative and built by [`Parser::left_assoc`].
/// - Parenthesized groups do not produce a node; the inner expression is returned as is.
/// - Every re-entry into [`Parser::expression`] and every nested unary operator counts against [`MAX_NESTING`].
impl<'a> Parser<'a> {
    // ========================================================================
    // Expressions
    // ========================================================================

    fn expression(&mut self) -> ParseResult<Node<Expr>> {
        self.nested(Self::assignment)
    }

    fn assignment(&mut self) -> ParseResult<Node<Expr>> {
        let target = self.or_expr()?;

        let Some((op, op_token)) = self.assign_op() else {
            return Ok(target);
        };

        let assignable = if op.is_binding() {
            matches!(target.node, Expr::Identifier)
        } else {
            matches!(target.node, Expr::Identifier | Expr::Member { .. })
        };
        if !assignable {
            let expected = if op.is_binding() { "a name" } else { "a variable or field" };
            return Err(CompileError::new(
                ParseErrorKind::InvalidAssignmentTarget,
                format!("left side of `{}` must be {expected}", op.as_str()),
                op_token.span,
                self.source,
            ));
        }

        let value = self.expression()?;
        Ok(Node::new(
            Expr::Assign {
                target: Box::new(target),
                op,
                value: Box::new(value),
            },
            op_token,
        ))
    }

    /// Consume an assignment operator, if the current token is one.
    fn assign_op(&mut self) -> Option<(AssignOp, Token)> {
        let token = self.current();
        let op = match token.kind {
            TokenKind::Operator(OperatorId::Eq) => AssignOp::Assign,
            TokenKind::Operator(OperatorId::PlusEq) => AssignOp::AddAssign,
            TokenKind::Operator(OperatorId::MinusEq) => AssignOp::SubAssign,
            TokenKind::Operator(OperatorId::StarEq) => AssignOp::MulAssign,
            TokenKind::Operator(OperatorId::SlashEq) => AssignOp::DivAssign,
            TokenKind::Punctuation(PunctuationId::ColonEq) => AssignOp::Declare,
            TokenKind::Punctuation(PunctuationId::ColonColon) => AssignOp::Constant,
            _ => return None,
        };
        self.advance();
        Some((op, token))
    }

    fn or_expr(&mut self) -> ParseResult<Node<Expr>> {
        self.left_assoc(Self::and_expr, |kind| {
            kind.is_keyword(KeywordId::Or).then_some(BinaryOp::Or)
        })
    }

    fn and_expr(&mut self) -> ParseResult<Node<Expr>> {
        self.left_assoc(Self::equality, |kind| {
            kind.is_keyword(KeywordId::And).then_some(BinaryOp::And)
        })
    }

    fn equality(&mut self) -> ParseResult<Node<Expr>> {
        self.left_assoc(Self::comparison, |kind| match kind.operator_id()? {
            OperatorId::EqEq => Some(BinaryOp::Eq),
            OperatorId::NotEq => Some(BinaryOp::NotEq),
            _ => None,
        })
    }

    fn comparison(&mut self) -> ParseResult<Node<Expr>> {
        self.left_assoc(Self::term, |kind| match kind.operator_id()? {
            OperatorId::Lt => Some(BinaryOp::Lt),
            OperatorId::LtEq => Some(BinaryOp::LtEq),
            OperatorId::Gt => Some(BinaryOp::Gt),
            OperatorId::GtEq => Some(BinaryOp::GtEq),
            OperatorId::DotDot => Some(BinaryOp::Range),
            _ => None,
        })
    }

    fn term(&mut self) -> ParseResult<Node<Expr>> {
        self.left_assoc(Self::factor, |kind| match kind.operator_id()? {
            OperatorId::Plus => Some(BinaryOp::Add),
            OperatorId::Minus => Some(BinaryOp::Sub),
            _ => None,
        })
    }

    fn factor(&mut self) -> ParseResult<Node<Expr>> {
        self.left_assoc(Self::unary, |kind| match kind.operator_id()? {
            OperatorId::Star => Some(BinaryOp::Mul),
            OperatorId::Slash => Some(BinaryOp::Div),
            OperatorId::Percent => Some(BinaryOp::Mod),
            _ => None,
        })
    }

    /// Fold `operand (op operand)*` to the left. The node token is the operator token.
    fn left_assoc(
        &mut self,
        operand: fn(&mut Self) -> ParseResult<Node<Expr>>,
        binary_op: fn(TokenKind) -> Option<BinaryOp>,
    ) -> ParseResult<Node<Expr>> {
        let mut left = operand(self)?;

        while let Some(op) = binary_op(self.current().kind) {
            let op_token = self.advance();
            let right = operand(self)?;
            left = Node::new(
                Expr::Binary {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
                op_token,
            );
        }

        Ok(left)
    }

    fn unary(&mut self) -> ParseResult<Node<Expr>> {
        let token = self.current();
        let op = match token.kind {
            TokenKind::Operator(OperatorId::Bang) => UnaryOp::Not,
            TokenKind::Operator(OperatorId::Minus) => UnaryOp::Neg,
            _ => return self.call(),
        };
        self.advance();

        let operand = self.nested(Self::unary)?;
        Ok(Node::new(
            Expr::Unary {
                op,
                operand: Box::new(operand),
            },
            token,
        ))
    }

    /// Primary followed by any number of `(args)` / `.member` suffixes.
    fn call(&mut self) -> ParseResult<Node<Expr>> {
        let mut expr = self.primary()?;

        loop {
            if self.match_punct(PunctuationId::LParen) {
                let args = self.arguments()?;
                let token = expr.token;
                expr = Node::new(
                    Expr::Call {
                        callee: Box::new(expr),
                        args,
                    },
                    token,
                );
            } else if self.match_punct(PunctuationId::Dot) {
                let member = self.expect(
                    TokenKind::Ident,
                    ParseErrorKind::ExpectedIdentifier,
                    "a member name after `.`",
                )?;
                expr = Node::new(
                    Expr::Member {
                        object: Box::new(expr),
                        member,
                    },
                    member,
                );
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Comma-separated arguments after `(`, through the closing `)`.
    fn arguments(&mut self) -> ParseResult<Vec<Node<Expr>>> {
        let mut args = Vec::new();
        if !self.check_punct(PunctuationId::RParen) {
            loop {
                args.push(self.expression()?);
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }
        self.expect_punct(
            PunctuationId::RParen,
            ParseErrorKind::UnmatchedParen,
            "`)` after the call arguments",
        )?;
        Ok(args)
    }

    fn primary(&mut self) -> ParseResult<Node<Expr>> {
        let token = self.current();

        if let Some(kind) = literal_kind(token.kind) {
            self.advance();
            return Ok(Node::new(Expr::Literal(kind), token));
        }

        match token.kind {
            TokenKind::Ident => {
                self.advance();
                Ok(Node::new(Expr::Identifier, token))
            }
            TokenKind::Punctuation(PunctuationId::LParen) => {
                self.advance();
                let expr = self.expression()?;
                self.expect_punct(
                    PunctuationId::RParen,
                    ParseErrorKind::UnmatchedParen,
                    "`)` to close the group",
                )?;
                Ok(expr)
            }
            _ => Err(self.error_at(token, ParseErrorKind::ExpectedExpression, "an expression")),
        }
    }
}
