/// Declaration parsing methods.
///
/// This chunk parses top-level declarations (imports, functions, variables, structs, enums). The same variable
/// rule backs `let` / `name: T = v` statements inside blocks.
///
/// ## Notes
/// - The `name ::` prefix is shared by imports, functions and constants, so [`Parser::declaration`] looks up to
///   three tokens ahead before committing to a rule.
impl<'a> Parser<'a> {
    // ========================================================================
    // Declarations
    // ========================================================================

    /// Classify the upcoming declaration and dispatch to its rule.
    ///
    /// - `name :: import` → import
    /// - `name :: fn` → function
    /// - `name :: <anything else>` → constant
    /// - `name :` / `name :=` → variable
    /// - `import` / `fn` / `struct` / `enum` / `let` → the matching rule
    fn declaration(&mut self) -> ParseResult<Node<Declaration>> {
        let current = self.current();
        let next = self.peek_next().kind;

        if current.kind == TokenKind::Ident {
            if next.is_punctuation(PunctuationId::ColonColon) {
                let third = self.peek_at(2).kind;
                if third.is_keyword(KeywordId::Import) {
                    return self.import_decl();
                }
                if third.is_keyword(KeywordId::Fn) {
                    return self.function_decl();
                }
                return self.variable_decl();
            }
            if next.is_punctuation(PunctuationId::Colon) || next.is_punctuation(PunctuationId::ColonEq) {
                return self.variable_decl();
            }
        }

        match current.kind.keyword_id() {
            Some(KeywordId::Import) => self.import_decl(),
            Some(KeywordId::Fn) => self.function_decl(),
            Some(KeywordId::Struct) => self.struct_decl(),
            Some(KeywordId::Enum) => self.enum_decl(),
            Some(KeywordId::Let) => self.variable_decl(),
            _ => Err(self.error_at(current, ParseErrorKind::UnexpectedToken, "a declaration")),
        }
    }

    /// `alias? :: import "path"`
    fn import_decl(&mut self) -> ParseResult<Node<Declaration>> {
        let alias = if self.check(TokenKind::Ident) {
            let alias = self.advance();
            self.expect_punct(
                PunctuationId::ColonColon,
                ParseErrorKind::UnexpectedToken,
                "`::` after the import alias",
            )?;
            Some(alias)
        } else {
            None
        };

        let keyword = self.expect_keyword(KeywordId::Import, ParseErrorKind::UnexpectedToken, "`import`")?;
        let module_path = self.expect(
            TokenKind::String,
            ParseErrorKind::ExpectedExpression,
            "a module path string after `import`",
        )?;

        Ok(Node::new(
            Declaration::Import(ImportDecl { alias, module_path }),
            alias.unwrap_or(keyword),
        ))
    }

    /// `name :: fn(params) ret? { body }` or `fn name(params) ret? { body }`
    fn function_decl(&mut self) -> ParseResult<Node<Declaration>> {
        let prefixed_name = if self.check(TokenKind::Ident) {
            let name = self.advance();
            self.expect_punct(
                PunctuationId::ColonColon,
                ParseErrorKind::UnexpectedToken,
                "`::` after the function name",
            )?;
            Some(name)
        } else {
            None
        };

        let fn_token = self.expect_keyword(KeywordId::Fn, ParseErrorKind::InvalidFunctionSignature, "`fn`")?;
        let name = match prefixed_name {
            Some(name) => name,
            None => self.expect(
                TokenKind::Ident,
                ParseErrorKind::ExpectedIdentifier,
                "a function name after `fn`",
            )?,
        };

        self.expect_punct(
            PunctuationId::LParen,
            ParseErrorKind::InvalidFunctionSignature,
            "`(` to start the parameter list",
        )?;
        let params = self.parameters()?;

        let return_type = if self.check_punct(PunctuationId::LBrace) {
            None
        } else {
            Some(self.parse_type()?)
        };
        let body = self.block()?;

        let decl = FunctionDecl {
            name,
            params,
            return_type,
            body,
        };
        Ok(Node::new(Declaration::Function(decl), prefixed_name.unwrap_or(fn_token)))
    }

    /// Parameter list after `(`, through the closing `)`.
    fn parameters(&mut self) -> ParseResult<Vec<VariableDecl>> {
        let mut params: Vec<VariableDecl> = Vec::new();

        if self.match_punct(PunctuationId::RParen) {
            return Ok(params);
        }
        if !self.check(TokenKind::Ident) {
            return Err(self.error_at(
                self.current(),
                ParseErrorKind::UnmatchedParen,
                "`)` to close the parameter list",
            ));
        }

        loop {
            let name = self.expect(TokenKind::Ident, ParseErrorKind::ExpectedIdentifier, "a parameter name")?;
            let spelling = name.lexeme(self.source);
            if params.iter().any(|p| p.name.lexeme(self.source) == spelling) {
                return Err(CompileError::new(
                    ParseErrorKind::DuplicateParameter,
                    format!("parameter `{spelling}` is already declared"),
                    name.span,
                    self.source,
                ));
            }

            let ty = if self.match_punct(PunctuationId::Colon) {
                Some(self.parse_type()?)
            } else {
                None
            };
            params.push(VariableDecl {
                name,
                ty,
                initializer: None,
                is_constant: false,
            });

            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }

        self.expect_punct(
            PunctuationId::RParen,
            ParseErrorKind::UnmatchedParen,
            "`)` to close the parameter list",
        )?;
        Ok(params)
    }

    /// `let? name (:: | : Type = | :=) initializer`, wrapped in a node on its first token.
    fn variable_decl(&mut self) -> ParseResult<Node<Declaration>> {
        let start = self.current();
        let has_let = self.match_keyword(KeywordId::Let);
        let var = self.variable(has_let)?;
        Ok(Node::new(Declaration::Variable(var), start))
    }

    /// The part of a variable declaration after an optional `let`.
    ///
    /// `:=` is only accepted without `let`.
    fn variable(&mut self, has_let: bool) -> ParseResult<VariableDecl> {
        let name = self.expect(TokenKind::Ident, ParseErrorKind::ExpectedIdentifier, "a variable name")?;

        let (ty, is_constant) = if self.match_punct(PunctuationId::ColonColon) {
            (None, true)
        } else if self.match_punct(PunctuationId::Colon) {
            let ty = self.parse_type()?;
            self.expect_op(
                OperatorId::Eq,
                ParseErrorKind::UnexpectedToken,
                "`=` after the variable type",
            )?;
            (Some(ty), false)
        } else if !has_let && self.match_punct(PunctuationId::ColonEq) {
            (None, false)
        } else {
            let expected = if has_let {
                "`:` or `::` after the variable name"
            } else {
                "`:=`, `::` or `:` after the variable name"
            };
            return Err(self.error_at(self.current(), ParseErrorKind::UnexpectedToken, expected));
        };

        let initializer = self.expression()?;
        Ok(VariableDecl {
            name,
            ty,
            initializer: Some(initializer),
            is_constant,
        })
    }

    /// `struct Name { field: Type ... }`
    ///
    /// Fields are separated by terminators and/or commas.
    fn struct_decl(&mut self) -> ParseResult<Node<Declaration>> {
        let keyword = self.expect_keyword(KeywordId::Struct, ParseErrorKind::UnexpectedToken, "`struct`")?;
        let name = self.expect(TokenKind::Ident, ParseErrorKind::ExpectedIdentifier, "a struct name")?;
        self.expect_punct(
            PunctuationId::LBrace,
            ParseErrorKind::UnmatchedBrace,
            "`{` after the struct name",
        )?;

        let mut fields = Vec::new();
        loop {
            self.skip_terminators();
            if self.check_punct(PunctuationId::RBrace) || self.is_at_end() {
                break;
            }

            let field = self.expect(TokenKind::Ident, ParseErrorKind::InvalidStructField, "a field name")?;
            self.expect_punct(
                PunctuationId::Colon,
                ParseErrorKind::InvalidStructField,
                "`:` after the field name",
            )?;
            let ty = self.parse_type()?;
            fields.push(VariableDecl {
                name: field,
                ty: Some(ty),
                initializer: None,
                is_constant: false,
            });

            if !self.match_punct(PunctuationId::Comma)
                && !self.check(TokenKind::Terminator)
                && !self.check_punct(PunctuationId::RBrace)
            {
                return Err(self.error_at(
                    self.current(),
                    ParseErrorKind::InvalidStructField,
                    "a newline or `,` after the field",
                ));
            }
        }

        self.expect_punct(
            PunctuationId::RBrace,
            ParseErrorKind::UnmatchedBrace,
            "`}` to close the struct body",
        )?;
        Ok(Node::new(Declaration::Struct(StructDecl { name, fields }), keyword))
    }

    /// `enum Name { A, B, C }`; commas are optional and members may span lines.
    fn enum_decl(&mut self) -> ParseResult<Node<Declaration>> {
        let keyword = self.expect_keyword(KeywordId::Enum, ParseErrorKind::UnexpectedToken, "`enum`")?;
        let name = self.expect(TokenKind::Ident, ParseErrorKind::ExpectedIdentifier, "an enum name")?;
        self.expect_punct(
            PunctuationId::LBrace,
            ParseErrorKind::UnmatchedBrace,
            "`{` after the enum name",
        )?;

        let mut members = Vec::new();
        loop {
            self.skip_terminators();
            if self.check_punct(PunctuationId::RBrace) || self.is_at_end() {
                break;
            }
            let member = self.expect(TokenKind::Ident, ParseErrorKind::InvalidEnumMember, "an enum member name")?;
            members.push(VariableDecl::bare(member));
            self.match_punct(PunctuationId::Comma);
        }

        self.expect_punct(
            PunctuationId::RBrace,
            ParseErrorKind::UnmatchedBrace,
            "`}` to close the enum body",
        )?;
        Ok(Node::new(Declaration::Enum(EnumDecl { name, members }), keyword))
    }
}
