#[cfg(test)]
/// Parser unit tests.
///
/// These tests focus on the declaration director, individual syntactic forms, and the error kinds reported for
/// malformed input.
mod tests {
    use super::*;
    use crate::diagnostics::Collector;
    use crate::lexer;
    use crate::printer::render_program;
    use rotate_core::lang::types::PrimitiveId;

    fn parse_str(source: &str) -> Result<Program, CompileError> {
        let tokens = lexer::lex(source)?;
        parse(source, &tokens)
    }

    fn parse_err(source: &str) -> CompileError {
        match parse_str(source) {
            Ok(program) => panic!("expected {source:?} to fail, got {program:?}"),
            Err(e) => e,
        }
    }

    fn sexpr(source: &str) -> String {
        render_program(source, &parse_str(source).unwrap())
    }

    #[test]
    fn test_director_classifies_name_prefixed_forms() {
        let source = "m :: import \"m\"\nf :: fn() {}\nk :: 1\nv: int = 2\nw := 3\n";
        let program = parse_str(source).unwrap();
        let kinds: Vec<_> = program
            .declarations
            .iter()
            .map(|d| match &d.node {
                Declaration::Import(_) => "import",
                Declaration::Function(_) => "function",
                Declaration::Variable(v) if v.is_constant => "const",
                Declaration::Variable(_) => "variable",
                Declaration::Struct(_) => "struct",
                Declaration::Enum(_) => "enum",
            })
            .collect();
        assert_eq!(kinds, vec!["import", "function", "const", "variable", "variable"]);
    }

    #[test]
    fn test_parse_bare_fn_and_let() {
        let source = "fn main() { let count: uint = 0 }\nlet total :: 10";
        assert_eq!(
            sexpr(source),
            "(fn main (params) (block (var count uint 0)))\n(const total 10)"
        );
    }

    #[test]
    fn test_import_without_alias() {
        let source = "import \"core/math\"";
        let program = parse_str(source).unwrap();
        match &program.declarations[0].node {
            Declaration::Import(import) => {
                assert!(import.alias.is_none());
                assert_eq!(import.module_path.string_value(source), Some("core/math"));
            }
            other => panic!("Expected import, got {other:?}"),
        }
        assert!(program.declarations[0].token.kind.is_keyword(KeywordId::Import));
    }

    #[test]
    fn test_import_requires_string_path() {
        let err = parse_err("io :: import std");
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::ExpectedExpression));
    }

    #[test]
    fn test_function_tokens_and_types() {
        let source = "scale :: fn(v: [3]flt, by) [3]flt { ret v }";
        let program = parse_str(source).unwrap();
        let decl = &program.declarations[0];
        assert_eq!(decl.token.lexeme(source), "scale");
        let Declaration::Function(func) = &decl.node else {
            panic!("Expected function");
        };
        assert_eq!(func.params.len(), 2);
        assert!(func.params[1].ty.is_none());
        match &func.params[0].ty.as_ref().unwrap().node {
            Type::Array { element, size } => {
                assert_eq!(element.node, Type::Basic(BasicType::Primitive(PrimitiveId::Flt)));
                assert!(size.is_some());
            }
            other => panic!("Expected array type, got {other:?}"),
        }
        assert!(func.return_type.is_some());
    }

    #[test]
    fn test_unbounded_array_type() {
        assert_eq!(sexpr("buf: []char = nil"), "(var buf (array char) nil)");
    }

    #[test]
    fn test_duplicate_parameter() {
        let source = "f :: fn(a: int, b: int, a: flt) {}";
        let err = parse_err(source);
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::DuplicateParameter));
        assert_eq!(err.span.start, source.rfind("a:").unwrap());
    }

    #[test]
    fn test_function_needs_parameter_list() {
        let err = parse_err("f :: fn\n");
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::InvalidFunctionSignature));
    }

    #[test]
    fn test_let_rejects_walrus() {
        let err = parse_err("let x := 1");
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::UnexpectedToken));
        assert_eq!(err.message, "expected `:` or `::` after the variable name, found `:=`");
    }

    #[test]
    fn test_initializer_is_required() {
        let err = parse_err("x: int =\n");
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::ExpectedExpression));
        assert_eq!(err.message, "expected an expression, found newline");
    }

    #[test]
    fn test_struct_fields_need_types() {
        let err = parse_err("struct P {\n  x\n}");
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::InvalidStructField));

        let err = parse_err("struct P { x: int y: int }");
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::InvalidStructField));
    }

    #[test]
    fn test_enum_members_across_lines() {
        let source = "enum Dir {\n  North,\n  South\n  East, West,\n}";
        assert_eq!(sexpr(source), "(enum Dir North South East West)");

        let err = parse_err("enum Dir { North, 1 }");
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::InvalidEnumMember));
    }

    #[test]
    fn test_unknown_top_level_token() {
        let err = parse_err("ret 1");
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::UnexpectedToken));
        assert_eq!(err.message, "expected a declaration, found `ret`");
    }

    #[test]
    fn test_else_on_next_line() {
        let source = "fn f() {\n  if (a) { ret 1 }\n  else if b { ret 2 }\n  ret 3\n}";
        assert_eq!(
            sexpr(source),
            "(fn f (params) (block (if a (block (ret 1)) (if b (block (ret 2)))) (ret 3)))"
        );
    }

    #[test]
    fn test_parenthesized_if_condition_ends_at_its_paren() {
        assert_eq!(sexpr("fn f() { if (a) -b }"), "(fn f (params) (block (if a (- b))))");
        assert_eq!(sexpr("fn f() { if (a) (b)() }"), "(fn f (params) (block (if a (call b))))");

        let err = parse_err("fn f() { if (a { }");
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::UnmatchedParen));
        assert_eq!(err.message, "expected `)` after the if condition, found `{`");
    }

    #[test]
    fn test_c_style_for() {
        let source = "fn f() { for (i := 0; i < 10; i += 1) { g(i) } }";
        assert_eq!(
            sexpr(source),
            "(fn f (params) (block (for (:= i 0) (< i 10) (+= i 1) (block (call g i)))))"
        );

        let source = "fn f() { for (;;) {} }";
        assert_eq!(sexpr(source), "(fn f (params) (block (for _ _ _ (block))))");
    }

    #[test]
    fn test_for_in_desugars() {
        let source = "fn f() { for x in 0..3 {} }";
        let program = parse_str(source).unwrap();
        let Declaration::Function(func) = &program.declarations[0].node else {
            panic!("Expected function");
        };
        let stmt = &func.body.node.statements[0].node;
        let Statement::For { init, update, .. } = stmt else {
            panic!("Expected for");
        };
        assert!(update.is_none());
        assert!(matches!(init.as_deref().map(|s| &s.node), Some(Statement::Decl(_))));
        let (var, range) = stmt.as_range_loop().unwrap();
        assert_eq!(var.name.lexeme(source), "x");
        assert!(var.initializer.is_none());
        assert!(matches!(range.node, Expr::Binary { op: BinaryOp::Range, .. }));
    }

    #[test]
    fn test_while_requires_parens() {
        assert_eq!(
            sexpr("fn f() { while (n > 0) n -= 1 }"),
            "(fn f (params) (block (while (> n 0) (-= n 1))))"
        );
        let err = parse_err("fn f() { while n > 0 {} }");
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::UnmatchedParen));
    }

    #[test]
    fn test_return_forms_and_defer() {
        let source = "fn f() {\n  defer close(h)\n  ret\n}\nfn g() { ret }";
        assert_eq!(
            sexpr(source),
            "(fn f (params) (block (defer (call close h)) (ret)))\n(fn g (params) (block (ret)))"
        );
    }

    #[test]
    fn test_block_statement_declarations() {
        let source = "fn f() { n: int = 1; let m :: 2; k := n }";
        assert_eq!(
            sexpr(source),
            "(fn f (params) (block (var n int 1) (const m 2) (:= k n)))"
        );
    }

    #[test]
    fn test_precedence_ladder() {
        assert_eq!(
            sexpr("x := a or b and !c == d < e + f * -g"),
            "(var x (or a (and b (== (! c) (< d (+ e (* f (- g))))))))"
        );
        assert_eq!(sexpr("x := (1 + 2) * 3"), "(var x (* (+ 1 2) 3))");
        assert_eq!(sexpr("x := 10 - 4 - 3"), "(var x (- (- 10 4) 3))");
    }

    #[test]
    fn test_assignment_is_right_associative() {
        assert_eq!(
            sexpr("fn f() { a = b = c.d }"),
            "(fn f (params) (block (= a (= b (. c d)))))"
        );
    }

    #[test]
    fn test_invalid_assignment_targets() {
        let err = parse_err("fn f() { a + b = 1 }");
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::InvalidAssignmentTarget));
        assert_eq!(err.message, "left side of `=` must be a variable or field");

        let err = parse_err("fn f() { p.x := 1 }");
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::InvalidAssignmentTarget));

        // Field assignment with `=` is fine.
        assert_eq!(sexpr("fn f() { p.x = 1 }"), "(fn f (params) (block (= (. p x) 1)))");
    }

    #[test]
    fn test_call_errors() {
        let err = parse_err("x := f(a b)");
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::UnmatchedParen));
        assert_eq!(err.message, "expected `)` after the call arguments, found `b`");

        let err = parse_err("x := p.1");
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::ExpectedIdentifier));

        let err = parse_err("x := (1 + 2");
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::UnmatchedParen));
        assert_eq!(err.message, "expected `)` to close the group, found end of input");
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse_err("fn f() {\n  ret 1\n");
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::UnmatchedBrace));
        assert_eq!(err.line, 3);
    }

    #[test]
    fn test_unclosed_array_size() {
        let err = parse_err("a: [3 int = 1");
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::UnmatchedBracket));
    }

    #[test]
    fn test_expected_type_and_statement() {
        let err = parse_err("x: 5 = 1");
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::ExpectedType));

        let err = parse_err("fn f() { if x }");
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::ExpectedStatement));
        assert_eq!(err.message, "expected a statement, found `}`");
    }

    #[test]
    fn test_parser_state_and_take_program() {
        let source = "x := 1";
        let tokens = lexer::lex(source).unwrap();
        let mut parser = Parser::new(source, &tokens);
        parser.run().unwrap();
        assert!(parser.error().is_none());
        assert_eq!(parser.program().map(|p| p.declarations.len()), Some(1));
        assert!(parser.take_program().is_some());
        assert!(parser.take_program().is_none());
        assert!(parser.program().is_none());
    }

    #[test]
    fn test_report_sends_recorded_error() {
        let source = "x := )";
        let tokens = lexer::lex(source).unwrap();
        let mut parser = Parser::new(source, &tokens);
        assert!(parser.run().is_err());
        assert!(parser.program().is_none());

        let file = SourceFile::new("main.vr", source);
        let mut sink = Collector::new();
        parser.report(&file, &mut sink);
        assert_eq!(sink.diagnostics().len(), 1);
        assert_eq!(sink.diagnostics()[0].parse_kind(), Some(ParseErrorKind::ExpectedExpression));
    }

    #[test]
    fn test_cursor_is_clamped_without_trailing_eot() {
        // A stream that lost its EOT still terminates: reads past the end yield the sentinel.
        let source = "x := 1";
        let mut tokens = lexer::lex(source).unwrap();
        tokens.pop();
        let mut parser = Parser::new(source, &tokens);
        parser.run().unwrap();
        assert_eq!(parser.peek_previous().lexeme(source), "1");
        assert_eq!(parser.current().kind, TokenKind::Eot);
        assert_eq!(parser.advance().span, Span::new(6, 6));
        assert_eq!(parser.peek_at(5).kind, TokenKind::Eot);
    }

    fn assert_too_deep(source: &str) {
        let err = parse_err(source);
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::UnexpectedToken));
        assert!(err.message.starts_with("nesting too deep at "), "{}", err.message);
    }

    #[test]
    fn test_deep_nesting_is_an_error_not_a_crash() {
        let n = 10_000;
        assert_too_deep(&format!("x := {}1{}", "(".repeat(n), ")".repeat(n)));
        assert_too_deep(&format!("x := {}1", "-".repeat(n)));
        assert_too_deep(&format!("x := f{}", "(".repeat(n)));
        assert_too_deep(&format!("fn f() {}{}", "{".repeat(n), "}".repeat(n)));
        assert_too_deep(&format!("fn f() {{ {} }}", "if a ".repeat(n)));
        assert_too_deep(&format!("x: {}int = 1", "[]".repeat(n)));
        assert_too_deep(&format!("fn f() {{ a {} }}", "= a ".repeat(n)));
    }

    #[test]
    fn test_nesting_error_points_at_the_token() {
        let source = format!("x := {}1", "(".repeat(MAX_NESTING + 10));
        let err = parse_err(&source);
        // The initializer takes the first level, so the `(` at index MAX_NESTING is the first one rejected.
        let offset = "x := ".len() + MAX_NESTING;
        assert_eq!(err.span, Span::new(offset, offset + 1));
        assert_eq!(
            err.message,
            format!("nesting too deep at `(`, at most {MAX_NESTING} levels are allowed")
        );
    }

    #[test]
    fn test_nesting_below_the_limit_parses() {
        let depth = MAX_NESTING - 2;
        let source = format!("x := {}1{}\n", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(sexpr(&source), "(var x 1)");

        // The counter unwinds between siblings.
        let source = format!("x := {0}1{1} + {0}2{1}\n", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(sexpr(&source), "(var x (+ 1 2))");
    }
}
