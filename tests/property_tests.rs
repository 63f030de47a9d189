//! Property-based tests for the Rotate compiler front end
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use proptest::prelude::*;
use rotate::lexer::{self, TokenKind};
use rotate::parser;

// Strategy for generating Rotate identifiers that are not reserved words
fn ident_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}".prop_filter("Not a keyword", |s| {
        rotate_core::lang::keywords::from_str(s).is_none()
    })
}

// Strategy for arithmetic over identifiers and small integers
fn expr_strategy() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![ident_strategy(), (0u32..1000).prop_map(|n| n.to_string())];
    leaf.prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            (inner.clone(), prop::sample::select(vec!["+", "-", "*", "/", "<", "==", "and"]), inner.clone())
                .prop_map(|(l, op, r)| format!("{l} {op} {r}")),
            inner.clone().prop_map(|e| format!("({e})")),
            inner.prop_map(|e| format!("-{e}")),
        ]
    })
}

// Strategy for small well-formed functions
fn function_strategy() -> impl Strategy<Value = String> {
    (ident_strategy(), ident_strategy(), expr_strategy())
        .prop_map(|(name, param, body)| format!("{name} :: fn({param}: int) int {{\n    ret {body}\n}}\n"))
}

proptest! {
    /// Property: the lexer never panics, and on success every span lies inside the source
    #[test]
    fn lexer_spans_stay_in_bounds(source in "\\PC{0,64}") {
        if let Ok(tokens) = lexer::lex(&source) {
            for token in &tokens {
                prop_assert!(token.span.start <= token.span.end);
                prop_assert!(token.span.end <= source.len());
            }
            prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eot));
        }
    }

    /// Property: line numbers never decrease along the token stream
    #[test]
    fn lexer_lines_are_monotonic(source in "[a-z0-9 +*/;:=(){}\\n\"]{0,80}") {
        if let Ok(tokens) = lexer::lex(&source) {
            for pair in tokens.windows(2) {
                prop_assert!(pair[0].line <= pair[1].line);
            }
        }
    }

    /// Property: the parser never panics on any token stream the lexer accepts
    #[test]
    fn parser_never_panics(source in "[a-z0-9 +\\-*/;:=(){}\\[\\],.<>!\\n]{0,80}") {
        if let Ok(tokens) = lexer::lex(&source) {
            let _ = parser::parse(&source, &tokens);
        }
    }

    /// Property: generated functions parse into exactly one declaration
    #[test]
    fn generated_functions_parse(func in function_strategy()) {
        let tokens = lexer::lex(&func).expect("Lex failed");
        let program = parser::parse(&func, &tokens).expect("Parse failed");
        prop_assert_eq!(program.declarations.len(), 1);
    }

    /// Property: identifiers survive lexing as single identifier tokens
    #[test]
    fn identifiers_survive_lexing(ident in ident_strategy()) {
        let source = format!("x := {ident}");
        let tokens = lexer::lex(&source).expect("Lex failed");
        prop_assert_eq!(tokens.len(), 4);
        prop_assert_eq!(tokens[2].kind, TokenKind::Ident);
        prop_assert_eq!(tokens[2].lexeme(&source), ident.as_str());
    }
}
