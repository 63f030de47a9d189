//! Syntax frontend for the Rotate language: source buffers, lexer, parser, AST, diagnostics.
//!
//! Pipeline: [`source::SourceFile`] → [`lexer::lex`] → `Vec<Token>` → [`parser::parse`] → [`ast::Program`].
//!
//! ## Notes
//! - This crate is "syntax-only": no name resolution, no type checking, no code generation.
//! - Both stages stop at the first error and return a single [`diagnostics::CompileError`].
//! - Vocabulary identity (keywords/operators/punctuation/primitive types) comes from `rotate_core::lang` registries.
//! - Nothing here prints. Rendering goes through [`diagnostics::format_error`] or a [`diagnostics::DiagnosticSink`].
//!
//! ## Examples
//! ```rust
//! use rotate_syntax::{lexer, parser};
//!
//! let source = "add :: fn(a: int, b: int) int { ret a + b }\n";
//! let tokens = lexer::lex(source).unwrap();
//! let program = parser::parse(source, &tokens).unwrap();
//! assert_eq!(program.declarations.len(), 1);
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod source;
pub mod token_helpers;
