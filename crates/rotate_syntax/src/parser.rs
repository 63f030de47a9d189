//! Parser for the Rotate programming language
//!
//! Converts a token stream into an AST with recursive descent for declarations and statements and precedence
//! climbing for expressions. Parsing stops at the first error; there is no resynchronization.
//!
//! ## Examples
//!
//! ```rust
//! use rotate_syntax::ast::Declaration;
//! use rotate_syntax::{lexer, parser};
//!
//! let source = "x := 5\n";
//! let tokens = lexer::lex(source).unwrap();
//! let ast = parser::parse(source, &tokens).unwrap();
//! assert!(matches!(ast.declarations[0].node, Declaration::Variable(_)));
//! ```

use crate::ast::*;
use crate::diagnostics::{CompileError, DiagnosticSink, ParseErrorKind};
use crate::lexer::{Token, TokenKind};
use crate::source::SourceFile;
use rotate_core::lang::keywords::KeywordId;
use rotate_core::lang::operators::OperatorId;
use rotate_core::lang::punctuation::PunctuationId;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/types.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
