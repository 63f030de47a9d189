#![forbid(unsafe_code)]
//! Rotate Programming Language Compiler
//!
//! Rotate is a small C-like language with Go-style declarations (`name :: fn(...)`, `x := value`). This crate is the
//! compiler driver: it loads `.vr` files, runs the syntax frontend from `rotate_syntax`, and optionally writes an
//! org-mode compilation log. There is no semantic analysis or code generation yet.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod version;

pub use rotate_core::lang;
pub use rotate_syntax::ast;
pub use rotate_syntax::diagnostics;
pub use rotate_syntax::lexer;
pub use rotate_syntax::parser;
pub use rotate_syntax::printer;
pub use rotate_syntax::source;
