//! Canonical language vocabulary for the Rotate compiler.
//!
//! This crate is intentionally tiny and dependency-free. It holds the registries that give every reserved word,
//! operator, punctuation mark, and primitive type a stable identifier plus const metadata, so the lexer, parser,
//! diagnostics, and debug dump never compare raw spellings.
//!
//! ## Notes
//!
//! - No IO, no global state, no AST types.
//! - The lexer/parser enforce syntax; registries only answer "what is this spelling" and "what do we know about it".

pub mod lang;
