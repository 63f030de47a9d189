//! Rotate language vocabulary registries.
//!
//! Callers work with **stable IDs** (`KeywordId`, `OperatorId`, `PunctuationId`, `PrimitiveId`) and look up
//! spellings/metadata through the const tables in each submodule.
//!
//! ## Notes
//! - Every table is ordered exactly like its ID enum, so `info_for` is a plain index. Each module carries a test
//!   pinning that ordering.
//!
//! ## Examples
//! ```rust
//! use rotate_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("ret"), Some(KeywordId::Ret));
//! assert_eq!(keywords::as_str(KeywordId::Ret), "ret");
//! ```

pub mod keywords;
pub mod operators;
pub mod punctuation;
pub mod types;
