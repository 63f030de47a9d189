//! Define the reserved keyword vocabulary for the Rotate language.
//!
//! This module is the single source of truth for reserved words: a stable identifier ([`KeywordId`]) plus a const
//! metadata table ([`KEYWORDS`]) that records canonical spellings and categories.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive** and exact (`fnx` is an identifier, not `fn` + `x`).
//! - `and` / `or` are also word operators. If you need operator precedence, use [`crate::lang::operators`].
//! - Primitive type names (`int`, `uint`, `flt`, `bool`, `char`) are reserved here and mapped to
//!   [`crate::lang::types::PrimitiveId`] by the type registry.
//!
//! ## Examples
//! ```rust
//! use rotate_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("fn"), Some(KeywordId::Fn));
//! assert_eq!(keywords::from_str("Fn"), None);
//! ```

/// Stable identifier for every reserved keyword.
///
/// ## Notes
/// - Declaration order must match [`KEYWORDS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeywordId {
    // Declarations
    Fn,
    Let,
    Struct,
    Enum,
    Import,

    // Control flow
    If,
    Else,
    While,
    For,
    In,
    Ret,
    Defer,

    // Word operators
    And,
    Or,

    // Literals
    True,
    False,
    Nil,

    // Primitive types
    Int,
    UInt,
    Flt,
    Bool,
    Char,
}

/// High-level grouping for documentation and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Declaration,
    Import,
    ControlFlow,
    Operator,
    Literal,
    Type,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    pub description: &'static str,
}

/// Registry of all keywords, in [`KeywordId`] order.
pub const KEYWORDS: &[KeywordInfo] = &[
    info(KeywordId::Fn, "fn", KeywordCategory::Declaration, "Function declaration or function type."),
    info(KeywordId::Let, "let", KeywordCategory::Declaration, "Optional variable declaration prefix."),
    info(KeywordId::Struct, "struct", KeywordCategory::Declaration, "Structure declaration."),
    info(KeywordId::Enum, "enum", KeywordCategory::Declaration, "Enumeration declaration."),
    info(KeywordId::Import, "import", KeywordCategory::Import, "Module import (`alias :: import \"path\"`)."),
    info(KeywordId::If, "if", KeywordCategory::ControlFlow, "Conditional statement."),
    info(KeywordId::Else, "else", KeywordCategory::ControlFlow, "Alternative branch of an `if`."),
    info(KeywordId::While, "while", KeywordCategory::ControlFlow, "Pre-tested loop."),
    info(KeywordId::For, "for", KeywordCategory::ControlFlow, "Range loop or C-style loop."),
    info(KeywordId::In, "in", KeywordCategory::ControlFlow, "Separates the loop variable from its range."),
    info(KeywordId::Ret, "ret", KeywordCategory::ControlFlow, "Return from the enclosing function."),
    info(KeywordId::Defer, "defer", KeywordCategory::ControlFlow, "Run a statement when the scope exits."),
    info(KeywordId::And, "and", KeywordCategory::Operator, "Logical conjunction."),
    info(KeywordId::Or, "or", KeywordCategory::Operator, "Logical disjunction."),
    info(KeywordId::True, "true", KeywordCategory::Literal, "Boolean true."),
    info(KeywordId::False, "false", KeywordCategory::Literal, "Boolean false."),
    info(KeywordId::Nil, "nil", KeywordCategory::Literal, "The absent value."),
    info(KeywordId::Int, "int", KeywordCategory::Type, "Signed integer type."),
    info(KeywordId::UInt, "uint", KeywordCategory::Type, "Unsigned integer type."),
    info(KeywordId::Flt, "flt", KeywordCategory::Type, "Floating point type."),
    info(KeywordId::Bool, "bool", KeywordCategory::Type, "Boolean type."),
    info(KeywordId::Char, "char", KeywordCategory::Type, "Single byte character type."),
];

/// Full metadata for a keyword.
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    &KEYWORDS[id as usize]
}

/// Canonical spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Lookup by spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if `s` is exactly a reserved word.
/// - `None` otherwise (including prefixes and different casing).
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(
    id: KeywordId,
    canonical: &'static str,
    category: KeywordCategory,
    description: &'static str,
) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        description,
    }
}
