//! Primitive type vocabulary.
//!
//! The five builtin scalar types. Their spellings are reserved keywords; this registry maps between the keyword and
//! the primitive identity that the AST records.

use super::keywords::KeywordId;

/// Stable identifier for every primitive type.
///
/// ## Notes
/// - Declaration order must match [`PRIMITIVES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveId {
    Int,
    UInt,
    Flt,
    Bool,
    Char,
}

/// Metadata for a primitive type.
#[derive(Debug, Clone, Copy)]
pub struct PrimitiveInfo {
    pub id: PrimitiveId,
    pub keyword: KeywordId,
    pub canonical: &'static str,
    pub description: &'static str,
}

/// Registry of all primitive types, in [`PrimitiveId`] order.
pub const PRIMITIVES: &[PrimitiveInfo] = &[
    info(PrimitiveId::Int, KeywordId::Int, "int", "Signed 64-bit integer."),
    info(PrimitiveId::UInt, KeywordId::UInt, "uint", "Unsigned 64-bit integer."),
    info(PrimitiveId::Flt, KeywordId::Flt, "flt", "64-bit floating point number."),
    info(PrimitiveId::Bool, KeywordId::Bool, "bool", "Boolean."),
    info(PrimitiveId::Char, KeywordId::Char, "char", "Single byte character."),
];

/// Full metadata for a primitive type.
pub fn info_for(id: PrimitiveId) -> &'static PrimitiveInfo {
    &PRIMITIVES[id as usize]
}

/// Canonical spelling.
pub fn as_str(id: PrimitiveId) -> &'static str {
    info_for(id).canonical
}

/// Map a type keyword to its primitive, if it names one.
pub fn from_keyword(kw: KeywordId) -> Option<PrimitiveId> {
    PRIMITIVES.iter().find(|p| p.keyword == kw).map(|p| p.id)
}

const fn info(id: PrimitiveId, keyword: KeywordId, canonical: &'static str, description: &'static str) -> PrimitiveInfo {
    PrimitiveInfo {
        id,
        keyword,
        canonical,
        description,
    }
}
