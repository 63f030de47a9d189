//! Punctuation vocabulary.
//!
//! Delimiters and separators that are not operators: brackets, `,`, `.`, and the colon family (`:`, `::`, `:=`).
//!
//! ## Notes
//! - `::` and `:=` are single tokens. The parser's declaration lookahead (`name :: fn`, `name := value`) relies on it.
//! - The statement terminator (`;` or newline) is a dedicated token kind, not punctuation.

/// Stable identifier for every punctuation token.
///
/// ## Notes
/// - Declaration order must match [`PUNCTUATION`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PunctuationId {
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Colon,
    ColonColon,
    ColonEq,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
    pub description: &'static str,
}

/// Registry of all punctuation, in [`PunctuationId`] order.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    info(PunctuationId::LParen, "(", "Open a parameter list, call, or group."),
    info(PunctuationId::RParen, ")", "Close a parameter list, call, or group."),
    info(PunctuationId::LBrace, "{", "Open a block, struct body, or enum body."),
    info(PunctuationId::RBrace, "}", "Close a block, struct body, or enum body."),
    info(PunctuationId::LBracket, "[", "Open an array type size."),
    info(PunctuationId::RBracket, "]", "Close an array type size."),
    info(PunctuationId::Comma, ",", "Separate parameters, arguments, and members."),
    info(PunctuationId::Dot, ".", "Member access."),
    info(PunctuationId::Colon, ":", "Type annotation."),
    info(PunctuationId::ColonColon, "::", "Constant binding or named declaration."),
    info(PunctuationId::ColonEq, ":=", "Inferred variable binding."),
];

/// Full metadata for a punctuation token.
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    &PUNCTUATION[id as usize]
}

/// Canonical spelling.
pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).canonical
}

/// Lookup by spelling.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == s).map(|p| p.id)
}

const fn info(id: PunctuationId, canonical: &'static str, description: &'static str) -> PunctuationInfo {
    PunctuationInfo {
        id,
        canonical,
        description,
    }
}
