//! Operator vocabulary.
//!
//! This module defines the canonical operator set (symbol operators like `+` and the word operators `and` / `or`)
//! along with precedence, associativity, and fixity metadata.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Word operators are lexed as keywords; their entries have [`OperatorInfo::is_keyword_spelling`] set.
//! - `-` is listed once as an infix operator; the parser also accepts it in prefix position.
//! - [`Precedence`] mirrors the parser's ladder, lowest binding first.
//!
//! ## Examples
//! ```rust
//! use rotate_core::lang::operators::{self, OperatorId, Precedence};
//!
//! assert_eq!(operators::from_str("<="), Some(OperatorId::LtEq));
//! assert_eq!(operators::info_for(OperatorId::Star).precedence, Precedence::Factor);
//! assert!(Precedence::Factor > Precedence::Term);
//! ```

/// Binding strength, lowest first. Comparisons derive from declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Precedence {
    Assignment,
    Or,
    And,
    Equality,
    Comparison,
    Term,
    Factor,
    Unary,
    Call,
    Primary,
}

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

/// Define whether an operator is infix (binary) or prefix (unary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Infix,
    Prefix,
}

/// Stable identifier for every operator.
///
/// ## Notes
/// - Declaration order must match [`OPERATORS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Range
    DotDot,

    // Assignment
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,

    // Logical
    Bang,
    And,
    Or,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spellings: &'static [&'static str],
    pub precedence: Precedence,
    pub associativity: Associativity,
    pub fixity: Fixity,
    pub is_keyword_spelling: bool,
}

/// Registry of all operators, in [`OperatorId`] order.
pub const OPERATORS: &[OperatorInfo] = &[
    // Arithmetic
    op(OperatorId::Plus, &["+"], Precedence::Term, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Minus, &["-"], Precedence::Term, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Star, &["*"], Precedence::Factor, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Slash, &["/"], Precedence::Factor, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Percent, &["%"], Precedence::Factor, Associativity::Left, Fixity::Infix, false),
    // Comparison
    op(OperatorId::EqEq, &["=="], Precedence::Equality, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::NotEq, &["!="], Precedence::Equality, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Lt, &["<"], Precedence::Comparison, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::LtEq, &["<="], Precedence::Comparison, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Gt, &[">"], Precedence::Comparison, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::GtEq, &[">="], Precedence::Comparison, Associativity::Left, Fixity::Infix, false),
    // Range
    op(OperatorId::DotDot, &[".."], Precedence::Comparison, Associativity::Left, Fixity::Infix, false),
    // Assignment
    op(OperatorId::Eq, &["="], Precedence::Assignment, Associativity::Right, Fixity::Infix, false),
    op(OperatorId::PlusEq, &["+="], Precedence::Assignment, Associativity::Right, Fixity::Infix, false),
    op(OperatorId::MinusEq, &["-="], Precedence::Assignment, Associativity::Right, Fixity::Infix, false),
    op(OperatorId::StarEq, &["*="], Precedence::Assignment, Associativity::Right, Fixity::Infix, false),
    op(OperatorId::SlashEq, &["/="], Precedence::Assignment, Associativity::Right, Fixity::Infix, false),
    // Logical
    op(OperatorId::Bang, &["!"], Precedence::Unary, Associativity::Right, Fixity::Prefix, false),
    op(OperatorId::And, &["and"], Precedence::And, Associativity::Left, Fixity::Infix, true),
    op(OperatorId::Or, &["or"], Precedence::Or, Associativity::Left, Fixity::Infix, true),
];

/// Return the full metadata entry for an operator.
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    &OPERATORS[id as usize]
}

/// Return the primary spelling for an operator.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spellings.first().copied().unwrap_or("")
}

/// Resolve an operator spelling to its identifier.
///
/// ## Returns
/// - `Some(OperatorId)` if the spelling exists in [`OPERATORS`].
/// - `None` otherwise.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS
        .iter()
        .find(|o| {
            let spellings: &[&str] = o.spellings;
            spellings.contains(&spelling)
        })
        .map(|o| o.id)
}

/// Return `true` for `=` and the compound assignment operators.
pub fn is_assignment(id: OperatorId) -> bool {
    info_for(id).precedence == Precedence::Assignment
}

// --- helpers -----------------------------------------------------------------

const fn op(
    id: OperatorId,
    spellings: &'static [&'static str],
    precedence: Precedence,
    associativity: Associativity,
    fixity: Fixity,
    is_keyword_spelling: bool,
) -> OperatorInfo {
    OperatorInfo {
        id,
        spellings,
        precedence,
        associativity,
        fixity,
        is_keyword_spelling,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_ordered_like_the_enum() {
        for (idx, o) in OPERATORS.iter().enumerate() {
            assert_eq!(o.id as usize, idx, "OPERATORS[{idx}] is {:?}", o.id);
        }
    }

    #[test]
    fn spellings_are_unique() {
        let mut seen = Vec::new();
        for o in OPERATORS {
            for sp in o.spellings {
                assert!(!seen.contains(sp), "duplicate operator spelling {sp:?}");
                seen.push(*sp);
            }
        }
    }

    #[test]
    fn assignment_family() {
        assert!(is_assignment(OperatorId::Eq));
        assert!(is_assignment(OperatorId::SlashEq));
        assert!(!is_assignment(OperatorId::EqEq));
        assert_eq!(info_for(OperatorId::Eq).associativity, Associativity::Right);
    }

    #[test]
    fn ladder_order() {
        assert!(Precedence::Or < Precedence::And);
        assert!(Precedence::Equality < Precedence::Comparison);
        assert!(Precedence::Unary < Precedence::Call);
        assert_eq!(info_for(OperatorId::DotDot).precedence, Precedence::Comparison);
    }
}
