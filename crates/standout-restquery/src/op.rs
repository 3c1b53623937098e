//! Filter operators.
//!
//! The [`Operator`] enum covers both filter grammars: the infix comparison
//! form (`age<=20`) and the bracket form (`age[20-30]`, `age]1,2[`).

use serde::{Serialize, Serializer};

/// Operator of a filter clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    // Comparison form
    /// `==`
    Eq,
    /// `!=`
    Neq,
    /// `~` (pattern match)
    Like,
    /// `!~`
    NotLike,
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// `>`
    Gt,
    /// `>=`
    Gte,

    // Bracket form
    /// `key[a,b,c]`
    In,
    /// `key]a,b,c[`
    NotIn,
    /// `key[a-b]`
    Between,
    /// `key]a-b[`
    NotBetween,
}

/// Comparison lexemes in match order.
///
/// Two-character operators come before their one-character prefixes so
/// that `<=20` never reads as `<` applied to `=20`.
pub(crate) const COMPARISON_LEXEMES: [(&str, Operator); 8] = [
    ("==", Operator::Eq),
    ("!=", Operator::Neq),
    ("!~", Operator::NotLike),
    ("<=", Operator::Lte),
    (">=", Operator::Gte),
    ("~", Operator::Like),
    ("<", Operator::Lt),
    (">", Operator::Gt),
];

impl Operator {
    /// Returns the operator whose lexeme prefixes `input`, with its length.
    ///
    /// Candidates are tried in [`COMPARISON_LEXEMES`] order; the first hit wins.
    pub(crate) fn match_comparison(input: &str) -> Option<(Operator, usize)> {
        COMPARISON_LEXEMES
            .iter()
            .find(|(lexeme, _)| input.starts_with(lexeme))
            .map(|(lexeme, op)| (*op, lexeme.len()))
    }

    /// Returns the affirmative/negated counterpart.
    ///
    /// Ordering comparisons have no counterpart and return themselves.
    pub fn negate(self) -> Operator {
        match self {
            Operator::Eq => Operator::Neq,
            Operator::Neq => Operator::Eq,
            Operator::Like => Operator::NotLike,
            Operator::NotLike => Operator::Like,
            Operator::In => Operator::NotIn,
            Operator::NotIn => Operator::In,
            Operator::Between => Operator::NotBetween,
            Operator::NotBetween => Operator::Between,
            other => other,
        }
    }

    /// Returns the wire form of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Neq => "!=",
            Operator::Like => "~",
            Operator::NotLike => "!~",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::In => "in",
            Operator::NotIn => "not in",
            Operator::Between => "between",
            Operator::NotBetween => "not between",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
