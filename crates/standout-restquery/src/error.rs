//! Error types for the restquery crate.

use thiserror::Error;

/// Errors that can occur while normalizing query parameters.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A filter token could not be parsed and the policy is to reject.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// A page or size value failed validation.
    #[error("invalid pagination {field} '{value}': {reason}")]
    Pagination {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    /// Normalizer configuration could not be loaded.
    #[error("invalid normalizer config: {0}")]
    Config(#[from] serde_yaml::Error),

    /// Descriptor or parameter JSON could not be (de)serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single filter token that did not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid filter '{token}': {kind}")]
pub struct FilterError {
    /// The offending token, verbatim.
    pub token: String,
    /// Why it was rejected.
    pub kind: FilterErrorKind,
}

impl FilterError {
    pub(crate) fn new(token: &str, kind: FilterErrorKind) -> Self {
        FilterError {
            token: token.to_string(),
            kind,
        }
    }
}

/// Reason a filter token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FilterErrorKind {
    #[error("expected a field name")]
    MissingKey,

    #[error("unknown operator")]
    UnknownOperator,

    #[error("missing value")]
    MissingValue,

    #[error("values may not contain whitespace")]
    Whitespace,

    #[error("unexpected input after closing bracket")]
    TrailingInput,

    #[error("bracket expression is not closed")]
    UnbalancedBrackets,

    /// Brackets must be `[...]` or `]...[`.
    #[error("brackets must be [..] or ]..[")]
    InvalidBracketPair,

    #[error("brackets are empty")]
    EmptyBrackets,

    /// A single bare value in brackets: neither `-` nor `,` present.
    #[error("expected '-' (range) or ',' (set) inside brackets")]
    MissingDelimiter,

    #[error("range needs exactly two non-empty endpoints")]
    InvalidRange,

    #[error("set contains an empty element")]
    EmptyElement,
}

/// Result type for restquery operations.
pub type Result<T> = std::result::Result<T, QueryError>;
