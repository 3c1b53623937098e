//! Filter expression grammar.
//!
//! A filter string is a `;`-separated list of tokens. Each token takes one
//! of two forms, tried in order:
//!
//! ```text
//! comparison:  <key><op><value>         op: == != !~ <= >= ~ < >
//! bracket:     <key>[<a>,<b>,...]       in
//!              <key>]<a>,<b>,...[       not in
//!              <key>[<a>-<b>]           between
//!              <key>]<a>-<b>[           not between
//! ```
//!
//! `key` is a run of ASCII word characters (`[A-Za-z0-9_]`). Inside
//! brackets a hyphen takes priority over a comma, so `a[1-2,3]` is a range
//! with endpoints `1` and `2,3`.

use crate::clause::{FilterClause, FilterValue};
use crate::error::{FilterError, FilterErrorKind};
use crate::op::Operator;
use crate::value::{coerce, Scalar};

type FilterResult<T> = std::result::Result<T, FilterError>;

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_bracket(c: char) -> bool {
    c == '[' || c == ']'
}

/// Parses a single filter token into a [`FilterClause`].
///
/// The whole token must be consumed; any leftover input is an error rather
/// than being silently ignored.
///
/// ```
/// use standout_restquery::{parse_filter, Operator, Scalar};
///
/// let clause = parse_filter("age]20,25,30[").unwrap();
/// assert_eq!(clause.operator(), Operator::NotIn);
/// assert_eq!(
///     clause.value().as_list().unwrap(),
///     &[Scalar::from(20), Scalar::from(25), Scalar::from(30)]
/// );
///
/// assert!(parse_filter("age[20]").is_err());
/// ```
pub fn parse_filter(token: &str) -> FilterResult<FilterClause> {
    let key_len = token
        .find(|c: char| !is_word_char(c))
        .unwrap_or(token.len());
    if key_len == 0 {
        return Err(FilterError::new(token, FilterErrorKind::MissingKey));
    }
    let (key, rest) = token.split_at(key_len);

    if let Some((op, len)) = Operator::match_comparison(rest) {
        return parse_comparison(token, key, op, &rest[len..]);
    }

    if rest.starts_with(is_bracket) {
        return parse_bracket(token, key, rest);
    }

    Err(FilterError::new(token, FilterErrorKind::UnknownOperator))
}

/// Splits a filter string on `;` and parses every token.
///
/// Returns one result per non-empty token, in input order. Empty tokens
/// (`a==1;;b==2`, a trailing `;`) are skipped.
pub fn parse_filters(raw: &str) -> Vec<FilterResult<FilterClause>> {
    raw.split(';')
        .filter(|token| !token.is_empty())
        .map(parse_filter)
        .collect()
}

fn parse_comparison(token: &str, key: &str, op: Operator, value: &str) -> FilterResult<FilterClause> {
    if value.is_empty() {
        return Err(FilterError::new(token, FilterErrorKind::MissingValue));
    }
    if value.contains(char::is_whitespace) {
        return Err(FilterError::new(token, FilterErrorKind::Whitespace));
    }

    let scalar = coerce_part(token, value, FilterErrorKind::MissingValue)?;
    Ok(FilterClause::new(key, op, FilterValue::Single(scalar)))
}

fn parse_bracket(token: &str, key: &str, rest: &str) -> FilterResult<FilterClause> {
    let mut chars = rest.chars();
    let open = chars.next();
    let body = chars.as_str();

    let Some(close_at) = body.find(is_bracket) else {
        return Err(FilterError::new(token, FilterErrorKind::UnbalancedBrackets));
    };
    let inner = &body[..close_at];
    let close = body[close_at..].chars().next();
    let trailing = &body[close_at + 1..];

    let negated = match (open, close) {
        (Some('['), Some(']')) => false,
        (Some(']'), Some('[')) => true,
        _ => return Err(FilterError::new(token, FilterErrorKind::InvalidBracketPair)),
    };
    if !trailing.is_empty() {
        return Err(FilterError::new(token, FilterErrorKind::TrailingInput));
    }
    if inner.is_empty() {
        return Err(FilterError::new(token, FilterErrorKind::EmptyBrackets));
    }
    if inner.contains(char::is_whitespace) {
        return Err(FilterError::new(token, FilterErrorKind::Whitespace));
    }

    let (op, values) = if inner.contains('-') {
        let endpoints: Vec<&str> = inner.split('-').collect();
        if endpoints.len() != 2 || endpoints.iter().any(|e| e.is_empty()) {
            return Err(FilterError::new(token, FilterErrorKind::InvalidRange));
        }
        (Operator::Between, coerce_all(token, &endpoints, FilterErrorKind::InvalidRange)?)
    } else if inner.contains(',') {
        let members: Vec<&str> = inner.split(',').collect();
        (Operator::In, coerce_all(token, &members, FilterErrorKind::EmptyElement)?)
    } else {
        return Err(FilterError::new(token, FilterErrorKind::MissingDelimiter));
    };

    let op = if negated { op.negate() } else { op };
    Ok(FilterClause::new(key, op, FilterValue::List(values)))
}

fn coerce_part(token: &str, part: &str, empty: FilterErrorKind) -> FilterResult<Scalar> {
    coerce(part).ok_or_else(|| FilterError::new(token, empty))
}

fn coerce_all(token: &str, parts: &[&str], empty: FilterErrorKind) -> FilterResult<Vec<Scalar>> {
    parts
        .iter()
        .map(|part| coerce_part(token, part, empty))
        .collect()
}
