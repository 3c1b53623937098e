//! Typed scalar values and string coercion.
//!
//! Filter values arrive as raw text. [`coerce`] turns a token into a
//! [`Scalar`]: numeric-looking tokens become [`Number`]s, everything else
//! stays a string.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Digits, commas, hyphens and periods only.
static NUMERIC_LIKE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[,.\-0-9]+$").unwrap());

/// A typed filter value.
///
/// Serializes untagged: numbers as JSON numbers, strings as JSON strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Numeric value.
    Number(Number),
    /// Anything that is not numeric, verbatim.
    String(String),
}

impl Scalar {
    /// Returns `true` if this is a `Number` value.
    pub fn is_number(&self) -> bool {
        matches!(self, Scalar::Number(_))
    }

    /// Returns `true` if this is a `String` value.
    pub fn is_string(&self) -> bool {
        matches!(self, Scalar::String(_))
    }

    /// Returns the number if this is a `Number` value.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Scalar::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string slice if this is a `String` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(Number::I64(n))
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Number(Number::I64(n as i64))
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(Number::F64(n))
    }
}

/// Numeric value with precision preserved.
///
/// Integral tokens are kept as integers; only tokens with a fractional part
/// (or outside the integer ranges) become `F64`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    /// Signed integer.
    I64(i64),
    /// Unsigned integer too large for `i64`.
    U64(u64),
    /// Floating point.
    F64(f64),
}

impl Number {
    /// Parses plain numeric text: integer first, then float.
    fn parse(text: &str) -> Option<Number> {
        if let Ok(n) = text.parse::<i64>() {
            return Some(Number::I64(n));
        }
        if let Ok(n) = text.parse::<u64>() {
            return Some(Number::U64(n));
        }
        match text.parse::<f64>() {
            Ok(n) if n.is_finite() => Some(Number::F64(n)),
            _ => None,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

/// Coerces a raw token into a [`Scalar`].
///
/// Returns `None` for an empty token. A token made only of digits, commas,
/// hyphens and periods has its commas stripped and is parsed as a number;
/// if that fails (`"-"`, `"."`, `"1-2"`) the original token is returned as
/// a string. Any other token is returned unchanged as a string.
///
/// ```
/// use standout_restquery::{coerce, Number, Scalar};
///
/// assert_eq!(coerce("1,000"), Some(Scalar::Number(Number::I64(1000))));
/// assert_eq!(coerce("-"), Some(Scalar::String("-".into())));
/// assert_eq!(coerce("Jean"), Some(Scalar::String("Jean".into())));
/// assert_eq!(coerce(""), None);
/// ```
pub fn coerce(token: &str) -> Option<Scalar> {
    if token.is_empty() {
        return None;
    }

    if NUMERIC_LIKE.is_match(token) {
        let stripped: String = token.chars().filter(|c| *c != ',').collect();
        if let Some(n) = Number::parse(&stripped) {
            return Some(Scalar::Number(n));
        }
    }

    Some(Scalar::String(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_stay_integral() {
        assert_eq!(coerce("20"), Some(Scalar::Number(Number::I64(20))));
        assert_eq!(coerce("-3"), Some(Scalar::Number(Number::I64(-3))));
        assert_eq!(
            coerce("18446744073709551615"),
            Some(Scalar::Number(Number::U64(u64::MAX)))
        );
    }

    #[test]
    fn fractions_become_floats() {
        assert_eq!(coerce("1.5"), Some(Scalar::Number(Number::F64(1.5))));
        assert_eq!(coerce(".5"), Some(Scalar::Number(Number::F64(0.5))));
    }

    #[test]
    fn every_comma_is_stripped() {
        assert_eq!(
            coerce("1,000,000"),
            Some(Scalar::Number(Number::I64(1_000_000)))
        );
        assert_eq!(coerce("2,3"), Some(Scalar::Number(Number::I64(23))));
    }

    #[test]
    fn numeric_looking_garbage_falls_back_to_string() {
        for token in ["-", ".", ",", "1-2", "1.2.3", "--5"] {
            assert_eq!(coerce(token), Some(Scalar::String(token.to_string())));
        }
    }

    #[test]
    fn text_is_kept_verbatim() {
        assert_eq!(coerce("Jean"), Some(Scalar::from("Jean")));
        assert_eq!(coerce("20a"), Some(Scalar::from("20a")));
        assert_eq!(coerce("1e5"), Some(Scalar::from("1e5")));
    }

    #[test]
    fn empty_token_has_no_value() {
        assert_eq!(coerce(""), None);
    }

    #[test]
    fn number_displays_as_written() {
        assert_eq!(Number::I64(-3).to_string(), "-3");
        assert_eq!(Number::U64(u64::MAX).to_string(), "18446744073709551615");
        assert_eq!(Number::F64(1.5).to_string(), "1.5");
    }

    #[test]
    fn scalar_serializes_untagged() {
        assert_eq!(serde_json::to_string(&Scalar::from(20)).unwrap(), "20");
        assert_eq!(serde_json::to_string(&Scalar::from("x")).unwrap(), "\"x\"");
    }
}
