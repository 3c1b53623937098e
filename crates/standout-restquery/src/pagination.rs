//! Page/size normalization.

use serde::Serialize;

use crate::error::{QueryError, Result};

/// Requested page window.
///
/// Both numbers are conventionally ≥ 1, but that is only enforced when
/// [`PaginationRules::validate`] is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub size: i64,
}

impl Pagination {
    /// Zero-based offset of the first item on this page.
    ///
    /// Normalization never calls this. It is a convenience for the data
    /// layer, which usually wants `LIMIT size OFFSET offset()` rather than a
    /// page number. Page 1 (or anything below it) starts at 0, and the
    /// arithmetic saturates instead of overflowing.
    ///
    /// ```
    /// use standout_restquery::Pagination;
    ///
    /// assert_eq!(Pagination { page: 3, size: 20 }.offset(), 40);
    /// ```
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.size)
    }
}

/// One page or size input, before parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageInput<'a> {
    Text(&'a str),
    Int(i64),
}

/// Defaults and validation applied by [`normalize_pagination`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationRules {
    pub default_page: i64,
    pub default_size: i64,
    pub validate: bool,
}

impl Default for PaginationRules {
    fn default() -> Self {
        PaginationRules {
            default_page: 1,
            default_size: 30,
            validate: false,
        }
    }
}

/// Merges page and size inputs into a [`Pagination`].
///
/// - neither present: `None`
/// - only page: size takes the default (30)
/// - only size: page takes the default (1)
///
/// Text is read as a base-10 integer prefix, so `"10abc"` is 10. Without
/// validation a value with no leading digits falls back to its default and
/// non-positive numbers pass through unchanged; with validation both are
/// errors.
///
/// ```
/// use standout_restquery::{normalize_pagination, PageInput, Pagination, PaginationRules};
///
/// let rules = PaginationRules::default();
/// let p = normalize_pagination(Some(PageInput::Text("2")), None, &rules).unwrap();
/// assert_eq!(p, Some(Pagination { page: 2, size: 30 }));
/// ```
pub fn normalize_pagination(
    page: Option<PageInput<'_>>,
    size: Option<PageInput<'_>>,
    rules: &PaginationRules,
) -> Result<Option<Pagination>> {
    if page.is_none() && size.is_none() {
        return Ok(None);
    }

    let page = resolve("page", page, rules.default_page, rules.validate)?;
    let size = resolve("size", size, rules.default_size, rules.validate)?;
    Ok(Some(Pagination { page, size }))
}

fn resolve(
    field: &'static str,
    input: Option<PageInput<'_>>,
    default: i64,
    validate: bool,
) -> Result<i64> {
    let value = match input {
        None => return Ok(default),
        Some(PageInput::Int(n)) => Some(n),
        Some(PageInput::Text(text)) => parse_int_prefix(text),
    };

    match value {
        Some(n) if validate && n < 1 => Err(QueryError::Pagination {
            field,
            value: n.to_string(),
            reason: "must be at least 1",
        }),
        Some(n) => Ok(n),
        None if validate => Err(QueryError::Pagination {
            field,
            value: input_text(input),
            reason: "not an integer",
        }),
        None => {
            tracing::warn!(field, value = %input_text(input), default, "unparseable pagination value, using default");
            Ok(default)
        }
    }
}

fn input_text(input: Option<PageInput<'_>>) -> String {
    match input {
        Some(PageInput::Text(text)) => text.to_string(),
        Some(PageInput::Int(n)) => n.to_string(),
        None => String::new(),
    }
}

/// Reads a leading base-10 integer: optional whitespace, optional sign,
/// then digits. Anything after the digits is ignored.
fn parse_int_prefix(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> PaginationRules {
        PaginationRules::default()
    }

    fn strict() -> PaginationRules {
        PaginationRules {
            validate: true,
            ..PaginationRules::default()
        }
    }

    fn text(s: &str) -> Option<PageInput<'_>> {
        Some(PageInput::Text(s))
    }

    #[test]
    fn neither_present() {
        assert_eq!(normalize_pagination(None, None, &rules()).unwrap(), None);
    }

    #[test]
    fn page_only_defaults_size() {
        let p = normalize_pagination(text("2"), None, &rules()).unwrap();
        assert_eq!(p, Some(Pagination { page: 2, size: 30 }));
    }

    #[test]
    fn size_only_defaults_page() {
        let p = normalize_pagination(None, text("10"), &rules()).unwrap();
        assert_eq!(p, Some(Pagination { page: 1, size: 10 }));
    }

    #[test]
    fn both_present() {
        let p = normalize_pagination(Some(PageInput::Int(3)), text("5"), &rules()).unwrap();
        assert_eq!(p, Some(Pagination { page: 3, size: 5 }));
        assert_eq!(p.unwrap().offset(), 10);
    }

    #[test]
    fn offset_for_data_layer() {
        assert_eq!(Pagination { page: 1, size: 30 }.offset(), 0);
        assert_eq!(Pagination { page: 0, size: 30 }.offset(), 0);
        assert_eq!(Pagination { page: 4, size: 25 }.offset(), 75);
        assert_eq!(Pagination { page: i64::MAX, size: 2 }.offset(), i64::MAX);
    }

    #[test]
    fn custom_defaults() {
        let rules = PaginationRules {
            default_page: 0,
            default_size: 50,
            validate: false,
        };
        let p = normalize_pagination(text("4"), None, &rules).unwrap();
        assert_eq!(p, Some(Pagination { page: 4, size: 50 }));
    }

    #[test]
    fn integer_prefix() {
        assert_eq!(parse_int_prefix("10abc"), Some(10));
        assert_eq!(parse_int_prefix("  -7"), Some(-7));
        assert_eq!(parse_int_prefix("+3"), Some(3));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("99999999999999999999"), None);
    }

    #[test]
    fn unchecked_values_pass_through() {
        let p = normalize_pagination(text("0"), text("-5"), &rules()).unwrap();
        assert_eq!(p, Some(Pagination { page: 0, size: -5 }));
    }

    #[test]
    fn garbage_falls_back_without_validation() {
        let p = normalize_pagination(text("abc"), text("10"), &rules()).unwrap();
        assert_eq!(p, Some(Pagination { page: 1, size: 10 }));
    }

    #[test]
    fn validation_rejects_garbage_and_non_positive() {
        let err = normalize_pagination(text("abc"), None, &strict()).unwrap_err();
        assert!(matches!(err, QueryError::Pagination { field: "page", .. }));

        let err = normalize_pagination(None, text("0"), &strict()).unwrap_err();
        assert_eq!(err.to_string(), "invalid pagination size '0': must be at least 1");

        assert!(normalize_pagination(text("2"), text("10"), &strict()).is_ok());
    }
}
