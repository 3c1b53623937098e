//! Comma-separated name lists, used for field projections and embeds.

/// Splits a comma-separated list into names, preserving order.
///
/// Returns `None` for an empty input so the section can be left out of the
/// descriptor. Names are not trimmed, deduplicated or filtered unless
/// `trim` is set, in which case surrounding whitespace is removed from each.
///
/// ```
/// use standout_restquery::parse_list;
///
/// assert_eq!(
///     parse_list("name, age", false),
///     Some(vec!["name".to_string(), " age".to_string()])
/// );
/// assert_eq!(parse_list("", false), None);
/// ```
pub fn parse_list(raw: &str, trim: bool) -> Option<Vec<String>> {
    if raw.is_empty() {
        return None;
    }

    let names = raw
        .split(',')
        .map(|name| if trim { name.trim() } else { name })
        .map(str::to_string)
        .collect();
    Some(names)
}
