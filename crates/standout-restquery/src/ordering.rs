//! Sort parameter parsing.
//!
//! Provides [`Direction`] and [`SortClause`], and [`parse_sort`] which reads
//! either a comma-separated sort string (`name,-created`) or an ordered
//! field → direction mapping (`sorting[name]=asc`).

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Sort direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
    /// A direction given in a mapping that is neither `asc` nor `desc`,
    /// kept verbatim for the caller to judge.
    Other(String),
}

impl Direction {
    /// Reads a mapping direction. Only the exact strings `asc` and `desc`
    /// are recognized; anything else, `DESC` included, is kept verbatim.
    pub fn from_mapping(raw: &str) -> Direction {
        match raw {
            "asc" => Direction::Asc,
            "desc" => Direction::Desc,
            other => Direction::Other(other.to_string()),
        }
    }

    /// Returns `true` if this is ascending order.
    pub fn is_asc(&self) -> bool {
        matches!(self, Direction::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(&self) -> bool {
        matches!(self, Direction::Desc)
    }

    /// Returns the wire form of this direction.
    pub fn as_str(&self) -> &str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
            Direction::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single sort clause: one field and its direction.
///
/// Serializes as a one-entry object, `{"name": "asc"}`. Clauses are kept
/// in a list rather than merged into one map so that order and repeated
/// fields survive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortClause {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    pub direction: Direction,
}

impl SortClause {
    /// Creates a new ascending clause for the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        SortClause::new(field, Direction::Asc)
    }

    /// Creates a new descending clause for the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        SortClause::new(field, Direction::Desc)
    }

    /// Creates a new clause with the given direction.
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        SortClause {
            field: field.into(),
            direction,
        }
    }
}

impl Serialize for SortClause {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, self.direction.as_str())?;
        map.end()
    }
}

/// Accepted shapes of a sort parameter.
#[derive(Debug, Clone, Copy)]
pub enum SortInput<'a> {
    /// `name,-created`
    Raw(&'a str),
    /// `[("name", "asc"), ("created", "desc")]`, in enumeration order.
    Mapping(&'a [(String, String)]),
}

/// Parses a sort parameter into ordered clauses.
///
/// For a string, each comma-separated token is a field name; a leading `-`
/// marks it descending and is stripped. Hyphens elsewhere are part of the
/// name. For a mapping, one clause per entry is emitted in order.
///
/// Returns `None` for an empty string or an empty mapping.
///
/// ```
/// use standout_restquery::{parse_sort, SortClause, SortInput};
///
/// let clauses = parse_sort(SortInput::Raw("name,-created")).unwrap();
/// assert_eq!(clauses, vec![SortClause::asc("name"), SortClause::desc("created")]);
/// ```
pub fn parse_sort(input: SortInput<'_>) -> Option<Vec<SortClause>> {
    match input {
        SortInput::Raw("") => None,
        SortInput::Raw(raw) => Some(raw.split(',').map(parse_sort_token).collect()),
        SortInput::Mapping([]) => None,
        SortInput::Mapping(entries) => Some(
            entries
                .iter()
                .map(|(field, dir)| SortClause::new(field.as_str(), Direction::from_mapping(dir)))
                .collect(),
        ),
    }
}

fn parse_sort_token(token: &str) -> SortClause {
    match token.strip_prefix('-') {
        Some(field) => SortClause::desc(field),
        None => SortClause::asc(token),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mapping(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn string_form() {
        let clauses = parse_sort(SortInput::Raw("name,-dateCreation")).unwrap();
        assert_eq!(
            clauses,
            vec![SortClause::asc("name"), SortClause::desc("dateCreation")]
        );
    }

    #[test]
    fn only_leading_hyphen_means_desc() {
        let clauses = parse_sort(SortInput::Raw("created-at,-updated-at")).unwrap();
        assert_eq!(
            clauses,
            vec![SortClause::asc("created-at"), SortClause::desc("updated-at")]
        );
    }

    #[test]
    fn duplicates_not_merged() {
        let clauses = parse_sort(SortInput::Raw("a,-a,a")).unwrap();
        assert_eq!(clauses.len(), 3);
        assert!(clauses[1].direction.is_desc());
    }

    #[test]
    fn mapping_form_keeps_order() {
        let entries = mapping(&[("name", "asc"), ("dateCreation", "desc")]);
        let clauses = parse_sort(SortInput::Mapping(&entries)).unwrap();
        assert_eq!(
            clauses,
            vec![SortClause::asc("name"), SortClause::desc("dateCreation")]
        );
    }

    #[test]
    fn mapping_direction_kept_verbatim() {
        let entries = mapping(&[("rank", "random")]);
        let clauses = parse_sort(SortInput::Mapping(&entries)).unwrap();
        assert_eq!(clauses[0].direction, Direction::Other("random".into()));
        assert_eq!(clauses[0].direction.to_string(), "random");
    }

    #[test]
    fn mapping_direction_case_is_preserved() {
        let entries = mapping(&[("name", "DESC"), ("age", "Asc")]);
        let clauses = parse_sort(SortInput::Mapping(&entries)).unwrap();
        assert_eq!(clauses[0].direction, Direction::Other("DESC".into()));
        assert_eq!(clauses[1].direction, Direction::Other("Asc".into()));
        assert!(!clauses[0].direction.is_desc());
        assert_eq!(
            serde_json::to_value(&clauses).unwrap(),
            json!([{ "name": "DESC" }, { "age": "Asc" }])
        );
    }

    #[test]
    fn empty_input_is_absent() {
        assert_eq!(parse_sort(SortInput::Raw("")), None);
        assert_eq!(parse_sort(SortInput::Mapping(&[])), None);
    }

    #[test]
    fn serializes_as_single_entry_object() {
        let clauses = vec![SortClause::asc("name"), SortClause::desc("age")];
        assert_eq!(
            serde_json::to_value(&clauses).unwrap(),
            json!([{ "name": "asc" }, { "age": "desc" }])
        );
    }
}
