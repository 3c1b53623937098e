//! Filter clause types.
//!
//! A [`FilterClause`] is one predicate extracted from a filter token: a key,
//! an operator, and either one value or an ordered list of values.

use serde::Serialize;

use crate::op::Operator;
use crate::value::Scalar;

/// A single filter predicate.
///
/// Clauses are only produced by [`parse_filter`](crate::parse_filter) and
/// are read-only afterwards.
///
/// # Example
///
/// ```
/// use standout_restquery::{parse_filter, Operator, Scalar};
///
/// let clause = parse_filter("age<=20").unwrap();
/// assert_eq!(clause.key(), "age");
/// assert_eq!(clause.operator(), Operator::Lte);
/// assert_eq!(clause.value().as_scalar(), Some(&Scalar::from(20)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterClause {
    key: String,
    operator: Operator,
    value: FilterValue,
}

impl FilterClause {
    pub(crate) fn new(key: impl Into<String>, operator: Operator, value: FilterValue) -> Self {
        FilterClause {
            key: key.into(),
            operator,
            value,
        }
    }

    /// The field name being filtered.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The filter operator.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// The comparison value(s).
    pub fn value(&self) -> &FilterValue {
        &self.value
    }
}

/// Value side of a clause.
///
/// Comparison operators carry a `Single` value; bracket operators carry a
/// `List` (set members, or the two endpoints of a range).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Single(Scalar),
    List(Vec<Scalar>),
}

impl FilterValue {
    /// Returns the scalar for a `Single` value.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            FilterValue::Single(v) => Some(v),
            FilterValue::List(_) => None,
        }
    }

    /// Returns the elements of a `List` value.
    pub fn as_list(&self) -> Option<&[Scalar]> {
        match self {
            FilterValue::List(v) => Some(v),
            FilterValue::Single(_) => None,
        }
    }
}

impl From<Scalar> for FilterValue {
    fn from(v: Scalar) -> Self {
        FilterValue::Single(v)
    }
}

impl From<Vec<Scalar>> for FilterValue {
    fn from(v: Vec<Scalar>) -> Self {
        FilterValue::List(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_value_accessors() {
        let clause = FilterClause::new("name", Operator::Like, Scalar::from("Jean").into());
        assert_eq!(clause.key(), "name");
        assert_eq!(clause.operator(), Operator::Like);
        assert_eq!(clause.value().as_scalar(), Some(&Scalar::from("Jean")));
        assert_eq!(clause.value().as_list(), None);
    }

    #[test]
    fn list_value_accessors() {
        let value: FilterValue = vec![Scalar::from(20), Scalar::from(30)].into();
        assert_eq!(value.as_list().map(<[Scalar]>::len), Some(2));
        assert_eq!(value.as_scalar(), None);
    }

    #[test]
    fn serializes_to_wire_shape() {
        let clause = FilterClause::new(
            "points",
            Operator::Between,
            vec![Scalar::from(20), Scalar::from(30)].into(),
        );
        assert_eq!(
            serde_json::to_value(&clause).unwrap(),
            json!({ "key": "points", "operator": "between", "value": [20, 30] })
        );
    }
}
