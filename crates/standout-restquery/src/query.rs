//! Query descriptor and normalizer.
//!
//! The [`Normalizer`] reads the recognized keys of a [`RawParams`] and
//! assembles a [`QueryDescriptor`]:
//!
//! | Key | Section | Parser |
//! |-----|---------|--------|
//! | `fields` | `fields` | [`parse_list`] |
//! | `filters` | `filters` | [`parse_filters`] |
//! | `pagination[page]`, `pagination[size]` or `page`, `size` | `pagination` | [`normalize_pagination`] |
//! | `sorting` (or `sort`) | `sorting` | [`parse_sort`] |
//! | `embed` | `embed` | [`parse_list`] |
//!
//! Unrecognized keys are ignored.

use std::borrow::Cow;

use serde::Serialize;

use crate::clause::FilterClause;
use crate::config::{FilterPolicy, NormalizerConfig};
use crate::error::Result;
use crate::fields::parse_list;
use crate::filter::parse_filters;
use crate::ordering::{parse_sort, SortClause, SortInput};
use crate::pagination::{normalize_pagination, PageInput, Pagination};
use crate::params::{RawParam, RawParams};

/// Everything a client asked for in one request's query string.
///
/// A descriptor is built fresh by every [`Normalizer::normalize`] call and
/// has no mutating methods. Sections that were not requested are `None`,
/// never present-but-empty, and are left out when serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filters: Option<Vec<FilterClause>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sorting: Option<Vec<SortClause>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    embed: Option<Vec<String>>,
}

impl QueryDescriptor {
    /// Field projection, in request order.
    pub fn fields(&self) -> Option<&[String]> {
        self.fields.as_deref()
    }

    /// Filter clauses, in request order.
    pub fn filters(&self) -> Option<&[FilterClause]> {
        self.filters.as_deref()
    }

    /// Page and size, with defaults filled in for whichever was missing.
    pub fn pagination(&self) -> Option<Pagination> {
        self.pagination
    }

    /// Sort clauses, in request order.
    pub fn sorting(&self) -> Option<&[SortClause]> {
        self.sorting.as_deref()
    }

    /// Relations to embed, in request order.
    pub fn embed(&self) -> Option<&[String]> {
        self.embed.as_deref()
    }

    /// Returns `true` if no section was requested.
    pub fn is_empty(&self) -> bool {
        self.fields.is_none()
            && self.filters.is_none()
            && self.pagination.is_none()
            && self.sorting.is_none()
            && self.embed.is_none()
    }

    /// Serializes the descriptor to its JSON wire form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Turns raw query parameters into a [`QueryDescriptor`].
///
/// A normalizer only holds its configuration, so one instance can serve
/// any number of requests concurrently.
///
/// # Example
///
/// ```
/// use standout_restquery::{Normalizer, Operator, RawParams};
///
/// let params = RawParams::from_query_string(
///     "fields=name,age&filters=name~Jean;age>=18&page=2&sorting=-age",
/// );
/// let query = Normalizer::default().normalize(&params).unwrap();
///
/// assert_eq!(query.fields().unwrap(), ["name", "age"]);
/// assert_eq!(query.filters().unwrap()[1].operator(), Operator::Gte);
/// assert_eq!(query.pagination().unwrap().size, 30);
/// assert!(query.sorting().unwrap()[0].direction.is_desc());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    /// Creates a normalizer with the given configuration.
    pub fn new(config: NormalizerConfig) -> Self {
        Normalizer { config }
    }

    /// Returns the configuration this normalizer was built with.
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalizes one request's parameters.
    ///
    /// Fails only when a filter token is malformed under
    /// [`FilterPolicy::Reject`], or a page/size value is invalid with
    /// pagination validation on.
    pub fn normalize(&self, params: &RawParams) -> Result<QueryDescriptor> {
        let trim = self.config.trim_lists;

        let descriptor = QueryDescriptor {
            fields: text(params, "fields").and_then(|raw| parse_list(&raw, trim)),
            filters: self.filters(params)?,
            pagination: self.pagination(params)?,
            sorting: sorting(params),
            embed: text(params, "embed").and_then(|raw| parse_list(&raw, trim)),
        };

        tracing::debug!(
            fields = descriptor.fields.is_some(),
            filters = descriptor.filters.as_ref().map_or(0, Vec::len),
            pagination = ?descriptor.pagination,
            sorting = descriptor.sorting.as_ref().map_or(0, Vec::len),
            embed = descriptor.embed.is_some(),
            "normalized query"
        );
        Ok(descriptor)
    }

    fn filters(&self, params: &RawParams) -> Result<Option<Vec<FilterClause>>> {
        let Some(raw) = text(params, "filters") else {
            return Ok(None);
        };

        let mut clauses = Vec::new();
        for result in parse_filters(&raw) {
            match (result, self.config.filter_policy) {
                (Ok(clause), _) => clauses.push(clause),
                (Err(err), FilterPolicy::Reject) => return Err(err.into()),
                (Err(err), FilterPolicy::Omit) => {
                    tracing::warn!(token = %err.token, reason = %err.kind, "dropping filter");
                }
            }
        }

        Ok(if clauses.is_empty() { None } else { Some(clauses) })
    }

    fn pagination(&self, params: &RawParams) -> Result<Option<Pagination>> {
        let nested = params.get("pagination");
        let page = page_input(nested, params, "page");
        let size = page_input(nested, params, "size");
        normalize_pagination(page, size, &self.config.pagination_rules())
    }
}

/// Normalizes parameters with the default configuration.
pub fn normalize(params: &RawParams) -> Result<QueryDescriptor> {
    Normalizer::default().normalize(params)
}

/// Non-empty scalar text for `key`.
fn text<'a>(params: &'a RawParams, key: &str) -> Option<Cow<'a, str>> {
    params
        .get(key)
        .and_then(RawParam::to_text)
        .filter(|raw| !raw.is_empty())
}

/// `pagination[key]` if set and non-empty, else the flat `key`.
fn page_input<'a>(
    nested: Option<&'a RawParam>,
    params: &'a RawParams,
    key: &str,
) -> Option<PageInput<'a>> {
    if let Some(value) = nested.and_then(|p| p.map_get(key)).filter(|v| !v.is_empty()) {
        return Some(PageInput::Text(value));
    }
    match params.get(key)? {
        RawParam::Int(n) => Some(PageInput::Int(*n)),
        RawParam::Text(s) if !s.is_empty() => Some(PageInput::Text(s)),
        _ => None,
    }
}

/// `sorting` wins over its `sort` alias.
fn sorting(params: &RawParams) -> Option<Vec<SortClause>> {
    let param = params.get("sorting").or_else(|| params.get("sort"))?;
    match param {
        RawParam::Map(entries) => parse_sort(SortInput::Mapping(entries)),
        other => {
            let raw = other.to_text()?;
            parse_sort(SortInput::Raw(&raw))
        }
    }
}
