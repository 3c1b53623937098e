//! Restquery - Normalize REST query parameters into a typed query descriptor.
//!
//! Restquery reads the query string of a list endpoint and tells the data
//! layer what the client asked for:
//!
//! - Field projections: `fields=name,age`
//! - Filters: `filters=name~Jean;post<10;points[20-30]`
//! - Pagination: `page=2&size=10` or `pagination[page]=2&pagination[size]=10`
//! - Sorting: `sorting=name,-created` or `sorting[name]=asc`
//! - Relation embedding: `embed=role,permissions`
//!
//! It does not know your schema and it runs no queries.
//!
//! # Quick Start
//!
//! ```rust
//! use standout_restquery::{normalize, Operator, RawParams, Scalar};
//!
//! let params = RawParams::from_query_string(
//!     "fields=name,age&filters=name~Jean;post<10;points[20-30]&page=2&sorting=name,-age",
//! );
//! let query = normalize(&params).unwrap();
//!
//! let filters = query.filters().unwrap();
//! assert_eq!(filters.len(), 3);
//! assert_eq!(filters[1].operator(), Operator::Lt);
//! assert_eq!(filters[1].value().as_scalar(), Some(&Scalar::from(10)));
//!
//! let page = query.pagination().unwrap();
//! assert_eq!((page.page, page.size), (2, 30));
//! ```
//!
//! # Filter Grammar
//!
//! | Token | Operator |
//! |-------|----------|
//! | `key==v`, `key!=v` | `Eq`, `Neq` |
//! | `key~v`, `key!~v` | `Like`, `NotLike` |
//! | `key<v`, `key<=v`, `key>v`, `key>=v` | `Lt`, `Lte`, `Gt`, `Gte` |
//! | `key[a,b,c]`, `key]a,b,c[` | `In`, `NotIn` |
//! | `key[a-b]`, `key]a-b[` | `Between`, `NotBetween` |
//!
//! Values that look numeric (digits, `,`, `-`, `.`) become numbers; the
//! rest stay strings. Malformed tokens either fail the request or are
//! dropped, depending on [`FilterPolicy`].

mod clause;
mod config;
mod error;
mod fields;
mod filter;
mod op;
mod ordering;
mod pagination;
mod params;
mod query;
mod value;

// Re-export public API
pub use clause::{FilterClause, FilterValue};
pub use config::{FilterPolicy, NormalizerConfig};
pub use error::{FilterError, FilterErrorKind, QueryError, Result};
pub use fields::parse_list;
pub use filter::{parse_filter, parse_filters};
pub use op::Operator;
pub use ordering::{parse_sort, Direction, SortClause, SortInput};
pub use pagination::{normalize_pagination, PageInput, Pagination, PaginationRules};
pub use params::{RawParam, RawParams};
pub use query::{normalize, Normalizer, QueryDescriptor};
pub use value::{coerce, Number, Scalar};
