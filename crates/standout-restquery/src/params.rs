//! Raw query parameters, before normalization.
//!
//! [`RawParams`] is the boundary between a web framework and the
//! normalizer. Each value is resolved once into a [`RawParam`], so the
//! parsers never have to inspect whether they were handed a string or a
//! nested mapping.
//!
//! Three ways in:
//!
//! - build it by hand with [`RawParams::with`] / [`RawParams::with_map`]
//! - parse a URL query string with [`RawParams::from_query_string`], which
//!   folds `key[sub]=value` pairs into mappings
//! - deserialize an already-parsed object (e.g. with `serde_json`); key
//!   order is preserved

use std::borrow::Cow;
use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

/// A single raw parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawParam {
    /// `fields=a,b`
    Text(String),
    /// An integer supplied by a framework that already typed it.
    Int(i64),
    /// `sorting[name]=asc&sorting[age]=desc`, in source order.
    Map(Vec<(String, String)>),
}

impl RawParam {
    /// Returns the scalar text of this value; `None` for a mapping.
    pub fn to_text(&self) -> Option<Cow<'_, str>> {
        match self {
            RawParam::Text(s) => Some(Cow::Borrowed(s)),
            RawParam::Int(n) => Some(Cow::Owned(n.to_string())),
            RawParam::Map(_) => None,
        }
    }

    /// Returns the entries if this is a mapping.
    pub fn as_map(&self) -> Option<&[(String, String)]> {
        match self {
            RawParam::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Looks up one entry of a mapping.
    pub fn map_get(&self, key: &str) -> Option<&str> {
        self.as_map()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl From<&str> for RawParam {
    fn from(s: &str) -> Self {
        RawParam::Text(s.to_string())
    }
}

impl From<String> for RawParam {
    fn from(s: String) -> Self {
        RawParam::Text(s)
    }
}

impl From<i64> for RawParam {
    fn from(n: i64) -> Self {
        RawParam::Int(n)
    }
}

impl From<i32> for RawParam {
    fn from(n: i32) -> Self {
        RawParam::Int(n as i64)
    }
}

/// Ordered collection of raw query parameters.
///
/// Setting a key that already exists replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams {
    entries: Vec<(String, RawParam)>,
}

impl RawParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        RawParams::default()
    }

    /// Adds a parameter, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawParam>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds a nested mapping parameter, builder style.
    ///
    /// ```
    /// use standout_restquery::RawParams;
    ///
    /// let params = RawParams::new()
    ///     .with("fields", "name,age")
    ///     .with_map("sorting", [("name", "asc"), ("age", "desc")]);
    /// assert_eq!(params.get("sorting").unwrap().map_get("age"), Some("desc"));
    /// ```
    pub fn with_map<I, K, V>(mut self, key: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.insert(key, RawParam::Map(entries));
        self
    }

    /// Sets a parameter, replacing any earlier value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawParam>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Returns the value for `key`.
    pub fn get(&self, key: &str) -> Option<&RawParam> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Iterates over parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawParam)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parses a URL query string (with or without the leading `?`).
    ///
    /// Values are percent-decoded. `key[sub]=value` pairs are folded into a
    /// [`RawParam::Map`] under `key`, keeping first-seen order; a repeated
    /// key or sub-key replaces the earlier value in place.
    ///
    /// ```
    /// use standout_restquery::{RawParam, RawParams};
    ///
    /// let params = RawParams::from_query_string("?pagination[page]=2&fields=a%2Cb");
    /// assert_eq!(params.get("fields"), Some(&RawParam::Text("a,b".into())));
    /// assert_eq!(params.get("pagination").unwrap().map_get("page"), Some("2"));
    /// ```
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = RawParams::new();

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match split_bracket_key(&key) {
                Some((name, sub)) => params.insert_nested(name, sub, value.into_owned()),
                None => params.insert(key.into_owned(), value.into_owned()),
            }
        }
        params
    }

    fn insert_nested(&mut self, name: &str, sub: &str, value: String) {
        let slot = match self.entries.iter().position(|(k, _)| k == name) {
            Some(index) => &mut self.entries[index].1,
            None => {
                self.entries.push((name.to_string(), RawParam::Map(Vec::new())));
                let last = self.entries.len() - 1;
                &mut self.entries[last].1
            }
        };
        if !matches!(slot, RawParam::Map(_)) {
            *slot = RawParam::Map(Vec::new());
        }
        if let RawParam::Map(entries) = slot {
            match entries.iter_mut().find(|(k, _)| k == sub) {
                Some((_, v)) => *v = value,
                None => entries.push((sub.to_string(), value)),
            }
        }
    }
}

/// Splits `name[sub]` into `("name", "sub")`.
fn split_bracket_key(key: &str) -> Option<(&str, &str)> {
    let inner = key.strip_suffix(']')?;
    let (name, sub) = inner.split_once('[')?;
    if name.is_empty() || sub.is_empty() || sub.contains(['[', ']']) {
        return None;
    }
    Some((name, sub))
}

impl<K, V> FromIterator<(K, V)> for RawParams
where
    K: Into<String>,
    V: Into<RawParam>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = RawParams::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

// ============================================================================
// Deserialization
// ============================================================================

impl<'de> Deserialize<'de> for RawParams {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ParamsVisitor;

        impl<'de> Visitor<'de> for ParamsVisitor {
            type Value = RawParams;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of query parameters")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawParams, A::Error> {
                let mut params = RawParams::new();
                // A null value is an absent parameter.
                while let Some((key, value)) = map.next_entry::<String, Option<RawParam>>()? {
                    if let Some(value) = value {
                        params.insert(key, value);
                    }
                }
                Ok(params)
            }
        }

        deserializer.deserialize_map(ParamsVisitor)
    }
}

impl<'de> Deserialize<'de> for RawParam {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ParamVisitor;

        impl<'de> Visitor<'de> for ParamVisitor {
            type Value = RawParam;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string, a number, or a map of strings")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<RawParam, E> {
                Ok(RawParam::Text(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<RawParam, E> {
                Ok(RawParam::Text(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<RawParam, E> {
                Ok(RawParam::Int(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<RawParam, E> {
                Ok(match i64::try_from(v) {
                    Ok(n) => RawParam::Int(n),
                    Err(_) => RawParam::Text(v.to_string()),
                })
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<RawParam, E> {
                Ok(RawParam::Text(v.to_string()))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<RawParam, E> {
                Ok(RawParam::Text(v.to_string()))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawParam, A::Error> {
                let mut entries: Vec<(String, String)> = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, Option<TextValue>>()? {
                    let Some(TextValue(value)) = value else {
                        continue;
                    };
                    match entries.iter_mut().find(|(k, _)| *k == key) {
                        Some((_, v)) => *v = value,
                        None => entries.push((key, value)),
                    }
                }
                Ok(RawParam::Map(entries))
            }
        }

        deserializer.deserialize_any(ParamVisitor)
    }
}

/// A scalar inside a nested mapping, read as text.
struct TextValue(String);

impl<'de> Deserialize<'de> for TextValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TextVisitor;

        impl Visitor<'_> for TextVisitor {
            type Value = TextValue;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string or number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<TextValue, E> {
                Ok(TextValue(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<TextValue, E> {
                Ok(TextValue(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<TextValue, E> {
                Ok(TextValue(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<TextValue, E> {
                Ok(TextValue(v.to_string()))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<TextValue, E> {
                Ok(TextValue(v.to_string()))
            }
        }

        deserializer.deserialize_any(TextVisitor)
    }
}
