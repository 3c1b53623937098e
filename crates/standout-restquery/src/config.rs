//! Normalizer configuration.
//!
//! [`NormalizerConfig`] can be built in code with its setters or loaded from
//! YAML. Every field has a default, so a config file only needs the keys
//! it changes:
//!
//! ```yaml
//! default_size: 50
//! filter_policy: omit
//! trim_lists: true
//! ```

use serde::Deserialize;

use crate::error::Result;
use crate::pagination::PaginationRules;

/// What to do with a filter token that does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterPolicy {
    /// Fail normalization with the first bad token.
    #[default]
    Reject,
    /// Drop bad tokens (logged at warn level) and keep the rest.
    Omit,
}

/// Settings for [`Normalizer`](crate::Normalizer).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Page used when only a size is given.
    pub default_page: i64,
    /// Size used when only a page is given.
    pub default_size: i64,
    /// Handling of filter tokens that do not parse.
    pub filter_policy: FilterPolicy,
    /// Trim whitespace around `fields` and `embed` names.
    pub trim_lists: bool,
    /// Reject non-numeric or non-positive page/size values.
    pub validate_pagination: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        NormalizerConfig {
            default_page: 1,
            default_size: 30,
            filter_policy: FilterPolicy::default(),
            trim_lists: false,
            validate_pagination: false,
        }
    }
}

impl NormalizerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        NormalizerConfig::default()
    }

    /// Loads a configuration from YAML.
    pub fn from_yaml(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Sets the page used when only a size is given.
    pub fn default_page(mut self, page: i64) -> Self {
        self.default_page = page;
        self
    }

    /// Sets the size used when only a page is given.
    pub fn default_size(mut self, size: i64) -> Self {
        self.default_size = size;
        self
    }

    /// Sets how unparseable filter tokens are handled.
    pub fn filter_policy(mut self, policy: FilterPolicy) -> Self {
        self.filter_policy = policy;
        self
    }

    /// Enables trimming of `fields` and `embed` names.
    pub fn trim_lists(mut self, trim: bool) -> Self {
        self.trim_lists = trim;
        self
    }

    /// Enables rejection of invalid page/size values.
    pub fn validate_pagination(mut self, validate: bool) -> Self {
        self.validate_pagination = validate;
        self
    }

    pub(crate) fn pagination_rules(&self) -> PaginationRules {
        PaginationRules {
            default_page: self.default_page,
            default_size: self.default_size,
            validate: self.validate_pagination,
        }
    }
}
