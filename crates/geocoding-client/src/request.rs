//! Request URL construction for the geocoding endpoint.
//!
//! Parameters are merged in three stages (defaults, caller-supplied,
//! computed overrides) with later stages replacing earlier values in place,
//! so a key keeps the position where it was first inserted. Absent values
//! are dropped before serialization.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::country::Country;

/// Default value of the `language` parameter.
pub const DEFAULT_LANGUAGE: &str = "en-GB";

/// RFC 3986 unreserved characters stay literal; everything else is escaped.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Ordered API parameters. A value of `None` marks the key as explicitly absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeocodeParameters {
    entries: Vec<(String, Option<String>)>,
}

impl GeocodeParameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) `name` with a present value.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, Some(value.into()));
        self
    }

    /// Adds (or replaces) `name` with the absent marker.
    #[must_use]
    pub fn without(mut self, name: impl Into<String>) -> Self {
        self.set(name, None);
        self
    }

    /// Sets `name`. An existing key keeps its position and takes the new value.
    pub fn set(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// `None` if the key is missing, `Some(None)` if it is present but absent-valued.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_deref())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes the present entries as an RFC 3986 query string, in order.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_deref().map(|v| (k, v)))
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, QUERY_ENCODE_SET),
                    utf8_percent_encode(v, QUERY_ENCODE_SET)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for GeocodeParameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.set(k, v.map(Into::into));
        }
        params
    }
}

/// How the `region` parameter is treated when building a URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RegionBias {
    /// Leave whatever `region` the caller's parameters carry.
    #[default]
    NotProvided,
    /// Force no region bias, removing any `region` in the parameters.
    Suppress,
    /// Force `region` to this ccTLD-style value.
    Region(String),
    /// Force `region` to the country's top-level domain.
    Country(Country),
}

impl RegionBias {
    /// `None` when the bias should not touch the parameters; otherwise the
    /// value `region` must take (`Some(None)` removes it).
    fn override_value(&self) -> Option<Option<String>> {
        match self {
            Self::NotProvided => None,
            Self::Suppress => Some(None),
            Self::Region(region) => Some(Some(region.clone())),
            Self::Country(country) => Some(Some(country.top_level_domain())),
        }
    }
}

impl From<Option<Country>> for RegionBias {
    fn from(country: Option<Country>) -> Self {
        country.map_or(Self::Suppress, Self::Country)
    }
}

/// Builds geocoding request URLs for one endpoint and credential.
#[derive(Clone)]
pub struct RequestBuilder {
    base_url: String,
    api_key: String,
    default_language: String,
}

impl std::fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("base_url", &self.base_url)
            .field("api_key", &"[redacted]")
            .field("default_language", &self.default_language)
            .finish()
    }
}

impl RequestBuilder {
    #[must_use]
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.to_owned(),
            api_key: api_key.to_owned(),
            default_language: DEFAULT_LANGUAGE.to_owned(),
        }
    }

    /// Replaces the `language` sent when the caller's parameters have none.
    #[must_use]
    pub fn with_default_language(mut self, language: &str) -> Self {
        self.default_language = language.to_owned();
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Merges defaults, `parameters` and overrides, then renders the full URL.
    ///
    /// Precedence, lowest first: `key`; the caller's `parameters`; then
    /// `language` (only when `parameters` has no `language` key at all) and
    /// `region` (only when `region_bias` is not [`RegionBias::NotProvided`]).
    #[must_use]
    pub fn build_url(&self, parameters: &GeocodeParameters, region_bias: &RegionBias) -> String {
        let merged = self.merge(parameters, region_bias);
        format!("{}?{}", self.base_url, merged.to_query_string())
    }

    /// Same URL as [`build_url`](Self::build_url) with the `key` value masked, for logs and errors.
    #[must_use]
    pub fn redact(&self, url: &str) -> String {
        let encoded_key = utf8_percent_encode(&self.api_key, QUERY_ENCODE_SET).to_string();
        if encoded_key.is_empty() {
            return url.to_owned();
        }
        url.replace(&format!("key={encoded_key}"), "key=[redacted]")
    }

    fn merge(&self, parameters: &GeocodeParameters, region_bias: &RegionBias) -> GeocodeParameters {
        let mut merged = GeocodeParameters::new().with("key", self.api_key.as_str());

        for (k, v) in parameters.iter() {
            merged.set(k, v.map(str::to_owned));
        }

        if !parameters.contains("language") {
            merged.set("language", Some(self.default_language.clone()));
        }

        if let Some(region) = region_bias.override_value() {
            merged.set("region", region);
        }

        merged
    }
}

#[cfg(test)]
#[path = "request_test.rs"]
mod tests;
