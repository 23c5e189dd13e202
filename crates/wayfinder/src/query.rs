//! Query-string codec and the parsed view of the current location

use std::borrow::Cow;

use indexmap::IndexMap;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::filter::{Filter, FilterKey};

/// Characters escaped in a query component: everything except
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single query component. Spaces become `%20`.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Decode a query component. `+` is a space; invalid UTF-8 is replaced.
pub fn decode_component(value: &str) -> String {
    let spaced: Cow<'_, str> = if value.contains('+') {
        Cow::Owned(value.replace('+', " "))
    } else {
        Cow::Borrowed(value)
    };
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Serialize the non-empty entries of `filter` as `key=value&...` in key
/// order.
pub fn serialize(filter: &Filter) -> String {
    filter
        .serializable()
        .map(|(key, value)| format!("{}={}", key, encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Query parameters of the current URL.
///
/// Keeps every key it sees, recognized or not, in first-seen order. On
/// duplicate keys the first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentQuery {
    params: IndexMap<String, String>,
}

impl CurrentQuery {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string, a `?query`, or a full path/URL.
    ///
    /// Never fails: segments without `=` are read as keys with an empty
    /// value and malformed escapes decode lossily.
    pub fn parse(input: &str) -> Self {
        let without_fragment = input.split('#').next().unwrap_or("");
        let query = match without_fragment.split_once('?') {
            Some((_, q)) => q,
            None if without_fragment.starts_with('/') || without_fragment.contains("://") => "",
            None => without_fragment,
        };
        Self::from_query_str(query)
    }

    /// Parse a bare query string: split on `&` and `=` only.
    ///
    /// A raw `?` or `://` inside a value is kept as part of that value.
    pub(crate) fn from_query_str(query: &str) -> Self {
        let mut params = IndexMap::new();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_component(raw_key);
            if key.is_empty() {
                tracing::warn!(pair, "ignoring query pair with empty key");
                continue;
            }
            params
                .entry(key)
                .or_insert_with(|| decode_component(raw_value));
        }
        Self { params }
    }

    /// Builder-style insertion (first value for a key wins).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.entry(key.into()).or_insert(value.into());
        self
    }

    /// Value for a raw key name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Value for a recognized key.
    pub fn get_key(&self, key: FilterKey) -> Option<&str> {
        self.get(key.as_str())
    }

    /// Iterate over all parameters in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The recognized parameters as a filter, values kept verbatim.
    pub fn recognized(&self) -> Filter {
        self.iter()
            .filter_map(|(k, v)| FilterKey::parse(k).map(|key| (key, v)))
            .collect()
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// The current route: pathname plus parsed query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// Path component, always starting with `/`
    pub pathname: String,

    /// Parsed query parameters
    pub query: CurrentQuery,
}

impl Location {
    /// Parse an href such as `/lectures?target=employee#top`.
    pub fn parse(href: &str) -> Self {
        let without_fragment = href.split('#').next().unwrap_or("");
        let (path, query) = without_fragment
            .split_once('?')
            .unwrap_or((without_fragment, ""));
        let path = match path.find("://") {
            Some(idx) => {
                let rest = &path[idx + 3..];
                rest.find('/').map_or("", |slash| &rest[slash..])
            }
            None => path,
        };
        let pathname = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        Self {
            pathname,
            query: CurrentQuery::from_query_str(query),
        }
    }
}
