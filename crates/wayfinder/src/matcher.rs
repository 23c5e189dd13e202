//! Active-state matching of query parameters against effective filters

use crate::filter::{Filter, FilterKey};
use crate::query::{CurrentQuery, Location};

/// Decide whether a node with `effective` filter is active for `query`.
///
/// - An empty filter is never active through matching.
/// - Every key of the filter must be present in the query with a matching
///   value (conjunctive).
/// - `q` compares case-insensitively; other keys compare exactly.
/// - An empty filter value never matches.
///
/// This does not check the page section; callers combine it with
/// [`in_section`].
///
/// # Example
///
/// ```
/// use wayfinder::{is_active, CurrentQuery, Filter, FilterKey};
///
/// let filter = Filter::new().with(FilterKey::Q, "bootcamp");
/// assert!(is_active(&CurrentQuery::parse("q=BOOTCAMP"), &filter));
///
/// let filter = Filter::new().with(FilterKey::Target, "employee");
/// assert!(!is_active(&CurrentQuery::parse("target=Employee"), &filter));
/// ```
pub fn is_active(query: &CurrentQuery, effective: &Filter) -> bool {
    if effective.is_empty() {
        return false;
    }
    effective
        .iter()
        .all(|(key, expected)| match query.get_key(key) {
            Some(actual) => value_matches(key, expected, actual),
            None => false,
        })
}

fn value_matches(key: FilterKey, expected: &str, actual: &str) -> bool {
    if expected.is_empty() {
        return false;
    }
    if key.is_free_text() {
        expected.to_lowercase() == actual.to_lowercase()
    } else {
        expected == actual
    }
}

/// Check whether `pathname` lies within the section rooted at `prefix`.
///
/// Segment-aware: `/lectures/12` is within `/lectures`, `/lecturesx` is not.
pub fn in_section(pathname: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    match pathname.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Activeness for a plain link: path-prefix comparison only.
pub fn is_link_active(location: &Location, path: &str) -> bool {
    let target = Location::parse(path);
    if target.pathname == "/" {
        return location.pathname == "/";
    }
    in_section(&location.pathname, &target.pathname)
}
