//! Link construction from a node and its ancestors

use crate::filter::Filter;
use crate::query;
use crate::tree::NavNode;

/// Merge ancestor filters (root first) and then the node's own filter.
///
/// A descendant's value always wins over an ancestor's value for the same
/// key.
pub fn effective_filter(node: &NavNode, ancestors: &[&Filter]) -> Filter {
    let mut merged = Filter::new();
    for filter in ancestors {
        merged.extend_from(filter);
    }
    merged.extend_from(node.filter());
    merged
}

/// The filters of an ancestor chain, in the same order.
pub fn ancestor_filters<'a>(ancestors: &[&'a NavNode]) -> Vec<&'a Filter> {
    ancestors.iter().map(|node| node.filter()).collect()
}

/// Build the href for `node`: `base_path` plus the serialized effective
/// filter, or the bare base path when nothing serializes.
///
/// # Example
///
/// ```
/// use wayfinder::{build_path, Filter, FilterKey, NavNode};
///
/// let level1 = Filter::new().with(FilterKey::Target, "employee");
/// let node = NavNode::leaf("온라인", Filter::new().with(FilterKey::Format, "online"));
///
/// assert_eq!(
///     build_path("/lectures", &node, &[&level1]),
///     "/lectures?target=employee&format=online"
/// );
/// ```
pub fn build_path(base_path: &str, node: &NavNode, ancestors: &[&Filter]) -> String {
    path_for_filter(base_path, &effective_filter(node, ancestors))
}

/// Append an already-merged filter to `base_path`.
pub fn path_for_filter(base_path: &str, filter: &Filter) -> String {
    let query = query::serialize(filter);
    if query.is_empty() {
        base_path.to_string()
    } else {
        format!("{}?{}", base_path, query)
    }
}
