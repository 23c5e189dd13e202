//! Static navigation taxonomy

use indexmap::IndexMap;
use serde::Deserialize;

use crate::context::NavConfig;
use crate::error::{NavError, Result};
use crate::filter::{Filter, FilterKey};

/// One entry of a navigation taxonomy.
///
/// Built once when the taxonomy is loaded and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavNode {
    /// A node without children
    Leaf {
        /// Display label
        label: String,
        /// The node's own filter fragment
        filter: Filter,
    },

    /// A node with at least one child
    Branch {
        /// Display label
        label: String,
        /// The node's own filter fragment
        filter: Filter,
        /// Ordered children
        children: Vec<NavNode>,
    },
}

impl NavNode {
    /// Create a leaf node.
    pub fn leaf(label: impl Into<String>, filter: Filter) -> Self {
        NavNode::Leaf {
            label: label.into(),
            filter,
        }
    }

    /// Create a branch node. An empty `children` list yields a leaf.
    pub fn branch(label: impl Into<String>, filter: Filter, children: Vec<NavNode>) -> Self {
        if children.is_empty() {
            return Self::leaf(label, filter);
        }
        NavNode::Branch {
            label: label.into(),
            filter,
            children,
        }
    }

    /// The node's display label.
    pub fn label(&self) -> &str {
        match self {
            NavNode::Leaf { label, .. } | NavNode::Branch { label, .. } => label,
        }
    }

    /// The node's own filter fragment (not merged with ancestors).
    pub fn filter(&self) -> &Filter {
        match self {
            NavNode::Leaf { filter, .. } | NavNode::Branch { filter, .. } => filter,
        }
    }

    /// The node's children; empty for a leaf.
    pub fn children(&self) -> &[NavNode] {
        match self {
            NavNode::Leaf { .. } => &[],
            NavNode::Branch { children, .. } => children,
        }
    }

    /// Check if this node has no children.
    pub fn is_leaf(&self) -> bool {
        matches!(self, NavNode::Leaf { .. })
    }

    /// Levels in the subtree rooted here (1 for a leaf).
    pub fn height(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(NavNode::height)
            .max()
            .unwrap_or(0)
    }
}

/// A taxonomy rooted at one base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavTree {
    /// Path every generated link starts with, e.g. `/lectures`
    pub base_path: String,

    /// Path prefix a location must be within for filter matching to apply
    pub section: String,

    /// Top-level nodes
    pub roots: Vec<NavNode>,
}

impl NavTree {
    /// Create a tree whose section prefix equals its base path.
    pub fn new(base_path: impl Into<String>, roots: Vec<NavNode>) -> Self {
        let base_path = base_path.into();
        Self {
            section: base_path.clone(),
            base_path,
            roots,
        }
    }

    /// Override the section prefix.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = section.into();
        self
    }

    /// Load a tree from JSON using default limits.
    ///
    /// ```
    /// use wayfinder::NavTree;
    ///
    /// let tree = NavTree::from_json(r#"{
    ///     "base_path": "/lectures",
    ///     "roots": [
    ///         { "label": "재직자과정", "filter": { "target": "employee" },
    ///           "children": [ { "label": "온라인", "filter": { "format": "online" } } ] }
    ///     ]
    /// }"#).unwrap();
    /// assert_eq!(tree.roots[0].children()[0].label(), "온라인");
    /// ```
    pub fn from_json(src: &str) -> Result<Self> {
        Self::from_json_with(src, &NavConfig::default())
    }

    /// Load a tree from JSON, enforcing `config.max_depth`.
    pub fn from_json_with(src: &str, config: &NavConfig) -> Result<Self> {
        let raw: RawTree = serde_json::from_str(src)?;
        let roots = raw
            .roots
            .into_iter()
            .map(|node| node.into_node(1, config.max_depth))
            .collect::<Result<Vec<_>>>()?;
        let section = raw.section.unwrap_or_else(|| raw.base_path.clone());
        tracing::debug!(
            base_path = %raw.base_path,
            roots = roots.len(),
            "loaded navigation tree"
        );
        Ok(Self {
            base_path: raw.base_path,
            section,
            roots,
        })
    }

    /// Visit every node depth-first, pre-order, with its ancestor chain
    /// (root first).
    pub fn walk<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(&'a NavNode, &[&'a NavNode]),
    {
        let mut ancestors = Vec::new();
        for root in &self.roots {
            walk_node(root, &mut ancestors, &mut visit);
        }
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        let mut count = 0;
        self.walk(|_, _| count += 1);
        count
    }

    /// Check if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

fn walk_node<'a, F>(node: &'a NavNode, ancestors: &mut Vec<&'a NavNode>, visit: &mut F)
where
    F: FnMut(&'a NavNode, &[&'a NavNode]),
{
    visit(node, ancestors.as_slice());
    ancestors.push(node);
    for child in node.children() {
        walk_node(child, ancestors, visit);
    }
    ancestors.pop();
}

/// A top-level header entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderItem {
    /// A dropdown menu driven by a taxonomy
    Menu(NavTree),

    /// A plain link, active when the location is under `path`
    Link {
        /// Display label
        label: String,
        /// Target path
        path: String,
    },
}

impl HeaderItem {
    /// Create a plain link item.
    pub fn link(label: impl Into<String>, path: impl Into<String>) -> Self {
        HeaderItem::Link {
            label: label.into(),
            path: path.into(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// JSON Loading
// ═══════════════════════════════════════════════════════════════════════

#[derive(Deserialize)]
struct RawTree {
    base_path: String,
    #[serde(default)]
    section: Option<String>,
    #[serde(default)]
    roots: Vec<RawNode>,
}

#[derive(Deserialize)]
struct RawNode {
    label: String,
    #[serde(default)]
    filter: IndexMap<String, Option<String>>,
    #[serde(default)]
    children: Vec<RawNode>,
}

impl RawNode {
    fn into_node(self, depth: usize, max_depth: usize) -> Result<NavNode> {
        if depth > max_depth {
            return Err(NavError::DepthExceeded {
                depth,
                max: max_depth,
            });
        }

        let mut filter = Filter::new();
        for (key, value) in self.filter {
            let Some(parsed) = FilterKey::parse(&key) else {
                return Err(NavError::UnknownFilterKey {
                    key,
                    label: self.label,
                });
            };
            // null means "no constraint": leave the key out entirely
            if let Some(value) = value {
                filter.insert(parsed, value);
            }
        }

        let children = self
            .children
            .into_iter()
            .map(|child| child.into_node(depth + 1, max_depth))
            .collect::<Result<Vec<_>>>()?;
        Ok(NavNode::branch(self.label, filter, children))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NavTree {
        NavTree::new(
            "/lectures",
            vec![NavNode::branch(
                "재직자과정",
                Filter::new().with(FilterKey::Target, "employee"),
                vec![
                    NavNode::leaf("온라인", Filter::new().with(FilterKey::Format, "online")),
                    NavNode::leaf("오프라인", Filter::new().with(FilterKey::Format, "offline")),
                ],
            )],
        )
    }

    #[test]
    fn test_branch_without_children_is_leaf() {
        let node = NavNode::branch("x", Filter::new(), vec![]);
        assert!(node.is_leaf());
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_walk_visits_preorder_with_ancestors() {
        let tree = sample();
        let mut seen = Vec::new();
        tree.walk(|node, ancestors| {
            let chain: Vec<_> = ancestors.iter().map(|a| a.label()).collect();
            seen.push((node.label().to_string(), chain.join("/")));
        });
        assert_eq!(
            seen,
            vec![
                ("재직자과정".to_string(), String::new()),
                ("온라인".to_string(), "재직자과정".to_string()),
                ("오프라인".to_string(), "재직자과정".to_string()),
            ]
        );
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.roots[0].height(), 2);
    }

    #[test]
    fn test_from_json_null_value_is_absent() {
        let tree = NavTree::from_json(
            r#"{ "base_path": "/lectures", "section": "/lectures",
                 "roots": [ { "label": "전체", "filter": { "target": null } } ] }"#,
        )
        .unwrap();
        assert!(tree.roots[0].filter().is_empty());
    }

    #[test]
    fn test_from_json_null_child_value_inherits_ancestor() {
        let tree = NavTree::from_json(
            r#"{ "base_path": "/lectures", "roots": [
                { "label": "재직자과정", "filter": { "target": "employee" }, "children": [
                    { "label": "전체", "filter": { "target": null, "format": "online" } }
                ] }
            ] }"#,
        )
        .unwrap();
        let child = &tree.roots[0].children()[0];
        assert!(!child.filter().contains_key(FilterKey::Target));

        let effective = crate::path::effective_filter(child, &[tree.roots[0].filter()]);
        assert_eq!(effective.get(FilterKey::Target), Some("employee"));
        assert_eq!(
            crate::path::build_path(&tree.base_path, child, &[tree.roots[0].filter()]),
            "/lectures?target=employee&format=online"
        );
    }

    #[test]
    fn test_from_json_unknown_key() {
        let err = NavTree::from_json(
            r#"{ "base_path": "/lectures", "roots": [ { "label": "가격", "filter": { "price": "free" } } ] }"#,
        )
        .unwrap_err();
        match err {
            NavError::UnknownFilterKey { key, label } => {
                assert_eq!(key, "price");
                assert_eq!(label, "가격");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_json_depth_limit() {
        let src = r#"{ "base_path": "/x", "roots": [
            { "label": "a", "children": [ { "label": "b", "children": [ { "label": "c" } ] } ] }
        ] }"#;
        let config = NavConfig::with_max_depth(2);
        let err = NavTree::from_json_with(src, &config).unwrap_err();
        assert!(matches!(err, NavError::DepthExceeded { depth: 3, max: 2 }));
        assert!(NavTree::from_json(src).is_ok());
    }
}
