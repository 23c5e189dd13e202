//! Render-pass resolution of a taxonomy against the current location

use crate::context::NavConfig;
use crate::error::Result;
use crate::filter::FilterScope;
use crate::matcher::{in_section, is_active, is_link_active};
use crate::path::path_for_filter;
use crate::query::Location;
use crate::tree::{HeaderItem, NavNode, NavTree};

/// A concrete link produced for one node in one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    /// Display label
    pub label: String,

    /// Navigable href
    pub href: String,

    /// Nesting level, 1 for top-level entries
    pub depth: usize,

    /// Whether the entry renders as active
    pub active: bool,

    /// Resolved children, in taxonomy order
    pub children: Vec<ResolvedLink>,
}

impl ResolvedLink {
    /// Check if this link has children.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Depth-first search for a link by label in this subtree.
    pub fn find(&self, label: &str) -> Option<&ResolvedLink> {
        if self.label == label {
            return Some(self);
        }
        find_link(&self.children, label)
    }
}

/// Depth-first search for a link by label.
pub fn find_link<'a>(links: &'a [ResolvedLink], label: &str) -> Option<&'a ResolvedLink> {
    links.iter().find_map(|link| link.find(label))
}

/// The chain of active links from the top level down, following the first
/// active entry at each level.
pub fn find_active_trail(links: &[ResolvedLink]) -> Vec<&ResolvedLink> {
    let mut trail = Vec::new();
    let mut level = links;
    while let Some(link) = level.iter().find(|l| l.active) {
        trail.push(link);
        level = &link.children;
    }
    trail
}

/// Per-pass inputs shared by every node.
struct Pass<'a> {
    tree: &'a NavTree,
    location: &'a Location,
    trace: bool,
}

/// Types that resolve into a concrete link.
///
/// Mirrors a tree walk: the scope holds the filters of every ancestor
/// while the node is being resolved.
trait Resolve {
    fn resolve(&self, scope: &mut FilterScope, pass: &Pass<'_>) -> Result<ResolvedLink>;
}

impl Resolve for NavNode {
    fn resolve(&self, scope: &mut FilterScope, pass: &Pass<'_>) -> Result<ResolvedLink> {
        let mut frame = scope.enter(self.filter())?;
        let depth = frame.depth();
        let effective = frame.effective();

        let href = path_for_filter(&pass.tree.base_path, &effective);
        let active = if effective.is_empty() {
            is_link_active(pass.location, &pass.tree.base_path)
        } else {
            in_section(&pass.location.pathname, &pass.tree.section)
                && is_active(&pass.location.query, &effective)
        };

        if pass.trace {
            tracing::trace!(label = self.label(), depth, %href, active, "resolved node");
        }

        let children = self
            .children()
            .iter()
            .map(|child| child.resolve(&mut frame, pass))
            .collect::<Result<Vec<_>>>()?;

        Ok(ResolvedLink {
            label: self.label().to_string(),
            href,
            depth,
            active,
            children,
        })
    }
}

/// Resolves taxonomies into links for a location.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: NavConfig,
}

impl Resolver {
    /// Create a resolver with the given configuration.
    pub fn new(config: NavConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Resolve every node of `tree` against `location`.
    pub fn resolve(&self, tree: &NavTree, location: &Location) -> Result<Vec<ResolvedLink>> {
        let mut scope = FilterScope::with_max_depth(self.config.max_depth);
        let pass = Pass {
            tree,
            location,
            trace: self.config.trace,
        };
        let links = tree
            .roots
            .iter()
            .map(|root| root.resolve(&mut scope, &pass))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(
            base_path = %tree.base_path,
            pathname = %location.pathname,
            active = links.iter().any(|l| l.active),
            "resolved navigation tree"
        );
        Ok(links)
    }

    /// Resolve a full header. Menu items contribute their top-level nodes;
    /// plain links become childless depth-1 entries.
    pub fn resolve_header(
        &self,
        items: &[HeaderItem],
        location: &Location,
    ) -> Result<Vec<ResolvedLink>> {
        let mut links = Vec::new();
        for item in items {
            match item {
                HeaderItem::Menu(tree) => links.extend(self.resolve(tree, location)?),
                HeaderItem::Link { label, path } => links.push(ResolvedLink {
                    label: label.clone(),
                    href: path.clone(),
                    depth: 1,
                    active: is_link_active(location, path),
                    children: Vec::new(),
                }),
            }
        }
        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{Filter, FilterKey};
    use crate::NavError;

    fn tree() -> NavTree {
        NavTree::new(
            "/lectures",
            vec![NavNode::branch(
                "재직자과정",
                Filter::new().with(FilterKey::Target, "employee"),
                vec![NavNode::branch(
                    "온라인",
                    Filter::new().with(FilterKey::Format, "online"),
                    vec![
                        NavNode::leaf("보안", Filter::new().with(FilterKey::Q, "보안")),
                        NavNode::leaf("클라우드", Filter::new().with(FilterKey::Q, "클라우드")),
                    ],
                )],
            )],
        )
    }

    #[test]
    fn test_depths_and_hrefs() {
        let links = Resolver::default()
            .resolve(&tree(), &Location::parse("/"))
            .unwrap();
        let online = &links[0].children[0];
        assert_eq!(links[0].depth, 1);
        assert_eq!(online.depth, 2);
        assert_eq!(online.children[1].depth, 3);
        assert_eq!(online.href, "/lectures?target=employee&format=online");
    }

    #[test]
    fn test_outside_section_nothing_active() {
        let links = Resolver::default()
            .resolve(&tree(), &Location::parse("/community?target=employee"))
            .unwrap();
        assert!(find_active_trail(&links).is_empty());
    }

    #[test]
    fn test_active_trail() {
        let links = Resolver::default()
            .resolve(
                &tree(),
                &Location::parse("/lectures?target=employee&format=online&q=%EB%B3%B4%EC%95%88"),
            )
            .unwrap();
        let trail: Vec<_> = find_active_trail(&links)
            .iter()
            .map(|l| l.label.as_str())
            .collect();
        assert_eq!(trail, vec!["재직자과정", "온라인", "보안"]);
        assert!(!find_link(&links, "클라우드").unwrap().active);
    }

    #[test]
    fn test_depth_limit_propagates() {
        let resolver = Resolver::new(NavConfig::with_max_depth(2));
        let err = resolver
            .resolve(&tree(), &Location::parse("/lectures"))
            .unwrap_err();
        assert!(matches!(err, NavError::DepthExceeded { depth: 3, max: 2 }));
    }
}
