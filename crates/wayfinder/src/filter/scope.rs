//! Ancestor filter accumulation for tree walks

use super::{Filter, FilterKey};
use crate::error::{NavError, Result};

/// A single key/value contributed by one tree level.
#[derive(Debug, Clone)]
struct Binding {
    key: FilterKey,
    value: String,
}

/// Accumulates ancestor filters while walking a navigation tree.
///
/// Uses a flat binding list with frame boundaries: descending into a node
/// pushes a frame and defines its filter, leaving the node pops that frame.
/// Lookups search newest-first, so a descendant's value shadows an
/// ancestor's value for the same key.
///
/// # Example
///
/// ```
/// use wayfinder::{Filter, FilterKey, FilterScope};
///
/// let mut scope = FilterScope::new();
/// scope.push_frame();
/// scope.define(FilterKey::Target, "employee");
///
/// scope.push_frame();
/// scope.define(FilterKey::Target, "student"); // Shadows the ancestor
/// assert_eq!(scope.get(FilterKey::Target), Some("student"));
///
/// scope.pop_frame();
/// assert_eq!(scope.get(FilterKey::Target), Some("employee"));
/// ```
#[derive(Debug, Clone)]
pub struct FilterScope {
    /// All bindings in a flat array (most recent at end)
    bindings: Vec<Binding>,

    /// Frame boundaries (indices into bindings)
    frames: Vec<usize>,

    /// Maximum number of node frames above the root frame
    max_depth: usize,
}

impl Default for FilterScope {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterScope {
    /// Create a scope holding only the (empty) root frame.
    pub fn new() -> Self {
        Self::with_max_depth(crate::NavConfig::default().max_depth)
    }

    /// Create a scope with a custom nesting limit.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            bindings: Vec::new(),
            frames: vec![0],
            max_depth,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Frame Management
    // ═══════════════════════════════════════════════════════════════════

    /// Enter a new tree level (push a frame).
    pub fn push_frame(&mut self) {
        self.frames.push(self.bindings.len());
    }

    /// Leave the current tree level (pop a frame).
    ///
    /// Never pops the root frame.
    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 {
            if let Some(boundary) = self.frames.pop() {
                self.bindings.truncate(boundary);
            }
        }
    }

    /// Number of node levels currently entered (0 at the root).
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// Check if no node level is entered.
    pub fn is_root(&self) -> bool {
        self.frames.len() == 1
    }

    /// Enter a node: check the depth limit, push a frame, and define the
    /// node's own filter in it. The returned guard pops the frame on drop.
    pub fn enter(&mut self, filter: &Filter) -> Result<ScopeGuard<'_>> {
        if self.depth() >= self.max_depth {
            return Err(NavError::DepthExceeded {
                depth: self.depth() + 1,
                max: self.max_depth,
            });
        }
        let mut guard = self.scope_guard();
        guard.define_filter(filter);
        Ok(guard)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Definition and Lookup
    // ═══════════════════════════════════════════════════════════════════

    /// Define `key` in the current frame, shadowing any ancestor value.
    pub fn define(&mut self, key: FilterKey, value: impl Into<String>) {
        self.bindings.push(Binding {
            key,
            value: value.into(),
        });
    }

    /// Define every entry of `filter` in the current frame.
    pub fn define_filter(&mut self, filter: &Filter) {
        for (key, value) in filter.iter() {
            self.define(key, value);
        }
    }

    /// Most recent value for `key`.
    pub fn get(&self, key: FilterKey) -> Option<&str> {
        self.bindings
            .iter()
            .rev()
            .find(|b| b.key == key)
            .map(|b| b.value.as_str())
    }

    /// Check if any level defines `key`.
    pub fn contains(&self, key: FilterKey) -> bool {
        self.bindings.iter().any(|b| b.key == key)
    }

    /// Check if the innermost level defines `key`.
    pub fn contains_in_current_frame(&self, key: FilterKey) -> bool {
        let frame_start = *self.frames.last().unwrap_or(&0);
        self.bindings[frame_start..].iter().any(|b| b.key == key)
    }

    /// The merged filter for the current position, root-to-leaf with later
    /// levels winning.
    pub fn effective(&self) -> Filter {
        let mut merged = Filter::new();
        for binding in &self.bindings {
            merged.insert(binding.key, binding.value.as_str());
        }
        merged
    }

    /// Drop all bindings and return to the root frame.
    pub fn clear(&mut self) {
        self.bindings.clear();
        self.frames = vec![0];
    }
}

/// RAII guard that pops a frame when dropped.
pub struct ScopeGuard<'a> {
    scope: &'a mut FilterScope,
}

impl FilterScope {
    /// Create a scope guard that pushes a frame now and pops it on drop.
    pub fn scope_guard(&mut self) -> ScopeGuard<'_> {
        self.push_frame();
        ScopeGuard { scope: self }
    }
}

impl<'a> Drop for ScopeGuard<'a> {
    fn drop(&mut self) {
        self.scope.pop_frame();
    }
}

impl<'a> std::ops::Deref for ScopeGuard<'a> {
    type Target = FilterScope;

    fn deref(&self) -> &Self::Target {
        self.scope
    }
}

impl<'a> std::ops::DerefMut for ScopeGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.scope
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_guard_drops_frame() {
        let mut scope = FilterScope::new();
        {
            let guard = scope.scope_guard();
            assert_eq!(guard.depth(), 1);
        }
        assert!(scope.is_root());
    }

    #[test]
    fn test_enter_defines_filter_and_isolates_it() {
        let mut scope = FilterScope::new();
        let level1 = Filter::new().with(FilterKey::Target, "employee");
        let level2 = Filter::new().with(FilterKey::Format, "online");
        {
            let mut outer = scope.enter(&level1).unwrap();
            {
                let inner = outer.enter(&level2).unwrap();
                assert_eq!(inner.get(FilterKey::Target), Some("employee"));
                assert!(inner.contains_in_current_frame(FilterKey::Format));
                assert!(!inner.contains_in_current_frame(FilterKey::Target));
            }
            assert!(!outer.contains(FilterKey::Format));
        }
        assert!(scope.effective().is_empty());
    }

    #[test]
    fn test_effective_applies_shadowing() {
        let mut scope = FilterScope::new();
        scope.push_frame();
        scope.define(FilterKey::Target, "employee");
        scope.push_frame();
        scope.define(FilterKey::Format, "hybrid");
        scope.define(FilterKey::Target, "student");

        let effective = scope.effective();
        assert_eq!(effective.get(FilterKey::Target), Some("student"));
        assert_eq!(effective.get(FilterKey::Format), Some("hybrid"));
        assert_eq!(effective.len(), 2);
    }

    #[test]
    fn test_enter_rejects_excess_depth() {
        let mut scope = FilterScope::with_max_depth(1);
        let filter = Filter::new();
        let mut guard = scope.enter(&filter).unwrap();
        let err = guard.enter(&filter).err().unwrap();
        assert!(matches!(err, NavError::DepthExceeded { depth: 2, max: 1 }));
    }

    #[test]
    fn test_pop_never_removes_root() {
        let mut scope = FilterScope::new();
        scope.define(FilterKey::Q, "보안");
        scope.pop_frame();
        assert_eq!(scope.get(FilterKey::Q), Some("보안"));
        scope.clear();
        assert_eq!(scope.get(FilterKey::Q), None);
    }
}
