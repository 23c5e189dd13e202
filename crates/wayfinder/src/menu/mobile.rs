//! Tap-driven expand/collapse state for the mobile drawer

use std::collections::BTreeMap;

/// Mobile navigation drawer state.
///
/// Each top-level group expands independently. Within a group at most one
/// second-level group is open: opening another closes the previous one.
/// Collapsing a group collapses its descendants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MobileMenuState {
    drawer_open: bool,
    /// Expanded top-level groups, each with its open second-level group
    expanded: BTreeMap<usize, Option<usize>>,
}

impl MobileMenuState {
    /// Create a closed drawer with nothing expanded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the drawer is shown.
    pub fn is_drawer_open(&self) -> bool {
        self.drawer_open
    }

    /// Open or close the drawer. Closing collapses every group.
    pub fn toggle_drawer(&mut self) -> bool {
        if self.drawer_open {
            self.close_drawer();
        } else {
            self.drawer_open = true;
        }
        self.drawer_open
    }

    /// Close the drawer and collapse every group.
    pub fn close_drawer(&mut self) {
        self.drawer_open = false;
        self.expanded.clear();
    }

    /// The user followed a link: the drawer closes.
    pub fn navigated(&mut self) {
        self.close_drawer();
    }

    /// Expand or collapse top-level group `top`. Returns whether it is now
    /// expanded.
    pub fn toggle_top(&mut self, top: usize) -> bool {
        if self.expanded.remove(&top).is_some() {
            return false;
        }
        self.expanded.insert(top, None);
        true
    }

    /// Expand or collapse second-level group `second` under `top`.
    ///
    /// Has no effect while `top` is collapsed. Returns whether `second` is
    /// now expanded.
    pub fn toggle_second(&mut self, top: usize, second: usize) -> bool {
        let Some(open) = self.expanded.get_mut(&top) else {
            tracing::debug!(top, second, "ignoring tap under collapsed group");
            return false;
        };
        if *open == Some(second) {
            *open = None;
            false
        } else {
            *open = Some(second);
            true
        }
    }

    /// Check if top-level group `top` is expanded.
    pub fn is_top_expanded(&self, top: usize) -> bool {
        self.expanded.contains_key(&top)
    }

    /// The open second-level group under `top`, if any.
    pub fn expanded_second(&self, top: usize) -> Option<usize> {
        self.expanded.get(&top).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_second_level_group_per_parent() {
        let mut m = MobileMenuState::new();
        m.toggle_drawer();
        m.toggle_top(0);
        assert!(m.toggle_second(0, 1));
        assert!(m.toggle_second(0, 2));
        assert_eq!(m.expanded_second(0), Some(2));
        assert!(!m.toggle_second(0, 2));
        assert_eq!(m.expanded_second(0), None);
    }

    #[test]
    fn test_top_groups_are_independent() {
        let mut m = MobileMenuState::new();
        m.toggle_top(0);
        m.toggle_top(1);
        m.toggle_second(0, 0);
        m.toggle_second(1, 3);
        assert_eq!(m.expanded_second(0), Some(0));
        assert_eq!(m.expanded_second(1), Some(3));
    }

    #[test]
    fn test_collapsing_parent_collapses_descendants() {
        let mut m = MobileMenuState::new();
        m.toggle_top(0);
        m.toggle_second(0, 1);
        assert!(!m.toggle_top(0));
        assert!(m.toggle_top(0));
        assert_eq!(m.expanded_second(0), None);
    }

    #[test]
    fn test_tap_under_collapsed_group_is_ignored() {
        let mut m = MobileMenuState::new();
        assert!(!m.toggle_second(4, 0));
        assert!(!m.is_top_expanded(4));
    }

    #[test]
    fn test_navigation_closes_everything() {
        let mut m = MobileMenuState::new();
        m.toggle_drawer();
        m.toggle_top(1);
        m.toggle_second(1, 0);
        m.navigated();
        assert!(!m.is_drawer_open());
        assert!(!m.is_top_expanded(1));
    }
}
