//! Transient state for header dropdown menus

mod flyout;
mod mobile;

pub use flyout::{AnchorSide, FlyoutRect};
pub use mobile::MobileMenuState;

use crate::context::NavConfig;

/// Keys the desktop menu reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    /// Enter
    Enter,
    /// Space bar
    Space,
    /// Escape
    Escape,
    /// Tab; closing happens through the focus-out that follows it
    Tab,
    /// Any other key
    Other,
}

/// Input events for one top-level menu.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuEvent {
    /// Pointer entered the menu's subtree
    PointerEnter,
    /// Pointer left the menu's subtree
    PointerLeave,
    /// Focus moved into the menu's subtree
    FocusIn,
    /// Focus left an element of the menu
    FocusOut {
        /// Whether the newly focused element is still inside the menu
        within_menu: bool,
    },
    /// Key pressed while the menu trigger or a menu link has focus
    Key(MenuKey),
    /// Pointer or focus moved to a second-level entry (`None` when it left
    /// all of them)
    HoverSecond(Option<usize>),
    /// The visible third-level flyout was measured at its natural position
    FlyoutShown(FlyoutRect),
    /// The viewport was resized
    Resize {
        /// New viewport width
        viewport_width: f64,
    },
}

/// What the host should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEffect {
    /// Nothing to do
    None,
    /// Move focus to the first link inside the menu
    FocusFirstLink,
    /// Anchor the visible flyout to the given side
    Reposition(AnchorSide),
}

/// Open/closed phase of a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuPhase {
    /// Nothing displayed
    Closed,
    /// Dropdown displayed
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Flyout {
    rect: FlyoutRect,
    anchor: AnchorSide,
}

/// State machine for one desktop top-level dropdown.
///
/// ```text
/// Closed --(PointerEnter | FocusIn | Enter/Space)--> Open
/// Open --(PointerLeave | FocusOut outside | Escape | Enter/Space)--> Closed
/// Open --(HoverSecond(i))--> Open, hovered second = i
/// ```
///
/// Leaving the menu also clears the hovered second-level entry.
#[derive(Debug, Clone)]
pub struct MenuState {
    phase: MenuPhase,
    hovered_second: Option<usize>,
    second_has_children: Vec<bool>,
    flyout: Option<Flyout>,
    viewport_width: f64,
    overflow_detection: bool,
    default_anchor: AnchorSide,
}

impl MenuState {
    /// Create a closed menu for a viewport of the given width.
    pub fn new(config: &NavConfig, viewport_width: f64) -> Self {
        Self {
            phase: MenuPhase::Closed,
            hovered_second: None,
            second_has_children: Vec::new(),
            flyout: None,
            viewport_width,
            overflow_detection: config.overflow_detection,
            default_anchor: config.default_anchor,
        }
    }

    /// Record, per second-level entry, whether it has third-level children.
    pub fn with_second_level(mut self, has_children: Vec<bool>) -> Self {
        self.second_has_children = has_children;
        self
    }

    /// Replace the second-level shape (e.g. after the taxonomy re-resolves).
    pub fn set_second_level_children(&mut self, has_children: Vec<bool>) {
        self.second_has_children = has_children;
        if let Some(i) = self.hovered_second {
            if !self.entry_has_children(i) {
                self.flyout = None;
            }
        }
    }

    /// Current phase.
    pub fn phase(&self) -> MenuPhase {
        self.phase
    }

    /// Check if the dropdown is open.
    pub fn is_open(&self) -> bool {
        self.phase == MenuPhase::Open
    }

    /// Index of the expanded second-level entry.
    pub fn hovered_second(&self) -> Option<usize> {
        self.hovered_second
    }

    /// Whether a third-level flyout is displayed: the menu is open and the
    /// hovered second-level entry has children.
    pub fn flyout_visible(&self) -> bool {
        self.is_open()
            && self
                .hovered_second
                .is_some_and(|i| self.entry_has_children(i))
    }

    /// Anchor of the visible flyout, once measured.
    pub fn anchor(&self) -> Option<AnchorSide> {
        self.flyout.map(|f| f.anchor)
    }

    /// Whether the host should keep a resize listener attached.
    pub fn wants_resize_events(&self) -> bool {
        self.flyout_visible() && self.flyout.is_some()
    }

    /// Apply an event and report the follow-up effect.
    pub fn handle(&mut self, event: MenuEvent) -> MenuEffect {
        match event {
            MenuEvent::PointerEnter | MenuEvent::FocusIn => {
                self.open();
                MenuEffect::None
            }
            MenuEvent::PointerLeave => {
                self.close();
                MenuEffect::None
            }
            MenuEvent::FocusOut { within_menu } => {
                if !within_menu {
                    self.close();
                }
                MenuEffect::None
            }
            MenuEvent::Key(MenuKey::Enter | MenuKey::Space) => {
                if self.is_open() {
                    self.close();
                    MenuEffect::None
                } else {
                    self.open();
                    MenuEffect::FocusFirstLink
                }
            }
            MenuEvent::Key(MenuKey::Escape) => {
                self.close();
                MenuEffect::None
            }
            MenuEvent::Key(MenuKey::Tab | MenuKey::Other) => MenuEffect::None,
            MenuEvent::HoverSecond(index) => {
                if self.is_open() && self.hovered_second != index {
                    self.hovered_second = index;
                    self.flyout = None;
                    tracing::debug!(?index, "second-level entry hovered");
                }
                MenuEffect::None
            }
            MenuEvent::FlyoutShown(rect) => {
                if !self.flyout_visible() {
                    return MenuEffect::None;
                }
                let anchor = self.anchor_for(rect);
                self.flyout = Some(Flyout { rect, anchor });
                MenuEffect::Reposition(anchor)
            }
            MenuEvent::Resize { viewport_width } => {
                self.viewport_width = viewport_width;
                if !self.flyout_visible() {
                    return MenuEffect::None;
                }
                match self.flyout {
                    Some(flyout) => {
                        let anchor = self.anchor_for(flyout.rect);
                        if anchor == flyout.anchor {
                            return MenuEffect::None;
                        }
                        self.flyout = Some(Flyout { anchor, ..flyout });
                        tracing::debug!(?anchor, viewport_width, "flyout anchor flipped");
                        MenuEffect::Reposition(anchor)
                    }
                    None => MenuEffect::None,
                }
            }
        }
    }

    fn open(&mut self) {
        if self.phase == MenuPhase::Closed {
            self.phase = MenuPhase::Open;
            tracing::debug!("menu opened");
        }
    }

    fn close(&mut self) {
        if self.phase == MenuPhase::Open {
            tracing::debug!("menu closed");
        }
        self.phase = MenuPhase::Closed;
        self.hovered_second = None;
        self.flyout = None;
    }

    fn entry_has_children(&self, index: usize) -> bool {
        self.second_has_children.get(index).copied().unwrap_or(false)
    }

    fn anchor_for(&self, rect: FlyoutRect) -> AnchorSide {
        if self.overflow_detection {
            AnchorSide::for_viewport(rect, self.viewport_width)
        } else {
            self.default_anchor
        }
    }
}
