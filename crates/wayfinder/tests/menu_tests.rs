//! Desktop and mobile menu state tests

use wayfinder::*;

fn hovered_menu(viewport: f64) -> MenuState {
    let mut menu = MenuState::new(&NavConfig::default(), viewport)
        .with_second_level(vec![true, true, true]);
    menu.handle(MenuEvent::PointerEnter);
    menu.handle(MenuEvent::HoverSecond(Some(1)));
    menu
}

// ═══════════════════════════════════════════════════════════════════════
// Overflow Flip
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_flyout_flips_when_past_right_edge() {
    let mut menu = hovered_menu(1000.0);
    let effect = menu.handle(MenuEvent::FlyoutShown(FlyoutRect::new(850.0, 220.0)));
    assert_eq!(effect, MenuEffect::Reposition(AnchorSide::Left));
    assert_eq!(menu.anchor(), Some(AnchorSide::Left));
}

#[test]
fn test_shrinking_viewport_rechecks_flip() {
    let mut menu = hovered_menu(1280.0);
    assert_eq!(
        menu.handle(MenuEvent::FlyoutShown(FlyoutRect::new(850.0, 220.0))),
        MenuEffect::Reposition(AnchorSide::Right)
    );
    assert!(menu.wants_resize_events());

    assert_eq!(
        menu.handle(MenuEvent::Resize { viewport_width: 1000.0 }),
        MenuEffect::Reposition(AnchorSide::Left)
    );
    // Shrinking further keeps it flipped without another reposition
    assert_eq!(
        menu.handle(MenuEvent::Resize { viewport_width: 900.0 }),
        MenuEffect::None
    );
    // Growing again flips back
    assert_eq!(
        menu.handle(MenuEvent::Resize { viewport_width: 1400.0 }),
        MenuEffect::Reposition(AnchorSide::Right)
    );
}

#[test]
fn test_closing_menu_drops_flyout() {
    let mut menu = hovered_menu(1000.0);
    menu.handle(MenuEvent::FlyoutShown(FlyoutRect::new(850.0, 220.0)));
    menu.handle(MenuEvent::PointerLeave);
    assert!(!menu.is_open());
    assert_eq!(menu.hovered_second(), None);
    assert_eq!(menu.anchor(), None);
    assert!(!menu.wants_resize_events());
}

#[test]
fn test_changing_hovered_entry_requires_new_measurement() {
    let mut menu = hovered_menu(1000.0);
    menu.handle(MenuEvent::FlyoutShown(FlyoutRect::new(850.0, 220.0)));
    menu.handle(MenuEvent::HoverSecond(Some(2)));
    assert_eq!(menu.anchor(), None);
    assert!(menu.flyout_visible());
}

// ═══════════════════════════════════════════════════════════════════════
// Menu Shape From Resolved Links
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_second_level_shape_from_resolution() {
    let links = Resolver::default()
        .resolve(&taxonomy::course_tree(), &Location::parse("/lectures"))
        .unwrap();
    let employee = &links[0];
    let shape: Vec<bool> = employee.children.iter().map(|c| c.has_children()).collect();

    let mut menu = MenuState::new(&NavConfig::default(), 1280.0).with_second_level(shape);
    menu.handle(MenuEvent::Key(MenuKey::Enter));
    menu.handle(MenuEvent::HoverSecond(Some(0)));
    assert!(menu.flyout_visible());

    // Once the entry loses its children the flyout disappears
    menu.set_second_level_children(vec![false, true, true]);
    assert!(!menu.flyout_visible());
}

// ═══════════════════════════════════════════════════════════════════════
// Mobile Drawer
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_mobile_drawer_round() {
    let mut mobile = MobileMenuState::new();
    assert!(mobile.toggle_drawer());
    mobile.toggle_top(0);
    mobile.toggle_second(0, 0);
    mobile.toggle_second(0, 2);
    assert_eq!(mobile.expanded_second(0), Some(2));

    assert!(!mobile.toggle_drawer());
    assert!(!mobile.is_top_expanded(0));
    assert_eq!(mobile.expanded_second(0), None);
}
