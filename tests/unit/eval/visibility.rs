use super::*;
use kurbo::Point;

fn policy() -> VisibilityPolicy {
    VisibilityPolicy::default()
}

#[test]
fn arc_visibility_window() {
    let p = policy();
    assert!(p.arc_visible(&ArcBounds::new(0.0, 1.0, 1.0, 2.0)));
    assert!(p.arc_visible(&ArcBounds::new(0.0, 1.0, 2.0, 3.0)));
    // Root band, beyond the window, and empty spans are hidden.
    assert!(!p.arc_visible(&ArcBounds::new(0.0, 1.0, 0.0, 1.0)));
    assert!(!p.arc_visible(&ArcBounds::new(0.0, 1.0, 3.0, 4.0)));
    assert!(!p.arc_visible(&ArcBounds::new(1.0, 1.0, 1.0, 2.0)));
}

#[test]
fn label_needs_area_above_threshold() {
    let p = policy();
    assert!(p.label_visible(&ArcBounds::new(0.0, 0.031, 1.0, 2.0)));
    assert!(!p.label_visible(&ArcBounds::new(0.0, 0.03, 1.0, 2.0)));
    assert!(!p.label_visible(&ArcBounds::new(0.0, 0.02, 1.0, 2.0)));
    assert!(!p.label_visible(&ArcBounds::new(0.0, 1.0, 3.0, 4.0)));
}

#[test]
fn predicates_are_pure() {
    let p = policy();
    let g = ArcBounds::new(0.2, 0.9, 1.0, 2.0);
    let first = (p.arc_visible(&g), p.label_visible(&g));
    for _ in 0..10 {
        assert_eq!((p.arc_visible(&g), p.label_visible(&g)), first);
    }
}

#[test]
fn opacity_distinguishes_internal_and_leaf() {
    let p = policy();
    let g = ArcBounds::new(0.0, 1.0, 1.0, 2.0);
    assert_eq!(p.arc_opacity(&g, true), 0.6);
    assert_eq!(p.arc_opacity(&g, false), 0.4);
    assert_eq!(p.arc_opacity(&ArcBounds::new(0.0, 1.0, 0.0, 1.0), true), 0.0);
    assert_eq!(p.label_opacity(&g), 1.0);
}

#[test]
fn configurable_window() {
    let p = VisibilityPolicy {
        band_max: 5.0,
        label_area_threshold: 0.5,
        ..VisibilityPolicy::default()
    };
    assert!(p.arc_visible(&ArcBounds::new(0.0, 1.0, 4.0, 5.0)));
    assert!(!p.label_visible(&ArcBounds::new(0.0, 0.4, 1.0, 2.0)));
}

#[test]
fn right_half_label_is_not_flipped() {
    // Mid angle 90 degrees (3 o'clock), mid radius 1.5.
    let g = ArcBounds::new(PI / 4.0, 3.0 * PI / 4.0, 1.0, 2.0);
    let lp = LabelPlacement::for_bounds(&g, 100.0);
    assert!((lp.rotate_deg - 0.0).abs() < 1e-9);
    assert!((lp.translate - 150.0).abs() < 1e-9);
    assert!(!lp.flip);
    assert_eq!(lp.to_svg_transform(), "rotate(0) translate(150,0) rotate(0)");

    let origin = lp.affine() * Point::ORIGIN;
    assert!((origin.x - 150.0).abs() < 1e-9);
    assert!(origin.y.abs() < 1e-9);
}

#[test]
fn left_half_label_is_flipped_upright() {
    // Mid angle 270 degrees (9 o'clock).
    let g = ArcBounds::new(5.0 * PI / 4.0, 7.0 * PI / 4.0, 2.0, 3.0);
    let lp = LabelPlacement::for_bounds(&g, 100.0);
    assert!(lp.flip);
    assert!((lp.rotate_deg - 180.0).abs() < 1e-9);

    let origin = lp.affine() * Point::ORIGIN;
    assert!((origin.x + 250.0).abs() < 1e-9);
    // Text x axis points back toward the right after the half turn.
    let ahead = lp.affine() * Point::new(1.0, 0.0);
    assert!(ahead.x > origin.x);
}

#[test]
fn numbers_are_trimmed() {
    assert_eq!(fmt_num(1.5), "1.5");
    assert_eq!(fmt_num(-90.0), "-90");
    assert_eq!(fmt_num(1.0 / 3.0), "0.333333");
    assert_eq!(fmt_num(-0.0000001), "0");
}
