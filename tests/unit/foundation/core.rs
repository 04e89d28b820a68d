use super::*;
use std::f64::consts::PI;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn renormalize_against_full_circle_root_is_identity() {
    let root = ArcBounds::new(0.0, TAU, 0.0, 1.0);
    let b = ArcBounds::new(0.5, 1.25, 2.0, 3.0);
    let r = b.renormalize(root, 0);
    assert!(approx(r.x0, b.x0));
    assert!(approx(r.x1, b.x1));
    assert_eq!(r.y0, 2.0);
    assert_eq!(r.y1, 3.0);
}

#[test]
fn renormalize_clamps_outside_focus() {
    let focus = ArcBounds::new(0.0, 1.5 * PI, 1.0, 2.0);
    let outside = ArcBounds::new(1.5 * PI, TAU, 1.0, 2.0);
    let r = outside.renormalize(focus, 1);
    assert!(approx(r.x0, TAU));
    assert!(approx(r.x1, TAU));
    assert_eq!(r.angular_span(), 0.0);
    assert_eq!(r.y0, 0.0);
    assert_eq!(r.y1, 1.0);
}

#[test]
fn renormalize_with_empty_focus_collapses_angles() {
    let focus = ArcBounds::new(1.0, 1.0, 1.0, 2.0);
    let r = ArcBounds::new(0.0, 2.0, 0.0, 1.0).renormalize(focus, 3);
    assert_eq!(r, ArcBounds::new(0.0, 0.0, 0.0, 0.0));
}

#[test]
fn midpoints_and_area() {
    let b = ArcBounds::new(0.0, PI, 1.0, 2.0);
    assert!(approx(b.mid_angle(), PI / 2.0));
    assert!(approx(b.mid_radius(), 1.5));
    assert!(approx(b.area(), PI));
}

#[test]
fn viewport_centers_points() {
    let vp = Viewport::square(928.0);
    assert_eq!(vp.to_centered(Point::new(464.0, 464.0)), Point::ORIGIN);
    assert_eq!(vp.rect().width(), 928.0);
}

#[test]
fn root_id_is_zero() {
    assert_eq!(NodeId::ROOT.index(), 0);
}
