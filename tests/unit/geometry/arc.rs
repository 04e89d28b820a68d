use super::*;
use kurbo::Shape;
use std::f64::consts::PI;

fn generator() -> ArcGenerator {
    ArcGenerator::new(100.0, &ArcConfig::default())
}

/// Point at sunburst angle `theta` (0 = up, clockwise) and radius `r`.
fn at(theta: f64, r: f64) -> Point {
    polar(r, theta - FRAC_PI_2)
}

#[test]
fn radii_follow_band_policy() {
    let g = generator();
    let b = ArcBounds::new(0.0, 1.0, 1.0, 2.0);
    assert_eq!(g.inner_radius(&b), 100.0);
    assert_eq!(g.outer_radius(&b), 199.0);

    let flat = ArcBounds::new(0.0, 1.0, 2.0, 2.0);
    assert_eq!(g.outer_radius(&flat), 200.0);
}

#[test]
fn pad_angle_is_capped_and_scales_for_thin_wedges() {
    let g = generator();
    assert_eq!(g.pad_angle(&ArcBounds::new(0.0, 1.0, 1.0, 2.0)), 0.005);
    assert!((g.pad_angle(&ArcBounds::new(0.0, 0.004, 1.0, 2.0)) - 0.002).abs() < 1e-15);
    assert_eq!(g.pad_angle(&ArcBounds::new(1.0, 1.0, 1.0, 2.0)), 0.0);
}

#[test]
fn quarter_wedge_covers_its_sector_only() {
    let g = generator();
    let path = g.wedge(&ArcBounds::new(0.0, PI / 2.0, 1.0, 2.0));

    assert!(path.contains(at(PI / 4.0, 150.0)));
    assert!(!path.contains(at(3.0 * PI / 4.0, 150.0)));
    assert!(!path.contains(at(PI / 4.0, 50.0)));
    assert!(!path.contains(at(PI / 4.0, 199.5)));

    // Upper-right quadrant in y-down coordinates.
    let bbox = path.bounding_box();
    assert!(bbox.x0 > -1.0 && bbox.y1 < 1.0);

    let expected = 0.5 * (PI / 2.0) * (199.0_f64.powi(2) - 100.0_f64.powi(2));
    let area = path.area().abs();
    assert!((area - expected).abs() / expected < 0.02, "{area} vs {expected}");
}

#[test]
fn padding_leaves_gap_between_neighbours() {
    let g = generator();
    let left = g.wedge(&ArcBounds::new(0.0, 1.0, 1.0, 2.0));
    let right = g.wedge(&ArcBounds::new(1.0, 2.0, 1.0, 2.0));
    let seam = at(1.0, 150.0);
    assert!(!left.contains(seam));
    assert!(!right.contains(seam));
}

#[test]
fn full_circle_is_an_annulus() {
    let g = generator();
    let path = g.wedge(&ArcBounds::new(0.0, TAU, 1.0, 2.0));
    for theta in [0.3, 2.0, 4.0, 6.0] {
        assert!(path.contains(at(theta, 150.0)));
    }
    assert!(!path.contains(Point::ORIGIN));
    assert!(!path.contains(at(1.0, 50.0)));
}

#[test]
fn innermost_band_wedge_reaches_center() {
    let g = generator();
    let path = g.wedge(&ArcBounds::new(0.0, PI, 0.0, 1.0));
    assert!(path.contains(at(PI / 2.0, 50.0)));
    assert!(!path.contains(at(3.0 * PI / 2.0, 50.0)));
}

#[test]
fn collapsed_bounds_produce_point_path() {
    let g = generator();
    let path = g.wedge(&ArcBounds::new(1.0, 2.0, 0.0, 0.0));
    assert_eq!(path.elements().len(), 2);
    assert_eq!(path.area(), 0.0);
}

#[test]
fn svg_output_is_closed_path_data() {
    let g = generator();
    let d = g.wedge_svg(&ArcBounds::new(0.0, 1.0, 1.0, 2.0));
    assert!(d.starts_with('M'));
    assert!(d.trim_end().ends_with('Z'));
}
