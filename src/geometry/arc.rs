use std::f64::consts::{FRAC_PI_2, TAU};

use kurbo::{Arc, BezPath, Point, Vec2};

use crate::foundation::core::ArcBounds;

const EPSILON: f64 = 1e-12;
const CURVE_TOLERANCE: f64 = 0.1;

/// Padding applied between adjacent wedges.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ArcConfig {
    /// Upper bound of the angular gap between neighbours, in radians.
    pub pad_angle_cap: f64,
    /// Padding radius as a multiple of the band radius.
    pub pad_radius_factor: f64,
}

impl Default for ArcConfig {
    fn default() -> Self {
        Self {
            pad_angle_cap: 0.005,
            pad_radius_factor: 1.5,
        }
    }
}

/// Turns [`ArcBounds`] into closed annular-sector paths.
///
/// Angles are measured from 12 o'clock and grow clockwise in y-down screen space; the path is
/// centered on the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcGenerator {
    radius: f64,
    pad_angle_cap: f64,
    pad_radius: f64,
}

impl ArcGenerator {
    /// Generator for bands of `radius` logical units.
    pub fn new(radius: f64, config: &ArcConfig) -> Self {
        Self {
            radius,
            pad_angle_cap: config.pad_angle_cap,
            pad_radius: radius * config.pad_radius_factor,
        }
    }

    /// Band radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Total angular gap for `b`: `min((x1 - x0) / 2, cap)`.
    pub fn pad_angle(&self, b: &ArcBounds) -> f64 {
        (b.angular_span() / 2.0).min(self.pad_angle_cap).max(0.0)
    }

    /// Inner radius `y0 * radius`.
    pub fn inner_radius(&self, b: &ArcBounds) -> f64 {
        b.y0 * self.radius
    }

    /// Outer radius `max(y0 * radius, y1 * radius - 1)`, leaving a one-unit gap between bands.
    pub fn outer_radius(&self, b: &ArcBounds) -> f64 {
        (b.y0 * self.radius).max(b.y1 * self.radius - 1.0)
    }

    /// Closed path of the padded wedge for `b`.
    pub fn wedge(&self, b: &ArcBounds) -> BezPath {
        let mut r0 = self.inner_radius(b).max(0.0);
        let mut r1 = self.outer_radius(b).max(0.0);
        if r1 < r0 {
            std::mem::swap(&mut r0, &mut r1);
        }

        let a0 = b.x0 - FRAC_PI_2;
        let a1 = b.x1 - FRAC_PI_2;
        let da = (a1 - a0).abs();
        let cw = a1 > a0;

        let mut path = BezPath::new();

        if r1 <= EPSILON {
            path.move_to(Point::ORIGIN);
            path.close_path();
            return path;
        }

        if da > TAU - EPSILON {
            path.move_to(polar(r1, a0));
            append_arc(&mut path, r1, a0, a1 - a0);
            path.close_path();
            if r0 > EPSILON {
                path.move_to(polar(r0, a1));
                append_arc(&mut path, r0, a1, a0 - a1);
                path.close_path();
            }
            return path;
        }

        let (mut a00, mut a10) = (a0, a1);
        let (mut a01, mut a11) = (a0, a1);
        let mut da0 = da;
        let mut da1 = da;

        let ap = self.pad_angle(b) / 2.0;
        let rp = if ap > EPSILON { self.pad_radius } else { 0.0 };
        if rp > EPSILON {
            let dir = if cw { 1.0 } else { -1.0 };
            let p0 = asin_clamped(rp / r0 * ap.sin());
            let p1 = asin_clamped(rp / r1 * ap.sin());

            da0 -= p0 * 2.0;
            if da0 > EPSILON {
                a00 += p0 * dir;
                a10 -= p0 * dir;
            } else {
                da0 = 0.0;
                a00 = (a0 + a1) / 2.0;
                a10 = a00;
            }

            da1 -= p1 * 2.0;
            if da1 > EPSILON {
                a01 += p1 * dir;
                a11 -= p1 * dir;
            } else {
                da1 = 0.0;
                a01 = (a0 + a1) / 2.0;
                a11 = a01;
            }
        }

        path.move_to(polar(r1, a01));
        if da1 > EPSILON {
            append_arc(&mut path, r1, a01, a11 - a01);
        }

        path.line_to(polar(r0, a10));
        if r0 > EPSILON && da0 > EPSILON {
            append_arc(&mut path, r0, a10, a00 - a10);
        }
        path.close_path();
        path
    }

    /// SVG path data of [`ArcGenerator::wedge`].
    pub fn wedge_svg(&self, b: &ArcBounds) -> String {
        self.wedge(b).to_svg()
    }
}

fn polar(r: f64, angle: f64) -> Point {
    Point::new(r * angle.cos(), r * angle.sin())
}

fn append_arc(path: &mut BezPath, r: f64, start: f64, sweep: f64) {
    let arc = Arc {
        center: Point::ORIGIN,
        radii: Vec2::new(r, r),
        start_angle: start,
        sweep_angle: sweep,
        x_rotation: 0.0,
    };
    path.extend(arc.append_iter(CURVE_TOLERANCE));
}

fn asin_clamped(x: f64) -> f64 {
    if x >= 1.0 {
        FRAC_PI_2
    } else if x <= -1.0 {
        -FRAC_PI_2
    } else {
        x.asin()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/arc.rs"]
mod tests;
