use std::f64::consts::TAU;

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Index of a node inside a [`crate::Hierarchy`] arena.
///
/// Ids are assigned in breadth-first order, so the root is always `NodeId(0)` and a parent's id is
/// always smaller than any of its children's ids.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The root of every hierarchy.
    pub const ROOT: Self = Self(0);

    /// Position of this node in arena-indexed side tables.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Angular interval `[x0, x1]` (radians) and radial band interval `[y0, y1]` (band units) of a
/// node.
///
/// The same shape is used for the base partition layout, for the presently rendered geometry
/// and for the zoom target.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArcBounds {
    /// Start angle in radians, `0` at 12 o'clock, growing clockwise.
    pub x0: f64,
    /// End angle in radians.
    pub x1: f64,
    /// Inner radial band.
    pub y0: f64,
    /// Outer radial band.
    pub y1: f64,
}

impl ArcBounds {
    /// Build bounds from raw coordinates.
    pub fn new(x0: f64, x1: f64, y0: f64, y1: f64) -> Self {
        Self { x0, x1, y0, y1 }
    }

    /// Angular sweep `x1 - x0`.
    pub fn angular_span(self) -> f64 {
        self.x1 - self.x0
    }

    /// Radial thickness `y1 - y0`.
    pub fn radial_span(self) -> f64 {
        self.y1 - self.y0
    }

    /// Angular midpoint in radians.
    pub fn mid_angle(self) -> f64 {
        (self.x0 + self.x1) / 2.0
    }

    /// Radial midpoint in band units.
    pub fn mid_radius(self) -> f64 {
        (self.y0 + self.y1) / 2.0
    }

    /// Angular span times radial span, used as the label legibility measure.
    pub fn area(self) -> f64 {
        self.radial_span() * self.angular_span()
    }

    /// Re-express these bounds relative to a new focus node.
    ///
    /// Angles are rescaled linearly against the focus span, clamped to `[0, 1]` and mapped back
    /// onto the full circle. Bands shift inward by the focus depth and clamp at zero. A focus with
    /// an empty angular span maps every angle to `0`.
    pub fn renormalize(self, focus: ArcBounds, focus_depth: u32) -> Self {
        let span = focus.angular_span();
        let rescale = |x: f64| {
            if span > 0.0 {
                ((x - focus.x0) / span).clamp(0.0, 1.0) * TAU
            } else {
                0.0
            }
        };
        let depth = f64::from(focus_depth);
        Self {
            x0: rescale(self.x0),
            x1: rescale(self.x1),
            y0: (self.y0 - depth).max(0.0),
            y1: (self.y1 - depth).max(0.0),
        }
    }
}

/// Square logical drawing surface with a centered coordinate system.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in logical units.
    pub width: f64,
    /// Height in logical units.
    pub height: f64,
}

impl Viewport {
    /// Square viewport of side `size`.
    pub fn square(size: f64) -> Self {
        Self {
            width: size,
            height: size,
        }
    }

    /// Viewport rectangle in centered coordinates (`[-w/2, -h/2, w/2, h/2]`).
    pub fn rect(self) -> Rect {
        Rect::new(
            -self.width / 2.0,
            -self.height / 2.0,
            self.width / 2.0,
            self.height / 2.0,
        )
    }

    /// Map a point in top-left-origin pixel space into centered coordinates.
    pub fn to_centered(self, p: Point) -> Point {
        Point::new(p.x - self.width / 2.0, p.y - self.height / 2.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
