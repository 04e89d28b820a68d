use std::f64::consts::PI;

use kurbo::Affine;

use crate::foundation::core::ArcBounds;

/// Which wedges and labels are drawn, and how opaque.
///
/// Only bands inside `[band_min, band_max]` render; the root band and anything deeper than the
/// window stay hidden so the chart shows a bounded number of rings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VisibilityPolicy {
    /// Innermost visible band edge.
    pub band_min: f64,
    /// Outermost visible band edge.
    pub band_max: f64,
    /// Minimum `angular × radial` extent for a label to show.
    pub label_area_threshold: f64,
    /// Fill opacity of visible wedges that have children.
    pub internal_opacity: f64,
    /// Fill opacity of visible leaf wedges.
    pub leaf_opacity: f64,
}

impl Default for VisibilityPolicy {
    fn default() -> Self {
        Self {
            band_min: 1.0,
            band_max: 3.0,
            label_area_threshold: 0.03,
            internal_opacity: 0.6,
            leaf_opacity: 0.4,
        }
    }
}

impl VisibilityPolicy {
    fn within_bands(&self, g: &ArcBounds) -> bool {
        g.y1 <= self.band_max && g.y0 >= self.band_min
    }

    /// Whether a wedge with geometry `g` is drawn and clickable.
    pub fn arc_visible(&self, g: &ArcBounds) -> bool {
        self.within_bands(g) && g.x1 > g.x0
    }

    /// Whether the label of a wedge with geometry `g` is drawn.
    pub fn label_visible(&self, g: &ArcBounds) -> bool {
        self.within_bands(g) && g.area() > self.label_area_threshold
    }

    /// Fill opacity for a wedge with geometry `g`.
    pub fn arc_opacity(&self, g: &ArcBounds, has_children: bool) -> f64 {
        match (self.arc_visible(g), has_children) {
            (false, _) => 0.0,
            (true, true) => self.internal_opacity,
            (true, false) => self.leaf_opacity,
        }
    }

    /// Label opacity for geometry `g`: `1` or `0`.
    pub fn label_opacity(&self, g: &ArcBounds) -> f64 {
        if self.label_visible(g) { 1.0 } else { 0.0 }
    }
}

/// Where a label sits: rotated to the wedge's mid angle, pushed out to its mid radius, and turned
/// upright on the left half of the circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelPlacement {
    /// First rotation in degrees (`mid angle − 90`).
    pub rotate_deg: f64,
    /// Outward distance along the rotated x axis.
    pub translate: f64,
    /// Extra half turn so text never renders upside down.
    pub flip: bool,
}

impl LabelPlacement {
    /// Placement for geometry `g` with bands of `radius` units.
    pub fn for_bounds(g: &ArcBounds, radius: f64) -> Self {
        let mid_deg = g.mid_angle() * 180.0 / PI;
        Self {
            rotate_deg: mid_deg - 90.0,
            translate: g.mid_radius() * radius,
            flip: mid_deg >= 180.0,
        }
    }

    /// SVG `transform` attribute value.
    pub fn to_svg_transform(&self) -> String {
        format!(
            "rotate({}) translate({},0) rotate({})",
            fmt_num(self.rotate_deg),
            fmt_num(self.translate),
            if self.flip { 180 } else { 0 }
        )
    }

    /// Same transform as an affine map from label space to chart space.
    pub fn affine(&self) -> Affine {
        let flip = if self.flip { PI } else { 0.0 };
        Affine::rotate(self.rotate_deg.to_radians())
            * Affine::translate((self.translate, 0.0))
            * Affine::rotate(flip)
    }
}

/// Shortest decimal rendering with at most six fractional digits.
pub(crate) fn fmt_num(v: f64) -> String {
    let mut s = format!("{v:.6}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_owned();
    }
    s
}

#[cfg(test)]
#[path = "../../tests/unit/eval/visibility.rs"]
mod tests;
