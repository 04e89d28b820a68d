use kurbo::Shape;

use crate::{
    eval::visibility::LabelPlacement,
    foundation::core::{BezPath, NodeId, Point, Rect, Viewport},
    style::color::ColorDef,
    view::View,
};

/// Side length of the back icon in chart units.
pub const BACK_ICON_SIZE: f64 = 16.0;
/// Baseline offset of the "Back" caption below the chart centre.
pub const BACK_TEXT_DY: f64 = BACK_ICON_SIZE / 2.0 + 10.0;

/// One drawable wedge.
#[derive(Clone, Debug)]
pub struct WedgeElement {
    /// Node the wedge is bound to.
    pub node: NodeId,
    /// Outline in centered chart coordinates.
    pub path: BezPath,
    /// Branch color.
    pub fill: ColorDef,
    /// Current fill opacity.
    pub fill_opacity: f64,
    /// Whether the wedge receives pointer activations.
    pub interactive: bool,
    /// Whether activating the wedge zooms (the node has children).
    pub clickable: bool,
    /// Hover text: `path\nweight`.
    pub tooltip: String,
}

/// One label.
#[derive(Clone, Debug)]
pub struct LabelElement {
    /// Node the label is bound to.
    pub node: NodeId,
    /// Display text.
    pub text: String,
    /// Where the label sits.
    pub placement: LabelPlacement,
    /// Current opacity.
    pub opacity: f64,
}

/// Centre control that zooms out one level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackControl {
    /// Shown only while zoomed in.
    pub visible: bool,
    /// Node activated by the control (parent of the focus).
    pub target: Option<NodeId>,
}

impl BackControl {
    /// Icon plus caption, in centered chart coordinates.
    pub fn hit_area(&self) -> Rect {
        let half = BACK_ICON_SIZE / 2.0;
        Rect::new(-half, -half, half, BACK_TEXT_DY)
    }
}

/// Retained scene for one instant of a [`View`].
///
/// Wedges and labels are in breadth-first order with the root omitted, so later elements paint
/// over earlier ones.
#[derive(Clone, Debug)]
pub struct Scene {
    /// Output surface.
    pub viewport: Viewport,
    /// Font size for labels and the back caption.
    pub font_size: f64,
    /// Wedges in paint order.
    pub wedges: Vec<WedgeElement>,
    /// Labels in paint order.
    pub labels: Vec<LabelElement>,
    /// Back control state.
    pub back: BackControl,
}

impl Scene {
    /// Topmost interactive wedge containing `point` (centered coordinates).
    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        self.wedges
            .iter()
            .rev()
            .find(|w| w.interactive && w.path.contains(point))
            .map(|w| w.node)
    }

    /// Whether `point` (centered coordinates) lands on a visible back control.
    pub fn back_hit(&self, point: Point) -> bool {
        self.back.visible && self.back.hit_area().contains(point)
    }
}

/// Builds [`Scene`]s from a [`View`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SceneRenderer;

impl SceneRenderer {
    /// Snapshot the current animation state of `view`.
    pub fn render(view: &View) -> Scene {
        let tree = view.tree();
        let state = view.state();
        let arcs = view.arcs();

        let mut wedges = Vec::with_capacity(tree.len().saturating_sub(1));
        let mut labels = Vec::with_capacity(tree.len().saturating_sub(1));
        for node in tree.descendants().skip(1) {
            let nv = state.get(node.id);
            wedges.push(WedgeElement {
                node: node.id,
                path: arcs.wedge(&nv.current),
                fill: view.colors().color_of(node.id),
                fill_opacity: nv.arc_opacity,
                interactive: nv.interactive,
                clickable: !node.is_leaf(),
                tooltip: format!(
                    "{}\n{}",
                    tree.path_names(node.id),
                    format_thousands(node.value)
                ),
            });
            labels.push(LabelElement {
                node: node.id,
                text: node.name.clone(),
                placement: LabelPlacement::for_bounds(&nv.current, arcs.radius()),
                opacity: nv.label_opacity,
            });
        }

        Scene {
            viewport: view.config().viewport(),
            font_size: view.config().font_size,
            wedges,
            labels,
            back: BackControl {
                visible: view.back_visible(),
                target: view.back_target(),
            },
        }
    }
}

/// Integer with `,` thousands separators, rounded half away from zero.
pub(crate) fn format_thousands(v: f64) -> String {
    let n = v.round();
    let digits = format!("{:.0}", n.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
