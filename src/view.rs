use std::time::Duration;

use crate::{
    foundation::config::SunburstConfig,
    foundation::core::{NodeId, Point},
    foundation::error::{SunburstError, SunburstResult},
    geometry::arc::ArcGenerator,
    hierarchy::builder::{build_hierarchy, build_hierarchy_from_flat},
    hierarchy::raw::{FlatNode, RawNode},
    hierarchy::tree::Hierarchy,
    layout::partition::Layout,
    render::scene::{Scene, SceneRenderer},
    render::svg,
    style::color::ColorAssigner,
    zoom::controller::{ZoomController, ZoomCtx, ZoomOutcome},
    zoom::state::ViewState,
};

/// An interactive sunburst: immutable tree and layout plus the animated view state.
///
/// The host owns the clock. Every mutating call takes `now`, an offset from any fixed epoch, and
/// [`View::tick`] advances the in-flight transition between frames.
#[derive(Clone, Debug)]
pub struct View {
    config: SunburstConfig,
    tree: Hierarchy,
    layout: Layout,
    colors: ColorAssigner,
    arcs: ArcGenerator,
    state: ViewState,
    zoom: ZoomController,
}

impl View {
    /// Lay out `tree` and set up a view focused on its root.
    #[tracing::instrument(skip_all, fields(nodes = tree.len()))]
    pub fn new(tree: Hierarchy, config: SunburstConfig) -> SunburstResult<Self> {
        config.validate()?;
        let layout = Layout::partition(&tree);
        let colors = ColorAssigner::new(&tree, &config.style);
        let arcs = ArcGenerator::new(config.radius(), &config.arc);
        let state = ViewState::new(&tree, &layout, &config.visibility);
        let zoom = ZoomController::new(&tree, config.transition);
        Ok(Self {
            config,
            tree,
            layout,
            colors,
            arcs,
            state,
            zoom,
        })
    }

    /// Build the hierarchy from nested input, then [`View::new`].
    pub fn from_raw(raw: &RawNode, config: SunburstConfig) -> SunburstResult<Self> {
        Self::new(build_hierarchy(raw)?, config)
    }

    /// Build the hierarchy from parent-linked rows, then [`View::new`].
    pub fn from_flat(rows: &[FlatNode], config: SunburstConfig) -> SunburstResult<Self> {
        Self::new(build_hierarchy_from_flat(rows)?, config)
    }

    /// Active configuration.
    pub fn config(&self) -> &SunburstConfig {
        &self.config
    }

    /// Validated tree.
    pub fn tree(&self) -> &Hierarchy {
        &self.tree
    }

    /// Base partition.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Branch colors.
    pub fn colors(&self) -> &ColorAssigner {
        &self.colors
    }

    /// Wedge path generator.
    pub fn arcs(&self) -> &ArcGenerator {
        &self.arcs
    }

    /// Per-node animation state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Current focus root.
    pub fn focus(&self) -> NodeId {
        self.zoom.focus()
    }

    /// Whether the back control is shown.
    pub fn back_visible(&self) -> bool {
        self.zoom.back_visible()
    }

    /// Node the back control zooms to.
    pub fn back_target(&self) -> Option<NodeId> {
        self.zoom.back_target(&self.tree)
    }

    /// Whether a transition is in flight.
    pub fn is_animating(&self) -> bool {
        self.zoom.is_animating()
    }

    fn parts(&mut self) -> (ZoomCtx<'_>, &mut ViewState, &mut ZoomController) {
        (
            ZoomCtx {
                tree: &self.tree,
                layout: &self.layout,
                policy: &self.config.visibility,
            },
            &mut self.state,
            &mut self.zoom,
        )
    }

    /// Zoom into `id` starting at `now`.
    pub fn activate(&mut self, id: NodeId, now: Duration) -> SunburstResult<ZoomOutcome> {
        let (ctx, state, zoom) = self.parts();
        zoom.activate(ctx, state, id, now)
    }

    /// Zoom into the node named by a `/`-separated path such as `"flare/analytics"`.
    pub fn activate_path(&mut self, path: &str, now: Duration) -> SunburstResult<ZoomOutcome> {
        let id = self
            .tree
            .find_path(path)
            .ok_or_else(|| SunburstError::validation(format!("unknown node path '{path}'")))?;
        self.activate(id, now)
    }

    /// Zoom out one level starting at `now`.
    pub fn back(&mut self, now: Duration) -> SunburstResult<ZoomOutcome> {
        let (ctx, state, zoom) = self.parts();
        zoom.back(ctx, state, now)
    }

    /// Route a pointer activation at `point` (top-left-origin surface coordinates).
    ///
    /// The back control wins over wedges; points on nothing interactive are ignored.
    pub fn click(&mut self, point: Point, now: Duration) -> SunburstResult<ZoomOutcome> {
        self.tick(now);
        let scene = self.scene();
        let p = scene.viewport.to_centered(point);
        if scene.back_hit(p) {
            return self.back(now);
        }
        match scene.hit_test(p) {
            Some(id) => self.activate(id, now),
            None => Ok(ZoomOutcome::Ignored),
        }
    }

    /// Advance the animation to `now`. Returns whether it is still running.
    pub fn tick(&mut self, now: Duration) -> bool {
        self.zoom.tick(&mut self.state, now)
    }

    /// Jump to the end of the in-flight transition.
    pub fn finish(&mut self) {
        self.zoom.finish(&mut self.state);
    }

    /// Retained scene for the current state.
    pub fn scene(&self) -> Scene {
        SceneRenderer::render(self)
    }

    /// SVG document for the current state.
    pub fn to_svg(&self) -> String {
        svg::to_svg(&self.scene(), &self.config)
    }
}

#[cfg(test)]
#[path = "../tests/unit/view.rs"]
mod tests;
