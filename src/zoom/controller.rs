use std::time::Duration;

use crate::{
    animation::tween::{Tween, TransitionClock},
    eval::visibility::VisibilityPolicy,
    foundation::config::TransitionConfig,
    foundation::core::{ArcBounds, NodeId},
    foundation::error::{SunburstError, SunburstResult},
    hierarchy::tree::Hierarchy,
    layout::partition::Layout,
    zoom::state::ViewState,
};

/// Result of a pointer activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomOutcome {
    /// Focus moved to `focus` and a transition started.
    Zoomed {
        /// New focus root.
        focus: NodeId,
    },
    /// Nothing changed (leaf, empty wedge, or back with nothing to go back to).
    Ignored,
}

/// Read-only collaborators the controller needs to compute targets.
#[derive(Clone, Copy, Debug)]
pub struct ZoomCtx<'a> {
    /// Tree shape.
    pub tree: &'a Hierarchy,
    /// Base partition.
    pub layout: &'a Layout,
    /// Visibility rules for the new targets.
    pub policy: &'a VisibilityPolicy,
}

#[derive(Clone, Debug)]
struct NodeTweens {
    geometry: Tween<ArcBounds>,
    arc_opacity: Option<Tween<f64>>,
    label_opacity: Option<Tween<f64>>,
}

#[derive(Clone, Debug)]
struct ZoomTransition {
    clock: TransitionClock,
    tweens: Vec<NodeTweens>,
}

impl ZoomTransition {
    fn apply(&self, state: &mut ViewState, e: f64) {
        for (i, tw) in self.tweens.iter().enumerate() {
            let view = state.get_mut(NodeId(i as u32));
            view.current = tw.geometry.sample(e);
            if let Some(a) = &tw.arc_opacity {
                view.arc_opacity = a.sample(e);
            }
            if let Some(l) = &tw.label_opacity {
                view.label_opacity = l.sample(e);
            }
        }
    }
}

/// Tracks the focus root and drives the re-rooting transition.
///
/// A new activation samples the in-flight transition at the activation time and starts the next
/// one from there, so rendered geometry never jumps when zooms arrive in quick succession.
#[derive(Clone, Debug)]
pub struct ZoomController {
    root: NodeId,
    focus: NodeId,
    transition: Option<ZoomTransition>,
    config: TransitionConfig,
}

impl ZoomController {
    /// Controller focused on the root of `tree`.
    pub fn new(tree: &Hierarchy, config: TransitionConfig) -> Self {
        Self {
            root: tree.root_id(),
            focus: tree.root_id(),
            transition: None,
            config,
        }
    }

    /// Current focus root.
    pub fn focus(&self) -> NodeId {
        self.focus
    }

    /// Whether the back control is shown.
    pub fn back_visible(&self) -> bool {
        self.focus != self.root
    }

    /// Node the back control zooms to, if shown.
    pub fn back_target(&self, tree: &Hierarchy) -> Option<NodeId> {
        if !self.back_visible() {
            return None;
        }
        tree.get(self.focus).and_then(|n| n.parent)
    }

    /// Whether a transition is in flight.
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Re-root the view on `p` at host time `now`.
    ///
    /// Leaves and wedges with an empty angular span are ignored. Unknown ids are a
    /// [`SunburstError::Validation`].
    #[tracing::instrument(skip(self, ctx, state))]
    pub fn activate(
        &mut self,
        ctx: ZoomCtx<'_>,
        state: &mut ViewState,
        p: NodeId,
        now: Duration,
    ) -> SunburstResult<ZoomOutcome> {
        let Some(focus) = ctx.tree.get(p) else {
            return Err(SunburstError::validation(format!(
                "unknown node id {}",
                p.0
            )));
        };
        if focus.is_leaf() {
            tracing::debug!(node = %focus.name, "ignoring activation of leaf");
            return Ok(ZoomOutcome::Ignored);
        }
        let focus_bounds = ctx.layout.bounds(p);
        if !(focus_bounds.angular_span() > 0.0) {
            tracing::debug!(node = %focus.name, "ignoring activation of empty wedge");
            return Ok(ZoomOutcome::Ignored);
        }

        self.tick(state, now);
        self.focus = p;

        let tweens = ctx
            .tree
            .descendants()
            .map(|d| {
                let view = state.get_mut(d.id);
                let target = ctx.layout.bounds(d.id).renormalize(focus_bounds, focus.depth);
                view.target = target;

                let arc_visible = ctx.policy.arc_visible(&target);
                // Hidden targets never take pointer events, even when they skip the fade.
                view.interactive = arc_visible;
                let arc_opacity = (view.arc_opacity != 0.0 || arc_visible).then(|| {
                    Tween::new(
                        view.arc_opacity,
                        ctx.policy.arc_opacity(&target, !d.is_leaf()),
                    )
                });
                let label_opacity = (view.label_opacity != 0.0
                    || ctx.policy.label_visible(&target))
                .then(|| Tween::new(view.label_opacity, ctx.policy.label_opacity(&target)));

                NodeTweens {
                    geometry: Tween::new(view.current, target),
                    arc_opacity,
                    label_opacity,
                }
            })
            .collect();

        self.transition = Some(ZoomTransition {
            clock: TransitionClock::new(now, self.config.duration(), self.config.ease),
            tweens,
        });
        self.tick(state, now);

        tracing::debug!(focus = %focus.name, "zoom started");
        Ok(ZoomOutcome::Zoomed { focus: p })
    }

    /// Zoom out to the parent of the current focus. Ignored at the root.
    pub fn back(
        &mut self,
        ctx: ZoomCtx<'_>,
        state: &mut ViewState,
        now: Duration,
    ) -> SunburstResult<ZoomOutcome> {
        match self.back_target(ctx.tree) {
            Some(parent) => self.activate(ctx, state, parent, now),
            None => Ok(ZoomOutcome::Ignored),
        }
    }

    /// Advance the in-flight transition to `now`. Returns whether it is still running.
    pub fn tick(&mut self, state: &mut ViewState, now: Duration) -> bool {
        let Some(tr) = &self.transition else {
            return false;
        };
        tr.apply(state, tr.clock.eased(now));
        if tr.clock.is_finished(now) {
            self.transition = None;
            return false;
        }
        true
    }

    /// Jump the in-flight transition to its end state.
    pub fn finish(&mut self, state: &mut ViewState) {
        if let Some(tr) = self.transition.take() {
            tr.apply(state, 1.0);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/zoom/controller.rs"]
mod tests;
