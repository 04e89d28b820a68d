//! Zoomable sunburst charts.
//!
//! A weighted tree is validated into an arena [`Hierarchy`], laid out as a radial partition, and
//! wrapped in a [`View`] that re-roots on activation with an animated transition. The view is
//! rendered to a retained [`Scene`], which serializes to SVG and rasterizes to PNG:
//!
//! - Build a [`View`] from a [`RawNode`] tree (or parent-linked [`FlatNode`] rows)
//! - Drive it with [`View::activate`], [`View::back`], [`View::click`] and [`View::tick`]
//! - Emit [`View::to_svg`] or hand the SVG to a [`Rasterizer`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod eval;
pub(crate) mod geometry;
pub(crate) mod hierarchy;
pub(crate) mod layout;
pub(crate) mod render;
pub(crate) mod style;
pub(crate) mod view;
pub(crate) mod zoom;

pub use crate::foundation::config::{StyleConfig, SunburstConfig, TransitionConfig};
pub use crate::foundation::core::{
    Affine, ArcBounds, BezPath, NodeId, Point, Rect, Vec2, Viewport,
};
pub use crate::foundation::error::{SunburstError, SunburstResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::tween::{Lerp, TransitionClock, Tween};
pub use crate::eval::visibility::{LabelPlacement, VisibilityPolicy};
pub use crate::geometry::arc::{ArcConfig, ArcGenerator};
pub use crate::hierarchy::builder::{build_hierarchy, build_hierarchy_from_flat};
pub use crate::hierarchy::raw::{FlatNode, RawNode};
pub use crate::hierarchy::tree::{Ancestors, Hierarchy, Node};
pub use crate::layout::partition::Layout;
pub use crate::render::raster::{RasterImage, Rasterizer, rasterize_png, write_png};
pub use crate::render::scene::{
    BACK_ICON_SIZE, BACK_TEXT_DY, BackControl, LabelElement, Scene, SceneRenderer, WedgeElement,
};
pub use crate::render::svg::{back_icon_data_uri, to_svg};
pub use crate::style::color::{ColorAssigner, ColorDef, quantize_rainbow, rainbow};
pub use crate::view::View;
pub use crate::zoom::controller::{ZoomController, ZoomCtx, ZoomOutcome};
pub use crate::zoom::state::{NodeView, ViewState};
