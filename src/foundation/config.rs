use std::path::Path;

use anyhow::Context as _;

use crate::{
    animation::ease::Ease,
    eval::visibility::VisibilityPolicy,
    foundation::core::Viewport,
    foundation::error::{SunburstError, SunburstResult},
    geometry::arc::ArcConfig,
    style::color::ColorDef,
};

/// Complete view configuration.
///
/// Every field has a default, so a JSON document only needs to list the values it overrides:
///
/// ```json
/// { "size": 640, "transition": { "duration_ms": 400 } }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SunburstConfig {
    /// Side of the square viewport in logical units.
    pub size: f64,
    /// Band radius is `size / radius_divisor`.
    pub radius_divisor: f64,
    /// Font size for labels and the back control.
    pub font_size: f64,
    /// CSS font family for labels and the back control.
    pub font_family: String,
    /// Wedge padding.
    pub arc: ArcConfig,
    /// Visible band window, label threshold and wedge opacities.
    pub visibility: VisibilityPolicy,
    /// Zoom transition timing.
    pub transition: TransitionConfig,
    /// Color palette.
    pub style: StyleConfig,
}

impl Default for SunburstConfig {
    fn default() -> Self {
        Self {
            size: 928.0,
            radius_divisor: 12.0,
            font_size: 7.5,
            font_family: "sans-serif".to_owned(),
            arc: ArcConfig::default(),
            visibility: VisibilityPolicy::default(),
            transition: TransitionConfig::default(),
            style: StyleConfig::default(),
        }
    }
}

/// Timing of zoom transitions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Transition length in milliseconds. `0` applies zooms instantly.
    pub duration_ms: u64,
    /// Easing applied to normalized transition time.
    pub ease: Ease,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration_ms: 750,
            ease: Ease::InOutCubic,
        }
    }
}

impl TransitionConfig {
    /// Duration as a [`std::time::Duration`].
    pub fn duration(self) -> std::time::Duration {
        std::time::Duration::from_millis(self.duration_ms)
    }
}

/// Branch coloring.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Explicit branch colors. Empty means "sample the rainbow ramp".
    pub palette: Vec<ColorDef>,
}

impl SunburstConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json_str(s: &str) -> SunburstResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| SunburstError::serde(format!("config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a configuration JSON file.
    pub fn from_path(path: &Path) -> SunburstResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Logical viewport.
    pub fn viewport(&self) -> Viewport {
        Viewport::square(self.size)
    }

    /// Radius of one band in logical units.
    pub fn radius(&self) -> f64 {
        self.size / self.radius_divisor
    }

    /// Check static invariants.
    pub fn validate(&self) -> SunburstResult<()> {
        fn positive(name: &str, v: f64) -> SunburstResult<()> {
            if !v.is_finite() || v <= 0.0 {
                return Err(SunburstError::validation(format!(
                    "{name} must be finite and > 0 (got {v})"
                )));
            }
            Ok(())
        }
        fn non_negative(name: &str, v: f64) -> SunburstResult<()> {
            if !v.is_finite() || v < 0.0 {
                return Err(SunburstError::validation(format!(
                    "{name} must be finite and >= 0 (got {v})"
                )));
            }
            Ok(())
        }
        fn unit(name: &str, v: f64) -> SunburstResult<()> {
            if !(0.0..=1.0).contains(&v) {
                return Err(SunburstError::validation(format!(
                    "{name} must be in [0, 1] (got {v})"
                )));
            }
            Ok(())
        }

        positive("size", self.size)?;
        positive("radius_divisor", self.radius_divisor)?;
        positive("font_size", self.font_size)?;
        if self.font_family.trim().is_empty() {
            return Err(SunburstError::validation("font_family must not be empty"));
        }
        non_negative("arc.pad_angle_cap", self.arc.pad_angle_cap)?;
        non_negative("arc.pad_radius_factor", self.arc.pad_radius_factor)?;

        let vis = &self.visibility;
        non_negative("visibility.band_min", vis.band_min)?;
        positive("visibility.band_max", vis.band_max)?;
        if vis.band_min >= vis.band_max {
            return Err(SunburstError::validation(
                "visibility.band_min must be < visibility.band_max",
            ));
        }
        non_negative(
            "visibility.label_area_threshold",
            vis.label_area_threshold,
        )?;
        unit("visibility.internal_opacity", vis.internal_opacity)?;
        unit("visibility.leaf_opacity", vis.leaf_opacity)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
