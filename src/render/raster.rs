use std::{path::Path, sync::Arc};

use anyhow::Context as _;

use crate::foundation::error::{SunburstError, SunburstResult};

/// Straight-alpha RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes, row-major.
    pub data: Vec<u8>,
}

/// SVG rasterizer with a system font database, reused across frames.
pub struct Rasterizer {
    options: usvg::Options<'static>,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    /// Load system fonts once.
    pub fn new() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");
        Self {
            options: usvg::Options {
                fontdb: Arc::new(db),
                ..Default::default()
            },
        }
    }

    /// Render `svg` into a `size`×`size` image, scaling its viewport to fit, over `background`
    /// when given.
    pub fn rasterize(
        &self,
        svg: &str,
        size: u32,
        background: Option<[u8; 4]>,
    ) -> SunburstResult<RasterImage> {
        if size == 0 {
            return Err(SunburstError::render("raster size must be > 0"));
        }
        let tree = usvg::Tree::from_str(svg, &self.options)
            .map_err(|e| SunburstError::render(format!("parse svg: {e}")))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)
            .ok_or_else(|| SunburstError::render("failed to allocate pixmap"))?;
        if let Some([r, g, b, a]) = background {
            pixmap.fill(resvg::tiny_skia::Color::from_rgba8(r, g, b, a));
        }

        let sx = (size as f32) / tree.size().width();
        let sy = (size as f32) / tree.size().height();
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(sx, sy),
            &mut pixmap.as_mut(),
        );

        let data = pixmap
            .pixels()
            .iter()
            .flat_map(|px| {
                let c = px.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();

        Ok(RasterImage {
            width: size,
            height: size,
            data,
        })
    }
}

/// Write `image` to `path` as PNG, creating parent directories.
pub fn write_png(image: &RasterImage, path: &Path) -> SunburstResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &image.data,
        image.width,
        image.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// One-shot helper: rasterize `svg` at `size` on white and write it to `path`.
pub fn rasterize_png(svg: &str, size: u32, path: &Path) -> SunburstResult<()> {
    let image = Rasterizer::new().rasterize(svg, size, Some([255, 255, 255, 255]))?;
    write_png(&image, path)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
