use base64::Engine as _;

use crate::{
    eval::visibility::fmt_num,
    foundation::config::SunburstConfig,
    render::scene::{BACK_ICON_SIZE, BACK_TEXT_DY, Scene},
};

const BACK_ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" height="16" width="16" viewBox="0 0 512 512"><path opacity="1" fill="#1E3050" d="M41.4 233.4c-12.5 12.5-12.5 32.8 0 45.3l160 160c12.5 12.5 32.8 12.5 45.3 0s12.5-32.8 0-45.3L109.3 256 246.6 118.6c12.5-12.5 12.5-32.8 0-45.3s-32.8-12.5-45.3 0l-160 160zm352-160l-160 160c-12.5 12.5-12.5 32.8 0 45.3l160 160c12.5 12.5 32.8 12.5 45.3 0s12.5-32.8 0-45.3L301.3 256 438.6 118.6c12.5-12.5 12.5-32.8 0-45.3s-32.8-12.5-45.3 0z"/></svg>"##;

/// Back icon as a `data:` URI.
pub fn back_icon_data_uri() -> String {
    format!(
        "data:image/svg+xml;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(BACK_ICON_SVG)
    )
}

/// Serialize `scene` as a standalone SVG document.
///
/// The coordinate system is centered: `viewBox` is `[-w/2, -h/2, w, w]`.
pub fn to_svg(scene: &Scene, config: &SunburstConfig) -> String {
    let w = scene.viewport.width;
    let h = scene.viewport.height;
    let bounds = scene.viewport.rect();
    let font_family = escape_xml(&config.font_family);

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" \
         width=\"{}\" height=\"{}\" viewBox=\"{} {} {} {}\" font-family=\"{}\" font-size=\"{}\">\n",
        fmt_num(w),
        fmt_num(h),
        fmt_num(bounds.x0),
        fmt_num(bounds.y0),
        fmt_num(bounds.width()),
        fmt_num(bounds.width()),
        font_family,
        fmt_num(scene.font_size),
    ));

    svg.push_str("  <g>\n");
    for wedge in &scene.wedges {
        svg.push_str(&format!(
            "    <path fill=\"{}\" fill-opacity=\"{}\" pointer-events=\"{}\"{} d=\"{}\"><title>{}</title></path>\n",
            wedge.fill.to_css(),
            fmt_num(wedge.fill_opacity),
            if wedge.interactive { "auto" } else { "none" },
            if wedge.clickable { " cursor=\"pointer\"" } else { "" },
            wedge.path.to_svg(),
            escape_xml(&wedge.tooltip),
        ));
    }
    svg.push_str("  </g>\n");

    svg.push_str("  <g pointer-events=\"none\" text-anchor=\"middle\" style=\"user-select: none;\">\n");
    for label in &scene.labels {
        svg.push_str(&format!(
            "    <text dy=\"0.35em\" fill-opacity=\"{}\" transform=\"{}\">{}</text>\n",
            fmt_num(label.opacity),
            label.placement.to_svg_transform(),
            escape_xml(&label.text),
        ));
    }
    svg.push_str("  </g>\n");

    if scene.back.visible {
        let half = BACK_ICON_SIZE / 2.0;
        svg.push_str("  <g pointer-events=\"all\" cursor=\"pointer\">\n");
        svg.push_str(&format!(
            "    <image xlink:href=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/>\n",
            back_icon_data_uri(),
            fmt_num(-half),
            fmt_num(-half),
            fmt_num(BACK_ICON_SIZE),
            fmt_num(BACK_ICON_SIZE),
        ));
        svg.push_str(&format!(
            "    <text text-anchor=\"middle\" dy=\"{}\">Back</text>\n",
            fmt_num(BACK_TEXT_DY)
        ));
        svg.push_str("  </g>\n");
    }

    svg.push_str("</svg>\n");
    svg
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
