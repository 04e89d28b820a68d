use std::time::Duration;

use base64::Engine as _;

use super::*;
use crate::hierarchy::raw::RawNode;
use crate::view::View;

fn view(name: &str) -> View {
    View::from_raw(
        &RawNode::branch(
            "root",
            vec![
                RawNode::branch(
                    name,
                    vec![RawNode::leaf("x", 1500.0), RawNode::leaf("y", 500.0)],
                ),
                RawNode::leaf("other", 1000.0),
            ],
        ),
        SunburstConfig::default(),
    )
    .unwrap()
}

#[test]
fn document_uses_centered_view_box() {
    let v = view("A");
    let svg = to_svg(&v.scene(), v.config());
    assert!(svg.starts_with("<svg "));
    assert!(svg.contains("viewBox=\"-464 -464 928 928\""));
    assert!(svg.contains("width=\"928\" height=\"928\""));
    assert!(svg.contains("font-family=\"sans-serif\" font-size=\"7.5\""));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn one_path_per_non_root_node() {
    let v = view("A");
    let svg = to_svg(&v.scene(), v.config());
    assert_eq!(svg.matches("<path ").count(), v.tree().len() - 1);
    assert_eq!(svg.matches("<title>").count(), v.tree().len() - 1);
    assert!(svg.contains("<title>root/A\n2,000</title>"));
    assert!(svg.contains("fill-opacity=\"0.6\" pointer-events=\"auto\" cursor=\"pointer\""));
    assert!(svg.contains("fill-opacity=\"0.4\" pointer-events=\"auto\" d="));
}

#[test]
fn labels_group_attributes() {
    let v = view("A");
    let svg = to_svg(&v.scene(), v.config());
    assert!(svg.contains("<g pointer-events=\"none\" text-anchor=\"middle\""));
    assert_eq!(svg.matches("dy=\"0.35em\"").count(), v.tree().len() - 1);
}

#[test]
fn names_are_escaped() {
    let v = view("R&D <\"core\">");
    let svg = to_svg(&v.scene(), v.config());
    assert!(svg.contains(">R&amp;D &lt;&quot;core&quot;&gt;</text>"));
    assert!(svg.contains("<title>root/R&amp;D &lt;&quot;core&quot;&gt;\n2,000</title>"));
    assert!(!svg.contains("R&D"));
}

#[test]
fn back_control_only_when_zoomed() {
    let mut v = view("A");
    let svg = to_svg(&v.scene(), v.config());
    assert!(!svg.contains("<image"));
    assert!(!svg.contains(">Back</text>"));

    v.activate_path("root/A", Duration::ZERO).unwrap();
    v.finish();
    let svg = to_svg(&v.scene(), v.config());
    assert!(svg.contains("x=\"-8\" y=\"-8\" width=\"16\" height=\"16\""));
    assert!(svg.contains("<text text-anchor=\"middle\" dy=\"18\">Back</text>"));
    assert!(svg.contains(&back_icon_data_uri()));
}

#[test]
fn back_icon_round_trips_through_base64() {
    let uri = back_icon_data_uri();
    let payload = uri.strip_prefix("data:image/svg+xml;base64,").unwrap();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .unwrap();
    assert_eq!(bytes, BACK_ICON_SVG.as_bytes());
}

#[test]
fn escape_covers_markup_characters() {
    assert_eq!(escape_xml("a<b>&'\""), "a&lt;b&gt;&amp;&apos;&quot;");
}
