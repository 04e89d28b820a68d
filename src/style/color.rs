use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::{
    foundation::config::StyleConfig, foundation::core::NodeId, hierarchy::tree::Hierarchy,
};

/// Straight-alpha RGBA color with channels in `[0, 1]`.
///
/// Deserializes from the notations the chart itself emits, `"#RGB"`, `"#RRGGBB"` and
/// `"rgb(r, g, b)"` with byte channels, or from a unit-range channel array `[r, g, b, a?]`.
/// Serializes as the four-element array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorDef {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
    /// Alpha.
    pub a: f64,
}

impl ColorDef {
    /// Build from channels.
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from byte channels.
    pub fn from_rgb8([r, g, b]: [u8; 3]) -> Self {
        Self::rgba(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            1.0,
        )
    }

    /// Channels as clamped, rounded bytes `[r, g, b]`.
    pub fn to_rgb8(self) -> [u8; 3] {
        fn to_u8(x: f64) -> u8 {
            if x.is_nan() {
                return 0;
            }
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [to_u8(self.r), to_u8(self.g), to_u8(self.b)]
    }

    /// CSS functional notation, `rgb(r, g, b)`.
    pub fn to_css(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("rgb({r}, {g}, {b})")
    }

    /// Parse `#RGB`, `#RRGGBB` or `rgb(r, g, b)`. The result is opaque.
    pub fn parse_css(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex_digits(hex).map(Self::from_rgb8);
        }
        if let Some(args) = s
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_rgb_args(args).map(Self::from_rgb8);
        }
        Err(format!(
            "unsupported color \"{s}\" (expected #RGB, #RRGGBB or rgb(r, g, b))"
        ))
    }
}

impl Serialize for ColorDef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        [self.r, self.g, self.b, self.a].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ColorDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Notation {
            Css(String),
            Channels(Vec<f64>),
        }

        match Notation::deserialize(deserializer)? {
            Notation::Css(s) => Self::parse_css(&s).map_err(serde::de::Error::custom),
            Notation::Channels(v) => match v[..] {
                [r, g, b] => Ok(Self::rgba(r, g, b, 1.0)),
                [r, g, b, a] => Ok(Self::rgba(r, g, b, a)),
                _ => Err(serde::de::Error::custom(format!(
                    "color channel array has {} entries, want 3 or 4",
                    v.len()
                ))),
            },
        }
    }
}

fn parse_hex_digits(hex: &str) -> Result<[u8; 3], String> {
    let nibbles = hex
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<Vec<u8>>>()
        .ok_or_else(|| format!("invalid hex digits in \"#{hex}\""))?;
    match nibbles[..] {
        // Short form doubles each digit: #f80 is #ff8800.
        [r, g, b] => Ok([r * 17, g * 17, b * 17]),
        [r1, r0, g1, g0, b1, b0] => Ok([r1 << 4 | r0, g1 << 4 | g0, b1 << 4 | b0]),
        _ => Err(format!("hex color \"#{hex}\" must have 3 or 6 digits")),
    }
}

fn parse_rgb_args(args: &str) -> Result<[u8; 3], String> {
    let channels = args
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<u8>()
                .map_err(|_| format!("rgb channel \"{}\" is not an integer in 0..=255", part.trim()))
        })
        .collect::<Result<Vec<u8>, String>>()?;
    match channels[..] {
        [r, g, b] => Ok([r, g, b]),
        _ => Err(format!("rgb() takes 3 channels, got {}", channels.len())),
    }
}

/// Cubehelix color (Green 2011) with hue in degrees, to straight RGB.
fn cubehelix(h: f64, s: f64, l: f64) -> ColorDef {
    const A: f64 = -0.14861;
    const B: f64 = 1.78277;
    const C: f64 = -0.29227;
    const D: f64 = -0.90649;
    const E: f64 = 1.97294;

    let h = (h + 120.0) * PI / 180.0;
    let amp = s * l * (1.0 - l);
    let (sin_h, cos_h) = h.sin_cos();
    ColorDef::rgba(
        l + amp * (A * cos_h + B * sin_h),
        l + amp * (C * cos_h + D * sin_h),
        l + amp * (E * cos_h),
        1.0,
    )
}

/// Cyclic rainbow ramp: a cubehelix sweep whose ends meet at `t = 0` and `t = 1`.
pub fn rainbow(t: f64) -> ColorDef {
    let t = if (0.0..=1.0).contains(&t) {
        t
    } else {
        t - t.floor()
    };
    let ts = (t - 0.5).abs();
    cubehelix(360.0 * t - 100.0, 1.5 - 1.5 * ts, 0.8 - 0.9 * ts)
}

/// `n` evenly spaced samples of [`rainbow`], from `t = 0` to `t = 1` inclusive.
pub fn quantize_rainbow(n: usize) -> Vec<ColorDef> {
    match n {
        0 => Vec::new(),
        1 => vec![rainbow(0.0)],
        _ => (0..n)
            .map(|i| rainbow(i as f64 / (n - 1) as f64))
            .collect(),
    }
}

/// Maps every node to the color of its top-level branch.
///
/// With `N` top-level branches the ramp is sampled `N + 1` times so the first and last branch do
/// not share the hue the cyclic ramp repeats at `t = 1`. Computed once per tree.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorAssigner {
    palette: Vec<ColorDef>,
    per_node: Vec<usize>,
}

impl ColorAssigner {
    /// Assign branch colors for `tree`.
    pub fn new(tree: &Hierarchy, style: &StyleConfig) -> Self {
        let branches = tree.children(tree.root_id());
        let palette = if style.palette.is_empty() {
            quantize_rainbow(branches.len() + 1)
        } else {
            style.palette.clone()
        };

        let spare = branches.len() % palette.len();
        let mut per_node = vec![spare; tree.len()];
        for node in tree.descendants() {
            per_node[node.id.index()] = match node.depth {
                0 => spare,
                1 => {
                    let rank = branches.iter().position(|&b| b == node.id).unwrap_or(0);
                    rank % palette.len()
                }
                _ => node.parent.map(|p| per_node[p.index()]).unwrap_or(spare),
            };
        }

        Self { palette, per_node }
    }

    /// Palette in branch order.
    pub fn palette(&self) -> &[ColorDef] {
        &self.palette
    }

    /// Color of `id`'s top-level branch. The root, never drawn, gets the spare entry.
    pub fn color_of(&self, id: NodeId) -> ColorDef {
        let slot = self.per_node.get(id.index()).copied().unwrap_or(0);
        self.palette[slot]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/color.rs"]
mod tests;
