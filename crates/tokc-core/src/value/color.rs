//! Color values with normalized float components.

use serde_json::Value;

use super::{field, in_range, number, object};
use crate::error::ValueError;

/// Color spaces whose components are bounded to `[0, 1]`.
const RGB_SPACES: [&str; 6] = [
    "srgb",
    "srgb-linear",
    "display-p3",
    "a98-rgb",
    "prophoto-rgb",
    "rec2020",
];

/// Spaces with unbounded components, rendered through CSS `color()` or their
/// own functional notation.
const OTHER_SPACES: [&str; 6] = ["xyz-d50", "xyz-d65", "lab", "lch", "oklab", "oklch"];

/// A color in an explicit color space.
#[derive(Debug, Clone, PartialEq)]
pub struct Color {
    /// A CSS color space name such as `srgb` or `oklch`.
    pub color_space: String,
    /// Channel values in the space's own ranges.
    pub components: [f64; 3],
    /// 0 to 1; 1 is opaque.
    pub alpha: f64,
}

impl Color {
    /// Validated constructor.
    pub fn new(color_space: &str, components: [f64; 3], alpha: f64) -> Result<Self, ValueError> {
        let bounded = RGB_SPACES.contains(&color_space);
        if !bounded && !OTHER_SPACES.contains(&color_space) {
            return Err(ValueError::InvalidColor {
                detail: format!("unsupported color space '{color_space}'"),
            });
        }
        for (i, c) in components.iter().enumerate() {
            if !c.is_finite() {
                return Err(ValueError::InvalidColor {
                    detail: format!("component {i} is not finite"),
                });
            }
            if bounded {
                in_range(*c, &format!("components[{i}]"), 0.0, 1.0)?;
            }
        }
        in_range(alpha, "alpha", 0.0, 1.0)?;
        Ok(Self {
            color_space: color_space.to_string(),
            components,
            alpha,
        })
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` into sRGB.
    pub fn from_hex(hex: &str) -> Result<Self, ValueError> {
        let digits = hex.strip_prefix('#').ok_or_else(|| ValueError::InvalidColor {
            detail: format!("'{hex}' is not a hex color"),
        })?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValueError::InvalidColor {
                detail: format!("'{hex}' contains non-hex digits"),
            });
        }
        let expanded: String = match digits.len() {
            3 | 4 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => digits.to_string(),
            n => {
                return Err(ValueError::InvalidColor {
                    detail: format!("'{hex}' has {n} digits (expected 3, 4, 6 or 8)"),
                })
            }
        };
        let channel = |i: usize| -> f64 {
            // Digits were checked above.
            let byte = u8::from_str_radix(&expanded[i * 2..i * 2 + 2], 16).unwrap_or(0);
            f64::from(byte) / 255.0
        };
        let alpha = if expanded.len() == 8 { channel(3) } else { 1.0 };
        Self::new("srgb", [channel(0), channel(1), channel(2)], alpha)
    }

    pub(crate) fn from_json(raw: &Value, notes: &mut Vec<String>) -> Result<Self, ValueError> {
        if let Some(s) = raw.as_str() {
            let color = Self::from_hex(s)?;
            notes.push(format!("hex color string '{s}' is deprecated; use {{colorSpace, components}}"));
            return Ok(color);
        }
        let obj = object(raw, "color object")?;
        let space = field(obj, "colorSpace")?
            .as_str()
            .ok_or_else(|| ValueError::InvalidColor {
                detail: "colorSpace must be a string".into(),
            })?;
        let components = field(obj, "components")?
            .as_array()
            .ok_or_else(|| ValueError::InvalidColor {
                detail: "components must be an array".into(),
            })?;
        let values = components
            .iter()
            .enumerate()
            .map(|(i, c)| number(c, &format!("components[{i}]")))
            .collect::<Result<Vec<f64>, _>>()?;

        let (rgb, embedded_alpha) = match values.as_slice() {
            [r, g, b] => ([*r, *g, *b], None),
            [r, g, b, a] => ([*r, *g, *b], Some(*a)),
            other => {
                return Err(ValueError::InvalidColor {
                    detail: format!("expected 3 or 4 components, found {}", other.len()),
                })
            }
        };
        let alpha = match (obj.get("alpha"), embedded_alpha) {
            (Some(a), _) => number(a, "alpha")?,
            (None, Some(a)) => a,
            (None, None) => 1.0,
        };
        Self::new(space, rgb, alpha)
    }

    /// Whether the color space is addressed through CSS `color()`.
    pub fn uses_color_function(&self) -> bool {
        RGB_SPACES.contains(&self.color_space.as_str()) || self.color_space.starts_with("xyz")
    }

    pub fn is_opaque(&self) -> bool {
        self.alpha >= 1.0
    }
}
