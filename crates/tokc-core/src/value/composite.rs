//! Composite values built from aliasable sub-fields.

use serde_json::{Map, Value};

use super::scalar::font_family_from_json;
use super::{aliasable, field, number, object, Aliasable, Color, CubicBezier, Dimension, Duration, FontWeight};
use crate::error::ValueError;

/// `{color, width, style}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    pub color: Aliasable<Color>,
    pub width: Aliasable<Dimension>,
    pub style: Aliasable<StrokeStyle>,
}

impl Border {
    pub(crate) fn from_json(raw: &Value, notes: &mut Vec<String>) -> Result<Self, ValueError> {
        let obj = object(raw, "border object")?;
        Ok(Self {
            color: aliasable(field(obj, "color")?, notes, Color::from_json)?,
            width: aliasable(field(obj, "width")?, notes, Dimension::from_json)?,
            style: aliasable(field(obj, "style")?, notes, StrokeStyle::from_json)?,
        })
    }
}

/// `{duration, delay, timingFunction}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub duration: Aliasable<Duration>,
    pub delay: Aliasable<Duration>,
    pub timing_function: Aliasable<CubicBezier>,
}

impl Transition {
    pub(crate) fn from_json(raw: &Value, notes: &mut Vec<String>) -> Result<Self, ValueError> {
        let obj = object(raw, "transition object")?;
        Ok(Self {
            duration: aliasable(field(obj, "duration")?, notes, Duration::from_json)?,
            delay: aliasable(field(obj, "delay")?, notes, Duration::from_json)?,
            timing_function: aliasable(field(obj, "timingFunction")?, notes, |v, _| {
                CubicBezier::from_json(v)
            })?,
        })
    }
}

/// One layer of a (possibly multi-layer) shadow.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowLayer {
    pub color: Aliasable<Color>,
    pub offset_x: Aliasable<Dimension>,
    pub offset_y: Aliasable<Dimension>,
    pub blur: Aliasable<Dimension>,
    /// Zero when the source omits it.
    pub spread: Aliasable<Dimension>,
    /// Inner shadow rather than drop shadow.
    pub inset: bool,
}

impl ShadowLayer {
    fn from_json(raw: &Value, notes: &mut Vec<String>) -> Result<Self, ValueError> {
        let obj = object(raw, "shadow object")?;
        let spread = match obj.get("spread") {
            Some(v) => aliasable(v, notes, Dimension::from_json)?,
            None => Aliasable::Literal(Dimension::zero()),
        };
        let inset = match obj.get("inset") {
            None => false,
            Some(Value::Bool(b)) => *b,
            Some(other) => return Err(ValueError::expected("boolean inset", other)),
        };
        Ok(Self {
            color: aliasable(field(obj, "color")?, notes, Color::from_json)?,
            offset_x: aliasable(field(obj, "offsetX")?, notes, Dimension::from_json)?,
            offset_y: aliasable(field(obj, "offsetY")?, notes, Dimension::from_json)?,
            blur: aliasable(field(obj, "blur")?, notes, Dimension::from_json)?,
            spread,
            inset,
        })
    }
}

pub(crate) fn shadow_from_json(raw: &Value, notes: &mut Vec<String>) -> Result<Vec<ShadowLayer>, ValueError> {
    match raw {
        Value::Array(layers) if !layers.is_empty() => layers
            .iter()
            .map(|layer| ShadowLayer::from_json(layer, notes))
            .collect(),
        Value::Object(_) => Ok(vec![ShadowLayer::from_json(raw, notes)?]),
        other => Err(ValueError::expected("shadow object or non-empty array", other)),
    }
}

/// A color stop; `position` is a fraction of the gradient length.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientStop {
    pub color: Aliasable<Color>,
    pub position: Aliasable<f64>,
}

pub(crate) fn gradient_from_json(raw: &Value, notes: &mut Vec<String>) -> Result<Vec<GradientStop>, ValueError> {
    let stops = raw
        .as_array()
        .filter(|stops| !stops.is_empty())
        .ok_or_else(|| ValueError::expected("non-empty array of gradient stops", raw))?;
    stops
        .iter()
        .map(|stop| {
            let obj = object(stop, "gradient stop")?;
            let color = aliasable(field(obj, "color")?, notes, Color::from_json)?;
            let position = aliasable(field(obj, "position")?, notes, |v, notes| {
                let p = number(v, "position")?;
                let clamped = p.clamp(0.0, 1.0);
                if clamped != p {
                    notes.push(format!("gradient position {p} clamped to {clamped}"));
                }
                Ok(clamped)
            })?;
            Ok(GradientStop { color, position })
        })
        .collect()
}

/// Composite text style.
#[derive(Debug, Clone, PartialEq)]
pub struct Typography {
    pub font_family: Aliasable<Vec<String>>,
    pub font_size: Aliasable<Dimension>,
    pub font_weight: Aliasable<FontWeight>,
    /// Optional; the `font` shorthand has no slot for it.
    pub letter_spacing: Option<Aliasable<Dimension>>,
    /// Unitless multiple of the font size.
    pub line_height: Aliasable<f64>,
}

impl Typography {
    pub(crate) fn from_json(raw: &Value, notes: &mut Vec<String>) -> Result<Self, ValueError> {
        let obj: &Map<String, Value> = object(raw, "typography object")?;
        let letter_spacing = obj
            .get("letterSpacing")
            .map(|v| aliasable(v, notes, Dimension::from_json))
            .transpose()?;
        Ok(Self {
            font_family: aliasable(field(obj, "fontFamily")?, notes, |v, _| font_family_from_json(v))?,
            font_size: aliasable(field(obj, "fontSize")?, notes, Dimension::from_json)?,
            font_weight: aliasable(field(obj, "fontWeight")?, notes, |v, _| FontWeight::from_json(v))?,
            letter_spacing,
            line_height: aliasable(field(obj, "lineHeight")?, notes, |v, _| number(v, "lineHeight"))?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineCap {
    Round,
    Butt,
    Square,
}

/// Predefined CSS keywords a stroke style may name.
const STROKE_KEYWORDS: [&str; 8] = [
    "solid", "dashed", "dotted", "double", "groove", "ridge", "outset", "inset",
];

#[derive(Debug, Clone, PartialEq)]
pub enum StrokeStyle {
    Keyword(String),
    Dashed {
        dash_array: Vec<Aliasable<Dimension>>,
        line_cap: LineCap,
    },
}

impl StrokeStyle {
    pub(crate) fn from_json(raw: &Value, notes: &mut Vec<String>) -> Result<Self, ValueError> {
        match raw {
            Value::String(s) if STROKE_KEYWORDS.contains(&s.as_str()) => {
                Ok(StrokeStyle::Keyword(s.clone()))
            }
            Value::String(s) => Err(ValueError::UnknownKeyword {
                kind: "stroke style",
                name: s.clone(),
            }),
            Value::Object(obj) => {
                let dashes = field(obj, "dashArray")?;
                let dash_array = dashes
                    .as_array()
                    .filter(|d| !d.is_empty())
                    .ok_or_else(|| ValueError::expected("non-empty dashArray", dashes))?
                    .iter()
                    .map(|d| aliasable(d, notes, Dimension::from_json))
                    .collect::<Result<Vec<_>, _>>()?;
                let line_cap = match field(obj, "lineCap")?.as_str() {
                    Some("round") => LineCap::Round,
                    Some("butt") => LineCap::Butt,
                    Some("square") => LineCap::Square,
                    _ => {
                        return Err(ValueError::UnknownKeyword {
                            kind: "line cap",
                            name: obj["lineCap"].to_string(),
                        })
                    }
                };
                Ok(StrokeStyle::Dashed { dash_array, line_cap })
            }
            other => Err(ValueError::expected("stroke keyword or object", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{TokenType, TokenValue};
    use serde_json::json;

    fn parse(ty: TokenType, raw: Value) -> Result<TokenValue, ValueError> {
        TokenValue::parse(Some(ty), &raw).map(|p| p.value)
    }

    #[test]
    fn border_mixes_literals_and_aliases() {
        let value = parse(
            TokenType::Border,
            json!({"color": "{color.border.default}", "width": {"value": 1, "unit": "px"}, "style": "solid"}),
        )
        .unwrap();
        let TokenValue::Border(border) = value else {
            panic!("expected border");
        };
        assert_eq!(border.color.as_alias().unwrap().path(), "color.border.default");
        assert_eq!(border.width.as_literal().unwrap().value, 1.0);
        assert_eq!(border.style, Aliasable::Literal(StrokeStyle::Keyword("solid".into())));
    }

    #[test]
    fn border_missing_field_is_reported() {
        let err = parse(TokenType::Border, json!({"color": "{a.b}", "style": "solid"})).unwrap_err();
        assert_eq!(err, ValueError::MissingField { field: "width".into() });
    }

    #[test]
    fn shadow_accepts_single_and_layered() {
        let layer = json!({
            "color": "{core.color.black}",
            "offsetX": {"value": 0, "unit": "px"},
            "offsetY": {"value": 2, "unit": "px"},
            "blur": {"value": 4, "unit": "px"}
        });
        let TokenValue::Shadow(single) = parse(TokenType::Shadow, layer.clone()).unwrap() else {
            panic!("expected shadow");
        };
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].spread, Aliasable::Literal(Dimension::zero()));

        let TokenValue::Shadow(layers) = parse(TokenType::Shadow, json!([layer.clone(), layer])).unwrap() else {
            panic!("expected shadow");
        };
        assert_eq!(layers.len(), 2);
        assert!(parse(TokenType::Shadow, json!([])).is_err());
    }

    #[test]
    fn gradient_positions_are_clamped_with_note() {
        let parsed = TokenValue::parse(
            Some(TokenType::Gradient),
            &json!([
                {"color": "{core.color.red}", "position": -0.5},
                {"color": "{core.color.blue}", "position": 1}
            ]),
        )
        .unwrap();
        assert_eq!(parsed.notes.len(), 1);
        let TokenValue::Gradient(stops) = parsed.value else {
            panic!("expected gradient");
        };
        assert_eq!(stops[0].position, Aliasable::Literal(0.0));
    }

    #[test]
    fn typography_requires_core_fields() {
        let ok = parse(
            TokenType::Typography,
            json!({
                "fontFamily": ["Inter", "sans-serif"],
                "fontSize": {"value": 1, "unit": "rem"},
                "fontWeight": "bold",
                "lineHeight": 1.5
            }),
        )
        .unwrap();
        let TokenValue::Typography(t) = ok else {
            panic!("expected typography");
        };
        assert!(t.letter_spacing.is_none());
        assert_eq!(t.font_weight, Aliasable::Literal(FontWeight(700)));

        let err = parse(TokenType::Typography, json!({"fontFamily": "Inter"})).unwrap_err();
        assert!(matches!(err, ValueError::MissingField { .. }));
    }

    #[test]
    fn stroke_style_keyword_and_object() {
        assert!(parse(TokenType::StrokeStyle, json!("dashed")).is_ok());
        assert!(parse(TokenType::StrokeStyle, json!("wavy")).is_err());
        let TokenValue::StrokeStyle(style) = parse(
            TokenType::StrokeStyle,
            json!({"dashArray": [{"value": 2, "unit": "px"}, "{core.space.1}"], "lineCap": "round"}),
        )
        .unwrap() else {
            panic!("expected stroke style");
        };
        assert!(matches!(style, StrokeStyle::Dashed { line_cap: LineCap::Round, .. }));
        assert!(parse(TokenType::StrokeStyle, json!({"dashArray": [], "lineCap": "round"})).is_err());
    }

    #[test]
    fn transition_parses_nested_fields() {
        let TokenValue::Transition(t) = parse(
            TokenType::Transition,
            json!({
                "duration": {"value": 200, "unit": "ms"},
                "delay": {"value": 0, "unit": "ms"},
                "timingFunction": [0.4, 0, 0.2, 1]
            }),
        )
        .unwrap() else {
            panic!("expected transition");
        };
        assert!(t.timing_function.as_literal().is_some());
    }
}
