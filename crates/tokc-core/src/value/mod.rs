//! Typed token values.
//!
//! `$value` can be a string, number, array, or nested object depending on the
//! token's `$type`. Each shape is parsed into one variant of [`TokenValue`]
//! through its own validated constructor. Any value (or any sub-field of a
//! composite) may instead be a [`Reference`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValueError;
use crate::reference::Reference;

mod color;
mod composite;
mod scalar;

pub use color::Color;
pub use composite::{Border, GradientStop, LineCap, ShadowLayer, StrokeStyle, Transition, Typography};
pub use scalar::{CubicBezier, Dimension, DimensionUnit, Duration, DurationUnit, FontWeight};

/// The recognized `$type` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenType {
    Color,
    Dimension,
    FontFamily,
    FontWeight,
    Duration,
    CubicBezier,
    Number,
    Border,
    Transition,
    Shadow,
    Gradient,
    Typography,
    StrokeStyle,
}

impl TokenType {
    pub const ALL: [TokenType; 13] = [
        TokenType::Color,
        TokenType::Dimension,
        TokenType::FontFamily,
        TokenType::FontWeight,
        TokenType::Duration,
        TokenType::CubicBezier,
        TokenType::Number,
        TokenType::Border,
        TokenType::Transition,
        TokenType::Shadow,
        TokenType::Gradient,
        TokenType::Typography,
        TokenType::StrokeStyle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Color => "color",
            TokenType::Dimension => "dimension",
            TokenType::FontFamily => "fontFamily",
            TokenType::FontWeight => "fontWeight",
            TokenType::Duration => "duration",
            TokenType::CubicBezier => "cubicBezier",
            TokenType::Number => "number",
            TokenType::Border => "border",
            TokenType::Transition => "transition",
            TokenType::Shadow => "shadow",
            TokenType::Gradient => "gradient",
            TokenType::Typography => "typography",
            TokenType::StrokeStyle => "strokeStyle",
        }
    }

    /// Infer a type from the shape of an untyped `$value`.
    ///
    /// Only unambiguous shapes are classified; references are handled before
    /// inference and never reach here.
    pub fn infer(raw: &Value) -> Option<TokenType> {
        match raw {
            Value::Number(_) => Some(TokenType::Number),
            Value::Object(obj) if obj.contains_key("colorSpace") => Some(TokenType::Color),
            Value::Object(obj) if obj.contains_key("value") => {
                match obj.get("unit").and_then(Value::as_str) {
                    Some("px" | "rem") => Some(TokenType::Dimension),
                    Some("ms" | "s") => Some(TokenType::Duration),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenType {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ValueError::UnknownType { name: s.to_string() })
    }
}

/// Either a literal value or a reference to another token.
#[derive(Debug, Clone, PartialEq)]
pub enum Aliasable<T> {
    Literal(T),
    Alias(Reference),
}

impl<T> Aliasable<T> {
    pub fn as_literal(&self) -> Option<&T> {
        match self {
            Aliasable::Literal(v) => Some(v),
            Aliasable::Alias(_) => None,
        }
    }

    pub fn as_alias(&self) -> Option<&Reference> {
        match self {
            Aliasable::Literal(_) => None,
            Aliasable::Alias(r) => Some(r),
        }
    }
}

/// A typed token value.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Color(Color),
    Dimension(Dimension),
    FontFamily(Vec<String>),
    FontWeight(FontWeight),
    Duration(Duration),
    CubicBezier(CubicBezier),
    Number(f64),
    Border(Border),
    Transition(Transition),
    Shadow(Vec<ShadowLayer>),
    Gradient(Vec<GradientStop>),
    Typography(Typography),
    StrokeStyle(StrokeStyle),
    Reference(Reference),
}

/// A successfully parsed value plus non-fatal notes (deprecated shapes,
/// clamped positions) the validator reports as warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub value: TokenValue,
    pub notes: Vec<String>,
}

impl TokenValue {
    /// Parse a raw `$value` as `ty`, inferring the type from shape when absent.
    pub fn parse(ty: Option<TokenType>, raw: &Value) -> Result<Parsed, ValueError> {
        if let Some(reference) = Reference::from_value(raw) {
            return Ok(Parsed {
                value: TokenValue::Reference(reference),
                notes: Vec::new(),
            });
        }
        let ty = ty.or_else(|| TokenType::infer(raw)).ok_or(ValueError::Untyped)?;
        let mut notes = Vec::new();
        let value = Self::parse_typed(ty, raw, &mut notes)?;
        Ok(Parsed { value, notes })
    }

    /// Parse with a `$type` string as written in the source document.
    pub fn parse_declared(declared: Option<&str>, raw: &Value) -> Result<Parsed, ValueError> {
        let ty = declared.map(str::parse::<TokenType>).transpose()?;
        Self::parse(ty, raw)
    }

    fn parse_typed(ty: TokenType, raw: &Value, notes: &mut Vec<String>) -> Result<Self, ValueError> {
        let value = match ty {
            TokenType::Color => TokenValue::Color(Color::from_json(raw, notes)?),
            TokenType::Dimension => TokenValue::Dimension(Dimension::from_json(raw, notes)?),
            TokenType::FontFamily => TokenValue::FontFamily(scalar::font_family_from_json(raw)?),
            TokenType::FontWeight => TokenValue::FontWeight(FontWeight::from_json(raw)?),
            TokenType::Duration => TokenValue::Duration(Duration::from_json(raw, notes)?),
            TokenType::CubicBezier => TokenValue::CubicBezier(CubicBezier::from_json(raw)?),
            TokenType::Number => TokenValue::Number(number(raw, "$value")?),
            TokenType::Border => TokenValue::Border(Border::from_json(raw, notes)?),
            TokenType::Transition => TokenValue::Transition(Transition::from_json(raw, notes)?),
            TokenType::Shadow => TokenValue::Shadow(composite::shadow_from_json(raw, notes)?),
            TokenType::Gradient => TokenValue::Gradient(composite::gradient_from_json(raw, notes)?),
            TokenType::Typography => TokenValue::Typography(Typography::from_json(raw, notes)?),
            TokenType::StrokeStyle => TokenValue::StrokeStyle(StrokeStyle::from_json(raw, notes)?),
        };
        Ok(value)
    }

    /// The type this value was parsed as; `None` for a bare reference.
    pub fn token_type(&self) -> Option<TokenType> {
        Some(match self {
            TokenValue::Color(_) => TokenType::Color,
            TokenValue::Dimension(_) => TokenType::Dimension,
            TokenValue::FontFamily(_) => TokenType::FontFamily,
            TokenValue::FontWeight(_) => TokenType::FontWeight,
            TokenValue::Duration(_) => TokenType::Duration,
            TokenValue::CubicBezier(_) => TokenType::CubicBezier,
            TokenValue::Number(_) => TokenType::Number,
            TokenValue::Border(_) => TokenType::Border,
            TokenValue::Transition(_) => TokenType::Transition,
            TokenValue::Shadow(_) => TokenType::Shadow,
            TokenValue::Gradient(_) => TokenType::Gradient,
            TokenValue::Typography(_) => TokenType::Typography,
            TokenValue::StrokeStyle(_) => TokenType::StrokeStyle,
            TokenValue::Reference(_) => return None,
        })
    }
}

// ---------------------------------------------------------------------------
// Shared field helpers
// ---------------------------------------------------------------------------

pub(crate) fn object<'a>(raw: &'a Value, expected: &'static str) -> Result<&'a Map<String, Value>, ValueError> {
    raw.as_object().ok_or_else(|| ValueError::expected(expected, raw))
}

pub(crate) fn field<'a>(obj: &'a Map<String, Value>, name: &str) -> Result<&'a Value, ValueError> {
    obj.get(name).ok_or_else(|| ValueError::MissingField {
        field: name.to_string(),
    })
}

pub(crate) fn number(raw: &Value, field: &str) -> Result<f64, ValueError> {
    raw.as_f64().ok_or_else(|| ValueError::NonNumeric {
        field: field.to_string(),
    })
}

pub(crate) fn in_range(value: f64, field: &str, min: f64, max: f64) -> Result<f64, ValueError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ValueError::OutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        })
    }
}

/// Parse a sub-field that may be a reference instead of a literal.
pub(crate) fn aliasable<T>(
    raw: &Value,
    notes: &mut Vec<String>,
    parse: impl FnOnce(&Value, &mut Vec<String>) -> Result<T, ValueError>,
) -> Result<Aliasable<T>, ValueError> {
    match Reference::from_value(raw) {
        Some(reference) => Ok(Aliasable::Alias(reference)),
        None => parse(raw, notes).map(Aliasable::Literal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn type_names_round_trip() {
        for ty in TokenType::ALL {
            assert_eq!(ty.as_str().parse::<TokenType>().unwrap(), ty);
        }
        assert!(matches!(
            "spacing".parse::<TokenType>(),
            Err(ValueError::UnknownType { .. })
        ));
    }

    #[test]
    fn references_parse_regardless_of_type() {
        let parsed = TokenValue::parse(Some(TokenType::Color), &json!("{core.color.red}")).unwrap();
        assert_eq!(
            parsed.value,
            TokenValue::Reference(Reference::new("core.color.red"))
        );
        assert_eq!(parsed.value.token_type(), None);
    }

    #[test]
    fn infers_type_from_shape() {
        assert_eq!(TokenType::infer(&json!(1.5)), Some(TokenType::Number));
        assert_eq!(
            TokenType::infer(&json!({"colorSpace": "srgb", "components": [0, 0, 0]})),
            Some(TokenType::Color)
        );
        assert_eq!(
            TokenType::infer(&json!({"value": 4, "unit": "rem"})),
            Some(TokenType::Dimension)
        );
        assert_eq!(
            TokenType::infer(&json!({"value": 150, "unit": "ms"})),
            Some(TokenType::Duration)
        );
        assert_eq!(TokenType::infer(&json!("plain string")), None);
    }

    #[test]
    fn untyped_shapes_are_reported() {
        let err = TokenValue::parse(None, &json!("Inter")).unwrap_err();
        assert!(err.is_untyped());
    }

    #[test]
    fn declared_unknown_type_is_an_error() {
        let err = TokenValue::parse_declared(Some("spacing"), &json!(4)).unwrap_err();
        assert_eq!(err, ValueError::UnknownType { name: "spacing".into() });
    }

    #[test]
    fn number_rejects_strings() {
        let err = TokenValue::parse(Some(TokenType::Number), &json!("4")).unwrap_err();
        assert!(matches!(err, ValueError::NonNumeric { .. }));
    }
}
