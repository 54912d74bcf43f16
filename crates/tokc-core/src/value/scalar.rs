//! Single-quantity values: dimensions, durations, weights, curves, families.

use std::fmt;

use serde_json::Value;

use super::{field, in_range, number, object};
use crate::error::ValueError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DimensionUnit {
    Px,
    Rem,
}

impl DimensionUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DimensionUnit::Px => "px",
            DimensionUnit::Rem => "rem",
        }
    }

    fn parse(unit: &str) -> Result<Self, ValueError> {
        match unit {
            "px" => Ok(DimensionUnit::Px),
            "rem" => Ok(DimensionUnit::Rem),
            other => Err(ValueError::InvalidUnit {
                unit: other.to_string(),
                allowed: "px, rem",
            }),
        }
    }
}

/// A length such as `16px` or `1.5rem`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimension {
    pub value: f64,
    pub unit: DimensionUnit,
}

impl Dimension {
    pub fn new(value: f64, unit: DimensionUnit) -> Self {
        Self { value, unit }
    }

    pub fn zero() -> Self {
        Self::new(0.0, DimensionUnit::Px)
    }

    pub(crate) fn from_json(raw: &Value, notes: &mut Vec<String>) -> Result<Self, ValueError> {
        if let Some(s) = raw.as_str() {
            let (value, unit) = split_unit(s)?;
            let dim = Self::new(value, DimensionUnit::parse(unit)?);
            notes.push(format!("dimension string '{s}' is deprecated; use {{value, unit}}"));
            return Ok(dim);
        }
        let obj = object(raw, "dimension object")?;
        let value = number(field(obj, "value")?, "value")?;
        let unit_raw = field(obj, "unit")?;
        let unit = unit_raw
            .as_str()
            .ok_or_else(|| ValueError::expected("unit string", unit_raw))?;
        Ok(Self::new(value, DimensionUnit::parse(unit)?))
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationUnit {
    Ms,
    S,
}

impl DurationUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DurationUnit::Ms => "ms",
            DurationUnit::S => "s",
        }
    }

    fn parse(unit: &str) -> Result<Self, ValueError> {
        match unit {
            "ms" => Ok(DurationUnit::Ms),
            "s" => Ok(DurationUnit::S),
            other => Err(ValueError::InvalidUnit {
                unit: other.to_string(),
                allowed: "ms, s",
            }),
        }
    }
}

/// A length of time such as `200ms`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Duration {
    pub value: f64,
    pub unit: DurationUnit,
}

impl Duration {
    pub fn new(value: f64, unit: DurationUnit) -> Result<Self, ValueError> {
        if value < 0.0 {
            return Err(ValueError::OutOfRange {
                field: "value".into(),
                value,
                min: 0.0,
                max: f64::INFINITY,
            });
        }
        Ok(Self { value, unit })
    }

    pub(crate) fn from_json(raw: &Value, notes: &mut Vec<String>) -> Result<Self, ValueError> {
        if let Some(s) = raw.as_str() {
            let (value, unit) = split_unit(s)?;
            let duration = Self::new(value, DurationUnit::parse(unit)?)?;
            notes.push(format!("duration string '{s}' is deprecated; use {{value, unit}}"));
            return Ok(duration);
        }
        let obj = object(raw, "duration object")?;
        let value = number(field(obj, "value")?, "value")?;
        let unit_raw = field(obj, "unit")?;
        let unit = unit_raw
            .as_str()
            .ok_or_else(|| ValueError::expected("unit string", unit_raw))?;
        Self::new(value, DurationUnit::parse(unit)?)
    }
}

/// Numeric font weight in `1..=1000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontWeight(pub u16);

/// Named weights and their numeric equivalents.
const WEIGHT_ALIASES: [(&str, u16); 18] = [
    ("thin", 100),
    ("hairline", 100),
    ("extra-light", 200),
    ("ultra-light", 200),
    ("light", 300),
    ("normal", 400),
    ("regular", 400),
    ("book", 400),
    ("medium", 500),
    ("semi-bold", 600),
    ("demi-bold", 600),
    ("bold", 700),
    ("extra-bold", 800),
    ("ultra-bold", 800),
    ("black", 900),
    ("heavy", 900),
    ("extra-black", 950),
    ("ultra-black", 950),
];

impl FontWeight {
    pub fn new(weight: f64) -> Result<Self, ValueError> {
        in_range(weight, "fontWeight", 1.0, 1000.0)?;
        if weight.fract() != 0.0 {
            return Err(ValueError::expected("integral font weight", &Value::from(weight)));
        }
        Ok(Self(weight as u16))
    }

    pub fn from_name(name: &str) -> Result<Self, ValueError> {
        WEIGHT_ALIASES
            .iter()
            .find(|(alias, _)| *alias == name)
            .map(|(_, w)| Self(*w))
            .ok_or_else(|| ValueError::UnknownKeyword {
                kind: "font weight",
                name: name.to_string(),
            })
    }

    pub(crate) fn from_json(raw: &Value) -> Result<Self, ValueError> {
        match raw {
            Value::Number(n) => Self::new(n.as_f64().unwrap_or(0.0)),
            Value::String(s) => Self::from_name(s),
            other => Err(ValueError::expected("number or weight name", other)),
        }
    }
}

/// Control points `[x1, y1, x2, y2]` of a cubic Bézier easing curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier(pub [f64; 4]);

impl CubicBezier {
    pub fn new(points: [f64; 4]) -> Result<Self, ValueError> {
        in_range(points[0], "x1", 0.0, 1.0)?;
        in_range(points[2], "x2", 0.0, 1.0)?;
        Ok(Self(points))
    }

    pub(crate) fn from_json(raw: &Value) -> Result<Self, ValueError> {
        let arr = raw
            .as_array()
            .ok_or_else(|| ValueError::expected("array of 4 numbers", raw))?;
        if arr.len() != 4 {
            return Err(ValueError::Expected {
                expected: "array of 4 numbers",
                found: format!("array of {}", arr.len()),
            });
        }
        let mut points = [0.0; 4];
        for (i, p) in arr.iter().enumerate() {
            points[i] = number(p, &format!("[{i}]"))?;
        }
        Self::new(points)
    }
}

pub(crate) fn font_family_from_json(raw: &Value) -> Result<Vec<String>, ValueError> {
    match raw {
        Value::String(s) if !s.trim().is_empty() => Ok(vec![s.clone()]),
        Value::Array(items) if !items.is_empty() => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| ValueError::expected("font family name", item))
            })
            .collect(),
        other => Err(ValueError::expected("font family name or non-empty list", other)),
    }
}

/// Split `"16px"` into `(16.0, "px")`.
fn split_unit(s: &str) -> Result<(f64, &str), ValueError> {
    let s = s.trim();
    let idx = s
        .find(|c: char| c.is_ascii_alphabetic())
        .ok_or_else(|| ValueError::NonNumeric { field: "value".into() })?;
    let (num, unit) = s.split_at(idx);
    let value = num
        .trim()
        .parse::<f64>()
        .map_err(|_| ValueError::NonNumeric { field: "value".into() })?;
    Ok((value, unit))
}
