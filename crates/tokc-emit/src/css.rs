//! Flattening token trees into CSS custom properties.

use std::collections::HashMap;
use std::fmt;

use log::warn;
use serde_json::Value;

use tokc_core::path::{css_var_name, css_var_ref, is_custom_property_name, is_safe_css_value};
use tokc_core::value::{
    Border, Color, CubicBezier, Dimension, Duration, GradientStop, ShadowLayer, StrokeStyle,
    Transition, Typography,
};
use tokc_core::{walk_tokens, Aliasable, TokenValue};

use crate::error::{check_prefix, EmitError, Result};
use crate::format::format_number;

/// Options for the CSS artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssOptions {
    /// Selector wrapping every declaration.
    pub selector: String,
    /// Optional variable-name prefix (`--{prefix}-...`).
    pub prefix: String,
}

impl Default for CssOptions {
    fn default() -> Self {
        Self {
            selector: ":root".to_string(),
            prefix: String::new(),
        }
    }
}

impl CssOptions {
    pub fn validate(&self) -> Result<()> {
        if self.selector.trim().is_empty() {
            return Err(EmitError::EmptySelector);
        }
        check_prefix(&self.prefix)
    }
}

/// One `--name: value;` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Token path the declaration was produced from.
    pub path: String,
    /// Custom property name, including the leading `--`.
    pub name: String,
    /// Rendered CSS value, without the trailing `;`.
    pub value: String,
}

/// Why a token, or part of one, is missing from the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The value has no CSS rendering.
    NoCssForm,
    /// The rendered value would end the declaration or open a block.
    UnsafeValue,
    /// The path does not flatten to a plain identifier.
    InvalidName { name: String },
    /// An earlier token already produced this name.
    DuplicateName { name: String, first: String },
    /// The declaration was written without its `letterSpacing`, which the
    /// `font` shorthand cannot carry.
    LetterSpacing,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoCssForm => write!(f, "value has no CSS form; declaration skipped"),
            SkipReason::UnsafeValue => {
                write!(f, "value contains ';', braces or a line break; declaration skipped")
            }
            SkipReason::InvalidName { name } => {
                write!(f, "'{name}' is not a valid custom property name; declaration skipped")
            }
            SkipReason::DuplicateName { name, first } => {
                write!(f, "'{name}' is already declared by '{first}'; declaration skipped")
            }
            SkipReason::LetterSpacing => write!(f, "letterSpacing is not part of the font shorthand; dropped"),
        }
    }
}

/// A token path left out of the output, wholly or in part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    /// Token path.
    pub path: String,
    pub reason: SkipReason,
}

/// Result of flattening a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flattened {
    /// In document order, one per emitted token.
    pub declarations: Vec<Declaration>,
    /// Tokens, or parts of tokens, that were not emitted.
    pub skipped: Vec<Skipped>,
}

impl Flattened {
    fn skip(&mut self, path: &str, reason: SkipReason) {
        self.skipped.push(Skipped {
            path: path.to_string(),
            reason,
        });
    }
}

/// Flatten every token under `tree` into a declaration, in document order.
///
/// Values that fail typed parsing fall back to their raw text when they are
/// strings or numbers. Values that could break out of a declaration, names
/// that are not plain identifiers, and names already taken by an earlier
/// token are listed in `skipped` instead. Does not log.
pub fn flatten(tree: &Value, prefix: &str) -> Flattened {
    let mut out = Flattened::default();
    let mut seen: HashMap<String, String> = HashMap::new();
    walk_tokens(tree, &mut |leaf| {
        let name = css_var_name(leaf.path, prefix);
        if !is_custom_property_name(&name) {
            out.skip(leaf.path, SkipReason::InvalidName { name });
            return;
        }
        if let Some(first) = seen.get(&name) {
            let first = first.clone();
            out.skip(leaf.path, SkipReason::DuplicateName { name, first });
            return;
        }

        let rendered = match TokenValue::parse_declared(leaf.declared_type, leaf.value) {
            Ok(parsed) => {
                if matches!(&parsed.value, TokenValue::Typography(t) if t.letter_spacing.is_some()) {
                    out.skip(leaf.path, SkipReason::LetterSpacing);
                }
                Some(render_value(&parsed.value, prefix))
            }
            Err(_) => verbatim(leaf.value),
        };
        match rendered {
            Some(value) if is_safe_css_value(&value) => {
                seen.insert(name.clone(), leaf.path.to_string());
                out.declarations.push(Declaration {
                    path: leaf.path.to_string(),
                    name,
                    value,
                });
            }
            Some(_) => out.skip(leaf.path, SkipReason::UnsafeValue),
            None => out.skip(leaf.path, SkipReason::NoCssForm),
        }
    });
    out
}

fn verbatim(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => n.as_f64().map(format_number),
        _ => None,
    }
}

/// Render a complete stylesheet: one rule containing every declaration.
///
/// A token whose variable name is invalid or collides with another token's
/// fails the whole stylesheet, since the TypeScript path table would point at
/// the wrong variable. Other skips are logged.
pub fn emit_css(tree: &Value, options: &CssOptions) -> Result<String> {
    options.validate()?;
    let flat = flatten(tree, &options.prefix);
    for skipped in &flat.skipped {
        match &skipped.reason {
            SkipReason::InvalidName { name } => {
                return Err(EmitError::InvalidName {
                    path: skipped.path.clone(),
                    name: name.clone(),
                });
            }
            SkipReason::DuplicateName { name, first } => {
                return Err(EmitError::NameCollision {
                    name: name.clone(),
                    first: first.clone(),
                    second: skipped.path.clone(),
                });
            }
            reason => warn!("{}: {reason}", skipped.path),
        }
    }

    let mut css = format!("{} {{\n", options.selector.trim());
    for decl in &flat.declarations {
        css.push_str(&format!("  {}: {};\n", decl.name, decl.value));
    }
    css.push_str("}\n");
    Ok(css)
}

/// CSS text for a typed value.
pub fn render_value(value: &TokenValue, prefix: &str) -> String {
    match value {
        TokenValue::Color(c) => color(c),
        TokenValue::Dimension(d) => dimension(d),
        TokenValue::FontFamily(families) => font_family(families),
        TokenValue::FontWeight(w) => w.0.to_string(),
        TokenValue::Duration(d) => duration(d),
        TokenValue::CubicBezier(b) => cubic_bezier(b),
        TokenValue::Number(n) => format_number(*n),
        TokenValue::Border(b) => border(b, prefix),
        TokenValue::Transition(t) => transition(t, prefix),
        TokenValue::Shadow(layers) => layers
            .iter()
            .map(|layer| shadow_layer(layer, prefix))
            .collect::<Vec<_>>()
            .join(", "),
        TokenValue::Gradient(stops) => gradient(stops, prefix),
        TokenValue::Typography(t) => typography(t, prefix),
        TokenValue::StrokeStyle(s) => stroke_style(s),
        TokenValue::Reference(r) => css_var_ref(r.path(), prefix),
    }
}

fn alias<T>(value: &Aliasable<T>, prefix: &str, render: impl Fn(&T) -> String) -> String {
    match value {
        Aliasable::Literal(v) => render(v),
        Aliasable::Alias(r) => css_var_ref(r.path(), prefix),
    }
}

fn color(c: &Color) -> String {
    let channels = c
        .components
        .iter()
        .map(|v| format_number(*v))
        .collect::<Vec<_>>()
        .join(" ");
    let alpha = if c.is_opaque() {
        String::new()
    } else {
        format!(" / {}", format_number(c.alpha))
    };
    if c.uses_color_function() {
        format!("color({} {channels}{alpha})", c.color_space)
    } else {
        format!("{}({channels}{alpha})", c.color_space)
    }
}

fn dimension(d: &Dimension) -> String {
    format!("{}{}", format_number(d.value), d.unit.as_str())
}

fn duration(d: &Duration) -> String {
    format!("{}{}", format_number(d.value), d.unit.as_str())
}

/// Generic families are keywords and must stay unquoted.
const GENERIC_FAMILIES: [&str; 8] = [
    "serif",
    "sans-serif",
    "monospace",
    "cursive",
    "fantasy",
    "system-ui",
    "ui-monospace",
    "ui-sans-serif",
];

fn font_family(families: &[String]) -> String {
    families
        .iter()
        .map(|name| {
            if GENERIC_FAMILIES.contains(&name.as_str()) || !name.contains(char::is_whitespace) {
                name.clone()
            } else {
                format!("\"{}\"", name.replace('"', "\\\""))
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn cubic_bezier(b: &CubicBezier) -> String {
    let points = b.0.iter().map(|p| format_number(*p)).collect::<Vec<_>>();
    format!("cubic-bezier({})", points.join(", "))
}

fn stroke_style(s: &StrokeStyle) -> String {
    match s {
        StrokeStyle::Keyword(k) => k.clone(),
        // CSS borders cannot express a dash pattern.
        StrokeStyle::Dashed { .. } => "dashed".to_string(),
    }
}

fn border(b: &Border, prefix: &str) -> String {
    format!(
        "{} {} {}",
        alias(&b.width, prefix, dimension),
        alias(&b.style, prefix, stroke_style),
        alias(&b.color, prefix, color),
    )
}

fn transition(t: &Transition, prefix: &str) -> String {
    format!(
        "{} {} {}",
        alias(&t.duration, prefix, duration),
        alias(&t.timing_function, prefix, cubic_bezier),
        alias(&t.delay, prefix, duration),
    )
}

fn shadow_layer(s: &ShadowLayer, prefix: &str) -> String {
    let body = format!(
        "{} {} {} {} {}",
        alias(&s.offset_x, prefix, dimension),
        alias(&s.offset_y, prefix, dimension),
        alias(&s.blur, prefix, dimension),
        alias(&s.spread, prefix, dimension),
        alias(&s.color, prefix, color),
    );
    if s.inset {
        format!("inset {body}")
    } else {
        body
    }
}

fn gradient(stops: &[GradientStop], prefix: &str) -> String {
    let stops = stops
        .iter()
        .map(|stop| {
            let position = match &stop.position {
                Aliasable::Literal(p) => format!("{}%", format_number(p * 100.0)),
                Aliasable::Alias(r) => format!("calc({} * 100%)", css_var_ref(r.path(), prefix)),
            };
            format!("{} {position}", alias(&stop.color, prefix, color))
        })
        .collect::<Vec<_>>();
    format!("linear-gradient(90deg, {})", stops.join(", "))
}

fn typography(t: &Typography, prefix: &str) -> String {
    format!(
        "{} {}/{} {}",
        alias(&t.font_weight, prefix, |w| w.0.to_string()),
        alias(&t.font_size, prefix, dimension),
        alias(&t.line_height, prefix, |lh| format_number(*lh)),
        alias(&t.font_family, prefix, |f| font_family(f)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(ty: &str, raw: Value) -> String {
        let parsed = TokenValue::parse_declared(Some(ty), &raw).unwrap();
        render_value(&parsed.value, "")
    }

    #[test]
    fn colors_use_functional_notation() {
        assert_eq!(
            render("color", json!({"colorSpace": "srgb", "components": [1, 0.5, 0]})),
            "color(srgb 1 0.5 0)"
        );
        assert_eq!(
            render("color", json!({"colorSpace": "display-p3", "components": [0, 0, 1], "alpha": 0.5})),
            "color(display-p3 0 0 1 / 0.5)"
        );
        assert_eq!(
            render("color", json!({"colorSpace": "oklch", "components": [0.7, 0.1, 250]})),
            "oklch(0.7 0.1 250)"
        );
    }

    #[test]
    fn scalars() {
        assert_eq!(render("dimension", json!({"value": 1.5, "unit": "rem"})), "1.5rem");
        assert_eq!(render("duration", json!({"value": 200, "unit": "ms"})), "200ms");
        assert_eq!(render("fontWeight", json!("bold")), "700");
        assert_eq!(render("number", json!(1.25)), "1.25");
        assert_eq!(
            render("cubicBezier", json!([0.4, 0, 0.2, 1])),
            "cubic-bezier(0.4, 0, 0.2, 1)"
        );
        assert_eq!(
            render("fontFamily", json!(["Open Sans", "Helvetica", "sans-serif"])),
            "\"Open Sans\", Helvetica, sans-serif"
        );
    }

    #[test]
    fn composites_mix_literals_and_vars() {
        assert_eq!(
            render(
                "border",
                json!({"color": "{semantic.color.border.default}", "width": {"value": 1, "unit": "px"}, "style": "solid"})
            ),
            "1px solid var(--semantic-color-border-default)"
        );
        assert_eq!(
            render(
                "shadow",
                json!([
                    {"color": "{core.color.black}", "offsetX": "0px", "offsetY": {"value": 1, "unit": "px"}, "blur": {"value": 2, "unit": "px"}},
                    {"color": "{core.color.black}", "offsetX": {"value": 0, "unit": "px"}, "offsetY": {"value": 0, "unit": "px"}, "blur": {"value": 0, "unit": "px"}, "spread": {"value": 1, "unit": "px"}, "inset": true}
                ])
            ),
            "0px 1px 2px 0px var(--core-color-black), inset 0px 0px 0px 1px var(--core-color-black)"
        );
        assert_eq!(
            render(
                "transition",
                json!({"duration": "{core.motion.duration.fast}", "delay": {"value": 0, "unit": "ms"}, "timingFunction": [0, 0, 1, 1]})
            ),
            "var(--core-motion-duration-fast) cubic-bezier(0, 0, 1, 1) 0ms"
        );
    }

    #[test]
    fn gradient_positions_are_percentages() {
        assert_eq!(
            render(
                "gradient",
                json!([
                    {"color": "{core.color.red}", "position": 0},
                    {"color": {"colorSpace": "srgb", "components": [0, 0, 1]}, "position": 0.5}
                ])
            ),
            "linear-gradient(90deg, var(--core-color-red) 0%, color(srgb 0 0 1) 50%)"
        );
    }

    #[test]
    fn typography_uses_font_shorthand() {
        assert_eq!(
            render(
                "typography",
                json!({
                    "fontFamily": "{core.typography.family.sans}",
                    "fontSize": {"value": 16, "unit": "px"},
                    "fontWeight": 600,
                    "lineHeight": 1.5
                })
            ),
            "600 16px/1.5 var(--core-typography-family-sans)"
        );
    }

    #[test]
    fn stroke_style_object_renders_dashed() {
        assert_eq!(
            render(
                "strokeStyle",
                json!({"dashArray": [{"value": 2, "unit": "px"}], "lineCap": "round"})
            ),
            "dashed"
        );
    }

    #[test]
    fn flatten_keeps_document_order_and_prefix() {
        let tree = json!({
            "core": {
                "color": { "$type": "color", "red": { "$value": {"colorSpace": "srgb", "components": [1, 0, 0]} } },
                "opacity": { "$value": 0.5 }
            },
            "semantic": {
                "danger": { "$value": "{core.color.red}" },
                "font": { "$value": "Inter var" },
                "odd": { "$value": [1, 2] }
            }
        });
        let flat = flatten(&tree, "ds");
        let names: Vec<_> = flat.declarations.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "--ds-core-color-red",
                "--ds-core-opacity",
                "--ds-semantic-danger",
                "--ds-semantic-font"
            ]
        );
        assert_eq!(flat.declarations[2].value, "var(--ds-core-color-red)");
        assert_eq!(flat.declarations[3].value, "Inter var");
        assert_eq!(
            flat.skipped,
            vec![Skipped {
                path: "semantic.odd".into(),
                reason: SkipReason::NoCssForm
            }]
        );
    }

    #[test]
    fn declaration_breaking_values_are_skipped() {
        let tree = json!({
            "core": {
                "font": { "$value": "x; } body { display: none;" },
                "family": { "$type": "fontFamily", "$value": ["Inter", "x;}"] },
                "ok": { "$value": "Inter var" }
            }
        });
        let flat = flatten(&tree, "");
        assert_eq!(flat.declarations.len(), 1);
        assert_eq!(flat.declarations[0].name, "--core-ok");
        assert!(flat.skipped.iter().all(|s| s.reason == SkipReason::UnsafeValue));
        assert_eq!(flat.skipped.len(), 2);

        let css = emit_css(&tree, &CssOptions::default()).unwrap();
        assert!(!css.contains("display"));
    }

    #[test]
    fn keys_that_are_not_identifiers_fail_the_stylesheet() {
        let tree = json!({ "core": { "a b": { "$value": 1 } } });
        let flat = flatten(&tree, "");
        assert!(flat.declarations.is_empty());
        assert_eq!(
            flat.skipped[0].reason,
            SkipReason::InvalidName {
                name: "--core-a b".into()
            }
        );
        assert!(matches!(
            emit_css(&tree, &CssOptions::default()),
            Err(EmitError::InvalidName { .. })
        ));
    }

    #[test]
    fn colliding_names_are_declared_once() {
        let tree = json!({
            "core": {
                "a-b": { "c": { "$value": 1 } },
                "a": { "b-c": { "$value": 2 } }
            }
        });
        let flat = flatten(&tree, "");
        assert_eq!(flat.declarations.len(), 1);
        assert_eq!(flat.declarations[0].value, "1");
        assert_eq!(
            flat.skipped[0].reason,
            SkipReason::DuplicateName {
                name: "--core-a-b-c".into(),
                first: "core.a-b.c".into()
            }
        );

        match emit_css(&tree, &CssOptions::default()) {
            Err(EmitError::NameCollision { name, first, second }) => {
                assert_eq!(name, "--core-a-b-c");
                assert_eq!(first, "core.a-b.c");
                assert_eq!(second, "core.a.b-c");
            }
            other => panic!("expected a collision, got {other:?}"),
        }
    }

    #[test_log::test]
    fn letter_spacing_is_reported_but_declaration_kept() {
        let tree = json!({
            "semantic": {
                "body": {
                    "$type": "typography",
                    "$value": {
                        "fontFamily": ["Inter"],
                        "fontSize": {"value": 16, "unit": "px"},
                        "fontWeight": 400,
                        "lineHeight": 1.5,
                        "letterSpacing": {"value": 0.5, "unit": "px"}
                    }
                }
            }
        });
        let flat = flatten(&tree, "");
        assert_eq!(flat.declarations[0].value, "400 16px/1.5 Inter");
        assert_eq!(
            flat.skipped,
            vec![Skipped {
                path: "semantic.body".into(),
                reason: SkipReason::LetterSpacing
            }]
        );
        assert!(emit_css(&tree, &CssOptions::default()).is_ok());
    }

    #[test_log::test]
    fn emit_css_wraps_in_selector() {
        let tree = json!({ "core": { "space": { "$type": "dimension", "1": { "$value": {"value": 4, "unit": "px"} } } } });
        let options = CssOptions {
            selector: ".theme-dark".into(),
            prefix: String::new(),
        };
        assert_eq!(
            emit_css(&tree, &options).unwrap(),
            ".theme-dark {\n  --core-space-1: 4px;\n}\n"
        );
    }

    #[test]
    fn options_reject_bad_prefix() {
        let options = CssOptions {
            selector: ":root".into(),
            prefix: "my prefix".into(),
        };
        assert!(matches!(
            emit_css(&json!({}), &options),
            Err(EmitError::InvalidPrefix { .. })
        ));
        let empty = CssOptions {
            selector: " ".into(),
            prefix: String::new(),
        };
        assert!(matches!(empty.validate(), Err(EmitError::EmptySelector)));
    }
}
