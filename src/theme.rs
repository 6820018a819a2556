use crate::error::{RenderError, RenderResult};
use crate::ir::StyleOverride;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub stroke: String,
    pub stroke_width: f64,
    pub fill: String,
    pub opacity: f64,
}

impl ShapeStyle {
    pub fn new(stroke: &str, stroke_width: f64, fill: &str, opacity: f64) -> Self {
        Self {
            stroke: stroke.to_string(),
            stroke_width,
            fill: fill.to_string(),
            opacity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelTheme {
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: String,
    pub background: String,
    pub corner_radius: f64,
    /// Estimated advance per character; there is no real text measurement.
    pub char_width: f64,
    pub padding: f64,
    pub box_height: f64,
    /// Distance from the text anchor up to the top of the background box.
    pub baseline_offset: f64,
}

impl Default for LabelTheme {
    fn default() -> Self {
        Self {
            font_family: "Inter, Arial, sans-serif".to_string(),
            font_size: 16.0,
            font_weight: "600".to_string(),
            background: "rgba(0,0,0,0.7)".to_string(),
            corner_radius: 4.0,
            char_width: 8.0,
            padding: 16.0,
            box_height: 28.0,
            baseline_offset: 18.0,
        }
    }
}

/// Font for bare text such as figure captions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextTheme {
    pub font_family: String,
    pub font_size: f64,
}

impl Default for TextTheme {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 14.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub styles: BTreeMap<String, ShapeStyle>,
    pub label: LabelTheme,
    pub text: TextTheme,
}

impl Theme {
    /// Built-in palette of the curriculum design system.
    pub fn design_system() -> Self {
        let mut styles = BTreeMap::new();
        styles.insert(
            "circles".to_string(),
            ShapeStyle::new("#D4AF37", 3.0, "none", 0.9),
        );
        styles.insert(
            "lines".to_string(),
            ShapeStyle::new("#E8C872", 2.0, "none", 0.85),
        );
        styles.insert(
            "squares".to_string(),
            ShapeStyle::new("#4A90D9", 3.0, "rgba(74,144,217,0.1)", 0.9),
        );
        styles.insert(
            "polygons".to_string(),
            ShapeStyle::new("#C0392B", 3.0, "rgba(192,57,43,0.1)", 0.9),
        );
        styles.insert(
            "arrows".to_string(),
            ShapeStyle::new("#FFFFFF", 3.0, "none", 1.0),
        );
        styles.insert(
            "labels".to_string(),
            ShapeStyle::new("none", 0.0, "#FFFFFF", 1.0),
        );
        styles.insert("text".to_string(), ShapeStyle::new("none", 0.0, "#333", 1.0));
        Self {
            styles,
            label: LabelTheme::default(),
            text: TextTheme::default(),
        }
    }

    pub fn resolve_style(
        &self,
        category: &str,
        style_override: &StyleOverride,
    ) -> RenderResult<ShapeStyle> {
        let Some(base) = self.styles.get(category) else {
            return complete_override(category, style_override);
        };
        Ok(ShapeStyle {
            stroke: style_override
                .stroke
                .clone()
                .unwrap_or_else(|| base.stroke.clone()),
            stroke_width: style_override.stroke_width.unwrap_or(base.stroke_width),
            fill: style_override
                .fill
                .clone()
                .unwrap_or_else(|| base.fill.clone()),
            opacity: style_override.opacity.unwrap_or(base.opacity),
        })
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::design_system()
    }
}

fn complete_override(category: &str, style_override: &StyleOverride) -> RenderResult<ShapeStyle> {
    match style_override {
        StyleOverride {
            stroke: Some(stroke),
            stroke_width: Some(stroke_width),
            fill: Some(fill),
            opacity: Some(opacity),
        } => Ok(ShapeStyle {
            stroke: stroke.clone(),
            stroke_width: *stroke_width,
            fill: fill.clone(),
            opacity: *opacity,
        }),
        _ => Err(RenderError::UnknownShapeCategory {
            category: category.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_override_wins_over_defaults() {
        let theme = Theme::design_system();
        let style = StyleOverride::full("#123456", 7.0, "#abcdef", 0.25);
        let resolved = theme.resolve_style("circles", &style).unwrap();
        assert_eq!(resolved, ShapeStyle::new("#123456", 7.0, "#abcdef", 0.25));
    }

    #[test]
    fn partial_override_keeps_remaining_defaults() {
        let theme = Theme::design_system();
        let style = StyleOverride {
            stroke: Some("red".to_string()),
            ..StyleOverride::default()
        };
        let resolved = theme.resolve_style("squares", &style).unwrap();
        let default = &theme.styles["squares"];
        assert_eq!(resolved.stroke, "red");
        assert_eq!(resolved.stroke_width, default.stroke_width);
        assert_eq!(resolved.fill, default.fill);
        assert_eq!(resolved.opacity, default.opacity);
    }

    #[test]
    fn bare_text_defaults_to_dark_fill() {
        let theme = Theme::design_system();
        let resolved = theme.resolve_style("text", &StyleOverride::default()).unwrap();
        assert_eq!(resolved.fill, "#333");
        assert_eq!(theme.text.font_family, "Arial");
        assert_eq!(theme.text.font_size, 14.0);
    }

    #[test]
    fn absent_override_equals_default() {
        let theme = Theme::design_system();
        let resolved = theme
            .resolve_style("lines", &StyleOverride::default())
            .unwrap();
        assert_eq!(&resolved, &theme.styles["lines"]);
    }

    #[test]
    fn unknown_category_requires_complete_override() {
        let theme = Theme::design_system();
        let err = theme
            .resolve_style("hexagrams", &StyleOverride::default())
            .unwrap_err();
        assert_eq!(
            err,
            RenderError::UnknownShapeCategory {
                category: "hexagrams".to_string()
            }
        );

        let partial = StyleOverride {
            stroke: Some("red".to_string()),
            fill: Some("none".to_string()),
            ..StyleOverride::default()
        };
        assert!(theme.resolve_style("hexagrams", &partial).is_err());

        let full = StyleOverride::full("red", 1.0, "none", 1.0);
        assert!(theme.resolve_style("hexagrams", &full).is_ok());
    }
}
