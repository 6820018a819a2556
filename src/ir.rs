use crate::error::{RenderError, RenderResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    /// Overlays sit absolutely positioned over an artifact image and ignore pointer events.
    pub overlay: bool,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let canvas = Self {
            width,
            height,
            overlay: false,
        };
        canvas.validate()?;
        Ok(canvas)
    }

    pub fn overlay(width: u32, height: u32) -> RenderResult<Self> {
        let canvas = Self {
            width,
            height,
            overlay: true,
        };
        canvas.validate()?;
        Ok(canvas)
    }

    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidCanvas {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn width_f(&self) -> f64 {
        self.width as f64
    }

    pub fn height_f(&self) -> f64 {
        self.height as f64
    }

    /// Reference dimension for radii.
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height) as f64
    }
}

/// A raw coordinate as it appears in content: an absolute number or a
/// string such as `"42"` or `"12.5%"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coord {
    Number(f64),
    Text(String),
}

impl Coord {
    pub fn percent(value: f64) -> Self {
        Coord::Text(format!("{value}%"))
    }
}

impl From<f64> for Coord {
    fn from(value: f64) -> Self {
        Coord::Number(value)
    }
}

impl From<&str> for Coord {
    fn from(value: &str) -> Self {
        Coord::Text(value.to_string())
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Coord::Number(value) => write!(f, "{value}"),
            Coord::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordPair(pub Coord, pub Coord);

impl CoordPair {
    pub fn new(x: impl Into<Coord>, y: impl Into<Coord>) -> Self {
        Self(x.into(), y.into())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Shape {
    Circle {
        cx: Coord,
        cy: Coord,
        r: Coord,
    },
    Line {
        x1: Coord,
        y1: Coord,
        x2: Coord,
        y2: Coord,
    },
    Rectangle {
        x: Coord,
        y: Coord,
        width: Coord,
        height: Coord,
    },
    Polygon {
        points: Vec<CoordPair>,
        label_at: Option<CoordPair>,
    },
    Arrow {
        x1: Coord,
        y1: Coord,
        x2: Coord,
        y2: Coord,
        marker_id: Option<String>,
    },
    Label {
        x: Coord,
        y: Coord,
    },
    /// Bare text with no background box, used for figure captions.
    Text {
        x: Coord,
        y: Coord,
        font_size: Option<f64>,
    },
}

impl Shape {
    pub fn default_category(&self) -> &'static str {
        match self {
            Shape::Circle { .. } => "circles",
            Shape::Line { .. } => "lines",
            Shape::Rectangle { .. } => "squares",
            Shape::Polygon { .. } => "polygons",
            Shape::Arrow { .. } => "arrows",
            Shape::Label { .. } => "labels",
            Shape::Text { .. } => "text",
        }
    }

    pub fn circle(cx: impl Into<Coord>, cy: impl Into<Coord>, r: impl Into<Coord>) -> Self {
        Shape::Circle {
            cx: cx.into(),
            cy: cy.into(),
            r: r.into(),
        }
    }

    pub fn line(
        x1: impl Into<Coord>,
        y1: impl Into<Coord>,
        x2: impl Into<Coord>,
        y2: impl Into<Coord>,
    ) -> Self {
        Shape::Line {
            x1: x1.into(),
            y1: y1.into(),
            x2: x2.into(),
            y2: y2.into(),
        }
    }

    pub fn arrow(
        x1: impl Into<Coord>,
        y1: impl Into<Coord>,
        x2: impl Into<Coord>,
        y2: impl Into<Coord>,
    ) -> Self {
        Shape::Arrow {
            x1: x1.into(),
            y1: y1.into(),
            x2: x2.into(),
            y2: y2.into(),
            marker_id: None,
        }
    }

    pub fn rect(
        x: impl Into<Coord>,
        y: impl Into<Coord>,
        width: impl Into<Coord>,
        height: impl Into<Coord>,
    ) -> Self {
        Shape::Rectangle {
            x: x.into(),
            y: y.into(),
            width: width.into(),
            height: height.into(),
        }
    }

    pub fn polygon(points: Vec<CoordPair>) -> Self {
        Shape::Polygon {
            points,
            label_at: None,
        }
    }

    pub fn label(x: impl Into<Coord>, y: impl Into<Coord>) -> Self {
        Shape::Label {
            x: x.into(),
            y: y.into(),
        }
    }

    pub fn text(x: impl Into<Coord>, y: impl Into<Coord>) -> Self {
        Shape::Text {
            x: x.into(),
            y: y.into(),
            font_size: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StyleOverride {
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub fill: Option<String>,
    pub opacity: Option<f64>,
}

impl StyleOverride {
    pub fn full(stroke: &str, stroke_width: f64, fill: &str, opacity: f64) -> Self {
        Self {
            stroke: Some(stroke.to_string()),
            stroke_width: Some(stroke_width),
            fill: Some(fill.to_string()),
            opacity: Some(opacity),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Primitive {
    pub shape: Shape,
    /// Style-table entry to fall back on; `None` uses the shape's default category.
    pub category: Option<String>,
    pub style: StyleOverride,
    pub label: Option<String>,
}

impl Primitive {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            category: None,
            style: StyleOverride::default(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_style(mut self, style: StyleOverride) -> Self {
        self.style = style;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn category(&self) -> &str {
        self.category
            .as_deref()
            .unwrap_or_else(|| self.shape.default_category())
    }
}

impl From<Shape> for Primitive {
    fn from(shape: Shape) -> Self {
        Primitive::new(shape)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub canvas: Canvas,
    pub primitives: Vec<Primitive>,
}

impl Document {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            primitives: Vec::new(),
        }
    }

    pub fn push(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    pub fn with(mut self, primitive: impl Into<Primitive>) -> Self {
        self.push(primitive);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_rejects_zero_dimensions() {
        assert!(Canvas::new(0, 10).is_err());
        assert!(Canvas::overlay(10, 0).is_err());
        assert!(Canvas::new(400, 400).is_ok());
    }

    #[test]
    fn coord_deserializes_numbers_and_strings() {
        let pair: CoordPair = serde_json::from_str(r#"["50%", 12.5]"#).unwrap();
        assert_eq!(pair.0, Coord::Text("50%".to_string()));
        assert_eq!(pair.1, Coord::Number(12.5));
    }

    #[test]
    fn primitive_falls_back_to_shape_category() {
        let plain = Primitive::new(Shape::rect(0.0, 0.0, 10.0, 10.0));
        assert_eq!(plain.category(), "squares");
        let custom = plain.with_category("ziggurat");
        assert_eq!(custom.category(), "ziggurat");
    }
}
