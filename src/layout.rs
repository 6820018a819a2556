use crate::error::{RenderError, RenderResult};
use crate::ir::{Canvas, Coord, CoordPair, Shape};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Distance between a shape and its attached label.
pub const LABEL_OFFSET: f64 = 10.0;
pub const MIN_POLYGON_POINTS: usize = 3;

static PERCENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<value>[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)\s*%$").unwrap()
});

pub fn resolve_coord(value: &Coord, reference: f64) -> RenderResult<f64> {
    let resolved = match value {
        Coord::Number(number) => *number,
        Coord::Text(text) => resolve_text(text, reference)?,
    };
    if !resolved.is_finite() {
        return Err(invalid(value));
    }
    Ok(resolved)
}

fn resolve_text(text: &str, reference: f64) -> RenderResult<f64> {
    let trimmed = text.trim();
    if trimmed.ends_with('%') {
        let caps = PERCENT_RE
            .captures(trimmed)
            .ok_or_else(|| invalid_text(text))?;
        let percent = caps["value"]
            .parse::<f64>()
            .map_err(|_| invalid_text(text))?;
        return Ok(percent / 100.0 * reference);
    }
    trimmed.parse::<f64>().map_err(|_| invalid_text(text))
}

fn invalid(value: &Coord) -> RenderError {
    RenderError::InvalidCoordinate {
        value: value.to_string(),
    }
}

fn invalid_text(text: &str) -> RenderError {
    RenderError::InvalidCoordinate {
        value: text.to_string(),
    }
}

/// Pixel-space geometry of one primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Geometry {
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Polygon {
        points: Vec<(f64, f64)>,
        label_at: Option<(f64, f64)>,
    },
    Arrow {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Label {
        x: f64,
        y: f64,
    },
    Text {
        x: f64,
        y: f64,
    },
}

pub fn resolve_shape(shape: &Shape, canvas: &Canvas) -> RenderResult<Geometry> {
    let w = canvas.width_f();
    let h = canvas.height_f();
    let geometry = match shape {
        Shape::Circle { cx, cy, r } => Geometry::Circle {
            cx: resolve_coord(cx, w)?,
            cy: resolve_coord(cy, h)?,
            r: resolve_coord(r, canvas.min_side())?,
        },
        Shape::Line { x1, y1, x2, y2 } => Geometry::Line {
            x1: resolve_coord(x1, w)?,
            y1: resolve_coord(y1, h)?,
            x2: resolve_coord(x2, w)?,
            y2: resolve_coord(y2, h)?,
        },
        Shape::Rectangle {
            x,
            y,
            width,
            height,
        } => Geometry::Rectangle {
            x: resolve_coord(x, w)?,
            y: resolve_coord(y, h)?,
            width: resolve_coord(width, w)?,
            height: resolve_coord(height, h)?,
        },
        Shape::Polygon { points, label_at } => {
            if points.len() < MIN_POLYGON_POINTS {
                return Err(RenderError::DegeneratePolygon {
                    points: points.len(),
                });
            }
            let points = points
                .iter()
                .map(|point| resolve_pair(point, canvas))
                .collect::<RenderResult<Vec<_>>>()?;
            let label_at = label_at
                .as_ref()
                .map(|point| resolve_pair(point, canvas))
                .transpose()?;
            Geometry::Polygon { points, label_at }
        }
        Shape::Arrow { x1, y1, x2, y2, .. } => Geometry::Arrow {
            x1: resolve_coord(x1, w)?,
            y1: resolve_coord(y1, h)?,
            x2: resolve_coord(x2, w)?,
            y2: resolve_coord(y2, h)?,
        },
        Shape::Label { x, y } => Geometry::Label {
            x: resolve_coord(x, w)?,
            y: resolve_coord(y, h)?,
        },
        Shape::Text { x, y, .. } => Geometry::Text {
            x: resolve_coord(x, w)?,
            y: resolve_coord(y, h)?,
        },
    };
    Ok(geometry)
}

fn resolve_pair(point: &CoordPair, canvas: &Canvas) -> RenderResult<(f64, f64)> {
    Ok((
        resolve_coord(&point.0, canvas.width_f())?,
        resolve_coord(&point.1, canvas.height_f())?,
    ))
}

/// Where an attached label is centred. `None` means the shape has no
/// derived anchor and nothing was supplied.
pub fn label_anchor(geometry: &Geometry) -> Option<(f64, f64)> {
    match geometry {
        Geometry::Circle { cx, cy, r } => Some((cx + r + LABEL_OFFSET, *cy)),
        Geometry::Line { x1, y1, x2, y2 } => Some(((x1 + x2) / 2.0, (y1 + y2) / 2.0)),
        Geometry::Arrow { x1, y1, x2, y2 } => {
            Some(((x1 + x2) / 2.0, (y1 + y2) / 2.0 - LABEL_OFFSET))
        }
        Geometry::Rectangle { x, y, width, .. } => Some((x + width / 2.0, y - LABEL_OFFSET)),
        Geometry::Polygon { label_at, .. } => *label_at,
        Geometry::Label { x, y } | Geometry::Text { x, y } => Some((*x, *y)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn percentages_scale_against_reference() {
        for (text, reference, expected) in [
            ("50%", 400.0, 200.0),
            ("12.5%", 800.0, 100.0),
            ("0%", 123.0, 0.0),
            ("150%", 200.0, 300.0),
            ("-10%", 200.0, -20.0),
            (" 25 % ", 40.0, 10.0),
        ] {
            let value = resolve_coord(&Coord::from(text), reference).unwrap();
            assert!(approx(value, expected), "{text}: {value} != {expected}");
        }
    }

    #[test]
    fn plain_numbers_pass_through() {
        assert_eq!(resolve_coord(&Coord::from("42"), 1000.0).unwrap(), 42.0);
        assert_eq!(resolve_coord(&Coord::from("-3.25"), 1000.0).unwrap(), -3.25);
        assert_eq!(resolve_coord(&Coord::Number(7.5), 1000.0).unwrap(), 7.5);
    }

    #[test]
    fn malformed_values_are_rejected() {
        for text in ["", "abc", "%", "10%%", "5%0", "12px", "NaN", "inf"] {
            let err = resolve_coord(&Coord::from(text), 100.0).unwrap_err();
            assert_eq!(
                err,
                RenderError::InvalidCoordinate {
                    value: text.to_string()
                }
            );
        }
    }

    #[test]
    fn circle_resolves_radius_against_shorter_side() {
        let canvas = Canvas::new(400, 200).unwrap();
        let geometry = resolve_shape(&Shape::circle("50%", "50%", "10%"), &canvas).unwrap();
        assert_eq!(
            geometry,
            Geometry::Circle {
                cx: 200.0,
                cy: 100.0,
                r: 20.0
            }
        );
    }

    #[test]
    fn polygon_needs_three_points() {
        let canvas = Canvas::new(200, 200).unwrap();
        let two = Shape::polygon(vec![CoordPair::new("0%", "0%"), CoordPair::new("100%", "0%")]);
        assert_eq!(
            resolve_shape(&two, &canvas).unwrap_err(),
            RenderError::DegeneratePolygon { points: 2 }
        );

        let three = Shape::polygon(vec![
            CoordPair::new("0%", "0%"),
            CoordPair::new("100%", "0%"),
            CoordPair::new("50%", "100%"),
        ]);
        let Geometry::Polygon { points, .. } = resolve_shape(&three, &canvas).unwrap() else {
            panic!("expected polygon geometry");
        };
        assert_eq!(points, vec![(0.0, 0.0), (200.0, 0.0), (100.0, 200.0)]);
    }

    #[test]
    fn anchors_follow_shape_rules() {
        let circle = Geometry::Circle {
            cx: 100.0,
            cy: 50.0,
            r: 20.0,
        };
        assert_eq!(label_anchor(&circle), Some((130.0, 50.0)));

        let line = Geometry::Line {
            x1: 0.0,
            y1: 0.0,
            x2: 100.0,
            y2: 40.0,
        };
        assert_eq!(label_anchor(&line), Some((50.0, 20.0)));

        let arrow = Geometry::Arrow {
            x1: 0.0,
            y1: 0.0,
            x2: 100.0,
            y2: 40.0,
        };
        assert_eq!(label_anchor(&arrow), Some((50.0, 10.0)));

        let rect = Geometry::Rectangle {
            x: 40.0,
            y: 40.0,
            width: 320.0,
            height: 320.0,
        };
        assert_eq!(label_anchor(&rect), Some((200.0, 30.0)));

        let polygon = Geometry::Polygon {
            points: vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)],
            label_at: None,
        };
        assert_eq!(label_anchor(&polygon), None);

        let canvas = Canvas::new(400, 400).unwrap();
        let text = resolve_shape(&Shape::text("50%", "95%"), &canvas).unwrap();
        assert_eq!(text, Geometry::Text { x: 200.0, y: 380.0 });
        assert_eq!(label_anchor(&text), Some((200.0, 380.0)));
    }
}
