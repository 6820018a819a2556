use crate::config::{CanvasConfig, NumberOrString, number_field};
use crate::error::RenderResult;
use crate::ir::{Canvas, Coord, CoordPair, Document, Primitive, Shape, StyleOverride};
use anyhow::{Result, anyhow};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

static UNSAFE_FILE_CHARS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.-]+").unwrap());

const DEFAULT_LABEL_TEXT: &str = "Label";

#[derive(Debug, Clone)]
pub struct Overlay {
    pub overlay_id: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub elements: Vec<Primitive>,
}

impl Overlay {
    /// Zero or missing dimensions fall back to the configured canvas.
    pub fn document(&self, defaults: &CanvasConfig) -> RenderResult<Document> {
        let width = self.width.filter(|w| *w > 0).unwrap_or(defaults.width);
        let height = self.height.filter(|h| *h > 0).unwrap_or(defaults.height);
        Ok(Document {
            canvas: Canvas::overlay(width, height)?,
            primitives: self.elements.clone(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Artifact {
    pub artifact_id: String,
    pub overlays: Vec<Overlay>,
}

#[derive(Debug, Clone)]
pub struct Lesson {
    pub lesson_id: String,
    pub artifacts: Vec<Artifact>,
}

#[derive(Debug, Clone)]
pub struct LessonOverlay {
    pub file_name: String,
    pub document: Document,
}

impl Lesson {
    pub fn documents(&self, defaults: &CanvasConfig) -> RenderResult<Vec<LessonOverlay>> {
        let mut out = Vec::new();
        for artifact in &self.artifacts {
            for overlay in &artifact.overlays {
                out.push(LessonOverlay {
                    file_name: overlay_file_name(
                        &self.lesson_id,
                        &artifact.artifact_id,
                        &overlay.overlay_id,
                    ),
                    document: overlay.document(defaults)?,
                });
            }
        }
        Ok(out)
    }
}

pub fn overlay_file_name(lesson_id: &str, artifact_id: &str, overlay_id: &str) -> String {
    format!(
        "{}-{}-{}.svg",
        sanitize_component(lesson_id),
        sanitize_component(artifact_id),
        sanitize_component(overlay_id)
    )
}

fn sanitize_component(raw: &str) -> String {
    let cleaned = UNSAFE_FILE_CHARS_RE.replace_all(raw.trim(), "_");
    if cleaned.is_empty() {
        "untitled".to_string()
    } else {
        cleaned.into_owned()
    }
}

pub fn parse_overlay(input: &str) -> Result<Overlay> {
    let raw: OverlayFile = serde_json::from_str(input)?;
    raw.into_overlay()
}

pub fn parse_lesson(input: &str) -> Result<Lesson> {
    let raw: LessonFile = serde_json::from_str(input)?;
    let mut artifacts = Vec::with_capacity(raw.artifacts.len());
    for artifact in raw.artifacts {
        let overlays = artifact
            .overlays
            .into_iter()
            .map(OverlayFile::into_overlay)
            .collect::<Result<Vec<_>>>()
            .map_err(|err| anyhow!("artifact {}: {err}", artifact.artifact_id))?;
        artifacts.push(Artifact {
            artifact_id: artifact.artifact_id,
            overlays,
        });
    }
    Ok(Lesson {
        lesson_id: raw.lesson_id,
        artifacts,
    })
}

pub fn parse_element(input: &str) -> Result<Primitive> {
    let raw: ElementFile = serde_json::from_str(input)?;
    raw.into_primitive()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LessonFile {
    lesson_id: String,
    #[serde(default)]
    artifacts: Vec<ArtifactFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactFile {
    artifact_id: String,
    #[serde(default)]
    overlays: Vec<OverlayFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OverlayFile {
    #[serde(default)]
    overlay_id: Option<String>,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
    #[serde(default)]
    elements: Vec<ElementFile>,
}

impl OverlayFile {
    fn into_overlay(self) -> Result<Overlay> {
        let overlay_id = self.overlay_id.unwrap_or_else(|| "overlay".to_string());
        let elements = self
            .elements
            .into_iter()
            .enumerate()
            .map(|(idx, element)| {
                element
                    .into_primitive()
                    .map_err(|err| anyhow!("overlay {overlay_id}, element {idx}: {err}"))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Overlay {
            overlay_id,
            width: self.width,
            height: self.height,
            elements,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ElementFile {
    shape: String,
    #[serde(default)]
    coordinates: CoordinatesFile,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    style: Option<StyleFile>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    marker_id: Option<String>,
    #[serde(default)]
    font_size: Option<NumberOrString>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoordinatesFile {
    cx: Option<Coord>,
    cy: Option<Coord>,
    r: Option<Coord>,
    x1: Option<Coord>,
    y1: Option<Coord>,
    x2: Option<Coord>,
    y2: Option<Coord>,
    x: Option<Coord>,
    y: Option<Coord>,
    width: Option<Coord>,
    height: Option<Coord>,
    points: Option<Vec<CoordPair>>,
    label_at: Option<CoordPair>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StyleFile {
    stroke: Option<String>,
    stroke_width: Option<NumberOrString>,
    fill: Option<String>,
    opacity: Option<NumberOrString>,
}

impl TryFrom<StyleFile> for StyleOverride {
    type Error = anyhow::Error;

    fn try_from(style: StyleFile) -> Result<Self> {
        Ok(StyleOverride {
            stroke: style.stroke,
            stroke_width: number_field(style.stroke_width.as_ref(), "style.strokeWidth")?,
            fill: style.fill,
            opacity: number_field(style.opacity.as_ref(), "style.opacity")?,
        })
    }
}

fn or_percent(value: Option<Coord>, default: f64) -> Coord {
    value.unwrap_or_else(|| Coord::percent(default))
}

impl ElementFile {
    fn into_primitive(self) -> Result<Primitive> {
        let c = self.coordinates;
        let kind = self.shape.trim().to_ascii_lowercase();
        let mut label = self.label;
        let shape = match kind.as_str() {
            "circle" => Shape::Circle {
                cx: or_percent(c.cx, 50.0),
                cy: or_percent(c.cy, 50.0),
                r: or_percent(c.r, 10.0),
            },
            "line" => Shape::Line {
                x1: or_percent(c.x1, 0.0),
                y1: or_percent(c.y1, 0.0),
                x2: or_percent(c.x2, 100.0),
                y2: or_percent(c.y2, 100.0),
            },
            "rectangle" => Shape::Rectangle {
                x: or_percent(c.x, 10.0),
                y: or_percent(c.y, 10.0),
                width: or_percent(c.width, 80.0),
                height: or_percent(c.height, 80.0),
            },
            "polygon" => Shape::Polygon {
                points: c.points.unwrap_or_default(),
                label_at: c.label_at,
            },
            "arrow" => Shape::Arrow {
                x1: or_percent(c.x1, 0.0),
                y1: or_percent(c.y1, 0.0),
                x2: or_percent(c.x2, 100.0),
                y2: or_percent(c.y2, 100.0),
                marker_id: self.marker_id,
            },
            "label" | "text" => {
                if label.as_deref().is_none_or(str::is_empty) {
                    label = Some(DEFAULT_LABEL_TEXT.to_string());
                }
                let (x, y) = (or_percent(c.x, 50.0), or_percent(c.y, 50.0));
                if kind == "text" {
                    let font_size = number_field(self.font_size.as_ref(), "fontSize")?;
                    Shape::Text { x, y, font_size }
                } else {
                    Shape::Label { x, y }
                }
            }
            other => return Err(anyhow!("unknown shape `{other}`")),
        };
        Ok(Primitive {
            shape,
            category: self.category,
            style: self
                .style
                .map(StyleOverride::try_from)
                .transpose()?
                .unwrap_or_default(),
            label: label.filter(|text| !text.is_empty()),
        })
    }
}
