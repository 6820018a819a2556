use crate::error::RenderResult;
use crate::ir::Document;
use crate::layout::{Geometry, label_anchor, resolve_shape};
use crate::text_metrics::estimate_label_width;
use crate::theme::{ShapeStyle, Theme};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct DocumentDump {
    pub width: u32,
    pub height: u32,
    pub overlay: bool,
    pub primitives: Vec<PrimitiveDump>,
}

#[derive(Debug, Serialize)]
pub struct PrimitiveDump {
    pub index: usize,
    pub category: String,
    pub geometry: Geometry,
    pub style: ShapeStyle,
    pub label: Option<LabelDump>,
}

#[derive(Debug, Serialize)]
pub struct LabelDump {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub estimated_width: f64,
}

impl DocumentDump {
    pub fn from_document(document: &Document, theme: &Theme) -> RenderResult<Self> {
        document.canvas.validate()?;
        let mut primitives = Vec::with_capacity(document.primitives.len());
        for (index, primitive) in document.primitives.iter().enumerate() {
            let geometry = resolve_shape(&primitive.shape, &document.canvas)?;
            let style = theme.resolve_style(primitive.category(), &primitive.style)?;
            let label = match (primitive.label.as_deref(), label_anchor(&geometry)) {
                (Some(text), Some((x, y))) => Some(LabelDump {
                    text: text.to_string(),
                    x,
                    y,
                    estimated_width: estimate_label_width(text, &theme.label),
                }),
                _ => None,
            };
            primitives.push(PrimitiveDump {
                index,
                category: primitive.category().to_string(),
                geometry,
                style,
                label,
            });
        }
        Ok(DocumentDump {
            width: document.canvas.width,
            height: document.canvas.height,
            overlay: document.canvas.overlay,
            primitives,
        })
    }
}

pub fn write_layout_dump(path: &Path, document: &Document, theme: &Theme) -> anyhow::Result<()> {
    let dump = DocumentDump::from_document(document, theme)?;
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
