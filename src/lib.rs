#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod figures;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{CanvasConfig, Config, RenderConfig, load_config, parse_config};
pub use error::{RenderError, RenderResult};
pub use ir::{Canvas, Coord, CoordPair, Document, Primitive, Shape, StyleOverride};
pub use layout::{Geometry, label_anchor, resolve_coord, resolve_shape};
pub use parser::{parse_element, parse_lesson, parse_overlay};
pub use render::render_document;
pub use theme::{LabelTheme, ShapeStyle, Theme};

/// Parse an overlay JSON document and render it against `config`.
pub fn render_overlay(input: &str, config: &Config) -> anyhow::Result<String> {
    let overlay = parse_overlay(input)?;
    let document = overlay.document(&config.canvas)?;
    Ok(render_document(&document, &config.theme)?)
}
