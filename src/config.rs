use crate::theme::{ShapeStyle, Theme};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

const FALLBACK_STROKE: &str = "none";
const FALLBACK_STROKE_WIDTH: f64 = 1.0;
const FALLBACK_FILL: &str = "none";
const FALLBACK_OPACITY: f64 = 1.0;
const LABEL_CATEGORY: &str = "labels";
const TEXT_CATEGORY: &str = "text";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Pixel scale applied when rasterising to PNG.
    pub scale: f32,
    pub font_family: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            font_family: "Inter".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub theme: Theme,
    pub canvas: CanvasConfig,
    pub render: RenderConfig,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    let config = parse_config(&contents)
        .map_err(|err| anyhow::anyhow!("{}: {err}", path.display()))?;
    log::debug!(
        "loaded {} style categories from {}",
        config.theme.styles.len(),
        path.display()
    );
    Ok(config)
}

/// Parses a design-system document. Strict JSON first, then JSON5 so
/// hand-edited files with comments or trailing commas still load.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(json_err) => json5::from_str(contents).map_err(|json5_err| {
            anyhow::anyhow!("invalid design system ({json_err}; as JSON5: {json5_err})")
        })?,
    };
    apply_config_file(Config::default(), parsed)
}

fn apply_config_file(mut config: Config, parsed: ConfigFile) -> anyhow::Result<Config> {
    if let Some(groups) = parsed.overlay_styles {
        for (group, categories) in groups {
            for (category, entry) in categories {
                let field_prefix = format!("overlayStyles.{group}.{category}");
                if category == LABEL_CATEGORY {
                    apply_label_font(&mut config.theme, &entry, &field_prefix)?;
                }
                if category == TEXT_CATEGORY {
                    apply_text_font(&mut config.theme, &entry, &field_prefix)?;
                }
                let base = config.theme.styles.get(&category);
                let style = entry.into_style(base, &field_prefix)?;
                config.theme.styles.insert(category, style);
            }
        }
    }
    if let Some(canvas) = parsed.canvas {
        if let Some(width) = pixel_size(canvas.width.as_ref(), "canvas.width")? {
            config.canvas.width = width;
        }
        if let Some(height) = pixel_size(canvas.height.as_ref(), "canvas.height")? {
            config.canvas.height = height;
        }
    }
    if let Some(render) = parsed.render {
        if let Some(scale) = number_field(render.scale.as_ref(), "render.scale")? {
            config.render.scale = scale as f32;
        }
        if let Some(font_family) = render.font_family {
            config.render.font_family = font_family;
        }
    }
    Ok(config)
}

fn apply_label_font(
    theme: &mut Theme,
    entry: &StyleEntry,
    field_prefix: &str,
) -> anyhow::Result<()> {
    if let Some(v) = &entry.font_family {
        theme.label.font_family = v.clone();
    }
    let font_size = number_field(entry.font_size.as_ref(), &format!("{field_prefix}.fontSize"))?;
    if let Some(v) = font_size {
        theme.label.font_size = v;
    }
    if let Some(v) = &entry.font_weight {
        theme.label.font_weight = v.as_string();
    }
    if let Some(v) = &entry.background {
        theme.label.background = v.clone();
    }
    Ok(())
}

fn apply_text_font(
    theme: &mut Theme,
    entry: &StyleEntry,
    field_prefix: &str,
) -> anyhow::Result<()> {
    if let Some(v) = &entry.font_family {
        theme.text.font_family = v.clone();
    }
    let font_size = number_field(entry.font_size.as_ref(), &format!("{field_prefix}.fontSize"))?;
    if let Some(v) = font_size {
        theme.text.font_size = v;
    }
    Ok(())
}

/// Reads an optional numeric field, naming the field when the value is not a number.
pub(crate) fn number_field(
    value: Option<&NumberOrString>,
    field: &str,
) -> anyhow::Result<Option<f64>> {
    value
        .map(|v| v.as_f64().map_err(|err| anyhow::anyhow!("{field}: {err}")))
        .transpose()
}

fn pixel_size(value: Option<&NumberOrString>, field: &str) -> anyhow::Result<Option<u32>> {
    let Some(size) = number_field(value, field)? else {
        return Ok(None);
    };
    let rounded = size.round();
    if rounded < 1.0 || rounded > u32::MAX as f64 {
        return Err(anyhow::anyhow!("{field}: `{size}` is not a valid pixel size"));
    }
    Ok(Some(rounded as u32))
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    overlay_styles: Option<BTreeMap<String, BTreeMap<String, StyleEntry>>>,
    canvas: Option<CanvasConfigFile>,
    render: Option<RenderConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct StyleEntry {
    stroke: Option<String>,
    stroke_width: Option<NumberOrString>,
    fill: Option<String>,
    opacity: Option<NumberOrString>,
    font_family: Option<String>,
    font_size: Option<NumberOrString>,
    font_weight: Option<NumberOrString>,
    background: Option<String>,
}

impl StyleEntry {
    fn into_style(
        self,
        base: Option<&ShapeStyle>,
        field_prefix: &str,
    ) -> anyhow::Result<ShapeStyle> {
        let stroke_width = number_field(
            self.stroke_width.as_ref(),
            &format!("{field_prefix}.strokeWidth"),
        )?;
        let opacity = number_field(self.opacity.as_ref(), &format!("{field_prefix}.opacity"))?;
        Ok(ShapeStyle {
            stroke: self
                .stroke
                .or_else(|| base.map(|b| b.stroke.clone()))
                .unwrap_or_else(|| FALLBACK_STROKE.to_string()),
            stroke_width: stroke_width
                .or_else(|| base.map(|b| b.stroke_width))
                .unwrap_or(FALLBACK_STROKE_WIDTH),
            fill: self
                .fill
                .or_else(|| base.map(|b| b.fill.clone()))
                .unwrap_or_else(|| FALLBACK_FILL.to_string()),
            opacity: opacity
                .or_else(|| base.map(|b| b.opacity))
                .unwrap_or(FALLBACK_OPACITY),
        })
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct CanvasConfigFile {
    width: Option<NumberOrString>,
    height: Option<NumberOrString>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    scale: Option<NumberOrString>,
    font_family: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum NumberOrString {
    Number(f64),
    String(String),
}

impl NumberOrString {
    /// Plain numbers and numeric strings, with an optional `px` suffix.
    pub(crate) fn as_f64(&self) -> anyhow::Result<f64> {
        let value = match self {
            NumberOrString::Number(val) => *val,
            NumberOrString::String(val) => val
                .trim()
                .trim_end_matches("px")
                .trim_end()
                .parse::<f64>()
                .map_err(|_| anyhow::anyhow!("invalid number `{val}`"))?,
        };
        if !value.is_finite() {
            return Err(anyhow::anyhow!("invalid number `{}`", self.as_string()));
        }
        Ok(value)
    }

    fn as_string(&self) -> String {
        match self {
            NumberOrString::Number(val) => val.to_string(),
            NumberOrString::String(val) => val.clone(),
        }
    }
}
