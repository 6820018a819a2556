use geometry_overlay_renderer::{Config, parse_config, render_overlay};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OverlayRenderOptions {
    width: Option<u32>,
    height: Option<u32>,
    /// Design-system JSON, same shape as the CLI's `--configFile`.
    design_system: Option<String>,
}

fn build_config(options: OverlayRenderOptions) -> Result<Config, String> {
    let mut config = match options.design_system {
        Some(raw) => parse_config(&raw).map_err(|error| error.to_string())?,
        None => Config::default(),
    };
    if let Some(width) = options.width.filter(|w| *w > 0) {
        config.canvas.width = width;
    }
    if let Some(height) = options.height.filter(|h| *h > 0) {
        config.canvas.height = height;
    }
    Ok(config)
}

#[wasm_bindgen]
pub fn render_overlay_svg(
    overlay_json: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<OverlayRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        OverlayRenderOptions::default()
    };

    let config = build_config(options).map_err(|error| JsValue::from_str(&error))?;
    render_overlay(overlay_json, &config).map_err(|error| JsValue::from_str(&format!("{error:#}")))
}
