use crate::config::RenderConfig;
use crate::error::RenderResult;
use crate::ir::{Canvas, Document, Primitive, Shape, StyleOverride};
use crate::layout::{Geometry, label_anchor, resolve_shape};
use crate::text_metrics::estimate_label_width;
use crate::theme::{ShapeStyle, Theme};
use anyhow::Result;
use std::collections::HashSet;
use std::path::Path;

const LABEL_CATEGORY: &str = "labels";
const SVG_FOOTER: &str = "</svg>";
const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Marker ids already handed out within one document.
#[derive(Debug, Default)]
pub struct MarkerScope {
    used: HashSet<String>,
}

impl MarkerScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, base: &str) -> String {
        let mut candidate = base.to_string();
        let mut ordinal = 1;
        while !self.used.insert(candidate.clone()) {
            ordinal += 1;
            candidate = format!("{base}-{ordinal}");
        }
        candidate
    }
}

pub fn render_document(document: &Document, theme: &Theme) -> RenderResult<String> {
    document.canvas.validate()?;
    let mut svg = svg_header(&document.canvas);
    let mut markers = MarkerScope::new();
    for primitive in &document.primitives {
        svg.push_str(&render_primitive(
            primitive,
            &document.canvas,
            theme,
            &mut markers,
        )?);
    }
    svg.push_str(SVG_FOOTER);
    log::debug!(
        "rendered {} primitives on {}x{} canvas",
        document.primitives.len(),
        document.canvas.width,
        document.canvas.height
    );
    Ok(svg)
}

pub fn svg_header(canvas: &Canvas) -> String {
    let (w, h) = (canvas.width, canvas.height);
    if canvas.overlay {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\"\n     viewBox=\"0 0 {w} {h}\"\n     width=\"{w}\"\n     height=\"{h}\"\n     style=\"position: absolute; top: 0; left: 0; pointer-events: none;\">\n"
        )
    } else {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n"
        )
    }
}

pub fn render_primitive(
    primitive: &Primitive,
    canvas: &Canvas,
    theme: &Theme,
    markers: &mut MarkerScope,
) -> RenderResult<String> {
    let geometry = resolve_shape(&primitive.shape, canvas)?;
    let style = theme.resolve_style(primitive.category(), &primitive.style)?;

    let mut svg = match &geometry {
        Geometry::Label { x, y } => {
            let text = primitive.label.as_deref().unwrap_or_default();
            return Ok(render_label(text, *x, *y, &style, theme));
        }
        Geometry::Text { x, y } => {
            let font_size = match &primitive.shape {
                Shape::Text { font_size, .. } => *font_size,
                _ => None,
            };
            let text = primitive.label.as_deref().unwrap_or_default();
            return Ok(render_text(text, *x, *y, font_size, &style, theme));
        }
        Geometry::Circle { cx, cy, r } => render_circle(*cx, *cy, *r, &style),
        Geometry::Line { x1, y1, x2, y2 } => render_line(*x1, *y1, *x2, *y2, &style, None),
        Geometry::Rectangle {
            x,
            y,
            width,
            height,
        } => render_rect(*x, *y, *width, *height, &style),
        Geometry::Polygon { points, .. } => render_polygon(points, &style),
        Geometry::Arrow { x1, y1, x2, y2 } => {
            let supplied = match &primitive.shape {
                Shape::Arrow { marker_id, .. } => marker_id.clone(),
                _ => None,
            };
            let base = supplied.unwrap_or_else(|| {
                content_marker_id(*x1, *y1, *x2, *y2, &style, primitive.label.as_deref())
            });
            let marker_id = markers.claim(&base);
            let mut svg = arrow_marker_def(&marker_id, &style.stroke);
            svg.push_str(&render_line(*x1, *y1, *x2, *y2, &style, Some(&marker_id)));
            svg
        }
    };

    if let Some(text) = primitive.label.as_deref() {
        if let Some((x, y)) = label_anchor(&geometry) {
            let label_style = theme.resolve_style(LABEL_CATEGORY, &StyleOverride::default())?;
            svg.push_str(&render_label(text, x, y, &label_style, theme));
        }
    }
    Ok(svg)
}

fn render_circle(cx: f64, cy: f64, r: f64, style: &ShapeStyle) -> String {
    format!(
        "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" stroke=\"{}\" stroke-width=\"{}\" fill=\"{}\" opacity=\"{}\"/>\n",
        fmt_num(cx),
        fmt_num(cy),
        fmt_num(r),
        escape_xml(&style.stroke),
        fmt_num(style.stroke_width),
        escape_xml(&style.fill),
        fmt_num(style.opacity)
    )
}

fn render_line(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    style: &ShapeStyle,
    marker_id: Option<&str>,
) -> String {
    let marker = marker_id
        .map(|id| format!(" marker-end=\"url(#{})\"", escape_xml(id)))
        .unwrap_or_default();
    format!(
        "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\" opacity=\"{}\"{marker}/>\n",
        fmt_num(x1),
        fmt_num(y1),
        fmt_num(x2),
        fmt_num(y2),
        escape_xml(&style.stroke),
        fmt_num(style.stroke_width),
        fmt_num(style.opacity)
    )
}

fn render_rect(x: f64, y: f64, width: f64, height: f64, style: &ShapeStyle) -> String {
    format!(
        "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" stroke=\"{}\" stroke-width=\"{}\" fill=\"{}\" opacity=\"{}\"/>\n",
        fmt_num(x),
        fmt_num(y),
        fmt_num(width),
        fmt_num(height),
        escape_xml(&style.stroke),
        fmt_num(style.stroke_width),
        escape_xml(&style.fill),
        fmt_num(style.opacity)
    )
}

fn render_polygon(points: &[(f64, f64)], style: &ShapeStyle) -> String {
    let points_attr = points
        .iter()
        .map(|(x, y)| format!("{},{}", fmt_num(*x), fmt_num(*y)))
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "  <polygon points=\"{points_attr}\" stroke=\"{}\" stroke-width=\"{}\" fill=\"{}\" opacity=\"{}\"/>\n",
        escape_xml(&style.stroke),
        fmt_num(style.stroke_width),
        escape_xml(&style.fill),
        fmt_num(style.opacity)
    )
}

fn arrow_marker_def(marker_id: &str, color: &str) -> String {
    format!(
        "  <defs>\n    <marker id=\"{}\" markerWidth=\"10\" markerHeight=\"10\" refX=\"5\" refY=\"3\" orient=\"auto\" markerUnits=\"strokeWidth\">\n      <path d=\"M0,0 L0,6 L9,3 z\" fill=\"{}\"/>\n    </marker>\n  </defs>\n",
        escape_xml(marker_id),
        escape_xml(color)
    )
}

fn render_label(text: &str, x: f64, y: f64, style: &ShapeStyle, theme: &Theme) -> String {
    let label = &theme.label;
    let width = estimate_label_width(text, label);
    format!(
        "  <g opacity=\"{}\">\n    <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"{}\"/>\n    <text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\" text-anchor=\"middle\" dominant-baseline=\"middle\">{}</text>\n  </g>\n",
        fmt_num(style.opacity),
        fmt_num(x - width / 2.0),
        fmt_num(y - label.baseline_offset),
        fmt_num(width),
        fmt_num(label.box_height),
        escape_xml(&label.background),
        fmt_num(label.corner_radius),
        fmt_num(x),
        fmt_num(y),
        escape_xml(&label.font_family),
        fmt_num(label.font_size),
        escape_xml(&label.font_weight),
        escape_xml(&style.fill),
        escape_xml(&style.stroke),
        fmt_num(style.stroke_width),
        escape_xml(text)
    )
}

fn render_text(
    text: &str,
    x: f64,
    y: f64,
    font_size: Option<f64>,
    style: &ShapeStyle,
    theme: &Theme,
) -> String {
    format!(
        "  <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\" opacity=\"{}\">{}</text>\n",
        fmt_num(x),
        fmt_num(y),
        escape_xml(&theme.text.font_family),
        fmt_num(font_size.unwrap_or(theme.text.font_size)),
        escape_xml(&style.fill),
        fmt_num(style.opacity),
        escape_xml(text)
    )
}

/// FNV-1a over the arrow's resolved content, so ids are stable across runs.
fn content_marker_id(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    style: &ShapeStyle,
    label: Option<&str>,
) -> String {
    let content = format!(
        "{},{},{},{}|{}|{}|{}",
        fmt_num(x1),
        fmt_num(y1),
        fmt_num(x2),
        fmt_num(y2),
        style.stroke,
        fmt_num(style.stroke_width),
        label.unwrap_or_default()
    );
    let hash = content.bytes().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
    });
    format!("arrowhead-{hash:016x}")
}

/// At most two decimals, trailing zeros dropped.
pub fn fmt_num(value: f64) -> String {
    let text = format!("{value:.2}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = render_cfg.font_family.clone();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let scale = render_cfg.scale.max(0.01);
    let width = ((size.width() as f32) * scale).ceil() as u32;
    let height = ((size.height() as f32) * scale).ceil() as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate {width}x{height} pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap_mut,
    );
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use crate::ir::{Coord, CoordPair};

    fn square_canvas() -> Canvas {
        Canvas::new(400, 400).unwrap()
    }

    fn render(primitives: Vec<Primitive>) -> RenderResult<String> {
        let document = Document {
            canvas: square_canvas(),
            primitives,
        };
        render_document(&document, &Theme::design_system())
    }

    #[test]
    fn formats_numbers_compactly() {
        assert_eq!(fmt_num(200.0), "200");
        assert_eq!(fmt_num(0.5), "0.5");
        assert_eq!(fmt_num(33.333333), "33.33");
        assert_eq!(fmt_num(-0.001), "0");
        assert_eq!(fmt_num(-12.5), "-12.5");
        assert_eq!(fmt_num(100.0), "100");
        assert_eq!(fmt_num(0.0), "0");
    }

    #[test]
    fn huge_finite_values_stay_numeric() {
        let text = fmt_num(1e307);
        assert!(text.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(text.parse::<f64>().unwrap(), 1e307);
        assert!(fmt_num(-1e307).starts_with('-'));

        let svg = render(vec![Shape::line(1e307, 0.0, 0.0, 0.0).into()]).unwrap();
        assert!(!svg.contains("inf"));
    }

    #[test]
    fn circle_uses_percent_geometry() {
        let svg = render(vec![Shape::circle("50%", "50%", "10%").into()]).unwrap();
        assert!(svg.contains(r##"<circle cx="200" cy="200" r="40" stroke="#D4AF37""##));
    }

    #[test]
    fn rectangle_uses_percent_geometry() {
        let svg = render(vec![Shape::rect("10%", "10%", "80%", "80%").into()]).unwrap();
        assert!(svg.contains(r#"<rect x="40" y="40" width="320" height="320""#));
    }

    #[test]
    fn line_has_no_fill_attribute() {
        let svg = render(vec![Shape::line(0.0, 0.0, "100%", "100%").into()]).unwrap();
        let line = svg.lines().find(|l| l.contains("<line")).unwrap();
        assert!(line.contains(r#"x2="400" y2="400""#));
        assert!(!line.contains("fill="));
    }

    #[test]
    fn polygon_points_are_space_separated() {
        let document = Document::new(Canvas::new(200, 200).unwrap()).with(Shape::polygon(vec![
            CoordPair::new("0%", "0%"),
            CoordPair::new("100%", "0%"),
            CoordPair::new("50%", "100%"),
        ]));
        let svg = render_document(&document, &Theme::design_system()).unwrap();
        assert!(svg.contains(r#"points="0,0 200,0 100,200""#));
    }

    #[test]
    fn labels_attach_to_circle_edge() {
        let circle = Primitive::new(Shape::circle(100.0, 100.0, 20.0)).with_label("Sun");
        let svg = render(vec![circle]).unwrap();
        // anchor (130, 100); box width 3 * 8 + 16 = 40
        assert!(svg.contains(r#"<rect x="110" y="82" width="40" height="28""#));
        assert!(svg.contains(r#"<text x="130" y="100""#));
        assert!(svg.contains(">Sun</text>"));
    }

    #[test]
    fn text_has_no_background_box() {
        let caption = Primitive::new(Shape::text(200.0, 380.0)).with_label("Basic Circle");
        let svg = render(vec![caption]).unwrap();
        assert!(svg.contains(
            r##"<text x="200" y="380" text-anchor="middle" font-family="Arial" font-size="14" fill="#333" opacity="1">Basic Circle</text>"##
        ));
        assert!(!svg.contains("<rect"));
        assert!(!svg.contains("<g "));

        let glyph = Primitive::new(Shape::Text {
            x: Coord::Number(10.0),
            y: Coord::Number(10.0),
            font_size: Some(24.0),
        })
        .with_style(StyleOverride {
            fill: Some("#4B0082".to_string()),
            ..StyleOverride::default()
        })
        .with_label("♈");
        let svg = render(vec![glyph]).unwrap();
        assert!(svg.contains(r##"font-size="24" fill="#4B0082""##));
    }

    #[test]
    fn label_text_is_escaped() {
        let label = Primitive::new(Shape::label("50%", "50%")).with_label("a < b & \"c\"");
        let svg = render(vec![label]).unwrap();
        assert!(svg.contains("a &lt; b &amp; &quot;c&quot;"));
    }

    #[test]
    fn arrow_references_its_marker() {
        let svg = render(vec![Shape::arrow(0.0, 0.0, 100.0, 0.0).into()]).unwrap();
        let id_start = svg.find("<marker id=\"").unwrap() + "<marker id=\"".len();
        let id_end = svg[id_start..].find('"').unwrap() + id_start;
        let id = &svg[id_start..id_end];
        assert!(id.starts_with("arrowhead-"));
        assert!(svg.contains(&format!("marker-end=\"url(#{id})\"")));
    }

    #[test]
    fn identical_arrows_get_distinct_marker_ids() {
        let arrow: Primitive = Shape::arrow(0.0, 0.0, 100.0, 0.0).into();
        let svg = render(vec![arrow.clone(), arrow]).unwrap();
        let ids: Vec<&str> = svg
            .match_indices("<marker id=\"")
            .map(|(idx, m)| {
                let start = idx + m.len();
                let end = svg[start..].find('"').unwrap() + start;
                &svg[start..end]
            })
            .collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
        assert_eq!(ids[1], format!("{}-2", ids[0]));
    }

    #[test]
    fn marker_ids_are_deterministic() {
        let arrow: Primitive = Shape::arrow("10%", "10%", "90%", "90%").into();
        let first = render(vec![arrow.clone()]).unwrap();
        let second = render(vec![arrow]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn supplied_marker_id_is_used() {
        let arrow = Shape::Arrow {
            x1: Coord::Number(0.0),
            y1: Coord::Number(0.0),
            x2: Coord::Number(10.0),
            y2: Coord::Number(10.0),
            marker_id: Some("north".to_string()),
        };
        let svg = render(vec![arrow.into()]).unwrap();
        assert!(svg.contains(r#"<marker id="north""#));
        assert!(svg.contains("url(#north)"));
    }

    #[test]
    fn first_failure_aborts_document() {
        let bad = Primitive::new(Shape::polygon(vec![
            CoordPair::new(0.0, 0.0),
            CoordPair::new(1.0, 1.0),
        ]));
        let err = render(vec![Shape::circle(1.0, 1.0, 1.0).into(), bad]).unwrap_err();
        assert_eq!(err, RenderError::DegeneratePolygon { points: 2 });
    }

    #[test]
    fn unknown_category_without_override_fails() {
        let primitive = Primitive::new(Shape::circle(1.0, 1.0, 1.0)).with_category("moons");
        let err = render(vec![primitive]).unwrap_err();
        assert_eq!(
            err,
            RenderError::UnknownShapeCategory {
                category: "moons".to_string()
            }
        );

        let styled = Primitive::new(Shape::circle(1.0, 1.0, 1.0))
            .with_category("moons")
            .with_style(StyleOverride::full("silver", 1.0, "none", 1.0));
        assert!(render(vec![styled]).is_ok());
    }

    #[test]
    fn preserves_input_order() {
        let svg = render(vec![
            Shape::circle(1.0, 1.0, 1.0).into(),
            Shape::rect(2.0, 2.0, 2.0, 2.0).into(),
            Shape::line(3.0, 3.0, 4.0, 4.0).into(),
        ])
        .unwrap();
        let circle = svg.find("<circle").unwrap();
        let rect = svg.find("<rect").unwrap();
        let line = svg.find("<line").unwrap();
        assert!(circle < rect && rect < line);
    }

    #[test]
    fn header_declares_canvas_frame() {
        let svg = render(Vec::new()).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"width="400" height="400" viewBox="0 0 400 400""#));
        assert!(svg.ends_with("</svg>"));

        let overlay = Document::new(Canvas::overlay(1920, 1080).unwrap());
        let svg = render_document(&overlay, &Theme::design_system()).unwrap();
        assert!(svg.contains(r#"viewBox="0 0 1920 1080""#));
        assert!(svg.contains("pointer-events: none;"));
    }

    #[test]
    fn zero_sized_canvas_is_rejected() {
        let document = Document::new(Canvas {
            width: 0,
            height: 10,
            overlay: false,
        });
        assert!(matches!(
            render_document(&document, &Theme::design_system()),
            Err(RenderError::InvalidCanvas { .. })
        ));
    }
}
