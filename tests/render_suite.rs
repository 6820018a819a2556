use std::path::{Path, PathBuf};

use geometry_overlay_renderer::{
    Config, RenderError, load_config, parse_lesson, parse_overlay, render_document,
    render_overlay,
};

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn design_system() -> Config {
    load_config(Some(&fixtures().join("design_system.json"))).expect("design system loads")
}

fn render_fixture(rel: &str, config: &Config) -> Result<String, RenderError> {
    let input = std::fs::read_to_string(fixtures().join(rel)).expect("fixture read failed");
    let overlay = parse_overlay(&input).expect("parse failed");
    let document = overlay.document(&config.canvas)?;
    render_document(&document, &config.theme)
}

fn assert_valid_svg(svg: &str, fixture: &str) {
    assert!(svg.contains("<svg"), "{fixture}: missing <svg tag");
    assert!(svg.ends_with("</svg>"), "{fixture}: missing </svg tag");
    assert_eq!(
        svg.matches("<g ").count(),
        svg.matches("</g>").count(),
        "{fixture}: unbalanced groups"
    );
}

#[test]
fn render_all_fixtures() {
    let config = design_system();
    // Keep this list explicit so new fixtures must be added intentionally.
    let candidates = [
        "overlays/circle_center.json",
        "overlays/ziggurat_frame.json",
        "overlays/triangle.json",
    ];
    for rel in candidates {
        let svg = render_fixture(rel, &config).unwrap_or_else(|err| panic!("{rel}: {err}"));
        assert_valid_svg(&svg, rel);
    }
}

#[test]
fn circle_fixture_resolves_percentages() {
    let svg = render_fixture("overlays/circle_center.json", &design_system()).unwrap();
    assert!(svg.contains(r##"<circle cx="200" cy="200" r="40" stroke="#FFD700" stroke-width="4""##));
    // label anchored right of the circle: 200 + 40 + 10
    assert!(svg.contains(r#"<text x="250" y="200""#));
    assert!(svg.contains("Sun disc"));
}

#[test]
fn rectangle_fixture_keeps_paint_order() {
    let svg = render_fixture("overlays/ziggurat_frame.json", &design_system()).unwrap();
    assert!(svg.contains(r#"<rect x="40" y="40" width="320" height="320""#));
    let rect = svg.find(r#"<rect x="40""#).unwrap();
    let line = svg.find("<line").unwrap();
    let marker = svg.find("<marker").unwrap();
    let title = svg.find("Etemenanki").unwrap();
    assert!(rect < line && line < marker && marker < title);
    // rectangle label sits above the top edge: y = 40 - 10
    assert!(svg.contains(r#"<text x="200" y="30""#));
}

#[test]
fn polygon_fixture_uses_explicit_label_anchor() {
    let svg = render_fixture("overlays/triangle.json", &design_system()).unwrap();
    assert!(svg.contains(r#"points="0,0 200,0 100,200""#));
    assert!(svg.contains(r#"<text x="100" y="80""#));
}

#[test]
fn unknown_category_fails_whole_document() {
    let err = render_fixture("overlays/custom_category.json", &design_system()).unwrap_err();
    assert_eq!(
        err,
        RenderError::UnknownShapeCategory {
            category: "moons".to_string()
        }
    );
}

#[test]
fn lesson_fixture_expands_to_named_overlays() {
    let config = design_system();
    let input = std::fs::read_to_string(fixtures().join("lessons/ishtar_gate.json")).unwrap();
    let lesson = parse_lesson(&input).unwrap();
    let overlays = lesson.documents(&config.canvas).unwrap();
    let names: Vec<_> = overlays.iter().map(|o| o.file_name.as_str()).collect();
    assert_eq!(
        names,
        [
            "grade4-lesson03-ishtar-gate-rosettes.svg",
            "grade4-lesson03-ishtar-gate-arch.svg"
        ]
    );

    let arch = render_document(&overlays[1].document, &config.theme).unwrap();
    assert_valid_svg(&arch, "arch");
    assert_eq!(arch.matches("<marker id=").count(), 2);
    assert!(arch.contains(r#"viewBox="0 0 1920 1080""#));
}

#[test]
fn rendering_is_deterministic() {
    let config = design_system();
    let first = render_fixture("overlays/ziggurat_frame.json", &config).unwrap();
    let second = render_fixture("overlays/ziggurat_frame.json", &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn malformed_style_values_are_not_replaced_by_defaults() {
    let input = r#"{"overlayId": "bad-style", "elements": [
        {"shape": "circle", "style": {"strokeWidth": "thick", "opacity": "half"}}
    ]}"#;
    let err = render_overlay(input, &design_system()).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("element 0"), "{message}");
    assert!(message.contains("style.strokeWidth"), "{message}");
}

#[test]
fn huge_coordinates_render_as_numbers() {
    let input = r#"{"width": 400, "height": 400, "elements": [
        {"shape": "line", "coordinates": {"x1": 1e307, "y1": 0, "x2": 0, "y2": 0}}
    ]}"#;
    let svg = render_overlay(input, &design_system()).unwrap();
    assert!(!svg.contains("inf"));
    assert_valid_svg(&svg, "huge");
}
