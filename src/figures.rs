//! Curriculum figure catalog: each shape family in three progressively
//! harder versions (grades 3 to 5), built from overlay primitives.
//!
//! Ellipses and curves have no primitive of their own, so they are drawn as
//! many-sided polygons and short line segments.

use crate::error::RenderResult;
use crate::ir::{Canvas, Coord, CoordPair, Document, Primitive, Shape, StyleOverride};
use std::f64::consts::PI;

#[derive(Debug, Clone)]
pub struct Figure {
    /// Output path relative to the catalog root.
    pub path: &'static str,
    pub title: &'static str,
    pub grade: u8,
    pub document: Document,
}

type Builder = fn() -> RenderResult<Document>;

const FIGURES: &[(&str, &str, u8, Builder)] = &[
    ("shapes/circle_01_simple.svg", "Basic Circle", 3, circle_simple),
    ("shapes/circle_02_rosette_6.svg", "6-Petal Rosette", 4, rosette_6),
    ("shapes/circle_03_rosette_12.svg", "12-Fold Rosette", 5, rosette_12),
    ("shapes/triangle_01_simple.svg", "Equilateral Triangle", 3, triangle_simple),
    ("shapes/triangle_02_ziggurat_3.svg", "3-Level Ziggurat", 4, ziggurat_3),
    ("shapes/triangle_03_ziggurat_7.svg", "7-Level Ziggurat", 5, ziggurat_7),
    ("shapes/square_01_simple.svg", "Basic Square", 3, square_simple),
    ("shapes/square_02_grid.svg", "Grid Pattern", 4, square_grid),
    ("shapes/square_03_city_plan.svg", "Urban Grid Plan", 5, city_plan),
    ("shapes/crescent_01_simple.svg", "Lunar Crescent", 3, crescent_simple),
    ("shapes/crescent_02_stars.svg", "Crescent with Stars", 4, crescent_stars),
    ("shapes/crescent_03_complex.svg", "Divine Crescent", 5, crescent_complex),
    ("shapes/star_8_01_simple.svg", "8-Pointed Star", 3, star_8_simple),
    ("shapes/star_8_02_rosette.svg", "8-Petal Rosette (Ishtar)", 4, star_8_rosette),
    ("shapes/star_8_03_ornate.svg", "Venus Star (Inanna/Ishtar)", 5, star_8_ornate),
    ("shapes/star_6_01_simple.svg", "6-Pointed Star", 3, star_6_simple),
    ("shapes/star_6_02_rosette.svg", "Hexagonal Rosette", 4, star_6_rosette),
    ("shapes/star_6_03_nested.svg", "Nested Hexagonal Patterns", 5, star_6_nested),
    ("shapes/star_12_01_simple.svg", "12-Pointed Star", 3, star_12_simple),
    ("shapes/star_12_02_zodiac.svg", "Zodiac Wheel", 4, zodiac_wheel),
    ("shapes/star_12_03_full.svg", "Full Zodiac Wheel", 5, full_zodiac),
    ("patterns/zigzag_01_simple.svg", "Zigzag (Water Pattern)", 3, zigzag_simple),
    ("patterns/zigzag_02_double.svg", "Double Zigzag Band", 4, zigzag_double),
    ("patterns/zigzag_03_guilloche.svg", "Guilloche Pattern (Enki's Waters)", 5, guilloche),
    ("patterns/spiral_01_simple.svg", "Spiral", 3, spiral_simple),
    ("patterns/spiral_02_double.svg", "Double Spiral", 4, spiral_double),
    ("patterns/spiral_03_serpents.svg", "Intertwined Serpents (Ningishzida)", 5, serpents),
    ("shapes/cylinder_01_simple.svg", "Cylinder", 3, cylinder_simple),
    ("shapes/cylinder_02_bands.svg", "Cylinder with Bands", 4, cylinder_bands),
    ("shapes/cylinder_03_seal.svg", "Cylinder Seal (Carved)", 5, cylinder_seal),
    ("shapes/cone_01_simple.svg", "Cone", 3, cone_simple),
    ("shapes/cone_02_bands.svg", "Cone with Bands", 4, cone_bands),
    ("shapes/cone_03_spire.svg", "Decorative Conical Spire", 5, cone_spire),
    ("shapes/composite_01_simple.svg", "Composite: Circle + Star", 3, composite_simple),
    ("shapes/composite_02_layered.svg", "Composite: Square + Circle + Star", 4, composite_layered),
    ("shapes/composite_03_deity.svg", "Divine Composite Symbol", 5, composite_deity),
];

const ELLIPSE_SIDES: usize = 48;
const CURVE_STEPS: usize = 8;
const ZODIAC_SIGNS: [&str; 12] = [
    "♈", "♉", "♊", "♋", "♌", "♍", "♎", "♏", "♐", "♑", "♒", "♓",
];

pub fn catalog() -> RenderResult<Vec<Figure>> {
    FIGURES
        .iter()
        .map(|(path, title, grade, build)| {
            let mut document = build()?;
            let canvas = document.canvas;
            document.push(caption(&canvas, title));
            Ok(Figure {
                path: *path,
                title: *title,
                grade: *grade,
                document,
            })
        })
        .collect()
}

/// Vertices of a star alternating outer and inner radius, first point straight up.
pub fn star_points(
    cx: f64,
    cy: f64,
    outer: f64,
    inner_ratio: f64,
    points: usize,
) -> Vec<CoordPair> {
    (0..points * 2)
        .map(|i| {
            let angle = (i as f64 * 180.0 / points as f64 - 90.0).to_radians();
            let radius = if i % 2 == 0 { outer } else { outer * inner_ratio };
            point(cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect()
}

pub fn regular_polygon(
    cx: f64,
    cy: f64,
    r: f64,
    sides: usize,
    rotation_deg: f64,
) -> Vec<CoordPair> {
    (0..sides)
        .map(|i| {
            let angle = (i as f64 * 360.0 / sides as f64 + rotation_deg).to_radians();
            point(cx + r * angle.cos(), cy + r * angle.sin())
        })
        .collect()
}

fn ellipse_points(cx: f64, cy: f64, rx: f64, ry: f64) -> Vec<CoordPair> {
    (0..ELLIPSE_SIDES)
        .map(|i| {
            let angle = i as f64 * 2.0 * PI / ELLIPSE_SIDES as f64;
            point(cx + rx * angle.cos(), cy + ry * angle.sin())
        })
        .collect()
}

/// Samples a quadratic Bézier, excluding the start point.
fn quad_curve(start: (f64, f64), control: (f64, f64), end: (f64, f64)) -> Vec<(f64, f64)> {
    (1..=CURVE_STEPS)
        .map(|step| {
            let t = step as f64 / CURVE_STEPS as f64;
            let u = 1.0 - t;
            (
                u * u * start.0 + 2.0 * u * t * control.0 + t * t * end.0,
                u * u * start.1 + 2.0 * u * t * control.1 + t * t * end.1,
            )
        })
        .collect()
}

fn point(x: f64, y: f64) -> CoordPair {
    CoordPair(Coord::Number(x), Coord::Number(y))
}

fn paint(shape: Shape, stroke: &str, stroke_width: f64, fill: &str) -> Primitive {
    Primitive::new(shape).with_style(StyleOverride::full(stroke, stroke_width, fill, 1.0))
}

fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64, stroke: &str, width: f64, fill: &str) -> Primitive {
    paint(Shape::polygon(ellipse_points(cx, cy, rx, ry)), stroke, width, fill)
}

/// Joins consecutive points with line segments.
fn polyline(doc: &mut Document, points: &[(f64, f64)], stroke: &str, width: f64, opacity: f64) {
    for pair in points.windows(2) {
        let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
        doc.push(
            Primitive::new(Shape::line(x1, y1, x2, y2))
                .with_style(StyleOverride::full(stroke, width, "none", opacity)),
        );
    }
}

fn caption(canvas: &Canvas, title: &str) -> Primitive {
    let x = canvas.width_f() / 2.0;
    let y = canvas.height_f() - 20.0;
    Primitive::new(Shape::text(x, y)).with_label(title)
}

fn standard() -> RenderResult<Document> {
    Ok(Document::new(Canvas::new(400, 400)?))
}

fn large() -> RenderResult<Document> {
    Ok(Document::new(Canvas::new(500, 500)?))
}

fn petals(doc: &mut Document, count: usize, spread: f64, r: f64, stroke: &str, width: f64) {
    for i in 0..count {
        let angle = (i as f64 * 360.0 / count as f64).to_radians();
        doc.push(paint(
            Shape::circle(200.0 + spread * angle.cos(), 200.0 + spread * angle.sin(), r),
            stroke,
            width,
            "none",
        ));
    }
}

fn circle_simple() -> RenderResult<Document> {
    Ok(standard()?
        .with(paint(Shape::circle(200.0, 200.0, 150.0), "#2C5F8D", 3.0, "none"))
        .with(paint(Shape::circle(200.0, 200.0, 3.0), "none", 0.0, "#2C5F8D")))
}

fn rosette_6() -> RenderResult<Document> {
    let mut doc = standard()?;
    petals(&mut doc, 6, 60.0, 60.0, "#8B4513", 2.0);
    doc.push(paint(Shape::circle(200.0, 200.0, 60.0), "#8B4513", 3.0, "none"));
    Ok(doc)
}

fn rosette_12() -> RenderResult<Document> {
    let mut doc = standard()?;
    petals(&mut doc, 12, 50.0, 50.0, "#DAA520", 1.5);
    doc.push(paint(Shape::circle(200.0, 200.0, 50.0), "#DAA520", 3.0, "none"));
    Ok(doc)
}

fn triangle_simple() -> RenderResult<Document> {
    let height = 150.0 * 3f64.sqrt() / 2.0;
    let points = vec![
        point(200.0, 80.0),
        point(125.0, 80.0 + height),
        point(275.0, 80.0 + height),
    ];
    Ok(standard()?.with(paint(Shape::polygon(points), "#8B0000", 3.0, "none")))
}

fn ziggurat_3() -> RenderResult<Document> {
    let mut doc = standard()?;
    for (x, y, w, h, fill) in [
        (100.0, 260.0, 200.0, 40.0, "#CD853F"),
        (130.0, 220.0, 140.0, 40.0, "#D2691E"),
        (160.0, 180.0, 80.0, 40.0, "#DEB887"),
        (180.0, 160.0, 40.0, 20.0, "#F4A460"),
    ] {
        doc.push(paint(Shape::rect(x, y, w, h), "#8B4513", 2.0, fill));
    }
    Ok(doc)
}

fn ziggurat_7() -> RenderResult<Document> {
    const LEVEL_COLORS: [&str; 7] = [
        "#8B4513", "#A0522D", "#CD853F", "#D2691E", "#DEB887", "#F4A460", "#FFE4B5",
    ];
    let mut doc = large()?;
    for (i, fill) in LEVEL_COLORS.iter().enumerate() {
        let width = 280.0 - i as f64 * 35.0;
        let x = 250.0 - width / 2.0;
        let y = 420.0 - i as f64 * 35.0;
        doc.push(paint(Shape::rect(x, y, width, 35.0), "#654321", 1.5, fill));
    }
    doc.push(paint(Shape::rect(230.0, 175.0, 40.0, 20.0), "#654321", 1.5, "#FFD700"));
    Ok(doc)
}

fn square_simple() -> RenderResult<Document> {
    Ok(standard()?.with(paint(Shape::rect(100.0, 100.0, 200.0, 200.0), "#4169E1", 3.0, "none")))
}

fn square_grid() -> RenderResult<Document> {
    let mut doc = standard()?;
    for i in 0..5 {
        let offset = 100.0 + i as f64 * 50.0;
        doc.push(paint(Shape::line(offset, 100.0, offset, 300.0), "#4169E1", 2.0, "none"));
        doc.push(paint(Shape::line(100.0, offset, 300.0, offset), "#4169E1", 2.0, "none"));
    }
    Ok(doc)
}

fn city_plan() -> RenderResult<Document> {
    let mut doc = large()?;
    for i in 0..6 {
        let offset = 50.0 + i as f64 * 80.0;
        doc.push(paint(Shape::line(offset, 50.0, offset, 450.0), "#696969", 3.0, "none"));
        doc.push(paint(Shape::line(50.0, offset, 450.0, offset), "#696969", 3.0, "none"));
    }
    doc.push(paint(Shape::rect(170.0, 170.0, 160.0, 160.0), "#000080", 2.0, "#4682B4"));
    doc.push(
        paint(
            Shape::Text {
                x: Coord::Number(250.0),
                y: Coord::Number(255.0),
                font_size: Some(12.0),
            },
            "none",
            0.0,
            "white",
        )
        .with_label("Temple"),
    );
    Ok(doc)
}

fn crescent(doc: &mut Document, r: f64, shift: f64, fill: &str, stroke: &str, width: f64) {
    doc.push(paint(Shape::circle(200.0, 200.0, r), stroke, width, fill));
    doc.push(paint(Shape::circle(200.0 + shift, 200.0, r), "none", 0.0, "white"));
}

fn small_star(x: f64, y: f64, r: f64) -> Primitive {
    paint(Shape::polygon(star_points(x, y, r, 0.4, 5)), "#B8860B", 1.0, "#FFD700")
}

fn crescent_simple() -> RenderResult<Document> {
    let mut doc = standard()?;
    crescent(&mut doc, 120.0, 30.0, "#C0C0C0", "#696969", 2.0);
    Ok(doc)
}

fn crescent_stars() -> RenderResult<Document> {
    let mut doc = standard()?;
    crescent(&mut doc, 100.0, 25.0, "#FFD700", "#DAA520", 2.0);
    for (x, y) in [(280.0, 150.0), (300.0, 200.0), (280.0, 250.0)] {
        doc.push(small_star(x, y, 15.0));
    }
    Ok(doc)
}

fn crescent_complex() -> RenderResult<Document> {
    let mut doc = standard()?;
    crescent(&mut doc, 100.0, 30.0, "#FFD700", "#B8860B", 3.0);
    for (start, control, end) in [
        ((150.0, 170.0), (140.0, 150.0), (145.0, 130.0)),
        ((150.0, 230.0), (140.0, 250.0), (145.0, 270.0)),
    ] {
        let mut horn = vec![start];
        horn.extend(quad_curve(start, control, end));
        polyline(&mut doc, &horn, "#8B4513", 4.0, 1.0);
    }
    let stars = [
        (270.0, 120.0),
        (300.0, 160.0),
        (320.0, 200.0),
        (300.0, 240.0),
        (270.0, 280.0),
    ];
    for (x, y) in stars {
        doc.push(small_star(x, y, 12.0));
    }
    Ok(doc)
}

fn eight_point_star(r: f64, fill: &str) -> Primitive {
    paint(
        Shape::polygon(star_points(200.0, 200.0, r, 0.4, 8)),
        "#8B0000",
        2.0,
        fill,
    )
}

fn star_8_simple() -> RenderResult<Document> {
    Ok(standard()?.with(eight_point_star(120.0, "#FF6347")))
}

fn star_8_rosette() -> RenderResult<Document> {
    let mut doc = standard()?;
    petals(&mut doc, 8, 60.0, 40.0, "#FF6347", 2.0);
    doc.push(paint(Shape::circle(200.0, 200.0, 40.0), "#FF6347", 3.0, "#FFE4E1"));
    doc.push(eight_point_star(30.0, "#FF6347"));
    Ok(doc)
}

fn star_8_ornate() -> RenderResult<Document> {
    Ok(standard()?
        .with(eight_point_star(140.0, "#FFE4E1"))
        .with(eight_point_star(100.0, "#FFB6C1"))
        .with(eight_point_star(60.0, "#FF69B4"))
        .with(paint(Shape::circle(200.0, 200.0, 20.0), "#8B0000", 2.0, "#FF1493")))
}

fn six_point_star(r: f64, fill: &str) -> Primitive {
    paint(
        Shape::polygon(star_points(200.0, 200.0, r, 0.5, 6)),
        "#228B22",
        2.0,
        fill,
    )
}

fn star_6_simple() -> RenderResult<Document> {
    Ok(standard()?.with(six_point_star(120.0, "#32CD32")))
}

fn star_6_rosette() -> RenderResult<Document> {
    let mut doc = standard()?;
    petals(&mut doc, 6, 60.0, 50.0, "#32CD32", 2.0);
    doc.push(paint(Shape::circle(200.0, 200.0, 50.0), "#228B22", 3.0, "#F0FFF0"));
    doc.push(six_point_star(40.0, "#32CD32"));
    Ok(doc)
}

fn star_6_nested() -> RenderResult<Document> {
    let mut doc = standard()?;
    for r in [140.0, 100.0, 60.0] {
        doc.push(paint(
            Shape::polygon(regular_polygon(200.0, 200.0, r, 6, -30.0)),
            "#32CD32",
            2.0,
            "none",
        ));
    }
    doc.push(six_point_star(80.0, "#90EE90"));
    doc.push(paint(Shape::circle(200.0, 200.0, 15.0), "none", 0.0, "#228B22"));
    Ok(doc)
}

struct Rays {
    count: usize,
    inner: f64,
    outer: f64,
    rotation_deg: f64,
    stroke: &'static str,
    width: f64,
}

fn rays(doc: &mut Document, (cx, cy): (f64, f64), rays: Rays) {
    for i in 0..rays.count {
        let angle = (i as f64 * 360.0 / rays.count as f64 + rays.rotation_deg).to_radians();
        let (cos, sin) = (angle.cos(), angle.sin());
        doc.push(paint(
            Shape::line(
                cx + rays.inner * cos,
                cy + rays.inner * sin,
                cx + rays.outer * cos,
                cy + rays.outer * sin,
            ),
            rays.stroke,
            rays.width,
            "none",
        ));
    }
}

fn star_12_simple() -> RenderResult<Document> {
    let mut doc = standard()?;
    rays(
        &mut doc,
        (200.0, 200.0),
        Rays {
            count: 12,
            inner: 30.0,
            outer: 130.0,
            rotation_deg: 0.0,
            stroke: "#9370DB",
            width: 3.0,
        },
    );
    doc.push(paint(Shape::circle(200.0, 200.0, 30.0), "#9370DB", 2.0, "#E6E6FA"));
    Ok(doc)
}

fn zodiac_wheel() -> RenderResult<Document> {
    let mut doc = standard()?;
    doc.push(paint(Shape::circle(200.0, 200.0, 150.0), "#9370DB", 3.0, "none"));
    rays(
        &mut doc,
        (200.0, 200.0),
        Rays {
            count: 12,
            inner: 100.0,
            outer: 150.0,
            rotation_deg: -90.0,
            stroke: "#9370DB",
            width: 2.0,
        },
    );
    doc.push(paint(Shape::circle(200.0, 200.0, 100.0), "#9370DB", 2.0, "#F8F8FF"));
    doc.push(paint(
        Shape::polygon(star_points(200.0, 200.0, 90.0, 50.0 / 90.0, 12)),
        "#9370DB",
        1.0,
        "#E6E6FA",
    ));
    Ok(doc)
}

fn full_zodiac() -> RenderResult<Document> {
    let mut doc = large()?;
    doc.push(paint(Shape::circle(250.0, 250.0, 220.0), "#9370DB", 4.0, "none"));
    doc.push(paint(Shape::circle(250.0, 250.0, 200.0), "#9370DB", 2.0, "none"));
    for (i, sign) in ZODIAC_SIGNS.iter().enumerate() {
        let start = (i as f64 * 30.0 - 90.0).to_radians();
        let mid = (i as f64 * 30.0 + 15.0 - 90.0).to_radians();
        doc.push(paint(
            Shape::line(250.0, 250.0, 250.0 + 200.0 * start.cos(), 250.0 + 200.0 * start.sin()),
            "#9370DB",
            2.0,
            "none",
        ));
        let glyph = Shape::Text {
            x: Coord::Number(250.0 + 170.0 * mid.cos()),
            y: Coord::Number(250.0 + 170.0 * mid.sin()),
            font_size: Some(24.0),
        };
        doc.push(paint(glyph, "none", 0.0, "#4B0082").with_label(*sign));
    }
    doc.push(paint(
        Shape::polygon(star_points(250.0, 250.0, 100.0, 0.5, 12)),
        "#4B0082",
        2.0,
        "#E6E6FA",
    ));
    doc.push(paint(Shape::circle(250.0, 250.0, 30.0), "none", 0.0, "#9370DB"));
    Ok(doc)
}

fn zigzag(mid_y: f64, amplitude: f64) -> Vec<(f64, f64)> {
    (0..11)
        .map(|i| {
            let offset = if i % 2 == 0 { amplitude } else { -amplitude };
            (50.0 + i as f64 * 30.0, mid_y + offset)
        })
        .collect()
}

fn zigzag_simple() -> RenderResult<Document> {
    let mut doc = standard()?;
    polyline(&mut doc, &zigzag(200.0, 50.0), "#1E90FF", 4.0, 1.0);
    Ok(doc)
}

fn zigzag_double() -> RenderResult<Document> {
    let mut doc = standard()?;
    polyline(&mut doc, &zigzag(160.0, 40.0), "#1E90FF", 3.0, 1.0);
    polyline(&mut doc, &zigzag(240.0, 40.0), "#1E90FF", 3.0, 1.0);
    Ok(doc)
}

fn guilloche() -> RenderResult<Document> {
    let mut doc = Document::new(Canvas::new(500, 300)?);
    for (first_crest, stroke) in [(100.0, "#1E90FF"), (200.0, "#00BFFF")] {
        let mut strand = vec![(20.0, 150.0)];
        for i in 0..10 {
            let x = 20.0 + i as f64 * 50.0;
            let crest = if i % 2 == 0 { first_crest } else { 300.0 - first_crest };
            strand.extend(quad_curve((x, 150.0), (x + 25.0, crest), (x + 50.0, 150.0)));
        }
        polyline(&mut doc, &strand, stroke, 8.0, 0.7);
    }
    Ok(doc)
}

fn spiral(start_angle: f64, turns: usize, growth: f64) -> Vec<(f64, f64)> {
    let mut points = vec![(200.0, 200.0)];
    let (mut angle, mut radius) = (start_angle, 5.0);
    for _ in 0..turns {
        angle += 0.3;
        radius += growth;
        points.push((200.0 + radius * angle.cos(), 200.0 + radius * angle.sin()));
    }
    points
}

fn spiral_simple() -> RenderResult<Document> {
    let mut doc = standard()?;
    polyline(&mut doc, &spiral(0.0, 100, 1.2), "#8B008B", 3.0, 1.0);
    Ok(doc)
}

fn spiral_double() -> RenderResult<Document> {
    let mut doc = standard()?;
    polyline(&mut doc, &spiral(0.0, 80, 1.0), "#8B008B", 3.0, 1.0);
    polyline(&mut doc, &spiral(PI, 80, 1.0), "#9932CC", 3.0, 1.0);
    Ok(doc)
}

fn serpents() -> RenderResult<Document> {
    let mut doc = standard()?;
    for (phase, bend, stroke) in [(0.0, -30.0, "#8B008B"), (PI, 30.0, "#9932CC")] {
        let mut body = vec![(100.0, 200.0)];
        for i in 0..8 {
            let x = 100.0 + i as f64 * 35.0;
            let y = 200.0 + 60.0 * (i as f64 * 0.8 + phase).sin();
            let pen = body[body.len() - 1];
            body.extend(quad_curve(pen, (x + 10.0, y + bend), (x + 35.0, y)));
        }
        polyline(&mut doc, &body, stroke, 8.0, 1.0);
    }
    for (phase, fill) in [(0.0, "#8B008B"), (PI, "#9932CC")] {
        let head_y = 200.0 + 60.0 * (7.0 * 0.8 + phase).sin();
        doc.push(paint(Shape::circle(300.0, head_y, 8.0), "none", 0.0, fill));
    }
    Ok(doc)
}

struct Drum {
    top: f64,
    bottom: f64,
    ry: f64,
    stroke: &'static str,
    top_fill: &'static str,
    side_fill: &'static str,
}

/// Top cap, body and side edges; the bottom cap is pushed by the caller so
/// decorations can sit between them.
fn drum(doc: &mut Document, body: &Drum) {
    doc.push(ellipse(200.0, body.top, 80.0, body.ry, body.stroke, 2.0, body.top_fill));
    doc.push(paint(
        Shape::rect(120.0, body.top, 160.0, body.bottom - body.top),
        "none",
        0.0,
        body.side_fill,
    ));
    for x in [120.0, 280.0] {
        doc.push(paint(Shape::line(x, body.top, x, body.bottom), body.stroke, 2.0, "none"));
    }
}

fn cylinder_simple() -> RenderResult<Document> {
    let mut doc = standard()?;
    drum(
        &mut doc,
        &Drum {
            top: 120.0,
            bottom: 270.0,
            ry: 20.0,
            stroke: "#696969",
            top_fill: "#D3D3D3",
            side_fill: "#C0C0C0",
        },
    );
    doc.push(ellipse(200.0, 270.0, 80.0, 20.0, "#696969", 2.0, "#A9A9A9"));
    Ok(doc)
}

fn cylinder_bands() -> RenderResult<Document> {
    let mut doc = standard()?;
    drum(
        &mut doc,
        &Drum {
            top: 100.0,
            bottom: 280.0,
            ry: 20.0,
            stroke: "#8B4513",
            top_fill: "#D2B48C",
            side_fill: "#DEB887",
        },
    );
    for y in [140.0, 180.0, 220.0] {
        doc.push(paint(Shape::line(120.0, y, 280.0, y), "#8B4513", 2.0, "none"));
        doc.push(ellipse(200.0, y, 80.0, 5.0, "#8B4513", 1.0, "none"));
    }
    doc.push(ellipse(200.0, 280.0, 80.0, 20.0, "#8B4513", 2.0, "#BC8F8F"));
    Ok(doc)
}

fn cylinder_seal() -> RenderResult<Document> {
    let mut doc = standard()?;
    drum(
        &mut doc,
        &Drum {
            top: 90.0,
            bottom: 290.0,
            ry: 15.0,
            stroke: "#654321",
            top_fill: "#CD853F",
            side_fill: "#D2691E",
        },
    );
    for (x, y) in [(160.0, 150.0), (200.0, 160.0), (240.0, 150.0)] {
        doc.push(paint(Shape::circle(x, y, 12.0), "none", 0.0, "#654321"));
        doc.push(paint(Shape::rect(x - 6.0, y + 12.0, 12.0, 25.0), "none", 0.0, "#654321"));
    }
    for y in [120.0, 210.0] {
        doc.push(paint(Shape::line(130.0, y, 270.0, y), "#654321", 2.0, "none"));
    }
    doc.push(ellipse(200.0, 290.0, 80.0, 15.0, "#654321", 2.0, "#8B4513"));
    Ok(doc)
}

fn cone(apex: f64, base: f64, half_width: f64, stroke: &str, fill: &str) -> Primitive {
    let points = vec![
        point(200.0, apex),
        point(200.0 - half_width, base),
        point(200.0 + half_width, base),
    ];
    paint(Shape::polygon(points), stroke, 2.0, fill)
}

fn cone_simple() -> RenderResult<Document> {
    Ok(standard()?
        .with(cone(80.0, 280.0, 80.0, "#D2691E", "#FFE4B5"))
        .with(ellipse(200.0, 280.0, 80.0, 20.0, "#D2691E", 2.0, "#DEB887")))
}

fn cone_bands() -> RenderResult<Document> {
    let mut doc = standard()?.with(cone(60.0, 300.0, 100.0, "#8B4513", "#F5DEB3"));
    for y in [140.0, 200.0, 260.0] {
        let reach = (y - 60.0) * 200.0 / 240.0;
        doc.push(paint(Shape::line(200.0 - reach, y, 200.0 + reach, y), "#8B4513", 3.0, "none"));
    }
    doc.push(ellipse(200.0, 300.0, 100.0, 20.0, "#8B4513", 2.0, "#DEB887"));
    Ok(doc)
}

fn cone_spire() -> RenderResult<Document> {
    let mut doc = standard()?.with(cone(50.0, 320.0, 90.0, "#8B4513", "#FFD700"));
    for y in [120.0, 170.0, 220.0, 270.0] {
        let reach = (y - 50.0) * 180.0 / 270.0;
        doc.push(paint(Shape::line(200.0 - reach, y, 200.0 + reach, y), "#8B4513", 4.0, "none"));
        let whole = reach.trunc() as i64;
        for dx in (-whole..=whole).step_by(20) {
            doc.push(paint(Shape::circle(200.0 + dx as f64, y, 3.0), "none", 0.0, "#FF6347"));
        }
    }
    doc.push(ellipse(200.0, 320.0, 90.0, 18.0, "#8B4513", 2.0, "#DAA520"));
    doc.push(paint(Shape::circle(200.0, 50.0, 8.0), "#8B0000", 1.0, "#FF6347"));
    Ok(doc)
}

fn composite_simple() -> RenderResult<Document> {
    Ok(standard()?
        .with(paint(Shape::circle(200.0, 200.0, 120.0), "#B8860B", 3.0, "#FFE4E1"))
        .with(eight_point_star(80.0, "#FFD700")))
}

fn composite_layered() -> RenderResult<Document> {
    Ok(standard()?
        .with(paint(Shape::rect(80.0, 80.0, 240.0, 240.0), "#4B0082", 3.0, "#E6E6FA"))
        .with(paint(Shape::circle(200.0, 200.0, 100.0), "#B8860B", 3.0, "#FFE4E1"))
        .with(eight_point_star(60.0, "#FFD700")))
}

fn composite_deity() -> RenderResult<Document> {
    let mut doc = standard()?
        .with(paint(Shape::rect(60.0, 60.0, 280.0, 280.0), "#8B4513", 4.0, "#F0E68C"))
        .with(paint(Shape::circle(200.0, 200.0, 130.0), "#4B0082", 3.0, "#E6E6FA"))
        .with(paint(Shape::circle(200.0, 200.0, 80.0), "#B8860B", 2.0, "#FFD700"))
        .with(paint(Shape::circle(220.0, 200.0, 80.0), "none", 0.0, "#E6E6FA"))
        .with(eight_point_star(50.0, "#FF69B4"))
        .with(paint(Shape::circle(200.0, 200.0, 25.0), "#FF4500", 2.0, "#FFA500"));
    rays(
        &mut doc,
        (200.0, 200.0),
        Rays {
            count: 8,
            inner: 15.0,
            outer: 35.0,
            rotation_deg: 0.0,
            stroke: "#FF4500",
            width: 2.0,
        },
    );
    Ok(doc)
}
