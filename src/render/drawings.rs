//! Vector drawings as SVG paths.

use crate::markup::{format_number as num, SvgCanvas, SvgPath};
use crate::model::{Drawing, PathItem, Point, Rgb};

/// Stroke width used when a drawing declares none.
pub const DEFAULT_STROKE_WIDTH: f32 = 1.0;

/// Build the page's SVG canvas.
///
/// Returns `None` when no drawing produced any path data, so pages without
/// vector content get no empty `<svg>`.
pub fn render_drawings(drawings: &[Drawing], width: f32, height: f32) -> Option<SvgCanvas> {
    let mut canvas = SvgCanvas::new(width, height);
    for drawing in drawings {
        if let Some(path) = render_drawing(drawing) {
            canvas.push(path);
        }
    }
    (!canvas.is_empty()).then_some(canvas)
}

/// Translate one drawing. `None` when none of its items translate.
pub fn render_drawing(drawing: &Drawing) -> Option<SvgPath> {
    Some(SvgPath {
        data: svg_path_data(&drawing.items)?,
        stroke: rgb_css(drawing.stroke),
        fill: rgb_css(drawing.fill),
        stroke_width: drawing.width.unwrap_or(DEFAULT_STROKE_WIDTH),
    })
}

/// SVG path data for a list of items; unrecognized or non-finite items
/// contribute nothing.
pub fn svg_path_data(items: &[PathItem]) -> Option<String> {
    let fragments: Vec<String> = items.iter().filter_map(item_data).collect();
    if fragments.is_empty() {
        return None;
    }
    Some(fragments.join(" "))
}

fn item_data(item: &PathItem) -> Option<String> {
    match item {
        PathItem::Line(p0, p1) => {
            all_finite(&[*p0, *p1])?;
            Some(format!("M {} L {}", point(p0), point(p1)))
        }
        PathItem::Rect(r) => {
            all_finite(&[Point::new(r.x0, r.y0), Point::new(r.x1, r.y1)])?;
            Some(format!(
                "M {} {} H {} V {} H {} Z",
                num(r.x0),
                num(r.y0),
                num(r.x1),
                num(r.y1),
                num(r.x0)
            ))
        }
        PathItem::Curve(p0, p1, p2, p3) => {
            all_finite(&[*p0, *p1, *p2, *p3])?;
            Some(format!(
                "M {} C {} {} {}",
                point(p0),
                point(p1),
                point(p2),
                point(p3)
            ))
        }
        PathItem::Quad(_) => None,
    }
}

fn all_finite(points: &[Point]) -> Option<()> {
    points.iter().all(Point::is_finite).then_some(())
}

fn point(p: &Point) -> String {
    format!("{} {}", num(p.x), num(p.y))
}

/// CSS `rgb(r,g,b)` with integer channels, or `none`.
pub fn rgb_css(color: Option<Rgb>) -> String {
    match color {
        Some(color) => {
            let [r, g, b] = color.to_bytes();
            format!("rgb({r},{g},{b})")
        }
        None => "none".to_string(),
    }
}
