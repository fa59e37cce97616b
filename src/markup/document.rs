//! HTML document tree and its pretty serializer.

use super::element::{Element, ImageElement, Layer, PageContainer, SvgCanvas, SvgPath, TextElement};

/// Indentation unit of the pretty printer.
const INDENT: &str = "  ";

/// Base stylesheet: page containers and absolutely positioned children.
pub const BASE_STYLESHEET: &[&str] = &[
    "body { margin: 0; background: #e0e0e0; }",
    ".page { position: relative; margin: 16px auto; box-shadow: 0 0 8px rgba(0, 0, 0, 0.35); background: #ffffff; overflow: hidden; }",
    ".page > svg { position: absolute; left: 0; top: 0; }",
    ".block { position: absolute; white-space: pre; line-height: 1; }",
    "img { position: absolute; }",
];

/// A complete output document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HtmlDocument {
    pub title: Option<String>,
    /// Rules emitted before the font faces.
    pub stylesheet: Vec<String>,
    /// `@font-face` rules, one per embedded font.
    pub font_faces: Vec<String>,
    pub pages: Vec<PageContainer>,
}

impl HtmlDocument {
    /// Empty document with the base stylesheet.
    pub fn new() -> Self {
        Self {
            stylesheet: BASE_STYLESHEET.iter().map(|r| r.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Serialize as indented HTML5.
    ///
    /// Text elements keep their content on the opening line so that
    /// `white-space: pre` renders exactly the span text.
    pub fn to_html(&self) -> String {
        let mut w = Writer::default();
        w.line("<!DOCTYPE html>");
        w.open("<html>");
        w.open("<head>");
        w.line("<meta charset=\"utf-8\">");
        if let Some(title) = &self.title {
            w.line(&format!("<title>{}</title>", escape_html(title)));
        }
        w.open("<style>");
        for rule in self.stylesheet.iter().chain(&self.font_faces) {
            w.line(rule);
        }
        w.close("</style>");
        w.close("</head>");
        w.open("<body>");
        for page in &self.pages {
            write_page(&mut w, page);
        }
        w.close("</body>");
        w.close("</html>");
        w.out
    }
}

#[derive(Default)]
struct Writer {
    out: String,
    depth: usize,
}

impl Writer {
    fn line(&mut self, s: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(s);
        self.out.push('\n');
    }

    fn open(&mut self, s: &str) {
        self.line(s);
        self.depth += 1;
    }

    fn close(&mut self, s: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(s);
    }
}

fn write_element(w: &mut Writer, element: &Element) {
    match element {
        Element::Svg(svg) => write_svg(w, svg),
        Element::Path(path) => write_path(w, path),
        Element::Image(image) => write_image(w, image),
        Element::Text(text) => write_text(w, text),
    }
}

fn write_page(w: &mut Writer, page: &PageContainer) {
    w.open(&format!(
        "<div class=\"page\" id=\"page-{}\" style=\"width: {}px; height: {}px;\">",
        page.number,
        format_number(page.width),
        format_number(page.height)
    ));
    for child in &page.children {
        write_element(w, child);
    }
    w.close("</div>");
}

fn write_svg(w: &mut Writer, svg: &SvgCanvas) {
    w.open(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\" style=\"z-index: {z};\">",
        width = format_number(svg.width),
        height = format_number(svg.height),
        z = Layer::Drawing.z_index()
    ));
    for child in &svg.children {
        write_element(w, child);
    }
    w.close("</svg>");
}

fn write_path(w: &mut Writer, path: &SvgPath) {
    w.line(&format!(
        "<path d=\"{}\" stroke=\"{}\" fill=\"{}\" stroke-width=\"{}\"/>",
        escape_html(&path.data),
        escape_html(&path.stroke),
        escape_html(&path.fill),
        format_number(path.stroke_width)
    ));
}

fn write_image(w: &mut Writer, image: &ImageElement) {
    w.line(&format!(
        "<img src=\"{}\" alt=\"\" style=\"left: {}px; top: {}px; width: {}px; height: {}px; z-index: {};\">",
        escape_html(&image.src),
        format_number(image.left),
        format_number(image.top),
        format_number(image.width),
        format_number(image.height),
        Layer::Image.z_index()
    ));
}

fn write_text(w: &mut Writer, text: &TextElement) {
    w.line(&format!(
        "<span class=\"block\" style=\"left: {}px; top: {}px; font-family: {}; font-size: {}px; color: {}; white-space: pre; z-index: {};\">{}</span>",
        format_number(text.left),
        format_number(text.top),
        escape_html(&text.font_family),
        format_number(text.font_size),
        escape_html(&text.color),
        Layer::Text.z_index(),
        escape_html(&text.text)
    ));
}

/// Two-decimal number as used in styles and path data.
///
/// Values that round to zero print as `0.00`, never `-0.00`.
pub fn format_number(v: f32) -> String {
    let s = format!("{v:.2}");
    if s == "-0.00" {
        "0.00".to_string()
    } else {
        s
    }
}

/// Escape text for HTML content and double-quoted attribute values.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
