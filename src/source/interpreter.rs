//! Content stream interpreter.
//!
//! Walks the operators of a page (and of the form XObjects it draws) with a
//! graphics state machine and records what a viewer would paint: glyphs,
//! vector paths and image placements, all mapped to top-left page pixels.

use std::collections::HashMap;
use std::rc::Rc;

use lopdf::content::Content;
use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use super::decode_text_simple;
use super::fonts::FontMetrics;
use super::objects::{dict_get, dict_get_dict, dict_get_name, get_number, number_array, resolve, stream_bytes};
use super::text_builder::{build_block, Glyph};
use crate::error::{Error, Result};
use crate::model::{Drawing, ImageBlock, Matrix, PageBlock, PathItem, Point, Rect, Rgb, TextPage};

/// Form XObjects nested deeper than this are not followed.
const MAX_FORM_DEPTH: usize = 8;

/// Text render mode that paints nothing.
const INVISIBLE: i64 = 3;

/// Shown for codes the font cannot map to Unicode.
const REPLACEMENT: &str = "\u{FFFD}";

/// Where an image XObject was drawn.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ImagePlacement {
    pub xref: u32,
    pub bbox: Rect,
}

/// Everything painted on one page.
#[derive(Debug, Clone, Default)]
pub(crate) struct PageContent {
    pub drawings: Vec<Drawing>,
    pub placements: Vec<ImagePlacement>,
    pub text: TextPage,
}

/// Interpret a page content stream.
///
/// `display` maps PDF user space to top-left page pixels.
pub(crate) fn interpret_page<'a>(
    doc: &'a LopdfDocument,
    content: &[u8],
    resources: Option<&'a Dictionary>,
    display: Matrix,
) -> Result<PageContent> {
    let mut interpreter = Interpreter::new(doc, display);
    interpreter.run(content, resources)?;
    Ok(interpreter.finish())
}

#[derive(Clone)]
struct ActiveFont<'a> {
    dict: Option<&'a Dictionary>,
    metrics: Rc<FontMetrics>,
}

#[derive(Clone)]
struct GraphicsState<'a> {
    ctm: Matrix,
    fill: Rgb,
    stroke: Rgb,
    line_width: f32,
    font: Option<ActiveFont<'a>>,
    font_size: f32,
    char_spacing: f32,
    word_spacing: f32,
    horizontal_scale: f32,
    leading: f32,
    rise: f32,
    render_mode: i64,
}

impl Default for GraphicsState<'_> {
    fn default() -> Self {
        Self {
            ctm: Matrix::IDENTITY,
            fill: Rgb::BLACK,
            stroke: Rgb::BLACK,
            line_width: 1.0,
            font: None,
            font_size: 0.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            horizontal_scale: 1.0,
            leading: 0.0,
            rise: 0.0,
            render_mode: 0,
        }
    }
}

/// Path under construction, already in page pixels.
#[derive(Debug, Default)]
struct PathBuilder {
    items: Vec<PathItem>,
    current: Option<Point>,
    start: Option<Point>,
}

impl PathBuilder {
    fn move_to(&mut self, p: Point) {
        self.current = Some(p);
        self.start = Some(p);
    }

    fn line_to(&mut self, p: Point) {
        match self.current {
            Some(from) => self.items.push(PathItem::Line(from, p)),
            None => self.start = Some(p),
        }
        self.current = Some(p);
    }

    fn curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        match self.current {
            Some(from) => self.items.push(PathItem::Curve(from, c1, c2, p)),
            None => self.start = Some(p),
        }
        self.current = Some(p);
    }

    fn rect(&mut self, m: &Matrix, x: f32, y: f32, w: f32, h: f32) {
        let corners = [
            m.transform(x, y),
            m.transform(x + w, y),
            m.transform(x + w, y + h),
            m.transform(x, y + h),
        ];
        if m.is_axis_aligned() {
            if let Some(rect) = Rect::from_points(&corners) {
                self.items.push(PathItem::Rect(rect));
            }
        } else {
            self.items.push(PathItem::Quad(corners));
        }
        self.move_to(corners[0]);
    }

    fn close(&mut self) {
        if let (Some(current), Some(start)) = (self.current, self.start) {
            if current != start {
                self.items.push(PathItem::Line(current, start));
            }
            self.current = Some(start);
        }
    }
}

struct Interpreter<'a> {
    doc: &'a LopdfDocument,
    display: Matrix,
    resources: Option<&'a Dictionary>,
    state: GraphicsState<'a>,
    saved: Vec<GraphicsState<'a>>,
    text_matrix: Matrix,
    line_matrix: Matrix,
    path: PathBuilder,
    glyphs: Vec<Glyph>,
    font_cache: HashMap<ObjectId, Rc<FontMetrics>>,
    depth: usize,
    content: PageContent,
}

impl<'a> Interpreter<'a> {
    fn new(doc: &'a LopdfDocument, display: Matrix) -> Self {
        Self {
            doc,
            display,
            resources: None,
            state: GraphicsState::default(),
            saved: Vec::new(),
            text_matrix: Matrix::IDENTITY,
            line_matrix: Matrix::IDENTITY,
            path: PathBuilder::default(),
            glyphs: Vec::new(),
            font_cache: HashMap::new(),
            depth: 0,
            content: PageContent::default(),
        }
    }

    fn run(&mut self, data: &[u8], resources: Option<&'a Dictionary>) -> Result<()> {
        let content = Content::decode(data).map_err(|e| Error::PdfParse(format!("content stream: {e}")))?;
        let outer = std::mem::replace(&mut self.resources, resources);
        for op in &content.operations {
            self.apply(&op.operator, &op.operands);
        }
        self.resources = outer;
        Ok(())
    }

    fn finish(mut self) -> PageContent {
        self.flush_text();
        self.content
    }

    /// Matrix from user space to page pixels.
    fn to_page(&self) -> Matrix {
        self.state.ctm.multiply(&self.display)
    }

    fn point(&self, x: f32, y: f32) -> Point {
        self.to_page().transform(x, y)
    }

    fn apply(&mut self, operator: &str, operands: &[Object]) {
        match operator {
            // Graphics state
            "q" => self.saved.push(self.state.clone()),
            "Q" => {
                if let Some(state) = self.saved.pop() {
                    self.state = state;
                }
            }
            "cm" => {
                if let Some([a, b, c, d, e, f]) = numbers(operands) {
                    self.state.ctm = Matrix::new(a, b, c, d, e, f).multiply(&self.state.ctm);
                }
            }
            "w" => {
                if let Some([w]) = numbers(operands) {
                    self.state.line_width = w;
                }
            }

            // Colour
            "g" | "G" | "rg" | "RG" | "k" | "K" | "sc" | "scn" | "SC" | "SCN" => {
                if let Some(color) = color_operands(operands) {
                    if operator.starts_with(|c: char| c.is_ascii_lowercase()) {
                        self.state.fill = color;
                    } else {
                        self.state.stroke = color;
                    }
                }
            }
            "cs" => self.state.fill = Rgb::BLACK,
            "CS" => self.state.stroke = Rgb::BLACK,

            // Path construction
            "m" => {
                if let Some([x, y]) = numbers(operands) {
                    let p = self.point(x, y);
                    self.path.move_to(p);
                }
            }
            "l" => {
                if let Some([x, y]) = numbers(operands) {
                    let p = self.point(x, y);
                    self.path.line_to(p);
                }
            }
            "c" => {
                if let Some([x1, y1, x2, y2, x3, y3]) = numbers(operands) {
                    let (c1, c2, p) = (self.point(x1, y1), self.point(x2, y2), self.point(x3, y3));
                    self.path.curve_to(c1, c2, p);
                }
            }
            "v" => {
                if let Some([x2, y2, x3, y3]) = numbers(operands) {
                    let (c2, p) = (self.point(x2, y2), self.point(x3, y3));
                    let c1 = self.path.current.unwrap_or(c2);
                    self.path.curve_to(c1, c2, p);
                }
            }
            "y" => {
                if let Some([x1, y1, x3, y3]) = numbers(operands) {
                    let (c1, p) = (self.point(x1, y1), self.point(x3, y3));
                    self.path.curve_to(c1, p, p);
                }
            }
            "re" => {
                if let Some([x, y, w, h]) = numbers(operands) {
                    let m = self.to_page();
                    self.path.rect(&m, x, y, w, h);
                }
            }
            "h" => self.path.close(),

            // Path painting
            "S" => self.paint(false, true, false),
            "s" => self.paint(true, true, false),
            "f" | "F" | "f*" => self.paint(false, false, true),
            "B" | "B*" => self.paint(false, true, true),
            "b" | "b*" => self.paint(true, true, true),
            "n" => self.path = PathBuilder::default(),

            // Text objects
            "BT" => {
                self.text_matrix = Matrix::IDENTITY;
                self.line_matrix = Matrix::IDENTITY;
            }
            "ET" => self.flush_text(),

            // Text state
            "Tf" => self.set_font(operands),
            "Tc" => set_number(&mut self.state.char_spacing, operands),
            "Tw" => set_number(&mut self.state.word_spacing, operands),
            "TL" => set_number(&mut self.state.leading, operands),
            "Ts" => set_number(&mut self.state.rise, operands),
            "Tr" => {
                if let Some(Object::Integer(mode)) = operands.first() {
                    self.state.render_mode = *mode;
                }
            }
            "Tz" => {
                if let Some([scale]) = numbers(operands) {
                    self.state.horizontal_scale = scale / 100.0;
                }
            }

            // Text positioning
            "Td" => {
                if let Some([tx, ty]) = numbers(operands) {
                    self.move_line(tx, ty);
                }
            }
            "TD" => {
                if let Some([tx, ty]) = numbers(operands) {
                    self.state.leading = -ty;
                    self.move_line(tx, ty);
                }
            }
            "Tm" => {
                if let Some([a, b, c, d, e, f]) = numbers(operands) {
                    self.line_matrix = Matrix::new(a, b, c, d, e, f);
                    self.text_matrix = self.line_matrix;
                }
            }
            "T*" => self.move_line(0.0, -self.state.leading),

            // Text showing
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operands.first() {
                    self.show_text(bytes);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    for item in items {
                        match item {
                            Object::String(bytes, _) => self.show_text(bytes),
                            other => {
                                if let Some(adjust) = get_number(other) {
                                    let tx = -adjust / 1000.0 * self.state.font_size * self.state.horizontal_scale;
                                    self.advance_text(tx);
                                }
                            }
                        }
                    }
                }
            }
            "'" => {
                self.move_line(0.0, -self.state.leading);
                if let Some(Object::String(bytes, _)) = operands.first() {
                    self.show_text(bytes);
                }
            }
            "\"" => {
                if let (Some(aw), Some(ac)) = (
                    operands.first().and_then(get_number),
                    operands.get(1).and_then(get_number),
                ) {
                    self.state.word_spacing = aw;
                    self.state.char_spacing = ac;
                }
                self.move_line(0.0, -self.state.leading);
                if let Some(Object::String(bytes, _)) = operands.get(2) {
                    self.show_text(bytes);
                }
            }

            // XObjects
            "Do" => {
                if let Some(Object::Name(name)) = operands.first() {
                    self.draw_xobject(name);
                }
            }
            _ => {}
        }
    }

    fn paint(&mut self, close: bool, stroke: bool, fill: bool) {
        if close {
            self.path.close();
        }
        let path = std::mem::take(&mut self.path);
        if path.items.is_empty() {
            return;
        }

        let mut drawing = Drawing::new(path.items);
        if stroke {
            drawing = drawing.with_stroke(self.state.stroke);
            let width = self.state.line_width * self.to_page().mean_scale();
            // Zero means "thinnest line"; leave it to the renderer default.
            if width > 0.0 {
                drawing = drawing.with_width(width);
            }
        }
        if fill {
            drawing = drawing.with_fill(self.state.fill);
        }
        self.content.drawings.push(drawing);
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = Matrix::translation(tx, ty).multiply(&self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn advance_text(&mut self, tx: f32) {
        self.text_matrix = Matrix::translation(tx, 0.0).multiply(&self.text_matrix);
    }

    fn set_font(&mut self, operands: &[Object]) {
        let (Some(Object::Name(name)), Some(size)) = (operands.first(), operands.get(1).and_then(get_number)) else {
            return;
        };
        self.state.font_size = size;
        self.state.font = Some(self.load_font(name));
    }

    fn load_font(&mut self, name: &[u8]) -> ActiveFont<'a> {
        let doc = self.doc;
        let resource_name = String::from_utf8_lossy(name).to_string();
        let entry = self
            .resources
            .and_then(|r| dict_get_dict(doc, r, b"Font"))
            .and_then(|fonts| fonts.get(name).ok());

        let dict = entry.and_then(|e| match resolve(doc, e) {
            Some(Object::Dictionary(d)) => Some(d),
            _ => None,
        });
        let (Some(entry), Some(dict)) = (entry, dict) else {
            log::debug!("font resource /{resource_name} not found");
            return ActiveFont {
                dict: None,
                metrics: Rc::new(FontMetrics::fallback(&resource_name)),
            };
        };

        let metrics = match entry.as_reference() {
            Ok(id) => self
                .font_cache
                .entry(id)
                .or_insert_with(|| Rc::new(FontMetrics::load(doc, dict, &resource_name)))
                .clone(),
            Err(_) => Rc::new(FontMetrics::load(doc, dict, &resource_name)),
        };
        ActiveFont {
            dict: Some(dict),
            metrics,
        }
    }

    fn show_text(&mut self, bytes: &[u8]) {
        let Some(font) = self.state.font.clone() else {
            return;
        };
        let doc = self.doc;
        let encoding = font.dict.and_then(|d| d.get_font_encoding(doc).ok());
        let code_len = if font.metrics.two_byte { 2 } else { 1 };
        let font_size = self.state.font_size;
        let color = self.state.fill.to_packed();

        for code_bytes in bytes.chunks(code_len) {
            let code = code_bytes.iter().fold(0u32, |acc, &b| (acc << 8) | u32::from(b));
            let value = match &encoding {
                Some(enc) => LopdfDocument::decode_text(enc, code_bytes).ok(),
                None if code_len == 1 => Some(decode_text_simple(code_bytes)),
                None => None,
            }
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| REPLACEMENT.to_string());

            let word_spacing = if code_len == 1 && code == 32 {
                self.state.word_spacing
            } else {
                0.0
            };
            let advance = (font.metrics.advance(code) * font_size + self.state.char_spacing + word_spacing)
                * self.state.horizontal_scale;

            // Invisible text (OCR layers) still advances the pen.
            if self.state.render_mode == INVISIBLE {
                self.advance_text(advance);
                continue;
            }

            let to_page = self.text_matrix.multiply(&self.to_page());
            let rise = self.state.rise;
            self.glyphs.push(Glyph {
                value,
                font: font.metrics.base_name.clone(),
                size: font_size * to_page.vertical_scale(),
                color,
                ascender: font.metrics.ascender,
                origin: to_page.transform(0.0, rise),
                end: to_page.transform(advance, rise),
            });
            self.advance_text(advance);
        }
    }

    fn flush_text(&mut self) {
        if let Some(block) = build_block(std::mem::take(&mut self.glyphs)) {
            self.content.text.blocks.push(PageBlock::Text(block));
        }
    }

    fn draw_xobject(&mut self, name: &[u8]) {
        let doc = self.doc;
        let Some(entry) = self
            .resources
            .and_then(|r| dict_get_dict(doc, r, b"XObject"))
            .and_then(|xobjects| xobjects.get(name).ok())
        else {
            log::debug!("XObject /{} not found", String::from_utf8_lossy(name));
            return;
        };
        let xref = entry.as_reference().map(|id| id.0).unwrap_or(0);
        let Some(stream) = resolve(doc, entry).and_then(|o| o.as_stream().ok()) else {
            return;
        };

        match dict_get_name(doc, &stream.dict, b"Subtype").as_deref() {
            Some("Image") => {
                let m = self.to_page();
                let corners = [
                    m.transform(0.0, 0.0),
                    m.transform(1.0, 0.0),
                    m.transform(0.0, 1.0),
                    m.transform(1.0, 1.0),
                ];
                if let Some(bbox) = Rect::from_points(&corners) {
                    self.content.placements.push(ImagePlacement { xref, bbox });
                    self.content
                        .text
                        .blocks
                        .push(PageBlock::Image(ImageBlock { xref, bbox }));
                }
            }
            Some("Form") => {
                if self.depth >= MAX_FORM_DEPTH {
                    log::warn!("form XObject nesting deeper than {MAX_FORM_DEPTH}, skipping");
                    return;
                }
                let data = match stream_bytes(stream) {
                    Ok(data) => data,
                    Err(e) => {
                        log::warn!("form XObject {xref}: {e}");
                        return;
                    }
                };
                let matrix = dict_get(doc, &stream.dict, b"Matrix")
                    .and_then(|m| number_array::<6>(doc, m))
                    .map(|[a, b, c, d, e, f]| Matrix::new(a, b, c, d, e, f))
                    .unwrap_or(Matrix::IDENTITY);
                let resources = dict_get_dict(doc, &stream.dict, b"Resources").or(self.resources);

                let saved_state = self.state.clone();
                let saved_depth = self.saved.len();
                self.state.ctm = matrix.multiply(&self.state.ctm);
                self.depth += 1;
                if let Err(e) = self.run(&data, resources) {
                    log::warn!("form XObject {xref}: {e}");
                }
                self.depth -= 1;
                self.saved.truncate(saved_depth);
                self.state = saved_state;
            }
            _ => {}
        }
    }
}

/// Read exactly the first `N` operands as numbers.
fn numbers<const N: usize>(operands: &[Object]) -> Option<[f32; N]> {
    if operands.len() < N {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, operand) in out.iter_mut().zip(operands) {
        *slot = get_number(operand)?;
    }
    Some(out)
}

fn set_number(target: &mut f32, operands: &[Object]) {
    if let Some([v]) = numbers(operands) {
        *target = v;
    }
}

/// Colour from 1 (gray), 3 (RGB) or 4 (CMYK) numeric operands.
///
/// Pattern names and other colour spaces leave the colour unchanged.
fn color_operands(operands: &[Object]) -> Option<Rgb> {
    let values: Vec<f32> = operands.iter().map(get_number).collect::<Option<_>>()?;
    match values.as_slice() {
        [v] => Some(Rgb::gray(*v)),
        [r, g, b] => Some(Rgb::new(*r, *g, *b)),
        [c, m, y, k] => Some(Rgb::from_cmyk(*c, *m, *y, *k)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    /// Display matrix of an unrotated Letter page.
    const LETTER: Matrix = Matrix::new(1.0, 0.0, 0.0, -1.0, 0.0, 792.0);

    fn run(content: &str) -> PageContent {
        let doc = LopdfDocument::with_version("1.5");
        interpret_page(&doc, content.as_bytes(), None, LETTER).unwrap()
    }

    #[test]
    fn test_stroked_rectangle() {
        let page = run("q 2 w 0 0 0 RG 10 732 100 50 re S Q");
        assert_eq!(page.drawings.len(), 1);
        let drawing = &page.drawings[0];
        assert_eq!(drawing.items, vec![PathItem::Rect(Rect::new(10.0, 10.0, 110.0, 60.0))]);
        assert_eq!(drawing.stroke, Some(Rgb::BLACK));
        assert_eq!(drawing.fill, None);
        assert_eq!(drawing.width, Some(2.0));
    }

    #[test]
    fn test_filled_path_with_curve() {
        let page = run("1 0 0 rg 0 0 m 10 0 l 10 10 20 10 20 0 c h f");
        let drawing = &page.drawings[0];
        assert_eq!(drawing.fill, Some(Rgb::new(1.0, 0.0, 0.0)));
        assert_eq!(drawing.stroke, None);
        assert_eq!(drawing.items.len(), 3);
        assert_eq!(
            drawing.items[0],
            PathItem::Line(Point::new(0.0, 792.0), Point::new(10.0, 792.0))
        );
        assert!(matches!(drawing.items[1], PathItem::Curve(..)));
        // `h` closes back to the subpath start.
        assert_eq!(
            drawing.items[2],
            PathItem::Line(Point::new(20.0, 792.0), Point::new(0.0, 792.0))
        );
    }

    #[test]
    fn test_rotated_rectangle_becomes_quad() {
        let page = run("0.7071 0.7071 -0.7071 0.7071 300 300 cm 0 0 10 10 re f");
        assert!(matches!(page.drawings[0].items[0], PathItem::Quad(_)));
    }

    #[test]
    fn test_clip_path_is_discarded() {
        let page = run("0 0 100 100 re W n 0 0 m 5 5 l S");
        assert_eq!(page.drawings.len(), 1);
        assert!(matches!(page.drawings[0].items[0], PathItem::Line(..)));
    }

    #[test]
    fn test_graphics_state_restore() {
        let page = run("q 3 w 1 0 0 RG Q 0 0 m 5 5 l S");
        assert_eq!(page.drawings[0].stroke, Some(Rgb::BLACK));
        assert_eq!(page.drawings[0].width, Some(1.0));
    }

    #[test]
    fn test_text_positions_and_grouping() {
        let mut doc = LopdfDocument::with_version("1.5");
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources = dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        };
        let content = b"BT /F1 12 Tf 0 0 1 rg 72 720 Td (Hi) Tj 0 -20 Td (yo) Tj ET";
        let page = interpret_page(&doc, content, Some(&resources), LETTER).unwrap();

        let block = page.text.text_blocks().next().unwrap();
        assert_eq!(block.lines.len(), 2);
        let span = &block.lines[0].spans[0];
        assert_eq!(span.text(), "Hi");
        assert_eq!(span.font, "Helvetica");
        assert_eq!(span.size, 12.0);
        assert_eq!(span.color, 0x0000FF);
        assert_eq!(span.origin, Point::new(72.0, 72.0));
        // Second glyph advanced by the default half-em width.
        assert_eq!(span.chars[1].origin, Point::new(78.0, 72.0));
        assert_eq!(block.lines[1].spans[0].origin, Point::new(72.0, 92.0));
    }

    #[test]
    fn test_tj_kerning_moves_pen() {
        let mut doc = LopdfDocument::with_version("1.5");
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources = dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        };
        let content = b"BT /F1 10 Tf 0 700 Td [(A) -500 (B)] TJ ET";
        let page = interpret_page(&doc, content, Some(&resources), LETTER).unwrap();
        let chars: Vec<_> = page.text.spans().flat_map(|s| s.chars.iter()).collect();
        // 5 for the advance of "A" plus 5 for the kerning.
        assert_eq!(chars[1].origin.x, 10.0);
    }

    #[test]
    fn test_image_placement_uses_ctm() {
        let mut doc = LopdfDocument::with_version("1.5");
        let image_id = doc.add_object(lopdf::Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => 4,
                "Height" => 4,
            },
            vec![0; 16],
        ));
        let resources = dictionary! {
            "XObject" => dictionary! { "Im1" => image_id },
        };
        let content = b"q 200 0 0 100 50 600 cm /Im1 Do Q";
        let page = interpret_page(&doc, content, Some(&resources), LETTER).unwrap();
        assert_eq!(
            page.placements,
            vec![ImagePlacement {
                xref: image_id.0,
                bbox: Rect::new(50.0, 92.0, 250.0, 192.0),
            }]
        );
        assert!(matches!(page.text.blocks[0], PageBlock::Image(_)));
    }

    #[test]
    fn test_invisible_text_is_skipped() {
        let mut doc = LopdfDocument::with_version("1.5");
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources = dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        };
        let content = b"BT /F1 10 Tf 3 Tr 0 700 Td (hidden) Tj ET";
        let page = interpret_page(&doc, content, Some(&resources), LETTER).unwrap();
        assert_eq!(page.text.spans().count(), 0);
    }

    #[test]
    fn test_color_operands() {
        assert_eq!(color_operands(&[Object::Real(0.5)]), Some(Rgb::gray(0.5)));
        assert_eq!(
            color_operands(&[Object::Integer(0), Object::Integer(0), Object::Integer(0), Object::Integer(1)]),
            Some(Rgb::BLACK)
        );
        assert_eq!(color_operands(&[Object::Name(b"P0".to_vec())]), None);
    }
}
