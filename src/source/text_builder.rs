//! Group positioned glyphs into lines and spans.

use crate::model::{Point, Rect, TextBlock, TextChar, TextLine, TextSpan};

/// Approximate ascent used for glyph boxes when the font declares none.
const GLYPH_ASCENT: f32 = 0.8;
const GLYPH_DESCENT: f32 = 0.2;

/// Baseline shift, as a fraction of the font size, that starts a new line.
const LINE_TOLERANCE: f32 = 0.2;

/// Pen jump, in ems, that starts a new span even when the style is unchanged.
const SPAN_GAP_EMS: f32 = 1.0;

/// A single shown glyph in page pixels.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Glyph {
    pub value: String,
    pub font: String,
    pub size: f32,
    pub color: u32,
    pub ascender: Option<f32>,
    /// Baseline origin.
    pub origin: Point,
    /// Pen position after the glyph's advance.
    pub end: Point,
}

impl Glyph {
    fn bbox(&self) -> Rect {
        let ascent = self.ascender.unwrap_or(GLYPH_ASCENT);
        Rect::new(
            self.origin.x.min(self.end.x),
            self.origin.y - self.size * ascent,
            self.origin.x.max(self.end.x),
            self.origin.y + self.size * GLYPH_DESCENT,
        )
    }

    fn same_style(&self, span: &TextSpan) -> bool {
        self.font == span.font && (self.size - span.size).abs() < 0.01 && self.color == span.color
    }
}

/// Build one text block from the glyphs shown between `BT` and `ET`.
///
/// Returns `None` when no glyph was shown.
pub(crate) fn build_block(glyphs: Vec<Glyph>) -> Option<TextBlock> {
    let mut lines: Vec<TextLine> = Vec::new();
    let mut previous: Option<(Point, Point)> = None;

    for glyph in glyphs {
        let bbox = glyph.bbox();

        let new_line = match previous {
            Some((origin, _)) => (glyph.origin.y - origin.y).abs() > LINE_TOLERANCE * glyph.size,
            None => true,
        };
        if new_line {
            lines.push(TextLine {
                spans: Vec::new(),
                bbox,
            });
        }
        let Some(line) = lines.last_mut() else {
            continue;
        };

        let gap = match previous {
            Some((_, end)) if !new_line => (glyph.origin.x - end.x).abs(),
            _ => 0.0,
        };
        let new_span = match line.spans.last() {
            Some(span) => !glyph.same_style(span) || gap > glyph.size * SPAN_GAP_EMS,
            None => true,
        };
        if new_span {
            line.spans.push(TextSpan {
                font: glyph.font.clone(),
                size: glyph.size,
                color: glyph.color,
                ascender: glyph.ascender,
                origin: glyph.origin,
                bbox,
                chars: Vec::new(),
            });
        }
        let Some(span) = line.spans.last_mut() else {
            continue;
        };

        span.bbox = span.bbox.union(&bbox);
        line.bbox = line.bbox.union(&bbox);
        previous = Some((glyph.origin, glyph.end));
        span.chars.push(TextChar {
            value: glyph.value,
            origin: glyph.origin,
            bbox,
        });
    }

    let bbox = lines
        .iter()
        .map(|l| l.bbox)
        .reduce(|acc, b| acc.union(&b))?;
    Some(TextBlock { lines, bbox })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(value: &str, x: f32, y: f32) -> Glyph {
        Glyph {
            value: value.to_string(),
            font: "Helvetica".to_string(),
            size: 10.0,
            color: 0,
            ascender: None,
            origin: Point::new(x, y),
            end: Point::new(x + 5.0, y),
        }
    }

    #[test]
    fn test_empty_block() {
        assert!(build_block(Vec::new()).is_none());
    }

    #[test]
    fn test_adjacent_glyphs_share_span() {
        let block = build_block(vec![glyph("a", 10.0, 50.0), glyph("b", 15.0, 50.0)]).unwrap();
        assert_eq!(block.lines.len(), 1);
        assert_eq!(block.lines[0].spans.len(), 1);
        let span = &block.lines[0].spans[0];
        assert_eq!(span.text(), "ab");
        assert_eq!(span.origin, Point::new(10.0, 50.0));
        assert_eq!(span.bbox, Rect::new(10.0, 42.0, 20.0, 52.0));
    }

    #[test]
    fn test_baseline_change_starts_line() {
        let block = build_block(vec![glyph("a", 10.0, 50.0), glyph("b", 10.0, 64.0)]).unwrap();
        assert_eq!(block.lines.len(), 2);
        assert_eq!(block.bbox, Rect::new(10.0, 42.0, 15.0, 66.0));
    }

    #[test]
    fn test_small_rise_stays_on_line() {
        let block = build_block(vec![glyph("a", 10.0, 50.0), glyph("b", 15.0, 49.0)]).unwrap();
        assert_eq!(block.lines.len(), 1);
    }

    #[test]
    fn test_style_change_starts_span() {
        let mut red = glyph("b", 15.0, 50.0);
        red.color = 0xFF0000;
        let block = build_block(vec![glyph("a", 10.0, 50.0), red]).unwrap();
        let spans = &block.lines[0].spans;
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1].color, 0xFF0000);
        assert_eq!(spans[1].text(), "b");
    }

    #[test]
    fn test_wide_gap_starts_span() {
        let block = build_block(vec![glyph("a", 10.0, 50.0), glyph("b", 200.0, 50.0)]).unwrap();
        let spans = &block.lines[0].spans;
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1].origin.x, 200.0);
    }
}
