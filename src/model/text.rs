//! Hierarchical page text: blocks -> lines -> spans -> characters.

use super::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Text content of a single page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextPage {
    pub blocks: Vec<PageBlock>,
}

impl TextPage {
    /// Iterate over text blocks only.
    pub fn text_blocks(&self) -> impl Iterator<Item = &TextBlock> {
        self.blocks.iter().filter_map(|b| match b {
            PageBlock::Text(block) => Some(block),
            PageBlock::Image(_) => None,
        })
    }

    /// Iterate over every span of every text block, in order.
    pub fn spans(&self) -> impl Iterator<Item = &TextSpan> {
        self.text_blocks()
            .flat_map(|b| b.lines.iter())
            .flat_map(|l| l.spans.iter())
    }
}

/// A block on the page, in content order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageBlock {
    Text(TextBlock),
    /// An image drawn on the page; duplicated by the image list.
    Image(ImageBlock),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    pub xref: u32,
    pub bbox: Rect,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub lines: Vec<TextLine>,
    pub bbox: Rect,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    pub spans: Vec<TextSpan>,
    pub bbox: Rect,
}

/// A run of characters sharing font, size and colour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// Font base name, matched against the font registry.
    pub font: String,
    /// Font size in page pixels.
    pub size: f32,
    /// Packed `0xRRGGBB` fill colour.
    pub color: u32,
    /// Ascent as a fraction of the font size, when the font declares one.
    pub ascender: Option<f32>,
    /// Baseline origin of the first character.
    pub origin: Point,
    pub bbox: Rect,
    pub chars: Vec<TextChar>,
}

impl TextSpan {
    /// Span text rebuilt from its characters, in order.
    pub fn text(&self) -> String {
        self.chars.iter().map(|c| c.value.as_str()).collect()
    }
}

/// A single glyph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextChar {
    /// Unicode value of the glyph. Usually one char, more for ligatures.
    pub value: String,
    pub origin: Point,
    pub bbox: Rect,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ch(value: &str) -> TextChar {
        TextChar {
            value: value.to_string(),
            origin: Point::default(),
            bbox: Rect::default(),
        }
    }

    #[test]
    fn test_span_text_is_char_concatenation() {
        let span = TextSpan {
            font: "Helvetica".to_string(),
            size: 12.0,
            color: 0,
            ascender: None,
            origin: Point::default(),
            bbox: Rect::default(),
            chars: vec![ch("e"), ch("ﬃ"), ch(" "), ch("\t"), ch("x")],
        };
        assert_eq!(span.text(), "eﬃ \tx");
    }

    #[test]
    fn test_text_blocks_skip_images() {
        let page = TextPage {
            blocks: vec![
                PageBlock::Image(ImageBlock {
                    xref: 7,
                    bbox: Rect::default(),
                }),
                PageBlock::Text(TextBlock::default()),
            ],
        };
        assert_eq!(page.text_blocks().count(), 1);
        assert_eq!(page.spans().count(), 0);
    }
}
