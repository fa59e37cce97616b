//! Text spans as absolutely positioned elements.

use crate::markup::TextElement;
use crate::model::{TextPage, TextSpan};
use crate::options::ConvertOptions;

use super::FontRegistry;

/// `#rrggbb` of a packed `0xRRGGBB` colour.
pub fn hex_color(color: u32) -> String {
    format!("#{:06x}", color & 0x00ff_ffff)
}

/// Top edge of a span's box from its baseline.
///
/// PDF positions text by baseline; CSS boxes start at the top, one ascent
/// above it.
pub fn adjusted_top(origin_y: f32, size: f32, ascender: f32) -> f32 {
    origin_y - size * ascender
}

/// CSS `font-family` value of a span font.
pub fn font_family(registry: &FontRegistry, base_name: &str, fallback: &str) -> String {
    match registry.lookup(base_name) {
        Some(id) => format!("{id}, {fallback}"),
        None => fallback.to_string(),
    }
}

/// Turn every non-empty span of a page into a text element, in order.
/// Image blocks are ignored; the image stage places them.
pub fn resolve_text(page: &TextPage, registry: &FontRegistry, options: &ConvertOptions) -> Vec<TextElement> {
    page.spans()
        .filter_map(|span| text_element(span, registry, options))
        .collect()
}

fn text_element(span: &TextSpan, registry: &FontRegistry, options: &ConvertOptions) -> Option<TextElement> {
    let text = span.text();
    if text.is_empty() {
        return None;
    }
    let ascender = span.ascender.unwrap_or(options.default_ascender);
    Some(TextElement {
        text,
        left: span.origin.x,
        top: adjusted_top(span.origin.y, span.size, ascender),
        font_family: font_family(registry, &span.font, &options.fallback_font_family),
        font_size: span.size,
        color: hex_color(span.color),
    })
}
