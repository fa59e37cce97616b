//! PDF source abstraction layer.
//!
//! Provides a trait-based interface for everything the converter needs to
//! know about a PDF, isolating the concrete PDF library (lopdf) from the
//! layout reconstruction logic.

mod fonts;
mod images;
mod interpreter;
mod lopdf_source;
mod objects;
mod text_builder;

pub use lopdf_source::LopdfSource;

use crate::error::Result;
use crate::model::{Drawing, ExtractedImage, FontData, FontRef, ImageRef, PageRect, Rect, TextPage};

/// Abstract interface for PDF document access.
///
/// Page numbers are 1-based. Geometry is reported in page pixels with a
/// top-left origin.
pub trait PdfSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Display size of a page.
    fn page_rect(&self, page: u32) -> Result<PageRect>;

    /// Fonts referenced by a page.
    fn page_fonts(&self, page: u32) -> Result<Vec<FontRef>>;

    /// Embedded program of a font.
    fn extract_font(&self, font: &FontRef) -> Result<FontData>;

    /// Images referenced by a page, unique by cross-reference.
    fn page_images(&self, page: u32) -> Result<Vec<ImageRef>>;

    /// Decoded bytes of an image, in a format a browser can show.
    fn extract_image(&self, image: &ImageRef) -> Result<ExtractedImage>;

    /// Bounding box of the first placement of `image` on `page`, with the
    /// content-stream transform applied. `None` when no placement is known.
    fn image_bbox(&self, page: u32, image: &ImageRef) -> Result<Option<Rect>>;

    /// Painted vector paths of a page.
    fn page_drawings(&self, page: u32) -> Result<Vec<Drawing>>;

    /// Text content of a page at character granularity.
    fn page_text(&self, page: u32) -> Result<TextPage>;
}

/// Simple text decoding fallback when no encoding is available.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    // Try UTF-16BE first (BOM marker)
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    // Try UTF-8
    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Fallback: Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_text_simple_utf8() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
    }

    #[test]
    fn test_decode_text_simple_latin1() {
        // 0xE9 = 'é' in Latin-1
        let bytes = vec![0x48, 0x65, 0x6C, 0x6C, 0xE9];
        assert_eq!(decode_text_simple(&bytes), "Hellé");
    }

    #[test]
    fn test_decode_text_simple_utf16be() {
        // UTF-16BE BOM + "Hi"
        let bytes = vec![0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69];
        assert_eq!(decode_text_simple(&bytes), "Hi");
    }
}
