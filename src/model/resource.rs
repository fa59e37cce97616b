//! Font and image resources as reported by a PDF source.

use serde::{Deserialize, Serialize};

/// A font referenced from a page's resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontRef {
    /// Object number of the font dictionary (0 for direct dictionaries).
    pub xref: u32,
    /// Generation number of the font dictionary.
    pub generation: u16,
    /// Key in the page's `/Font` resource dictionary (e.g. "F1").
    pub resource_name: String,
    /// Canonical base name, the deduplication key across pages.
    pub base_name: String,
    /// Font subtype (Type1, TrueType, Type0, Type3, ...).
    pub subtype: String,
}

/// Payload of an extracted font program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontPayload {
    /// Raw font program bytes.
    Binary(Vec<u8>),
    /// Font program returned as text by the source.
    Text(String),
}

impl FontPayload {
    /// Bytes to embed; textual payloads are encoded as UTF-8.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            FontPayload::Binary(data) => data,
            FontPayload::Text(text) => text.into_bytes(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FontPayload::Binary(data) => data.is_empty(),
            FontPayload::Text(text) => text.is_empty(),
        }
    }
}

/// An embedded font program and its declared format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontData {
    pub payload: FontPayload,
    /// Declared format, e.g. "ttf", "otf", "cff".
    pub format: String,
}

impl FontData {
    pub fn binary(data: Vec<u8>, format: impl Into<String>) -> Self {
        Self {
            payload: FontPayload::Binary(data),
            format: format.into(),
        }
    }

    pub fn text(text: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            payload: FontPayload::Text(text.into()),
            format: format.into(),
        }
    }

    /// MIME type for a `@font-face` data URI.
    pub fn mime_type(&self) -> &'static str {
        font_mime_type(&self.format)
    }
}

/// Map a declared font format to a MIME type.
pub fn font_mime_type(format: &str) -> &'static str {
    match format.to_ascii_lowercase().as_str() {
        "ttf" => "font/truetype",
        "otf" => "font/opentype",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        _ => "application/octet-stream",
    }
}

/// An image XObject referenced from a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Object number of the image stream. 0 means "no image".
    pub xref: u32,
    /// Generation number of the image stream.
    pub generation: u16,
    /// Resource name the page uses for the image (e.g. "Im1").
    pub name: String,
    /// Intrinsic width in pixels.
    pub width: u32,
    /// Intrinsic height in pixels.
    pub height: u32,
}

impl ImageRef {
    /// True for the sentinel cross-reference that denotes "no image".
    pub fn is_sentinel(&self) -> bool {
        self.xref == 0
    }
}

/// Decoded image bytes ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedImage {
    pub data: Vec<u8>,
    /// File extension without the dot, e.g. "png", "jpg".
    pub extension: String,
}

impl ExtractedImage {
    pub fn new(data: Vec<u8>, extension: impl Into<String>) -> Self {
        Self {
            data,
            extension: extension.into(),
        }
    }
}
