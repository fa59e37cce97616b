//! Font metrics and embedded font programs.

use std::collections::HashMap;

use lopdf::{Dictionary, Document as LopdfDocument, Object, Stream};

use super::objects::{dict_get, dict_get_dict, dict_get_name, dict_get_number, get_number, resolve, stream_bytes};
use crate::error::{Error, Result};
use crate::model::FontData;

/// Advance used for simple fonts that declare no widths (the standard 14).
const DEFAULT_GLYPH_WIDTH: f32 = 0.5;

/// Upper bound on a single `/W` range, guarding against hostile arrays.
const MAX_CID_RANGE: u32 = 0x1_0000;

/// Metrics needed to position glyphs of one font.
#[derive(Debug, Clone)]
pub(crate) struct FontMetrics {
    /// Canonical base name, shared with the font registry.
    pub base_name: String,
    /// Type0 fonts use two-byte character codes.
    pub two_byte: bool,
    /// Ascent as a fraction of the em, when the descriptor declares one.
    pub ascender: Option<f32>,
    first_char: u32,
    /// Advances in text space units (fractions of the font size).
    widths: Vec<f32>,
    missing_width: f32,
    cid_widths: HashMap<u32, f32>,
}

impl FontMetrics {
    pub fn load(doc: &LopdfDocument, dict: &Dictionary, resource_name: &str) -> Self {
        let subtype = dict_get_name(doc, dict, b"Subtype").unwrap_or_default();
        let base_name = font_base_name(doc, dict, resource_name);

        if subtype == "Type0" {
            let descendant = descendant_font(doc, dict);
            let (default_width, cid_widths) = descendant
                .map(|d| load_cid_widths(doc, d))
                .unwrap_or_else(|| (1.0, HashMap::new()));
            return Self {
                base_name,
                two_byte: true,
                ascender: descendant.and_then(|d| descriptor_ascent(doc, d)),
                first_char: 0,
                widths: Vec::new(),
                missing_width: default_width,
                cid_widths,
            };
        }

        // Type3 glyph space is defined by the font matrix, not 1/1000 em.
        let scale = if subtype == "Type3" {
            dict.get(b"FontMatrix")
                .ok()
                .and_then(|m| super::objects::number_array::<6>(doc, m))
                .map(|m| m[0])
                .unwrap_or(0.001)
        } else {
            0.001
        };

        let first_char = dict_get_number(doc, dict, b"FirstChar").unwrap_or(0.0).max(0.0) as u32;
        let widths: Vec<f32> = dict_get(doc, dict, b"Widths")
            .and_then(|w| w.as_array().ok())
            .map(|arr| {
                arr.iter()
                    .map(|o| resolve(doc, o).and_then(get_number).unwrap_or(0.0) * scale)
                    .collect()
            })
            .unwrap_or_default();

        let missing_width = dict_get_dict(doc, dict, b"FontDescriptor")
            .and_then(|d| dict_get_number(doc, d, b"MissingWidth"))
            .map(|w| w * scale)
            .unwrap_or(if widths.is_empty() { DEFAULT_GLYPH_WIDTH } else { 0.0 });

        Self {
            base_name,
            two_byte: false,
            ascender: if subtype == "Type3" {
                None
            } else {
                descriptor_ascent(doc, dict)
            },
            first_char,
            widths,
            missing_width,
            cid_widths: HashMap::new(),
        }
    }

    /// Horizontal advance of `code` as a fraction of the font size.
    pub fn advance(&self, code: u32) -> f32 {
        if self.two_byte {
            return self.cid_widths.get(&code).copied().unwrap_or(self.missing_width);
        }
        code.checked_sub(self.first_char)
            .and_then(|i| self.widths.get(i as usize))
            .copied()
            .unwrap_or(self.missing_width)
    }

    /// Metrics for an unknown font resource.
    pub fn fallback(resource_name: &str) -> Self {
        Self {
            base_name: resource_name.to_string(),
            two_byte: false,
            ascender: None,
            first_char: 0,
            widths: Vec::new(),
            missing_width: DEFAULT_GLYPH_WIDTH,
            cid_widths: HashMap::new(),
        }
    }
}

/// Canonical base name of a font dictionary.
///
/// The subset tag (`ABCDEF+`) is kept: two subsets of the same family carry
/// different glyphs and must not be merged.
pub(crate) fn font_base_name(doc: &LopdfDocument, dict: &Dictionary, resource_name: &str) -> String {
    dict_get_name(doc, dict, b"BaseFont").unwrap_or_else(|| resource_name.to_string())
}

/// Extract the embedded font program of a font dictionary.
pub(crate) fn font_program(doc: &LopdfDocument, dict: &Dictionary, base_name: &str) -> Result<FontData> {
    let subtype = dict_get_name(doc, dict, b"Subtype").unwrap_or_default();
    let descriptor = if subtype == "Type0" {
        descendant_font(doc, dict).and_then(|d| dict_get_dict(doc, d, b"FontDescriptor"))
    } else {
        dict_get_dict(doc, dict, b"FontDescriptor")
    }
    .ok_or_else(|| Error::FontExtract(format!("{base_name}: no font descriptor")))?;

    if let Some(stream) = descriptor_stream(doc, descriptor, b"FontFile2") {
        return Ok(FontData::binary(stream_bytes(stream)?, "ttf"));
    }
    if let Some(stream) = descriptor_stream(doc, descriptor, b"FontFile3") {
        let format = match dict_get_name(doc, &stream.dict, b"Subtype").as_deref() {
            Some("OpenType") => "otf",
            Some("Type1C") | Some("CIDFontType0C") => "cff",
            _ => "bin",
        };
        return Ok(FontData::binary(stream_bytes(stream)?, format));
    }
    if let Some(stream) = descriptor_stream(doc, descriptor, b"FontFile") {
        return Ok(FontData::binary(stream_bytes(stream)?, "pfb"));
    }

    Err(Error::FontExtract(format!("{base_name}: font is not embedded")))
}

fn descriptor_stream<'a>(doc: &'a LopdfDocument, descriptor: &'a Dictionary, key: &[u8]) -> Option<&'a Stream> {
    dict_get(doc, descriptor, key).and_then(|o| o.as_stream().ok())
}

fn descendant_font<'a>(doc: &'a LopdfDocument, dict: &'a Dictionary) -> Option<&'a Dictionary> {
    let array = dict_get(doc, dict, b"DescendantFonts")?.as_array().ok()?;
    match resolve(doc, array.first()?)? {
        Object::Dictionary(d) => Some(d),
        _ => None,
    }
}

fn descriptor_ascent(doc: &LopdfDocument, font: &Dictionary) -> Option<f32> {
    let descriptor = dict_get_dict(doc, font, b"FontDescriptor")?;
    let ascent = dict_get_number(doc, descriptor, b"Ascent")? / 1000.0;
    // Some producers write nonsense ascents; let the configured default win.
    (ascent > 0.0 && ascent < 2.0).then_some(ascent)
}

/// Parse `/DW` and `/W` of a CIDFont.
fn load_cid_widths(doc: &LopdfDocument, cid_font: &Dictionary) -> (f32, HashMap<u32, f32>) {
    let default_width = dict_get_number(doc, cid_font, b"DW").unwrap_or(1000.0) / 1000.0;
    let mut widths = HashMap::new();

    let Some(array) = dict_get(doc, cid_font, b"W").and_then(|w| w.as_array().ok()) else {
        return (default_width, widths);
    };

    let number = |i: usize| array.get(i).and_then(|o| resolve(doc, o)).and_then(get_number);
    let mut i = 0;
    while i < array.len() {
        let Some(first) = number(i) else { break };
        let first = first.max(0.0) as u32;
        match array.get(i + 1).and_then(|o| resolve(doc, o)) {
            Some(Object::Array(list)) => {
                for (k, w) in list.iter().enumerate() {
                    // Entries past the last CID are dropped.
                    let Some(cid) = u32::try_from(k).ok().and_then(|k| first.checked_add(k)) else {
                        break;
                    };
                    if let Some(w) = resolve(doc, w).and_then(get_number) {
                        widths.insert(cid, w / 1000.0);
                    }
                }
                i += 2;
            }
            Some(obj) => {
                let (Some(last), Some(w)) = (get_number(obj), number(i + 2)) else {
                    break;
                };
                let last = (last.max(0.0) as u32).min(first.saturating_add(MAX_CID_RANGE));
                for cid in first..=last {
                    widths.insert(cid, w / 1000.0);
                }
                i += 3;
            }
            None => break,
        }
    }

    (default_width, widths)
}
