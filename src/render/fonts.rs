//! Font collection: embedded font programs as `@font-face` data URIs.

use std::collections::HashMap;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::convert::{Diagnostics, WarningKind};
use crate::model::FontData;
use crate::source::PdfSource;

/// Prefix of synthetic font-family identifiers.
const FONT_ID_PREFIX: &str = "pdffont";

/// Document-wide mapping from font base names to embedded font faces.
///
/// Built once before any page is rendered and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct FontRegistry {
    ids: HashMap<String, String>,
    faces: Vec<String>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synthetic family identifier of a base name, if it was embedded.
    pub fn lookup(&self, base_name: &str) -> Option<&str> {
        self.ids.get(base_name).map(String::as_str)
    }

    pub fn contains(&self, base_name: &str) -> bool {
        self.ids.contains_key(base_name)
    }

    /// `@font-face` rules in registration order.
    pub fn font_faces(&self) -> &[String] {
        &self.faces
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Embed `data` under a fresh identifier and return it.
    ///
    /// A base name that is already registered keeps its first identifier.
    pub fn register(&mut self, base_name: &str, data: FontData) -> &str {
        if !self.ids.contains_key(base_name) {
            let id = format!("{FONT_ID_PREFIX}-{}", self.ids.len() + 1);
            self.faces.push(font_face_rule(&id, data));
            self.ids.insert(base_name.to_string(), id);
        }
        self.ids[base_name].as_str()
    }
}

/// CSS rule embedding a font program as a base64 data URI.
pub fn font_face_rule(id: &str, data: FontData) -> String {
    let mime = data.mime_type();
    let encoded = BASE64.encode(data.payload.into_bytes());
    format!("@font-face {{ font-family: {id}; src: url(data:{mime};base64,{encoded}); }}")
}

/// Scan `pages` in order and embed every distinct font once.
///
/// Extraction failures are recorded and never abort the scan. A failed base
/// name stays unregistered, so a later font object with the same name is
/// still tried.
pub fn collect_fonts(source: &dyn PdfSource, pages: &[u32], diagnostics: &mut Diagnostics) -> FontRegistry {
    let mut registry = FontRegistry::new();

    for &page in pages {
        let fonts = match source.page_fonts(page) {
            Ok(fonts) => fonts,
            Err(e) => {
                diagnostics.warn(Some(page), WarningKind::PageContent, format!("cannot list fonts: {e}"));
                continue;
            }
        };

        for font in fonts {
            if registry.contains(&font.base_name) {
                continue;
            }
            match source.extract_font(&font) {
                Ok(data) if !data.payload.is_empty() => {
                    let id = registry.register(&font.base_name, data);
                    log::debug!("embedded font {} as {id}", font.base_name);
                }
                Ok(_) => {
                    diagnostics.warn(
                        Some(page),
                        WarningKind::FontExtraction,
                        format!("font {} has no data", font.base_name),
                    );
                }
                Err(e) => {
                    diagnostics.warn(
                        Some(page),
                        WarningKind::FontExtraction,
                        format!("font {}: {e}", font.base_name),
                    );
                }
            }
        }
    }

    registry
}
