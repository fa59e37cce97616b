//! Conversion report: what was written and what was skipped.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Category of a recoverable failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A font program could not be extracted; spans fall back to a generic family.
    FontExtraction,
    /// An image could not be extracted or written.
    ImageExtraction,
    /// An image has no usable on-page bounding box.
    ImagePlacement,
    /// A page layer (drawings, images, text) could not be read.
    PageContent,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WarningKind::FontExtraction => "font",
            WarningKind::ImageExtraction => "image",
            WarningKind::ImagePlacement => "placement",
            WarningKind::PageContent => "page",
        };
        f.write_str(s)
    }
}

/// A recoverable failure recorded during conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    /// 1-based page, when the failure belongs to one.
    pub page: Option<u32>,
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    pub fn new(page: Option<u32>, kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            page,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.page {
            Some(page) => write!(f, "[{}] page {}: {}", self.kind, page, self.message),
            None => write!(f, "[{}] {}", self.kind, self.message),
        }
    }
}

/// Collects warnings and mirrors each one to the log.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning.
    pub fn warn(&mut self, page: Option<u32>, kind: WarningKind, message: impl Into<String>) {
        let warning = Warning::new(page, kind, message);
        log::warn!("{warning}");
        self.warnings.push(warning);
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

/// Summary of a finished conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionReport {
    /// Path of the written HTML file
    pub html_path: PathBuf,

    /// Number of pages converted
    pub page_count: u32,

    /// Number of `@font-face` rules emitted
    pub fonts_embedded: usize,

    /// Image files written next to the HTML file
    pub images_written: Vec<PathBuf>,

    /// Number of text spans emitted
    pub spans_rendered: usize,

    /// Number of SVG paths emitted
    pub drawings_rendered: usize,

    /// Recoverable failures, in the order they happened
    pub warnings: Vec<Warning>,
}

impl ConversionReport {
    /// Count warnings of one kind.
    pub fn warning_count(&self, kind: WarningKind) -> usize {
        self.warnings.iter().filter(|w| w.kind == kind).count()
    }

    /// Pretty-printed JSON form of the report.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_display() {
        let w = Warning::new(Some(2), WarningKind::ImagePlacement, "image 7 has no bbox");
        assert_eq!(w.to_string(), "[placement] page 2: image 7 has no bbox");

        let w = Warning::new(None, WarningKind::FontExtraction, "F1 not embedded");
        assert_eq!(w.to_string(), "[font] F1 not embedded");
    }

    #[test]
    fn test_diagnostics_collects_in_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.warn(None, WarningKind::FontExtraction, "first");
        diagnostics.warn(Some(1), WarningKind::PageContent, "second");
        let warnings = diagnostics.into_warnings();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].message, "first");
        assert_eq!(warnings[1].page, Some(1));
    }

    #[test]
    fn test_report_serializes_kinds_in_snake_case() {
        let report = ConversionReport {
            warnings: vec![Warning::new(None, WarningKind::FontExtraction, "x")],
            ..Default::default()
        };
        let json = report.to_json().unwrap();
        assert!(json.contains("\"kind\": \"font_extraction\""));
        assert_eq!(report.warning_count(WarningKind::FontExtraction), 1);
    }
}
