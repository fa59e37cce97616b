//! # pdfhtml
//!
//! Layout-preserving PDF to HTML conversion.
//!
//! Each PDF page becomes an absolutely positioned container holding an SVG
//! layer for vector drawings, `<img>` elements for raster images written
//! next to the HTML file, and text spans rendered with the document's own
//! embedded fonts. The result is one self-contained HTML file that keeps the
//! original layout while staying searchable and inspectable.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfhtml::{convert_file, ConvertOptions};
//!
//! fn main() -> pdfhtml::Result<()> {
//!     let options = ConvertOptions::new().with_output_dir("output");
//!     let report = convert_file("document.pdf", options)?;
//!
//!     println!("wrote {}", report.html_path.display());
//!     for warning in &report.warnings {
//!         eprintln!("{warning}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! 1. Fonts of every selected page are embedded once as `@font-face` rules.
//! 2. Each page gets a container sized to its display rectangle.
//! 3. Drawings, images and text are rendered into layers, in that order.
//! 4. The document is serialized to `output.html` in the output directory.
//!
//! Failures that affect a single font, image or page layer are reported as
//! warnings; only an unreadable PDF or an unwritable output directory fails
//! the conversion.

pub mod convert;
pub mod detect;
pub mod error;
pub mod markup;
pub mod model;
pub mod options;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use convert::{ConversionReport, HtmlConverter, Warning, WarningKind};
pub use detect::{detect_version_from_bytes, detect_version_from_path, is_pdf_bytes};
pub use error::{Error, Result};
pub use options::{ConvertOptions, PageSelection};
pub use source::{LopdfSource, PdfSource};

use std::path::Path;

/// Convert a PDF file to HTML.
///
/// # Arguments
///
/// * `path` - Path to the PDF file
/// * `options` - Conversion options, including the output directory
///
/// # Example
///
/// ```no_run
/// use pdfhtml::{convert_file, ConvertOptions};
///
/// let report = convert_file("document.pdf", ConvertOptions::default()).unwrap();
/// assert!(report.html_path.ends_with("output.html"));
/// ```
pub fn convert_file<P: AsRef<Path>>(path: P, options: ConvertOptions) -> Result<ConversionReport> {
    HtmlConverter::new(options).convert_file(path)
}

/// Convert PDF bytes to HTML.
///
/// # Example
///
/// ```no_run
/// use pdfhtml::{convert_bytes, ConvertOptions};
///
/// let data = std::fs::read("document.pdf").unwrap();
/// let report = convert_bytes(&data, ConvertOptions::new().with_output_dir("out")).unwrap();
/// println!("{} pages", report.page_count);
/// ```
pub fn convert_bytes(data: &[u8], options: ConvertOptions) -> Result<ConversionReport> {
    HtmlConverter::new(options).convert_bytes(data)
}

/// Check whether a file looks like a PDF this crate can open.
pub fn is_pdf<P: AsRef<Path>>(path: P) -> bool {
    detect_version_from_path(path).is_ok()
}
