//! PDF to HTML conversion pipeline.
//!
//! Fonts are collected in a first pass over every selected page, then each
//! page is rendered in document order into its own container. Recoverable
//! failures end up in the [`ConversionReport`]; only an unreadable document
//! or an unwritable output directory aborts the run.
//!
//! # Example
//!
//! ```no_run
//! use pdfhtml::{ConvertOptions, HtmlConverter};
//!
//! fn main() -> pdfhtml::Result<()> {
//!     let converter = HtmlConverter::new(ConvertOptions::new().with_output_dir("out"));
//!     let report = converter.convert_file("document.pdf")?;
//!     println!("{}", report.html_path.display());
//!     Ok(())
//! }
//! ```

mod report;

pub use report::{ConversionReport, Diagnostics, Warning, WarningKind};

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};
use crate::markup::{HtmlDocument, PageContainer};
use crate::options::ConvertOptions;
use crate::render::{collect_fonts, page_container, place_images, render_drawings, resolve_text, FontRegistry};
use crate::source::{LopdfSource, PdfSource};

/// Converts PDF documents into a single HTML file plus extracted images.
#[derive(Debug, Clone, Default)]
pub struct HtmlConverter {
    options: ConvertOptions,
}

impl HtmlConverter {
    /// Create a converter with the given options.
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert a PDF file.
    ///
    /// The document title defaults to the file stem.
    pub fn convert_file(&self, path: impl AsRef<Path>) -> Result<ConversionReport> {
        let path = path.as_ref();
        let source = LopdfSource::open(path)?;
        let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        self.convert_source(&source, name)
    }

    /// Convert PDF bytes held in memory.
    pub fn convert_bytes(&self, bytes: &[u8]) -> Result<ConversionReport> {
        let source = LopdfSource::from_bytes(bytes)?;
        self.convert_source(&source, "")
    }

    /// Convert any [`PdfSource`].
    ///
    /// `name` is used as the document title unless the options set one; an
    /// empty name means no title.
    pub fn convert_source(&self, source: &dyn PdfSource, name: &str) -> Result<ConversionReport> {
        let output_dir = &self.options.output_dir;
        prepare_output_dir(output_dir).map_err(|e| Error::OutputDir {
            path: output_dir.clone(),
            source: e,
        })?;

        let pages = self.options.page_selection.resolve(source.page_count());
        let mut diagnostics = Diagnostics::new();
        let mut report = ConversionReport {
            page_count: pages.len() as u32,
            ..Default::default()
        };

        let fonts = collect_fonts(source, &pages, &mut diagnostics);
        report.fonts_embedded = fonts.len();

        let mut document = HtmlDocument::new();
        document.title = self.options.title.clone().or_else(|| (!name.is_empty()).then(|| name.to_string()));
        document.font_faces = fonts.font_faces().to_vec();

        for &page in &pages {
            log::debug!("rendering page {page}/{}", source.page_count());
            let container = self.render_page(source, page, &fonts, &mut diagnostics, &mut report)?;
            document.pages.push(container);
        }

        let html_path = self.options.html_path();
        fs::write(&html_path, document.to_html())?;
        log::info!("wrote {}", html_path.display());

        report.html_path = html_path;
        report.warnings = diagnostics.into_warnings();
        Ok(report)
    }

    fn render_page(
        &self,
        source: &dyn PdfSource,
        page: u32,
        fonts: &FontRegistry,
        diagnostics: &mut Diagnostics,
        report: &mut ConversionReport,
    ) -> Result<PageContainer> {
        let mut container = page_container(source, page)?;

        match source.page_drawings(page) {
            Ok(drawings) => {
                if let Some(canvas) = render_drawings(&drawings, container.width, container.height) {
                    report.drawings_rendered += canvas.children.len();
                    container.push(canvas);
                }
            }
            Err(e) => diagnostics.warn(Some(page), WarningKind::PageContent, format!("cannot read drawings: {e}")),
        }

        let placed = place_images(
            source,
            page,
            &self.options.output_dir,
            self.options.pixel_size_fallback,
            diagnostics,
        )?;
        for element in placed.elements {
            container.push(element);
        }
        report.images_written.extend(placed.files);

        match source.page_text(page) {
            Ok(text) => {
                let spans = resolve_text(&text, fonts, &self.options);
                report.spans_rendered += spans.len();
                for span in spans {
                    container.push(span);
                }
            }
            Err(e) => diagnostics.warn(Some(page), WarningKind::PageContent, format!("cannot read text: {e}")),
        }

        container.sort_layers();
        Ok(container)
    }
}

/// Scratch file written to test that the output directory accepts files.
const WRITE_CHECK_FILE: &str = ".pdfhtml-write-check";

/// Create `dir` if needed and make sure files can be written into it.
fn prepare_output_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let check = dir.join(WRITE_CHECK_FILE);
    fs::write(&check, b"")?;
    fs::remove_file(&check)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_output_dir_leaves_no_trace() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("a").join("b");
        prepare_output_dir(&out).unwrap();
        assert!(out.is_dir());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_prepare_output_dir_rejects_read_only_dir() {
        // procfs exists but accepts no new files, even for root.
        assert!(prepare_output_dir(Path::new("/proc")).is_err());
    }
}
