//! Conversion options and configuration.

use std::ops::RangeInclusive;
use std::path::PathBuf;

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Name of the HTML file written inside the output directory.
pub const DEFAULT_HTML_FILE_NAME: &str = "output.html";

/// Ascent ratio used when a span's font declares none.
pub const DEFAULT_ASCENDER: f32 = 0.8;

/// Generic family used when a span's font was not embedded.
pub const DEFAULT_FALLBACK_FONT: &str = "sans-serif";

/// Options for converting a PDF to HTML.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Directory receiving the HTML file and extracted images
    pub output_dir: PathBuf,

    /// File name of the HTML document inside `output_dir`
    pub html_file_name: String,

    /// Ascent ratio for spans whose font reports none
    pub default_ascender: f32,

    /// CSS generic family for unresolved fonts
    pub fallback_font_family: String,

    /// Page selection
    pub page_selection: PageSelection,

    /// Place images without a known on-page box at (0,0) with their pixel size
    pub pixel_size_fallback: bool,

    /// Document title; `None` uses the PDF file stem when converting a file
    pub title: Option<String>,
}

impl ConvertOptions {
    /// Create new conversion options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the HTML file name.
    pub fn with_html_file_name(mut self, name: impl Into<String>) -> Self {
        self.html_file_name = name.into();
        self
    }

    /// Set the fallback ascent ratio. Non-finite or non-positive values are
    /// ignored.
    pub fn with_default_ascender(mut self, ascender: f32) -> Self {
        if ascender.is_finite() && ascender > 0.0 {
            self.default_ascender = ascender;
        }
        self
    }

    /// Set the fallback font family.
    pub fn with_fallback_font(mut self, family: impl Into<String>) -> Self {
        self.fallback_font_family = family.into();
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, selection: PageSelection) -> Self {
        self.page_selection = selection;
        self
    }

    /// Set specific page range.
    pub fn with_page_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.page_selection = PageSelection::Range(range);
        self
    }

    /// Enable or disable the pixel-size placement fallback.
    pub fn with_pixel_size_fallback(mut self, enabled: bool) -> Self {
        self.pixel_size_fallback = enabled;
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Full path of the HTML file.
    pub fn html_path(&self) -> PathBuf {
        self.output_dir.join(&self.html_file_name)
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            html_file_name: DEFAULT_HTML_FILE_NAME.to_string(),
            default_ascender: DEFAULT_ASCENDER,
            fallback_font_family: DEFAULT_FALLBACK_FONT.to_string(),
            page_selection: PageSelection::All,
            pixel_size_fallback: false,
            title: None,
        }
    }
}

/// Page selection for conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Convert all pages
    #[default]
    All,
    /// Convert a range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Convert specific pages (1-indexed)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Selected pages of a document with `page_count` pages, in order.
    pub fn resolve(&self, page_count: u32) -> Vec<u32> {
        (1..=page_count).filter(|&p| self.includes(p)).collect()
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        // Check for simple range (e.g., "1-10")
        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let (start, end) = parse_range(start, end)?;
                return Ok(PageSelection::Range(start..=end));
            }
        }

        // Parse comma-separated list with possible ranges
        let mut pages = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                let (start, end) = parse_range(start, end)?;
                pages.extend(start..=end);
            } else {
                pages.push(parse_page(part)?);
            }
        }

        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}

fn parse_page(s: &str) -> Result<u32, String> {
    match s.trim().parse::<u32>() {
        Ok(0) => Err("Page numbers start at 1".to_string()),
        Ok(page) => Ok(page),
        Err(_) => Err(format!("Invalid page number: {}", s.trim())),
    }
}

fn parse_range(start: &str, end: &str) -> Result<(u32, u32), String> {
    let start = parse_page(start)?;
    let end = parse_page(end)?;
    if start > end {
        return Err(format!("Invalid page range: {start}-{end}"));
    }
    Ok((start, end))
}
