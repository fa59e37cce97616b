//! Error types for pdfhtml.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdfhtml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting a PDF to HTML.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted and cannot be read.
    #[error("Document is encrypted")]
    Encrypted,

    /// The PDF structure is corrupted or malformed.
    #[error("Corrupted PDF structure: {0}")]
    Corrupted(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// An embedded font program could not be extracted.
    #[error("Font extraction error: {0}")]
    FontExtract(String),

    /// An image could not be extracted or decoded.
    #[error("Image extraction error: {0}")]
    ImageExtract(String),

    /// An image placement rectangle is degenerate or not finite.
    #[error("Invalid bounding box for image {0}")]
    InvalidBoundingBox(u32),

    /// The output directory cannot be created or written.
    #[error("Output directory {} is not writable: {source}", path.display())]
    OutputDir {
        /// Directory that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// Error while building or serializing markup.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::ImageExtract(err.to_string())
    }
}
