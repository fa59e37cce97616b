//! Data model exchanged between the PDF source and the HTML renderers.
//!
//! The model is deliberately library-agnostic: nothing here mentions lopdf,
//! so renderers can be driven by any [`crate::source::PdfSource`].

mod drawing;
mod geometry;
mod page;
mod resource;
mod text;

pub use drawing::{Drawing, PathItem};
pub use geometry::{Matrix, Point, Rect, Rgb};
pub use page::PageRect;
pub use resource::{font_mime_type, ExtractedImage, FontData, FontPayload, FontRef, ImageRef};
pub use text::{ImageBlock, PageBlock, TextBlock, TextChar, TextLine, TextPage, TextSpan};
