//! Markup builder: a small typed element tree and its HTML serialization.
//!
//! Renderers produce typed elements with numeric fields; style strings are
//! only formatted when the tree is serialized.

mod document;
mod element;

pub use document::{escape_html, format_number, HtmlDocument, BASE_STYLESHEET};
pub use element::{Element, ImageElement, Layer, PageContainer, SvgCanvas, SvgPath, TextElement};
