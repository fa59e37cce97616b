//! Render stages turning source content into markup elements.
//!
//! Fonts are collected once per document; the other stages run per page and
//! each produce one layer of the page container.

mod drawings;
mod fonts;
mod geometry;
mod images;
mod text;

pub use drawings::{render_drawing, render_drawings, rgb_css, svg_path_data, DEFAULT_STROKE_WIDTH};
pub use fonts::{collect_fonts, font_face_rule, FontRegistry};
pub use geometry::page_container;
pub use images::{image_file_name, place_images, PlacedImages};
pub use text::{adjusted_top, font_family, hex_color, resolve_text};
