//! Image placement: extracted image files plus positioned `<img>` elements.

use std::fs;
use std::path::{Path, PathBuf};

use crate::convert::{Diagnostics, WarningKind};
use crate::error::{Error, Result};
use crate::markup::ImageElement;
use crate::model::{ImageRef, Rect};
use crate::source::PdfSource;

/// Images of one page that made it to disk.
#[derive(Debug, Clone, Default)]
pub struct PlacedImages {
    pub elements: Vec<ImageElement>,
    /// Written files, in placement order.
    pub files: Vec<PathBuf>,
}

/// File name of an extracted image, unique per page and cross-reference.
pub fn image_file_name(page: u32, xref: u32, extension: &str) -> String {
    let extension = if extension.is_empty() { "bin" } else { extension };
    format!("page{page}_img{xref}.{extension}")
}

/// Extract, write and place every image of `page`.
///
/// Images that cannot be extracted or have no usable box are skipped with a
/// warning and leave no file behind. Failing to write a file is fatal.
pub fn place_images(
    source: &dyn PdfSource,
    page: u32,
    output_dir: &Path,
    pixel_size_fallback: bool,
    diagnostics: &mut Diagnostics,
) -> Result<PlacedImages> {
    let mut placed = PlacedImages::default();

    let images = match source.page_images(page) {
        Ok(images) => images,
        Err(e) => {
            diagnostics.warn(Some(page), WarningKind::PageContent, format!("cannot list images: {e}"));
            return Ok(placed);
        }
    };

    for image in images.iter().filter(|i| !i.is_sentinel()) {
        let extracted = match source.extract_image(image) {
            Ok(extracted) if !extracted.data.is_empty() => extracted,
            Ok(_) => {
                diagnostics.warn(
                    Some(page),
                    WarningKind::ImageExtraction,
                    format!("image {} has no data", image.xref),
                );
                continue;
            }
            Err(e) => {
                diagnostics.warn(
                    Some(page),
                    WarningKind::ImageExtraction,
                    format!("image {}: {e}", image.xref),
                );
                continue;
            }
        };

        let Some(bbox) = placement_box(source, page, image, pixel_size_fallback, diagnostics) else {
            continue;
        };

        let file_name = image_file_name(page, image.xref, &extracted.extension);
        let path = output_dir.join(&file_name);
        fs::write(&path, &extracted.data)?;
        log::debug!("wrote {}", path.display());

        placed.elements.push(ImageElement {
            src: file_name,
            left: bbox.x0,
            top: bbox.y0,
            width: bbox.width(),
            height: bbox.height(),
        });
        placed.files.push(path);
    }

    Ok(placed)
}

fn placement_box(
    source: &dyn PdfSource,
    page: u32,
    image: &ImageRef,
    pixel_size_fallback: bool,
    diagnostics: &mut Diagnostics,
) -> Option<Rect> {
    let bbox = match source.image_bbox(page, image) {
        Ok(Some(bbox)) => bbox,
        Ok(None) if pixel_size_fallback && image.width > 0 && image.height > 0 => {
            Rect::from_xywh(0.0, 0.0, image.width as f32, image.height as f32)
        }
        Ok(None) => {
            diagnostics.warn(
                Some(page),
                WarningKind::ImagePlacement,
                format!("image {} is not drawn on the page", image.xref),
            );
            return None;
        }
        Err(e) => {
            diagnostics.warn(
                Some(page),
                WarningKind::ImagePlacement,
                format!("image {}: {e}", image.xref),
            );
            return None;
        }
    };

    if !bbox.is_valid() {
        diagnostics.warn(
            Some(page),
            WarningKind::ImagePlacement,
            Error::InvalidBoundingBox(image.xref).to_string(),
        );
        return None;
    }
    Some(bbox)
}
