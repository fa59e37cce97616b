//! [`PdfSource`] backed by lopdf.

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::Path;
use std::rc::Rc;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use super::fonts::{font_base_name, font_program};
use super::images::{extract_image, image_dimensions, is_image};
use super::interpreter::{interpret_page, PageContent};
use super::objects::{dict_get_dict, dict_get_name, get_stream, inherited, number_array, resolve, stream_bytes};
use super::PdfSource;
use crate::detect::{detect_version_from_bytes, detect_version_from_path};
use crate::error::{Error, Result};
use crate::model::{Drawing, ExtractedImage, FontData, FontRef, ImageRef, Matrix, PageRect, Rect, TextPage};

/// Form XObjects nested deeper than this are not searched for resources.
const MAX_RESOURCE_DEPTH: usize = 8;

/// A PDF document loaded with lopdf.
///
/// Page content is interpreted lazily and the result for the most recently
/// requested page is kept, since the converter asks for drawings, image
/// boxes and text of the same page in a row.
pub struct LopdfSource {
    doc: LopdfDocument,
    pages: Vec<ObjectId>,
    cache: RefCell<Option<(u32, Rc<PageContent>)>>,
}

impl LopdfSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Verify it's a PDF
        detect_version_from_path(path)?;

        let doc = LopdfDocument::load(path)?;
        Self::from_document(doc)
    }

    /// Load a PDF from memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        detect_version_from_bytes(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        Self::from_document(doc)
    }

    /// Wrap an already loaded document.
    pub fn from_document(doc: LopdfDocument) -> Result<Self> {
        // lopdf 0.34 cannot decrypt; streams of an encrypted file are garbage.
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        let pages = doc.get_pages().into_values().collect();
        Ok(Self {
            doc,
            pages,
            cache: RefCell::new(None),
        })
    }

    fn page_id(&self, page: u32) -> Result<ObjectId> {
        let count = self.page_count();
        if page == 0 || page > count {
            return Err(Error::PageOutOfRange(page, count));
        }
        Ok(self.pages[page as usize - 1])
    }

    /// CropBox, else MediaBox, in user space. Letter when neither is usable.
    fn page_box(&self, page_id: ObjectId) -> Rect {
        [b"CropBox".as_slice(), b"MediaBox".as_slice()]
            .iter()
            .filter_map(|key| inherited(&self.doc, page_id, key))
            .filter_map(|obj| number_array::<4>(&self.doc, obj))
            .map(|[x0, y0, x1, y1]| Rect::new(x0, y0, x1, y1).normalized())
            .find(Rect::is_valid)
            .unwrap_or_else(|| {
                let letter = PageRect::letter();
                Rect::new(0.0, 0.0, letter.width, letter.height)
            })
    }

    fn rotation(&self, page_id: ObjectId) -> i64 {
        inherited(&self.doc, page_id, b"Rotate")
            .and_then(|o| o.as_i64().ok())
            .map(|r| r.rem_euclid(360) / 90 * 90)
            .unwrap_or(0)
    }

    fn page_resources(&self, page_id: ObjectId) -> Option<&Dictionary> {
        match inherited(&self.doc, page_id, b"Resources")? {
            Object::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    /// Page resources followed by the resources of every form XObject
    /// reachable from them.
    fn resource_dicts(&self, page_id: ObjectId) -> Vec<&Dictionary> {
        let doc = &self.doc;
        let mut found: Vec<(&Dictionary, usize)> = self.page_resources(page_id).map(|r| (r, 0)).into_iter().collect();
        let mut visited = HashSet::new();
        let mut i = 0;

        while i < found.len() {
            let (resources, depth) = found[i];
            i += 1;
            if depth >= MAX_RESOURCE_DEPTH {
                continue;
            }
            let Some(xobjects) = dict_get_dict(doc, resources, b"XObject") else {
                continue;
            };
            for (_, entry) in xobjects.iter() {
                let Ok(id) = entry.as_reference() else { continue };
                if !visited.insert(id) {
                    continue;
                }
                let Some(stream) = resolve(doc, entry).and_then(|o| o.as_stream().ok()) else {
                    continue;
                };
                if dict_get_name(doc, &stream.dict, b"Subtype").as_deref() != Some("Form") {
                    continue;
                }
                if let Some(inner) = dict_get_dict(doc, &stream.dict, b"Resources") {
                    found.push((inner, depth + 1));
                }
            }
        }

        found.into_iter().map(|(r, _)| r).collect()
    }

    /// Concatenated content streams of a page.
    fn content_bytes(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self.doc.get_dictionary(page_id)?;
        let Ok(contents) = page_dict.get(b"Contents") else {
            return Ok(Vec::new());
        };

        match resolve(&self.doc, contents) {
            Some(Object::Stream(s)) => stream_bytes(s),
            Some(Object::Array(arr)) => {
                let mut content = Vec::new();
                for obj in arr {
                    match resolve(&self.doc, obj) {
                        Some(Object::Stream(s)) => {
                            content.extend_from_slice(&stream_bytes(s)?);
                            content.push(b' ');
                        }
                        _ => log::debug!("skipping non-stream entry in /Contents"),
                    }
                }
                Ok(content)
            }
            _ => Err(Error::Corrupted("page /Contents is neither a stream nor an array".to_string())),
        }
    }

    fn page_content(&self, page: u32) -> Result<Rc<PageContent>> {
        if let Some((cached, content)) = self.cache.borrow().as_ref() {
            if *cached == page {
                return Ok(Rc::clone(content));
            }
        }

        let page_id = self.page_id(page)?;
        let data = self.content_bytes(page_id)?;
        let display = display_matrix(self.page_box(page_id), self.rotation(page_id));
        let content = Rc::new(interpret_page(
            &self.doc,
            &data,
            self.page_resources(page_id),
            display,
        )?);
        log::debug!(
            "page {page}: {} drawings, {} image placements, {} blocks",
            content.drawings.len(),
            content.placements.len(),
            content.text.blocks.len()
        );

        *self.cache.borrow_mut() = Some((page, Rc::clone(&content)));
        Ok(content)
    }
}

/// Matrix from user space to top-left page pixels for a page box and a
/// `/Rotate` value (clockwise, multiple of 90).
fn display_matrix(page_box: Rect, rotation: i64) -> Matrix {
    let Rect { x0, y0, x1, y1 } = page_box;
    match rotation {
        90 => Matrix::new(0.0, 1.0, 1.0, 0.0, -y0, -x0),
        180 => Matrix::new(-1.0, 0.0, 0.0, 1.0, x1, -y0),
        270 => Matrix::new(0.0, -1.0, -1.0, 0.0, y1, x1),
        _ => Matrix::new(1.0, 0.0, 0.0, -1.0, -x0, y1),
    }
}

impl PdfSource for LopdfSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_rect(&self, page: u32) -> Result<PageRect> {
        let page_id = self.page_id(page)?;
        let page_box = self.page_box(page_id);
        Ok(match self.rotation(page_id) {
            90 | 270 => PageRect::new(page_box.height(), page_box.width()),
            _ => PageRect::new(page_box.width(), page_box.height()),
        })
    }

    fn page_fonts(&self, page: u32) -> Result<Vec<FontRef>> {
        let page_id = self.page_id(page)?;
        let doc = &self.doc;
        let mut seen = HashSet::new();
        let mut fonts = Vec::new();

        for resources in self.resource_dicts(page_id) {
            let Some(font_dict) = dict_get_dict(doc, resources, b"Font") else {
                continue;
            };
            for (name, entry) in font_dict.iter() {
                let Some(Object::Dictionary(dict)) = resolve(doc, entry) else {
                    continue;
                };
                let resource_name = String::from_utf8_lossy(name).to_string();
                let base_name = font_base_name(doc, dict, &resource_name);
                let (xref, generation) = entry.as_reference().unwrap_or((0, 0));
                let key = if xref == 0 {
                    base_name.clone()
                } else {
                    format!("{xref} {generation}")
                };
                if !seen.insert(key) {
                    continue;
                }
                fonts.push(FontRef {
                    xref,
                    generation,
                    resource_name,
                    base_name,
                    subtype: dict_get_name(doc, dict, b"Subtype").unwrap_or_default(),
                });
            }
        }

        Ok(fonts)
    }

    fn extract_font(&self, font: &FontRef) -> Result<FontData> {
        if font.xref == 0 {
            return Err(Error::FontExtract(format!(
                "{}: font dictionary is not an indirect object",
                font.base_name
            )));
        }
        let dict = self.doc.get_dictionary((font.xref, font.generation))?;
        font_program(&self.doc, dict, &font.base_name)
    }

    fn page_images(&self, page: u32) -> Result<Vec<ImageRef>> {
        let page_id = self.page_id(page)?;
        let doc = &self.doc;
        let mut seen = HashSet::new();
        let mut images = Vec::new();

        for resources in self.resource_dicts(page_id) {
            let Some(xobjects) = dict_get_dict(doc, resources, b"XObject") else {
                continue;
            };
            for (name, entry) in xobjects.iter() {
                let Ok((xref, generation)) = entry.as_reference() else {
                    continue;
                };
                let Some(stream) = resolve(doc, entry).and_then(|o| o.as_stream().ok()) else {
                    continue;
                };
                if !is_image(doc, stream) || !seen.insert(xref) {
                    continue;
                }
                let (width, height) = image_dimensions(doc, &stream.dict);
                images.push(ImageRef {
                    xref,
                    generation,
                    name: String::from_utf8_lossy(name).to_string(),
                    width,
                    height,
                });
            }
        }

        Ok(images)
    }

    fn extract_image(&self, image: &ImageRef) -> Result<ExtractedImage> {
        let stream = get_stream(&self.doc, (image.xref, image.generation))?;
        extract_image(&self.doc, stream)
    }

    fn image_bbox(&self, page: u32, image: &ImageRef) -> Result<Option<Rect>> {
        let content = self.page_content(page)?;
        Ok(content
            .placements
            .iter()
            .find(|p| p.xref == image.xref)
            .map(|p| p.bbox))
    }

    fn page_drawings(&self, page: u32) -> Result<Vec<Drawing>> {
        Ok(self.page_content(page)?.drawings.clone())
    }

    fn page_text(&self, page: u32) -> Result<TextPage> {
        Ok(self.page_content(page)?.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matrix_unrotated() {
        let m = display_matrix(Rect::new(0.0, 0.0, 612.0, 792.0), 0);
        assert_eq!(m.transform(0.0, 792.0), crate::model::Point::new(0.0, 0.0));
        assert_eq!(m.transform(10.0, 732.0), crate::model::Point::new(10.0, 60.0));
    }

    #[test]
    fn test_display_matrix_offset_box() {
        let m = display_matrix(Rect::new(100.0, 100.0, 300.0, 400.0), 0);
        assert_eq!(m.transform(100.0, 400.0), crate::model::Point::new(0.0, 0.0));
        assert_eq!(m.transform(300.0, 100.0), crate::model::Point::new(200.0, 300.0));
    }

    #[test]
    fn test_display_matrix_rotations() {
        let page = Rect::new(0.0, 0.0, 612.0, 792.0);
        // The corner that ends up top-left for each clockwise rotation.
        let cases = [(90, (0.0, 0.0)), (180, (612.0, 0.0)), (270, (612.0, 792.0))];
        for (rotation, (x, y)) in cases {
            let p = display_matrix(page, rotation).transform(x, y);
            assert_eq!(p, crate::model::Point::new(0.0, 0.0), "rotation {rotation}");
        }
        let far = display_matrix(page, 90).transform(612.0, 792.0);
        assert_eq!(far, crate::model::Point::new(792.0, 612.0));
    }

    #[test]
    fn test_rejects_non_pdf_bytes() {
        let result = LopdfSource::from_bytes(b"GIF89a");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }
}
