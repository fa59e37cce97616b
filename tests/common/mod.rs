//! Synthetic PDFs for integration tests, written with lopdf.

#![allow(dead_code)]

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

/// Builds a small PDF page by page.
pub struct PdfBuilder {
    doc: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
}

impl PdfBuilder {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            kids: Vec::new(),
        }
    }

    /// A TrueType font with an embedded (fake) program.
    pub fn embedded_font(&mut self, base_name: &str, program: &[u8]) -> ObjectId {
        let file_id = self.doc.add_object(Stream::new(dictionary! {}, program.to_vec()));
        let descriptor_id = self.doc.add_object(dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => Object::Name(base_name.as_bytes().to_vec()),
            "Ascent" => 900i64,
            "Descent" => -200i64,
            "FontFile2" => file_id,
        });
        self.doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "TrueType",
            "BaseFont" => Object::Name(base_name.as_bytes().to_vec()),
            "FontDescriptor" => descriptor_id,
        })
    }

    /// A standard Type1 font without an embedded program.
    pub fn standard_font(&mut self, base_name: &str) -> ObjectId {
        self.doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => Object::Name(base_name.as_bytes().to_vec()),
        })
    }

    /// A DeviceRGB image with every pixel red.
    pub fn rgb_image(&mut self, width: u32, height: u32) -> ObjectId {
        let pixels: Vec<u8> = (0..width * height).flat_map(|_| [255u8, 0, 0]).collect();
        let dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8i64,
        };
        self.doc.add_object(Stream::new(dict, pixels))
    }

    /// Add a Letter page.
    pub fn page(&mut self, content: &str, resources: Dictionary) -> &mut Self {
        self.page_with_box([0, 0, 612, 792], content, resources)
    }

    /// Add a page with an explicit MediaBox.
    pub fn page_with_box(&mut self, media_box: [i64; 4], content: &str, resources: Dictionary) -> &mut Self {
        self.push_page(media_box, None, content, resources)
    }

    /// Add a Letter page with a `/Rotate` entry.
    pub fn rotated_page(&mut self, rotate: i64, content: &str, resources: Dictionary) -> &mut Self {
        self.push_page([0, 0, 612, 792], Some(rotate), content, resources)
    }

    fn push_page(
        &mut self,
        media_box: [i64; 4],
        rotate: Option<i64>,
        content: &str,
        resources: Dictionary,
    ) -> &mut Self {
        let content_id = self
            .doc
            .add_object(Stream::new(dictionary! {}, content.as_bytes().to_vec()));
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => media_box.iter().map(|&v| Object::Integer(v)).collect::<Vec<_>>(),
            "Contents" => content_id,
            "Resources" => resources,
        };
        if let Some(rotate) = rotate {
            page.set("Rotate", rotate);
        }
        let page_id = self.doc.add_object(page);
        self.kids.push(page_id.into());
        self
    }

    /// Serialize the document.
    pub fn build(mut self) -> Vec<u8> {
        let count = self.kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => self.kids,
            "Count" => count,
        };
        self.doc.objects.insert(self.pages_id, Object::Dictionary(pages));
        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        let mut out = Vec::new();
        self.doc.save_to(&mut out).expect("serialize test PDF");
        out
    }
}

/// `/Font << /F1 id >>` resources.
pub fn font_resources(fonts: &[(&str, ObjectId)]) -> Dictionary {
    let mut font_dict = Dictionary::new();
    for (name, id) in fonts {
        font_dict.set(name.as_bytes().to_vec(), Object::Reference(*id));
    }
    dictionary! { "Font" => font_dict }
}

/// `/XObject << /Im1 id >>` resources.
pub fn image_resources(images: &[(&str, ObjectId)]) -> Dictionary {
    let mut xobjects = Dictionary::new();
    for (name, id) in images {
        xobjects.set(name.as_bytes().to_vec(), Object::Reference(*id));
    }
    dictionary! { "XObject" => xobjects }
}
