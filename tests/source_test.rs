//! `LopdfSource` against synthetic PDFs.

mod common;

use common::{font_resources, image_resources, PdfBuilder};
use lopdf::Dictionary;
use pdfhtml::model::{FontPayload, PathItem, Rect};
use pdfhtml::{Error, LopdfSource, PdfSource};

#[test]
fn test_page_count_and_rects() {
    let mut builder = PdfBuilder::new();
    builder.page("", Dictionary::new());
    builder.page_with_box([0, 0, 400, 300], "", Dictionary::new());
    builder.rotated_page(90, "", Dictionary::new());
    let source = LopdfSource::from_bytes(&builder.build()).unwrap();

    assert_eq!(source.page_count(), 3);
    let rect = source.page_rect(1).unwrap();
    assert_eq!((rect.width, rect.height), (612.0, 792.0));
    let rect = source.page_rect(2).unwrap();
    assert_eq!((rect.width, rect.height), (400.0, 300.0));
    let rect = source.page_rect(3).unwrap();
    assert_eq!((rect.width, rect.height), (792.0, 612.0));

    assert!(matches!(source.page_rect(4), Err(Error::PageOutOfRange(4, 3))));
    assert!(matches!(source.page_rect(0), Err(Error::PageOutOfRange(0, 3))));
}

#[test]
fn test_rotated_page_geometry() {
    let mut builder = PdfBuilder::new();
    builder.rotated_page(90, "0 0 m 100 0 l S", Dictionary::new());
    let source = LopdfSource::from_bytes(&builder.build()).unwrap();

    let drawings = source.page_drawings(1).unwrap();
    let PathItem::Line(p0, p1) = &drawings[0].items[0] else {
        panic!("expected a line");
    };
    // User-space origin ends up at the top-left corner of the rotated page.
    assert_eq!((p0.x, p0.y), (0.0, 0.0));
    assert_eq!((p1.x, p1.y), (0.0, 100.0));
}

#[test]
fn test_fonts_are_listed_and_extracted() {
    let mut builder = PdfBuilder::new();
    let embedded = builder.embedded_font("ABCDEF+Demo", b"\x00\x01\x00\x00program");
    let standard = builder.standard_font("Helvetica");
    builder.page(
        "",
        font_resources(&[("F1", embedded), ("F2", standard), ("F3", embedded)]),
    );
    let source = LopdfSource::from_bytes(&builder.build()).unwrap();

    let fonts = source.page_fonts(1).unwrap();
    // F1 and F3 share one object.
    assert_eq!(fonts.len(), 2);
    let demo = fonts.iter().find(|f| f.base_name == "ABCDEF+Demo").unwrap();
    assert_eq!(demo.subtype, "TrueType");
    assert_eq!(demo.xref, embedded.0);

    let data = source.extract_font(demo).unwrap();
    assert_eq!(data.format, "ttf");
    assert_eq!(data.payload, FontPayload::Binary(b"\x00\x01\x00\x00program".to_vec()));

    let helvetica = fonts.iter().find(|f| f.base_name == "Helvetica").unwrap();
    assert!(matches!(source.extract_font(helvetica), Err(Error::FontExtract(_))));
}

#[test]
fn test_images_are_listed_placed_and_extracted() {
    let mut builder = PdfBuilder::new();
    let drawn = builder.rgb_image(3, 2);
    let unused = builder.rgb_image(1, 1);
    builder.page(
        "q 200 0 0 100 50 600 cm /Im1 Do Q",
        image_resources(&[("Im1", drawn), ("Im2", unused)]),
    );
    let source = LopdfSource::from_bytes(&builder.build()).unwrap();

    let images = source.page_images(1).unwrap();
    assert_eq!(images.len(), 2);
    let first = images.iter().find(|i| i.xref == drawn.0).unwrap();
    assert_eq!((first.width, first.height), (3, 2));

    assert_eq!(
        source.image_bbox(1, first).unwrap(),
        Some(Rect::new(50.0, 92.0, 250.0, 192.0))
    );
    let second = images.iter().find(|i| i.xref == unused.0).unwrap();
    assert_eq!(source.image_bbox(1, second).unwrap(), None);

    let extracted = source.extract_image(first).unwrap();
    assert_eq!(extracted.extension, "png");
    let decoded = image::load_from_memory(&extracted.data).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (3, 2));
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0]);
}

#[test]
fn test_text_spans() {
    let mut builder = PdfBuilder::new();
    let font = builder.standard_font("Helvetica");
    builder.page(
        "BT /F1 12 Tf 0 0 1 rg 72 720 Td (Hi) Tj 0 -20 Td (there) Tj ET",
        font_resources(&[("F1", font)]),
    );
    let source = LopdfSource::from_bytes(&builder.build()).unwrap();

    let text = source.page_text(1).unwrap();
    let spans: Vec<_> = text.spans().collect();
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].text(), "Hi");
    assert_eq!(spans[0].font, "Helvetica");
    assert_eq!(spans[0].color, 0x0000ff);
    assert_eq!((spans[0].origin.x, spans[0].origin.y), (72.0, 72.0));
    assert_eq!(spans[1].text(), "there");
    assert_eq!(spans[1].origin.y, 92.0);
}

#[test]
fn test_page_without_contents_is_empty() {
    let mut builder = PdfBuilder::new();
    builder.page("", Dictionary::new());
    let source = LopdfSource::from_bytes(&builder.build()).unwrap();

    assert!(source.page_drawings(1).unwrap().is_empty());
    assert!(source.page_text(1).unwrap().blocks.is_empty());
    assert!(source.page_images(1).unwrap().is_empty());
    assert!(source.page_fonts(1).unwrap().is_empty());
}
