//! Benchmarks for the render stages and full conversion.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lopdf::{dictionary, Document, Object, Stream};

use pdfhtml::markup::{HtmlDocument, PageContainer};
use pdfhtml::model::{Drawing, PageBlock, PathItem, Point, Rect, Rgb, TextBlock, TextChar, TextLine, TextPage, TextSpan};
use pdfhtml::render::{render_drawings, resolve_text, FontRegistry};
use pdfhtml::ConvertOptions;

/// Synthetic PDF with a grid of rectangles and a few lines of text per page.
fn create_test_pdf(page_count: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids = Vec::new();
    for i in 0..page_count {
        let mut content = String::from("0.5 w 0 0 0 RG ");
        for row in 0..20 {
            for col in 0..10 {
                content.push_str(&format!("{} {} 50 30 re ", 20 + col * 55, 40 + row * 35));
            }
        }
        content.push_str("S BT /F1 10 Tf 72 760 Td 12 TL ");
        for line in 0..10 {
            content.push_str(&format!("(Page {} line {} of benchmark text) ' ", i + 1, line));
        }
        content.push_str("ET");

        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
        });
        kids.push(Object::from(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save benchmark PDF");
    buf
}

fn sample_drawings(count: usize) -> Vec<Drawing> {
    (0..count)
        .map(|i| {
            let x = (i % 50) as f32 * 10.0;
            let y = (i / 50) as f32 * 10.0;
            Drawing::new(vec![
                PathItem::Rect(Rect::from_xywh(x, y, 8.0, 8.0)),
                PathItem::Line(Point::new(x, y), Point::new(x + 8.0, y + 8.0)),
                PathItem::Curve(
                    Point::new(x, y),
                    Point::new(x + 2.0, y + 6.0),
                    Point::new(x + 6.0, y + 2.0),
                    Point::new(x + 8.0, y),
                ),
            ])
            .with_stroke(Rgb::BLACK)
            .with_width(0.5)
        })
        .collect()
}

fn sample_text(spans: usize) -> TextPage {
    let spans = (0..spans)
        .map(|i| {
            let origin = Point::new(72.0, 20.0 + i as f32 * 12.0);
            TextSpan {
                font: "Helvetica".to_string(),
                size: 10.0,
                color: 0x202020,
                ascender: None,
                origin,
                bbox: Rect::default(),
                chars: "The quick brown fox jumps over the lazy dog"
                    .chars()
                    .map(|c| TextChar {
                        value: c.to_string(),
                        origin,
                        bbox: Rect::default(),
                    })
                    .collect(),
            }
        })
        .collect();
    TextPage {
        blocks: vec![PageBlock::Text(TextBlock {
            lines: vec![TextLine {
                spans,
                bbox: Rect::default(),
            }],
            bbox: Rect::default(),
        })],
    }
}

/// Benchmark SVG path generation.
fn bench_drawings(c: &mut Criterion) {
    let drawings = sample_drawings(1000);
    c.bench_function("render_drawings_1000", |b| {
        b.iter(|| render_drawings(black_box(&drawings), 612.0, 792.0));
    });
}

/// Benchmark span resolution and serialization.
fn bench_text(c: &mut Criterion) {
    let page = sample_text(500);
    let registry = FontRegistry::new();
    let options = ConvertOptions::default();

    c.bench_function("resolve_text_500", |b| {
        b.iter(|| resolve_text(black_box(&page), &registry, &options));
    });

    let mut container = PageContainer::new(1, 612.0, 792.0);
    for element in resolve_text(&page, &registry, &options) {
        container.push(element);
    }
    let mut document = HtmlDocument::new();
    document.pages.push(container);
    c.bench_function("serialize_500_spans", |b| {
        b.iter(|| black_box(&document).to_html());
    });
}

/// Benchmark end-to-end conversion at various sizes.
fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion");
    let dir = tempfile::tempdir().expect("temp dir");

    for page_count in [1, 5, 10].iter() {
        let data = create_test_pdf(*page_count);
        let options = ConvertOptions::new().with_output_dir(dir.path());

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| pdfhtml::convert_bytes(black_box(&data), options.clone()).expect("conversion"));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_drawings, bench_text, bench_conversion);
criterion_main!(benches);
