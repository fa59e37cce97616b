//! Image XObject decoding.
//!
//! JPEG and JPEG 2000 streams pass through untouched. Everything else is
//! unpacked into 8-bit samples, converted to gray or RGB and re-encoded as
//! PNG so a browser can display it.

use std::iter;

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, ImageFormat};
use lopdf::{Dictionary, Document as LopdfDocument, Object, Stream};

use super::objects::{dict_get, dict_get_number, number_array, resolve, stream_bytes};
use crate::error::{Error, Result};
use crate::model::{ExtractedImage, Rgb};

/// Colour models an image can be converted from.
#[derive(Debug, Clone, PartialEq)]
enum ColorModel {
    Gray,
    Rgb,
    Cmyk,
    Indexed { base: Box<ColorModel>, palette: Vec<u8> },
}

impl ColorModel {
    fn components(&self) -> usize {
        match self {
            ColorModel::Gray | ColorModel::Indexed { .. } => 1,
            ColorModel::Rgb => 3,
            ColorModel::Cmyk => 4,
        }
    }
}

/// Decoded pixels before PNG encoding.
struct Raster {
    width: u32,
    height: u32,
    color: ColorType,
    pixels: Vec<u8>,
}

/// True when `stream` is an image XObject.
pub(crate) fn is_image(doc: &LopdfDocument, stream: &Stream) -> bool {
    dict_get(doc, &stream.dict, b"Subtype")
        .and_then(|o| o.as_name().ok())
        .is_some_and(|n| n == b"Image")
}

/// Intrinsic pixel size of an image XObject.
pub(crate) fn image_dimensions(doc: &LopdfDocument, dict: &Dictionary) -> (u32, u32) {
    let dim = |key: &[u8]| dict_get_number(doc, dict, key).unwrap_or(0.0).max(0.0) as u32;
    (dim(b"Width"), dim(b"Height"))
}

/// Decode an image XObject into bytes a browser can display.
pub(crate) fn extract_image(doc: &LopdfDocument, stream: &Stream) -> Result<ExtractedImage> {
    let dict = &stream.dict;
    let filters = filter_names(doc, dict);

    match filters.last().map(String::as_str) {
        Some("DCTDecode") | Some("DCT") => {
            ensure_single_filter(&filters)?;
            let cmyk = dict_get(doc, dict, b"ColorSpace")
                .and_then(|cs| color_model(doc, cs).ok())
                .is_some_and(|m| m == ColorModel::Cmyk);
            if cmyk {
                // Browsers do not render CMYK JPEGs reliably.
                return transcode_jpeg(&stream.content);
            }
            return Ok(ExtractedImage::new(stream.content.clone(), "jpg"));
        }
        Some("JPXDecode") => {
            ensure_single_filter(&filters)?;
            return Ok(ExtractedImage::new(stream.content.clone(), "jpx"));
        }
        Some(name @ ("JBIG2Decode" | "CCITTFaxDecode" | "CCF")) => {
            return Err(Error::ImageExtract(format!("unsupported image filter {name}")));
        }
        _ => {}
    }

    let raster = decode_raster(doc, stream)?;
    let alpha = soft_mask(doc, dict, raster.width, raster.height);
    Ok(ExtractedImage::new(raster.encode_png(alpha)?, "png"))
}

fn filter_names(doc: &LopdfDocument, dict: &Dictionary) -> Vec<String> {
    match dict_get(doc, dict, b"Filter") {
        Some(Object::Name(name)) => vec![String::from_utf8_lossy(name).to_string()],
        Some(Object::Array(items)) => items
            .iter()
            .filter_map(|o| resolve(doc, o)?.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).to_string())
            .collect(),
        _ => Vec::new(),
    }
}

fn ensure_single_filter(filters: &[String]) -> Result<()> {
    if filters.len() > 1 {
        return Err(Error::ImageExtract(format!(
            "unsupported filter chain {}",
            filters.join(" ")
        )));
    }
    Ok(())
}

fn transcode_jpeg(data: &[u8]) -> Result<ExtractedImage> {
    let rgb = image::load_from_memory_with_format(data, ImageFormat::Jpeg)?.to_rgb8();
    let raster = Raster {
        width: rgb.width(),
        height: rgb.height(),
        color: ColorType::Rgb8,
        pixels: rgb.into_raw(),
    };
    Ok(ExtractedImage::new(raster.encode_png(None)?, "png"))
}

fn color_model(doc: &LopdfDocument, obj: &Object) -> Result<ColorModel> {
    let unsupported = |what: &str| Error::ImageExtract(format!("unsupported color space {what}"));

    match resolve(doc, obj) {
        Some(Object::Name(name)) => match name.as_slice() {
            b"DeviceGray" | b"CalGray" | b"G" => Ok(ColorModel::Gray),
            b"DeviceRGB" | b"CalRGB" | b"RGB" => Ok(ColorModel::Rgb),
            b"DeviceCMYK" | b"CMYK" => Ok(ColorModel::Cmyk),
            other => Err(unsupported(&String::from_utf8_lossy(other))),
        },
        Some(Object::Array(items)) => {
            let family = items
                .first()
                .and_then(|o| resolve(doc, o))
                .and_then(|o| o.as_name().ok())
                .unwrap_or_default();
            match family {
                b"CalGray" => Ok(ColorModel::Gray),
                b"CalRGB" => Ok(ColorModel::Rgb),
                b"ICCBased" => {
                    let profile = items
                        .get(1)
                        .and_then(|o| resolve(doc, o))
                        .and_then(|o| o.as_stream().ok())
                        .ok_or_else(|| unsupported("ICCBased without profile"))?;
                    match dict_get_number(doc, &profile.dict, b"N").map(|n| n as u32) {
                        Some(1) => Ok(ColorModel::Gray),
                        Some(3) => Ok(ColorModel::Rgb),
                        Some(4) => Ok(ColorModel::Cmyk),
                        _ => match dict_get(doc, &profile.dict, b"Alternate") {
                            Some(alternate) => color_model(doc, alternate),
                            None => Err(unsupported("ICCBased with unknown component count")),
                        },
                    }
                }
                b"Indexed" | b"I" => {
                    let base = items
                        .get(1)
                        .ok_or_else(|| unsupported("Indexed without base"))
                        .and_then(|b| color_model(doc, b))?;
                    if matches!(base, ColorModel::Indexed { .. }) {
                        return Err(unsupported("nested Indexed"));
                    }
                    let palette = match items.get(3).and_then(|o| resolve(doc, o)) {
                        Some(Object::String(bytes, _)) => bytes.clone(),
                        Some(Object::Stream(s)) => stream_bytes(s)?,
                        _ => return Err(unsupported("Indexed without lookup table")),
                    };
                    Ok(ColorModel::Indexed {
                        base: Box::new(base),
                        palette,
                    })
                }
                other => Err(unsupported(&String::from_utf8_lossy(other))),
            }
        }
        _ => Err(unsupported("entry")),
    }
}

fn decode_raster(doc: &LopdfDocument, stream: &Stream) -> Result<Raster> {
    let dict = &stream.dict;
    let (width, height) = image_dimensions(doc, dict);
    if width == 0 || height == 0 {
        return Err(Error::ImageExtract(format!("invalid image size {width}x{height}")));
    }

    let data = stream_bytes(stream)?;
    let decode_inverted = dict
        .get(b"Decode")
        .ok()
        .and_then(|d| number_array::<2>(doc, d))
        .is_some_and(|[lo, hi]| lo > hi);

    let is_mask = dict_get(doc, dict, b"ImageMask")
        .and_then(|o| o.as_bool().ok())
        .unwrap_or(false);
    if is_mask {
        let samples = unpack_samples(&data, width, height, 1, 1)?;
        // Stencil masks paint where the sample is 0, unless Decode flips it.
        let paint = u8::from(decode_inverted);
        let pixels = samples
            .iter()
            .flat_map(|&s| if s == paint { [0, 255] } else { [0, 0] })
            .collect();
        return Ok(Raster {
            width,
            height,
            color: ColorType::La8,
            pixels,
        });
    }

    let bpc = dict_get_number(doc, dict, b"BitsPerComponent").unwrap_or(8.0) as u8;
    let model = match dict_get(doc, dict, b"ColorSpace") {
        Some(cs) => color_model(doc, cs)?,
        None => ColorModel::Gray,
    };
    let samples = unpack_samples(&data, width, height, model.components(), bpc)?;
    let max = if bpc >= 8 { 255 } else { (1u32 << bpc) - 1 };
    let scale = |v: u8| (u32::from(v) * 255 / max) as u8;

    let (color, pixels) = match &model {
        ColorModel::Gray => (
            ColorType::L8,
            samples
                .iter()
                .map(|&v| if decode_inverted { 255 - scale(v) } else { scale(v) })
                .collect(),
        ),
        ColorModel::Rgb => (ColorType::Rgb8, samples.iter().map(|&v| scale(v)).collect()),
        ColorModel::Cmyk => (
            ColorType::Rgb8,
            samples
                .chunks_exact(4)
                .flat_map(|c| cmyk_bytes(&[scale(c[0]), scale(c[1]), scale(c[2]), scale(c[3])]))
                .collect(),
        ),
        ColorModel::Indexed { base, palette } => {
            let n = base.components();
            let zero = [0u8; 4];
            let entries = samples.iter().map(|&i| {
                let start = usize::from(i) * n;
                palette.get(start..start + n).unwrap_or(&zero[..n])
            });
            match base.as_ref() {
                ColorModel::Gray => (ColorType::L8, entries.map(|e| e[0]).collect()),
                ColorModel::Rgb => (ColorType::Rgb8, entries.flat_map(|e| e.iter().copied()).collect()),
                ColorModel::Cmyk => (ColorType::Rgb8, entries.flat_map(cmyk_bytes).collect()),
                ColorModel::Indexed { .. } => {
                    return Err(Error::ImageExtract("nested Indexed color space".to_string()))
                }
            }
        }
    };

    Ok(Raster {
        width,
        height,
        color,
        pixels,
    })
}

fn cmyk_bytes(c: &[u8]) -> [u8; 3] {
    let f = |v: u8| f32::from(v) / 255.0;
    Rgb::from_cmyk(f(c[0]), f(c[1]), f(c[2]), f(c[3])).to_bytes()
}

/// Unpack image rows into one byte per sample.
///
/// Rows are padded to whole bytes. 16-bit samples keep their high byte.
fn unpack_samples(data: &[u8], width: u32, height: u32, components: usize, bpc: u8) -> Result<Vec<u8>> {
    let too_large = || Error::ImageExtract(format!("image size {width}x{height} is too large"));
    let per_row = (width as usize).checked_mul(components).ok_or_else(too_large)?;
    let row_bytes = per_row
        .checked_mul(usize::from(bpc))
        .ok_or_else(too_large)?
        .div_ceil(8);
    let expected = row_bytes.checked_mul(height as usize).ok_or_else(too_large)?;
    if data.len() < expected {
        return Err(Error::ImageExtract(format!(
            "image data too short: {} bytes, expected {expected}",
            data.len()
        )));
    }
    let data = &data[..expected];

    match bpc {
        8 => Ok(data.to_vec()),
        16 => Ok(data.iter().step_by(2).copied().collect()),
        1 | 2 | 4 => {
            let bits = usize::from(bpc);
            let mask = (1u8 << bpc) - 1;
            let mut out = Vec::with_capacity(per_row * height as usize);
            for row in data.chunks_exact(row_bytes) {
                for i in 0..per_row {
                    let bit = i * bits;
                    let shift = 8 - bits - bit % 8;
                    out.push((row[bit / 8] >> shift) & mask);
                }
            }
            Ok(out)
        }
        other => Err(Error::ImageExtract(format!("unsupported bits per component: {other}"))),
    }
}

/// Alpha channel from an `/SMask`, when it matches the image size.
fn soft_mask(doc: &LopdfDocument, dict: &Dictionary, width: u32, height: u32) -> Option<Vec<u8>> {
    let stream = dict_get(doc, dict, b"SMask")?.as_stream().ok()?;
    let mask = decode_raster(doc, stream).ok()?;
    (mask.color == ColorType::L8 && mask.width == width && mask.height == height).then_some(mask.pixels)
}

impl Raster {
    fn encode_png(self, alpha: Option<Vec<u8>>) -> Result<Vec<u8>> {
        let (color, pixels) = match (self.color, alpha) {
            (ColorType::L8, Some(alpha)) => (ColorType::La8, interleave(&self.pixels, 1, &alpha)),
            (ColorType::Rgb8, Some(alpha)) => (ColorType::Rgba8, interleave(&self.pixels, 3, &alpha)),
            (color, _) => (color, self.pixels),
        };

        let mut out = Vec::new();
        PngEncoder::new(&mut out).write_image(&pixels, self.width, self.height, color)?;
        Ok(out)
    }
}

fn interleave(pixels: &[u8], components: usize, alpha: &[u8]) -> Vec<u8> {
    pixels
        .chunks_exact(components)
        .zip(alpha)
        .flat_map(|(px, &a)| px.iter().copied().chain(iter::once(a)))
        .collect()
}
