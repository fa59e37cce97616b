//! Small helpers for reading lopdf objects.

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId, Stream};

use crate::error::{Error, Result};

/// Follow a reference, returning direct objects unchanged.
pub(crate) fn resolve<'a>(doc: &'a LopdfDocument, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

/// Look up `key` in `dict` and resolve the value.
pub(crate) fn dict_get<'a>(
    doc: &'a LopdfDocument,
    dict: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Object> {
    dict.get(key).ok().and_then(|o| resolve(doc, o))
}

/// Look up a dictionary-valued entry.
pub(crate) fn dict_get_dict<'a>(
    doc: &'a LopdfDocument,
    dict: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Dictionary> {
    match dict_get(doc, dict, key)? {
        Object::Dictionary(d) => Some(d),
        Object::Stream(s) => Some(&s.dict),
        _ => None,
    }
}

/// Look up a name-valued entry as a string.
pub(crate) fn dict_get_name(doc: &LopdfDocument, dict: &Dictionary, key: &[u8]) -> Option<String> {
    dict_get(doc, dict, key)
        .and_then(|o| o.as_name().ok())
        .map(|n| String::from_utf8_lossy(n).to_string())
}

/// Look up a numeric entry.
pub(crate) fn dict_get_number(doc: &LopdfDocument, dict: &Dictionary, key: &[u8]) -> Option<f32> {
    dict_get(doc, dict, key).and_then(get_number)
}

/// Extract a number from a PDF object.
pub(crate) fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Read up to `N` numbers from an array object.
pub(crate) fn number_array<const N: usize>(doc: &LopdfDocument, obj: &Object) -> Option<[f32; N]> {
    let array = resolve(doc, obj)?.as_array().ok()?;
    if array.len() < N {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, item) in out.iter_mut().zip(array) {
        *slot = resolve(doc, item).and_then(get_number)?;
    }
    Some(out)
}

/// Fetch an indirect stream object.
pub(crate) fn get_stream(doc: &LopdfDocument, id: ObjectId) -> Result<&Stream> {
    match doc.get_object(id)? {
        Object::Stream(s) => Ok(s),
        _ => Err(Error::PdfParse(format!("object {} {} is not a stream", id.0, id.1))),
    }
}

/// Stream content with filters removed. Unfiltered streams are returned as is.
pub(crate) fn stream_bytes(stream: &Stream) -> Result<Vec<u8>> {
    if stream.dict.get(b"Filter").is_ok() {
        stream
            .decompressed_content()
            .map_err(|e| Error::PdfParse(format!("failed to decompress stream: {e}")))
    } else {
        Ok(stream.content.clone())
    }
}

/// Walk the `/Parent` chain of a page for an inheritable attribute.
pub(crate) fn inherited<'a>(
    doc: &'a LopdfDocument,
    page_id: ObjectId,
    key: &[u8],
) -> Option<&'a Object> {
    let mut current = page_id;
    // Page trees are shallow; the bound only guards against cycles.
    for _ in 0..64 {
        let dict = doc.get_dictionary(current).ok()?;
        if let Some(value) = dict_get(doc, dict, key) {
            return Some(value);
        }
        current = dict.get(b"Parent").ok()?.as_reference().ok()?;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_number() {
        assert_eq!(get_number(&Object::Integer(42)), Some(42.0));
        assert_eq!(get_number(&Object::Real(3.5)), Some(3.5));
        assert_eq!(get_number(&Object::Null), None);
    }

    #[test]
    fn test_number_array() {
        let doc = LopdfDocument::with_version("1.5");
        let obj = Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(595.5),
            Object::Integer(842),
        ]);
        assert_eq!(number_array::<4>(&doc, &obj), Some([0.0, 0.0, 595.5, 842.0]));
        assert_eq!(number_array::<6>(&doc, &obj), None);
    }
}
