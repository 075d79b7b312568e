//! Streaming decoder for list endpoint pages.
//!
//! A page looks like `{"data": {"total": N, "diff": ...}}` where `diff` is
//! either an array of records or an object whose values are records. The
//! decoder walks the body with `serde_json`'s streaming deserializer and
//! materializes one record at a time; keys it does not know are skipped
//! without building a value.

use serde::Deserialize;
use serde::de::{self, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use std::fmt;
use std::io::Read;
use tracing::warn;

use crate::schema::ListItem;
use crate::{DecodeError, lenient};

/// Shape in which a page carried its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffShape {
    /// No `diff` field, or `data` was null.
    #[default]
    Missing,
    /// `diff` was an array.
    Array,
    /// `diff` was an object keyed by arbitrary strings.
    Object,
    /// `diff` was a scalar or null; treated as zero records.
    Unsupported,
}

/// Outcome of decoding one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageSummary {
    /// Server-reported total across all pages.
    pub total: usize,
    /// Records appended by this call.
    pub count: usize,
    /// How `diff` was encoded.
    pub diff: DiffShape,
}

/// Decodes one list page from `reader`, appending records to `out`.
///
/// Records rejected by [`ListItem::from_raw`] are dropped and not counted.
///
/// # Errors
///
/// Returns [`DecodeError`] on malformed JSON, a non-object top level or
/// `data` field, a record of the wrong type, or trailing data. Records
/// appended before the error stay in `out`.
pub fn decode_page<T, R>(reader: R, out: &mut Vec<T>) -> Result<PageSummary, DecodeError>
where
    T: ListItem,
    R: Read,
{
    let start = out.len();
    let mut de = serde_json::Deserializer::from_reader(reader);
    let frame = Envelope { out: &mut *out }.deserialize(&mut de)?;
    de.end()?;

    let summary = PageSummary {
        total: frame.total,
        count: out.len() - start,
        diff: frame.diff,
    };
    if summary.diff == DiffShape::Unsupported {
        warn!(
            total = summary.total,
            "list page diff is neither array nor object, treating as empty"
        );
    }
    Ok(summary)
}

#[derive(Debug, Default)]
struct Frame {
    total: usize,
    diff: DiffShape,
}

#[derive(Deserialize)]
#[serde(field_identifier, rename_all = "lowercase")]
enum EnvelopeKey {
    Data,
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
#[serde(field_identifier, rename_all = "lowercase")]
enum DataKey {
    Total,
    Diff,
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
struct Total(#[serde(deserialize_with = "lenient::number")] f64);

impl Total {
    fn into_count(self) -> usize {
        if self.0 > 0.0 { self.0 as usize } else { 0 }
    }
}

struct Envelope<'a, T> {
    out: &'a mut Vec<T>,
}

impl<'de, T: ListItem> DeserializeSeed<'de> for Envelope<'_, T> {
    type Value = Frame;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Frame, D::Error> {
        deserializer.deserialize_map(self)
    }
}

impl<'de, T: ListItem> Visitor<'de> for Envelope<'_, T> {
    type Value = Frame;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a response object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Frame, A::Error> {
        let mut frame = Frame::default();
        while let Some(key) = map.next_key::<EnvelopeKey>()? {
            match key {
                EnvelopeKey::Data => {
                    frame = map.next_value_seed(Data {
                        out: &mut *self.out,
                    })?;
                }
                EnvelopeKey::Other => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(frame)
    }
}

/// The `data` member; null decodes as an empty page.
struct Data<'a, T> {
    out: &'a mut Vec<T>,
}

impl<'de, T: ListItem> DeserializeSeed<'de> for Data<'_, T> {
    type Value = Frame;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Frame, D::Error> {
        deserializer.deserialize_option(self)
    }
}

impl<'de, T: ListItem> Visitor<'de> for Data<'_, T> {
    type Value = Frame;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a data object or null")
    }

    fn visit_none<E: de::Error>(self) -> Result<Frame, E> {
        Ok(Frame::default())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Frame, E> {
        Ok(Frame::default())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Frame, D::Error> {
        deserializer.deserialize_map(self)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Frame, A::Error> {
        let mut frame = Frame::default();
        while let Some(key) = map.next_key::<DataKey>()? {
            match key {
                DataKey::Total => frame.total = map.next_value::<Total>()?.into_count(),
                DataKey::Diff => {
                    frame.diff = map.next_value_seed(Diff {
                        out: &mut *self.out,
                    })?;
                }
                DataKey::Other => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(frame)
    }
}

/// The `diff` member in either of its two encodings.
struct Diff<'a, T> {
    out: &'a mut Vec<T>,
}

impl<T: ListItem> Diff<'_, T> {
    fn push(&mut self, raw: T::Raw) {
        if let Some(item) = T::from_raw(raw) {
            self.out.push(item);
        }
    }
}

impl<'de, T: ListItem> DeserializeSeed<'de> for Diff<'_, T> {
    type Value = DiffShape;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<DiffShape, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de, T: ListItem> Visitor<'de> for Diff<'_, T> {
    type Value = DiffShape;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array or object of records")
    }

    fn visit_seq<A: SeqAccess<'de>>(mut self, mut seq: A) -> Result<DiffShape, A::Error> {
        while let Some(raw) = seq.next_element::<T::Raw>()? {
            self.push(raw);
        }
        Ok(DiffShape::Array)
    }

    fn visit_map<A: MapAccess<'de>>(mut self, mut map: A) -> Result<DiffShape, A::Error> {
        while let Some((IgnoredAny, raw)) = map.next_entry::<IgnoredAny, T::Raw>()? {
            self.push(raw);
        }
        Ok(DiffShape::Object)
    }

    fn visit_unit<E: de::Error>(self) -> Result<DiffShape, E> {
        Ok(DiffShape::Unsupported)
    }

    fn visit_none<E: de::Error>(self) -> Result<DiffShape, E> {
        Ok(DiffShape::Unsupported)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<DiffShape, E> {
        Ok(DiffShape::Unsupported)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<DiffShape, E> {
        Ok(DiffShape::Unsupported)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<DiffShape, E> {
        Ok(DiffShape::Unsupported)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<DiffShape, E> {
        Ok(DiffShape::Unsupported)
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<DiffShape, E> {
        Ok(DiffShape::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_types::{BriefRecord, QuoteRecord};

    fn briefs(json: &str) -> (Vec<BriefRecord>, PageSummary) {
        let mut out = Vec::new();
        let summary = decode_page(json.as_bytes(), &mut out).unwrap();
        (out, summary)
    }

    #[test]
    fn test_array_and_object_agree() {
        let (from_array, array_summary) = briefs(
            r#"{"rc":0,"data":{"total":3,"diff":[
                {"f12":"600000","f14":"A"},
                {"f12":"000001","f14":"B"},
                {"f12":"300750","f14":"C"}]}}"#,
        );
        let (from_object, object_summary) = briefs(
            r#"{"data":{"diff":{
                "0":{"f12":"600000","f14":"A"},
                "x":{"f12":"000001","f14":"B"},
                "17":{"f12":"300750","f14":"C"}},"total":3}}"#,
        );

        assert_eq!(from_array, from_object);
        assert_eq!(from_array[0].code, "600000");
        assert_eq!(from_array[2].code, "300750");
        assert_eq!(array_summary.diff, DiffShape::Array);
        assert_eq!(object_summary.diff, DiffShape::Object);
        assert_eq!(array_summary.count, 3);
        assert_eq!(object_summary.total, 3);
    }

    #[test]
    fn test_empty_code_not_counted() {
        let (items, summary) = briefs(
            r#"{"data":{"total":10,"diff":[
                {"f12":"600000","f14":"A"},
                {"f12":"","f14":"blank"},
                {"f14":"missing"}]}}"#,
        );
        assert_eq!(items.len(), 1);
        assert_eq!(summary.count, 1);
        assert_eq!(summary.total, 10);
    }

    #[test]
    fn test_count_is_per_call() {
        let mut out = vec![BriefRecord::new("1", "pre-existing")];
        let summary =
            decode_page(r#"{"data":{"total":2,"diff":[{"f12":"2"}]}}"#.as_bytes(), &mut out)
                .unwrap();
        assert_eq!(summary.count, 1);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_unsupported_diff_is_empty_page() {
        for diff in ["null", "\"\"", "42", "true"] {
            let json = format!(r#"{{"data":{{"total":5,"diff":{diff}}}}}"#);
            let (items, summary) = briefs(&json);
            assert!(items.is_empty());
            assert_eq!(summary.count, 0);
            assert_eq!(summary.total, 5);
            assert_eq!(summary.diff, DiffShape::Unsupported);
        }
    }

    #[test]
    fn test_keys_after_unsupported_diff_still_read() {
        let (items, summary) = briefs(r#"{"data":{"diff":7,"total":3,"x":[1]}}"#);
        assert!(items.is_empty());
        assert_eq!(summary.total, 3);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.diff, DiffShape::Unsupported);
    }

    #[test]
    fn test_null_data_is_empty_page() {
        let (items, summary) = briefs(r#"{"rc":102,"data":null}"#);
        assert!(items.is_empty());
        assert_eq!(summary, PageSummary::default());
    }

    #[test]
    fn test_unknown_keys_skipped() {
        let (items, summary) = briefs(
            r#"{"svr":{"nested":[1,{"a":[2,3]}]},"data":{"extra":{"deep":[[{}]]},
                "total":"2","diff":[{"f12":"600000","f99":[1,2],"f14":"A"}]},"tail":null}"#,
        );
        assert_eq!(items, vec![BriefRecord::new("600000", "A")]);
        assert_eq!(summary.total, 2);
    }

    #[test]
    fn test_quote_page() {
        let mut out: Vec<QuoteRecord> = Vec::new();
        let summary = decode_page(
            r#"{"data":{"total":1,"diff":{"0":{"f12":"600519","f14":"Moutai",
                "f2":1700.5,"f3":"-","f9":-3.0,"f23":0,"f6":10}}}}"#
                .as_bytes(),
            &mut out,
        )
        .unwrap();
        assert_eq!(summary.count, 1);
        let q = &out[0];
        assert_eq!(q.change_pct, 0.0);
        assert_eq!(q.pe, 0.0);
        assert!((q.amount - 10.0 * 100.0 * 1700.5).abs() < 1e-6);
    }

    #[test]
    fn test_malformed_json_errors() {
        let mut out: Vec<BriefRecord> = Vec::new();
        assert!(decode_page(r#"{"data":{"total":1,"diff":[{"f12":"1"}"#.as_bytes(), &mut out).is_err());
        assert!(decode_page(r#"[1,2,3]"#.as_bytes(), &mut out).is_err());
        assert!(decode_page(r#"{"data":"oops"}"#.as_bytes(), &mut out).is_err());
        assert!(decode_page(r#"{"data":{"diff":[1]}}"#.as_bytes(), &mut out).is_err());
        assert!(decode_page(r#"{"data":{}} trailing"#.as_bytes(), &mut out).is_err());
    }

    #[test]
    fn test_missing_diff() {
        let (items, summary) = briefs(r#"{"data":{"total":0}}"#);
        assert!(items.is_empty());
        assert_eq!(summary.diff, DiffShape::Missing);
    }
}
