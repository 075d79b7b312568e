//! Tolerant field deserializers.
//!
//! The upstream marks missing values with `"-"`, sometimes quotes numbers and
//! occasionally sends `null`. All of those collapse to zero or an empty
//! string instead of failing the whole page.

use serde::Deserializer;
use serde::de::{self, Visitor};
use std::fmt;

/// Deserializes a number, numeric string, placeholder or null into `f64`.
pub(crate) fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(NumberVisitor)
}

/// Deserializes a string, number or null into a trimmed `String`.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(TextVisitor)
}

struct NumberVisitor;

impl<'de> Visitor<'de> for NumberVisitor {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, a numeric string or a placeholder")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(v)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        Ok(v.trim().parse::<f64>().unwrap_or(0.0))
    }

    fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
        Ok(0.0)
    }

    fn visit_none<E: de::Error>(self) -> Result<f64, E> {
        Ok(0.0)
    }
}

struct TextVisitor;

impl<'de> Visitor<'de> for TextVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.trim().to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_unit<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "super::number")]
        n: f64,
        #[serde(default, deserialize_with = "super::text")]
        s: String,
    }

    fn probe(json: &str) -> Probe {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_number_forms() {
        assert!((probe(r#"{"n": 12.5}"#).n - 12.5).abs() < 1e-10);
        assert!((probe(r#"{"n": -3}"#).n + 3.0).abs() < 1e-10);
        assert!((probe(r#"{"n": " 7.25 "}"#).n - 7.25).abs() < 1e-10);
        assert_eq!(probe(r#"{"n": "-"}"#).n, 0.0);
        assert_eq!(probe(r#"{"n": null}"#).n, 0.0);
        assert_eq!(probe("{}").n, 0.0);
    }

    #[test]
    fn test_text_forms() {
        assert_eq!(probe(r#"{"s": " 600519 "}"#).s, "600519");
        assert_eq!(probe(r#"{"s": 1}"#).s, "1");
        assert_eq!(probe(r#"{"s": null}"#).s, "");
    }

    #[test]
    fn test_rejects_structures() {
        assert!(serde_json::from_str::<Probe>(r#"{"n": [1]}"#).is_err());
        assert!(serde_json::from_str::<Probe>(r#"{"s": {"a": 1}}"#).is_err());
    }
}
