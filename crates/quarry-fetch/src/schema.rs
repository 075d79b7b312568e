//! Per-endpoint record schemas.
//!
//! The upstream identifies fields by opaque codes (`f2`, `f12`, ...). Each
//! raw struct names those codes once; conversion to the public record types
//! happens in a single step per record.

use quarry_types::{BriefRecord, IndexQuote, QuoteRecord};
use serde::Deserialize;

use crate::lenient;

/// Converts one wire record into a public record.
pub trait ListItem: Sized {
    /// Wire representation of one `diff` entry.
    type Raw: serde::de::DeserializeOwned;

    /// Converts the wire record. Returns `None` if the record must be dropped.
    fn from_raw(raw: Self::Raw) -> Option<Self>;
}

/// Wire record of the quote list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawQuote {
    /// `f12`: security code.
    #[serde(rename = "f12", default, deserialize_with = "lenient::text")]
    pub code: String,
    /// `f14`: display name.
    #[serde(rename = "f14", default, deserialize_with = "lenient::text")]
    pub name: String,
    /// `f2`: last price.
    #[serde(rename = "f2", default, deserialize_with = "lenient::number")]
    pub price: f64,
    /// `f3`: percent change.
    #[serde(rename = "f3", default, deserialize_with = "lenient::number")]
    pub change_pct: f64,
    /// `f6`: traded volume in lots.
    #[serde(rename = "f6", default, deserialize_with = "lenient::number")]
    pub volume: f64,
    /// `f8`: turnover rate.
    #[serde(rename = "f8", default, deserialize_with = "lenient::number")]
    pub turnover_rate: f64,
    /// `f10`: volume ratio.
    #[serde(rename = "f10", default, deserialize_with = "lenient::number")]
    pub volume_ratio: f64,
    /// `f23`: traded amount.
    #[serde(rename = "f23", default, deserialize_with = "lenient::number")]
    pub amount: f64,
    /// `f20`: total market capitalization.
    #[serde(rename = "f20", default, deserialize_with = "lenient::number")]
    pub market_cap: f64,
    /// `f9`: price/earnings ratio.
    #[serde(rename = "f9", default, deserialize_with = "lenient::number")]
    pub pe: f64,
    /// `f62`: net capital inflow.
    #[serde(rename = "f62", default, deserialize_with = "lenient::number")]
    pub net_inflow: f64,
    /// `f184`: main-force inflow.
    #[serde(rename = "f184", default, deserialize_with = "lenient::number")]
    pub main_force_inflow: f64,
    /// `f66`: main-force outflow.
    #[serde(rename = "f66", default, deserialize_with = "lenient::number")]
    pub main_force_outflow: f64,
}

/// Shares per lot, used to rebuild a missing traded amount.
pub const LOT_SIZE: f64 = 100.0;

impl ListItem for QuoteRecord {
    type Raw = RawQuote;

    fn from_raw(raw: RawQuote) -> Option<Self> {
        if raw.code.is_empty() {
            return None;
        }
        let amount = if raw.amount <= 0.0 && raw.volume > 0.0 && raw.price > 0.0 {
            raw.volume.trunc() * LOT_SIZE * raw.price
        } else {
            raw.amount
        };
        Some(Self {
            code: raw.code,
            name: raw.name,
            price: raw.price,
            change_pct: raw.change_pct,
            amount,
            volume_ratio: raw.volume_ratio,
            turnover_rate: raw.turnover_rate,
            market_cap: raw.market_cap,
            pe: raw.pe.max(0.0),
            net_inflow: raw.net_inflow,
            main_force_inflow: raw.main_force_inflow,
            main_force_outflow: raw.main_force_outflow,
        })
    }
}

/// Wire record of the universe endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBrief {
    /// `f12`: security code.
    #[serde(rename = "f12", default, deserialize_with = "lenient::text")]
    pub code: String,
    /// `f14`: display name.
    #[serde(rename = "f14", default, deserialize_with = "lenient::text")]
    pub name: String,
}

impl ListItem for BriefRecord {
    type Raw = RawBrief;

    fn from_raw(raw: RawBrief) -> Option<Self> {
        (!raw.code.is_empty()).then(|| Self::new(raw.code, raw.name))
    }
}

/// Wire record of the index quote endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawIndex {
    /// `f12`: index code.
    #[serde(rename = "f12", default, deserialize_with = "lenient::text")]
    pub code: String,
    /// `f14`: display name.
    #[serde(rename = "f14", default, deserialize_with = "lenient::text")]
    pub name: String,
    /// `f2`: last value.
    #[serde(rename = "f2", default, deserialize_with = "lenient::number")]
    pub price: f64,
    /// `f3`: percent change, sometimes scaled by 100.
    #[serde(rename = "f3", default, deserialize_with = "lenient::number")]
    pub change_pct: f64,
}

/// Percent changes with a larger magnitude are assumed to be scaled by 100.
pub const INDEX_CHANGE_SCALE_THRESHOLD: f64 = 20.0;

impl ListItem for IndexQuote {
    type Raw = RawIndex;

    fn from_raw(raw: RawIndex) -> Option<Self> {
        if raw.code.is_empty() && raw.name.is_empty() {
            return None;
        }
        let change_pct = if raw.change_pct.abs() > INDEX_CHANGE_SCALE_THRESHOLD {
            raw.change_pct / 100.0
        } else {
            raw.change_pct
        };
        Some(Self {
            code: raw.code,
            name: raw.name,
            price: raw.price,
            change_pct,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(json: &str) -> Option<QuoteRecord> {
        QuoteRecord::from_raw(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_quote_fields() {
        let q = quote(
            r#"{"f2":12.5,"f3":4.2,"f6":1000,"f8":5.1,"f10":1.8,"f12":"600519",
                "f14":"Moutai","f23":2.5e9,"f20":6e10,"f9":25.0,
                "f62":1.5e8,"f184":3e8,"f66":1e8}"#,
        )
        .unwrap();
        assert_eq!(q.code, "600519");
        assert_eq!(q.name, "Moutai");
        assert!((q.price - 12.5).abs() < 1e-10);
        assert!((q.amount - 2.5e9).abs() < 1e-3);
        assert!((q.pe - 25.0).abs() < 1e-10);
        assert!((q.main_force_inflow - 3e8).abs() < 1e-3);
    }

    #[test]
    fn test_amount_rebuilt_from_volume() {
        let q = quote(r#"{"f12":"000001","f2":10.0,"f6":500,"f23":"-"}"#).unwrap();
        assert!((q.amount - 500.0 * 100.0 * 10.0).abs() < 1e-6);

        let q = quote(r#"{"f12":"000001","f2":0,"f6":500,"f23":0}"#).unwrap();
        assert_eq!(q.amount, 0.0);
    }

    #[test]
    fn test_negative_pe_normalized() {
        let q = quote(r#"{"f12":"000001","f9":-12.3}"#).unwrap();
        assert_eq!(q.pe, 0.0);
        assert!(!q.has_valid_pe());
    }

    #[test]
    fn test_empty_code_dropped() {
        assert!(quote(r#"{"f12":"","f14":"Ghost"}"#).is_none());
        assert!(quote(r#"{"f14":"Ghost"}"#).is_none());
        assert!(BriefRecord::from_raw(RawBrief::default()).is_none());
    }

    #[test]
    fn test_index_change_rescaled() {
        let raw: RawIndex =
            serde_json::from_str(r#"{"f12":"000001","f14":"SSE","f2":3200.5,"f3":125}"#)
                .unwrap();
        let index = IndexQuote::from_raw(raw).unwrap();
        assert!((index.change_pct - 1.25).abs() < 1e-10);

        let raw: RawIndex = serde_json::from_str(r#"{"f12":"399006","f3":-2.1}"#).unwrap();
        assert!((IndexQuote::from_raw(raw).unwrap().change_pct + 2.1).abs() < 1e-10);
    }

    #[test]
    fn test_index_without_identity_dropped() {
        let raw: RawIndex = serde_json::from_str(r#"{"f2":1.0}"#).unwrap();
        assert!(IndexQuote::from_raw(raw).is_none());
    }
}
