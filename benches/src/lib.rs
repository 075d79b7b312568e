//! Synthetic fixtures for quarry benchmarks.
//!
//! Run with: `cargo bench --package quarry-bench`

use chrono::{Days, NaiveDate};
use quarry_lib::Bar;
use std::fmt::Write as _;

/// Shape of the `diff` member in a generated list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLayout {
    /// `"diff": [ {...}, ... ]`
    Array,
    /// `"diff": { "0": {...}, ... }`
    Object,
}

/// Builds a list page body with `rows` quote records.
#[must_use]
pub fn list_page(rows: usize, layout: DiffLayout) -> Vec<u8> {
    let mut body = format!(r#"{{"rc":0,"data":{{"total":{},"diff":"#, rows * 10);
    body.push(if layout == DiffLayout::Array { '[' } else { '{' });
    for i in 0..rows {
        if i > 0 {
            body.push(',');
        }
        if layout == DiffLayout::Object {
            let _ = write!(body, r#""{i}":"#);
        }
        let price = 5.0 + (i % 97) as f64 * 0.37;
        let _ = write!(
            body,
            r#"{{"f2":{price:.2},"f3":{:.2},"f6":{},"f8":{:.2},"f9":{:.2},"f10":{:.2},"f12":"{:06}","f14":"Stock {i}","f20":{},"f23":"-"}}"#,
            (i % 21) as f64 - 10.0,
            (i * 1_000_003) % 900_000_000,
            (i % 15) as f64 * 0.7,
            (i % 80) as f64 - 5.0,
            1.0 + (i % 9) as f64 * 0.2,
            600_000 + i,
            (i + 1) * 7_000_000,
        );
    }
    body.push(if layout == DiffLayout::Array { ']' } else { '}' });
    body.push_str("}}");
    body.into_bytes()
}

/// Builds `n` oldest-first bars following a noisy uptrend.
#[must_use]
pub fn trending_bars(n: usize) -> Vec<Bar> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default();
    (0..n)
        .map(|i| {
            let base = 10.0 + i as f64 * 0.05;
            let wobble = ((i * 7) % 11) as f64 * 0.03 - 0.15;
            let date = start.checked_add_days(Days::new(i as u64)).unwrap_or(start);
            Bar::new(date, base, base + wobble, 10_000 + (i as i64 % 500) * 10)
        })
        .collect()
}
