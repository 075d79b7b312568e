//! Exchange-prefixed security identifiers.

use serde::{Deserialize, Serialize};

/// Exchange a security code is listed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exchange {
    /// Shanghai-style codes (leading `6`, `5` or `9`).
    Shanghai,
    /// Shenzhen-style codes (everything else).
    Shenzhen,
}

impl Exchange {
    /// Classifies a raw security code by its leading digit.
    #[must_use]
    pub fn of_code(code: &str) -> Self {
        match code.as_bytes().first() {
            Some(b'6' | b'5' | b'9') => Self::Shanghai,
            _ => Self::Shenzhen,
        }
    }

    /// Returns the marker the history endpoint expects before the code.
    #[must_use]
    pub const fn marker(&self) -> &'static str {
        match self {
            Self::Shanghai => "0",
            Self::Shenzhen => "1",
        }
    }

    /// Returns the exchange as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Shanghai => "shanghai",
            Self::Shenzhen => "shenzhen",
        }
    }
}

impl std::fmt::Display for Exchange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Security identifier in `<marker>.<code>` form, e.g. `0.600519`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecId {
    exchange: Exchange,
    code: String,
}

impl SecId {
    /// Builds a security id from a raw code.
    ///
    /// Returns `None` if the code is empty after trimming.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        Some(Self {
            exchange: Exchange::of_code(code),
            code: code.to_string(),
        })
    }

    /// Returns the exchange.
    #[must_use]
    pub const fn exchange(&self) -> Exchange {
        self.exchange
    }

    /// Returns the raw code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl std::fmt::Display for SecId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.exchange.marker(), self.code)
    }
}
