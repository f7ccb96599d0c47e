use derive_more::{Constructor, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Value Object - price quoted in the catalog's fiat currency
#[derive(Debug, Clone, Copy, PartialEq, Default, From, Into, Deref, Constructor, Serialize, Deserialize)]
pub struct Price(f64);

impl Price {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

/// Value Object - 24h traded volume
#[derive(Debug, Clone, Copy, PartialEq, Default, From, Into, Deref, Constructor, Serialize, Deserialize)]
pub struct Volume(f64);

impl Volume {
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Value Object - milliseconds timestamp
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, From, Into, Deref, Constructor, Serialize, Deserialize,
)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn from_millis(value: u64) -> Self {
        Self(value)
    }

    /// Reads the registered clock
    pub fn now() -> Self {
        Self(crate::domain::logging::get_time_provider().current_timestamp())
    }
}

/// Value Object - market ticker, or one of the sentinels a widget uses when
/// it is not scoped to a single coin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deref, Display, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    pub const GLOBAL: &'static str = "GLOBAL";
    pub const MARKET: &'static str = "MARKET";
    pub const SENTIMENT: &'static str = "SENTIMENT";

    pub fn new(symbol: String) -> Result<Self, String> {
        let trimmed = symbol.trim();
        if trimmed.is_empty() {
            return Err("Symbol cannot be empty".to_string());
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn global() -> Self {
        Self(Self::GLOBAL.to_string())
    }

    pub fn market() -> Self {
        Self(Self::MARKET.to_string())
    }

    pub fn sentiment() -> Self {
        Self(Self::SENTIMENT.to_string())
    }

    /// True for GLOBAL / MARKET / SENTIMENT
    pub fn is_sentinel(&self) -> bool {
        matches!(self.0.as_str(), Self::GLOBAL | Self::MARKET | Self::SENTIMENT)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self(value.trim().to_uppercase())
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

/// Tickers offered before the coin catalog has loaded
pub fn default_symbols() -> Vec<Symbol> {
    ["BTC", "ETH", "SOL"].into_iter().map(Symbol::from).collect()
}
