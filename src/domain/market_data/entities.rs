pub use super::value_objects::{Price, Symbol, Timestamp, Volume};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Domain entity - one row of the coin markets list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinMarket {
    pub id: String,
    pub symbol: Symbol,
    pub name: String,
    pub current_price: Price,
    pub price_change_percentage_24h: f64,
    pub market_cap: f64,
    pub total_volume: Volume,
    pub sparkline: Vec<f64>,
}

impl CoinMarket {
    pub fn is_gaining(&self) -> bool {
        self.price_change_percentage_24h > 0.0
    }
}

/// Live figures attached to a ticker-scoped widget header
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetQuote {
    pub price: Price,
    pub change_24h: f64,
    pub volume: Volume,
}

/// Read-only lookup built once from the catalog fetch. Empty when the fetch
/// failed; widgets then render without live figures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoinLookup {
    by_symbol: HashMap<Symbol, CoinMarket>,
}

impl CoinLookup {
    pub fn from_records(records: Vec<CoinMarket>) -> Self {
        let mut by_symbol: HashMap<Symbol, CoinMarket> = HashMap::with_capacity(records.len());
        for record in records {
            // Tickers are not unique across the catalog; the larger market wins.
            let keep_existing = by_symbol
                .get(&record.symbol)
                .is_some_and(|existing| existing.market_cap >= record.market_cap);
            if !keep_existing {
                by_symbol.insert(record.symbol.clone(), record);
            }
        }
        Self { by_symbol }
    }

    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&CoinMarket> {
        self.by_symbol.get(symbol)
    }

    /// Symbols for the widget picker, largest market cap first
    pub fn symbol_options(&self) -> Vec<Symbol> {
        let mut coins: Vec<&CoinMarket> = self.by_symbol.values().collect();
        coins.sort_by(|a, b| {
            b.market_cap
                .partial_cmp(&a.market_cap)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.symbol.cmp(&b.symbol))
        });
        coins.into_iter().map(|coin| coin.symbol.clone()).collect()
    }

    /// Sentinel symbols never carry a quote
    pub fn decorate(&self, symbol: &Symbol) -> Option<WidgetQuote> {
        if symbol.is_sentinel() {
            return None;
        }
        self.get(symbol).map(|coin| WidgetQuote {
            price: coin.current_price,
            change_24h: coin.price_change_percentage_24h,
            volume: coin.total_volume,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin(symbol: &str, cap: f64, price: f64) -> CoinMarket {
        CoinMarket {
            id: symbol.to_lowercase(),
            symbol: Symbol::from(symbol),
            name: symbol.to_string(),
            current_price: Price::from(price),
            price_change_percentage_24h: 1.5,
            market_cap: cap,
            total_volume: Volume::from(10.0),
            sparkline: Vec::new(),
        }
    }

    #[test]
    fn options_sorted_by_market_cap() {
        let lookup = CoinLookup::from_records(vec![coin("SOL", 50.0, 1.0), coin("BTC", 900.0, 2.0), coin("ETH", 300.0, 3.0)]);
        assert_eq!(lookup.symbol_options(), vec![Symbol::from("BTC"), Symbol::from("ETH"), Symbol::from("SOL")]);
    }

    #[test]
    fn duplicate_ticker_keeps_larger_market() {
        let lookup = CoinLookup::from_records(vec![coin("UNI", 5.0, 1.0), coin("UNI", 50.0, 7.0)]);
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup.get(&Symbol::from("UNI")).unwrap().current_price.value(), 7.0);
    }

    #[test]
    fn sentinels_are_not_decorated() {
        let lookup = CoinLookup::from_records(vec![coin("BTC", 900.0, 2.0)]);
        assert!(lookup.decorate(&Symbol::market()).is_none());
        assert_eq!(lookup.decorate(&Symbol::from("btc")).unwrap().price.value(), 2.0);
    }
}
