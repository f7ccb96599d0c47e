use serde::Deserialize;
use std::collections::BTreeMap;

use super::{GlooHttpClient, HttpUtils};
use crate::domain::{
    errors::InfrastructureResult,
    logging::LogComponent,
    market_data::{CoinListRepository, CoinMarket, Price, Symbol, Volume},
};
use crate::log_info;

/// Row of `/coins/markets`. Every numeric field may be null upstream.
#[derive(Debug, Deserialize)]
pub struct CoinMarketDto {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub current_price: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub market_cap: Option<f64>,
    pub total_volume: Option<f64>,
    pub sparkline_in_7d: Option<SparklineDto>,
}

#[derive(Debug, Deserialize)]
pub struct SparklineDto {
    #[serde(default)]
    pub price: Vec<f64>,
}

impl CoinMarketDto {
    /// None for rows whose symbol is blank
    pub fn to_domain(self) -> Option<CoinMarket> {
        let symbol = Symbol::new(self.symbol).ok()?;
        Some(CoinMarket {
            id: self.id,
            symbol,
            name: self.name,
            current_price: Price::from(self.current_price.unwrap_or_default()),
            price_change_percentage_24h: self.price_change_percentage_24h.unwrap_or_default(),
            market_cap: self.market_cap.unwrap_or_default(),
            total_volume: Volume::from(self.total_volume.unwrap_or_default()),
            sparkline: self.sparkline_in_7d.map(|s| s.price).unwrap_or_default(),
        })
    }
}

/// Coin list source backed by the CoinGecko markets endpoint
pub struct CoinGeckoClient {
    http: GlooHttpClient,
}

impl CoinGeckoClient {
    pub fn new(base_url: &str, timeout_ms: u32) -> Self {
        Self { http: GlooHttpClient::new(base_url.to_string()).with_timeout(timeout_ms) }
    }

    pub fn markets_endpoint() -> String {
        let mut params = BTreeMap::new();
        params.insert("vs_currency", "usd".to_string());
        params.insert("order", "market_cap_desc".to_string());
        params.insert("per_page", "100".to_string());
        params.insert("sparkline", "true".to_string());
        HttpUtils::build_url_with_params("/coins/markets", &params)
    }
}

impl CoinListRepository for CoinGeckoClient {
    async fn fetch_coins(&self) -> InfrastructureResult<Vec<CoinMarket>> {
        let rows: Vec<CoinMarketDto> = self.http.get_json(&Self::markets_endpoint()).await?;
        let coins: Vec<CoinMarket> = rows.into_iter().filter_map(CoinMarketDto::to_domain).collect();
        log_info!(LogComponent::Infrastructure("CoinGecko"), "📡 Fetched {} coin markets", coins.len());
        Ok(coins)
    }
}
