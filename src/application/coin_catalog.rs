use crate::domain::{
    logging::LogComponent,
    market_data::{CoinListRepository, CoinLookup},
};
use crate::{log_info, log_warn};

const COMPONENT: LogComponent = LogComponent::Application("CoinCatalogService");

/// Loads the coin list once at startup and turns it into a lookup table.
///
/// The catalog is an optional enrichment: a failed fetch yields an empty
/// lookup and widgets render without live values.
pub struct CoinCatalogService<R: CoinListRepository> {
    repository: R,
}

impl<R: CoinListRepository> CoinCatalogService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub async fn load(&self) -> CoinLookup {
        match self.repository.fetch_coins().await {
            Ok(records) => {
                let lookup = CoinLookup::from_records(records);
                log_info!(COMPONENT, "🪙 Coin catalog loaded: {} symbols", lookup.len());
                lookup
            }
            Err(err) => {
                log_warn!(COMPONENT, "Coin catalog unavailable, continuing without quotes: {}", err);
                CoinLookup::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{InfrastructureError, InfrastructureResult};
    use crate::domain::market_data::{CoinMarket, Price, Symbol, Volume};
    use futures::executor::block_on;

    struct FixedRepository(InfrastructureResult<Vec<CoinMarket>>);

    impl CoinListRepository for FixedRepository {
        async fn fetch_coins(&self) -> InfrastructureResult<Vec<CoinMarket>> {
            self.0.clone()
        }
    }

    fn coin(symbol: &str, cap: f64) -> CoinMarket {
        CoinMarket {
            id: symbol.to_lowercase(),
            symbol: Symbol::from(symbol),
            name: symbol.to_string(),
            current_price: Price::from(1.0),
            price_change_percentage_24h: 0.5,
            market_cap: cap,
            total_volume: Volume::from(10.0),
            sparkline: Vec::new(),
        }
    }

    #[test]
    fn successful_fetch_builds_lookup() {
        let service = CoinCatalogService::new(FixedRepository(Ok(vec![coin("BTC", 2.0), coin("ETH", 1.0)])));
        let lookup = block_on(service.load());
        assert_eq!(lookup.len(), 2);
        assert!(lookup.get(&Symbol::from("ETH")).is_some());
    }

    #[test]
    fn failed_fetch_degrades_to_empty_lookup() {
        let service = CoinCatalogService::new(FixedRepository(Err(InfrastructureError::Timeout(8_000))));
        assert!(block_on(service.load()).is_empty());
    }
}
