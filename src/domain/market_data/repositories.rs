use crate::domain::errors::InfrastructureResult;
use crate::domain::market_data::CoinMarket;

/// Port for the external coin catalog (price, volume, sparkline per coin).
/// Implementations return normalized records; callers treat the result as
/// best-effort and possibly empty.
#[allow(async_fn_in_trait)]
pub trait CoinListRepository {
    async fn fetch_coins(&self) -> InfrastructureResult<Vec<CoinMarket>>;
}
