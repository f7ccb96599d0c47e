pub mod errors;
pub mod logging;
pub mod market_data;
pub mod workspace;
