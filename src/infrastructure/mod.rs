pub mod http;
pub mod services;
pub mod storage;

pub use http::{CoinGeckoClient, GlooHttpClient, HttpUtils};
pub use services::{BrowserTimeProvider, ConsoleLogger};
pub use storage::{JsonPersistence, LocalStorageBackend, MemoryStorage};
