pub mod coin_catalog;
pub mod coordinator;

pub use coin_catalog::*;
pub use coordinator::*;
