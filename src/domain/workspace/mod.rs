//! Workspace aggregate: boards, widget instances, grid layouts and the
//! policies around them (packing, access gating, persistence port).

pub mod access;
pub mod catalog;
pub mod config;
pub mod entities;
pub mod packing;
pub mod registry;
pub mod repositories;
pub mod templates;
pub mod value_objects;

pub use access::*;
pub use catalog::*;
pub use config::*;
pub use entities::*;
pub use packing::*;
pub use repositories::*;
pub use value_objects::*;
