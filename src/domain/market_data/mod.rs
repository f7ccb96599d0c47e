//! Market data consumed by the workspace: the coin catalog used to populate
//! symbol pickers and decorate ticker widgets.

pub mod entities;
pub mod repositories;
pub mod value_objects;

pub use entities::*;
pub use repositories::*;
pub use value_objects::*;
