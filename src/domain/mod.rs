//! Domain types: simulation parameters, world bounds and the error taxonomy.

pub mod error;
pub mod params;

pub use error::{PhysicsError, PhysicsResult};
pub use params::{ParamName, SimParams, WorldBounds};
