//! RigidBodySystem - arena that owns every simulated body
//!
//! Springs and the host refer to bodies through `BodyHandle`s, never by
//! reference, so the step can borrow bodies mutably in pairs.

mod system;

pub(crate) use system::pair_mut;
pub use system::RigidBodySystem;
