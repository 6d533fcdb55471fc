//! Springbox Engine - 2D rigid body and spring physics in WASM
//!
//! Circles and axis-aligned rectangles under gravity, joined by Hooke's-law
//! springs, bouncing off the world walls and each other.
//!
//! Architecture:
//! - core/          - Math primitives
//! - domain/        - Parameters, bounds, errors
//! - systems/       - Integrator, springs, boundary, collisions
//! - simulation/    - WorldCore orchestration and the wasm `World` facade

pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

pub mod world {
    pub use crate::simulation::*;
}

// Compatibility re-exports (short paths used across the crate)
pub use systems::collision;
pub use systems::rigid_body;
pub use systems::rigid_body_system;
pub use systems::spring;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(feature = "parallel")]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"Springbox WASM engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::Vec2;
pub use domain::error::{PhysicsError, PhysicsResult};
pub use domain::params::{ParamName, SimParams, WorldBounds};
pub use rigid_body::{BodyHandle, RigidBody, Shape, ShapeKind};
pub use simulation::{PerfStats, World, WorldCore};
pub use spring::{Spring, SpringHandle};
