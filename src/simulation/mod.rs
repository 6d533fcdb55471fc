//! WorldCore - owns the bodies, springs and parameters of one simulation
//!
//! The core only orchestrates; the physics lives in `systems/`:
//! - spring forces in spring.rs
//! - integration in integrator.rs
//! - world walls in boundary.rs
//! - pairwise contacts in collision/
//!
//! Every submodule below is a set of free functions over `WorldCore`,
//! wired to methods here. The wasm-facing `World` wraps this type.

use crate::core::Vec2;
use crate::domain::error::PhysicsResult;
use crate::domain::params::{ParamName, SimParams, WorldBounds};
use crate::rigid_body::{BodyHandle, RigidBody};
use crate::rigid_body_system::RigidBodySystem;
use crate::spring::{Spring, SpringHandle, SpringSystem};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/step.rs"]
mod step;
#[path = "step/frame_clock.rs"]
mod frame_clock;
#[path = "commands/commands.rs"]
mod commands;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "render/render_extract.rs"]
mod render_extract;
mod facade;

pub use commands::{
    Pendulum, SoftBody, SpringChain, SpringSpawn, DEFAULT_BODY_MASS, DEFAULT_BOX_SIZE,
    DEFAULT_CIRCLE_RADIUS, DEFAULT_PENDULUM_BOB_MASS, DEFAULT_PENDULUM_LENGTH,
    DEFAULT_PENDULUM_PIVOT, DEFAULT_SOFT_BODY_MASS, DEFAULT_SOFT_BODY_ORIGIN,
    DEFAULT_SOFT_BODY_SIDE, DEFAULT_SOFT_BODY_SPACING, DEFAULT_SPAWN, DEFAULT_SPRING_ANCHORS,
    MAX_CHAIN_LINKS, MAX_SOFT_BODY_SIDE, PENDULUM_BOB_RADIUS, PENDULUM_STIFFNESS,
    SPRING_ANCHOR_MASS, SPRING_ANCHOR_RADIUS,
};
pub use facade::{PendulumSpawn, SpringSpawnIds, World};
pub use perf_stats::PerfStats;
pub use render_extract::{BODY_STRIDE, KIND_CIRCLE, KIND_RECTANGLE, SPRING_STRIDE};

use frame_clock::FrameClock;
use render_extract::RenderBuffers;

/// The simulation world
pub struct WorldCore {
    params: SimParams,
    bounds: WorldBounds,
    rigid_bodies: RigidBodySystem,
    springs: SpringSystem,

    // State
    clock: FrameClock,
    frame: u64,
    render: RenderBuffers,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl WorldCore {
    /// Empty world with default parameters and bounds
    pub fn new() -> Self {
        init::create_world_core()
    }

    /// Empty world with caller-supplied configuration. Rejects invalid
    /// parameters or inverted bounds.
    pub fn with_config(params: SimParams, bounds: WorldBounds) -> PhysicsResult<Self> {
        init::create_world_core_with_config(params, bounds)
    }

    pub fn params(&self) -> &SimParams { &self.params }

    pub fn bounds(&self) -> &WorldBounds { &self.bounds }

    pub fn frame(&self) -> u64 { self.frame }

    pub fn body_count(&self) -> usize { self.rigid_bodies.body_count() }

    pub fn spring_count(&self) -> usize { self.springs.spring_count() }

    pub fn bodies(&self) -> &RigidBodySystem { &self.rigid_bodies }

    pub fn springs(&self) -> &SpringSystem { &self.springs }

    pub fn body(&self, handle: BodyHandle) -> PhysicsResult<&RigidBody> {
        self.rigid_bodies.get(handle)
    }

    pub fn spring(&self, handle: SpringHandle) -> PhysicsResult<&Spring> {
        self.springs.get(handle)
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    // === PARAMETERS ===

    /// Set `gravity`, `elasticity`, `friction` or `springStiffness` by name.
    /// Changing `springStiffness` rewrites the stiffness of every spring.
    pub fn set_parameter(&mut self, name: &str, value: f32) -> PhysicsResult<()> {
        settings::set_parameter(self, name, value)
    }

    pub fn set_param(&mut self, name: ParamName, value: f32) -> PhysicsResult<()> {
        settings::set_param(self, name, value)
    }

    pub fn get_parameter(&self, name: &str) -> PhysicsResult<f32> {
        settings::get_parameter(self, name)
    }

    pub fn params_json(&self) -> String {
        settings::params_json(self)
    }

    pub fn load_params_json(&mut self, json: &str) -> PhysicsResult<()> {
        settings::load_params_json(self, json)
    }

    pub fn set_bounds(&mut self, left: f32, right: f32, bottom: f32, top: f32) -> PhysicsResult<()> {
        settings::set_bounds(self, left, right, bottom, top)
    }

    // === BODIES & SPRINGS ===

    pub fn add_circle(&mut self, pos: Vec2, radius: f32, mass: f32) -> PhysicsResult<BodyHandle> {
        commands::add_circle(self, pos, radius, mass)
    }

    pub fn add_static_circle(&mut self, pos: Vec2, radius: f32) -> PhysicsResult<BodyHandle> {
        commands::add_static_circle(self, pos, radius)
    }

    pub fn add_rectangle(&mut self, pos: Vec2, width: f32, height: f32, mass: f32) -> PhysicsResult<BodyHandle> {
        commands::add_rectangle(self, pos, width, height, mass)
    }

    pub fn add_static_rectangle(&mut self, pos: Vec2, width: f32, height: f32) -> PhysicsResult<BodyHandle> {
        commands::add_static_rectangle(self, pos, width, height)
    }

    /// Spring between two new anchor circles. `rest_length` defaults to the
    /// anchor distance, `stiffness` to the global parameter.
    pub fn add_spring(
        &mut self,
        p1: Vec2,
        p2: Vec2,
        rest_length: Option<f32>,
        stiffness: Option<f32>,
    ) -> PhysicsResult<SpringSpawn> {
        commands::add_spring(self, p1, p2, rest_length, stiffness)
    }

    /// Spring between two existing bodies
    pub fn connect(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
        rest_length: Option<f32>,
        stiffness: Option<f32>,
    ) -> PhysicsResult<SpringHandle> {
        commands::connect(self, a, b, rest_length, stiffness)
    }

    pub fn add_pendulum(&mut self, pivot: Vec2, length: f32, bob_mass: f32) -> PhysicsResult<Pendulum> {
        commands::add_pendulum(self, pivot, length, bob_mass)
    }

    pub fn add_spring_chain(
        &mut self,
        anchor: Vec2,
        links: u32,
        link_length: f32,
        link_mass: f32,
    ) -> PhysicsResult<SpringChain> {
        commands::add_spring_chain(self, anchor, links, link_length, link_mass)
    }

    /// Lattice of point masses joined by structural springs
    pub fn add_soft_body(
        &mut self,
        origin: Vec2,
        cols: u32,
        rows: u32,
        spacing: f32,
        mass: f32,
        stiffness: Option<f32>,
    ) -> PhysicsResult<SoftBody> {
        commands::add_soft_body(self, origin, cols, rows, spacing, mass, stiffness)
    }

    pub fn populate_demo_scene(&mut self) -> PhysicsResult<()> {
        commands::populate_demo_scene(self)
    }

    /// Remove every body and spring
    pub fn reset(&mut self) {
        commands::reset(self)
    }

    pub fn set_static(&mut self, handle: BodyHandle, is_static: bool) -> PhysicsResult<()> {
        commands::set_static(self, handle, is_static)
    }

    /// Place a body directly and zero its velocity (drag interaction)
    pub fn drag_body(&mut self, handle: BodyHandle, pos: Vec2) -> PhysicsResult<()> {
        commands::drag_body(self, handle, pos)
    }

    pub fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vec2) -> PhysicsResult<()> {
        commands::apply_impulse(self, handle, impulse)
    }

    // === STEPPING ===

    /// Advance by `dt` seconds, clamped to `[0, max_dt]`
    pub fn step(&mut self, dt: f32) {
        step::step(self, dt);
    }

    /// Advance using a host animation-frame timestamp in milliseconds.
    /// Returns the dt that was simulated.
    pub fn step_frame(&mut self, now_ms: f64) -> f32 {
        let dt = self.clock.tick(now_ms, self.params.max_dt);
        step::step(self, dt);
        dt
    }

    // === RENDER EXTRACTION ===

    /// Pack bodies into the transfer buffer, `BODY_STRIDE` floats each
    pub fn extract_bodies(&mut self) -> *const f32 {
        render_extract::extract_bodies(self)
    }

    pub fn bodies_len(&self) -> usize {
        self.render.bodies.len()
    }

    /// Pack spring endpoints into the transfer buffer, `SPRING_STRIDE` floats each
    pub fn extract_springs(&mut self) -> *const f32 {
        render_extract::extract_springs(self)
    }

    pub fn springs_len(&self) -> usize {
        self.render.springs.len()
    }

    pub fn snapshot_json(&self) -> String {
        render_extract::snapshot_json(self)
    }
}

impl Default for WorldCore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
