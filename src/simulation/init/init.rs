use crate::domain::error::PhysicsResult;
use crate::domain::params::{SimParams, WorldBounds};
use crate::rigid_body_system::RigidBodySystem;
use crate::spring::SpringSystem;

use super::frame_clock::FrameClock;
use super::perf_stats::PerfStats;
use super::RenderBuffers;
use super::WorldCore;

pub(super) fn create_world_core() -> WorldCore {
    build(SimParams::default(), WorldBounds::default())
}

pub(super) fn create_world_core_with_config(params: SimParams, bounds: WorldBounds) -> PhysicsResult<WorldCore> {
    params.validate()?;
    // Re-validate so hand-built bounds get the same checks as `WorldBounds::new`.
    let bounds = WorldBounds::new(bounds.left, bounds.right, bounds.bottom, bounds.top)?;
    Ok(build(params, bounds))
}

fn build(params: SimParams, bounds: WorldBounds) -> WorldCore {
    WorldCore {
        params,
        bounds,
        rigid_bodies: RigidBodySystem::new(),
        springs: SpringSystem::new(),
        clock: FrameClock::default(),
        frame: 0,
        render: RenderBuffers::default(),
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    }
}
