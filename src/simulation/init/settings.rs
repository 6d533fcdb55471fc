use tracing::{debug, warn};

use crate::domain::error::PhysicsResult;
use crate::domain::params::{ParamName, SimParams, WorldBounds};

use super::perf_stats::PerfStats;
use super::WorldCore;

pub(super) fn enable_perf_metrics(world: &mut WorldCore, enabled: bool) {
    world.perf_enabled = enabled;
    if !enabled {
        world.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(world: &WorldCore) -> PerfStats {
    world.perf_stats.clone()
}

/// Store one parameter. `springStiffness` is also broadcast to every
/// existing spring.
pub(super) fn set_param(world: &mut WorldCore, name: ParamName, value: f32) -> PhysicsResult<()> {
    if let Err(err) = world.params.set(name, value) {
        warn!(param = name.as_str(), value, %err, "parameter rejected");
        return Err(err);
    }
    if name == ParamName::SpringStiffness {
        world.springs.set_stiffness(value);
    }
    debug!(param = name.as_str(), value, "parameter set");
    Ok(())
}

pub(super) fn set_parameter(world: &mut WorldCore, name: &str, value: f32) -> PhysicsResult<()> {
    let name = name.parse::<ParamName>().inspect_err(|err| {
        warn!(%err, "parameter rejected");
    })?;
    set_param(world, name, value)
}

pub(super) fn get_parameter(world: &WorldCore, name: &str) -> PhysicsResult<f32> {
    Ok(world.params.get(name.parse()?))
}

pub(super) fn params_json(world: &WorldCore) -> String {
    world.params.to_json()
}

/// Replace all parameters from JSON. Either every value is applied or none.
pub(super) fn load_params_json(world: &mut WorldCore, json: &str) -> PhysicsResult<()> {
    let params = SimParams::from_json(json).inspect_err(|err| {
        warn!(%err, "params json rejected");
    })?;
    let stiffness_changed = params.spring_stiffness != world.params.spring_stiffness;
    world.params = params;
    if stiffness_changed {
        world.springs.set_stiffness(params.spring_stiffness);
    }
    debug!(json, "params loaded");
    Ok(())
}

pub(super) fn set_bounds(world: &mut WorldCore, left: f32, right: f32, bottom: f32, top: f32) -> PhysicsResult<()> {
    world.bounds = WorldBounds::new(left, right, bottom, top)?;
    debug!(left, right, bottom, top, "bounds set");
    Ok(())
}
