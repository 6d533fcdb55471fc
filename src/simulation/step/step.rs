#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::trace;

use crate::domain::params::{SimParams, WorldBounds};
use crate::rigid_body::RigidBody;
use crate::systems::boundary::resolve_boundary;
use crate::systems::collision::resolve_collisions;
use crate::systems::integrator::integrate;

use super::perf_timer::{timed, PerfTimer};
use super::WorldCore;

/// Clamp a host-supplied dt into `[0, max_dt]`. NaN counts as zero.
pub(super) fn clamp_dt(dt: f32, max_dt: f32) -> f32 {
    if dt.is_nan() || dt <= 0.0 {
        0.0
    } else {
        dt.min(max_dt)
    }
}

/// One fixed-order step: gravity, springs, integrate + walls, pairwise
/// contacts, spring endpoints. Later stages read positions written by
/// earlier ones, so the order must not change.
pub(super) fn step(world: &mut WorldCore, dt: f32) {
    let dt = clamp_dt(dt, world.params.max_dt);
    let perf_on = world.perf_enabled;
    if perf_on {
        world.perf_stats.reset();
        world.perf_stats.bodies = world.rigid_bodies.body_count() as u32;
        world.perf_stats.springs = world.springs.spring_count() as u32;
    }
    let step_start = if perf_on { Some(PerfTimer::start()) } else { None };

    // === FORCES ===
    // Gravity overwrites vertical acceleration; springs add on top of it.
    let (skipped, forces_ms) = timed(perf_on, || {
        world.rigid_bodies.apply_gravity(world.params.gravity);
        world.springs.apply_forces(&mut world.rigid_bodies)
    });

    // === INTEGRATE + WORLD BOUNDS ===
    let params = world.params;
    let bounds = world.bounds;
    let (wall_hits, integrate_ms) = timed(perf_on, || {
        integrate_all(world.rigid_bodies.as_mut_slice(), dt, &params, &bounds)
    });

    // === PAIRWISE CONTACTS ===
    let (stats, collisions_ms) = timed(perf_on, || {
        resolve_collisions(world.rigid_bodies.as_mut_slice(), &params)
    });

    world.springs.update_endpoints(&world.rigid_bodies);
    world.frame = world.frame.wrapping_add(1);

    trace!(
        frame = world.frame,
        dt,
        contacts = stats.contacts,
        impulses = stats.impulses,
        "step"
    );

    if let Some(t0) = step_start {
        let perf = &mut world.perf_stats;
        perf.forces_ms = forces_ms;
        perf.integrate_ms = integrate_ms;
        perf.collisions_ms = collisions_ms;
        perf.springs_skipped = skipped;
        perf.wall_contacts = wall_hits;
        perf.pairs_tested = stats.pairs_tested;
        perf.contacts = stats.contacts;
        perf.impulses = stats.impulses;
        perf.step_ms = t0.elapsed_ms();
    }
}

/// Integrate every body and keep it inside the world. Each body is only
/// written by its own iteration, so the parallel pass needs no locking.
fn integrate_all(bodies: &mut [RigidBody], dt: f32, params: &SimParams, bounds: &WorldBounds) -> u32 {
    let advance = |body: &mut RigidBody| -> u32 {
        integrate(body, dt, params);
        u32::from(resolve_boundary(body, bounds, params))
    };

    #[cfg(feature = "parallel")]
    {
        bodies.par_iter_mut().map(advance).sum()
    }
    #[cfg(not(feature = "parallel"))]
    {
        bodies.iter_mut().map(advance).sum()
    }
}
