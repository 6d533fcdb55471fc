use serde::Serialize;
use tracing::{debug, warn};

use crate::core::Vec2;
use crate::domain::error::{
    require_finite, require_non_negative, require_positive, PhysicsError, PhysicsResult,
};
use crate::rigid_body::{BodyHandle, RigidBody, Shape};
use crate::spring::{Spring, SpringHandle};

use super::WorldCore;

// Host defaults for add operations when the caller omits a value.
pub const DEFAULT_SPAWN: Vec2 = Vec2::new(0.0, 5.0);
pub const DEFAULT_CIRCLE_RADIUS: f32 = 0.5;
pub const DEFAULT_BOX_SIZE: f32 = 1.0;
pub const DEFAULT_BODY_MASS: f32 = 1.0;
pub const DEFAULT_SPRING_ANCHORS: [Vec2; 2] = [Vec2::new(-2.0, 5.0), Vec2::new(2.0, 5.0)];
pub const SPRING_ANCHOR_RADIUS: f32 = 0.3;
pub const SPRING_ANCHOR_MASS: f32 = 1.0;
pub const DEFAULT_PENDULUM_PIVOT: Vec2 = Vec2::new(0.0, 8.0);
pub const DEFAULT_PENDULUM_LENGTH: f32 = 5.0;
pub const DEFAULT_PENDULUM_BOB_MASS: f32 = 2.0;
pub const PENDULUM_BOB_RADIUS: f32 = 0.5;
pub const PENDULUM_STIFFNESS: f32 = 0.8;
pub const MAX_CHAIN_LINKS: u32 = 256;
pub const DEFAULT_SOFT_BODY_ORIGIN: Vec2 = Vec2::new(-1.0, 6.0);
pub const DEFAULT_SOFT_BODY_SIDE: u32 = 5;
pub const DEFAULT_SOFT_BODY_SPACING: f32 = 0.5;
pub const DEFAULT_SOFT_BODY_MASS: f32 = 1.0;
/// Upper bound on lattice columns and rows.
pub const MAX_SOFT_BODY_SIDE: u32 = 32;

/// Result of `add_spring`: the spring and the two anchor circles it created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpringSpawn {
    pub spring: SpringHandle,
    pub anchor1: BodyHandle,
    pub anchor2: BodyHandle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pendulum {
    pub anchor: BodyHandle,
    pub bob: BodyHandle,
    pub spring: SpringHandle,
}

/// A static anchor followed by hanging links, consecutive ones joined by springs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpringChain {
    pub anchor: BodyHandle,
    pub links: Vec<BodyHandle>,
    pub springs: Vec<SpringHandle>,
}

/// Square-cell lattice of point masses with structural springs between
/// horizontal and vertical neighbours. `particles` is row-major with row 0
/// at `origin` and rows growing downward.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftBody {
    pub origin: Vec2,
    pub spacing: f32,
    pub cols: u32,
    pub rows: u32,
    pub particles: Vec<BodyHandle>,
    pub springs: Vec<SpringHandle>,
}

impl SoftBody {
    pub fn particle(&self, col: u32, row: u32) -> Option<BodyHandle> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.particles.get((row * self.cols + col) as usize).copied()
    }

    /// Ids as JSON for the host: `{origin, spacing, cols, rows, particles, springs}`.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

fn spawn(world: &mut WorldCore, body: RigidBody) -> BodyHandle {
    let (kind, is_static) = (body.kind(), body.is_static);
    let handle = world.rigid_bodies.add_body(body);
    debug!(id = handle.id(), ?kind, is_static, "spawned body");
    handle
}

fn log_rejected<T>(op: &'static str, result: PhysicsResult<T>) -> PhysicsResult<T> {
    if let Err(err) = &result {
        warn!(op, %err, "rejected");
    }
    result
}

pub(super) fn add_circle(world: &mut WorldCore, pos: Vec2, radius: f32, mass: f32) -> PhysicsResult<BodyHandle> {
    let body = log_rejected("add_circle", RigidBody::new_circle(pos, radius, mass))?;
    Ok(spawn(world, body))
}

pub(super) fn add_static_circle(world: &mut WorldCore, pos: Vec2, radius: f32) -> PhysicsResult<BodyHandle> {
    let body = log_rejected(
        "add_static_circle",
        Shape::circle(radius).and_then(|shape| RigidBody::new_static(pos, shape)),
    )?;
    Ok(spawn(world, body))
}

pub(super) fn add_rectangle(
    world: &mut WorldCore,
    pos: Vec2,
    width: f32,
    height: f32,
    mass: f32,
) -> PhysicsResult<BodyHandle> {
    let body = log_rejected("add_rectangle", RigidBody::new_rect(pos, width, height, mass))?;
    Ok(spawn(world, body))
}

pub(super) fn add_static_rectangle(
    world: &mut WorldCore,
    pos: Vec2,
    width: f32,
    height: f32,
) -> PhysicsResult<BodyHandle> {
    let body = log_rejected(
        "add_static_rectangle",
        Shape::rectangle(width, height).and_then(|shape| RigidBody::new_static(pos, shape)),
    )?;
    Ok(spawn(world, body))
}

/// Validate rest length and stiffness, filling defaults from the anchor
/// distance and the global stiffness parameter.
fn spring_settings(
    world: &WorldCore,
    distance: f32,
    rest_length: Option<f32>,
    stiffness: Option<f32>,
) -> PhysicsResult<(f32, f32)> {
    let rest = require_non_negative("restLength", rest_length.unwrap_or(distance))?;
    let k = require_non_negative(
        "stiffness",
        stiffness.unwrap_or(world.params.spring_stiffness),
    )?;
    Ok((rest, k))
}

fn attach(world: &mut WorldCore, spring: Spring) -> SpringHandle {
    let handle = world.springs.add(spring);
    world.springs.update_endpoints(&world.rigid_bodies);
    handle
}

/// Create two anchor circles and a spring between them. Nothing is
/// created if any argument is invalid.
pub(super) fn add_spring(
    world: &mut WorldCore,
    p1: Vec2,
    p2: Vec2,
    rest_length: Option<f32>,
    stiffness: Option<f32>,
) -> PhysicsResult<SpringSpawn> {
    let (a, b, rest, k) = log_rejected(
        "add_spring",
        spring_anchors(world, p1, p2, rest_length, stiffness),
    )?;

    let anchor1 = spawn(world, a);
    let anchor2 = spawn(world, b);
    let spring = attach(world, Spring::new(anchor1, anchor2, rest, k)?);
    debug!(spring = spring.id(), rest, stiffness = k, "spawned spring");

    Ok(SpringSpawn { spring, anchor1, anchor2 })
}

fn spring_anchors(
    world: &WorldCore,
    p1: Vec2,
    p2: Vec2,
    rest_length: Option<f32>,
    stiffness: Option<f32>,
) -> PhysicsResult<(RigidBody, RigidBody, f32, f32)> {
    let a = RigidBody::new_circle(p1, SPRING_ANCHOR_RADIUS, SPRING_ANCHOR_MASS)?;
    let b = RigidBody::new_circle(p2, SPRING_ANCHOR_RADIUS, SPRING_ANCHOR_MASS)?;
    let (rest, k) = spring_settings(world, p1.distance(p2), rest_length, stiffness)?;
    Ok((a, b, rest, k))
}

/// Join two existing bodies with a spring.
pub(super) fn connect(
    world: &mut WorldCore,
    a: BodyHandle,
    b: BodyHandle,
    rest_length: Option<f32>,
    stiffness: Option<f32>,
) -> PhysicsResult<SpringHandle> {
    let spring = log_rejected("connect", connecting_spring(world, a, b, rest_length, stiffness))?;
    Ok(attach(world, spring))
}

fn connecting_spring(
    world: &WorldCore,
    a: BodyHandle,
    b: BodyHandle,
    rest_length: Option<f32>,
    stiffness: Option<f32>,
) -> PhysicsResult<Spring> {
    let p1 = world.rigid_bodies.get(a)?.pos;
    let p2 = world.rigid_bodies.get(b)?.pos;
    if a == b {
        return Err(PhysicsError::invalid("anchor2", b.id() as f32));
    }
    let (rest, k) = spring_settings(world, p1.distance(p2), rest_length, stiffness)?;
    Spring::new(a, b, rest, k)
}

/// Static anchor at `pivot`, bob hanging `length` below it, spring at rest.
pub(super) fn add_pendulum(world: &mut WorldCore, pivot: Vec2, length: f32, bob_mass: f32) -> PhysicsResult<Pendulum> {
    let (length, anchor, bob) = log_rejected("add_pendulum", pendulum_bodies(pivot, length, bob_mass))?;

    let anchor = spawn(world, anchor);
    let bob = spawn(world, bob);
    let spring = attach(world, Spring::new(anchor, bob, length, PENDULUM_STIFFNESS)?);
    debug!(anchor = anchor.id(), bob = bob.id(), length, "spawned pendulum");

    Ok(Pendulum { anchor, bob, spring })
}

fn pendulum_bodies(pivot: Vec2, length: f32, bob_mass: f32) -> PhysicsResult<(f32, RigidBody, RigidBody)> {
    let length = require_positive("length", length)?;
    let bob = RigidBody::new_circle(
        Vec2::new(pivot.x, pivot.y - length),
        PENDULUM_BOB_RADIUS,
        bob_mass,
    )?;
    let anchor = RigidBody::new_static(pivot, Shape::circle(SPRING_ANCHOR_RADIUS)?)?;
    Ok((length, anchor, bob))
}

/// Rope of `links` circles hanging straight down from a static anchor.
pub(super) fn add_spring_chain(
    world: &mut WorldCore,
    anchor: Vec2,
    links: u32,
    link_length: f32,
    link_mass: f32,
) -> PhysicsResult<SpringChain> {
    let (link_length, link_mass) = log_rejected(
        "add_spring_chain",
        chain_settings(anchor, links, link_length, link_mass),
    )?;
    let k = world.params.spring_stiffness;

    // Neighbouring links must not start out overlapping.
    let radius = (link_length * 0.25).min(SPRING_ANCHOR_RADIUS);
    let top = spawn(world, RigidBody::new_static(anchor, Shape::circle(radius)?)?);

    let mut chain = SpringChain {
        anchor: top,
        links: Vec::with_capacity(links as usize),
        springs: Vec::with_capacity(links as usize),
    };
    let mut prev = top;
    for i in 1..=links {
        let pos = Vec2::new(anchor.x, anchor.y - link_length * i as f32);
        let link = spawn(world, RigidBody::new_circle(pos, radius, link_mass)?);
        let spring = attach(world, Spring::new(prev, link, link_length, k)?);
        chain.links.push(link);
        chain.springs.push(spring);
        prev = link;
    }
    debug!(links, link_length, "spawned spring chain");

    Ok(chain)
}

/// Checks every chain argument before anything is spawned, including the
/// position of the lowest link.
fn chain_settings(anchor: Vec2, links: u32, link_length: f32, link_mass: f32) -> PhysicsResult<(f32, f32)> {
    if links == 0 || links > MAX_CHAIN_LINKS {
        return Err(PhysicsError::invalid("links", links as f32));
    }
    let link_length = require_positive("linkLength", link_length)?;
    let link_mass = require_positive("linkMass", link_mass)?;
    require_finite("position", anchor)?;
    require_finite(
        "position",
        Vec2::new(anchor.x, anchor.y - link_length * links as f32),
    )?;
    Ok((link_length, link_mass))
}

/// `cols` x `rows` lattice of circles at `origin`, neighbours `spacing`
/// apart and joined by springs at rest. Stiffness defaults to the global
/// spring stiffness.
pub(super) fn add_soft_body(
    world: &mut WorldCore,
    origin: Vec2,
    cols: u32,
    rows: u32,
    spacing: f32,
    mass: f32,
    stiffness: Option<f32>,
) -> PhysicsResult<SoftBody> {
    let (spacing, k) = log_rejected(
        "add_soft_body",
        lattice_settings(world, origin, cols, rows, spacing, mass, stiffness),
    )?;
    let radius = (spacing * 0.25).min(SPRING_ANCHOR_RADIUS);

    let mut particles = Vec::with_capacity((cols * rows) as usize);
    for row in 0..rows {
        for col in 0..cols {
            let pos = origin + Vec2::new(col as f32 * spacing, -(row as f32) * spacing);
            particles.push(spawn(world, RigidBody::new_circle(pos, radius, mass)?));
        }
    }

    let at = |col: u32, row: u32| particles[(row * cols + col) as usize];
    let mut springs = Vec::with_capacity((rows * (cols - 1) + cols * (rows - 1)) as usize);
    for row in 0..rows {
        for col in 0..cols {
            if col + 1 < cols {
                let spring = Spring::new(at(col, row), at(col + 1, row), spacing, k)?;
                springs.push(world.springs.add(spring));
            }
            if row + 1 < rows {
                let spring = Spring::new(at(col, row), at(col, row + 1), spacing, k)?;
                springs.push(world.springs.add(spring));
            }
        }
    }
    world.springs.update_endpoints(&world.rigid_bodies);
    debug!(cols, rows, spacing, springs = springs.len(), "spawned soft body");

    Ok(SoftBody { origin, spacing, cols, rows, particles, springs })
}

fn lattice_settings(
    world: &WorldCore,
    origin: Vec2,
    cols: u32,
    rows: u32,
    spacing: f32,
    mass: f32,
    stiffness: Option<f32>,
) -> PhysicsResult<(f32, f32)> {
    for (name, side) in [("cols", cols), ("rows", rows)] {
        if !(2..=MAX_SOFT_BODY_SIDE).contains(&side) {
            return Err(PhysicsError::invalid(name, side as f32));
        }
    }
    let spacing = require_positive("spacing", spacing)?;
    require_positive("mass", mass)?;
    require_finite("position", origin)?;
    require_finite(
        "position",
        origin + Vec2::new((cols - 1) as f32 * spacing, -((rows - 1) as f32) * spacing),
    )?;
    let (_, k) = spring_settings(world, spacing, None, stiffness)?;
    Ok((spacing, k))
}

pub(super) fn reset(world: &mut WorldCore) {
    world.rigid_bodies.clear();
    world.springs.clear();
    world.clock.reset();
    world.frame = 0;
    world.render.clear();
    debug!("world reset");
}

pub(super) fn set_static(world: &mut WorldCore, handle: BodyHandle, is_static: bool) -> PhysicsResult<()> {
    let result = world
        .rigid_bodies
        .get_mut(handle)
        .and_then(|body| body.set_static(is_static));
    log_rejected("set_static", result)
}

/// Drag override: place the body and zero its velocity. Only valid
/// between steps.
pub(super) fn drag_body(world: &mut WorldCore, handle: BodyHandle, pos: Vec2) -> PhysicsResult<()> {
    let pos = log_rejected("drag_body", require_finite("position", pos))?;
    let body = log_rejected("drag_body", world.rigid_bodies.get_mut(handle))?;
    body.teleport(pos);
    world.springs.update_endpoints(&world.rigid_bodies);
    Ok(())
}

pub(super) fn apply_impulse(world: &mut WorldCore, handle: BodyHandle, impulse: Vec2) -> PhysicsResult<()> {
    let impulse = log_rejected("apply_impulse", require_finite("impulse", impulse))?;
    let body = log_rejected("apply_impulse", world.rigid_bodies.get_mut(handle))?;
    body.apply_impulse(impulse);
    Ok(())
}

/// Starter scene: a ball, a crate and a pendulum.
pub(super) fn populate_demo_scene(world: &mut WorldCore) -> PhysicsResult<()> {
    add_circle(world, Vec2::new(-3.0, 5.0), DEFAULT_CIRCLE_RADIUS, DEFAULT_BODY_MASS)?;
    add_rectangle(
        world,
        Vec2::new(3.0, 5.0),
        DEFAULT_BOX_SIZE,
        DEFAULT_BOX_SIZE,
        DEFAULT_BODY_MASS,
    )?;
    add_pendulum(
        world,
        DEFAULT_PENDULUM_PIVOT,
        DEFAULT_PENDULUM_LENGTH,
        DEFAULT_PENDULUM_BOB_MASS,
    )?;
    Ok(())
}
