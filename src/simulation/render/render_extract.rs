use serde::Serialize;

use crate::domain::params::SimParams;
use crate::rigid_body::{RigidBody, Shape, ShapeKind};
use crate::spring::Spring;

use super::WorldCore;

/// f32 values per body in the body transfer buffer:
/// `[x, y, angle, vx, vy, kind, a, b]`.
pub const BODY_STRIDE: usize = 8;
/// f32 values per spring in the spring transfer buffer: `[x1, y1, x2, y2]`.
pub const SPRING_STRIDE: usize = 4;

pub const KIND_CIRCLE: f32 = 0.0;
pub const KIND_RECTANGLE: f32 = 1.0;

/// Packed buffers JS reads through raw pointers into wasm memory.
#[derive(Debug, Default)]
pub(crate) struct RenderBuffers {
    pub(crate) bodies: Vec<f32>,
    pub(crate) springs: Vec<f32>,
}

impl RenderBuffers {
    pub(crate) fn clear(&mut self) {
        self.bodies.clear();
        self.springs.clear();
    }
}

fn pack_body(body: &RigidBody, out: &mut Vec<f32>) {
    let (kind, a, b) = match body.shape {
        Shape::Circle { radius } => (KIND_CIRCLE, radius, 0.0),
        Shape::Rectangle { width, height } => (KIND_RECTANGLE, width, height),
    };
    out.extend_from_slice(&[
        body.pos.x,
        body.pos.y,
        body.angle,
        body.velocity.x,
        body.velocity.y,
        kind,
        a,
        b,
    ]);
}

/// Refill the body buffer and return its pointer. Length is
/// `bodies_len()` floats.
pub(super) fn extract_bodies(world: &mut WorldCore) -> *const f32 {
    let buf = &mut world.render.bodies;
    buf.clear();
    buf.reserve(world.rigid_bodies.body_count() * BODY_STRIDE);
    for body in world.rigid_bodies.as_slice() {
        pack_body(body, buf);
    }
    buf.as_ptr()
}

/// Refill the spring buffer from the endpoints recorded by the last step.
pub(super) fn extract_springs(world: &mut WorldCore) -> *const f32 {
    let buf = &mut world.render.springs;
    buf.clear();
    buf.reserve(world.springs.spring_count() * SPRING_STRIDE);
    for (_, spring) in world.springs.iter() {
        let [p1, p2] = spring.endpoints;
        buf.extend_from_slice(&[p1.x, p1.y, p2.x, p2.y]);
    }
    buf.as_ptr()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BodySnapshot {
    id: u32,
    kind: ShapeKind,
    x: f32,
    y: f32,
    angle: f32,
    vx: f32,
    vy: f32,
    angular_velocity: f32,
    mass: f32,
    is_static: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<f32>,
}

impl BodySnapshot {
    fn new(id: u32, body: &RigidBody) -> Self {
        let (radius, width, height) = match body.shape {
            Shape::Circle { radius } => (Some(radius), None, None),
            Shape::Rectangle { width, height } => (None, Some(width), Some(height)),
        };
        Self {
            id,
            kind: body.kind(),
            x: body.pos.x,
            y: body.pos.y,
            angle: body.angle,
            vx: body.velocity.x,
            vy: body.velocity.y,
            angular_velocity: body.angular_vel,
            mass: body.mass,
            is_static: body.is_static,
            radius,
            width,
            height,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpringSnapshot {
    id: u32,
    anchor1: u32,
    anchor2: u32,
    rest_length: f32,
    stiffness: f32,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl SpringSnapshot {
    fn new(id: u32, spring: &Spring) -> Self {
        let [p1, p2] = spring.endpoints;
        Self {
            id,
            anchor1: spring.anchor1.id(),
            anchor2: spring.anchor2.id(),
            rest_length: spring.rest_length(),
            stiffness: spring.stiffness,
            x1: p1.x,
            y1: p1.y,
            x2: p2.x,
            y2: p2.y,
        }
    }
}

#[derive(Serialize)]
struct WorldSnapshot<'a> {
    frame: u64,
    params: &'a SimParams,
    bodies: Vec<BodySnapshot>,
    springs: Vec<SpringSnapshot>,
}

/// Whole-world state as JSON, for debugging and host-side persistence.
pub(super) fn snapshot_json(world: &WorldCore) -> String {
    let snapshot = WorldSnapshot {
        frame: world.frame,
        params: &world.params,
        bodies: world
            .rigid_bodies
            .iter()
            .map(|(h, b)| BodySnapshot::new(h.id(), b))
            .collect(),
        springs: world
            .springs
            .iter()
            .map(|(h, s)| SpringSnapshot::new(h.id(), s))
            .collect(),
    };
    serde_json::to_string(&snapshot).unwrap_or_else(|_| "{}".to_string())
}
