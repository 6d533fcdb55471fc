use serde::Serialize;

use crate::core::Vec2;
use crate::domain::error::{require_finite, require_positive, PhysicsResult};

/// Stable index of a body in the `RigidBodySystem` arena.
///
/// Bodies are never removed individually, so a handle stays valid until the
/// next `reset`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BodyHandle(pub(crate) u32);

impl BodyHandle {
    pub fn id(&self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Collision shape, in local coordinates centered on `pos`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    /// Treated as axis-aligned for overlap tests even when `angle != 0`.
    Rectangle { width: f32, height: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Rectangle,
}

impl Shape {
    pub fn circle(radius: f32) -> PhysicsResult<Self> {
        Ok(Shape::Circle { radius: require_positive("radius", radius)? })
    }

    pub fn rectangle(width: f32, height: f32) -> PhysicsResult<Self> {
        Ok(Shape::Rectangle {
            width: require_positive("width", width)?,
            height: require_positive("height", height)?,
        })
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle { .. } => ShapeKind::Circle,
            Shape::Rectangle { .. } => ShapeKind::Rectangle,
        }
    }

    /// Half-extents of the axis-aligned bounding box.
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        match *self {
            Shape::Circle { radius } => Vec2::new(radius, radius),
            Shape::Rectangle { width, height } => Vec2::new(width * 0.5, height * 0.5),
        }
    }

    /// Moment of inertia for a body of `mass` with this shape.
    ///
    /// Rectangles use `m * (hw² + hh²) / 6`; circles never rotate, but get
    /// the solid-disc value so the field is meaningful.
    pub fn moment_of_inertia(&self, mass: f32) -> f32 {
        match *self {
            Shape::Circle { radius } => 0.5 * mass * radius * radius,
            Shape::Rectangle { .. } => {
                let h = self.half_extents();
                mass * (h.x * h.x + h.y * h.y) / 6.0
            }
        }
    }
}

/// Rigid Body - one simulated circle or rectangle
#[derive(Clone, Debug)]
pub struct RigidBody {
    // === Physics State ===
    /// World position (center of mass)
    pub pos: Vec2,
    /// Velocity vector (world units per second)
    pub velocity: Vec2,
    /// Rotation angle (radians). Only rectangles integrate it.
    pub angle: f32,
    /// Angular velocity (radians per second)
    pub angular_vel: f32,

    // === Per-step accumulators ===
    /// Linear acceleration gathered from gravity and springs, cleared by the integrator
    pub acceleration: Vec2,
    /// Angular acceleration gathered from contact torques, cleared by the integrator
    pub angular_acceleration: f32,

    // === Mass properties ===
    pub mass: f32,
    /// 0 for static bodies
    pub inv_mass: f32,
    pub moment_of_inertia: f32,
    /// Infinite effective mass: never integrates, never receives impulses
    pub is_static: bool,

    pub shape: Shape,
}

impl RigidBody {
    fn with_shape(pos: Vec2, shape: Shape, mass: f32, is_static: bool) -> PhysicsResult<Self> {
        let pos = require_finite("position", pos)?;
        let inv_mass = if is_static { 0.0 } else { 1.0 / mass };
        Ok(Self {
            pos,
            velocity: Vec2::zero(),
            angle: 0.0,
            angular_vel: 0.0,
            acceleration: Vec2::zero(),
            angular_acceleration: 0.0,
            mass,
            inv_mass,
            moment_of_inertia: shape.moment_of_inertia(mass),
            is_static,
            shape,
        })
    }

    /// Create a dynamic circular body
    pub fn new_circle(pos: Vec2, radius: f32, mass: f32) -> PhysicsResult<Self> {
        let shape = Shape::circle(radius)?;
        let mass = require_positive("mass", mass)?;
        Self::with_shape(pos, shape, mass, false)
    }

    /// Create a dynamic rectangular body
    pub fn new_rect(pos: Vec2, width: f32, height: f32, mass: f32) -> PhysicsResult<Self> {
        let shape = Shape::rectangle(width, height)?;
        let mass = require_positive("mass", mass)?;
        Self::with_shape(pos, shape, mass, false)
    }

    /// Create a static (immovable) body. Mass is irrelevant and stored as 0.
    pub fn new_static(pos: Vec2, shape: Shape) -> PhysicsResult<Self> {
        Self::with_shape(pos, shape, 0.0, true)
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.shape.half_extents()
    }

    #[inline]
    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Toggle the static flag. A static body can only become dynamic
    /// again if it carries a positive mass.
    pub fn set_static(&mut self, is_static: bool) -> PhysicsResult<()> {
        if is_static {
            self.inv_mass = 0.0;
            self.velocity = Vec2::zero();
            self.angular_vel = 0.0;
        } else {
            let mass = require_positive("mass", self.mass)?;
            self.inv_mass = 1.0 / mass;
        }
        self.is_static = is_static;
        self.clear_accumulators();
        Ok(())
    }

    /// Apply an instantaneous impulse at the center of mass
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        self.velocity += impulse * self.inv_mass;
    }

    /// Accumulate a force for the next integration (a += F / m)
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force * self.inv_mass;
    }

    /// Accumulate torque for the next integration (α += τ / I)
    pub fn apply_torque(&mut self, torque: f32) {
        if self.is_static || self.moment_of_inertia <= 0.0 {
            return;
        }
        self.angular_acceleration += torque / self.moment_of_inertia;
    }

    /// Move the body directly, bypassing integration. Used by drag interaction.
    pub fn teleport(&mut self, pos: Vec2) {
        self.pos = pos;
        self.velocity = Vec2::zero();
        self.angular_vel = 0.0;
    }

    pub fn clear_accumulators(&mut self) {
        self.acceleration = Vec2::zero();
        self.angular_acceleration = 0.0;
    }
}
