//! RigidBody - circles and rectangles that move as a unit
//!
//! A body is a plain data holder: the integrator, boundary resolver and
//! collision systems mutate it in place during a step.

mod body;

pub use body::{BodyHandle, RigidBody, Shape, ShapeKind};
