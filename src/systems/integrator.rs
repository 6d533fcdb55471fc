//! Semi-implicit Euler integration for a single body.

use crate::domain::params::SimParams;
use crate::rigid_body::{RigidBody, ShapeKind};

/// Advance one body by `dt` seconds using its accumulated acceleration.
///
/// Velocity is updated first and then used to move the body. Rectangles
/// advance their angle with the *previous* angular velocity before the
/// angular acceleration is applied. Both linear and angular velocity are
/// damped by `1 - friction * 0.1` every step, in or out of contact.
/// Accumulators are cleared afterwards, static bodies included.
pub fn integrate(body: &mut RigidBody, dt: f32, params: &SimParams) {
    if body.is_static {
        body.clear_accumulators();
        return;
    }

    let damping = params.damping_factor();

    body.velocity += body.acceleration * dt;
    body.velocity *= damping;
    body.pos += body.velocity * dt;

    if body.kind() == ShapeKind::Rectangle {
        body.angle += body.angular_vel * dt;
        body.angular_vel += body.angular_acceleration * dt;
        body.angular_vel *= damping;
    }

    body.clear_accumulators();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Vec2;
    use crate::rigid_body::Shape;

    fn frictionless() -> SimParams {
        SimParams { friction: 0.0, ..SimParams::default() }
    }

    #[test]
    fn velocity_is_updated_before_position() {
        let mut body = RigidBody::new_circle(Vec2::zero(), 0.5, 1.0).unwrap();
        body.acceleration = Vec2::new(0.0, -10.0);

        integrate(&mut body, 0.1, &frictionless());
        assert!((body.velocity.y + 1.0).abs() < 1e-6);
        assert!((body.pos.y + 0.1).abs() < 1e-6);
        assert_eq!(body.acceleration, Vec2::zero());
    }

    #[test]
    fn zero_force_without_friction_preserves_velocity() {
        let mut body = RigidBody::new_circle(Vec2::zero(), 0.5, 1.0).unwrap();
        body.velocity = Vec2::new(1.25, -0.5);
        for _ in 0..100 {
            integrate(&mut body, 0.016, &frictionless());
        }
        assert_eq!(body.velocity, Vec2::new(1.25, -0.5));
    }

    #[test]
    fn friction_damps_linear_and_angular_velocity() {
        let params = SimParams { friction: 0.5, ..SimParams::default() };
        let mut body = RigidBody::new_rect(Vec2::zero(), 1.0, 1.0, 1.0).unwrap();
        body.velocity = Vec2::new(2.0, 0.0);
        body.angular_vel = 1.0;

        integrate(&mut body, 0.01, &params);
        assert!((body.velocity.x - 1.9).abs() < 1e-6);
        assert!((body.angular_vel - 0.95).abs() < 1e-6);
    }

    #[test]
    fn rectangle_angle_uses_previous_angular_velocity() {
        let mut body = RigidBody::new_rect(Vec2::zero(), 1.0, 1.0, 1.0).unwrap();
        body.angular_vel = 2.0;
        body.angular_acceleration = 10.0;

        integrate(&mut body, 0.1, &frictionless());
        assert!((body.angle - 0.2).abs() < 1e-6);
        assert!((body.angular_vel - 3.0).abs() < 1e-6);
        assert_eq!(body.angular_acceleration, 0.0);
    }

    #[test]
    fn circles_do_not_rotate() {
        let mut body = RigidBody::new_circle(Vec2::zero(), 0.5, 1.0).unwrap();
        body.angular_vel = 2.0;
        integrate(&mut body, 0.1, &frictionless());
        assert_eq!(body.angle, 0.0);
    }

    #[test]
    fn static_bodies_do_not_move_but_clear_accumulators() {
        let mut body = RigidBody::new_static(Vec2::new(1.0, 1.0), Shape::Circle { radius: 0.3 }).unwrap();
        body.acceleration = Vec2::new(0.0, -9.8);
        integrate(&mut body, 0.05, &SimParams::default());
        assert_eq!(body.pos, Vec2::new(1.0, 1.0));
        assert_eq!(body.acceleration, Vec2::zero());
    }
}
