//! Boundary resolver: keeps bodies inside the fixed world rectangle.

use crate::domain::params::{SimParams, WorldBounds};
use crate::rigid_body::{RigidBody, ShapeKind};

/// Clamp a dynamic body into `bounds`, reflecting the velocity component
/// that hit a wall (scaled by elasticity). Floor contact additionally
/// applies ground friction to horizontal velocity and, for rectangles, to
/// angular velocity. Static bodies are never touched.
///
/// Returns true if any wall was hit.
pub fn resolve_boundary(body: &mut RigidBody, bounds: &WorldBounds, params: &SimParams) -> bool {
    if body.is_static {
        return false;
    }

    let half = body.half_extents();
    let e = params.elasticity;
    let mut hit = false;

    if body.pos.x - half.x < bounds.left {
        body.pos.x = bounds.left + half.x;
        body.velocity.x = -body.velocity.x * e;
        hit = true;
    } else if body.pos.x + half.x > bounds.right {
        body.pos.x = bounds.right - half.x;
        body.velocity.x = -body.velocity.x * e;
        hit = true;
    }

    if body.pos.y - half.y < bounds.bottom {
        body.pos.y = bounds.bottom + half.y;
        body.velocity.y = -body.velocity.y * e;

        // Ground friction only on the floor
        let grip = 1.0 - params.friction;
        body.velocity.x *= grip;
        if body.kind() == ShapeKind::Rectangle {
            body.angular_vel *= grip;
        }
        hit = true;
    } else if body.pos.y + half.y > bounds.top {
        body.pos.y = bounds.top - half.y;
        body.velocity.y = -body.velocity.y * e;
        hit = true;
    }

    hit
}
