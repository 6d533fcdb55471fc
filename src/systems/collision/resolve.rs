use crate::domain::params::SimParams;
use crate::rigid_body::{RigidBody, ShapeKind};

use super::detect::{Contact, PairKind};

/// Apply the impulse and positional correction for one contact.
///
/// The impulse is skipped when the bodies already separate along the
/// normal. Positional correction runs regardless, so an interpenetrating
/// but separating pair is still pushed apart.
///
/// Returns true if an impulse was applied.
pub fn resolve_contact(
    a: &mut RigidBody,
    b: &mut RigidBody,
    contact: &Contact,
    params: &SimParams,
) -> bool {
    let applied = apply_impulse(a, b, contact, params);
    correct_positions(a, b, contact);
    applied
}

fn apply_impulse(a: &mut RigidBody, b: &mut RigidBody, contact: &Contact, params: &SimParams) -> bool {
    let n = contact.normal;
    let rel_vel = b.velocity - a.velocity;
    let vel_along_normal = rel_vel.dot(n);
    if vel_along_normal > 0.0 {
        return false;
    }

    let inv_mass_sum = a.inv_mass + b.inv_mass;
    if inv_mass_sum <= 0.0 {
        return false;
    }

    let j = -(1.0 + params.elasticity) * vel_along_normal / inv_mass_sum;
    let impulse = n * j;

    a.apply_impulse(-impulse);
    b.apply_impulse(impulse);

    if contact.kind == PairKind::CircleBox {
        spin_box(a, -impulse, contact);
        spin_box(b, impulse, contact);
    }
    true
}

/// Torque from a circle hitting a box: r × J about the box center.
fn spin_box(body: &mut RigidBody, impulse: crate::core::Vec2, contact: &Contact) {
    if body.is_static || body.kind() != ShapeKind::Rectangle {
        return;
    }
    let r = contact.point - body.pos;
    body.apply_torque(r.cross(impulse));
}

fn correct_positions(a: &mut RigidBody, b: &mut RigidBody, contact: &Contact) {
    let separation = contact.normal * (contact.depth * contact.kind.correction_share());
    if !a.is_static {
        a.pos -= separation;
    }
    if !b.is_static {
        b.pos += separation;
    }
}
