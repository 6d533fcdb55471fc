use crate::core::Vec2;
use crate::rigid_body::{RigidBody, Shape};

/// Which narrow-phase routine produced a contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairKind {
    CircleCircle,
    CircleBox,
    BoxBox,
}

impl PairKind {
    /// Fraction of the penetration depth each body is moved back by.
    pub fn correction_share(&self) -> f32 {
        match self {
            PairKind::CircleCircle | PairKind::BoxBox => 0.5,
            PairKind::CircleBox => 1.0,
        }
    }
}

/// Narrow-phase result for an ordered pair (body1, body2).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from body1 toward body2
    pub normal: Vec2,
    /// Penetration depth along `normal` (> 0)
    pub depth: f32,
    /// World-space contact point (closest box point for circle/box pairs)
    pub point: Vec2,
    pub kind: PairKind,
}

impl Contact {
    fn flipped(self) -> Self {
        Self { normal: -self.normal, ..self }
    }
}

/// Dispatch on the shape pair. Rectangle/circle pairs reuse the
/// circle/box routine with the bodies swapped and the normal flipped back.
pub fn detect(a: &RigidBody, b: &RigidBody) -> Option<Contact> {
    match (a.shape, b.shape) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            circle_circle(a.pos, ra, b.pos, rb)
        }
        (Shape::Circle { radius }, Shape::Rectangle { .. }) => {
            circle_box(a.pos, radius, b.pos, b.half_extents())
        }
        (Shape::Rectangle { .. }, Shape::Circle { radius }) => {
            circle_box(b.pos, radius, a.pos, a.half_extents()).map(Contact::flipped)
        }
        (Shape::Rectangle { .. }, Shape::Rectangle { .. }) => {
            box_box(a.pos, a.half_extents(), b.pos, b.half_extents())
        }
    }
}

/// Colliding iff the center distance is strictly less than `r1 + r2`.
/// Coincident centers have no defined normal and are skipped.
pub fn circle_circle(p1: Vec2, r1: f32, p2: Vec2, r2: f32) -> Option<Contact> {
    let delta = p2 - p1;
    let sum_r = r1 + r2;
    let distance = delta.length();
    if distance >= sum_r {
        return None;
    }

    let normal = delta.try_normalize()?;
    Some(Contact {
        normal,
        depth: sum_r - distance,
        point: p1 + normal * r1,
        kind: PairKind::CircleCircle,
    })
}

/// Circle against an axis-aligned box given by center and half-extents.
/// The normal points from the circle toward the box.
pub fn circle_box(center: Vec2, radius: f32, box_pos: Vec2, half: Vec2) -> Option<Contact> {
    let closest = center.clamp(box_pos - half, box_pos + half);
    let delta = closest - center;
    let distance = delta.length();
    if distance >= radius {
        return None;
    }

    if let Some(normal) = delta.try_normalize() {
        return Some(Contact {
            normal,
            depth: radius - distance,
            point: closest,
            kind: PairKind::CircleBox,
        });
    }

    // Center is inside the box: exit through the nearest face.
    let x_dist = (center.x - (box_pos.x - half.x))
        .abs()
        .min((center.x - (box_pos.x + half.x)).abs());
    let y_dist = (center.y - (box_pos.y - half.y))
        .abs()
        .min((center.y - (box_pos.y + half.y)).abs());

    let (normal, face_dist) = if x_dist < y_dist {
        let nx = if center.x < box_pos.x { 1.0 } else { -1.0 };
        (Vec2::new(nx, 0.0), x_dist)
    } else {
        let ny = if center.y < box_pos.y { 1.0 } else { -1.0 };
        (Vec2::new(0.0, ny), y_dist)
    };

    Some(Contact {
        normal,
        depth: radius + face_dist,
        point: closest,
        kind: PairKind::CircleBox,
    })
}

/// AABB overlap test; orientation is ignored. Resolves along the axis of
/// minimum overlap (ties go to y).
pub fn box_box(p1: Vec2, h1: Vec2, p2: Vec2, h2: Vec2) -> Option<Contact> {
    let min_x = (p1.x - h1.x).max(p2.x - h2.x);
    let max_x = (p1.x + h1.x).min(p2.x + h2.x);
    let min_y = (p1.y - h1.y).max(p2.y - h2.y);
    let max_y = (p1.y + h1.y).min(p2.y + h2.y);

    let overlap_x = max_x - min_x;
    let overlap_y = max_y - min_y;
    if !(overlap_x > 0.0 && overlap_y > 0.0) {
        return None;
    }

    let (normal, depth) = if overlap_x < overlap_y {
        let nx = if p1.x < p2.x { 1.0 } else { -1.0 };
        (Vec2::new(nx, 0.0), overlap_x)
    } else {
        let ny = if p1.y < p2.y { 1.0 } else { -1.0 };
        (Vec2::new(0.0, ny), overlap_y)
    };

    Some(Contact {
        normal,
        depth,
        point: Vec2::new((min_x + max_x) * 0.5, (min_y + max_y) * 0.5),
        kind: PairKind::BoxBox,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_circles_do_not_collide() {
        assert!(circle_circle(Vec2::zero(), 1.0, Vec2::new(2.0, 0.0), 1.0).is_none());
        let c = circle_circle(Vec2::zero(), 1.0, Vec2::new(1.5, 0.0), 1.0).unwrap();
        assert_eq!(c.normal, Vec2::new(1.0, 0.0));
        assert!((c.depth - 0.5).abs() < 1e-6);
    }

    #[test]
    fn coincident_circles_are_skipped() {
        assert!(circle_circle(Vec2::new(1.0, 1.0), 1.0, Vec2::new(1.0, 1.0), 1.0).is_none());
    }

    #[test]
    fn circle_above_box_gets_downward_normal() {
        let c = circle_box(Vec2::new(0.0, 1.3), 0.5, Vec2::zero(), Vec2::new(1.0, 1.0)).unwrap();
        assert!((c.normal.y + 1.0).abs() < 1e-6);
        assert!((c.depth - 0.2).abs() < 1e-5);
        assert_eq!(c.point, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn circle_center_inside_box_exits_through_nearest_face() {
        // Closer to the right face (0.2) than top/bottom (1.0)
        let c = circle_box(Vec2::new(0.8, 0.0), 0.5, Vec2::zero(), Vec2::new(1.0, 1.0)).unwrap();
        assert_eq!(c.normal, Vec2::new(-1.0, 0.0));
        assert!((c.depth - 0.7).abs() < 1e-5);
    }

    #[test]
    fn box_box_resolves_along_minimum_overlap() {
        let c = box_box(Vec2::zero(), Vec2::new(1.0, 1.0), Vec2::new(1.5, 0.0), Vec2::new(1.0, 1.0))
            .unwrap();
        assert_eq!(c.normal, Vec2::new(1.0, 0.0));
        assert!((c.depth - 0.5).abs() < 1e-6);

        assert!(box_box(Vec2::zero(), Vec2::new(1.0, 1.0), Vec2::new(2.0, 0.0), Vec2::new(1.0, 1.0))
            .is_none());
    }

    #[test]
    fn mirrored_dispatch_keeps_body1_to_body2_normal() {
        let boxy = RigidBody::new_rect(Vec2::zero(), 2.0, 2.0, 1.0).unwrap();
        let ball = RigidBody::new_circle(Vec2::new(0.0, 1.3), 0.5, 1.0).unwrap();

        let forward = detect(&ball, &boxy).unwrap();
        let mirrored = detect(&boxy, &ball).unwrap();
        assert_eq!(forward.normal, -mirrored.normal);
        assert!(mirrored.normal.y > 0.0);
        assert_eq!(mirrored.kind, PairKind::CircleBox);
    }
}
