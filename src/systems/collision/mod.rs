//! Pairwise narrow-phase collision detection and impulse resolution
//!
//! Every unordered pair `(i, j)`, `i < j`, is tested once per step in
//! index order. There is no broad phase and no solver iteration: each
//! contact gets one impulse and one positional correction.

mod detect;
mod resolve;

pub use detect::{box_box, circle_box, circle_circle, detect, Contact, PairKind};
pub use resolve::resolve_contact;

use crate::domain::params::SimParams;
use crate::rigid_body::RigidBody;

/// Counters from one collision pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionStats {
    pub pairs_tested: u32,
    pub contacts: u32,
    pub impulses: u32,
}

/// Resolve all pairwise contacts in place. Pairs where both bodies are
/// static are skipped.
pub fn resolve_collisions(bodies: &mut [RigidBody], params: &SimParams) -> CollisionStats {
    let mut stats = CollisionStats::default();
    let n = bodies.len();

    for i in 0..n {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if a.is_static && b.is_static {
                continue;
            }
            stats.pairs_tested += 1;

            let Some(contact) = detect(a, b) else {
                continue;
            };
            stats.contacts += 1;
            if resolve_contact(a, b, &contact, params) {
                stats.impulses += 1;
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Vec2;
    use crate::rigid_body::Shape;

    #[test]
    fn static_pairs_are_skipped() {
        let mut bodies = vec![
            RigidBody::new_static(Vec2::zero(), Shape::Circle { radius: 1.0 }).unwrap(),
            RigidBody::new_static(Vec2::new(0.5, 0.0), Shape::Circle { radius: 1.0 }).unwrap(),
        ];
        let stats = resolve_collisions(&mut bodies, &SimParams::default());
        assert_eq!(stats.pairs_tested, 0);
        assert_eq!(bodies[1].pos, Vec2::new(0.5, 0.0));
    }

    #[test]
    fn every_unordered_pair_is_tested_once() {
        let mut bodies: Vec<RigidBody> = (0..4)
            .map(|i| RigidBody::new_circle(Vec2::new(i as f32 * 10.0, 0.0), 0.5, 1.0).unwrap())
            .collect();
        let stats = resolve_collisions(&mut bodies, &SimParams::default());
        assert_eq!(stats.pairs_tested, 6);
        assert_eq!(stats.contacts, 0);
    }

    #[test]
    fn corrected_circles_no_longer_penetrate() {
        let mut bodies = vec![
            RigidBody::new_circle(Vec2::new(0.0, 0.0), 0.5, 1.0).unwrap(),
            RigidBody::new_circle(Vec2::new(0.3, 0.4), 0.7, 3.0).unwrap(),
        ];
        bodies[0].velocity = Vec2::new(1.0, 1.0);

        let stats = resolve_collisions(&mut bodies, &SimParams::default());
        assert_eq!(stats.contacts, 1);

        let gap = bodies[0].pos.distance(bodies[1].pos);
        assert!(gap >= 1.2 - 1e-5);
        assert!(gap <= 1.2 + 1e-5);
        match circle_circle(bodies[0].pos, 0.5, bodies[1].pos, 0.7) {
            None => {}
            Some(c) => assert!(c.depth < 1e-5),
        }
    }

    #[test]
    fn mixed_static_dynamic_pair_is_resolved() {
        let mut bodies = vec![
            RigidBody::new_static(Vec2::zero(), Shape::Rectangle { width: 4.0, height: 1.0 }).unwrap(),
            RigidBody::new_circle(Vec2::new(0.0, 0.8), 0.5, 1.0).unwrap(),
        ];
        bodies[1].velocity = Vec2::new(0.0, -1.0);

        let stats = resolve_collisions(&mut bodies, &SimParams::default());
        assert_eq!(stats.impulses, 1);
        assert!(bodies[1].velocity.y > 0.0);
        assert_eq!(bodies[0].pos, Vec2::zero());
        assert_eq!(bodies[0].angular_acceleration, 0.0);
    }
}
