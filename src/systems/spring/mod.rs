//! Springs - Hooke's-law constraints between two body anchors
//!
//! A spring never owns its anchors; it holds `BodyHandle`s into the
//! `RigidBodySystem`. Forces are accumulated into each anchor's
//! acceleration (scaled by its inverse mass) before integration.

use serde::Serialize;

use crate::core::Vec2;
use crate::domain::error::{require_non_negative, PhysicsError, PhysicsResult};
use crate::rigid_body::BodyHandle;
use crate::rigid_body_system::{pair_mut, RigidBodySystem};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SpringHandle(pub(crate) u32);

impl SpringHandle {
    pub fn id(&self) -> u32 {
        self.0
    }
}

#[derive(Clone, Debug)]
pub struct Spring {
    pub anchor1: BodyHandle,
    pub anchor2: BodyHandle,
    rest_length: f32,
    pub stiffness: f32,
    /// Anchor positions at the end of the last step (read by renderers)
    pub endpoints: [Vec2; 2],
}

impl Spring {
    pub fn new(
        anchor1: BodyHandle,
        anchor2: BodyHandle,
        rest_length: f32,
        stiffness: f32,
    ) -> PhysicsResult<Self> {
        Ok(Self {
            anchor1,
            anchor2,
            rest_length: require_non_negative("restLength", rest_length)?,
            stiffness: require_non_negative("stiffness", stiffness)?,
            endpoints: [Vec2::zero(); 2],
        })
    }

    /// Fixed at creation.
    pub fn rest_length(&self) -> f32 {
        self.rest_length
    }

    /// Force acting on anchor1 (anchor2 receives the negation), or `None`
    /// when the anchors coincide and the direction is undefined.
    pub fn force(&self, p1: Vec2, p2: Vec2) -> Option<Vec2> {
        let delta = p2 - p1;
        let dir = delta.try_normalize()?;
        let displacement = delta.length() - self.rest_length;
        Some(dir * (self.stiffness * displacement))
    }
}

pub struct SpringSystem {
    springs: Vec<Spring>,
}

impl SpringSystem {
    pub fn new() -> Self {
        Self { springs: Vec::new() }
    }

    pub fn add(&mut self, spring: Spring) -> SpringHandle {
        let handle = SpringHandle(self.springs.len() as u32);
        self.springs.push(spring);
        handle
    }

    pub fn clear(&mut self) {
        self.springs.clear();
    }

    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }

    pub fn get(&self, handle: SpringHandle) -> PhysicsResult<&Spring> {
        self.springs
            .get(handle.0 as usize)
            .ok_or(PhysicsError::UnknownSpring(handle.0))
    }

    pub fn handle(&self, id: u32) -> PhysicsResult<SpringHandle> {
        if (id as usize) < self.springs.len() {
            Ok(SpringHandle(id))
        } else {
            Err(PhysicsError::UnknownSpring(id))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SpringHandle, &Spring)> {
        self.springs
            .iter()
            .enumerate()
            .map(|(i, s)| (SpringHandle(i as u32), s))
    }

    /// Broadcast a new stiffness to every existing spring.
    pub fn set_stiffness(&mut self, stiffness: f32) {
        for spring in self.springs.iter_mut() {
            spring.stiffness = stiffness;
        }
    }

    /// Accumulate spring forces into anchor accelerations. Returns how
    /// many springs were skipped because their anchors coincide.
    pub fn apply_forces(&self, bodies: &mut RigidBodySystem) -> u32 {
        let mut skipped = 0;
        for spring in self.springs.iter() {
            let Some((a, b)) = pair_mut(
                bodies.as_mut_slice(),
                spring.anchor1.index(),
                spring.anchor2.index(),
            ) else {
                continue;
            };

            let Some(force) = spring.force(a.pos, b.pos) else {
                skipped += 1;
                continue;
            };

            if !a.is_static {
                a.apply_force(force);
            }
            if !b.is_static {
                b.apply_force(-force);
            }
        }
        skipped
    }

    /// Copy final anchor positions into each spring's endpoints.
    pub fn update_endpoints(&mut self, bodies: &RigidBodySystem) {
        for spring in self.springs.iter_mut() {
            if let (Some(p1), Some(p2)) = (
                bodies.position(spring.anchor1),
                bodies.position(spring.anchor2),
            ) {
                spring.endpoints = [p1, p2];
            }
        }
    }
}

impl Default for SpringSystem {
    fn default() -> Self {
        Self::new()
    }
}
