use crate::core::Vec2;
use crate::domain::error::{PhysicsError, PhysicsResult};
use crate::rigid_body::{BodyHandle, RigidBody};

/// Owns every body in the simulation. Handles are indices into `bodies`.
pub struct RigidBodySystem {
    bodies: Vec<RigidBody>,
}

impl RigidBodySystem {
    pub fn new() -> Self {
        Self { bodies: Vec::new() }
    }

    /// Add a new rigid body and return its handle.
    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        let handle = BodyHandle(self.bodies.len() as u32);
        self.bodies.push(body);
        handle
    }

    /// Remove all bodies (used by WorldCore::reset()). Existing handles become stale.
    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn get(&self, handle: BodyHandle) -> PhysicsResult<&RigidBody> {
        self.bodies
            .get(handle.index())
            .ok_or(PhysicsError::UnknownBody(handle.id()))
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> PhysicsResult<&mut RigidBody> {
        self.bodies
            .get_mut(handle.index())
            .ok_or(PhysicsError::UnknownBody(handle.id()))
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        handle.index() < self.bodies.len()
    }

    /// Resolve a raw id coming from the host into a handle.
    pub fn handle(&self, id: u32) -> PhysicsResult<BodyHandle> {
        let handle = BodyHandle(id);
        if self.contains(handle) {
            Ok(handle)
        } else {
            Err(PhysicsError::UnknownBody(id))
        }
    }

    pub fn position(&self, handle: BodyHandle) -> Option<Vec2> {
        self.bodies.get(handle.index()).map(|b| b.pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(i, b)| (BodyHandle(i as u32), b))
    }

    pub fn as_slice(&self) -> &[RigidBody] {
        &self.bodies
    }

    pub fn as_mut_slice(&mut self) -> &mut [RigidBody] {
        &mut self.bodies
    }

    /// Two distinct bodies borrowed mutably at once. `None` if `a == b`
    /// or either handle is out of range.
    pub fn pair_mut(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
    ) -> Option<(&mut RigidBody, &mut RigidBody)> {
        pair_mut(&mut self.bodies, a.index(), b.index())
    }

    /// Gravity overwrites the vertical acceleration of every dynamic body.
    /// Must run before spring forces are accumulated for the step.
    pub fn apply_gravity(&mut self, gravity: f32) {
        for body in self.bodies.iter_mut().filter(|b| !b.is_static) {
            body.acceleration.y = -gravity;
        }
    }
}

impl Default for RigidBodySystem {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> Option<(&mut T, &mut T)> {
    if i == j || i >= items.len() || j >= items.len() {
        return None;
    }
    if i < j {
        let (head, tail) = items.split_at_mut(j);
        Some((&mut head[i], &mut tail[0]))
    } else {
        let (head, tail) = items.split_at_mut(i);
        Some((&mut tail[0], &mut head[j]))
    }
}
