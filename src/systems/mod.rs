//! Physics systems. Each one mutates bodies in place and reads the shared
//! `SimParams` by reference.

pub mod boundary;
pub mod collision;
pub mod integrator;
pub mod rigid_body;
pub mod rigid_body_system;
pub mod spring;
