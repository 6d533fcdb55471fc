//! Core math shared by every physics system.

mod vec2;

pub use vec2::Vec2;
