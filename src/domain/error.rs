//! Error types for physics operations.

use thiserror::Error;

use crate::core::Vec2;

/// Result type alias for physics operations.
pub type PhysicsResult<T> = Result<T, PhysicsError>;

/// Errors raised at the API boundary. `step` never fails: runtime
/// degeneracies are skipped for the offending pair or spring instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// A construction or configuration value is out of range.
    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f32 },

    /// `set_parameter` was called with a name the simulation does not know.
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    /// A body handle does not refer to a live body.
    #[error("unknown body handle: {0}")]
    UnknownBody(u32),

    /// A spring handle does not refer to a live spring.
    #[error("unknown spring handle: {0}")]
    UnknownSpring(u32),

    /// Parameter JSON could not be parsed.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl PhysicsError {
    #[must_use]
    pub const fn invalid(name: &'static str, value: f32) -> Self {
        Self::InvalidParameter { name, value }
    }
}

/// Reject non-finite or non-positive values.
pub(crate) fn require_positive(name: &'static str, value: f32) -> PhysicsResult<f32> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PhysicsError::invalid(name, value))
    }
}

/// Reject non-finite or negative values.
pub(crate) fn require_non_negative(name: &'static str, value: f32) -> PhysicsResult<f32> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(PhysicsError::invalid(name, value))
    }
}

/// Reject vectors with a NaN or infinite component. The offending
/// component is reported as the value.
pub(crate) fn require_finite(name: &'static str, v: Vec2) -> PhysicsResult<Vec2> {
    match [v.x, v.y].into_iter().find(|c| !c.is_finite()) {
        None => Ok(v),
        Some(bad) => Err(PhysicsError::invalid(name, bad)),
    }
}
