//! Simulation parameters shared by every system during a step.
//!
//! Owned by `WorldCore` and passed by reference into the integrator,
//! boundary resolver, spring generator and collision resolver.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{PhysicsError, PhysicsResult};

pub const DEFAULT_GRAVITY: f32 = 9.8;
pub const DEFAULT_ELASTICITY: f32 = 0.7;
pub const DEFAULT_FRICTION: f32 = 0.3;
pub const DEFAULT_SPRING_STIFFNESS: f32 = 0.5;
/// Longest frame the integrator accepts (seconds).
pub const MAX_DT: f32 = 0.05;

/// Fraction of `friction` applied as per-step linear/angular damping.
pub const DAMPING_COUPLING: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimParams {
    /// Downward acceleration (world units / s²)
    pub gravity: f32,
    /// Coefficient of restitution (0 = inelastic, 1 = elastic)
    pub elasticity: f32,
    /// Ground friction and damping coupling (0..=1)
    pub friction: f32,
    /// Stiffness given to new springs; broadcast to existing ones on change
    pub spring_stiffness: f32,
    pub max_dt: f32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            elasticity: DEFAULT_ELASTICITY,
            friction: DEFAULT_FRICTION,
            spring_stiffness: DEFAULT_SPRING_STIFFNESS,
            max_dt: MAX_DT,
        }
    }
}

impl SimParams {
    /// Multiplier applied to velocities every integration step.
    #[inline]
    pub fn damping_factor(&self) -> f32 {
        1.0 - self.friction * DAMPING_COUPLING
    }

    pub fn get(&self, name: ParamName) -> f32 {
        match name {
            ParamName::Gravity => self.gravity,
            ParamName::Elasticity => self.elasticity,
            ParamName::Friction => self.friction,
            ParamName::SpringStiffness => self.spring_stiffness,
        }
    }

    /// Validate and store one parameter. The struct is untouched on error.
    pub fn set(&mut self, name: ParamName, value: f32) -> PhysicsResult<()> {
        name.validate(value)?;
        match name {
            ParamName::Gravity => self.gravity = value,
            ParamName::Elasticity => self.elasticity = value,
            ParamName::Friction => self.friction = value,
            ParamName::SpringStiffness => self.spring_stiffness = value,
        }
        Ok(())
    }

    pub fn validate(&self) -> PhysicsResult<()> {
        for name in ParamName::ALL {
            name.validate(self.get(name))?;
        }
        if !(self.max_dt.is_finite() && self.max_dt > 0.0) {
            return Err(PhysicsError::invalid("maxDt", self.max_dt));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> PhysicsResult<Self> {
        let params: SimParams =
            serde_json::from_str(json).map_err(|e| PhysicsError::InvalidConfig(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Names accepted by `set_parameter`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamName {
    Gravity,
    Elasticity,
    Friction,
    SpringStiffness,
}

impl ParamName {
    pub const ALL: [ParamName; 4] = [
        ParamName::Gravity,
        ParamName::Elasticity,
        ParamName::Friction,
        ParamName::SpringStiffness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamName::Gravity => "gravity",
            ParamName::Elasticity => "elasticity",
            ParamName::Friction => "friction",
            ParamName::SpringStiffness => "springStiffness",
        }
    }

    fn validate(&self, value: f32) -> PhysicsResult<()> {
        let ok = match self {
            ParamName::Gravity => value.is_finite(),
            ParamName::Elasticity | ParamName::Friction => (0.0..=1.0).contains(&value),
            ParamName::SpringStiffness => value.is_finite() && value >= 0.0,
        };
        if ok {
            Ok(())
        } else {
            Err(PhysicsError::invalid(self.as_str(), value))
        }
    }
}

impl FromStr for ParamName {
    type Err = PhysicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gravity" => Ok(ParamName::Gravity),
            "elasticity" => Ok(ParamName::Elasticity),
            "friction" => Ok(ParamName::Friction),
            "springStiffness" | "spring_stiffness" => Ok(ParamName::SpringStiffness),
            other => Err(PhysicsError::UnknownParameter(other.to_string())),
        }
    }
}

/// Fixed axis-aligned world rectangle (+Y up).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            left: -9.0,
            right: 9.0,
            bottom: -8.0,
            top: 8.0,
        }
    }
}

impl WorldBounds {
    pub fn new(left: f32, right: f32, bottom: f32, top: f32) -> PhysicsResult<Self> {
        if !(left.is_finite() && right.is_finite() && left < right) {
            return Err(PhysicsError::invalid("bounds.right", right));
        }
        if !(bottom.is_finite() && top.is_finite() && bottom < top) {
            return Err(PhysicsError::invalid("bounds.top", top));
        }
        Ok(Self { left, right, bottom, top })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_parameter_names() {
        assert_eq!("gravity".parse::<ParamName>(), Ok(ParamName::Gravity));
        assert_eq!("springStiffness".parse::<ParamName>(), Ok(ParamName::SpringStiffness));
        assert_eq!("spring_stiffness".parse::<ParamName>(), Ok(ParamName::SpringStiffness));
        assert!(matches!(
            "wind".parse::<ParamName>(),
            Err(PhysicsError::UnknownParameter(_))
        ));
    }

    #[test]
    fn set_rejects_out_of_range_and_keeps_old_value() {
        let mut params = SimParams::default();
        assert!(params.set(ParamName::Elasticity, 1.5).is_err());
        assert_eq!(params.elasticity, DEFAULT_ELASTICITY);
        assert!(params.set(ParamName::Friction, -0.1).is_err());
        assert!(params.set(ParamName::Gravity, f32::INFINITY).is_err());
        params.set(ParamName::Gravity, -3.0).unwrap();
        assert_eq!(params.gravity, -3.0);
    }

    #[test]
    fn json_roundtrip_uses_camel_case_and_defaults() {
        let params = SimParams::from_json(r#"{"gravity": 1.5, "springStiffness": 2.0}"#).unwrap();
        assert_eq!(params.gravity, 1.5);
        assert_eq!(params.spring_stiffness, 2.0);
        assert_eq!(params.friction, DEFAULT_FRICTION);
        assert!(params.to_json().contains("\"springStiffness\":2.0"));

        assert!(matches!(
            SimParams::from_json("{not json"),
            Err(PhysicsError::InvalidConfig(_))
        ));
        assert!(SimParams::from_json(r#"{"elasticity": 3.0}"#).is_err());
    }

    #[test]
    fn damping_factor_couples_ten_percent_of_friction() {
        let params = SimParams { friction: 0.5, ..SimParams::default() };
        assert!((params.damping_factor() - 0.95).abs() < 1e-6);
    }

    #[test]
    fn bounds_reject_inverted_extents() {
        assert!(WorldBounds::new(1.0, -1.0, -1.0, 1.0).is_err());
        assert!(WorldBounds::new(-1.0, 1.0, -1.0, 1.0).is_ok());
    }
}
