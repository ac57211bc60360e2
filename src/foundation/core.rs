use serde::{Deserialize, Serialize};

/// A point or vector in the canonical metric frame.
pub type Point = nalgebra::Vector3<f64>;

/// Seconds since the start of the routine.
pub type Seconds = f64;

/// Feet to meters.
pub const FEET_TO_METERS: f64 = 0.3048;

/// Degrees to radians.
pub const DEGREES_TO_RADIANS: f64 = std::f64::consts::PI / 180.0;

/// Index of a vehicle in the document's `drones` array.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct VehicleId(pub usize);

impl VehicleId {
    /// Position in per-vehicle tables.
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for VehicleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position, velocity and acceleration at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathState {
    /// Position in meters.
    pub position: Point,
    /// Velocity in meters per second.
    pub velocity: Point,
    /// Acceleration in meters per second squared.
    pub acceleration: Point,
}

impl PathState {
    /// A vehicle at rest at `position`.
    pub fn at_rest(position: Point) -> Self {
        Self {
            position,
            velocity: Point::zeros(),
            acceleration: Point::zeros(),
        }
    }
}

/// Unit declarations of a document plus the caller-supplied scale.
///
/// Conversion happens once, at load time. Everything downstream is metric and radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Units {
    /// `units.length == "feet"`.
    pub length_in_feet: bool,
    /// `units.angle == "degrees"`.
    pub angle_in_degrees: bool,
    /// Uniform scale applied on top of the length conversion.
    pub scale: f64,
}

impl Units {
    /// Multiplier for every authored length.
    pub fn length_factor(self) -> f64 {
        let base = if self.length_in_feet {
            FEET_TO_METERS
        } else {
            1.0
        };
        base * self.scale
    }

    /// Multiplier for every authored angle.
    pub fn angle_factor(self) -> f64 {
        if self.angle_in_degrees {
            DEGREES_TO_RADIANS
        } else {
            1.0
        }
    }
}

impl Default for Units {
    fn default() -> Self {
        Self {
            length_in_feet: false,
            angle_in_degrees: false,
            scale: 1.0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
