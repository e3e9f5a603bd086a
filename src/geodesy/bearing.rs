use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Wraps an angle in degrees into [0, 360)
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Wraps an angle in degrees into (-180, 180]
pub fn normalize_signed_degrees(degrees: f64) -> f64 {
    let wrapped = normalize_degrees(degrees);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Compass bearing, clockwise from true north
///
/// Always held in degrees within [0, 360). Construct it from whichever unit
/// you have and read back the one you need; nothing else in the crate
/// passes raw angles across a function boundary.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Bearing(f64);

impl Bearing {
    pub const NORTH: Bearing = Bearing(0.0);
    pub const EAST: Bearing = Bearing(90.0);
    pub const SOUTH: Bearing = Bearing(180.0);
    pub const WEST: Bearing = Bearing(270.0);

    pub fn from_degrees(degrees: f64) -> Self {
        Bearing(normalize_degrees(degrees))
    }

    pub fn from_radians(radians: f64) -> Self {
        Self::from_degrees(radians * 180.0 / PI)
    }

    /// Degrees in [0, 360)
    pub fn degrees(&self) -> f64 {
        self.0
    }

    /// Radians in [0, 2π)
    pub fn radians(&self) -> f64 {
        self.0.to_radians()
    }

    /// Degrees in (-180, 180], the range `atan2` produces
    pub fn signed_degrees(&self) -> f64 {
        normalize_signed_degrees(self.0)
    }

    /// Rotates clockwise by `degrees` (negative rotates counter-clockwise)
    pub fn rotated(&self, degrees: f64) -> Self {
        Self::from_degrees(self.0 + degrees)
    }
}

impl From<f64> for Bearing {
    fn from(degrees: f64) -> Self {
        Bearing::from_degrees(degrees)
    }
}

impl From<Bearing> for f64 {
    fn from(bearing: Bearing) -> Self {
        bearing.0
    }
}

impl fmt::Display for Bearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}°", self.0)
    }
}
