//! Core coordinate types for simgeo

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A point on the Earth in geodetic coordinates
///
/// Latitude and longitude are degrees, altitude is meters. The fields are
/// private so every instance has passed range validation. Use [`lat_lon`]
/// for great-circle math and [`lon_lat`] for projection calls; the two
/// orders are never interchangeable.
///
/// [`lat_lon`]: GeodeticPoint::lat_lon
/// [`lon_lat`]: GeodeticPoint::lon_lat
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeodeticPoint")]
pub struct GeodeticPoint {
    latitude: f64,
    longitude: f64,
    altitude: f64,
}

#[derive(Deserialize)]
struct RawGeodeticPoint {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    altitude: f64,
}

impl TryFrom<RawGeodeticPoint> for GeodeticPoint {
    type Error = Error;

    fn try_from(raw: RawGeodeticPoint) -> Result<Self> {
        GeodeticPoint::new(raw.latitude, raw.longitude, raw.altitude)
    }
}

impl GeodeticPoint {
    /// Creates a validated geodetic point
    ///
    /// # Arguments
    /// * `latitude` - Degrees in [-90, 90]
    /// * `longitude` - Degrees in [-180, 180]
    /// * `altitude` - Meters, any finite value
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::InvalidInput(format!(
                "latitude {} outside [-90, 90]",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::InvalidInput(format!(
                "longitude {} outside [-180, 180]",
                longitude
            )));
        }
        if !altitude.is_finite() {
            return Err(Error::InvalidInput(format!("altitude {} is not finite", altitude)));
        }

        Ok(Self { latitude, longitude, altitude })
    }

    /// Creates a point from longitude-first arguments, as projection libraries order them
    pub fn from_lon_lat(longitude: f64, latitude: f64, altitude: f64) -> Result<Self> {
        Self::new(latitude, longitude, altitude)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    /// (latitude, longitude) for great-circle calculations
    pub fn lat_lon(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    /// (longitude, latitude) for projection calls
    pub fn lon_lat(&self) -> (f64, f64) {
        (self.longitude, self.latitude)
    }

    /// Returns the same horizontal position at a different altitude
    pub fn with_altitude(&self, altitude: f64) -> Result<Self> {
        Self::new(self.latitude, self.longitude, altitude)
    }
}

impl fmt::Display for GeodeticPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(lat {:.8}, lon {:.8}, alt {:.2} m)",
            self.latitude, self.longitude, self.altitude
        )
    }
}

/// A point in a planar projected reference system, plus elevation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    /// Easting in projection units (normally meters)
    pub x: f64,
    /// Northing in projection units
    pub y: f64,
    /// Elevation, carried through the projection unchanged
    pub z: f64,
}

impl ProjectedPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A point in the simulator's local left-handed frame
///
/// x and y are horizontal, z grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl SimPoint {
    pub const ORIGIN: SimPoint = SimPoint { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Multiplies every axis by `factor`
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

impl Add for SimPoint {
    type Output = SimPoint;

    fn add(self, rhs: SimPoint) -> SimPoint {
        SimPoint::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for SimPoint {
    type Output = SimPoint;

    fn sub(self, rhs: SimPoint) -> SimPoint {
        SimPoint::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl fmt::Display for SimPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

/// Linear unit of simulator-frame output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimUnits {
    /// Same unit as the projected reference system
    #[default]
    Meters,
    /// Projected meters ×100, as engines with centimeter world units expect
    Centimeters,
}

impl SimUnits {
    /// Multiplier from projected meters to this unit
    pub fn scale(&self) -> f64 {
        match self {
            SimUnits::Meters => 1.0,
            SimUnits::Centimeters => 100.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SimUnits::Meters => "m",
            SimUnits::Centimeters => "cm",
        }
    }
}
