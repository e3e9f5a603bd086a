//! Mapping between projected coordinates and the simulator frame
//!
//! The simulator frame is left-handed and anchored at the origin point:
//!
//! * `x = (easting - origin easting) * scale`
//! * `y = -(northing - origin northing) * scale`
//! * `z = (origin elevation - elevation) * scale`
//!
//! so positive `z` is below the origin. `scale` comes from [`SimUnits`] and
//! applies to all three axes.

use tracing::debug;

use crate::error::Result;
use crate::projection::GeodeticProjector;
use crate::types::{GeodeticPoint, ProjectedPoint, SimPoint, SimUnits};

/// Converts between projected/geodetic points and simulator coordinates
#[derive(Debug)]
pub struct SimFrameMapper {
    projector: GeodeticProjector,
    origin: GeodeticPoint,
    origin_projected: ProjectedPoint,
    units: SimUnits,
}

impl SimFrameMapper {
    /// Creates a mapper anchored at `origin`, projecting it once up front
    pub fn new(projector: GeodeticProjector, origin: GeodeticPoint, units: SimUnits) -> Result<Self> {
        let origin_projected = projector.forward(origin)?;
        debug!(
            x = origin_projected.x,
            y = origin_projected.y,
            z = origin_projected.z,
            "projected frame origin"
        );

        Ok(Self {
            projector,
            origin,
            origin_projected,
            units,
        })
    }

    /// Projected point to simulator frame
    pub fn to_sim_frame(&self, point: ProjectedPoint) -> SimPoint {
        let origin = self.origin_projected;
        SimPoint::new(
            point.x - origin.x,
            -(point.y - origin.y),
            origin.z - point.z,
        )
        .scaled(self.units.scale())
    }

    /// Simulator frame back to the projected system
    pub fn from_sim_frame(&self, point: SimPoint) -> ProjectedPoint {
        let origin = self.origin_projected;
        let meters = point.scaled(1.0 / self.units.scale());
        ProjectedPoint::new(origin.x + meters.x, origin.y - meters.y, origin.z - meters.z)
    }

    /// Projects a geodetic point and maps it into the simulator frame
    pub fn geodetic_to_sim(&self, point: GeodeticPoint) -> Result<SimPoint> {
        Ok(self.to_sim_frame(self.projector.forward(point)?))
    }

    /// Maps a simulator point back to geodetic coordinates
    pub fn sim_to_geodetic(&self, point: SimPoint) -> Result<GeodeticPoint> {
        self.projector.inverse(self.from_sim_frame(point))
    }

    pub fn origin(&self) -> GeodeticPoint {
        self.origin
    }

    pub fn origin_projected(&self) -> ProjectedPoint {
        self.origin_projected
    }

    pub fn units(&self) -> SimUnits {
        self.units
    }

    pub fn projector(&self) -> &GeodeticProjector {
        &self.projector
    }
}
