//! End-to-end conversion of a real-world destination into simulator coordinates
//!
//! For every destination the pipeline:
//!
//! 1. measures bearing and haversine distance from the origin, uncorrected;
//! 2. applies the calibrated heading offset and distance scale;
//! 3. walks the corrected bearing/distance from the origin to get a
//!    corrected geodetic point (keeping the destination's altitude);
//! 4. projects that point and maps it into the simulator frame;
//! 5. adds the player start anchor.

use serde::Serialize;
use tracing::debug;

use crate::correction::{correct, Correction, CorrectionParameters};
use crate::error::Result;
use crate::frame::SimFrameMapper;
use crate::geodesy::{self, Bearing};
use crate::types::{GeodeticPoint, ProjectedPoint, SimPoint};

/// Every intermediate value of one conversion
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Conversion {
    pub destination: GeodeticPoint,
    pub bearing: Bearing,
    pub distance: f64,
    pub correction: Correction,
    pub corrected: GeodeticPoint,
    pub projected: ProjectedPoint,
    /// Position relative to the frame origin, before the anchor is added
    pub offset: SimPoint,
    /// Final simulator coordinates
    pub sim: SimPoint,
}

/// Converts destinations relative to one fixed origin
///
/// The origin belongs to the frame mapper, so the point used for the
/// great-circle measurements and the projected frame origin are always the
/// same. Immutable once built and safe to share between threads.
#[derive(Debug)]
pub struct CoordinatePipeline {
    mapper: SimFrameMapper,
    params: CorrectionParameters,
    anchor: SimPoint,
}

impl CoordinatePipeline {
    /// Creates a pipeline
    ///
    /// # Arguments
    /// * `mapper` - Frame mapper anchored at the real-world origin
    /// * `params` - Calibrated correction, validated here
    /// * `anchor` - Simulator position of the origin (player start)
    pub fn new(mapper: SimFrameMapper, params: CorrectionParameters, anchor: SimPoint) -> Result<Self> {
        params.validate()?;
        Ok(Self { mapper, params, anchor })
    }

    /// Simulator coordinates for `destination`
    pub fn compute_sim_coordinates(&self, destination: GeodeticPoint) -> Result<SimPoint> {
        Ok(self.convert(destination)?.sim)
    }

    /// Runs the full conversion and keeps every stage
    pub fn convert(&self, destination: GeodeticPoint) -> Result<Conversion> {
        let origin = self.mapper.origin();
        let (bearing, distance) = geodesy::bearing_and_distance(origin, destination);
        debug!(bearing = bearing.degrees(), distance, "measured destination");

        let correction = correct(bearing, distance, &self.params);

        let corrected = geodesy::destination_point(origin, correction.distance, correction.bearing)?
            .with_altitude(destination.altitude())?;

        let projected = self.mapper.projector().forward(corrected)?;
        let offset = self.mapper.to_sim_frame(projected);
        let sim = offset + self.anchor;
        debug!(x = sim.x, y = sim.y, z = sim.z, "simulator coordinates");

        Ok(Conversion {
            destination,
            bearing,
            distance,
            correction,
            corrected,
            projected,
            offset,
            sim,
        })
    }

    /// Converts each destination independently
    pub fn convert_many(&self, destinations: &[GeodeticPoint]) -> Vec<Result<Conversion>> {
        destinations.iter().map(|&d| self.convert(d)).collect()
    }

    /// Geodetic position of a simulator point
    ///
    /// Removes the anchor and inverts the frame mapping. The correction is a
    /// forward-only empirical fit and is not undone.
    pub fn sim_to_geodetic(&self, point: SimPoint) -> Result<GeodeticPoint> {
        self.mapper.sim_to_geodetic(point - self.anchor)
    }

    pub fn origin(&self) -> GeodeticPoint {
        self.mapper.origin()
    }

    pub fn params(&self) -> &CorrectionParameters {
        &self.params
    }

    pub fn anchor(&self) -> SimPoint {
        self.anchor
    }

    pub fn mapper(&self) -> &SimFrameMapper {
        &self.mapper
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correction::ScaleWindow;
    use crate::error::Error;
    use crate::projection::{epsg, GeodeticProjector};
    use crate::types::SimUnits;

    fn shoreham() -> GeodeticPoint {
        GeodeticPoint::new(50.828247, -0.238380, 10.0).unwrap()
    }

    fn lancing_north() -> GeodeticPoint {
        GeodeticPoint::new(50.845341, -0.238773, 50.0).unwrap()
    }

    fn pipeline(params: CorrectionParameters, anchor: SimPoint, units: SimUnits) -> CoordinatePipeline {
        let projector = GeodeticProjector::from_epsg(epsg::BRITISH_NATIONAL_GRID).unwrap();
        let mapper = SimFrameMapper::new(projector, shoreham(), units).unwrap();
        CoordinatePipeline::new(mapper, params, anchor).unwrap()
    }

    #[test]
    fn test_identity_correction_reaches_destination() {
        let pipeline = pipeline(CorrectionParameters::identity(), SimPoint::ORIGIN, SimUnits::Meters);
        let conversion = pipeline.convert(lancing_north()).unwrap();

        assert!((conversion.bearing.degrees() - 359.1683).abs() < 1e-3);
        assert!((conversion.distance - 1900.969).abs() < 0.01);
        assert!((conversion.corrected.latitude() - 50.845341).abs() < 1e-9);
        assert!((conversion.corrected.longitude() + 0.238773).abs() < 1e-9);
        assert_eq!(conversion.corrected.altitude(), 50.0);

        // About 73 m west and 1.9 km north of the origin on the grid
        let sim = conversion.sim;
        assert!((sim.x + 73.0).abs() < 5.0, "x {}", sim.x);
        assert!((sim.y + 1900.0).abs() < 5.0, "y {}", sim.y);
        assert_eq!(sim.z, -40.0);
    }

    #[test]
    fn test_origin_to_origin_is_anchor() {
        let anchor = SimPoint::new(0.0, 0.0, 4972.0);
        let pipeline = pipeline(CorrectionParameters::uniform(91.3, 0.997), anchor, SimUnits::Meters);
        let sim = pipeline.compute_sim_coordinates(shoreham()).unwrap();

        assert!(sim.x.abs() < 1e-6);
        assert!(sim.y.abs() < 1e-6);
        assert_eq!(sim.z, 4972.0);
    }

    #[test]
    fn test_heading_offset_rotates_result() {
        // A 90° offset turns a northbound destination eastbound (+x)
        let pipeline = pipeline(CorrectionParameters::uniform(90.0, 1.0), SimPoint::ORIGIN, SimUnits::Meters);
        let sim = pipeline.compute_sim_coordinates(lancing_north()).unwrap();

        assert!(sim.x > 1_850.0, "x {}", sim.x);
        assert!(sim.y.abs() < 100.0, "y {}", sim.y);
    }

    #[test]
    fn test_anisotropic_scale_applied() {
        let params = CorrectionParameters {
            heading_offset_degrees: 91.3,
            east_west_scale: 0.9965,
            north_south_scale: 1.0,
            east_west_heading_nudge_degrees: 0.05,
        };
        let pipeline = pipeline(params, SimPoint::ORIGIN, SimUnits::Meters);
        let conversion = pipeline.convert(lancing_north()).unwrap();

        assert_eq!(conversion.correction.window, ScaleWindow::EastWest);
        assert!((conversion.correction.distance - conversion.distance * 0.9965).abs() < 1e-9);
        let walked = geodesy::distance(pipeline.origin(), conversion.corrected);
        assert!((walked - conversion.correction.distance).abs() < 1e-3);
    }

    #[test]
    fn test_centimeter_output() {
        let meters = pipeline(CorrectionParameters::identity(), SimPoint::ORIGIN, SimUnits::Meters);
        let centimeters = pipeline(CorrectionParameters::identity(), SimPoint::ORIGIN, SimUnits::Centimeters);

        let m = meters.compute_sim_coordinates(lancing_north()).unwrap();
        let cm = centimeters.compute_sim_coordinates(lancing_north()).unwrap();
        assert!((cm.x - m.x * 100.0).abs() < 1e-4);
        assert!((cm.y - m.y * 100.0).abs() < 1e-4);
        assert!((cm.z - m.z * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_sim_to_geodetic_inverts_without_correction() {
        let anchor = SimPoint::new(120.0, -35.0, 4972.0);
        let pipeline = pipeline(CorrectionParameters::identity(), anchor, SimUnits::Centimeters);
        let sim = pipeline.compute_sim_coordinates(lancing_north()).unwrap();
        let back = pipeline.sim_to_geodetic(sim).unwrap();

        assert!((back.latitude() - 50.845341).abs() < 1e-7);
        assert!((back.longitude() + 0.238773).abs() < 1e-7);
        assert!((back.altitude() - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_convert_many() {
        let pipeline = pipeline(CorrectionParameters::identity(), SimPoint::ORIGIN, SimUnits::Meters);
        let results = pipeline.convert_many(&[shoreham(), lancing_north()]);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.is_ok()));
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        let projector = GeodeticProjector::from_epsg(epsg::BRITISH_NATIONAL_GRID).unwrap();
        let mapper = SimFrameMapper::new(projector, shoreham(), SimUnits::Meters).unwrap();
        let params = CorrectionParameters::uniform(0.0, -1.0);
        let result = CoordinatePipeline::new(mapper, params, SimPoint::ORIGIN);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_pipeline_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CoordinatePipeline>();
    }
}
