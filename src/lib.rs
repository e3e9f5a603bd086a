//! simgeo - Real-world coordinates into a simulator's local frame
//!
//! simgeo takes an origin and destination in latitude/longitude/altitude,
//! corrects the destination for the rotation and scale drift a map →
//! 3D tool → engine export chain introduces, projects it into a planar
//! reference system with PROJ, and maps the result into the simulator's
//! left-handed Cartesian frame.
//!
//! # Examples
//!
//! ```no_run
//! use simgeo::{
//!     CoordinatePipeline, CorrectionParameters, GeodeticPoint, GeodeticProjector,
//!     SimFrameMapper, SimPoint, SimUnits, projection::epsg,
//! };
//!
//! let projector = GeodeticProjector::from_epsg(epsg::BRITISH_NATIONAL_GRID)?;
//! let origin = GeodeticPoint::new(50.692945, -0.259639, 10.0)?;
//! let mapper = SimFrameMapper::new(projector, origin, SimUnits::Centimeters)?;
//!
//! let params = CorrectionParameters {
//!     heading_offset_degrees: 91.3,
//!     east_west_scale: 0.9965,
//!     north_south_scale: 1.0,
//!     east_west_heading_nudge_degrees: 0.05,
//! };
//! let pipeline = CoordinatePipeline::new(mapper, params, SimPoint::new(0.0, 0.0, 4972.0))?;
//!
//! let destination = GeodeticPoint::new(50.701333, -0.204764, 50.0)?;
//! let sim = pipeline.compute_sim_coordinates(destination)?;
//! println!("Simulator coordinates: {}", sim);
//! # Ok::<(), simgeo::Error>(())
//! ```

pub mod error;
pub mod types;
pub mod geodesy;
pub mod correction;
pub mod projection;
pub mod frame;
pub mod pipeline;
pub mod config;
pub mod logging;
pub mod api;

pub use error::{Error, Result};
pub use types::{GeodeticPoint, ProjectedPoint, SimPoint, SimUnits};
pub use geodesy::Bearing;
pub use correction::{Correction, CorrectionParameters, ScaleWindow};
pub use projection::GeodeticProjector;
pub use frame::SimFrameMapper;
pub use pipeline::{Conversion, CoordinatePipeline};
pub use config::{ScenarioConfig, Waypoint};
