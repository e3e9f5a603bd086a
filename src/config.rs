//! Scenario configuration
//!
//! A scenario file fixes everything a deployment calibrates: the projected
//! reference system, the real-world origin, the simulator anchor, the output
//! unit and the correction parameters. Example:
//!
//! ```json
//! {
//!   "srid": "EPSG:27700",
//!   "origin": { "latitude": 50.69294576306597, "longitude": -0.2596393704456905, "altitude": 10 },
//!   "player_start": { "x": 0.0, "y": 0.0, "z": 4972.0 },
//!   "units": "centimeters",
//!   "correction": {
//!     "heading_offset_degrees": 91.3,
//!     "east_west_scale": 0.9965,
//!     "north_south_scale": 1.0,
//!     "east_west_heading_nudge_degrees": 0.05
//!   },
//!   "destinations": [
//!     { "name": "target", "latitude": 50.70133366, "longitude": -0.2047640619, "altitude": 50 }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::correction::CorrectionParameters;
use crate::error::Result;
use crate::frame::SimFrameMapper;
use crate::pipeline::CoordinatePipeline;
use crate::projection::{epsg, GeodeticProjector};
use crate::types::{GeodeticPoint, SimPoint, SimUnits};

/// A named destination to convert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub point: GeodeticPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Projected reference system, e.g. "EPSG:27700"
    pub srid: String,
    #[serde(default = "default_geographic_crs")]
    pub geographic_crs: String,
    pub origin: GeodeticPoint,
    pub correction: CorrectionParameters,
    #[serde(default)]
    pub player_start: SimPoint,
    #[serde(default)]
    pub units: SimUnits,
    #[serde(default)]
    pub destinations: Vec<Waypoint>,
}

fn default_geographic_crs() -> String {
    epsg::authority_string(epsg::WGS84)
}

impl ScenarioConfig {
    /// Reads a scenario from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        info!(path = %path.as_ref().display(), srid = %config.srid, "loaded scenario");
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds the projector, frame mapper and pipeline this scenario describes
    pub fn build_pipeline(&self) -> Result<CoordinatePipeline> {
        self.correction.validate()?;
        let projector = GeodeticProjector::new(&self.geographic_crs, &self.srid)?;
        let mapper = SimFrameMapper::new(projector, self.origin, self.units)?;
        CoordinatePipeline::new(mapper, self.correction, self.player_start)
    }
}
