//! Empirical heading and scale correction
//!
//! Exporting a scene from a map tool, editing it in a 3D package and
//! importing it into the simulator rotates and stretches the world by small,
//! undocumented amounts. The correction model undoes that on the derived
//! bearing and distance of a destination, never on the raw coordinates.
//!
//! The parameters are fits from field calibration against one particular
//! map/engine pairing. They have to be measured again for every new
//! deployment; none of them are physical constants.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::geodesy::{normalize_signed_degrees, Bearing};

/// Lower edge of the east-west scale window, in degrees of deviation from south
pub const WINDOW_MIN_DEGREES: f64 = 45.0;
/// Upper edge of the east-west scale window
pub const WINDOW_MAX_DEGREES: f64 = 135.0;

/// Calibrated correction constants for one deployment
///
/// Every field is required when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrectionParameters {
    /// Rotation added to every bearing, clockwise degrees
    pub heading_offset_degrees: f64,
    /// Distance factor for corrected bearings inside the east-west window
    pub east_west_scale: f64,
    /// Distance factor for all other bearings
    pub north_south_scale: f64,
    /// Extra rotation applied only inside the east-west window
    pub east_west_heading_nudge_degrees: f64,
}

impl CorrectionParameters {
    /// Uniform correction with no window-specific behaviour
    pub fn uniform(heading_offset_degrees: f64, scale: f64) -> Self {
        Self {
            heading_offset_degrees,
            east_west_scale: scale,
            north_south_scale: scale,
            east_west_heading_nudge_degrees: 0.0,
        }
    }

    /// Parameters that leave bearing and distance untouched
    pub fn identity() -> Self {
        Self::uniform(0.0, 1.0)
    }

    /// Rejects non-finite values and non-positive scale factors
    pub fn validate(&self) -> Result<()> {
        let angles = [
            ("heading_offset_degrees", self.heading_offset_degrees),
            ("east_west_heading_nudge_degrees", self.east_west_heading_nudge_degrees),
        ];
        for (name, value) in angles {
            if !value.is_finite() {
                return Err(Error::Configuration(format!("{} must be finite, got {}", name, value)));
            }
        }

        let scales = [
            ("east_west_scale", self.east_west_scale),
            ("north_south_scale", self.north_south_scale),
        ];
        for (name, value) in scales {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Configuration(format!(
                    "{} must be a positive finite factor, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

/// Which scale branch a corrected bearing fell into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleWindow {
    /// Within [45°, 135°] of deviation from south, either side
    EastWest,
    NorthSouth,
}

impl ScaleWindow {
    /// Classifies an (already offset) bearing
    ///
    /// Both window edges are inclusive, so 45°, 135°, 225° and 315° are all
    /// east-west.
    pub fn of(bearing: Bearing) -> Self {
        let angle_diff = normalize_signed_degrees(180.0 - bearing.degrees());
        let magnitude = angle_diff.abs();
        if (WINDOW_MIN_DEGREES..=WINDOW_MAX_DEGREES).contains(&magnitude) {
            ScaleWindow::EastWest
        } else {
            ScaleWindow::NorthSouth
        }
    }
}

/// Result of applying a correction
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Correction {
    pub bearing: Bearing,
    pub distance: f64,
    pub window: ScaleWindow,
}

/// Applies the heading offset and window-dependent distance scale
pub fn correct(bearing: Bearing, distance: f64, params: &CorrectionParameters) -> Correction {
    let offset = bearing.rotated(params.heading_offset_degrees);
    let window = ScaleWindow::of(offset);

    let (bearing, scale) = match window {
        ScaleWindow::EastWest => (
            offset.rotated(params.east_west_heading_nudge_degrees),
            params.east_west_scale,
        ),
        ScaleWindow::NorthSouth => (offset, params.north_south_scale),
    };

    let distance = distance * scale;
    debug!(
        bearing = bearing.degrees(),
        distance,
        ?window,
        "applied heading and scale correction"
    );

    Correction { bearing, distance, window }
}
