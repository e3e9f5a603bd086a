//! Spherical-Earth geodesy
//!
//! Bearings, haversine distances and the inverse (destination point)
//! problem on a sphere of mean Earth radius. No ellipsoidal corrections.

mod bearing;
mod great_circle;

pub use self::bearing::{normalize_degrees, normalize_signed_degrees, Bearing};
pub use self::great_circle::{
    bearing, bearing_and_distance, destination_point, distance, EARTH_MEAN_RADIUS_M,
};
