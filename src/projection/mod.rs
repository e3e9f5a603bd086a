//! Planar projection of geodetic coordinates
//!
//! Wraps PROJ so the rest of the crate never touches projection math.

pub mod epsg;
mod projector;

pub use self::projector::GeodeticProjector;
