use std::sync::{Mutex, MutexGuard};

use proj::Proj;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::projection::epsg;
use crate::types::{GeodeticPoint, ProjectedPoint};

/// A PROJ transformation that may move between threads
///
/// `Proj::new_known_crs` gives every handle its own `PJ_CONTEXT`, and the
/// handle is only reached through the projector's `Mutex`, so at most one
/// thread uses a given context at a time.
struct ProjHandle(Proj);

// SAFETY: the wrapped `Proj` owns its context exclusively and is never
// aliased outside the `Mutex` that serializes every call into it.
unsafe impl Send for ProjHandle {}

/// Projects geodetic coordinates into one fixed planar reference system
///
/// Both PROJ transformations are created once in the constructor, so an
/// unknown reference system fails there and never on a per-point call.
/// PROJ handles are not thread-safe; each sits behind its own mutex, which
/// makes the projector `Sync` and shareable across threads.
pub struct GeodeticProjector {
    forward: Mutex<ProjHandle>,
    inverse: Mutex<ProjHandle>,
    geographic_crs: String,
    projected_crs: String,
}

impl GeodeticProjector {
    /// Creates a projector between two CRS identifiers PROJ understands
    ///
    /// # Arguments
    /// * `geographic_crs` - Source lon/lat system, e.g. `"EPSG:4326"`
    /// * `projected_crs` - Target planar system, e.g. `"EPSG:27700"`
    pub fn new(geographic_crs: &str, projected_crs: &str) -> Result<Self> {
        let forward = Proj::new_known_crs(geographic_crs, projected_crs, None).map_err(|e| {
            Error::Configuration(format!(
                "Failed to create projection {} -> {}: {}",
                geographic_crs, projected_crs, e
            ))
        })?;

        let inverse = Proj::new_known_crs(projected_crs, geographic_crs, None).map_err(|e| {
            Error::Configuration(format!(
                "Failed to create inverse projection {} -> {}: {}",
                projected_crs, geographic_crs, e
            ))
        })?;

        info!(geographic_crs, projected_crs, "created geodetic projector");

        Ok(Self {
            forward: Mutex::new(ProjHandle(forward)),
            inverse: Mutex::new(ProjHandle(inverse)),
            geographic_crs: geographic_crs.to_string(),
            projected_crs: projected_crs.to_string(),
        })
    }

    /// Creates a projector from WGS 84 into the given EPSG code
    pub fn from_epsg(code: u32) -> Result<Self> {
        Self::new(
            &epsg::authority_string(epsg::WGS84),
            &epsg::authority_string(code),
        )
    }

    /// Projects a geodetic point; altitude passes through as `z`
    pub fn forward(&self, point: GeodeticPoint) -> Result<ProjectedPoint> {
        let (lon, lat) = point.lon_lat();
        let (x, y) = Self::lock(&self.forward)?
            .0
            .convert((lon, lat))
            .map_err(|e| Error::Projection(format!("Projection of {} failed: {}", point, e)))?;

        if !x.is_finite() || !y.is_finite() {
            return Err(Error::Projection(format!(
                "{} lies outside the domain of {}",
                point, self.projected_crs
            )));
        }

        debug!(lon, lat, x, y, "projected point");
        Ok(ProjectedPoint::new(x, y, point.altitude()))
    }

    /// Projects many points, stopping at the first failure
    pub fn forward_many(&self, points: &[GeodeticPoint]) -> Result<Vec<ProjectedPoint>> {
        points.iter().map(|&point| self.forward(point)).collect()
    }

    /// Unprojects a planar point back to geodetic coordinates
    pub fn inverse(&self, point: ProjectedPoint) -> Result<GeodeticPoint> {
        let (lon, lat) = Self::lock(&self.inverse)?
            .0
            .convert((point.x, point.y))
            .map_err(|e| {
                Error::Projection(format!(
                    "Inverse projection of ({}, {}) failed: {}",
                    point.x, point.y, e
                ))
            })?;

        GeodeticPoint::from_lon_lat(lon, lat, point.z).map_err(|e| {
            Error::Projection(format!(
                "Inverse projection of ({}, {}) left the geodetic range: {}",
                point.x, point.y, e
            ))
        })
    }

    /// Returns the source geographic CRS identifier
    pub fn geographic_crs(&self) -> &str {
        &self.geographic_crs
    }

    /// Returns the target projected CRS identifier
    pub fn projected_crs(&self) -> &str {
        &self.projected_crs
    }

    fn lock(proj: &Mutex<ProjHandle>) -> Result<MutexGuard<'_, ProjHandle>> {
        proj.lock()
            .map_err(|_| Error::Projection("PROJ handle poisoned by an earlier panic".to_string()))
    }
}

impl std::fmt::Debug for GeodeticProjector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeodeticProjector")
            .field("geographic_crs", &self.geographic_crs)
            .field("projected_crs", &self.projected_crs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bng() -> GeodeticProjector {
        GeodeticProjector::from_epsg(epsg::BRITISH_NATIONAL_GRID).unwrap()
    }

    #[test]
    fn test_projector_creation() {
        let projector = bng();
        assert_eq!(projector.geographic_crs(), "EPSG:4326");
        assert_eq!(projector.projected_crs(), "EPSG:27700");
    }

    #[test]
    fn test_invalid_crs_is_configuration_error() {
        let result = GeodeticProjector::new("EPSG:4326", "EPSG:999999");
        assert!(matches!(result, Err(Error::Configuration(_))));

        let result = GeodeticProjector::new("not a crs", "EPSG:27700");
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_forward_british_national_grid() {
        let point = GeodeticPoint::new(50.828247, -0.238380, 10.0).unwrap();
        let projected = bng().forward(point).unwrap();

        // Shoreham-by-Sea, roughly TQ 240 047
        assert!((523_000.0..525_200.0).contains(&projected.x), "easting {}", projected.x);
        assert!((103_700.0..105_800.0).contains(&projected.y), "northing {}", projected.y);
        assert_eq!(projected.z, 10.0);
    }

    #[test]
    fn test_forward_axis_order() {
        // Moving north changes northing, not easting
        let projector = bng();
        let south = projector.forward(GeodeticPoint::new(50.8, -0.24, 0.0).unwrap()).unwrap();
        let north = projector.forward(GeodeticPoint::new(50.9, -0.24, 0.0).unwrap()).unwrap();
        assert!(north.y - south.y > 10_000.0);
        assert!((north.x - south.x).abs() < 500.0);
    }

    #[test]
    fn test_round_trip() {
        let projector = bng();
        for (lat, lon, z) in [(50.828247, -0.238380, 10.0), (51.5007, -0.1246, 0.0), (55.9533, -3.1883, 47.0)] {
            let point = GeodeticPoint::new(lat, lon, z).unwrap();
            let back = projector.inverse(projector.forward(point).unwrap()).unwrap();
            assert!((back.latitude() - lat).abs() < 1e-7);
            assert!((back.longitude() - lon).abs() < 1e-7);
            assert_eq!(back.altitude(), z);
        }
    }

    #[test]
    fn test_forward_many() {
        let points = vec![
            GeodeticPoint::new(50.828247, -0.238380, 0.0).unwrap(),
            GeodeticPoint::new(50.845341, -0.238773, 0.0).unwrap(),
        ];
        let projected = bng().forward_many(&points).unwrap();
        assert_eq!(projected.len(), 2);
        assert!(projected[1].y > projected[0].y);
    }

    #[test]
    fn test_projector_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GeodeticProjector>();
        assert_send_sync::<std::sync::Arc<GeodeticProjector>>();
    }

    #[test]
    fn test_shared_across_threads() {
        let projector = std::sync::Arc::new(bng());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let projector = std::sync::Arc::clone(&projector);
                std::thread::spawn(move || {
                    let point = GeodeticPoint::new(50.8 + i as f64 * 0.01, -0.24, 0.0).unwrap();
                    let back = projector.inverse(projector.forward(point).unwrap()).unwrap();
                    (back.latitude() - point.latitude()).abs()
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap() < 1e-7);
        }
    }
}
