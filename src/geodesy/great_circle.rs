use tracing::trace;

use crate::error::Result;
use crate::geodesy::bearing::Bearing;
use crate::types::GeodeticPoint;

/// Mean Earth radius (IUGG) in meters
pub const EARTH_MEAN_RADIUS_M: f64 = 6_371_008.8;

/// Separation below which two points count as the same place
const COINCIDENT_TOLERANCE_M: f64 = 1e-6;

/// Initial great-circle bearing from `from` to `to`
///
/// Coincident points have no defined bearing; they return north (0°).
/// That includes the same place written differently, such as ±180°
/// longitude or any longitude at a pole.
pub fn bearing(from: GeodeticPoint, to: GeodeticPoint) -> Bearing {
    if distance(from, to) < COINCIDENT_TOLERANCE_M {
        return Bearing::NORTH;
    }

    let (lat1, lon1) = from.lat_lon();
    let (lat2, lon2) = to.lat_lon();
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let y = delta_lon.sin() * lat2_rad.cos();
    let x = lat1_rad.cos() * lat2_rad.sin() - lat1_rad.sin() * lat2_rad.cos() * delta_lon.cos();

    Bearing::from_radians(y.atan2(x))
}

/// Haversine great-circle distance in meters
pub fn distance(from: GeodeticPoint, to: GeodeticPoint) -> f64 {
    let (lat1, lon1) = from.lat_lon();
    let (lat2, lon2) = to.lat_lon();
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_MEAN_RADIUS_M * c
}

/// Bearing and distance of the same pair, in that order
pub fn bearing_and_distance(from: GeodeticPoint, to: GeodeticPoint) -> (Bearing, f64) {
    (bearing(from, to), distance(from, to))
}

/// Point reached by travelling `distance_m` along the great circle leaving
/// `origin` on `heading`
///
/// The result keeps the origin's altitude and has its longitude wrapped
/// into [-180, 180].
pub fn destination_point(
    origin: GeodeticPoint,
    distance_m: f64,
    heading: Bearing,
) -> Result<GeodeticPoint> {
    let (lat1, lon1) = origin.lat_lon();
    let lat1_rad = lat1.to_radians();
    let lon1_rad = lon1.to_radians();
    let theta = heading.radians();
    let delta = distance_m / EARTH_MEAN_RADIUS_M;

    let sin_lat2 = (lat1_rad.sin() * delta.cos() + lat1_rad.cos() * delta.sin() * theta.cos())
        .clamp(-1.0, 1.0);
    let lat2_rad = sin_lat2.asin();
    let lon2_rad = lon1_rad
        + (theta.sin() * delta.sin() * lat1_rad.cos()).atan2(delta.cos() - lat1_rad.sin() * sin_lat2);

    let lat2 = lat2_rad.to_degrees();
    let lon2 = (lon2_rad.to_degrees() + 540.0).rem_euclid(360.0) - 180.0;
    trace!(distance_m, heading = heading.degrees(), lat2, lon2, "destination point");

    GeodeticPoint::new(lat2, lon2, origin.altitude())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> GeodeticPoint {
        GeodeticPoint::new(lat, lon, 0.0).unwrap()
    }

    fn shoreham() -> GeodeticPoint {
        point(50.828247, -0.238380)
    }

    fn lancing_north() -> GeodeticPoint {
        point(50.845341, -0.238773)
    }

    #[test]
    fn test_reference_scenario() {
        let (b, d) = bearing_and_distance(shoreham(), lancing_north());
        assert!((b.degrees() - 359.1683).abs() < 1e-3, "bearing {}", b);
        assert!((d - 1900.969).abs() < 0.01, "distance {}", d);
    }

    #[test]
    fn test_cardinal_bearings() {
        let o = point(0.0, 0.0);
        assert!((bearing(o, point(1.0, 0.0)).degrees() - 0.0).abs() < 1e-9);
        assert!((bearing(o, point(0.0, 1.0)).degrees() - 90.0).abs() < 1e-9);
        assert!((bearing(o, point(-1.0, 0.0)).degrees() - 180.0).abs() < 1e-9);
        assert!((bearing(o, point(0.0, -1.0)).degrees() - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_range() {
        let origin = point(51.5, -0.12);
        for lat in [-60.0, -10.0, 0.0, 51.4, 51.6, 70.0] {
            for lon in [-170.0, -45.0, -0.13, -0.11, 30.0, 179.0] {
                let b = bearing(origin, point(lat, lon)).degrees();
                assert!((0.0..360.0).contains(&b), "bearing {} out of range", b);
            }
        }
    }

    #[test]
    fn test_zero_distance() {
        for p in [shoreham(), point(-33.9, 151.2), point(90.0, 0.0), point(0.0, 180.0)] {
            assert_eq!(distance(p, p), 0.0);
            assert_eq!(bearing(p, p), Bearing::NORTH);
        }
    }

    #[test]
    fn test_coincident_aliases_have_north_bearing() {
        let pairs = [
            (point(10.0, 180.0), point(10.0, -180.0)),
            (point(90.0, 0.0), point(90.0, 45.0)),
            (point(-90.0, -120.0), point(-90.0, 30.0)),
        ];
        for (a, b) in pairs {
            assert!(distance(a, b) < 1e-6);
            assert_eq!(bearing(a, b), Bearing::NORTH);
        }
    }

    #[test]
    fn test_distance_one_degree_of_latitude() {
        let d = distance(point(0.0, 0.0), point(1.0, 0.0));
        let expected = EARTH_MEAN_RADIUS_M * 1f64.to_radians();
        assert!((d - expected).abs() < 1e-6);
    }

    #[test]
    fn test_destination_point_keeps_altitude() {
        let origin = GeodeticPoint::new(50.69294576, -0.25963937, 10.0).unwrap();
        let dest = destination_point(origin, 5_000.0, Bearing::from_degrees(75.0)).unwrap();
        assert_eq!(dest.altitude(), 10.0);
    }

    #[test]
    fn test_destination_point_wraps_antimeridian() {
        let dest = destination_point(point(0.0, 179.9), 50_000.0, Bearing::EAST).unwrap();
        assert!(dest.longitude() < -179.0);
    }

    #[test]
    fn test_destination_round_trip() {
        let origins = [shoreham(), point(-33.86, 151.21), point(64.1, -21.9), point(0.0, 0.0)];
        let headings = [0.0, 1.5, 44.9, 90.0, 135.0, 181.0, 269.0, 348.9];
        let distances = [1.0, 1_906.0, 25_000.0, 400_000.0];

        for origin in origins {
            for &h in &headings {
                for &d in &distances {
                    let heading = Bearing::from_degrees(h);
                    let dest = destination_point(origin, d, heading).unwrap();
                    let (b, back) = bearing_and_distance(origin, dest);

                    assert!((back - d).abs() < 1e-3, "distance {} vs {}", back, d);
                    let diff = (b.signed_degrees() - heading.signed_degrees() + 540.0)
                        .rem_euclid(360.0)
                        - 180.0;
                    assert!(diff.abs() < 1e-6, "bearing {} vs {}", b, heading);
                }
            }
        }
    }
}
