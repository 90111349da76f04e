//! Great-circle distances over route samples

use crate::models::Coordinate;

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance in meters between two lat/lon pairs given in degrees
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Distance between two route samples, ignoring elevation
pub fn segment_length(a: &Coordinate, b: &Coordinate) -> f64 {
    haversine_distance(a[0], a[1], b[0], b[1])
}

/// Running along-route distance for each sample, starting at 0
pub fn cumulative_distances(coords: &[Coordinate]) -> Vec<f64> {
    let mut out = Vec::with_capacity(coords.len());
    let mut total = 0.0;
    for (i, coord) in coords.iter().enumerate() {
        if i > 0 {
            total += segment_length(&coords[i - 1], coord);
        }
        out.push(total);
    }
    out
}

/// Total polyline length in meters
pub fn route_length(coords: &[Coordinate]) -> f64 {
    coords.windows(2).map(|w| segment_length(&w[0], &w[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_zero() {
        assert_eq!(haversine_distance(39.0, -120.0, 39.0, -120.0), 0.0);
    }

    #[test]
    fn test_haversine_one_degree_latitude() {
        // One degree of latitude on a 6371 km sphere
        let d = haversine_distance(0.0, 0.0, 1.0, 0.0);
        assert!((d - 111_194.93).abs() < 1.0);
    }

    #[test]
    fn test_haversine_symmetric() {
        let a = haversine_distance(39.19, -120.23, 38.93, -121.04);
        let b = haversine_distance(38.93, -121.04, 39.19, -120.23);
        assert!((a - b).abs() < 1e-6);
    }

    #[test]
    fn test_cumulative_distances() {
        let coords = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]];
        let cum = cumulative_distances(&coords);
        assert_eq!(cum.len(), 3);
        assert_eq!(cum[0], 0.0);
        assert!((cum[2] - 2.0 * cum[1]).abs() < 1e-6);
        assert!((route_length(&coords) - cum[2]).abs() < 1e-6);
    }

    #[test]
    fn test_empty_route_length() {
        assert!(cumulative_distances(&[]).is_empty());
        assert_eq!(route_length(&[]), 0.0);
    }
}
