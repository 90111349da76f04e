//! Locate a point at a given along-route distance

use serde::Serialize;

use super::geodesy::segment_length;
use crate::error::{PlannerError, Result};
use crate::models::Coordinate;

/// Interpolated position on a route
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoutePoint {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

impl From<&Coordinate> for RoutePoint {
    fn from(c: &Coordinate) -> Self {
        Self {
            latitude: c[0],
            longitude: c[1],
            elevation: c[2],
        }
    }
}

/// Walk the polyline and interpolate the sample at `target_meters`.
///
/// Targets past the end yield the last sample. Negative targets yield the
/// first one. A zero-length segment bracketing the target yields its start.
pub fn coordinates_at_distance(coords: &[Coordinate], target_meters: f64) -> Result<RoutePoint> {
    let first = coords.first().ok_or(PlannerError::EmptyRoute)?;
    if target_meters <= 0.0 {
        return Ok(first.into());
    }

    let mut cumulative = 0.0;
    for pair in coords.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        let segment = segment_length(prev, curr);

        if cumulative + segment >= target_meters {
            if segment <= 0.0 {
                return Ok(prev.into());
            }
            let ratio = ((target_meters - cumulative) / segment).clamp(0.0, 1.0);
            return Ok(RoutePoint {
                latitude: lerp(prev[0], curr[0], ratio),
                longitude: lerp(prev[1], curr[1], ratio),
                elevation: lerp(prev[2], curr[2], ratio),
            });
        }

        cumulative += segment;
    }

    Ok(coords.last().unwrap_or(first).into())
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::geodesy::route_length;

    fn straight_route() -> Vec<Coordinate> {
        vec![
            [39.0, -120.0, 1000.0],
            [39.01, -120.0, 1100.0],
            [39.02, -120.0, 1050.0],
        ]
    }

    #[test]
    fn test_empty_route_is_error() {
        let err = coordinates_at_distance(&[], 100.0).unwrap_err();
        assert!(matches!(err, PlannerError::EmptyRoute));
    }

    #[test]
    fn test_zero_target_returns_first_sample() {
        let route = straight_route();
        let p = coordinates_at_distance(&route, 0.0).unwrap();
        assert_eq!(p, RoutePoint::from(&route[0]));
    }

    #[test]
    fn test_negative_target_returns_first_sample() {
        let route = straight_route();
        let p = coordinates_at_distance(&route, -50.0).unwrap();
        assert_eq!(p, RoutePoint::from(&route[0]));
    }

    #[test]
    fn test_past_end_returns_last_sample() {
        let route = straight_route();
        let total = route_length(&route);
        let p = coordinates_at_distance(&route, total + 1000.0).unwrap();
        assert_eq!(p, RoutePoint::from(&route[2]));
    }

    #[test]
    fn test_midpoint_of_first_segment() {
        let route = straight_route();
        let half = segment_length(&route[0], &route[1]) / 2.0;
        let p = coordinates_at_distance(&route, half).unwrap();
        assert!((p.latitude - 39.005).abs() < 1e-9);
        assert!((p.elevation - 1050.0).abs() < 1e-6);
    }

    #[test]
    fn test_single_sample_route() {
        let route = vec![[45.0, 7.0, 2000.0]];
        assert_eq!(
            coordinates_at_distance(&route, 500.0).unwrap(),
            RoutePoint::from(&route[0])
        );
    }

    #[test]
    fn test_zero_length_segment() {
        let route = vec![[45.0, 7.0, 2000.0], [45.0, 7.0, 2000.0], [45.01, 7.0, 2010.0]];
        let p = coordinates_at_distance(&route, 10.0).unwrap();
        assert!(p.latitude.is_finite());
        assert!(p.latitude > 45.0 && p.latitude < 45.01);
    }
}
