//! Route geometry as served by the backend

use serde::{Deserialize, Serialize};

use super::event::GpxMetadata;

/// A route sample: latitude, longitude, elevation in meters
pub type Coordinate = [f64; 3];

/// Polyline wrapper used by the backend for stored routes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteGeometry {
    #[serde(default)]
    pub coordinates: Vec<Coordinate>,
}

/// Response of `GET /api/events/{id}/route`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteData {
    #[serde(default)]
    pub route: Option<RouteGeometry>,

    #[serde(default)]
    pub metadata: Option<GpxMetadata>,
}

impl RouteData {
    pub fn coordinates(&self) -> &[Coordinate] {
        self.route
            .as_ref()
            .map(|r| r.coordinates.as_slice())
            .unwrap_or(&[])
    }

    pub fn total_distance_meters(&self) -> Option<f64> {
        self.metadata.as_ref().map(|m| m.total_distance_meters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_data_null_route() {
        let data: RouteData =
            serde_json::from_value(serde_json::json!({"route": null, "metadata": null})).unwrap();
        assert!(data.coordinates().is_empty());
        assert!(data.total_distance_meters().is_none());
    }

    #[test]
    fn test_route_data_coordinates() {
        let data: RouteData = serde_json::from_value(serde_json::json!({
            "route": {"coordinates": [[39.1, -120.2, 1890.0], [39.2, -120.1, 1950.5]]},
            "metadata": {"total_distance_meters": 14000.0, "elevation_gain_meters": 60.5, "elevation_loss_meters": 0}
        }))
        .unwrap();
        assert_eq!(data.coordinates().len(), 2);
        assert_eq!(data.coordinates()[1][2], 1950.5);
        assert_eq!(data.total_distance_meters(), Some(14000.0));
    }
}
