//! Planned vs actual comparison models

use serde::{Deserialize, Serialize};

use super::event::GpxMetadata;
use super::leg::CalculatedLeg;
use super::route::Coordinate;

/// Response of `GET /api/calculations/events/{id}/comparison`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Comparison {
    #[serde(default)]
    pub planned_route: Option<StoredRoute>,

    #[serde(default)]
    pub actual_route: Option<StoredRoute>,

    #[serde(default)]
    pub planned_legs: Vec<CalculatedLeg>,

    #[serde(default)]
    pub comparison_summary: ComparisonSummary,

    #[serde(default)]
    pub leg_comparisons: Vec<LegComparison>,

    #[serde(default)]
    pub waypoints: Vec<WaypointRef>,
}

/// Route as stored on the event; the actual route also carries metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredRoute {
    #[serde(default)]
    pub coordinates: Vec<Coordinate>,

    #[serde(default)]
    pub metadata: Option<GpxMetadata>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonSummary {
    #[serde(default, alias = "planned_distance")]
    pub planned_distance_meters: f64,

    #[serde(default, alias = "actual_distance")]
    pub actual_distance_meters: f64,

    #[serde(default)]
    pub distance_diff_meters: Option<f64>,

    #[serde(default)]
    pub distance_diff_percent: Option<f64>,

    #[serde(default)]
    pub planned_elevation_gain_meters: Option<f64>,

    #[serde(default)]
    pub actual_elevation_gain_meters: Option<f64>,

    #[serde(default)]
    pub elevation_diff_meters: Option<f64>,

    #[serde(default)]
    pub planned_duration_minutes: Option<f64>,

    #[serde(default)]
    pub actual_duration_minutes: Option<f64>,

    #[serde(default)]
    pub time_diff_minutes: Option<f64>,

    #[serde(default)]
    pub time_diff_percent: Option<f64>,

    #[serde(default)]
    pub has_actual_timestamps: bool,

    #[serde(default)]
    pub planned_avg_pace: Option<f64>,

    #[serde(default)]
    pub actual_avg_pace: Option<f64>,
}

impl ComparisonSummary {
    /// Actual minus planned, in meters
    pub fn distance_diff(&self) -> f64 {
        self.actual_distance_meters - self.planned_distance_meters
    }

    /// Signed percent difference relative to the planned distance
    pub fn distance_diff_pct(&self) -> Option<f64> {
        if self.planned_distance_meters == 0.0 {
            return None;
        }
        Some(self.distance_diff() / self.planned_distance_meters * 100.0)
    }
}

/// Per-leg planned vs estimated actual times
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegComparison {
    pub leg_number: u32,

    #[serde(default)]
    pub waypoint_name: Option<String>,

    #[serde(default)]
    pub planned_leg_time_minutes: f64,

    #[serde(default)]
    pub estimated_actual_leg_time_minutes: f64,

    #[serde(default)]
    pub leg_time_diff_minutes: f64,

    #[serde(default)]
    pub cumulative_planned_time_minutes: f64,

    #[serde(default)]
    pub cumulative_actual_time_minutes: f64,

    #[serde(default)]
    pub cumulative_time_diff_minutes: f64,

    #[serde(default)]
    pub planned_pace: Option<f64>,

    #[serde(default)]
    pub distance_miles: Option<f64>,

    #[serde(default)]
    pub cumulative_distance_miles: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaypointRef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub order_index: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_distance_diff() {
        let summary = ComparisonSummary {
            planned_distance_meters: 160934.0,
            actual_distance_meters: 164152.68,
            ..Default::default()
        };
        assert!((summary.distance_diff() - 3218.68).abs() < 1e-6);
        assert!((summary.distance_diff_pct().unwrap() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_accepts_short_field_names() {
        let summary: ComparisonSummary = serde_json::from_value(serde_json::json!({
            "planned_distance": 1000.0,
            "actual_distance": 900.0
        }))
        .unwrap();
        assert_eq!(summary.distance_diff(), -100.0);
        assert!(summary.distance_diff_pct().unwrap() < 0.0);
    }

    #[test]
    fn test_zero_planned_distance_has_no_percent() {
        assert!(ComparisonSummary::default().distance_diff_pct().is_none());
    }
}
