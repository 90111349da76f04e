//! Calculated leg models

use serde::{Deserialize, Serialize};

use crate::units::meters_to_miles;

/// One leg of the computed pacing plan, between two consecutive waypoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatedLeg {
    pub id: String,

    pub event_id: String,

    /// 1-based leg number
    pub leg_number: u32,

    /// Absent for the first leg, which starts at the route start
    #[serde(default)]
    pub start_waypoint_id: Option<String>,

    #[serde(default)]
    pub end_waypoint_id: Option<String>,

    /// Leg distance in meters
    #[serde(default)]
    pub leg_distance: Option<f64>,

    /// Elevation gain in meters
    #[serde(default)]
    pub elevation_gain: Option<f64>,

    /// Elevation loss in meters
    #[serde(default)]
    pub elevation_loss: Option<f64>,

    /// Base pace in minutes per mile
    #[serde(default)]
    pub base_pace: Option<f64>,

    /// Pace after elevation and fatigue adjustments, minutes per mile
    #[serde(default)]
    pub adjusted_pace: Option<f64>,

    #[serde(default)]
    pub expected_arrival_time: Option<String>,

    #[serde(default)]
    pub stop_time_minutes: Option<u32>,

    #[serde(default)]
    pub exit_time: Option<String>,

    /// Cumulative distance in meters
    #[serde(default)]
    pub cumulative_distance: Option<f64>,

    #[serde(default)]
    pub cumulative_time_minutes: Option<f64>,

    pub created_at: String,
}

impl CalculatedLeg {
    pub fn leg_distance_miles(&self) -> f64 {
        meters_to_miles(self.leg_distance.unwrap_or(0.0))
    }

    /// Moving time for the leg: miles times adjusted pace
    pub fn leg_time_minutes(&self) -> Option<f64> {
        let pace = self.adjusted_pace?;
        let distance = self.leg_distance?;
        Some(meters_to_miles(distance) * pace)
    }
}

/// Response from the calculate endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResult {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub legs_count: u32,
}
