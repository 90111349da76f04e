//! Event (race) models for the planner API
//!
//! An event is the race being planned. Distance is stored in miles by the
//! backend, everything derived from the GPX file in meters.

use serde::{Deserialize, Serialize};

use crate::units::meters_to_miles;

/// Event returned by the events endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Unique event identifier
    pub id: String,

    /// Race name
    pub name: String,

    /// Planned start (ISO 8601)
    pub planned_date: String,

    /// Distance in miles, derived from the route once a GPX is uploaded
    #[serde(default)]
    pub distance: Option<f64>,

    /// Target finish time in minutes
    #[serde(default)]
    pub target_duration_minutes: Option<u32>,

    /// Slowdown percent per meter of climbing
    #[serde(default)]
    pub elevation_gain_adjustment_percent: f64,

    /// Speedup percent per meter of descent (usually negative)
    #[serde(default)]
    pub elevation_descent_adjustment_percent: f64,

    /// Linear slowdown from start to finish
    #[serde(default)]
    pub fatigue_slowdown_percent: f64,

    /// Route metadata, present after a GPX upload
    #[serde(default)]
    pub gpx_metadata: Option<GpxMetadata>,

    pub created_at: String,

    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Aggregate route metadata computed by the backend from a GPX file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GpxMetadata {
    #[serde(default)]
    pub total_distance_meters: f64,

    #[serde(default)]
    pub elevation_gain_meters: f64,

    #[serde(default)]
    pub elevation_loss_meters: f64,

    #[serde(default)]
    pub min_elevation: Option<f64>,

    #[serde(default)]
    pub max_elevation: Option<f64>,

    /// `[[min_lat, min_lon], [max_lat, max_lon]]`
    #[serde(default)]
    pub bounding_box: Option<[[f64; 2]; 2]>,

    #[serde(default)]
    pub original_points: Option<u64>,

    #[serde(default)]
    pub simplified_points: Option<u64>,

    /// Whether the uploaded file carried per-point timestamps
    #[serde(default)]
    pub has_timestamps: Option<bool>,

    #[serde(default)]
    pub timestamp_duration_minutes: Option<f64>,

    #[serde(default)]
    pub first_timestamp: Option<String>,

    #[serde(default)]
    pub last_timestamp: Option<String>,
}

impl GpxMetadata {
    /// File timing data, when the upload contained timestamps
    pub fn file_timing(&self) -> Option<FileTiming> {
        if !self.has_timestamps.unwrap_or(false) {
            return None;
        }
        Some(FileTiming {
            duration_minutes: self.timestamp_duration_minutes?,
            first_timestamp: self.first_timestamp.clone()?,
            last_timestamp: self.last_timestamp.clone()?,
        })
    }
}

/// Timing found in an uploaded GPX file
#[derive(Debug, Clone, PartialEq)]
pub struct FileTiming {
    pub duration_minutes: f64,
    pub first_timestamp: String,
    pub last_timestamp: String,
}

impl Event {
    /// Route length in miles: the event distance, else the GPX metadata
    pub fn distance_miles(&self) -> Option<f64> {
        self.distance.or_else(|| {
            self.gpx_metadata
                .as_ref()
                .map(|m| meters_to_miles(m.total_distance_meters))
        })
    }

    /// Average pace needed to hit the target, in minutes per mile
    pub fn average_pace(&self) -> Option<f64> {
        let target = self.target_duration_minutes? as f64;
        let distance = self.distance?;
        if distance <= 0.0 {
            return None;
        }
        Some(target / distance)
    }
}

/// Body for creating an event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventDraft {
    pub name: String,
    pub planned_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_duration_minutes: Option<u32>,
    pub elevation_gain_adjustment_percent: f64,
    pub elevation_descent_adjustment_percent: f64,
    pub fatigue_slowdown_percent: f64,
}

/// Partial update for an event; unset fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EventUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_duration_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_gain_adjustment_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_descent_adjustment_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fatigue_slowdown_percent: Option<f64>,
}

impl EventUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Response from the GPX upload endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub metadata: Option<GpxMetadata>,
}
