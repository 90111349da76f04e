//! Waypoint models
//!
//! START and FINISH are created by the backend on GPX upload and are only
//! told apart by name. The client refuses to delete, rename or move them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

pub const START_NAME: &str = "START";
pub const FINISH_NAME: &str = "FINISH";

/// Kind of stop at a waypoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaypointType {
    #[default]
    Checkpoint,
    Food,
    Water,
    Rest,
}

impl WaypointType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Checkpoint => "checkpoint",
            Self::Food => "food",
            Self::Water => "water",
            Self::Rest => "rest",
        }
    }
}

impl fmt::Display for WaypointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for WaypointType {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "checkpoint" => Ok(Self::Checkpoint),
            "food" => Ok(Self::Food),
            "water" => Ok(Self::Water),
            "rest" => Ok(Self::Rest),
            _ => Err(PlannerError::invalid_param(format!(
                "Unknown waypoint type: {}. Supported: checkpoint, food, water, rest",
                s
            ))),
        }
    }
}

/// Waypoint placed along an event's route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: String,

    pub event_id: String,

    #[serde(default)]
    pub name: Option<String>,

    pub waypoint_type: WaypointType,

    pub latitude: f64,

    pub longitude: f64,

    #[serde(default)]
    pub elevation: Option<f64>,

    #[serde(default)]
    pub stop_time_minutes: u32,

    #[serde(default)]
    pub comments: Option<String>,

    #[serde(default)]
    pub order_index: Option<i64>,

    /// Along-route distance in meters
    #[serde(default)]
    pub distance_from_start: Option<f64>,

    pub created_at: String,
}

impl Waypoint {
    /// START or FINISH
    pub fn is_system(&self) -> bool {
        matches!(self.name.as_deref(), Some(START_NAME) | Some(FINISH_NAME))
    }

    /// Name for display, falling back to `Waypoint {order_index}`
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => match self.order_index {
                Some(idx) => format!("Waypoint {}", idx),
                None => "Waypoint".to_string(),
            },
        }
    }

    /// Short label used on charts, `WP{order_index}` when unnamed
    pub fn chart_label(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("WP{}", self.order_index.unwrap_or_default()),
        }
    }

    pub fn distance_or_zero(&self) -> f64 {
        self.distance_from_start.unwrap_or(0.0)
    }

    /// Refuse an edit that would alter a START/FINISH waypoint
    pub fn ensure_mutable(&self, action: &'static str) -> Result<(), PlannerError> {
        if self.is_system() {
            return Err(PlannerError::ProtectedWaypoint {
                name: self.name.clone().unwrap_or_default(),
                action,
            });
        }
        Ok(())
    }
}

/// Body for creating a waypoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaypointDraft {
    pub event_id: String,
    pub name: String,
    pub waypoint_type: WaypointType,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub distance_from_start: f64,
    pub order_index: i64,
    pub stop_time_minutes: u32,
    pub comments: String,
}

/// Partial update for a waypoint; unset fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WaypointUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waypoint_type: Option<WaypointType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_from_start: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_time_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl WaypointUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Whether the update renames or relocates the waypoint
    pub fn touches_identity(&self) -> bool {
        self.name.is_some() || self.latitude.is_some() || self.distance_from_start.is_some()
    }
}
