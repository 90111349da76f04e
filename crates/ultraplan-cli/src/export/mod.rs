//! Exports of a computed plan: CSV, printable text and GeoJSON map overlays

pub mod csv;
pub mod geojson;
pub mod print;

use crate::models::{CalculatedLeg, Waypoint};

/// Waypoint a leg ends at
pub fn end_waypoint<'a>(leg: &CalculatedLeg, waypoints: &'a [Waypoint]) -> Option<&'a Waypoint> {
    let id = leg.end_waypoint_id.as_deref()?;
    waypoints.iter().find(|w| w.id == id)
}

/// Name shown for the waypoint a leg ends at
pub fn leg_waypoint_name(leg: &CalculatedLeg, waypoints: &[Waypoint]) -> String {
    if leg.end_waypoint_id.is_none() {
        return "Start".to_string();
    }
    match end_waypoint(leg, waypoints) {
        Some(wp) => wp.display_name(),
        None => "Waypoint".to_string(),
    }
}
