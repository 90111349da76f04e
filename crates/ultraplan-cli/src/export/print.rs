//! Printable text version of the plan

use std::fmt::Write;

use crate::models::{CalculatedLeg, Event, RouteData, Waypoint};
use crate::time_utils::{format_clock_time, format_long_date};
use crate::units::{format_clock_duration, format_feet, format_miles, format_pace};

use super::end_waypoint;

/// Render the event header followed by a block per leg
pub fn render_print_plan(
    event: &Event,
    route: Option<&RouteData>,
    legs: &[CalculatedLeg],
    waypoints: &[Waypoint],
) -> String {
    let mut out = String::new();
    let metadata = route.and_then(|r| r.metadata.as_ref());
    let rule = "=".repeat(60);

    // Writing to a String cannot fail
    let _ = writeln!(out, "{}", event.name);
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Date:            {}", format_long_date(&event.planned_date));
    let _ = writeln!(
        out,
        "Distance:        {} miles",
        format_miles(metadata.map(|m| m.total_distance_meters))
    );
    let _ = writeln!(
        out,
        "Target Duration: {}",
        format_clock_duration(event.target_duration_minutes.map(f64::from))
    );
    let _ = writeln!(
        out,
        "Elevation Gain:  {} ft",
        format_feet(metadata.map(|m| m.elevation_gain_meters))
    );
    let _ = writeln!(
        out,
        "Elevation Loss:  {} ft",
        format_feet(metadata.map(|m| m.elevation_loss_meters))
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Leg-by-Leg Breakdown");
    let _ = writeln!(out, "{}", "-".repeat(60));

    if legs.is_empty() {
        let _ = writeln!(out, "No calculations yet.");
        return out;
    }

    for leg in legs {
        let waypoint = end_waypoint(leg, waypoints);
        let name = waypoint
            .and_then(|w| w.name.clone())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Waypoint".to_string());

        let _ = writeln!(out);
        let _ = writeln!(out, "Leg {}: {}", leg.leg_number, name);
        if let Some(wp) = waypoint {
            let _ = writeln!(out, "  Waypoint Type:       {}", wp.waypoint_type);
        }
        let _ = writeln!(out, "  Leg Distance:        {} mi", format_miles(leg.leg_distance));
        let _ = writeln!(out, "  Elevation Gain:      {} ft", format_feet(leg.elevation_gain));
        let _ = writeln!(out, "  Elevation Loss:      {} ft", format_feet(leg.elevation_loss));
        let _ = writeln!(
            out,
            "  Elevation:           {} ft",
            format_feet(waypoint.and_then(|w| w.elevation))
        );
        let _ = writeln!(out, "  Base Pace:           {} min/mi", format_pace(leg.base_pace));
        let _ = writeln!(out, "  Adjusted Pace:       {} min/mi", format_pace(leg.adjusted_pace));
        let _ = writeln!(
            out,
            "  Leg Time:            {}",
            format_clock_duration(Some(leg.leg_distance_miles() * leg.adjusted_pace.unwrap_or(0.0)))
        );
        let _ = writeln!(
            out,
            "  Arrival Time:        {}",
            format_clock_time(leg.expected_arrival_time.as_deref())
        );
        let _ = writeln!(out, "  Stop Time:           {} min", leg.stop_time_minutes.unwrap_or(0));
        let _ = writeln!(
            out,
            "  Exit Time:           {}",
            format_clock_time(leg.exit_time.as_deref())
        );
        let _ = writeln!(
            out,
            "  Cumulative Distance: {} mi",
            format_miles(leg.cumulative_distance)
        );
        let _ = writeln!(
            out,
            "  Cumulative Time:     {}",
            format_clock_duration(leg.cumulative_time_minutes)
        );
        if let Some(comments) = waypoint.and_then(|w| w.comments.as_deref()) {
            if !comments.is_empty() {
                let _ = writeln!(out, "  Notes:               {}", comments);
            }
        }
    }

    out
}
