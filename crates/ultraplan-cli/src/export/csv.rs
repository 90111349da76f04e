//! CSV export of the leg-by-leg plan

use std::io::Write;

use crate::error::{PlannerError, Result};
use crate::models::{CalculatedLeg, Event, Waypoint};
use crate::time_utils::{format_clock_time, format_date};
use crate::units::{format_clock_duration, format_miles, format_pace};

use super::leg_waypoint_name;

pub const CSV_HEADERS: [&str; 13] = [
    "Leg",
    "Waypoint",
    "Distance (mi)",
    "Elevation Gain (m)",
    "Elevation Loss (m)",
    "Base Pace",
    "Adjusted Pace",
    "Leg Time",
    "Arrival Time",
    "Stop Time (min)",
    "Exit Time",
    "Cumulative Distance (mi)",
    "Cumulative Time",
];

/// `{event name}_plan.csv` with every whitespace run replaced by `_`
pub fn csv_file_name(event_name: &str) -> String {
    let mut out = String::with_capacity(event_name.len() + 9);
    let mut in_space = false;
    for c in event_name.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out.push_str("_plan.csv");
    out
}

fn whole_meters(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.0}", v))
        .unwrap_or_else(|| "0".to_string())
}

/// Write the preamble, header and one row per leg
pub fn write_plan_csv<W: Write>(
    mut out: W,
    event: &Event,
    legs: &[CalculatedLeg],
    waypoints: &[Waypoint],
) -> Result<()> {
    let target = event.target_duration_minutes.unwrap_or(0);
    writeln!(out, "Event: {}", event.name)?;
    writeln!(out, "Date: {}", format_date(&event.planned_date))?;
    writeln!(out, "Target Duration: {}h {}m", target / 60, target % 60)?;
    writeln!(out)?;

    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(CSV_HEADERS)?;

    for leg in legs {
        writer.write_record([
            leg.leg_number.to_string(),
            leg_waypoint_name(leg, waypoints),
            format_miles(leg.leg_distance),
            whole_meters(leg.elevation_gain),
            whole_meters(leg.elevation_loss),
            format_pace(leg.base_pace),
            format_pace(leg.adjusted_pace),
            format_clock_duration(leg.leg_time_minutes()),
            format_clock_time(leg.expected_arrival_time.as_deref()),
            leg.stop_time_minutes.unwrap_or(0).to_string(),
            format_clock_time(leg.exit_time.as_deref()),
            format_miles(leg.cumulative_distance),
            format_clock_duration(leg.cumulative_time_minutes),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Render the plan CSV to a string
pub fn plan_csv_string(
    event: &Event,
    legs: &[CalculatedLeg],
    waypoints: &[Waypoint],
) -> Result<String> {
    let mut buf = Vec::new();
    write_plan_csv(&mut buf, event, legs, waypoints)?;
    String::from_utf8(buf).map_err(|e| PlannerError::Other(e.to_string()))
}
