//! Planned vs actual comparison commands

use std::path::PathBuf;

use crate::cli::output::{print_csv, print_json, truncate};
use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::export::geojson::comparison_map;
use crate::models::{Comparison, ComparisonSummary};
use crate::units::{format_clock_duration, format_pace, meters_to_feet, meters_to_miles};

use super::plan::write_geojson;

const NO_ACTUAL: &str = "No actual race data uploaded yet. Use `ultraplan events upload-actual`.";

/// Comparison, or None when no actual GPX has been uploaded
async fn load(ctx: &CommandContext, event_id: &str) -> Result<Option<Comparison>> {
    match ctx.client.get_comparison(event_id).await {
        Ok(c) if c.actual_route.is_some() => Ok(Some(c)),
        Ok(_) => Ok(None),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

fn signed(value: f64, decimals: usize) -> String {
    format!("{:+.*}", decimals, value)
}

fn signed_minutes(minutes: f64) -> String {
    let sign = if minutes < 0.0 { "-" } else { "+" };
    let text = format_clock_duration(Some(minutes.abs()));
    if text.starts_with("--") {
        "0:00:00".to_string()
    } else {
        format!("{}{}", sign, text)
    }
}

fn print_summary(summary: &ComparisonSummary) {
    println!("Distance");
    println!(
        "  Planned: {:.2} mi   Actual: {:.2} mi   Diff: {} mi{}",
        meters_to_miles(summary.planned_distance_meters),
        meters_to_miles(summary.actual_distance_meters),
        signed(meters_to_miles(summary.distance_diff()), 2),
        summary
            .distance_diff_pct()
            .map(|p| format!(" ({}%)", signed(p, 1)))
            .unwrap_or_default()
    );

    if let (Some(planned), Some(actual)) = (
        summary.planned_elevation_gain_meters,
        summary.actual_elevation_gain_meters,
    ) {
        println!("Elevation Gain");
        println!(
            "  Planned: {:.0} ft   Actual: {:.0} ft   Diff: {} ft",
            meters_to_feet(planned),
            meters_to_feet(actual),
            signed(meters_to_feet(actual - planned), 0)
        );
    }

    if let (Some(planned), Some(actual)) = (
        summary.planned_duration_minutes,
        summary.actual_duration_minutes,
    ) {
        println!("Duration");
        println!(
            "  Planned: {}   Actual: {}   Diff: {}{}",
            format_clock_duration(Some(planned)),
            format_clock_duration(Some(actual)),
            signed_minutes(actual - planned),
            summary
                .time_diff_percent
                .map(|p| format!(" ({}%)", signed(p, 1)))
                .unwrap_or_default()
        );
        println!(
            "  Avg pace: planned {} /mi, actual {} /mi",
            format_pace(summary.planned_avg_pace),
            format_pace(summary.actual_avg_pace)
        );
    } else if !summary.has_actual_timestamps {
        println!("Actual file has no timestamps; timing comparison unavailable.");
    }
}

/// Compare the uploaded actual track to the plan
pub async fn show(ctx: &CommandContext, event_id: Option<String>) -> Result<()> {
    let event_id = ctx.event_id(event_id)?;
    let Some(comparison) = load(ctx, &event_id).await? else {
        println!("{}", NO_ACTUAL);
        return Ok(());
    };

    match ctx.format {
        OutputFormat::Json => return print_json(&comparison),
        OutputFormat::Csv => {
            let rows = comparison.leg_comparisons.iter().map(|l| {
                vec![
                    l.leg_number.to_string(),
                    l.waypoint_name.clone().unwrap_or_default(),
                    format!("{:.1}", l.planned_leg_time_minutes),
                    format!("{:.1}", l.estimated_actual_leg_time_minutes),
                    format!("{:.1}", l.leg_time_diff_minutes),
                    format!("{:.1}", l.cumulative_time_diff_minutes),
                ]
            });
            return print_csv(
                &[
                    "leg",
                    "waypoint",
                    "planned_min",
                    "actual_min",
                    "diff_min",
                    "cumulative_diff_min",
                ],
                rows,
            );
        }
        OutputFormat::Table => {}
    }

    print_summary(&comparison.comparison_summary);

    if comparison.leg_comparisons.is_empty() {
        return Ok(());
    }

    println!();
    println!(
        "{:>3} {:<20} {:>9} {:>10} {:>10} {:>10} {:>10}",
        "Leg", "Waypoint", "Cum mi", "Planned", "Actual", "Diff", "Cum Diff"
    );
    println!("{}", "-".repeat(78));
    for leg in &comparison.leg_comparisons {
        println!(
            "{:>3} {:<20} {:>9.2} {:>10} {:>10} {:>10} {:>10}",
            leg.leg_number,
            truncate(leg.waypoint_name.as_deref().unwrap_or("-"), 20),
            leg.cumulative_distance_miles.unwrap_or(0.0),
            format_clock_duration(Some(leg.planned_leg_time_minutes)),
            format_clock_duration(Some(leg.estimated_actual_leg_time_minutes)),
            signed_minutes(leg.leg_time_diff_minutes),
            signed_minutes(leg.cumulative_time_diff_minutes)
        );
    }
    Ok(())
}

/// Planned and actual tracks as GeoJSON
pub async fn map(
    ctx: &CommandContext,
    event_id: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let event_id = ctx.event_id(event_id)?;
    let Some(comparison) = load(ctx, &event_id).await? else {
        println!("{}", NO_ACTUAL);
        return Ok(());
    };
    write_geojson(&comparison_map(&comparison), output).await
}
