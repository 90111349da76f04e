//! Plan commands for ultraplan: leg table, calculation and exports

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cli::output::{print_json, truncate};
use crate::cli::{CommandContext, OutputFormat};
use crate::error::{PlannerError, Result};
use crate::export::csv::{csv_file_name, plan_csv_string, write_plan_csv};
use crate::export::geojson::plan_map;
use crate::export::print::render_print_plan;
use crate::export::{end_waypoint, leg_waypoint_name};
use crate::models::{CalculatedLeg, Event, RouteData, Waypoint};
use crate::route::profile::{build_profile, sparkline};
use crate::time_utils::{format_clock_time, format_long_date};
use crate::units::{format_clock_duration, format_hours_minutes, DisplayUnits};

/// Everything the plan views are rendered from
#[derive(Debug, Serialize)]
pub struct PlanData {
    pub event: Event,
    pub waypoints: Vec<Waypoint>,
    pub route: Option<RouteData>,
    pub legs: Vec<CalculatedLeg>,
}

/// Treat a failed optional fetch as absent data
fn optional<T>(what: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) if e.is_not_found() => {
            debug!(what, "Not available yet");
            None
        }
        Err(e) => {
            warn!(what, error = %e, "Skipping optional data");
            None
        }
    }
}

/// Fetch event and waypoints (required), then route and legs (optional)
pub async fn load_plan(ctx: &CommandContext, event_id: &str) -> Result<PlanData> {
    let (event, waypoints) = tokio::try_join!(
        ctx.client.get_event(event_id),
        ctx.client.list_waypoints(event_id)
    )?;

    let route = optional("route", ctx.client.get_route(event_id).await)
        .filter(|r| !r.coordinates().is_empty());
    let mut legs = optional("legs", ctx.client.get_legs(event_id).await).unwrap_or_default();
    legs.sort_by_key(|l| l.leg_number);

    Ok(PlanData {
        event,
        waypoints,
        route,
        legs,
    })
}

fn print_leg_table(legs: &[CalculatedLeg], waypoints: &[Waypoint], units: DisplayUnits) {
    let dist = units.distance_label();
    let elev = units.elevation_label();
    println!(
        "{:>3} {:<20} {:<10} {:>9} {:>7} {:>7} {:>6} {:>6} {:>8} {:>6} {:>5} {:>6} {:>9} {:>9}",
        "Leg",
        "Waypoint",
        "Type",
        format!("Dist {}", dist),
        format!("+{}", elev),
        format!("-{}", elev),
        "Base",
        "Adj",
        "Leg",
        "Arrive",
        "Stop",
        "Exit",
        format!("Cum {}", dist),
        "Cum Time"
    );
    println!("{}", "-".repeat(125));

    for leg in legs {
        let kind = end_waypoint(leg, waypoints)
            .map(|w| w.waypoint_type.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>3} {:<20} {:<10} {:>9.2} {:>7.0} {:>7.0} {:>6} {:>6} {:>8} {:>6} {:>5} {:>6} {:>9.2} {:>9}",
            leg.leg_number,
            truncate(&leg_waypoint_name(leg, waypoints), 20),
            kind,
            units.distance(leg.leg_distance.unwrap_or(0.0)),
            units.elevation(leg.elevation_gain.unwrap_or(0.0)),
            units.elevation(leg.elevation_loss.unwrap_or(0.0)),
            units.format_pace(leg.base_pace),
            units.format_pace(leg.adjusted_pace),
            format_clock_duration(leg.leg_time_minutes()),
            format_clock_time(leg.expected_arrival_time.as_deref()),
            leg.stop_time_minutes.unwrap_or(0),
            format_clock_time(leg.exit_time.as_deref()),
            units.distance(leg.cumulative_distance.unwrap_or(0.0)),
            format_clock_duration(leg.cumulative_time_minutes)
        );
    }
}

/// Show the plan dashboard for an event
pub async fn show(ctx: &CommandContext, event_id: Option<String>) -> Result<()> {
    let event_id = ctx.event_id(event_id)?;
    let plan = load_plan(ctx, &event_id).await?;

    match ctx.format {
        OutputFormat::Json => return print_json(&plan),
        OutputFormat::Csv => {
            let stdout = std::io::stdout();
            return write_plan_csv(stdout.lock(), &plan.event, &plan.legs, &plan.waypoints);
        }
        OutputFormat::Table => {}
    }

    let units = ctx.display_units().await;
    let event = &plan.event;

    println!("{}", event.name);
    println!("{}", format_long_date(&event.planned_date));
    let metadata = plan.route.as_ref().and_then(|r| r.metadata.as_ref());
    if let Some(m) = metadata {
        println!(
            "{} | +{} / -{}",
            units.format_distance(Some(m.total_distance_meters)),
            units.format_elevation(Some(m.elevation_gain_meters)),
            units.format_elevation(Some(m.elevation_loss_meters))
        );
    } else {
        println!("No route uploaded. Use `ultraplan events upload-gpx`.");
    }
    println!(
        "Target: {} | Waypoints: {}",
        format_hours_minutes(event.target_duration_minutes.map(f64::from)),
        plan.waypoints.len()
    );
    println!();

    if ctx.store.is_stale(&event_id)? {
        println!("Waypoints or pacing changed since the last calculation.");
        println!("Recalculate with `ultraplan plan calculate`.");
        println!();
    }

    if plan.legs.is_empty() {
        println!("No calculations yet. Add waypoints and run `ultraplan plan calculate`.");
        return Ok(());
    }

    print_leg_table(&plan.legs, &plan.waypoints, units);
    Ok(())
}

/// Ask the backend to recompute legs
pub async fn calculate(ctx: &CommandContext, event_id: Option<String>) -> Result<()> {
    let event_id = ctx.event_id(event_id)?;
    let result = ctx.client.calculate(&event_id).await?;
    ctx.store.clear_stale(&event_id)?;
    info!(event_id = %event_id, legs = result.legs_count, "Calculated legs");

    if ctx.format == OutputFormat::Json {
        return print_json(&result);
    }
    println!(
        "{}",
        result
            .message
            .unwrap_or_else(|| format!("Calculated {} legs", result.legs_count))
    );
    Ok(())
}

/// Write the plan CSV; `-` writes to stdout
pub async fn export_csv(
    ctx: &CommandContext,
    event_id: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let event_id = ctx.event_id(event_id)?;
    let plan = load_plan(ctx, &event_id).await?;
    if plan.legs.is_empty() {
        return Err(PlannerError::invalid_param(
            "No calculations yet. Run `ultraplan plan calculate` first",
        ));
    }

    if output.as_deref() == Some(Path::new("-")) {
        let stdout = std::io::stdout();
        return write_plan_csv(stdout.lock(), &plan.event, &plan.legs, &plan.waypoints);
    }

    let path = output.unwrap_or_else(|| PathBuf::from(csv_file_name(&plan.event.name)));
    let csv = plan_csv_string(&plan.event, &plan.legs, &plan.waypoints)?;
    tokio::fs::write(&path, csv).await?;
    println!("Saved to: {}", path.display());
    Ok(())
}

/// Printable plan to stdout or a file
pub async fn print(
    ctx: &CommandContext,
    event_id: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let event_id = ctx.event_id(event_id)?;
    let plan = load_plan(ctx, &event_id).await?;
    let text = render_print_plan(&plan.event, plan.route.as_ref(), &plan.legs, &plan.waypoints);

    match output {
        Some(path) => {
            tokio::fs::write(&path, text).await?;
            println!("Saved to: {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

/// Elevation profile as chart JSON or a terminal summary
pub async fn elevation(
    ctx: &CommandContext,
    event_id: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let event_id = ctx.event_id(event_id)?;
    let (route, waypoints) = tokio::try_join!(
        ctx.client.get_route(&event_id),
        ctx.client.list_waypoints(&event_id)
    )?;
    let profile = build_profile(&route, &waypoints).ok_or(PlannerError::EmptyRoute)?;

    if let Some(path) = output {
        tokio::fs::write(&path, serde_json::to_vec_pretty(&profile)?).await?;
        println!("Saved to: {}", path.display());
        return Ok(());
    }
    if ctx.format == OutputFormat::Json {
        return print_json(&profile);
    }

    let stats = &profile.stats;
    println!("Elevation Profile");
    println!("{}", sparkline(&profile.points, 72));
    println!(
        "0 mi{:>width$}",
        format!("{:.1} mi", stats.total_distance_miles),
        width = 68
    );
    println!();
    println!("Total Distance:  {:.2} mi", stats.total_distance_miles);
    println!("Min Elevation:   {:.0} ft", stats.min_elevation_feet);
    println!("Max Elevation:   {:.0} ft", stats.max_elevation_feet);
    println!("Elevation Gain:  {} ft", stats.elevation_gain_feet);
    println!("Elevation Loss:  {} ft", stats.elevation_loss_feet);

    if !profile.markers.is_empty() {
        println!();
        println!("{:<24} {:<11} {:>9} {:>9}", "Waypoint", "Type", "Mile", "Feet");
        println!("{}", "-".repeat(56));
        for m in &profile.markers {
            println!(
                "{:<24} {:<11} {:>9.2} {:>9.0}",
                truncate(&m.label, 24),
                m.waypoint_type,
                m.distance_miles,
                m.elevation_feet
            );
        }
    }
    Ok(())
}

/// Route and waypoints as GeoJSON
pub async fn map(
    ctx: &CommandContext,
    event_id: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let event_id = ctx.event_id(event_id)?;
    let (route, waypoints) = tokio::try_join!(
        ctx.client.get_route(&event_id),
        ctx.client.list_waypoints(&event_id)
    )?;
    if route.coordinates().is_empty() {
        return Err(PlannerError::EmptyRoute);
    }

    let collection = plan_map(&route, &waypoints);
    write_geojson(&collection, output).await
}

pub(crate) async fn write_geojson(
    collection: &geojson::FeatureCollection,
    output: Option<PathBuf>,
) -> Result<()> {
    let json = serde_json::to_string_pretty(collection)?;
    match output {
        Some(path) => {
            tokio::fs::write(&path, json).await?;
            println!("Saved to: {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
