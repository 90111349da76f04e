//! Waypoint commands for ultraplan

use tracing::info;

use crate::cli::output::{confirm, print_csv, print_json, truncate};
use crate::cli::{CommandContext, OutputFormat};
use crate::error::{PlannerError, Result};
use crate::models::Waypoint;
use crate::route::placement::{plan_new_waypoint, plan_waypoint_edit, NewWaypoint, WaypointEdit};
use crate::units::{meters_to_miles, DisplayUnits};

/// Waypoints ordered by their position along the route
fn sorted(mut waypoints: Vec<Waypoint>) -> Vec<Waypoint> {
    waypoints.sort_by(|a, b| {
        a.order_index
            .unwrap_or(0)
            .cmp(&b.order_index.unwrap_or(0))
            .then(a.distance_or_zero().total_cmp(&b.distance_or_zero()))
    });
    waypoints
}

pub fn print_table(waypoints: &[Waypoint], units: DisplayUnits) {
    println!(
        "{:<38} {:>5} {:<24} {:<11} {:>11} {:>10} {:>6}",
        "ID", "Order", "Name", "Type", "Distance", "Elevation", "Stop"
    );
    println!("{}", "-".repeat(112));

    for wp in waypoints {
        println!(
            "{:<38} {:>5} {:<24} {:<11} {:>11} {:>10} {:>6}",
            wp.id,
            wp.order_index
                .map(|i| i.to_string())
                .unwrap_or_else(|| "-".to_string()),
            truncate(&wp.display_name(), 24),
            wp.waypoint_type,
            units.format_distance(wp.distance_from_start),
            wp.elevation
                .map(|e| units.format_elevation(Some(e)))
                .unwrap_or_else(|| "-".to_string()),
            format!("{}m", wp.stop_time_minutes)
        );
    }
}

/// List an event's waypoints
pub async fn list(ctx: &CommandContext, event_id: Option<String>) -> Result<()> {
    let event_id = ctx.event_id(event_id)?;
    let waypoints = sorted(ctx.client.list_waypoints(&event_id).await?);

    match ctx.format {
        OutputFormat::Json => print_json(&waypoints),
        OutputFormat::Csv => print_csv(
            &[
                "id",
                "order_index",
                "name",
                "type",
                "distance_mi",
                "elevation_m",
                "stop_time_minutes",
                "comments",
            ],
            waypoints.iter().map(|wp| {
                [
                    wp.id.clone(),
                    wp.order_index.map(|i| i.to_string()).unwrap_or_default(),
                    wp.display_name(),
                    wp.waypoint_type.to_string(),
                    format!("{:.2}", meters_to_miles(wp.distance_or_zero())),
                    wp.elevation.map(|e| format!("{:.0}", e)).unwrap_or_default(),
                    wp.stop_time_minutes.to_string(),
                    wp.comments.clone().unwrap_or_default(),
                ]
            }),
        ),
        OutputFormat::Table => {
            if waypoints.is_empty() {
                println!("No waypoints yet. Upload a GPX file to create START and FINISH.");
                return Ok(());
            }
            let units = ctx.display_units().await;
            print_table(&waypoints, units);
            println!("\nShowing {} waypoints", waypoints.len());
            Ok(())
        }
    }
}

/// Place a new waypoint at a distance along the route
pub async fn add(ctx: &CommandContext, event_id: Option<String>, input: NewWaypoint) -> Result<()> {
    let event_id = ctx.event_id(event_id)?;
    let (route, existing) = tokio::try_join!(
        ctx.client.get_route(&event_id),
        ctx.client.list_waypoints(&event_id)
    )?;

    let draft = plan_new_waypoint(&event_id, &input, &route, &existing)?;
    let created = ctx.client.create_waypoint(&draft).await?;
    ctx.store.mark_stale(&event_id)?;
    info!(waypoint_id = %created.id, order_index = draft.order_index, "Created waypoint");

    if ctx.format == OutputFormat::Json {
        return print_json(&created);
    }
    println!(
        "Added {} at {:.2} mi ({:.5}, {:.5})",
        created.display_name(),
        meters_to_miles(draft.distance_from_start),
        draft.latitude,
        draft.longitude
    );
    println!("Run `ultraplan plan calculate` to update the plan.");
    Ok(())
}

/// Edit a waypoint; START and FINISH cannot be renamed or moved
pub async fn edit(ctx: &CommandContext, waypoint_id: &str, edit: WaypointEdit) -> Result<()> {
    let waypoint = ctx.client.get_waypoint(waypoint_id).await?;

    let route = match &edit.distance_miles {
        Some(_) => Some(ctx.client.get_route(&waypoint.event_id).await?),
        None => None,
    };
    let update = plan_waypoint_edit(&waypoint, &edit, route.as_ref())?;
    if update.is_empty() {
        return Err(PlannerError::invalid_param("Nothing to update"));
    }

    let updated = ctx.client.update_waypoint(waypoint_id, &update).await?;
    ctx.store.mark_stale(&waypoint.event_id)?;

    if ctx.format == OutputFormat::Json {
        return print_json(&updated);
    }
    println!("Updated {}", updated.display_name());
    if update.distance_from_start.is_some() {
        println!(
            "Moved to {:.2} mi",
            meters_to_miles(updated.distance_or_zero())
        );
    }
    println!("Run `ultraplan plan calculate` to update the plan.");
    Ok(())
}

/// Delete a waypoint; START and FINISH are refused
pub async fn delete(ctx: &CommandContext, waypoint_id: &str, yes: bool) -> Result<()> {
    let waypoint = ctx.client.get_waypoint(waypoint_id).await?;
    waypoint.ensure_mutable("delete")?;

    let name = waypoint.display_name();
    if !yes
        && !confirm(&format!(
            "Delete waypoint \"{}\"? This will require recalculating.",
            name
        ))?
    {
        println!("Cancelled.");
        return Ok(());
    }

    ctx.client.delete_waypoint(waypoint_id).await?;
    ctx.store.mark_stale(&waypoint.event_id)?;
    println!("Deleted waypoint {}", name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_by_order_then_distance() {
        let waypoints: Vec<Waypoint> = serde_json::from_value(serde_json::json!([
            {"id": "f", "event_id": "e", "name": "FINISH", "waypoint_type": "checkpoint",
             "latitude": 0, "longitude": 0, "order_index": 999999, "distance_from_start": 100,
             "created_at": "x"},
            {"id": "a", "event_id": "e", "waypoint_type": "food",
             "latitude": 0, "longitude": 0, "order_index": 1, "distance_from_start": 50,
             "created_at": "x"},
            {"id": "s", "event_id": "e", "name": "START", "waypoint_type": "checkpoint",
             "latitude": 0, "longitude": 0, "order_index": 0, "distance_from_start": 0,
             "created_at": "x"}
        ]))
        .unwrap();
        let ids: Vec<String> = sorted(waypoints).into_iter().map(|w| w.id).collect();
        assert_eq!(ids, vec!["s", "a", "f"]);
    }
}
