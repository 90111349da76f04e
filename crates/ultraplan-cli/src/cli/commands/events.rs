//! Event commands for ultraplan

use std::path::Path;

use tracing::info;

use crate::cli::output::{confirm, print_csv, print_json, truncate};
use crate::cli::{CommandContext, OutputFormat};
use crate::error::{PlannerError, Result};
use crate::models::{Event, EventDraft, EventUpdate, FileTiming, UploadResponse};
use crate::time_utils::{format_date, format_long_date, normalize_planned_date};
use crate::units::{
    format_feet, format_hours_minutes, format_miles, parse_target_duration, whole_minutes,
};

/// Fields accepted by `events create` and `events update`
#[derive(Debug, Clone, Default)]
pub struct EventFields {
    pub name: Option<String>,
    pub date: Option<String>,
    /// Target duration as `HH:MM:SS`
    pub duration: Option<String>,
    pub gain_adjustment: Option<f64>,
    pub descent_adjustment: Option<f64>,
    pub fatigue: Option<f64>,
}

fn parse_date(input: &str) -> Result<String> {
    normalize_planned_date(input).ok_or_else(|| {
        PlannerError::invalid_param(format!(
            "Invalid date: {}. Use YYYY-MM-DD or YYYY-MM-DDTHH:MM",
            input
        ))
    })
}

/// Build a create body; adjustment percents default to 0
pub fn build_draft(fields: &EventFields) -> Result<EventDraft> {
    let name = fields
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| PlannerError::invalid_param("Event name is required"))?;
    let date = fields
        .date
        .as_deref()
        .ok_or_else(|| PlannerError::invalid_param("Planned date is required"))?;

    Ok(EventDraft {
        name: name.to_string(),
        planned_date: parse_date(date)?,
        target_duration_minutes: fields
            .duration
            .as_deref()
            .map(parse_target_duration)
            .transpose()?,
        elevation_gain_adjustment_percent: fields.gain_adjustment.unwrap_or(0.0),
        elevation_descent_adjustment_percent: fields.descent_adjustment.unwrap_or(0.0),
        fatigue_slowdown_percent: fields.fatigue.unwrap_or(0.0),
    })
}

/// Build a partial update from the given fields
pub fn build_update(fields: &EventFields) -> Result<EventUpdate> {
    Ok(EventUpdate {
        name: fields.name.clone(),
        planned_date: fields.date.as_deref().map(parse_date).transpose()?,
        target_duration_minutes: fields
            .duration
            .as_deref()
            .map(parse_target_duration)
            .transpose()?,
        elevation_gain_adjustment_percent: fields.gain_adjustment,
        elevation_descent_adjustment_percent: fields.descent_adjustment,
        fatigue_slowdown_percent: fields.fatigue,
    })
}

fn distance_label(event: &Event) -> String {
    event
        .distance
        .map(|d| format!("{:.2} mi", d))
        .unwrap_or_else(|| "N/A".to_string())
}

/// List events
pub async fn list(ctx: &CommandContext) -> Result<()> {
    let events = ctx.client.list_events().await?;

    match ctx.format {
        OutputFormat::Json => return print_json(&events),
        OutputFormat::Csv => {
            return print_csv(
                &["id", "name", "date", "distance_mi", "target_minutes"],
                events.iter().map(|e| {
                    [
                        e.id.clone(),
                        e.name.clone(),
                        format_date(&e.planned_date),
                        e.distance.map(|d| format!("{:.2}", d)).unwrap_or_default(),
                        e.target_duration_minutes
                            .map(|m| m.to_string())
                            .unwrap_or_default(),
                    ]
                }),
            )
        }
        OutputFormat::Table => {}
    }

    if events.is_empty() {
        println!("No events found. Create one with `ultraplan events create`.");
        return Ok(());
    }

    let default_event = ctx.store.load()?.default_event;

    println!(
        "{:<38} {:<30} {:<12} {:>12}",
        "ID", "Name", "Date", "Distance"
    );
    println!("{}", "-".repeat(95));

    for event in &events {
        let marker = if default_event.as_deref() == Some(event.id.as_str()) {
            "*"
        } else {
            " "
        };
        println!(
            "{:<37}{} {:<30} {:<12} {:>12}",
            event.id,
            marker,
            truncate(&event.name, 30),
            format_date(&event.planned_date),
            distance_label(event)
        );
    }

    println!("\nShowing {} events", events.len());
    Ok(())
}

/// Print the event summary card
pub fn print_summary(event: &Event) {
    let metadata = event.gpx_metadata.as_ref();

    println!("{}", event.name);
    println!("{}", "=".repeat(60));
    println!("ID:               {}", event.id);
    println!("Date:             {}", format_long_date(&event.planned_date));
    let distance = match (event.distance, metadata) {
        (Some(d), _) => format!("{:.2} miles", d),
        (None, Some(m)) => format!("{} miles", format_miles(Some(m.total_distance_meters))),
        (None, None) => "No route uploaded".to_string(),
    };
    println!("Distance:         {}", distance);
    if let Some(m) = metadata {
        println!(
            "Elevation Gain:   {} feet",
            format_feet(Some(m.elevation_gain_meters))
        );
        println!(
            "Elevation Loss:   {} feet",
            format_feet(Some(m.elevation_loss_meters))
        );
    }
    println!(
        "Target Duration:  {}",
        format_hours_minutes(event.target_duration_minutes.map(f64::from))
    );
    if let Some(pace) = event.average_pace() {
        println!("Average Pace:     {:.2} min/mile", pace);
    }
    println!();
    println!("Pace Adjustments");
    println!(
        "  Elevation gain:    {}% per meter",
        event.elevation_gain_adjustment_percent
    );
    println!(
        "  Elevation descent: {}% per meter",
        event.elevation_descent_adjustment_percent
    );
    println!(
        "  Fatigue slowdown:  {}%",
        event.fatigue_slowdown_percent
    );
}

/// Show one event
pub async fn show(ctx: &CommandContext, event_id: Option<String>) -> Result<()> {
    let event_id = ctx.event_id(event_id)?;
    let event = ctx.client.get_event(&event_id).await?;

    if ctx.format == OutputFormat::Json {
        return print_json(&event);
    }
    print_summary(&event);
    Ok(())
}

/// Create an event
pub async fn create(ctx: &CommandContext, fields: EventFields, make_default: bool) -> Result<()> {
    let draft = build_draft(&fields)?;
    let event = ctx.client.create_event(&draft).await?;
    info!(event_id = %event.id, "Created event");

    if make_default {
        ctx.store
            .update(|p| p.default_event = Some(event.id.clone()))?;
    }

    if ctx.format == OutputFormat::Json {
        return print_json(&event);
    }
    println!("Created event {} ({})", event.name, event.id);
    if make_default {
        println!("Set as default event.");
    }
    Ok(())
}

/// Update an event, including its pace adjustments
pub async fn update(
    ctx: &CommandContext,
    event_id: Option<String>,
    fields: EventFields,
) -> Result<()> {
    let event_id = ctx.event_id(event_id)?;
    let update = build_update(&fields)?;
    if update.is_empty() {
        return Err(PlannerError::invalid_param("Nothing to update"));
    }

    let event = ctx.client.update_event(&event_id, &update).await?;

    // Pacing inputs changed; legs must be recalculated
    if update.target_duration_minutes.is_some()
        || update.planned_date.is_some()
        || update.elevation_gain_adjustment_percent.is_some()
        || update.elevation_descent_adjustment_percent.is_some()
        || update.fatigue_slowdown_percent.is_some()
    {
        ctx.store.mark_stale(&event_id)?;
    }

    if ctx.format == OutputFormat::Json {
        return print_json(&event);
    }
    println!("Updated event {}", event.name);
    Ok(())
}

/// Delete an event
pub async fn delete(ctx: &CommandContext, event_id: &str, yes: bool) -> Result<()> {
    if !yes && !confirm(&format!("Delete event {}?", event_id))? {
        println!("Cancelled.");
        return Ok(());
    }

    ctx.client.delete_event(event_id).await?;
    ctx.store.update(|p| {
        p.stale_events.remove(event_id);
        if p.default_event.as_deref() == Some(event_id) {
            p.default_event = None;
        }
    })?;
    println!("Deleted event {}", event_id);
    Ok(())
}

/// Report file timing found in an upload
fn print_file_timing(timing: &FileTiming) {
    println!("File timing data:");
    println!(
        "  Duration: {}",
        format_hours_minutes(Some(timing.duration_minutes))
    );
    println!("  Start:    {}", format_long_date(&timing.first_timestamp));
    println!("  End:      {}", format_long_date(&timing.last_timestamp));
}

async fn after_upload(
    ctx: &CommandContext,
    event_id: &str,
    response: &UploadResponse,
    use_file_timing: bool,
) -> Result<()> {
    let timing = response.metadata.as_ref().and_then(|m| m.file_timing());

    if ctx.format == OutputFormat::Json {
        print_json(response)?;
    } else {
        println!("{}", response.message);
        if let Some(m) = &response.metadata {
            println!(
                "Route: {} mi, +{} ft / -{} ft",
                format_miles(Some(m.total_distance_meters)),
                format_feet(Some(m.elevation_gain_meters)),
                format_feet(Some(m.elevation_loss_meters))
            );
        }
        if let Some(t) = &timing {
            print_file_timing(t);
        }
    }

    match (timing, use_file_timing) {
        (Some(t), true) => {
            let minutes = whole_minutes(t.duration_minutes)?;
            let update = EventUpdate {
                target_duration_minutes: Some(minutes),
                ..Default::default()
            };
            ctx.client.update_event(event_id, &update).await?;
            ctx.store.mark_stale(event_id)?;
            if ctx.format != OutputFormat::Json {
                println!(
                    "Target duration set to {} from file timestamps.",
                    format_hours_minutes(Some(minutes as f64))
                );
            }
        }
        (Some(_), false) if ctx.format != OutputFormat::Json => {
            println!("Pass --use-file-timing to use it as the target duration.");
        }
        (None, true) => {
            return Err(PlannerError::invalid_param(
                "The uploaded file has no timestamps to take the target duration from",
            ));
        }
        _ => {}
    }
    Ok(())
}

/// Upload the planned route GPX
pub async fn upload_gpx(
    ctx: &CommandContext,
    event_id: Option<String>,
    file: &Path,
    use_file_timing: bool,
) -> Result<()> {
    let event_id = ctx.event_id(event_id)?;
    let response = ctx.client.upload_gpx(&event_id, file).await?;
    if !response.success {
        return Err(PlannerError::invalid_response(response.message));
    }
    ctx.store.mark_stale(&event_id)?;
    after_upload(ctx, &event_id, &response, use_file_timing).await
}

/// Upload the actual GPX/TCX recorded during the race
pub async fn upload_actual(
    ctx: &CommandContext,
    event_id: Option<String>,
    file: &Path,
    use_file_timing: bool,
) -> Result<()> {
    let event_id = ctx.event_id(event_id)?;
    let response = ctx.client.upload_actual(&event_id, file).await?;
    if !response.success {
        return Err(PlannerError::invalid_response(response.message));
    }
    after_upload(ctx, &event_id, &response, use_file_timing).await
}

/// Fetch the simplified route
pub async fn route(
    ctx: &CommandContext,
    event_id: Option<String>,
    output: Option<&Path>,
) -> Result<()> {
    let event_id = ctx.event_id(event_id)?;
    let route = ctx.client.get_route(&event_id).await?;

    if let Some(path) = output {
        tokio::fs::write(path, serde_json::to_vec_pretty(&route)?).await?;
        println!("Saved route to: {}", path.display());
        return Ok(());
    }

    if ctx.format == OutputFormat::Json {
        return print_json(&route);
    }

    let coords = route.coordinates();
    if coords.is_empty() {
        println!("No route uploaded yet.");
        return Ok(());
    }
    println!("Points:         {}", coords.len());
    if let Some(m) = &route.metadata {
        println!(
            "Distance:       {} mi",
            format_miles(Some(m.total_distance_meters))
        );
        println!(
            "Elevation:      +{} ft / -{} ft",
            format_feet(Some(m.elevation_gain_meters)),
            format_feet(Some(m.elevation_loss_meters))
        );
        if let (Some(orig), Some(simple)) = (m.original_points, m.simplified_points) {
            println!("Simplified:     {} -> {} points", orig, simple);
        }
    }
    Ok(())
}
