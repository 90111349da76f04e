//! Backend settings commands

use crate::cli::output::print_json;
use crate::cli::{CommandContext, OutputFormat};
use crate::error::{PlannerError, Result};
use crate::models::settings::is_masked_key;
use crate::models::SettingsUpdate;

fn key_status(key: Option<&str>) -> &str {
    match key {
        Some(k) if !k.is_empty() => k,
        _ => "not set",
    }
}

pub async fn show(ctx: &CommandContext) -> Result<()> {
    let settings = ctx.client.get_settings().await?;

    if ctx.format == OutputFormat::Json {
        return print_json(&settings);
    }

    let units = settings.display_units();
    println!("Distance unit:      {:?}", settings.distance_unit);
    println!("Elevation unit:     {:?}", settings.elevation_unit);
    println!("Pace format:        {}", settings.pace_format);
    println!(
        "OpenAI API key:     {}",
        key_status(settings.openai_api_key.as_deref())
    );
    println!(
        "OpenRouter API key: {}",
        key_status(settings.openrouter_api_key.as_deref())
    );
    println!();
    println!(
        "Tables show distance in {} and elevation in {}.",
        units.distance_label(),
        units.elevation_label()
    );
    Ok(())
}

/// Apply a partial settings update
pub async fn set(ctx: &CommandContext, update: SettingsUpdate) -> Result<()> {
    let masked = [&update.openai_api_key, &update.openrouter_api_key]
        .into_iter()
        .flatten()
        .any(|k| is_masked_key(k));
    let update = update.without_masked_keys();
    if update.is_empty() {
        if masked {
            println!("Masked API keys are left unchanged.");
            return Ok(());
        }
        return Err(PlannerError::invalid_param("Nothing to update"));
    }

    let settings = ctx.client.update_settings(&update).await?;
    if ctx.format == OutputFormat::Json {
        return print_json(&settings);
    }
    println!("Settings updated.");
    Ok(())
}
