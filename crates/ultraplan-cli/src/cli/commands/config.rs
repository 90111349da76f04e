//! Local profile configuration commands

use serde_json::json;

use crate::cli::output::{confirm, print_json};
use crate::cli::OutputFormat;
use crate::config::{validate_api_url, ClientConfig, ProfileStore};
use crate::error::{PlannerError, Result};

/// Show the profile and the backend URL that would be used
pub fn show(store: &ProfileStore, api_url: Option<&str>, format: OutputFormat) -> Result<()> {
    let profile = store.load()?;
    let resolved = ClientConfig::resolve(api_url, &profile)?;

    if format == OutputFormat::Json {
        return print_json(&json!({
            "profile": store.profile(),
            "path": store.path(),
            "api_url": resolved.api_url,
            "api_url_source": resolved.source.describe(),
            "default_event": profile.default_event,
            "stale_events": profile.stale_events,
        }));
    }

    println!("Profile:       {}", store.profile());
    println!("File:          {}", store.path().display());
    println!(
        "API URL:       {} ({})",
        resolved.api_url,
        resolved.source.describe()
    );
    println!(
        "Default event: {}",
        profile.default_event.as_deref().unwrap_or("none")
    );
    if !profile.stale_events.is_empty() {
        println!("Needs recalculation:");
        for id in &profile.stale_events {
            println!("  {}", id);
        }
    }
    Ok(())
}

pub fn set(
    store: &ProfileStore,
    api_url: Option<String>,
    default_event: Option<String>,
) -> Result<()> {
    if api_url.is_none() && default_event.is_none() {
        return Err(PlannerError::invalid_param(
            "Nothing to set. Pass --api-url and/or --default-event",
        ));
    }
    if let Some(url) = &api_url {
        validate_api_url(url)?;
    }

    store.update(|p| {
        if let Some(url) = api_url {
            p.api_url = Some(url.trim_end_matches('/').to_string());
        }
        if let Some(event) = default_event {
            p.default_event = Some(event);
        }
    })?;
    println!("Saved profile '{}'", store.profile());
    Ok(())
}

pub fn clear(store: &ProfileStore, yes: bool) -> Result<()> {
    if !yes && !confirm(&format!("Clear profile '{}'?", store.profile()))? {
        println!("Cancelled.");
        return Ok(());
    }
    store.clear()?;
    println!("Cleared profile '{}'", store.profile());
    Ok(())
}
