//! Command-line layer: shared context, output helpers and subcommands

pub mod commands;
pub mod output;

pub use output::OutputFormat;

use tracing::debug;

use crate::client::PlannerClient;
use crate::config::{ClientConfig, ProfileStore};
use crate::error::{PlannerError, Result};
use crate::units::DisplayUnits;

/// Everything a command needs: backend client, profile store, output format
pub struct CommandContext {
    pub client: PlannerClient,
    pub store: ProfileStore,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Resolve the backend URL and open the profile
    pub fn new(
        profile: Option<String>,
        api_url: Option<String>,
        format: OutputFormat,
    ) -> Result<Self> {
        let store = ProfileStore::new(profile)?;
        let config = ClientConfig::resolve(api_url.as_deref(), &store.load()?)?;
        debug!(
            profile = store.profile(),
            api_url = %config.api_url,
            source = config.source.describe(),
            "Resolved backend"
        );
        let client = PlannerClient::new(&config.api_url)?;
        Ok(Self::from_parts(client, store, format))
    }

    pub fn from_parts(client: PlannerClient, store: ProfileStore, format: OutputFormat) -> Self {
        Self {
            client,
            store,
            format,
        }
    }

    /// The given event id, else the profile's default event
    pub fn event_id(&self, explicit: Option<String>) -> Result<String> {
        if let Some(id) = explicit {
            return Ok(id);
        }
        self.store.load()?.default_event.ok_or_else(|| {
            PlannerError::invalid_param(
                "No event given. Pass --event or run `ultraplan config set --default-event <ID>`",
            )
        })
    }

    /// Display units from backend settings; defaults when unavailable
    pub async fn display_units(&self) -> DisplayUnits {
        match self.client.get_settings().await {
            Ok(settings) => settings.display_units(),
            Err(e) => {
                debug!(error = %e, "Using default display units");
                DisplayUnits::default()
            }
        }
    }
}
