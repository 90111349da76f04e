mod profile;

pub use profile::{Profile, ProfileStore};

use std::path::Path;
use std::path::PathBuf;

use crate::client::DEFAULT_API_URL;
use crate::error::{PlannerError, Result};

/// Default configuration directory name
const CONFIG_DIR_NAME: &str = "ultraplan";

/// Get the configuration directory path
/// Returns ~/.config/ultraplan on Unix, ~/Library/Application Support/ultraplan on macOS
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join(CONFIG_DIR_NAME))
        .ok_or_else(|| PlannerError::config("Could not determine config directory"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Where the backend URL came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlSource {
    /// `--api-url` or `ULTRAPLAN_API_URL`
    Override,
    Profile,
    Default,
}

impl UrlSource {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Override => "command line / environment",
            Self::Profile => "profile",
            Self::Default => "default",
        }
    }
}

/// Resolved settings used to build the HTTP client
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_url: String,
    pub source: UrlSource,
}

impl ClientConfig {
    /// Pick the backend URL: explicit override, then profile, then default
    pub fn resolve(override_url: Option<&str>, profile: &Profile) -> Result<Self> {
        let (api_url, source) = match override_url.filter(|u| !u.trim().is_empty()) {
            Some(url) => (url.to_string(), UrlSource::Override),
            None => match &profile.api_url {
                Some(url) => (url.clone(), UrlSource::Profile),
                None => (DEFAULT_API_URL.to_string(), UrlSource::Default),
            },
        };

        validate_api_url(&api_url)?;
        Ok(Self { api_url, source })
    }
}

/// Only http(s) URLs are accepted
pub fn validate_api_url(url: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(PlannerError::config(format!(
            "API URL must start with http:// or https://: {}",
            url
        )))
    }
}
