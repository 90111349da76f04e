use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;

const PROFILE_FILENAME: &str = "profile.json";

/// Locally persisted client state for one profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Backend base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Event used when a command omits `--event`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_event: Option<String>,

    /// Events whose waypoints changed since the last calculation
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub stale_events: BTreeSet<String>,
}

/// Manages the profile file under the config directory.
pub struct ProfileStore {
    profile: String,
    base_dir: PathBuf,
}

impl ProfileStore {
    /// Open the store for the given profile, `default` when unset
    pub fn new(profile: Option<String>) -> Result<Self> {
        let profile = profile.unwrap_or_else(|| "default".to_string());
        let base_dir = super::config_dir()?.join(&profile);
        super::ensure_dir(&base_dir)?;

        Ok(Self { profile, base_dir })
    }

    /// Create a profile store with a custom base directory (for testing)
    pub fn with_dir(profile: impl Into<String>, base_dir: PathBuf) -> Result<Self> {
        let profile = profile.into();
        let dir = base_dir.join(&profile);
        super::ensure_dir(&dir)?;

        Ok(Self {
            profile,
            base_dir: dir,
        })
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn path(&self) -> PathBuf {
        self.base_dir.join(PROFILE_FILENAME)
    }

    /// Load the profile; a missing file yields the default profile
    pub fn load(&self) -> Result<Profile> {
        let path = self.path();
        if !path.exists() {
            return Ok(Profile::default());
        }
        let json = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save(&self, profile: &Profile) -> Result<()> {
        let json = serde_json::to_string_pretty(profile)?;
        fs::write(self.path(), json)?;
        Ok(())
    }

    /// Load, apply `f`, and save
    pub fn update<F: FnOnce(&mut Profile)>(&self, f: F) -> Result<Profile> {
        let mut profile = self.load()?;
        f(&mut profile);
        self.save(&profile)?;
        Ok(profile)
    }

    /// Remove the profile file
    pub fn clear(&self) -> Result<()> {
        let path = self.path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    pub fn mark_stale(&self, event_id: &str) -> Result<()> {
        self.update(|p| {
            p.stale_events.insert(event_id.to_string());
        })?;
        Ok(())
    }

    pub fn clear_stale(&self, event_id: &str) -> Result<()> {
        self.update(|p| {
            p.stale_events.remove(event_id);
        })?;
        Ok(())
    }

    pub fn is_stale(&self, event_id: &str) -> Result<bool> {
        Ok(self.load()?.stale_events.contains(event_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> ProfileStore {
        ProfileStore::with_dir("test_profile", dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_profile_store_creation() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        assert_eq!(store.profile(), "test_profile");
        assert!(store.path().ends_with("test_profile/profile.json"));
    }

    #[test]
    fn test_load_missing_profile() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(store(&temp_dir).load().unwrap(), Profile::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        let profile = Profile {
            api_url: Some("http://planner.local:8000".into()),
            default_event: Some("e1".into()),
            ..Default::default()
        };
        store.save(&profile).unwrap();
        assert_eq!(store.load().unwrap(), profile);
    }

    #[test]
    fn test_stale_tracking() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);

        assert!(!store.is_stale("e1").unwrap());
        store.mark_stale("e1").unwrap();
        store.mark_stale("e2").unwrap();
        assert!(store.is_stale("e1").unwrap());

        store.clear_stale("e1").unwrap();
        assert!(!store.is_stale("e1").unwrap());
        assert!(store.is_stale("e2").unwrap());
    }

    #[test]
    fn test_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        store.mark_stale("e1").unwrap();
        assert!(store.path().exists());

        store.clear().unwrap();
        assert!(!store.path().exists());
        // Clearing twice is fine
        store.clear().unwrap();
    }
}
