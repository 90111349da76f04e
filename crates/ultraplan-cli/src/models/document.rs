//! Reference documents used as chat context

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Extensions the backend can extract text from
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "txt", "docx", "md", "markdown"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,

    pub filename: String,

    pub file_type: String,

    #[serde(default)]
    pub summary: Option<String>,

    pub uploaded_at: String,
}

/// Reject files the backend would not accept, before any upload
pub fn check_supported(path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(PlannerError::invalid_param(format!(
            "Unsupported file type: {}. Supported: {}",
            path.display(),
            SUPPORTED_EXTENSIONS.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        assert!(check_supported(Path::new("notes/race-guide.PDF")).is_ok());
        assert!(check_supported(Path::new("plan.markdown")).is_ok());
        assert!(check_supported(Path::new("crew.docx")).is_ok());
    }

    #[test]
    fn test_unsupported_extensions() {
        assert!(check_supported(Path::new("map.png")).is_err());
        assert!(check_supported(Path::new("README")).is_err());
    }
}
