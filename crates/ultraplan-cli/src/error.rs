use thiserror::Error;

/// Main error type for ultraplan
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("No route coordinates available. Upload a GPX file first.")]
    EmptyRoute,

    #[error("Cannot {action} {name} waypoint")]
    ProtectedWaypoint { name: String, action: &'static str },

    #[error("Chat stream error: {0}")]
    Stream(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    /// Create a configuration error from a message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid response error from a message
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Create an invalid parameter error from a message
    pub fn invalid_param(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Create an invalid duration error from a message
    pub fn invalid_duration(msg: impl Into<String>) -> Self {
        Self::InvalidDuration(msg.into())
    }

    /// Whether the backend answered 404 for the requested resource
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Render an error as a single line suitable for stderr.
pub fn format_user_error(err: &PlannerError) -> String {
    match err {
        PlannerError::Http(e) if e.is_connect() => {
            "Could not reach the planner backend. Is it running? (set --api-url or ULTRAPLAN_API_URL)"
                .to_string()
        }
        PlannerError::Http(e) if e.is_timeout() => {
            "The planner backend did not respond in time.".to_string()
        }
        PlannerError::Api { status, message } if message.is_empty() => {
            format!("Backend returned HTTP {}", status)
        }
        PlannerError::Api { status, message } => {
            format!("Backend returned HTTP {}: {}", status, message)
        }
        other => other.to_string(),
    }
}
