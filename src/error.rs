use thiserror::Error;

/// Main error type for the scoreboard service.
///
/// The reconciliation core never produces these; they come from obtaining the
/// feeds, loading configuration, or serving results.
#[derive(Error, Debug)]
pub enum ScorelineError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    // Network errors
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{feed} feed returned {status}: {body}")]
    Upstream {
        feed: &'static str,
        status: u16,
        body: String,
    },

    // Feed shape errors
    #[error("Invalid {feed} feed: {reason}")]
    InvalidFeed { feed: &'static str, reason: String },

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for ScorelineError
pub type Result<T> = std::result::Result<T, ScorelineError>;

impl ScorelineError {
    /// Whether the failure came from an upstream feed rather than this process.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            ScorelineError::Http(_)
                | ScorelineError::Upstream { .. }
                | ScorelineError::InvalidFeed { .. }
        )
    }
}
