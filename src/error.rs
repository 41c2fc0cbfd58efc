use thiserror::Error;

/// Unified error type for release-stats operations
#[derive(Error, Debug)]
pub enum ReleaseStatsError {
    #[error("Failed to fetch releases for {repo}: {reason}")]
    Fetch { repo: String, reason: String },

    #[error("Malformed release {id}: field '{field}' has invalid value '{value}'")]
    MalformedRelease {
        id: String,
        field: String,
        value: String,
    },

    #[error("Release {id} has neither a title nor a tag name")]
    MissingIdentifier { id: String },

    #[error("Internal invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Processing {repo} failed: {source}")]
    Repository {
        repo: String,
        #[source]
        source: Box<ReleaseStatsError>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-stats
pub type Result<T> = std::result::Result<T, ReleaseStatsError>;

impl ReleaseStatsError {
    /// Create a fetch error for a repository
    pub fn fetch(repo: impl Into<String>, reason: impl Into<String>) -> Self {
        ReleaseStatsError::Fetch {
            repo: repo.into(),
            reason: reason.into(),
        }
    }

    /// Create a malformed release error naming the offending field
    pub fn malformed(
        id: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        ReleaseStatsError::MalformedRelease {
            id: id.into(),
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a missing identifier error
    pub fn missing_identifier(id: impl Into<String>) -> Self {
        ReleaseStatsError::MissingIdentifier { id: id.into() }
    }

    /// Create an invariant violation error
    pub fn invariant(msg: impl Into<String>) -> Self {
        ReleaseStatsError::InvariantViolation(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseStatsError::Config(msg.into())
    }

    /// Attach the repository identifier to an error
    pub fn in_repository(self, repo: impl Into<String>) -> Self {
        match self {
            already @ ReleaseStatsError::Repository { .. } => already,
            other => ReleaseStatsError::Repository {
                repo: repo.into(),
                source: Box::new(other),
            },
        }
    }

    /// True for errors that indicate a programming defect and must abort a batch
    pub fn is_fatal(&self) -> bool {
        match self {
            ReleaseStatsError::InvariantViolation(_) => true,
            ReleaseStatsError::Repository { source, .. } => source.is_fatal(),
            _ => false,
        }
    }

    /// True for errors raised while normalizing a single release record
    pub fn is_record_error(&self) -> bool {
        matches!(
            self,
            ReleaseStatsError::MalformedRelease { .. } | ReleaseStatsError::MissingIdentifier { .. }
        )
    }
}
