use thiserror::Error;

/// Everything a generation attempt can fail with. None of these are fatal:
/// the UI renders the message and leaves the trigger actionable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// A required field is blank. Raised before any prompt is built.
    #[error("{0}")]
    Validation(String),

    /// No usable API key. Raised before any network activity.
    #[error("API key required. {0}")]
    Configuration(String),

    /// The provider call failed or was rejected.
    #[error("{0}")]
    Generation(String),
}
