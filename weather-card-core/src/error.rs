use thiserror::Error;

/// Failure of a single weather lookup.
///
/// Network failures, unknown places and provider-side errors are not told
/// apart: every one of them ends up as a banner with `message`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("{message}")]
    FetchFailed { message: String },
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        FetchError::FetchFailed { message: message.into() }
    }

    /// Human-readable text shown in the error banner.
    pub fn message(&self) -> &str {
        match self {
            FetchError::FetchFailed { message } => message,
        }
    }
}
