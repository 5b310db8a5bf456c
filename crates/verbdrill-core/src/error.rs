//! Error types shared across verbdrill crates.
//!
//! `ProviderError` lives here rather than in `verbdrill-providers` so the
//! generation client can downcast backend failures and classify them without
//! string matching.

use thiserror::Error;

/// Errors that can occur when talking to a text-generation backend.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No credential was configured for the backend.
    #[error("missing credential for provider '{0}'")]
    MissingCredential(String),

    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Authentication failed (invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested model was not found.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Returns `true` if the failure is down to credentials rather than the
    /// request itself.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ProviderError::MissingCredential(_) | ProviderError::AuthenticationFailed(_)
        )
    }
}

/// Terminal failure of a verb generation request.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Credential missing or rejected. Raised before any network attempt when
    /// the credential is absent.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The backend was unreachable or its payload did not match the schema.
    #[error("generation failed: {0}")]
    Generation(String),

    /// The caller asked for something that cannot be sent (blank topic, zero count).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Failure to persist the verb collection.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to serialize verb collection: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write slot '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// A quiz operation was attempted in a state that does not allow it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: String,
    },
}
