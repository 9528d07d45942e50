//! Media provider error types.
//!
//! Classified so callers can decide what is worth retrying without
//! string matching. In practice the UI surfaces everything as a
//! warning and moves on.

use thiserror::Error;

/// Errors from speech or image providers.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Authentication failed (invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested voice was not found.
    #[error("voice not found: {0}")]
    VoiceNotFound(String),

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

impl MediaError {
    /// Returns `true` if this error is permanent and should not be retried.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            MediaError::AuthenticationFailed(_) | MediaError::VoiceNotFound(_)
        )
    }

    /// Returns the retry-after delay in milliseconds, if applicable.
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            MediaError::RateLimited { retry_after_ms } => Some(*retry_after_ms),
            _ => None,
        }
    }
}
