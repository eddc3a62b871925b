//! Text Generation Port - interface to the generative-AI service.
//!
//! The port deals in transport only: it takes a prompt and returns the
//! model's raw text, or a transport-level failure. Interpreting that text
//! (JSON extraction, validation, fallback) is the application layer's job,
//! which is what keeps parse failures out of this error taxonomy.

use async_trait::async_trait;

/// Port for single-shot text generation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends the prompt and returns the model's textual response.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Transport-level failures from the generation service.
///
/// None of these are recovered by the fallback generator: they are surfaced
/// to the user as visible, retryable errors with distinct copy.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// No credential configured for the service.
    #[error("generation credential not configured")]
    MissingCredentials,

    /// The service rejected the credential.
    #[error("generation authentication failed")]
    AuthenticationFailed,

    /// Rate limited by the service.
    #[error("generation rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Network error during the request.
    #[error("generation network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("generation request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },

    /// The service is unavailable (5xx).
    #[error("generation service unavailable: {0}")]
    Unavailable(String),

    /// The service rejected the request as malformed.
    #[error("invalid generation request: {0}")]
    InvalidRequest(String),
}

impl GenerationError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Returns true if retrying the same request later could succeed.
    ///
    /// Nothing retries automatically; this only drives user-facing copy.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationError::RateLimited { .. }
                | GenerationError::Unavailable(_)
                | GenerationError::Network(_)
                | GenerationError::Timeout { .. }
        )
    }

    /// Returns true if this failure is an explicit rate limit.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, GenerationError::RateLimited { .. })
    }
}
