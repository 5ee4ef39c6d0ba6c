//! LLM error types
//!
//! One variant per failure mode at the provider boundary. Retry policy
//! is decided by the client against raw HTTP statuses before an error
//! is built, so these variants carry context for the caller rather
//! than retry hints: the extractor folds them into `ExtractError::Llm`
//! and the stages turn that into a diagnostic note.

use std::time::Duration;
use thiserror::Error;

/// Errors from a language model call
#[derive(Debug, Error)]
pub enum LlmError {
    /// The provider asked us to back off; retries are exhausted
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    /// Non-success HTTP status with the provider's error body
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A 200 reply whose payload we could not use (no candidates,
    /// unexpected shape)
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The provider refused the prompt outright (e.g. a safety block)
    #[error("Prompt blocked by provider: {reason}")]
    Blocked { reason: String },

    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_names_status_and_body() {
        let err = LlmError::ApiError {
            status: 503,
            message: "model overloaded".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("503"));
        assert!(text.contains("model overloaded"));
    }

    #[test]
    fn test_blocked_display_carries_reason() {
        let err = LlmError::Blocked {
            reason: "SAFETY".to_string(),
        };
        assert_eq!(err.to_string(), "Prompt blocked by provider: SAFETY");
    }

    #[test]
    fn test_rate_limited_display_mentions_backoff() {
        let err = LlmError::RateLimited {
            retry_after: Duration::from_secs(60),
        };
        assert!(err.to_string().contains("retry after"));
    }
}
