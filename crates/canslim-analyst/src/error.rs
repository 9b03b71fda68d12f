//! Error types for CANSLIM analysis operations

use canslim_llm::LLMError;
use thiserror::Error;

/// Message shown for any failure without a more specific explanation
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to analyze stock. Please try again.";

/// CANSLIM analysis specific errors
#[derive(Debug, Error)]
pub enum AnalystError {
    /// Model call failed (network, HTTP status, unexpected payload)
    #[error("LLM error: {0}")]
    Llm(#[from] LLMError),

    /// Model reply could not be read as the expected JSON
    #[error("Malformed model response: {detail}")]
    MalformedResponse { detail: String },

    /// Invalid stock symbol provided
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Prompt template failed to compile or render
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AnalystError {
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            detail: detail.into(),
        }
    }

    /// Text safe to show an end user
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidSymbol(reason) => format!("Invalid symbol: {reason}"),
            Self::Config(reason) => format!("Configuration error: {reason}"),
            Self::Llm(LLMError::AuthenticationFailed) => {
                "Authentication with the model service failed. Check your API key.".to_string()
            }
            Self::Llm(LLMError::RateLimitExceeded(_)) => {
                "The model service is busy (rate limited). Please try again shortly.".to_string()
            }
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl From<minijinja::Error> for AnalystError {
    fn from(err: minijinja::Error) -> Self {
        Self::Prompt(err.to_string())
    }
}

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, AnalystError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            AnalystError::malformed("expected value at line 1").user_message(),
            GENERIC_FAILURE_MESSAGE
        );
        assert_eq!(
            AnalystError::Llm(LLMError::RequestFailed("HTTP 500".into())).user_message(),
            GENERIC_FAILURE_MESSAGE
        );
        assert!(
            AnalystError::Llm(LLMError::AuthenticationFailed)
                .user_message()
                .contains("API key")
        );
        assert!(
            AnalystError::Llm(LLMError::RateLimitExceeded("quota".into()))
                .user_message()
                .contains("rate limited")
        );
        assert_eq!(
            AnalystError::InvalidSymbol("stock symbol must not be empty".into()).user_message(),
            "Invalid symbol: stock symbol must not be empty"
        );
    }

    #[test]
    fn test_user_message_hides_details() {
        let err = AnalystError::malformed("key=AIza-secret");
        assert!(!err.user_message().contains("secret"));
        assert!(err.to_string().contains("key=AIza-secret"));
    }
}
