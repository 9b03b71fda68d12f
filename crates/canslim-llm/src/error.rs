//! Error types for LLM operations

use thiserror::Error;

/// Result type for LLM operations
pub type Result<T> = std::result::Result<T, LLMError>;

/// Errors that can occur while calling a model
#[derive(Error, Debug)]
pub enum LLMError {
    /// Non-success HTTP status without a more specific variant
    #[error("Model request failed: {0}")]
    RequestFailed(String),

    /// HTTP 401 or 403
    #[error("Authentication with the model service failed")]
    AuthenticationFailed,

    /// HTTP 429, carrying the service's explanation
    #[error("Rate limited by the model service: {0}")]
    RateLimitExceeded(String),

    /// HTTP 400, or a request rejected before sending
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// HTTP 404 for the named model
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Transport failure (connect, TLS, timeout)
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Success status but a body we cannot use (no candidates, blocked prompt)
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl LLMError {
    /// Map a non-success HTTP status to an error
    pub fn from_status(status: u16, body: String, model: &str) -> Self {
        match status {
            400 => Self::InvalidRequest(body),
            401 | 403 => Self::AuthenticationFailed,
            404 => Self::ModelNotFound(model.to_string()),
            429 => Self::RateLimitExceeded(body),
            _ => Self::RequestFailed(format!("HTTP {status}: {body}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let model = "gemini-3-pro-preview";
        assert!(matches!(
            LLMError::from_status(400, "bad field".into(), model),
            LLMError::InvalidRequest(ref m) if m == "bad field"
        ));
        assert!(matches!(
            LLMError::from_status(401, String::new(), model),
            LLMError::AuthenticationFailed
        ));
        assert!(matches!(
            LLMError::from_status(403, String::new(), model),
            LLMError::AuthenticationFailed
        ));
        assert!(matches!(
            LLMError::from_status(404, String::new(), model),
            LLMError::ModelNotFound(ref m) if m == model
        ));
        assert!(matches!(
            LLMError::from_status(429, "quota".into(), model),
            LLMError::RateLimitExceeded(_)
        ));
        assert!(matches!(
            LLMError::from_status(503, "overloaded".into(), model),
            LLMError::RequestFailed(ref m) if m == "HTTP 503: overloaded"
        ));
    }
}
