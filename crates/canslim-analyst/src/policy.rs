//! Per call-site error policy
//!
//! Discovery is advisory: a failed call is logged and treated as "no
//! candidates". Analysis failures reach the caller. Both behaviours are a
//! configuration choice rather than being hard-wired into each operation.

use crate::error::{AnalystError, Result};
use serde::{Deserialize, Serialize};
use tracing::error;

/// What to do when a model call fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Log the error and return a fallback value
    Degrade,
    /// Return the error to the caller
    Propagate,
}

impl ErrorPolicy {
    /// Resolve a call result according to this policy
    ///
    /// Invalid input is always returned to the caller, even when degrading.
    pub fn apply<T>(self, operation: &str, result: Result<T>, fallback: impl FnOnce() -> T) -> Result<T> {
        match (self, result) {
            (_, Ok(value)) => Ok(value),
            (_, Err(err @ AnalystError::InvalidSymbol(_))) | (Self::Propagate, Err(err)) => Err(err),
            (Self::Degrade, Err(err)) => {
                error!(operation, error = %err, "Model call failed, returning fallback");
                Ok(fallback())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canslim_llm::LLMError;

    fn failure() -> Result<Vec<u32>> {
        Err(AnalystError::Llm(LLMError::RequestFailed("HTTP 503".into())))
    }

    #[test]
    fn test_degrade_returns_fallback() {
        let value = ErrorPolicy::Degrade.apply("discover", failure(), Vec::new).unwrap();
        assert!(value.is_empty());
    }

    #[test]
    fn test_propagate_returns_error() {
        let result = ErrorPolicy::Propagate.apply("analyze", failure(), Vec::new);
        assert!(matches!(result, Err(AnalystError::Llm(_))));
    }

    #[test]
    fn test_success_passes_through() {
        for policy in [ErrorPolicy::Degrade, ErrorPolicy::Propagate] {
            assert_eq!(policy.apply("discover", Ok(vec![1]), Vec::new).unwrap(), vec![1]);
        }
    }

    #[test]
    fn test_invalid_symbol_is_never_degraded() {
        let result: Result<Vec<u32>> = Err(AnalystError::InvalidSymbol("empty".into()));
        let result = ErrorPolicy::Degrade.apply("analyze", result, Vec::new);
        assert!(matches!(result, Err(AnalystError::InvalidSymbol(_))));
    }
}
