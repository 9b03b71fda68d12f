//! Configuration for CANSLIM analysis operations

use crate::error::{AnalystError, Result};
use crate::policy::ErrorPolicy;
use canslim_llm::providers::gemini::DEFAULT_GEMINI_MODEL;
use serde::{Deserialize, Serialize};

/// Environment variable for overriding the model name
pub const MODEL_ENV_VAR: &str = "GEMINI_MODEL";

/// Configuration for the analyst service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalystConfig {
    /// Model used for every call
    pub model: String,

    /// Policy for the two discovery calls
    pub discovery_policy: ErrorPolicy,

    /// Policy for single-symbol analysis
    pub analysis_policy: ErrorPolicy,
}

impl Default for AnalystConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_GEMINI_MODEL.to_string(),
            discovery_policy: ErrorPolicy::Degrade,
            analysis_policy: ErrorPolicy::Propagate,
        }
    }
}

impl AnalystConfig {
    /// Create a new configuration builder
    pub fn builder() -> AnalystConfigBuilder {
        AnalystConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(AnalystError::Config("model name must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Builder for AnalystConfig
#[derive(Debug, Default)]
pub struct AnalystConfigBuilder {
    model: Option<String>,
    discovery_policy: Option<ErrorPolicy>,
    analysis_policy: Option<ErrorPolicy>,
}

impl AnalystConfigBuilder {
    /// Set the model name
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Load the model name from the environment unless one was set explicitly
    pub fn with_env_model(mut self) -> Self {
        if self.model.is_none() {
            self.model = canslim_utils::first_var(&[MODEL_ENV_VAR]);
        }
        self
    }

    /// Set the discovery error policy
    pub fn discovery_policy(mut self, policy: ErrorPolicy) -> Self {
        self.discovery_policy = Some(policy);
        self
    }

    /// Set the analysis error policy
    pub fn analysis_policy(mut self, policy: ErrorPolicy) -> Self {
        self.analysis_policy = Some(policy);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AnalystConfig> {
        let defaults = AnalystConfig::default();

        let config = AnalystConfig {
            model: self.model.unwrap_or(defaults.model),
            discovery_policy: self.discovery_policy.unwrap_or(defaults.discovery_policy),
            analysis_policy: self.analysis_policy.unwrap_or(defaults.analysis_policy),
        };

        config.validate()?;
        Ok(config)
    }
}
