//! Google Gemini provider implementation
//!
//! This module implements the LLMProvider trait for Gemini's
//! `generateContent` endpoint, including Google Search grounding and JSON
//! response mode.
//! See: https://ai.google.dev/api/generate-content
//!
//! # Examples
//!
//! ```no_run
//! use canslim_llm::{CompletionRequest, LLMProvider, Message, ResponseFormat};
//! use canslim_llm::providers::{GeminiConfig, GeminiProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads GEMINI_API_KEY (or API_KEY)
//!     let provider = GeminiProvider::with_config(GeminiConfig::from_env()?)?;
//!
//!     let request = CompletionRequest::builder("gemini-3-pro-preview")
//!         .add_message(Message::user("Is the Nifty 50 in a confirmed uptrend?"))
//!         .web_search(true)
//!         .response_format(ResponseFormat::Json)
//!         .build();
//!
//!     let response = provider.complete(request).await?;
//!     println!("{}", response.text());
//!     for citation in &response.citations {
//!         println!("{:?}", citation.uri);
//!     }
//!     Ok(())
//! }
//! ```

use crate::{
    CompletionRequest, CompletionResponse, GroundingCitation, LLMError, LLMProvider, Message,
    ResponseFormat, Result, Role, StopReason, TokenUsage,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when none is configured
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-pro-preview";

/// Environment variables checked for the API key, in order
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Environment variable for overriding the API base URL
pub const API_BASE_ENV_VAR: &str = "GEMINI_API_BASE";

/// Configuration for the Gemini provider
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL for the Gemini API (default: "https://generativelanguage.googleapis.com/v1beta")
    pub api_base: String,

    /// Client-side request timeout in seconds. `None` leaves the request unbounded.
    pub timeout_secs: Option<u64>,
}

impl GeminiConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            timeout_secs: None,
        }
    }

    /// Create config from environment variables
    ///
    /// Reads the API key from `GEMINI_API_KEY`, falling back to `API_KEY`.
    /// Optionally reads the base URL from `GEMINI_API_BASE`.
    pub fn from_env() -> Result<Self> {
        let api_key = canslim_utils::first_var(API_KEY_ENV_VARS).ok_or_else(|| {
            LLMError::ConfigurationError(
                "GEMINI_API_KEY (or API_KEY) environment variable not set".to_string(),
            )
        })?;

        let api_base = canslim_utils::first_var(&[API_BASE_ENV_VAR])
            .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string());

        Ok(Self {
            api_key,
            api_base,
            timeout_secs: None,
        })
    }

    /// Set custom API base URL (proxies, regional endpoints, test servers)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Endpoint URL for a model's `generateContent` method
    pub fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            model
        )
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Google Gemini provider
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    /// Create a new Gemini provider with custom configuration
    ///
    /// # Example
    ///
    /// ```no_run
    /// use canslim_llm::providers::{GeminiConfig, GeminiProvider};
    ///
    /// let config = GeminiConfig::new("AIza...")
    ///     .with_api_base("https://generativelanguage.googleapis.com/v1beta")
    ///     .with_timeout(90);
    ///
    /// let provider = GeminiProvider::with_config(config)?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn with_config(config: GeminiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(LLMError::ConfigurationError(
                "Gemini API key must not be empty".to_string(),
            ));
        }

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Create a new Gemini provider with API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(GeminiConfig::new(api_key))
    }

    /// Create a provider from environment variables
    pub fn from_env() -> Result<Self> {
        Self::with_config(GeminiConfig::from_env()?)
    }

    /// Get the current configuration
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    #[instrument(skip(self, request), fields(model = %request.model, web_search = request.web_search))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        if request.model.trim().is_empty() {
            return Err(LLMError::InvalidRequest("Model name is empty".to_string()));
        }

        let url = self.config.generate_url(&request.model);
        debug!("Sending request to Gemini API at {}", self.config.api_base);

        let model = request.model.clone();
        let gemini_request = build_gemini_request(request);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&gemini_request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await?;
            debug!(status, "Gemini API returned an error status");

            return Err(LLMError::from_status(status, error_text, &model));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            LLMError::UnexpectedResponse(format!("Failed to parse response: {e}"))
        })?;

        parse_gemini_response(gemini_response)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

// ============================================================================
// Gemini-specific request types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<GeminiTool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    /// Set on reasoning parts, which are not part of the answer text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thought: Option<bool>,
}

#[derive(Debug, Serialize)]
struct GeminiTool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<usize>,
}

impl GenerationConfig {
    fn is_empty(&self) -> bool {
        self.response_mime_type.is_none()
            && self.temperature.is_none()
            && self.max_output_tokens.is_none()
    }
}

// ============================================================================
// Gemini-specific response types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsage>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
struct WebChunk {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: usize,
    #[serde(default)]
    candidates_token_count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

// ============================================================================
// Conversion functions
// ============================================================================

/// Build a Gemini request from our generic format
///
/// System messages move into `systemInstruction`; assistant turns use the
/// "model" role.
fn build_gemini_request(request: CompletionRequest) -> GeminiRequest {
    let mut system_texts: Vec<String> = request.system.into_iter().collect();
    let mut contents = Vec::new();

    for msg in request.messages {
        let role = match msg.role {
            Role::System => {
                system_texts.push(msg.content);
                continue;
            }
            Role::User => "user",
            Role::Assistant => "model",
        };
        contents.push(text_content(Some(role), msg.content));
    }

    let system_instruction = if system_texts.is_empty() {
        None
    } else {
        Some(text_content(None, system_texts.join("\n\n")))
    };

    let tools = if request.web_search {
        vec![GeminiTool {
            google_search: GoogleSearch {},
        }]
    } else {
        Vec::new()
    };

    let generation_config = GenerationConfig {
        response_mime_type: match request.response_format {
            ResponseFormat::Json => Some("application/json"),
            ResponseFormat::Text => None,
        },
        temperature: request.temperature,
        max_output_tokens: request.max_tokens,
    };

    GeminiRequest {
        contents,
        system_instruction,
        tools,
        generation_config: if generation_config.is_empty() {
            None
        } else {
            Some(generation_config)
        },
    }
}

fn text_content(role: Option<&str>, text: String) -> GeminiContent {
    GeminiContent {
        role: role.map(str::to_string),
        parts: vec![GeminiPart {
            text: Some(text),
            thought: None,
        }],
    }
}

/// Parse a Gemini response into our format
///
/// Only the first candidate is used. Its non-thought text parts are
/// concatenated into the message text.
fn parse_gemini_response(response: GeminiResponse) -> Result<CompletionResponse> {
    let usage = response
        .usage_metadata
        .map(|u| TokenUsage {
            input_tokens: u.prompt_token_count,
            output_tokens: u.candidates_token_count,
        })
        .unwrap_or_default();

    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .map_or_else(String::new, |r| format!(" (prompt blocked: {r})"));
        return Err(LLMError::UnexpectedResponse(format!(
            "No candidates in response{reason}"
        )));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter(|p| !p.thought.unwrap_or(false))
        .filter_map(|p| p.text)
        .collect();

    let citations = candidate
        .grounding_metadata
        .map(|g| g.grounding_chunks)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|chunk| chunk.web)
        .map(|web| GroundingCitation {
            title: web.title,
            uri: web.uri,
        })
        .collect::<Vec<_>>();

    let stop_reason = candidate
        .finish_reason
        .as_deref()
        .map_or(StopReason::EndTurn, map_finish_reason);

    debug!(
        "Received response - stop_reason: {:?}, tokens: {}/{}, citations: {}",
        stop_reason,
        usage.input_tokens,
        usage.output_tokens,
        citations.len()
    );

    Ok(CompletionResponse {
        message: Message::assistant(text),
        stop_reason,
        usage,
        citations,
    })
}

/// Map Gemini finish reason to our format
fn map_finish_reason(reason: &str) -> StopReason {
    match reason {
        "STOP" => StopReason::EndTurn,
        "MAX_TOKENS" => StopReason::MaxTokens,
        "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" | "SPII" => {
            debug!("Content filtered by Gemini safety systems: {}", reason);
            StopReason::ContentFiltered
        }
        _ => {
            debug!("Unknown finish reason: {}", reason);
            StopReason::EndTurn
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
