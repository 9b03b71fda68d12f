//! CANSLIM analyst service
//!
//! One model call per operation. Every call asks for Google Search grounding
//! and a JSON reply; replies go through the response contract and, for
//! single-symbol analysis, the merge onto static defaults.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use canslim_analyst::{AnalystConfig, CanslimAnalyst};
//! use canslim_llm::providers::GeminiProvider;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Arc::new(GeminiProvider::from_env()?);
//! let analyst = CanslimAnalyst::new(provider, AnalystConfig::default())?;
//!
//! for candidate in analyst.discover_candidates().await?.candidates {
//!     println!("{}: {}", candidate.symbol, candidate.reason);
//! }
//!
//! let analysis = analyst.analyze("TRENT").await?;
//! println!("{} scored {}/100", analysis.company_name, analysis.canslim_score);
//! # Ok(())
//! # }
//! ```

use crate::config::AnalystConfig;
use crate::contract::{PartialAnalysis, discovery_from_reply};
use crate::error::Result;
use crate::merge::merge;
use crate::model::{AnalysisRequest, DiscoveryResult, StockAnalysis};
use crate::prompts::PromptSet;
use crate::sources::collect_sources;
use canslim_llm::{CompletionRequest, CompletionResponse, LLMProvider, Message, ResponseFormat};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Grounded CANSLIM analyst backed by an LLM provider
pub struct CanslimAnalyst {
    provider: Arc<dyn LLMProvider>,
    prompts: PromptSet,
    config: AnalystConfig,
}

impl CanslimAnalyst {
    /// Create an analyst; fails if the config is invalid or a template does not compile
    pub fn new(provider: Arc<dyn LLMProvider>, config: AnalystConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            provider,
            prompts: PromptSet::new()?,
            config,
        })
    }

    pub fn config(&self) -> &AnalystConfig {
        &self.config
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Stocks currently showing strong CANSLIM characteristics
    #[instrument(skip(self))]
    pub async fn discover_candidates(&self) -> Result<DiscoveryResult> {
        let result = self.discover(self.prompts.candidates()).await;
        self.config
            .discovery_policy
            .apply("discover_candidates", result, DiscoveryResult::default)
    }

    /// Stocks trading within 25% of their 52-week high
    #[instrument(skip(self))]
    pub async fn discover_near_highs(&self) -> Result<DiscoveryResult> {
        let result = self.discover(self.prompts.near_highs()).await;
        self.config
            .discovery_policy
            .apply("discover_near_highs", result, DiscoveryResult::default)
    }

    /// Full seven-criterion analysis of one symbol
    #[instrument(skip(self))]
    pub async fn analyze(&self, symbol: &str) -> Result<StockAnalysis> {
        let request = AnalysisRequest::new(symbol)?;
        let result = self.analyze_request(&request).await;
        self.config
            .analysis_policy
            .apply("analyze", result, || StockAnalysis::pending(request.symbol()))
    }

    async fn discover(&self, prompt: Result<String>) -> Result<DiscoveryResult> {
        let response = self.ask(prompt?).await?;
        let result = discovery_from_reply(response.text())?;
        info!(candidates = result.len(), "Discovery complete");
        Ok(result)
    }

    async fn analyze_request(&self, request: &AnalysisRequest) -> Result<StockAnalysis> {
        let prompt = self.prompts.analysis(request.symbol())?;
        let response = self.ask(prompt).await?;

        let partial = PartialAnalysis::from_reply(response.text())?;
        let sources = collect_sources(&response.citations);
        let analysis = merge(request, partial, sources);

        info!(
            symbol = %analysis.symbol,
            score = analysis.canslim_score,
            sources = analysis.sources.len(),
            "Analysis complete"
        );
        Ok(analysis)
    }

    async fn ask(&self, prompt: String) -> Result<CompletionResponse> {
        let request = CompletionRequest::builder(&self.config.model)
            .add_message(Message::user(prompt))
            .web_search(true)
            .response_format(ResponseFormat::Json)
            .build();

        let response = self.provider.complete(request).await?;
        debug!(
            provider = self.provider.name(),
            stop_reason = ?response.stop_reason,
            tokens = response.usage.total(),
            citations = response.citations.len(),
            "Model replied"
        );
        Ok(response)
    }
}

impl std::fmt::Debug for CanslimAnalyst {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanslimAnalyst")
            .field("provider", &self.provider.name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
