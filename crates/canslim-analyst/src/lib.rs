//! CANSLIM analysis of Indian equities
//!
//! This crate scores NSE/BSE stocks against William J. O'Neil's seven CANSLIM
//! criteria using a web-grounded LLM. It includes:
//!
//! - Candidate discovery (general CANSLIM screen and near 52-week highs)
//! - Single-symbol analysis with a 0-100 score, per-criterion verdicts,
//!   an EPS growth trend and cited sources
//! - A lenient response contract that turns imperfect model JSON into a
//!   fully-populated [`StockAnalysis`]
//! - Text and JSON renderers
//!
//! # Architecture
//!
//! [`CanslimAnalyst`] renders a prompt, makes one grounded JSON call through
//! an [`canslim_llm::LLMProvider`], and runs the reply through:
//! - `sanitize`: strips Markdown code fences
//! - `contract`: reads the JSON into typed partial updates
//! - `merge`: overlays the partial update on static criterion defaults
//! - `sources`: filters grounding citations down to usable links
//!
//! Discovery and analysis failures are handled per call site through an
//! [`ErrorPolicy`].

pub mod config;
pub mod contract;
pub mod definitions;
pub mod error;
pub mod merge;
pub mod model;
pub mod policy;
pub mod prompts;
pub mod render;
pub mod sanitize;
pub mod service;
pub mod sources;

// Re-export main types for convenience
pub use config::{AnalystConfig, AnalystConfigBuilder};
pub use definitions::{CANSLIM_DEFINITIONS, CriterionDefinition};
pub use error::{AnalystError, Result};
pub use model::{
    AnalysisRequest, AnalysisStatus, Candidate, CanslimCriterion, Criteria, CriterionLetter,
    DiscoveryResult, EpsBand, EpsPoint, ScoreBand, Source, StockAnalysis,
};
pub use policy::ErrorPolicy;
pub use render::{Formatter, JsonFormatter, OutputFormat, TextFormatter};
pub use service::CanslimAnalyst;
