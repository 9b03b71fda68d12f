//! LLM provider abstraction layer for canslim-analyst
//!
//! This crate provides provider-agnostic abstractions for interacting with
//! a hosted Large Language Model. It includes:
//!
//! - Message types for LLM communication
//! - Completion request/response types, including web-search grounding
//!   and JSON response format options
//! - Provider trait for LLM implementations
//! - The Google Gemini provider

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod providers;

// Re-export main types
pub use completion::{
    CompletionRequest, CompletionResponse, GroundingCitation, ResponseFormat, StopReason,
    TokenUsage,
};
pub use error::{LLMError, Result};
pub use messages::{Message, Role};
pub use provider::LLMProvider;
