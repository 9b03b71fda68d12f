//! Shared utilities for canslim-analyst
//!
//! This crate provides common functionality used across the workspace,
//! including logging setup and environment-based configuration helpers.

pub mod env;
pub mod logging;

pub use env::{first_var, load_dotenv};
pub use logging::{LogFormat, init_tracing};
