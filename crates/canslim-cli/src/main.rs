//! Command-line interface for canslim-analyst
//!
//! # Usage
//!
//! ```bash
//! export GEMINI_API_KEY="..."
//!
//! canslim discover
//! canslim near-highs
//! canslim analyze RELIANCE --json
//! canslim            # interactive session
//! ```

mod commands;
mod repl;
mod session;

use anyhow::{Context, bail};
use canslim_analyst::{AnalystConfig, CanslimAnalyst, Formatter, OutputFormat};
use canslim_llm::providers::gemini::API_KEY_ENV_VARS;
use canslim_llm::providers::{GeminiConfig, GeminiProvider};
use canslim_utils::{LogFormat, first_var, init_tracing, load_dotenv, logging::DEFAULT_DIRECTIVE};
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

use crate::repl::Repl;
use crate::session::ActionKind;

#[derive(Parser, Debug)]
#[command(name = "canslim", version)]
#[command(about = "CANSLIM analysis of Indian stocks (NSE/BSE) with a web-grounded LLM", long_about = None)]
struct Cli {
    /// Gemini API key (falls back to API_KEY)
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Override the Gemini API base URL
    #[arg(long, env = "GEMINI_API_BASE", global = true)]
    api_base: Option<String>,

    /// Model name
    #[arg(long, env = "GEMINI_MODEL", global = true)]
    model: Option<String>,

    /// Client-side request timeout in seconds (default: none)
    #[arg(long, value_name = "SECS", global = true)]
    timeout: Option<u64>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Log output format: pretty or json
    #[arg(long, env = "CANSLIM_LOG_FORMAT", default_value = "pretty", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Find stocks with strong CANSLIM characteristics
    Discover,
    /// Find stocks within 25% of their 52-week high
    NearHighs,
    /// Run the seven-criterion analysis for one symbol
    Analyze {
        /// NSE/BSE symbol, e.g. TRENT
        symbol: String,
    },
    /// Start an interactive session (the default)
    Interactive,
}

impl Cli {
    fn gemini_config(&self) -> anyhow::Result<GeminiConfig> {
        let Some(api_key) = self.api_key.clone().or_else(|| first_var(API_KEY_ENV_VARS)) else {
            bail!("No API key: set GEMINI_API_KEY (or API_KEY), or pass --api-key");
        };

        let mut config = GeminiConfig::new(api_key);
        if let Some(api_base) = &self.api_base {
            config = config.with_api_base(api_base);
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout(secs);
        }
        Ok(config)
    }

    fn analyst_config(&self) -> anyhow::Result<AnalystConfig> {
        let mut builder = AnalystConfig::builder();
        if let Some(model) = &self.model {
            builder = builder.model(model);
        }
        Ok(builder.build()?)
    }

    fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // .env must be loaded before clap reads env-backed flags
    let dotenv = load_dotenv();
    let cli = Cli::parse();
    init_tracing(cli.log_format, DEFAULT_DIRECTIVE);

    if let Some(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    let gemini_config = cli.gemini_config()?;
    let analyst_config = cli.analyst_config()?;
    info!(
        api_base = %gemini_config.api_base,
        model = %analyst_config.model,
        timeout_secs = ?gemini_config.timeout_secs,
        "Starting canslim"
    );

    let provider = Arc::new(
        GeminiProvider::with_config(gemini_config).context("Failed to create Gemini provider")?,
    );
    let analyst = CanslimAnalyst::new(provider, analyst_config)?;
    let formatter = cli.output_format().formatter();

    match cli.command.unwrap_or(CliCommand::Interactive) {
        CliCommand::Discover => {
            let result = analyst.discover_candidates().await?;
            println!("{}", formatter.format_discovery(ActionKind::Candidates.title(), &result));
        }
        CliCommand::NearHighs => {
            let result = analyst.discover_near_highs().await?;
            println!("{}", formatter.format_discovery(ActionKind::NearHighs.title(), &result));
        }
        CliCommand::Analyze { symbol } => {
            eprintln!("{} {}", symbol.trim().to_uppercase(), ActionKind::Analysis.progress());
            return Ok(analyze_once(&analyst, formatter.as_ref(), &symbol).await);
        }
        CliCommand::Interactive => {
            Repl::new(&analyst, formatter.as_ref()).run().await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn analyze_once(analyst: &CanslimAnalyst, formatter: &dyn Formatter, symbol: &str) -> ExitCode {
    match analyst.analyze(symbol).await {
        Ok(analysis) => {
            println!("{}", formatter.format_analysis(&analysis));
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Analysis failed");
            println!("{}", formatter.format_error(&e.user_message()));
            ExitCode::FAILURE
        }
    }
}
