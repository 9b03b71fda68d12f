//! Command parsing for the interactive session

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Empty input")]
    Empty,
    #[error("Missing {what} for /{command}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },
    #[error("'{0}' is not a candidate number")]
    InvalidIndex(String),
    #[error("Unknown command: /{0} (try /help)")]
    Unknown(String),
    #[error("Enter a single stock symbol or a /command (try /help)")]
    NotASymbol,
}

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// General CANSLIM candidate discovery
    Discover,
    /// Candidates within 25% of their 52-week high
    NearHighs,
    /// Analyze one symbol
    Analyze { symbol: String },
    /// Analyze the n-th candidate (1-based) from the last discovery list
    Pick { position: usize },
    Help,
    Exit,
}

impl Command {
    /// Parse a command from user input
    ///
    /// A bare word is treated as a symbol to analyze.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(CommandError::Empty);
        }

        let Some(rest) = input.strip_prefix('/') else {
            let mut words = input.split_whitespace();
            return match (words.next(), words.next()) {
                (Some(symbol), None) => Ok(Self::Analyze {
                    symbol: symbol.to_uppercase(),
                }),
                _ => Err(CommandError::NotASymbol),
            };
        };

        let mut parts = rest.split_whitespace();
        let cmd = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts.next();

        match cmd.as_str() {
            "discover" | "d" => Ok(Self::Discover),
            "highs" | "h" => Ok(Self::NearHighs),
            "analyze" | "a" => {
                let symbol = arg.ok_or(CommandError::MissingArgument {
                    command: "analyze",
                    what: "symbol",
                })?;
                Ok(Self::Analyze {
                    symbol: symbol.to_uppercase(),
                })
            }
            "pick" | "p" => {
                let raw = arg.ok_or(CommandError::MissingArgument {
                    command: "pick",
                    what: "candidate number",
                })?;
                match raw.parse::<usize>() {
                    Ok(position) if position > 0 => Ok(Self::Pick { position }),
                    _ => Err(CommandError::InvalidIndex(raw.to_string())),
                }
            }
            "help" | "?" => Ok(Self::Help),
            "exit" | "quit" | "q" => Ok(Self::Exit),
            _ => Err(CommandError::Unknown(cmd)),
        }
    }

    pub fn help_text() -> &'static str {
        r"
CANSLIM Analyst Commands
========================

  /discover            Find stocks with strong CANSLIM characteristics
  /highs               Find stocks within 25% of their 52-week high
  /analyze <symbol>    Full seven-criterion analysis (e.g. /analyze TRENT)
  /pick <n>            Analyze candidate n from the last list
  /help                Show this help
  /exit                Exit

Aliases: /d = /discover, /h = /highs, /a = /analyze, /p = /pick, /q = /exit

Typing a bare symbol such as RELIANCE analyzes it.
"
    }
}
