//! Interactive read-eval-print loop

use crate::commands::{Command, CommandError};
use crate::session::{ActionKind, Session};
use canslim_analyst::{CanslimAnalyst, Formatter};
use std::io::{self, BufRead, Write};
use tracing::warn;

const PROMPT: &str = "canslim> ";

/// Result of executing one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Exit,
}

pub struct Repl<'a> {
    analyst: &'a CanslimAnalyst,
    formatter: &'a dyn Formatter,
    session: Session,
}

impl<'a> Repl<'a> {
    pub fn new(analyst: &'a CanslimAnalyst, formatter: &'a dyn Formatter) -> Self {
        Self {
            analyst,
            formatter,
            session: Session::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Read commands from stdin until `/exit` or end of input
    pub async fn run(&mut self) -> anyhow::Result<()> {
        print_banner();
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        loop {
            print!("{PROMPT}");
            stdout.flush()?;

            let mut input = String::new();
            match stdin.lock().read_line(&mut input) {
                Ok(0) => {
                    println!("\nGoodbye!");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    eprintln!("Error reading input: {e}");
                    continue;
                }
            }

            match self.handle_line(&input).await {
                Some(Outcome::Continue(output)) => println!("{output}\n"),
                Some(Outcome::Exit) => {
                    println!("Goodbye!");
                    break;
                }
                None => {}
            }
        }

        Ok(())
    }

    /// Parse and execute one input line; `None` for blank input
    pub async fn handle_line(&mut self, line: &str) -> Option<Outcome> {
        match Command::parse(line) {
            Ok(command) => Some(self.execute(command).await),
            Err(CommandError::Empty) => None,
            Err(e) => Some(Outcome::Continue(self.formatter.format_error(&e.to_string()))),
        }
    }

    pub async fn execute(&mut self, command: Command) -> Outcome {
        let output = match command {
            Command::Help => Command::help_text().trim().to_string(),
            Command::Exit => return Outcome::Exit,
            Command::Discover => self.discover(ActionKind::Candidates).await,
            Command::NearHighs => self.discover(ActionKind::NearHighs).await,
            Command::Analyze { symbol } => self.analyze(&symbol).await,
            Command::Pick { position } => {
                let picked = self.session.candidate_symbol(position).map(str::to_string);
                match picked {
                    Some(symbol) => self.analyze(&symbol).await,
                    None => self.formatter.format_error(&self.pick_miss(position)),
                }
            }
        };
        Outcome::Continue(output)
    }

    fn pick_miss(&self, position: usize) -> String {
        match self.session.discovery() {
            Some(list) if !list.is_empty() => {
                format!("No candidate #{position}; the last list has {}.", list.len())
            }
            _ => format!("No candidate #{position}. Run /discover or /highs first."),
        }
    }

    async fn discover(&mut self, kind: ActionKind) -> String {
        let _guard = match self.session.begin(kind) {
            Ok(guard) => guard,
            Err(busy) => return self.formatter.format_error(&busy.to_string()),
        };
        self.session.start_discovery();
        eprintln!("{}", kind.progress());

        let result = if kind == ActionKind::NearHighs {
            self.analyst.discover_near_highs().await
        } else {
            self.analyst.discover_candidates().await
        };

        match result {
            Ok(result) => {
                let output = self.formatter.format_discovery(kind.title(), &result);
                self.session.finish_discovery(result);
                output
            }
            Err(e) => {
                warn!(error = %e, "Discovery failed");
                self.formatter.format_error(&e.user_message())
            }
        }
    }

    async fn analyze(&mut self, symbol: &str) -> String {
        let _guard = match self.session.begin(ActionKind::Analysis) {
            Ok(guard) => guard,
            Err(busy) => return self.formatter.format_error(&busy.to_string()),
        };
        self.session.start_analysis();
        eprintln!("{} {}", symbol, ActionKind::Analysis.progress());

        match self.analyst.analyze(symbol).await {
            Ok(analysis) => {
                let output = self.formatter.format_analysis(&analysis);
                self.session.finish_analysis(analysis);
                output
            }
            Err(e) => {
                warn!(symbol, error = %e, "Analysis failed");
                let message = e.user_message();
                let output = self.formatter.format_error(&message);
                self.session.fail_analysis(message);
                output
            }
        }
    }
}

fn print_banner() {
    println!(
        r"
╔══════════════════════════════════════════════════════════════╗
║                CANSLIM Analyst (NSE / BSE)                   ║
║                                                              ║
║  Commands:                                                   ║
║    /discover          - CANSLIM candidates                   ║
║    /highs             - Stocks near 52-week highs            ║
║    /analyze <symbol>  - Seven-criterion analysis             ║
║    /pick <n>          - Analyze candidate n                  ║
║    /help              - Help                                 ║
║    /exit              - Exit                                 ║
║                                                              ║
║  Or just type a symbol: TRENT                                ║
╚══════════════════════════════════════════════════════════════╝
"
    );
}
