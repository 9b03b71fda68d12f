//! Interactive session state
//!
//! Tracks the last discovery list, the last analysis or error, and the one
//! action allowed in flight at a time.

use canslim_analyst::{DiscoveryResult, StockAnalysis};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// A user action that makes a model call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Candidates,
    NearHighs,
    Analysis,
}

impl ActionKind {
    /// Progress line printed while the call is outstanding
    pub fn progress(self) -> &'static str {
        match self {
            Self::Candidates => "Scanning for CANSLIM candidates...",
            Self::NearHighs => "Scanning for stocks near 52-week highs...",
            Self::Analysis => "Analyzing... this can take up to 20 seconds.",
        }
    }

    /// Heading for a discovery listing
    pub fn title(self) -> &'static str {
        match self {
            Self::Candidates => "CANSLIM candidates",
            Self::NearHighs => "Near 52-week highs",
            Self::Analysis => "Analysis",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Candidates => "candidate discovery",
            Self::NearHighs => "near-high discovery",
            Self::Analysis => "analysis",
        })
    }
}

/// Refusal returned while another action is outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Busy: {0} is still running")]
pub struct Busy(pub ActionKind);

#[derive(Debug, Default)]
struct ActionSlot(Mutex<Option<ActionKind>>);

impl ActionSlot {
    fn with<R>(&self, f: impl FnOnce(&mut Option<ActionKind>) -> R) -> R {
        let mut slot = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut slot)
    }
}

/// Marks an action as outstanding until dropped
#[derive(Debug)]
pub struct BusyGuard {
    slot: Arc<ActionSlot>,
    kind: ActionKind,
}

impl BusyGuard {
    pub fn kind(&self) -> ActionKind {
        self.kind
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.slot.with(|slot| *slot = None);
    }
}

/// State of one interactive session
#[derive(Debug, Default)]
pub struct Session {
    outstanding: Arc<ActionSlot>,
    discovery: Option<DiscoveryResult>,
    analysis: Option<StockAnalysis>,
    error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `kind` as outstanding, or refuse if another action is
    pub fn begin(&self, kind: ActionKind) -> Result<BusyGuard, Busy> {
        self.outstanding.with(|slot| match *slot {
            Some(current) => Err(Busy(current)),
            None => {
                *slot = Some(kind);
                Ok(BusyGuard {
                    slot: Arc::clone(&self.outstanding),
                    kind,
                })
            }
        })
    }

    pub fn outstanding(&self) -> Option<ActionKind> {
        self.outstanding.with(|slot| *slot)
    }

    /// Drop the previous list before a new discovery starts
    pub fn start_discovery(&mut self) {
        self.discovery = None;
    }

    pub fn finish_discovery(&mut self, result: DiscoveryResult) {
        self.discovery = Some(result);
    }

    /// Drop the previous analysis and error before a new analysis starts
    pub fn start_analysis(&mut self) {
        self.analysis = None;
        self.error = None;
    }

    pub fn finish_analysis(&mut self, analysis: StockAnalysis) {
        self.analysis = Some(analysis);
    }

    pub fn fail_analysis(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn discovery(&self) -> Option<&DiscoveryResult> {
        self.discovery.as_ref()
    }

    pub fn analysis(&self) -> Option<&StockAnalysis> {
        self.analysis.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Symbol of the n-th (1-based) candidate from the last discovery
    pub fn candidate_symbol(&self, position: usize) -> Option<&str> {
        self.discovery()?.nth(position).map(|c| c.symbol.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canslim_analyst::Candidate;

    fn listing(symbols: &[&str]) -> DiscoveryResult {
        DiscoveryResult {
            candidates: symbols
                .iter()
                .map(|s| Candidate {
                    symbol: (*s).to_string(),
                    reason: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_second_action_is_refused_while_busy() {
        let session = Session::new();
        let guard = session.begin(ActionKind::Analysis).unwrap();

        assert_eq!(session.outstanding(), Some(ActionKind::Analysis));
        assert_eq!(
            session.begin(ActionKind::Candidates).unwrap_err(),
            Busy(ActionKind::Analysis)
        );
        assert_eq!(guard.kind(), ActionKind::Analysis);
    }

    #[test]
    fn test_guard_clears_after_success() {
        let mut session = Session::new();
        {
            let _guard = session.begin(ActionKind::Candidates).unwrap();
        }
        session.finish_discovery(listing(&["TCS"]));
        assert_eq!(session.outstanding(), None);
        assert!(session.begin(ActionKind::NearHighs).is_ok());
    }

    #[test]
    fn test_guard_clears_after_failure() {
        fn failing_action(session: &Session) -> Result<(), String> {
            let _guard = session.begin(ActionKind::Analysis).map_err(|e| e.to_string())?;
            Err("model call failed".to_string())
        }

        let session = Session::new();
        assert!(failing_action(&session).is_err());
        assert_eq!(session.outstanding(), None);
    }

    #[test]
    fn test_state_transitions() {
        let mut session = Session::new();
        session.finish_discovery(listing(&["TCS", "TRENT"]));
        assert_eq!(session.candidate_symbol(2), Some("TRENT"));
        assert_eq!(session.candidate_symbol(3), None);

        session.start_discovery();
        assert!(session.discovery().is_none());

        session.fail_analysis("Failed to analyze stock. Please try again.");
        session.finish_analysis(StockAnalysis::pending("TCS"));
        session.start_analysis();
        assert!(session.analysis().is_none());
        assert!(session.error().is_none());
    }
}
