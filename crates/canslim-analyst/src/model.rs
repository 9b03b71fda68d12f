//! CANSLIM analysis data model
//!
//! JSON field names follow the model's response contract (camelCase), so a
//! [`StockAnalysis`] serializes back into the shape the prompt asks for.

use crate::definitions::{PENDING_FINDING, definition};
use crate::error::{AnalystError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Model verdict for a single criterion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AnalysisStatus {
    Pass,
    Fail,
    Neutral,
    #[default]
    Unknown,
}

impl AnalysisStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Neutral => "NEUTRAL",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Parse a status label, ignoring case and surrounding whitespace
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "PASS" => Some(Self::Pass),
            "FAIL" => Some(Self::Fail),
            "NEUTRAL" => Some(Self::Neutral),
            "UNKNOWN" => Some(Self::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the seven CANSLIM letters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CriterionLetter {
    C,
    A,
    N,
    S,
    L,
    I,
    M,
}

impl CriterionLetter {
    /// All letters in C-A-N-S-L-I-M order
    pub const ALL: [CriterionLetter; 7] = [
        Self::C,
        Self::A,
        Self::N,
        Self::S,
        Self::L,
        Self::I,
        Self::M,
    ];

    /// JSON key and display label
    pub fn as_str(self) -> &'static str {
        match self {
            Self::C => "C",
            Self::A => "A",
            Self::N => "N",
            Self::S => "S",
            Self::L => "L",
            Self::I => "I",
            Self::M => "M",
        }
    }

    /// Position within [`CriterionLetter::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        definition(self).name
    }

    pub fn description(self) -> &'static str {
        definition(self).description
    }
}

impl fmt::Display for CriterionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A criterion card: static definition plus the model's verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanslimCriterion {
    pub letter: CriterionLetter,
    pub name: String,
    pub description: String,
    pub status: AnalysisStatus,
    pub finding: String,
}

impl CanslimCriterion {
    /// Criterion with its static definition and no verdict yet
    pub fn pending(letter: CriterionLetter) -> Self {
        let def = definition(letter);
        Self {
            letter,
            name: def.name.to_string(),
            description: def.description.to_string(),
            status: AnalysisStatus::Unknown,
            finding: PENDING_FINDING.to_string(),
        }
    }
}

/// All seven criteria, keyed by letter
///
/// One field per letter, so an analysis can never be missing a criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    #[serde(rename = "C")]
    pub c: CanslimCriterion,
    #[serde(rename = "A")]
    pub a: CanslimCriterion,
    #[serde(rename = "N")]
    pub n: CanslimCriterion,
    #[serde(rename = "S")]
    pub s: CanslimCriterion,
    #[serde(rename = "L")]
    pub l: CanslimCriterion,
    #[serde(rename = "I")]
    pub i: CanslimCriterion,
    #[serde(rename = "M")]
    pub m: CanslimCriterion,
}

impl Criteria {
    /// Build all seven criteria from a per-letter constructor
    pub fn from_fn(mut f: impl FnMut(CriterionLetter) -> CanslimCriterion) -> Self {
        Self {
            c: f(CriterionLetter::C),
            a: f(CriterionLetter::A),
            n: f(CriterionLetter::N),
            s: f(CriterionLetter::S),
            l: f(CriterionLetter::L),
            i: f(CriterionLetter::I),
            m: f(CriterionLetter::M),
        }
    }

    pub fn pending() -> Self {
        Self::from_fn(CanslimCriterion::pending)
    }

    pub fn get(&self, letter: CriterionLetter) -> &CanslimCriterion {
        match letter {
            CriterionLetter::C => &self.c,
            CriterionLetter::A => &self.a,
            CriterionLetter::N => &self.n,
            CriterionLetter::S => &self.s,
            CriterionLetter::L => &self.l,
            CriterionLetter::I => &self.i,
            CriterionLetter::M => &self.m,
        }
    }

    /// Criteria in C-A-N-S-L-I-M order
    pub fn iter(&self) -> impl Iterator<Item = &CanslimCriterion> {
        CriterionLetter::ALL.into_iter().map(|letter| self.get(letter))
    }

    pub fn count(&self, status: AnalysisStatus) -> usize {
        self.iter().filter(|c| c.status == status).count()
    }
}

impl Default for Criteria {
    fn default() -> Self {
        Self::pending()
    }
}

/// Year-over-year EPS growth for one quarter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpsPoint {
    /// Quarter label, e.g. "Q3 24"
    pub quarter: String,
    /// Growth in percent
    pub value: f64,
}

/// Bucket used to colour EPS growth bars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpsBand {
    /// 25% or more, the C criterion threshold
    Strong,
    Positive,
    Negative,
}

impl EpsPoint {
    pub fn band(&self) -> EpsBand {
        if self.value >= 25.0 {
            EpsBand::Strong
        } else if self.value > 0.0 {
            EpsBand::Positive
        } else {
            EpsBand::Negative
        }
    }
}

/// A web page the model cited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub uri: String,
}

/// Score bucket shown next to the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Strong,
    Moderate,
    Weak,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => Self::Strong,
            50..=79 => Self::Moderate,
            _ => Self::Weak,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Moderate => "moderate",
            Self::Weak => "weak",
        }
    }
}

/// Fully-populated CANSLIM analysis of one stock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAnalysis {
    pub symbol: String,
    pub company_name: String,
    /// Display string including currency, e.g. "₹2,450.10"
    pub current_price: String,
    /// 0 to 100
    pub canslim_score: u8,
    pub criteria: Criteria,
    pub summary: String,
    pub eps_trend: Vec<EpsPoint>,
    pub sources: Vec<Source>,
}

impl StockAnalysis {
    /// Dashboard state before any model output has arrived
    pub fn pending(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            company_name: String::new(),
            current_price: String::new(),
            canslim_score: 0,
            criteria: Criteria::pending(),
            summary: String::new(),
            eps_trend: Vec::new(),
            sources: Vec::new(),
        }
    }

    pub fn score_band(&self) -> ScoreBand {
        ScoreBand::from_score(self.canslim_score)
    }
}

/// A stock suggested by a discovery prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub symbol: String,
    pub reason: String,
}

/// Candidates returned by a discovery call
///
/// The prompt asks for eight, but any number is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryResult {
    pub candidates: Vec<Candidate>,
}

impl DiscoveryResult {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Candidate by 1-based position, as shown in listings
    pub fn nth(&self, position: usize) -> Option<&Candidate> {
        position
            .checked_sub(1)
            .and_then(|index| self.candidates.get(index))
    }
}

/// A validated request to analyze one symbol
///
/// Symbols are case-insensitive; they are trimmed and upper-cased here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    symbol: String,
}

impl AnalysisRequest {
    pub fn new(symbol: &str) -> Result<Self> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(AnalystError::InvalidSymbol(
                "stock symbol must not be empty".to_string(),
            ));
        }
        Ok(Self {
            symbol: symbol.to_uppercase(),
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}
