//! Model response contract
//!
//! Replies are parsed into typed partial updates instead of being merged as
//! loose JSON. Each field is read on its own: a missing, empty or mistyped
//! field becomes `None` and the merge step supplies its default. Only a reply
//! that is not JSON, or not a JSON object, fails the call.

use crate::error::{AnalystError, Result};
use crate::model::{AnalysisStatus, Candidate, CriterionLetter, DiscoveryResult, EpsPoint};
use crate::sanitize::strip_code_fences;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Parse raw reply text into a JSON object
pub fn parse_reply(text: &str) -> Result<Map<String, Value>> {
    let clean = strip_code_fences(text);
    let value: Value = serde_json::from_str(clean)
        .map_err(|e| AnalystError::malformed(format!("reply is not valid JSON: {e}")))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(AnalystError::malformed(format!(
            "expected a JSON object, got {}",
            json_type(&other)
        ))),
    }
}

/// Status and finding for one criterion, as far as the model supplied them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialCriterion {
    pub status: Option<AnalysisStatus>,
    pub finding: Option<String>,
}

/// Analysis fields the model supplied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialAnalysis {
    pub symbol: Option<String>,
    pub company_name: Option<String>,
    pub current_price: Option<String>,
    pub canslim_score: Option<u8>,
    /// Indexed by [`CriterionLetter::index`]
    pub criteria: [PartialCriterion; 7],
    pub summary: Option<String>,
    pub eps_trend: Option<Vec<EpsPoint>>,
}

impl PartialAnalysis {
    pub fn from_reply(text: &str) -> Result<Self> {
        Ok(Self::from_object(&parse_reply(text)?))
    }

    pub fn from_object(map: &Map<String, Value>) -> Self {
        let mut partial = Self {
            symbol: string_field(map, "symbol"),
            company_name: string_field(map, "companyName"),
            current_price: string_field(map, "currentPrice"),
            canslim_score: map.get("canslimScore").and_then(score),
            summary: string_field(map, "summary"),
            eps_trend: eps_trend(map.get("epsTrend")),
            ..Self::default()
        };

        match map.get("criteria") {
            None | Some(Value::Null) => {}
            Some(Value::Object(criteria)) => {
                for letter in CriterionLetter::ALL {
                    partial.criteria[letter.index()] = criterion(criteria, letter);
                }
            }
            Some(other) => mistyped("criteria", other),
        }

        partial
    }

    pub fn criterion(&self, letter: CriterionLetter) -> &PartialCriterion {
        &self.criteria[letter.index()]
    }
}

/// Parse a discovery reply
pub fn discovery_from_reply(text: &str) -> Result<DiscoveryResult> {
    Ok(discovery_from_object(&parse_reply(text)?))
}

pub fn discovery_from_object(map: &Map<String, Value>) -> DiscoveryResult {
    let entries = match map.get("candidates") {
        None | Some(Value::Null) => return DiscoveryResult::default(),
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            mistyped("candidates", other);
            return DiscoveryResult::default();
        }
    };

    let candidates: Vec<Candidate> = entries.iter().filter_map(candidate).collect();
    if candidates.len() < entries.len() {
        debug!(
            dropped = entries.len() - candidates.len(),
            "Dropped candidates without a symbol"
        );
    }
    DiscoveryResult { candidates }
}

fn candidate(entry: &Value) -> Option<Candidate> {
    let Value::Object(entry) = entry else {
        mistyped("candidates[]", entry);
        return None;
    };
    let symbol = string_field(entry, "symbol")?;
    let reason = string_field(entry, "reason").unwrap_or_default();
    Some(Candidate { symbol, reason })
}

fn criterion(criteria: &Map<String, Value>, letter: CriterionLetter) -> PartialCriterion {
    match criteria.get(letter.as_str()) {
        None | Some(Value::Null) => PartialCriterion::default(),
        Some(Value::Object(fields)) => {
            let status = string_field(fields, "status").and_then(|label| {
                let status = AnalysisStatus::parse(&label);
                if status.is_none() {
                    warn!(letter = letter.as_str(), status = %label, "Ignoring unrecognised criterion status");
                }
                status
            });
            PartialCriterion {
                status,
                finding: string_field(fields, "finding"),
            }
        }
        Some(other) => {
            mistyped(letter.as_str(), other);
            PartialCriterion::default()
        }
    }
}

/// Non-blank string field, trimmed
fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::Null => None,
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        other => {
            mistyped(key, other);
            None
        }
    }
}

fn score(value: &Value) -> Option<u8> {
    let raw = match value {
        Value::Null => return None,
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match raw.filter(|v| v.is_finite()) {
        Some(v) => Some(clamp_score(v)),
        None => {
            mistyped("canslimScore", value);
            None
        }
    }
}

fn clamp_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

fn eps_trend(value: Option<&Value>) -> Option<Vec<EpsPoint>> {
    match value? {
        Value::Null => None,
        Value::Array(entries) => Some(entries.iter().filter_map(eps_point).collect()),
        other => {
            mistyped("epsTrend", other);
            None
        }
    }
}

fn eps_point(entry: &Value) -> Option<EpsPoint> {
    let point = entry.as_object().and_then(|fields| {
        let quarter = string_field(fields, "quarter")?;
        let value = match fields.get("value")? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().trim_end_matches('%').trim_end().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|v| v.is_finite())?;
        Some(EpsPoint { quarter, value })
    });
    if point.is_none() {
        warn!(entry = %entry, "Dropping malformed EPS trend entry");
    }
    point
}

fn mistyped(field: &str, value: &Value) {
    warn!(field, found = json_type(value), "Ignoring mistyped field in model reply");
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_parse_reply_rejects_non_json() {
        let err = parse_reply("I could not find that stock.").unwrap_err();
        assert!(matches!(err, AnalystError::MalformedResponse { .. }));
    }

    #[test]
    fn test_parse_reply_rejects_non_object() {
        let err = parse_reply("[1, 2, 3]").unwrap_err();
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_empty_reply_is_empty_object() {
        assert!(parse_reply("").unwrap().is_empty());
    }

    #[test]
    fn test_full_analysis_reply() {
        let partial = PartialAnalysis::from_object(&object(json!({
            "symbol": "RELIANCE",
            "companyName": "Reliance Industries Ltd",
            "currentPrice": "₹2,950.40",
            "canslimScore": 72,
            "criteria": {
                "C": { "status": "PASS", "finding": "Q2 EPS up 31% YoY" },
                "M": { "status": "neutral", "finding": "Nifty under pressure" }
            },
            "summary": "Watch for a breakout above the pivot.",
            "epsTrend": [
                { "quarter": "Q1 24", "value": 12.5 },
                { "quarter": "Q2 24", "value": 31 }
            ]
        })));

        assert_eq!(partial.symbol.as_deref(), Some("RELIANCE"));
        assert_eq!(partial.canslim_score, Some(72));
        assert_eq!(partial.criterion(CriterionLetter::C).status, Some(AnalysisStatus::Pass));
        assert_eq!(partial.criterion(CriterionLetter::M).status, Some(AnalysisStatus::Neutral));
        assert_eq!(partial.criterion(CriterionLetter::A), &PartialCriterion::default());
        let eps = partial.eps_trend.unwrap();
        assert_eq!(eps.len(), 2);
        assert!((eps[1].value - 31.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_falsy_and_mistyped_fields_are_absent() {
        let partial = PartialAnalysis::from_object(&object(json!({
            "symbol": "",
            "companyName": 42,
            "currentPrice": null,
            "summary": "   ",
            "criteria": "all good",
            "epsTrend": "n/a"
        })));

        assert_eq!(partial, PartialAnalysis::default());
    }

    #[test]
    fn test_score_normalisation() {
        let cases = [
            (json!(85), Some(85)),
            (json!(0), Some(0)),
            (json!(67.6), Some(68)),
            (json!(140), Some(100)),
            (json!(-5), Some(0)),
            (json!("55"), Some(55)),
            (json!(" 90.2 "), Some(90)),
            (json!("high"), None),
            (json!(true), None),
        ];
        for (value, expected) in cases {
            let map = object(json!({ "canslimScore": value }));
            assert_eq!(
                PartialAnalysis::from_object(&map).canslim_score,
                expected,
                "score {value}"
            );
        }
    }

    #[test]
    fn test_unrecognised_status_is_absent() {
        let partial = PartialAnalysis::from_object(&object(json!({
            "criteria": { "L": { "status": "STRONG", "finding": "RS 94" } }
        })));
        let l = partial.criterion(CriterionLetter::L);
        assert_eq!(l.status, None);
        assert_eq!(l.finding.as_deref(), Some("RS 94"));
    }

    #[test]
    fn test_malformed_eps_entries_are_dropped() {
        let partial = PartialAnalysis::from_object(&object(json!({
            "epsTrend": [
                { "quarter": "Q1 24", "value": "18.5%" },
                { "quarter": "", "value": 10 },
                { "quarter": "Q3 24", "value": "n/a" },
                "Q4 24: 40%",
                { "quarter": "Q4 24", "value": -4.25 }
            ]
        })));
        let eps = partial.eps_trend.unwrap();
        let quarters: Vec<_> = eps.iter().map(|p| p.quarter.as_str()).collect();
        assert_eq!(quarters, vec!["Q1 24", "Q4 24"]);
        assert!((eps[0].value - 18.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_discovery_single_candidate() {
        let result =
            discovery_from_reply(r#"{"candidates":[{"symbol":"TCS","reason":"breakout"}]}"#).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.candidates[0].symbol, "TCS");
        assert_eq!(result.candidates[0].reason, "breakout");
    }

    #[test]
    fn test_discovery_drops_entries_without_symbol() {
        let result = discovery_from_object(&object(json!({
            "candidates": [
                { "symbol": " TRENT ", "reason": "Flat base breakout" },
                { "reason": "no symbol" },
                { "symbol": "  " },
                { "symbol": "DIXON" },
                7
            ]
        })));
        let symbols: Vec<_> = result.candidates.iter().map(|c| c.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["TRENT", "DIXON"]);
        assert_eq!(result.candidates[1].reason, "");
    }

    #[test]
    fn test_discovery_without_candidates() {
        assert!(discovery_from_reply("{}").unwrap().is_empty());
        assert!(discovery_from_reply(r#"{"candidates": "none"}"#).unwrap().is_empty());
    }
}
