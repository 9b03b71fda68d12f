//! Output formatting for analyses and discovery lists

use crate::model::{DiscoveryResult, EpsBand, EpsPoint, StockAnalysis};
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;
use serde_json::json;
use std::fmt::Write;

/// Closing reminder printed under every text analysis
pub const DISCLAIMER: &str =
    "Remember: CANSLIM is a growth strategy. Always verify with your own research.";

/// Shown instead of the EPS chart when no quarters were reported
pub const NO_GROWTH_DATA: &str = "No growth data available";

const TABLE_WIDTH: u16 = 110;
const BAR_WIDTH: f64 = 20.0;

pub trait Formatter: Send + Sync {
    fn format_analysis(&self, analysis: &StockAnalysis) -> String;
    fn format_discovery(&self, title: &str, result: &DiscoveryResult) -> String;
    fn format_error(&self, message: &str) -> String;
}

/// Output flavour selected on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn formatter(self) -> Box<dyn Formatter> {
        match self {
            Self::Text => Box::new(TextFormatter),
            Self::Json => Box::new(JsonFormatter),
        }
    }
}

/// Human-readable tables for a terminal
pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format_analysis(&self, analysis: &StockAnalysis) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}  {}", analysis.symbol, analysis.company_name);
        let _ = writeln!(out, "Price: {}", analysis.current_price);
        let _ = writeln!(
            out,
            "CANSLIM score: {}/100 ({})",
            analysis.canslim_score,
            analysis.score_band().label()
        );
        out.push('\n');

        let mut table = new_table(["", "Criterion", "Status", "Finding"]);
        for criterion in analysis.criteria.iter() {
            table.add_row(vec![
                criterion.letter.to_string(),
                criterion.name.clone(),
                criterion.status.to_string(),
                criterion.finding.clone(),
            ]);
        }
        let _ = writeln!(out, "{table}");

        out.push_str("\nEPS growth (YoY)\n");
        if analysis.eps_trend.is_empty() {
            let _ = writeln!(out, "  {NO_GROWTH_DATA}");
        } else {
            for point in &analysis.eps_trend {
                let _ = writeln!(out, "  {}", eps_line(point));
            }
        }

        let _ = writeln!(out, "\nSummary\n  {}", analysis.summary);

        if !analysis.sources.is_empty() {
            out.push_str("\nSources\n");
            for (i, source) in analysis.sources.iter().enumerate() {
                let _ = writeln!(out, "  {}. {} <{}>", i + 1, source.title, source.uri);
            }
        }

        let _ = write!(out, "\n{DISCLAIMER}");
        out
    }

    fn format_discovery(&self, title: &str, result: &DiscoveryResult) -> String {
        if result.is_empty() {
            return format!("{title}\n  No candidates found.");
        }

        let mut table = new_table(["#", "Symbol", "Reason"]);
        for (i, candidate) in result.candidates.iter().enumerate() {
            table.add_row(vec![
                (i + 1).to_string(),
                candidate.symbol.clone(),
                candidate.reason.clone(),
            ]);
        }
        format!("{title}\n{table}")
    }

    fn format_error(&self, message: &str) -> String {
        format!("❌ Error: {message}")
    }
}

/// Pretty-printed JSON using the response field names
pub struct JsonFormatter;

impl JsonFormatter {
    fn to_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value)
            .unwrap_or_else(|e| json!({ "error": e.to_string() }).to_string())
    }
}

impl Formatter for JsonFormatter {
    fn format_analysis(&self, analysis: &StockAnalysis) -> String {
        Self::to_json(analysis)
    }

    fn format_discovery(&self, _title: &str, result: &DiscoveryResult) -> String {
        Self::to_json(result)
    }

    fn format_error(&self, message: &str) -> String {
        Self::to_json(&json!({ "error": message }))
    }
}

fn new_table<const N: usize>(header: [&str; N]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(TABLE_WIDTH)
        .set_header(header.to_vec());
    table
}

fn eps_line(point: &EpsPoint) -> String {
    let filled = (point.value.abs().min(100.0) / 100.0 * BAR_WIDTH).round() as usize;
    let marker = match point.band() {
        EpsBand::Strong => "▲",
        EpsBand::Positive => "•",
        EpsBand::Negative => "▼",
    };
    format!(
        "{:<8} {:>+8.1}% {} {}",
        point.quarter,
        point.value,
        marker,
        "█".repeat(filled.max(1))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnalysisStatus, Candidate, CriterionLetter, Source};

    fn sample() -> StockAnalysis {
        let mut analysis = StockAnalysis::pending("TCS");
        analysis.company_name = "Tata Consultancy Services".to_string();
        analysis.current_price = "₹4,120.00".to_string();
        analysis.canslim_score = 81;
        analysis.criteria.c.status = AnalysisStatus::Pass;
        analysis.criteria.c.finding = "EPS up 27% YoY".to_string();
        analysis.summary = "Buy on a pullback to the pivot.".to_string();
        analysis.eps_trend = vec![
            EpsPoint {
                quarter: "Q1 25".to_string(),
                value: 27.0,
            },
            EpsPoint {
                quarter: "Q2 25".to_string(),
                value: -3.5,
            },
        ];
        analysis.sources = vec![Source {
            title: "NSE".to_string(),
            uri: "https://www.nseindia.com".to_string(),
        }];
        analysis
    }

    #[test]
    fn test_text_analysis_layout() {
        let text = TextFormatter.format_analysis(&sample());

        assert!(text.starts_with("TCS  Tata Consultancy Services"));
        assert!(text.contains("CANSLIM score: 81/100 (strong)"));
        for letter in CriterionLetter::ALL {
            assert!(text.contains(letter.name()));
        }
        assert!(text.contains("PASS"));
        assert!(text.contains("+27.0% ▲"));
        assert!(text.contains("-3.5% ▼"));
        assert!(text.contains("1. NSE <https://www.nseindia.com>"));
        assert!(text.ends_with(DISCLAIMER));
    }

    #[test]
    fn test_text_analysis_without_eps() {
        let text = TextFormatter.format_analysis(&StockAnalysis::pending("INFY"));
        assert!(text.contains(NO_GROWTH_DATA));
        assert!(!text.contains("Sources"));
    }

    #[test]
    fn test_text_discovery() {
        let result = DiscoveryResult {
            candidates: vec![Candidate {
                symbol: "DIXON".to_string(),
                reason: "Flat base breakout on 2x volume".to_string(),
            }],
        };
        let text = TextFormatter.format_discovery("CANSLIM candidates", &result);
        assert!(text.starts_with("CANSLIM candidates"));
        assert!(text.contains("DIXON"));

        let empty = TextFormatter.format_discovery("Near 52-week highs", &DiscoveryResult::default());
        assert!(empty.contains("No candidates found."));
    }

    #[test]
    fn test_json_output_uses_contract_names() {
        let json: serde_json::Value =
            serde_json::from_str(&JsonFormatter.format_analysis(&sample())).unwrap();
        assert_eq!(json["canslimScore"], 81);
        assert_eq!(json["criteria"]["C"]["status"], "PASS");
        assert_eq!(json["epsTrend"][1]["value"], -3.5);

        let err: serde_json::Value =
            serde_json::from_str(&JsonFormatter.format_error("boom")).unwrap();
        assert_eq!(err["error"], "boom");
    }
}
