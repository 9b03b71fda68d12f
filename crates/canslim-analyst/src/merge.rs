//! Merge a partial model reply over the static defaults

use crate::contract::PartialAnalysis;
use crate::model::{AnalysisRequest, CanslimCriterion, Criteria, Source, StockAnalysis};

/// Price shown when the model did not report one
pub const DEFAULT_PRICE: &str = "N/A";

/// Summary shown when the model did not write one
pub const DEFAULT_SUMMARY: &str = "Analysis complete.";

/// Build a fully-populated analysis
///
/// Every criterion starts from its static definition and takes the model's
/// status and finding where present. Missing scalars fall back to fixed
/// defaults, so the result never has a hole.
pub fn merge(request: &AnalysisRequest, partial: PartialAnalysis, sources: Vec<Source>) -> StockAnalysis {
    let criteria = Criteria::from_fn(|letter| {
        let mut criterion = CanslimCriterion::pending(letter);
        let update = partial.criterion(letter);
        if let Some(status) = update.status {
            criterion.status = status;
        }
        if let Some(finding) = &update.finding {
            criterion.finding.clone_from(finding);
        }
        criterion
    });

    let symbol = partial
        .symbol
        .unwrap_or_else(|| request.symbol().to_string());

    StockAnalysis {
        company_name: partial
            .company_name
            .unwrap_or_else(|| request.symbol().to_string()),
        symbol,
        current_price: partial
            .current_price
            .unwrap_or_else(|| DEFAULT_PRICE.to_string()),
        canslim_score: partial.canslim_score.unwrap_or(0),
        criteria,
        summary: partial
            .summary
            .unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
        eps_trend: partial.eps_trend.unwrap_or_default(),
        sources,
    }
}
