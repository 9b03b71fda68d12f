//! Citation sources from grounding metadata

use crate::model::Source;
use canslim_llm::GroundingCitation;
use std::collections::HashSet;
use tracing::debug;
use url::Url;

/// Title used for a citation without one
pub const DEFAULT_SOURCE_TITLE: &str = "Source";

/// Keep citations with a usable link, in order and without duplicates
pub fn collect_sources(citations: &[GroundingCitation]) -> Vec<Source> {
    let mut seen = HashSet::new();
    let mut sources = Vec::with_capacity(citations.len());

    for citation in citations {
        let Some(uri) = citation.uri.as_deref().and_then(usable_uri) else {
            debug!(uri = ?citation.uri, "Dropping citation without a usable link");
            continue;
        };
        if !seen.insert(uri.clone()) {
            continue;
        }

        let title = citation
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_SOURCE_TITLE)
            .to_string();
        sources.push(Source { title, uri });
    }

    sources
}

/// Absolute http(s) link, or `None` for placeholders such as `#`
fn usable_uri(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let url = Url::parse(raw).ok()?;
    (matches!(url.scheme(), "http" | "https") && url.has_host()).then(|| raw.to_string())
}
