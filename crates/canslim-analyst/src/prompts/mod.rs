//! CANSLIM prompt templates
//!
//! Three fixed prompts are rendered with MiniJinja:
//! - `candidates`: general CANSLIM candidate discovery
//! - `near_highs`: stocks within 25% of their 52-week high
//! - `analysis`: the seven-criterion analysis of one symbol
//!
//! Templates are compiled once when the [`PromptSet`] is built, so a broken
//! template fails at startup instead of on the first request.

mod templates;

use crate::error::Result;
use crate::model::CriterionLetter;
use minijinja::{Environment, context};

/// Which prompt to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    Candidates,
    NearHighs,
    Analysis,
}

impl PromptKind {
    pub const ALL: [PromptKind; 3] = [Self::Candidates, Self::NearHighs, Self::Analysis];

    /// Registered template name
    pub fn template_name(self) -> &'static str {
        match self {
            Self::Candidates => "canslim.candidates",
            Self::NearHighs => "canslim.near_highs",
            Self::Analysis => "canslim.analysis",
        }
    }

    fn source(self) -> &'static str {
        match self {
            Self::Candidates => templates::CANDIDATES,
            Self::NearHighs => templates::NEAR_HIGHS,
            Self::Analysis => templates::ANALYSIS,
        }
    }
}

/// Compiled prompt templates
pub struct PromptSet {
    env: Environment<'static>,
}

impl PromptSet {
    /// Compile all templates
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_filter("upper", |s: String| s.to_uppercase());
        env.add_filter("trim", |s: String| s.trim().to_string());

        for kind in PromptKind::ALL {
            env.add_template(kind.template_name(), kind.source())?;
        }

        Ok(Self { env })
    }

    /// Render a prompt; `symbol` is only used by [`PromptKind::Analysis`]
    pub fn render(&self, kind: PromptKind, symbol: Option<&str>) -> Result<String> {
        let letters: Vec<&str> = CriterionLetter::ALL.iter().map(|l| l.as_str()).collect();
        let template = self.env.get_template(kind.template_name())?;
        let rendered = template.render(context! {
            symbol => symbol.unwrap_or_default(),
            letters => letters,
        })?;
        Ok(rendered.trim().to_string())
    }

    pub fn candidates(&self) -> Result<String> {
        self.render(PromptKind::Candidates, None)
    }

    pub fn near_highs(&self) -> Result<String> {
        self.render(PromptKind::NearHighs, None)
    }

    pub fn analysis(&self, symbol: &str) -> Result<String> {
        self.render(PromptKind::Analysis, Some(symbol))
    }
}

impl std::fmt::Debug for PromptSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptSet")
            .field(
                "templates",
                &PromptKind::ALL.map(PromptKind::template_name),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_templates_compile() {
        let prompts = PromptSet::new().unwrap();
        for kind in PromptKind::ALL {
            assert!(!prompts.render(kind, Some("TCS")).unwrap().is_empty());
        }
    }

    #[test]
    fn test_analysis_prompt_interpolates_symbol() {
        let prompts = PromptSet::new().unwrap();
        let prompt = prompts.analysis("reliance").unwrap();

        assert!(prompt.contains("Indian stock \"reliance\""));
        assert!(prompt.contains("\"symbol\": \"RELIANCE\""));
        assert!(prompt.contains("Google Search"));
        assert!(prompt.contains("last 5 quarters"));
    }

    #[test]
    fn test_analysis_prompt_lists_every_criterion() {
        let prompts = PromptSet::new().unwrap();
        let prompt = prompts.analysis("TCS").unwrap();

        for letter in CriterionLetter::ALL {
            assert!(prompt.contains(&format!("\"{letter}\": {{ \"status\"")));
        }
        assert!(prompt.contains("\"M\": { \"status\": \"PASS\"|\"FAIL\"|\"NEUTRAL\", \"finding\": \"...\" }\n  },"));
    }

    #[test]
    fn test_discovery_prompts() {
        let prompts = PromptSet::new().unwrap();

        let candidates = prompts.candidates().unwrap();
        assert!(candidates.contains("Identify 8 Indian stocks"));
        assert!(candidates.contains("Cup with Handle"));
        assert!(candidates.contains("\"candidates\""));

        let near_highs = prompts.near_highs().unwrap();
        assert!(near_highs.contains(">= 75% of the 52-Week High"));
        assert!(near_highs.contains("\"candidates\""));
    }
}
