//! Static CANSLIM criterion definitions
//!
//! Names and descriptions follow William J. O'Neil's "How to Make Money in
//! Stocks" (4th Edition). They are display metadata only; pass/fail judgment
//! always comes from the model.

use crate::model::CriterionLetter;

/// Finding shown for a criterion the model has not evaluated
pub const PENDING_FINDING: &str = "Pending analysis...";

/// Static display metadata for one CANSLIM letter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CriterionDefinition {
    pub letter: CriterionLetter,
    pub name: &'static str,
    pub description: &'static str,
}

/// Definitions for all seven letters, in C-A-N-S-L-I-M order
pub const CANSLIM_DEFINITIONS: [CriterionDefinition; 7] = [
    CriterionDefinition {
        letter: CriterionLetter::C,
        name: "Current Earnings",
        description: "Current quarterly earnings per share (EPS) should be up significantly (ideally 25%+) and accelerating compared to the same quarter prior year.",
    },
    CriterionDefinition {
        letter: CriterionLetter::A,
        name: "Annual Earnings",
        description: "Annual earnings should show meaningful growth in *each* of the last 3 years. Look for Return on Equity (ROE) of 17% or higher.",
    },
    CriterionDefinition {
        letter: CriterionLetter::N,
        name: "New Product/Service/Highs",
        description: "New products, management, or new highs. Stock must emerge from a proper base (Cup with Handle, Double Bottom, Flat Base) at the correct pivot point.",
    },
    CriterionDefinition {
        letter: CriterionLetter::S,
        name: "Supply and Demand",
        description: "Volume should dry up during base consolidation and spike (40%+) above average on breakout. Demand must overwhelm supply.",
    },
    CriterionDefinition {
        letter: CriterionLetter::L,
        name: "Leader or Laggard",
        description: "Buy the leading stock in a leading industry group. Relative Strength (RS) Rating should be 80+ (preferably 90+).",
    },
    CriterionDefinition {
        letter: CriterionLetter::I,
        name: "Institutional Sponsorship",
        description: "Rising institutional ownership in recent quarters. Look for \"A+\" quality funds taking positions.",
    },
    CriterionDefinition {
        letter: CriterionLetter::M,
        name: "Market Direction",
        description: "3 out of 4 stocks follow the market trend. Only buy in a confirmed market uptrend (look for follow-through days on indices).",
    },
];

/// Look up the definition for a letter
pub fn definition(letter: CriterionLetter) -> &'static CriterionDefinition {
    &CANSLIM_DEFINITIONS[letter.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definitions_are_in_letter_order() {
        for (index, letter) in CriterionLetter::ALL.iter().enumerate() {
            assert_eq!(CANSLIM_DEFINITIONS[index].letter, *letter);
            assert_eq!(definition(*letter).letter, *letter);
        }
    }

    #[test]
    fn test_definition_lookup() {
        assert_eq!(definition(CriterionLetter::M).name, "Market Direction");
        assert!(definition(CriterionLetter::C).description.contains("25%"));
    }
}
