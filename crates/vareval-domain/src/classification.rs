//! Classification labels

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical pathogenicity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    /// Pathogenic
    #[serde(rename = "Pathogenic")]
    Pathogenic,

    /// Likely pathogenic
    #[serde(rename = "Likely pathogenic")]
    LikelyPathogenic,

    /// Uncertain significance (VUS)
    #[serde(rename = "Uncertain significance")]
    UncertainSignificance,

    /// Likely benign
    #[serde(rename = "Likely benign")]
    LikelyBenign,

    /// Benign
    #[serde(rename = "Benign")]
    Benign,

    /// Both pathogenic and benign combining rules fire
    #[serde(rename = "Conflicting")]
    Conflicting,
}

impl Classification {
    /// Get the label as written in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Pathogenic => "Pathogenic",
            Classification::LikelyPathogenic => "Likely pathogenic",
            Classification::UncertainSignificance => "Uncertain significance",
            Classification::LikelyBenign => "Likely benign",
            Classification::Benign => "Benign",
            Classification::Conflicting => "Conflicting",
        }
    }

    /// Parse a label (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pathogenic" => Some(Classification::Pathogenic),
            "likely pathogenic" => Some(Classification::LikelyPathogenic),
            "uncertain significance" => Some(Classification::UncertainSignificance),
            "likely benign" => Some(Classification::LikelyBenign),
            "benign" => Some(Classification::Benign),
            "conflicting" => Some(Classification::Conflicting),
            _ => None,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classification label paired with the conflict flag
///
/// The flag is reported alongside the label so callers can render a warning;
/// it is `false` whenever the conflict predicate did not fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Verdict {
    /// Winning label
    pub classification: Classification,

    /// Whether the conflict predicate fired
    pub is_conflicting: bool,
}

impl Verdict {
    /// Create a verdict
    pub fn new(classification: Classification, is_conflicting: bool) -> Self {
        Self {
            classification,
            is_conflicting,
        }
    }

    /// Label as written in reports
    pub fn label(&self) -> &'static str {
        self.classification.as_str()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_conflicting {
            write!(f, "{} (conflicting evidence)", self.classification)
        } else {
            write!(f, "{}", self.classification)
        }
    }
}
