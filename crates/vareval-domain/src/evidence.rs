//! Evidence vocabulary - presence, strength levels and categories

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a criterion is judged to apply to the variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Presence {
    /// The criterion applies
    Present,

    /// The criterion does not apply
    Absent,

    /// No judgment (sentinel)
    #[default]
    Unknown,
}

impl Presence {
    /// Get the presence name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Presence::Present => "Present",
            Presence::Absent => "Absent",
            Presence::Unknown => "Unknown",
        }
    }

    /// Parse a presence from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "present" => Some(Presence::Present),
            "absent" => Some(Presence::Absent),
            "unknown" => Some(Presence::Unknown),
            _ => None,
        }
    }

    /// Presence from a boolean predictor call
    pub fn from_bool(present: bool) -> Self {
        if present {
            Presence::Present
        } else {
            Presence::Absent
        }
    }

    /// Whether this is the `Unknown` sentinel
    pub fn is_unknown(&self) -> bool {
        matches!(self, Presence::Unknown)
    }
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Presence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid presence: {}", s))
    }
}

/// Direction a criterion argues for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Evidence toward pathogenicity
    Pathogenic,

    /// Evidence toward a benign interpretation
    Benign,
}

impl Category {
    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Pathogenic => "Pathogenic",
            Category::Benign => "Benign",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categorical strength of a sequence-variant criterion
///
/// Ordered from the strongest pathogenic level to the weakest benign level,
/// with `NotSet` as the sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum EvidenceLevel {
    /// Pathogenic, very strong (PVS)
    PathogenicVeryStrong,

    /// Pathogenic, strong (PS)
    PathogenicStrong,

    /// Pathogenic, moderate (PM)
    PathogenicModerate,

    /// Pathogenic, supporting (PP)
    PathogenicSupporting,

    /// Benign, stand-alone (BA)
    BenignStandalone,

    /// Benign, strong (BS)
    BenignStrong,

    /// Benign, supporting (BP)
    BenignSupporting,

    /// No strength assigned (sentinel)
    #[default]
    NotSet,
}

impl EvidenceLevel {
    /// The seven counting buckets, strongest pathogenic first
    pub const BUCKETS: [EvidenceLevel; 7] = [
        EvidenceLevel::PathogenicVeryStrong,
        EvidenceLevel::PathogenicStrong,
        EvidenceLevel::PathogenicModerate,
        EvidenceLevel::PathogenicSupporting,
        EvidenceLevel::BenignStandalone,
        EvidenceLevel::BenignStrong,
        EvidenceLevel::BenignSupporting,
    ];

    /// Get the level name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceLevel::PathogenicVeryStrong => "PathogenicVeryStrong",
            EvidenceLevel::PathogenicStrong => "PathogenicStrong",
            EvidenceLevel::PathogenicModerate => "PathogenicModerate",
            EvidenceLevel::PathogenicSupporting => "PathogenicSupporting",
            EvidenceLevel::BenignStandalone => "BenignStandalone",
            EvidenceLevel::BenignStrong => "BenignStrong",
            EvidenceLevel::BenignSupporting => "BenignSupporting",
            EvidenceLevel::NotSet => "NotSet",
        }
    }

    /// Short human-readable label (e.g. "Moderate")
    pub fn label(&self) -> &'static str {
        match self {
            EvidenceLevel::PathogenicVeryStrong => "Very strong",
            EvidenceLevel::PathogenicStrong | EvidenceLevel::BenignStrong => "Strong",
            EvidenceLevel::PathogenicModerate => "Moderate",
            EvidenceLevel::PathogenicSupporting | EvidenceLevel::BenignSupporting => "Supporting",
            EvidenceLevel::BenignStandalone => "Stand-alone",
            EvidenceLevel::NotSet => "Not set",
        }
    }

    /// Parse a level from its name or the strength suffix used by
    /// predictors (`VeryStrong`, `PVS`, `BA` ...). Case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "pathogenicverystrong" | "pvs" => Some(EvidenceLevel::PathogenicVeryStrong),
            "pathogenicstrong" | "ps" => Some(EvidenceLevel::PathogenicStrong),
            "pathogenicmoderate" | "pm" => Some(EvidenceLevel::PathogenicModerate),
            "pathogenicsupporting" | "pp" => Some(EvidenceLevel::PathogenicSupporting),
            "benignstandalone" | "ba" => Some(EvidenceLevel::BenignStandalone),
            "benignstrong" | "bs" => Some(EvidenceLevel::BenignStrong),
            "benignsupporting" | "bp" => Some(EvidenceLevel::BenignSupporting),
            "notset" => Some(EvidenceLevel::NotSet),
            _ => None,
        }
    }

    /// Category this level belongs to (`None` for `NotSet`)
    pub fn category(&self) -> Option<Category> {
        match self {
            EvidenceLevel::PathogenicVeryStrong
            | EvidenceLevel::PathogenicStrong
            | EvidenceLevel::PathogenicModerate
            | EvidenceLevel::PathogenicSupporting => Some(Category::Pathogenic),
            EvidenceLevel::BenignStandalone
            | EvidenceLevel::BenignStrong
            | EvidenceLevel::BenignSupporting => Some(Category::Benign),
            EvidenceLevel::NotSet => None,
        }
    }

    /// Whether this is the `NotSet` sentinel
    pub fn is_not_set(&self) -> bool {
        matches!(self, EvidenceLevel::NotSet)
    }
}

impl fmt::Display for EvidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EvidenceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid evidence level: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_parse() {
        assert_eq!(Presence::parse("present"), Some(Presence::Present));
        assert_eq!(Presence::parse(" Absent "), Some(Presence::Absent));
        assert_eq!(Presence::parse("maybe"), None);
        assert_eq!(Presence::default(), Presence::Unknown);
    }

    #[test]
    fn test_evidence_level_parse_aliases() {
        assert_eq!(EvidenceLevel::parse("PathogenicModerate"), Some(EvidenceLevel::PathogenicModerate));
        assert_eq!(EvidenceLevel::parse("pathogenic_moderate"), Some(EvidenceLevel::PathogenicModerate));
        assert_eq!(EvidenceLevel::parse("BA"), Some(EvidenceLevel::BenignStandalone));
        assert_eq!(EvidenceLevel::parse("strong"), None);
    }

    #[test]
    fn test_evidence_level_category() {
        assert_eq!(EvidenceLevel::PathogenicSupporting.category(), Some(Category::Pathogenic));
        assert_eq!(EvidenceLevel::BenignStandalone.category(), Some(Category::Benign));
        assert_eq!(EvidenceLevel::NotSet.category(), None);
    }

    #[test]
    fn test_buckets_exclude_sentinel() {
        assert!(!EvidenceLevel::BUCKETS.contains(&EvidenceLevel::NotSet));
        assert_eq!(EvidenceLevel::BUCKETS.len(), 7);
    }
}
