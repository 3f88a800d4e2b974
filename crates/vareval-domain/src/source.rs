//! Evidence sources, ordered by override priority

use crate::traits::Source;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Origin of a sequence-variant judgment
///
/// Declaration order is priority order: later variants override earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AcmgSource {
    /// Guideline baseline (read-only)
    Default,

    /// Rule-based InterVar predictor
    InterVar,

    /// AutoACMG predictor
    #[serde(rename = "AutoACMG")]
    AutoAcmg,

    /// Previously saved rating
    Server,

    /// Curator input
    User,
}

const ACMG_SOURCES: [AcmgSource; 5] = [
    AcmgSource::Default,
    AcmgSource::InterVar,
    AcmgSource::AutoAcmg,
    AcmgSource::Server,
    AcmgSource::User,
];

impl AcmgSource {
    /// Parse a source from its name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "default" => Some(AcmgSource::Default),
            "intervar" => Some(AcmgSource::InterVar),
            "autoacmg" | "auto_acmg" | "auto-acmg" => Some(AcmgSource::AutoAcmg),
            "server" => Some(AcmgSource::Server),
            "user" => Some(AcmgSource::User),
            _ => None,
        }
    }
}

impl Source for AcmgSource {
    const DEFAULT: Self = AcmgSource::Default;

    fn ordered() -> &'static [Self] {
        &ACMG_SOURCES
    }

    fn name(&self) -> &'static str {
        match self {
            AcmgSource::Default => "Default",
            AcmgSource::InterVar => "InterVar",
            AcmgSource::AutoAcmg => "AutoACMG",
            AcmgSource::Server => "Server",
            AcmgSource::User => "User",
        }
    }
}

impl fmt::Display for AcmgSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for AcmgSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid source: {}", s))
    }
}

/// Origin of a CNV score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CnvSource {
    /// Guideline baseline (read-only)
    Default,

    /// Curator input, including adopted AutoCNV scores
    User,
}

const CNV_SOURCES: [CnvSource; 2] = [CnvSource::Default, CnvSource::User];

impl Source for CnvSource {
    const DEFAULT: Self = CnvSource::Default;

    fn ordered() -> &'static [Self] {
        &CNV_SOURCES
    }

    fn name(&self) -> &'static str {
        match self {
            CnvSource::Default => "Default",
            CnvSource::User => "User",
        }
    }
}

impl fmt::Display for CnvSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
