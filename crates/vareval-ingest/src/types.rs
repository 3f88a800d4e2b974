//! Payload types reported by predictors and persistence

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use vareval_domain::{EvidenceLevel, Presence};

/// One InterVar call: `1`/`0` or `true`/`false`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InterVarCall {
    /// Numeric flag as InterVar prints it
    Flag(u8),
    /// Boolean flag
    Bool(bool),
}

impl InterVarCall {
    /// Whether the criterion was called as met
    pub fn is_met(&self) -> bool {
        match self {
            InterVarCall::Flag(flag) => *flag != 0,
            InterVarCall::Bool(met) => *met,
        }
    }
}

/// InterVar output: criterion id -> call
///
/// InterVar reports presence only, never a strength.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterVarPayload {
    /// Calls keyed by criterion id as InterVar spells it
    pub calls: BTreeMap<String, InterVarCall>,
}

/// Outcome AutoACMG reports for one criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AutoAcmgPrediction {
    /// The criterion applies
    Met,
    /// The criterion was evaluated and does not apply
    NotMet,
    /// The criterion does not apply to this kind of variant
    NotApplicable,
    /// AutoACMG has no automated rule for this criterion
    NotAutomated,
    /// Evaluation failed
    Failed,
    /// The criterion is deprecated
    Deprecated,
}

impl AutoAcmgPrediction {
    /// Get the prediction name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            AutoAcmgPrediction::Met => "Met",
            AutoAcmgPrediction::NotMet => "NotMet",
            AutoAcmgPrediction::NotApplicable => "NotApplicable",
            AutoAcmgPrediction::NotAutomated => "NotAutomated",
            AutoAcmgPrediction::Failed => "Failed",
            AutoAcmgPrediction::Deprecated => "Deprecated",
        }
    }

    /// Parse a prediction (case-insensitive, separators ignored)
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "met" | "applicable" => Some(AutoAcmgPrediction::Met),
            "notmet" => Some(AutoAcmgPrediction::NotMet),
            "notapplicable" => Some(AutoAcmgPrediction::NotApplicable),
            "notautomated" => Some(AutoAcmgPrediction::NotAutomated),
            "failed" => Some(AutoAcmgPrediction::Failed),
            "deprecated" => Some(AutoAcmgPrediction::Deprecated),
            _ => None,
        }
    }

    /// Presence implied by the prediction; `None` leaves presence untouched
    pub fn presence(&self) -> Option<Presence> {
        match self {
            AutoAcmgPrediction::Met => Some(Presence::Present),
            AutoAcmgPrediction::NotMet | AutoAcmgPrediction::NotApplicable => {
                Some(Presence::Absent)
            }
            AutoAcmgPrediction::NotAutomated
            | AutoAcmgPrediction::Failed
            | AutoAcmgPrediction::Deprecated => None,
        }
    }
}

impl fmt::Display for AutoAcmgPrediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One AutoACMG criterion result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoAcmgEntry {
    /// Criterion id as AutoACMG spells it (`PM2`, `pm2_supporting`)
    pub name: String,

    /// Whether the criterion is met
    pub prediction: AutoAcmgPrediction,

    /// Strength the criterion applies at (full or bare name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<String>,

    /// Explanation of the call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// One criterion of a previously saved rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRatingEntry {
    /// Criterion id
    pub criterion: String,

    /// Saved presence
    #[serde(default)]
    pub presence: Presence,

    /// Saved strength
    #[serde(default)]
    pub evidence_level: EvidenceLevel,

    /// Saved curator note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// One AutoCNV criterion score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoCnvEntry {
    /// Criterion id (`2A`, `Loss2C-1`)
    pub criterion: String,

    /// Points assigned
    pub score: f64,

    /// Explanation of the score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// A curator edit to a sequence-variant criterion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeqvarOverride {
    /// Criterion id
    pub criterion: String,

    /// New presence, if changed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence: Option<Presence>,

    /// New strength, if changed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_level: Option<EvidenceLevel>,

    /// Curator note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// A curator edit to a CNV criterion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CnvOverride {
    /// Criterion id
    pub criterion: String,

    /// New score; `null` clears the curator's score
    #[serde(default)]
    pub score: Option<f64>,

    /// Curator note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Tally of one ingestion pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    /// Entries written to the table
    pub applied: usize,

    /// Entries naming a deprecated criterion that were skipped
    pub skipped_deprecated: usize,

    /// Entries naming no known criterion
    pub skipped_unknown: usize,
}

impl IngestReport {
    /// Total entries skipped
    pub fn skipped(&self) -> usize {
        self.skipped_deprecated + self.skipped_unknown
    }

    /// Add another pass's tally to this one
    pub fn merge(&mut self, other: IngestReport) {
        self.applied += other.applied;
        self.skipped_deprecated += other.skipped_deprecated;
        self.skipped_unknown += other.skipped_unknown;
    }
}

impl fmt::Display for IngestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} applied, {} deprecated skipped, {} unknown skipped",
            self.applied, self.skipped_deprecated, self.skipped_unknown
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intervar_calls() {
        let payload: InterVarPayload =
            serde_json::from_str(r#"{"PVS1": 1, "PS1": 0, "PM2": true}"#).unwrap();
        assert!(payload.calls["PVS1"].is_met());
        assert!(!payload.calls["PS1"].is_met());
        assert!(payload.calls["PM2"].is_met());
    }

    #[test]
    fn test_prediction_presence() {
        assert_eq!(AutoAcmgPrediction::Met.presence(), Some(Presence::Present));
        assert_eq!(AutoAcmgPrediction::NotApplicable.presence(), Some(Presence::Absent));
        assert_eq!(AutoAcmgPrediction::Failed.presence(), None);
        assert_eq!(AutoAcmgPrediction::parse("not_met"), Some(AutoAcmgPrediction::NotMet));
        assert_eq!(AutoAcmgPrediction::parse("bogus"), None);
    }

    #[test]
    fn test_saved_rating_defaults() {
        let entry: SavedRatingEntry = serde_json::from_str(r#"{"criterion": "PM1"}"#).unwrap();
        assert_eq!(entry.presence, Presence::Unknown);
        assert_eq!(entry.evidence_level, EvidenceLevel::NotSet);
    }

    #[test]
    fn test_report_merge() {
        let mut report = IngestReport {
            applied: 2,
            skipped_deprecated: 1,
            skipped_unknown: 0,
        };
        report.merge(IngestReport {
            applied: 1,
            skipped_deprecated: 0,
            skipped_unknown: 3,
        });
        assert_eq!(report.applied, 3);
        assert_eq!(report.skipped(), 4);
        assert_eq!(report.to_string(), "3 applied, 1 deprecated skipped, 3 unknown skipped");
    }
}
