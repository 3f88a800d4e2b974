//! Per-source evidence state

use crate::traits::{Assessment, Criterion};
use serde::{Deserialize, Serialize};

/// What one source says about one criterion
///
/// Also used for the resolved (effective) state, which is computed on demand
/// and handed to callers by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct EvidenceState<C: Criterion> {
    /// The criterion this state belongs to
    pub criterion: C,

    /// Presence / strength or score
    pub assessment: C::Assessment,

    /// Free-text rationale (predictor explanation or curator note)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl<C: Criterion> EvidenceState<C> {
    /// All-sentinel state for `criterion`
    pub fn unset(criterion: C) -> Self {
        Self {
            criterion,
            assessment: C::Assessment::unset(),
            summary: None,
        }
    }

    /// State seeded with the guideline defaults for `criterion`
    pub fn seeded(criterion: C) -> Self {
        Self {
            criterion,
            assessment: criterion.default_assessment(),
            summary: None,
        }
    }

    /// Overlay the fields `other` sets onto this state
    pub fn overlay(&mut self, other: &Self) {
        self.assessment.overlay(&other.assessment);
        if other.summary.is_some() {
            self.summary = other.summary.clone();
        }
    }
}
