//! ClinGen SVI copy-number variant scoring
//!
//! A CNV is scored against either the loss or the gain catalog, selected once
//! from the variant's SV type. The classification is a threshold on the sum
//! of effective scores over every criterion of the selected catalog.

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::resolver::MultiSourceResolver;
use crate::table::{EvidenceStateTable, TableSnapshot};
use std::collections::BTreeMap;
use tracing::{debug, info};
use vareval_domain::{
    Classification, CnvAssessment, CnvCriterion, CnvGainCriterion, CnvKind, CnvLossCriterion,
    CnvSource, EvaluationId, EvidenceState, Source, SvType, Verdict,
};

/// Apply the ClinGen point thresholds to a total score
///
/// The conflict predicate cannot fire with the current thresholds, which are
/// mutually exclusive; it is kept so that overlapping bands in a future
/// guideline revision are reported as conflicts.
pub fn classify_cnv_score(total: f64) -> Verdict {
    let is_pathogenic = total >= 0.99;
    let is_likely_pathogenic = (0.90..0.99).contains(&total);
    let is_likely_benign = total > -0.99 && total <= -0.90;
    let is_benign = total <= -0.99;
    let is_conflicting = (is_pathogenic || is_likely_pathogenic) && (is_likely_benign || is_benign);

    let classification = if is_conflicting {
        Classification::Conflicting
    } else if is_pathogenic {
        Classification::Pathogenic
    } else if is_likely_pathogenic {
        Classification::LikelyPathogenic
    } else if is_benign {
        Classification::Benign
    } else if is_likely_benign {
        Classification::LikelyBenign
    } else {
        Classification::UncertainSignificance
    };
    Verdict::new(classification, is_conflicting)
}

/// One copy-number variant under evaluation against catalog `C`
#[derive(Debug, Clone)]
pub struct CnvEvaluation<C: CnvCriterion> {
    id: EvaluationId,
    table: EvidenceStateTable<CnvSource, C>,
}

impl<C: CnvCriterion> Default for CnvEvaluation<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: CnvCriterion> CnvEvaluation<C> {
    /// Start an evaluation with default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Start an evaluation with `config`
    pub fn with_config(config: EngineConfig) -> Self {
        let evaluation = Self {
            id: EvaluationId::new(),
            table: EvidenceStateTable::with_config(config),
        };
        info!("Started CNV {} evaluation {}", C::KIND, evaluation.id);
        evaluation
    }

    /// Session identity
    pub fn id(&self) -> EvaluationId {
        self.id
    }

    /// Loss or gain
    pub fn kind(&self) -> CnvKind {
        C::KIND
    }

    /// The underlying evidence table
    pub fn table(&self) -> &EvidenceStateTable<CnvSource, C> {
        &self.table
    }

    fn resolver(&self) -> MultiSourceResolver<'_, CnvSource, C> {
        MultiSourceResolver::new(&self.table)
    }

    /// Effective (resolved) state of `criterion`
    pub fn get_criteria_state(&self, criterion: C) -> Result<EvidenceState<C>> {
        self.resolver().effective(criterion)
    }

    /// Effective assessment by code; unknown codes yield no score
    pub fn get_criteria_state_by_code(&self, code: &str) -> Result<CnvAssessment> {
        self.resolver().effective_by_code(code)
    }

    /// What one source says about `criterion`
    pub fn get_criteria_state_from_source(
        &self,
        criterion: C,
        source: CnvSource,
    ) -> Result<EvidenceState<C>> {
        self.resolver().from_source(criterion, source)
    }

    /// Snapshot of the whole table
    pub fn get_states(&self) -> TableSnapshot<CnvSource, C> {
        self.table.snapshot()
    }

    /// Replace every override with the contents of `snapshot`
    pub fn set_states(&mut self, snapshot: &TableSnapshot<CnvSource, C>) -> Result<()> {
        self.table.restore(snapshot)
    }

    /// Set (or clear) the points `source` assigns to `criterion`
    pub fn set_score(&mut self, source: CnvSource, criterion: C, score: Option<f64>) -> Result<()> {
        self.table.set_score(source, criterion, score)
    }

    /// Attach or clear the rationale `source` gives for `criterion`
    pub fn set_summary(
        &mut self,
        source: CnvSource,
        criterion: C,
        summary: Option<String>,
    ) -> Result<()> {
        self.table.set_summary(source, criterion, summary)
    }

    /// Copy every score from `from` into `to`
    pub fn copy_score(&mut self, from: CnvSource, to: CnvSource) -> Result<()> {
        self.table.copy_score(from, to)
    }

    /// Copy every summary from `from` into `to`
    pub fn copy_summary(&mut self, from: CnvSource, to: CnvSource) -> Result<()> {
        self.table.copy_summary(from, to)
    }

    /// Sum of effective scores, with floating-point noise rounded away
    pub fn total_score(&self) -> Result<f64> {
        let total: f64 = self
            .resolver()
            .effective_all()?
            .iter()
            .map(|state| state.assessment.points())
            .sum();
        Ok(self.table.config().round_total(total))
    }

    /// Criteria whose effective score is non-zero, in catalog order
    pub fn effective_scores(&self) -> Result<Vec<(C, f64)>> {
        Ok(self
            .resolver()
            .effective_all()?
            .iter()
            .map(|state| (state.criterion, state.assessment.points()))
            .filter(|(_, points)| *points != 0.0)
            .collect())
    }

    /// Sum of effective scores per guideline section
    pub fn section_totals(&self) -> Result<BTreeMap<u8, f64>> {
        let mut totals = BTreeMap::new();
        for state in self.resolver().effective_all()? {
            *totals.entry(state.criterion.definition().section).or_insert(0.0) +=
                state.assessment.points();
        }
        for total in totals.values_mut() {
            *total = self.table.config().round_total(*total);
        }
        Ok(totals)
    }

    /// Classification label and conflict flag
    pub fn get_classification(&self) -> Result<Verdict> {
        let total = self.total_score()?;
        let verdict = classify_cnv_score(total);
        debug!("CNV {} total {} -> {}", C::KIND, total, verdict);
        Ok(verdict)
    }

    /// Discard every override and start a new session
    pub fn reset(&mut self) {
        self.table.reset();
        self.id = EvaluationId::new();
        info!("Reset CNV {} evaluation, new session {}", C::KIND, self.id);
    }
}

/// A CNV evaluation for whichever catalog matches the variant
#[derive(Debug, Clone)]
pub enum CnvScorer {
    /// Deletion scored against the loss catalog
    Loss(CnvEvaluation<CnvLossCriterion>),
    /// Duplication scored against the gain catalog
    Gain(CnvEvaluation<CnvGainCriterion>),
}

impl CnvScorer {
    /// Create a scorer for a copy-number loss or gain
    pub fn for_kind(kind: CnvKind, config: EngineConfig) -> Self {
        match kind {
            CnvKind::Loss => CnvScorer::Loss(CnvEvaluation::with_config(config)),
            CnvKind::Gain => CnvScorer::Gain(CnvEvaluation::with_config(config)),
        }
    }

    /// Create a scorer from the variant's SV type (`DEL` or `DUP`)
    pub fn for_sv_type(sv_type: SvType, config: EngineConfig) -> Result<Self> {
        let kind = sv_type.cnv_kind().ok_or_else(|| {
            EngineError::Config(format!("SV type {} is not scored as a CNV", sv_type))
        })?;
        Ok(Self::for_kind(kind, config))
    }

    /// Loss or gain
    pub fn kind(&self) -> CnvKind {
        match self {
            CnvScorer::Loss(_) => CnvKind::Loss,
            CnvScorer::Gain(_) => CnvKind::Gain,
        }
    }

    /// Session identity
    pub fn id(&self) -> EvaluationId {
        match self {
            CnvScorer::Loss(evaluation) => evaluation.id(),
            CnvScorer::Gain(evaluation) => evaluation.id(),
        }
    }

    /// The loss evaluation, if this scorer is for a deletion
    pub fn as_loss(&self) -> Option<&CnvEvaluation<CnvLossCriterion>> {
        match self {
            CnvScorer::Loss(evaluation) => Some(evaluation),
            CnvScorer::Gain(_) => None,
        }
    }

    /// The gain evaluation, if this scorer is for a duplication
    pub fn as_gain(&self) -> Option<&CnvEvaluation<CnvGainCriterion>> {
        match self {
            CnvScorer::Gain(evaluation) => Some(evaluation),
            CnvScorer::Loss(_) => None,
        }
    }

    /// Mutable loss evaluation
    pub fn as_loss_mut(&mut self) -> Option<&mut CnvEvaluation<CnvLossCriterion>> {
        match self {
            CnvScorer::Loss(evaluation) => Some(evaluation),
            CnvScorer::Gain(_) => None,
        }
    }

    /// Mutable gain evaluation
    pub fn as_gain_mut(&mut self) -> Option<&mut CnvEvaluation<CnvGainCriterion>> {
        match self {
            CnvScorer::Gain(evaluation) => Some(evaluation),
            CnvScorer::Loss(_) => None,
        }
    }

    /// Set a score by criterion code of the active catalog (strict)
    pub fn set_score_by_code(
        &mut self,
        source: CnvSource,
        code: &str,
        score: Option<f64>,
    ) -> Result<()> {
        match self {
            CnvScorer::Loss(evaluation) => set_by_code(evaluation, source, code, score),
            CnvScorer::Gain(evaluation) => set_by_code(evaluation, source, code, score),
        }
    }

    /// Attach a summary by criterion code of the active catalog (strict)
    pub fn set_summary_by_code(
        &mut self,
        source: CnvSource,
        code: &str,
        summary: Option<String>,
    ) -> Result<()> {
        match self {
            CnvScorer::Loss(evaluation) => {
                let criterion = lookup(code, source)?;
                evaluation.set_summary(source, criterion, summary)
            }
            CnvScorer::Gain(evaluation) => {
                let criterion = lookup(code, source)?;
                evaluation.set_summary(source, criterion, summary)
            }
        }
    }

    /// Effective score by code; codes outside the active catalog yield `None`
    pub fn score_by_code(&self, code: &str) -> Result<Option<f64>> {
        let assessment = match self {
            CnvScorer::Loss(evaluation) => evaluation.get_criteria_state_by_code(code)?,
            CnvScorer::Gain(evaluation) => evaluation.get_criteria_state_by_code(code)?,
        };
        Ok(assessment.score)
    }

    /// Sum of effective scores
    pub fn total_score(&self) -> Result<f64> {
        match self {
            CnvScorer::Loss(evaluation) => evaluation.total_score(),
            CnvScorer::Gain(evaluation) => evaluation.total_score(),
        }
    }

    /// Non-zero effective scores as `(code, points)`, in catalog order
    pub fn effective_scores(&self) -> Result<Vec<(&'static str, f64)>> {
        match self {
            CnvScorer::Loss(evaluation) => with_codes(evaluation.effective_scores()?),
            CnvScorer::Gain(evaluation) => with_codes(evaluation.effective_scores()?),
        }
    }

    /// Sum of effective scores per guideline section
    pub fn section_totals(&self) -> Result<BTreeMap<u8, f64>> {
        match self {
            CnvScorer::Loss(evaluation) => evaluation.section_totals(),
            CnvScorer::Gain(evaluation) => evaluation.section_totals(),
        }
    }

    /// Classification label and conflict flag
    pub fn get_classification(&self) -> Result<Verdict> {
        match self {
            CnvScorer::Loss(evaluation) => evaluation.get_classification(),
            CnvScorer::Gain(evaluation) => evaluation.get_classification(),
        }
    }

    /// Discard every override and start a new session
    pub fn reset(&mut self) {
        match self {
            CnvScorer::Loss(evaluation) => evaluation.reset(),
            CnvScorer::Gain(evaluation) => evaluation.reset(),
        }
    }
}

fn with_codes<C: CnvCriterion>(scores: Vec<(C, f64)>) -> Result<Vec<(&'static str, f64)>> {
    Ok(scores
        .into_iter()
        .map(|(criterion, points)| (criterion.definition().code, points))
        .collect())
}

fn lookup<C: CnvCriterion>(code: &str, source: CnvSource) -> Result<C> {
    C::from_code(code).ok_or_else(|| EngineError::not_found(code, source.name()))
}

fn set_by_code<C: CnvCriterion>(
    evaluation: &mut CnvEvaluation<C>,
    source: CnvSource,
    code: &str,
    score: Option<f64>,
) -> Result<()> {
    let criterion = lookup::<C>(code, source)?;
    evaluation.set_score(source, criterion, score)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the dead conflict branch never fires for any total
        #[test]
        fn test_never_conflicting(total in -5.0f64..5.0) {
            prop_assert!(!classify_cnv_score(total).is_conflicting);
        }

        /// Property: classification is monotone in the total score
        #[test]
        fn test_monotone(a in -3.0f64..3.0, b in -3.0f64..3.0) {
            let rank = |c: Classification| match c {
                Classification::Benign => 0,
                Classification::LikelyBenign => 1,
                Classification::UncertainSignificance => 2,
                Classification::LikelyPathogenic => 3,
                Classification::Pathogenic => 4,
                Classification::Conflicting => 5,
            };
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(
                rank(classify_cnv_score(lo).classification)
                    <= rank(classify_cnv_score(hi).classification)
            );
        }
    }
}
