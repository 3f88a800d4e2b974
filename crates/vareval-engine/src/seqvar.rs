//! ACMG/AMP sequence-variant classification
//!
//! Classification counts resolved criteria per strength bucket and applies
//! the 2015 combining rules. The rules live in [`classify_counts`], which is
//! pure over the counts, so UI summaries and tests can use them without a
//! table.

use crate::config::EngineConfig;
use crate::error::Result;
use crate::resolver::MultiSourceResolver;
use crate::table::{EvidenceStateTable, TableSnapshot};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vareval_domain::{
    AcmgCriterion, AcmgSource, Classification, EvaluationId, EvidenceLevel, EvidenceState,
    Presence, SeqvarAssessment, Source, Verdict,
};

/// Number of present criteria per strength bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceCounts {
    /// Pathogenic very strong
    pub pvs: u32,
    /// Pathogenic strong
    pub ps: u32,
    /// Pathogenic moderate
    pub pm: u32,
    /// Pathogenic supporting
    pub pp: u32,
    /// Benign stand-alone
    pub ba: u32,
    /// Benign strong
    pub bs: u32,
    /// Benign supporting
    pub bp: u32,
}

impl EvidenceCounts {
    /// Count for one bucket; `NotSet` is not a bucket and counts 0
    pub fn get(&self, level: EvidenceLevel) -> u32 {
        match level {
            EvidenceLevel::PathogenicVeryStrong => self.pvs,
            EvidenceLevel::PathogenicStrong => self.ps,
            EvidenceLevel::PathogenicModerate => self.pm,
            EvidenceLevel::PathogenicSupporting => self.pp,
            EvidenceLevel::BenignStandalone => self.ba,
            EvidenceLevel::BenignStrong => self.bs,
            EvidenceLevel::BenignSupporting => self.bp,
            EvidenceLevel::NotSet => 0,
        }
    }

    fn bump(&mut self, level: EvidenceLevel) {
        match level {
            EvidenceLevel::PathogenicVeryStrong => self.pvs += 1,
            EvidenceLevel::PathogenicStrong => self.ps += 1,
            EvidenceLevel::PathogenicModerate => self.pm += 1,
            EvidenceLevel::PathogenicSupporting => self.pp += 1,
            EvidenceLevel::BenignStandalone => self.ba += 1,
            EvidenceLevel::BenignStrong => self.bs += 1,
            EvidenceLevel::BenignSupporting => self.bp += 1,
            EvidenceLevel::NotSet => {}
        }
    }

    /// Tally resolved assessments
    pub fn tally<'a, I>(assessments: I) -> Self
    where
        I: IntoIterator<Item = &'a SeqvarAssessment>,
    {
        let mut counts = Self::default();
        for assessment in assessments {
            if assessment.presence == Presence::Present {
                counts.bump(assessment.evidence_level);
            }
        }
        counts
    }
}

/// Apply the ACMG/AMP combining rules to bucket counts
///
/// Precedence: Conflicting, Pathogenic, Likely pathogenic, Benign, Likely
/// benign, otherwise Uncertain significance.
pub fn classify_counts(counts: &EvidenceCounts) -> Verdict {
    let EvidenceCounts {
        pvs,
        ps,
        pm,
        pp,
        ba,
        bs,
        bp,
    } = *counts;

    let is_pathogenic = (pvs == 1 && (ps >= 1 || pm >= 2 || (pm == 1 && pp == 1) || pp >= 2))
        || ps >= 2
        || (ps == 1 && (pm >= 3 || (pm == 2 && pp >= 2) || (pm == 1 && pp >= 4)));
    let is_likely_pathogenic = (pvs == 1 && pm == 1)
        || (ps == 1 && (1..=2).contains(&pm))
        || (ps == 1 && pp >= 2)
        || pm >= 3
        || (pm == 2 && pp >= 2)
        || (pm == 1 && pp >= 4);
    let is_benign = ba > 0 || bs >= 2;
    let is_likely_benign = (bs == 1 && bp == 1) || bp >= 2;
    let is_conflicting = (is_pathogenic || is_likely_pathogenic) && (is_benign || is_likely_benign);

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

/// Classifier over the effective states of a sequence-variant table
#[derive(Debug, Clone, Copy)]
pub struct SeqvarClassifier<'a, S: Source> {
    resolver: MultiSourceResolver<'a, S, AcmgCriterion>,
}

impl<'a, S: Source> SeqvarClassifier<'a, S> {
    /// Create a classifier over `table`
    pub fn new(table: &'a EvidenceStateTable<S, AcmgCriterion>) -> Self {
        Self {
            resolver: MultiSourceResolver::new(table),
        }
    }

    /// Counts of every bucket over the resolved states
    pub fn counts(&self) -> Result<EvidenceCounts> {
        let states = self.resolver.effective_all()?;
        Ok(EvidenceCounts::tally(states.iter().map(|state| &state.assessment)))
    }

    /// Number of criteria resolved as present at `level`
    pub fn active_evidence_counts(&self, level: EvidenceLevel) -> Result<u32> {
        Ok(self.counts()?.get(level))
    }

    /// Classification label and conflict flag
    pub fn classify(&self) -> Result<Verdict> {
        let counts = self.counts()?;
        let verdict = classify_counts(&counts);
        debug!("ACMG counts {:?} -> {}", counts, verdict);
        Ok(verdict)
    }
}

/// One sequence variant under evaluation
///
/// Owns the evidence table for the variant and exposes the read and write
/// operations the UI and persistence layers use.
///
/// # Examples
///
/// ```
/// use vareval_domain::{AcmgCriterion, AcmgSource, Classification, Presence};
/// use vareval_engine::SeqvarEvaluation;
///
/// let mut evaluation = SeqvarEvaluation::new();
/// evaluation.set_presence(AcmgSource::InterVar, AcmgCriterion::Pvs1, Presence::Present)?;
/// evaluation.set_presence(AcmgSource::InterVar, AcmgCriterion::Ps1, Presence::Present)?;
///
/// let verdict = evaluation.get_classification()?;
/// assert_eq!(verdict.classification, Classification::Pathogenic);
/// assert!(!verdict.is_conflicting);
/// # Ok::<(), vareval_engine::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SeqvarEvaluation {
    id: EvaluationId,
    table: EvidenceStateTable<AcmgSource, AcmgCriterion>,
}

impl Default for SeqvarEvaluation {
    fn default() -> Self {
        Self::new()
    }
}

impl SeqvarEvaluation {
    /// Start an evaluation with default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Start an evaluation tracking every sequence-variant source
    pub fn with_config(config: EngineConfig) -> Self {
        let evaluation = Self {
            id: EvaluationId::new(),
            table: EvidenceStateTable::with_config(config),
        };
        info!("Started sequence-variant evaluation {}", evaluation.id);
        evaluation
    }

    /// Session identity
    pub fn id(&self) -> EvaluationId {
        self.id
    }

    /// The underlying evidence table
    pub fn table(&self) -> &EvidenceStateTable<AcmgSource, AcmgCriterion> {
        &self.table
    }

    /// Configuration the evaluation was started with
    pub fn config(&self) -> &EngineConfig {
        self.table.config()
    }

    fn resolver(&self) -> MultiSourceResolver<'_, AcmgSource, AcmgCriterion> {
        MultiSourceResolver::new(&self.table)
    }

    /// Effective (resolved) state of `criterion`
    pub fn get_criteria_state(&self, criterion: AcmgCriterion) -> Result<EvidenceState<AcmgCriterion>> {
        self.resolver().effective(criterion)
    }

    /// Effective assessment by code; unknown codes yield the sentinels
    pub fn get_criteria_state_by_code(&self, code: &str) -> Result<SeqvarAssessment> {
        self.resolver().effective_by_code(code)
    }

    /// What one source says about `criterion`
    pub fn get_criteria_state_from_source(
        &self,
        criterion: AcmgCriterion,
        source: AcmgSource,
    ) -> Result<EvidenceState<AcmgCriterion>> {
        self.resolver().from_source(criterion, source)
    }

    /// What one source says, by code; unknown codes are an error
    pub fn get_criteria_state_from_source_by_code(
        &self,
        code: &str,
        source: AcmgSource,
    ) -> Result<EvidenceState<AcmgCriterion>> {
        self.resolver().from_source_by_code(code, source)
    }

    /// Snapshot of the whole table
    pub fn get_states(&self) -> TableSnapshot<AcmgSource, AcmgCriterion> {
        self.table.snapshot()
    }

    /// Replace every override with the contents of `snapshot`
    pub fn set_states(&mut self, snapshot: &TableSnapshot<AcmgSource, AcmgCriterion>) -> Result<()> {
        self.table.restore(snapshot)
    }

    /// Number of criteria resolved as present at `level`
    pub fn get_active_evidence_counts(&self, level: EvidenceLevel) -> Result<u32> {
        SeqvarClassifier::new(&self.table).active_evidence_counts(level)
    }

    /// Counts of every strength bucket
    pub fn get_evidence_counts(&self) -> Result<EvidenceCounts> {
        SeqvarClassifier::new(&self.table).counts()
    }

    /// Classification label and conflict flag
    pub fn get_classification(&self) -> Result<Verdict> {
        SeqvarClassifier::new(&self.table).classify()
    }

    /// Set whether `criterion` applies according to `source`
    pub fn set_presence(
        &mut self,
        source: AcmgSource,
        criterion: AcmgCriterion,
        presence: Presence,
    ) -> Result<()> {
        self.table.set_presence(source, criterion, presence)
    }

    /// Set the strength of `criterion` according to `source`
    pub fn set_evidence_level(
        &mut self,
        source: AcmgSource,
        criterion: AcmgCriterion,
        level: EvidenceLevel,
    ) -> Result<()> {
        self.table.set_evidence_level(source, criterion, level)
    }

    /// Attach or clear the rationale `source` gives for `criterion`
    pub fn set_summary(
        &mut self,
        source: AcmgSource,
        criterion: AcmgCriterion,
        summary: Option<String>,
    ) -> Result<()> {
        self.table.set_summary(source, criterion, summary)
    }

    /// Copy every presence call from `from` into `to`
    pub fn copy_presence(&mut self, from: AcmgSource, to: AcmgSource) -> Result<()> {
        self.table.copy_presence(from, to)
    }

    /// Copy every evidence level from `from` into `to`
    pub fn copy_evidence_level(&mut self, from: AcmgSource, to: AcmgSource) -> Result<()> {
        self.table.copy_evidence_level(from, to)
    }

    /// Copy every summary from `from` into `to`
    pub fn copy_summary(&mut self, from: AcmgSource, to: AcmgSource) -> Result<()> {
        self.table.copy_summary(from, to)
    }

    /// Accept everything `from` suggests as the curator's own call
    pub fn adopt_as_user(&mut self, from: AcmgSource) -> Result<()> {
        self.table.adopt(from, AcmgSource::User)
    }

    /// Discard every override and start a new session
    pub fn reset(&mut self) {
        self.table.reset();
        self.id = EvaluationId::new();
        info!("Reset sequence-variant evaluation, new session {}", self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use vareval_domain::Criterion;

    fn counts(pvs: u32, ps: u32, pm: u32, pp: u32, ba: u32, bs: u32, bp: u32) -> EvidenceCounts {
        EvidenceCounts {
            pvs,
            ps,
            pm,
            pp,
            ba,
            bs,
            bp,
        }
    }

    fn label(c: EvidenceCounts) -> Classification {
        classify_counts(&c).classification
    }

    #[test]
    fn test_no_evidence_is_vus() {
        assert_eq!(
            classify_counts(&EvidenceCounts::default()),
            Verdict::new(Classification::UncertainSignificance, false)
        );
    }

    #[test]
    fn test_pathogenic_rules() {
        assert_eq!(label(counts(1, 1, 0, 0, 0, 0, 0)), Classification::Pathogenic);
        assert_eq!(label(counts(1, 0, 2, 0, 0, 0, 0)), Classification::Pathogenic);
        assert_eq!(label(counts(1, 0, 1, 1, 0, 0, 0)), Classification::Pathogenic);
        assert_eq!(label(counts(1, 0, 0, 2, 0, 0, 0)), Classification::Pathogenic);
        assert_eq!(label(counts(0, 2, 0, 0, 0, 0, 0)), Classification::Pathogenic);
        assert_eq!(label(counts(0, 1, 3, 0, 0, 0, 0)), Classification::Pathogenic);
        assert_eq!(label(counts(0, 1, 2, 2, 0, 0, 0)), Classification::Pathogenic);
        assert_eq!(label(counts(0, 1, 1, 4, 0, 0, 0)), Classification::Pathogenic);
    }

    #[test]
    fn test_likely_pathogenic_rules() {
        assert_eq!(label(counts(1, 0, 1, 0, 0, 0, 0)), Classification::LikelyPathogenic);
        assert_eq!(label(counts(0, 1, 1, 0, 0, 0, 0)), Classification::LikelyPathogenic);
        assert_eq!(label(counts(0, 1, 2, 0, 0, 0, 0)), Classification::LikelyPathogenic);
        assert_eq!(label(counts(0, 1, 0, 2, 0, 0, 0)), Classification::LikelyPathogenic);
        assert_eq!(label(counts(0, 0, 3, 0, 0, 0, 0)), Classification::LikelyPathogenic);
        assert_eq!(label(counts(0, 0, 2, 2, 0, 0, 0)), Classification::LikelyPathogenic);
        assert_eq!(label(counts(0, 0, 1, 4, 0, 0, 0)), Classification::LikelyPathogenic);
    }

    #[test]
    fn test_pvs_alone_is_vus() {
        assert_eq!(label(counts(1, 0, 0, 0, 0, 0, 0)), Classification::UncertainSignificance);
        // a second very strong criterion does not count as pvs == 1
        assert_eq!(label(counts(2, 0, 0, 0, 0, 0, 0)), Classification::UncertainSignificance);
    }

    #[test]
    fn test_benign_rules() {
        assert_eq!(label(counts(0, 0, 0, 0, 1, 0, 0)), Classification::Benign);
        assert_eq!(label(counts(0, 0, 0, 0, 0, 2, 0)), Classification::Benign);
        assert_eq!(label(counts(0, 0, 0, 0, 0, 1, 1)), Classification::LikelyBenign);
        assert_eq!(label(counts(0, 0, 0, 0, 0, 0, 2)), Classification::LikelyBenign);
        assert_eq!(label(counts(0, 0, 0, 0, 0, 1, 0)), Classification::UncertainSignificance);
    }

    #[test]
    fn test_conflict_wins() {
        assert_eq!(
            classify_counts(&counts(1, 2, 0, 0, 1, 1, 0)),
            Verdict::new(Classification::Conflicting, true)
        );
        assert_eq!(
            classify_counts(&counts(0, 0, 3, 0, 0, 0, 2)),
            Verdict::new(Classification::Conflicting, true)
        );
    }

    #[test]
    fn test_counts_get() {
        let c = counts(1, 2, 3, 4, 5, 6, 7);
        assert_eq!(c.get(EvidenceLevel::PathogenicModerate), 3);
        assert_eq!(c.get(EvidenceLevel::BenignSupporting), 7);
        assert_eq!(c.get(EvidenceLevel::NotSet), 0);
    }

    #[test]
    fn test_counts_skip_absent_and_unknown() {
        let assessments = [
            SeqvarAssessment::new(Presence::Present, EvidenceLevel::PathogenicStrong),
            SeqvarAssessment::new(Presence::Absent, EvidenceLevel::PathogenicStrong),
            SeqvarAssessment::new(Presence::Unknown, EvidenceLevel::PathogenicStrong),
            SeqvarAssessment::new(Presence::Present, EvidenceLevel::NotSet),
        ];
        assert_eq!(EvidenceCounts::tally(assessments.iter()), counts(0, 1, 0, 0, 0, 0, 0));
    }

    #[test]
    fn test_default_table_is_vus() {
        let evaluation = SeqvarEvaluation::new();
        assert_eq!(
            evaluation.get_classification().unwrap(),
            Verdict::new(Classification::UncertainSignificance, false)
        );
        for level in EvidenceLevel::BUCKETS {
            assert_eq!(evaluation.get_active_evidence_counts(level).unwrap(), 0);
        }
    }

    #[test]
    fn test_user_downgrade_counts() {
        let mut evaluation = SeqvarEvaluation::new();
        evaluation
            .set_presence(AcmgSource::InterVar, AcmgCriterion::Pvs1, Presence::Present)
            .unwrap();
        assert_eq!(
            evaluation
                .get_active_evidence_counts(EvidenceLevel::PathogenicVeryStrong)
                .unwrap(),
            1
        );
        evaluation
            .set_evidence_level(AcmgSource::User, AcmgCriterion::Pvs1, EvidenceLevel::PathogenicModerate)
            .unwrap();
        let counts = evaluation.get_evidence_counts().unwrap();
        assert_eq!(counts.pvs, 0);
        assert_eq!(counts.pm, 1);
    }

    #[test]
    fn test_adopt_as_user() {
        let mut evaluation = SeqvarEvaluation::new();
        evaluation
            .set_presence(AcmgSource::AutoAcmg, AcmgCriterion::Pm2, Presence::Present)
            .unwrap();
        evaluation
            .set_evidence_level(AcmgSource::AutoAcmg, AcmgCriterion::Pm2, EvidenceLevel::PathogenicSupporting)
            .unwrap();
        evaluation.adopt_as_user(AcmgSource::AutoAcmg).unwrap();
        assert_eq!(
            evaluation
                .get_criteria_state_from_source(AcmgCriterion::Pm2, AcmgSource::User)
                .unwrap()
                .assessment,
            SeqvarAssessment::new(Presence::Present, EvidenceLevel::PathogenicSupporting)
        );
    }

    #[test]
    fn test_copy_fields_into_user() {
        let mut evaluation = SeqvarEvaluation::new();
        evaluation
            .set_presence(AcmgSource::InterVar, AcmgCriterion::Ps3, Presence::Present)
            .unwrap();
        evaluation
            .set_presence(AcmgSource::InterVar, AcmgCriterion::Bp4, Presence::Absent)
            .unwrap();
        evaluation
            .set_evidence_level(AcmgSource::AutoAcmg, AcmgCriterion::Pm1, EvidenceLevel::PathogenicSupporting)
            .unwrap();
        evaluation
            .set_evidence_level(AcmgSource::User, AcmgCriterion::Pvs1, EvidenceLevel::PathogenicStrong)
            .unwrap();
        let defaults = evaluation.get_states().source(AcmgSource::Default).unwrap().to_vec();

        evaluation.copy_presence(AcmgSource::InterVar, AcmgSource::User).unwrap();
        evaluation
            .copy_evidence_level(AcmgSource::AutoAcmg, AcmgSource::User)
            .unwrap();
        for &criterion in AcmgCriterion::all() {
            let user = evaluation
                .get_criteria_state_from_source(criterion, AcmgSource::User)
                .unwrap()
                .assessment;
            let intervar = evaluation
                .get_criteria_state_from_source(criterion, AcmgSource::InterVar)
                .unwrap()
                .assessment;
            let autoacmg = evaluation
                .get_criteria_state_from_source(criterion, AcmgSource::AutoAcmg)
                .unwrap()
                .assessment;
            assert_eq!(user.presence, intervar.presence, "{}", criterion);
            assert_eq!(user.evidence_level, autoacmg.evidence_level, "{}", criterion);
        }
        assert_eq!(evaluation.get_states().source(AcmgSource::Default).unwrap(), defaults.as_slice());

        assert_eq!(
            evaluation.copy_evidence_level(AcmgSource::User, AcmgSource::Default),
            Err(EngineError::ImmutableSource("Default".to_string()))
        );
        assert!(matches!(
            evaluation.copy_presence(AcmgSource::User, AcmgSource::Default),
            Err(EngineError::ImmutableSource(_))
        ));
        assert_eq!(evaluation.get_states().source(AcmgSource::Default).unwrap(), defaults.as_slice());
    }

    #[test]
    fn test_reset_issues_new_id() {
        let mut evaluation = SeqvarEvaluation::new();
        let first = evaluation.id();
        evaluation
            .set_presence(AcmgSource::User, AcmgCriterion::Ba1, Presence::Present)
            .unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        evaluation.reset();
        assert_ne!(evaluation.id(), first);
        assert_eq!(
            evaluation.get_criteria_state(AcmgCriterion::Ba1).unwrap(),
            evaluation
                .get_criteria_state_from_source(AcmgCriterion::Ba1, AcmgSource::Default)
                .unwrap()
        );
    }

    #[test]
    fn test_strict_code_lookup() {
        let evaluation = SeqvarEvaluation::new();
        assert_eq!(
            evaluation
                .get_criteria_state_from_source_by_code("ps3", AcmgSource::Default)
                .unwrap()
                .criterion,
            AcmgCriterion::Ps3
        );
        assert!(matches!(
            evaluation.get_criteria_state_from_source_by_code("PS9", AcmgSource::Default),
            Err(EngineError::CriterionNotFound { .. })
        ));
        assert!(evaluation.get_criteria_state_by_code("PS9").unwrap().presence.is_unknown());
        assert_eq!(AcmgCriterion::Ps3.code(), "PS3");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn counts_strategy() -> impl Strategy<Value = EvidenceCounts> {
        (0u32..3, 0u32..4, 0u32..5, 0u32..6, 0u32..2, 0u32..3, 0u32..4).prop_map(
            |(pvs, ps, pm, pp, ba, bs, bp)| EvidenceCounts {
                pvs,
                ps,
                pm,
                pp,
                ba,
                bs,
                bp,
            },
        )
    }

    proptest! {
        /// Property: the conflict flag is set exactly when the label is Conflicting
        #[test]
        fn test_flag_matches_label(counts in counts_strategy()) {
            let verdict = classify_counts(&counts);
            prop_assert_eq!(
                verdict.is_conflicting,
                verdict.classification == Classification::Conflicting
            );
        }

        /// Property: with no benign evidence, the verdict is never benign-leaning
        #[test]
        fn test_no_benign_evidence_never_benign(counts in counts_strategy()) {
            let counts = EvidenceCounts { ba: 0, bs: 0, bp: 0, ..counts };
            let label = classify_counts(&counts).classification;
            prop_assert!(label != Classification::Benign);
            prop_assert!(label != Classification::LikelyBenign);
            prop_assert!(label != Classification::Conflicting);
        }

        /// Property: classification is a pure function of the counts
        #[test]
        fn test_classification_is_idempotent(counts in counts_strategy()) {
            prop_assert_eq!(classify_counts(&counts), classify_counts(&counts));
        }
    }
}
