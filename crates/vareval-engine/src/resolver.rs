//! Source-priority resolution of evidence state
//!
//! The effective state of a criterion is computed on demand by scanning the
//! tracked sources in ascending priority and overlaying every field a source
//! sets. Presence, strength (or score) and summary are resolved independently.

use crate::error::{EngineError, Result};
use crate::table::EvidenceStateTable;
use vareval_domain::{Assessment, Criterion, EvidenceState, Source};

/// Read-only view that merges a table's sources into effective states
#[derive(Debug, Clone, Copy)]
pub struct MultiSourceResolver<'a, S: Source, C: Criterion> {
    table: &'a EvidenceStateTable<S, C>,
}

impl<'a, S: Source, C: Criterion> MultiSourceResolver<'a, S, C> {
    /// Create a resolver over `table`
    pub fn new(table: &'a EvidenceStateTable<S, C>) -> Self {
        Self { table }
    }

    /// Effective state of `criterion`
    pub fn effective(&self, criterion: C) -> Result<EvidenceState<C>> {
        let mut resolved = EvidenceState::unset(criterion);
        for &source in self.table.sources() {
            let state = self
                .table
                .states
                .get(&source)
                .and_then(|states| states.get(&criterion))
                .ok_or_else(|| {
                    EngineError::InvariantViolation(format!(
                        "source {} has no entry for {}",
                        source, criterion
                    ))
                })?;
            if state.criterion != criterion {
                return Err(EngineError::InvariantViolation(format!(
                    "source {} holds state for {} under {}",
                    source, state.criterion, criterion
                )));
            }
            resolved.overlay(state);
        }
        Ok(resolved)
    }

    /// Tolerant lookup by code
    ///
    /// An unrecognized code yields the all-sentinel assessment instead of an
    /// error, so callers may probe speculative ids.
    pub fn effective_by_code(&self, code: &str) -> Result<C::Assessment> {
        match C::from_code(code) {
            Some(criterion) => Ok(self.effective(criterion)?.assessment),
            None => Ok(C::Assessment::unset()),
        }
    }

    /// Strict lookup of what a single source says
    pub fn from_source(&self, criterion: C, source: S) -> Result<EvidenceState<C>> {
        self.table.get(source, criterion).cloned()
    }

    /// Strict lookup by code; unknown codes are an error
    pub fn from_source_by_code(&self, code: &str, source: S) -> Result<EvidenceState<C>> {
        self.table.get_by_code(source, code).cloned()
    }

    /// Effective state of every criterion, in catalog order
    pub fn effective_all(&self) -> Result<Vec<EvidenceState<C>>> {
        C::all().iter().map(|&criterion| self.effective(criterion)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use vareval_domain::{
        AcmgCriterion, AcmgSource, CnvLossCriterion, CnvSource, EvidenceLevel, Presence,
        SeqvarAssessment,
    };

    type SeqvarTable = EvidenceStateTable<AcmgSource, AcmgCriterion>;

    #[test]
    fn test_defaults_resolve_to_default_source() {
        let table = SeqvarTable::new();
        let resolver = MultiSourceResolver::new(&table);
        for &criterion in AcmgCriterion::all() {
            assert_eq!(
                resolver.effective(criterion).unwrap(),
                resolver.from_source(criterion, AcmgSource::Default).unwrap()
            );
        }
    }

    #[test]
    fn test_fields_resolve_independently() {
        let mut table = SeqvarTable::new();
        table
            .set_presence(AcmgSource::AutoAcmg, AcmgCriterion::Pvs1, Presence::Present)
            .unwrap();
        table
            .set_evidence_level(AcmgSource::User, AcmgCriterion::Pvs1, EvidenceLevel::PathogenicStrong)
            .unwrap();

        let resolver = MultiSourceResolver::new(&table);
        let state = resolver.effective(AcmgCriterion::Pvs1).unwrap();
        assert_eq!(
            state.assessment,
            SeqvarAssessment::new(Presence::Present, EvidenceLevel::PathogenicStrong)
        );
    }

    #[test]
    fn test_summary_from_highest_source() {
        let mut table = SeqvarTable::new();
        table
            .set_summary(AcmgSource::InterVar, AcmgCriterion::Pm2, Some("absent from controls".into()))
            .unwrap();
        table
            .set_summary(AcmgSource::User, AcmgCriterion::Pm2, Some("checked gnomAD v4".into()))
            .unwrap();
        let resolver = MultiSourceResolver::new(&table);
        assert_eq!(
            resolver.effective(AcmgCriterion::Pm2).unwrap().summary.as_deref(),
            Some("checked gnomAD v4")
        );
    }

    #[test]
    fn test_unknown_code_tolerance() {
        let table = SeqvarTable::new();
        let resolver = MultiSourceResolver::new(&table);
        assert_eq!(
            resolver.effective_by_code("not-a-real-id").unwrap(),
            SeqvarAssessment::new(Presence::Unknown, EvidenceLevel::NotSet)
        );
        assert!(matches!(
            resolver.from_source_by_code("not-a-real-id", AcmgSource::User),
            Err(EngineError::CriterionNotFound { .. })
        ));
    }

    #[test]
    fn test_missing_entry_is_invariant_violation() {
        let mut table = SeqvarTable::new();
        if let Some(states) = table.states.get_mut(&AcmgSource::Server) {
            states.remove(&AcmgCriterion::Bs2);
        }
        let resolver = MultiSourceResolver::new(&table);
        assert!(matches!(
            resolver.effective(AcmgCriterion::Bs2),
            Err(EngineError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_mismatched_entry_is_invariant_violation() {
        let mut table = SeqvarTable::new();
        if let Some(state) = table
            .states
            .get_mut(&AcmgSource::User)
            .and_then(|states| states.get_mut(&AcmgCriterion::Pm1))
        {
            state.criterion = AcmgCriterion::Pm4;
        }
        let resolver = MultiSourceResolver::new(&table);
        assert!(matches!(
            resolver.effective(AcmgCriterion::Pm1),
            Err(EngineError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_partial_source_set() {
        let mut table = SeqvarTable::with_sources(&[AcmgSource::User], EngineConfig::default());
        table
            .set_presence(AcmgSource::User, AcmgCriterion::Ps3, Presence::Present)
            .unwrap();
        let resolver = MultiSourceResolver::new(&table);
        assert_eq!(
            resolver.effective(AcmgCriterion::Ps3).unwrap().assessment.presence,
            Presence::Present
        );
        assert_eq!(resolver.effective_all().unwrap().len(), 28);
    }

    #[test]
    fn test_cnv_last_non_null_wins() {
        let mut table = EvidenceStateTable::<CnvSource, CnvLossCriterion>::new();
        let resolver = MultiSourceResolver::new(&table);
        assert_eq!(
            resolver.effective(CnvLossCriterion::Loss3C).unwrap().assessment.score,
            Some(0.0)
        );

        table
            .set_score(CnvSource::User, CnvLossCriterion::Loss3C, Some(0.9))
            .unwrap();
        let resolver = MultiSourceResolver::new(&table);
        assert_eq!(
            resolver.effective(CnvLossCriterion::Loss3C).unwrap().assessment.score,
            Some(0.9)
        );

        table.set_score(CnvSource::User, CnvLossCriterion::Loss3C, None).unwrap();
        let resolver = MultiSourceResolver::new(&table);
        assert_eq!(
            resolver.effective(CnvLossCriterion::Loss3C).unwrap().assessment.score,
            Some(0.0)
        );
    }
}
