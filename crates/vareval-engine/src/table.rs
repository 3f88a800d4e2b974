//! Per-(source, criterion) evidence state for one variant under evaluation
//!
//! Every tracked source holds a state for every criterion of its family from
//! construction on. The `Default` source is seeded from the catalog; all
//! other sources start at the sentinel assessment. Assessment writes pass
//! through a single guarded entry point that rejects the `Default` source
//! before any state is touched. Summaries may be attached to any source,
//! `Default` included.

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, warn};
use vareval_domain::{
    AcmgCriterion, CnvCriterion, Criterion, EvidenceLevel, EvidenceState, Presence, Source,
};

/// The `Source x Criterion -> EvidenceState` table
#[derive(Debug, Clone)]
pub struct EvidenceStateTable<S: Source, C: Criterion> {
    /// Tracked sources, ascending priority
    pub(crate) sources: Vec<S>,

    /// State per tracked source, total over `C::all()`
    pub(crate) states: HashMap<S, BTreeMap<C, EvidenceState<C>>>,

    config: EngineConfig,
}

/// Read-only copy of one source's states
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct SourceSnapshot<S: Source, C: Criterion> {
    /// The source the states belong to
    pub source: S,

    /// One state per criterion, in catalog order
    pub states: Vec<EvidenceState<C>>,
}

/// Read-only copy of a whole table, for persistence and tests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TableSnapshot<S: Source, C: Criterion> {
    /// Sections in ascending source priority
    pub sources: Vec<SourceSnapshot<S, C>>,
}

impl<S: Source, C: Criterion> TableSnapshot<S, C> {
    /// States recorded for `source`, if the snapshot tracks it
    pub fn source(&self, source: S) -> Option<&[EvidenceState<C>]> {
        self.sources
            .iter()
            .find(|section| section.source == source)
            .map(|section| section.states.as_slice())
    }
}

impl<S: Source, C: Criterion> Default for EvidenceStateTable<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Source, C: Criterion> EvidenceStateTable<S, C> {
    /// Create a table tracking every source of `S` with default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create a table tracking every source of `S`
    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_sources(S::ordered(), config)
    }

    /// Create a table tracking only `sources` (the `Default` source is
    /// always tracked)
    pub fn with_sources(sources: &[S], config: EngineConfig) -> Self {
        let mut tracked: Vec<S> = sources.to_vec();
        tracked.push(S::DEFAULT);
        tracked.sort();
        tracked.dedup();

        let states = tracked
            .iter()
            .map(|&source| (source, Self::seed(source)))
            .collect();

        Self {
            sources: tracked,
            states,
            config,
        }
    }

    fn seed(source: S) -> BTreeMap<C, EvidenceState<C>> {
        C::all()
            .iter()
            .map(|&criterion| {
                let state = if source.is_default() {
                    EvidenceState::seeded(criterion)
                } else {
                    EvidenceState::unset(criterion)
                };
                (criterion, state)
            })
            .collect()
    }

    /// Tracked sources in ascending priority order
    pub fn sources(&self) -> &[S] {
        &self.sources
    }

    /// Whether `source` is tracked by this table
    pub fn tracks(&self, source: S) -> bool {
        self.states.contains_key(&source)
    }

    /// Configuration the table was built with
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Strict lookup of one source's state for `criterion`
    pub fn get(&self, source: S, criterion: C) -> Result<&EvidenceState<C>> {
        self.states
            .get(&source)
            .and_then(|states| states.get(&criterion))
            .ok_or_else(|| EngineError::not_found(criterion.code(), source.name()))
    }

    /// Strict lookup by criterion code; unknown codes are an error
    pub fn get_by_code(&self, source: S, code: &str) -> Result<&EvidenceState<C>> {
        let criterion =
            C::from_code(code).ok_or_else(|| EngineError::not_found(code, source.name()))?;
        self.get(source, criterion)
    }

    /// The single entry point for assessment writes
    fn entry_mut(&mut self, source: S, criterion: C) -> Result<&mut EvidenceState<C>> {
        if source.is_default() {
            return Err(EngineError::ImmutableSource(source.name().to_string()));
        }
        self.state_mut(source, criterion)
    }

    /// Tracked state of `source` for `criterion`, identity-checked
    fn state_mut(&mut self, source: S, criterion: C) -> Result<&mut EvidenceState<C>> {
        let state = self
            .states
            .get_mut(&source)
            .and_then(|states| states.get_mut(&criterion))
            .ok_or_else(|| EngineError::not_found(criterion.code(), source.name()))?;
        if state.criterion != criterion {
            return Err(EngineError::InvariantViolation(format!(
                "entry for {} in source {} holds state for {}",
                criterion, source, state.criterion
            )));
        }
        Ok(state)
    }

    /// Attach or clear the free-text rationale of one state
    ///
    /// Every tracked source accepts a summary, `Default` included; its
    /// assessment stays as seeded.
    pub fn set_summary(&mut self, source: S, criterion: C, summary: Option<String>) -> Result<()> {
        let state = self.state_mut(source, criterion)?;
        debug!("{} {}: summary {}", source, criterion, if summary.is_some() { "set" } else { "cleared" });
        state.summary = summary;
        Ok(())
    }

    /// Replace the whole assessment of one state
    pub fn set_assessment(&mut self, source: S, criterion: C, assessment: C::Assessment) -> Result<()> {
        let state = self.entry_mut(source, criterion)?;
        debug!("{} {}: assessment {:?}", source, criterion, assessment);
        state.assessment = assessment;
        Ok(())
    }

    /// Copy every criterion's summary from one source into another
    pub fn copy_summary(&mut self, from: S, to: S) -> Result<()> {
        self.copy_across(from, to, |target, origin| target.summary = origin.summary.clone())
    }

    /// Adopt everything `from` says (assessment and summary) into `to`
    ///
    /// Used for "accept the predictor's suggestion" actions; values are copied
    /// as stored in `from`, sentinels included.
    pub fn adopt(&mut self, from: S, to: S) -> Result<()> {
        self.copy_across(from, to, |target, origin| {
            target.assessment = origin.assessment.clone();
            target.summary = origin.summary.clone();
        })?;
        info!("Adopted {} {} states from {} into {}", C::all().len(), C::FAMILY, from, to);
        Ok(())
    }

    /// Iterate every criterion, reading `from`'s state and applying `apply`
    /// to `to`'s state.
    fn copy_across<F>(&mut self, from: S, to: S, apply: F) -> Result<()>
    where
        F: Fn(&mut EvidenceState<C>, &EvidenceState<C>),
    {
        if to.is_default() {
            return Err(EngineError::ImmutableSource(to.name().to_string()));
        }
        let origin: Vec<EvidenceState<C>> = C::all()
            .iter()
            .map(|&criterion| self.get(from, criterion).cloned())
            .collect::<Result<_>>()?;
        for state in &origin {
            let target = self.entry_mut(to, state.criterion)?;
            apply(target, state);
        }
        Ok(())
    }

    /// Read-only copy of the whole table
    pub fn snapshot(&self) -> TableSnapshot<S, C> {
        let sources = self
            .sources
            .iter()
            .map(|&source| SourceSnapshot {
                source,
                states: self.states[&source].values().cloned().collect(),
            })
            .collect();
        TableSnapshot { sources }
    }

    /// Bulk-set every non-Default source from a snapshot
    ///
    /// Sources absent from the snapshot are reset to sentinels. A snapshot
    /// whose `Default` section is incomplete or carries assessments other
    /// than the catalog's is rejected, as is one naming a source this table
    /// does not track. Only summaries are taken from the `Default` section.
    /// The table is left untouched when an error is returned.
    pub fn restore(&mut self, snapshot: &TableSnapshot<S, C>) -> Result<()> {
        for section in &snapshot.sources {
            if !self.tracks(section.source) {
                return Err(EngineError::not_found("*", section.source.name()));
            }
            if section.source.is_default() {
                let seeded = Self::seed(section.source);
                let complete = section.states.len() == C::all().len();
                let matches = section.states.iter().all(|state| {
                    seeded
                        .get(&state.criterion)
                        .is_some_and(|seed| seed.assessment == state.assessment)
                });
                if !complete || !matches {
                    return Err(EngineError::ImmutableSource(section.source.name().to_string()));
                }
            }
        }

        let mut restored = self.clone();
        restored.clear_overrides();
        for section in &snapshot.sources {
            for state in &section.states {
                let target = restored.state_mut(section.source, state.criterion)?;
                if section.source.is_default() {
                    target.summary = state.summary.clone();
                } else {
                    *target = state.clone();
                }
            }
        }
        *self = restored;
        info!("Restored {} table from snapshot ({} sources)", C::FAMILY, snapshot.sources.len());
        Ok(())
    }

    fn clear_overrides(&mut self) {
        for (&source, states) in self.states.iter_mut() {
            *states = Self::seed(source);
        }
    }

    /// Discard every override, as when switching to a different variant
    pub fn reset(&mut self) {
        self.clear_overrides();
        info!("Reset {} evidence table", C::FAMILY);
    }
}

impl<S: Source> EvidenceStateTable<S, AcmgCriterion> {
    /// Set whether `criterion` applies, according to `source`
    pub fn set_presence(&mut self, source: S, criterion: AcmgCriterion, presence: Presence) -> Result<()> {
        let state = self.entry_mut(source, criterion)?;
        debug!("{} {}: presence {}", source, criterion, presence);
        state.assessment.presence = presence;
        Ok(())
    }

    /// Set the strength at which `criterion` applies, according to `source`
    ///
    /// Strengths outside the catalog's allowed set are rejected when
    /// `enforce_allowed_strengths` is on and only logged otherwise.
    pub fn set_evidence_level(
        &mut self,
        source: S,
        criterion: AcmgCriterion,
        level: EvidenceLevel,
    ) -> Result<()> {
        let allowed = self.check_level(criterion, level);
        let state = self.entry_mut(source, criterion)?;
        allowed?;
        debug!("{} {}: evidence level {}", source, criterion, level);
        state.assessment.evidence_level = level;
        Ok(())
    }

    fn check_level(&self, criterion: AcmgCriterion, level: EvidenceLevel) -> Result<()> {
        if criterion.definition().allows(level) {
            return Ok(());
        }
        if self.config.enforce_allowed_strengths {
            return Err(EngineError::StrengthNotAllowed {
                criterion: criterion.code().to_string(),
                level: level.to_string(),
            });
        }
        warn!("{} is outside the allowed strengths of {}", level, criterion);
        Ok(())
    }

    /// Copy every criterion's presence from one source into another
    pub fn copy_presence(&mut self, from: S, to: S) -> Result<()> {
        self.copy_across(from, to, |target, origin| {
            target.assessment.presence = origin.assessment.presence;
        })
    }

    /// Copy every criterion's evidence level from one source into another
    pub fn copy_evidence_level(&mut self, from: S, to: S) -> Result<()> {
        self.copy_across(from, to, |target, origin| {
            target.assessment.evidence_level = origin.assessment.evidence_level;
        })
    }
}

impl<S: Source, C: CnvCriterion> EvidenceStateTable<S, C> {
    /// Set (or clear with `None`) the points `source` assigns to `criterion`
    ///
    /// Scores outside the catalog range are rejected when
    /// `enforce_score_range` is on and only logged otherwise.
    pub fn set_score(&mut self, source: S, criterion: C, score: Option<f64>) -> Result<()> {
        let admitted = match score {
            Some(score) => self.check_score(criterion, score),
            None => Ok(()),
        };
        let state = self.entry_mut(source, criterion)?;
        admitted?;
        debug!("{} {}: score {:?}", source, criterion, score);
        state.assessment.score = score;
        Ok(())
    }

    fn check_score(&self, criterion: C, score: f64) -> Result<()> {
        let def = criterion.definition();
        if !score.is_finite() {
            return Err(EngineError::ScoreOutOfRange {
                criterion: criterion.code().to_string(),
                score,
                min: def.min_score,
                max: def.max_score,
            });
        }
        if def.admits(score) {
            return Ok(());
        }
        if self.config.enforce_score_range {
            return Err(EngineError::ScoreOutOfRange {
                criterion: criterion.code().to_string(),
                score,
                min: def.min_score,
                max: def.max_score,
            });
        }
        warn!(
            "Score {} for {} is outside [{}, {}]",
            score, criterion, def.min_score, def.max_score
        );
        Ok(())
    }

    /// Copy every criterion's score from one source into another
    pub fn copy_score(&mut self, from: S, to: S) -> Result<()> {
        self.copy_across(from, to, |target, origin| {
            target.assessment.score = origin.assessment.score;
        })
    }
}
