//! Write collaborator payloads into their evidence sources
//!
//! Each predictor reports into a dedicated source:
//!
//! ```text
//! InterVar  -> AcmgSource::InterVar  (presence)
//! AutoACMG  -> AcmgSource::AutoAcmg  (presence, strength, summary)
//! saved     -> AcmgSource::Server    (presence, strength, summary)
//! AutoCNV   -> CnvSource::User       (score, summary)
//! ```
//!
//! Unknown ids are skipped, as are deprecated ids when the evaluation is
//! configured to skip them. Both are logged and counted in the returned
//! [`IngestReport`]. Each call writes a whole payload or nothing: an error
//! leaves the evaluation as it was.

use crate::error::{IngestError, Result};
use crate::normalize::{lookup, normalize_id, resolve_strength};
use crate::types::{
    AutoAcmgEntry, AutoCnvEntry, CnvOverride, IngestReport, InterVarPayload, SavedRatingEntry,
    SeqvarOverride,
};
use tracing::{debug, info, warn};
use vareval_domain::{AcmgCriterion, AcmgSource, CnvSource, Criterion, Presence};
use vareval_engine::{CnvScorer, EngineError, SeqvarEvaluation};

/// Run `write` against a copy of `target`, committing it only on success
fn staged<T: Clone, R>(target: &mut T, write: impl FnOnce(&mut T) -> Result<R>) -> Result<R> {
    let mut copy = target.clone();
    let outcome = write(&mut copy)?;
    *target = copy;
    Ok(outcome)
}

/// Resolve a raw id for a sequence-variant source, updating `report` on skip
fn seqvar_target(
    evaluation: &SeqvarEvaluation,
    source: AcmgSource,
    raw: &str,
    report: &mut IngestReport,
) -> Option<AcmgCriterion> {
    let Some(criterion) = lookup::<AcmgCriterion>(raw) else {
        warn!("{}: skipping unknown criterion '{}'", source, raw);
        report.skipped_unknown += 1;
        return None;
    };
    if criterion.is_deprecated() && evaluation.config().skip_deprecated_criteria {
        warn!("{}: skipping deprecated criterion {}", source, criterion);
        report.skipped_deprecated += 1;
        return None;
    }
    Some(criterion)
}

/// Ingest InterVar calls (presence only)
pub fn ingest_intervar(
    evaluation: &mut SeqvarEvaluation,
    payload: &InterVarPayload,
) -> Result<IngestReport> {
    let source = AcmgSource::InterVar;
    staged(evaluation, |evaluation| {
        let mut report = IngestReport::default();
        for (raw, call) in &payload.calls {
            let Some(criterion) = seqvar_target(evaluation, source, raw, &mut report) else {
                continue;
            };
            evaluation.set_presence(source, criterion, Presence::from_bool(call.is_met()))?;
            report.applied += 1;
        }
        info!("Ingested InterVar calls: {}", report);
        Ok(report)
    })
}

/// Ingest AutoACMG predictions
///
/// `Met` sets presence to present and `NotMet`/`NotApplicable` to absent;
/// other predictions leave presence untouched but still carry strength and
/// summary. A strength annotation on the id (`PM2_Supporting`) is used when
/// the entry has no explicit strength.
pub fn ingest_autoacmg(
    evaluation: &mut SeqvarEvaluation,
    entries: &[AutoAcmgEntry],
) -> Result<IngestReport> {
    let source = AcmgSource::AutoAcmg;
    staged(evaluation, |evaluation| {
        let mut report = IngestReport::default();
        for entry in entries {
            let Some(criterion) = seqvar_target(evaluation, source, &entry.name, &mut report) else {
                continue;
            };

            if let Some(presence) = entry.prediction.presence() {
                evaluation.set_presence(source, criterion, presence)?;
            } else {
                debug!("{}: {} predicted {}, presence left unset", source, criterion, entry.prediction);
            }

            let strength = entry.strength.clone().or_else(|| normalize_id(&entry.name).strength);
            if let Some(raw) = strength {
                match resolve_strength(criterion.category(), &raw) {
                    Some(level) => evaluation.set_evidence_level(source, criterion, level)?,
                    None => warn!("{}: ignoring unrecognized strength '{}' for {}", source, raw, criterion),
                }
            }

            if entry.summary.is_some() {
                evaluation.set_summary(source, criterion, entry.summary.clone())?;
            }
            report.applied += 1;
        }
        info!("Ingested AutoACMG predictions: {}", report);
        Ok(report)
    })
}

/// Ingest a previously saved rating into the server source
pub fn ingest_saved_rating(
    evaluation: &mut SeqvarEvaluation,
    entries: &[SavedRatingEntry],
) -> Result<IngestReport> {
    let source = AcmgSource::Server;
    staged(evaluation, |evaluation| {
        let mut report = IngestReport::default();
        for entry in entries {
            let Some(criterion) = seqvar_target(evaluation, source, &entry.criterion, &mut report)
            else {
                continue;
            };
            evaluation.set_presence(source, criterion, entry.presence)?;
            evaluation.set_evidence_level(source, criterion, entry.evidence_level)?;
            if entry.summary.is_some() {
                evaluation.set_summary(source, criterion, entry.summary.clone())?;
            }
            report.applied += 1;
        }
        info!("Ingested saved rating: {}", report);
        Ok(report)
    })
}

/// Apply curator edits at the user source
///
/// Unlike predictor output, an edit naming an unknown criterion is an input
/// error.
pub fn apply_seqvar_overrides(
    evaluation: &mut SeqvarEvaluation,
    overrides: &[SeqvarOverride],
) -> Result<usize> {
    let source = AcmgSource::User;
    staged(evaluation, |evaluation| {
        for edit in overrides {
            let criterion = lookup::<AcmgCriterion>(&edit.criterion).ok_or_else(|| {
                IngestError::InvalidFormat(format!("Unknown criterion in user edit: {}", edit.criterion))
            })?;
            if let Some(presence) = edit.presence {
                evaluation.set_presence(source, criterion, presence)?;
            }
            if let Some(level) = edit.evidence_level {
                evaluation.set_evidence_level(source, criterion, level)?;
            }
            if edit.summary.is_some() {
                evaluation.set_summary(source, criterion, edit.summary.clone())?;
            }
        }
        if !overrides.is_empty() {
            info!("Applied {} user edits", overrides.len());
        }
        Ok(overrides.len())
    })
}

/// Ingest AutoCNV scores into the user source of `scorer`
///
/// Ids prefixed with the other catalog's kind (`Gain2A` for a loss) are
/// skipped as unknown.
pub fn ingest_autocnv(scorer: &mut CnvScorer, entries: &[AutoCnvEntry]) -> Result<IngestReport> {
    let source = CnvSource::User;
    staged(scorer, |scorer| {
        let mut report = IngestReport::default();
        for entry in entries {
            let id = normalize_id(&entry.criterion);
            if id.kind.is_some_and(|kind| kind != scorer.kind()) || id.code.is_empty() {
                warn!("AutoCNV: skipping '{}' for a {} scorer", entry.criterion, scorer.kind());
                report.skipped_unknown += 1;
                continue;
            }
            match scorer.set_score_by_code(source, &id.code, Some(entry.score)) {
                Ok(()) => {}
                Err(EngineError::CriterionNotFound { .. }) => {
                    warn!("AutoCNV: skipping unknown criterion '{}'", entry.criterion);
                    report.skipped_unknown += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
            if entry.summary.is_some() {
                scorer.set_summary_by_code(source, &id.code, entry.summary.clone())?;
            }
            report.applied += 1;
        }
        info!("Ingested AutoCNV scores: {}", report);
        Ok(report)
    })
}

/// Apply curator edits to a CNV scorer
pub fn apply_cnv_overrides(scorer: &mut CnvScorer, overrides: &[CnvOverride]) -> Result<usize> {
    let source = CnvSource::User;
    staged(scorer, |scorer| {
        for edit in overrides {
            let id = normalize_id(&edit.criterion);
            if id.kind.is_some_and(|kind| kind != scorer.kind()) {
                return Err(IngestError::InvalidFormat(format!(
                    "Criterion {} does not belong to the {} catalog",
                    edit.criterion,
                    scorer.kind()
                )));
            }
            scorer.set_score_by_code(source, &id.code, edit.score)?;
            if edit.summary.is_some() {
                scorer.set_summary_by_code(source, &id.code, edit.summary.clone())?;
            }
        }
        if !overrides.is_empty() {
            info!("Applied {} user edits", overrides.len());
        }
        Ok(overrides.len())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AutoAcmgPrediction, InterVarCall};
    use vareval_domain::{CnvKind, EvidenceLevel};
    use vareval_engine::EngineConfig;

    #[test]
    fn test_intervar_presence_only() {
        let mut evaluation = SeqvarEvaluation::new();
        let mut payload = InterVarPayload::default();
        payload.calls.insert("PVS1".to_string(), InterVarCall::Flag(1));
        payload.calls.insert("PS1".to_string(), InterVarCall::Flag(0));
        payload.calls.insert("XYZ1".to_string(), InterVarCall::Flag(1));

        let report = ingest_intervar(&mut evaluation, &payload).unwrap();
        assert_eq!(report.applied, 2);
        assert_eq!(report.skipped_unknown, 1);

        let pvs1 = evaluation
            .get_criteria_state_from_source(AcmgCriterion::Pvs1, AcmgSource::InterVar)
            .unwrap();
        assert_eq!(pvs1.assessment.presence, Presence::Present);
        assert_eq!(pvs1.assessment.evidence_level, EvidenceLevel::NotSet);
        let ps1 = evaluation
            .get_criteria_state_from_source(AcmgCriterion::Ps1, AcmgSource::InterVar)
            .unwrap();
        assert_eq!(ps1.assessment.presence, Presence::Absent);
    }

    #[test]
    fn test_deprecated_skipped_by_default() {
        let mut evaluation = SeqvarEvaluation::new();
        let mut payload = InterVarPayload::default();
        payload.calls.insert("PP5".to_string(), InterVarCall::Flag(1));
        payload.calls.insert("BP6".to_string(), InterVarCall::Flag(1));

        let report = ingest_intervar(&mut evaluation, &payload).unwrap();
        assert_eq!(report.skipped_deprecated, 2);
        assert_eq!(report.applied, 0);

        let mut lenient = SeqvarEvaluation::with_config(EngineConfig::lenient());
        let report = ingest_intervar(&mut lenient, &payload).unwrap();
        assert_eq!(report.applied, 2);
    }

    #[test]
    fn test_autoacmg_strength_and_summary() {
        let mut evaluation = SeqvarEvaluation::new();
        let entries = vec![
            AutoAcmgEntry {
                name: "PM2_Supporting".to_string(),
                prediction: AutoAcmgPrediction::Met,
                strength: None,
                summary: Some("absent from gnomAD".to_string()),
            },
            AutoAcmgEntry {
                name: "BP4".to_string(),
                prediction: AutoAcmgPrediction::NotAutomated,
                strength: Some("Supporting".to_string()),
                summary: None,
            },
        ];
        let report = ingest_autoacmg(&mut evaluation, &entries).unwrap();
        assert_eq!(report.applied, 2);

        let pm2 = evaluation
            .get_criteria_state_from_source(AcmgCriterion::Pm2, AcmgSource::AutoAcmg)
            .unwrap();
        assert_eq!(pm2.assessment.presence, Presence::Present);
        assert_eq!(pm2.assessment.evidence_level, EvidenceLevel::PathogenicSupporting);
        assert_eq!(pm2.summary.as_deref(), Some("absent from gnomAD"));

        let bp4 = evaluation
            .get_criteria_state_from_source(AcmgCriterion::Bp4, AcmgSource::AutoAcmg)
            .unwrap();
        assert_eq!(bp4.assessment.presence, Presence::Unknown);
        assert_eq!(bp4.assessment.evidence_level, EvidenceLevel::BenignSupporting);
    }

    #[test]
    fn test_rejected_autoacmg_payload_leaves_evaluation_unchanged() {
        let mut evaluation = SeqvarEvaluation::with_config(EngineConfig::strict());
        evaluation
            .set_presence(AcmgSource::User, AcmgCriterion::Pp3, Presence::Present)
            .unwrap();
        let before = evaluation.get_states();

        let entries = vec![
            AutoAcmgEntry {
                name: "PS3".to_string(),
                prediction: AutoAcmgPrediction::Met,
                strength: None,
                summary: Some("functional study".to_string()),
            },
            AutoAcmgEntry {
                name: "PM2".to_string(),
                prediction: AutoAcmgPrediction::Met,
                strength: Some("Strong".to_string()),
                summary: None,
            },
        ];
        assert!(matches!(
            ingest_autoacmg(&mut evaluation, &entries),
            Err(IngestError::Engine(EngineError::StrengthNotAllowed { .. }))
        ));
        assert_eq!(evaluation.get_states(), before);
    }

    #[test]
    fn test_rejected_saved_rating_and_edits_leave_evaluation_unchanged() {
        let mut evaluation = SeqvarEvaluation::with_config(EngineConfig::strict());
        let before = evaluation.get_states();

        let entries = vec![
            SavedRatingEntry {
                criterion: "PS3".to_string(),
                presence: Presence::Present,
                evidence_level: EvidenceLevel::PathogenicStrong,
                summary: None,
            },
            SavedRatingEntry {
                criterion: "BA1".to_string(),
                presence: Presence::Present,
                evidence_level: EvidenceLevel::BenignSupporting,
                summary: None,
            },
        ];
        assert!(ingest_saved_rating(&mut evaluation, &entries).is_err());
        assert_eq!(evaluation.get_states(), before);

        let edits = vec![
            SeqvarOverride {
                criterion: "PVS1".to_string(),
                presence: Some(Presence::Present),
                evidence_level: None,
                summary: None,
            },
            SeqvarOverride {
                criterion: "PM2".to_string(),
                presence: Some(Presence::Present),
                evidence_level: Some(EvidenceLevel::PathogenicVeryStrong),
                summary: None,
            },
        ];
        assert!(matches!(
            apply_seqvar_overrides(&mut evaluation, &edits),
            Err(IngestError::Engine(EngineError::StrengthNotAllowed { .. }))
        ));
        assert_eq!(evaluation.get_states(), before);
    }

    #[test]
    fn test_saved_rating_goes_to_server() {
        let mut evaluation = SeqvarEvaluation::new();
        let entries = vec![SavedRatingEntry {
            criterion: "ps3".to_string(),
            presence: Presence::Present,
            evidence_level: EvidenceLevel::PathogenicModerate,
            summary: None,
        }];
        ingest_saved_rating(&mut evaluation, &entries).unwrap();
        let state = evaluation.get_criteria_state(AcmgCriterion::Ps3).unwrap();
        assert_eq!(state.assessment.presence, Presence::Present);
        assert_eq!(state.assessment.evidence_level, EvidenceLevel::PathogenicModerate);
    }

    #[test]
    fn test_unknown_user_edit_rejected() {
        let mut evaluation = SeqvarEvaluation::new();
        let edits = vec![SeqvarOverride {
            criterion: "PM9".to_string(),
            presence: Some(Presence::Present),
            evidence_level: None,
            summary: None,
        }];
        assert!(matches!(
            apply_seqvar_overrides(&mut evaluation, &edits),
            Err(IngestError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_autocnv_kind_mismatch_skipped() {
        let mut scorer = CnvScorer::for_kind(CnvKind::Loss, EngineConfig::default());
        let entries = vec![
            AutoCnvEntry {
                criterion: "Loss2A".to_string(),
                score: 1.0,
                summary: Some("HI gene".to_string()),
            },
            AutoCnvEntry {
                criterion: "Gain2A".to_string(),
                score: 1.0,
                summary: None,
            },
            AutoCnvEntry {
                criterion: "2K".to_string(),
                score: 0.45,
                summary: None,
            },
        ];
        let report = ingest_autocnv(&mut scorer, &entries).unwrap();
        assert_eq!(report.applied, 1);
        assert_eq!(report.skipped_unknown, 2);
        assert_eq!(scorer.total_score().unwrap(), 1.0);
    }

    #[test]
    fn test_autocnv_strict_range() {
        let mut scorer = CnvScorer::for_kind(CnvKind::Loss, EngineConfig::strict());
        let entries = vec![AutoCnvEntry {
            criterion: "3A".to_string(),
            score: 0.45,
            summary: None,
        }];
        assert!(matches!(
            ingest_autocnv(&mut scorer, &entries),
            Err(IngestError::Engine(EngineError::ScoreOutOfRange { .. }))
        ));

        let entries = vec![
            AutoCnvEntry {
                criterion: "2A".to_string(),
                score: 1.0,
                summary: None,
            },
            AutoCnvEntry {
                criterion: "3A".to_string(),
                score: 0.45,
                summary: None,
            },
        ];
        assert!(ingest_autocnv(&mut scorer, &entries).is_err());
        assert_eq!(scorer.total_score().unwrap(), 0.0);
    }

    #[test]
    fn test_cnv_override_clears_score() {
        let mut scorer = CnvScorer::for_kind(CnvKind::Gain, EngineConfig::default());
        let set = vec![CnvOverride {
            criterion: "2A".to_string(),
            score: Some(1.0),
            summary: None,
        }];
        apply_cnv_overrides(&mut scorer, &set).unwrap();
        assert_eq!(scorer.total_score().unwrap(), 1.0);

        let clear = vec![CnvOverride {
            criterion: "Gain2A".to_string(),
            score: None,
            summary: None,
        }];
        apply_cnv_overrides(&mut scorer, &clear).unwrap();
        assert_eq!(scorer.total_score().unwrap(), 0.0);

        let wrong = vec![CnvOverride {
            criterion: "Loss2A".to_string(),
            score: Some(1.0),
            summary: None,
        }];
        assert!(apply_cnv_overrides(&mut scorer, &wrong).is_err());
    }
}
