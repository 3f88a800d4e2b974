//! Evaluation documents
//!
//! An evaluation document describes one variant together with everything the
//! collaborators reported about it. Evaluating a document builds a fresh
//! session, ingests every payload into its source and classifies.
//!
//! ```json
//! {
//!   "kind": "seqvar",
//!   "variant": "NM_000546.6:c.215C>G",
//!   "intervar": {"PVS1": 1, "PS1": 1},
//!   "autoacmg": [{"name": "PM2", "prediction": "Met", "strength": "Supporting"}],
//!   "user": [{"criterion": "PVS1", "evidence_level": "PathogenicModerate"}],
//!   "adopt": "AutoACMG"
//! }
//! ```

use crate::error::{IngestError, Result};
use crate::ingest::{
    apply_cnv_overrides, apply_seqvar_overrides, ingest_autoacmg, ingest_autocnv,
    ingest_intervar, ingest_saved_rating,
};
use crate::parser::tolerant;
use crate::types::{
    AutoAcmgEntry, AutoCnvEntry, CnvOverride, IngestReport, InterVarPayload, SavedRatingEntry,
    SeqvarOverride,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;
use vareval_domain::{
    AcmgCriterion, AcmgSource, CnvKind, Criterion, EvaluationId, EvidenceLevel, Presence, SvType,
    Verdict,
};
use vareval_engine::{CnvScorer, EngineConfig, EvidenceCounts, SeqvarEvaluation};

/// A variant plus collaborator payloads, tagged by variant class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EvaluationDocument {
    /// Sequence variant scored with the ACMG/AMP criteria
    Seqvar(SeqvarDocument),
    /// Copy-number variant scored with the ClinGen CNV criteria
    Cnv(CnvDocument),
}

/// Inputs for a sequence-variant evaluation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeqvarDocument {
    /// Free-text variant label (HGVS or similar)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,

    /// InterVar calls
    #[serde(
        default,
        deserialize_with = "tolerant::intervar",
        skip_serializing_if = "Option::is_none"
    )]
    pub intervar: Option<InterVarPayload>,

    /// AutoACMG predictions
    #[serde(
        default,
        deserialize_with = "tolerant::autoacmg",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub autoacmg: Vec<AutoAcmgEntry>,

    /// Previously saved rating
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub saved: Vec<SavedRatingEntry>,

    /// Source whose suggestions the curator accepted wholesale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adopt: Option<AcmgSource>,

    /// Curator edits, applied last
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user: Vec<SeqvarOverride>,
}

/// Inputs for a CNV evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CnvDocument {
    /// Free-text variant label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,

    /// SV type; selects the loss or gain catalog
    pub sv_type: SvType,

    /// AutoCNV scores
    #[serde(
        default,
        deserialize_with = "tolerant::autocnv",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub autocnv: Vec<AutoCnvEntry>,

    /// Curator edits, applied last
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user: Vec<CnvOverride>,
}

/// A present criterion and the strength it resolved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetCriterion {
    /// Criterion code
    pub code: String,

    /// Resolved strength
    pub evidence_level: EvidenceLevel,

    /// Resolved rationale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// A CNV criterion contributing points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCriterion {
    /// Criterion code
    pub code: String,

    /// Effective points
    pub score: f64,
}

/// Class-specific part of an outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OutcomeDetail {
    /// Sequence-variant detail
    Seqvar {
        /// Bucket counts the rules were applied to
        counts: EvidenceCounts,
        /// Criteria resolved as present
        met: Vec<MetCriterion>,
    },
    /// CNV detail
    Cnv {
        /// Catalog used
        cnv_kind: CnvKind,
        /// Sum of effective points
        total_score: f64,
        /// Points per guideline section
        section_totals: BTreeMap<u8, f64>,
        /// Criteria with non-zero points
        scored: Vec<ScoredCriterion>,
    },
}

/// Result of evaluating a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    /// Session the document was evaluated in
    pub evaluation_id: EvaluationId,

    /// Variant label from the document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,

    /// Classification and conflict flag
    pub verdict: Verdict,

    /// Counts or score breakdown
    pub detail: OutcomeDetail,

    /// Tally of ingested predictor entries
    pub report: IngestReport,
}

impl EvaluationDocument {
    /// Parse a document from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a document from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Variant label, if given
    pub fn variant(&self) -> Option<&str> {
        match self {
            EvaluationDocument::Seqvar(doc) => doc.variant.as_deref(),
            EvaluationDocument::Cnv(doc) => doc.variant.as_deref(),
        }
    }

    /// Build a session, ingest every payload and classify
    pub fn evaluate(&self, config: &EngineConfig) -> Result<EvaluationOutcome> {
        match self {
            EvaluationDocument::Seqvar(doc) => doc.evaluate(config),
            EvaluationDocument::Cnv(doc) => doc.evaluate(config),
        }
    }
}

impl SeqvarDocument {
    /// Ingest into a fresh sequence-variant session
    pub fn build(&self, config: &EngineConfig) -> Result<(SeqvarEvaluation, IngestReport)> {
        let mut evaluation = SeqvarEvaluation::with_config(config.clone());
        let mut report = IngestReport::default();

        if let Some(intervar) = &self.intervar {
            report.merge(ingest_intervar(&mut evaluation, intervar)?);
        }
        if !self.autoacmg.is_empty() {
            report.merge(ingest_autoacmg(&mut evaluation, &self.autoacmg)?);
        }
        if !self.saved.is_empty() {
            report.merge(ingest_saved_rating(&mut evaluation, &self.saved)?);
        }
        if let Some(from) = self.adopt {
            if from == AcmgSource::User || from == AcmgSource::Default {
                return Err(IngestError::InvalidFormat(format!(
                    "Cannot adopt suggestions from the {} source",
                    from
                )));
            }
            evaluation.adopt_as_user(from)?;
        }
        apply_seqvar_overrides(&mut evaluation, &self.user)?;
        Ok((evaluation, report))
    }

    fn evaluate(&self, config: &EngineConfig) -> Result<EvaluationOutcome> {
        let (evaluation, report) = self.build(config)?;
        let verdict = evaluation.get_classification()?;
        let counts = evaluation.get_evidence_counts()?;

        let mut met = Vec::new();
        for &criterion in AcmgCriterion::all() {
            let state = evaluation.get_criteria_state(criterion)?;
            if state.assessment.presence == Presence::Present {
                met.push(MetCriterion {
                    code: criterion.code().to_string(),
                    evidence_level: state.assessment.evidence_level,
                    summary: state.summary,
                });
            }
        }

        info!(
            "Evaluated {}: {} ({} criteria met)",
            self.variant.as_deref().unwrap_or("sequence variant"),
            verdict,
            met.len()
        );
        Ok(EvaluationOutcome {
            evaluation_id: evaluation.id(),
            variant: self.variant.clone(),
            verdict,
            detail: OutcomeDetail::Seqvar { counts, met },
            report,
        })
    }
}

impl CnvDocument {
    /// Ingest into a fresh CNV scorer for the document's SV type
    pub fn build(&self, config: &EngineConfig) -> Result<(CnvScorer, IngestReport)> {
        let mut scorer = CnvScorer::for_sv_type(self.sv_type, config.clone())?;
        let mut report = IngestReport::default();
        if !self.autocnv.is_empty() {
            report.merge(ingest_autocnv(&mut scorer, &self.autocnv)?);
        }
        apply_cnv_overrides(&mut scorer, &self.user)?;
        Ok((scorer, report))
    }

    fn evaluate(&self, config: &EngineConfig) -> Result<EvaluationOutcome> {
        let (scorer, report) = self.build(config)?;
        let verdict = scorer.get_classification()?;
        let total_score = scorer.total_score()?;
        let scored = scorer
            .effective_scores()?
            .into_iter()
            .map(|(code, score)| ScoredCriterion {
                code: code.to_string(),
                score,
            })
            .collect();

        info!(
            "Evaluated {} {}: {} (total {})",
            scorer.kind(),
            self.variant.as_deref().unwrap_or("CNV"),
            verdict,
            total_score
        );
        Ok(EvaluationOutcome {
            evaluation_id: scorer.id(),
            variant: self.variant.clone(),
            verdict,
            detail: OutcomeDetail::Cnv {
                cnv_kind: scorer.kind(),
                total_score,
                section_totals: scorer.section_totals()?,
                scored,
            },
            report,
        })
    }
}
