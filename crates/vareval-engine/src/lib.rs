//! Vareval Engine
//!
//! Records per-source evidence for one variant under evaluation and turns it
//! into a classification.
//!
//! The engine provides:
//! - The evidence state table, with a read-only guideline baseline
//! - Source-priority resolution of effective evidence
//! - ACMG/AMP sequence-variant classification
//! - ClinGen CNV point scoring for losses and gains
//!
//! # Examples
//!
//! ```
//! use vareval_domain::{AcmgCriterion, AcmgSource, EvidenceLevel, Presence};
//! use vareval_engine::SeqvarEvaluation;
//!
//! let mut evaluation = SeqvarEvaluation::new();
//! evaluation.set_presence(AcmgSource::InterVar, AcmgCriterion::Pvs1, Presence::Present)?;
//! evaluation.set_presence(AcmgSource::InterVar, AcmgCriterion::Ps1, Presence::Present)?;
//!
//! // The curator downgrades PVS1 to moderate
//! evaluation.set_evidence_level(
//!     AcmgSource::User,
//!     AcmgCriterion::Pvs1,
//!     EvidenceLevel::PathogenicModerate,
//! )?;
//! assert_eq!(evaluation.get_classification()?.label(), "Likely pathogenic");
//! # Ok::<(), vareval_engine::EngineError>(())
//! ```

#![warn(missing_docs)]

mod cnv;
mod config;
mod error;
mod resolver;
mod seqvar;
mod table;

pub use cnv::{classify_cnv_score, CnvEvaluation, CnvScorer};
pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use resolver::MultiSourceResolver;
pub use seqvar::{classify_counts, EvidenceCounts, SeqvarClassifier, SeqvarEvaluation};
pub use table::{EvidenceStateTable, SourceSnapshot, TableSnapshot};
