//! Vareval Domain Layer
//!
//! This crate holds the closed vocabularies of variant interpretation: the
//! criterion catalogs, evidence sources, per-source evidence state and the
//! classification labels. It contains no I/O and no evaluation logic; the
//! evidence table, resolver and classifiers live in `vareval-engine`.
//!
//! ## Key Concepts
//!
//! - **Criterion**: a member of one of three closed sets - ACMG/AMP
//!   sequence-variant criteria, ClinGen CNV loss criteria, CNV gain criteria
//! - **Catalog**: the static, read-only definition of every criterion
//! - **Source**: who asserts a judgment (guideline default, predictors, saved
//!   rating, curator), ordered by override priority
//! - **Assessment**: the fields a source may set for a criterion
//!   (presence + strength, or a score)
//! - **Verdict**: a classification label plus the conflict flag

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod acmg;
pub mod classification;
pub mod cnv;
pub mod evaluation;
pub mod evidence;
pub mod source;
pub mod state;
pub mod traits;
pub mod variant;

// Re-exports for convenience
pub use acmg::{AcmgCriterion, AcmgCriterionDef, SeqvarAssessment, ACMG_CATALOG};
pub use classification::{Classification, Verdict};
pub use cnv::{
    CnvAssessment, CnvCriterion, CnvCriterionDef, CnvGainCriterion, CnvLossCriterion,
    CNV_GAIN_CATALOG, CNV_LOSS_CATALOG,
};
pub use evaluation::EvaluationId;
pub use evidence::{Category, EvidenceLevel, Presence};
pub use source::{AcmgSource, CnvSource};
pub use state::EvidenceState;
pub use traits::{Assessment, Criterion, Source};
pub use variant::{CnvKind, SvType};
