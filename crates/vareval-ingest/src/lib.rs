//! Vareval Ingest
//!
//! Reads what collaborators report about a variant and writes it into the
//! evidence sources of an evaluation.
//!
//! # Overview
//!
//! Predictors and persistence each own one evidence source. Ingestion
//! normalizes every reported criterion id to the catalog code and calls the
//! engine's setters; ids the catalog does not know, and deprecated ids, are
//! skipped with a warning.
//!
//! # Architecture
//!
//! ```text
//! response text → parser → payload → ingest → evaluation source
//! document      → evaluate → EvaluationOutcome
//! ```
//!
//! # Example Usage
//!
//! ```
//! use vareval_domain::Classification;
//! use vareval_engine::EngineConfig;
//! use vareval_ingest::EvaluationDocument;
//!
//! let document = EvaluationDocument::from_json_str(r#"{
//!     "kind": "seqvar",
//!     "intervar": {"PVS1": 1, "PS1": 1}
//! }"#)?;
//!
//! let outcome = document.evaluate(&EngineConfig::default())?;
//! assert_eq!(outcome.verdict.classification, Classification::Pathogenic);
//! # Ok::<(), vareval_ingest::IngestError>(())
//! ```

#![warn(missing_docs)]

mod document;
mod error;
mod ingest;
mod normalize;
mod parser;
mod types;


pub use document::{
    CnvDocument, EvaluationDocument, EvaluationOutcome, MetCriterion, OutcomeDetail,
    ScoredCriterion, SeqvarDocument,
};
pub use error::{IngestError, Result};
pub use ingest::{
    apply_cnv_overrides, apply_seqvar_overrides, ingest_autoacmg, ingest_autocnv,
    ingest_intervar, ingest_saved_rating,
};
pub use normalize::{lookup, normalize_id, resolve_strength, NormalizedId};
pub use parser::{
    autoacmg_from_value, autocnv_from_value, intervar_from_value, parse_autoacmg_response,
    parse_autocnv_response, parse_intervar_response,
};
pub use types::{
    AutoAcmgEntry, AutoAcmgPrediction, AutoCnvEntry, CnvOverride, IngestReport, InterVarCall,
    InterVarPayload, SavedRatingEntry, SeqvarOverride,
};
