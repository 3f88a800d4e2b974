//! Classify command implementation.

use crate::cli::ClassifyArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::io::Read;
use tracing::info;
use vareval_engine::EngineConfig;
use vareval_ingest::{EvaluationDocument, EvaluationOutcome};

/// Execute the classify command.
pub fn execute_classify(args: ClassifyArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let outcome = classify(&args, config)?;
    println!("{}", formatter.format_outcome(&outcome)?);
    Ok(())
}

/// Read the document named by `args` and evaluate it.
pub fn classify(args: &ClassifyArgs, config: &Config) -> Result<EvaluationOutcome> {
    let document = read_document(&args.document)?;
    let engine = engine_config(config, args.strict);
    info!("Classifying {} with {:?}", args.document, engine);
    Ok(document.evaluate(&engine)?)
}

fn engine_config(config: &Config, strict: bool) -> EngineConfig {
    if strict {
        EngineConfig {
            enforce_allowed_strengths: true,
            enforce_score_range: true,
            ..config.engine.clone()
        }
    } else {
        config.engine.clone()
    }
}

fn read_document(path: &str) -> Result<EvaluationDocument> {
    if path == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(EvaluationDocument::from_json_str(&text)?);
    }
    if path.trim().is_empty() {
        return Err(CliError::InvalidInput("Document path is empty".to_string()));
    }
    Ok(EvaluationDocument::from_file(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use vareval_domain::Classification;

    fn document(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    fn args(file: &tempfile::NamedTempFile, strict: bool) -> ClassifyArgs {
        ClassifyArgs {
            document: file.path().to_string_lossy().into_owned(),
            strict,
        }
    }

    #[test]
    fn test_classify_file() {
        let file = document(r#"{"kind": "seqvar", "intervar": {"PVS1": 1, "PS1": 1}}"#);
        let outcome = classify(&args(&file, false), &Config::default()).unwrap();
        assert_eq!(outcome.verdict.classification, Classification::Pathogenic);
    }

    #[test]
    fn test_strict_rejects_disallowed_strength() {
        // Benign strengths are outside the allowed set of PVS1
        let file = document(
            r#"{"kind": "seqvar", "user": [
                {"criterion": "PVS1", "presence": "Present", "evidence_level": "BenignStandalone"}
            ]}"#,
        );
        assert!(classify(&args(&file, false), &Config::default()).is_ok());
        assert!(matches!(
            classify(&args(&file, true), &Config::default()),
            Err(CliError::Ingest(_))
        ));
    }

    #[test]
    fn test_strict_keeps_configured_settings() {
        let mut config = Config::default();
        config.engine.skip_deprecated_criteria = false;
        let engine = engine_config(&config, true);
        assert!(engine.enforce_allowed_strengths);
        assert!(!engine.skip_deprecated_criteria);
    }

    #[test]
    fn test_missing_document() {
        let args = ClassifyArgs {
            document: "/nonexistent/variant.json".to_string(),
            strict: false,
        };
        assert!(matches!(
            classify(&args, &Config::default()),
            Err(CliError::Ingest(_))
        ));
    }
}
