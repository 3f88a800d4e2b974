//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use vareval_domain::{
    AcmgCriterionDef, Classification, CnvCriterionDef, CnvKind, Verdict, ACMG_CATALOG,
    CNV_GAIN_CATALOG, CNV_LOSS_CATALOG,
};
use vareval_engine::EvidenceCounts;
use vareval_ingest::{EvaluationOutcome, OutcomeDetail};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an evaluation outcome.
    pub fn format_outcome(&self, outcome: &EvaluationOutcome) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
            OutputFormat::Table => Ok(self.format_outcome_table(outcome)),
            OutputFormat::Quiet => Ok(outcome.verdict.label().to_string()),
        }
    }

    fn format_outcome_table(&self, outcome: &EvaluationOutcome) -> String {
        let mut lines = Vec::new();
        if let Some(variant) = &outcome.variant {
            lines.push(format!("Variant: {}", variant));
        }
        lines.push(format!("Classification: {}", self.verdict(&outcome.verdict)));

        match &outcome.detail {
            OutcomeDetail::Seqvar { counts, met } => {
                lines.push(counts_table(counts));
                if met.is_empty() {
                    lines.push(self.colorize("No criteria met.", "yellow"));
                } else {
                    let mut builder = Builder::default();
                    builder.push_record(["Criterion", "Strength", "Summary"]);
                    for criterion in met {
                        builder.push_record([
                            criterion.code.as_str(),
                            criterion.evidence_level.label(),
                            criterion.summary.as_deref().unwrap_or(""),
                        ]);
                    }
                    lines.push(styled(builder));
                }
            }
            OutcomeDetail::Cnv {
                cnv_kind,
                total_score,
                section_totals,
                scored,
            } => {
                lines.push(format!("Copy-number {}: {} points", cnv_kind, points(*total_score)));
                let mut builder = Builder::default();
                builder.push_record(["Section", "Points"]);
                for (section, total) in section_totals {
                    builder.push_record([section.to_string(), points(*total)]);
                }
                lines.push(styled(builder));

                if !scored.is_empty() {
                    let mut builder = Builder::default();
                    builder.push_record(["Criterion", "Points"]);
                    for criterion in scored {
                        builder.push_record([criterion.code.clone(), points(criterion.score)]);
                    }
                    lines.push(styled(builder));
                }
            }
        }

        if outcome.report.skipped() > 0 {
            lines.push(self.warning(&format!("Ingested {}", outcome.report)));
        }
        lines.join("\n")
    }

    /// Format the sequence-variant catalog.
    pub fn format_acmg_catalog(&self, include_deprecated: bool) -> Result<String> {
        let defs: Vec<&AcmgCriterionDef> = ACMG_CATALOG
            .iter()
            .filter(|def| include_deprecated || !def.deprecated)
            .collect();

        match self.format {
            OutputFormat::Json => {
                let rows: Vec<serde_json::Value> = defs
                    .iter()
                    .map(|def| {
                        serde_json::json!({
                            "code": def.code,
                            "category": def.category,
                            "default_level": def.default_level,
                            "allowed_levels": def.allowed_levels,
                            "title": def.title,
                            "description": def.description,
                            "deprecated": def.deprecated,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Quiet => Ok(codes(defs.iter().map(|def| def.code))),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Code", "Category", "Default", "Allowed", "Title"]);
                for def in defs {
                    let allowed: Vec<&str> = def.allowed_levels.iter().map(|l| l.label()).collect();
                    let code = if def.deprecated {
                        format!("{} (deprecated)", def.code)
                    } else {
                        def.code.to_string()
                    };
                    builder.push_record([
                        code,
                        def.category.to_string(),
                        def.default_level.label().to_string(),
                        allowed.join(", "),
                        def.title.to_string(),
                    ]);
                }
                Ok(styled(builder))
            }
        }
    }

    /// Format one of the CNV catalogs.
    pub fn format_cnv_catalog(&self, kind: CnvKind) -> Result<String> {
        match kind {
            CnvKind::Loss => self.format_cnv_defs(&CNV_LOSS_CATALOG),
            CnvKind::Gain => self.format_cnv_defs(&CNV_GAIN_CATALOG),
        }
    }

    fn format_cnv_defs<C>(&self, defs: &[CnvCriterionDef<C>]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<serde_json::Value> = defs
                    .iter()
                    .map(|def| {
                        serde_json::json!({
                            "section": def.section,
                            "code": def.code,
                            "description": def.description,
                            "suggested_score": def.suggested_score,
                            "min_score": def.min_score,
                            "max_score": def.max_score,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Quiet => Ok(codes(defs.iter().map(|def| def.code))),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Section", "Code", "Suggested", "Range", "Description"]);
                for def in defs {
                    builder.push_record([
                        def.section.to_string(),
                        def.code.to_string(),
                        format!("{:.2}", def.suggested_score),
                        format!("[{:.2}, {:.2}]", def.min_score, def.max_score),
                        def.description.to_string(),
                    ]);
                }
                Ok(styled(builder))
            }
        }
    }

    /// Format a verdict, colored by direction.
    pub fn verdict(&self, verdict: &Verdict) -> String {
        let color = match verdict.classification {
            Classification::Pathogenic | Classification::LikelyPathogenic => "red",
            Classification::Benign | Classification::LikelyBenign => "green",
            Classification::UncertainSignificance => "cyan",
            Classification::Conflicting => "magenta",
        };
        self.colorize(&verdict.to_string(), color)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn counts_table(counts: &EvidenceCounts) -> String {
    let mut builder = Builder::default();
    builder.push_record(["PVS", "PS", "PM", "PP", "BA", "BS", "BP"]);
    builder.push_record(
        [counts.pvs, counts.ps, counts.pm, counts.pp, counts.ba, counts.bs, counts.bp]
            .map(|n| n.to_string()),
    );
    styled(builder)
}

/// Points with at least two decimals and no rounding beyond six
fn points(value: f64) -> String {
    let mut text = format!("{:.6}", value);
    while text.ends_with('0') && text.len() - text.find('.').unwrap_or(0) > 3 {
        text.pop();
    }
    text
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn codes<'a>(codes: impl Iterator<Item = &'a str>) -> String {
    codes.collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use vareval_engine::EngineConfig;
    use vareval_ingest::EvaluationDocument;

    fn outcome(json: &str) -> EvaluationOutcome {
        EvaluationDocument::from_json_str(json)
            .unwrap()
            .evaluate(&EngineConfig::default())
            .unwrap()
    }

    fn seqvar_outcome() -> EvaluationOutcome {
        outcome(
            r#"{"kind": "seqvar", "variant": "chr17:g.7675088C>T",
                "intervar": {"PVS1": 1, "PS1": 1, "XX9": 1}}"#,
        )
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_outcome(&seqvar_outcome()).unwrap();
        assert!(output.contains("\"classification\": \"Pathogenic\""));
        assert!(output.contains("\"pvs\": 1"));
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_outcome(&seqvar_outcome()).unwrap();
        assert_eq!(output, "Pathogenic");
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_outcome(&seqvar_outcome()).unwrap();
        assert!(output.contains("Variant: chr17:g.7675088C>T"));
        assert!(output.contains("Classification: Pathogenic"));
        assert!(output.contains("PVS1"));
        assert!(output.contains("1 unknown skipped"));
    }

    #[test]
    fn test_cnv_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter
            .format_outcome(&outcome(
                r#"{"kind": "cnv", "sv_type": "DEL", "autocnv": [{"criterion": "2A", "score": 1.0}]}"#,
            ))
            .unwrap();
        assert!(output.contains("Copy-number Loss: 1.00 points"));
        assert!(output.contains("2A"));
    }

    #[test]
    fn test_points_keep_precision() {
        assert_eq!(points(1.0), "1.00");
        assert_eq!(points(0.45), "0.45");
        assert_eq!(points(0.986), "0.986");
        assert_eq!(points(-0.9), "-0.90");
    }

    #[test]
    fn test_acmg_catalog() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let active = formatter.format_acmg_catalog(false).unwrap();
        assert!(active.lines().any(|code| code == "PVS1"));
        assert!(!active.lines().any(|code| code == "PP5"));

        let all = formatter.format_acmg_catalog(true).unwrap();
        assert_eq!(all.lines().count(), ACMG_CATALOG.len());
    }

    #[test]
    fn test_cnv_catalog_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_cnv_catalog(CnvKind::Gain).unwrap();
        let rows: Vec<serde_json::Value> = serde_json::from_str(&output).unwrap();
        assert_eq!(rows.len(), CNV_GAIN_CATALOG.len());
        assert_eq!(rows[0]["section"], 1);
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let msg = formatter.success("test");
        assert_eq!(msg, "✓ test");
        let verdict = formatter.verdict(&Verdict::new(Classification::Conflicting, true));
        assert_eq!(verdict, "Conflicting (conflicting evidence)");
    }
}
