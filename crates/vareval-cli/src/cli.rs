//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// Vareval CLI - Classify genetic variants against ACMG/AMP and ClinGen CNV criteria.
#[derive(Debug, Parser)]
#[command(name = "vareval")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "VAREVAL_CONFIG")]
    pub config: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (classification label only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify the variant described by an evaluation document
    Classify(ClassifyArgs),

    /// Print a criterion catalog
    Criteria(CriteriaArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the classify command.
#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    /// Evaluation document (JSON); `-` reads from stdin
    pub document: String,

    /// Enforce allowed strengths and score ranges for this run
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the criteria command.
#[derive(Debug, Parser)]
pub struct CriteriaArgs {
    /// Catalog to print
    #[arg(short, long, value_enum, default_value = "acmg")]
    pub set: CatalogArg,

    /// Include deprecated criteria
    #[arg(long)]
    pub deprecated: bool,
}

/// Criterion catalog selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CatalogArg {
    /// ACMG/AMP sequence-variant criteria
    Acmg,
    /// ClinGen CNV copy-loss criteria
    Loss,
    /// ClinGen CNV copy-gain criteria
    Gain,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,

        /// Write the strict engine preset
        #[arg(long)]
        strict: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<CatalogArg> for Option<vareval_domain::CnvKind> {
    fn from(set: CatalogArg) -> Self {
        match set {
            CatalogArg::Acmg => None,
            CatalogArg::Loss => Some(vareval_domain::CnvKind::Loss),
            CatalogArg::Gain => Some(vareval_domain::CnvKind::Gain),
        }
    }
}
