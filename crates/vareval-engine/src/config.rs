//! Engine configuration
//!
//! Controls whether catalog metadata (allowed strengths, score ranges) is
//! enforced on writes, how deprecated criteria are treated and how CNV totals
//! are rounded.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for evidence tables and scorers
///
/// # Examples
///
/// ```
/// use vareval_engine::EngineConfig;
///
/// // Default: catalog metadata is advisory
/// let config = EngineConfig::default();
/// assert!(!config.enforce_allowed_strengths);
///
/// // Strict: out-of-catalog strengths and scores are rejected
/// let config = EngineConfig::strict();
/// assert!(config.enforce_score_range);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Reject evidence levels outside a criterion's allowed strengths
    /// Default: false (a warning is logged instead)
    #[serde(default)]
    pub enforce_allowed_strengths: bool,

    /// Reject CNV scores outside a criterion's admissible range
    /// Default: false (a warning is logged instead)
    #[serde(default)]
    pub enforce_score_range: bool,

    /// Skip deprecated criteria (PP5, BP6) when ingesting predictor output
    /// Default: true
    #[serde(default = "default_true")]
    pub skip_deprecated_criteria: bool,

    /// Round the CNV point total before applying thresholds, absorbing
    /// floating-point noise such as `0.3 + 0.3 + 0.3`
    /// Default: true
    #[serde(default = "default_true")]
    pub round_cnv_total: bool,

    /// Decimal places kept when rounding the CNV total
    /// Default: 9. Values below 6 are rejected: thresholds sit at
    /// hundredths and coarser rounding changes labels near them.
    #[serde(default = "default_cnv_total_decimals")]
    pub cnv_total_decimals: u32,
}

fn default_true() -> bool {
    true
}

fn default_cnv_total_decimals() -> u32 {
    9
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enforce_allowed_strengths: false,
            enforce_score_range: false,
            skip_deprecated_criteria: true,
            round_cnv_total: true,
            cnv_total_decimals: 9,
        }
    }
}

impl EngineConfig {
    /// Strict configuration: catalog metadata is enforced on every write
    pub fn strict() -> Self {
        Self {
            enforce_allowed_strengths: true,
            enforce_score_range: true,
            ..Self::default()
        }
    }

    /// Lenient configuration: deprecated criteria are ingested and the CNV
    /// total is used unrounded
    pub fn lenient() -> Self {
        Self {
            enforce_allowed_strengths: false,
            enforce_score_range: false,
            skip_deprecated_criteria: false,
            round_cnv_total: false,
            cnv_total_decimals: 9,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(6..=12).contains(&self.cnv_total_decimals) {
            return Err(EngineError::Config(format!(
                "cnv_total_decimals must be between 6 and 12, got {}",
                self.cnv_total_decimals
            )));
        }
        Ok(())
    }

    /// Parse and validate a configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(contents)
            .map_err(|e| EngineError::Config(format!("Failed to parse engine config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            EngineError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Round a CNV total according to this configuration
    pub fn round_total(&self, total: f64) -> f64 {
        if !self.round_cnv_total {
            return total;
        }
        let factor = 10f64.powi(self.cnv_total_decimals as i32);
        (total * factor).round() / factor
    }
}
