//! Variant descriptors consumed from the (already normalized) variant layer

use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural variant type as reported by the variant layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SvType {
    /// Deletion
    Del,
    /// Duplication
    Dup,
    /// Inversion
    Inv,
    /// Insertion
    Ins,
    /// Breakend
    Bnd,
    /// Unspecified copy-number change
    Cnv,
}

impl SvType {
    /// Get the SV type as written in VCF (`DEL`, `DUP` ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            SvType::Del => "DEL",
            SvType::Dup => "DUP",
            SvType::Inv => "INV",
            SvType::Ins => "INS",
            SvType::Bnd => "BND",
            SvType::Cnv => "CNV",
        }
    }

    /// Parse an SV type (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "DEL" => Some(SvType::Del),
            "DUP" => Some(SvType::Dup),
            "INV" => Some(SvType::Inv),
            "INS" => Some(SvType::Ins),
            "BND" => Some(SvType::Bnd),
            "CNV" => Some(SvType::Cnv),
            _ => None,
        }
    }

    /// Which CNV catalog scores this SV type, if any
    pub fn cnv_kind(&self) -> Option<CnvKind> {
        match self {
            SvType::Del => Some(CnvKind::Loss),
            SvType::Dup => Some(CnvKind::Gain),
            _ => None,
        }
    }
}

impl fmt::Display for SvType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SvType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid SV type: {}", s))
    }
}

/// Direction of a copy-number change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CnvKind {
    /// Copy-number loss (deletion)
    Loss,
    /// Copy-number gain (duplication)
    Gain,
}

impl CnvKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            CnvKind::Loss => "Loss",
            CnvKind::Gain => "Gain",
        }
    }
}

impl fmt::Display for CnvKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
