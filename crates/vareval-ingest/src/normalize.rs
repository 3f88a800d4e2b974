//! Normalization of criterion ids as reported by predictors
//!
//! Predictors and older saved ratings do not agree on how to spell criterion
//! ids: `pm2`, `PM2_Supporting`, `Loss2C-1`, ` 2c-1 `. Everything is reduced to
//! the catalog code before lookup.

use vareval_domain::{Category, CnvKind, Criterion, EvidenceLevel};

/// A criterion id split into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedId {
    /// Uppercased code with prefix and strength suffix removed
    pub code: String,

    /// Catalog named by a `Loss`/`Gain` prefix
    pub kind: Option<CnvKind>,

    /// Strength annotation after the first `_`, as written
    pub strength: Option<String>,
}

/// Split a raw criterion id into code, CNV kind prefix and strength suffix
pub fn normalize_id(raw: &str) -> NormalizedId {
    let trimmed = raw.trim();
    let (head, strength) = match trimmed.split_once('_') {
        Some((head, tail)) if !tail.trim().is_empty() => (head, Some(tail.trim().to_string())),
        Some((head, _)) => (head, None),
        None => (trimmed, None),
    };

    let upper = head.trim().to_ascii_uppercase();
    let (code, kind) = if let Some(rest) = upper.strip_prefix("LOSS") {
        (rest.to_string(), Some(CnvKind::Loss))
    } else if let Some(rest) = upper.strip_prefix("GAIN") {
        (rest.to_string(), Some(CnvKind::Gain))
    } else {
        (upper, None)
    };

    NormalizedId {
        code: code.trim_matches(|c: char| c == '-' || c.is_whitespace()).to_string(),
        kind,
        strength,
    }
}

/// Look up a criterion by a raw predictor id
pub fn lookup<C: Criterion>(raw: &str) -> Option<C> {
    let id = normalize_id(raw);
    if id.code.is_empty() {
        return None;
    }
    C::from_code(&id.code)
}

/// Interpret a strength annotation for a criterion of `category`
///
/// Full level names (`PathogenicModerate`, `PM`) are taken as is. Bare
/// strengths (`Supporting`, `Strong`) are resolved against the criterion's
/// category.
pub fn resolve_strength(category: Category, raw: &str) -> Option<EvidenceLevel> {
    if let Some(level) = EvidenceLevel::parse(raw) {
        return Some(level);
    }
    let bare: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    match (category, bare.as_str()) {
        (Category::Pathogenic, "verystrong") => Some(EvidenceLevel::PathogenicVeryStrong),
        (Category::Pathogenic, "strong") => Some(EvidenceLevel::PathogenicStrong),
        (Category::Pathogenic, "moderate") => Some(EvidenceLevel::PathogenicModerate),
        (Category::Pathogenic, "supporting") => Some(EvidenceLevel::PathogenicSupporting),
        (Category::Benign, "standalone") => Some(EvidenceLevel::BenignStandalone),
        (Category::Benign, "strong") => Some(EvidenceLevel::BenignStrong),
        (Category::Benign, "supporting") => Some(EvidenceLevel::BenignSupporting),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vareval_domain::{AcmgCriterion, CnvGainCriterion, CnvLossCriterion};

    #[test]
    fn test_strength_suffix_is_split() {
        let id = normalize_id(" pm2_Supporting ");
        assert_eq!(id.code, "PM2");
        assert_eq!(id.kind, None);
        assert_eq!(id.strength.as_deref(), Some("Supporting"));
    }

    #[test]
    fn test_cnv_prefix_is_split() {
        let id = normalize_id("Loss2C-1");
        assert_eq!(id.code, "2C-1");
        assert_eq!(id.kind, Some(CnvKind::Loss));

        let id = normalize_id("gain-2K");
        assert_eq!(id.code, "2K");
        assert_eq!(id.kind, Some(CnvKind::Gain));
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup::<AcmgCriterion>("PVS1_Strong"), Some(AcmgCriterion::Pvs1));
        assert_eq!(lookup::<AcmgCriterion>("bp7"), Some(AcmgCriterion::Bp7));
        assert_eq!(lookup::<AcmgCriterion>("PX9"), None);
        assert_eq!(lookup::<AcmgCriterion>("_"), None);
        assert_eq!(lookup::<CnvLossCriterion>("Loss2D-3"), Some(CnvLossCriterion::Loss2D3));
        assert_eq!(lookup::<CnvGainCriterion>("2K"), Some(CnvGainCriterion::Gain2K));
        assert_eq!(lookup::<CnvLossCriterion>("2K"), None);
    }

    #[test]
    fn test_resolve_strength() {
        assert_eq!(
            resolve_strength(Category::Pathogenic, "Supporting"),
            Some(EvidenceLevel::PathogenicSupporting)
        );
        assert_eq!(
            resolve_strength(Category::Benign, "Supporting"),
            Some(EvidenceLevel::BenignSupporting)
        );
        assert_eq!(
            resolve_strength(Category::Benign, "PathogenicModerate"),
            Some(EvidenceLevel::PathogenicModerate)
        );
        assert_eq!(
            resolve_strength(Category::Pathogenic, "very_strong"),
            Some(EvidenceLevel::PathogenicVeryStrong)
        );
        assert_eq!(resolve_strength(Category::Pathogenic, "standalone"), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use vareval_domain::{AcmgCriterion, ACMG_CATALOG};

    proptest! {
        #[test]
        fn test_lookup_ignores_case_and_suffix(
            idx in 0..ACMG_CATALOG.len(),
            lower in any::<bool>(),
            suffix in proptest::option::of("[A-Za-z]{1,12}"),
        ) {
            let def = &ACMG_CATALOG[idx];
            let mut raw = if lower { def.code.to_lowercase() } else { def.code.to_string() };
            if let Some(suffix) = &suffix {
                raw = format!("{}_{}", raw, suffix);
            }
            prop_assert_eq!(lookup::<AcmgCriterion>(&raw), Some(def.criterion));
            prop_assert_eq!(normalize_id(&raw).strength, suffix);
        }
    }
}
