//! ClinGen SVI copy-number variant criteria and their catalogs
//!
//! Copy-number losses and gains are scored against two distinct closed
//! criterion sets. Points follow the 2020 ACMG/ClinGen technical standards
//! (Riggs et al.): each criterion has suggested points and an admissible
//! range, and the classification is a threshold on the summed points.
//!
//! Every criterion is seeded with a default score of 0 ("does not
//! contribute"); a curator or the AutoCNV predictor assigns points.

use crate::traits::{criterion_codec, Assessment, Criterion};
use crate::variant::CnvKind;
use serde::{Deserialize, Serialize};

/// Static definition of one CNV criterion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CnvCriterionDef<C: 'static> {
    /// The criterion this entry describes
    pub criterion: C,

    /// Guideline section (1-5)
    pub section: u8,

    /// Catalog code (e.g. `2D-3`)
    pub code: &'static str,

    /// Guideline wording
    pub description: &'static str,

    /// Score seeded into the `Default` source
    pub default_score: f64,

    /// Points suggested when the evidence applies
    pub suggested_score: f64,

    /// Lowest admissible score
    pub min_score: f64,

    /// Highest admissible score
    pub max_score: f64,
}

impl<C> CnvCriterionDef<C> {
    /// Whether `score` lies within the admissible range
    ///
    /// Zero ("criterion does not apply") is admissible for every criterion.
    pub fn admits(&self, score: f64) -> bool {
        score == 0.0 || (score >= self.min_score && score <= self.max_score)
    }
}

/// A criterion of either CNV catalog
pub trait CnvCriterion: Criterion<Assessment = CnvAssessment> {
    /// Loss or gain
    const KIND: CnvKind;

    /// Catalog entry for this criterion
    fn definition(&self) -> &'static CnvCriterionDef<Self>;
}

/// One source's score for a CNV criterion (`None` = no opinion)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CnvAssessment {
    /// Points assigned to the criterion
    pub score: Option<f64>,
}

impl CnvAssessment {
    /// An assessment holding `score`
    pub fn scored(score: f64) -> Self {
        Self { score: Some(score) }
    }

    /// Score, treating "no opinion" as contributing nothing
    pub fn points(&self) -> f64 {
        self.score.unwrap_or(0.0)
    }
}

impl Assessment for CnvAssessment {
    fn unset() -> Self {
        Self { score: None }
    }

    fn overlay(&mut self, other: &Self) {
        if other.score.is_some() {
            self.score = other.score;
        }
    }
}

const fn cnv<C>(
    criterion: C,
    section: u8,
    code: &'static str,
    suggested_score: f64,
    min_score: f64,
    max_score: f64,
    description: &'static str,
) -> CnvCriterionDef<C> {
    CnvCriterionDef {
        criterion,
        section,
        code,
        description,
        default_score: 0.0,
        suggested_score,
        min_score,
        max_score,
    }
}

/// Match a CNV code against a catalog code, accepting an optional
/// `Loss`/`Gain` prefix and ignoring separators (`Loss2D-3`, `2d3`).
fn code_matches(input: &str, prefix: &str, code: &str) -> bool {
    let mut input = input.trim();
    if let Some(head) = input.get(..prefix.len()) {
        if head.eq_ignore_ascii_case(prefix) {
            input = &input[prefix.len()..];
        }
    }
    let squash = |s: &str| -> String {
        s.chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_uppercase())
            .collect()
    };
    let input = squash(input);
    !input.is_empty() && input == squash(code)
}

/// A copy-number loss (deletion) criterion
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CnvLossCriterion {
    Loss1A,
    Loss1B,
    Loss2A,
    Loss2B,
    Loss2C1,
    Loss2C2,
    Loss2D1,
    Loss2D2,
    Loss2D3,
    Loss2D4,
    Loss2E,
    Loss2F,
    Loss2G,
    Loss2H,
    Loss3A,
    Loss3B,
    Loss3C,
    Loss4A,
    Loss4B,
    Loss4C,
    Loss4D,
    Loss4E,
    Loss4F,
    Loss4G,
    Loss4H,
    Loss4I,
    Loss4J,
    Loss4K,
    Loss4L,
    Loss4M,
    Loss4N,
    Loss4O,
    Loss5A,
    Loss5B,
    Loss5C,
    Loss5D,
    Loss5E,
    Loss5F,
    Loss5G,
    Loss5H,
}

const LOSS_ALL: [CnvLossCriterion; 40] = [
    CnvLossCriterion::Loss1A,
    CnvLossCriterion::Loss1B,
    CnvLossCriterion::Loss2A,
    CnvLossCriterion::Loss2B,
    CnvLossCriterion::Loss2C1,
    CnvLossCriterion::Loss2C2,
    CnvLossCriterion::Loss2D1,
    CnvLossCriterion::Loss2D2,
    CnvLossCriterion::Loss2D3,
    CnvLossCriterion::Loss2D4,
    CnvLossCriterion::Loss2E,
    CnvLossCriterion::Loss2F,
    CnvLossCriterion::Loss2G,
    CnvLossCriterion::Loss2H,
    CnvLossCriterion::Loss3A,
    CnvLossCriterion::Loss3B,
    CnvLossCriterion::Loss3C,
    CnvLossCriterion::Loss4A,
    CnvLossCriterion::Loss4B,
    CnvLossCriterion::Loss4C,
    CnvLossCriterion::Loss4D,
    CnvLossCriterion::Loss4E,
    CnvLossCriterion::Loss4F,
    CnvLossCriterion::Loss4G,
    CnvLossCriterion::Loss4H,
    CnvLossCriterion::Loss4I,
    CnvLossCriterion::Loss4J,
    CnvLossCriterion::Loss4K,
    CnvLossCriterion::Loss4L,
    CnvLossCriterion::Loss4M,
    CnvLossCriterion::Loss4N,
    CnvLossCriterion::Loss4O,
    CnvLossCriterion::Loss5A,
    CnvLossCriterion::Loss5B,
    CnvLossCriterion::Loss5C,
    CnvLossCriterion::Loss5D,
    CnvLossCriterion::Loss5E,
    CnvLossCriterion::Loss5F,
    CnvLossCriterion::Loss5G,
    CnvLossCriterion::Loss5H,
];

/// The copy-number loss catalog, in enum order
pub static CNV_LOSS_CATALOG: [CnvCriterionDef<CnvLossCriterion>; 40] = [
    cnv(CnvLossCriterion::Loss1A, 1, "1A", 0.00, 0.00, 0.00,
        "Contains protein-coding or other known functionally important elements"),
    cnv(CnvLossCriterion::Loss1B, 1, "1B", -0.60, -0.60, -0.60,
        "Does not contain protein-coding or any known functionally important elements"),
    cnv(CnvLossCriterion::Loss2A, 2, "2A", 1.00, 1.00, 1.00,
        "Complete overlap of an established haploinsufficient gene or genomic region"),
    cnv(CnvLossCriterion::Loss2B, 2, "2B", 0.00, 0.00, 0.00,
        "Partial overlap of an established haploinsufficient genomic region"),
    cnv(CnvLossCriterion::Loss2C1, 2, "2C-1", 0.90, 0.45, 1.00,
        "Partial overlap with the 5' end of an established HI gene (3' end not involved), coding sequence involved"),
    cnv(CnvLossCriterion::Loss2C2, 2, "2C-2", 0.00, 0.00, 0.45,
        "Partial overlap with the 5' end of an established HI gene (3' end not involved), only the 5' UTR involved"),
    cnv(CnvLossCriterion::Loss2D1, 2, "2D-1", 0.00, 0.00, 0.00,
        "Partial overlap with the 3' end of an established HI gene (5' end not involved), only the 3' UTR involved"),
    cnv(CnvLossCriterion::Loss2D2, 2, "2D-2", 0.90, 0.45, 0.90,
        "Partial overlap with the 3' end of an established HI gene, only the last exon involved and other established pathogenic variants reported in this exon"),
    cnv(CnvLossCriterion::Loss2D3, 2, "2D-3", 0.30, 0.00, 0.45,
        "Partial overlap with the 3' end of an established HI gene, only the last exon involved and no other established pathogenic variants reported in this exon"),
    cnv(CnvLossCriterion::Loss2D4, 2, "2D-4", 0.90, 0.45, 1.00,
        "Partial overlap with the 3' end of an established HI gene, at least one exon in addition to the last exon involved and nonsense-mediated decay expected"),
    cnv(CnvLossCriterion::Loss2E, 2, "2E", 0.00, 0.00, 0.90,
        "Both breakpoints are within the same gene (intragenic CNV, gene-level sequence variant)"),
    cnv(CnvLossCriterion::Loss2F, 2, "2F", -1.00, -1.00, -1.00,
        "Completely contained within an established benign CNV region"),
    cnv(CnvLossCriterion::Loss2G, 2, "2G", 0.00, 0.00, 0.00,
        "Overlaps an established benign CNV, but includes additional genomic material"),
    cnv(CnvLossCriterion::Loss2H, 2, "2H", 0.15, 0.15, 0.15,
        "Two or more haploinsufficiency predictors suggest that at least one gene in the interval is haploinsufficient"),
    cnv(CnvLossCriterion::Loss3A, 3, "3A", 0.00, 0.00, 0.00,
        "0-24 protein-coding genes wholly or partially included"),
    cnv(CnvLossCriterion::Loss3B, 3, "3B", 0.45, 0.45, 0.45,
        "25-34 protein-coding genes wholly or partially included"),
    cnv(CnvLossCriterion::Loss3C, 3, "3C", 0.90, 0.90, 0.90,
        "35 or more protein-coding genes wholly or partially included"),
    cnv(CnvLossCriterion::Loss4A, 4, "4A", 0.45, 0.00, 0.90,
        "Reported proband has a complete deletion of, or a loss-of-function variant within, a gene encompassed by the observed loss (or an overlapping loss similar in genomic content), and the phenotype is highly specific and relatively unique to the gene or region"),
    cnv(CnvLossCriterion::Loss4B, 4, "4B", 0.30, 0.00, 0.90,
        "Reported proband with a deletion or loss-of-function variant as in 4A, phenotype consistent with the gene or region, highly specific but not necessarily unique"),
    cnv(CnvLossCriterion::Loss4C, 4, "4C", 0.15, 0.00, 0.90,
        "Reported proband with a deletion or loss-of-function variant as in 4A, phenotype consistent with the gene or region but not highly specific and/or with high genetic heterogeneity"),
    cnv(CnvLossCriterion::Loss4D, 4, "4D", 0.00, -0.30, 0.00,
        "Reported proband phenotype is not consistent with what is expected for the gene or region, or not consistent in general"),
    cnv(CnvLossCriterion::Loss4E, 4, "4E", 0.10, 0.00, 0.90,
        "Reported proband has a highly specific phenotype consistent with the gene or region, but the inheritance of the variant is unknown"),
    cnv(CnvLossCriterion::Loss4F, 4, "4F", 0.15, 0.15, 0.15,
        "3-4 observed segregations"),
    cnv(CnvLossCriterion::Loss4G, 4, "4G", 0.30, 0.30, 0.30,
        "5-6 observed segregations"),
    cnv(CnvLossCriterion::Loss4H, 4, "4H", 0.45, 0.45, 0.45,
        "7 or more observed segregations"),
    cnv(CnvLossCriterion::Loss4I, 4, "4I", -0.45, -0.90, 0.00,
        "Variant is not found in another individual in the proband's family affected with a consistent, specific, well-defined phenotype (no known phenocopies)"),
    cnv(CnvLossCriterion::Loss4J, 4, "4J", -0.30, -0.90, 0.00,
        "Variant is found in another individual in the proband's family unaffected with the specific, well-defined phenotype observed in the proband"),
    cnv(CnvLossCriterion::Loss4K, 4, "4K", -0.15, -0.30, 0.00,
        "Variant is found in another individual in the proband's family unaffected with the non-specific phenotype observed in the proband"),
    cnv(CnvLossCriterion::Loss4L, 4, "4L", 0.45, 0.00, 0.45,
        "Statistically significant increase amongst observations in cases (with a consistent, specific, well-defined phenotype) compared to controls"),
    cnv(CnvLossCriterion::Loss4M, 4, "4M", 0.30, 0.00, 0.45,
        "Statistically significant increase amongst observations in cases (without a consistent, specific, well-defined phenotype) compared to controls"),
    cnv(CnvLossCriterion::Loss4N, 4, "4N", -0.90, -0.90, 0.00,
        "No statistically significant difference between observations in cases and controls"),
    cnv(CnvLossCriterion::Loss4O, 4, "4O", -1.00, -1.00, 0.00,
        "Overlap with common population variation"),
    cnv(CnvLossCriterion::Loss5A, 5, "5A", 0.00, 0.00, 0.45,
        "De novo in the patient; use the de novo scoring categories from section 4"),
    cnv(CnvLossCriterion::Loss5B, 5, "5B", -0.30, -0.45, 0.00,
        "Patient-specific CNV inherited from an unaffected parent, patient phenotype specific and well-defined"),
    cnv(CnvLossCriterion::Loss5C, 5, "5C", -0.15, -0.30, 0.00,
        "Patient-specific CNV inherited from an unaffected parent, patient phenotype nonspecific"),
    cnv(CnvLossCriterion::Loss5D, 5, "5D", 0.00, 0.00, 0.45,
        "CNV segregates with a consistent phenotype observed in the patient's family; use the segregation scoring from section 4"),
    cnv(CnvLossCriterion::Loss5E, 5, "5E", 0.00, -0.45, 0.00,
        "CNV does not segregate; use the non-segregation scoring from section 4"),
    cnv(CnvLossCriterion::Loss5F, 5, "5F", 0.00, 0.00, 0.00,
        "Inheritance information is unavailable or uninformative"),
    cnv(CnvLossCriterion::Loss5G, 5, "5G", 0.10, 0.00, 0.15,
        "Inheritance information is unavailable or uninformative; patient phenotype nonspecific but consistent with similar cases"),
    cnv(CnvLossCriterion::Loss5H, 5, "5H", 0.30, 0.00, 0.30,
        "Inheritance information is unavailable or uninformative; patient phenotype highly specific and consistent with similar cases"),
];

impl Criterion for CnvLossCriterion {
    type Assessment = CnvAssessment;

    const FAMILY: &'static str = "CNV loss";

    fn all() -> &'static [Self] {
        &LOSS_ALL
    }

    fn code(&self) -> &'static str {
        CnvCriterion::definition(self).code
    }

    fn from_code(code: &str) -> Option<Self> {
        LOSS_ALL
            .iter()
            .copied()
            .find(|c| code_matches(code, "loss", c.code()))
    }

    fn default_assessment(&self) -> CnvAssessment {
        CnvAssessment::scored(CnvCriterion::definition(self).default_score)
    }
}

impl CnvCriterion for CnvLossCriterion {
    const KIND: CnvKind = CnvKind::Loss;

    fn definition(&self) -> &'static CnvCriterionDef<Self> {
        &CNV_LOSS_CATALOG[*self as usize]
    }
}

criterion_codec!(CnvLossCriterion);

/// A copy-number gain (duplication) criterion
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CnvGainCriterion {
    Gain1A,
    Gain1B,
    Gain2A,
    Gain2B,
    Gain2C,
    Gain2D,
    Gain2E,
    Gain2F,
    Gain2G,
    Gain2H,
    Gain2I,
    Gain2J,
    Gain2K,
    Gain2L,
    Gain3A,
    Gain3B,
    Gain3C,
    Gain4A,
    Gain4B,
    Gain4C,
    Gain4D,
    Gain4E,
    Gain4F,
    Gain4G,
    Gain4H,
    Gain4I,
    Gain4J,
    Gain4K,
    Gain4L,
    Gain4M,
    Gain4N,
    Gain4O,
    Gain5A,
    Gain5B,
    Gain5C,
    Gain5D,
    Gain5E,
    Gain5F,
    Gain5G,
    Gain5H,
}

const GAIN_ALL: [CnvGainCriterion; 40] = [
    CnvGainCriterion::Gain1A,
    CnvGainCriterion::Gain1B,
    CnvGainCriterion::Gain2A,
    CnvGainCriterion::Gain2B,
    CnvGainCriterion::Gain2C,
    CnvGainCriterion::Gain2D,
    CnvGainCriterion::Gain2E,
    CnvGainCriterion::Gain2F,
    CnvGainCriterion::Gain2G,
    CnvGainCriterion::Gain2H,
    CnvGainCriterion::Gain2I,
    CnvGainCriterion::Gain2J,
    CnvGainCriterion::Gain2K,
    CnvGainCriterion::Gain2L,
    CnvGainCriterion::Gain3A,
    CnvGainCriterion::Gain3B,
    CnvGainCriterion::Gain3C,
    CnvGainCriterion::Gain4A,
    CnvGainCriterion::Gain4B,
    CnvGainCriterion::Gain4C,
    CnvGainCriterion::Gain4D,
    CnvGainCriterion::Gain4E,
    CnvGainCriterion::Gain4F,
    CnvGainCriterion::Gain4G,
    CnvGainCriterion::Gain4H,
    CnvGainCriterion::Gain4I,
    CnvGainCriterion::Gain4J,
    CnvGainCriterion::Gain4K,
    CnvGainCriterion::Gain4L,
    CnvGainCriterion::Gain4M,
    CnvGainCriterion::Gain4N,
    CnvGainCriterion::Gain4O,
    CnvGainCriterion::Gain5A,
    CnvGainCriterion::Gain5B,
    CnvGainCriterion::Gain5C,
    CnvGainCriterion::Gain5D,
    CnvGainCriterion::Gain5E,
    CnvGainCriterion::Gain5F,
    CnvGainCriterion::Gain5G,
    CnvGainCriterion::Gain5H,
];

/// The copy-number gain catalog, in enum order
pub static CNV_GAIN_CATALOG: [CnvCriterionDef<CnvGainCriterion>; 40] = [
    cnv(CnvGainCriterion::Gain1A, 1, "1A", 0.00, 0.00, 0.00,
        "Contains protein-coding or other known functionally important elements"),
    cnv(CnvGainCriterion::Gain1B, 1, "1B", -0.60, -0.60, -0.60,
        "Does not contain protein-coding or any known functionally important elements"),
    cnv(CnvGainCriterion::Gain2A, 2, "2A", 1.00, 1.00, 1.00,
        "Complete overlap; the triplosensitive gene or minimal critical region is fully contained within the observed gain"),
    cnv(CnvGainCriterion::Gain2B, 2, "2B", 0.00, 0.00, 0.00,
        "Partial overlap of an established triplosensitive region"),
    cnv(CnvGainCriterion::Gain2C, 2, "2C", -1.00, -1.00, -1.00,
        "Identical in gene content to an established benign copy-number gain"),
    cnv(CnvGainCriterion::Gain2D, 2, "2D", -1.00, -1.00, -1.00,
        "Smaller than an established benign copy-number gain, breakpoints do not interrupt protein-coding genes"),
    cnv(CnvGainCriterion::Gain2E, 2, "2E", 0.00, 0.00, 0.00,
        "Smaller than an established benign copy-number gain, breakpoints potentially interrupt a protein-coding gene"),
    cnv(CnvGainCriterion::Gain2F, 2, "2F", -0.90, -1.00, 0.00,
        "Larger than a known benign copy-number gain, no additional protein-coding genes included"),
    cnv(CnvGainCriterion::Gain2G, 2, "2G", 0.00, 0.00, 0.00,
        "Overlaps a benign copy-number gain but includes additional genomic material"),
    cnv(CnvGainCriterion::Gain2H, 2, "2H", 0.00, 0.00, 0.00,
        "Haploinsufficient gene fully contained within the observed gain"),
    cnv(CnvGainCriterion::Gain2I, 2, "2I", 0.00, 0.00, 0.90,
        "Both breakpoints are within the same gene (gene-level sequence variant, possibly resulting in loss of function)"),
    cnv(CnvGainCriterion::Gain2J, 2, "2J", 0.00, 0.00, 0.00,
        "One breakpoint within an established HI gene, patient phenotype inconsistent with loss of function of that gene or unknown"),
    cnv(CnvGainCriterion::Gain2K, 2, "2K", 0.45, 0.45, 0.45,
        "One breakpoint within an established HI gene, patient phenotype highly specific and consistent with loss of function of that gene"),
    cnv(CnvGainCriterion::Gain2L, 2, "2L", 0.00, 0.00, 0.00,
        "One or both breakpoints within genes of no established clinical significance"),
    cnv(CnvGainCriterion::Gain3A, 3, "3A", 0.00, 0.00, 0.00,
        "0-34 protein-coding genes wholly or partially included"),
    cnv(CnvGainCriterion::Gain3B, 3, "3B", 0.45, 0.45, 0.45,
        "35-49 protein-coding genes wholly or partially included"),
    cnv(CnvGainCriterion::Gain3C, 3, "3C", 0.90, 0.90, 0.90,
        "50 or more protein-coding genes wholly or partially included"),
    cnv(CnvGainCriterion::Gain4A, 4, "4A", 0.45, 0.00, 0.90,
        "Reported proband has a complete duplication of one or more genes within the observed gain (or an overlapping gain similar in genomic content), and the phenotype is highly specific and relatively unique to the gene or region"),
    cnv(CnvGainCriterion::Gain4B, 4, "4B", 0.30, 0.00, 0.90,
        "Reported proband with a duplication as in 4A, phenotype consistent with the gene or region, highly specific but not necessarily unique"),
    cnv(CnvGainCriterion::Gain4C, 4, "4C", 0.15, 0.00, 0.90,
        "Reported proband with a duplication as in 4A, phenotype consistent with the gene or region but not highly specific and/or with high genetic heterogeneity"),
    cnv(CnvGainCriterion::Gain4D, 4, "4D", 0.00, -0.30, 0.00,
        "Reported proband phenotype is not consistent with what is expected for the gene or region, or not consistent in general"),
    cnv(CnvGainCriterion::Gain4E, 4, "4E", 0.10, 0.00, 0.90,
        "Reported proband has a highly specific phenotype consistent with the gene or region, but the inheritance of the variant is unknown"),
    cnv(CnvGainCriterion::Gain4F, 4, "4F", 0.15, 0.15, 0.15,
        "3-4 observed segregations"),
    cnv(CnvGainCriterion::Gain4G, 4, "4G", 0.30, 0.30, 0.30,
        "5-6 observed segregations"),
    cnv(CnvGainCriterion::Gain4H, 4, "4H", 0.45, 0.45, 0.45,
        "7 or more observed segregations"),
    cnv(CnvGainCriterion::Gain4I, 4, "4I", -0.45, -0.90, 0.00,
        "Variant is not found in another individual in the proband's family affected with a consistent, specific, well-defined phenotype (no known phenocopies)"),
    cnv(CnvGainCriterion::Gain4J, 4, "4J", -0.30, -0.90, 0.00,
        "Variant is found in another individual in the proband's family unaffected with the specific, well-defined phenotype observed in the proband"),
    cnv(CnvGainCriterion::Gain4K, 4, "4K", -0.15, -0.30, 0.00,
        "Variant is found in another individual in the proband's family unaffected with the non-specific phenotype observed in the proband"),
    cnv(CnvGainCriterion::Gain4L, 4, "4L", 0.45, 0.00, 0.45,
        "Statistically significant increase amongst observations in cases (with a consistent, specific, well-defined phenotype) compared to controls"),
    cnv(CnvGainCriterion::Gain4M, 4, "4M", 0.30, 0.00, 0.45,
        "Statistically significant increase amongst observations in cases (without a consistent, specific, well-defined phenotype) compared to controls"),
    cnv(CnvGainCriterion::Gain4N, 4, "4N", -0.90, -0.90, 0.00,
        "No statistically significant difference between observations in cases and controls"),
    cnv(CnvGainCriterion::Gain4O, 4, "4O", -1.00, -1.00, 0.00,
        "Overlap with common population variation"),
    cnv(CnvGainCriterion::Gain5A, 5, "5A", 0.00, 0.00, 0.45,
        "De novo in the patient; use the de novo scoring categories from section 4"),
    cnv(CnvGainCriterion::Gain5B, 5, "5B", -0.30, -0.45, 0.00,
        "Patient-specific CNV inherited from an unaffected parent, patient phenotype specific and well-defined"),
    cnv(CnvGainCriterion::Gain5C, 5, "5C", -0.15, -0.30, 0.00,
        "Patient-specific CNV inherited from an unaffected parent, patient phenotype nonspecific"),
    cnv(CnvGainCriterion::Gain5D, 5, "5D", 0.00, 0.00, 0.45,
        "CNV segregates with a consistent phenotype observed in the patient's family; use the segregation scoring from section 4"),
    cnv(CnvGainCriterion::Gain5E, 5, "5E", 0.00, -0.45, 0.00,
        "CNV does not segregate; use the non-segregation scoring from section 4"),
    cnv(CnvGainCriterion::Gain5F, 5, "5F", 0.00, 0.00, 0.00,
        "Inheritance information is unavailable or uninformative"),
    cnv(CnvGainCriterion::Gain5G, 5, "5G", 0.10, 0.00, 0.15,
        "Inheritance information is unavailable or uninformative; patient phenotype nonspecific but consistent with similar cases"),
    cnv(CnvGainCriterion::Gain5H, 5, "5H", 0.30, 0.00, 0.30,
        "Inheritance information is unavailable or uninformative; patient phenotype highly specific and consistent with similar cases"),
];

impl Criterion for CnvGainCriterion {
    type Assessment = CnvAssessment;

    const FAMILY: &'static str = "CNV gain";

    fn all() -> &'static [Self] {
        &GAIN_ALL
    }

    fn code(&self) -> &'static str {
        CnvCriterion::definition(self).code
    }

    fn from_code(code: &str) -> Option<Self> {
        GAIN_ALL
            .iter()
            .copied()
            .find(|c| code_matches(code, "gain", c.code()))
    }

    fn default_assessment(&self) -> CnvAssessment {
        CnvAssessment::scored(CnvCriterion::definition(self).default_score)
    }
}

impl CnvCriterion for CnvGainCriterion {
    const KIND: CnvKind = CnvKind::Gain;

    fn definition(&self) -> &'static CnvCriterionDef<Self> {
        &CNV_GAIN_CATALOG[*self as usize]
    }
}

criterion_codec!(CnvGainCriterion);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogs_match_enum_order() {
        for (idx, criterion) in CnvLossCriterion::all().iter().enumerate() {
            assert_eq!(CNV_LOSS_CATALOG[idx].criterion, *criterion);
        }
        for (idx, criterion) in CnvGainCriterion::all().iter().enumerate() {
            assert_eq!(CNV_GAIN_CATALOG[idx].criterion, *criterion);
        }
    }

    #[test]
    fn test_code_lookup_with_prefix() {
        assert_eq!(CnvLossCriterion::from_code("2D-3"), Some(CnvLossCriterion::Loss2D3));
        assert_eq!(CnvLossCriterion::from_code("Loss2D-3"), Some(CnvLossCriterion::Loss2D3));
        assert_eq!(CnvLossCriterion::from_code("loss_2d3"), Some(CnvLossCriterion::Loss2D3));
        assert_eq!(CnvLossCriterion::from_code("Gain2A"), None);
        assert_eq!(CnvGainCriterion::from_code("Gain2K"), Some(CnvGainCriterion::Gain2K));
        assert_eq!(CnvGainCriterion::from_code("2D-3"), None);
        assert_eq!(CnvGainCriterion::from_code(""), None);
    }

    #[test]
    fn test_ranges_are_consistent() {
        for def in CNV_LOSS_CATALOG.iter() {
            assert!(def.min_score <= def.max_score, "{}", def.code);
            assert!(def.admits(def.suggested_score), "{}", def.code);
            assert_eq!(def.default_score, 0.0);
        }
        for def in CNV_GAIN_CATALOG.iter() {
            assert!(def.min_score <= def.max_score, "{}", def.code);
            assert!(def.admits(def.suggested_score), "{}", def.code);
            assert_eq!(def.default_score, 0.0);
        }
    }

    #[test]
    fn test_sections() {
        assert_eq!(CnvLossCriterion::Loss2D3.definition().section, 2);
        assert_eq!(CnvGainCriterion::Gain5H.definition().section, 5);
        assert_eq!(CnvLossCriterion::Loss4O.definition().suggested_score, -1.0);
    }

    #[test]
    fn test_overlay_keeps_lower_score_when_unset() {
        let mut state = CnvAssessment::scored(0.0);
        state.overlay(&CnvAssessment::unset());
        assert_eq!(state.score, Some(0.0));
        state.overlay(&CnvAssessment::scored(0.45));
        assert_eq!(state.points(), 0.45);
    }

    #[test]
    fn test_serde_uses_code() {
        let json = serde_json::to_string(&CnvLossCriterion::Loss2C1).unwrap();
        assert_eq!(json, "\"2C-1\"");
    }
}
