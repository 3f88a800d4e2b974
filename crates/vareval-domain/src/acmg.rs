//! ACMG/AMP sequence-variant criteria and their catalog
//!
//! The catalog follows the 2015 ACMG/AMP guideline (Richards et al.) with the
//! ClinGen SVI annotations on strength modification. PP5 and BP6 remain in the
//! closed set so that older ratings can still be read, but are flagged as
//! deprecated ("no longer recommended").

use crate::evidence::{Category, EvidenceLevel, Presence};
use crate::traits::{criterion_codec, Assessment, Criterion};
use serde::{Deserialize, Serialize};

use EvidenceLevel::{
    BenignStandalone as BA, BenignStrong as BS, BenignSupporting as BP,
    PathogenicModerate as PM, PathogenicStrong as PS, PathogenicSupporting as PP,
    PathogenicVeryStrong as PVS,
};

/// A sequence-variant criterion
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AcmgCriterion {
    Pvs1,
    Ps1,
    Ps2,
    Ps3,
    Ps4,
    Pm1,
    Pm2,
    Pm3,
    Pm4,
    Pm5,
    Pm6,
    Pp1,
    Pp2,
    Pp3,
    Pp4,
    Pp5,
    Ba1,
    Bs1,
    Bs2,
    Bs3,
    Bs4,
    Bp1,
    Bp2,
    Bp3,
    Bp4,
    Bp5,
    Bp6,
    Bp7,
}

/// Static definition of one sequence-variant criterion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcmgCriterionDef {
    /// The criterion this entry describes
    pub criterion: AcmgCriterion,

    /// Catalog code (e.g. `PVS1`)
    pub code: &'static str,

    /// Pathogenic or benign
    pub category: Category,

    /// Strength applied when the criterion is present and nobody overrides it
    pub default_level: EvidenceLevel,

    /// Strengths the criterion may be modified to (advisory)
    pub allowed_levels: &'static [EvidenceLevel],

    /// Short title
    pub title: &'static str,

    /// Guideline wording
    pub description: &'static str,

    /// No longer recommended for use
    pub deprecated: bool,
}

impl AcmgCriterionDef {
    /// Whether `level` is within the allowed strengths (`NotSet` always is)
    pub fn allows(&self, level: EvidenceLevel) -> bool {
        level.is_not_set() || self.allowed_levels.contains(&level)
    }
}

const ALL: [AcmgCriterion; 28] = [
    AcmgCriterion::Pvs1,
    AcmgCriterion::Ps1,
    AcmgCriterion::Ps2,
    AcmgCriterion::Ps3,
    AcmgCriterion::Ps4,
    AcmgCriterion::Pm1,
    AcmgCriterion::Pm2,
    AcmgCriterion::Pm3,
    AcmgCriterion::Pm4,
    AcmgCriterion::Pm5,
    AcmgCriterion::Pm6,
    AcmgCriterion::Pp1,
    AcmgCriterion::Pp2,
    AcmgCriterion::Pp3,
    AcmgCriterion::Pp4,
    AcmgCriterion::Pp5,
    AcmgCriterion::Ba1,
    AcmgCriterion::Bs1,
    AcmgCriterion::Bs2,
    AcmgCriterion::Bs3,
    AcmgCriterion::Bs4,
    AcmgCriterion::Bp1,
    AcmgCriterion::Bp2,
    AcmgCriterion::Bp3,
    AcmgCriterion::Bp4,
    AcmgCriterion::Bp5,
    AcmgCriterion::Bp6,
    AcmgCriterion::Bp7,
];

const PATHOGENIC_ANY: &[EvidenceLevel] = &[PVS, PS, PM, PP];
const PATHOGENIC_UP_TO_STRONG: &[EvidenceLevel] = &[PS, PM, PP];
const BENIGN_STRONG_OR_SUPPORTING: &[EvidenceLevel] = &[BS, BP];

const fn def(
    criterion: AcmgCriterion,
    code: &'static str,
    category: Category,
    default_level: EvidenceLevel,
    allowed_levels: &'static [EvidenceLevel],
    title: &'static str,
    description: &'static str,
) -> AcmgCriterionDef {
    AcmgCriterionDef {
        criterion,
        code,
        category,
        default_level,
        allowed_levels,
        title,
        description,
        deprecated: false,
    }
}

const fn deprecated(mut d: AcmgCriterionDef) -> AcmgCriterionDef {
    d.deprecated = true;
    d
}

use Category::{Benign, Pathogenic};

/// The sequence-variant catalog, in enum order
pub static ACMG_CATALOG: [AcmgCriterionDef; 28] = [
    def(AcmgCriterion::Pvs1, "PVS1", Pathogenic, PVS, PATHOGENIC_ANY,
        "Null variant",
        "Null variant (nonsense, frameshift, canonical +/-1 or 2 splice sites, initiation codon, single or multiexon deletion) in a gene where loss of function is a known mechanism of disease"),
    def(AcmgCriterion::Ps1, "PS1", Pathogenic, PS, PATHOGENIC_UP_TO_STRONG,
        "Same amino acid change",
        "Same amino acid change as a previously established pathogenic variant regardless of nucleotide change"),
    def(AcmgCriterion::Ps2, "PS2", Pathogenic, PS, PATHOGENIC_ANY,
        "De novo (confirmed)",
        "De novo (both maternity and paternity confirmed) in a patient with the disease and no family history"),
    def(AcmgCriterion::Ps3, "PS3", Pathogenic, PS, PATHOGENIC_UP_TO_STRONG,
        "Functional studies (damaging)",
        "Well-established in vitro or in vivo functional studies supportive of a damaging effect on the gene or gene product"),
    def(AcmgCriterion::Ps4, "PS4", Pathogenic, PS, PATHOGENIC_UP_TO_STRONG,
        "Prevalence in affected individuals",
        "The prevalence of the variant in affected individuals is significantly increased compared with the prevalence in controls"),
    def(AcmgCriterion::Pm1, "PM1", Pathogenic, PM, PATHOGENIC_UP_TO_STRONG,
        "Hot spot or functional domain",
        "Located in a mutational hot spot and/or critical and well-established functional domain without benign variation"),
    def(AcmgCriterion::Pm2, "PM2", Pathogenic, PM, &[PM, PP],
        "Absent from controls",
        "Absent from controls (or at extremely low frequency if recessive) in population databases"),
    def(AcmgCriterion::Pm3, "PM3", Pathogenic, PM, PATHOGENIC_ANY,
        "In trans (recessive)",
        "For recessive disorders, detected in trans with a pathogenic variant"),
    def(AcmgCriterion::Pm4, "PM4", Pathogenic, PM, PATHOGENIC_UP_TO_STRONG,
        "Protein length change",
        "Protein length changes as a result of in-frame deletions/insertions in a nonrepeat region or stop-loss variants"),
    def(AcmgCriterion::Pm5, "PM5", Pathogenic, PM, PATHOGENIC_UP_TO_STRONG,
        "Novel missense at known residue",
        "Novel missense change at an amino acid residue where a different missense change determined to be pathogenic has been seen before"),
    def(AcmgCriterion::Pm6, "PM6", Pathogenic, PM, PATHOGENIC_ANY,
        "De novo (assumed)",
        "Assumed de novo, but without confirmation of paternity and maternity"),
    def(AcmgCriterion::Pp1, "PP1", Pathogenic, PP, PATHOGENIC_UP_TO_STRONG,
        "Cosegregation",
        "Cosegregation with disease in multiple affected family members in a gene definitively known to cause the disease"),
    def(AcmgCriterion::Pp2, "PP2", Pathogenic, PP, &[PP],
        "Missense in constrained gene",
        "Missense variant in a gene that has a low rate of benign missense variation and in which missense variants are a common mechanism of disease"),
    def(AcmgCriterion::Pp3, "PP3", Pathogenic, PP, PATHOGENIC_UP_TO_STRONG,
        "Computational evidence (deleterious)",
        "Multiple lines of computational evidence support a deleterious effect on the gene or gene product"),
    def(AcmgCriterion::Pp4, "PP4", Pathogenic, PP, PATHOGENIC_UP_TO_STRONG,
        "Specific phenotype",
        "Patient's phenotype or family history is highly specific for a disease with a single genetic etiology"),
    deprecated(def(AcmgCriterion::Pp5, "PP5", Pathogenic, PP, &[PP],
        "Reputable source (pathogenic)",
        "Reputable source recently reports variant as pathogenic, but the evidence is not available to the laboratory to perform an independent evaluation")),
    def(AcmgCriterion::Ba1, "BA1", Benign, BA, &[BA],
        "Allele frequency above 5%",
        "Allele frequency is >5% in population databases"),
    def(AcmgCriterion::Bs1, "BS1", Benign, BS, BENIGN_STRONG_OR_SUPPORTING,
        "Allele frequency too high",
        "Allele frequency is greater than expected for disorder"),
    def(AcmgCriterion::Bs2, "BS2", Benign, BS, BENIGN_STRONG_OR_SUPPORTING,
        "Observed in healthy adult",
        "Observed in a healthy adult individual for a recessive (homozygous), dominant (heterozygous), or X-linked (hemizygous) disorder, with full penetrance expected at an early age"),
    def(AcmgCriterion::Bs3, "BS3", Benign, BS, BENIGN_STRONG_OR_SUPPORTING,
        "Functional studies (no effect)",
        "Well-established in vitro or in vivo functional studies show no damaging effect on protein function or splicing"),
    def(AcmgCriterion::Bs4, "BS4", Benign, BS, BENIGN_STRONG_OR_SUPPORTING,
        "Lack of segregation",
        "Lack of segregation in affected members of a family"),
    def(AcmgCriterion::Bp1, "BP1", Benign, BP, &[BP],
        "Missense in truncation gene",
        "Missense variant in a gene for which primarily truncating variants are known to cause disease"),
    def(AcmgCriterion::Bp2, "BP2", Benign, BP, &[BP],
        "In trans or in cis",
        "Observed in trans with a pathogenic variant for a fully penetrant dominant gene/disorder or observed in cis with a pathogenic variant in any inheritance pattern"),
    def(AcmgCriterion::Bp3, "BP3", Benign, BP, &[BP],
        "In-frame indel in repeat",
        "In-frame deletions/insertions in a repetitive region without a known function"),
    def(AcmgCriterion::Bp4, "BP4", Benign, BP, BENIGN_STRONG_OR_SUPPORTING,
        "Computational evidence (benign)",
        "Multiple lines of computational evidence suggest no impact on gene or gene product"),
    def(AcmgCriterion::Bp5, "BP5", Benign, BP, &[BP],
        "Alternate molecular basis",
        "Variant found in a case with an alternate molecular basis for disease"),
    deprecated(def(AcmgCriterion::Bp6, "BP6", Benign, BP, &[BP],
        "Reputable source (benign)",
        "Reputable source recently reports variant as benign, but the evidence is not available to the laboratory to perform an independent evaluation")),
    def(AcmgCriterion::Bp7, "BP7", Benign, BP, BENIGN_STRONG_OR_SUPPORTING,
        "Synonymous without splice impact",
        "A synonymous variant for which splicing prediction algorithms predict no impact to the splice consensus sequence nor the creation of a new splice site AND the nucleotide is not highly conserved"),
];

impl AcmgCriterion {
    /// Catalog entry for this criterion
    pub fn definition(&self) -> &'static AcmgCriterionDef {
        &ACMG_CATALOG[*self as usize]
    }

    /// Pathogenic or benign
    pub fn category(&self) -> Category {
        self.definition().category
    }

    /// Criteria still recommended by the current guideline revision
    pub fn active() -> impl Iterator<Item = AcmgCriterion> {
        ALL.iter().copied().filter(|c| !c.is_deprecated())
    }
}

impl Criterion for AcmgCriterion {
    type Assessment = SeqvarAssessment;

    const FAMILY: &'static str = "ACMG";

    fn all() -> &'static [Self] {
        &ALL
    }

    fn code(&self) -> &'static str {
        self.definition().code
    }

    fn default_assessment(&self) -> SeqvarAssessment {
        SeqvarAssessment {
            presence: Presence::Absent,
            evidence_level: self.definition().default_level,
        }
    }

    fn is_deprecated(&self) -> bool {
        self.definition().deprecated
    }
}

criterion_codec!(AcmgCriterion);

/// One source's judgment about a sequence-variant criterion
///
/// Presence and strength are independent fields: a source may set either one
/// and leave the other at its sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeqvarAssessment {
    /// Whether the criterion applies
    pub presence: Presence,

    /// Strength at which it applies
    pub evidence_level: EvidenceLevel,
}

impl SeqvarAssessment {
    /// Create an assessment with both fields set
    pub fn new(presence: Presence, evidence_level: EvidenceLevel) -> Self {
        Self {
            presence,
            evidence_level,
        }
    }
}

impl Assessment for SeqvarAssessment {
    fn unset() -> Self {
        Self::new(Presence::Unknown, EvidenceLevel::NotSet)
    }

    fn overlay(&mut self, other: &Self) {
        if !other.presence.is_unknown() {
            self.presence = other.presence;
        }
        if !other.evidence_level.is_not_set() {
            self.evidence_level = other.evidence_level;
        }
    }
}
