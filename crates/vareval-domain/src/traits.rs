//! Trait definitions shared by every criterion family
//!
//! These traits define the seams between the closed criterion catalogs in this
//! crate and the generic evidence table / resolver in `vareval-engine`. One
//! table implementation serves all three criterion families; what differs
//! between them is captured by the associated [`Assessment`] type.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::hash::Hash;

/// The judgment a single source holds about one criterion
///
/// Every field of an assessment has a sentinel meaning "this source has no
/// opinion". Resolution across sources overlays field by field, so a higher
/// priority source may override one field and leave the others to lower
/// priority sources.
pub trait Assessment: Clone + PartialEq + fmt::Debug + Serialize + DeserializeOwned {
    /// The all-sentinel assessment (no opinion on any field)
    fn unset() -> Self;

    /// Overwrite every field of `self` that `other` sets
    fn overlay(&mut self, other: &Self);

    /// Whether every field holds its sentinel
    fn is_unset(&self) -> bool {
        *self == Self::unset()
    }
}

/// A member of one closed criterion set (ACMG, CNV loss or CNV gain)
pub trait Criterion:
    Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + Serialize + DeserializeOwned + 'static
{
    /// Per-source judgment type for this criterion family
    type Assessment: Assessment;

    /// Short family name used in log output and error messages
    const FAMILY: &'static str;

    /// Every member of the set, in catalog order
    fn all() -> &'static [Self];

    /// Catalog code (e.g. `PVS1`, `2D-3`)
    fn code(&self) -> &'static str;

    /// Look up a member by its catalog code (case-insensitive)
    fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.code().eq_ignore_ascii_case(code))
    }

    /// Guideline default used to seed the `Default` source
    fn default_assessment(&self) -> Self::Assessment;

    /// Whether the guideline no longer recommends using this criterion
    fn is_deprecated(&self) -> bool {
        false
    }
}

/// An origin of judgments, ordered by override priority (ascending)
///
/// The derived `Ord` of implementors must match [`Source::ordered`].
pub trait Source:
    Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + Serialize + DeserializeOwned + 'static
{
    /// The guideline baseline; seeded once and never written by callers
    const DEFAULT: Self;

    /// Every source in ascending priority order
    fn ordered() -> &'static [Self];

    /// Display name of the source
    fn name(&self) -> &'static str;

    /// Whether this is the read-only baseline source
    fn is_default(&self) -> bool {
        *self == Self::DEFAULT
    }
}

// Display and serde for criterion enums go through the catalog code.
macro_rules! criterion_codec {
    ($ty:ty) => {
        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::traits::Criterion::code(self))
            }
        }

        impl ::serde::Serialize for $ty {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str($crate::traits::Criterion::code(self))
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $ty {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let code = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                <$ty as $crate::traits::Criterion>::from_code(&code).ok_or_else(|| {
                    <D::Error as ::serde::de::Error>::custom(format!(
                        "unknown {} criterion: {}",
                        <$ty as $crate::traits::Criterion>::FAMILY,
                        code
                    ))
                })
            }
        }
    };
}

pub(crate) use criterion_codec;
