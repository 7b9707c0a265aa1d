use std::collections::BTreeSet;
use std::fmt;

use gemlist_types::{CatalogKind, Facet, Family, Subtype};
use serde::{Deserialize, Serialize};

/// How multi-select facets travel to the listing API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListEncoding {
    /// `shape=Round,Oval`
    CommaJoined,
    /// `shape: {"in": ["Round", "Oval"]}`
    InSet,
}

/// How range facets travel to the listing API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeEncoding {
    /// `price: {"gte": 100, "lte": 900}`
    Operators,
    /// `priceMin=100&priceMax=900`
    Suffixed,
}

impl fmt::Display for ListEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ListEncoding::CommaJoined => "comma_joined",
            ListEncoding::InSet => "in_set",
        })
    }
}

impl fmt::Display for RangeEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RangeEncoding::Operators => "operators",
            RangeEncoding::Suffixed => "suffixed",
        })
    }
}

/// Per-facet API field names that differ from `Facet::as_str`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRemap {
    overrides: &'static [(Facet, &'static str)],
}

const NO_OVERRIDES: &[(Facet, &str)] = &[];

const MELEE_DIAMOND_OVERRIDES: &[(Facet, &str)] = &[
    (Facet::Color, "colorFrom"),
    (Facet::Clarity, "clarityFrom"),
    (Facet::ReportNumber, "lotNumber"),
];

const MELEE_GEMSTONE_OVERRIDES: &[(Facet, &str)] = &[
    (Facet::Color, "colorFrom"),
    (Facet::CaratWeight, "caratWeightPerPiece"),
];

impl FieldRemap {
    pub fn for_kind(kind: CatalogKind) -> Self {
        let overrides = match (kind.family(), kind.subtype()) {
            (Family::Diamonds, Subtype::Single) => NO_OVERRIDES,
            (Family::Diamonds, Subtype::Melee) => MELEE_DIAMOND_OVERRIDES,
            (Family::Gemstones, Subtype::Single) => NO_OVERRIDES,
            (Family::Gemstones, Subtype::Melee) => MELEE_GEMSTONE_OVERRIDES,
            (Family::Watches, _) => NO_OVERRIDES,
        };
        Self { overrides }
    }

    /// API field name of a facet: the override if any, else the facet's own name
    pub fn field_name(&self, facet: Facet) -> &'static str {
        self.overrides
            .iter()
            .find(|(f, _)| *f == facet)
            .map(|(_, name)| *name)
            .unwrap_or_else(|| facet.as_str())
    }

    pub fn overrides(&self) -> impl Iterator<Item = (Facet, &'static str)> + '_ {
        self.overrides.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

/// Wire conventions of one listing endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conventions {
    pub list_encoding: ListEncoding,
    pub range_encoding: RangeEncoding,
    /// Range facets whose two bounds are always sent together
    pub paired_ranges: BTreeSet<Facet>,
    pub page_key: String,
    pub limit_key: String,
    pub sort_key: String,
}

impl Conventions {
    /// Built-in conventions of a family's endpoint
    pub fn for_family(family: Family) -> Self {
        let (list_encoding, range_encoding, paired_ranges) = match family {
            Family::Diamonds => (ListEncoding::InSet, RangeEncoding::Operators, BTreeSet::new()),
            Family::Gemstones => (
                ListEncoding::CommaJoined,
                RangeEncoding::Suffixed,
                BTreeSet::new(),
            ),
            Family::Watches => (
                ListEncoding::CommaJoined,
                RangeEncoding::Suffixed,
                BTreeSet::from([Facet::Price]),
            ),
        };
        Self {
            list_encoding,
            range_encoding,
            paired_ranges,
            page_key: "page".to_string(),
            limit_key: "limit".to_string(),
            sort_key: "sort".to_string(),
        }
    }

    pub fn pairs_bounds(&self, facet: Facet) -> bool {
        self.paired_ranges.contains(&facet)
    }

    /// Keys that carry pagination and sorting rather than facets
    pub fn is_reserved(&self, key: &str) -> bool {
        key == self.page_key || key == self.limit_key || key == self.sort_key
    }
}

/// Everything the compiler needs to know about the target endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyContext {
    pub kind: CatalogKind,
    pub remap: FieldRemap,
    pub conventions: Conventions,
}

impl FamilyContext {
    pub fn for_kind(kind: CatalogKind) -> Self {
        Self {
            kind,
            remap: FieldRemap::for_kind(kind),
            conventions: Conventions::for_family(kind.family()),
        }
    }

    pub fn with_conventions(mut self, conventions: Conventions) -> Self {
        self.conventions = conventions;
        self
    }

    pub fn field_name(&self, facet: Facet) -> &'static str {
        self.remap.field_name(facet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_melee_diamonds_remap() {
        let remap = FieldRemap::for_kind(CatalogKind::MELEE_DIAMONDS);
        assert_eq!(remap.field_name(Facet::Color), "colorFrom");
        assert_eq!(remap.field_name(Facet::Clarity), "clarityFrom");
        assert_eq!(remap.field_name(Facet::ReportNumber), "lotNumber");
        assert_eq!(remap.field_name(Facet::Shape), "shape");
    }

    #[test]
    fn test_melee_gemstones_remap() {
        let remap = FieldRemap::for_kind(CatalogKind::MELEE_GEMSTONES);
        assert_eq!(remap.field_name(Facet::Color), "colorFrom");
        assert_eq!(remap.field_name(Facet::CaratWeight), "caratWeightPerPiece");
        assert_eq!(remap.field_name(Facet::Clarity), "clarity");
    }

    #[test]
    fn test_single_kinds_have_no_overrides() {
        for kind in [
            CatalogKind::SINGLE_DIAMONDS,
            CatalogKind::SINGLE_GEMSTONES,
            CatalogKind::WATCHES,
        ] {
            let remap = FieldRemap::for_kind(kind);
            assert!(remap.is_empty(), "{} should not remap", kind);
            for facet in Facet::ALL {
                assert_eq!(remap.field_name(facet), facet.as_str());
            }
        }
    }

    #[test]
    fn test_overridden_names_are_unique_per_kind() {
        for kind in CatalogKind::ALL {
            let remap = FieldRemap::for_kind(kind);
            let mut seen = BTreeSet::new();
            for facet in Facet::ALL {
                assert!(
                    seen.insert(remap.field_name(facet)),
                    "duplicate field name for {} in {}",
                    facet,
                    kind
                );
            }
        }
    }

    #[test]
    fn test_builtin_conventions() {
        let diamonds = Conventions::for_family(Family::Diamonds);
        assert_eq!(diamonds.list_encoding, ListEncoding::InSet);
        assert_eq!(diamonds.range_encoding, RangeEncoding::Operators);

        let watches = Conventions::for_family(Family::Watches);
        assert_eq!(watches.range_encoding, RangeEncoding::Suffixed);
        assert!(watches.pairs_bounds(Facet::Price));
        assert!(!watches.pairs_bounds(Facet::Year));
        assert!(watches.is_reserved("limit"));
    }
}
