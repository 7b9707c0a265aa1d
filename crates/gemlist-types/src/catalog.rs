use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Product family listed by the marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Diamonds,
    Gemstones,
    Watches,
}

impl Family {
    pub const ALL: [Family; 3] = [Family::Diamonds, Family::Gemstones, Family::Watches];

    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Diamonds => "diamonds",
            Family::Gemstones => "gemstones",
            Family::Watches => "watches",
        }
    }

    /// Subtypes this family is sold as
    pub fn subtypes(&self) -> &'static [Subtype] {
        match self {
            Family::Diamonds | Family::Gemstones => &[Subtype::Single, Subtype::Melee],
            Family::Watches => &[Subtype::Single],
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Family {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "diamonds" | "diamond" => Ok(Family::Diamonds),
            "gemstones" | "gemstone" | "gems" => Ok(Family::Gemstones),
            "watches" | "watch" => Ok(Family::Watches),
            other => Err(Error::Parse(format!("unknown family '{}'", other))),
        }
    }
}

/// How stones of a family are graded and sold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subtype {
    /// Individually graded items
    #[default]
    Single,
    /// Small stones sold in parcels by size range
    Melee,
}

impl Subtype {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subtype::Single => "single",
            Subtype::Melee => "melee",
        }
    }
}

impl fmt::Display for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subtype {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Subtype::Single),
            "melee" => Ok(Subtype::Melee),
            other => Err(Error::Parse(format!("unknown subtype '{}'", other))),
        }
    }
}

/// A (family, subtype) pair that has its own listing endpoint and defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawCatalogKind")]
pub struct CatalogKind {
    family: Family,
    subtype: Subtype,
}

impl CatalogKind {
    pub const SINGLE_DIAMONDS: CatalogKind = CatalogKind {
        family: Family::Diamonds,
        subtype: Subtype::Single,
    };
    pub const MELEE_DIAMONDS: CatalogKind = CatalogKind {
        family: Family::Diamonds,
        subtype: Subtype::Melee,
    };
    pub const SINGLE_GEMSTONES: CatalogKind = CatalogKind {
        family: Family::Gemstones,
        subtype: Subtype::Single,
    };
    pub const MELEE_GEMSTONES: CatalogKind = CatalogKind {
        family: Family::Gemstones,
        subtype: Subtype::Melee,
    };
    pub const WATCHES: CatalogKind = CatalogKind {
        family: Family::Watches,
        subtype: Subtype::Single,
    };

    pub const ALL: [CatalogKind; 5] = [
        Self::SINGLE_DIAMONDS,
        Self::MELEE_DIAMONDS,
        Self::SINGLE_GEMSTONES,
        Self::MELEE_GEMSTONES,
        Self::WATCHES,
    ];

    pub fn new(family: Family, subtype: Subtype) -> Result<Self> {
        if !family.subtypes().contains(&subtype) {
            return Err(Error::InvalidCatalog { family, subtype });
        }
        Ok(Self { family, subtype })
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn subtype(&self) -> Subtype {
        self.subtype
    }

    pub fn is_melee(&self) -> bool {
        self.subtype == Subtype::Melee
    }
}

#[derive(Deserialize)]
struct RawCatalogKind {
    family: Family,
    #[serde(default)]
    subtype: Subtype,
}

impl TryFrom<RawCatalogKind> for CatalogKind {
    type Error = Error;

    fn try_from(raw: RawCatalogKind) -> Result<Self> {
        CatalogKind::new(raw.family, raw.subtype)
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.family {
            Family::Watches => write!(f, "{}", self.family),
            _ => write!(f, "{} {}", self.subtype, self.family),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_melee_watches_rejected() {
        let err = CatalogKind::new(Family::Watches, Subtype::Melee).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidCatalog {
                family: Family::Watches,
                subtype: Subtype::Melee
            }
        );
    }

    #[test]
    fn test_all_kinds_are_constructible() {
        for kind in CatalogKind::ALL {
            assert_eq!(
                CatalogKind::new(kind.family(), kind.subtype()).unwrap(),
                kind
            );
        }
    }

    #[test]
    fn test_family_parse_accepts_singular() {
        assert_eq!("Diamond".parse::<Family>().unwrap(), Family::Diamonds);
        assert_eq!("gems".parse::<Family>().unwrap(), Family::Gemstones);
        assert!("rings".parse::<Family>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(CatalogKind::MELEE_DIAMONDS.to_string(), "melee diamonds");
        assert_eq!(CatalogKind::WATCHES.to_string(), "watches");
    }
}
