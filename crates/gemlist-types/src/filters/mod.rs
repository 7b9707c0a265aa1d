//! Filter models for every catalog kind.
//!
//! A `FilterModel` is a plain value: the listing replaces it wholesale on
//! every interaction. All facets are reachable through `facets()` /
//! `facet_mut()` so compilers and decoders never match on families.

pub mod defaults;
mod diamond;
mod gemstone;
mod watch;

pub use diamond::DiamondFilters;
pub use gemstone::GemstoneFilters;
pub use watch::WatchFilters;

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::{
    CatalogKind, Error, Facet, FacetKind, FacetMut, FacetRef, Family, RangeBounds, Result,
    Subtype,
};

#[derive(Debug, Clone, PartialEq)]
pub enum FilterModel {
    Diamonds(DiamondFilters),
    Gemstones(GemstoneFilters),
    Watches(WatchFilters),
}

impl FilterModel {
    /// Empty filter model for a catalog kind
    pub fn defaults(kind: CatalogKind) -> Self {
        match kind.family() {
            Family::Diamonds => FilterModel::Diamonds(DiamondFilters::defaults(kind.subtype())),
            Family::Gemstones => {
                FilterModel::Gemstones(GemstoneFilters::defaults(kind.subtype()))
            }
            Family::Watches => FilterModel::Watches(WatchFilters::default()),
        }
    }

    pub fn kind(&self) -> CatalogKind {
        match self {
            FilterModel::Diamonds(f) => match f.subtype {
                Subtype::Single => CatalogKind::SINGLE_DIAMONDS,
                Subtype::Melee => CatalogKind::MELEE_DIAMONDS,
            },
            FilterModel::Gemstones(f) => match f.subtype {
                Subtype::Single => CatalogKind::SINGLE_GEMSTONES,
                Subtype::Melee => CatalogKind::MELEE_GEMSTONES,
            },
            FilterModel::Watches(_) => CatalogKind::WATCHES,
        }
    }

    pub fn family(&self) -> Family {
        self.kind().family()
    }

    /// Every facet of the family in a stable order
    pub fn facets(&self) -> Vec<(Facet, FacetRef<'_>)> {
        match self {
            FilterModel::Diamonds(f) => f.facets(),
            FilterModel::Gemstones(f) => f.facets(),
            FilterModel::Watches(f) => f.facets(),
        }
    }

    pub fn facet(&self, facet: Facet) -> Option<FacetRef<'_>> {
        self.facets()
            .into_iter()
            .find(|(f, _)| *f == facet)
            .map(|(_, view)| view)
    }

    pub fn facet_mut(&mut self, facet: Facet) -> Option<FacetMut<'_>> {
        match self {
            FilterModel::Diamonds(f) => f.facet_mut(facet),
            FilterModel::Gemstones(f) => f.facet_mut(facet),
            FilterModel::Watches(f) => f.facet_mut(facet),
        }
    }

    pub fn supports(&self, facet: Facet) -> bool {
        self.facet(facet).is_some()
    }

    /// Default bounds of a range facet for this model's kind
    pub fn range_default(&self, facet: Facet) -> Option<RangeBounds> {
        match self.facet(facet)? {
            FacetRef::Range { default, .. } => Some(default),
            _ => None,
        }
    }

    /// Checkbox toggle; returns whether the token ends up selected
    pub fn toggle(&mut self, facet: Facet, token: &str) -> Result<bool> {
        match self.view_mut(facet)? {
            FacetMut::Multi(selection) => Ok(selection.toggle(token)),
            other => Err(kind_mismatch(facet, FacetKind::Multi, other.kind())),
        }
    }

    /// Replace the whole selection of a multi-select facet
    pub fn select<I, S>(&mut self, facet: Facet, tokens: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self.view_mut(facet)? {
            FacetMut::Multi(selection) => {
                *selection = tokens.into_iter().collect();
                Ok(())
            }
            other => Err(kind_mismatch(facet, FacetKind::Multi, other.kind())),
        }
    }

    /// Set range bounds, clamped into the facet's default span
    pub fn set_range(&mut self, facet: Facet, bounds: RangeBounds) -> Result<()> {
        match self.view_mut(facet)? {
            FacetMut::Range { value, default } => {
                *value = bounds.clamped_to(default);
                Ok(())
            }
            other => Err(kind_mismatch(facet, FacetKind::Range, other.kind())),
        }
    }

    /// Set range bounds from raw input text; unparseable text becomes the
    /// default bound for that side.
    pub fn set_range_text(&mut self, facet: Facet, min: &str, max: &str) -> Result<()> {
        match self.view_mut(facet)? {
            FacetMut::Range { value, default } => {
                let bounds = RangeBounds::new(
                    RangeBounds::parse_bound(min, default.min),
                    RangeBounds::parse_bound(max, default.max),
                );
                *value = bounds.clamped_to(default);
                Ok(())
            }
            other => Err(kind_mismatch(facet, FacetKind::Range, other.kind())),
        }
    }

    pub fn set_text(&mut self, facet: Facet, text: &str) -> Result<()> {
        match self.view_mut(facet)? {
            FacetMut::Text(value) => {
                *value = text.trim().to_string();
                Ok(())
            }
            other => Err(kind_mismatch(facet, FacetKind::Text, other.kind())),
        }
    }

    pub fn reset_facet(&mut self, facet: Facet) -> Result<()> {
        self.view_mut(facet)?.reset();
        Ok(())
    }

    /// Back to the defaults of the same kind
    pub fn reset(&mut self) {
        *self = FilterModel::defaults(self.kind());
    }

    pub fn is_default(&self) -> bool {
        self.facets().iter().all(|(_, view)| view.is_default())
    }

    /// Facets currently holding a non-default value
    pub fn active_facets(&self) -> Vec<Facet> {
        self.facets()
            .into_iter()
            .filter(|(_, view)| !view.is_default())
            .map(|(facet, _)| facet)
            .collect()
    }

    /// Non-empty free-text facets
    pub fn text_terms(&self) -> Vec<(Facet, &str)> {
        self.facets()
            .into_iter()
            .filter_map(|(facet, view)| match view {
                FacetRef::Text(text) if !text.is_empty() => Some((facet, text)),
                _ => None,
            })
            .collect()
    }

    fn view_mut(&mut self, facet: Facet) -> Result<FacetMut<'_>> {
        let family = self.family();
        self.facet_mut(facet)
            .ok_or(Error::UnknownFacet { family, facet })
    }
}

fn kind_mismatch(facet: Facet, expected: FacetKind, actual: FacetKind) -> Error {
    Error::FacetKind {
        facet,
        expected,
        actual,
    }
}

impl Serialize for FilterModel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let kind = self.kind();
        let facets = self.facets();
        let mut map = serializer.serialize_map(Some(facets.len() + 2))?;
        map.serialize_entry("family", &kind.family())?;
        map.serialize_entry("subtype", &kind.subtype())?;
        for (facet, view) in facets {
            match view {
                FacetRef::Multi(selection) => map.serialize_entry(facet.as_str(), selection)?,
                FacetRef::Range { value, .. } => map.serialize_entry(facet.as_str(), value)?,
                FacetRef::Text(text) => map.serialize_entry(facet.as_str(), text)?,
            }
        }
        map.end()
    }
}

#[derive(Deserialize)]
struct RawFilterModel {
    family: Family,
    #[serde(default)]
    subtype: Subtype,
    #[serde(flatten)]
    facets: serde_json::Map<String, Value>,
}

#[derive(Deserialize)]
struct PartialRange {
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
}

/// Filter files may omit any facet; omitted facets keep their defaults.
impl<'de> Deserialize<'de> for FilterModel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = RawFilterModel::deserialize(deserializer)?;
        let kind = CatalogKind::new(raw.family, raw.subtype).map_err(D::Error::custom)?;
        let mut model = FilterModel::defaults(kind);

        for (key, value) in raw.facets {
            let facet: Facet = key.parse().map_err(D::Error::custom)?;
            let view = model.facet_mut(facet).ok_or_else(|| {
                D::Error::custom(Error::UnknownFacet {
                    family: kind.family(),
                    facet,
                })
            })?;

            match view {
                FacetMut::Multi(selection) => {
                    *selection = match value {
                        Value::Null => Default::default(),
                        Value::String(joined) => joined.split(',').collect(),
                        other => {
                            let tokens: Vec<String> =
                                serde_json::from_value(other).map_err(D::Error::custom)?;
                            tokens.into()
                        }
                    };
                }
                FacetMut::Range {
                    value: bounds,
                    default,
                } => {
                    let partial = match value {
                        Value::Null => PartialRange {
                            min: None,
                            max: None,
                        },
                        other => serde_json::from_value(other).map_err(D::Error::custom)?,
                    };
                    *bounds = RangeBounds::new(
                        partial.min.unwrap_or(default.min),
                        partial.max.unwrap_or(default.max),
                    )
                    .clamped_to(default);
                }
                FacetMut::Text(text) => {
                    *text = match value {
                        Value::Null => String::new(),
                        Value::String(s) => s.trim().to_string(),
                        other => return Err(D::Error::custom(format!(
                            "facet '{}' expects text, got {}",
                            facet, other
                        ))),
                    };
                }
            }
        }

        Ok(model)
    }
}
