use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Shape of a facet's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetKind {
    /// Set of selected tokens (checkbox group)
    Multi,
    /// Numeric min/max pair
    Range,
    /// Free text
    Text,
}

impl fmt::Display for FacetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FacetKind::Multi => "multi-select",
            FacetKind::Range => "range",
            FacetKind::Text => "text",
        })
    }
}

/// Every filterable attribute across all families.
///
/// `as_str` is the field name the listing API uses when no remap applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Facet {
    // Multi-select
    Shape,
    Color,
    Clarity,
    Cut,
    Polish,
    Symmetry,
    Fluorescence,
    Lab,
    Origin,
    Treatment,
    GemType,
    Brand,
    Movement,
    CaseMaterial,
    BraceletMaterial,
    DialColor,
    Condition,
    Gender,

    // Ranges
    CaratWeight,
    Price,
    Table,
    Depth,
    CaseSize,
    Year,

    // Text
    Search,
    ReportNumber,
    StockNumber,
    ReferenceNumber,
    CompanyName,
}

impl Facet {
    pub const ALL: [Facet; 29] = [
        Facet::Shape,
        Facet::Color,
        Facet::Clarity,
        Facet::Cut,
        Facet::Polish,
        Facet::Symmetry,
        Facet::Fluorescence,
        Facet::Lab,
        Facet::Origin,
        Facet::Treatment,
        Facet::GemType,
        Facet::Brand,
        Facet::Movement,
        Facet::CaseMaterial,
        Facet::BraceletMaterial,
        Facet::DialColor,
        Facet::Condition,
        Facet::Gender,
        Facet::CaratWeight,
        Facet::Price,
        Facet::Table,
        Facet::Depth,
        Facet::CaseSize,
        Facet::Year,
        Facet::Search,
        Facet::ReportNumber,
        Facet::StockNumber,
        Facet::ReferenceNumber,
        Facet::CompanyName,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Facet::Shape => "shape",
            Facet::Color => "color",
            Facet::Clarity => "clarity",
            Facet::Cut => "cut",
            Facet::Polish => "polish",
            Facet::Symmetry => "symmetry",
            Facet::Fluorescence => "fluorescence",
            Facet::Lab => "lab",
            Facet::Origin => "origin",
            Facet::Treatment => "treatment",
            Facet::GemType => "gemType",
            Facet::Brand => "brand",
            Facet::Movement => "movement",
            Facet::CaseMaterial => "caseMaterial",
            Facet::BraceletMaterial => "braceletMaterial",
            Facet::DialColor => "dialColor",
            Facet::Condition => "condition",
            Facet::Gender => "gender",
            Facet::CaratWeight => "caratWeight",
            Facet::Price => "price",
            Facet::Table => "table",
            Facet::Depth => "depth",
            Facet::CaseSize => "caseSize",
            Facet::Year => "year",
            Facet::Search => "search",
            Facet::ReportNumber => "reportNumber",
            Facet::StockNumber => "stockNumber",
            Facet::ReferenceNumber => "referenceNumber",
            Facet::CompanyName => "companyName",
        }
    }

    pub fn kind(&self) -> FacetKind {
        match self {
            Facet::CaratWeight
            | Facet::Price
            | Facet::Table
            | Facet::Depth
            | Facet::CaseSize
            | Facet::Year => FacetKind::Range,
            Facet::Search
            | Facet::ReportNumber
            | Facet::StockNumber
            | Facet::ReferenceNumber
            | Facet::CompanyName => FacetKind::Text,
            _ => FacetKind::Multi,
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Facet {
    type Err = Error;

    /// Accepts the API name (`caratWeight`) case-insensitively, with or
    /// without separators (`carat_weight`, `carat-weight`).
    fn from_str(s: &str) -> Result<Self> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        Facet::ALL
            .into_iter()
            .find(|facet| facet.as_str().to_ascii_lowercase() == wanted)
            .ok_or_else(|| Error::Parse(format!("unknown facet '{}'", s)))
    }
}

/// Ordered set of selected tokens with checkbox semantics.
///
/// Insertion order is kept and a token is never present twice.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Selection(Vec<String>);

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the token if absent, deselect it if present.
    /// Returns whether the token is selected afterwards.
    pub fn toggle(&mut self, token: impl AsRef<str>) -> bool {
        let token = token.as_ref().trim();
        if token.is_empty() {
            return false;
        }
        if let Some(pos) = self.0.iter().position(|t| t == token) {
            self.0.remove(pos);
            false
        } else {
            self.0.push(token.to_string());
            true
        }
    }

    /// Select the token, keeping it in place when already selected
    pub fn insert(&mut self, token: impl AsRef<str>) {
        let token = token.as_ref().trim();
        if !token.is_empty() && !self.contains(token) {
            self.0.push(token.to_string());
        }
    }

    pub fn remove(&mut self, token: &str) -> bool {
        match self.0.iter().position(|t| t == token) {
            Some(pos) => {
                self.0.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|t| t == token)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for Selection {
    fn from(tokens: Vec<String>) -> Self {
        tokens.into_iter().collect()
    }
}

impl From<Selection> for Vec<String> {
    fn from(selection: Selection) -> Self {
        selection.0
    }
}

impl<S: AsRef<str>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = Selection::new();
        for token in iter {
            selection.insert(token);
        }
        selection
    }
}

/// Inclusive numeric bounds of a range facet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeBounds {
    pub min: f64,
    pub max: f64,
}

impl RangeBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Parse a user-entered bound; anything that is not a finite number
    /// becomes `fallback`.
    pub fn parse_bound(text: &str, fallback: f64) -> f64 {
        match text.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => fallback,
        }
    }

    /// Keep both bounds inside `span` and ordered.
    pub fn clamped_to(self, span: RangeBounds) -> Self {
        let fix = |v: f64, fallback: f64| {
            if v.is_finite() {
                v.clamp(span.min, span.max)
            } else {
                fallback
            }
        };
        let min = fix(self.min, span.min);
        let max = fix(self.max, span.max);
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn min_differs(&self, default: &RangeBounds) -> bool {
        self.min != default.min
    }

    pub fn max_differs(&self, default: &RangeBounds) -> bool {
        self.max != default.max
    }
}

impl fmt::Display for RangeBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}

/// Read-only view of one facet of a filter model
#[derive(Debug, Clone, Copy)]
pub enum FacetRef<'a> {
    Multi(&'a Selection),
    Range {
        value: &'a RangeBounds,
        default: RangeBounds,
    },
    Text(&'a str),
}

impl FacetRef<'_> {
    pub fn kind(&self) -> FacetKind {
        match self {
            FacetRef::Multi(_) => FacetKind::Multi,
            FacetRef::Range { .. } => FacetKind::Range,
            FacetRef::Text(_) => FacetKind::Text,
        }
    }

    /// True when the facet holds its unset value
    pub fn is_default(&self) -> bool {
        match self {
            FacetRef::Multi(selection) => selection.is_empty(),
            FacetRef::Range { value, default } => **value == *default,
            FacetRef::Text(text) => text.is_empty(),
        }
    }
}

/// Mutable view of one facet of a filter model
#[derive(Debug)]
pub enum FacetMut<'a> {
    Multi(&'a mut Selection),
    Range {
        value: &'a mut RangeBounds,
        default: RangeBounds,
    },
    Text(&'a mut String),
}

impl FacetMut<'_> {
    pub fn kind(&self) -> FacetKind {
        match self {
            FacetMut::Multi(_) => FacetKind::Multi,
            FacetMut::Range { .. } => FacetKind::Range,
            FacetMut::Text(_) => FacetKind::Text,
        }
    }

    /// Put the facet back to its unset value
    pub fn reset(self) {
        match self {
            FacetMut::Multi(selection) => selection.clear(),
            FacetMut::Range { value, default } => *value = default,
            FacetMut::Text(text) => text.clear(),
        }
    }
}
