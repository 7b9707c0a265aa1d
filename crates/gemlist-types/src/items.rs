use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Family;

/// A single diamond or a melee parcel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diamond {
    pub id: String,
    pub stock_number: Option<String>,
    pub shape: Option<String>,
    pub color: Option<String>,
    pub clarity: Option<String>,
    pub cut: Option<String>,
    pub lab: Option<String>,
    pub report_number: Option<String>,
    pub carat_weight: f64,
    pub price: f64,
    pub table: f64,
    pub depth: f64,
    pub images: Vec<String>,
    pub video: Option<String>,
    pub company_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Raw fields with no dedicated slot, kept for detail views
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GemstoneItem {
    pub id: String,
    pub stock_number: Option<String>,
    pub gem_type: Option<String>,
    pub shape: Option<String>,
    pub color: Option<String>,
    pub clarity: Option<String>,
    pub origin: Option<String>,
    pub treatment: Option<String>,
    pub lab: Option<String>,
    pub report_number: Option<String>,
    pub carat_weight: f64,
    pub price: f64,
    pub images: Vec<String>,
    pub video: Option<String>,
    pub company_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchProduct {
    pub id: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub reference_number: Option<String>,
    pub movement: Option<String>,
    pub case_material: Option<String>,
    pub dial_color: Option<String>,
    pub condition: Option<String>,
    pub gender: Option<String>,
    pub price: f64,
    pub case_size: f64,
    /// Production year, 0 when unknown
    pub year: u32,
    pub images: Vec<String>,
    pub company_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

/// View-model of any listing row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum NormalizedItem {
    Diamond(Diamond),
    Gemstone(GemstoneItem),
    Watch(WatchProduct),
}

impl NormalizedItem {
    pub fn family(&self) -> Family {
        match self {
            NormalizedItem::Diamond(_) => Family::Diamonds,
            NormalizedItem::Gemstone(_) => Family::Gemstones,
            NormalizedItem::Watch(_) => Family::Watches,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            NormalizedItem::Diamond(d) => &d.id,
            NormalizedItem::Gemstone(g) => &g.id,
            NormalizedItem::Watch(w) => &w.id,
        }
    }

    pub fn price(&self) -> f64 {
        match self {
            NormalizedItem::Diamond(d) => d.price,
            NormalizedItem::Gemstone(g) => g.price,
            NormalizedItem::Watch(w) => w.price,
        }
    }

    pub fn images(&self) -> &[String] {
        match self {
            NormalizedItem::Diamond(d) => &d.images,
            NormalizedItem::Gemstone(g) => &g.images,
            NormalizedItem::Watch(w) => &w.images,
        }
    }

    /// One-line description used by listings
    pub fn title(&self) -> String {
        let parts: Vec<String> = match self {
            NormalizedItem::Diamond(d) => vec![
                carat_label(d.carat_weight),
                opt(&d.shape),
                opt(&d.color),
                opt(&d.clarity),
            ],
            NormalizedItem::Gemstone(g) => vec![
                carat_label(g.carat_weight),
                opt(&g.color),
                opt(&g.gem_type),
                opt(&g.origin),
            ],
            NormalizedItem::Watch(w) => vec![
                opt(&w.brand),
                opt(&w.model),
                opt(&w.reference_number),
                if w.year > 0 {
                    w.year.to_string()
                } else {
                    String::new()
                },
            ],
        };
        let title = parts
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if title.is_empty() {
            self.id().to_string()
        } else {
            title
        }
    }
}

fn carat_label(carat: f64) -> String {
    if carat > 0.0 {
        format!("{:.2}ct", carat)
    } else {
        String::new()
    }
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}
