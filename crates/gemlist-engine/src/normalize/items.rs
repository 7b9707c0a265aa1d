//! Per-item transforms: raw listing rows into flattened JSON and typed items.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use gemlist_types::{CatalogKind, Diamond, Family, GemstoneItem, NormalizedItem, WatchProduct};
use serde_json::{Map, Value};

use super::coerce;

/// Numbered image slots collapsed into `images`
const IMAGE_SLOTS: [&str; 6] = ["image1", "image2", "image3", "image4", "image5", "image6"];

/// Fields coerced to numbers whenever present
const NUMERIC_FIELDS: &[&str] = &[
    "price",
    "caratWeight",
    "caratWeightPerPiece",
    "table",
    "depth",
    "caseSize",
];

const DATE_FIELDS: [&str; 2] = ["createdAt", "updatedAt"];

/// Family-agnostic flattening of one raw row.
///
/// Collapses `image1..image6` (after any existing `images` array) into
/// `images` without empty entries, coerces numeric fields with 0 as the
/// fallback, and fills missing or unreadable dates with `now`. Rows that
/// are not JSON objects are dropped.
pub fn flatten(raw: &Value, now: DateTime<Utc>) -> Option<Value> {
    let mut row = raw.as_object()?.clone();

    let mut images: Vec<Value> = match row.remove("images") {
        Some(Value::Array(list)) => list,
        Some(single) => vec![single],
        None => Vec::new(),
    };
    for slot in IMAGE_SLOTS {
        if let Some(value) = row.remove(slot) {
            images.push(value);
        }
    }
    let images: Vec<Value> = images
        .iter()
        .filter_map(image_url)
        .map(Value::String)
        .collect();
    row.insert("images".to_string(), Value::Array(images));

    for field in NUMERIC_FIELDS {
        if let Some(value) = row.get_mut(*field) {
            let n = coerce::number(value).unwrap_or(0.0);
            *value = serde_json::Number::from_f64(n)
                .map(Value::Number)
                .unwrap_or_else(|| Value::from(0));
        }
    }

    for field in DATE_FIELDS {
        let at = row.get(field).and_then(coerce::date).unwrap_or(now);
        row.insert(field.to_string(), Value::String(at.to_rfc3339()));
    }

    Some(Value::Object(row))
}

fn image_url(value: &Value) -> Option<String> {
    match value {
        Value::String(url) => Some(url.trim().to_string()).filter(|u| !u.is_empty()),
        Value::Object(obj) => obj.get("url").and_then(image_url),
        _ => None,
    }
}

/// Typed view-model of a flattened row for the given catalog kind
pub fn to_item(kind: CatalogKind, row: &Value, now: DateTime<Utc>) -> Option<NormalizedItem> {
    let mut fields = Fields::new(row.as_object()?, now);
    let item = match kind.family() {
        Family::Diamonds => NormalizedItem::Diamond(Diamond {
            id: fields.id(),
            stock_number: fields.text(&["stockNumber", "stockNo"]),
            shape: fields.text(&["shape"]),
            color: fields.text(&["color", "colorFrom"]),
            clarity: fields.text(&["clarity", "clarityFrom"]),
            cut: fields.text(&["cut"]),
            lab: fields.text(&["lab"]),
            report_number: fields.text(&["reportNumber", "lotNumber"]),
            carat_weight: fields.number(&["caratWeight"]),
            price: fields.number(&["price"]),
            table: fields.number(&["table"]),
            depth: fields.number(&["depth"]),
            images: fields.images(),
            video: fields.text(&["video", "videoUrl"]),
            company_name: fields.text(&["companyName"]),
            created_at: fields.date("createdAt"),
            updated_at: fields.date("updatedAt"),
            extra: fields.rest(),
        }),
        Family::Gemstones => NormalizedItem::Gemstone(GemstoneItem {
            id: fields.id(),
            stock_number: fields.text(&["stockNumber", "stockNo"]),
            gem_type: fields.text(&["gemType", "type"]),
            shape: fields.text(&["shape"]),
            color: fields.text(&["color", "colorFrom"]),
            clarity: fields.text(&["clarity"]),
            origin: fields.text(&["origin"]),
            treatment: fields.text(&["treatment"]),
            lab: fields.text(&["lab"]),
            report_number: fields.text(&["reportNumber"]),
            carat_weight: fields.number(&["caratWeight", "caratWeightPerPiece"]),
            price: fields.number(&["price"]),
            images: fields.images(),
            video: fields.text(&["video", "videoUrl"]),
            company_name: fields.text(&["companyName"]),
            created_at: fields.date("createdAt"),
            updated_at: fields.date("updatedAt"),
            extra: fields.rest(),
        }),
        Family::Watches => NormalizedItem::Watch(WatchProduct {
            id: fields.id(),
            brand: fields.text(&["brand"]),
            model: fields.text(&["model", "name"]),
            reference_number: fields.text(&["referenceNumber"]),
            movement: fields.text(&["movement"]),
            case_material: fields.text(&["caseMaterial"]),
            dial_color: fields.text(&["dialColor"]),
            condition: fields.text(&["condition"]),
            gender: fields.text(&["gender"]),
            price: fields.number(&["price"]),
            case_size: fields.number(&["caseSize"]),
            year: fields.year(),
            images: fields.images(),
            company_name: fields.text(&["companyName"]),
            created_at: fields.date("createdAt"),
            updated_at: fields.date("updatedAt"),
            extra: fields.rest(),
        }),
    };
    Some(item)
}

/// Reader over one row that remembers which keys were consumed
struct Fields<'a> {
    row: &'a Map<String, Value>,
    used: HashSet<String>,
    now: DateTime<Utc>,
}

impl<'a> Fields<'a> {
    fn new(row: &'a Map<String, Value>, now: DateTime<Utc>) -> Self {
        Self {
            row,
            used: HashSet::new(),
            now,
        }
    }

    /// Value of the first present, non-null key; every candidate counts as consumed
    fn lookup(&mut self, keys: &[&str]) -> Option<&'a Value> {
        let mut found = None;
        for key in keys {
            if let Some(value) = self.row.get(*key) {
                self.used.insert(key.to_string());
                if found.is_none() && !value.is_null() {
                    found = Some(value);
                }
            }
        }
        found
    }

    fn id(&mut self) -> String {
        self.lookup(&["id", "_id"])
            .and_then(coerce::id)
            .unwrap_or_default()
    }

    fn text(&mut self, keys: &[&str]) -> Option<String> {
        self.lookup(keys).and_then(coerce::text)
    }

    fn number(&mut self, keys: &[&str]) -> f64 {
        coerce::number_or_zero(self.lookup(keys))
    }

    fn year(&mut self) -> u32 {
        let year = self.number(&["year", "productionYear"]);
        if year >= 1.0 && year <= u32::MAX as f64 {
            year.trunc() as u32
        } else {
            0
        }
    }

    fn images(&mut self) -> Vec<String> {
        match self.lookup(&["images"]) {
            Some(Value::Array(list)) => list.iter().filter_map(image_url).collect(),
            _ => Vec::new(),
        }
    }

    fn date(&mut self, key: &str) -> DateTime<Utc> {
        self.lookup(&[key])
            .and_then(coerce::date)
            .unwrap_or(self.now)
    }

    /// Every key no typed field consumed
    fn rest(&self) -> Map<String, Value> {
        self.row
            .iter()
            .filter(|(key, _)| !self.used.contains(*key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}
