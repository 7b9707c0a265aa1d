//! Canned listing responses and file placement helpers.
//!
//! The responses deliberately use the different envelope shapes the API
//! produces, so tests exercise shape detection and metadata lookup.

use anyhow::Result;
use gemlist_types::{CatalogKind, Family};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};

/// Two single diamonds in the nested `data.data` shape with `data.meta`.
pub fn diamond_listing() -> Value {
    json!({
        "success": true,
        "data": {
            "data": [
                {
                    "id": 101,
                    "stockNumber": "D-101",
                    "shape": "Round",
                    "caratWeight": "1.01",
                    "color": "E",
                    "clarity": "VS1",
                    "price": "$12,500",
                    "image1": "https://cdn.example.com/d101-a.jpg",
                    "image2": "",
                    "image3": "https://cdn.example.com/d101-c.jpg",
                    "createdAt": "2024-03-01T10:00:00Z"
                },
                {
                    "_id": "d-102",
                    "shape": "Oval",
                    "caratWeight": 0.7,
                    "color": "G",
                    "clarity": "SI1",
                    "price": 4100,
                    "images": [{"url": "https://cdn.example.com/d102.jpg"}],
                    "createdAt": "2024-03-02 08:30:00"
                }
            ],
            "meta": {"total": 2, "currentPage": 1, "perPage": 20}
        }
    })
}

/// One gemstone in the flat `data` shape with `meta.pagination`.
pub fn gemstone_listing() -> Value {
    json!({
        "data": [
            {
                "id": "g-1",
                "type": "Sapphire",
                "color": "Blue",
                "origin": "Sri Lanka",
                "caratWeight": "2.35",
                "price": "USD 8,900",
                "createdAt": "2024-01-15"
            }
        ],
        "meta": {"pagination": {"total": 1, "page": 1, "limit": 20}}
    })
}

/// One watch in the flat `data` shape with a bare `meta` object.
pub fn watch_listing() -> Value {
    json!({
        "data": [
            {
                "id": 9,
                "brand": "Omega",
                "name": "Speedmaster",
                "referenceNumber": "311.30.42.30.01.005",
                "year": "2019",
                "caseSize": "42",
                "price": "€5,200",
                "image1": "https://cdn.example.com/w9.jpg"
            }
        ],
        "meta": {"total": 1, "page": 1, "perPage": 20}
    })
}

/// Fixture for any catalog; melee kinds reuse their family's rows.
pub fn listing_for(kind: CatalogKind) -> Value {
    match kind.family() {
        Family::Diamonds => diamond_listing(),
        Family::Gemstones => gemstone_listing(),
        Family::Watches => watch_listing(),
    }
}

/// Diamond page `page` of a listing with `total` rows, `ids` on this page.
pub fn paged_listing(ids: &[u64], page: u64, per_page: u64, total: u64) -> Value {
    let rows: Vec<Value> = ids
        .iter()
        .map(|id| json!({"id": id, "shape": "Round", "price": 1000 + id}))
        .collect();
    json!({
        "data": {
            "data": rows,
            "meta": {"total": total, "currentPage": page, "perPage": per_page}
        }
    })
}

/// Envelope the API sends when it refuses a request with a 200 status.
pub fn rejected(message: &str) -> Value {
    json!({"success": false, "message": message, "data": null})
}

/// Write `value` as pretty JSON to `dir/name` and return the path.
pub fn write_json(dir: &Path, name: &str, value: &Value) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value)?)?;
    Ok(path)
}
