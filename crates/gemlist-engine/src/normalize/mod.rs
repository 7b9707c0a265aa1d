//! Raw listing responses -> uniform pages.
//!
//! Never fails: unrecognized shapes become an empty page and missing
//! metadata falls back to the caller's last known request.

pub mod coerce;
mod items;
mod meta;
mod shape;

pub use items::{flatten, to_item};
pub use meta::PageMeta;
pub use shape::{ResponseShape, envelope_failure};

use chrono::{DateTime, Utc};
use gemlist_types::{CatalogKind, ListingPage, NormalizedItem, PageRequest, Pagination};
use serde_json::Value;

/// Locate items and pagination in `raw`, flattening every row.
///
/// `fallback` supplies page and page size when the response omits them;
/// a missing total becomes the number of items found. An unrecognized
/// shape is no results, whatever its metadata claims.
pub fn normalize(raw: &Value, fallback: PageRequest, now: DateTime<Utc>) -> ListingPage<Value> {
    let shape = ResponseShape::detect(raw);
    if matches!(shape, ResponseShape::Empty) {
        return ListingPage {
            items: Vec::new(),
            pagination: Pagination::new(fallback.page(), fallback.page_size(), 0),
        };
    }

    let items: Vec<Value> = shape
        .items()
        .iter()
        .filter_map(|row| flatten(row, now))
        .collect();

    let meta = PageMeta::locate(raw);
    let pagination = Pagination::new(
        meta.page.unwrap_or(fallback.page()),
        meta.page_size.unwrap_or(fallback.page_size()),
        meta.total.unwrap_or(items.len() as u64),
    );

    ListingPage { items, pagination }
}

/// `normalize` followed by the typed item transform of `kind`
pub fn normalize_listing(
    raw: &Value,
    kind: CatalogKind,
    fallback: PageRequest,
    now: DateTime<Utc>,
) -> ListingPage<NormalizedItem> {
    let page = normalize(raw, fallback, now);
    ListingPage {
        items: page
            .items
            .iter()
            .filter_map(|row| to_item(kind, row, now))
            .collect(),
        pagination: page.pagination,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-06-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_fallback_when_metadata_missing() {
        let raw = json!({"data": [{"id": 1}, {"id": 2}, {"id": 3}]});
        let page = normalize(&raw, PageRequest::new(2, 25).unwrap(), now());
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.pagination, Pagination::new(2, 25, 3));
    }

    #[test]
    fn test_reported_total_wins_over_item_count() {
        let raw = json!({
            "data": [{"id": 1}],
            "meta": {"pagination": {"total": 250, "page": 5, "limit": 50}}
        });
        let page = normalize(&raw, PageRequest::default(), now());
        assert_eq!(page.pagination.total, 250);
        assert_eq!(page.pagination.total_pages, 5);
        assert_eq!(page.pagination.page, 5);
    }

    #[test]
    fn test_non_object_rows_are_skipped() {
        let raw = json!({"data": [{"id": 1}, "junk", null, {"id": 2}]});
        let page = normalize(&raw, PageRequest::default(), now());
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pagination.total, 2);
    }
}
