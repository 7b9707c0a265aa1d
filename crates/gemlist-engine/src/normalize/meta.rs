use serde_json::Value;

use super::coerce;

const TOTAL_KEYS: &[&str] = &["total", "totalCount", "total_count"];
const PAGE_KEYS: &[&str] = &["page", "currentPage", "current_page"];
const SIZE_KEYS: &[&str] = &["limit", "perPage", "per_page", "pageSize"];

/// Pagination fields found in a response; `None` means "use the fallback"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageMeta {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub total: Option<u64>,
}

impl PageMeta {
    /// Probe the known metadata locations in priority order:
    /// `meta.pagination`, `data.meta`, then a bare `meta`.
    ///
    /// Each field is taken from the first location that carries a usable
    /// value, so a partial block does not hide the next one.
    pub fn locate(raw: &Value) -> Self {
        let sources: Vec<&Value> = [
            raw.get("meta").and_then(|m| m.get("pagination")),
            raw.get("data").and_then(|d| d.get("meta")),
            raw.get("meta"),
        ]
        .into_iter()
        .flatten()
        .filter(|v| v.is_object())
        .collect();

        let first = |keys: &[&str], accept: fn(u64) -> bool| {
            sources.iter().find_map(|source| {
                keys.iter()
                    .filter_map(|key| source.get(*key))
                    .filter_map(coerce::count)
                    .find(|n| accept(*n))
            })
        };

        Self {
            page: first(PAGE_KEYS, |n| n >= 1),
            page_size: first(SIZE_KEYS, |n| n >= 1),
            total: first(TOTAL_KEYS, |_| true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_meta_pagination_wins() {
        let raw = json!({
            "meta": {"pagination": {"total": 90, "page": 2, "limit": 30}},
            "data": {"meta": {"total": 1, "currentPage": 9, "perPage": 5}}
        });
        assert_eq!(
            PageMeta::locate(&raw),
            PageMeta {
                page: Some(2),
                page_size: Some(30),
                total: Some(90)
            }
        );
    }

    #[test]
    fn test_aliases_under_data_meta() {
        let raw = json!({
            "data": {"data": [], "meta": {"total_count": "41", "current_page": 3, "per_page": 20}}
        });
        assert_eq!(
            PageMeta::locate(&raw),
            PageMeta {
                page: Some(3),
                page_size: Some(20),
                total: Some(41)
            }
        );
    }

    #[test]
    fn test_missing_fields_fall_through() {
        let raw = json!({
            "meta": {"pagination": {"total": 12}},
            "data": {"meta": {"pageSize": 6}}
        });
        assert_eq!(
            PageMeta::locate(&raw),
            PageMeta {
                page: None,
                page_size: Some(6),
                total: Some(12)
            }
        );
    }

    #[test]
    fn test_wrong_types_and_non_positive_sizes_are_ignored() {
        let raw = json!({
            "meta": {"pagination": {"total": "lots", "page": 0, "limit": -5}},
            "data": {"meta": null}
        });
        assert_eq!(PageMeta::locate(&raw), PageMeta::default());
        assert_eq!(PageMeta::locate(&json!({"meta": "x"})), PageMeta::default());
    }
}
