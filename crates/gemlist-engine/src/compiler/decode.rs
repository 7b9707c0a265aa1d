use std::collections::{BTreeMap, HashMap};

use gemlist_types::{
    DEFAULT_PAGE_SIZE, Facet, FacetKind, FilterModel, PageRequest, ParamValue, QueryParams,
    RangeBounds, format_number,
};

use super::context::{FamilyContext, RangeEncoding};
use crate::{Error, Result};

/// Filter state recovered from compiled parameters
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedQuery {
    pub filters: FilterModel,
    pub page: PageRequest,
    pub sort: Option<String>,
    /// Keys that map to no facet of the context's catalog kind
    pub unknown_keys: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Facet(Facet),
    Min(Facet),
    Max(Facet),
}

/// Rebuild filters, page and sort from parameters produced by `compile`.
///
/// Lists are accepted comma-joined or as `{in: [...]}` whatever the
/// context's list encoding; absent bounds come back as the facet default.
pub fn decode(params: &QueryParams, ctx: &FamilyContext) -> Result<DecodedQuery> {
    let mut filters = FilterModel::defaults(ctx.kind);
    let slots = slot_table(&filters, ctx);
    let conventions = &ctx.conventions;

    let mut page = 1;
    let mut page_size = DEFAULT_PAGE_SIZE;
    let mut sort = None;
    let mut unknown_keys = Vec::new();
    let mut bounds: BTreeMap<Facet, (Option<f64>, Option<f64>)> = BTreeMap::new();

    for (key, value) in params.iter() {
        if key == conventions.page_key {
            page = count(key, value)?;
            continue;
        }
        if key == conventions.limit_key {
            page_size = count(key, value)?;
            continue;
        }
        if key == conventions.sort_key {
            sort = Some(scalar_text(key, value)?).filter(|s| !s.is_empty());
            continue;
        }

        let Some(slot) = slots.get(key) else {
            unknown_keys.push(key.to_string());
            continue;
        };

        match *slot {
            Slot::Facet(facet) => match facet.kind() {
                FacetKind::Multi => filters.select(facet, tokens(key, value)?)?,
                FacetKind::Text => filters.set_text(facet, &scalar_text(key, value)?)?,
                FacetKind::Range => {
                    // an object without either operator reads as empty bounds
                    let ParamValue::Bounds { gte, lte } = value else {
                        return Err(Error::invalid_param(key, "expected {gte, lte} bounds"));
                    };
                    if gte.is_none() && lte.is_none() {
                        return Err(Error::invalid_param(key, "expected {gte, lte} bounds"));
                    }
                    let entry = bounds.entry(facet).or_default();
                    entry.0 = gte.or(entry.0);
                    entry.1 = lte.or(entry.1);
                }
            },
            Slot::Min(facet) => bounds.entry(facet).or_default().0 = Some(number(key, value)?),
            Slot::Max(facet) => bounds.entry(facet).or_default().1 = Some(number(key, value)?),
        }
    }

    for (facet, (min, max)) in bounds {
        let Some(default) = filters.range_default(facet) else {
            continue;
        };
        filters.set_range(
            facet,
            RangeBounds::new(min.unwrap_or(default.min), max.unwrap_or(default.max)),
        )?;
    }

    let page = PageRequest::new(page, page_size)
        .map_err(|e| Error::invalid_param(&conventions.limit_key, e.to_string()))?;

    Ok(DecodedQuery {
        filters,
        page,
        sort,
        unknown_keys,
    })
}

/// Map every wire key the compiler can produce for this context back to its facet
fn slot_table(filters: &FilterModel, ctx: &FamilyContext) -> HashMap<String, Slot> {
    let mut slots = HashMap::new();
    for (facet, _) in filters.facets() {
        let name = ctx.field_name(facet);
        match (facet.kind(), ctx.conventions.range_encoding) {
            (FacetKind::Range, RangeEncoding::Suffixed) => {
                slots.insert(format!("{}Min", name), Slot::Min(facet));
                slots.insert(format!("{}Max", name), Slot::Max(facet));
            }
            _ => {
                slots.insert(name.to_string(), Slot::Facet(facet));
            }
        }
    }
    slots
}

fn tokens(key: &str, value: &ParamValue) -> Result<Vec<String>> {
    match value {
        ParamValue::Text(joined) => Ok(joined.split(',').map(str::to_string).collect()),
        ParamValue::InSet { values } => Ok(values.clone()),
        _ => Err(Error::invalid_param(key, "expected a list of tokens")),
    }
}

fn scalar_text(key: &str, value: &ParamValue) -> Result<String> {
    match value {
        ParamValue::Text(text) => Ok(text.trim().to_string()),
        ParamValue::Integer(n) => Ok(n.to_string()),
        ParamValue::Number(n) => Ok(format_number(*n)),
        _ => Err(Error::invalid_param(key, "expected text")),
    }
}

fn number(key: &str, value: &ParamValue) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| Error::invalid_param(key, "expected a number"))
}

fn count(key: &str, value: &ParamValue) -> Result<u64> {
    value
        .as_u64()
        .ok_or_else(|| Error::invalid_param(key, "expected a positive integer"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile;
    use gemlist_types::CatalogKind;

    #[test]
    fn test_decode_restores_bounds_from_defaults() {
        let ctx = FamilyContext::for_kind(CatalogKind::SINGLE_GEMSTONES);
        let mut params = QueryParams::new();
        params.insert("priceMax", ParamValue::text("2500"));
        params.insert("gemType", ParamValue::text("Ruby,Spinel"));

        let decoded = decode(&params, &ctx).unwrap();
        let FilterModel::Gemstones(filters) = &decoded.filters else {
            panic!("expected gemstones");
        };
        assert_eq!(filters.price, RangeBounds::new(0.0, 2_500.0));
        assert_eq!(filters.gem_type.as_slice(), &["Ruby", "Spinel"]);
        assert_eq!(decoded.page, PageRequest::first(DEFAULT_PAGE_SIZE));
        assert_eq!(decoded.sort, None);
    }

    #[test]
    fn test_unknown_keys_are_reported() {
        let ctx = FamilyContext::for_kind(CatalogKind::MELEE_DIAMONDS);
        let mut params = QueryParams::new();
        // melee diamonds send colorFrom, so a bare color key is foreign
        params.insert("color", ParamValue::text("D"));
        params.insert("utm_source", ParamValue::text("mail"));
        params.insert("colorFrom", ParamValue::InSet {
            values: vec!["E".to_string()],
        });

        let decoded = decode(&params, &ctx).unwrap();
        assert_eq!(decoded.unknown_keys, vec!["color", "utm_source"]);
        let FilterModel::Diamonds(filters) = &decoded.filters else {
            panic!("expected diamonds");
        };
        assert_eq!(filters.color.as_slice(), &["E"]);
    }

    #[test]
    fn test_non_numeric_bound_is_invalid() {
        let ctx = FamilyContext::for_kind(CatalogKind::WATCHES);
        let mut params = QueryParams::new();
        params.insert("yearMin", ParamValue::text("vintage"));
        assert_eq!(
            decode(&params, &ctx).unwrap_err(),
            Error::InvalidParam {
                key: "yearMin".to_string(),
                reason: "expected a number".to_string()
            }
        );
    }

    #[test]
    fn test_scalar_where_bounds_expected_is_invalid() {
        let ctx = FamilyContext::for_kind(CatalogKind::SINGLE_DIAMONDS);
        let mut params = QueryParams::new();
        params.insert("price", ParamValue::Number(10.0));
        assert!(matches!(
            decode(&params, &ctx),
            Err(Error::InvalidParam { .. })
        ));
    }

    #[test]
    fn test_object_without_operators_is_invalid() {
        let ctx = FamilyContext::for_kind(CatalogKind::SINGLE_DIAMONDS);
        let params: QueryParams =
            serde_json::from_value(serde_json::json!({"price": {"min": 100, "max": 900}}))
                .unwrap();
        assert_eq!(
            decode(&params, &ctx).unwrap_err(),
            Error::InvalidParam {
                key: "price".to_string(),
                reason: "expected {gte, lte} bounds".to_string()
            }
        );
    }

    #[test]
    fn test_page_and_sort_round_trip() {
        let ctx = FamilyContext::for_kind(CatalogKind::WATCHES);
        let filters = FilterModel::defaults(CatalogKind::WATCHES);
        let request = PageRequest::new(4, 48).unwrap();
        let params = compile(&filters, request, Some("year_desc"), &ctx).unwrap();

        let decoded = decode(&params, &ctx).unwrap();
        assert_eq!(decoded.page, request);
        assert_eq!(decoded.sort.as_deref(), Some("year_desc"));
        assert!(decoded.unknown_keys.is_empty());
    }

    #[test]
    fn test_zero_limit_is_invalid() {
        let ctx = FamilyContext::for_kind(CatalogKind::WATCHES);
        let mut params = QueryParams::new();
        params.insert("limit", ParamValue::Integer(0));
        assert!(matches!(
            decode(&params, &ctx),
            Err(Error::InvalidParam { key, .. }) if key == "limit"
        ));
    }
}
