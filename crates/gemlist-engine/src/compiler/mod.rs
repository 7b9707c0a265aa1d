//! FilterModel -> QueryParams compilation and its inverse.
//!
//! A facet contributes parameters only when it differs from its unset
//! value. Pagination keys are always present, the sort key only when a
//! sort is given.

mod context;
mod decode;

pub use context::{Conventions, FamilyContext, FieldRemap, ListEncoding, RangeEncoding};
pub use decode::{DecodedQuery, decode};

use gemlist_types::{FacetRef, FilterModel, PageRequest, ParamValue, QueryParams, RangeBounds, Selection};

use crate::{Error, Result};

/// Compile filter state plus pagination and sort into listing parameters.
///
/// Fails only when `filters` belongs to another catalog kind than `ctx`.
pub fn compile(
    filters: &FilterModel,
    page: PageRequest,
    sort: Option<&str>,
    ctx: &FamilyContext,
) -> Result<QueryParams> {
    if filters.kind() != ctx.kind {
        return Err(Error::KindMismatch {
            filters: filters.kind(),
            context: ctx.kind,
        });
    }

    let conventions = &ctx.conventions;
    let mut params = QueryParams::new();

    for (facet, view) in filters.facets() {
        let name = ctx.field_name(facet);
        match view {
            FacetRef::Multi(selection) => {
                if !selection.is_empty() {
                    params.insert(name, list_value(selection, conventions.list_encoding));
                }
            }
            FacetRef::Range { value, default } => {
                let paired = conventions.pairs_bounds(facet);
                emit_range(&mut params, name, value, &default, paired, conventions.range_encoding);
            }
            FacetRef::Text(text) => {
                if !text.is_empty() {
                    params.insert(name, ParamValue::text(text));
                }
            }
        }
    }

    params.insert(conventions.page_key.as_str(), ParamValue::Integer(page.page()));
    params.insert(
        conventions.limit_key.as_str(),
        ParamValue::Integer(page.page_size()),
    );
    if let Some(sort) = sort.map(str::trim).filter(|s| !s.is_empty()) {
        params.insert(conventions.sort_key.as_str(), ParamValue::text(sort));
    }

    Ok(params)
}

fn list_value(selection: &Selection, encoding: ListEncoding) -> ParamValue {
    match encoding {
        ListEncoding::CommaJoined => ParamValue::Text(selection.as_slice().join(",")),
        ListEncoding::InSet => ParamValue::InSet {
            values: selection.as_slice().to_vec(),
        },
    }
}

fn emit_range(
    params: &mut QueryParams,
    name: &str,
    value: &RangeBounds,
    default: &RangeBounds,
    paired: bool,
    encoding: RangeEncoding,
) {
    let mut send_min = value.min_differs(default);
    let mut send_max = value.max_differs(default);
    if !send_min && !send_max {
        return;
    }
    if paired {
        send_min = true;
        send_max = true;
    }

    match encoding {
        RangeEncoding::Operators => {
            params.insert(
                name,
                ParamValue::Bounds {
                    gte: send_min.then_some(value.min),
                    lte: send_max.then_some(value.max),
                },
            );
        }
        RangeEncoding::Suffixed => {
            if send_min {
                params.insert(format!("{}Min", name), ParamValue::Number(value.min));
            }
            if send_max {
                params.insert(format!("{}Max", name), ParamValue::Number(value.max));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gemlist_types::{CatalogKind, Facet};

    fn page() -> PageRequest {
        PageRequest::first(20)
    }

    #[test]
    fn test_default_model_emits_only_pagination() {
        for kind in CatalogKind::ALL {
            let ctx = FamilyContext::for_kind(kind);
            let params = compile(&FilterModel::defaults(kind), page(), None, &ctx).unwrap();
            assert_eq!(params.keys().collect::<Vec<_>>(), vec!["limit", "page"]);
        }
    }

    #[test]
    fn test_kind_mismatch() {
        let ctx = FamilyContext::for_kind(CatalogKind::MELEE_DIAMONDS);
        let filters = FilterModel::defaults(CatalogKind::SINGLE_DIAMONDS);
        assert_eq!(
            compile(&filters, page(), None, &ctx).unwrap_err(),
            Error::KindMismatch {
                filters: CatalogKind::SINGLE_DIAMONDS,
                context: CatalogKind::MELEE_DIAMONDS
            }
        );
    }

    #[test]
    fn test_only_differing_side_is_sent() {
        let ctx = FamilyContext::for_kind(CatalogKind::SINGLE_DIAMONDS);
        let mut filters = FilterModel::defaults(CatalogKind::SINGLE_DIAMONDS);
        filters
            .set_range(Facet::Price, RangeBounds::new(0.0, 5_000.0))
            .unwrap();

        let params = compile(&filters, page(), None, &ctx).unwrap();
        assert_eq!(
            params.get("price"),
            Some(&ParamValue::Bounds {
                gte: None,
                lte: Some(5_000.0)
            })
        );
    }

    #[test]
    fn test_paired_bounds_are_sent_together() {
        let ctx = FamilyContext::for_kind(CatalogKind::WATCHES);
        let mut filters = FilterModel::defaults(CatalogKind::WATCHES);
        filters
            .set_range(Facet::Price, RangeBounds::new(5_000.0, 2_000_000.0))
            .unwrap();
        filters
            .set_range(Facet::Year, RangeBounds::new(2000.0, 2030.0))
            .unwrap();

        let params = compile(&filters, page(), None, &ctx).unwrap();
        assert_eq!(params.get("priceMin"), Some(&ParamValue::Number(5_000.0)));
        assert_eq!(
            params.get("priceMax"),
            Some(&ParamValue::Number(2_000_000.0))
        );
        assert_eq!(params.get("yearMin"), Some(&ParamValue::Number(2000.0)));
        assert!(!params.contains_key("yearMax"));
    }

    #[test]
    fn test_melee_names_and_comma_lists() {
        let ctx = FamilyContext::for_kind(CatalogKind::MELEE_GEMSTONES);
        let mut filters = FilterModel::defaults(CatalogKind::MELEE_GEMSTONES);
        filters.select(Facet::Color, ["Red", "Pink"]).unwrap();
        filters
            .set_range(Facet::CaratWeight, RangeBounds::new(0.01, 1.0))
            .unwrap();

        let params = compile(&filters, page(), Some("price_asc"), &ctx).unwrap();
        assert_eq!(
            params.get("colorFrom"),
            Some(&ParamValue::text("Red,Pink"))
        );
        assert!(!params.contains_key("color"));
        assert_eq!(
            params.get("caratWeightPerPieceMin"),
            Some(&ParamValue::Number(0.01))
        );
        assert_eq!(params.get("sort"), Some(&ParamValue::text("price_asc")));
    }

    #[test]
    fn test_blank_sort_is_omitted() {
        let ctx = FamilyContext::for_kind(CatalogKind::WATCHES);
        let filters = FilterModel::defaults(CatalogKind::WATCHES);
        let params = compile(&filters, page(), Some("  "), &ctx).unwrap();
        assert!(!params.contains_key("sort"));
    }

    #[test]
    fn test_custom_pagination_keys() {
        let mut conventions = Conventions::for_family(gemlist_types::Family::Diamonds);
        conventions.page_key = "pageNo".to_string();
        conventions.limit_key = "pageSize".to_string();
        let ctx =
            FamilyContext::for_kind(CatalogKind::SINGLE_DIAMONDS).with_conventions(conventions);

        let params = compile(
            &FilterModel::defaults(CatalogKind::SINGLE_DIAMONDS),
            PageRequest::new(3, 50).unwrap(),
            None,
            &ctx,
        )
        .unwrap();
        assert_eq!(params.get("pageNo"), Some(&ParamValue::Integer(3)));
        assert_eq!(params.get("pageSize"), Some(&ParamValue::Integer(50)));
    }
}
