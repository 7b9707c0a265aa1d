//! Assertions that make listing tests read at the level of the domain:
//! - compiled parameter sets
//! - item counts and pagination in CLI JSON output

use anyhow::{Context, Result};
use gemlist_types::QueryParams;
use serde_json::Value;
use std::collections::BTreeSet;

/// Assert that `params` renders to exactly the given query pairs.
pub fn assert_query_pairs(params: &QueryParams, expected: &[(&str, &str)]) -> Result<()> {
    let actual: BTreeSet<(String, String)> = params.to_query_pairs().into_iter().collect();
    let expected: BTreeSet<(String, String)> = expected
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    if actual != expected {
        let missing: Vec<_> = expected.difference(&actual).collect();
        let unexpected: Vec<_> = actual.difference(&expected).collect();
        anyhow::bail!(
            "Query pairs differ; missing {:?}, unexpected {:?}",
            missing,
            unexpected
        );
    }

    Ok(())
}

/// Assert that none of `keys` were emitted.
pub fn assert_absent(params: &QueryParams, keys: &[&str]) -> Result<()> {
    for key in keys {
        if params.contains_key(key) {
            anyhow::bail!("Expected no '{}' param, got {:?}", key, params.get(key));
        }
    }
    Ok(())
}

/// Assert that a JSON listing page holds `expected` items.
pub fn assert_item_count(json: &Value, expected: usize) -> Result<()> {
    let items = json["items"]
        .as_array()
        .context("Expected 'items' array in JSON")?;

    if items.len() != expected {
        anyhow::bail!("Expected {} items, got {}", expected, items.len());
    }

    Ok(())
}

/// Assert the page number and total of a JSON listing page.
pub fn assert_pagination(json: &Value, page: u64, total: u64) -> Result<()> {
    let pagination = json
        .get("pagination")
        .context("Expected 'pagination' object in JSON")?;

    let actual_page = pagination["page"].as_u64().context("Missing pagination.page")?;
    let actual_total = pagination["total"]
        .as_u64()
        .context("Missing pagination.total")?;

    if (actual_page, actual_total) != (page, total) {
        anyhow::bail!(
            "Expected page {} of total {}, got page {} of total {}",
            page,
            total,
            actual_page,
            actual_total
        );
    }

    Ok(())
}

/// Assert that every item carries a finite numeric price.
pub fn assert_prices_finite(json: &Value) -> Result<()> {
    let items = json["items"]
        .as_array()
        .context("Expected 'items' array in JSON")?;

    for (i, item) in items.iter().enumerate() {
        let price = item["price"]
            .as_f64()
            .with_context(|| format!("Item {} has no numeric price", i))?;
        if !price.is_finite() {
            anyhow::bail!("Item {} has non-finite price {}", i, price);
        }
    }

    Ok(())
}
