use crate::context::ExecutionContext;
use crate::output;
use anyhow::{Context, Result, bail};
use chrono::Utc;
use gemlist_engine::{envelope_failure, normalize_listing};
use gemlist_types::CatalogKind;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

use super::{page_request, read_input};

pub fn handle(
    ctx: &ExecutionContext,
    kind: CatalogKind,
    file: &Path,
    page: u64,
    limit: Option<u64>,
) -> Result<()> {
    let config = ctx.config()?;
    let raw: Value = serde_json::from_str(&read_input(file)?)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;

    if let Some(message) = envelope_failure(&raw) {
        bail!("Response reports failure: {}", message);
    }

    let fallback = page_request(&config, page, limit)?;
    let listing = normalize_listing(&raw, kind, fallback, Utc::now());
    debug!(kind = %kind, items = listing.items.len(), total = listing.pagination.total, "normalized response");

    output::write_listing(
        &mut std::io::stdout().lock(),
        &listing,
        ctx.format,
        output::use_color(),
    )
}
