use crate::args::OutputFormat;
use crate::context::ExecutionContext;
use crate::output;
use anyhow::{Context, Result};
use gemlist_engine::decode;
use gemlist_types::{CatalogKind, QueryParams};
use serde_json::json;
use std::io::Write;
use std::path::Path;
use tracing::warn;

use super::read_input;

pub fn handle(ctx: &ExecutionContext, kind: CatalogKind, file: &Path) -> Result<()> {
    let config = ctx.config()?;
    let params: QueryParams = serde_json::from_str(&read_input(file)?)
        .with_context(|| format!("{} is not a JSON object of parameters", file.display()))?;

    let decoded = decode(&params, &config.family_context(kind))?;
    for key in &decoded.unknown_keys {
        warn!(key = %key, "ignoring parameter that matches no facet");
    }

    let mut out = std::io::stdout().lock();
    match ctx.format {
        OutputFormat::Json => output::write_json(
            &mut out,
            &json!({
                "filters": decoded.filters,
                "page": decoded.page,
                "sort": decoded.sort,
                "unknownKeys": decoded.unknown_keys,
            }),
        ),
        OutputFormat::Csv => output::write_filters(&mut out, &decoded.filters, ctx.format),
        OutputFormat::Plain => {
            output::write_filters(&mut out, &decoded.filters, ctx.format)?;
            writeln!(
                out,
                "page {} (size {})",
                decoded.page.page(),
                decoded.page.page_size()
            )?;
            if let Some(sort) = &decoded.sort {
                writeln!(out, "sort {}", sort)?;
            }
            if !decoded.unknown_keys.is_empty() {
                writeln!(out, "ignored {}", decoded.unknown_keys.join(", "))?;
            }
            Ok(())
        }
    }
}
