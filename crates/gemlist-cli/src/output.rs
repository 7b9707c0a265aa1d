//! Rendering of filters, parameters and listing pages.
//!
//! Every renderer writes to a `Write` so tests can capture the output.

use crate::args::OutputFormat;
use anyhow::Result;
use gemlist_types::{FacetRef, FilterModel, ListingPage, NormalizedItem, QueryParams, format_number};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::Write;

const TITLE_WIDTH: usize = 44;

/// Colors only on an interactive stdout without NO_COLOR
pub fn use_color() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

pub fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

pub fn write_filters(out: &mut impl Write, model: &FilterModel, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, model),
        OutputFormat::Csv => {
            let mut csv = csv::Writer::from_writer(out);
            csv.write_record(["facet", "kind", "value"])?;
            for (facet, view) in model.facets() {
                let kind = view.kind().to_string();
                let value = facet_value(&view);
                csv.write_record([facet.as_str(), kind.as_str(), value.as_str()])?;
            }
            csv.flush()?;
            Ok(())
        }
        OutputFormat::Plain => {
            writeln!(out, "{}", model.kind())?;
            for (facet, view) in model.facets() {
                writeln!(
                    out,
                    "  {:<18} {:<12} {}",
                    facet.as_str(),
                    view.kind().to_string(),
                    facet_value(&view)
                )?;
            }
            Ok(())
        }
    }
}

fn facet_value(view: &FacetRef<'_>) -> String {
    match view {
        FacetRef::Multi(selection) if selection.is_empty() => "any".to_string(),
        FacetRef::Multi(selection) => selection.as_slice().join(","),
        FacetRef::Range { value, .. } => {
            format!("{}..{}", format_number(value.min), format_number(value.max))
        }
        FacetRef::Text("") => "-".to_string(),
        FacetRef::Text(text) => text.to_string(),
    }
}

pub fn write_params(out: &mut impl Write, params: &QueryParams, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, &params.to_json()),
        OutputFormat::Csv => {
            let mut csv = csv::Writer::from_writer(out);
            csv.write_record(["key", "value"])?;
            for (key, value) in params.to_query_pairs() {
                csv.write_record([key, value])?;
            }
            csv.flush()?;
            Ok(())
        }
        OutputFormat::Plain => {
            writeln!(out, "{}", params.to_query_string())?;
            Ok(())
        }
    }
}

pub fn write_listing(
    out: &mut impl Write,
    page: &ListingPage<NormalizedItem>,
    format: OutputFormat,
    color: bool,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, page),
        OutputFormat::Csv => {
            let mut csv = csv::Writer::from_writer(out);
            csv.write_record(["id", "family", "title", "price", "images"])?;
            for item in &page.items {
                let title = item.title();
                let price = format_number(item.price());
                let images = item.images().len().to_string();
                csv.write_record([
                    item.id(),
                    item.family().as_str(),
                    title.as_str(),
                    price.as_str(),
                    images.as_str(),
                ])?;
            }
            csv.flush()?;
            Ok(())
        }
        OutputFormat::Plain => write_listing_plain(out, page, color),
    }
}

fn write_listing_plain(
    out: &mut impl Write,
    page: &ListingPage<NormalizedItem>,
    color: bool,
) -> Result<()> {
    if page.items.is_empty() {
        writeln!(out, "No items found.")?;
    }

    let id_width = page
        .items
        .iter()
        .map(|item| item.id().chars().count())
        .max()
        .unwrap_or(0);

    for item in &page.items {
        let id = format!("{:<width$}", item.id(), width = id_width);
        let title = format!("{:<width$}", truncate(&item.title(), TITLE_WIDTH), width = TITLE_WIDTH);
        let price = format!("{:>12}", format_number(item.price()));
        if color {
            writeln!(out, "{}  {}  {}", id.dimmed(), title, price.green())?;
        } else {
            writeln!(out, "{}  {}  {}", id, title, price)?;
        }
    }

    let p = &page.pagination;
    writeln!(
        out,
        "Page {} of {} ({} items)",
        p.page,
        p.total_pages.max(1),
        p.total
    )?;
    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}
