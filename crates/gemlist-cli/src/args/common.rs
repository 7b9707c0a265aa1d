use anyhow::{Context, Result, bail};
use clap::Args;
use gemlist_types::{CatalogKind, Facet, Family, FilterModel, Subtype};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Args)]
pub struct CatalogArgs {
    #[arg(long, help = "diamonds, gemstones or watches")]
    pub family: Family,

    #[arg(long, default_value = "single", help = "single or melee")]
    pub subtype: Subtype,
}

impl CatalogArgs {
    pub fn kind(&self) -> Result<CatalogKind> {
        Ok(CatalogKind::new(self.family, self.subtype)?)
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    #[arg(long, value_name = "FILE", help = "Filter model JSON to start from")]
    pub filters: Option<PathBuf>,

    #[arg(
        long,
        value_name = "FACET=TOKENS",
        help = "Select comma-separated tokens of a multi-select facet (repeatable)"
    )]
    pub select: Vec<String>,

    #[arg(
        long,
        value_name = "FACET=MIN..MAX",
        help = "Narrow a range facet; either side may be left empty (repeatable)"
    )]
    pub range: Vec<String>,

    #[arg(long, value_name = "FACET=VALUE", help = "Set a text facet (repeatable)")]
    pub text: Vec<String>,
}

impl FilterArgs {
    /// Filter file (or defaults) with the flag edits applied on top
    pub fn build(&self, kind: CatalogKind) -> Result<FilterModel> {
        let mut model = match &self.filters {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let model: FilterModel = serde_json::from_str(&content)
                    .with_context(|| format!("Invalid filter file {}", path.display()))?;
                if model.kind() != kind {
                    bail!(
                        "Filter file {} is for {}, not {}",
                        path.display(),
                        model.kind(),
                        kind
                    );
                }
                model
            }
            None => FilterModel::defaults(kind),
        };

        // repeated --select flags for one facet accumulate
        let mut selections: BTreeMap<Facet, Vec<String>> = BTreeMap::new();
        for raw in &self.select {
            let (facet, tokens) = split_assignment(raw)?;
            selections
                .entry(facet)
                .or_default()
                .extend(tokens.split(',').map(|t| t.trim().to_string()));
        }
        for (facet, tokens) in selections {
            model.select(facet, tokens)?;
        }

        for raw in &self.range {
            let (facet, bounds) = split_assignment(raw)?;
            let Some((min, max)) = bounds.split_once("..") else {
                bail!("Expected MIN..MAX for '{}', got '{}'", facet, bounds);
            };
            model.set_range_text(facet, min, max)?;
        }

        for raw in &self.text {
            let (facet, value) = split_assignment(raw)?;
            model.set_text(facet, value)?;
        }

        Ok(model)
    }
}

#[derive(Debug, Clone, Args)]
pub struct PageArgs {
    #[arg(long, default_value = "1")]
    pub page: u64,

    #[arg(long, help = "Page size (defaults to the configured size)")]
    pub limit: Option<u64>,

    #[arg(long, help = "Sort key passed through to the API")]
    pub sort: Option<String>,
}

fn split_assignment(raw: &str) -> Result<(Facet, &str)> {
    let Some((facet, value)) = raw.split_once('=') else {
        bail!("Expected FACET=VALUE, got '{}'", raw);
    };
    Ok((facet.trim().parse()?, value))
}
