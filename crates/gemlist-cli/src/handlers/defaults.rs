use crate::context::ExecutionContext;
use crate::output;
use anyhow::Result;
use gemlist_types::{CatalogKind, FilterModel};

pub fn handle(ctx: &ExecutionContext, kind: CatalogKind) -> Result<()> {
    let model = FilterModel::defaults(kind);
    output::write_filters(&mut std::io::stdout().lock(), &model, ctx.format)
}
