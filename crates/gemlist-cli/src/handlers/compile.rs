use crate::args::{FilterArgs, PageArgs};
use crate::context::ExecutionContext;
use crate::output;
use anyhow::Result;
use gemlist_engine::compile;
use gemlist_types::CatalogKind;
use tracing::debug;

pub fn handle(
    ctx: &ExecutionContext,
    kind: CatalogKind,
    filters: &FilterArgs,
    page: &PageArgs,
) -> Result<()> {
    let config = ctx.config()?;
    let model = filters.build(kind)?;
    let request = page.request(&config)?;
    let context = config.family_context(kind);

    let params = compile(&model, request, page.sort.as_deref(), &context)?;
    debug!(kind = %kind, active = model.active_facets().len(), params = params.len(), "compiled filters");

    output::write_params(&mut std::io::stdout().lock(), &params, ctx.format)
}
