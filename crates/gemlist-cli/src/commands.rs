use super::args::{Cli, Commands};
use super::context::ExecutionContext;
use super::handlers;
use anyhow::Result;
use gemlist_runtime::resolve_data_dir;

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let ctx = ExecutionContext::new(data_dir, cli.format);

    match cli.command {
        Commands::Defaults { catalog } => handlers::defaults::handle(&ctx, catalog.kind()?),

        Commands::Compile {
            catalog,
            filters,
            page,
        } => handlers::compile::handle(&ctx, catalog.kind()?, &filters, &page),

        Commands::Decode { catalog, file } => {
            handlers::decode::handle(&ctx, catalog.kind()?, &file)
        }

        Commands::Normalize {
            catalog,
            file,
            page,
            limit,
        } => handlers::normalize::handle(&ctx, catalog.kind()?, &file, page, limit),

        Commands::Browse {
            catalog,
            filters,
            page,
        } => handlers::browse::handle(&ctx, catalog.kind()?, &filters, &page),

        Commands::Config { command } => handlers::config::handle(&ctx, command),
    }
}
