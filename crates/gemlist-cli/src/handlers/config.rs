use crate::args::{ConfigCommand, OutputFormat};
use crate::context::ExecutionContext;
use crate::output;
use anyhow::{Result, bail};
use gemlist_runtime::Config;

pub fn handle(ctx: &ExecutionContext, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Init { force } => init(ctx, force),
        ConfigCommand::Show => show(ctx),
    }
}

fn init(ctx: &ExecutionContext, force: bool) -> Result<()> {
    let path = ctx.config_path();
    if path.exists() && !force {
        bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    Config::default().save_to(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn show(ctx: &ExecutionContext) -> Result<()> {
    let config = ctx.config()?;
    match ctx.format {
        OutputFormat::Json => output::write_json(&mut std::io::stdout().lock(), &config),
        OutputFormat::Plain | OutputFormat::Csv => {
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}
