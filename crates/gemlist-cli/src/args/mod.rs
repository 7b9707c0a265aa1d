mod commands;
mod common;
mod enums;

pub use commands::*;
pub use common::*;
pub use enums::*;

use clap::Parser;

#[derive(Parser)]
#[command(name = "gemlist")]
#[command(about = "Compile listing filters and normalize marketplace responses", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory holding config.toml (defaults to GEMLIST_PATH or the platform config dir)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    /// Overrides GEMLIST_LOG
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands,
}
