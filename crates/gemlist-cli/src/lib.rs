mod args;
mod commands;
mod context;
mod handlers;
mod logging;
pub mod output;

pub use args::{
    CatalogArgs, Cli, Commands, ConfigCommand, FilterArgs, LogLevel, OutputFormat, PageArgs,
};
pub use commands::run;
pub use logging::init_logging;
