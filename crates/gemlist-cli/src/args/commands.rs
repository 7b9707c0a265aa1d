use super::common::{CatalogArgs, FilterArgs, PageArgs};
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Print the default filter model of a catalog")]
    Defaults {
        #[command(flatten)]
        catalog: CatalogArgs,
    },

    #[command(about = "Compile filters into listing API parameters")]
    Compile {
        #[command(flatten)]
        catalog: CatalogArgs,

        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        page: PageArgs,
    },

    #[command(about = "Decode listing API parameters back into filters")]
    Decode {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// JSON object of parameters ('-' reads stdin)
        #[arg(value_name = "QUERY_JSON_FILE")]
        file: PathBuf,
    },

    #[command(about = "Normalize a raw listing response")]
    Normalize {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Raw response body ('-' reads stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page assumed when the response carries no metadata
        #[arg(long, default_value = "1")]
        page: u64,

        /// Page size assumed when the response carries no metadata
        #[arg(long)]
        limit: Option<u64>,
    },

    #[command(about = "Fetch and print one page of a live listing")]
    Browse {
        #[command(flatten)]
        catalog: CatalogArgs,

        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        page: PageArgs,
    },

    #[command(about = "Manage the configuration file")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Write a config.toml with default settings")]
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    #[command(about = "Print the effective configuration")]
    Show,
}
