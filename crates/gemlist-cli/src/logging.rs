use crate::args::LogLevel;
use tracing_subscriber::EnvFilter;

/// Log to stderr; `--log-level` wins over `GEMLIST_LOG`, default is `warn`.
pub fn init_logging(level: Option<LogLevel>) {
    let filter = match level {
        Some(level) => EnvFilter::new(format!("warn,gemlist={0},gemlist_runtime={0}", level)),
        None => EnvFilter::try_from_env("GEMLIST_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    // A second init (e.g. in tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
