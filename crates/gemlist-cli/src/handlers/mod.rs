pub mod browse;
pub mod compile;
pub mod config;
pub mod decode;
pub mod defaults;
pub mod normalize;

use anyhow::{Context, Result};
use gemlist_runtime::Config;
use gemlist_types::PageRequest;
use std::io::Read;
use std::path::Path;

use crate::args::PageArgs;

/// File contents, or stdin when the path is `-`
fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn page_request(config: &Config, page: u64, limit: Option<u64>) -> Result<PageRequest> {
    Ok(PageRequest::new(
        page,
        limit.unwrap_or(config.listing.default_page_size),
    )?)
}

impl PageArgs {
    fn request(&self, config: &Config) -> Result<PageRequest> {
        page_request(config, self.page, self.limit)
    }
}
