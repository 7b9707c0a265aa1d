use crate::args::OutputFormat;
use anyhow::Result;
use gemlist_runtime::Config;
use std::path::{Path, PathBuf};

pub struct ExecutionContext {
    data_dir: PathBuf,
    pub format: OutputFormat,
}

impl ExecutionContext {
    pub fn new(data_dir: PathBuf, format: OutputFormat) -> Self {
        Self { data_dir, format }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_path(&self) -> PathBuf {
        Config::path_in(&self.data_dir)
    }

    /// Config from the data dir; defaults when no file exists yet
    pub fn config(&self) -> Result<Config> {
        Ok(Config::load_from(&self.config_path())?)
    }
}
