use crate::fetch::Method;
use crate::{Error, Result};
use gemlist_engine::{Conventions, FamilyContext, ListEncoding, RangeEncoding};
use gemlist_types::{CatalogKind, DEFAULT_PAGE_SIZE, Facet, PageRequest};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Resolve the gemlist data directory based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. GEMLIST_PATH environment variable (with tilde expansion)
/// 3. Platform config directory
/// 4. ~/.gemlist (fallback for systems without one)
pub fn resolve_data_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    // Priority 1: Explicit path
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    // Priority 2: GEMLIST_PATH environment variable
    if let Ok(env_path) = std::env::var("GEMLIST_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    // Priority 3: platform config directory
    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("gemlist"));
    }

    // Priority 4: ~/.gemlist
    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".gemlist"));
    }

    Err(Error::Config(
        "Could not determine data directory: no HOME directory or config directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token; takes precedence over `token_env`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Environment variable consulted when no token is configured
    #[serde(default = "default_token_env")]
    pub token_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_token_env() -> String {
    "GEMLIST_TOKEN".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            token_env: default_token_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    /// How many recent search terms are remembered
    #[serde(default = "default_recent_searches")]
    pub recent_searches: usize,
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

fn default_recent_searches() -> usize {
    10
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            recent_searches: default_recent_searches(),
        }
    }
}

/// Per-endpoint overrides; unset fields keep the built-in conventions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<Method>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_encoding: Option<ListEncoding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_encoding: Option<RangeEncoding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paired_ranges: Option<Vec<Facet>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_key: Option<String>,
}

/// Where and how a catalog kind is fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub path: String,
    pub method: Method,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub listing: ListingConfig,
    /// Keyed by catalog (`melee_diamonds`) or family (`diamonds`);
    /// the catalog entry wins field by field.
    #[serde(default)]
    pub endpoints: BTreeMap<String, EndpointConfig>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::default_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(resolve_data_dir(None)?.join("config.toml"))
    }

    /// Config file inside a data directory
    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join("config.toml")
    }

    /// Merged overrides for a catalog kind: family entry first, then the
    /// catalog entry on top.
    pub fn endpoint_overrides(&self, kind: CatalogKind) -> EndpointConfig {
        let mut merged = EndpointConfig::default();
        for key in [kind.family().as_str().to_string(), catalog_key(kind)] {
            if let Some(entry) = self.endpoints.get(&key) {
                merged = merge(merged, entry.clone());
            }
        }
        merged
    }

    /// Built-in family context with configured conventions applied
    pub fn family_context(&self, kind: CatalogKind) -> FamilyContext {
        let overrides = self.endpoint_overrides(kind);
        let builtin = Conventions::for_family(kind.family());
        let conventions = Conventions {
            list_encoding: overrides.list_encoding.unwrap_or(builtin.list_encoding),
            range_encoding: overrides.range_encoding.unwrap_or(builtin.range_encoding),
            paired_ranges: overrides
                .paired_ranges
                .map(|facets| facets.into_iter().collect())
                .unwrap_or(builtin.paired_ranges),
            page_key: overrides.page_key.unwrap_or(builtin.page_key),
            limit_key: overrides.limit_key.unwrap_or(builtin.limit_key),
            sort_key: overrides.sort_key.unwrap_or(builtin.sort_key),
        };
        FamilyContext::for_kind(kind).with_conventions(conventions)
    }

    pub fn endpoint(&self, kind: CatalogKind) -> Endpoint {
        let overrides = self.endpoint_overrides(kind);
        Endpoint {
            path: overrides.path.unwrap_or_else(|| default_endpoint_path(kind)),
            method: overrides.method.unwrap_or_default(),
        }
    }

    /// Explicit token wins over the environment variable; blank values count as unset
    pub fn resolve_token(&self) -> Option<String> {
        self.api
            .token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| {
                std::env::var(&self.api.token_env)
                    .ok()
                    .filter(|t| !t.trim().is_empty())
            })
    }

    /// First page at the configured default size
    pub fn first_page(&self) -> PageRequest {
        PageRequest::first(self.listing.default_page_size)
    }
}

fn catalog_key(kind: CatalogKind) -> String {
    format!("{}_{}", kind.subtype(), kind.family())
}

fn default_endpoint_path(kind: CatalogKind) -> String {
    if kind.is_melee() {
        format!("/melee-{}", kind.family())
    } else {
        format!("/{}", kind.family())
    }
}

fn merge(base: EndpointConfig, over: EndpointConfig) -> EndpointConfig {
    EndpointConfig {
        path: over.path.or(base.path),
        method: over.method.or(base.method),
        list_encoding: over.list_encoding.or(base.list_encoding),
        range_encoding: over.range_encoding.or(base.range_encoding),
        paired_ranges: over.paired_ranges.or(base.paired_ranges),
        page_key: over.page_key.or(base.page_key),
        limit_key: over.limit_key.or(base.limit_key),
        sort_key: over.sort_key.or(base.sort_key),
    }
}
