// ⚙️ Configuration - environment variables with defaults

use crate::store::Store;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const DEFAULT_PAGE_SIZE: i32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// CATALOG_BIND_ADDR
    pub bind_addr: String,
    /// CATALOG_DATA - JSON data file replacing the mock catalog
    pub data_path: Option<PathBuf>,
    /// CATALOG_LOG - tracing filter directive
    pub log_filter: String,
    /// CATALOG_PAGE_SIZE - `first` used when fetching a product's categories
    pub page_size: i32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            data_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl CatalogConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value lookup (tests pass a map here)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = CatalogConfig::default();

        if let Some(addr) = lookup("CATALOG_BIND_ADDR").filter(|v| !v.is_empty()) {
            config.bind_addr = addr;
        }
        if let Some(path) = lookup("CATALOG_DATA").filter(|v| !v.is_empty()) {
            config.data_path = Some(PathBuf::from(path));
        }
        if let Some(filter) = lookup("CATALOG_LOG").filter(|v| !v.is_empty()) {
            config.log_filter = filter;
        }
        if let Some(size) = lookup("CATALOG_PAGE_SIZE").filter(|v| !v.is_empty()) {
            config.page_size = size
                .parse::<i32>()
                .ok()
                .filter(|n| *n >= 0)
                .with_context(|| format!("CATALOG_PAGE_SIZE must be a non-negative integer, got {:?}", size))?;
        }

        Ok(config)
    }

    /// The configured data file, or the mock catalog when none is set
    pub fn load_store(&self) -> Result<Store> {
        match &self.data_path {
            Some(path) => Store::load(path),
            None => Ok(Store::with_mock_data()),
        }
    }
}
