use log::info;
use std::{env, path::PathBuf};

use crate::models::CatalogError;
use crate::services::Catalog;

pub struct FormConfig {
    /// JSON catalog to load instead of the built-in one.
    pub catalog_path: Option<PathBuf>,
    pub log_level: String,
}

impl FormConfig {
    /// Reads `CATALOG_PATH` and `LOG_LEVEL` from the environment. Call after
    /// `dotenv()` so `.env` values are visible.
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let catalog_path = lookup("CATALOG_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);
        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        FormConfig {
            catalog_path,
            log_level,
        }
    }

    /// Builds and validates the catalog once at startup.
    pub fn catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => Catalog::from_path(path),
            None => {
                info!("CATALOG_PATH not set, using the built-in catalog");
                Catalog::builtin()
            }
        }
    }
}
