use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    pub short: String,
    pub name: String,
    /// Overrides the latest beta as the version used when none is submitted.
    #[serde(default)]
    pub default_version: Option<String>,
    #[serde(default)]
    pub extra_versions: Vec<String>,
    #[serde(default)]
    pub beta_versions: Vec<String>,
    #[serde(default)]
    pub release_versions: Vec<String>,
}

impl Product {
    /// Extra, beta, then release versions, in that order.
    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.extra_versions
            .iter()
            .chain(&self.beta_versions)
            .chain(&self.release_versions)
            .map(String::as_str)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Platform {
    pub short: String,
    pub name: String,
    /// Short names of the products that run on this platform.
    pub prods: Vec<String>,
}

/// Reference data as it is written in a catalog file.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CatalogData {
    pub products: Vec<Product>,
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub latest_betas: BTreeMap<String, String>,
}
