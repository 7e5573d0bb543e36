use log::{debug, info};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use crate::models::{CatalogData, CatalogError, Platform, Product};
use crate::utils::simplify;

/// The product the search form defaults to.
pub const FIREFOX: &str = "firefox";
/// The product whose selection switches the form's version choices.
pub const MOBILE: &str = "mobile";

/// Validated, read-only product/platform/version reference data.
///
/// Built once at startup and shared by reference; every lookup the
/// normalizer performs is answered without further validation.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    platforms: Vec<Platform>,
    latest_betas: BTreeMap<String, String>,
    fallback_versions: BTreeMap<String, String>,
}

impl Catalog {
    pub fn new(data: CatalogData) -> Result<Self, CatalogError> {
        let CatalogData {
            products,
            platforms,
            latest_betas,
        } = data;

        let mut product_keys = BTreeSet::new();
        for product in &products {
            if product.short.is_empty() {
                return Err(CatalogError::EmptyKey("product"));
            }
            if !product_keys.insert(product.short.as_str()) {
                return Err(CatalogError::DuplicateKey {
                    kind: "product",
                    key: product.short.clone(),
                });
            }
        }
        if !product_keys.contains(FIREFOX) {
            return Err(CatalogError::MissingProduct(FIREFOX.to_string()));
        }

        let mut platform_keys = BTreeSet::new();
        for platform in &platforms {
            if platform.short.is_empty() {
                return Err(CatalogError::EmptyKey("platform"));
            }
            if !platform_keys.insert(platform.short.as_str()) {
                return Err(CatalogError::DuplicateKey {
                    kind: "platform",
                    key: platform.short.clone(),
                });
            }
            if let Some(unknown) = platform.prods.iter().find(|p| !product_keys.contains(p.as_str())) {
                return Err(CatalogError::UnknownProduct {
                    product: unknown.clone(),
                    referenced_by: format!("platform '{}'", platform.short),
                });
            }
        }

        if let Some(unknown) = latest_betas.keys().find(|p| !product_keys.contains(p.as_str())) {
            return Err(CatalogError::UnknownProduct {
                product: unknown.clone(),
                referenced_by: "latest_betas".to_string(),
            });
        }

        let simplified_betas = latest_betas
            .iter()
            .map(|(product, latest)| simplify(latest).map(|simplified| (product.as_str(), simplified)))
            .collect::<Result<BTreeMap<_, _>, CatalogError>>()?;

        let mut fallback_versions = BTreeMap::new();
        for product in &products {
            let fallback = match (product.default_version.as_deref(), simplified_betas.get(product.short.as_str())) {
                (Some(explicit), _) if !explicit.is_empty() => explicit.to_string(),
                (_, Some(latest)) => latest.clone(),
                _ => return Err(CatalogError::NoFallbackVersion(product.short.clone())),
            };
            if !product.versions().any(|v| v == fallback) {
                return Err(CatalogError::FallbackNotOffered {
                    product: product.short.clone(),
                    version: fallback,
                });
            }
            debug!("Fallback version for {}: {}", product.short, fallback);
            fallback_versions.insert(product.short.clone(), fallback);
        }

        Ok(Self {
            products,
            platforms,
            latest_betas,
            fallback_versions,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;
        Self::new(data)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        info!("Loading catalog from {}", path.display());
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The catalog the site ships with.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(builtin_data())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn product(&self, short: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.short == short)
    }

    pub fn platform(&self, short: &str) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.short == short)
    }

    /// Short names of every platform the product runs on.
    pub fn compatible_platforms(&self, product: &str) -> BTreeSet<&str> {
        self.platforms
            .iter()
            .filter(|platform| platform.prods.iter().any(|p| p == product))
            .map(|platform| platform.short.as_str())
            .collect()
    }

    /// Extra, beta and release versions of a product; empty for unknown
    /// products.
    pub fn versions(&self, product: &str) -> Vec<&str> {
        self.product(product)
            .map(|p| p.versions().collect())
            .unwrap_or_default()
    }

    pub fn latest_beta(&self, product: &str) -> Option<&str> {
        self.latest_betas.get(product).map(String::as_str)
    }

    /// The version used when none was submitted: the product's explicit
    /// default, else its simplified latest beta. Unknown products get
    /// Firefox's.
    pub fn fallback_version(&self, product: &str) -> &str {
        self.fallback_versions
            .get(product)
            .or_else(|| self.fallback_versions.get(FIREFOX))
            .map(String::as_str)
            .unwrap_or_default()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn builtin_data() -> CatalogData {
    let products = vec![
        Product {
            short: FIREFOX.to_string(),
            name: "Firefox".to_string(),
            default_version: None,
            extra_versions: strings(&["4.2a1pre"]),
            beta_versions: strings(&["4.0b12", "4.0b11", "4.0b10", "4.0b9", "4.0b8"]),
            release_versions: strings(&["3.6.13", "3.6.12", "3.6"]),
        },
        Product {
            short: MOBILE.to_string(),
            name: "Mobile".to_string(),
            default_version: None,
            extra_versions: strings(&["4.1a1pre"]),
            beta_versions: strings(&["4.0b5", "4.0b4", "4.0b3"]),
            release_versions: strings(&["1.1", "1.0.1"]),
        },
    ];

    let desktop = |short: &str, name: &str| Platform {
        short: short.to_string(),
        name: name.to_string(),
        prods: strings(&[FIREFOX]),
    };
    let handheld = |short: &str, name: &str| Platform {
        short: short.to_string(),
        name: name.to_string(),
        prods: strings(&[MOBILE]),
    };
    let platforms = vec![
        desktop("win7", "Windows 7"),
        desktop("vista", "Windows Vista"),
        desktop("xp", "Windows XP"),
        desktop("mac", "Mac OS X"),
        desktop("linux", "Linux"),
        handheld("android", "Android"),
        handheld("maemo", "Maemo"),
    ];

    let latest_betas = BTreeMap::from([
        (FIREFOX.to_string(), "4.0b12".to_string()),
        (MOBILE.to_string(), "4.0b5".to_string()),
    ]);

    CatalogData {
        products,
        platforms,
        latest_betas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(latest_firefox: Option<&str>) -> CatalogData {
        CatalogData {
            products: vec![Product {
                short: FIREFOX.to_string(),
                name: "Firefox".to_string(),
                default_version: None,
                extra_versions: vec![],
                beta_versions: strings(&["4.0b13"]),
                release_versions: vec![],
            }],
            platforms: vec![],
            latest_betas: latest_firefox
                .map(|v| BTreeMap::from([(FIREFOX.to_string(), v.to_string())]))
                .unwrap_or_default(),
        }
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.products().len(), 2);
        assert_eq!(catalog.fallback_version(FIREFOX), "4.0b12");
        assert_eq!(catalog.fallback_version(MOBILE), "4.0b5");
        assert_eq!(catalog.latest_beta(MOBILE), Some("4.0b5"));
    }

    #[test]
    fn test_compatible_platforms() {
        let catalog = Catalog::builtin().unwrap();
        let mobile = catalog.compatible_platforms(MOBILE);
        assert_eq!(mobile, BTreeSet::from(["android", "maemo"]));
        assert!(catalog.compatible_platforms(FIREFOX).contains("linux"));
        assert!(catalog.compatible_platforms("thunderbird").is_empty());
    }

    #[test]
    fn test_versions_are_ordered_extra_beta_release() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(
            catalog.versions(MOBILE),
            vec!["4.1a1pre", "4.0b5", "4.0b4", "4.0b3", "1.1", "1.0.1"]
        );
        assert!(catalog.versions("thunderbird").is_empty());
    }

    #[test]
    fn test_latest_beta_is_simplified() {
        let catalog = Catalog::new(minimal(Some("4.0b13pre"))).unwrap();
        assert_eq!(catalog.fallback_version(FIREFOX), "4.0b13");
        assert_eq!(catalog.fallback_version("unknown"), "4.0b13");
    }

    #[test]
    fn test_explicit_default_version_wins() {
        let mut data = minimal(Some("4.0b13pre"));
        data.products[0].default_version = Some("3.6.13".to_string());
        data.products[0].release_versions = strings(&["3.6.13"]);
        let catalog = Catalog::new(data).unwrap();
        assert_eq!(catalog.fallback_version(FIREFOX), "3.6.13");
    }

    #[test]
    fn test_missing_fallback_is_rejected() {
        let err = Catalog::new(minimal(None)).unwrap_err();
        assert!(matches!(err, CatalogError::NoFallbackVersion(ref p) if p == FIREFOX));
    }

    #[test]
    fn test_unparsable_latest_beta_is_rejected() {
        let err = Catalog::new(minimal(Some("four"))).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidVersion(_)));
    }

    #[test]
    fn test_shadowed_latest_beta_is_still_validated() {
        let mut data = minimal(Some("garbage"));
        data.products[0].default_version = Some("4.0b13".to_string());
        let err = Catalog::new(data).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidVersion(ref v) if v == "garbage"));
    }

    #[test]
    fn test_fallback_must_be_offered_by_product() {
        let mut data = builtin_data();
        data.latest_betas.insert(MOBILE.to_string(), "4.0b9pre".to_string());
        let err = Catalog::new(data).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::FallbackNotOffered { ref product, ref version } if product == MOBILE && version == "4.0b9"
        ));

        let mut data = minimal(Some("4.0b13"));
        data.products[0].default_version = Some("3.5".to_string());
        assert!(matches!(Catalog::new(data), Err(CatalogError::FallbackNotOffered { .. })));
    }

    #[test]
    fn test_unknown_product_references() {
        let mut data = minimal(Some("4.0b13"));
        data.platforms.push(Platform {
            short: "android".to_string(),
            name: "Android".to_string(),
            prods: strings(&[MOBILE]),
        });
        let err = Catalog::new(data).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownProduct { ref product, .. } if product == MOBILE));

        let mut data = minimal(Some("4.0b13"));
        data.latest_betas.insert(MOBILE.to_string(), "4.0b5".to_string());
        let err = Catalog::new(data).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownProduct { ref referenced_by, .. } if referenced_by == "latest_betas"));
    }

    #[test]
    fn test_structural_errors() {
        let mut data = builtin_data();
        data.products.retain(|p| p.short != FIREFOX);
        assert!(matches!(Catalog::new(data), Err(CatalogError::MissingProduct(_))));

        let mut data = builtin_data();
        let copy = data.platforms[0].clone();
        data.platforms.push(copy);
        assert!(matches!(
            Catalog::new(data),
            Err(CatalogError::DuplicateKey { kind: "platform", .. })
        ));

        let mut data = builtin_data();
        data.platforms[0].short.clear();
        assert!(matches!(Catalog::new(data), Err(CatalogError::EmptyKey("platform"))));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "products": [
                {"short": "firefox", "name": "Firefox", "beta_versions": ["5.0b2", "5.0b1"]}
            ],
            "platforms": [
                {"short": "linux", "name": "Linux", "prods": ["firefox"]}
            ],
            "latest_betas": {"firefox": "5.0b2pre"}
        }"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.versions(FIREFOX), vec!["5.0b2", "5.0b1"]);
        assert_eq!(catalog.fallback_version(FIREFOX), "5.0b2");
        assert!(catalog.platform("linux").is_some());

        assert!(matches!(Catalog::from_json("{"), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_from_missing_path() {
        let err = Catalog::from_path(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
