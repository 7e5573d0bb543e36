use log::debug;
use std::collections::BTreeMap;

use crate::models::field::{
    CLUSTER, PAGE, PLATFORM, PRODUCT, Q, SENTIMENT, SHOW_ONE_OFFS, SITE, VERSION,
};
use crate::models::{
    FieldDefinition, FieldDefinitions, FieldError, FieldKind, FieldValue, NormalizedRecord,
    RawInput,
};
use crate::services::catalog_service::{Catalog, FIREFOX, MOBILE};
use crate::services::field_binder::bind;

pub const SENTIMENT_CHOICES: [&str; 4] = ["", "happy", "sad", "idea"];

/// The static field table of the website issues search page.
///
/// `version` is not part of it: its choices depend on the submitted product
/// and are set up per form.
pub fn website_issues_fields(catalog: &Catalog) -> FieldDefinitions {
    let products = catalog.products().iter().map(|p| p.short.clone());
    let platforms = std::iter::once(String::new())
        .chain(catalog.platforms().iter().map(|p| p.short.clone()));

    FieldDefinitions::new(vec![
        FieldDefinition::text(Q, ""),
        FieldDefinition::choice(SENTIMENT, "", SENTIMENT_CHOICES),
        FieldDefinition::choice(PRODUCT, FIREFOX, products),
        FieldDefinition::choice(PLATFORM, "", platforms),
        FieldDefinition::boolean(SHOW_ONE_OFFS, false),
        FieldDefinition::integer(PAGE, Some(1)),
        FieldDefinition::integer(SITE, None),
        FieldDefinition::integer(CLUSTER, None),
    ])
}

/// A search form bound to one request's parameters.
pub struct WebsiteIssuesSearchForm<'a> {
    raw: &'a RawInput,
    fields: &'a FieldDefinitions,
    catalog: &'a Catalog,
    product_initial: &'static str,
    version_field: FieldDefinition,
    version_choices: Vec<String>,
    cleaned: Option<NormalizedRecord>,
}

impl<'a> WebsiteIssuesSearchForm<'a> {
    /// Sets up the version choices from a tentative parse of the submitted
    /// product. Only Mobile switches them away from Firefox's.
    pub fn new(raw: &'a RawInput, fields: &'a FieldDefinitions, catalog: &'a Catalog) -> Self {
        let picked = match tentative_product(raw, fields) {
            Ok(product) => Some(product),
            Err(e) => {
                debug!("{}", e);
                None
            }
        };

        let (product_initial, versions_of) = if picked.as_deref() == Some(MOBILE) {
            (MOBILE, MOBILE)
        } else {
            (FIREFOX, FIREFOX)
        };
        let version_choices: Vec<String> = catalog
            .versions(versions_of)
            .into_iter()
            .map(str::to_string)
            .collect();
        let version_field = FieldDefinition::choice(VERSION, "", version_choices.iter().cloned());

        Self {
            raw,
            fields,
            catalog,
            product_initial,
            version_field,
            version_choices,
            cleaned: None,
        }
    }

    /// The product the page shows as selected before any submission.
    pub fn product_initial(&self) -> &str {
        self.product_initial
    }

    pub fn version_choices(&self) -> &[String] {
        &self.version_choices
    }

    /// Normalizes once and returns the cached record on later calls.
    pub fn cleaned_data(&mut self) -> &NormalizedRecord {
        let record = match self.cleaned.take() {
            Some(record) => record,
            None => self.clean(),
        };
        self.cleaned.insert(record)
    }

    pub fn into_cleaned_data(mut self) -> NormalizedRecord {
        match self.cleaned.take() {
            Some(record) => record,
            None => self.clean(),
        }
    }

    /// Runs every field through basic validation; rejected fields are left
    /// out.
    fn bind_fields(&self) -> BTreeMap<&'static str, FieldValue> {
        self.fields
            .iter()
            .chain(std::iter::once(&self.version_field))
            .filter_map(|def| match bind(def, self.raw.get(def.name)) {
                Ok(value) => Some((def.name, value)),
                Err(e) => {
                    debug!("Rejected submitted value: {}", e);
                    None
                }
            })
            .collect()
    }

    fn clean(&self) -> NormalizedRecord {
        let mut cleaned = self.bind_fields();

        for def in self.fields.iter() {
            let keep = match cleaned.get(def.name) {
                None => false,
                Some(value) => match def.kind {
                    FieldKind::Boolean => value.as_bool().is_some(),
                    FieldKind::Choice => value.as_text().map_or(false, |key| def.allows(key)),
                    FieldKind::Text => value.as_text().is_some(),
                    FieldKind::Integer => value.as_int().is_some(),
                },
            };
            if !keep {
                debug!("{}: using default {:?}", def.name, def.default);
                cleaned.insert(def.name, def.default.clone());
            }
        }

        let text = |name: &str| {
            cleaned
                .get(name)
                .and_then(FieldValue::as_text)
                .unwrap_or_default()
                .to_string()
        };
        let int = |name: &str| cleaned.get(name).and_then(FieldValue::as_int).flatten();

        let product = text(PRODUCT);
        let mut platform = text(PLATFORM);
        if !product.is_empty()
            && !platform.is_empty()
            && !self.catalog.compatible_platforms(&product).contains(platform.as_str())
        {
            debug!("{}: not available for {}, resetting", platform, product);
            platform = self.default_text(PLATFORM);
        }

        let mut version = text(VERSION);
        if version.is_empty() {
            version = self.catalog.fallback_version(&product).to_string();
        }

        let page = match int(PAGE) {
            Some(page) => page,
            None => self
                .fields
                .default_of(PAGE)
                .and_then(FieldValue::as_int)
                .flatten()
                .unwrap_or(1),
        };

        NormalizedRecord {
            q: text(Q),
            sentiment: text(SENTIMENT),
            product,
            platform,
            version,
            show_one_offs: cleaned
                .get(SHOW_ONE_OFFS)
                .and_then(FieldValue::as_bool)
                .unwrap_or_default(),
            page: page.max(1) as u64,
            site: int(SITE),
            cluster: int(CLUSTER),
        }
    }

    fn default_text(&self, name: &str) -> String {
        self.fields
            .default_of(name)
            .and_then(FieldValue::as_text)
            .unwrap_or_default()
            .to_string()
    }
}

fn tentative_product(raw: &RawInput, fields: &FieldDefinitions) -> Result<String, FieldError> {
    let def = match fields.get(PRODUCT) {
        Some(def) => def,
        None => return Ok(String::new()),
    };
    match bind(def, raw.get(PRODUCT)) {
        Ok(FieldValue::Text(product)) => Ok(product),
        Ok(_) => Ok(String::new()),
        Err(source) => Err(FieldError::TentativeParseFailure {
            field: PRODUCT.to_string(),
            source: Box::new(source),
        }),
    }
}

/// Binds `raw` to the search form and returns the normalized record. Never
/// fails: anything malformed is replaced by a default.
pub fn normalize(raw: &RawInput, fields: &FieldDefinitions, catalog: &Catalog) -> NormalizedRecord {
    WebsiteIssuesSearchForm::new(raw, fields, catalog).into_cleaned_data()
}
