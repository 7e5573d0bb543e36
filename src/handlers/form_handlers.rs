use log::info;
use serde_json::{json, Value};

use crate::models::field::{PRODUCT, SENTIMENT};
use crate::models::{CatalogError, FieldDefinitions, RawInput};
use crate::services::{Catalog, WebsiteIssuesSearchForm};

/// Normalize a submitted query string
pub fn normalize_query(
    query: &str,
    fields: &FieldDefinitions,
    catalog: &Catalog,
    reset_paging: bool,
) -> Value {
    let raw = RawInput::from_query(query);
    info!("Normalizing search with {} submitted parameters", raw.len());

    let mut form = WebsiteIssuesSearchForm::new(&raw, fields, catalog);
    let product_initial = form.product_initial().to_string();
    let mut record = form.cleaned_data().clone();
    if reset_paging {
        record = record.reset_paging(fields);
    }

    json!({
        "record": record,
        "query": record.to_query_string(),
        "product_initial": product_initial,
    })
}

/// List the choices the search page would render for a submitted product
pub fn list_choices(product: Option<&str>, fields: &FieldDefinitions, catalog: &Catalog) -> Value {
    let mut raw = RawInput::new();
    if let Some(product) = product {
        raw.insert(PRODUCT, product);
    }
    let form = WebsiteIssuesSearchForm::new(&raw, fields, catalog);
    info!("Listing choices, initial product: {}", form.product_initial());

    let products: Vec<Value> = catalog
        .products()
        .iter()
        .map(|p| json!({ "key": p.short, "label": p.name }))
        .collect();
    let platforms: Vec<Value> = catalog
        .platforms()
        .iter()
        .map(|p| json!({ "key": p.short, "label": p.name, "products": p.prods }))
        .collect();
    let sentiments = fields
        .get(SENTIMENT)
        .and_then(|def| def.choices.as_ref())
        .map(|choices| choices.iter().cloned().collect::<Vec<_>>())
        .unwrap_or_default();

    json!({
        "product_initial": form.product_initial(),
        "products": products,
        "platforms": platforms,
        "sentiments": sentiments,
        "versions": form.version_choices(),
    })
}

/// Summarize a catalog that passed validation
pub fn describe_catalog(catalog: &Catalog) -> Value {
    let products: Vec<Value> = catalog
        .products()
        .iter()
        .map(|p| {
            json!({
                "key": p.short,
                "versions": p.versions().count(),
                "latest_beta": catalog.latest_beta(&p.short),
                "fallback_version": catalog.fallback_version(&p.short),
                "platforms": catalog.compatible_platforms(&p.short),
            })
        })
        .collect();

    json!({
        "status": "ok",
        "products": products,
        "platforms": catalog.platforms().len(),
    })
}

/// Report a catalog that failed validation
pub fn catalog_error(e: &CatalogError) -> Value {
    json!({
        "status": "error",
        "details": e.to_string(),
    })
}
