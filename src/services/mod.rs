pub mod catalog_service;
mod field_binder;
pub mod search_form;

pub use catalog_service::{Catalog, FIREFOX, MOBILE};
pub use field_binder::bind;
pub use search_form::{normalize, website_issues_fields, WebsiteIssuesSearchForm};
