//! Validation and normalization of the website issues search form.
//!
//! Raw request parameters go in, a [`NormalizedRecord`] comes out with every
//! field present and valid. Malformed input never produces an error; it is
//! replaced by the field's default.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

pub use models::{CatalogError, FieldError, NormalizedRecord, RawInput};
pub use services::{normalize, website_issues_fields, Catalog, WebsiteIssuesSearchForm};
