mod form_handlers;

pub use form_handlers::{catalog_error, describe_catalog, list_choices, normalize_query};
