pub mod catalog;
pub mod error;
pub mod field;
pub mod record;

pub use catalog::{CatalogData, Platform, Product};
pub use error::{CatalogError, FieldError};
pub use field::{FieldDefinition, FieldDefinitions, FieldKind, FieldValue};
pub use record::{NormalizedRecord, RawInput};
