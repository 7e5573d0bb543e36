use std::path::PathBuf;
use thiserror::Error;

/// Why a submitted value was rejected by basic field validation.
///
/// These never reach the caller of the normalizer: every rejected value is
/// replaced by the field's default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{field}: '{value}' is not one of the available choices")]
    InvalidChoice { field: String, value: String },
    #[error("{field}: '{value}' is not a valid {expected}")]
    InvalidType {
        field: String,
        value: String,
        expected: &'static str,
    },
    #[error("tentative parse of {field} failed: {source}")]
    TentativeParseFailure {
        field: String,
        #[source]
        source: Box<FieldError>,
    },
}

/// Reference data problems, reported once at startup.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{0} with an empty key")]
    EmptyKey(&'static str),
    #[error("duplicate {kind} key '{key}'")]
    DuplicateKey { kind: &'static str, key: String },
    #[error("{referenced_by} references unknown product '{product}'")]
    UnknownProduct {
        product: String,
        referenced_by: String,
    },
    #[error("catalog has no '{0}' product")]
    MissingProduct(String),
    #[error("product '{0}' has neither a default version nor a latest beta")]
    NoFallbackVersion(String),
    #[error("fallback version '{version}' is not among the versions of product '{product}'")]
    FallbackNotOffered { product: String, version: String },
    #[error("invalid version '{0}'")]
    InvalidVersion(String),
}
