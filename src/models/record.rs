use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::form_urlencoded;

use super::field::{self, FieldDefinitions};

/// Submitted field values keyed by name. A missing key means the field was
/// not submitted at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawInput(BTreeMap<String, String>);

impl RawInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an `application/x-www-form-urlencoded` query. Later occurrences
    /// of a key replace earlier ones.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter())
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawInput {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        RawInput(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// The fully validated and defaulted search parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub q: String,
    pub sentiment: String,
    pub product: String,
    pub platform: String,
    pub version: String,
    pub show_one_offs: bool,
    pub page: u64,
    pub site: Option<i64>,
    pub cluster: Option<i64>,
}

impl NormalizedRecord {
    /// Renders the record back into request parameters. Unset integers are
    /// left out.
    pub fn to_raw_input(&self) -> RawInput {
        let mut raw = RawInput::new();
        raw.insert(field::Q, self.q.as_str());
        raw.insert(field::SENTIMENT, self.sentiment.as_str());
        raw.insert(field::PRODUCT, self.product.as_str());
        raw.insert(field::PLATFORM, self.platform.as_str());
        raw.insert(field::VERSION, self.version.as_str());
        raw.insert(field::SHOW_ONE_OFFS, self.show_one_offs.to_string());
        raw.insert(field::PAGE, self.page.to_string());
        if let Some(site) = self.site {
            raw.insert(field::SITE, site.to_string());
        }
        if let Some(cluster) = self.cluster {
            raw.insert(field::CLUSTER, cluster.to_string());
        }
        raw
    }

    pub fn to_query_string(&self) -> String {
        self.to_raw_input().to_query_string()
    }

    /// Page, site and cluster go back to their defaults when a new text
    /// search is submitted.
    pub fn reset_paging(mut self, fields: &FieldDefinitions) -> Self {
        let default_int = |name: &str| fields.default_of(name).and_then(|v| v.as_int()).flatten();

        self.page = default_int(field::PAGE).map_or(1, |page| page.max(1) as u64);
        self.site = default_int(field::SITE);
        self.cluster = default_int(field::CLUSTER);
        self
    }
}
