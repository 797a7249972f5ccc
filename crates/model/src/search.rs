use crate::collection::CollectionRecord;
use serde::{Deserialize, Serialize};

/// Raw, untyped search input as the HTTP layer hands it over. Every field is
/// optional; validation happens when the search plan is built.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchParams {
    /// Free-text search terms.
    pub q: Option<String>,
    /// CQL2 filter, text syntax or a JSON-encoded object.
    pub filter: Option<String>,
    /// `cql2-text` or `cql2-json`; inferred from the filter when absent.
    #[serde(rename = "filter-lang")]
    pub filter_lang: Option<String>,
    pub bbox: Option<BboxParam>,
    pub datetime: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// A bounding box as submitted by the caller: either a comma-separated
/// string (query parameter form) or a numeric array (JSON body form).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BboxParam {
    Text(String),
    Values(Vec<f64>),
}

impl From<&str> for BboxParam {
    fn from(s: &str) -> Self {
        BboxParam::Text(s.to_string())
    }
}

/// One page of search results plus the total match count computed from the
/// same compiled predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    pub collections: Vec<CollectionRecord>,
    pub number_matched: i64,
    pub number_returned: usize,
}
