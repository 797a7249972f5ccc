//! The queryable schema: the fixed set of externally filterable properties
//! and their mapping to storage columns.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};

/// Storage semantics of a queryable property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryableType {
    Text,
    TextArray,
    Timestamptz,
    Geometry,
    JsonbArray,
    NumberJsonbArray,
    /// Not backed by a column at all; handled outside the filter compiler
    /// (e.g. the free-text search property).
    Virtual,
}

impl fmt::Display for QueryableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryableType::Text => "text",
            QueryableType::TextArray => "text_array",
            QueryableType::Timestamptz => "timestamptz",
            QueryableType::Geometry => "geometry",
            QueryableType::JsonbArray => "jsonb_array",
            QueryableType::NumberJsonbArray => "number_jsonb_array",
            QueryableType::Virtual => "virtual",
        };
        write!(f, "{}", name)
    }
}

/// One filterable property: external name, storage column, type and an
/// optional sub-field selector for nested JSON columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Queryable {
    pub name: String,
    pub column: String,
    pub data_type: QueryableType,
    pub sub_field: Option<String>,
}

impl Queryable {
    pub fn new(name: &str, column: &str, data_type: QueryableType) -> Self {
        Queryable {
            name: name.to_string(),
            column: column.to_string(),
            data_type,
            sub_field: None,
        }
    }

    pub fn with_sub_field(mut self, sub_field: &str) -> Self {
        self.sub_field = Some(sub_field.to_string());
        self
    }
}

/// Immutable name -> descriptor mapping. Built once at startup and shared
/// read-only; every property reference in a filter must resolve here.
#[derive(Debug, Clone, Default)]
pub struct QueryableSchema {
    by_name: HashMap<String, Queryable>,
}

impl QueryableSchema {
    pub fn new() -> Self {
        QueryableSchema {
            by_name: HashMap::new(),
        }
    }

    pub fn from_queryables(queryables: Vec<Queryable>) -> Self {
        let by_name = queryables
            .into_iter()
            .map(|q| (q.name.clone(), q))
            .collect();
        QueryableSchema { by_name }
    }

    pub fn resolve(&self, name: &str) -> Option<&Queryable> {
        self.by_name.get(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// The process-wide schema for the collection catalog.
    pub fn catalog() -> &'static QueryableSchema {
        &CATALOG_SCHEMA
    }
}

lazy_static! {
    static ref CATALOG_SCHEMA: QueryableSchema = QueryableSchema::from_queryables(vec![
        Queryable::new("id", "id", QueryableType::Text),
        Queryable::new("title", "title", QueryableType::Text),
        Queryable::new("description", "description", QueryableType::Text),
        Queryable::new("license", "license", QueryableType::Text),
        Queryable::new("keywords", "keywords", QueryableType::TextArray),
        Queryable::new("providers", "providers", QueryableType::JsonbArray).with_sub_field("name"),
        Queryable::new("gsd", "summaries", QueryableType::NumberJsonbArray).with_sub_field("gsd"),
        Queryable::new("created", "created", QueryableType::Timestamptz),
        Queryable::new("updated", "updated", QueryableType::Timestamptz),
        Queryable::new("spatial_extent", "spatial_extent", QueryableType::Geometry),
        Queryable::new("q", "q", QueryableType::Virtual),
    ]);
}
