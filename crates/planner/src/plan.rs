//! Composes all filter dimensions into one search plan.
//!
//! The plan owns the WHERE fragment and its parameter list; the page query
//! and the total-count query are both rendered from that single fragment,
//! so a result page and its `numberMatched` can never disagree about which
//! collections match.

use crate::{
    compiler,
    error::PlanError,
    filters::{bbox_filter, datetime_filter, free_text_filter},
    params::SqlParams,
};
use cql_syntax::FilterLang;
use model::{queryable::QueryableSchema, search::SearchParams, value::SqlValue};
use serde::Serialize;
use tracing::debug;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 1000;

const COLLECTIONS_TABLE: &str = "collections";
const PAGE_COLUMNS: &str = "id, title, description, license, keywords, providers, \
     temporal_start, temporal_end, created, updated";

#[derive(Debug, Clone, Serialize)]
pub struct SearchPlan {
    where_clause: Option<String>,
    params: Vec<SqlValue>,
    limit: i64,
    offset: i64,
}

impl SearchPlan {
    /// Builds a plan from raw search input. Builders run in a fixed order
    /// (free-text, CQL2 filter, datetime, bbox) against one shared
    /// parameter list; the first failing filter aborts the whole build.
    pub fn build(search: &SearchParams, schema: &QueryableSchema) -> Result<Self, PlanError> {
        let mut params = SqlParams::new();
        let mut clauses = Vec::new();

        if let Some(clause) = free_text_filter(search.q.as_deref(), &mut params)? {
            clauses.push(clause);
        }

        if let Some(filter) = search.filter.as_deref() {
            if !filter.trim().is_empty() {
                let lang = match search.filter_lang.as_deref() {
                    Some(tag) => tag.parse::<FilterLang>()?,
                    None => FilterLang::infer(filter),
                };
                let expr = cql_syntax::parse(filter, lang)?;
                clauses.push(compiler::compile(&expr, schema, &mut params)?);
            }
        }

        if let Some(datetime) = search.datetime.as_deref() {
            if let Some(clause) = datetime_filter(datetime, &mut params)? {
                clauses.push(clause);
            }
        }

        if let Some(bbox) = &search.bbox {
            if let Some(clause) = bbox_filter(bbox, &mut params)? {
                clauses.push(clause);
            }
        }

        let where_clause = if clauses.is_empty() {
            None
        } else {
            Some(clauses.join(" AND "))
        };

        let limit = search.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = search.offset.unwrap_or(0).max(0);

        debug!(
            clauses = clauses.len(),
            params = params.len(),
            limit,
            offset,
            "built search plan"
        );

        Ok(SearchPlan {
            where_clause,
            params: params.into_values(),
            limit,
            offset,
        })
    }

    pub fn where_clause(&self) -> Option<&str> {
        self.where_clause.as_deref()
    }

    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    fn where_sql(&self) -> String {
        match &self.where_clause {
            Some(clause) => format!(" WHERE {}", clause),
            None => String::new(),
        }
    }

    /// The result-page query. `limit`/`offset` are validated integers and
    /// rendered inline so the parameter list is identical to the count
    /// query's.
    pub fn page_sql(&self) -> String {
        format!(
            "SELECT {} FROM {}{} ORDER BY id LIMIT {} OFFSET {}",
            PAGE_COLUMNS,
            COLLECTIONS_TABLE,
            self.where_sql(),
            self.limit,
            self.offset
        )
    }

    /// The total-match count query, sharing the page query's predicate and
    /// parameters.
    pub fn count_sql(&self) -> String {
        format!(
            "SELECT COUNT(*) FROM {}{}",
            COLLECTIONS_TABLE,
            self.where_sql()
        )
    }
}
