use cql_syntax::{error::CqlError, lang::InvalidFilterLang};
use model::{error::ApiError, queryable::QueryableType};
use thiserror::Error;

/// Semantic errors from the AST -> SQL compiler.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Unknown queryable: {0}")]
    UnknownQueryable(String),

    #[error("{op} not supported for {name} (type {data_type})")]
    UnsupportedOperation {
        op: String,
        name: String,
        data_type: QueryableType,
    },

    #[error("{op} on {name} expects a scalar value, not a geometry")]
    GeometryLiteral { op: String, name: String },
}

/// Input-validation errors from the auxiliary filter builders.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Free-text query exceeds {limit} characters")]
    QueryTooLong { limit: usize },

    #[error("Invalid bbox: {0}")]
    InvalidBbox(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Datetime interval start must be before end")]
    IntervalOrder,
}

/// Anything that can abort a search-plan build. The composer is fail-fast:
/// the first error wins and no SQL is assembled from the other filters.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("{0}")]
    Syntax(#[from] CqlError),

    #[error("{0}")]
    Compile(#[from] CompileError),

    #[error("{0}")]
    Input(#[from] FilterError),

    #[error("{0}")]
    FilterLang(#[from] InvalidFilterLang),
}

impl PlanError {
    fn code(&self) -> &'static str {
        match self {
            PlanError::Syntax(_) | PlanError::Compile(_) => "invalid_filter",
            PlanError::Input(FilterError::QueryTooLong { .. }) => "query_too_long",
            PlanError::Input(FilterError::InvalidBbox(_)) => "invalid_bbox",
            PlanError::Input(FilterError::InvalidDatetime(_))
            | PlanError::Input(FilterError::IntervalOrder) => "invalid_datetime",
            PlanError::FilterLang(_) => "invalid_filter_lang",
        }
    }
}

impl From<PlanError> for ApiError {
    fn from(err: PlanError) -> Self {
        ApiError::bad_request(err.code(), err.to_string())
    }
}
