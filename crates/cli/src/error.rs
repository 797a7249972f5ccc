use connectors::error::StoreError;
use cql_syntax::CqlError;
use planner::error::PlanError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Plan(#[from] PlanError),

    #[error("{0}")]
    Filter(#[from] CqlError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to serialize output to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}
