//! Storage boundary for the collection catalog.
//!
//! The filter core never talks to a database; it hands a [`SearchPlan`]
//! (SQL + ordered parameter list) to a [`store::CollectionStore`]. The
//! PostgreSQL implementation lives in [`postgres`].
//!
//! [`SearchPlan`]: planner::plan::SearchPlan

pub mod error;
pub mod postgres;
pub mod store;
