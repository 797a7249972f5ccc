//! Turns raw search input into one parameterized SQL predicate.
//!
//! The CQL2 compiler and the auxiliary filter builders (free-text, bbox,
//! datetime) all append their values through a single [`params::SqlParams`]
//! list, so placeholder numbering is correct by construction no matter how
//! many filters a request combines. [`plan::SearchPlan`] composes them in a
//! fixed order and renders the page and count queries from the same WHERE
//! fragment.

pub mod compiler;
pub mod error;
pub mod filters;
pub mod params;
pub mod plan;
