//! Auxiliary filter builders: free-text search, bounding box and datetime
//! interval. Each is independent of the CQL2 compiler and of the others;
//! they only share the parameter list they are handed.

pub mod bbox;
pub mod datetime;
pub mod free_text;

pub use bbox::bbox_filter;
pub use datetime::datetime_filter;
pub use free_text::free_text_filter;
