pub mod collection;
pub mod error;
pub mod queryable;
pub mod search;
pub mod value;
