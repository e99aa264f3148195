//! Property listing entity and its read projections.

pub mod model;
pub mod search;

pub use model::{CreateProperty, Property, PropertySummary};
pub use search::PropertySearch;
