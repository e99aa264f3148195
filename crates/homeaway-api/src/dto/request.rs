//! Request DTOs.

use serde::{Deserialize, Serialize};

use homeaway_entity::property::PropertySearch;

/// Query string of the listing search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertySearchParams {
    /// Substring matched against name and tagline.
    #[serde(default)]
    pub search: Option<String>,
    /// Exact category.
    #[serde(default)]
    pub category: Option<String>,
}

impl From<PropertySearchParams> for PropertySearch {
    fn from(params: PropertySearchParams) -> Self {
        PropertySearch::new(params.search.unwrap_or_default(), params.category)
    }
}
