//! Listing search filter.

use serde::{Deserialize, Serialize};

/// Filter applied by the listing query.
///
/// `search` is matched case-insensitively as a substring of either the
/// name or the tagline; an empty string matches everything. `category`
/// must match exactly when present, including `Some("")`, which only
/// matches listings with an empty category. `None` leaves it unfiltered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertySearch {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl PropertySearch {
    /// Build a filter. Only an omitted category is unfiltered.
    pub fn new(search: impl Into<String>, category: Option<String>) -> Self {
        Self {
            search: search.into(),
            category,
        }
    }

    /// Whether a listing with this name, tagline and category passes the filter.
    pub fn matches(&self, name: &str, tagline: &str, category: &str) -> bool {
        if let Some(wanted) = &self.category {
            if wanted != category {
                return false;
            }
        }
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        name.to_lowercase().contains(&needle) || tagline.to_lowercase().contains(&needle)
    }

    /// Stable key for caching results of this filter. Distinct filters
    /// always get distinct keys.
    pub fn cache_key(&self) -> String {
        serde_json::json!([self.search, self.category]).to_string()
    }
}
