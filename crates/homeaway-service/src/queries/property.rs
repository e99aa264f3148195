//! Listing reads.

use std::sync::Arc;

use tracing::debug;

use homeaway_cache::{ViewCache, ViewLookup};
use homeaway_core::error::AppError;
use homeaway_core::result::AppResult;
use homeaway_core::types::PropertyId;
use homeaway_database::PropertyRepository;
use homeaway_entity::property::{Property, PropertySearch, PropertySummary};

use crate::actions::HOME_PATH;

/// Listing search and detail reads.
#[derive(Debug, Clone)]
pub struct PropertyQueries {
    properties: Arc<dyn PropertyRepository>,
    views: ViewCache,
}

impl PropertyQueries {
    pub fn new(properties: Arc<dyn PropertyRepository>, views: ViewCache) -> Self {
        Self { properties, views }
    }

    /// Listings matching `filter`, newest first. Results are cached per
    /// filter under the home page.
    pub async fn fetch_properties(&self, filter: &PropertySearch) -> AppResult<Vec<PropertySummary>> {
        let variant = filter.cache_key();
        let generation = match self.views.get(HOME_PATH, &variant).await {
            ViewLookup::Hit(cached) => return Ok(cached),
            ViewLookup::Miss(generation) => generation,
        };

        let summaries = self.properties.find_many(filter).await?;
        debug!(search = %filter.search, category = ?filter.category, count = summaries.len(), "Fetched properties");
        self.views.put(HOME_PATH, &variant, generation, &summaries).await;
        Ok(summaries)
    }

    /// One listing by id.
    pub async fn fetch_property_details(&self, id: PropertyId) -> AppResult<Property> {
        self.properties
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Property {id} not found")))
    }
}
