//! Service container handed to the HTTP layer.

use std::sync::Arc;

use homeaway_cache::ViewCache;
use homeaway_core::traits::IdentityProvider;
use homeaway_database::{ProfileRepository, PropertyRepository};
use homeaway_storage::ImageStore;

use crate::actions::{ProfileActions, PropertyActions};
use crate::queries::{ProfileQueries, PropertyQueries};

/// Every action and query, wired to the same collaborators.
#[derive(Debug, Clone)]
pub struct Services {
    pub profile_actions: ProfileActions,
    pub property_actions: PropertyActions,
    pub profile_queries: ProfileQueries,
    pub property_queries: PropertyQueries,
}

impl Services {
    /// Wire all services.
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileRepository>,
        properties: Arc<dyn PropertyRepository>,
        images: ImageStore,
        views: ViewCache,
    ) -> Self {
        Self {
            profile_actions: ProfileActions::new(
                Arc::clone(&identity),
                Arc::clone(&profiles),
                images.clone(),
                views.clone(),
            ),
            property_actions: PropertyActions::new(
                Arc::clone(&identity),
                Arc::clone(&properties),
                images,
                views.clone(),
            ),
            profile_queries: ProfileQueries::new(identity, profiles, views.clone()),
            property_queries: PropertyQueries::new(properties, views),
        }
    }
}
