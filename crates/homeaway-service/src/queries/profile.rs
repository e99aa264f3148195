//! Profile reads.

use std::sync::Arc;

use homeaway_cache::{ViewCache, ViewLookup};
use homeaway_core::result::AppResult;
use homeaway_core::traits::IdentityProvider;
use homeaway_core::types::SessionContext;
use homeaway_database::ProfileRepository;
use homeaway_entity::profile::Profile;

use crate::actions::auth::{SIGNED_OUT, authenticate};
use crate::actions::{ActionError, CREATE_PROFILE_PATH, PROFILE_PATH};

/// Reads of the caller's own profile, cached under `/profile`.
#[derive(Debug, Clone)]
pub struct ProfileQueries {
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileRepository>,
    views: ViewCache,
}

impl ProfileQueries {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileRepository>,
        views: ViewCache,
    ) -> Self {
        Self {
            identity,
            profiles,
            views,
        }
    }

    /// Avatar URL of the caller. `None` when signed out, without a
    /// profile, or when the profile has no image.
    pub async fn fetch_profile_image(&self, session: &SessionContext) -> AppResult<Option<String>> {
        let Some(caller) = self.identity.resolve(session).await? else {
            return Ok(None);
        };
        let variant = format!("image:{}", caller.id);
        let generation = match self.views.get(PROFILE_PATH, &variant).await {
            ViewLookup::Hit(cached) => return Ok(cached),
            ViewLookup::Miss(generation) => generation,
        };

        let image = self
            .profiles
            .find_by_clerk_id(&caller.id)
            .await?
            .map(|p| p.profile_image)
            .filter(|url| !url.is_empty());
        self.views.put(PROFILE_PATH, &variant, generation, &image).await;
        Ok(image)
    }

    /// The caller's profile.
    pub async fn fetch_profile(&self, session: &SessionContext) -> Result<Profile, ActionError> {
        let caller = authenticate(self.identity.as_ref(), session, SIGNED_OUT).await?;
        let variant = format!("profile:{}", caller.id);
        let generation = match self.views.get(PROFILE_PATH, &variant).await {
            ViewLookup::Hit(cached) => return Ok(cached),
            ViewLookup::Miss(generation) => generation,
        };

        let profile = self
            .profiles
            .find_by_clerk_id(&caller.id)
            .await?
            .ok_or_else(|| ActionError::ProfileRequired {
                redirect_to: CREATE_PROFILE_PATH.to_string(),
            })?;
        self.views.put(PROFILE_PATH, &variant, generation, &profile).await;
        Ok(profile)
    }
}
