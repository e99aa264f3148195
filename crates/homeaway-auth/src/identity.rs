//! Bearer-token identity provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use homeaway_cache::CacheManager;
use homeaway_cache::keys;
use homeaway_core::error::ErrorKind;
use homeaway_core::result::AppResult;
use homeaway_core::traits::{CacheProvider, Identity, IdentityProvider};
use homeaway_core::types::SessionContext;
use homeaway_database::ProfileRepository;

use crate::jwt::JwtDecoder;

/// How long a positive "has completed profile" flag is remembered.
const PROFILE_FLAG_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Resolves callers from HS256 bearer tokens.
///
/// The token carries who the caller is. Whether they have completed a
/// profile is tracked separately: a positive flag is cached, and on a
/// miss the profile table is consulted.
#[derive(Debug, Clone)]
pub struct JwtIdentityProvider {
    decoder: JwtDecoder,
    profiles: Arc<dyn ProfileRepository>,
    cache: CacheManager,
}

impl JwtIdentityProvider {
    /// Create a provider over the given decoder, profile store and cache.
    pub fn new(decoder: JwtDecoder, profiles: Arc<dyn ProfileRepository>, cache: CacheManager) -> Self {
        Self {
            decoder,
            profiles,
            cache,
        }
    }

    async fn has_profile(&self, identity_id: &str) -> AppResult<bool> {
        let key = keys::profile_flag(identity_id);
        if self.cache.exists(&key).await? {
            return Ok(true);
        }
        let exists = self.profiles.exists(identity_id).await?;
        if exists {
            self.cache.set(&key, "1", PROFILE_FLAG_TTL).await?;
        }
        Ok(exists)
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn resolve(&self, session: &SessionContext) -> AppResult<Option<Identity>> {
        let Some(token) = session.bearer_token.as_deref() else {
            return Ok(None);
        };

        let claims = match self.decoder.decode(token) {
            Ok(claims) => claims,
            Err(e) if e.is(ErrorKind::Authentication) => {
                debug!(reason = %e.message, "Rejected bearer token; treating caller as signed out");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let has_profile = self.has_profile(&claims.sub).await?;
        Ok(Some(claims.into_identity(has_profile)))
    }

    async fn mark_profile_complete(&self, identity_id: &str) -> AppResult<()> {
        self.cache
            .set(&keys::profile_flag(identity_id), "1", PROFILE_FLAG_TTL)
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use homeaway_core::AppError;
    use homeaway_core::config::{AuthConfig, CacheConfig};
    use homeaway_entity::profile::{CreateProfile, Profile, UpdateProfile};

    use super::*;
    use crate::jwt::JwtEncoder;

    #[derive(Debug, Default)]
    struct CountingProfiles {
        owners: Mutex<Vec<String>>,
        lookups: Mutex<u32>,
    }

    #[async_trait]
    impl ProfileRepository for CountingProfiles {
        async fn find_by_clerk_id(&self, _clerk_id: &str) -> AppResult<Option<Profile>> {
            Ok(None)
        }

        async fn create(&self, _data: &CreateProfile) -> AppResult<Profile> {
            Err(AppError::internal("not used"))
        }

        async fn update(&self, _clerk_id: &str, _data: &UpdateProfile) -> AppResult<Profile> {
            Err(AppError::internal("not used"))
        }

        async fn update_image(&self, _clerk_id: &str, _image_url: &str) -> AppResult<Profile> {
            Err(AppError::internal("not used"))
        }

        async fn exists(&self, clerk_id: &str) -> AppResult<bool> {
            *self.lookups.lock().unwrap() += 1;
            Ok(self.owners.lock().unwrap().iter().any(|o| o == clerk_id))
        }
    }

    fn auth_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            ..AuthConfig::default()
        }
    }

    fn provider(profiles: Arc<CountingProfiles>) -> JwtIdentityProvider {
        JwtIdentityProvider::new(
            JwtDecoder::new(&auth_config()),
            profiles,
            CacheManager::new(&CacheConfig::default()),
        )
    }

    fn session_for(id: &str) -> SessionContext {
        let issued = JwtEncoder::new(&auth_config())
            .issue(id, "guest@homeaway.test", None)
            .unwrap();
        SessionContext::with_bearer(issued.token)
    }

    #[tokio::test]
    async fn test_anonymous_and_bad_tokens_are_signed_out() {
        let identities = provider(Arc::new(CountingProfiles::default()));
        assert_eq!(identities.resolve(&SessionContext::anonymous()).await.unwrap(), None);
        assert_eq!(
            identities
                .resolve(&SessionContext::with_bearer("garbage"))
                .await
                .unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_profile_flag_falls_back_to_store() {
        let profiles = Arc::new(CountingProfiles::default());
        profiles.owners.lock().unwrap().push("user_1".to_string());
        let identities = provider(profiles.clone());

        let first = identities.resolve(&session_for("user_1")).await.unwrap().unwrap();
        let second = identities.resolve(&session_for("user_1")).await.unwrap().unwrap();

        assert!(first.has_profile && second.has_profile);
        assert_eq!(*profiles.lookups.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_mark_profile_complete() {
        let identities = provider(Arc::new(CountingProfiles::default()));
        let before = identities.resolve(&session_for("user_2")).await.unwrap().unwrap();
        assert!(!before.has_profile);
        assert_eq!(before.email, "guest@homeaway.test");

        identities.mark_profile_complete("user_2").await.unwrap();
        let after = identities.resolve(&session_for("user_2")).await.unwrap().unwrap();
        assert!(after.has_profile);
    }
}
