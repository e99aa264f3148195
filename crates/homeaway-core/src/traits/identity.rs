//! Identity provider trait.
//!
//! The identity provider answers "who is calling?" for a request and
//! tracks whether that caller has completed their profile.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;
use crate::types::session::SessionContext;

/// The authenticated caller as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable external identity id. Stored as `profiles.clerk_id`.
    pub id: String,
    /// Primary email address.
    pub email: String,
    /// Avatar URL known to the identity provider, if any.
    pub image_url: Option<String>,
    /// Whether the caller has already created a profile.
    pub has_profile: bool,
}

/// Resolves request sessions to identities.
#[async_trait]
pub trait IdentityProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Resolve the caller for this session. `Ok(None)` means signed out.
    async fn resolve(&self, session: &SessionContext) -> AppResult<Option<Identity>>;

    /// Record that the identity has completed its profile.
    async fn mark_profile_complete(&self, identity_id: &str) -> AppResult<()>;
}
