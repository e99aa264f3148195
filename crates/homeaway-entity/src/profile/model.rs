//! Profile entity model.

use chrono::{DateTime, Utc};
use homeaway_core::types::ProfileId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user's public profile, created once per external identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Primary key.
    pub id: ProfileId,
    /// External identity id. Unique across profiles.
    pub clerk_id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Public handle.
    pub username: String,
    /// Email address copied from the identity provider.
    pub email: String,
    /// Public URL of the avatar image. Empty when none is known.
    pub profile_image: String,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProfile {
    /// External identity id of the owner.
    pub clerk_id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Public handle.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Avatar URL, empty if unknown.
    pub profile_image: String,
}

impl CreateProfile {
    /// Materialise the row a store would insert for this request.
    pub fn into_profile(self, now: DateTime<Utc>) -> Profile {
        Profile {
            id: ProfileId::new(),
            clerk_id: self.clerk_id,
            first_name: self.first_name,
            last_name: self.last_name,
            username: self.username,
            email: self.email,
            profile_image: self.profile_image,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Editable profile fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfile {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Public handle.
    pub username: String,
}
