//! JWT claims carried by identity tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use homeaway_core::traits::Identity;

/// Claims payload of an identity token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the external identity id.
    pub sub: String,
    /// Primary email address.
    pub email: String,
    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    /// Issuer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Identity described by these claims. Profile completion is not part
    /// of the token and must be filled in by the caller.
    pub fn into_identity(self, has_profile: bool) -> Identity {
        Identity {
            id: self.sub,
            email: self.email,
            image_url: self.picture,
            has_profile,
        }
    }
}
