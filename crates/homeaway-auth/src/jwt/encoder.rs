//! JWT issuance.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use homeaway_core::config::AuthConfig;
use homeaway_core::error::{AppError, ErrorKind};

use super::claims::Claims;

/// Signs identity tokens with the shared HS256 secret.
///
/// Production tokens come from the identity provider; this encoder backs
/// the CLI's `token issue` command and the test suites.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    issuer: Option<String>,
    ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("issuer", &self.issuer)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

/// A freshly signed token.
#[derive(Debug, Clone, serde::Serialize)]
pub struct IssuedToken {
    /// Compact JWS string.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Create an encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: Some(config.issuer.clone()).filter(|iss| !iss.is_empty()),
            ttl: Duration::minutes(config.token_ttl_minutes as i64),
        }
    }

    /// Sign a token for the given identity.
    pub fn issue(
        &self,
        identity_id: &str,
        email: &str,
        picture: Option<&str>,
    ) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let expires_at = now + self.ttl;
        let claims = Claims {
            sub: identity_id.to_string(),
            email: email.to_string(),
            picture: picture.map(str::to_string),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Failed to sign identity token", e)
        })?;

        Ok(IssuedToken { token, expires_at })
    }
}
