//! JWT validation.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use homeaway_core::config::AuthConfig;
use homeaway_core::error::AppError;

use super::claims::Claims;

/// Verifies identity tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl JwtDecoder {
    /// Create a decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;
        if !config.issuer.is_empty() {
            validation.set_issuer(&[config.issuer.as_str()]);
        }

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Verify signature, expiry and issuer, and return the claims.
    /// Every failure is an authentication error.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => AppError::authentication("Token has expired"),
                JwtErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid token signature")
                }
                JwtErrorKind::InvalidIssuer => AppError::authentication("Invalid token issuer"),
                JwtErrorKind::InvalidToken => AppError::authentication("Invalid token format"),
                _ => AppError::authentication(format!("Token validation failed: {e}")),
            })
    }
}

#[cfg(test)]
mod tests {
    use homeaway_core::error::ErrorKind;

    use super::*;
    use crate::jwt::JwtEncoder;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_issue_then_decode() {
        let issued = JwtEncoder::new(&config())
            .issue("user_123", "a@b.test", Some("http://img/a.png"))
            .unwrap();
        let claims = JwtDecoder::new(&config()).decode(&issued.token).unwrap();

        assert_eq!(claims.sub, "user_123");
        assert_eq!(claims.email, "a@b.test");
        assert_eq!(claims.picture.as_deref(), Some("http://img/a.png"));
        assert_eq!(claims.exp, issued.expires_at.timestamp());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issued = JwtEncoder::new(&config())
            .issue("user_123", "a@b.test", None)
            .unwrap();
        let other = AuthConfig {
            jwt_secret: "other".to_string(),
            ..AuthConfig::default()
        };
        let err = JwtDecoder::new(&other).decode(&issued.token).unwrap_err();
        assert!(err.is(ErrorKind::Authentication));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let err = JwtDecoder::new(&config()).decode("not.a.jwt").unwrap_err();
        assert!(err.is(ErrorKind::Authentication));
    }

    #[test]
    fn test_issuer_is_enforced() {
        let issued = JwtEncoder::new(&config())
            .issue("user_123", "a@b.test", None)
            .unwrap();
        let strict = AuthConfig {
            issuer: "https://clerk.homeaway.test".to_string(),
            ..config()
        };
        assert!(JwtDecoder::new(&strict).decode(&issued.token).is_err());
    }
}
