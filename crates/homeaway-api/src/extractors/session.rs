//! `Session` extractor: the caller's credentials, unresolved.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use homeaway_core::types::SessionContext;

/// Credentials presented with the request. Never rejects: a missing or
/// malformed `Authorization` header yields an anonymous session and the
/// action decides what that means.
#[derive(Debug, Clone)]
pub struct Session(pub SessionContext);

impl std::ops::Deref for Session {
    type Target = SessionContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty());

        Ok(Session(match token {
            Some(token) => SessionContext::with_bearer(token),
            None => SessionContext::anonymous(),
        }))
    }
}
