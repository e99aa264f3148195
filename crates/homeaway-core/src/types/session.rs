//! Per-request session context.

/// What the HTTP layer knows about the caller before identity resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    /// Raw bearer token from the `Authorization` header, if any.
    pub bearer_token: Option<String>,
}

impl SessionContext {
    /// A session carrying no credentials.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session carrying the given bearer token.
    pub fn with_bearer(token: impl Into<String>) -> Self {
        Self {
            bearer_token: Some(token.into()),
        }
    }
}
