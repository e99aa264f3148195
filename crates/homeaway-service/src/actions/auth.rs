//! Caller resolution shared by actions and queries.

use homeaway_core::traits::{Identity, IdentityProvider};
use homeaway_core::types::SessionContext;

use super::CREATE_PROFILE_PATH;
use super::error::ActionError;

/// Shown to signed-out callers of create-profile.
pub const SIGNED_OUT_CREATE_PROFILE: &str = "Please login to create a profile";
/// Shown to signed-out callers of everything else.
pub const SIGNED_OUT: &str = "You must be logged in to access this route";

/// Resolve the caller or fail with `signed_out_message`.
pub async fn authenticate(
    identity: &dyn IdentityProvider,
    session: &SessionContext,
    signed_out_message: &str,
) -> Result<Identity, ActionError> {
    identity
        .resolve(session)
        .await?
        .ok_or_else(|| ActionError::AuthenticationRequired(signed_out_message.to_string()))
}

/// Resolve the caller and require a completed profile.
pub async fn authenticate_with_profile(
    identity: &dyn IdentityProvider,
    session: &SessionContext,
) -> Result<Identity, ActionError> {
    let caller = authenticate(identity, session, SIGNED_OUT).await?;
    if !caller.has_profile {
        return Err(ActionError::ProfileRequired {
            redirect_to: CREATE_PROFILE_PATH.to_string(),
        });
    }
    Ok(caller)
}
