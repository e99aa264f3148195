//! Profile actions.

use std::sync::Arc;

use tracing::info;

use homeaway_cache::ViewCache;
use homeaway_core::traits::IdentityProvider;
use homeaway_core::types::SessionContext;
use homeaway_database::ProfileRepository;
use homeaway_entity::profile::{CreateProfile, UpdateProfile};
use homeaway_storage::ImageStore;

use super::auth::{SIGNED_OUT_CREATE_PROFILE, authenticate, authenticate_with_profile};
use super::{ActionError, ActionOutcome, HOME_PATH, PROFILE_PATH, revalidate};
use crate::form::FormData;
use crate::validation::image::IMAGE_FIELD;
use crate::validation::{FieldViolation, ImageInput, ProfileInput, ValidationFailure, validate_with_schema};

/// Reported after a successful profile edit.
pub const PROFILE_UPDATED: &str = "Profile updated successfully";
/// Reported after a successful avatar change.
pub const PROFILE_IMAGE_UPDATED: &str = "Profile image updated successfully";

/// Create and edit the caller's profile.
#[derive(Debug, Clone)]
pub struct ProfileActions {
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileRepository>,
    images: ImageStore,
    views: ViewCache,
}

impl ProfileActions {
    /// Creates the profile action set.
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileRepository>,
        images: ImageStore,
        views: ViewCache,
    ) -> Self {
        Self {
            identity,
            profiles,
            images,
            views,
        }
    }

    /// Create the caller's profile and send them home.
    pub async fn create_profile(&self, session: &SessionContext, form: &FormData) -> ActionOutcome {
        self.try_create_profile(session, form)
            .await
            .unwrap_or_else(|e| e.into_outcome("create_profile"))
    }

    /// Replace the caller's names and username.
    pub async fn update_profile(&self, session: &SessionContext, form: &FormData) -> ActionOutcome {
        self.try_update_profile(session, form)
            .await
            .unwrap_or_else(|e| e.into_outcome("update_profile"))
    }

    /// Upload a new avatar for the caller.
    pub async fn update_profile_image(
        &self,
        session: &SessionContext,
        form: &FormData,
    ) -> ActionOutcome {
        self.try_update_profile_image(session, form)
            .await
            .unwrap_or_else(|e| e.into_outcome("update_profile_image"))
    }

    async fn try_create_profile(
        &self,
        session: &SessionContext,
        form: &FormData,
    ) -> Result<ActionOutcome, ActionError> {
        let caller =
            authenticate(self.identity.as_ref(), session, SIGNED_OUT_CREATE_PROFILE).await?;
        let input: ProfileInput = validate_with_schema(form)?;

        let profile = self
            .profiles
            .create(&CreateProfile {
                clerk_id: caller.id.clone(),
                first_name: input.first_name,
                last_name: input.last_name,
                username: input.username,
                email: caller.email,
                profile_image: caller.image_url.unwrap_or_default(),
            })
            .await?;
        self.identity.mark_profile_complete(&caller.id).await?;

        info!(identity = %caller.id, profile_id = %profile.id, "Profile created");
        revalidate(&self.views, HOME_PATH).await;
        Ok(ActionOutcome::redirect(HOME_PATH))
    }

    async fn try_update_profile(
        &self,
        session: &SessionContext,
        form: &FormData,
    ) -> Result<ActionOutcome, ActionError> {
        let caller = authenticate_with_profile(self.identity.as_ref(), session).await?;
        let input: ProfileInput = validate_with_schema(form)?;

        self.profiles
            .update(
                &caller.id,
                &UpdateProfile {
                    first_name: input.first_name,
                    last_name: input.last_name,
                    username: input.username,
                },
            )
            .await?;

        info!(identity = %caller.id, "Profile updated");
        revalidate(&self.views, PROFILE_PATH).await;
        Ok(ActionOutcome::success(PROFILE_UPDATED))
    }

    async fn try_update_profile_image(
        &self,
        session: &SessionContext,
        form: &FormData,
    ) -> Result<ActionOutcome, ActionError> {
        let caller = authenticate_with_profile(self.identity.as_ref(), session).await?;
        validate_with_schema::<ImageInput>(form)?;
        let file = form.file(IMAGE_FIELD).ok_or_else(missing_image)?;

        let url = self
            .images
            .upload(&file.name, &file.content_type, file.data.clone())
            .await
            .map_err(ActionError::UploadFailed)?;
        self.profiles.update_image(&caller.id, &url).await?;

        info!(identity = %caller.id, url = %url, "Profile image updated");
        revalidate(&self.views, PROFILE_PATH).await;
        Ok(ActionOutcome::success(PROFILE_IMAGE_UPDATED))
    }
}

/// Failure used when an image passed validation but is gone from the form.
pub(crate) fn missing_image() -> ActionError {
    ValidationFailure::new(vec![FieldViolation::new(IMAGE_FIELD, "Required")]).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{CREATE_PROFILE_PATH, FailureReason};
    use crate::form::UploadedFile;
    use crate::testing::{Harness, profile_form};

    #[tokio::test]
    async fn test_create_profile_redirects_home_and_marks_identity() {
        let h = Harness::new();
        let session = h.sign_in("user_1", "ada@homeaway.test");

        let outcome = h
            .services
            .profile_actions
            .create_profile(&session, &profile_form("Ada", "Lovelace", "ada"))
            .await;

        assert_eq!(outcome, ActionOutcome::redirect("/"));
        let stored = h.profiles.get("user_1").unwrap();
        assert_eq!(stored.email, "ada@homeaway.test");
        assert_eq!(stored.username, "ada");
        assert!(h.identity.has_profile("user_1"));
    }

    #[tokio::test]
    async fn test_create_profile_signed_out() {
        let h = Harness::new();
        let outcome = h
            .services
            .profile_actions
            .create_profile(&SessionContext::anonymous(), &profile_form("Ada", "Lovelace", "ada"))
            .await;
        assert_eq!(
            outcome,
            ActionOutcome::AuthError {
                message: "Please login to create a profile".to_string()
            }
        );
        assert_eq!(h.profiles.writes(), 0);
    }

    #[tokio::test]
    async fn test_invalid_profile_writes_nothing() {
        let h = Harness::new();
        let session = h.sign_in("user_1", "ada@homeaway.test");
        let outcome = h
            .services
            .profile_actions
            .create_profile(&session, &profile_form("A", "Lovelace", "a"))
            .await;

        assert_eq!(outcome.kind(), "validation_error");
        assert_eq!(outcome.message(), "firstName,username");
        assert_eq!(h.profiles.writes(), 0);
        assert!(!h.identity.has_profile("user_1"));
    }

    #[tokio::test]
    async fn test_second_profile_for_identity_conflicts() {
        let h = Harness::new();
        let session = h.sign_in("user_1", "ada@homeaway.test");
        let form = profile_form("Ada", "Lovelace", "ada");

        let first = h.services.profile_actions.create_profile(&session, &form).await;
        let second = h.services.profile_actions.create_profile(&session, &form).await;

        assert!(first.is_success());
        assert_eq!(
            second,
            ActionOutcome::Failed {
                message: "Profile already exists".to_string(),
                reason: FailureReason::Conflict,
            }
        );
        assert_eq!(h.profiles.len(), 1);
    }

    #[tokio::test]
    async fn test_update_profile_requires_profile() {
        let h = Harness::new();
        let session = h.sign_in("user_1", "ada@homeaway.test");
        let outcome = h
            .services
            .profile_actions
            .update_profile(&session, &profile_form("Ada", "Byron", "ada"))
            .await;
        assert_eq!(
            outcome,
            ActionOutcome::ProfileRequired {
                redirect_to: CREATE_PROFILE_PATH.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_update_profile() {
        let h = Harness::new();
        let session = h.signed_up("user_1").await;
        let outcome = h
            .services
            .profile_actions
            .update_profile(&session, &profile_form("Ada", "Byron", "countess"))
            .await;

        assert_eq!(outcome, ActionOutcome::success(PROFILE_UPDATED));
        let stored = h.profiles.get("user_1").unwrap();
        assert_eq!(stored.last_name, "Byron");
        assert_eq!(stored.username, "countess");
    }

    #[tokio::test]
    async fn test_update_profile_image_uploads_then_persists() {
        let h = Harness::new();
        let session = h.signed_up("user_1").await;
        let form = FormData::new().with_file(
            "image",
            UploadedFile::new("me.png", "image/png", vec![1u8, 2, 3]),
        );

        let outcome = h
            .services
            .profile_actions
            .update_profile_image(&session, &form)
            .await;

        assert_eq!(outcome, ActionOutcome::success(PROFILE_IMAGE_UPDATED));
        assert_eq!(h.storage.uploads(), 1);
        let stored = h.profiles.get("user_1").unwrap();
        assert!(stored.profile_image.ends_with("-me.png"));
    }

    #[tokio::test]
    async fn test_update_profile_image_requires_image() {
        let h = Harness::new();
        let session = h.signed_up("user_1").await;
        let outcome = h
            .services
            .profile_actions
            .update_profile_image(&session, &FormData::new())
            .await;

        assert_eq!(outcome.message(), "image");
        assert_eq!(h.storage.uploads(), 0);
    }

    #[tokio::test]
    async fn test_rejected_image_is_never_uploaded() {
        let h = Harness::new();
        let session = h.signed_up("user_1").await;
        let form = FormData::new().with_file(
            "image",
            UploadedFile::new("notes.txt", "text/plain", vec![1u8]),
        );

        let outcome = h
            .services
            .profile_actions
            .update_profile_image(&session, &form)
            .await;

        assert_eq!(outcome.message(), "image.type");
        assert_eq!(h.storage.uploads(), 0);
    }

    #[tokio::test]
    async fn test_upload_failure_skips_write() {
        let h = Harness::new();
        let session = h.signed_up("user_1").await;
        let before = h.profiles.get("user_1").unwrap();
        h.storage.fail_uploads(true);

        let form = FormData::new().with_file(
            "image",
            UploadedFile::new("me.png", "image/png", vec![1u8]),
        );
        let outcome = h
            .services
            .profile_actions
            .update_profile_image(&session, &form)
            .await;

        assert_eq!(
            outcome,
            ActionOutcome::Failed {
                message: "Failed to upload image".to_string(),
                reason: FailureReason::Upload,
            }
        );
        assert_eq!(h.profiles.get("user_1").unwrap(), before);
    }
}
