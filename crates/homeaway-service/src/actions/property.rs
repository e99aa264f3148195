//! Property actions.

use std::sync::Arc;

use tracing::info;

use homeaway_cache::ViewCache;
use homeaway_core::traits::IdentityProvider;
use homeaway_core::types::SessionContext;
use homeaway_database::PropertyRepository;
use homeaway_entity::property::CreateProperty;
use homeaway_storage::ImageStore;

use super::auth::authenticate_with_profile;
use super::profile::missing_image;
use super::{ActionError, ActionOutcome, HOME_PATH, revalidate};
use crate::form::FormData;
use crate::validation::image::IMAGE_FIELD;
use crate::validation::{ImageInput, PropertyInput, validate_with_schema};

/// Create listings.
#[derive(Debug, Clone)]
pub struct PropertyActions {
    identity: Arc<dyn IdentityProvider>,
    properties: Arc<dyn PropertyRepository>,
    images: ImageStore,
    views: ViewCache,
}

impl PropertyActions {
    /// Creates the property action set.
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        properties: Arc<dyn PropertyRepository>,
        images: ImageStore,
        views: ViewCache,
    ) -> Self {
        Self {
            identity,
            properties,
            images,
            views,
        }
    }

    /// Create a listing owned by the caller and send them home.
    pub async fn create_property(&self, session: &SessionContext, form: &FormData) -> ActionOutcome {
        self.try_create_property(session, form)
            .await
            .unwrap_or_else(|e| e.into_outcome("create_property"))
    }

    async fn try_create_property(
        &self,
        session: &SessionContext,
        form: &FormData,
    ) -> Result<ActionOutcome, ActionError> {
        let caller = authenticate_with_profile(self.identity.as_ref(), session).await?;

        let input = match (
            validate_with_schema::<PropertyInput>(form),
            validate_with_schema::<ImageInput>(form),
        ) {
            (Ok(input), Ok(_)) => input,
            (Err(fields), Err(image)) => return Err(fields.merge(image).into()),
            (Err(failure), Ok(_)) | (Ok(_), Err(failure)) => return Err(failure.into()),
        };
        let file = form.file(IMAGE_FIELD).ok_or_else(missing_image)?;

        let image = self
            .images
            .upload(&file.name, &file.content_type, file.data.clone())
            .await
            .map_err(ActionError::UploadFailed)?;

        let property = self
            .properties
            .create(&CreateProperty {
                name: input.name,
                tagline: input.tagline,
                category: input.category,
                image,
                country: input.country,
                description: input.description,
                price: input.price,
                guests: input.guests,
                bedrooms: input.bedrooms,
                beds: input.beds,
                baths: input.baths,
                amenities: input.amenities,
                profile_id: caller.id.clone(),
            })
            .await?;

        info!(identity = %caller.id, property_id = %property.id, "Property created");
        revalidate(&self.views, HOME_PATH).await;
        Ok(ActionOutcome::redirect(HOME_PATH))
    }
}
