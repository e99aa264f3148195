//! Property entity model.

use chrono::{DateTime, Utc};
use homeaway_core::types::PropertyId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A rental listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Primary key.
    pub id: PropertyId,
    /// Listing title.
    pub name: String,
    /// One-line pitch shown under the title.
    pub tagline: String,
    /// Free-form category tag (e.g. `cabin`, `tent`).
    pub category: String,
    /// Public URL of the cover image.
    pub image: String,
    /// Country code.
    pub country: String,
    /// Long description.
    pub description: String,
    /// Nightly price in whole currency units.
    pub price: i32,
    /// Maximum number of guests.
    pub guests: i32,
    /// Number of bedrooms.
    pub bedrooms: i32,
    /// Number of beds.
    pub beds: i32,
    /// Number of bathrooms.
    pub baths: i32,
    /// Serialized amenity list as submitted by the form.
    pub amenities: String,
    /// Owner's external identity id (`profiles.clerk_id`).
    pub profile_id: String,
    /// When the listing was created.
    pub created_at: DateTime<Utc>,
    /// When the listing was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Project this listing onto the summary shown in search results.
    pub fn summary(&self) -> PropertySummary {
        PropertySummary {
            id: self.id,
            name: self.name.clone(),
            image: self.image.clone(),
            tagline: self.tagline.clone(),
            country: self.country.clone(),
            price: self.price,
        }
    }
}

/// Data required to create a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProperty {
    pub name: String,
    pub tagline: String,
    pub category: String,
    pub image: String,
    pub country: String,
    pub description: String,
    pub price: i32,
    pub guests: i32,
    pub bedrooms: i32,
    pub beds: i32,
    pub baths: i32,
    pub amenities: String,
    pub profile_id: String,
}

impl CreateProperty {
    /// Materialise the row a store would insert for this request.
    pub fn into_property(self, now: DateTime<Utc>) -> Property {
        Property {
            id: PropertyId::new(),
            name: self.name,
            tagline: self.tagline,
            category: self.category,
            image: self.image,
            country: self.country,
            description: self.description,
            price: self.price,
            guests: self.guests,
            bedrooms: self.bedrooms,
            beds: self.beds,
            baths: self.baths,
            amenities: self.amenities,
            profile_id: self.profile_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Listing projection returned by search queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PropertySummary {
    pub id: PropertyId,
    pub name: String,
    pub image: String,
    pub tagline: String,
    pub country: String,
    pub price: i32,
}
