//! Property repository.

use async_trait::async_trait;
use sqlx::PgPool;

use homeaway_core::error::{AppError, ErrorKind};
use homeaway_core::result::AppResult;
use homeaway_core::types::PropertyId;
use homeaway_entity::property::{CreateProperty, Property, PropertySearch, PropertySummary};

/// Foreign key from `properties.profile_id` to `profiles.clerk_id`.
pub const PROFILE_FKEY: &str = "properties_profile_id_fkey";

/// Persistence port for listings.
#[async_trait]
pub trait PropertyRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Listings matching `filter`, newest first, projected to summaries.
    async fn find_many(&self, filter: &PropertySearch) -> AppResult<Vec<PropertySummary>>;

    /// Find a listing by primary key.
    async fn find_by_id(&self, id: PropertyId) -> AppResult<Option<Property>>;

    /// Insert a new listing.
    async fn create(&self, data: &CreateProperty) -> AppResult<Property>;
}

/// PostgreSQL-backed [`PropertyRepository`].
#[derive(Debug, Clone)]
pub struct PgPropertyRepository {
    pool: PgPool,
}

impl PgPropertyRepository {
    /// Create a new property repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PropertyRepository for PgPropertyRepository {
    async fn find_many(&self, filter: &PropertySearch) -> AppResult<Vec<PropertySummary>> {
        let pattern = format!("%{}%", escape_like(&filter.search));

        sqlx::query_as::<_, PropertySummary>(
            "SELECT id, name, image, tagline, country, price FROM properties \
             WHERE ($1::TEXT IS NULL OR category = $1) \
               AND (name ILIKE $2 ESCAPE '\\' OR tagline ILIKE $2 ESCAPE '\\') \
             ORDER BY created_at DESC",
        )
        .bind(filter.category.as_deref())
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search properties", e))
    }

    async fn find_by_id(&self, id: PropertyId) -> AppResult<Option<Property>> {
        sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find property", e))
    }

    async fn create(&self, data: &CreateProperty) -> AppResult<Property> {
        sqlx::query_as::<_, Property>(
            "INSERT INTO properties \
                 (id, name, tagline, category, image, country, description, \
                  price, guests, bedrooms, beds, baths, amenities, profile_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING *",
        )
        .bind(PropertyId::new())
        .bind(&data.name)
        .bind(&data.tagline)
        .bind(&data.category)
        .bind(&data.image)
        .bind(&data.country)
        .bind(&data.description)
        .bind(data.price)
        .bind(data.guests)
        .bind(data.bedrooms)
        .bind(data.beds)
        .bind(data.baths)
        .bind(&data.amenities)
        .bind(&data.profile_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(PROFILE_FKEY) => {
                AppError::not_found(format!("Profile for {} not found", data.profile_id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create property", e),
        })
    }
}

/// Escape `%`, `_` and the escape character itself so user input matches
/// literally inside an `ILIKE ... ESCAPE '\'` pattern.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
