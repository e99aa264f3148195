//! Profile repository.

use async_trait::async_trait;
use sqlx::PgPool;

use homeaway_core::error::{AppError, ErrorKind};
use homeaway_core::result::AppResult;
use homeaway_core::types::ProfileId;
use homeaway_entity::profile::{CreateProfile, Profile, UpdateProfile};

/// Unique constraint guarding one profile per identity.
pub const CLERK_ID_UNIQUE: &str = "profiles_clerk_id_key";

/// Persistence port for profiles. Every lookup is keyed by the external
/// identity id.
#[async_trait]
pub trait ProfileRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Find the profile owned by an identity.
    async fn find_by_clerk_id(&self, clerk_id: &str) -> AppResult<Option<Profile>>;

    /// Insert a new profile. A second profile for the same identity is a
    /// [`ErrorKind::Conflict`].
    async fn create(&self, data: &CreateProfile) -> AppResult<Profile>;

    /// Overwrite the editable fields of an identity's profile.
    async fn update(&self, clerk_id: &str, data: &UpdateProfile) -> AppResult<Profile>;

    /// Replace the avatar URL of an identity's profile.
    async fn update_image(&self, clerk_id: &str, image_url: &str) -> AppResult<Profile>;

    /// Whether the identity owns a profile.
    async fn exists(&self, clerk_id: &str) -> AppResult<bool> {
        Ok(self.find_by_clerk_id(clerk_id).await?.is_some())
    }
}

/// PostgreSQL-backed [`ProfileRepository`].
#[derive(Debug, Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    /// Create a new profile repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find_by_clerk_id(&self, clerk_id: &str) -> AppResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE clerk_id = $1")
            .bind(clerk_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find profile", e))
    }

    async fn create(&self, data: &CreateProfile) -> AppResult<Profile> {
        sqlx::query_as::<_, Profile>(
            "INSERT INTO profiles (id, clerk_id, first_name, last_name, username, email, profile_image) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(ProfileId::new())
        .bind(&data.clerk_id)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.username)
        .bind(&data.email)
        .bind(&data.profile_image)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(CLERK_ID_UNIQUE) => {
                AppError::conflict("Profile already exists")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create profile", e),
        })
    }

    async fn update(&self, clerk_id: &str, data: &UpdateProfile) -> AppResult<Profile> {
        sqlx::query_as::<_, Profile>(
            "UPDATE profiles SET first_name = $2, last_name = $3, username = $4, \
                                 updated_at = NOW() \
             WHERE clerk_id = $1 RETURNING *",
        )
        .bind(clerk_id)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update profile", e))?
        .ok_or_else(|| AppError::not_found(format!("Profile for {clerk_id} not found")))
    }

    async fn update_image(&self, clerk_id: &str, image_url: &str) -> AppResult<Profile> {
        sqlx::query_as::<_, Profile>(
            "UPDATE profiles SET profile_image = $2, updated_at = NOW() \
             WHERE clerk_id = $1 RETURNING *",
        )
        .bind(clerk_id)
        .bind(image_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update profile image", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Profile for {clerk_id} not found")))
    }

    async fn exists(&self, clerk_id: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM profiles WHERE clerk_id = $1)")
            .bind(clerk_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to check profile existence", e)
            })
    }
}
