//! In-memory collaborators for tests.
//!
//! Enabled for this crate's own tests and, through the `testing` feature,
//! for downstream integration tests that drive the HTTP router.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Duration, Utc};

use homeaway_cache::{CacheManager, ViewCache};
use homeaway_core::config::CacheConfig;
use homeaway_core::error::AppError;
use homeaway_core::result::AppResult;
use homeaway_core::traits::{Identity, IdentityProvider, StorageProvider};
use homeaway_core::types::{PropertyId, SessionContext};
use homeaway_database::{ProfileRepository, PropertyRepository};
use homeaway_entity::profile::{CreateProfile, Profile, UpdateProfile};
use homeaway_entity::property::{CreateProperty, Property, PropertySearch, PropertySummary};
use homeaway_storage::ImageStore;

use crate::form::FormData;
use crate::services::Services;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ── Profiles ───────────────────────────────────────────────

/// Profile store enforcing one profile per identity.
#[derive(Debug, Default)]
pub struct InMemoryProfiles {
    rows: Mutex<Vec<Profile>>,
    writes: AtomicUsize,
}

impl InMemoryProfiles {
    /// Snapshot of the profile owned by `clerk_id`.
    pub fn get(&self, clerk_id: &str) -> Option<Profile> {
        lock(&self.rows).iter().find(|p| p.clerk_id == clerk_id).cloned()
    }

    /// Number of stored profiles.
    pub fn len(&self) -> usize {
        lock(&self.rows).len()
    }

    /// Whether no profile is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of successful writes.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn modify(&self, clerk_id: &str, apply: impl FnOnce(&mut Profile)) -> AppResult<Profile> {
        let mut rows = lock(&self.rows);
        let row = rows
            .iter_mut()
            .find(|p| p.clerk_id == clerk_id)
            .ok_or_else(|| AppError::not_found(format!("Profile for '{clerk_id}' not found")))?;
        apply(row);
        row.updated_at = Utc::now();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(row.clone())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfiles {
    async fn find_by_clerk_id(&self, clerk_id: &str) -> AppResult<Option<Profile>> {
        Ok(self.get(clerk_id))
    }

    async fn create(&self, data: &CreateProfile) -> AppResult<Profile> {
        let mut rows = lock(&self.rows);
        if rows.iter().any(|p| p.clerk_id == data.clerk_id) {
            return Err(AppError::conflict("Profile already exists"));
        }
        let profile = data.clone().into_profile(Utc::now());
        rows.push(profile.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(profile)
    }

    async fn update(&self, clerk_id: &str, data: &UpdateProfile) -> AppResult<Profile> {
        self.modify(clerk_id, |row| {
            row.first_name = data.first_name.clone();
            row.last_name = data.last_name.clone();
            row.username = data.username.clone();
        })
    }

    async fn update_image(&self, clerk_id: &str, image_url: &str) -> AppResult<Profile> {
        self.modify(clerk_id, |row| row.profile_image = image_url.to_string())
    }
}

// ── Properties ─────────────────────────────────────────────

/// Listing store. Every insert gets a strictly later `created_at` so that
/// ordering is deterministic.
#[derive(Debug)]
pub struct InMemoryProperties {
    rows: Mutex<Vec<Property>>,
    epoch: DateTime<Utc>,
    tick: AtomicI64,
}

impl Default for InMemoryProperties {
    fn default() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            epoch: Utc::now(),
            tick: AtomicI64::new(0),
        }
    }
}

impl InMemoryProperties {
    /// Number of stored listings.
    pub fn len(&self) -> usize {
        lock(&self.rows).len()
    }

    /// Whether no listing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert without going through validation.
    pub fn insert(&self, data: CreateProperty) -> Property {
        let now = self.epoch + Duration::milliseconds(self.tick.fetch_add(1, Ordering::SeqCst));
        let property = data.into_property(now);
        lock(&self.rows).push(property.clone());
        property
    }
}

#[async_trait]
impl PropertyRepository for InMemoryProperties {
    async fn find_many(&self, filter: &PropertySearch) -> AppResult<Vec<PropertySummary>> {
        let mut hits: Vec<Property> = lock(&self.rows)
            .iter()
            .filter(|p| filter.matches(&p.name, &p.tagline, &p.category))
            .cloned()
            .collect();
        hits.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(hits.iter().map(Property::summary).collect())
    }

    async fn find_by_id(&self, id: PropertyId) -> AppResult<Option<Property>> {
        Ok(lock(&self.rows).iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, data: &CreateProperty) -> AppResult<Property> {
        Ok(self.insert(data.clone()))
    }
}

// ── Storage ────────────────────────────────────────────────

/// Object store that keeps uploads in memory and can be told to fail.
#[derive(Debug, Default)]
pub struct FakeStorage {
    objects: Mutex<HashMap<String, Bytes>>,
    last_path: Mutex<Option<String>>,
    failing: AtomicBool,
    uploads: AtomicUsize,
}

impl FakeStorage {
    /// Base URL of every public object.
    pub const PUBLIC_BASE: &'static str = "https://storage.test/home-away";

    /// Make every subsequent write fail (or succeed again).
    pub fn fail_uploads(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of write attempts, failed ones included.
    pub fn uploads(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    /// Bytes stored at `path`, if any.
    pub fn object(&self, path: &str) -> Option<Bytes> {
        lock(&self.objects).get(path).cloned()
    }

    /// Public URL of the most recent stored object.
    pub fn last_public_url(&self) -> Option<String> {
        lock(&self.last_path).as_deref().map(|p| self.public_url(p))
    }
}

#[async_trait]
impl StorageProvider for FakeStorage {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(!self.failing.load(Ordering::SeqCst))
    }

    async fn write(&self, path: &str, data: Bytes, _content_type: &str) -> AppResult<()> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::external_service("Object store rejected the upload"));
        }
        lock(&self.objects).insert(path.to_string(), data);
        *lock(&self.last_path) = Some(path.to_string());
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{path}", Self::PUBLIC_BASE)
    }
}

// ── Identity ───────────────────────────────────────────────

/// Identity provider backed by a token table.
#[derive(Debug, Default)]
pub struct FakeIdentity {
    tokens: Mutex<HashMap<String, (String, String)>>,
    completed: Mutex<HashSet<String>>,
}

impl FakeIdentity {
    /// Register `id` and return a session that resolves to it.
    pub fn sign_in(&self, id: &str, email: &str) -> SessionContext {
        let token = format!("token-{id}");
        lock(&self.tokens).insert(token.clone(), (id.to_string(), email.to_string()));
        SessionContext::with_bearer(token)
    }

    /// Whether `id` has been marked as having a profile.
    pub fn has_profile(&self, id: &str) -> bool {
        lock(&self.completed).contains(id)
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn resolve(&self, session: &SessionContext) -> AppResult<Option<Identity>> {
        let Some(token) = session.bearer_token.as_deref() else {
            return Ok(None);
        };
        let Some((id, email)) = lock(&self.tokens).get(token).cloned() else {
            return Ok(None);
        };
        let has_profile = self.has_profile(&id);
        Ok(Some(Identity {
            id,
            email,
            image_url: None,
            has_profile,
        }))
    }

    async fn mark_profile_complete(&self, identity_id: &str) -> AppResult<()> {
        lock(&self.completed).insert(identity_id.to_string());
        Ok(())
    }
}

// ── Harness ────────────────────────────────────────────────

/// [`Services`] wired to in-memory collaborators, with handles to each.
#[derive(Debug, Clone)]
pub struct Harness {
    pub services: Services,
    pub profiles: Arc<InMemoryProfiles>,
    pub properties: Arc<InMemoryProperties>,
    pub storage: Arc<FakeStorage>,
    pub identity: Arc<FakeIdentity>,
    pub views: ViewCache,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    pub fn new() -> Self {
        let profiles = Arc::new(InMemoryProfiles::default());
        let properties = Arc::new(InMemoryProperties::default());
        let storage = Arc::new(FakeStorage::default());
        let identity = Arc::new(FakeIdentity::default());
        let views = ViewCache::new(CacheManager::new(&CacheConfig::default()), true);

        let services = Services::new(
            identity.clone(),
            profiles.clone(),
            properties.clone(),
            ImageStore::from_provider(storage.clone()),
            views.clone(),
        );

        Self {
            services,
            profiles,
            properties,
            storage,
            identity,
            views,
        }
    }

    /// A signed-in session without a profile.
    pub fn sign_in(&self, id: &str, email: &str) -> SessionContext {
        self.identity.sign_in(id, email)
    }

    /// A signed-in session whose profile already exists. The username is
    /// the identity id.
    pub async fn signed_up(&self, id: &str) -> SessionContext {
        let email = format!("{id}@homeaway.test");
        let session = self.sign_in(id, &email);
        let created = self
            .profiles
            .create(&CreateProfile {
                clerk_id: id.to_string(),
                first_name: "Test".to_string(),
                last_name: "User".to_string(),
                username: id.to_string(),
                email,
                profile_image: String::new(),
            })
            .await;
        if created.is_ok() {
            let _ = self.identity.mark_profile_complete(id).await;
        }
        session
    }

    /// Insert a listing directly. Later calls get later `created_at`.
    pub fn seed_property(&self, name: &str, category: &str) -> Property {
        self.properties.insert(CreateProperty {
            name: name.to_string(),
            tagline: "Quiet place to stay".to_string(),
            category: category.to_string(),
            image: format!("{}/seed.jpg", FakeStorage::PUBLIC_BASE),
            country: "US".to_string(),
            description: ten_words(),
            price: 100,
            guests: 2,
            bedrooms: 1,
            beds: 1,
            baths: 1,
            amenities: "[]".to_string(),
            profile_id: "seed".to_string(),
        })
    }
}

/// A valid profile submission.
pub fn profile_form(first_name: &str, last_name: &str, username: &str) -> FormData {
    FormData::new()
        .with_field("firstName", first_name)
        .with_field("lastName", last_name)
        .with_field("username", username)
}

/// A valid listing submission, without the image.
pub fn property_form(name: &str, category: &str) -> FormData {
    FormData::new()
        .with_field("name", name)
        .with_field("tagline", "Quiet cabin by the lake")
        .with_field("category", category)
        .with_field("country", "US")
        .with_field("description", ten_words())
        .with_field("price", "120")
        .with_field("guests", "4")
        .with_field("bedrooms", "2")
        .with_field("beds", "2")
        .with_field("baths", "1")
        .with_field("amenities", r#"[{"name":"wifi","selected":true}]"#)
}

fn ten_words() -> String {
    "a warm and bright room with a view of the lake".to_string()
}
