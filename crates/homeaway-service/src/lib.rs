//! # homeaway-service
//!
//! Application use cases for HomeAway.
//!
//! - `form` — the untyped form submission handed over by the HTTP layer
//! - `validation` — declarative schemas and [`validate_with_schema`]
//! - `actions` — the mutation pipeline (authenticate, validate, upload,
//!   persist, revalidate) for profiles and listings
//! - `queries` — read paths, cached per page where the page is cached
//!
//! Collaborators are injected at construction time as `Arc<dyn _>` so that
//! tests can swap in the in-memory fakes from `testing`.

pub mod actions;
pub mod form;
pub mod queries;
pub mod services;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod validation;

pub use actions::{ActionError, ActionOutcome, FailureReason, ProfileActions, PropertyActions};
pub use form::{FormData, UploadedFile};
pub use queries::{ProfileQueries, PropertyQueries};
pub use services::Services;
pub use validation::{FieldViolation, ValidationFailure, validate_with_schema};
