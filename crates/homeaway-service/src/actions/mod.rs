//! Mutation pipeline.
//!
//! Every action runs the same steps: resolve the caller, validate the
//! submission, upload the image when there is one, write through the
//! repository, revalidate the affected page, and report an explicit
//! [`ActionOutcome`]. Nothing escapes an action as an error; failures are
//! folded into the outcome.

pub mod auth;
pub mod error;
pub mod outcome;
pub mod profile;
pub mod property;

use tracing::warn;

use homeaway_cache::ViewCache;

pub use error::ActionError;
pub use outcome::{ActionOutcome, FailureReason};
pub use profile::ProfileActions;
pub use property::PropertyActions;

/// Landing page listing every property.
pub const HOME_PATH: &str = "/";
/// Page showing the caller's own profile.
pub const PROFILE_PATH: &str = "/profile";
/// Where callers without a profile are sent.
pub const CREATE_PROFILE_PATH: &str = "/profile/create";

/// Drop cached reads for `path`. The write already happened, so a failure
/// here is logged and otherwise ignored.
pub(crate) async fn revalidate(views: &ViewCache, path: &str) {
    if let Err(e) = views.revalidate(path).await {
        warn!(path, error = %e, "Failed to revalidate view path");
    }
}
