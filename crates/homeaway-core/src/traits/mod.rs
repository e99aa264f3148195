//! Collaborator traits defined in `homeaway-core` and implemented by the
//! adapter crates.

pub mod cache;
pub mod identity;
pub mod storage;

pub use cache::CacheProvider;
pub use identity::{Identity, IdentityProvider};
pub use storage::StorageProvider;
