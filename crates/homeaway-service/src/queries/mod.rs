//! Read paths.
//!
//! Reads rendered on a cached page go through the
//! [`ViewCache`](homeaway_cache::ViewCache) under that page's path, so a
//! revalidation after a write is enough to make the next read fresh.

pub mod country;
pub mod profile;
pub mod property;

pub use country::{countries, find_country};
pub use profile::ProfileQueries;
pub use property::PropertyQueries;
