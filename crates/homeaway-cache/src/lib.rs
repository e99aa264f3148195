//! # homeaway-cache
//!
//! In-process caching for HomeAway, built on
//! [moka](https://crates.io/crates/moka). [`CacheManager`] dispatches to the
//! configured [`CacheProvider`](homeaway_core::traits::CacheProvider);
//! [`ViewCache`] layers path-based revalidation on top so that a mutation
//! can drop every cached read rendered for a page.

pub mod keys;
pub mod memory;
pub mod provider;
pub mod view;

pub use memory::MemoryCacheProvider;
pub use provider::CacheManager;
pub use view::{Generation, ViewCache, ViewLookup};
