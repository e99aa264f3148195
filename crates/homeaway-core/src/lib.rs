//! # homeaway-core
//!
//! Core crate for HomeAway. Contains the configuration schema, typed
//! identifiers, collaborator traits (identity, storage, cache) and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other HomeAway crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
