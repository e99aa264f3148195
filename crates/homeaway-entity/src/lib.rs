//! # homeaway-entity
//!
//! Domain entity models for HomeAway. Database rows derive
//! `sqlx::FromRow`; the country table is static reference data bundled
//! with the crate.

pub mod country;
pub mod profile;
pub mod property;
