//! Route handlers organized by domain.

pub mod country;
pub mod health;
pub mod profile;
pub mod property;
