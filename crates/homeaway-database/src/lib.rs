//! # homeaway-database
//!
//! PostgreSQL connection management, embedded migrations, and the
//! repository ports for profiles and listings together with their
//! sqlx adapters.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{
    PgProfileRepository, PgPropertyRepository, ProfileRepository, PropertyRepository,
};
