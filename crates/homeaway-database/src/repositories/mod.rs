//! Repository ports and their PostgreSQL adapters.
//!
//! The traits are what the service layer depends on; the `Pg*` structs are
//! the production implementations. Tests substitute in-memory fakes.

pub mod profile;
pub mod property;

pub use profile::{PgProfileRepository, ProfileRepository};
pub use property::{PgPropertyRepository, PropertyRepository};
