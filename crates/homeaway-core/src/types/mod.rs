//! Core type definitions used across the HomeAway workspace.

pub mod id;
pub mod session;

pub use id::*;
pub use session::SessionContext;
