//! Custom Axum extractors.

pub mod form;
pub mod session;

pub use form::FormSubmission;
pub use session::Session;
