//! Profile entity.

pub mod model;

pub use model::{CreateProfile, Profile, UpdateProfile};
