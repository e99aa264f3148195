//! # homeaway-storage
//!
//! Object storage for uploaded images. Supports the local filesystem and
//! Supabase-compatible HTTP object storage; [`ImageStore`] picks the
//! provider from configuration and turns an upload into a public URL.

pub mod image;
pub mod providers;

pub use image::ImageStore;
