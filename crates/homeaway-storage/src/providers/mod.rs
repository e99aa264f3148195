//! Storage provider implementations.

pub mod local;
pub mod supabase;

pub use local::LocalStorageProvider;
pub use supabase::SupabaseStorageProvider;
