//! # homeaway-auth
//!
//! Identity resolution for HomeAway.
//!
//! - `jwt` — HS256 identity tokens: claims, encoder (for tooling and
//!   tests) and decoder
//! - `identity` — [`JwtIdentityProvider`], the bearer-token implementation
//!   of [`IdentityProvider`](homeaway_core::traits::IdentityProvider)

pub mod identity;
pub mod jwt;

pub use identity::JwtIdentityProvider;
pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder};
