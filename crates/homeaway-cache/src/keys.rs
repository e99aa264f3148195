//! Cache key builders.
//!
//! Every key the application writes is constructed here.

/// Prefix applied to all HomeAway cache keys.
const PREFIX: &str = "homeaway";

// ── View keys ──────────────────────────────────────────────

/// Key for one cached read rendered under a page path.
///
/// `variant` distinguishes reads on the same page, e.g. different search
/// filters or different callers.
pub fn view(path: &str, variant: &str) -> String {
    format!("{PREFIX}:view:{path}|{variant}")
}

/// Pattern matching every cached read of exactly `path`.
pub fn view_pattern(path: &str) -> String {
    format!("{PREFIX}:view:{path}|*")
}

// ── Identity keys ──────────────────────────────────────────

/// Key for the "has completed profile" flag of an identity.
pub fn profile_flag(identity_id: &str) -> String {
    format!("{PREFIX}:identity:{identity_id}:has_profile")
}
