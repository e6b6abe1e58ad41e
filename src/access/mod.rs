//! Entitlements and accounts — reads and appends against the hosted
//! access table, plus the auth session wrappers.

pub mod model;
pub mod store;
pub mod supabase;

pub use model::{AccessRecord, AccessSnapshot, AccessType, ToolGate};
pub use store::{
    AccessStore, MemoryAuth, MemoryStore, Session, SessionAuth, SessionUser, SignUpOutcome,
};
pub use supabase::SupabaseClient;

use axum::http::{HeaderMap, header};

/// Pull the bearer token off a request, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer abc123".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc123"));

        let mut basic = HeaderMap::new();
        basic.insert(header::AUTHORIZATION, "Basic abc123".parse().unwrap());
        assert_eq!(bearer_token(&basic), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
