//! Environment-provided configuration.
//!
//! Every external collaborator is configured from the environment at startup,
//! with the hosted defaults baked in where the deployment ships publishable
//! keys (data store URL/key, payment public key). The generation API key has
//! no default: without it every generation wrapper short-circuits to its
//! missing-configuration sentence instead of failing at startup.

use std::net::SocketAddr;
use std::path::PathBuf;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Publishable data-store defaults shipped with the site build.
const DEFAULT_SUPABASE_URL: &str = "https://mbhywoobtsgrppdufzjy.supabase.co";
const DEFAULT_SUPABASE_ANON_KEY: &str = "sb_publishable_ORqubZWwfMgdV3kLycYeeg_tJjuTpK-";

/// Test-mode payment public key used when no live key is configured.
const DEFAULT_YOCO_PUBLIC_KEY: &str = "pk_test_ed3c54a6gOol69QA7f45";

const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// Service configuration, read once in `main`.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Generation model identifier.
    pub model: String,
    /// Generation API key. `None` means generation degrades to fixed
    /// error sentences rather than refusing to start.
    pub gemini_api_key: Option<SecretString>,
    /// Base URL of the hosted generation endpoint.
    pub gemini_base_url: String,
    /// Hosted data store (PostgREST + GoTrue) base URL.
    pub supabase_url: String,
    /// Publishable data-store key.
    pub supabase_anon_key: SecretString,
    /// Public key served to the hosted payment widget.
    pub yoco_public_key: String,
    /// Optional directory of static site assets to serve at `/`.
    pub static_dir: Option<PathBuf>,
}

impl SiteConfig {
    /// Read configuration from the environment, falling back to the baked-in
    /// defaults for anything absent. A present-but-unparseable bind address
    /// is an error, not a fallback.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_raw = std::env::var("SITE_ADDR").unwrap_or_else(|_| DEFAULT_BIND.to_string());
        let bind_addr: SocketAddr =
            bind_raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "SITE_ADDR".to_string(),
                message: format!("not a socket address: {bind_raw}"),
            })?;

        // The deploy pipeline has set this under both names historically.
        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .filter(|k| !k.is_empty())
            .map(SecretString::from);

        Ok(Self {
            bind_addr,
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            gemini_api_key,
            gemini_base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
            supabase_url: std::env::var("SUPABASE_URL")
                .unwrap_or_else(|_| DEFAULT_SUPABASE_URL.to_string()),
            supabase_anon_key: SecretString::from(
                std::env::var("SUPABASE_ANON_KEY")
                    .unwrap_or_else(|_| DEFAULT_SUPABASE_ANON_KEY.to_string()),
            ),
            yoco_public_key: std::env::var("YOCO_PUBLIC_KEY")
                .unwrap_or_else(|_| DEFAULT_YOCO_PUBLIC_KEY.to_string()),
            static_dir: std::env::var("SITE_STATIC_DIR").ok().map(PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_env_absent() {
        // Only inspects the fallback constants — reading the process
        // environment in tests would race with other tests.
        let cfg = SiteConfig {
            bind_addr: DEFAULT_BIND.parse().unwrap(),
            model: DEFAULT_MODEL.to_string(),
            gemini_api_key: None,
            gemini_base_url: "https://generativelanguage.googleapis.com".to_string(),
            supabase_url: DEFAULT_SUPABASE_URL.to_string(),
            supabase_anon_key: SecretString::from(DEFAULT_SUPABASE_ANON_KEY),
            yoco_public_key: DEFAULT_YOCO_PUBLIC_KEY.to_string(),
            static_dir: None,
        };
        assert_eq!(cfg.bind_addr.port(), 8080);
        assert!(cfg.gemini_api_key.is_none());
        assert!(cfg.supabase_url.starts_with("https://"));
        assert!(cfg.yoco_public_key.starts_with("pk_test_"));
    }
}
