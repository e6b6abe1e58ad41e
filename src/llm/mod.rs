//! Generation endpoint integration.
//!
//! One process-wide client handle, created lazily from configuration: a
//! missing API key yields `None` and every wrapper degrades to its fixed
//! missing-configuration sentence instead of the service refusing to start.

pub mod gemini;
pub mod provider;

pub use gemini::GeminiClient;
pub use provider::{GenerationRequest, InlineData, Part, Role, TextGenerator, Turn};

use std::sync::Arc;

use crate::config::SiteConfig;

/// Create the shared generation client from configuration.
pub fn create_generator(config: &SiteConfig) -> Option<Arc<dyn TextGenerator>> {
    let api_key = config.gemini_api_key.clone()?;
    tracing::info!("Using hosted generation endpoint (model: {})", config.model);
    Some(Arc::new(GeminiClient::new(
        api_key,
        config.gemini_base_url.clone(),
        config.model.clone(),
    )))
}
