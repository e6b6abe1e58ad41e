//! Per-tool SaaS generation: prompt dictionary, generation wrapper, and
//! the trial/paid-gated REST surface.

pub mod generation;
pub mod routes;
pub mod tools;

pub use generation::{GenerationInputs, SaasGenerator};
pub use routes::{SaasState, saas_routes};
pub use tools::{ToolPrompt, tool_prompt};
