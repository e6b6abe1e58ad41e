//! Site composition — intro gating, static content endpoints, and the
//! auth surface the modals call.

pub mod routes;
pub mod session;

pub use routes::{SiteState, site_routes};
pub use session::{IntroGate, SESSION_COOKIE};
