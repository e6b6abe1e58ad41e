//! Scripted intake dialogue — a fixed, non-branching prompt sequence with
//! a single advancing cursor and an in-memory answer record.

pub mod routes;
pub mod script;
pub mod session;

pub use routes::{BookingRegistry, booking_routes};
pub use session::{Advance, AgentPrompt, BookingSession, DialogueError, PromptKind};
