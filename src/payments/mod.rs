//! Payment capture — hosted-widget configuration, the simulated charge,
//! and `PAID` entitlement recording.

pub mod gateway;
pub mod routes;

pub use gateway::{SimulatedGateway, TransactionResponse, amount_in_cents};
pub use routes::{PaymentsState, payment_routes};
