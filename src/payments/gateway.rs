//! Simulated payment gateway.
//!
//! The hosted widget tokenizes the card in the browser; no server-side
//! charge verification exists in this deployment, so the charge itself is
//! simulated: a fixed latency, then an outcome drawn from a configured
//! success rate.

use std::str::FromStr;
use std::time::Duration;

use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Gateway outcome, as the checkout flow reports it.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    pub message: String,
}

/// Simulated card processor.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    success_rate: f64,
    latency: Duration,
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self {
            success_rate: 0.95,
            latency: Duration::from_millis(2500),
        }
    }
}

impl SimulatedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Probability a charge is authorized, in `[0.0, 1.0]`.
    pub fn with_success_rate(mut self, rate: f64) -> Self {
        self.success_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Run the simulated charge for an already-tokenized card.
    pub async fn charge(&self, _token: &str, _amount_in_cents: i64) -> TransactionResponse {
        tokio::time::sleep(self.latency).await;

        let (authorized, reference) = {
            let mut rng = rand::thread_rng();
            (
                rng.r#gen::<f64>() < self.success_rate,
                rng.gen_range(0..1_000_000u32),
            )
        };

        if authorized {
            TransactionResponse {
                success: true,
                transaction_id: Some(format!("TRX-{reference}-ZAR")),
                message: "Payment authorized via PayStack Gateway.".to_string(),
            }
        } else {
            TransactionResponse {
                success: false,
                transaction_id: None,
                message: "Bank declined transaction. Please check 3D Secure.".to_string(),
            }
        }
    }
}

/// Parse a display price like `"R499"` or `"R1,500"` into cents.
pub fn amount_in_cents(price: &str) -> Option<i64> {
    let digits: String = price
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if digits.is_empty() {
        return None;
    }
    let amount = Decimal::from_str(&digits).ok()?;
    (amount * dec!(100)).trunc().to_i64()
}
