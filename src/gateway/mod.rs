//! Remote counter service boundary.
//!
//! The controller only sees three async calls that each return the current
//! counter value. Every failure mode collapses into [`GatewayError`], which
//! the controller reports uniformly.

mod http;
mod memory;

use std::future::Future;

use serde_json::Value;
use thiserror::Error;

pub use http::HttpGateway;
pub use memory::MemoryGateway;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Request to counter service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Counter service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed counter payload: {0}")]
    Decode(String),

    #[error("Counter value {0} does not fit in a 64-bit integer")]
    OutOfRange(String),

    #[error("Counter service unavailable: {0}")]
    Unavailable(String),
}

/// Async access to the authoritative counter.
pub trait CounterGateway: Send + Sync + 'static {
    fn get(&self) -> impl Future<Output = Result<i64, GatewayError>> + Send;

    fn increment(&self) -> impl Future<Output = Result<i64, GatewayError>> + Send;

    fn reset(&self) -> impl Future<Output = Result<i64, GatewayError>> + Send;
}

/// Smallest magnitude a float can have and still sit outside i64.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Convert a wire integer into the native representation.
///
/// The service may send the value as a JSON number or as a decimal string
/// (arbitrary-precision naturals do not fit every JSON number reader).
/// Integers past u64 reach us as floats; whole ones outside i64 are
/// `OutOfRange`, fractional ones are `Decode`.
pub fn decode_value(value: &Value) -> Result<i64, GatewayError> {
    let digits = match value {
        Value::Number(number) => {
            if let Some(v) = number.as_i64() {
                return Ok(v);
            }
            if number.is_u64() {
                return Err(GatewayError::OutOfRange(number.to_string()));
            }
            if let Some(float) = number.as_f64() {
                if float.is_finite() && float.fract() == 0.0 && float.abs() >= I64_LIMIT {
                    return Err(GatewayError::OutOfRange(number.to_string()));
                }
            }
            return Err(GatewayError::Decode(format!("not an integer: {number}")));
        }
        Value::String(text) => text.trim(),
        other => return Err(GatewayError::Decode(format!("unexpected value: {other}"))),
    };

    let digits_only = digits.strip_prefix('-').unwrap_or(digits);
    if digits_only.is_empty() || !digits_only.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GatewayError::Decode(format!("not an integer: {digits:?}")));
    }
    match digits.parse::<i128>() {
        Ok(wide) => i64::try_from(wide).map_err(|_| GatewayError::OutOfRange(digits.to_string())),
        // Only digits remain, so a parse failure means it overflowed i128.
        Err(_) => Err(GatewayError::OutOfRange(digits.to_string())),
    }
}
