//! Operand validation module
//!
//! Turns the raw query string into numeric operands, or rejects the request
//! before any arithmetic runs.

use serde::Deserialize;

use super::error::RequestError;

/// Raw `a`/`b` query parameters; anything else in the query is ignored
#[derive(Debug, Default, Deserialize)]
struct RawOperands {
    a: Option<String>,
    b: Option<String>,
}

/// Validated operands. Both values are finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Operands {
    pub a: f64,
    pub b: Option<f64>,
}

/// Extract and check `a` and `b` from a query string.
///
/// `a` is always required. `b` is required when `requires_b` is set; when it
/// is optional but present it must still be a number.
pub fn validate(query: Option<&str>, requires_b: bool) -> Result<Operands, RequestError> {
    let raw: RawOperands = match query {
        Some(q) => serde_urlencoded::from_str(q).map_err(|_| RequestError::InvalidParameters)?,
        None => RawOperands::default(),
    };

    let a = raw
        .a
        .as_deref()
        .and_then(parse_number)
        .ok_or(RequestError::InvalidParameters)?;

    let b = match raw.b.as_deref() {
        Some(value) => Some(parse_number(value).ok_or(RequestError::InvalidParameters)?),
        None if requires_b => return Err(RequestError::InvalidParameters),
        None => None,
    };

    Ok(Operands { a, b })
}

/// Parse a decimal number, rejecting empty input, NaN and infinities
fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}
