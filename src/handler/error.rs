// Per-request failure type
// Both kinds are client errors and map to HTTP 400

use thiserror::Error;

use crate::calculator::CalcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RequestError {
    /// A required operand is missing or not a finite number
    #[error("Invalid parameters. Provide a and b as numbers.")]
    InvalidParameters,

    /// The operation is undefined for the given operands
    #[error(transparent)]
    Domain(#[from] CalcError),
}
