//! Request handler module
//!
//! Routing, operand validation and operation dispatch for calculator requests.

mod dispatch;
mod error;
pub mod router;
mod validate;

// Re-export main entry point
pub use router::handle_request;
