//! HTTP protocol layer module
//!
//! Response builders shared by the router and the dispatcher.

pub mod response;

// Re-export commonly used builders
pub use response::{
    build_404_response, build_405_response, build_413_response, build_error_response,
    build_health_response, build_json_response, build_options_response,
};
