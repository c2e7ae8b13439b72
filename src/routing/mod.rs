//! Routing module
//!
//! Maps request paths to calculator operations bound at startup.

mod table;

pub use table::RouteTable;
