//! Route table module
//!
//! Binds each calculator path to its arithmetic function once, at startup.

use crate::calculator::{self, Operation};

/// Route name and the operation it is bound to, relative to the API prefix
const OPERATIONS: [(&str, Operation); 6] = [
    ("sum", Operation::Binary(calculator::sum)),
    ("subtract", Operation::Binary(calculator::subtract)),
    ("multiply", Operation::Binary(calculator::multiply)),
    ("divide", Operation::Binary(calculator::divide)),
    ("percentage", Operation::Binary(calculator::percentage)),
    ("sqrt", Operation::Unary(calculator::square_root)),
];

/// A single path bound to an operation
#[derive(Debug, Clone)]
pub struct Route {
    pub path: String,
    pub operation: Operation,
}

/// Immutable table of calculator routes
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Build the table under `prefix` (already normalized, may be empty)
    pub fn new(prefix: &str) -> Self {
        let routes = OPERATIONS
            .iter()
            .map(|(name, operation)| Route {
                path: format!("{prefix}/{name}"),
                operation: *operation,
            })
            .collect();
        Self { routes }
    }

    /// Exact path match
    pub fn match_route(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.path == path)
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_under_prefix() {
        let table = RouteTable::new("/api");
        let paths: Vec<&str> = table.routes().iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "/api/sum",
                "/api/subtract",
                "/api/multiply",
                "/api/divide",
                "/api/percentage",
                "/api/sqrt"
            ]
        );
    }

    #[test]
    fn test_match_exact_only() {
        let table = RouteTable::new("/api");
        assert!(table.match_route("/api/sum").is_some());
        assert!(table.match_route("/api/sum/").is_none());
        assert!(table.match_route("/api/summary").is_none());
        assert!(table.match_route("/API/SUM").is_none());
        assert!(table.match_route("/sum").is_none());
    }

    #[test]
    fn test_only_sqrt_is_unary() {
        let table = RouteTable::new("/api");
        for route in table.routes() {
            let unary = route.path == "/api/sqrt";
            assert_eq!(route.operation.requires_b(), !unary, "{}", route.path);
        }
    }

    #[test]
    fn test_root_prefix() {
        let table = RouteTable::new("");
        assert!(table.match_route("/divide").is_some());
    }

    #[test]
    fn test_bound_functions() {
        let table = RouteTable::new("/api");
        let Some(Operation::Binary(divide)) = table.match_route("/api/divide").map(|r| r.operation)
        else {
            panic!("divide should be a binary operation");
        };
        assert_eq!(divide(20.0, 5.0), Ok(4.0));
    }
}
