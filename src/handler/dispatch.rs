//! Operation dispatch module
//!
//! Applies the route's bound operation and turns the outcome into a response.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde_json::{json, Value};

use super::error::RequestError;
use super::validate::Operands;
use crate::calculator::Operation;
use crate::config::HttpConfig;
use crate::http;

/// Largest magnitude below which every integer is exactly representable in f64
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Invoke `operation` on validated operands
pub fn dispatch(operation: Operation, operands: Operands) -> Result<f64, RequestError> {
    match operation {
        Operation::Unary(f) => f(operands.a).map_err(RequestError::from),
        Operation::Binary(f) => {
            let b = operands.b.ok_or(RequestError::InvalidParameters)?;
            f(operands.a, b).map_err(RequestError::from)
        }
    }
}

/// 200 with `{"result": n}` or 400 with `{"error": message}`
pub fn respond(
    outcome: Result<f64, RequestError>,
    http_config: &HttpConfig,
    is_head: bool,
) -> Response<Full<Bytes>> {
    match outcome {
        Ok(value) => http::build_json_response(
            StatusCode::OK,
            &json!({ "result": json_number(value) }),
            http_config,
            is_head,
        ),
        Err(e) => http::build_error_response(
            StatusCode::BAD_REQUEST,
            &e.to_string(),
            http_config,
            is_head,
        ),
    }
}

/// Render a result the way a JSON client expects it: integral values as
/// integers, other finite values as floats, non-finite values as `null`.
pub fn json_number(value: f64) -> Value {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        // Exact: |value| <= 2^53 and integral
        #[allow(clippy::cast_possible_truncation)]
        let integer = value as i64;
        return Value::from(integer);
    }
    serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{self, CalcError};

    #[test]
    fn test_dispatch_binary() {
        let operands = Operands { a: 20.0, b: Some(5.0) };
        assert_eq!(dispatch(Operation::Binary(calculator::divide), operands), Ok(4.0));
    }

    #[test]
    fn test_dispatch_domain_error() {
        let operands = Operands { a: 10.0, b: Some(0.0) };
        assert_eq!(
            dispatch(Operation::Binary(calculator::divide), operands),
            Err(RequestError::Domain(CalcError::DivideByZero))
        );

        let operands = Operands { a: -9.0, b: None };
        let err = dispatch(Operation::Unary(calculator::square_root), operands).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot compute the square root of a negative number."
        );
    }

    #[test]
    fn test_dispatch_unary_ignores_b() {
        let operands = Operands { a: 16.0, b: Some(-1.0) };
        assert_eq!(dispatch(Operation::Unary(calculator::square_root), operands), Ok(4.0));
    }

    #[test]
    fn test_dispatch_binary_without_b() {
        let operands = Operands { a: 1.0, b: None };
        assert_eq!(
            dispatch(Operation::Binary(calculator::sum), operands),
            Err(RequestError::InvalidParameters)
        );
    }

    #[test]
    fn test_json_number() {
        assert_eq!(json_number(8.0), json!(8));
        assert_eq!(json_number(-3.0), json!(-3));
        assert_eq!(json_number(-0.0), json!(0));
        assert_eq!(json_number(2.5), json!(2.5));
        assert_eq!(json_number(f64::INFINITY), Value::Null);
        assert_eq!(json_number(1e300), json!(1e300));
        assert_eq!(json!({ "result": json_number(8.0) }).to_string(), r#"{"result":8}"#);
    }
}
