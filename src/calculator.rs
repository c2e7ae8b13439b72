//! Arithmetic operations
//!
//! Pure functions with no knowledge of HTTP. Every function returns a
//! `Result` so the router can bind all of them through one signature family;
//! only `divide` and `square_root` can actually fail.

use thiserror::Error;

/// Domain failure of an arithmetic operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("Cannot divide by zero.")]
    DivideByZero,
    #[error("Cannot compute the square root of a negative number.")]
    NegativeSquareRoot,
}

pub type BinaryFn = fn(f64, f64) -> Result<f64, CalcError>;
pub type UnaryFn = fn(f64) -> Result<f64, CalcError>;

/// An arithmetic function bound to a route at setup time
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Needs both `a` and `b`
    Binary(BinaryFn),
    /// Needs only `a`; `b` is optional and ignored
    Unary(UnaryFn),
}

impl Operation {
    /// Whether the operation requires the second operand
    pub const fn requires_b(&self) -> bool {
        matches!(self, Self::Binary(_))
    }
}

#[allow(clippy::unnecessary_wraps)]
pub fn sum(a: f64, b: f64) -> Result<f64, CalcError> {
    Ok(a + b)
}

#[allow(clippy::unnecessary_wraps)]
pub fn subtract(a: f64, b: f64) -> Result<f64, CalcError> {
    Ok(a - b)
}

#[allow(clippy::unnecessary_wraps)]
pub fn multiply(a: f64, b: f64) -> Result<f64, CalcError> {
    Ok(a * b)
}

pub fn divide(a: f64, b: f64) -> Result<f64, CalcError> {
    // -0.0 == 0.0, so negative zero is rejected as well
    if b == 0.0 {
        return Err(CalcError::DivideByZero);
    }
    Ok(a / b)
}

/// `percent` percent of `value`
#[allow(clippy::unnecessary_wraps)]
pub fn percentage(value: f64, percent: f64) -> Result<f64, CalcError> {
    Ok(value * percent / 100.0)
}

pub fn square_root(a: f64) -> Result<f64, CalcError> {
    if a < 0.0 {
        return Err(CalcError::NegativeSquareRoot);
    }
    Ok(a.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_basic_operations() {
        assert_eq!(sum(5.0, 3.0), Ok(8.0));
        assert_eq!(subtract(10.0, 4.0), Ok(6.0));
        assert_eq!(multiply(7.0, 2.0), Ok(14.0));
        assert_eq!(divide(20.0, 5.0), Ok(4.0));
        assert_eq!(percentage(200.0, 10.0), Ok(20.0));
        assert_eq!(square_root(16.0), Ok(4.0));
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(divide(10.0, 0.0), Err(CalcError::DivideByZero));
        assert_eq!(divide(0.0, 0.0), Err(CalcError::DivideByZero));
        assert_eq!(divide(10.0, -0.0), Err(CalcError::DivideByZero));
        assert_eq!(
            CalcError::DivideByZero.to_string(),
            "Cannot divide by zero."
        );
    }

    #[test]
    fn test_square_root_negative() {
        assert_eq!(square_root(-9.0), Err(CalcError::NegativeSquareRoot));
        assert_eq!(
            CalcError::NegativeSquareRoot.to_string(),
            "Cannot compute the square root of a negative number."
        );
        // Negative zero is not below zero
        assert!(square_root(-0.0).is_ok());
    }

    #[test]
    fn test_operation_arity() {
        assert!(Operation::Binary(sum).requires_b());
        assert!(!Operation::Unary(square_root).requires_b());
    }

    #[quickcheck]
    fn test_sum_subtract_multiply(a: f64, b: f64) -> TestResult {
        if !a.is_finite() || !b.is_finite() {
            return TestResult::discard();
        }
        TestResult::from_bool(
            sum(a, b) == Ok(a + b) && subtract(a, b) == Ok(a - b) && multiply(a, b) == Ok(a * b),
        )
    }

    #[quickcheck]
    fn test_divide_law(a: f64, b: f64) -> TestResult {
        if !a.is_finite() || !b.is_finite() {
            return TestResult::discard();
        }
        if b == 0.0 {
            return TestResult::from_bool(divide(a, b) == Err(CalcError::DivideByZero));
        }
        TestResult::from_bool(divide(a, b) == Ok(a / b))
    }

    #[quickcheck]
    fn test_percentage_law(value: f64, percent: f64) -> TestResult {
        if !value.is_finite() || !percent.is_finite() {
            return TestResult::discard();
        }
        TestResult::from_bool(percentage(value, percent) == Ok(value * percent / 100.0))
    }

    #[quickcheck]
    fn test_square_root_law(a: f64) -> TestResult {
        if !a.is_finite() {
            return TestResult::discard();
        }
        match square_root(a) {
            Ok(root) => TestResult::from_bool(a >= 0.0 && root == a.sqrt() && root >= 0.0),
            Err(e) => TestResult::from_bool(a < 0.0 && e == CalcError::NegativeSquareRoot),
        }
    }

    #[quickcheck]
    fn test_divide_by_zero_any_dividend(a: f64) -> bool {
        divide(a, 0.0) == Err(CalcError::DivideByZero)
    }
}
