//! Error types for expression evaluation

use crate::registry::FunctionError;
use thiserror::Error;

/// Result type for evaluation operations
pub type EvaluationResult<T> = Result<T, EvaluationError>;

/// Errors that can occur while evaluating an expression
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    /// A variable had no binding
    #[error("no such variable `{name}`")]
    UnknownVariable {
        /// Variable name
        name: String,
    },

    /// Division with a zero divisor, direct or computed
    #[error("division by zero")]
    DivisionByZero,

    /// A non-concatenation operator was applied to a string
    #[error("operator `{op}` is not supported for strings (use `+` for concatenation)")]
    StringOperator {
        /// The operator symbol
        op: &'static str,
    },

    /// An integral value reached the arithmetic core without widening
    #[error("integer operand reached the arithmetic core without widening")]
    UnwidenedInteger,

    /// Function dispatch failed
    #[error(transparent)]
    Function(#[from] FunctionError),
}
