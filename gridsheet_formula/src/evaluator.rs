//! Evaluates a parsed formula against a cell resolver.
//!
//! Evaluation errors are values, not panics or out-of-band failures: they
//! participate in the arithmetic like numbers and the first one raised in a
//! left-to-right walk becomes the formula's result.
use crate::position::Position;
use crate::raw_parser::Expression;

use std::fmt;
use std::fmt::{Display, Formatter};

/// Error types that can result from evaluating a formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EvalError {
    /// The formula references a position outside the engine bounds.
    Ref,
    /// A referenced cell's text cannot be interpreted as a number.
    Value,
    /// Division by zero, or a result that overflowed to a non-finite double.
    Arithmetic,
}

impl Display for EvalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Ref => write!(f, "#REF!"),
            EvalError::Value => write!(f, "#VALUE!"),
            EvalError::Arithmetic => write!(f, "#ARITHM!"),
        }
    }
}

/// Resolves a referenced position to its numeric value, or raises the
/// `EvalError` that the reference produces.
pub type CellResolver<'a> = dyn Fn(Position) -> Result<f64, EvalError> + 'a;

/// Walks the AST left-to-right with ordinary `f64` arithmetic. Non-finite
/// results are not admitted as values anywhere along the way.
pub fn evaluate(expr: &Expression, resolver: &CellResolver) -> Result<f64, EvalError> {
    finite(evaluate_inner(expr, resolver)?)
}

fn evaluate_inner(expr: &Expression, resolver: &CellResolver) -> Result<f64, EvalError> {
    match expr {
        Expression::ValueNum(num) => Ok(*num),
        Expression::Ref(pos) => resolver(*pos),
        Expression::Negate(expr) => Ok(-evaluate_inner(expr, resolver)?),
        Expression::Add(lhs, rhs) => {
            finite(evaluate_inner(lhs, resolver)? + evaluate_inner(rhs, resolver)?)
        }
        Expression::Subtract(lhs, rhs) => {
            finite(evaluate_inner(lhs, resolver)? - evaluate_inner(rhs, resolver)?)
        }
        Expression::Multiply(lhs, rhs) => {
            finite(evaluate_inner(lhs, resolver)? * evaluate_inner(rhs, resolver)?)
        }
        Expression::Divide(lhs, rhs) => {
            finite(evaluate_inner(lhs, resolver)? / evaluate_inner(rhs, resolver)?)
        }
    }
}

fn finite(result: f64) -> Result<f64, EvalError> {
    if result.is_finite() {
        Ok(result)
    } else {
        Err(EvalError::Arithmetic)
    }
}
