//! This crate provides the formula layer of the gridsheet engine: cell
//! positions, the arithmetic expression AST, the parser and the evaluator.
//!
//! Unlike the engine crate, this can be used independently by any project that
//! needs to parse and evaluate plain arithmetic formulas over cell references.
//!
//! ## Example
//! ```
//! use gridsheet_formula::evaluator::EvalError;
//! use gridsheet_formula::formula::Formula;
//! use gridsheet_formula::position::Position;
//!
//! let formula = Formula::parse("(1 + 2) * A1").unwrap();
//!
//! // Reprinting is canonical: only the parentheses that matter survive.
//! assert_eq!(formula.expression(), "(1+2)*A1");
//! assert_eq!(formula.referenced_cells(), vec![Position::new(0, 0)]);
//!
//! // Evaluation resolves references through a caller-supplied resolver.
//! let value = formula.evaluate(&|_pos| Ok(10.0));
//! assert_eq!(value, Ok(30.0));
//!
//! let value = formula.evaluate(&|_pos| Err(EvalError::Value));
//! assert_eq!(value, Err(EvalError::Value));
//! ```

pub mod evaluator;
pub mod formula;
pub mod position;
pub mod raw_parser;
