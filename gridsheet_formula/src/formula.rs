//! The owned, parsed form of a cell formula.
use crate::evaluator;
use crate::evaluator::{CellResolver, EvalError};
use crate::position::Position;
use crate::raw_parser;
use crate::raw_parser::{Expression, ParseError};

use std::collections::HashSet;

/// A parsed formula, ready to be evaluated, reprinted, or asked for the
/// cells it references.
#[derive(Clone, Debug, PartialEq)]
pub struct Formula {
    parsed: Expression,
}

impl Formula {
    /// Parses an expression string. The leading formula sign must already be
    /// stripped by the caller.
    pub fn parse(expression: &str) -> Result<Formula, ParseError> {
        Ok(Formula {
            parsed: raw_parser::parse_formula(expression)?,
        })
    }

    pub fn parsed(&self) -> &Expression {
        &self.parsed
    }

    pub fn evaluate(&self, resolver: &CellResolver) -> Result<f64, EvalError> {
        evaluator::evaluate(&self.parsed, resolver)
    }

    /// The canonical text of the expression, without the formula sign.
    pub fn expression(&self) -> String {
        self.parsed.to_string()
    }

    /// The valid positions this formula references directly, in order of
    /// first occurrence in a left-to-right traversal, deduplicated.
    /// Out-of-bounds references are omitted; they only surface as `#REF!`
    /// when the formula is evaluated.
    pub fn referenced_cells(&self) -> Vec<Position> {
        let mut seen = HashSet::new();
        let mut result = Vec::new();

        collect_references(&self.parsed, &mut seen, &mut result);

        result
    }
}

fn collect_references(expr: &Expression, seen: &mut HashSet<Position>, result: &mut Vec<Position>) {
    match expr {
        Expression::ValueNum(_) => {}
        Expression::Ref(pos) => {
            if pos.is_valid() && seen.insert(*pos) {
                result.push(*pos);
            }
        }
        Expression::Negate(expr) => collect_references(expr, seen, result),
        Expression::Add(lhs, rhs)
        | Expression::Subtract(lhs, rhs)
        | Expression::Multiply(lhs, rhs)
        | Expression::Divide(lhs, rhs) => {
            collect_references(lhs, seen, result);
            collect_references(rhs, seen, result);
        }
    }
}
