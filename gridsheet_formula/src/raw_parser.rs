//! Parses arithmetic cell formulas into an AST.
//!
//! The grammar is the four binary operators plus unary sign, numeric
//! literals, cell references and parenthesized groups. Grouping is resolved
//! during parsing: the AST carries no parenthesis node, and `Display`
//! re-inserts exactly the parentheses the precedence rules require, so the
//! printed form is canonical.
use crate::position::{col_string_to_col, Position, MAX_POSITION_LETTER_COUNT};

use nom::character::complete;
use nom::error::ErrorKind;
use nom::{branch, bytes, combinator, multi, number, sequence, IResult};

use std::fmt;
use std::fmt::{Display, Formatter};

type Expr = Box<Expression>;

/// AST representation of a cell formula.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    ValueNum(f64),
    Ref(Position),
    Negate(Expr),
    Add(Expr, Expr),
    Subtract(Expr, Expr),
    Multiply(Expr, Expr),
    Divide(Expr, Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError(String);

// Binding strength, used by Display to decide which children need
// parentheses. Atoms are never wrapped.
const PREC_ADD_SUB: u8 = 0;
const PREC_MUL_DIV: u8 = 1;
const PREC_UNARY: u8 = 2;
const PREC_ATOM: u8 = 3;

impl Expression {
    fn precedence(&self) -> u8 {
        match self {
            Expression::Add(_, _) | Expression::Subtract(_, _) => PREC_ADD_SUB,
            Expression::Multiply(_, _) | Expression::Divide(_, _) => PREC_MUL_DIV,
            Expression::Negate(_) => PREC_UNARY,
            Expression::ValueNum(_) | Expression::Ref(_) => PREC_ATOM,
        }
    }
}

fn write_operand(f: &mut Formatter<'_>, operand: &Expression, parens: bool) -> fmt::Result {
    if parens {
        write!(f, "({})", operand)
    } else {
        write!(f, "{}", operand)
    }
}

/// Canonical form: no whitespace, minimal parentheses, no unary plus.
/// Reparsing the output of `Display` yields an AST that prints identically.
impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expression::ValueNum(num) => write!(f, "{}", num),
            Expression::Ref(pos) => write!(f, "{}", pos),
            Expression::Negate(expr) => {
                write!(f, "-")?;
                write_operand(f, expr, expr.precedence() == PREC_ADD_SUB)
            }
            Expression::Add(lhs, rhs) => {
                write_operand(f, lhs, false)?;
                write!(f, "+")?;
                write_operand(f, rhs, false)
            }
            Expression::Subtract(lhs, rhs) => {
                write_operand(f, lhs, false)?;
                write!(f, "-")?;
                write_operand(f, rhs, rhs.precedence() == PREC_ADD_SUB)
            }
            Expression::Multiply(lhs, rhs) => {
                write_operand(f, lhs, lhs.precedence() == PREC_ADD_SUB)?;
                write!(f, "*")?;
                write_operand(f, rhs, rhs.precedence() == PREC_ADD_SUB)
            }
            Expression::Divide(lhs, rhs) => {
                write_operand(f, lhs, lhs.precedence() == PREC_ADD_SUB)?;
                write!(f, "/")?;
                write_operand(f, rhs, rhs.precedence() <= PREC_MUL_DIV)
            }
        }
    }
}

fn surround_whitespace<'a, O, F>(sep: F) -> impl Fn(&'a str) -> IResult<&'a str, O>
where
    F: Fn(&'a str) -> IResult<&'a str, O>,
{
    move |raw| {
        let (rem, _) = complete::multispace0(raw)?;
        let (rem, res) = sep(rem)?;
        let (rem, _) = complete::multispace0(rem)?;
        Ok((rem, res))
    }
}

fn parse_num_value(raw: &str) -> IResult<&str, Expression> {
    combinator::map(number::complete::double, Expression::ValueNum)(raw)
}

/// A cell reference: uppercase column letters, then 1-based row digits.
/// A column run too long to ever be in bounds is a syntax error; a
/// well-formed reference beyond the engine bounds parses to an invalid
/// Position and only surfaces as `#REF!` at evaluation time.
fn parse_cell_reference(raw: &str) -> IResult<&str, Expression> {
    let (rem, letters) = bytes::complete::take_while1(|c: char| c.is_ascii_uppercase())(raw)?;
    let (rem, digits) = complete::digit1(rem)?;

    if letters.len() > MAX_POSITION_LETTER_COUNT {
        return Err(nom::Err::Error((raw, ErrorKind::Verify)));
    }

    let row = digits.parse::<isize>().unwrap_or(isize::MAX);
    let pos = Position::new(row - 1, col_string_to_col(letters) - 1);

    Ok((rem, Expression::Ref(pos)))
}

fn parens(raw: &str) -> IResult<&str, Expression> {
    sequence::delimited(
        complete::char('('),
        surround_whitespace(expr_level_plus_minus),
        complete::char(')'),
    )(raw)
}

fn expr_level_val(raw: &str) -> IResult<&str, Expression> {
    branch::alt((parens, parse_cell_reference, parse_num_value))(raw)
}

fn expr_level_unary(raw: &str) -> IResult<&str, Expression> {
    let (rem, signs) = multi::many0(sequence::terminated(
        branch::alt((bytes::complete::tag("-"), bytes::complete::tag("+"))),
        complete::multispace0,
    ))(raw)?;
    let (rem, mut res) = expr_level_val(rem)?;

    for sign in signs.into_iter().rev() {
        if sign == "-" {
            res = Expression::Negate(Box::new(res));
        }
    }

    Ok((rem, res))
}

fn expr_level_multiply_divide(raw: &str) -> IResult<&str, Expression> {
    let (left_rem, left_res) = expr_level_unary(raw)?;
    let (right_rem, right_res) = multi::many0(sequence::tuple((
        surround_whitespace(branch::alt((
            bytes::complete::tag("*"),
            bytes::complete::tag("/"),
        ))),
        expr_level_unary,
    )))(left_rem)?;

    Ok((right_rem, fold_binary_ops(left_res, right_res)))
}

fn expr_level_plus_minus(raw: &str) -> IResult<&str, Expression> {
    let (left_rem, left_res) = expr_level_multiply_divide(raw)?;
    let (right_rem, right_res) = multi::many0(sequence::tuple((
        surround_whitespace(branch::alt((
            bytes::complete::tag("+"),
            bytes::complete::tag("-"),
        ))),
        expr_level_multiply_divide,
    )))(left_rem)?;

    Ok((right_rem, fold_binary_ops(left_res, right_res)))
}

fn fold_binary_ops(first: Expression, rest: Vec<(&str, Expression)>) -> Expression {
    rest.into_iter()
        .fold(first, |acc, (op, operand)| binary_op(op, acc, operand))
}

fn binary_op(op: &str, lhs: Expression, rhs: Expression) -> Expression {
    match op {
        "+" => Expression::Add(Box::new(lhs), Box::new(rhs)),
        "-" => Expression::Subtract(Box::new(lhs), Box::new(rhs)),
        "*" => Expression::Multiply(Box::new(lhs), Box::new(rhs)),
        "/" => Expression::Divide(Box::new(lhs), Box::new(rhs)),
        e => panic!("Unhandled operator type! {}", e),
    }
}

/// Parses an entire formula expression. The leading formula sign must
/// already be stripped by the caller.
pub fn parse_formula(raw: &str) -> Result<Expression, ParseError> {
    match combinator::all_consuming(surround_whitespace(expr_level_plus_minus))(raw) {
        Ok((_, expr)) => Ok(expr),
        Err(nom::Err::Incomplete(_)) => Err(ParseError("Incomplete input".to_string())),
        Err(e) => Err(ParseError(format!("Malformed formula: {:?}", e))),
    }
}
