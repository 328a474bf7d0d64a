//! `gridsheet` is a minimal spreadsheet engine.
//!
//! A [`Sheet`] is a sparse grid of cells. Each cell is empty, a literal
//! text, or a formula over other cells. The Sheet keeps formula results
//! consistent across edits: it tracks the dependency graph between cells,
//! rejects edits that would close a reference cycle, and invalidates cached
//! formula values whenever something they depend on changes.
//!
//! ## Example
//! ```
//! use gridsheet::position::Position;
//! use gridsheet::{Sheet, Value};
//!
//! let mut sheet = Sheet::new();
//!
//! sheet.set_cell(Position::new(0, 0), "2").unwrap();
//! sheet.set_cell(Position::new(1, 0), "=A1*3").unwrap();
//!
//! assert_eq!(
//!     sheet.cell_value(Position::new(1, 0)).unwrap(),
//!     Some(Value::Number(6.0))
//! );
//!
//! // Editing a referenced cell is reflected in its dependents.
//! sheet.set_cell(Position::new(0, 0), "10").unwrap();
//! assert_eq!(
//!     sheet.cell_value(Position::new(1, 0)).unwrap(),
//!     Some(Value::Number(30.0))
//! );
//! ```

mod cell;
mod sheet;
pub mod util;

pub use cell::{Cell, Value};
pub use gridsheet_formula::*;
pub use sheet::{Sheet, Size};

use thiserror::Error;

/// Marks a cell's text as a formula expression.
pub const FORMULA_SIGN: char = '=';

/// Suppresses the formula interpretation of a cell's text. The escape sign
/// is kept in the cell's text but stripped from its displayed value.
pub const ESCAPE_SIGN: char = '\'';

/// The errors that Sheet edits and lookups can fail with. These abort the
/// operation and leave the grid unchanged; errors that arise *during* formula
/// evaluation are values instead (see [`Value::EvalError`]).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorKind {
    #[error("Invalid Position")]
    InvalidPosition,

    #[error("Parse Error")]
    ParseError,

    #[error("Circular Dependency")]
    CircularDependency,
}
