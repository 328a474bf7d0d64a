use crate::sheet::Sheet;
use crate::{ESCAPE_SIGN, FORMULA_SIGN};

use gridsheet_formula::evaluator::EvalError;
use gridsheet_formula::formula::Formula;
use gridsheet_formula::position::Position;
use gridsheet_formula::raw_parser::ParseError;

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::fmt::{Display, Formatter};

/// The value a cell presents for display.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Blank,
    /// Always finite. Non-finite results are turned into
    /// `EvalError::Arithmetic` before they can become values.
    Number(f64),
    String(String),
    EvalError(EvalError),
}

impl Default for Value {
    fn default() -> Self {
        Value::Blank
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Blank => Ok(()),
            Value::Number(num) => write!(f, "{}", num),
            Value::String(text) => write!(f, "{}", text),
            Value::EvalError(err) => write!(f, "{}", err),
        }
    }
}

/// The three content variants a cell can hold.
///
/// Only the formula variant has interesting cache behavior: reading its
/// value populates the memo, and edits to anything it transitively depends
/// on clear it. The cache is the one interior-mutability site in the engine.
#[derive(Debug, PartialEq)]
pub(crate) enum CellContent {
    Empty,
    Text(String),
    Formula {
        formula: Formula,
        cache: RefCell<Option<Value>>,
    },
}

impl CellContent {
    /// Classifies raw text the way the Sheet stores it: empty text is an
    /// empty cell, text of more than one character behind the formula sign
    /// is a formula, everything else is literal text. A lone formula sign
    /// is literal text.
    pub(crate) fn from_text(text: &str) -> Result<CellContent, ParseError> {
        if text.is_empty() {
            Ok(CellContent::Empty)
        } else if text.len() > 1 && text.starts_with(FORMULA_SIGN) {
            let formula = Formula::parse(&text[FORMULA_SIGN.len_utf8()..])?;

            Ok(CellContent::Formula {
                formula,
                cache: RefCell::new(None),
            })
        } else {
            Ok(CellContent::Text(text.to_string()))
        }
    }

    pub(crate) fn referenced_cells(&self) -> Vec<Position> {
        match self {
            CellContent::Formula { formula, .. } => formula.referenced_cells(),
            _ => Vec::new(),
        }
    }
}

/// A single cell in a Sheet, together with its dependency bookkeeping.
///
/// The edge sets hold positions, not cell handles; every lookup goes through
/// the Sheet, which is the sole owner and mutator of cells.
#[derive(Debug, PartialEq)]
pub struct Cell {
    content: CellContent,
    /// Positions this cell's formula references (the cells it depends on).
    precedents: HashSet<Position>,
    /// Positions whose formulas reference this cell.
    dependents: HashSet<Position>,
}

impl Cell {
    pub(crate) fn new() -> Cell {
        Cell {
            content: CellContent::Empty,
            precedents: HashSet::new(),
            dependents: HashSet::new(),
        }
    }

    /// The cell's display value. Formula cells memoize the result of their
    /// first evaluation and return the memo until an edit invalidates it.
    pub fn value(&self, sheet: &Sheet) -> Value {
        match &self.content {
            CellContent::Empty => Value::Blank,
            CellContent::Text(text) => {
                let stripped = match text.strip_prefix(ESCAPE_SIGN) {
                    Some(rest) => rest,
                    None => text.as_str(),
                };

                Value::String(stripped.to_string())
            }
            CellContent::Formula { formula, cache } => {
                if let Some(value) = cache.borrow().as_ref() {
                    return value.clone();
                }

                let computed = match formula.evaluate(&|pos| sheet.resolve_number(pos)) {
                    Ok(num) => Value::Number(num),
                    Err(err) => Value::EvalError(err),
                };

                *cache.borrow_mut() = Some(computed.clone());

                computed
            }
        }
    }

    /// The cell's textual representation: the raw text for text cells
    /// (escape sign included), the formula sign plus the canonical
    /// expression for formula cells.
    pub fn text(&self) -> String {
        match &self.content {
            CellContent::Empty => String::new(),
            CellContent::Text(text) => text.clone(),
            CellContent::Formula { formula, .. } => {
                format!("{}{}", FORMULA_SIGN, formula.expression())
            }
        }
    }

    /// The valid positions this cell's formula references directly, in first
    /// occurrence order, deduplicated. Empty for non-formula cells.
    pub fn referenced_cells(&self) -> Vec<Position> {
        self.content.referenced_cells()
    }

    /// Whether any other cell's formula references this one. Referenced
    /// cells are kept alive by the Sheet even when cleared.
    pub fn is_referenced(&self) -> bool {
        !self.dependents.is_empty()
    }

    /// The positions this cell's formula depends on.
    pub fn precedents(&self) -> impl Iterator<Item = Position> + '_ {
        self.precedents.iter().copied()
    }

    /// The positions whose formulas depend on this cell.
    pub fn dependents(&self) -> impl Iterator<Item = Position> + '_ {
        self.dependents.iter().copied()
    }

    pub(crate) fn replace_content(&mut self, content: CellContent) {
        self.content = content;
    }

    pub(crate) fn is_cache_valid(&self) -> bool {
        match &self.content {
            CellContent::Formula { cache, .. } => cache.borrow().is_some(),
            _ => true,
        }
    }

    pub(crate) fn invalidate_cache(&self) {
        if let CellContent::Formula { cache, .. } = &self.content {
            cache.borrow_mut().take();
        }
    }

    pub(crate) fn take_precedents(&mut self) -> HashSet<Position> {
        std::mem::replace(&mut self.precedents, HashSet::new())
    }

    pub(crate) fn add_precedent(&mut self, pos: Position) {
        self.precedents.insert(pos);
    }

    pub(crate) fn add_dependent(&mut self, pos: Position) {
        self.dependents.insert(pos);
    }

    pub(crate) fn remove_dependent(&mut self, pos: Position) {
        self.dependents.remove(&pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_classification() {
        assert!(matches!(
            CellContent::from_text("").unwrap(),
            CellContent::Empty
        ));
        assert!(matches!(
            CellContent::from_text("hello").unwrap(),
            CellContent::Text(_)
        ));
        assert!(matches!(
            CellContent::from_text("=A1+1").unwrap(),
            CellContent::Formula { .. }
        ));

        // A lone formula sign is text, not an empty formula.
        assert!(matches!(
            CellContent::from_text("=").unwrap(),
            CellContent::Text(_)
        ));
        // Escaped text stays text no matter what follows the escape sign.
        assert!(matches!(
            CellContent::from_text("'=A1+1").unwrap(),
            CellContent::Text(_)
        ));

        assert!(CellContent::from_text("=1+*2").is_err());
        assert!(CellContent::from_text("= ").is_err());
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Blank.to_string(), "");
        assert_eq!(Value::Number(8.0).to_string(), "8");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::String("hi".to_string()).to_string(), "hi");
        assert_eq!(Value::EvalError(EvalError::Arithmetic).to_string(), "#ARITHM!");
    }
}
