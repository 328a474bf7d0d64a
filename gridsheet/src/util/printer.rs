use crate::Sheet;

use gridsheet_formula::position::Position;
use prettytable::{Row, Table};

/// A utility to print the Sheet.
/// WARNING: Not intended to have a stable output. Use for debugging purposes
/// only; the stable outputs are `Sheet::print_values` and
/// `Sheet::print_texts`.
pub fn print_sheet(sheet: &Sheet) {
    let mut table = Table::new();
    let size = sheet.printable_size();

    for row in 0..size.rows {
        let mut cells = Vec::new();
        for col in 0..size.cols {
            let content = match sheet.cell(Position::new(row, col)) {
                Ok(Some(cell)) => {
                    let text = cell.text();
                    let value = cell.value(sheet);

                    if text.len() > 1 && text.starts_with(crate::FORMULA_SIGN) {
                        format!("{}  :  {}", value, text)
                    } else {
                        format!("{}", value)
                    }
                }
                _ => String::new(),
            };

            cells.push(prettytable::Cell::new(&content));
        }

        table.add_row(Row::new(cells));
    }

    table.printstd();
}
