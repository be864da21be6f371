//! Workbook grid structures.
//!
//! A [`Workbook`] is the decoded input: ordered sheets of positional rows.
//! Positions count from the top-left corner of the sheet's used range, so a
//! table written from `B3` has that cell at row 0, column 0. Blank cells
//! inside the range are kept as [`Cell::Empty`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Blank or missing cell
    #[default]
    Empty,
    /// Text value
    String(String),
    /// Numeric value (dates arrive as serial numbers)
    Number(f64),
    /// Boolean value
    Bool(bool),
}

impl Cell {
    /// Create a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Cell::String(value.into())
    }

    /// Whether the cell counts as present.
    ///
    /// Blank cells, empty strings, `0`, `NaN` and `false` are all absent.
    pub fn is_present(&self) -> bool {
        match self {
            Cell::Empty => false,
            Cell::String(s) => !s.is_empty(),
            Cell::Number(n) => *n != 0.0 && !n.is_nan(),
            Cell::Bool(b) => *b,
        }
    }

    /// Check if this cell is blank.
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Coerce the cell to its string form.
    ///
    /// Integral numbers print without a fraction (`150.0` becomes `"150"`).
    pub fn coerce_string(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::String(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Bool(b) => b.to_string(),
        }
    }

    /// Coerce the cell to a number, if it has a numeric reading.
    pub fn coerce_number(&self) -> Option<f64> {
        match self {
            Cell::Empty => None,
            Cell::Number(n) => Some(*n),
            Cell::String(s) => s.trim().parse().ok(),
            Cell::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        }
    }

    /// Borrow the text if this is a string cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.coerce_string())
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::String(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::String(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

/// A positional row of cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    /// Cells in column order
    pub cells: Vec<Cell>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a row from cells.
    pub fn from_cells(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Get the cell at a column, if the row is that wide.
    pub fn get(&self, col: usize) -> Option<&Cell> {
        self.cells.get(col)
    }

    /// Set the cell at a column, padding with blanks as needed.
    pub fn set(&mut self, col: usize, cell: Cell) {
        if col >= self.cells.len() {
            self.cells.resize(col + 1, Cell::Empty);
        }
        self.cells[col] = cell;
    }

    /// Number of columns up to the last stored cell.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the row has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over the cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Drop trailing blank cells.
    pub fn trim_trailing(&mut self) {
        while matches!(self.cells.last(), Some(Cell::Empty)) {
            self.cells.pop();
        }
    }
}

impl<C: Into<Cell>> FromIterator<C> for Row {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// A named worksheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet name as declared in the workbook
    pub name: String,
    /// Rows in worksheet order
    pub rows: Vec<Row>,
}

impl Sheet {
    /// Create an empty sheet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Add a row to the end of the sheet.
    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Set a row at a worksheet index, padding with empty rows as needed.
    pub fn set_row(&mut self, index: usize, row: Row) {
        if index >= self.rows.len() {
            self.rows.resize_with(index + 1, Row::new);
        }
        self.rows[index] = row;
    }

    /// Count of cells that hold a value.
    pub fn cell_count(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.iter().filter(|c| !c.is_empty()).count())
            .sum()
    }

    /// First row and first column holding a value, `None` for a blank sheet.
    pub fn used_origin(&self) -> Option<(usize, usize)> {
        let row = self.rows.iter().position(|r| r.iter().any(|c| !c.is_empty()))?;
        let col = self
            .rows
            .iter()
            .filter_map(|r| r.iter().position(|c| !c.is_empty()))
            .min()?;
        Some((row, col))
    }

    /// Drop the first `rows` rows and the first `cols` cells of every row.
    pub fn shift_origin(&mut self, rows: usize, cols: usize) {
        self.rows.drain(..rows.min(self.rows.len()));
        for row in &mut self.rows {
            row.cells.drain(..cols.min(row.cells.len()));
        }
    }
}

/// A decoded workbook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    /// Sheets in declaration order
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Create an empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sheet.
    pub fn add_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    /// Get sheet names in declaration order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Total number of rows across all sheets.
    pub fn row_count(&self) -> usize {
        self.sheets.iter().map(|s| s.rows.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_follows_falsy_values() {
        assert!(!Cell::Empty.is_present());
        assert!(!Cell::text("").is_present());
        assert!(!Cell::Number(0.0).is_present());
        assert!(!Cell::Number(f64::NAN).is_present());
        assert!(!Cell::Bool(false).is_present());

        assert!(Cell::text("0").is_present());
        assert!(Cell::text(" ").is_present());
        assert!(Cell::Number(-1.5).is_present());
        assert!(Cell::Bool(true).is_present());
    }

    #[test]
    fn test_coerce_string() {
        assert_eq!(Cell::Number(150.0).coerce_string(), "150");
        assert_eq!(Cell::Number(20231005.2).coerce_string(), "20231005.2");
        assert_eq!(Cell::Number(-2.5).coerce_string(), "-2.5");
        assert_eq!(Cell::text("50*60").coerce_string(), "50*60");
        assert_eq!(Cell::Bool(true).coerce_string(), "true");
        assert_eq!(Cell::Empty.coerce_string(), "");
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(Cell::text("20231005.2").coerce_number(), Some(20231005.2));
        assert_eq!(Cell::Number(7.0).coerce_number(), Some(7.0));
        assert_eq!(Cell::text("abc").coerce_number(), None);
        assert_eq!(Cell::Empty.coerce_number(), None);
    }

    #[test]
    fn test_row_set_pads_with_blanks() {
        let mut row = Row::new();
        row.set(3, Cell::text("x"));
        assert_eq!(row.len(), 4);
        assert!(row.get(0).unwrap().is_empty());
        assert_eq!(row.get(3), Some(&Cell::text("x")));
    }

    #[test]
    fn test_row_trim_trailing() {
        let mut row: Row = vec![Cell::text("a"), Cell::Empty, Cell::Empty]
            .into_iter()
            .collect();
        row.trim_trailing();
        assert_eq!(row.len(), 1);
    }

    #[test]
    fn test_sheet_set_row_pads() {
        let mut sheet = Sheet::new("Stock");
        sheet.set_row(2, ["a"].into_iter().collect());
        assert_eq!(sheet.rows.len(), 3);
        assert!(sheet.rows[0].is_empty());
        assert_eq!(sheet.cell_count(), 1);
    }

    #[test]
    fn test_used_origin_and_shift() {
        let mut sheet = Sheet::new("Stock");
        assert_eq!(sheet.used_origin(), None);

        sheet.set_row(1, Row::from_cells(vec![Cell::Empty, Cell::Empty, Cell::text("redwood")]));
        sheet.set_row(2, Row::from_cells(vec![Cell::Empty, Cell::text("PACK")]));
        assert_eq!(sheet.used_origin(), Some((1, 1)));

        sheet.shift_origin(1, 1);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0].cells, vec![Cell::Empty, Cell::text("redwood")]);
        assert_eq!(sheet.rows[1].cells, vec![Cell::text("PACK")]);
    }
}
