//! Output record structures.

use super::Cell;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The amount column of a record, kept in the type it had in the source cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    /// Numeric amount
    Number(f64),
    /// Text amount (the source cell held a string)
    Text(String),
    /// Boolean amount
    Bool(bool),
}

impl Amount {
    /// Build an amount from a cell; blank cells have no amount.
    pub fn from_cell(cell: &Cell) -> Option<Self> {
        match cell {
            Cell::Empty => None,
            Cell::String(s) => Some(Amount::Text(s.clone())),
            Cell::Number(n) => Some(Amount::Number(*n)),
            Cell::Bool(b) => Some(Amount::Bool(*b)),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Number(n) => write!(f, "{}", n),
            Amount::Text(s) => f.write_str(s),
            Amount::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// One extracted stock item.
///
/// Field order matches the export column order: `id, packId, amount, status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// Synthetic id: prefix, width and dimension label with `.` and `*` removed
    pub id: String,

    /// Pack number read from the pack column
    #[serde(rename = "packId")]
    pub pack_id: f64,

    /// First present cell after the pack column
    pub amount: Option<Amount>,

    /// Normalized status code
    pub status: String,
}

impl OutputRecord {
    /// Column headers in export order.
    pub const COLUMNS: [&'static str; 4] = ["id", "packId", "amount", "status"];

    /// Amount as display text, empty when missing.
    pub fn amount_text(&self) -> String {
        self.amount.as_ref().map(|a| a.to_string()).unwrap_or_default()
    }
}
