//! Row and cell helpers shared by the section detector and record emitter.

use crate::model::{Cell, Row};
use regex::Regex;
use std::sync::LazyLock;

/// Header cells: one or more characters followed by `wood`.
static WOOD_TYPE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".+wood").expect("valid wood type pattern"));

/// Pack ids: exactly eight digits, a dot, one digit.
static PACK_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{8}\.[0-9]$").expect("valid pack id pattern"));

/// Width tokens such as `100*200`.
static WIDTH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+\*[0-9]+").expect("valid width pattern"));

/// Marker of the pack column in a dimensions row.
pub const PACK_MARKER: &str = "PACK";

/// First present cell strictly after `index`, or `None`.
pub fn find_next_present(row: &Row, index: usize) -> Option<&Cell> {
    row.iter().skip(index + 1).find(|c| c.is_present())
}

/// Column of the first cell equal to `value`, scanning from column 0.
///
/// This is a lookup by value, not by position: an equal cell earlier in the
/// row wins over the one that was actually found.
pub fn position_of(row: &Row, value: &Cell) -> Option<usize> {
    row.iter().position(|c| c == value)
}

/// Column of the first cell that is exactly the string `PACK`.
pub fn find_pack_column(row: &Row) -> Option<usize> {
    row.iter().position(|c| c.as_str() == Some(PACK_MARKER))
}

/// Whether a cell's text looks like a wood type header (`.+wood`, case-sensitive).
pub fn looks_like_wood_type(cell: &Cell) -> bool {
    cell.is_present() && WOOD_TYPE_PATTERN.is_match(&cell.coerce_string())
}

/// Whether a cell holds a pack id such as `20231005.2`.
pub fn is_pack_id(cell: &Cell) -> bool {
    cell.is_present() && PACK_ID_PATTERN.is_match(&cell.coerce_string())
}

/// Whether a cell holds a width token such as `100*200`.
pub fn is_width(cell: &Cell) -> bool {
    cell.is_present() && WIDTH_PATTERN.is_match(&cell.coerce_string())
}

/// Normalize a raw status label into its short code.
///
/// Checks run in order and the first hit wins, so a label containing both
/// `S/F` and `IV` is `SF`. Anything unrecognized passes through unchanged.
pub fn normalize_status(raw: &str) -> &str {
    if raw.contains("S/F") {
        "SF"
    } else if raw.contains("IV") {
        "IV"
    } else if raw == "V" {
        "V"
    } else {
        raw
    }
}

/// Remove the `.` and `*` characters from an id.
pub fn strip_id_separators(id: &str) -> String {
    id.chars().filter(|c| !matches!(c, '.' | '*')).collect()
}
