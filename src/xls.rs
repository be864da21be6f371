//! Legacy `.xls` (BIFF) workbook reader backed by calamine.

use crate::error::Result;
use crate::model::{Cell, Row, Sheet, Workbook};
use calamine::{Data, Range, Reader, Xls};
use std::io::{Cursor, Read, Seek};
use std::path::Path;

/// Read a `.xls` workbook from disk.
pub fn read_xls_path(path: impl AsRef<Path>) -> Result<Workbook> {
    let data = std::fs::read(path.as_ref())?;
    read_xls_bytes(data)
}

/// Read a `.xls` workbook from memory.
pub fn read_xls_bytes(data: Vec<u8>) -> Result<Workbook> {
    read_xls(Cursor::new(data))
}

fn read_xls<RS: Read + Seek>(reader: RS) -> Result<Workbook> {
    let mut xls: Xls<RS> = Xls::new(reader)?;
    let mut workbook = Workbook::new();

    for name in xls.sheet_names() {
        let range = xls.worksheet_range(&name)?;
        let sheet = sheet_from_range(&name, &range);
        log::debug!("sheet '{}': {} rows", sheet.name, sheet.rows.len());
        workbook.add_sheet(sheet);
    }

    Ok(workbook)
}

/// Convert a calamine range into sheet rows.
///
/// calamine ranges start at the first used cell, which is also the origin of
/// the sheet grid.
fn sheet_from_range(name: &str, range: &Range<Data>) -> Sheet {
    let mut sheet = Sheet::new(name);

    for cells in range.rows() {
        let mut row: Row = cells.iter().map(convert_value).collect();
        row.trim_trailing();
        sheet.add_row(row);
    }

    sheet
}

fn convert_value(value: &Data) -> Cell {
    match value {
        Data::Empty => Cell::Empty,
        Data::Bool(v) => Cell::Bool(*v),
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Float(v) => Cell::Number(*v),
        Data::String(v) => Cell::String(v.clone()),
        Data::Error(e) => Cell::String(e.to_string()),
        Data::DateTime(v) => Cell::Number(v.as_f64()),
        Data::DateTimeIso(v) => Cell::String(v.clone()),
        Data::DurationIso(v) => Cell::String(v.clone()),
    }
}
