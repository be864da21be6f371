//! Data model for decoded workbooks and extracted records.
//!
//! Readers turn `.xlsx`/`.xls` files into a [`Workbook`] of positional cells;
//! the extractor turns a workbook into a flat list of [`OutputRecord`]s.

mod record;
mod workbook;

pub use record::*;
pub use workbook::*;
