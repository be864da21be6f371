//! XLSX (Office Open XML) workbook reader.
//!
//! Decodes every sheet of a workbook into positional rows, keeping blank
//! cells in place so that column positions match the sheet's used range.
//!
//! # Example
//!
//! ```no_run
//! use panelstock::xlsx::XlsxReader;
//!
//! let reader = XlsxReader::open("stock.xlsx")?;
//! let workbook = reader.read()?;
//!
//! for sheet in &workbook.sheets {
//!     println!("Sheet: {} ({} rows)", sheet.name, sheet.rows.len());
//! }
//! # Ok::<(), panelstock::Error>(())
//! ```

mod parser;
mod shared_strings;

pub use parser::XlsxReader;
