//! # panelstock
//!
//! Wood-panel stock record extraction from irregular spreadsheet workbooks.
//!
//! Stock lists arrive as `.xls`/`.xlsx` workbooks laid out for people, not
//! machines: sections headed by a wood type, a row of dimension labels with a
//! `PACK` column, a width line, then one row per pack. This library walks
//! those sheets, recovers one record per pack, and re-exports the records as a
//! flat single-sheet workbook.
//!
//! ## Quick Start
//!
//! ```no_run
//! use panelstock::{export, extract_file, ExtractOptions};
//!
//! let records = extract_file("stock.xlsx", &ExtractOptions::default())?;
//! println!("Records: {}", records.len());
//!
//! export::write_records(&records, export::DEFAULT_FILE_NAME)?;
//! # Ok::<(), panelstock::Error>(())
//! ```
//!
//! ## Step by step
//!
//! ```no_run
//! use panelstock::extract::{process_workbook, ExtractOptions};
//! use panelstock::render::{to_table, TableStyle};
//!
//! let workbook = panelstock::read_workbook("stock.xls")?;
//! let records = process_workbook(&workbook, &ExtractOptions::default())?;
//! println!("{}", to_table(&records, TableStyle::Ascii));
//! # Ok::<(), panelstock::Error>(())
//! ```
//!
//! ## Features
//!
//! - `xlsx` (default): Office Open XML workbook support
//! - `xls` (default): legacy BIFF workbook support via calamine

pub mod container;
pub mod detect;
pub mod error;
pub mod export;
pub mod extract;
pub mod model;
pub mod render;

#[cfg(feature = "xlsx")]
pub mod xlsx;

#[cfg(feature = "xls")]
pub mod xls;

// Re-exports
pub use detect::{detect_format_from_bytes, detect_format_from_path, FormatType};
pub use error::{Error, Result};
pub use export::ExportOutcome;
pub use extract::{process_workbook, ExtractOptions, ParseContext, WoodTypeMatch};
pub use model::{Amount, Cell, OutputRecord, Row, Sheet, Workbook};

use std::path::Path;

/// Read a workbook file into a positional grid.
///
/// The format is detected from the file's leading bytes, falling back to its
/// extension.
///
/// # Example
///
/// ```no_run
/// let workbook = panelstock::read_workbook("stock.xlsx")?;
/// println!("Sheets: {:?}", workbook.sheet_names());
/// # Ok::<(), panelstock::Error>(())
/// ```
pub fn read_workbook(path: impl AsRef<Path>) -> Result<Workbook> {
    let path = path.as_ref();
    let format = detect_format_from_path(path)?;
    log::debug!("reading {} as {}", path.display(), format);

    match format {
        #[cfg(feature = "xlsx")]
        FormatType::Xlsx => xlsx::XlsxReader::open(path)?.read(),
        #[cfg(feature = "xls")]
        FormatType::Xls => xls::read_xls_path(path),
        #[cfg(not(all(feature = "xlsx", feature = "xls")))]
        _ => Err(Error::UnsupportedFormat(format.to_string())),
    }
}

/// Read a workbook from bytes.
///
/// # Example
///
/// ```no_run
/// let data = std::fs::read("stock.xlsx")?;
/// let workbook = panelstock::read_workbook_bytes(&data)?;
/// # Ok::<(), panelstock::Error>(())
/// ```
pub fn read_workbook_bytes(data: &[u8]) -> Result<Workbook> {
    let format = detect_format_from_bytes(data)?;

    match format {
        #[cfg(feature = "xlsx")]
        FormatType::Xlsx => xlsx::XlsxReader::from_bytes(data.to_vec())?.read(),
        #[cfg(feature = "xls")]
        FormatType::Xls => xls::read_xls_bytes(data.to_vec()),
        #[cfg(not(all(feature = "xlsx", feature = "xls")))]
        _ => Err(Error::UnsupportedFormat(format.to_string())),
    }
}

/// Read a workbook file and extract its records.
///
/// # Example
///
/// ```no_run
/// use panelstock::{extract_file, ExtractOptions};
///
/// let options = ExtractOptions::new().with_strict_sections(true);
/// let records = extract_file("stock.xlsx", &options)?;
/// # Ok::<(), panelstock::Error>(())
/// ```
pub fn extract_file(path: impl AsRef<Path>, options: &ExtractOptions) -> Result<Vec<OutputRecord>> {
    let workbook = read_workbook(path)?;
    process_workbook(&workbook, options)
}

/// Extract records from workbook bytes.
pub fn extract_bytes(data: &[u8], options: &ExtractOptions) -> Result<Vec<OutputRecord>> {
    let workbook = read_workbook_bytes(data)?;
    process_workbook(&workbook, options)
}
