//! Export of extracted records to a single-sheet `.xlsx` file.
//!
//! The export is a terminal format: it carries no section headers, so feeding
//! it back through the extractor yields nothing.

use crate::error::{Error, Result};
use crate::model::{Amount, OutputRecord};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::{Path, PathBuf};

/// File name used when the caller does not choose one.
pub const DEFAULT_FILE_NAME: &str = "processed_data.xlsx";

/// Name of the only sheet in the export.
pub const SHEET_NAME: &str = "Processed Data";

/// Result of an export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The file was written
    Written {
        /// Where the file was saved
        path: PathBuf,
        /// Number of records written (header row excluded)
        rows: usize,
    },
    /// There were no records, so no file was written
    NothingToExport,
}

/// Write records to `path`.
///
/// An empty record list writes nothing and returns
/// [`ExportOutcome::NothingToExport`].
pub fn write_records(records: &[OutputRecord], path: impl AsRef<Path>) -> Result<ExportOutcome> {
    let path = path.as_ref();
    if records.is_empty() {
        log::debug!("nothing to export, skipping write of {}", path.display());
        return Ok(ExportOutcome::NothingToExport);
    }

    let mut workbook = build_workbook(records)?;
    workbook.save(path)?;
    log::debug!("exported {} records to {}", records.len(), path.display());

    Ok(ExportOutcome::Written {
        path: path.to_path_buf(),
        rows: records.len(),
    })
}

/// Render records as `.xlsx` bytes, `None` when there is nothing to export.
pub fn to_buffer(records: &[OutputRecord]) -> Result<Option<Vec<u8>>> {
    if records.is_empty() {
        return Ok(None);
    }
    let mut workbook = build_workbook(records)?;
    Ok(Some(workbook.save_to_buffer()?))
}

fn build_workbook(records: &[OutputRecord]) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, name) in OutputRecord::COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header_format)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = u32::try_from(i + 1)
            .map_err(|_| Error::Export(format!("too many records to export: {}", records.len())))?;
        write_record(worksheet, row, record)?;
    }

    worksheet.autofit();
    Ok(workbook)
}

fn write_record(worksheet: &mut Worksheet, row: u32, record: &OutputRecord) -> Result<()> {
    write_text(worksheet, row, 0, &record.id)?;
    worksheet.write_number(row, 1, record.pack_id)?;
    match &record.amount {
        Some(Amount::Number(n)) => {
            worksheet.write_number(row, 2, *n)?;
        }
        Some(Amount::Text(s)) => write_text(worksheet, row, 2, s)?,
        Some(Amount::Bool(b)) => {
            worksheet.write_boolean(row, 2, *b)?;
        }
        None => {}
    }
    write_text(worksheet, row, 3, &record.status)?;
    Ok(())
}

/// Empty strings are left as blank cells.
fn write_text(worksheet: &mut Worksheet, row: u32, col: u16, text: &str) -> Result<()> {
    if !text.is_empty() {
        worksheet.write_string(row, col, text)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{process_workbook, ExtractOptions};
    use crate::model::Cell;
    use crate::xlsx::XlsxReader;

    fn sample_records() -> Vec<OutputRecord> {
        vec![
            OutputRecord {
                id: "R15060200".to_string(),
                pack_id: 20231005.2,
                amount: Some(Amount::Text("150".to_string())),
                status: "V".to_string(),
            },
            OutputRecord {
                id: "W110020020".to_string(),
                pack_id: 20230101.1,
                amount: Some(Amount::Number(6.0)),
                status: "SF".to_string(),
            },
            OutputRecord {
                id: "W1".to_string(),
                pack_id: 20230101.3,
                amount: None,
                status: String::new(),
            },
        ]
    }

    #[test]
    fn test_empty_export_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_FILE_NAME);

        let outcome = write_records(&[], &path).unwrap();
        assert_eq!(outcome, ExportOutcome::NothingToExport);
        assert!(!path.exists());
        assert!(to_buffer(&[]).unwrap().is_none());
    }

    #[test]
    fn test_export_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_FILE_NAME);

        let outcome = write_records(&sample_records(), &path).unwrap();
        assert_eq!(
            outcome,
            ExportOutcome::Written {
                path: path.clone(),
                rows: 3
            }
        );

        let workbook = XlsxReader::open(&path).unwrap().read().unwrap();
        assert_eq!(workbook.sheet_names(), vec![SHEET_NAME]);

        let rows = &workbook.sheets[0].rows;
        assert_eq!(rows.len(), 4);
        let header: Vec<String> = rows[0].iter().map(Cell::coerce_string).collect();
        assert_eq!(header, ["id", "packId", "amount", "status"]);

        assert_eq!(rows[1].get(0), Some(&Cell::text("R15060200")));
        assert_eq!(rows[1].get(1), Some(&Cell::Number(20231005.2)));
        assert_eq!(rows[1].get(2), Some(&Cell::text("150")));
        assert_eq!(rows[2].get(2), Some(&Cell::Number(6.0)));
        assert_eq!(rows[2].get(3), Some(&Cell::text("SF")));
        // missing amount and empty status stay blank
        assert_eq!(rows[3].len(), 2);
    }

    #[test]
    fn test_export_is_not_reextractable() {
        let bytes = to_buffer(&sample_records()).unwrap().unwrap();
        let workbook = XlsxReader::from_bytes(bytes).unwrap().read().unwrap();
        let records = process_workbook(&workbook, &ExtractOptions::default()).unwrap();
        assert!(records.is_empty());
    }
}
