//! Workbook walker: drives section detection, record emission and width
//! updates over every row of every sheet.

use super::context::{detect_section, update_width, ParseContext};
use super::options::ExtractOptions;
use super::record::emit_record;
use crate::error::{Error, Result};
use crate::model::{OutputRecord, Row, Workbook};

/// What a single row turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// The row started a new section
    Header,
    /// The row produced a record
    Record(OutputRecord),
    /// Neither header nor data
    Skipped,
}

/// Process one row and return the context for the next row.
///
/// A header replaces the context and ends processing of that row, so the
/// width update from the following row is skipped. Any other row gets a data
/// row check under the current context, then a width update.
pub fn process_row(
    context: ParseContext,
    rows: &[Row],
    index: usize,
    options: &ExtractOptions,
) -> (ParseContext, RowOutcome) {
    if let Some(section) = detect_section(rows, index, options) {
        return (section, RowOutcome::Header);
    }

    let outcome = rows
        .get(index)
        .and_then(|row| emit_record(row, &context, options))
        .map_or(RowOutcome::Skipped, RowOutcome::Record);

    (update_width(rows, index, context), outcome)
}

/// Extract every record from a workbook.
///
/// Sheets are walked in declaration order. The context is not reset between
/// sheets: a sheet without its own header keeps using the last section of the
/// previous sheet.
pub fn process_workbook(workbook: &Workbook, options: &ExtractOptions) -> Result<Vec<OutputRecord>> {
    let mut records = Vec::new();
    let mut context = ParseContext::new();
    let mut sections = 0usize;

    for sheet in &workbook.sheets {
        for index in 0..sheet.rows.len() {
            let (next, outcome) = process_row(context, &sheet.rows, index, options);
            context = next;

            match outcome {
                RowOutcome::Header => {
                    sections += 1;
                    log::debug!(
                        "sheet '{}' row {}: section {:?} width={:?} status={:?} pack column={:?}",
                        sheet.name,
                        index,
                        context.wood_type.as_deref().unwrap_or_default(),
                        context.width.as_deref().unwrap_or_default(),
                        context.status.as_deref().unwrap_or_default(),
                        context.pack_index,
                    );
                    if context.pack_index.is_none() {
                        if options.strict_sections {
                            return Err(Error::MalformedSection {
                                sheet: sheet.name.clone(),
                                row: index,
                                reason: "dimensions row has no PACK column".to_string(),
                            });
                        }
                        log::debug!(
                            "sheet '{}' row {}: no PACK column, rows of this section are skipped",
                            sheet.name,
                            index
                        );
                    }
                }
                RowOutcome::Record(record) => {
                    log::trace!("sheet '{}' row {}: {:?}", sheet.name, index, record);
                    records.push(record);
                }
                RowOutcome::Skipped => {}
            }
        }
    }

    if sections == 0 {
        if options.strict_sections {
            return Err(Error::NoSections);
        }
        log::debug!("no section header found in {} sheets", workbook.sheets.len());
    }

    log::debug!("extracted {} records from {} sections", records.len(), sections);
    Ok(records)
}
