//! Data-row recognition and record construction.

use super::cells::{find_next_present, is_pack_id, normalize_status, position_of, strip_id_separators};
use super::context::ParseContext;
use super::options::ExtractOptions;
use crate::model::{Amount, OutputRecord, Row};

/// Build a record if `row` is a data row under `context`.
///
/// A data row has a pack id (`20231005.2`) in the context's pack column. The
/// amount is the next present cell after it, and the id is the wood type
/// prefix, the width and the dimension label above the amount, with `.` and
/// `*` removed.
pub fn emit_record(row: &Row, context: &ParseContext, options: &ExtractOptions) -> Option<OutputRecord> {
    let pack_index = context.pack_index?;
    let pack_cell = row.get(pack_index)?;
    if !is_pack_id(pack_cell) {
        return None;
    }
    let pack_id = pack_cell.coerce_number()?;

    let amount_cell = find_next_present(row, pack_index);
    // Looked up by value, so an equal cell further left decides the column
    let amount_index = amount_cell.and_then(|cell| position_of(row, cell));

    let prefix = context
        .wood_type
        .as_deref()
        .map(|t| options.id_prefix(t))
        .unwrap_or("");
    let width = context.width.as_deref().unwrap_or("");
    let label = context.dimension_label(amount_index);
    let id = strip_id_separators(&format!("{}{}{}", prefix, width, label));

    let status = normalize_status(context.status.as_deref().unwrap_or("")).to_string();

    Some(OutputRecord {
        id,
        pack_id,
        amount: amount_cell.and_then(Amount::from_cell),
        status,
    })
}
