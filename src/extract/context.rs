//! Section context tracking.
//!
//! A section starts at a header row naming a wood type. The row below it is the
//! dimensions row (column labels plus the `PACK` marker) and the first cell of
//! the row after that is the section width:
//!
//! ```text
//! row i     |         | redwood | V       |
//! row i+1   | PACK    | 100     | 200     |
//! row i+2   | 50*60   |         |         |
//! row i+3   | 20231005.2 |      | 150     |   <- data row
//! ```

use super::cells::{find_next_present, find_pack_column, is_width, looks_like_wood_type};
use super::options::{ExtractOptions, WoodTypeMatch};
use crate::model::{Cell, Row};

/// Section state carried from row to row.
///
/// `dimensions` and `pack_index` are always replaced together by a header;
/// `width` alone may change mid-section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseContext {
    /// Wood type label from the header cell
    pub wood_type: Option<String>,
    /// Width token, free-form (`50*60`)
    pub width: Option<String>,
    /// Raw status label from the header row
    pub status: Option<String>,
    /// The row below the header, indexed by column
    pub dimensions: Row,
    /// Column of `PACK` in `dimensions`
    pub pack_index: Option<usize>,
}

impl ParseContext {
    /// Create an empty context; nothing matches until a header is seen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Dimension label of a column, `""` when the column has none.
    pub fn dimension_label(&self, col: Option<usize>) -> String {
        col.and_then(|c| self.dimensions.get(c))
            .map(Cell::coerce_string)
            .unwrap_or_default()
    }

    /// Apply a width update from the row after the current one.
    ///
    /// The width is replaced only when that row's first cell holds a width
    /// token; otherwise the context is returned unchanged.
    pub fn with_width_update(self, next_row: Option<&Row>) -> Self {
        match next_row.and_then(|r| r.get(0)).filter(|c| is_width(c)) {
            Some(cell) => Self {
                width: Some(cell.coerce_string()),
                ..self
            },
            None => self,
        }
    }
}

/// Width update step for row `index`: looks at the row after it.
pub fn update_width(rows: &[Row], index: usize, context: ParseContext) -> ParseContext {
    context.with_width_update(rows.get(index + 1))
}

/// Column of the first header cell in a row, if the row is a section header.
pub fn find_wood_type_column(row: &Row, options: &ExtractOptions) -> Option<usize> {
    row.iter().position(|cell| match options.wood_type_match {
        WoodTypeMatch::Loose => looks_like_wood_type(cell),
        WoodTypeMatch::Enumerated => cell
            .as_str()
            .is_some_and(|label| options.is_known_wood_type(label)),
    })
}

/// Build a fresh context if `rows[index]` is a section header.
///
/// Looks at the header row itself and the two rows below it; rows past the end
/// of the sheet read as empty.
pub fn detect_section(rows: &[Row], index: usize, options: &ExtractOptions) -> Option<ParseContext> {
    let row = rows.get(index)?;
    let col = find_wood_type_column(row, options)?;
    let header = row.get(col)?;

    let dimensions = rows.get(index + 1).cloned().unwrap_or_default();
    let width = rows
        .get(index + 2)
        .and_then(|r| r.get(0))
        .filter(|c| c.is_present())
        .map(Cell::coerce_string)
        .unwrap_or_default();
    let status = find_next_present(row, col).map(Cell::coerce_string);
    let pack_index = find_pack_column(&dimensions);

    Some(ParseContext {
        wood_type: Some(header.coerce_string()),
        width: Some(width),
        status,
        dimensions,
        pack_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells
            .iter()
            .map(|s| if s.is_empty() { Cell::Empty } else { Cell::text(*s) })
            .collect()
    }

    fn sample_sheet() -> Vec<Row> {
        vec![
            row(&["", "redwood", "V"]),
            row(&["PACK", "100", "200"]),
            row(&["50*60"]),
            row(&["20231005.2", "", "150"]),
        ]
    }

    #[test]
    fn test_detect_section_fields() {
        let rows = sample_sheet();
        let ctx = detect_section(&rows, 0, &ExtractOptions::default()).unwrap();

        assert_eq!(ctx.wood_type.as_deref(), Some("redwood"));
        assert_eq!(ctx.dimensions, rows[1]);
        assert_eq!(ctx.width.as_deref(), Some("50*60"));
        assert_eq!(ctx.status.as_deref(), Some("V"));
        assert_eq!(ctx.pack_index, Some(0));
    }

    #[test]
    fn test_non_header_row() {
        let rows = sample_sheet();
        assert!(detect_section(&rows, 1, &ExtractOptions::default()).is_none());
        assert!(detect_section(&rows, 3, &ExtractOptions::default()).is_none());
        assert!(detect_section(&rows, 10, &ExtractOptions::default()).is_none());
    }

    #[test]
    fn test_header_at_sheet_end() {
        let rows = vec![row(&["whitewood", "", "S/F"])];
        let ctx = detect_section(&rows, 0, &ExtractOptions::default()).unwrap();

        assert_eq!(ctx.wood_type.as_deref(), Some("whitewood"));
        assert!(ctx.dimensions.is_empty());
        assert_eq!(ctx.width.as_deref(), Some(""));
        assert_eq!(ctx.status.as_deref(), Some("S/F"));
        assert_eq!(ctx.pack_index, None);
    }

    #[test]
    fn test_status_missing() {
        let rows = vec![row(&["redwood"]), row(&["PACK"])];
        let ctx = detect_section(&rows, 0, &ExtractOptions::default()).unwrap();
        assert_eq!(ctx.status, None);
    }

    #[test]
    fn test_loose_match_accepts_unknown_wood() {
        let rows = vec![row(&["driftwood", "IV"]), row(&["PACK"])];
        let ctx = detect_section(&rows, 0, &ExtractOptions::default()).unwrap();
        assert_eq!(ctx.wood_type.as_deref(), Some("driftwood"));
    }

    #[test]
    fn test_enumerated_match_rejects_unknown_wood() {
        let options = ExtractOptions::new().with_wood_type_match(WoodTypeMatch::Enumerated);
        let rows = vec![row(&["driftwood", "IV"]), row(&["PACK"])];
        assert!(detect_section(&rows, 0, &options).is_none());

        let rows = vec![row(&["Redwood ", "IV"]), row(&["PACK"])];
        assert!(detect_section(&rows, 0, &options).is_some());
    }

    #[test]
    fn test_numeric_width_is_coerced() {
        let rows = vec![
            row(&["redwood"]),
            row(&["PACK"]),
            Row::from_cells(vec![Cell::Number(120.0)]),
        ];
        let ctx = detect_section(&rows, 0, &ExtractOptions::default()).unwrap();
        assert_eq!(ctx.width.as_deref(), Some("120"));
    }

    #[test]
    fn test_width_update() {
        let ctx = ParseContext {
            width: Some("50*60".to_string()),
            ..Default::default()
        };

        let unchanged = ctx.clone().with_width_update(Some(&row(&["note"])));
        assert_eq!(unchanged, ctx);

        let unchanged = ctx.clone().with_width_update(None);
        assert_eq!(unchanged, ctx);

        let updated = ctx.with_width_update(Some(&row(&["100*200", "x"])));
        assert_eq!(updated.width.as_deref(), Some("100*200"));
    }

    #[test]
    fn test_dimension_label() {
        let ctx = ParseContext {
            dimensions: Row::from_cells(vec![Cell::text("PACK"), Cell::Empty, Cell::Number(2.5)]),
            pack_index: Some(0),
            ..Default::default()
        };
        assert_eq!(ctx.dimension_label(Some(2)), "2.5");
        assert_eq!(ctx.dimension_label(Some(1)), "");
        assert_eq!(ctx.dimension_label(Some(9)), "");
        assert_eq!(ctx.dimension_label(None), "");
    }

    #[test]
    fn test_update_width_reads_next_row() {
        let rows = vec![row(&["20231005.1"]), row(&["100*200", "x"]), row(&["no width"])];
        let ctx = ParseContext {
            width: Some("50*60".to_string()),
            ..Default::default()
        };

        let ctx = update_width(&rows, 0, ctx);
        assert_eq!(ctx.width.as_deref(), Some("100*200"));

        // next row has no width token, and the last row has no next row
        let ctx = update_width(&rows, 1, ctx);
        assert_eq!(ctx.width.as_deref(), Some("100*200"));
        let ctx = update_width(&rows, 2, ctx);
        assert_eq!(ctx.width.as_deref(), Some("100*200"));
    }
}
