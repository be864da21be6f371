//! XLSX reader implementation.

use crate::container::Package;
use crate::error::{Error, Result};
use crate::model::{Cell, Row, Sheet, Workbook};
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use std::path::Path;

use super::shared_strings::SharedStrings;

/// Worksheet size limits of the OOXML format.
const MAX_COLUMNS: usize = 16_384;
const MAX_ROWS: usize = 1_048_576;

/// Sheet entry from workbook.xml.
#[derive(Debug, Clone)]
struct SheetInfo {
    name: String,
    rel_id: String,
}

/// Reader for XLSX workbooks.
pub struct XlsxReader {
    package: Package,
    shared_strings: SharedStrings,
    sheets: Vec<SheetInfo>,
    relationships: HashMap<String, String>,
}

impl XlsxReader {
    /// Open an XLSX file for reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let package = Package::open(path)?;
        Self::from_package(package)
    }

    /// Create a reader from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let package = Package::from_bytes(data)?;
        Self::from_package(package)
    }

    fn from_package(package: Package) -> Result<Self> {
        let shared_strings = if package.exists("xl/sharedStrings.xml") {
            SharedStrings::parse(&package.read_xml("xl/sharedStrings.xml")?)?
        } else {
            SharedStrings::default()
        };

        let relationships = match package.read_xml("xl/_rels/workbook.xml.rels") {
            Ok(xml) => parse_workbook_rels(&xml)?,
            Err(_) => HashMap::new(),
        };

        let workbook_xml = package.read_xml("xl/workbook.xml")?;
        let sheets = parse_sheet_list(&workbook_xml)?;

        Ok(Self {
            package,
            shared_strings,
            sheets,
            relationships,
        })
    }

    /// Read every sheet into a positional workbook grid.
    pub fn read(&self) -> Result<Workbook> {
        let mut workbook = Workbook::new();

        for (idx, info) in self.sheets.iter().enumerate() {
            let path = self.sheet_path(idx, info);
            let mut sheet = Sheet::new(info.name.clone());

            match self.package.read_xml(&path) {
                Ok(xml) => self.read_sheet_rows(&xml, &mut sheet)?,
                Err(Error::MissingComponent(_)) => {
                    log::warn!("sheet '{}' has no part at {}, reading it as empty", info.name, path);
                }
                Err(e) => return Err(e),
            }

            log::debug!("sheet '{}': {} rows", sheet.name, sheet.rows.len());
            workbook.add_sheet(sheet);
        }

        Ok(workbook)
    }

    /// Resolve the part path of a sheet.
    ///
    /// Workbooks without relationship entries fall back to the conventional
    /// `xl/worksheets/sheetN.xml` naming.
    fn sheet_path(&self, idx: usize, info: &SheetInfo) -> String {
        match self.relationships.get(&info.rel_id) {
            Some(target) => match target.strip_prefix('/') {
                Some(absolute) => absolute.to_string(),
                None => format!("xl/{}", target.trim_start_matches("./")),
            },
            None => format!("xl/worksheets/sheet{}.xml", idx + 1),
        }
    }

    /// Parse a worksheet's `<sheetData>` into positional rows.
    ///
    /// Rows and columns are counted from the top-left corner of the used
    /// range (`<dimension>`, widened to any cell outside it), so a table that
    /// starts in `B3` has that cell at row 0, column 0.
    fn read_sheet_rows(&self, xml: &str, sheet: &mut Sheet) -> Result<()> {
        let mut reader = quick_xml::Reader::from_str(xml);
        let mut buf = Vec::new();

        let mut next_row = 0usize;
        let mut current_row: Option<(usize, Row)> = None;
        let mut next_col = 0usize;

        let mut cell: Option<PendingCell> = None;
        let mut in_value = false;
        let mut in_inline = false;
        let mut phonetic_depth = 0usize;
        let mut dimension: Option<(usize, usize)> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                    b"row" => {
                        let index = row_index(e)?.unwrap_or(next_row);
                        current_row = Some((index, Row::new()));
                        next_col = 0;
                    }
                    b"c" if current_row.is_some() => {
                        let pending = PendingCell::start(e, next_col)?;
                        next_col = pending.col + 1;
                        cell = Some(pending);
                    }
                    b"v" if cell.is_some() => in_value = true,
                    b"is" if cell.is_some() => in_inline = true,
                    b"rPh" => phonetic_depth += 1,
                    b"t" if in_inline && phonetic_depth == 0 => in_value = true,
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                    b"dimension" => dimension = dimension_origin(e),
                    b"row" => {
                        // Row with no cells still occupies its position
                        let index = row_index(e)?.unwrap_or(next_row);
                        next_row = index + 1;
                    }
                    b"c" if current_row.is_some() => {
                        // Styled blank cell
                        let pending = PendingCell::start(e, next_col)?;
                        next_col = pending.col + 1;
                    }
                    _ => {}
                },
                Ok(Event::Text(ref e)) if in_value => {
                    if let Some(ref mut pending) = cell {
                        let text = e.unescape().map_err(|e| Error::XmlParse(e.to_string()))?;
                        pending.raw.push_str(&text);
                    }
                }
                Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                    b"row" => {
                        if let Some((index, mut row)) = current_row.take() {
                            row.trim_trailing();
                            sheet.set_row(index, row);
                            next_row = index + 1;
                        }
                    }
                    b"c" => {
                        if let (Some(pending), Some((_, row))) = (cell.take(), current_row.as_mut()) {
                            let value = self.resolve_cell_value(&pending.raw, pending.cell_type.as_deref());
                            if !value.is_empty() {
                                row.set(pending.col, value);
                            }
                        }
                        in_value = false;
                        in_inline = false;
                    }
                    b"v" | b"t" => in_value = false,
                    b"is" => in_inline = false,
                    b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        if let Some((row, col)) = sheet.used_origin() {
            let (row, col) = match dimension {
                Some((r, c)) => (r.min(row), c.min(col)),
                None => (row, col),
            };
            sheet.shift_origin(row, col);
        }

        Ok(())
    }

    /// Resolve a cell value based on its type attribute.
    fn resolve_cell_value(&self, raw: &str, cell_type: Option<&str>) -> Cell {
        match cell_type {
            Some("s") => match raw.trim().parse::<usize>() {
                Ok(idx) => match self.shared_strings.get(idx) {
                    Some(s) => Cell::text(s),
                    None => {
                        log::debug!("shared string index {} out of range", idx);
                        Cell::Empty
                    }
                },
                Err(_) => Cell::text(raw),
            },
            Some("b") => Cell::Bool(raw.trim() == "1"),
            // Errors (#N/A, #DIV/0!) and ISO dates stay as their text
            Some("e") | Some("str") | Some("inlineStr") | Some("d") => {
                if raw.is_empty() {
                    Cell::Empty
                } else {
                    Cell::text(raw)
                }
            }
            _ => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    Cell::Empty
                } else if let Ok(n) = trimmed.parse::<f64>() {
                    Cell::Number(n)
                } else {
                    Cell::text(raw)
                }
            }
        }
    }

}

/// A `<c>` element being read.
struct PendingCell {
    col: usize,
    cell_type: Option<String>,
    raw: String,
}

impl PendingCell {
    fn start(e: &BytesStart<'_>, fallback_col: usize) -> Result<Self> {
        let mut col = fallback_col;
        let mut cell_type = None;

        for attr in e.attributes() {
            let attr = attr.map_err(|e| Error::XmlParse(e.to_string()))?;
            match attr.key.as_ref() {
                b"r" => {
                    let reference = String::from_utf8_lossy(&attr.value);
                    if let Some(parsed) = column_index(&reference)? {
                        col = parsed;
                    }
                }
                b"t" => cell_type = Some(String::from_utf8_lossy(&attr.value).to_string()),
                _ => {}
            }
        }

        if col >= MAX_COLUMNS {
            return Err(Error::InvalidData(format!("too many cells in row (column {})", col + 1)));
        }

        Ok(Self {
            col,
            cell_type,
            raw: String::new(),
        })
    }
}

/// Zero-based row index from a `<row r="N">` attribute.
fn row_index(e: &BytesStart<'_>) -> Result<Option<usize>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| Error::XmlParse(e.to_string()))?;
        if attr.key.as_ref() == b"r" {
            let value = String::from_utf8_lossy(&attr.value);
            return match value.trim().parse::<usize>() {
                Ok(n) if (1..=MAX_ROWS).contains(&n) => Ok(Some(n - 1)),
                _ => Err(Error::InvalidData(format!("bad row reference '{}'", value))),
            };
        }
    }
    Ok(None)
}

/// Zero-based column index from an A1-style reference (`"AB12"` is 27).
///
/// `None` when the reference has no column letters. Columns past `XFD` are
/// invalid data.
pub(crate) fn column_index(reference: &str) -> Result<Option<usize>> {
    let mut number = 0usize;
    let mut seen = false;

    for b in reference.bytes().take_while(u8::is_ascii_alphabetic) {
        seen = true;
        number = number
            .checked_mul(26)
            .and_then(|n| n.checked_add((b.to_ascii_uppercase() - b'A' + 1) as usize))
            .filter(|n| *n <= MAX_COLUMNS)
            .ok_or_else(|| Error::InvalidData(format!("bad cell reference '{}'", reference)))?;
    }

    Ok(seen.then(|| number - 1))
}

/// Top-left corner of a `<dimension ref="B3:F20">` element.
///
/// `None` for a malformed reference.
fn dimension_origin(e: &BytesStart<'_>) -> Option<(usize, usize)> {
    let attr = e.attributes().flatten().find(|a| a.key.as_ref() == b"ref")?;
    let value = String::from_utf8_lossy(&attr.value).into_owned();
    let start = value.split(':').next()?.trim();

    let col = column_index(start).ok()??;
    let row = start
        .trim_start_matches(|c: char| c.is_ascii_alphabetic())
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=MAX_ROWS).contains(n))?;

    Some((row - 1, col))
}

/// Parse workbook relationships into an id → target map.
fn parse_workbook_rels(xml: &str) -> Result<HashMap<String, String>> {
    let mut rels = HashMap::new();
    let mut reader = quick_xml::Reader::from_str(xml);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"Relationship" {
                    let mut id = String::new();
                    let mut target = String::new();

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Id" => id = String::from_utf8_lossy(&attr.value).to_string(),
                            b"Target" => target = String::from_utf8_lossy(&attr.value).to_string(),
                            _ => {}
                        }
                    }

                    if !id.is_empty() && !target.is_empty() {
                        rels.insert(id, target);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

/// Parse the `<sheets>` list of workbook.xml in declaration order.
fn parse_sheet_list(xml: &str) -> Result<Vec<SheetInfo>> {
    let mut sheets = Vec::new();
    let mut reader = quick_xml::Reader::from_str(xml);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"sheet" {
                    let mut name = String::new();
                    let mut rel_id = String::new();

                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"name" {
                            name = attr
                                .unescape_value()
                                .map(|v| v.to_string())
                                .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).to_string());
                        } else if attr.key.local_name().as_ref() == b"id"
                            && attr.key.prefix().is_some()
                        {
                            rel_id = String::from_utf8_lossy(&attr.value).to_string();
                        }
                    }

                    if !name.is_empty() {
                        sheets.push(SheetInfo { name, rel_id });
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}
