//! Stock record extraction.
//!
//! Stock workbooks have no fixed layout. Items are grouped into sections, each
//! opened by a header row naming a wood type, and the extractor walks every
//! row carrying the current section forward until the next header.
//!
//! # Example
//!
//! ```no_run
//! use panelstock::extract::{process_workbook, ExtractOptions};
//!
//! let workbook = panelstock::read_workbook("stock.xlsx")?;
//! let records = process_workbook(&workbook, &ExtractOptions::default())?;
//! for record in &records {
//!     println!("{} {} {}", record.id, record.pack_id, record.status);
//! }
//! # Ok::<(), panelstock::Error>(())
//! ```

mod cells;
mod context;
mod options;
mod record;
mod walker;

pub use cells::{
    find_next_present, find_pack_column, is_pack_id, is_width, looks_like_wood_type,
    normalize_status, position_of, strip_id_separators, PACK_MARKER,
};
pub use context::{detect_section, find_wood_type_column, update_width, ParseContext};
pub use options::{ExtractOptions, WoodTypeMatch};
pub use record::emit_record;
pub use walker::{process_row, process_workbook, RowOutcome};
