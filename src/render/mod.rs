//! Display renderings of extracted records.
//!
//! # Example
//!
//! ```no_run
//! use panelstock::{extract_file, render::*, ExtractOptions};
//!
//! let records = extract_file("stock.xlsx", &ExtractOptions::default())?;
//!
//! // Grid preview
//! println!("{}", to_table(&records, TableStyle::Ascii));
//!
//! // JSON
//! let json = to_json(&records, JsonFormat::Pretty)?;
//! # Ok::<(), panelstock::Error>(())
//! ```

mod json;
mod table;

pub use json::{to_json, to_json_default, JsonFormat};
pub use table::{to_table, TableStyle};
