//! Error types for the panelstock library.

use std::io;
use thiserror::Error;

/// Result type alias for panelstock operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading, extracting or exporting a workbook.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format could not be determined.
    #[error("Unknown file format")]
    UnknownFormat,

    /// The file format is recognized but not supported by this build.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Error reading ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// Invalid or malformed data in the workbook.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A required workbook component is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// Error during text encoding conversion.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Error decoding a legacy BIFF (.xls) workbook.
    #[error("XLS decode error: {0}")]
    Xls(String),

    /// A section header was found but its dimensions row is unusable.
    ///
    /// Only raised when `ExtractOptions::strict_sections` is enabled.
    #[error("Malformed section in sheet '{sheet}' at row {row}: {reason}")]
    MalformedSection {
        /// Sheet name
        sheet: String,
        /// Zero-based row index of the header row
        row: usize,
        /// What was wrong with the section
        reason: String,
    },

    /// No section header was found anywhere in the workbook.
    ///
    /// Only raised when `ExtractOptions::strict_sections` is enabled.
    #[error("No section header found in workbook")]
    NoSections,

    /// Error while writing the export workbook.
    #[error("Export error: {0}")]
    Export(String),

    /// Error during rendering.
    #[error("Render error: {0}")]
    Render(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

#[cfg(feature = "xls")]
impl From<calamine::XlsError> for Error {
    fn from(err: calamine::XlsError) -> Self {
        Error::Xls(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Error::Export(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownFormat;
        assert_eq!(err.to_string(), "Unknown file format");

        let err = Error::UnsupportedFormat("legacy .xls".to_string());
        assert_eq!(err.to_string(), "Unsupported format: legacy .xls");
    }

    #[test]
    fn test_malformed_section_display() {
        let err = Error::MalformedSection {
            sheet: "Stock".to_string(),
            row: 4,
            reason: "no PACK column".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed section in sheet 'Stock' at row 4: no PACK column"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
