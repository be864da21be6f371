//! Workbook format detection.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// OLE2 compound file magic bytes used by BIFF `.xls` workbooks.
const OLE_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Detected workbook format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    /// Office Open XML workbook (.xlsx)
    Xlsx,
    /// Legacy BIFF workbook (.xls)
    Xls,
}

impl FormatType {
    /// Returns a human-readable name for this format.
    pub fn name(&self) -> &'static str {
        match self {
            FormatType::Xlsx => "Excel Workbook",
            FormatType::Xls => "Excel 97-2003 Workbook",
        }
    }

    /// Map a file extension (without the dot) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" | "xlsm" => Some(FormatType::Xlsx),
            "xls" => Some(FormatType::Xls),
            _ => None,
        }
    }
}

impl std::fmt::Display for FormatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Detect the format from the leading bytes of a file.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<FormatType> {
    if is_zip_file(data) {
        Ok(FormatType::Xlsx)
    } else if is_ole_file(data) {
        Ok(FormatType::Xls)
    } else {
        Err(Error::UnknownFormat)
    }
}

/// Detect the format of a file on disk.
///
/// Magic bytes win; the extension is only consulted when the bytes are
/// inconclusive.
pub fn detect_format_from_path(path: impl AsRef<Path>) -> Result<FormatType> {
    let path = path.as_ref();
    let mut header = Vec::with_capacity(OLE_MAGIC.len());
    File::open(path)?
        .take(OLE_MAGIC.len() as u64)
        .read_to_end(&mut header)?;

    detect_format_from_bytes(&header).or_else(|err| {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(FormatType::from_extension)
            .ok_or(err)
    })
}

/// Check if data starts with ZIP magic bytes.
pub fn is_zip_file(data: &[u8]) -> bool {
    data.starts_with(&ZIP_MAGIC)
}

/// Check if data starts with OLE2 compound file magic bytes.
pub fn is_ole_file(data: &[u8]) -> bool {
    data.starts_with(&OLE_MAGIC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_format_type_display() {
        assert_eq!(FormatType::Xlsx.to_string(), "Excel Workbook");
        assert_eq!(FormatType::Xls.to_string(), "Excel 97-2003 Workbook");
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(FormatType::from_extension("XLSX"), Some(FormatType::Xlsx));
        assert_eq!(FormatType::from_extension("xls"), Some(FormatType::Xls));
        assert_eq!(FormatType::from_extension("csv"), None);
    }

    #[test]
    fn test_magic_bytes() {
        assert!(is_zip_file(&[0x50, 0x4B, 0x03, 0x04, 0x00]));
        assert!(!is_zip_file(&[0x50, 0x4B])); // Too short
        assert!(is_ole_file(&OLE_MAGIC));
        assert_eq!(
            detect_format_from_bytes(&OLE_MAGIC).unwrap(),
            FormatType::Xls
        );
    }

    #[test]
    fn test_detect_invalid_data() {
        let result = detect_format_from_bytes(&[0x00, 0x00, 0x00, 0x00]);
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_detect_falls_back_to_extension() {
        let mut file = tempfile::Builder::new().suffix(".xls").tempfile().unwrap();
        file.write_all(b"??").unwrap();
        assert_eq!(detect_format_from_path(file.path()).unwrap(), FormatType::Xls);
    }

    #[test]
    fn test_detect_unknown_extension_keeps_error() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"plain text").unwrap();
        let result = detect_format_from_path(file.path());
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }
}
