//! ZIP package access for `.xlsx` workbooks.

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

/// An open `.xlsx` package backed by an in-memory ZIP archive.
pub struct Package {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl Package {
    /// Open a package from a file path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Create a package from a byte vector.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Read a part as XML text.
    ///
    /// Parts are usually UTF-8, but UTF-16 (with or without BOM) shows up in
    /// workbooks written by older tools.
    pub fn read_xml(&self, path: &str) -> Result<String> {
        let bytes = self.read_binary(path)?;
        decode_xml_bytes(&bytes)
    }

    /// Read a part as raw bytes.
    pub fn read_binary(&self, path: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(path)
            .map_err(|_| Error::MissingComponent(path.to_string()))?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Check if a part exists.
    pub fn exists(&self, path: &str) -> bool {
        let archive = self.archive.borrow();
        let found = archive.file_names().any(|n| n == path);
        found
    }
}

/// Decode XML bytes as UTF-8 or UTF-16 (LE/BE).
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => {
            String::from_utf8(rest.to_vec()).map_err(|e| Error::Encoding(e.to_string()))
        }
        [0xFF, 0xFE, rest @ ..] => {
            let content = decode_utf16(rest, u16::from_le_bytes)?;
            Ok(rewrite_utf16_declaration(&content))
        }
        [0xFE, 0xFF, rest @ ..] => {
            let content = decode_utf16(rest, u16::from_be_bytes)?;
            Ok(rewrite_utf16_declaration(&content))
        }
        _ => match std::str::from_utf8(bytes) {
            Ok(s) => Ok(s.to_string()),
            // ASCII markup in UTF-16 leaves a zero in every other byte
            Err(_) if bytes.len() >= 4 && bytes[1] == 0 && bytes[3] == 0 => {
                Ok(rewrite_utf16_declaration(&decode_utf16(bytes, u16::from_le_bytes)?))
            }
            Err(_) if bytes.len() >= 4 && bytes[0] == 0 && bytes[2] == 0 => {
                Ok(rewrite_utf16_declaration(&decode_utf16(bytes, u16::from_be_bytes)?))
            }
            Err(_) => Ok(String::from_utf8_lossy(bytes).into_owned()),
        },
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Result<String> {
    let units = bytes.chunks_exact(2).map(|pair| to_unit([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::Encoding(e.to_string()))
}

/// The text is UTF-8 once decoded, so the declaration must stop saying UTF-16
/// or quick-xml will try to decode it a second time.
fn rewrite_utf16_declaration(content: &str) -> String {
    if !content.starts_with("<?xml") {
        return content.to_string();
    }
    match content.find("?>") {
        Some(end) => {
            let (decl, rest) = content.split_at(end + 2);
            let fixed = ["\"UTF-16\"", "'UTF-16'", "\"utf-16\"", "'utf-16'"]
                .iter()
                .fold(decl.to_string(), |acc, needle| acc.replace(needle, "\"UTF-8\""));
            format!("{}{}", fixed, rest)
        }
        None => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8_bom() {
        let bytes = [0xEF, 0xBB, 0xBF, b'<', b'a', b'/', b'>'];
        assert_eq!(decode_xml_bytes(&bytes).unwrap(), "<a/>");
    }

    #[test]
    fn test_decode_utf16_le_with_declaration() {
        let text = "<?xml version=\"1.0\" encoding=\"UTF-16\"?><a/>";
        let mut bytes = vec![0xFF, 0xFE];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let decoded = decode_xml_bytes(&bytes).unwrap();
        assert_eq!(decoded, "<?xml version=\"1.0\" encoding=\"UTF-8\"?><a/>");
    }

    #[test]
    fn test_from_bytes_rejects_non_zip() {
        let result = Package::from_bytes(b"not a zip".to_vec());
        assert!(matches!(result, Err(Error::ZipArchive(_))));
    }
}
