//! JSON renderer implementation.

use crate::error::Result;
use crate::model::OutputRecord;

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    Compact,
    /// Pretty-printed with 2-space indentation
    #[default]
    Pretty,
}

/// Convert records to a JSON array.
pub fn to_json(records: &[OutputRecord], format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Compact => serde_json::to_string(records)?,
        JsonFormat::Pretty => serde_json::to_string_pretty(records)?,
    };
    Ok(json)
}

/// Convert records to JSON with default formatting.
pub fn to_json_default(records: &[OutputRecord]) -> Result<String> {
    to_json(records, JsonFormat::Pretty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Amount;

    fn record() -> OutputRecord {
        OutputRecord {
            id: "R15060200".to_string(),
            pack_id: 20231005.2,
            amount: Some(Amount::Number(150.0)),
            status: "V".to_string(),
        }
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&[record()], JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"id\": \"R15060200\""));
        assert!(json.contains("\"packId\": 20231005.2"));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&[record()], JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert_eq!(
            json,
            r#"[{"id":"R15060200","packId":20231005.2,"amount":150.0,"status":"V"}]"#
        );
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(to_json(&[], JsonFormat::Compact).unwrap(), "[]");
        assert!(to_json_default(&[]).is_ok());
    }

    #[test]
    fn test_records_roundtrip() {
        let json = to_json_default(&[record()]).unwrap();
        let parsed: Vec<OutputRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vec![record()]);
    }
}
