//! File records as stored and persisted

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::language::{self, LanguageTag};

/// Unique record identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(pub u64);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One user file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: FileId,
    /// Display name including extension
    pub name: String,
    /// Raw text content
    pub code: String,
    /// Inferred at creation, not recomputed on edit
    pub language: LanguageTag,
    #[serde(with = "timestamp")]
    pub created: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub modified: DateTime<Utc>,
}

/// RFC 3339 in UTC with exactly three fractional digits, e.g. `2023-11-14T22:13:20.000Z`
mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

impl FileRecord {
    /// Build a fresh record, classifying its language from name and content
    pub fn new(id: FileId, name: impl Into<String>, code: impl Into<String>) -> Self {
        let name = name.into();
        let code = code.into();
        let language = language::classify(&code, &name);
        let now = now();

        Self {
            id,
            name,
            code,
            language,
            created: now,
            modified: now,
        }
    }

    /// Number of characters in the content
    pub fn char_count(&self) -> usize {
        self.code.chars().count()
    }
}

/// Current time, truncated to milliseconds
pub fn now() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::<Utc>::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

/// Serialize a collection to its persisted form
pub fn serialize(records: &[FileRecord]) -> serde_json::Result<String> {
    serde_json::to_string(records)
}

/// Parse a persisted collection
pub fn parse(payload: &str) -> serde_json::Result<Vec<FileRecord>> {
    serde_json::from_str(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_classifies_language() {
        let record = FileRecord::new(FileId(1), "main.py", "");
        assert_eq!(record.language, LanguageTag::Python);
        assert_eq!(record.created, record.modified);

        let record = FileRecord::new(FileId(2), "snippet", "SELECT 1 FROM dual");
        assert_eq!(record.language, LanguageTag::Sql);
    }

    #[test]
    fn test_serialize_parse_roundtrip() {
        let records = vec![
            FileRecord::new(FileId(10), "a.js", "const x = \"é\\n\";\n"),
            FileRecord::new(FileId(9), "notes", ""),
        ];
        let first = serialize(&records).unwrap();
        let reparsed = parse(&first).unwrap();
        assert_eq!(reparsed, records);
        assert_eq!(serialize(&reparsed).unwrap(), first);
    }

    #[test]
    fn test_parses_browser_payload() {
        let payload = r#"[{"id":1700000000000,"name":"app.js","code":"let a = 1;","language":"javascript","created":"2023-11-14T22:13:20.000Z","modified":"2023-11-14T22:13:20.000Z"}]"#;
        let records = parse(payload).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, FileId(1_700_000_000_000));
        assert_eq!(records[0].language, LanguageTag::JavaScript);
        assert_eq!(serialize(&records).unwrap(), payload);
    }

    #[test]
    fn test_offset_timestamps_normalize_to_utc() {
        let payload = r#"[{"id":1,"name":"a","code":"","language":"plaintext","created":"2023-11-14T23:13:20.5+01:00","modified":"2023-11-14T22:13:20Z"}]"#;
        let json = serialize(&parse(payload).unwrap()).unwrap();
        assert!(json.contains(r#""created":"2023-11-14T22:13:20.500Z""#));
        assert!(json.contains(r#""modified":"2023-11-14T22:13:20.000Z""#));
    }

    #[test]
    fn test_char_count_counts_chars() {
        let record = FileRecord::new(FileId(1), "x.txt", "héllo");
        assert_eq!(record.char_count(), 5);
    }
}
