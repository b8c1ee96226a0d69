//! Record input sources.
//!
//! Rows arrive as a finished snapshot, either from a file or from piped
//! stdin. Both carry the same two formats:
//!
//! - a JSON array of objects (input starting with `[`)
//! - JSON Lines, one object per line
//!
//! Malformed lines and non-object values are skipped with a warning.

use crate::model::Record;
use crate::model::error::InputError;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{info, warn};

pub mod cache;
pub mod file;
pub mod stdin;

pub use cache::SnapshotCache;
pub use file::FileSource;
pub use stdin::StdinSource;

/// Records parsed from one source, plus how many inputs were dropped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadedRecords {
    pub records: Vec<Record>,
    pub skipped: usize,
}

/// Where the host reads its records from.
#[derive(Debug)]
pub enum RecordSource {
    File(FileSource),
    Stdin(StdinSource),
}

impl RecordSource {
    /// Display name used in logs and error messages.
    pub fn name(&self) -> String {
        match self {
            RecordSource::File(f) => f.path().display().to_string(),
            RecordSource::Stdin(_) => stdin::STDIN_NAME.to_string(),
        }
    }

    /// Whether [`RecordSource::load`] can be called again for fresh data.
    ///
    /// Stdin is consumed by the first load.
    pub fn is_reloadable(&self) -> bool {
        matches!(self, RecordSource::File(_))
    }

    /// Read and parse every record.
    ///
    /// # Errors
    ///
    /// Returns `InputError` when the input cannot be read, or when a JSON
    /// array document fails to parse as a whole.
    pub fn load(&mut self) -> Result<LoadedRecords, InputError> {
        let name = self.name();
        let text = match self {
            RecordSource::File(f) => f.read()?,
            RecordSource::Stdin(s) => s.read_all()?,
        };
        let loaded = parse_records(&text, &name)?;
        info!(
            source = %name,
            records = loaded.records.len(),
            skipped = loaded.skipped,
            "loaded records"
        );
        Ok(loaded)
    }
}

/// Detect and create the record source.
///
/// A file path wins; otherwise stdin is used when it is piped.
///
/// # Errors
///
/// Returns `InputError::FileNotFound` if the file does not exist and
/// `InputError::NoInput` if no file is given and stdin is a terminal.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<RecordSource, InputError> {
    match file {
        Some(path) => Ok(RecordSource::File(FileSource::new(path)?)),
        None => Ok(RecordSource::Stdin(StdinSource::new()?)),
    }
}

/// Parse records from raw text.
///
/// # Errors
///
/// A document starting with `[` must parse as a JSON array; otherwise
/// `InputError::InvalidJson` or `InputError::UnsupportedShape` is returned.
/// JSON Lines input never fails: bad lines are counted in `skipped`.
pub fn parse_records(text: &str, source_name: &str) -> Result<LoadedRecords, InputError> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        parse_array(trimmed, source_name)
    } else {
        Ok(parse_lines(text, source_name))
    }
}

fn parse_array(text: &str, source_name: &str) -> Result<LoadedRecords, InputError> {
    let value: Value = serde_json::from_str(text).map_err(|e| InputError::InvalidJson {
        source_name: source_name.to_string(),
        reason: e.to_string(),
    })?;

    let Value::Array(items) = value else {
        return Err(InputError::UnsupportedShape {
            source_name: source_name.to_string(),
        });
    };

    let mut loaded = LoadedRecords::default();
    for (index, item) in items.into_iter().enumerate() {
        match Record::from_value(item) {
            Some(record) => loaded.records.push(record),
            None => {
                warn!(source = %source_name, index, "skipping non-object array element");
                loaded.skipped += 1;
            }
        }
    }
    Ok(loaded)
}

fn parse_lines(text: &str, source_name: &str) -> LoadedRecords {
    let mut loaded = LoadedRecords::default();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let line_number = index + 1;

        match serde_json::from_str::<Value>(line) {
            Ok(value) => match Record::from_value(value) {
                Some(record) => loaded.records.push(record),
                None => {
                    warn!(source = %source_name, line = line_number, "skipping non-object line");
                    loaded.skipped += 1;
                }
            },
            Err(e) => {
                warn!(source = %source_name, line = line_number, error = %e, "skipping malformed line");
                loaded.skipped += 1;
            }
        }
    }

    loaded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;
    use std::fs;

    #[test]
    fn parses_json_array_of_objects() {
        let text = r#"[{"name":"Alice","age":30},{"name":"Bob","age":25}]"#;

        let loaded = parse_records(text, "people.json").unwrap();

        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.skipped, 0);
        assert_eq!(loaded.records[1].get("name"), CellValue::from("Bob"));
    }

    #[test]
    fn array_detection_tolerates_leading_whitespace() {
        let text = "\n   [{\"a\":1}]\n";

        let loaded = parse_records(text, "padded.json").unwrap();

        assert_eq!(loaded.records.len(), 1);
    }

    #[test]
    fn array_skips_non_object_elements() {
        let text = r#"[{"a":1}, 42, "x", {"a":2}]"#;

        let loaded = parse_records(text, "mixed.json").unwrap();

        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.skipped, 2);
    }

    #[test]
    fn broken_array_is_an_error() {
        let result = parse_records("[{\"a\":1},", "broken.json");

        match result {
            Err(InputError::InvalidJson { source_name, .. }) => {
                assert_eq!(source_name, "broken.json");
            }
            other => panic!("Expected InvalidJson, got {:?}", other),
        }
    }

    #[test]
    fn parses_json_lines_and_skips_bad_lines() {
        let text = "{\"a\":1}\nnot json\n\n[1,2]\n{\"a\":2}\n";

        let loaded = parse_records(text, "rows.jsonl").unwrap();

        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.skipped, 2, "malformed and non-object lines count");
        assert_eq!(loaded.records[0].get("a"), CellValue::Number(1.0));
    }

    #[test]
    fn empty_input_yields_no_records() {
        let loaded = parse_records("", "<stdin>").unwrap();
        assert_eq!(loaded, LoadedRecords::default());
    }

    #[test]
    fn file_source_loads_and_reloads() {
        let path = std::env::temp_dir().join("tabview_source_reload.jsonl");
        fs::write(&path, "{\"id\":1}\n").unwrap();

        let mut source = detect_input_source(Some(path.clone())).unwrap();
        assert!(source.is_reloadable());
        assert_eq!(source.load().unwrap().records.len(), 1);

        fs::write(&path, "{\"id\":1}\n{\"id\":2}\n").unwrap();
        assert_eq!(source.load().unwrap().records.len(), 2);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_reported() {
        let result = detect_input_source(Some(PathBuf::from("/nonexistent/rows.json")));
        assert!(matches!(result, Err(InputError::FileNotFound { .. })));
    }

    #[test]
    fn stdin_source_is_not_reloadable() {
        let source = RecordSource::Stdin(StdinSource::from_reader(&b"{\"a\":1}\n"[..]));
        assert!(!source.is_reloadable());
        assert_eq!(source.name(), "<stdin>");
    }

    #[test]
    fn stdin_source_loads_piped_records() {
        let mut source = RecordSource::Stdin(StdinSource::from_reader(&b"{\"a\":1}\n{\"a\":2}\n"[..]));

        let loaded = source.load().unwrap();

        assert_eq!(loaded.records.len(), 2);
    }
}
