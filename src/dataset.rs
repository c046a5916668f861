// Dataset ingestion — row-oriented transcript files.
//
// CSV and JSON (array-of-objects) are supported. The text column is
// required; a missing column halts processing of that dataset with a
// diagnostic rather than a panic. All other columns are ignored.

use std::fs::File;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::output::truncate_chars;

/// The required text column.
pub const TEXT_COLUMN: &str = "speech_in_text";

/// How many characters of a transcript the list view shows.
const PREVIEW_CHARS: usize = 50;

/// One dataset row. Immutable once loaded; `index` is the row position
/// and doubles as the transcript identifier everywhere downstream.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub index: usize,
    pub text: String,
}

impl Transcript {
    /// Short preview for list displays.
    pub fn preview(&self) -> String {
        truncate_chars(&self.text, PREVIEW_CHARS)
    }
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset {path} does not contain a '{column}' column")]
    MissingColumn { path: String, column: String },
    #[error("unsupported dataset format '{0}' (expected .csv or .json)")]
    UnsupportedFormat(String),
    #[error("row {row} is out of range; dataset has {len} transcripts")]
    RowOutOfRange { row: usize, len: usize },
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load all transcripts from a CSV or JSON dataset, keyed by the given
/// text column.
pub fn load_transcripts(path: &Path, column: &str) -> Result<Vec<Transcript>, DatasetError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path, column),
        "json" => load_json(path, column),
        other => Err(DatasetError::UnsupportedFormat(other.to_string())),
    }
}

/// Fetch one transcript by row index with a range-checked error.
pub fn select_row(transcripts: &[Transcript], row: usize) -> Result<&Transcript, DatasetError> {
    transcripts.get(row).ok_or(DatasetError::RowOutOfRange {
        row,
        len: transcripts.len(),
    })
}

fn load_csv(path: &Path, column: &str) -> Result<Vec<Transcript>, DatasetError> {
    let mut reader = csv::Reader::from_path(path)?;

    let text_idx = reader
        .headers()?
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| DatasetError::MissingColumn {
            path: path.display().to_string(),
            column: column.to_string(),
        })?;

    let mut transcripts = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let text = record.get(text_idx).unwrap_or_default().to_string();
        transcripts.push(Transcript { index, text });
    }
    Ok(transcripts)
}

fn load_json(path: &Path, column: &str) -> Result<Vec<Transcript>, DatasetError> {
    let file = File::open(path)?;
    let rows: Vec<Value> = serde_json::from_reader(file)?;

    let mut transcripts = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        let text = row
            .get(column)
            .and_then(Value::as_str)
            .ok_or_else(|| DatasetError::MissingColumn {
                path: path.display().to_string(),
                column: column.to_string(),
            })?;
        transcripts.push(Transcript {
            index,
            text: text.to_string(),
        });
    }
    Ok(transcripts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join("lectern-dataset-tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_csv_with_extra_columns() {
        let path = write_temp(
            "ok.csv",
            "speaker,speech_in_text,year\nsmith,the economy is growing,2020\njones,trade policy matters,2021\n",
        );
        let rows = load_transcripts(&path, TEXT_COLUMN).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].index, 0);
        assert_eq!(rows[0].text, "the economy is growing");
        assert_eq!(rows[1].text, "trade policy matters");
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let path = write_temp("bad.csv", "speaker,text\nsmith,hello\n");
        let err = load_transcripts(&path, TEXT_COLUMN).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn { .. }));
    }

    #[test]
    fn loads_json_rows() {
        let path = write_temp(
            "ok.json",
            r#"[{"speech_in_text": "first speech"}, {"speech_in_text": "second speech", "extra": 1}]"#,
        );
        let rows = load_transcripts(&path, TEXT_COLUMN).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].text, "second speech");
    }

    #[test]
    fn json_row_without_column_is_a_schema_error() {
        let path = write_temp("bad.json", r#"[{"other": "x"}]"#);
        let err = load_transcripts(&path, TEXT_COLUMN).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn { .. }));
    }

    #[test]
    fn rejects_unknown_extensions() {
        let path = std::path::Path::new("dataset.parquet");
        let err = load_transcripts(path, TEXT_COLUMN).unwrap_err();
        assert!(matches!(err, DatasetError::UnsupportedFormat(_)));
    }

    #[test]
    fn select_row_bounds_check() {
        let rows = vec![Transcript {
            index: 0,
            text: "only".to_string(),
        }];
        assert!(select_row(&rows, 0).is_ok());
        assert!(matches!(
            select_row(&rows, 5),
            Err(DatasetError::RowOutOfRange { row: 5, len: 1 })
        ));
    }

    #[test]
    fn preview_truncates_long_text() {
        let t = Transcript {
            index: 0,
            text: "x".repeat(80),
        };
        let preview = t.preview();
        assert!(preview.starts_with(&"x".repeat(50)));
        assert!(preview.ends_with("..."));
    }
}
