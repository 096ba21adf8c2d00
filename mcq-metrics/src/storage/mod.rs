/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Results and answer-key CSV files.
//!
//! Results file:
//! ```text
//! Question #,Time (s),Selected Answer,Correct Answer,Is Correct
//! 1,34,a,a,Yes
//! 2,0,,d,No
//! ```
//!
//! Answer-key file:
//! ```text
//! Question #,Correct Answer
//! 1,a
//! 2,d
//! ```
//!
//! Rows are written in the order given (ascending ordinal for anything the
//! engine produced) and read back in file order.

pub mod error;

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::record::{AnswerKey, AnswerKeyEntry, AnswerRecord, Choice, Correctness};
pub use error::StorageError;

const COL_SELECTED: &str = "Selected Answer";
const COL_CORRECT: &str = "Correct Answer";
const COL_IS_CORRECT: &str = "Is Correct";

/// Header row of the results file.
pub const RESULT_HEADERS: [&str; 5] = [
    "Question #",
    "Time (s)",
    COL_SELECTED,
    COL_CORRECT,
    COL_IS_CORRECT,
];

/// Header row of the answer-key file.
pub const KEY_HEADERS: [&str; 2] = ["Question #", COL_CORRECT];

// ── Private CSV row types ─────────────────────────────────────────────────────

/// Row layout of the results file.
///
/// Letters stay as text here so that an empty cell and an invalid letter can
/// be told apart when converting to [`AnswerRecord`].
#[derive(Debug, Serialize, Deserialize)]
struct ResultRow {
    #[serde(rename = "Question #")]
    ordinal: u32,
    #[serde(rename = "Time (s)")]
    elapsed_s: u64,
    #[serde(rename = "Selected Answer")]
    selected: String,
    #[serde(rename = "Correct Answer")]
    correct: String,
    #[serde(rename = "Is Correct")]
    is_correct: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct KeyRow {
    #[serde(rename = "Question #")]
    ordinal: u32,
    #[serde(rename = "Correct Answer")]
    correct: String,
}

impl From<&AnswerRecord> for ResultRow {
    fn from(r: &AnswerRecord) -> Self {
        Self {
            ordinal: r.ordinal,
            elapsed_s: r.elapsed_s,
            selected: letter_to_cell(r.selected),
            correct: letter_to_cell(r.correct),
            is_correct: r.correctness.as_str().to_string(),
        }
    }
}

impl ResultRow {
    fn into_record(self, path: &Path) -> Result<AnswerRecord, StorageError> {
        let selected = cell_to_letter(&self.selected, path, self.ordinal, COL_SELECTED)?;
        let correct = cell_to_letter(&self.correct, path, self.ordinal, COL_CORRECT)?;
        let correctness = Correctness::from_column(&self.is_correct).ok_or_else(|| {
            StorageError::InvalidField {
                path: path.to_path_buf(),
                ordinal: self.ordinal,
                column: COL_IS_CORRECT,
                value: self.is_correct.clone(),
            }
        })?;

        Ok(AnswerRecord {
            ordinal: self.ordinal,
            elapsed_s: self.elapsed_s,
            selected,
            correct,
            correctness,
        })
    }
}

fn letter_to_cell(letter: Option<Choice>) -> String {
    letter.map(|c| c.as_str().to_string()).unwrap_or_default()
}

fn cell_to_letter(
    cell: &str,
    path: &Path,
    ordinal: u32,
    column: &'static str,
) -> Result<Option<Choice>, StorageError> {
    if cell.trim().is_empty() {
        return Ok(None);
    }
    cell.parse::<Choice>()
        .map(Some)
        .map_err(|_| StorageError::InvalidField {
            path: path.to_path_buf(),
            ordinal,
            column,
            value: cell.to_string(),
        })
}

// ── File helpers ──────────────────────────────────────────────────────────────

/// Fail with [`StorageError::NotFound`] unless `path` exists.
pub fn require_file(path: &Path) -> Result<(), StorageError> {
    if path.exists() {
        Ok(())
    } else {
        Err(StorageError::NotFound {
            path: path.to_path_buf(),
        })
    }
}

fn open_reader(path: &Path) -> Result<csv::Reader<File>, StorageError> {
    require_file(path)?;
    let file = File::open(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(csv::Reader::from_reader(file))
}

/// Header rows are written explicitly so an empty table still has one.
fn open_writer(path: &Path, headers: &[&str]) -> Result<csv::Writer<File>, StorageError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_err(path))?;
    writer.write_record(headers).map_err(csv_err(path))?;
    Ok(writer)
}

fn csv_err(path: &Path) -> impl Fn(csv::Error) -> StorageError + '_ {
    move |source| StorageError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

fn flush(mut writer: csv::Writer<File>, path: &Path) -> Result<(), StorageError> {
    writer.flush().map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ── Results file ──────────────────────────────────────────────────────────────

/// Write `records` as the results file, replacing any existing file.
pub fn write_results(path: &Path, records: &[AnswerRecord]) -> Result<(), StorageError> {
    let mut writer = open_writer(path, &RESULT_HEADERS)?;
    for record in records {
        writer
            .serialize(ResultRow::from(record))
            .map_err(csv_err(path))?;
    }
    flush(writer, path)?;
    info!(path = %path.display(), rows = records.len(), "results written");
    Ok(())
}

/// Load every row of the results file.
pub fn read_results(path: &Path) -> Result<Vec<AnswerRecord>, StorageError> {
    let mut reader = open_reader(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize::<ResultRow>() {
        let row = row.map_err(csv_err(path))?;
        records.push(row.into_record(path)?);
    }
    debug!(path = %path.display(), rows = records.len(), "results loaded");
    Ok(records)
}

// ── Answer-key file ───────────────────────────────────────────────────────────

pub fn write_key(path: &Path, key: &AnswerKey) -> Result<(), StorageError> {
    let mut writer = open_writer(path, &KEY_HEADERS)?;
    for entry in &key.entries {
        writer
            .serialize(KeyRow {
                ordinal: entry.ordinal,
                correct: letter_to_cell(entry.correct),
            })
            .map_err(csv_err(path))?;
    }
    flush(writer, path)?;
    info!(path = %path.display(), rows = key.entries.len(), "answer key written");
    Ok(())
}

pub fn read_key(path: &Path) -> Result<AnswerKey, StorageError> {
    let mut reader = open_reader(path)?;
    let mut entries = Vec::new();
    for row in reader.deserialize::<KeyRow>() {
        let row = row.map_err(csv_err(path))?;
        let correct = cell_to_letter(&row.correct, path, row.ordinal, COL_CORRECT)?;
        entries.push(AnswerKeyEntry {
            ordinal: row.ordinal,
            correct,
        });
    }
    debug!(path = %path.display(), rows = entries.len(), "answer key loaded");
    Ok(AnswerKey { entries })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    /// Helper: write CSV text to a temp file and return it.
    fn csv_tempfile(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    fn graded(
        ordinal: u32,
        elapsed_s: u64,
        sel: Option<Choice>,
        cor: Option<Choice>,
        c: Correctness,
    ) -> AnswerRecord {
        AnswerRecord {
            ordinal,
            elapsed_s,
            selected: sel,
            correct: cor,
            correctness: c,
        }
    }

    // ── Results ───────────────────────────────────────────────────────────────

    #[test]
    fn results_file_has_expected_header_and_blank_cells() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("result_file.csv");
        let records = vec![
            AnswerRecord::answered(1, 34, Choice::A),
            graded(2, 0, None, Some(Choice::D), Correctness::Incorrect),
        ];

        write_results(&path, &records).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "Question #,Time (s),Selected Answer,Correct Answer,Is Correct\n\
             1,34,a,,\n\
             2,0,,d,No\n"
        );
    }

    #[test]
    fn results_written_then_read_back_match() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("r.csv");
        let records = vec![
            graded(5, 12, Some(Choice::B), Some(Choice::B), Correctness::Correct),
            graded(6, 0, None, None, Correctness::Unknown),
        ];
        write_results(&path, &records).unwrap();
        assert_eq!(read_results(&path).unwrap(), records);
    }

    #[test]
    fn uppercase_letters_in_file_are_accepted() {
        let f = csv_tempfile(
            "Question #,Time (s),Selected Answer,Correct Answer,Is Correct\n1,3,C,,\n",
        );
        let records = read_results(f.path()).unwrap();
        assert_eq!(records[0].selected, Some(Choice::C));
    }

    #[test]
    fn non_numeric_time_is_a_csv_error() {
        let f = csv_tempfile(
            "Question #,Time (s),Selected Answer,Correct Answer,Is Correct\n1,soon,a,,\n",
        );
        let err = read_results(f.path()).unwrap_err();
        assert!(matches!(err, StorageError::Csv { .. }), "got: {err}");
    }

    #[test]
    fn unknown_letter_is_an_invalid_field() {
        let f = csv_tempfile(
            "Question #,Time (s),Selected Answer,Correct Answer,Is Correct\n4,3,z,,\n",
        );
        let err = read_results(f.path()).unwrap_err();
        assert!(matches!(
            err,
            StorageError::InvalidField { ordinal: 4, column: "Selected Answer", .. }
        ));
    }

    #[test]
    fn unknown_correctness_is_an_invalid_field() {
        let f = csv_tempfile(
            "Question #,Time (s),Selected Answer,Correct Answer,Is Correct\n1,3,a,a,Maybe\n",
        );
        let err = read_results(f.path()).unwrap_err();
        assert!(matches!(err, StorageError::InvalidField { column: "Is Correct", .. }));
    }

    #[test]
    fn missing_results_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.csv");
        let err = read_results(&path).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), format!("Does not exist: {}", path.display()));
    }

    // ── Answer key ────────────────────────────────────────────────────────────

    #[test]
    fn key_file_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("answer_key_file.csv");
        let key = AnswerKey {
            entries: vec![
                AnswerKeyEntry {
                    ordinal: 1,
                    correct: Some(Choice::B),
                },
                AnswerKeyEntry {
                    ordinal: 2,
                    correct: None,
                },
            ],
        };

        write_key(&path, &key).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Question #,Correct Answer\n1,b\n2,\n"
        );
        assert_eq!(read_key(&path).unwrap(), key);
    }

    #[test]
    fn key_rows_keep_file_order() {
        let f = csv_tempfile("Question #,Correct Answer\n3,e\n1,a\n2,c\n");
        let ordinals: Vec<u32> = read_key(f.path())
            .unwrap()
            .entries
            .iter()
            .map(|e| e.ordinal)
            .collect();
        assert_eq!(ordinals, vec![3, 1, 2]);
    }

    #[test]
    fn missing_key_file_is_not_found() {
        let err = read_key(Path::new("/nonexistent/dir/key.csv")).unwrap_err();
        assert!(err.is_not_found());
    }
}
