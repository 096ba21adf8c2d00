/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for results / answer-key files.
//!
//! [`StorageError::NotFound`] is the one recoverable case: the binary reports
//! it to the operator and abandons the operation before anything is written.
//! Every other variant means a corrupt or unreadable file and is fatal.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// A file required by grading or display does not exist.
    #[error("Does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Structural CSV problem, including non-numeric `Question #` / `Time (s)`.
    #[error("malformed CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A column parsed as text but holds a value outside its domain.
    #[error(
        "invalid value '{value}' in column '{column}' for question {ordinal} in {}",
        path.display()
    )]
    InvalidField {
        path: PathBuf,
        ordinal: u32,
        column: &'static str,
        value: String,
    },
}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}
