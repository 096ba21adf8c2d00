/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use thiserror::Error;

use crate::reporter::ReporterError;

/// Failures that end an interactive session.
///
/// Invalid input and `quit` are not errors; they are handled inside the
/// question loop.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading the operator's answer or writing a prompt failed.
    #[error("operator I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The countdown reporter could not be joined; the session cannot go on.
    #[error(transparent)]
    Reporter(#[from] ReporterError),
}
