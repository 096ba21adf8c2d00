/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Grading: reconcile a recorded session with an answer key.
//!
//! The join is by ordinal, never by row position, so the two files may list
//! their rows in any order. Quiz sizes are tens of questions, so a plain
//! nested scan is used instead of an index.

use std::fmt;
use std::path::Path;

use tracing::{debug, info};

use crate::record::{AnswerKey, AnswerRecord, Correctness, OrdinalRange};
use crate::storage::{self, StorageError};

/// Apply `key` to `records` in place.
///
/// For every key entry, every record with the same ordinal gets
/// `correct = key.correct` and `correctness = Correct` when the selected letter
/// equals it, `Incorrect` otherwise. Records without a key entry are left
/// untouched. Running this twice gives the same result as running it once.
pub fn grade(records: &mut [AnswerRecord], key: &AnswerKey) {
    let mut matched = 0usize;

    for entry in &key.entries {
        for record in records.iter_mut().filter(|r| r.ordinal == entry.ordinal) {
            record.correctness = if record.selected == entry.correct {
                Correctness::Correct
            } else {
                Correctness::Incorrect
            };
            record.correct = entry.correct;
            matched += 1;
        }
    }

    debug!(
        records = records.len(),
        key_entries = key.entries.len(),
        matched = matched,
        "grading join complete"
    );
    if matched < records.len() {
        info!(
            ungraded = records.len() - matched,
            "some records have no answer-key entry"
        );
    }
}

// ── Stored files ──────────────────────────────────────────────────────────────

/// Grade the results file at `results` against the key file at `key`,
/// rewrite it and return the graded records.
///
/// Only key entries whose ordinal lies in `range` are applied; records outside
/// it keep whatever state the file already had. Both files are checked before
/// either is read, so a missing file leaves the results file untouched.
pub fn grade_files(
    results: &Path,
    key: &Path,
    range: OrdinalRange,
) -> Result<Vec<AnswerRecord>, StorageError> {
    storage::require_file(results)?;
    storage::require_file(key)?;

    let mut answer_key = storage::read_key(key)?;
    answer_key.entries.retain(|entry| range.contains(entry.ordinal));
    let mut records = storage::read_results(results)?;

    grade(&mut records, &answer_key);
    storage::write_results(results, &records)?;
    info!(
        path = %results.display(),
        start = range.start(),
        stop = range.stop(),
        "results graded"
    );
    Ok(records)
}

// ── Scorecard ─────────────────────────────────────────────────────────────────

/// Summary of a (possibly graded) session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scorecard {
    pub total: usize,
    pub answered: usize,
    pub correct: usize,
    pub incorrect: usize,
    /// Records never reconciled with a key entry.
    pub ungraded: usize,
    /// Sum of per-question times.
    pub time_s: u64,
}

impl Scorecard {
    pub fn from_records(records: &[AnswerRecord]) -> Self {
        records.iter().fold(Self::default(), |mut s, r| {
            s.total += 1;
            s.time_s += r.elapsed_s;
            if r.is_answered() {
                s.answered += 1;
            }
            match r.correctness {
                Correctness::Correct => s.correct += 1,
                Correctness::Incorrect => s.incorrect += 1,
                Correctness::Unknown => s.ungraded += 1,
            }
            s
        })
    }

    pub fn graded(&self) -> usize {
        self.correct + self.incorrect
    }

    /// Share of graded questions answered correctly, `None` if nothing is graded.
    pub fn percent(&self) -> Option<f64> {
        match self.graded() {
            0 => None,
            n => Some(self.correct as f64 * 100.0 / n as f64),
        }
    }
}

impl fmt::Display for Scorecard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.percent() {
            Some(p) => write!(f, "Score: {}/{} ({:.1}%)", self.correct, self.graded(), p)?,
            None => write!(f, "Score: not graded")?,
        }
        write!(
            f,
            " | Answered: {}/{} | Incorrect: {} | Total time: {}s",
            self.answered, self.total, self.incorrect, self.time_s
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
