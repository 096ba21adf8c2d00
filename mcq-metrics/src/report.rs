/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Aligned text table for a results file.

use std::fmt::Write;

use crate::grading::Scorecard;
use crate::record::AnswerRecord;

const HEADER: &str = "Question # | Time (s) | Selected Answer | Correct Answer | Is Correct";

/// Render `records` as a right-aligned table followed by the score line.
pub fn render_table(records: &[AnswerRecord]) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{HEADER}");
    let _ = writeln!(out, "{}", "-".repeat(HEADER.len()));

    for r in records {
        let _ = writeln!(
            out,
            "{:>10} | {:>8} | {:>15} | {:>14} | {:>10}",
            r.ordinal,
            r.elapsed_s,
            r.selected.map(|c| c.as_str()).unwrap_or(""),
            r.correct.map(|c| c.as_str()).unwrap_or(""),
            r.correctness.as_str(),
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", Scorecard::from_records(records));
    out
}
