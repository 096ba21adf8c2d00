/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Session engine – the interactive question loop.
//!
//! Test mode, per question:
//!
//! ```text
//! AwaitingAnswer ──letter──► stop+join reporter ──► Recorded ──► next ordinal
//!       │  ▲
//!       │  └── invalid input (re-prompt, reporter paused)
//!       └──── quit / EOF ──► stop+join reporter ──► Aborted (loop ends)
//! ```
//!
//! Finalization always back-fills every ordinal without a record with a blank
//! placeholder, so a session always covers its full range. A quit discards the
//! time spent on the question in progress.
//!
//! Key mode runs the same validation loop without timing or a reporter.

pub mod error;
pub mod prompt;

use std::io::Write;
use std::sync::Arc;

use tokio::io::AsyncBufRead;
use tracing::{info, warn};

use crate::clock::Clock;
use crate::record::{backfill, AnswerKey, AnswerKeyEntry, AnswerRecord, OrdinalRange, Session};
use crate::reporter::{Countdown, FrameSink, ReporterHandle};
pub use error::SessionError;
pub use prompt::Prompter;

/// Drives test sessions and key authoring over one ordinal range.
pub struct SessionEngine {
    range: OrdinalRange,
    budget_s: u64,
    clock: Arc<dyn Clock>,
}

impl SessionEngine {
    pub fn new(range: OrdinalRange, budget_s: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            range,
            budget_s,
            clock,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Test mode
    // ─────────────────────────────────────────────────────────────────────────

    /// Run a timed session and return the finalized records.
    ///
    /// A countdown reporter drawing into a clone of `sink` runs for each
    /// question and is always joined before that question's elapsed time is
    /// taken.
    pub async fn run_test<R, W, S>(
        &self,
        prompter: &mut Prompter<R, W>,
        sink: S,
    ) -> Result<Session, SessionError>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
        S: FrameSink,
    {
        let session_start = self.clock.now();
        let mut captured = Vec::with_capacity(self.range.len());

        info!(
            start = self.range.start(),
            stop = self.range.stop(),
            budget_s = self.budget_s,
            "test session started"
        );
        prompter.say(format!("Starting test with {} questions.", self.range.len()))?;

        for ordinal in self.range.iter() {
            let question_start = self.clock.now();
            prompter.say(format!("\nQuestion {ordinal}:"))?;

            let reporter = ReporterHandle::spawn(
                Countdown {
                    ordinal,
                    budget_s: self.budget_s,
                    session_start,
                    question_start,
                },
                Arc::clone(&self.clock),
                sink.clone(),
            );
            let answer = prompter.read_choice(Some(&reporter)).await;
            // Join before anything else touches the display, error or not.
            reporter.stop().await?;

            match answer? {
                Some(choice) => {
                    let elapsed_s = self.clock.now().saturating_sub(question_start);
                    info!(ordinal, elapsed_s, answer = %choice, "answer recorded");
                    captured.push(AnswerRecord::answered(ordinal, elapsed_s, choice));
                }
                None => {
                    warn!(ordinal, "test aborted by operator");
                    prompter.say(
                        "Exiting test. Blank answers will be assumed for unanswered questions.",
                    )?;
                    break;
                }
            }
        }

        let answered = captured.len();
        let records = backfill(self.range, captured);
        let total_elapsed_s = self.clock.now().saturating_sub(session_start);
        info!(
            answered,
            total = records.len(),
            total_elapsed_s,
            "test session finished"
        );

        Ok(Session {
            records,
            total_elapsed_s,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Key authoring mode
    // ─────────────────────────────────────────────────────────────────────────

    /// Collect one correct letter per ordinal; `quit` leaves the rest blank.
    pub async fn author_key<R, W>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<AnswerKey, SessionError>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut captured = Vec::with_capacity(self.range.len());

        for ordinal in self.range.iter() {
            prompter.say(format!(
                "Enter the answer for question {ordinal} or type 'quit' to exit:"
            ))?;
            match prompter.read_choice(None).await? {
                Some(choice) => captured.push(AnswerKeyEntry {
                    ordinal,
                    correct: Some(choice),
                }),
                None => {
                    warn!(ordinal, "answer key entry aborted by operator");
                    prompter.say(
                        "Exiting answer key entry. Blank answers will be assumed for unanswered questions.",
                    )?;
                    break;
                }
            }
        }

        info!(
            authored = captured.len(),
            total = self.range.len(),
            "answer key finished"
        );
        Ok(AnswerKey {
            entries: backfill(self.range, captured),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
