/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Countdown reporter – the once-per-second timer display.
//!
//! One reporter task lives for exactly one question:
//!
//! ```text
//! engine ──spawn──► reporter task ──render──► FrameSink
//!   │                    ▲
//!   └── watch<Signal> ───┘   Run / Pause / Stop (or sender dropped)
//!   └── stop().await ──────► JoinHandle joined before elapsed time is read
//! ```
//!
//! The watch channel is the only state shared with the engine. Once the task
//! observes `Stop` it leaves its loop without drawing another frame, and
//! [`ReporterHandle::stop`] does not return until the task has exited.

pub mod sink;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::clock::Clock;
pub use sink::{FrameSink, TerminalSink};

/// Interval between two frames.
pub const FRAME_PERIOD: Duration = Duration::from_secs(1);

// ── Frame ─────────────────────────────────────────────────────────────────────

/// One rendering of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub ordinal: u32,
    /// Seconds spent on the current question.
    pub question_elapsed_s: u64,
    /// Seconds left in the session budget. Negative once the budget is spent.
    pub remaining_s: i64,
}

impl fmt::Display for Frame {
    /// Negative budgets render arithmetically, e.g. `-1m -5s` for -65 s.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Question {} | Time spent: {}s | Time remaining: {}m {}s",
            self.ordinal,
            self.question_elapsed_s,
            self.remaining_s / 60,
            self.remaining_s % 60,
        )
    }
}

/// Timestamps a reporter needs to compute its frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub ordinal: u32,
    pub budget_s: u64,
    pub session_start: u64,
    pub question_start: u64,
}

impl Countdown {
    /// Remaining time saturates at the `i64` bounds instead of wrapping.
    pub fn frame_at(&self, now: u64) -> Frame {
        let budget = i64::try_from(self.budget_s).unwrap_or(i64::MAX);
        let session_elapsed = i64::try_from(now.saturating_sub(self.session_start))
            .unwrap_or(i64::MAX);
        Frame {
            ordinal: self.ordinal,
            question_elapsed_s: now.saturating_sub(self.question_start),
            remaining_s: budget.saturating_sub(session_elapsed),
        }
    }
}

// ── Control signal ────────────────────────────────────────────────────────────

/// Engine → reporter instruction carried on the watch channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Run,
    /// Keep ticking but draw nothing (the operator is re-typing an answer).
    Pause,
    Stop,
}

/// The reporter task could not be joined.
///
/// Treated as fatal by the engine: a task that may still be writing to the
/// display must not overlap the next question.
#[derive(Debug, Error)]
pub enum ReporterError {
    #[error("countdown reporter for question {ordinal} did not stop cleanly: {source}")]
    Join {
        ordinal: u32,
        #[source]
        source: JoinError,
    },
}

// ── Handle ────────────────────────────────────────────────────────────────────

/// Owner side of a running reporter task.
#[derive(Debug)]
pub struct ReporterHandle {
    ordinal: u32,
    signal: watch::Sender<Signal>,
    task: JoinHandle<()>,
}

impl ReporterHandle {
    /// Start a reporter task for one question.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<S: FrameSink>(countdown: Countdown, clock: Arc<dyn Clock>, sink: S) -> Self {
        let (signal, rx) = watch::channel(Signal::Run);
        debug!(ordinal = countdown.ordinal, "reporter spawned");
        let task = tokio::spawn(run(countdown, clock, sink, rx));
        Self {
            ordinal: countdown.ordinal,
            signal,
            task,
        }
    }

    pub fn pause(&self) {
        self.signal.send_replace(Signal::Pause);
    }

    pub fn resume(&self) {
        self.signal.send_replace(Signal::Run);
    }

    /// Signal the task to stop and wait until it has exited.
    pub async fn stop(self) -> Result<(), ReporterError> {
        self.signal.send_replace(Signal::Stop);
        self.task.await.map_err(|source| ReporterError::Join {
            ordinal: self.ordinal,
            source,
        })?;
        debug!(ordinal = self.ordinal, "reporter joined");
        Ok(())
    }
}

// ── Task body ─────────────────────────────────────────────────────────────────

async fn run<S: FrameSink>(
    countdown: Countdown,
    clock: Arc<dyn Clock>,
    mut sink: S,
    mut rx: watch::Receiver<Signal>,
) {
    let mut ticker = tokio::time::interval(FRAME_PERIOD);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut render_failed = false;

    loop {
        tokio::select! {
            // Control changes take priority over a tick that is ready at the
            // same time, so a pending Stop never lets one more frame through.
            biased;

            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let signal = *rx.borrow_and_update();
                match signal {
                    Signal::Stop => break,
                    Signal::Pause => sink.detach(),
                    Signal::Run => {}
                }
            }
            _ = ticker.tick() => {
                if *rx.borrow() != Signal::Run {
                    continue;
                }
                let frame = countdown.frame_at(clock.now());
                if let Err(e) = sink.render(&frame) {
                    // Display only; keep timing even if the terminal is gone.
                    if !render_failed {
                        warn!(ordinal = frame.ordinal, "countdown render failed: {e}");
                        render_failed = true;
                    }
                }
            }
        }
    }

    if let Err(e) = sink.finish() {
        warn!(ordinal = countdown.ordinal, "countdown finish failed: {e}");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
