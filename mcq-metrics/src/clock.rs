/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Integer-second time source shared by the engine and the countdown reporter.
//!
//! Only differences between two readings carry meaning, so the epoch is the
//! moment the clock was created rather than wall-clock time.

use tokio::time::Instant;

/// Monotonic, non-decreasing time source in whole seconds.
pub trait Clock: Send + Sync {
    /// Seconds elapsed since this clock's origin.
    fn now(&self) -> u64;
}

/// Production clock backed by the tokio monotonic clock.
///
/// Using `tokio::time::Instant` instead of `std::time::Instant` means the
/// clock follows a paused test runtime, which keeps timing tests exact.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        self.origin.elapsed().as_secs()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicU64, Ordering};

    use super::Clock;

    /// Clock that only moves when a test tells it to.
    #[derive(Debug, Default)]
    pub struct ManualClock {
        now: AtomicU64,
    }

    impl ManualClock {
        pub fn at(secs: u64) -> Self {
            Self {
                now: AtomicU64::new(secs),
            }
        }

        pub fn advance(&self, secs: u64) {
            self.now.fetch_add(secs, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> u64 {
            self.now.load(Ordering::SeqCst)
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
