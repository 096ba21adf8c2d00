/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Render targets for countdown frames.

use std::io::{self, Write};

use crossterm::{
    cursor::{MoveToPreviousLine, RestorePosition, SavePosition},
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};

use super::Frame;

/// Where the reporter draws its frames.
///
/// Each `render` replaces the previous frame; the sink decides how.
/// A fresh clone is handed to every question's reporter task.
pub trait FrameSink: Clone + Send + 'static {
    fn render(&mut self, frame: &Frame) -> io::Result<()>;

    /// The reporter was paused; whatever was drawn may have scrolled away.
    fn detach(&mut self) {}

    /// Called once when the reporter exits, after the last frame.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Draws frames on a stdout line of their own, just above the input line.
///
/// The first frame is printed followed by a newline, so the operator types
/// underneath it. Later frames jump up to that line and back, leaving
/// whatever the operator has typed so far untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalSink {
    anchored: bool,
}

impl FrameSink for TerminalSink {
    fn render(&mut self, frame: &Frame) -> io::Result<()> {
        let mut out = io::stdout().lock();
        draw(&mut out, frame, self.anchored)?;
        self.anchored = true;
        Ok(())
    }

    fn detach(&mut self) {
        self.anchored = false;
    }
}

fn draw<W: Write>(out: &mut W, frame: &Frame, anchored: bool) -> io::Result<()> {
    if anchored {
        queue!(
            out,
            SavePosition,
            MoveToPreviousLine(1),
            Clear(ClearType::CurrentLine),
            Print(frame),
            RestorePosition
        )?;
    } else {
        queue!(out, Print(frame), Print("\n"))?;
    }
    out.flush()
}

#[cfg(test)]
pub(crate) mod testing {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::FrameSink;
    use crate::reporter::Frame;

    /// Collects frames in memory; clones share the same buffer.
    #[derive(Debug, Clone, Default)]
    pub struct RecordingSink {
        frames: Arc<Mutex<Vec<Frame>>>,
        detached: Arc<Mutex<usize>>,
        finished: Arc<Mutex<usize>>,
    }

    impl RecordingSink {
        pub fn frames(&self) -> Vec<Frame> {
            self.frames.lock().unwrap().clone()
        }

        pub fn detach_count(&self) -> usize {
            *self.detached.lock().unwrap()
        }

        pub fn finish_count(&self) -> usize {
            *self.finished.lock().unwrap()
        }
    }

    impl FrameSink for RecordingSink {
        fn render(&mut self, frame: &Frame) -> io::Result<()> {
            self.frames.lock().unwrap().push(*frame);
            Ok(())
        }

        fn detach(&mut self) {
            *self.detached.lock().unwrap() += 1;
        }

        fn finish(&mut self) -> io::Result<()> {
            *self.finished.lock().unwrap() += 1;
            Ok(())
        }
    }
}
