/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Line-based operator I/O with the answer validation loop.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::{debug, warn};

use super::SessionError;
use crate::record::{Choice, Response};
use crate::reporter::ReporterHandle;

const INVALID_PROMPT: &str = "Invalid input. Please enter A, B, C, D, or E, or 'quit' to exit:";

/// Reads answers from `R` and writes prompts to `W`.
pub struct Prompter<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R, W> Prompter<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(input: R, out: W) -> Self {
        Self {
            lines: input.lines(),
            out,
        }
    }

    /// Write one line to the operator and flush it.
    pub fn say(&mut self, message: impl AsRef<str>) -> Result<(), SessionError> {
        writeln!(self.out, "{}", message.as_ref())?;
        self.out.flush()?;
        Ok(())
    }

    /// Block until the operator gives a valid letter or aborts.
    ///
    /// Returns `None` on `quit` or when the input stream ends. Anything else is
    /// re-prompted indefinitely; while the operator re-types, `reporter` (if
    /// any) is paused so its frames do not land on the re-prompt line.
    pub async fn read_choice(
        &mut self,
        reporter: Option<&ReporterHandle>,
    ) -> Result<Option<Choice>, SessionError> {
        let mut paused = false;

        loop {
            let line = self.lines.next_line().await?;
            if paused {
                if let Some(r) = reporter {
                    r.resume();
                }
                paused = false;
            }

            let Some(line) = line else {
                warn!("input closed; treating as quit");
                return Ok(None);
            };

            match Response::parse(&line) {
                Response::Answer(choice) => return Ok(Some(choice)),
                Response::Abort => return Ok(None),
                Response::Invalid => {
                    debug!(input = %line, "rejected answer");
                    if let Some(r) = reporter {
                        r.pause();
                        paused = true;
                    }
                    self.say(INVALID_PROMPT)?;
                }
            }
        }
    }

    pub fn output(&self) -> &W {
        &self.out
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn prompter(input: &'static str) -> Prompter<&'static [u8], Vec<u8>> {
        Prompter::new(input.as_bytes(), Vec::new())
    }

    fn output(p: &Prompter<&'static [u8], Vec<u8>>) -> String {
        String::from_utf8(p.output().clone()).unwrap()
    }

    #[tokio::test]
    async fn valid_letter_is_returned_lowercased() {
        let mut p = prompter("D\n");
        assert_eq!(p.read_choice(None).await.unwrap(), Some(Choice::D));
        assert!(output(&p).is_empty());
    }

    #[tokio::test]
    async fn invalid_input_reprompts_until_valid() {
        let mut p = prompter("f\n\nhello\nb\n");
        assert_eq!(p.read_choice(None).await.unwrap(), Some(Choice::B));
        assert_eq!(output(&p).matches(INVALID_PROMPT).count(), 3);
    }

    #[tokio::test]
    async fn quit_and_end_of_input_both_abort() {
        let mut p = prompter("Quit\n");
        assert_eq!(p.read_choice(None).await.unwrap(), None);

        let mut p = prompter("");
        assert_eq!(p.read_choice(None).await.unwrap(), None);
    }

    #[tokio::test]
    async fn successive_reads_consume_successive_lines() {
        let mut p = prompter("a\nx\nc\nquit\n");
        assert_eq!(p.read_choice(None).await.unwrap(), Some(Choice::A));
        assert_eq!(p.read_choice(None).await.unwrap(), Some(Choice::C));
        assert_eq!(p.read_choice(None).await.unwrap(), None);
    }
}
