/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Core data structures for test sessions and answer keys.
//!
//! Two distinct record types share the ordinal as their join key:
//!
//! ```text
//! operator ──(test mode)──►  AnswerRecord  ──┐
//!                                            ├──(grading, by ordinal)──► graded AnswerRecord
//! author   ──(key mode)───►  AnswerKeyEntry ─┘
//! ```
//!
//! Letters and correctness are typed all the way through; strings only appear
//! at the CSV boundary in [`crate::storage`].

use std::fmt;
use std::str::FromStr;

// ── Choice alphabet ───────────────────────────────────────────────────────────

/// Reserved operator input that ends a session or key entry early.
///
/// Never stored as an answer.
pub const ABORT_TOKEN: &str = "quit";

/// One of the five multiple-choice letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Choice {
    A,
    B,
    C,
    D,
    E,
}

impl Choice {
    /// Lower-case storage form.
    pub fn as_str(self) -> &'static str {
        match self {
            Choice::A => "a",
            Choice::B => "b",
            Choice::C => "c",
            Choice::D => "d",
            Choice::E => "e",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of `a`–`e`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidChoice(pub String);

impl fmt::Display for InvalidChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not one of a, b, c, d, e", self.0)
    }
}

impl std::error::Error for InvalidChoice {}

impl FromStr for Choice {
    type Err = InvalidChoice;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(Choice::A),
            "b" => Ok(Choice::B),
            "c" => Ok(Choice::C),
            "d" => Ok(Choice::D),
            "e" => Ok(Choice::E),
            _ => Err(InvalidChoice(s.to_string())),
        }
    }
}

// ── Operator response ─────────────────────────────────────────────────────────

/// Classification of one line of operator input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Answer(Choice),
    Abort,
    /// Anything else – the caller re-prompts.
    Invalid,
}

impl Response {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case(ABORT_TOKEN) {
            return Response::Abort;
        }
        match trimmed.parse::<Choice>() {
            Ok(choice) => Response::Answer(choice),
            Err(_) => Response::Invalid,
        }
    }
}

// ── Correctness ───────────────────────────────────────────────────────────────

/// Tri-state grading result.
///
/// Every record starts as `Unknown`, including unanswered placeholders; only
/// grading moves it to `Correct` / `Incorrect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Correctness {
    #[default]
    Unknown,
    Correct,
    Incorrect,
}

impl Correctness {
    /// Value written to the `Is Correct` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Correctness::Unknown => "",
            Correctness::Correct => "Yes",
            Correctness::Incorrect => "No",
        }
    }

    /// Parse the `Is Correct` column. Returns `None` for unrecognised text.
    pub fn from_column(s: &str) -> Option<Self> {
        match s.trim() {
            "" => Some(Correctness::Unknown),
            "Yes" => Some(Correctness::Correct),
            "No" => Some(Correctness::Incorrect),
            _ => None,
        }
    }
}

impl fmt::Display for Correctness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Ordinal range ─────────────────────────────────────────────────────────────

/// Largest number of questions a single range may hold.
///
/// Sessions and keys allocate one slot per ordinal.
pub const MAX_QUESTIONS: u32 = 10_000;

/// Inclusive, validated question range `[start, stop]` with `1 <= start <= stop`
/// and at most [`MAX_QUESTIONS`] ordinals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrdinalRange {
    start: u32,
    stop: u32,
}

/// Why an ordinal range was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    ZeroStart,
    Inverted { start: u32, stop: u32 },
    TooLong { start: u32, stop: u32 },
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeError::ZeroStart => write!(f, "question ordinals are 1-based; start must be >= 1"),
            RangeError::Inverted { start, stop } => {
                write!(f, "stop index {stop} is before start index {start}")
            }
            RangeError::TooLong { start, stop } => write!(
                f,
                "range {start}..={stop} holds more than {MAX_QUESTIONS} questions"
            ),
        }
    }
}

impl std::error::Error for RangeError {}

impl OrdinalRange {
    pub fn new(start: u32, stop: u32) -> Result<Self, RangeError> {
        if start == 0 {
            return Err(RangeError::ZeroStart);
        }
        if stop < start {
            return Err(RangeError::Inverted { start, stop });
        }
        if stop - start >= MAX_QUESTIONS {
            return Err(RangeError::TooLong { start, stop });
        }
        Ok(Self { start, stop })
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn stop(&self) -> u32 {
        self.stop
    }

    /// Number of questions in the range (`stop - start + 1`).
    pub fn len(&self) -> usize {
        (self.stop - self.start) as usize + 1
    }

    /// A validated range always holds at least one question.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, ordinal: u32) -> bool {
        (self.start..=self.stop).contains(&ordinal)
    }

    pub fn iter(&self) -> std::ops::RangeInclusive<u32> {
        self.start..=self.stop
    }
}

// ── Records ───────────────────────────────────────────────────────────────────

/// One row of a test session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub ordinal: u32,
    /// Whole seconds spent on the question; `0` for unanswered questions.
    pub elapsed_s: u64,
    pub selected: Option<Choice>,
    /// Filled in by grading from the matching key entry.
    pub correct: Option<Choice>,
    pub correctness: Correctness,
}

impl AnswerRecord {
    /// Record for a question the operator answered during the session.
    pub fn answered(ordinal: u32, elapsed_s: u64, selected: Choice) -> Self {
        Self {
            ordinal,
            elapsed_s,
            selected: Some(selected),
            correct: None,
            correctness: Correctness::Unknown,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.selected.is_some()
    }
}

/// One row of an answer key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerKeyEntry {
    pub ordinal: u32,
    pub correct: Option<Choice>,
}

/// Anything keyed by ordinal that has an empty placeholder form.
pub trait Ordinal {
    fn ordinal(&self) -> u32;

    /// The empty record used to back-fill `ordinal`.
    fn blank(ordinal: u32) -> Self;
}

impl Ordinal for AnswerRecord {
    fn ordinal(&self) -> u32 {
        self.ordinal
    }

    fn blank(ordinal: u32) -> Self {
        Self {
            ordinal,
            elapsed_s: 0,
            selected: None,
            correct: None,
            correctness: Correctness::Unknown,
        }
    }
}

impl Ordinal for AnswerKeyEntry {
    fn ordinal(&self) -> u32 {
        self.ordinal
    }

    fn blank(ordinal: u32) -> Self {
        Self {
            ordinal,
            correct: None,
        }
    }
}

/// Pad `captured` with blank placeholders so every ordinal of `range` is
/// present exactly once, in ascending order.
///
/// Captured entries outside the range are dropped; if an ordinal was captured
/// twice the first capture wins.
pub fn backfill<T: Ordinal>(range: OrdinalRange, captured: Vec<T>) -> Vec<T> {
    let mut slots: Vec<Option<T>> = (0..range.len()).map(|_| None).collect();

    for item in captured {
        let ordinal = item.ordinal();
        if !range.contains(ordinal) {
            continue;
        }
        let slot = &mut slots[(ordinal - range.start()) as usize];
        if slot.is_none() {
            *slot = Some(item);
        }
    }

    range
        .iter()
        .zip(slots)
        .map(|(ordinal, slot)| slot.unwrap_or_else(|| T::blank(ordinal)))
        .collect()
}

// ── Aggregates ────────────────────────────────────────────────────────────────

/// A finalized test session: one record per ordinal plus total wall time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub records: Vec<AnswerRecord>,
    /// Seconds between session start and finalization.
    pub total_elapsed_s: u64,
}

/// A finalized answer key: one entry per ordinal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnswerKey {
    pub entries: Vec<AnswerKeyEntry>,
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Choice / Response ─────────────────────────────────────────────────────

    #[test]
    fn choice_parse_is_case_insensitive_and_stored_lowercase() {
        assert_eq!("C".parse::<Choice>().unwrap(), Choice::C);
        assert_eq!("e".parse::<Choice>().unwrap(), Choice::E);
        assert_eq!(Choice::C.to_string(), "c");
    }

    #[test]
    fn choice_rejects_letters_outside_alphabet() {
        assert!("f".parse::<Choice>().is_err());
        assert!("".parse::<Choice>().is_err());
        assert!("ab".parse::<Choice>().is_err());
    }

    #[test]
    fn response_classifies_abort_answer_and_noise() {
        assert_eq!(Response::parse("quit"), Response::Abort);
        assert_eq!(Response::parse("QUIT\n"), Response::Abort);
        assert_eq!(Response::parse(" b "), Response::Answer(Choice::B));
        assert_eq!(Response::parse("maybe"), Response::Invalid);
        assert_eq!(Response::parse(""), Response::Invalid);
    }

    // ── Correctness ───────────────────────────────────────────────────────────

    #[test]
    fn correctness_column_values() {
        for c in [Correctness::Unknown, Correctness::Correct, Correctness::Incorrect] {
            assert_eq!(Correctness::from_column(c.as_str()), Some(c));
        }
        assert_eq!(Correctness::from_column("Correct"), None);
    }

    // ── OrdinalRange ──────────────────────────────────────────────────────────

    #[test]
    fn range_rejects_zero_start_and_inversion() {
        assert_eq!(OrdinalRange::new(0, 3), Err(RangeError::ZeroStart));
        assert_eq!(
            OrdinalRange::new(5, 4),
            Err(RangeError::Inverted { start: 5, stop: 4 })
        );
    }

    #[test]
    fn range_length_is_bounded() {
        let widest = OrdinalRange::new(1, MAX_QUESTIONS).unwrap();
        assert_eq!(widest.len(), MAX_QUESTIONS as usize);

        assert_eq!(
            OrdinalRange::new(1, MAX_QUESTIONS + 1),
            Err(RangeError::TooLong {
                start: 1,
                stop: MAX_QUESTIONS + 1,
            })
        );
        assert!(OrdinalRange::new(1, u32::MAX).is_err());
        assert!(OrdinalRange::new(u32::MAX - 5, u32::MAX).is_ok());
    }

    #[test]
    fn range_len_is_inclusive() {
        assert_eq!(OrdinalRange::new(1, 1).unwrap().len(), 1);
        assert_eq!(OrdinalRange::new(11, 20).unwrap().len(), 10);
    }

    // ── backfill ──────────────────────────────────────────────────────────────

    #[test]
    fn backfill_pads_trailing_ordinals_with_blanks() {
        let range = OrdinalRange::new(1, 3).unwrap();
        let out = backfill(range, vec![AnswerRecord::answered(1, 12, Choice::A)]);

        assert_eq!(out.len(), 3);
        assert_eq!(out[0], AnswerRecord::answered(1, 12, Choice::A));
        assert_eq!(out[1], AnswerRecord::blank(2));
        assert_eq!(out[2], AnswerRecord::blank(3));
    }

    #[test]
    fn backfill_fills_gaps_and_sorts() {
        let range = OrdinalRange::new(4, 7).unwrap();
        let out = backfill(
            range,
            vec![
                AnswerKeyEntry {
                    ordinal: 6,
                    correct: Some(Choice::D),
                },
                AnswerKeyEntry {
                    ordinal: 4,
                    correct: Some(Choice::B),
                },
            ],
        );

        let ordinals: Vec<u32> = out.iter().map(|e| e.ordinal).collect();
        assert_eq!(ordinals, vec![4, 5, 6, 7]);
        assert_eq!(out[1], AnswerKeyEntry::blank(5));
        assert_eq!(out[2].correct, Some(Choice::D));
    }

    #[test]
    fn backfill_drops_out_of_range_and_duplicate_entries() {
        let range = OrdinalRange::new(1, 2).unwrap();
        let out = backfill(
            range,
            vec![
                AnswerRecord::answered(2, 5, Choice::C),
                AnswerRecord::answered(2, 9, Choice::E),
                AnswerRecord::answered(9, 1, Choice::A),
            ],
        );

        assert_eq!(out.len(), 2);
        assert_eq!(out[1].selected, Some(Choice::C), "first capture wins");
    }

    #[test]
    fn blank_record_is_fully_empty() {
        let r = AnswerRecord::blank(8);
        assert_eq!(r.elapsed_s, 0);
        assert!(r.selected.is_none());
        assert!(r.correct.is_none());
        assert_eq!(r.correctness, Correctness::Unknown);
        assert!(!r.is_answered());
    }
}
