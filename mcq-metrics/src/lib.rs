/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! mcq-metrics – timed multiple-choice test sessions
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── clock         – monotonic integer-second time source
//! ├── record        – choices, answer records, answer keys, ordinal ranges
//! ├── reporter/     – concurrent countdown display task
//! ├── engine/       – interactive test loop and key authoring
//! ├── grading       – ordinal-keyed reconciliation + scorecard
//! ├── storage/      – results / answer-key CSV files
//! ├── report        – aligned table rendering
//! └── config/       – YAML session configuration
//! ```

pub mod clock;
pub mod config;
pub mod engine;
pub mod grading;
pub mod record;
pub mod report;
pub mod reporter;
pub mod storage;
