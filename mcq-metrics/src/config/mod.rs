//! Session configuration loading and merging.
//!
//! Values come from three layers, later layers winning:
//! built-in defaults → optional YAML file → command-line flags.
//!
//! The expected YAML structure is (every key optional):
//! ```yaml
//! start_idx: 1
//! stop_idx: 10
//! duration_min: 30
//! result_file: result_file.csv
//! key_file: answer_key_file.csv
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::record::OrdinalRange;

// ── Defaults ──────────────────────────────────────────────────────────────────

pub const DEFAULT_START_IDX: u32 = 1;
pub const DEFAULT_STOP_IDX: u32 = 2;
pub const DEFAULT_DURATION_MIN: u64 = 5;
pub const DEFAULT_RESULT_FILE: &str = "result_file.csv";
pub const DEFAULT_KEY_FILE: &str = "answer_key_file.csv";

// ── Private YAML deserialization type ─────────────────────────────────────────

/// Maps directly onto the YAML file layout; absent keys stay `None`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct QuizConfigFile {
    start_idx: Option<u32>,
    stop_idx: Option<u32>,
    duration_min: Option<u64>,
    result_file: Option<PathBuf>,
    key_file: Option<PathBuf>,
}

// ── Overrides ─────────────────────────────────────────────────────────────────

/// Values supplied on the command line. `None` keeps the lower layer's value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub start_idx: Option<u32>,
    pub stop_idx: Option<u32>,
    pub duration_min: Option<u64>,
    pub result_file: Option<PathBuf>,
    pub key_file: Option<PathBuf>,
}

// ── QuizConfig ────────────────────────────────────────────────────────────────

/// Fully merged configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    pub start_idx: u32,
    pub stop_idx: u32,
    /// Session budget in minutes. Display only; never enforced.
    pub duration_min: u64,
    pub result_file: PathBuf,
    pub key_file: PathBuf,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            start_idx: DEFAULT_START_IDX,
            stop_idx: DEFAULT_STOP_IDX,
            duration_min: DEFAULT_DURATION_MIN,
            result_file: PathBuf::from(DEFAULT_RESULT_FILE),
            key_file: PathBuf::from(DEFAULT_KEY_FILE),
        }
    }
}

impl QuizConfig {
    /// Defaults overlaid with whatever keys `path` sets.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid YAML, or
    /// contains unknown keys.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading session configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open configuration file: {}", path.display()))?;

        // An empty document deserializes to unit, not to a map.
        let file: QuizConfigFile = if content.trim().is_empty() {
            QuizConfigFile::default()
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?
        };

        let mut config = Self::default();
        config.apply(Overrides {
            start_idx: file.start_idx,
            stop_idx: file.stop_idx,
            duration_min: file.duration_min,
            result_file: file.result_file,
            key_file: file.key_file,
        });
        debug!(?config, "configuration file applied");
        Ok(config)
    }

    /// Replace every field for which `overrides` carries a value.
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(v) = overrides.start_idx {
            self.start_idx = v;
        }
        if let Some(v) = overrides.stop_idx {
            self.stop_idx = v;
        }
        if let Some(v) = overrides.duration_min {
            self.duration_min = v;
        }
        if let Some(v) = overrides.result_file {
            self.result_file = v;
        }
        if let Some(v) = overrides.key_file {
            self.key_file = v;
        }
    }

    /// Validated question range.
    pub fn range(&self) -> Result<OrdinalRange> {
        OrdinalRange::new(self.start_idx, self.stop_idx).context("Invalid question range")
    }

    /// Session budget in seconds.
    ///
    /// # Errors
    /// Returns an error if the budget does not fit the signed countdown.
    pub fn budget_s(&self) -> Result<u64> {
        self.duration_min
            .checked_mul(60)
            .filter(|&secs| i64::try_from(secs).is_ok())
            .with_context(|| {
                format!("Session duration of {} minutes is too long", self.duration_min)
            })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
