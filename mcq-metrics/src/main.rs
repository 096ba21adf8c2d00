/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::io;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tokio::io::BufReader;
use tracing::{error, info};

use mcq_metrics::clock::SystemClock;
use mcq_metrics::config::{Overrides, QuizConfig};
use mcq_metrics::engine::{Prompter, SessionEngine};
use mcq_metrics::grading::grade_files;
use mcq_metrics::report::render_table;
use mcq_metrics::reporter::TerminalSink;
use mcq_metrics::storage::{self, StorageError};

// ── CLI argument definition ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Run a timed test session and write the results file.
    Test,
    /// Author an answer key.
    Key,
    /// Grade the results file against the answer key, then show it.
    Eval,
    /// Show the results file.
    Show,
}

/// Timed multiple-choice test sessions with answer-key grading.
///
/// Example:
///   mcq-metrics --mode test -s 1 -e 20 -t 35
///   mcq-metrics --mode key  -s 1 -e 20
///   mcq-metrics --mode eval -s 1 -e 20
#[derive(Debug, Parser)]
#[command(name = "mcq-metrics", about, long_about = None)]
struct Cli {
    /// Operation to perform.
    #[arg(short = 'm', long = "mode", value_enum, default_value_t = Mode::Show)]
    mode: Mode,

    /// First question index.
    #[arg(short = 's', long = "start-idx")]
    start_idx: Option<u32>,

    /// Last question index.
    #[arg(short = 'e', long = "stop-idx")]
    stop_idx: Option<u32>,

    /// Duration of the test in minutes.
    #[arg(short = 't', long = "dur")]
    duration_min: Option<u64>,

    /// Answer-key CSV file.
    #[arg(short = 'k', long = "key")]
    key_file: Option<PathBuf>,

    /// Results CSV file.
    #[arg(short = 'r', long = "result-file")]
    result_file: Option<PathBuf>,

    /// Path to a YAML session configuration file.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            start_idx: self.start_idx,
            stop_idx: self.stop_idx,
            duration_min: self.duration_min,
            result_file: self.result_file.clone(),
            key_file: self.key_file.clone(),
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    // Logs go to stderr and default to warnings only so they do not tear
    // through the countdown line on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    info!(mode = ?cli.mode, config = ?cli.config, "mcq-metrics starting");

    if let Err(e) = run(cli).await {
        match e.downcast_ref::<StorageError>() {
            // Reported to the operator as-is; nothing was written.
            Some(missing) if missing.is_not_found() => println!("{missing}"),
            _ => error!("{:#}", e),
        }
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => QuizConfig::load_from_file(path)?,
        None => QuizConfig::default(),
    };
    config.apply(cli.overrides());
    info!(?config, "Configuration");

    match cli.mode {
        Mode::Test => run_test(&config).await,
        Mode::Key => run_key(&config).await,
        Mode::Eval => run_eval(&config),
        Mode::Show => run_show(&config),
    }
}

fn engine(config: &QuizConfig) -> Result<SessionEngine> {
    Ok(SessionEngine::new(
        config.range()?,
        config.budget_s()?,
        Arc::new(SystemClock::new()),
    ))
}

// ── Modes ─────────────────────────────────────────────────────────────────────

async fn run_test(config: &QuizConfig) -> Result<()> {
    let engine = engine(config)?;
    let mut prompter = Prompter::new(BufReader::new(tokio::io::stdin()), io::stdout());

    let session = engine
        .run_test(&mut prompter, TerminalSink::default())
        .await?;

    storage::write_results(&config.result_file, &session.records)?;
    println!("Total time: {}s", session.total_elapsed_s);
    println!("Results exported to {}", config.result_file.display());
    Ok(())
}

async fn run_key(config: &QuizConfig) -> Result<()> {
    let engine = engine(config)?;
    let mut prompter = Prompter::new(BufReader::new(tokio::io::stdin()), io::stdout());

    let key = engine.author_key(&mut prompter).await?;

    storage::write_key(&config.key_file, &key)?;
    println!("Answer key exported to {}", config.key_file.display());
    Ok(())
}

fn run_eval(config: &QuizConfig) -> Result<()> {
    let records = grade_files(&config.result_file, &config.key_file, config.range()?)?;
    println!("Results exported to {}.", config.result_file.display());
    print!("{}", render_table(&records));
    Ok(())
}

fn run_show(config: &QuizConfig) -> Result<()> {
    let records = storage::read_results(&config.result_file)?;
    print!("{}", render_table(&records));
    Ok(())
}
