#![forbid(unsafe_code)]

//! seqcheck — drive a terminal emulator with recorded escape-sequence
//! fixtures and diff the reflected output against golden transcripts.
//!
//! The binary owns the raw-mode guard for the whole run: acquire before the
//! first case, restore on every exit path. Everything between discovery and
//! the summary line lives in `seqcheck-harness`.

mod cli;

use std::process::ExitCode;

#[cfg(unix)]
fn main() -> ExitCode {
    let opts = cli::Opts::parse();
    if let Err(err) = init_tracing(&opts) {
        eprintln!("seqcheck: cannot open log file: {err}");
        return ExitCode::FAILURE;
    }

    match run(&opts) {
        // Failures and faults exit nonzero; skipped cases alone do not.
        Ok(summary) => {
            if summary.failed == 0 && summary.faulted == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            eprintln!("seqcheck: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(unix)]
fn run(opts: &cli::Opts) -> Result<seqcheck_harness::RunSummary, seqcheck_core::SessionError> {
    use seqcheck_core::{RawModeGuard, TtySession};
    use seqcheck_harness::{DriveConfig, ReportConfig, RunConfig, drive};

    // Raw mode comes first: a non-terminal stdin/stdout is fatal before any
    // case executes, and the guard restores on drop, panic, and signals.
    let guard = RawModeGuard::acquire()?;
    let mut session = TtySession::new();
    let config = DriveConfig {
        run: RunConfig {
            failures_dir: opts.failures.clone(),
        },
        report: ReportConfig {
            rows_per_page: opts.rows_per_page,
        },
    };
    let summary = drive(&mut session, &opts.fixtures, &config)?;
    guard.restore();
    Ok(summary)
}

/// Route diagnostics to a file, never to the terminal under test: log lines
/// on the device would be echoed into the capture loop.
#[cfg(unix)]
fn init_tracing(opts: &cli::Opts) -> std::io::Result<()> {
    use std::sync::Arc;

    let Some(path) = opts.log.as_deref() else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let filter = tracing_subscriber::EnvFilter::try_from_env("SEQCHECK_LOG_FILTER")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[cfg(not(unix))]
fn main() -> ExitCode {
    eprintln!("seqcheck drives a Unix terminal device; this platform has no termios support.");
    ExitCode::FAILURE
}
