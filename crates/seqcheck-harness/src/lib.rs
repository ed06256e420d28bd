#![forbid(unsafe_code)]

//! Conformance engine: fixture corpus, injection/collection, golden
//! comparison, and the paginated report.
//!
//! # Role in seqcheck
//! `seqcheck-harness` turns a directory of recorded fixture pairs into a
//! deterministic pass/fail report. It is device-agnostic: every byte in or
//! out goes through a `seqcheck_core::TerminalSession`, so the whole engine
//! runs unmodified against a scripted session in tests.
//!
//! # Pipeline
//! [`corpus::discover`] → [`runner::run_corpus`] → [`outcome::RunSummary`] →
//! [`report::render`], tied together by [`drive`], which the `seqcheck`
//! binary calls with the real terminal session.

pub mod corpus;
pub mod outcome;
pub mod report;
pub mod runner;

use std::io;
use std::path::Path;

use seqcheck_core::TerminalSession;
use tracing::info;

pub use corpus::FixtureCase;
pub use outcome::{CaseOutcome, FixtureResult, RunSummary};
pub use report::ReportConfig;
pub use runner::RunConfig;

/// Configuration for one full harness run.
#[derive(Debug, Clone)]
pub struct DriveConfig {
    pub run: RunConfig,
    pub report: ReportConfig,
}

/// Run the whole pipeline over one fixture directory: discover, inject and
/// collect every case, render the paginated report, and return the summary.
///
/// Results are threaded through explicitly; there is no process-wide report
/// state anywhere in the engine.
///
/// # Errors
///
/// Propagates corpus discovery failures and device I/O errors. Per-case
/// conditions (missing transcript, mismatch, silent device) are recorded in
/// the results, not raised.
pub fn drive(
    session: &mut dyn TerminalSession,
    fixtures_dir: &Path,
    config: &DriveConfig,
) -> io::Result<RunSummary> {
    let cases = corpus::discover(fixtures_dir)?;
    info!(
        fixtures = %fixtures_dir.display(),
        cases = cases.len(),
        "corpus discovered"
    );
    let results = runner::run_corpus(session, cases, &config.run)?;
    let summary = RunSummary::from_results(&results);
    report::render(session, &results, &summary, &config.report)?;
    info!(
        total = summary.total,
        passed = summary.passed,
        failed = summary.failed,
        skipped = summary.skipped,
        faulted = summary.faulted,
        "run complete"
    );
    Ok(summary)
}
