//! Sequence injection, feedback collection, and golden comparison.
//!
//! One terminal interaction per case, in a fixed frame order:
//!
//! 1. `wire::RESET` — known display state, no leakage from the prior case;
//! 2. `wire::title(name)`, the fixture bytes verbatim, `wire::FEEDBACK_REQUEST`;
//! 3. one blocking `read_feedback` on the same device.
//!
//! The comparison is exact: no trimming, no line-ending conversion —
//! byte-for-byte equality is the conformance bar being tested. On mismatch
//! the captured bytes are persisted under the failures directory, keyed by
//! case name, overwriting any earlier artifact.

use std::fs;
use std::io;
use std::path::PathBuf;

use seqcheck_core::{TerminalSession, wire};
use tracing::{debug, info, warn};

use crate::corpus::FixtureCase;
use crate::outcome::{CaseOutcome, FixtureResult};

/// Runner configuration.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Where mismatch artifacts land; created on first use.
    pub failures_dir: PathBuf,
}

/// Run every case in order over one exclusively-owned session.
///
/// Per-case conditions become outcomes; device I/O errors abort the run —
/// once the device is gone, further captures would be garbage.
///
/// # Errors
///
/// Propagates session I/O failures and artifact-write failures.
pub fn run_corpus(
    session: &mut dyn TerminalSession,
    cases: Vec<FixtureCase>,
    config: &RunConfig,
) -> io::Result<Vec<FixtureResult>> {
    let mut results = Vec::with_capacity(cases.len());
    for case in cases {
        let outcome = run_case(session, &case, config)?;
        results.push(FixtureResult { case, outcome });
    }
    Ok(results)
}

/// Inject one case, collect its feedback, and compare against the golden
/// transcript.
///
/// # Errors
///
/// Fails on device I/O or artifact-write errors; everything scoped to the
/// case itself is reported through the returned outcome.
pub fn run_case(
    session: &mut dyn TerminalSession,
    case: &FixtureCase,
    config: &RunConfig,
) -> io::Result<CaseOutcome> {
    let input = match fs::read(case.input_path()) {
        Ok(bytes) => bytes,
        Err(err) => {
            return Ok(CaseOutcome::Faulted {
                reason: format!("input fixture {}: {err}", case.input_path().display()),
            });
        }
    };

    session.send(wire::RESET)?;
    session.send(&wire::title(case.name()))?;
    session.send(&input)?;
    session.send(wire::FEEDBACK_REQUEST)?;
    debug!(case = case.name(), bytes = input.len(), "fixture injected");

    let actual = session.read_feedback()?;
    if actual.is_empty() {
        // A silent device cannot prove or disprove conformance; the case is
        // excluded from the tally rather than marked either way.
        warn!(case = case.name(), "no feedback from terminal, case skipped");
        return Ok(CaseOutcome::Skipped);
    }
    debug!(case = case.name(), bytes = actual.len(), "feedback collected");

    compare(case, actual, config)
}

/// Exact comparison plus artifact persistence on mismatch.
fn compare(
    case: &FixtureCase,
    actual: Vec<u8>,
    config: &RunConfig,
) -> io::Result<CaseOutcome> {
    let expected_path = case.expected_path();
    let expected = match fs::read(&expected_path) {
        Ok(bytes) => bytes,
        Err(err) => {
            return Ok(CaseOutcome::Faulted {
                reason: format!("expected transcript {}: {err}", expected_path.display()),
            });
        }
    };

    if actual == expected {
        return Ok(CaseOutcome::Passed);
    }

    let artifact = config.failures_dir.join(case.name());
    fs::create_dir_all(&config.failures_dir)?;
    fs::write(&artifact, &actual)?;
    info!(
        case = case.name(),
        artifact = %artifact.display(),
        "mismatch, captured output persisted"
    );
    Ok(CaseOutcome::Failed { actual })
}
