//! Per-case outcomes and the aggregate run summary.
//!
//! `CaseOutcome` is the machine-parsable source of truth for a case; the
//! report's colors and labels are a rendering of it, never the other way
//! around.

use crate::corpus::FixtureCase;

/// Outcome of running one fixture case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    /// Feedback matched the golden transcript byte for byte.
    Passed,
    /// Non-empty feedback differed from the transcript; `actual` holds the
    /// captured bytes that were persisted as the failure artifact.
    Failed { actual: Vec<u8> },
    /// The terminal yielded zero bytes of feedback. The environment cannot
    /// prove or disprove conformance for this case, so it is recorded as
    /// skipped rather than passed or failed.
    Skipped,
    /// Per-case hard error (e.g. unreadable expected transcript). Reported;
    /// the run continues with the next case.
    Faulted { reason: String },
}

impl CaseOutcome {
    /// Report label. Failures shout, everything else stays lowercase.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed { .. } => "FAILED",
            Self::Skipped => "skipped",
            Self::Faulted { .. } => "fault",
        }
    }

    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// One case plus its outcome, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureResult {
    pub case: FixtureCase,
    pub outcome: CaseOutcome,
}

/// Aggregate counts for a run. Derived once from the result list, never
/// mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub faulted: usize,
}

impl RunSummary {
    /// Tally outcomes. The four counts always partition `total`.
    #[must_use]
    pub fn from_results(results: &[FixtureResult]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Self::default()
        };
        for result in results {
            match result.outcome {
                CaseOutcome::Passed => summary.passed += 1,
                CaseOutcome::Failed { .. } => summary.failed += 1,
                CaseOutcome::Skipped => summary.skipped += 1,
                CaseOutcome::Faulted { .. } => summary.faulted += 1,
            }
        }
        summary
    }

    /// Denominator for the coverage percentage: skipped cases are excluded
    /// because the device never answered for them. The skipped count is
    /// still shown next to the percentage so the exclusion is visible.
    #[must_use]
    pub fn counted(&self) -> usize {
        self.total - self.skipped
    }

    /// Truncating integer percentage of passed over counted cases.
    #[must_use]
    pub fn percent(&self) -> usize {
        let counted = self.counted();
        if counted == 0 {
            0
        } else {
            self.passed * 100 / counted
        }
    }
}
