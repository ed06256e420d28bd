//! Paginated pass/fail report rendering.
//!
//! Case labels render two per row in fixed-width columns. After every
//! configurable block of rows the renderer pauses for one keypress so the
//! report survives a bounded-height terminal without losing scrollback.
//! Colors are display only; `CaseOutcome` stays the source of truth.

use std::io;

use seqcheck_core::TerminalSession;

use crate::outcome::{CaseOutcome, FixtureResult, RunSummary};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const MAGENTA: &str = "\x1b[35m";
const SGR_RESET: &str = "\x1b[0m";

/// Visible width of one report column; two columns fit an 80-cell line.
const CELL_WIDTH: usize = 38;

const MORE_PROMPT: &str = "-- more (press any key) --";

/// Renderer configuration.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Rows between pagination pauses; 0 disables pagination.
    pub rows_per_page: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { rows_per_page: 25 }
    }
}

/// Render the report onto the session's terminal: paired labels, per-case
/// fault reasons, and the final summary line.
///
/// # Errors
///
/// Fails when writing to the device or waiting for a pagination keypress
/// fails.
pub fn render(
    session: &mut dyn TerminalSession,
    results: &[FixtureResult],
    summary: &RunSummary,
    config: &ReportConfig,
) -> io::Result<()> {
    let rows: Vec<&[FixtureResult]> = results.chunks(2).collect();
    for (index, row) in rows.iter().enumerate() {
        let mut line = String::new();
        for result in *row {
            line.push_str(&cell(result));
        }
        line.push('\n');
        session.send(line.as_bytes())?;

        // Block arithmetic is integer division on row counts; pause only
        // between blocks, never after the final row.
        let at_block_end = config.rows_per_page > 0 && (index + 1) % config.rows_per_page == 0;
        if at_block_end && index + 1 < rows.len() {
            session.send(MORE_PROMPT.as_bytes())?;
            session.wait_ack()?;
            session.send(b"\r\x1b[K")?;
        }
    }

    for result in results {
        if let CaseOutcome::Faulted { reason } = &result.outcome {
            let line = format!(
                "{MAGENTA}fault{SGR_RESET} {name}: {reason}\n",
                name = result.case.name()
            );
            session.send(line.as_bytes())?;
        }
    }

    session.send(summary_line(summary).as_bytes())
}

/// One fixed-width report cell: `name: label`, label colored by outcome.
/// Padding is computed on the visible text so SGR codes do not skew the
/// columns.
fn cell(result: &FixtureResult) -> String {
    let name = result.case.name();
    let label = result.outcome.label();
    let color = match result.outcome {
        CaseOutcome::Passed => GREEN,
        CaseOutcome::Failed { .. } => RED,
        CaseOutcome::Skipped => YELLOW,
        CaseOutcome::Faulted { .. } => MAGENTA,
    };
    let visible = name.len() + 2 + label.len();
    let pad = CELL_WIDTH.saturating_sub(visible);
    format!("{name}: {color}{label}{SGR_RESET}{empty:pad$}", empty = "")
}

fn summary_line(summary: &RunSummary) -> String {
    let mut line = format!(
        "\n{passed}/{counted} ({percent}%) tests passed",
        passed = summary.passed,
        counted = summary.counted(),
        percent = summary.percent()
    );
    if summary.skipped > 0 {
        line.push_str(&format!(
            ", {skipped} skipped (no feedback)",
            skipped = summary.skipped
        ));
    }
    if summary.faulted > 0 {
        line.push_str(&format!(", {faulted} errored", faulted = summary.faulted));
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use seqcheck_core::ScriptedSession;

    use crate::corpus::FixtureCase;

    use super::*;

    fn result(name: &str, outcome: CaseOutcome) -> FixtureResult {
        FixtureResult {
            case: FixtureCase::new(PathBuf::from(format!("{name}.in"))),
            outcome,
        }
    }

    fn rendered(results: &[FixtureResult], rows_per_page: usize) -> (String, usize) {
        let summary = RunSummary::from_results(results);
        let mut session = ScriptedSession::new();
        let config = ReportConfig { rows_per_page };
        render(&mut session, results, &summary, &config).expect("render");
        let acks = session.acks();
        (String::from_utf8(session.sent_bytes()).expect("utf8"), acks)
    }

    #[test]
    fn labels_pair_up_two_per_row() {
        let results = vec![
            result("a", CaseOutcome::Passed),
            result("b", CaseOutcome::Failed { actual: vec![1] }),
            result("c", CaseOutcome::Passed),
        ];
        let (out, _) = rendered(&results, 25);
        let first_line = out.lines().next().expect("row");
        assert!(first_line.contains("a: "));
        assert!(first_line.contains("b: "));
        assert!(out.lines().nth(1).expect("second row").contains("c: "));
    }

    #[test]
    fn cells_pad_on_visible_width() {
        let passed = cell(&result("a", CaseOutcome::Passed));
        let failed = cell(&result("a", CaseOutcome::Failed { actual: vec![] }));
        let strip = |s: &str| {
            s.replace(GREEN, "")
                .replace(RED, "")
                .replace(SGR_RESET, "")
        };
        assert_eq!(strip(&passed).len(), CELL_WIDTH);
        assert_eq!(strip(&failed).len(), CELL_WIDTH);
    }

    #[test]
    fn pagination_pauses_between_blocks_only() {
        // Five cases make three rows; one row per block pauses twice, never
        // after the last row.
        let results: Vec<FixtureResult> = (0..5)
            .map(|i| result(&format!("case{i}"), CaseOutcome::Passed))
            .collect();
        let (out, acks) = rendered(&results, 1);
        assert_eq!(acks, 2);
        assert_eq!(out.matches(MORE_PROMPT).count(), 2);
    }

    #[test]
    fn pagination_disabled_with_zero_rows() {
        let results: Vec<FixtureResult> = (0..10)
            .map(|i| result(&format!("case{i}"), CaseOutcome::Passed))
            .collect();
        let (_, acks) = rendered(&results, 0);
        assert_eq!(acks, 0);
    }

    #[test]
    fn summary_line_reports_counts_and_percent() {
        let results = vec![
            result("a", CaseOutcome::Passed),
            result("b", CaseOutcome::Failed { actual: vec![1] }),
            result("c", CaseOutcome::Skipped),
        ];
        let (out, _) = rendered(&results, 25);
        assert!(out.contains("1/2 (50%) tests passed"), "report: {out}");
        assert!(out.contains("1 skipped (no feedback)"), "report: {out}");
    }

    #[test]
    fn fault_reasons_are_spelled_out() {
        let results = vec![result(
            "a",
            CaseOutcome::Faulted {
                reason: "expected transcript a.text: missing".into(),
            },
        )];
        let (out, _) = rendered(&results, 25);
        assert!(out.contains("a: expected transcript a.text: missing"));
        assert!(out.contains("1 errored"));
    }
}
