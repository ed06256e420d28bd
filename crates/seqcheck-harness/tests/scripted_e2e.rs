#![forbid(unsafe_code)]

//! End-to-end runs of the full pipeline over a scripted session: the test
//! plays the terminal emulator role by queueing feedback chunks, and the
//! on-disk corpus lives in a tempdir.

use std::fs;
use std::io;
use std::path::PathBuf;

use seqcheck_core::{ScriptedSession, wire};
use seqcheck_harness::{DriveConfig, ReportConfig, RunConfig, drive};

struct Workbench {
    dir: tempfile::TempDir,
}

impl Workbench {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir(dir.path().join("fixtures")).expect("fixtures dir");
        Self { dir }
    }

    fn fixtures(&self) -> PathBuf {
        self.dir.path().join("fixtures")
    }

    fn failures(&self) -> PathBuf {
        self.dir.path().join("failures")
    }

    fn add_case(&self, name: &str, input: &[u8], expected: Option<&[u8]>) {
        fs::write(self.fixtures().join(format!("{name}.in")), input).expect("write input");
        if let Some(bytes) = expected {
            fs::write(self.fixtures().join(format!("{name}.text")), bytes)
                .expect("write expected");
        }
    }

    fn config(&self) -> DriveConfig {
        DriveConfig {
            run: RunConfig {
                failures_dir: self.failures(),
            },
            report: ReportConfig::default(),
        }
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

fn offset_of(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[test]
fn matching_pair_passes_and_writes_no_artifact() {
    let bench = Workbench::new();
    bench.add_case("a", b"\x1b[1mA", Some(b"A-OK"));
    let mut session = ScriptedSession::new();
    session.push_feedback(b"A-OK".to_vec());

    let summary = drive(&mut session, &bench.fixtures(), &bench.config()).expect("drive");

    assert_eq!(summary.total, 1);
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.percent(), 100);
    assert!(!bench.failures().exists());

    let report = session.sent_bytes();
    assert!(contains(&report, b"1/1 (100%) tests passed"));
}

#[test]
fn injection_frames_follow_the_wire_protocol() {
    let bench = Workbench::new();
    bench.add_case("a", b"\x1b[2Ahello", Some(b"A-OK"));
    let mut session = ScriptedSession::new();
    session.push_feedback(b"A-OK".to_vec());

    drive(&mut session, &bench.fixtures(), &bench.config()).expect("drive");

    let sent = session.sent();
    assert_eq!(sent[0], wire::RESET);
    assert_eq!(sent[1], wire::title("a"));
    assert_eq!(sent[2], b"\x1b[2Ahello");
    assert_eq!(sent[3], wire::FEEDBACK_REQUEST);
}

#[test]
fn corrupted_expected_fails_and_artifact_holds_captured_bytes() {
    let bench = Workbench::new();
    // Golden transcript is one byte off from what the terminal reflects.
    bench.add_case("a", b"\x1b[1mA", Some(b"A-OK!"));
    let mut session = ScriptedSession::new();
    session.push_feedback(b"A-OK".to_vec());

    let summary = drive(&mut session, &bench.fixtures(), &bench.config()).expect("drive");

    assert_eq!(summary.passed, 0);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.percent(), 0);
    let artifact = fs::read(bench.failures().join("a")).expect("artifact");
    assert_eq!(artifact, b"A-OK");

    let report = session.sent_bytes();
    assert!(contains(&report, b"0/1 (0%) tests passed"));
}

#[test]
fn silent_device_skips_without_deflating_the_percentage() {
    let bench = Workbench::new();
    bench.add_case("a", b"A", Some(b"A-OK"));
    bench.add_case("b", b"B", Some(b"B-OK"));
    let mut session = ScriptedSession::new();
    session.push_feedback(Vec::new());
    session.push_feedback(b"B-OK".to_vec());

    let summary = drive(&mut session, &bench.fixtures(), &bench.config()).expect("drive");

    assert_eq!(summary.total, 2);
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.counted(), 1);
    assert_eq!(summary.percent(), 100);

    let report = session.sent_bytes();
    assert!(contains(&report, b"1/1 (100%) tests passed"));
    assert!(contains(&report, b"1 skipped (no feedback)"));
}

#[test]
fn missing_transcript_faults_that_case_and_the_run_continues() {
    let bench = Workbench::new();
    bench.add_case("a", b"A", None);
    bench.add_case("b", b"B", Some(b"B-OK"));
    let mut session = ScriptedSession::new();
    session.push_feedback(b"anything".to_vec());
    session.push_feedback(b"B-OK".to_vec());

    let summary = drive(&mut session, &bench.fixtures(), &bench.config()).expect("drive");

    assert_eq!(summary.faulted, 1);
    assert_eq!(summary.passed, 1);
    let report = session.sent_bytes();
    assert!(contains(&report, b"a.text"));
}

#[test]
fn device_error_mid_run_aborts() {
    let bench = Workbench::new();
    bench.add_case("a", b"A", Some(b"A-OK"));
    let mut session = ScriptedSession::new();
    session.push_feedback_error(io::Error::new(io::ErrorKind::BrokenPipe, "pty closed"));

    let err = drive(&mut session, &bench.fixtures(), &bench.config()).expect_err("must abort");
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
}

#[test]
fn cases_execute_in_byte_wise_path_order() {
    let bench = Workbench::new();
    for name in ["zed", "alpha", "mid"] {
        bench.add_case(name, name.as_bytes(), Some(b"ok"));
    }
    let mut session = ScriptedSession::new();
    for _ in 0..3 {
        session.push_feedback(b"ok".to_vec());
    }

    drive(&mut session, &bench.fixtures(), &bench.config()).expect("drive");

    let sent = session.sent_bytes();
    let alpha = offset_of(&sent, &wire::title("alpha")).expect("alpha title");
    let mid = offset_of(&sent, &wire::title("mid")).expect("mid title");
    let zed = offset_of(&sent, &wire::title("zed")).expect("zed title");
    assert!(alpha < mid && mid < zed);
}
