//! Integration test: structured JSONL run logs.
//!
//! Validates that:
//! 1. A run with an attached emitter produces a valid JSONL file.
//! 2. The log carries run_start, one case_complete per case, and
//!    run_complete with the exit code.
//! 3. Case outcomes in the log match the report.
//!
//! Run: cargo test -p rollcall --test structured_log_test

use std::path::PathBuf;

use rollcall::structured_log::{LogEmitter, LogLevel, validate_log_file};
use rollcall::{CaseStatus, DepSet, ResourceProbe, TestRunner, TestSuite, expect_eq};

struct SelectiveProbe;

impl ResourceProbe for SelectiveProbe {
    fn available(&self, id: &str) -> bool {
        id != "missing"
    }
}

fn log_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("rollcall_log_{tag}_{}.jsonl", std::process::id()))
}

#[test]
fn run_log_is_valid_jsonl_with_expected_events() {
    let mut suite: TestSuite<(), ()> = TestSuite::new("logged");
    suite.register_case("green", DepSet::new(), (), |_, ctx| {
        expect_eq!(ctx, 1, 1);
    });
    suite.register_case("red", DepSet::new(), (), |_, ctx| {
        expect_eq!(ctx, 1, 2);
    });
    let gated: DepSet = ["missing"].into_iter().collect();
    suite.register_case("held_back", gated, (), |_, ctx| {
        expect_eq!(ctx, 1, 1);
    });

    let path = log_path("events");
    let mut runner = TestRunner::new().with_probe(SelectiveProbe);
    runner.attach_log(LogEmitter::to_file(&path, "test-run").expect("temp log file"));
    runner.register_suite(suite);

    let report = runner.run(&mut Vec::<u8>::new()).expect("in-memory report sink");
    assert_eq!(report.exit_code(), 1);

    let entries = validate_log_file(&path).expect("every emitted line validates");
    std::fs::remove_file(&path).expect("clean up temp log");

    assert_eq!(entries.len(), 5, "run_start + 3 cases + run_complete");
    assert_eq!(entries[0].event, "run_start");
    assert_eq!(entries[4].event, "run_complete");
    assert_eq!(entries[4].exit_code, Some(1));

    let case_events: Vec<_> = entries
        .iter()
        .filter(|e| e.event == "case_complete")
        .collect();
    assert_eq!(case_events.len(), 3);
    for entry in &case_events {
        assert_eq!(entry.suite.as_deref(), Some("logged"));
        assert!(
            entry.trace_id.starts_with("test-run::"),
            "trace ids derive from the run id"
        );
    }
    assert_eq!(case_events[0].case.as_deref(), Some("green"));
    assert_eq!(case_events[0].outcome, Some(CaseStatus::Pass));
    assert_eq!(case_events[0].level, LogLevel::Info);
    assert_eq!(case_events[1].case.as_deref(), Some("red"));
    assert_eq!(case_events[1].outcome, Some(CaseStatus::Fail));
    assert_eq!(case_events[1].level, LogLevel::Error);
    assert_eq!(case_events[2].case.as_deref(), Some("held_back"));
    assert_eq!(case_events[2].outcome, Some(CaseStatus::Skip));
    assert_eq!(case_events[2].level, LogLevel::Warn);
}

#[test]
fn run_without_emitter_writes_no_log() {
    let mut runner = TestRunner::new();
    let mut suite: TestSuite<(), ()> = TestSuite::new("quiet");
    suite.register_case("noop", DepSet::new(), (), |_, ctx| {
        expect_eq!(ctx, 1, 1);
    });
    runner.register_suite(suite);
    let report = runner.run(&mut Vec::<u8>::new()).expect("in-memory report sink");
    assert!(report.success());
}
