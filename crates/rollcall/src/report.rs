//! Result aggregation and text rendering for a completed run.
//!
//! The report is human-readable text only; the structured JSONL log is the
//! machine-readable channel for run data.

use std::io::{self, Write};

use crate::case::{CaseRecord, CaseStatus};
use crate::config::ExitPolicy;
use crate::suite::{Counters, Suite};

/// Outcome of one case, captured for reporting after its suite ran.
#[derive(Debug, Clone)]
pub struct CaseReport {
    pub name: String,
    pub status: CaseStatus,
    pub messages: Vec<String>,
}

impl CaseReport {
    fn from_record(record: &CaseRecord) -> Self {
        Self {
            name: record.name().to_string(),
            status: record.status(),
            messages: record.messages().to_vec(),
        }
    }
}

/// Outcome of one suite: counters plus every case in registration order.
#[derive(Debug, Clone)]
pub struct SuiteReport {
    pub name: String,
    pub counters: Counters,
    pub cases: Vec<CaseReport>,
}

impl SuiteReport {
    pub(crate) fn collect(suite: &dyn Suite) -> Self {
        Self {
            name: suite.name().to_string(),
            counters: suite.counters(),
            cases: suite
                .case_records()
                .into_iter()
                .map(CaseReport::from_record)
                .collect(),
        }
    }
}

/// Aggregated outcome of a full run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub suites: Vec<SuiteReport>,
    pub totals: Counters,
    success: bool,
}

impl RunReport {
    pub(crate) fn new(suites: Vec<SuiteReport>, policy: ExitPolicy) -> Self {
        let mut totals = Counters::default();
        for suite in &suites {
            totals.merge(suite.counters);
        }
        let success = match policy {
            ExitPolicy::FailuresOnly => totals.failed == 0,
            ExitPolicy::FailuresOrSkips => totals.failed == 0 && totals.skipped == 0,
        };
        Self {
            suites,
            totals,
            success,
        }
    }

    #[must_use]
    pub fn total_cases(&self) -> usize {
        self.totals.total()
    }

    /// Whether the run met the exit policy it was configured with.
    #[must_use]
    pub fn success(&self) -> bool {
        self.success
    }

    /// Process exit status: 0 on success, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(!self.success)
    }
}

/// Print every stored failure message for every suite with at least one
/// failed case, in suite-then-case-then-message order. Nothing is printed
/// when no suite failed.
pub fn write_failures(out: &mut dyn Write, report: &RunReport) -> io::Result<()> {
    let mut first = true;
    for suite in &report.suites {
        if suite.counters.failed == 0 {
            continue;
        }
        if first {
            writeln!(out, "\n-----------FAILURES:-----------")?;
            first = false;
        }
        for case in &suite.cases {
            for message in &case.messages {
                writeln!(out, "\n{message}")?;
            }
        }
    }
    Ok(())
}

/// Print each skipped case's name under its owning suite's name. Nothing is
/// printed when no case was skipped.
pub fn write_skipped(out: &mut dyn Write, report: &RunReport) -> io::Result<()> {
    let mut first = true;
    for suite in &report.suites {
        if suite.counters.skipped == 0 {
            continue;
        }
        if first {
            writeln!(out, "\n-----------SKIPPED TESTS:-----------")?;
            first = false;
        }
        for case in &suite.cases {
            if case.status == CaseStatus::Skip {
                writeln!(
                    out,
                    "\nin suite: {}, skipped case: {} (missing resources)",
                    suite.name, case.name
                )?;
            }
        }
    }
    Ok(())
}

/// Print the final summary: total case count plus passed/skipped/failed.
pub fn write_summary(out: &mut dyn Write, report: &RunReport) -> io::Result<()> {
    writeln!(out, "\n------------RESULTS:------------")?;
    writeln!(
        out,
        "\n{} tests completed, {} passed, {} skipped, {} failed\n",
        report.total_cases(),
        report.totals.passed,
        report.totals.skipped,
        report.totals.failed
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suite_report(name: &str, counters: Counters) -> SuiteReport {
        SuiteReport {
            name: name.to_string(),
            counters,
            cases: Vec::new(),
        }
    }

    #[test]
    fn failures_only_policy_tolerates_skips() {
        let report = RunReport::new(
            vec![suite_report(
                "s",
                Counters {
                    passed: 2,
                    failed: 0,
                    skipped: 1,
                },
            )],
            ExitPolicy::FailuresOnly,
        );
        assert!(report.success());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn strict_policy_fails_on_skips() {
        let report = RunReport::new(
            vec![suite_report(
                "s",
                Counters {
                    passed: 2,
                    failed: 0,
                    skipped: 1,
                },
            )],
            ExitPolicy::FailuresOrSkips,
        );
        assert!(!report.success());
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn any_failure_fails_both_policies() {
        for policy in [ExitPolicy::FailuresOnly, ExitPolicy::FailuresOrSkips] {
            let report = RunReport::new(
                vec![suite_report(
                    "s",
                    Counters {
                        passed: 0,
                        failed: 1,
                        skipped: 0,
                    },
                )],
                policy,
            );
            assert_eq!(report.exit_code(), 1);
        }
    }
}
