//! Sequential suite orchestration and report assembly.

use std::io::{self, Write};

use serde_json::json;

use crate::case::CaseStatus;
use crate::config::{ExitPolicy, RunnerConfig};
use crate::dep::{FileProbe, ResourceProbe};
use crate::report::{self, RunReport, SuiteReport};
use crate::structured_log::{LogEmitter, LogEntry, LogLevel};
use crate::suite::{Counters, Suite};

/// Owns every registered suite and drives the whole run: sequential suite
/// execution in registration order, live progress, aggregation, and the
/// final report.
pub struct TestRunner {
    suites: Vec<Box<dyn Suite>>,
    probe: Box<dyn ResourceProbe>,
    policy: ExitPolicy,
    log: Option<LogEmitter>,
}

impl TestRunner {
    /// Create a runner with the stock filesystem probe and the default exit
    /// policy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            suites: Vec::new(),
            probe: Box::new(FileProbe),
            policy: ExitPolicy::default(),
            log: None,
        }
    }

    /// Create a runner from a config.
    #[must_use]
    pub fn with_config(config: &RunnerConfig) -> Self {
        let mut runner = Self::new();
        runner.policy = config.exit_policy;
        runner
    }

    /// Replace the resource probe used for dependency checks.
    #[must_use]
    pub fn with_probe(mut self, probe: impl ResourceProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    /// Replace the exit policy.
    #[must_use]
    pub fn with_exit_policy(mut self, policy: ExitPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Attach a structured-log emitter; the runner then logs run start/end
    /// and one entry per completed case.
    pub fn attach_log(&mut self, emitter: LogEmitter) {
        self.log = Some(emitter);
    }

    /// Append a suite; suites execute in registration order.
    pub fn register_suite(&mut self, suite: impl Suite + 'static) {
        self.suites.push(Box::new(suite));
    }

    #[must_use]
    pub fn suite_count(&self) -> usize {
        self.suites.len()
    }

    /// Execute every suite and render the full report to `out`.
    ///
    /// Progress symbols and per-suite verdicts print as suites execute; the
    /// FAILURES and SKIPPED TESTS sections and the summary print after all
    /// suites finish. The returned report carries the totals and the exit
    /// status under the configured policy.
    pub fn run(&mut self, out: &mut dyn Write) -> io::Result<RunReport> {
        let policy = self.policy;
        let total_tests: usize = self.suites.iter().map(|s| s.case_count()).sum();
        // Verdict column alignment across all suite rows.
        let alignment = self
            .suites
            .iter()
            .map(|s| s.name().len() + s.case_count())
            .max()
            .unwrap_or(0);

        if let Some(emitter) = self.log.as_mut() {
            emitter.emit_entry(
                LogEntry::new(LogLevel::Info, "run_start")
                    .with_details(json!({ "registered": total_tests })),
            )?;
        }

        writeln!(out, "\nRegistered {total_tests} tests. Starting testing.")?;
        writeln!(out, "\n--------Test Progress:---------\n")?;

        let mut totals = Counters::default();
        let Self {
            suites, probe, log, ..
        } = self;
        for suite in suites.iter_mut() {
            write!(out, "Test Suite: {} ", suite.name())?;
            suite.run(&**probe, out)?;

            let counters = suite.counters();
            let pad = alignment.saturating_sub(suite.name().len() + suite.case_count());
            let verdict = if counters.failed > 0 { "FAILED" } else { "PASSED" };
            writeln!(out, "{:pad$}    {verdict}", "")?;
            totals.merge(counters);

            if let Some(emitter) = log.as_mut() {
                for record in suite.case_records() {
                    let level = match record.status() {
                        CaseStatus::Pass => LogLevel::Info,
                        CaseStatus::Fail => LogLevel::Error,
                        CaseStatus::Skip => LogLevel::Warn,
                    };
                    emitter.emit_entry(
                        LogEntry::new(level, "case_complete")
                            .with_suite(suite.name())
                            .with_case(record.name())
                            .with_outcome(record.status()),
                    )?;
                }
            }
        }

        let suite_reports: Vec<SuiteReport> = suites
            .iter()
            .map(|suite| SuiteReport::collect(&**suite))
            .collect();
        let run_report = RunReport::new(suite_reports, policy);

        report::write_failures(out, &run_report)?;
        report::write_skipped(out, &run_report)?;
        report::write_summary(out, &run_report)?;

        if let Some(emitter) = log.as_mut() {
            emitter.emit_entry(
                LogEntry::new(LogLevel::Info, "run_complete")
                    .with_exit_code(run_report.exit_code())
                    .with_details(json!({
                        "passed": run_report.totals.passed,
                        "failed": run_report.totals.failed,
                        "skipped": run_report.totals.skipped,
                    })),
            )?;
            emitter.flush()?;
        }

        Ok(run_report)
    }
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}
