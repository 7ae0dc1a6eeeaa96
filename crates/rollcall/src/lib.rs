//! Manual-registry unit test harness.
//!
//! Test functions are registered explicitly into suites, suites into a
//! runner; the runner executes everything sequentially, gating each case on
//! declared resource dependencies and aggregating pass/fail/skip outcomes
//! into a human-readable report with a process exit status.
//!
//! This crate provides:
//! - Registration: [`TestSuite::register_case`] and [`TestRunner::register_suite`]
//! - Dependency gating: [`DepSet`] checked through a [`ResourceProbe`]
//! - Assertions: the `expect_*!` macros, recording non-fatal failures on the
//!   executing case
//! - Reporting: live progress symbols plus a final text report and exit status
//! - Structured JSONL run logs: [`structured_log`]

#![forbid(unsafe_code)]

pub mod case;
pub mod config;
pub mod dep;
pub mod expect;
pub mod report;
pub mod runner;
pub mod structured_log;
pub mod suite;

pub use case::{CaseCtx, CaseRecord, CaseStatus, TestCase};
pub use config::{ConfigError, ExitPolicy, RunnerConfig};
pub use dep::{DepSet, FileProbe, ResourceProbe};
pub use report::{CaseReport, RunReport, SuiteReport};
pub use runner::TestRunner;
pub use suite::{Counters, Suite, TestSuite};
