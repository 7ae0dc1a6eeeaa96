//! Structured JSONL logging for harness runs.
//!
//! Provides:
//! - [`LogEntry`]: canonical JSONL log record with required + optional fields.
//! - [`LogEmitter`]: writes JSONL lines to a file or an in-memory buffer.
//! - [`validate_log_line`] / [`validate_log_file`]: schema checks for emitted logs.
//!
//! The log is the machine-readable channel for run data; the runner's text
//! report stays human-readable only.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::case::CaseStatus;

// ---------------------------------------------------------------------------
// Log entry
// ---------------------------------------------------------------------------

/// Severity level for log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Canonical structured log entry.
///
/// Required fields: `timestamp`, `trace_id`, `level`, `event`. Optional
/// fields carry per-case context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    // Required
    pub timestamp: String,
    pub trace_id: String,
    pub level: LogLevel,
    pub event: String,

    // Optional
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suite: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<CaseStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl LogEntry {
    /// Create a new log entry with required fields only. The trace id is
    /// filled in by the emitter if left empty.
    #[must_use]
    pub fn new(level: LogLevel, event: impl Into<String>) -> Self {
        Self {
            timestamp: now_utc(),
            trace_id: String::new(),
            level,
            event: event.into(),
            suite: None,
            case: None,
            outcome: None,
            exit_code: None,
            details: None,
        }
    }

    /// Set the suite name.
    #[must_use]
    pub fn with_suite(mut self, suite: impl Into<String>) -> Self {
        self.suite = Some(suite.into());
        self
    }

    /// Set the case name.
    #[must_use]
    pub fn with_case(mut self, case: impl Into<String>) -> Self {
        self.case = Some(case.into());
        self
    }

    /// Set the case outcome.
    #[must_use]
    pub fn with_outcome(mut self, outcome: CaseStatus) -> Self {
        self.outcome = Some(outcome);
        self
    }

    /// Set the process exit code.
    #[must_use]
    pub fn with_exit_code(mut self, exit_code: i32) -> Self {
        self.exit_code = Some(exit_code);
        self
    }

    /// Set free-form details.
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Serialize to a single JSONL line (no trailing newline).
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// ---------------------------------------------------------------------------
// Log emitter
// ---------------------------------------------------------------------------

/// Writes structured JSONL log entries to a file or an in-memory buffer.
pub struct LogEmitter {
    writer: Box<dyn Write>,
    seq: u64,
    run_id: String,
}

impl LogEmitter {
    /// Create an emitter that writes to a file.
    pub fn to_file(path: &Path, run_id: &str) -> std::io::Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(Self {
            writer: Box::new(std::io::BufWriter::new(file)),
            seq: 0,
            run_id: run_id.to_string(),
        })
    }

    /// Create an emitter that writes to a discarded buffer (for testing).
    #[must_use]
    pub fn to_buffer(run_id: &str) -> Self {
        Self {
            writer: Box::new(Vec::new()),
            seq: 0,
            run_id: run_id.to_string(),
        }
    }

    /// Generate the next trace ID.
    fn next_trace_id(&mut self) -> String {
        self.seq += 1;
        format!("{}::{:03}", self.run_id, self.seq)
    }

    /// Emit a minimal entry for `event`, returning the entry as written.
    pub fn emit(&mut self, level: LogLevel, event: &str) -> std::io::Result<LogEntry> {
        let mut entry = LogEntry::new(level, event);
        entry.trace_id = self.next_trace_id();
        self.emit_entry(entry.clone())?;
        Ok(entry)
    }

    /// Emit an entry, assigning a trace id if the entry carries none.
    pub fn emit_entry(&mut self, mut entry: LogEntry) -> std::io::Result<()> {
        if entry.trace_id.is_empty() {
            entry.trace_id = self.next_trace_id();
        }
        let line = serde_json::to_string(&entry).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{line}")
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LogError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: invalid JSON: {source}")]
    InvalidJson {
        line: usize,
        source: serde_json::Error,
    },
    #[error("line {line}: required field '{field}' is empty")]
    EmptyField { line: usize, field: &'static str },
}

/// Validate a single JSONL line against the log schema.
pub fn validate_log_line(line: &str, line_number: usize) -> Result<LogEntry, LogError> {
    let entry: LogEntry = serde_json::from_str(line).map_err(|source| LogError::InvalidJson {
        line: line_number,
        source,
    })?;
    for (field, value) in [
        ("timestamp", &entry.timestamp),
        ("trace_id", &entry.trace_id),
        ("event", &entry.event),
    ] {
        if value.is_empty() {
            return Err(LogError::EmptyField {
                line: line_number,
                field,
            });
        }
    }
    Ok(entry)
}

/// Validate an entire JSONL file, returning the parsed entries. Blank lines
/// are ignored.
pub fn validate_log_file(path: &Path) -> Result<Vec<LogEntry>, LogError> {
    let content = std::fs::read_to_string(path)?;
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| validate_log_line(line, index + 1))
        .collect()
}

fn now_utc() -> String {
    // Coarse UTC approximation; log consumers need ordering, not calendar
    // accuracy, and this keeps chrono out of the dependency tree.
    let duration = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        1970 + secs / 31_557_600,
        (secs % 31_557_600) / 2_629_800 + 1,
        (secs % 2_629_800) / 86400 + 1,
        (secs % 86400) / 3600,
        (secs % 3600) / 60,
        secs % 60,
        millis,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_serializes_with_lowercase_enums_and_elides_absent_fields() {
        let mut entry = LogEntry::new(LogLevel::Info, "case_complete")
            .with_suite("math")
            .with_case("add_small")
            .with_outcome(CaseStatus::Pass);
        entry.trace_id = "run::001".to_string();
        let line = entry.to_jsonl().expect("entry serializes");
        assert!(line.contains(r#""level":"info""#));
        assert!(line.contains(r#""outcome":"pass""#));
        assert!(!line.contains("exit_code"), "absent fields must be elided");
    }

    #[test]
    fn validate_round_trips_an_emitted_line() {
        let mut entry = LogEntry::new(LogLevel::Error, "case_complete");
        entry.trace_id = "run::002".to_string();
        let line = entry.to_jsonl().expect("entry serializes");
        let parsed = validate_log_line(&line, 1).expect("emitted line validates");
        assert_eq!(parsed.event, "case_complete");
        assert_eq!(parsed.level, LogLevel::Error);
    }

    #[test]
    fn validate_rejects_empty_required_fields() {
        let entry = LogEntry::new(LogLevel::Info, "run_start");
        // trace_id left empty
        let line = entry.to_jsonl().expect("entry serializes");
        match validate_log_line(&line, 3) {
            Err(LogError::EmptyField { line: 3, field }) => assert_eq!(field, "trace_id"),
            other => panic!("expected EmptyField, got {other:?}"),
        }
    }

    #[test]
    fn emitter_assigns_sequential_trace_ids() {
        let mut emitter = LogEmitter::to_buffer("run-42");
        let first = emitter.emit(LogLevel::Info, "run_start").expect("buffer write");
        let second = emitter.emit(LogLevel::Info, "run_complete").expect("buffer write");
        assert_eq!(first.trace_id, "run-42::001");
        assert_eq!(second.trace_id, "run-42::002");
    }

    #[test]
    fn validate_rejects_non_json() {
        assert!(matches!(
            validate_log_line("not json", 1),
            Err(LogError::InvalidJson { line: 1, .. })
        ));
    }
}
