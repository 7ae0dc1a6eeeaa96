//! Test case state: identity, status, and the accumulated failure log.

use serde::{Deserialize, Serialize};

use crate::dep::DepSet;

/// Terminal status of a case.
///
/// Transitions only pass→fail (sticky: once failed, later passing assertions
/// in the same case leave it failed) or pass→skip (exclusive with running the
/// test function at all). A case is never both failed and skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Pass,
    Fail,
    Skip,
}

/// Mutable record backing one case: owned name, status, and failure messages
/// in the order they were recorded.
#[derive(Debug)]
pub struct CaseRecord {
    name: String,
    status: CaseStatus,
    messages: Vec<String>,
}

impl CaseRecord {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CaseStatus::Pass,
            messages: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn status(&self) -> CaseStatus {
        self.status
    }

    /// Failure messages in insertion order.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub(crate) fn record_failure(&mut self, message: String) {
        self.messages.push(message);
        self.status = CaseStatus::Fail;
    }

    pub(crate) fn mark_skipped(&mut self) {
        self.status = CaseStatus::Skip;
    }
}

/// Handle to the case currently executing, passed to its test function.
///
/// Assertion helpers attribute failures through this handle, so every failure
/// lands on the case that raised it. Recording a failure never aborts the
/// case; subsequent assertions still run and their messages still append.
pub struct CaseCtx<'a> {
    record: &'a mut CaseRecord,
}

impl CaseCtx<'_> {
    pub(crate) fn new(record: &mut CaseRecord) -> CaseCtx<'_> {
        CaseCtx { record }
    }

    /// Name of the executing case, for failure attribution.
    #[must_use]
    pub fn name(&self) -> &str {
        self.record.name()
    }

    /// Append a failure message and mark the case failed. Idempotent on
    /// status: a case that already failed stays failed.
    pub fn record_failure(&mut self, message: impl Into<String>) {
        self.record.record_failure(message.into());
    }
}

/// The test function role: receives the fixture produced by the suite's setup
/// hook (when one is installed) and the handle to its own case.
pub type TestFn<F> = Box<dyn FnMut(Option<&mut F>, &mut CaseCtx<'_>)>;

/// One registered unit test: function, record, dependency set, and the opaque
/// fixture arguments passed through unchanged to the setup/teardown hooks.
pub struct TestCase<F, A> {
    pub(crate) record: CaseRecord,
    pub(crate) func: TestFn<F>,
    pub(crate) deps: DepSet,
    pub(crate) args: A,
}

impl<F, A> TestCase<F, A> {
    pub(crate) fn new(
        name: impl Into<String>,
        deps: DepSet,
        args: A,
        func: TestFn<F>,
    ) -> Self {
        Self {
            record: CaseRecord::new(name),
            func,
            deps,
            args,
        }
    }

    #[must_use]
    pub fn record(&self) -> &CaseRecord {
        &self.record
    }

    #[must_use]
    pub fn deps(&self) -> &DepSet {
        &self.deps
    }

    #[must_use]
    pub fn args(&self) -> &A {
        &self.args
    }

    /// Mutable access to the fixture arguments, for init hooks that seed
    /// per-case resources before the run.
    pub fn args_mut(&mut self) -> &mut A {
        &mut self.args
    }
}
