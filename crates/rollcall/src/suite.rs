//! Suite execution: the dependency-gated setup→test→teardown loop.

use std::io::{self, Write};

use crate::case::{CaseCtx, CaseRecord, CaseStatus, TestCase, TestFn};
use crate::dep::{DepSet, ResourceProbe};

/// Cases preallocated per suite before amortized growth takes over.
const INITIAL_CASE_CAPACITY: usize = 8;

/// Per-suite outcome counters. After a run, `passed + failed + skipped`
/// equals the suite's case count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl Counters {
    #[must_use]
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }

    pub(crate) fn merge(&mut self, other: Counters) {
        self.passed += other.passed;
        self.failed += other.failed;
        self.skipped += other.skipped;
    }
}

/// Setup hook role: produces the fixture object from the case's fixture args.
pub type SetupFn<F, A> = Box<dyn FnMut(&A) -> F>;

/// Teardown hook role: consumes the fixture once the test function returned.
/// Because it takes the fixture by value it runs exactly when setup produced
/// one, regardless of the case's resulting status.
pub type TeardownFn<F, A> = Box<dyn FnMut(F, &A)>;

/// Suite-scope hook role (init/term), invoked once with the suite itself
/// before/after all cases.
pub type SuiteHookFn<F, A> = Box<dyn FnMut(&mut TestSuite<F, A>)>;

/// An ordered collection of cases sharing setup/teardown and optional
/// init/term hooks. Insertion order is execution order; the case list is
/// append-only.
pub struct TestSuite<F, A> {
    name: String,
    cases: Vec<TestCase<F, A>>,
    setup: Option<SetupFn<F, A>>,
    teardown: Option<TeardownFn<F, A>>,
    init: Option<SuiteHookFn<F, A>>,
    term: Option<SuiteHookFn<F, A>>,
    counters: Counters,
}

impl<F, A> TestSuite<F, A> {
    /// Create an empty suite with no hooks installed.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::with_capacity(INITIAL_CASE_CAPACITY),
            setup: None,
            teardown: None,
            init: None,
            term: None,
            counters: Counters::default(),
        }
    }

    /// Install the per-case setup hook.
    #[must_use]
    pub fn with_setup(mut self, setup: impl FnMut(&A) -> F + 'static) -> Self {
        self.setup = Some(Box::new(setup));
        self
    }

    /// Install the per-case teardown hook.
    #[must_use]
    pub fn with_teardown(mut self, teardown: impl FnMut(F, &A) + 'static) -> Self {
        self.teardown = Some(Box::new(teardown));
        self
    }

    /// Install the once-per-suite init hook, run before any case. Init may
    /// seed shared resources consumed by later setups.
    #[must_use]
    pub fn with_init(mut self, init: impl FnMut(&mut TestSuite<F, A>) + 'static) -> Self {
        self.init = Some(Box::new(init));
        self
    }

    /// Install the once-per-suite term hook, run after all cases. Symmetric
    /// with init: releases suite-scoped shared resources.
    #[must_use]
    pub fn with_term(mut self, term: impl FnMut(&mut TestSuite<F, A>) + 'static) -> Self {
        self.term = Some(Box::new(term));
        self
    }

    /// Append a case. Returns its registration index, which is also its
    /// execution position.
    pub fn register_case(
        &mut self,
        name: impl Into<String>,
        deps: DepSet,
        args: A,
        func: impl FnMut(Option<&mut F>, &mut CaseCtx<'_>) + 'static,
    ) -> usize {
        let func: TestFn<F> = Box::new(func);
        self.cases.push(TestCase::new(name, deps, args, func));
        self.cases.len() - 1
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn case_count(&self) -> usize {
        self.cases.len()
    }

    #[must_use]
    pub fn counters(&self) -> Counters {
        self.counters
    }

    #[must_use]
    pub fn case(&self, index: usize) -> Option<&TestCase<F, A>> {
        self.cases.get(index)
    }

    /// Mutable case access, for init hooks that seed per-case state.
    pub fn case_mut(&mut self, index: usize) -> Option<&mut TestCase<F, A>> {
        self.cases.get_mut(index)
    }

    /// Execute every case in registration order.
    ///
    /// Per case: the dependency set is evaluated first; if unmet the case is
    /// skipped and none of setup, the test function, or teardown is invoked.
    /// Otherwise setup (if any) produces the fixture, the test function runs
    /// with it and a handle to its own record, and teardown (if any) consumes
    /// the fixture whatever the resulting status. One progress symbol is
    /// written per completed case: `.` pass, `x` fail, `s` skip.
    pub fn run(&mut self, probe: &dyn ResourceProbe, progress: &mut dyn Write) -> io::Result<()> {
        self.counters = Counters::default();

        if let Some(mut hook) = self.init.take() {
            hook(&mut *self);
            self.init = Some(hook);
        }

        {
            let Self {
                cases,
                setup,
                teardown,
                counters,
                ..
            } = self;
            for case in cases.iter_mut() {
                if case.deps.check(probe) {
                    let mut fixture = setup.as_mut().map(|produce| produce(&case.args));
                    let mut ctx = CaseCtx::new(&mut case.record);
                    (case.func)(fixture.as_mut(), &mut ctx);
                    if let (Some(release), Some(fixture)) = (teardown.as_mut(), fixture.take()) {
                        release(fixture, &case.args);
                    }
                } else {
                    case.record.mark_skipped();
                }
                let symbol = match case.record.status() {
                    CaseStatus::Pass => {
                        counters.passed += 1;
                        b"."
                    }
                    CaseStatus::Fail => {
                        counters.failed += 1;
                        b"x"
                    }
                    CaseStatus::Skip => {
                        counters.skipped += 1;
                        b"s"
                    }
                };
                progress.write_all(symbol)?;
                progress.flush()?;
            }
        }

        if let Some(mut hook) = self.term.take() {
            hook(&mut *self);
            self.term = Some(hook);
        }
        Ok(())
    }
}

/// The seam the runner consumes, so suites with different fixture and
/// argument types can be registered side by side.
pub trait Suite {
    fn name(&self) -> &str;
    fn case_count(&self) -> usize;
    fn run(&mut self, probe: &dyn ResourceProbe, progress: &mut dyn Write) -> io::Result<()>;
    fn counters(&self) -> Counters;
    /// Case records in registration order, for reporting.
    fn case_records(&self) -> Vec<&CaseRecord>;
}

impl<F, A> Suite for TestSuite<F, A> {
    fn name(&self) -> &str {
        TestSuite::name(self)
    }

    fn case_count(&self) -> usize {
        TestSuite::case_count(self)
    }

    fn run(&mut self, probe: &dyn ResourceProbe, progress: &mut dyn Write) -> io::Result<()> {
        TestSuite::run(self, probe, progress)
    }

    fn counters(&self) -> Counters {
        TestSuite::counters(self)
    }

    fn case_records(&self) -> Vec<&CaseRecord> {
        self.cases.iter().map(TestCase::record).collect()
    }
}
