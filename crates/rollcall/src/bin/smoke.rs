//! Self-check driver for the rollcall harness.
//!
//! Registers demonstration suites against the harness itself and exits with
//! the runner's status. Intentionally failing and dependency-gated suites are
//! opt-in so the default invocation stays green.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use rollcall::structured_log::LogEmitter;
use rollcall::{
    DepSet, ExitPolicy, RunnerConfig, TestRunner, TestSuite, expect_array, expect_eq, expect_ge,
    expect_ne, expect_some, expect_true,
};

/// Self-check driver for the rollcall harness.
#[derive(Debug, Parser)]
#[command(name = "rollcall-smoke")]
#[command(about = "Exercise the rollcall harness end to end")]
struct Cli {
    /// Optional JSON config file (exit policy, log path).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write a structured JSONL run log to this path.
    #[arg(long)]
    log: Option<PathBuf>,
    /// Treat skipped cases as run failures.
    #[arg(long)]
    strict_skips: bool,
    /// Register a suite with intentionally failing cases.
    #[arg(long)]
    with_failures: bool,
    /// Register a suite gated on a resource that does not exist.
    #[arg(long)]
    with_skips: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("smoke: {err}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => RunnerConfig::from_file(path)?,
        None => RunnerConfig::default(),
    };
    if cli.strict_skips {
        config.exit_policy = ExitPolicy::FailuresOrSkips;
    }

    let mut runner = TestRunner::with_config(&config);
    if let Some(path) = cli.log.as_ref().or(config.log_path.as_ref()) {
        runner.attach_log(LogEmitter::to_file(path, "smoke")?);
    }

    runner.register_suite(arithmetic_suite());
    runner.register_suite(buffer_suite());
    runner.register_suite(scratch_suite());
    if cli.with_failures {
        runner.register_suite(failing_suite());
    }
    if cli.with_skips {
        runner.register_suite(gated_suite());
    }

    let mut stdout = std::io::stdout().lock();
    let report = runner.run(&mut stdout)?;
    Ok(if report.success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Hook-free suite: pure assertions, no fixture.
fn arithmetic_suite() -> TestSuite<(), ()> {
    let mut suite = TestSuite::new("arithmetic");
    suite.register_case("add_small", DepSet::new(), (), |_, ctx| {
        expect_eq!(ctx, 2 + 2, 4);
        expect_ne!(ctx, 2 + 2, 5);
    });
    suite.register_case("ordering", DepSet::new(), (), |_, ctx| {
        expect_ge!(ctx, 10, 10);
        expect_true!(ctx, 3 < 5);
    });
    suite
}

/// Suite with the full hook set: setup builds a buffer from the case's seed
/// length, teardown consumes it.
fn buffer_suite() -> TestSuite<Vec<u8>, usize> {
    let mut suite = TestSuite::new("buffer")
        .with_setup(|len: &usize| vec![0u8; *len])
        .with_teardown(|buffer: Vec<u8>, _len: &usize| drop(buffer));
    suite.register_case("seeded_len", DepSet::new(), 16, |buffer, ctx| {
        expect_some!(ctx, buffer.as_ref());
        if let Some(buffer) = buffer {
            expect_eq!(ctx, buffer.len(), 16);
            buffer.push(1);
            expect_eq!(ctx, buffer.len(), 17);
        }
    });
    suite.register_case("empty_seed", DepSet::new(), 0, |buffer, ctx| {
        if let Some(buffer) = buffer {
            expect_true!(ctx, buffer.is_empty());
        }
    });
    suite
}

/// Suite whose init hook seeds a scratch file that its case declares as a
/// dependency; the term hook removes it again.
fn scratch_suite() -> TestSuite<String, PathBuf> {
    let scratch = std::env::temp_dir().join("rollcall-smoke-scratch.txt");
    let seed = scratch.clone();
    let clean = scratch.clone();
    let mut suite = TestSuite::new("scratch")
        .with_init(move |_: &mut TestSuite<String, PathBuf>| {
            let _ = std::fs::write(&seed, "seeded");
        })
        .with_setup(|path: &PathBuf| std::fs::read_to_string(path).unwrap_or_default())
        .with_teardown(|contents: String, _: &PathBuf| drop(contents))
        .with_term(move |_: &mut TestSuite<String, PathBuf>| {
            let _ = std::fs::remove_file(&clean);
        });
    let deps: DepSet = [scratch.to_string_lossy().into_owned()].into_iter().collect();
    suite.register_case("seeded_resource", deps, scratch, |contents, ctx| {
        expect_some!(ctx, contents.as_ref());
        if let Some(contents) = contents {
            expect_eq!(ctx, contents.as_str(), "seeded");
        }
    });
    suite
}

/// Intentionally failing suite, to showcase the FAILURES section.
fn failing_suite() -> TestSuite<(), ()> {
    let mut suite = TestSuite::new("showcase_failures");
    suite.register_case("bad_sum", DepSet::new(), (), |_, ctx| {
        expect_eq!(ctx, 1 + 1, 3);
        expect_true!(ctx, false);
    });
    suite.register_case("bad_array", DepSet::new(), (), |_, ctx| {
        let actual = [1u32, 2, 9, 4];
        let expected = [1u32, 2, 3, 4];
        expect_array!(ctx, actual, expected, |index, a: &u32, e: &u32, buf: &mut String| {
            if a == e {
                true
            } else {
                buf.push_str(&format!("index {index}: actual {a}, expected {e}\n"));
                false
            }
        });
    });
    suite
}

/// Suite whose only case depends on a resource that does not exist, to
/// showcase the SKIPPED TESTS section.
fn gated_suite() -> TestSuite<(), ()> {
    let mut suite = TestSuite::new("showcase_skips");
    let deps: DepSet = ["rollcall-smoke-missing-resource.txt"].into_iter().collect();
    suite.register_case("needs_missing_file", deps, (), |_, ctx| {
        expect_true!(ctx, true);
    });
    suite
}
