//! Assertion helpers for test functions.
//!
//! Every `expect_*!` macro records a non-fatal failure through the case's
//! [`CaseCtx`](crate::case::CaseCtx) handle and returns: the rest of the test
//! function keeps running and later failures keep appending. Each message
//! carries the violated condition, the source location of the assertion, and
//! the name of the executing case.

/// Element failures recorded by [`expect_array!`](crate::expect_array) before
/// comparison stops and a truncation notice is appended.
pub const ARRAY_FAILURE_LIMIT: usize = 10;

/// Drive a per-element comparison over two sequences, accumulating the
/// callable's messages into one shared buffer.
///
/// The callable receives the element index, both elements, and the buffer; it
/// appends whatever detail it wants and returns whether the element passed.
/// After [`ARRAY_FAILURE_LIMIT`] element failures, remaining elements are not
/// compared and a single truncation notice is appended. Returns the
/// accumulated buffer when at least one element failed, `None` when the
/// sequences matched. Unequal lengths fail immediately without comparing
/// elements.
pub fn compare_elements<T>(
    actual: &[T],
    expected: &[T],
    mut compare: impl FnMut(usize, &T, &T, &mut String) -> bool,
) -> Option<String> {
    if actual.len() != expected.len() {
        return Some(format!(
            "length mismatch: actual has {} elements, expected has {}\n",
            actual.len(),
            expected.len()
        ));
    }
    let mut detail = String::new();
    let mut failures = 0usize;
    for (index, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        if failures >= ARRAY_FAILURE_LIMIT {
            detail.push_str("element failures exceeded limit, output truncated\n");
            break;
        }
        if !compare(index, a, e, &mut detail) {
            failures += 1;
        }
    }
    (failures > 0).then_some(detail)
}

/// Record a failure unless the condition is true.
#[macro_export]
macro_rules! expect_true {
    ($ctx:expr, $cond:expr) => {{
        let value: bool = $cond;
        if !value {
            let msg = format!(
                "assertion failure: `{}` should be true\nat {}:{}; in case: {}",
                stringify!($cond),
                file!(),
                line!(),
                $ctx.name()
            );
            $ctx.record_failure(msg);
        }
    }};
}

/// Record a failure unless the condition is false.
#[macro_export]
macro_rules! expect_false {
    ($ctx:expr, $cond:expr) => {{
        let value: bool = $cond;
        if value {
            let msg = format!(
                "assertion failure: `{}` should be false\nat {}:{}; in case: {}",
                stringify!($cond),
                file!(),
                line!(),
                $ctx.name()
            );
            $ctx.record_failure(msg);
        }
    }};
}

/// Record a failure unless the two values compare equal.
#[macro_export]
macro_rules! expect_eq {
    ($ctx:expr, $a:expr, $b:expr) => {{
        let (lhs, rhs) = (&$a, &$b);
        if !(lhs == rhs) {
            let msg = format!(
                "assertion failure: `{}` and `{}` should be equal\nat {}:{}; in case: {}",
                stringify!($a),
                stringify!($b),
                file!(),
                line!(),
                $ctx.name()
            );
            $ctx.record_failure(msg);
        }
    }};
}

/// Record a failure if the two values compare equal.
#[macro_export]
macro_rules! expect_ne {
    ($ctx:expr, $a:expr, $b:expr) => {{
        let (lhs, rhs) = (&$a, &$b);
        if lhs == rhs {
            let msg = format!(
                "assertion failure: `{}` and `{}` should not be equal\nat {}:{}; in case: {}",
                stringify!($a),
                stringify!($b),
                file!(),
                line!(),
                $ctx.name()
            );
            $ctx.record_failure(msg);
        }
    }};
}

/// Record a failure unless `a < b`.
#[macro_export]
macro_rules! expect_lt {
    ($ctx:expr, $a:expr, $b:expr) => {{
        let (lhs, rhs) = (&$a, &$b);
        if !(lhs < rhs) {
            let msg = format!(
                "assertion failure: `{}` should be less than `{}`\nat {}:{}; in case: {}",
                stringify!($a),
                stringify!($b),
                file!(),
                line!(),
                $ctx.name()
            );
            $ctx.record_failure(msg);
        }
    }};
}

/// Record a failure unless `a <= b`.
#[macro_export]
macro_rules! expect_le {
    ($ctx:expr, $a:expr, $b:expr) => {{
        let (lhs, rhs) = (&$a, &$b);
        if !(lhs <= rhs) {
            let msg = format!(
                "assertion failure: `{}` should be less than or equal to `{}`\nat {}:{}; in case: {}",
                stringify!($a),
                stringify!($b),
                file!(),
                line!(),
                $ctx.name()
            );
            $ctx.record_failure(msg);
        }
    }};
}

/// Record a failure unless `a > b`.
#[macro_export]
macro_rules! expect_gt {
    ($ctx:expr, $a:expr, $b:expr) => {{
        let (lhs, rhs) = (&$a, &$b);
        if !(lhs > rhs) {
            let msg = format!(
                "assertion failure: `{}` should be greater than `{}`\nat {}:{}; in case: {}",
                stringify!($a),
                stringify!($b),
                file!(),
                line!(),
                $ctx.name()
            );
            $ctx.record_failure(msg);
        }
    }};
}

/// Record a failure unless `a >= b`.
#[macro_export]
macro_rules! expect_ge {
    ($ctx:expr, $a:expr, $b:expr) => {{
        let (lhs, rhs) = (&$a, &$b);
        if !(lhs >= rhs) {
            let msg = format!(
                "assertion failure: `{}` should be greater than or equal to `{}`\nat {}:{}; in case: {}",
                stringify!($a),
                stringify!($b),
                file!(),
                line!(),
                $ctx.name()
            );
            $ctx.record_failure(msg);
        }
    }};
}

/// Record a failure unless the option holds a value.
#[macro_export]
macro_rules! expect_some {
    ($ctx:expr, $opt:expr) => {{
        let value = &$opt;
        if value.is_none() {
            let msg = format!(
                "assertion failure: `{}` should be Some\nat {}:{}; in case: {}",
                stringify!($opt),
                file!(),
                line!(),
                $ctx.name()
            );
            $ctx.record_failure(msg);
        }
    }};
}

/// Record a failure unless the option is empty.
#[macro_export]
macro_rules! expect_none {
    ($ctx:expr, $opt:expr) => {{
        let value = &$opt;
        if value.is_some() {
            let msg = format!(
                "assertion failure: `{}` should be None\nat {}:{}; in case: {}",
                stringify!($opt),
                file!(),
                line!(),
                $ctx.name()
            );
            $ctx.record_failure(msg);
        }
    }};
}

/// Compare two equal-length sequences element by element with a comparison
/// callable, recording at most one aggregated failure on the case.
///
/// The callable has signature `FnMut(usize, &T, &T, &mut String) -> bool` and
/// appends its own per-element detail to the shared buffer. See
/// [`compare_elements`](crate::expect::compare_elements) for the truncation
/// protocol.
#[macro_export]
macro_rules! expect_array {
    ($ctx:expr, $actual:expr, $expected:expr, $compare:expr) => {{
        if let Some(detail) = $crate::expect::compare_elements(&$actual, &$expected, $compare) {
            let msg = format!(
                "assertion failure: array comparison of `{}` against `{}` failed\nat {}:{}; in case: {}\nfailed elements:\n{}",
                stringify!($actual),
                stringify!($expected),
                file!(),
                line!(),
                $ctx.name(),
                detail
            );
            $ctx.record_failure(msg);
        }
    }};
}
