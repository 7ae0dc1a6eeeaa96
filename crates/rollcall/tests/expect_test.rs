//! Integration test: assertion helpers.
//!
//! Validates that:
//! 1. Every failure message carries the condition, source location, and the
//!    executing case's name.
//! 2. Passing assertions record nothing.
//! 3. The array assertion accumulates per-element detail into exactly one
//!    failure record, truncating after the element-failure limit.
//!
//! Run: cargo test -p rollcall --test expect_test

use rollcall::expect::ARRAY_FAILURE_LIMIT;
use rollcall::{
    CaseStatus, DepSet, ResourceProbe, TestSuite, expect_array, expect_eq, expect_false,
    expect_ge, expect_gt, expect_le, expect_lt, expect_ne, expect_none, expect_some, expect_true,
};

struct AllowAll;

impl ResourceProbe for AllowAll {
    fn available(&self, _id: &str) -> bool {
        true
    }
}

fn run_single_case(
    name: &str,
    func: impl FnMut(Option<&mut ()>, &mut rollcall::CaseCtx<'_>) + 'static,
) -> (CaseStatus, Vec<String>) {
    let mut suite: TestSuite<(), ()> = TestSuite::new("expect");
    suite.register_case(name, DepSet::new(), (), func);
    suite
        .run(&AllowAll, &mut Vec::<u8>::new())
        .expect("in-memory progress sink");
    let record = suite.case(0).expect("registered case").record();
    (record.status(), record.messages().to_vec())
}

#[test]
fn passing_assertions_record_nothing() {
    let (status, messages) = run_single_case("all_green", |_, ctx| {
        expect_true!(ctx, 1 < 2);
        expect_false!(ctx, 1 > 2);
        expect_eq!(ctx, "a", "a");
        expect_ne!(ctx, "a", "b");
        expect_lt!(ctx, 1, 2);
        expect_le!(ctx, 2, 2);
        expect_gt!(ctx, 3, 2);
        expect_ge!(ctx, 3, 3);
        expect_some!(ctx, Some(1));
        expect_none!(ctx, None::<u32>);
        let same = [1u8, 2];
        expect_array!(ctx, same, same, |_, a: &u8, e: &u8, _buf: &mut String| a == e);
    });
    assert_eq!(status, CaseStatus::Pass);
    assert!(messages.is_empty());
}

#[test]
fn failure_message_names_condition_location_and_case() {
    let (status, messages) = run_single_case("message_shape", |_, ctx| {
        expect_eq!(ctx, 1 + 1, 3);
    });
    assert_eq!(status, CaseStatus::Fail);
    assert_eq!(messages.len(), 1);
    let message = &messages[0];
    assert!(
        message.contains("`1 + 1` and `3` should be equal"),
        "condition missing from: {message}"
    );
    assert!(
        message.contains("expect_test.rs"),
        "source location missing from: {message}"
    );
    assert!(
        message.contains("in case: message_shape"),
        "case name missing from: {message}"
    );
}

#[test]
fn each_comparison_macro_reports_its_own_shape() {
    let (status, messages) = run_single_case("comparisons", |_, ctx| {
        expect_lt!(ctx, 2, 1);
        expect_le!(ctx, 3, 2);
        expect_gt!(ctx, 1, 2);
        expect_ge!(ctx, 1, 2);
        expect_some!(ctx, None::<u8>);
        expect_none!(ctx, Some(9));
    });
    assert_eq!(status, CaseStatus::Fail);
    let joined = messages.join("\n---\n");
    assert_eq!(messages.len(), 6);
    assert!(joined.contains("`2` should be less than `1`"));
    assert!(joined.contains("`3` should be less than or equal to `2`"));
    assert!(joined.contains("`1` should be greater than `2`"));
    assert!(joined.contains("`1` should be greater than or equal to `2`"));
    assert!(joined.contains("`None::<u8>` should be Some"));
    assert!(joined.contains("`Some(9)` should be None"));
}

#[test]
fn array_assertion_truncates_and_records_exactly_once() {
    // 15 elements, the first 11 mismatch: the per-element buffer holds the
    // limit's worth of messages plus one truncation notice, and the case
    // gains exactly one failure record.
    let (status, messages) = run_single_case("array_truncation", |_, ctx| {
        let actual: Vec<i64> = (0..15).map(|i| if i < 11 { -1 } else { i }).collect();
        let expected: Vec<i64> = (0..15).collect();
        expect_array!(ctx, actual, expected, |i, a: &i64, e: &i64, buf: &mut String| {
            if a == e {
                true
            } else {
                buf.push_str(&format!("elem {i}: {a} != {e}\n"));
                false
            }
        });
    });
    assert_eq!(status, CaseStatus::Fail);
    assert_eq!(messages.len(), 1, "one aggregated record, not one per element");
    let message = &messages[0];
    assert_eq!(message.matches("elem ").count(), ARRAY_FAILURE_LIMIT);
    assert!(message.contains("element failures exceeded limit"));
    assert!(message.contains("in case: array_truncation"));
}

#[test]
fn array_assertion_with_few_failures_keeps_all_detail() {
    let (status, messages) = run_single_case("array_small", |_, ctx| {
        let actual = [1u32, 9, 3, 9];
        let expected = [1u32, 2, 3, 4];
        expect_array!(ctx, actual, expected, |i, a: &u32, e: &u32, buf: &mut String| {
            if a == e {
                true
            } else {
                buf.push_str(&format!("elem {i}: {a} != {e}\n"));
                false
            }
        });
    });
    assert_eq!(status, CaseStatus::Fail);
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("elem 1: 9 != 2"));
    assert!(messages[0].contains("elem 3: 9 != 4"));
    assert!(!messages[0].contains("exceeded limit"));
}
