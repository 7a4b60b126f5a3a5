//! Human-readable reports of judge results.
//!
//! Both entry points are pure: the same `JudgeResult` always yields the same
//! text. The glyphs below are consumed by the front end as well as shown to
//! the user, so they are part of the output contract.
use crate::schema::{JudgeResult, TestOutcome};
use std::fmt::Write;

/// Present in a submission report iff every test passed.
pub const SUCCESS_MARKER: &str = "🎉";
pub const PASSED_LABEL: &str = "✓ PASSED";
pub const FAILED_LABEL: &str = "✗ FAILED";

const HEAVY_RULE: &str = "═══════════════════════════════════════";
const LIGHT_RULE: &str = "───────────────────────────────────────";
const ACCEPTED_CLOSING: &str = "Congratulations! Your solution passed every test, \
including the hidden ones. Try another problem to keep the streak going.";
const FAILURE_HINT: &str = "Hint: debug against the failing input shown above, \
and watch for edge cases the sample tests do not cover.";

fn write_time(out: &mut String, label: &str, seconds: Option<f64>) {
    if let Some(t) = seconds {
        let _ = writeln!(out, "{}: {:.3}s", label, t);
    }
}

fn write_case(out: &mut String, index: usize, case: &TestOutcome) {
    let _ = writeln!(
        out,
        "\nTest Case {}: {}",
        index,
        if case.passed { PASSED_LABEL } else { FAILED_LABEL }
    );
    let _ = writeln!(out, "Input: {}", case.input);
    let _ = writeln!(out, "Expected: {}", case.expected_output);
    if let Some(got) = &case.actual_output {
        let _ = writeln!(out, "Got: {}", got);
    }
    if let Some(err) = &case.error {
        let _ = writeln!(out, "Error: {}", err);
    }
    write_time(out, "Time", case.execution_time);
    out.push_str(LIGHT_RULE);
    out.push('\n');
}

/// Full report of a run against the sample tests: summary, then every case.
pub fn format_run(result: &JudgeResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}\n", result.message);
    let _ = writeln!(out, "Total Tests: {}", result.total_tests);
    let _ = writeln!(out, "Passed: {}", result.passed_tests);
    let _ = writeln!(out, "Failed: {}", result.failed());
    write_time(&mut out, "Execution Time", result.execution_time);
    out.push('\n');

    if !result.test_results.is_empty() {
        out.push_str(HEAVY_RULE);
        out.push('\n');
        for (i, case) in result.test_results.iter().enumerate() {
            write_case(&mut out, i + 1, case);
        }
    }
    out
}

/// Condensed report of a submission.
///
/// Only the first failing case is revealed; the rest of the hidden suite
/// stays hidden.
pub fn format_submit(result: &JudgeResult) -> String {
    let mut out = String::new();
    if result.all_passed() {
        let _ = writeln!(out, "{} Accepted! {}\n", SUCCESS_MARKER, SUCCESS_MARKER);
        let _ = writeln!(out, "Passed: {}/{}", result.passed_tests, result.total_tests);
        write_time(&mut out, "Execution Time", result.execution_time);
        out.push('\n');
        out.push_str(ACCEPTED_CLOSING);
        out.push('\n');
        return out;
    }

    let _ = writeln!(out, "✗ Wrong Answer\n");
    let _ = writeln!(out, "Passed: {}/{}", result.passed_tests, result.total_tests);
    let _ = writeln!(out, "Failed: {}", result.failed());
    write_time(&mut out, "Execution Time", result.execution_time);
    out.push('\n');
    if let Some((index, case)) = result.first_failure() {
        out.push_str(HEAVY_RULE);
        out.push('\n');
        write_case(&mut out, index, case);
        out.push('\n');
    }
    out.push_str(FAILURE_HINT);
    out.push('\n');
    out
}

/// Whether a formatted report is an accepted submission.
pub fn is_success(report: &str) -> bool {
    report.contains(SUCCESS_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(passed: bool, input: &str, expected: &str, got: Option<&str>) -> TestOutcome {
        TestOutcome {
            input: input.to_string(),
            expected_output: expected.to_string(),
            actual_output: got.map(str::to_string),
            error: None,
            execution_time: None,
            passed,
        }
    }
    fn result(total: u32, passed: u32, cases: Vec<TestOutcome>) -> JudgeResult {
        JudgeResult {
            message: String::from("Execution completed"),
            total_tests: total,
            passed_tests: passed,
            execution_time: Some(0.0421),
            test_results: cases,
        }
    }

    #[test]
    fn run_lists_every_case_in_order() {
        let r = result(
            3,
            2,
            vec![
                case(true, "1", "2", Some("2")),
                case(false, "2", "4", Some("5")),
                case(true, "3", "6", Some("6")),
            ],
        );
        let text = format_run(&r);
        assert_eq!(text.matches("Test Case ").count(), 3);
        let first = text.find("Test Case 1: ✓ PASSED").unwrap();
        let second = text.find("Test Case 2: ✗ FAILED").unwrap();
        let third = text.find("Test Case 3: ✓ PASSED").unwrap();
        assert!(first < second && second < third);
        assert!(text.starts_with("Execution completed\n\nTotal Tests: 3\nPassed: 2\nFailed: 1\n"));
        assert!(text.contains("Execution Time: 0.042s\n"));
    }

    #[test]
    fn run_case_block_has_exact_layout() {
        let mut c = case(false, "[1,2]", "3", None);
        c.error = Some(String::from("ZeroDivisionError"));
        c.execution_time = Some(0.0016);
        let text = format_run(&result(1, 0, vec![c]));
        let expected = format!(
            "\nTest Case 1: ✗ FAILED\nInput: [1,2]\nExpected: 3\nError: ZeroDivisionError\nTime: 0.002s\n{}\n",
            LIGHT_RULE
        );
        assert!(text.ends_with(&expected), "{}", text);
        assert!(!text.contains("Got:"));
    }

    #[test]
    fn missing_time_is_omitted() {
        let mut r = result(2, 2, Vec::new());
        r.execution_time = None;
        for text in [format_run(&r), format_submit(&r)].iter() {
            assert!(!text.contains("Execution Time"));
            assert!(!text.contains("NaN"));
            assert!(!text.contains("undefined"));
        }
    }

    #[test]
    fn zero_tests_formats_cleanly() {
        let r = result(0, 0, Vec::new());
        let text = format_run(&r);
        assert!(text.contains("Total Tests: 0\nPassed: 0\nFailed: 0\n"));
        assert!(!text.contains(HEAVY_RULE));
    }

    #[test]
    fn empty_results_still_summarise() {
        let text = format_run(&result(4, 1, Vec::new()));
        assert!(text.contains("Failed: 3"));
        assert!(!text.contains("Test Case"));
    }

    #[test]
    fn accepted_submission_hides_cases() {
        let r = result(
            5,
            5,
            (0..5).map(|i| case(true, &i.to_string(), "x", Some("x"))).collect(),
        );
        let text = format_submit(&r);
        assert!(is_success(&text));
        assert!(text.contains("Passed: 5/5"));
        assert!(!text.contains("Test Case"));
        assert!(!text.contains("Input:"));
    }

    #[test]
    fn rejected_submission_shows_first_failure_only() {
        let r = result(
            3,
            2,
            vec![
                case(true, "1", "2", Some("2")),
                case(false, "5", "10", Some("9")),
                case(true, "7", "14", Some("14")),
            ],
        );
        let text = format_submit(&r);
        assert!(!is_success(&text));
        assert!(text.contains("Passed: 2/3\nFailed: 1\n"));
        assert_eq!(text.matches("Test Case ").count(), 1);
        assert!(text.contains("Test Case 2: ✗ FAILED\nInput: 5\nExpected: 10\nGot: 9\n"));
        assert!(text.contains(FAILURE_HINT));
    }

    #[test]
    fn lowest_failing_index_wins() {
        let r = result(
            4,
            1,
            vec![
                case(true, "a", "a", None),
                case(true, "b", "b", None),
                case(false, "c", "C", None),
                case(false, "d", "D", None),
            ],
        );
        let text = format_submit(&r);
        assert!(text.contains("Test Case 3: ✗ FAILED\nInput: c\n"));
        assert!(!text.contains("Input: d"));
    }

    #[test]
    fn inconsistent_failure_degrades_to_summary() {
        let r = result(3, 1, vec![case(true, "1", "1", None)]);
        let text = format_submit(&r);
        assert!(text.contains("Passed: 1/3"));
        assert!(!text.contains("Test Case"));
        assert!(text.ends_with(&format!("{}\n", FAILURE_HINT)));
    }

    #[test]
    fn formatting_is_deterministic() {
        let r = result(2, 1, vec![case(true, "1", "1", None), case(false, "2", "3", None)]);
        assert_eq!(format_run(&r), format_run(&r));
        assert_eq!(format_submit(&r), format_submit(&r));
    }
}
