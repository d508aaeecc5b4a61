//! Integration tests for kaprekar-in.
//!
//! These tests feed raw text the way a prompt or form would and check the
//! verdicts, messages and suggestions handed back for re-prompting.

use kaprekar_core::{run, ErrorKind};
use kaprekar_in::{acquire, AcquireRequest, AcquireResult, Verdict};

fn acquire_text(text: &str) -> AcquireResult {
    acquire(AcquireRequest {
        text: text.to_string(),
    })
}

// =============================================================================
// Accepted Input
// =============================================================================

#[test]
fn test_accept_variations() {
    let variations = [
        ("1234", "1234"),
        ("  1234  ", "1234"),
        ("\"1234\"", "1234"),
        ("1_234", "1234"),
        ("+1234", "1234"),
        ("123", "0123"),
        ("0123", "0123"),
    ];

    for (text, padded) in variations {
        let result = acquire_text(text);
        assert_eq!(result.verdict, Verdict::Accept, "Failed for: {}", text);
        assert_eq!(result.candidate.unwrap().padded(), padded, "Wrong candidate for: {}", text);
    }
}

#[test]
fn test_accepted_candidate_runs() {
    let candidate = acquire_text("9876").into_result().unwrap();
    let sequence = run(candidate, 50);
    assert!(sequence.converged());
}

// =============================================================================
// Rejected Input
// =============================================================================

#[test]
fn test_reject_not_a_number() {
    for text in ["", "   ", "abc", "12a4", "12.34", "1,234"] {
        let result = acquire_text(text);
        assert_eq!(result.verdict, Verdict::Reject, "Accepted: {:?}", text);
        assert_eq!(result.error_kind, Some(ErrorKind::NotFourDigits));
        assert_eq!(
            result.clarification.as_deref(),
            Some("Input must be a valid number"),
            "Wrong message for: {:?}",
            text
        );
    }
}

#[test]
fn test_reject_out_of_range() {
    for text in ["12345", "-1234", "10000", "99999999999999999999"] {
        let result = acquire_text(text);
        assert_eq!(result.error_kind, Some(ErrorKind::NotFourDigits), "For: {}", text);
        assert_eq!(
            result.clarification.as_deref(),
            Some("Number must be exactly 4 digits")
        );
        assert_eq!(result.suggestions.unwrap().len(), 3);
    }
}

#[test]
fn test_reject_duplicate_digits() {
    for text in ["1111", "0000", "1123", "7", "2020"] {
        let result = acquire_text(text);
        assert_eq!(result.error_kind, Some(ErrorKind::DuplicateDigits), "For: {}", text);
        assert_eq!(
            result.clarification.as_deref(),
            Some("All 4 digits must be different (no repeated digits)")
        );
        assert!(result.error.unwrap().starts_with("INPUT/DUPLICATE_DIGITS"));
    }
}

#[test]
fn test_suggestions_are_acceptable() {
    for text in ["1111", "5555", "0000", "12345", "nope"] {
        let result = acquire_text(text);
        for suggestion in result.suggestions.unwrap() {
            assert_eq!(
                acquire_text(&suggestion).verdict,
                Verdict::Accept,
                "Suggestion {} for {} is invalid",
                suggestion,
                text
            );
        }
    }
}

#[test]
fn test_result_serializes() {
    let json = serde_json::to_value(acquire_text("1111")).unwrap();
    assert_eq!(json["verdict"], "Reject");
    assert_eq!(json["error_kind"], "DuplicateDigits");
    assert!(json["candidate"].is_null());
}
