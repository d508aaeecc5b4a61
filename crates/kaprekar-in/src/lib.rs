//! KAPREKAR-IN: Raw Input to Candidate
//!
//! This crate sits between whatever collects user input (a prompt, a form, an
//! HTTP path) and the routine. It normalizes the raw text, validates it, and
//! turns validation failures into a reject verdict carrying the message and
//! suggestions the caller should show before asking again.
//!
//! # Example
//!
//! ```
//! use kaprekar_in::{acquire, AcquireRequest, Verdict};
//!
//! let result = acquire(AcquireRequest { text: " 1_234 ".to_string() });
//! assert_eq!(result.verdict, Verdict::Accept);
//! assert_eq!(result.candidate.unwrap().padded(), "1234");
//! ```

pub mod normalizer;

use kaprekar_core::{candidates, validate, Candidate, ErrorKind, KaprekarError};
use serde::{Deserialize, Serialize};

/// Request to turn raw text into a candidate
#[derive(Debug, Clone, Deserialize)]
pub struct AcquireRequest {
    /// The raw text as typed by the user
    pub text: String,
}

/// The verdict of an acquisition attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Input is a valid candidate
    Accept,
    /// Input was rejected, re-prompt with the clarification
    Reject,
}

/// Result of an acquisition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquireResult {
    /// The verdict
    pub verdict: Verdict,
    /// Text after normalization
    pub normalized: String,
    /// The validated candidate (if Accept)
    pub candidate: Option<Candidate>,
    /// Why the input was rejected (if Reject)
    pub error_kind: Option<ErrorKind>,
    /// Detailed validation error (if Reject)
    pub error: Option<String>,
    /// Message to show the user (if Reject)
    pub clarification: Option<String>,
    /// Inputs that would be accepted (if Reject)
    pub suggestions: Option<Vec<String>>,
}

impl AcquireResult {
    /// Back to a typed result, for callers that only need the candidate
    pub fn into_result(self) -> Result<Candidate, KaprekarError> {
        match (self.candidate, self.error_kind) {
            (Some(candidate), _) => Ok(candidate),
            (None, Some(ErrorKind::DuplicateDigits)) => {
                Err(KaprekarError::DuplicateDigits(self.error.unwrap_or_default()))
            }
            (None, _) => Err(KaprekarError::NotFourDigits(self.error.unwrap_or_default())),
        }
    }
}

/// Number of suggestions offered on reject
const SUGGESTION_COUNT: usize = 3;

/// Normalize, validate, and classify raw input
pub fn acquire(request: AcquireRequest) -> AcquireResult {
    let normalized = normalizer::normalize(&request.text);

    match validate(&normalized) {
        Ok(candidate) => AcquireResult {
            verdict: Verdict::Accept,
            normalized,
            candidate: Some(candidate),
            error_kind: None,
            error: None,
            clarification: None,
            suggestions: None,
        },
        Err(err) => {
            tracing::debug!(input = %request.text, error = %err, "input rejected");
            let kind = err.kind();
            AcquireResult {
                verdict: Verdict::Reject,
                suggestions: Some(suggestions_for(&normalized, kind)),
                clarification: Some(clarify(&normalized, kind).to_string()),
                normalized,
                candidate: None,
                error_kind: Some(kind),
                error: Some(err.to_string()),
            }
        }
    }
}

/// User-facing message for a rejection, telling non-numbers apart from bad numbers
pub fn clarify(normalized: &str, kind: ErrorKind) -> &'static str {
    if kind == ErrorKind::NotFourDigits && !normalizer::is_integer(normalized) {
        "Input must be a valid number"
    } else {
        clarification_for(kind)
    }
}

pub fn clarification_for(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::NotFourDigits => "Number must be exactly 4 digits",
        ErrorKind::DuplicateDigits => "All 4 digits must be different (no repeated digits)",
        ErrorKind::StepLimitExhausted => "Did not reach 6174 within the step limit",
    }
}

/// Candidates to offer instead of a rejected input.
///
/// Inputs that at least parse get the next valid candidates at or above them,
/// wrapping around past 9876.
pub fn suggestions_for(normalized: &str, kind: ErrorKind) -> Vec<String> {
    let near = match (kind, normalized.parse::<u16>()) {
        (ErrorKind::DuplicateDigits, Ok(value)) => Some(value),
        _ => None,
    };

    match near {
        Some(value) => candidates()
            .skip_while(|c| c.get() < value)
            .chain(candidates())
            .take(SUGGESTION_COUNT)
            .map(Candidate::padded)
            .collect(),
        None => vec!["1234".to_string(), "0123".to_string(), "9876".to_string()],
    }
}
