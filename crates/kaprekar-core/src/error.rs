//! Unified Error Model
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable classification of a [`KaprekarError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Not an integer, or outside the zero-padded range [0, 9999].
    NotFourDigits,
    /// The 4-digit zero-padded form repeats a digit.
    DuplicateDigits,
    /// The routine ran out of steps before reaching 6174.
    StepLimitExhausted,
}

impl ErrorKind {
    /// Stable snake_case label, used for metrics and API payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFourDigits => "not_four_digits",
            Self::DuplicateDigits => "duplicate_digits",
            Self::StepLimitExhausted => "step_limit_exhausted",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KaprekarError {
    #[error("INPUT/NOT_FOUR_DIGITS: {0}")]
    NotFourDigits(String),

    #[error("INPUT/DUPLICATE_DIGITS: {0}")]
    DuplicateDigits(String),

    #[error("ROUTINE/EXHAUSTED: did not reach 6174 within {max_steps} steps")]
    StepLimitExhausted { max_steps: usize },
}

impl KaprekarError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFourDigits(_) => ErrorKind::NotFourDigits,
            Self::DuplicateDigits(_) => ErrorKind::DuplicateDigits,
            Self::StepLimitExhausted { .. } => ErrorKind::StepLimitExhausted,
        }
    }
}
