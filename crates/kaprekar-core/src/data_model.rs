//! Data Model: PaddedValue, Candidate, Step, Sequence
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::KaprekarError;

/// An integer in [0, 9999], always read as its 4-character zero-padded form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct PaddedValue(u16);

impl PaddedValue {
    pub const MAX: u16 = 9999;

    /// Kaprekar's constant, the fixed point of the routine.
    pub const KAPREKAR: PaddedValue = PaddedValue(6174);

    pub fn new(value: u16) -> Option<Self> {
        (value <= Self::MAX).then_some(Self(value))
    }

    pub fn get(self) -> u16 {
        self.0
    }

    /// Digits of the zero-padded form, most significant first (`999` -> `[0, 9, 9, 9]`).
    pub fn digits(self) -> [u8; 4] {
        let v = self.0;
        [
            (v / 1000) as u8,
            (v / 100 % 10) as u8,
            (v / 10 % 10) as u8,
            (v % 10) as u8,
        ]
    }

    pub fn from_digits(digits: [u8; 4]) -> Self {
        debug_assert!(digits.iter().all(|&d| d <= 9), "not decimal digits: {:?}", digits);
        let value = digits
            .iter()
            .fold(0u16, |acc, &d| acc * 10 + u16::from(d));
        Self(value)
    }

    pub fn padded(self) -> String {
        format!("{:04}", self.0)
    }

    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    pub fn has_distinct_digits(self) -> bool {
        let mut seen = [false; 10];
        for d in self.digits() {
            let slot = &mut seen[usize::from(d)];
            if *slot {
                return false;
            }
            *slot = true;
        }
        true
    }

    pub fn is_kaprekar(self) -> bool {
        self == Self::KAPREKAR
    }
}

impl TryFrom<u16> for PaddedValue {
    type Error = KaprekarError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| {
            KaprekarError::NotFourDigits(format!("{} does not fit in 4 digits", value))
        })
    }
}

impl From<PaddedValue> for u16 {
    fn from(value: PaddedValue) -> Self {
        value.0
    }
}

impl fmt::Display for PaddedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// A validated starting value: four pairwise distinct digits, leading zeros included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Candidate(PaddedValue);

impl Candidate {
    pub fn new(value: PaddedValue) -> Result<Self, KaprekarError> {
        if value.has_distinct_digits() {
            Ok(Self(value))
        } else {
            Err(KaprekarError::DuplicateDigits(format!(
                "{} repeats a digit",
                value.padded()
            )))
        }
    }

    pub fn value(self) -> PaddedValue {
        self.0
    }

    pub fn get(self) -> u16 {
        self.0.get()
    }

    /// The zero-padded 4-character digit string (`123` -> `"0123"`).
    pub fn padded(self) -> String {
        self.0.padded()
    }
}

impl TryFrom<u16> for Candidate {
    type Error = KaprekarError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(PaddedValue::try_from(value)?)
    }
}

impl From<Candidate> for u16 {
    fn from(candidate: Candidate) -> Self {
        candidate.get()
    }
}

impl From<Candidate> for PaddedValue {
    fn from(candidate: Candidate) -> Self {
        candidate.0
    }
}

impl FromStr for Candidate {
    type Err = KaprekarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::routine::validate(s)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Result of one descending-minus-ascending transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transform {
    pub descending: PaddedValue,
    pub ascending: PaddedValue,
    pub difference: PaddedValue,
}

impl Transform {
    pub fn descending_form(&self) -> String {
        self.descending.padded()
    }

    pub fn ascending_form(&self) -> String {
        self.ascending.padded()
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} = {}", self.descending, self.ascending, self.difference)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepLabel {
    Start,
    Index(usize),
}

impl fmt::Display for StepLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("Start"),
            Self::Index(i) => write!(f, "{}", i),
        }
    }
}

/// One entry of a [`Sequence`]. Only the start step lacks a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub label: StepLabel,
    pub value: PaddedValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<Transform>,
}

impl Step {
    pub fn start(value: PaddedValue) -> Self {
        Self {
            label: StepLabel::Start,
            value,
            transform: None,
        }
    }

    pub fn transformed(index: usize, transform: Transform) -> Self {
        Self {
            label: StepLabel::Index(index),
            value: transform.difference,
            transform: Some(transform),
        }
    }

    pub fn is_start(&self) -> bool {
        matches!(self.label, StepLabel::Start)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Converged,
    Exhausted,
}

/// Full history of one run, from the start step to a terminal outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    pub candidate: Candidate,
    pub max_steps: usize,
    pub steps: Vec<Step>,
    pub outcome: Outcome,
}

impl Sequence {
    pub fn converged(&self) -> bool {
        self.outcome == Outcome::Converged
    }

    /// Number of transformation steps, excluding the start step.
    pub fn step_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn final_value(&self) -> PaddedValue {
        self.steps
            .last()
            .map(|s| s.value)
            .unwrap_or_else(|| self.candidate.value())
    }

    pub fn transformed_steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(|s| !s.is_start())
    }

    /// Surfaces exhaustion as a typed error while keeping the Sequence intact.
    pub fn check_converged(&self) -> Result<(), KaprekarError> {
        match self.outcome {
            Outcome::Converged => Ok(()),
            Outcome::Exhausted => Err(KaprekarError::StepLimitExhausted {
                max_steps: self.max_steps,
            }),
        }
    }
}
